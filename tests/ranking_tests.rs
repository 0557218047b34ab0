mod common;

use carshare::{engine, prelude::*};
use common::{fixture_repository, station};

fn codes(ranked: &[RankedStation]) -> Vec<&str> {
    ranked.iter().map(|station| station.code.as_ref()).collect()
}

fn values(ranked: &[RankedStation]) -> Vec<usize> {
    ranked.iter().map(|station| station.value).collect()
}

#[test]
fn fleet_size_example() {
    let stations = [
        station("S1", "東京都港区", &["A", "B"]),
        station("S2", "東京都港区", &["A"]),
        station("S3", "東京都港区", &[]),
    ];
    let ranked = engine::rank_by_fleet_size(&stations, 2);
    assert_eq!(values(&ranked), vec![2, 1]);
    assert_eq!(codes(&ranked), vec!["S1", "S2"]);
    assert!(ranked.iter().all(|station| station.unit == RankingUnit::Cars));
}

#[test]
fn fleet_size_ties_keep_input_order() {
    let ranking = fixture_repository().ranking(10);
    assert_eq!(
        codes(&ranking.by_fleet_size),
        vec!["B001", "A001", "X001", "A002", "D001", "C001"]
    );
    assert_eq!(values(&ranking.by_fleet_size), vec![4, 3, 2, 1, 1, 0]);
}

#[test]
fn model_variety_counts_distinct_models() {
    let ranking = fixture_repository().ranking(10);
    assert_eq!(
        codes(&ranking.by_model_variety),
        vec!["B001", "A001", "A002", "D001", "X001", "C001"]
    );
    assert_eq!(values(&ranking.by_model_variety), vec![4, 2, 1, 1, 1, 0]);
    assert!(
        ranking
            .by_model_variety
            .iter()
            .all(|station| station.unit == RankingUnit::Models)
    );
}

#[test]
fn variety_never_exceeds_fleet_size() {
    let repository = fixture_repository();
    let variety = engine::rank_by_model_variety(repository.stations(), usize::MAX);
    for ranked in variety.iter() {
        let station = repository.station_by_code(&ranked.code).unwrap();
        assert!(ranked.value <= station.fleet_size());
    }
}

#[test]
fn rankings_are_descending() {
    let ranking = fixture_repository().ranking(10);
    for list in [&ranking.by_fleet_size, &ranking.by_model_variety] {
        assert!(list.windows(2).all(|pair| pair[0].value >= pair[1].value));
    }
}

#[test]
fn truncates_to_n() {
    let repository = fixture_repository();
    assert_eq!(repository.ranking(3).by_fleet_size.len(), 3);
    assert_eq!(repository.ranking(100).by_model_variety.len(), 6);
    assert!(repository.ranking(0).by_fleet_size.is_empty());
}

#[test]
fn empty_population() {
    assert!(engine::rank_by_fleet_size(&[], 10).is_empty());
    assert!(engine::rank_by_model_variety(&[], 10).is_empty());
}

#[test]
fn unit_symbols() {
    assert_eq!(RankingUnit::Cars.symbol(), "台");
    assert_eq!(RankingUnit::Models.symbol(), "車種");
}
