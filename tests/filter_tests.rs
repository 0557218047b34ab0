mod common;

use carshare::{engine, prelude::*};
use common::{fixture_repository, station};

fn codes(stations: &[&Station]) -> Vec<String> {
    stations.iter().map(|station| station.code.to_string()).collect()
}

#[test]
fn identity_filter_returns_everything() {
    let repository = fixture_repository();
    let filter = StationFilter::from_selection("all", "all", Vec::<String>::new());
    assert!(filter.is_identity());
    assert_eq!(filter, StationFilter::default());
    let result = repository.filter(&filter);
    assert_eq!(result.len(), repository.stations().len());
    assert!(
        result
            .iter()
            .zip(repository.stations().iter())
            .all(|(a, b)| a.code == b.code)
    );
}

#[test]
fn prefecture_is_a_prefix_match() {
    let repository = fixture_repository();
    let filter = StationFilter::from_selection("東京都", "all", Vec::<String>::new());
    assert_eq!(codes(&repository.filter(&filter)), vec!["A001", "A002"]);
}

#[test]
fn city_is_a_substring_match() {
    let repository = fixture_repository();
    let filter = StationFilter::from_selection("all", "横浜市", Vec::<String>::new());
    assert_eq!(codes(&repository.filter(&filter)), vec!["B001"]);

    // Wards appear after the city, containment still finds them
    let filter = StationFilter::from_selection("all", "北区", Vec::<String>::new());
    assert_eq!(codes(&repository.filter(&filter)), vec!["C001"]);
}

#[test]
fn any_selected_model_matches() {
    let repository = fixture_repository();
    let filter = StationFilter::from_selection("all", "all", ["アルファード", "ノート"]);
    assert_eq!(
        codes(&repository.filter(&filter)),
        vec!["A002", "B001", "X001"]
    );
}

#[test]
fn predicates_are_combined() {
    let repository = fixture_repository();
    let filter = StationFilter::from_selection("東京都", "all", ["カローラ"]);
    assert_eq!(codes(&repository.filter(&filter)), vec!["A001"]);

    let filter = StationFilter::from_selection("東京都", "横浜市", ["カローラ"]);
    assert!(repository.filter(&filter).is_empty());
}

#[test]
fn empty_selections_mean_all() {
    let filter = StationFilter::from_selection("", "", Vec::<String>::new());
    assert!(filter.is_identity());
}

#[test]
fn empty_model_name_is_kept() {
    let repository = fixture_repository();
    let filter = StationFilter::from_selection("all", "all", [""]);
    assert!(!filter.is_identity());
    assert_eq!(filter.car_names, vec![String::new()]);
    assert!(repository.filter(&filter).is_empty());
}

#[test]
fn filter_on_synthetic_stations() {
    let stations = [
        station("S1", "東京都港区", &["A"]),
        station("S2", "千葉県千葉市", &["B"]),
        station("S3", "東京都千代田区", &["B", "C"]),
    ];
    let filter = StationFilter {
        prefecture: Some("東京都".into()),
        city: None,
        car_names: vec!["B".into()],
    };
    assert_eq!(codes(&engine::filter_stations(&stations, &filter)), vec!["S3"]);
}

#[test]
fn options_list_prefectures_north_to_south() {
    let repository = fixture_repository();
    let options = repository.filter_options(None, PrefixMatch::Shortest);
    assert_eq!(
        options.prefectures,
        vec!["北海道", "東京都", "神奈川県", "大阪府"]
    );
    assert!(options.cities.is_empty());
}

#[test]
fn options_list_cities_of_selected_prefecture() {
    let repository = fixture_repository();
    let options = repository.filter_options(Some("東京都"), PrefixMatch::Shortest);
    assert_eq!(options.cities, vec!["府中市", "渋谷区"]);
}

#[test]
fn options_group_models_by_class() {
    let repository = fixture_repository();
    let options = repository.filter_options(None, PrefixMatch::Shortest);
    let groups: Vec<(&str, Vec<&str>)> = options
        .car_groups
        .iter()
        .map(|group| {
            (
                group.class_name.as_str(),
                group.car_names.iter().map(String::as_str).collect(),
            )
        })
        .collect();
    assert_eq!(
        groups,
        vec![
            ("ベーシック", vec!["ノート", "フィット", "ヤリス"]),
            ("ミドル", vec!["カローラ"]),
            ("プレミアム", vec!["アルファード"]),
        ]
    );
}
