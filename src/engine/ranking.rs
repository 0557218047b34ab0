use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;

use crate::repository::Station;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingUnit {
    Cars,
    Models,
}

impl RankingUnit {
    /// Counter word shown next to the value.
    pub fn symbol(&self) -> &'static str {
        match self {
            RankingUnit::Cars => "台",
            RankingUnit::Models => "車種",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedStation {
    pub code: Arc<str>,
    pub name: Arc<str>,
    pub value: usize,
    pub unit: RankingUnit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ranking {
    pub by_fleet_size: Vec<RankedStation>,
    pub by_model_variety: Vec<RankedStation>,
}

pub fn ranking(stations: &[Station], n: usize) -> Ranking {
    Ranking {
        by_fleet_size: rank_by_fleet_size(stations, n),
        by_model_variety: rank_by_model_variety(stations, n),
    }
}

/// Top `n` stations by number of cars.
pub fn rank_by_fleet_size(stations: &[Station], n: usize) -> Vec<RankedStation> {
    rank(stations, n, RankingUnit::Cars, Station::fleet_size)
}

/// Top `n` stations by number of distinct models.
pub fn rank_by_model_variety(stations: &[Station], n: usize) -> Vec<RankedStation> {
    rank(stations, n, RankingUnit::Models, Station::model_variety)
}

fn rank<F>(stations: &[Station], n: usize, unit: RankingUnit, value: F) -> Vec<RankedStation>
where
    F: Fn(&Station) -> usize + Sync,
{
    let mut ranked: Vec<RankedStation> = stations
        .par_iter()
        .map(|station| RankedStation {
            code: station.code.clone(),
            name: station.name.clone(),
            value: value(station),
            unit,
        })
        .collect();
    // Stable, ties keep input order
    ranked.par_sort_by(|a, b| b.value.cmp(&a.value));
    ranked.truncate(n);
    ranked
}
