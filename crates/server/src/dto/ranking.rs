use carshare::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedStationDto {
    pub code: String,
    pub name: String,
    pub value: usize,
    pub unit: String,
}

impl RankedStationDto {
    pub fn from(ranked: &RankedStation) -> Self {
        Self {
            code: ranked.code.to_string(),
            name: ranked.name.to_string(),
            value: ranked.value,
            unit: ranked.unit.symbol().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingDto {
    pub top_by_car_count: Vec<RankedStationDto>,
    pub top_by_variety: Vec<RankedStationDto>,
}

impl RankingDto {
    pub fn from(ranking: &Ranking) -> Self {
        Self {
            top_by_car_count: ranking
                .by_fleet_size
                .iter()
                .map(RankedStationDto::from)
                .collect(),
            top_by_variety: ranking
                .by_model_variety
                .iter()
                .map(RankedStationDto::from)
                .collect(),
        }
    }
}
