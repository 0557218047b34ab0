use std::{collections::HashSet, fmt::Display, sync::Arc};

use crate::{
    shared::geo::Coordinate,
    source::{CarRecord, StationRecord},
};

/// Coarse vehicle tier as published by the operator.
///
/// Aggregation keys on the raw class name, this type only gives the
/// conventional display order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CarClass {
    Basic,
    Mid,
    Premium,
    Other(Arc<str>),
}

impl CarClass {
    pub const BASIC: &'static str = "ベーシック";
    pub const MID: &'static str = "ミドル";
    pub const PREMIUM: &'static str = "プレミアム";

    /// Classes in the order they are listed to riders.
    pub const ORDERED: [CarClass; 3] = [CarClass::Basic, CarClass::Mid, CarClass::Premium];

    pub fn name(&self) -> &str {
        match self {
            CarClass::Basic => Self::BASIC,
            CarClass::Mid => Self::MID,
            CarClass::Premium => Self::PREMIUM,
            CarClass::Other(name) => name,
        }
    }
}

impl From<&str> for CarClass {
    fn from(value: &str) -> Self {
        match value {
            Self::BASIC => CarClass::Basic,
            Self::MID => CarClass::Mid,
            Self::PREMIUM => CarClass::Premium,
            other => CarClass::Other(other.into()),
        }
    }
}

impl Display for CarClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single vehicle assigned to a station.
#[derive(Debug, Default, Clone)]
pub struct Car {
    /// Raw class name, e.g. "ベーシック".
    pub class_name: Arc<str>,
    /// Model name, e.g. "ヤリス".
    pub name: Arc<str>,
    pub comment: Arc<str>,
}

impl Car {
    pub fn class(&self) -> CarClass {
        CarClass::from(self.class_name.as_ref())
    }
}

impl From<CarRecord> for Car {
    fn from(value: CarRecord) -> Self {
        Self {
            class_name: value.class_name.into(),
            name: value.car_name.into(),
            comment: value.car_comments.into(),
        }
    }
}

/// A physical car-sharing location.
#[derive(Debug, Default, Clone)]
pub struct Station {
    /// Position of the station in the repository.
    pub index: u32,
    /// Database document id.
    pub id: Arc<str>,
    /// Unique operator code, the key every lookup uses.
    pub code: Arc<str>,
    pub name: Arc<str>,
    pub coordinate: Coordinate,
    /// Free text address, prefecture first.
    pub address: Arc<str>,
    pub fleet: Box<[Car]>,
    pub photo_urls: Box<[Arc<str>]>,
    pub comment: Option<Arc<str>>,
    /// Availability label for reservations one month ahead.
    pub one_month_reserve_label: Option<Arc<str>>,
    /// Availability label for reservations three months ahead.
    pub three_month_reserve_label: Option<Arc<str>>,
}

impl Station {
    pub fn fleet_size(&self) -> usize {
        self.fleet.len()
    }

    /// Number of distinct model names in the fleet.
    pub fn model_variety(&self) -> usize {
        self.fleet
            .iter()
            .map(|car| car.name.as_ref())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn has_model(&self, name: &str) -> bool {
        self.fleet.iter().any(|car| car.name.as_ref() == name)
    }
}

impl From<StationRecord> for Station {
    fn from(value: StationRecord) -> Self {
        Self {
            index: 0,
            id: value.id.as_str().into(),
            code: value.station_code.into(),
            name: value.station_name.into(),
            coordinate: Coordinate::new(value.latitude, value.longitude),
            address: value.address.into(),
            fleet: value.car_fleet.into_iter().map(Car::from).collect(),
            photo_urls: value.photo_urls.into_iter().map(Arc::from).collect(),
            comment: value.station_comment.map(Arc::from),
            one_month_reserve_label: value.disp_1_month_reserve_label.map(Arc::from),
            three_month_reserve_label: value.disp_3_month_reserve_label.map(Arc::from),
        }
    }
}
