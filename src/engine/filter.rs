use std::collections::{BTreeSet, HashMap, HashSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    repository::{CarClass, Station},
    shared::address::{self, PREFECTURE_ORDER, PrefixMatch},
};

/// Selection sentinel meaning "no restriction".
pub const ALL: &str = "all";

/// Current selections of the filter panel. `None` and an empty model list
/// place no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationFilter {
    pub prefecture: Option<String>,
    pub city: Option<String>,
    pub car_names: Vec<String>,
}

impl StationFilter {
    /// Builds a filter from raw panel values, where [`ALL`] or an empty
    /// string selects every prefecture or city. Model names are kept as
    /// given, an empty name only matches a car with an empty name.
    pub fn from_selection<I, S>(prefecture: &str, city: &str, car_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefecture: selection(prefecture),
            city: selection(city),
            car_names: car_names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.prefecture.is_none() && self.city.is_none() && self.car_names.is_empty()
    }

    pub fn matches(&self, station: &Station) -> bool {
        let prefecture_match = self
            .prefecture
            .as_deref()
            .is_none_or(|prefecture| station.address.starts_with(prefecture));
        // Containment, not prefix, city names can follow a ward or county
        let city_match = self
            .city
            .as_deref()
            .is_none_or(|city| station.address.contains(city));
        let name_match = self.car_names.is_empty()
            || self.car_names.iter().any(|name| station.has_model(name));
        prefecture_match && city_match && name_match
    }
}

fn selection(value: &str) -> Option<String> {
    if value.is_empty() || value == ALL {
        None
    } else {
        Some(value.to_string())
    }
}

/// Stations matching every predicate of `filter`, in input order.
pub fn filter_stations<'a>(stations: &'a [Station], filter: &StationFilter) -> Vec<&'a Station> {
    stations
        .par_iter()
        .filter(|station| filter.matches(station))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CarGroup {
    pub class_name: String,
    pub car_names: Vec<String>,
}

/// Values a filter panel can offer for the current snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Prefectures present in the data, north to south.
    pub prefectures: Vec<String>,
    /// Cities of the selected prefecture, sorted.
    pub cities: Vec<String>,
    /// Models grouped by class, Basic, Mid then Premium.
    pub car_groups: Vec<CarGroup>,
}

pub fn filter_options(
    stations: &[Station],
    selected_prefecture: Option<&str>,
    policy: PrefixMatch,
) -> FilterOptions {
    let mut prefectures: HashSet<&str> = HashSet::new();
    let mut cities: BTreeSet<&str> = BTreeSet::new();
    let mut car_groups: HashMap<CarClass, BTreeSet<&str>> = HashMap::new();

    stations.iter().for_each(|station| {
        if let Some(prefecture) = address::parse_prefecture(&station.address, policy) {
            prefectures.insert(prefecture);
        }
        if let Some(city) =
            selected_prefecture.and_then(|selected| address::parse_city(&station.address, selected))
        {
            cities.insert(city);
        }
        station.fleet.iter().for_each(|car| {
            car_groups.entry(car.class()).or_default().insert(&car.name);
        });
    });

    FilterOptions {
        prefectures: PREFECTURE_ORDER
            .iter()
            .filter(|prefecture| prefectures.contains(*prefecture))
            .map(|prefecture| prefecture.to_string())
            .collect(),
        cities: cities.into_iter().map(String::from).collect(),
        car_groups: CarClass::ORDERED
            .iter()
            .filter_map(|class| {
                let names = car_groups.remove(class)?;
                Some(CarGroup {
                    class_name: class.name().to_string(),
                    car_names: names.into_iter().map(String::from).collect(),
                })
            })
            .collect(),
    }
}
