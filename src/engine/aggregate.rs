use std::{collections::HashMap, sync::Arc};

use serde::{Deserialize, Serialize, Serializer, ser::SerializeTuple};

use crate::{
    engine::{Config, HistogramConfig},
    repository::Station,
    shared::address::{self, UNKNOWN_PREFECTURE},
};

/// A labelled count, one bar of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub name: Arc<str>,
    pub count: usize,
}

impl Bucket {
    pub fn new(name: impl Into<Arc<str>>, count: usize) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// How a list of buckets is presented.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketOrder {
    /// Stable sort on descending count with the unknown prefecture bucket last.
    #[default]
    CountDescending,
    /// First encounter order.
    Insertion,
}

impl BucketOrder {
    pub fn apply(&self, buckets: &mut Vec<Bucket>) {
        match self {
            BucketOrder::Insertion => (),
            BucketOrder::CountDescending => {
                sort_descending(buckets);
                let (known, unknown): (Vec<_>, Vec<_>) = buckets
                    .drain(..)
                    .partition(|bucket| bucket.name.as_ref() != UNKNOWN_PREFECTURE);
                buckets.extend(known);
                buckets.extend(unknown);
            }
        }
    }
}

/// Heat weighted station position, serialized as `[latitude, longitude, weight]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub weight: usize,
}

impl Serialize for HeatPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.latitude)?;
        tuple.serialize_element(&self.longitude)?;
        tuple.serialize_element(&(self.weight as f64))?;
        tuple.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregate {
    pub total_stations: usize,
    pub total_cars: usize,
    /// Distinct model names across every fleet.
    pub total_models: usize,
    pub average_cars_per_station: f64,
    pub prefecture_station_counts: Vec<Bucket>,
    pub prefecture_car_counts: Vec<Bucket>,
    /// First encounter order.
    pub class_counts: Vec<Bucket>,
    /// First encounter order, see [`Aggregate::top_models`] for a ranked view.
    pub car_name_counts: Vec<Bucket>,
    pub top_models: Vec<Bucket>,
    pub histogram: Vec<Bucket>,
    pub heatmap: Vec<HeatPoint>,
}

impl Aggregate {
    /// The `n` most common models, ties keep first encounter order.
    pub fn top_models(&self, n: usize) -> Vec<Bucket> {
        top_n(&self.car_name_counts, n)
    }
}

/// Insertion ordered counter.
#[derive(Default)]
struct Tally<'a> {
    order: Vec<(&'a str, usize)>,
    lookup: HashMap<&'a str, usize>,
}

impl<'a> Tally<'a> {
    fn add(&mut self, key: &'a str, amount: usize) {
        if let Some(index) = self.lookup.get(key) {
            self.order[*index].1 += amount;
        } else {
            self.lookup.insert(key, self.order.len());
            self.order.push((key, amount));
        }
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn into_buckets(self) -> Vec<Bucket> {
        self.order
            .into_iter()
            .map(|(name, count)| Bucket::new(name, count))
            .collect()
    }
}

pub fn aggregate(stations: &[Station], config: &Config) -> Aggregate {
    let mut station_counts = Tally::default();
    let mut car_counts = Tally::default();
    let mut class_counts = Tally::default();
    let mut car_name_counts = Tally::default();
    let mut total_cars: usize = 0;

    stations.iter().for_each(|station| {
        let prefecture = address::prefecture_label(&station.address, config.prefix_match);
        station_counts.add(prefecture, 1);
        car_counts.add(prefecture, station.fleet_size());
        total_cars += station.fleet_size();
        station.fleet.iter().for_each(|car| {
            class_counts.add(&car.class_name, 1);
            car_name_counts.add(&car.name, 1);
        });
    });

    let total_models = car_name_counts.len();
    let car_name_counts = car_name_counts.into_buckets();

    let mut prefecture_station_counts = station_counts.into_buckets();
    config
        .station_count_order
        .apply(&mut prefecture_station_counts);
    let mut prefecture_car_counts = car_counts.into_buckets();
    config.car_count_order.apply(&mut prefecture_car_counts);

    Aggregate {
        total_stations: stations.len(),
        total_cars,
        total_models,
        average_cars_per_station: average(total_cars, stations.len()),
        prefecture_station_counts,
        prefecture_car_counts,
        class_counts: class_counts.into_buckets(),
        top_models: top_n(&car_name_counts, config.top_models),
        car_name_counts,
        histogram: fleet_histogram(stations, &config.histogram),
        heatmap: heatmap(stations),
    }
}

/// Mean fleet size, zero for an empty snapshot.
pub fn average(total_cars: usize, stations: usize) -> f64 {
    if stations == 0 {
        0.0
    } else {
        total_cars as f64 / stations as f64
    }
}

pub fn top_n(buckets: &[Bucket], n: usize) -> Vec<Bucket> {
    let mut sorted = buckets.to_vec();
    sort_descending(&mut sorted);
    sorted.truncate(n);
    sorted
}

pub fn heatmap(stations: &[Station]) -> Vec<HeatPoint> {
    stations
        .iter()
        .map(|station| HeatPoint {
            latitude: station.coordinate.latitude,
            longitude: station.coordinate.longitude,
            weight: station.fleet_size(),
        })
        .collect()
}

/// Counts stations per fleet size range, empty ranges are left out.
/// Fleets larger than the last range are not counted.
pub fn fleet_histogram(stations: &[Station], config: &HistogramConfig) -> Vec<Bucket> {
    if config.bucket_width == 0 {
        return Vec::new();
    }
    let mut counts = vec![0usize; config.bucket_count];
    stations.iter().for_each(|station| {
        let index = station.fleet_size() / config.bucket_width;
        if let Some(count) = counts.get_mut(index) {
            *count += 1;
        }
    });
    counts
        .into_iter()
        .enumerate()
        .filter(|(_, count)| *count > 0)
        .map(|(i, count)| {
            let min = i * config.bucket_width;
            let max = min + config.bucket_width - 1;
            Bucket::new(format!("{min}-{max}"), count)
        })
        .collect()
}

fn sort_descending(buckets: &mut [Bucket]) {
    // sort_by is stable, equal counts keep their order
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
}
