use std::{collections::HashMap, sync::Arc, time::Instant};

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, warn};

mod entities;
pub use entities::*;

use crate::{
    engine::{self, Aggregate, Cluster, ClusterPolicy, Config, FilterOptions, Ranking, StationFilter},
    shared::{address::PrefixMatch, geo::Distance},
    source::{self, StationReader},
};

/// Immutable snapshot of every station, indexed by station code.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    pub stations: Box<[Station]>,
    station_lookup: HashMap<Arc<str>, u32>,
    loaded_at: DateTime<Utc>,
}

impl Repository {
    pub fn new() -> Self {
        Default::default()
    }

    /// Reads every station from the reader.
    /// Depending on the size of the snapshot this can be a long blocking function.
    pub fn load_stations(self, reader: StationReader) -> Result<Self, source::Error> {
        debug!("Loading stations...");
        let now = Instant::now();
        let mut stations: Vec<Station> = Vec::new();
        reader.stream_stations(|(_, record)| stations.push(record.into()))?;
        let repository = self.with_stations(stations);
        debug!(
            "Loading {} stations took {:?}",
            repository.stations.len(),
            now.elapsed()
        );
        Ok(repository)
    }

    /// Builds the snapshot from already decoded stations.
    /// A repeated station code replaces the earlier station in place.
    pub fn with_stations<I>(mut self, stations: I) -> Self
    where
        I: IntoIterator<Item = Station>,
    {
        let mut station_lookup: HashMap<Arc<str>, u32> = HashMap::new();
        let mut buffer: Vec<Station> = Vec::new();
        stations.into_iter().for_each(|mut station| {
            if let Some(index) = station_lookup.get(&station.code) {
                warn!("Duplicate station code {}, replacing", station.code);
                station.index = *index;
                buffer[*index as usize] = station;
            } else {
                let index = buffer.len() as u32;
                station.index = index;
                station_lookup.insert(station.code.clone(), index);
                buffer.push(station);
            }
        });
        self.stations = buffer.into();
        self.station_lookup = station_lookup;
        self.loaded_at = Utc::now();
        self
    }

    /// When the snapshot was built.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Time elapsed since the snapshot was built.
    pub fn age(&self) -> TimeDelta {
        Utc::now() - self.loaded_at
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Get a station with the given code.
    /// If no station is found with the given code None is returned.
    pub fn station_by_code(&self, code: &str) -> Option<&Station> {
        let index = self.station_lookup.get(code)?;
        Some(&self.stations[*index as usize])
    }

    pub fn aggregate(&self, config: &Config) -> Aggregate {
        engine::aggregate(&self.stations, config)
    }

    pub fn ranking(&self, n: usize) -> Ranking {
        engine::ranking(&self.stations, n)
    }

    pub fn filter(&self, filter: &StationFilter) -> Vec<&Station> {
        engine::filter_stations(&self.stations, filter)
    }

    pub fn filter_options(&self, prefecture: Option<&str>, policy: PrefixMatch) -> FilterOptions {
        engine::filter_options(&self.stations, prefecture, policy)
    }

    pub fn clusters(&self, cell: Distance, policy: &ClusterPolicy) -> Vec<Cluster> {
        engine::cluster_stations(&self.stations, cell, policy)
    }
}
