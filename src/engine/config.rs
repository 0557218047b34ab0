use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    engine::{BucketOrder, ClusterPolicy},
    shared::address::PrefixMatch,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Histogram bucket width must be at least 1")]
    ZeroBucketWidth,
    #[error("Toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Fleet size histogram layout, buckets start at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    pub bucket_width: usize,
    pub bucket_count: usize,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            bucket_width: 5,
            bucket_count: 11,
        }
    }
}

/// Every tunable of the derived views.
/// Any field left out of a TOML file keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub prefix_match: PrefixMatch,
    /// Number of models on the dashboard chart.
    pub top_models: usize,
    /// Number of stations per ranking.
    pub ranking_size: usize,
    pub station_count_order: BucketOrder,
    pub car_count_order: BucketOrder,
    pub histogram: HistogramConfig,
    pub cluster: ClusterPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix_match: PrefixMatch::Shortest,
            top_models: 10,
            ranking_size: 10,
            station_count_order: BucketOrder::CountDescending,
            car_count_order: BucketOrder::Insertion,
            histogram: HistogramConfig::default(),
            cluster: ClusterPolicy::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(value: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.histogram.bucket_width == 0 {
            return Err(ConfigError::ZeroBucketWidth);
        }
        Ok(())
    }
}
