use std::{collections::HashMap, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    repository::Station,
    shared::geo::{Coordinate, Distance},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterTier {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierStyle {
    /// Marker diameter in pixels.
    pub pixel_size: u32,
    pub font_size: u32,
    /// CSS color of the marker.
    pub color: String,
}

impl TierStyle {
    fn new(pixel_size: u32, font_size: u32, color: &str) -> Self {
        Self {
            pixel_size,
            font_size,
            color: color.into(),
        }
    }
}

/// Maps a cluster member count onto a tier.
///
/// A count below `small_below` is small, a count of at least `large_from`
/// is large, anything between is medium. The active policy is 10 / 100 with
/// 40, 50 and 60 px markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterPolicy {
    pub small_below: usize,
    pub large_from: usize,
    pub small: TierStyle,
    pub medium: TierStyle,
    pub large: TierStyle,
}

impl Default for ClusterPolicy {
    fn default() -> Self {
        Self {
            small_below: 10,
            large_from: 100,
            small: TierStyle::new(40, 12, "#2196f3"),
            medium: TierStyle::new(50, 14, "#ff9800"),
            large: TierStyle::new(60, 16, "#f44336"),
        }
    }
}

impl ClusterPolicy {
    pub fn tier(&self, count: usize) -> ClusterTier {
        if count < self.small_below {
            ClusterTier::Small
        } else if count >= self.large_from {
            ClusterTier::Large
        } else {
            ClusterTier::Medium
        }
    }

    pub fn style(&self, tier: ClusterTier) -> &TierStyle {
        match tier {
            ClusterTier::Small => &self.small,
            ClusterTier::Medium => &self.medium,
            ClusterTier::Large => &self.large,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterStyle {
    pub tier: ClusterTier,
    pub pixel_size: u32,
    pub font_size: u32,
    pub color: String,
}

pub fn classify_cluster(count: usize, policy: &ClusterPolicy) -> ClusterStyle {
    let tier = policy.tier(count);
    let style = policy.style(tier);
    ClusterStyle {
        tier,
        pixel_size: style.pixel_size,
        font_size: style.font_size,
        color: style.color.clone(),
    }
}

/// Stations sharing a grid cell on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    /// Centroid of the members.
    pub coordinate: Coordinate,
    /// Member station codes.
    pub stations: Vec<Arc<str>>,
    pub style: ClusterStyle,
}

impl Cluster {
    pub fn count(&self) -> usize {
        self.stations.len()
    }
}

/// Groups stations into square cells of side `cell`, clusters come out in
/// the order their first station appears. A station whose cell index is out
/// of range forms a cluster of its own.
pub fn cluster_stations(
    stations: &[Station],
    cell: Distance,
    policy: &ClusterPolicy,
) -> Vec<Cluster> {
    let mut cells: HashMap<(i64, i64), usize> = HashMap::new();
    let mut members: Vec<Vec<&Station>> = Vec::new();
    stations.iter().for_each(|station| {
        let Some(key) = station.coordinate.to_grid(cell) else {
            members.push(vec![station]);
            return;
        };
        let index = *cells.entry(key).or_insert_with(|| {
            members.push(Vec::new());
            members.len() - 1
        });
        members[index].push(station);
    });

    members
        .into_iter()
        .map(|stations| Cluster {
            coordinate: stations.iter().map(|station| station.coordinate).sum(),
            style: classify_cluster(stations.len(), policy),
            stations: stations.iter().map(|station| station.code.clone()).collect(),
        })
        .collect()
}
