use std::iter::Sum;

use serde::{Deserialize, Serialize};

pub(crate) const LONGITUDE_DISTANCE: Distance = Distance::from_meters(111_320.0);
pub(crate) const LATITUDE_DISTANCE: Distance = Distance::from_meters(110_540.0);

/// Default side of a map clustering cell.
pub const DEFAULT_CLUSTER_CELL: Distance = Distance::from_meters(2_000.0);

/// Smallest clustering cell the HTTP API accepts.
pub const MIN_CLUSTER_CELL: Distance = Distance::from_meters(1.0);

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Distance(f64);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Distance {
    pub const fn from_meters(distance: f64) -> Self {
        Self(distance)
    }

    pub const fn from_kilometers(distance: f64) -> Self {
        Self(distance * 1000.0)
    }

    pub const fn as_meters(&self) -> f64 {
        self.0
    }

}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Averages the coordinates, an empty iterator yields the origin.
impl Sum for Coordinate {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let mut count: usize = 0;
        let mut lat: f64 = 0.0;
        let mut lon: f64 = 0.0;
        iter.for_each(|coordinate| {
            count += 1;
            lat += coordinate.latitude;
            lon += coordinate.longitude;
        });
        if count == 0 {
            return Self::default();
        }
        let count = count as f64;
        Self {
            latitude: lat / count,
            longitude: lon / count,
        }
    }
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Maps the coordinate onto a square grid with cells of side `cell`.
    /// None when the cell index does not fit an `i64`, which only happens
    /// for vanishingly small or non positive cells.
    pub fn to_grid(&self, cell: Distance) -> Option<(i64, i64)> {
        let x = grid_index(self.longitude * LONGITUDE_DISTANCE.as_meters(), cell)?;
        let y = grid_index(self.latitude * LATITUDE_DISTANCE.as_meters(), cell)?;
        Some((x, y))
    }
}

fn grid_index(meters: f64, cell: Distance) -> Option<i64> {
    if cell.as_meters() <= 0.0 {
        return None;
    }
    let index = (meters / cell.as_meters()).floor();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if index.is_finite() && index >= i64::MIN as f64 && index < i64::MAX as f64 {
        Some(index as i64)
    } else {
        None
    }
}

#[test]
fn distance_eq_test() {
    let dist_a = Distance::from_meters(1000.0);
    let dist_b = Distance::from_kilometers(1.0);
    assert_eq!(dist_a, dist_b)
}

#[test]
fn centroid_of_nothing_is_origin() {
    let centroid: Coordinate = Vec::<Coordinate>::new().into_iter().sum();
    assert_eq!(centroid, Coordinate::default());
}

#[test]
fn same_point_same_cell() {
    let a = Coordinate::new(35.0, 139.0);
    let b = Coordinate::new(35.000_001, 139.000_001);
    assert_eq!(
        a.to_grid(DEFAULT_CLUSTER_CELL),
        b.to_grid(DEFAULT_CLUSTER_CELL)
    );
}

#[test]
fn small_cells_keep_distant_points_apart() {
    let tokyo = Coordinate::new(35.6, 139.7);
    let osaka = Coordinate::new(34.7, 135.5);
    let cell = Distance::from_meters(1e-6);
    assert!(tokyo.to_grid(cell).is_some());
    assert_ne!(tokyo.to_grid(cell), osaka.to_grid(cell));
}

#[test]
fn out_of_range_cells_have_no_index() {
    let tokyo = Coordinate::new(35.6, 139.7);
    assert_eq!(tokyo.to_grid(Distance::from_meters(1e-300)), None);
    assert_eq!(tokyo.to_grid(Distance::from_meters(0.0)), None);
}
