//! Aggregation, ranking, filtering and map clustering for car-sharing
//! station snapshots.

pub mod engine;
pub mod repository;
pub mod shared;
pub mod source;

pub mod prelude {
    pub use crate::engine::{
        Aggregate, Bucket, BucketOrder, Cluster, ClusterPolicy, ClusterStyle, ClusterTier, Config,
        FilterOptions, HeatPoint, RankedStation, Ranking, RankingUnit, StationFilter,
    };
    pub use crate::repository::{Car, CarClass, Repository, Station};
    pub use crate::shared::{Coordinate, Distance, PrefixMatch};
    pub use crate::source::{self, StationReader};
}
