pub mod address;
pub mod geo;

pub use address::*;
pub use geo::*;
