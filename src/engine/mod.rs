//! Derived views over a station snapshot.
//!
//! Every function here is pure: it reads a slice of stations and returns new
//! data, so the same snapshot can be shared between concurrent callers.

mod aggregate;
mod cluster;
mod config;
mod filter;
mod ranking;

pub use aggregate::*;
pub use cluster::*;
pub use config::*;
pub use filter::*;
pub use ranking::*;
