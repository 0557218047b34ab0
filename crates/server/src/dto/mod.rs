mod ranking;
mod station;

pub use ranking::*;
pub use station::*;
