mod dashboard;
mod snapshot;
mod stations;

pub use dashboard::*;
pub use snapshot::*;
pub use stations::*;

use axum::http::StatusCode;
use std::collections::HashMap;

/// Parses an optional numeric query parameter.
fn parse_param<T: std::str::FromStr>(
    params: &HashMap<String, String>,
    key: &str,
    default: T,
) -> Result<T, StatusCode> {
    match params.get(key) {
        Some(value) => value.parse().map_err(|_| StatusCode::BAD_REQUEST),
        None => Ok(default),
    }
}
