use crate::{dto::RankingDto, state::AppState};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use carshare::{
    prelude::*,
    shared::{DEFAULT_CLUSTER_CELL, MIN_CLUSTER_CELL},
};
use std::{collections::HashMap, sync::Arc};

use super::parse_param;

pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Response, StatusCode> {
    let guard = state.repository.read().await;
    let repository = guard.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;
    Ok(Json(repository.aggregate(&state.config)).into_response())
}

pub async fn ranking(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let count: usize = parse_param(&params, "count", state.config.ranking_size)?;
    let guard = state.repository.read().await;
    let repository = guard.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;
    Ok(Json(RankingDto::from(&repository.ranking(count))).into_response())
}

/// `?cell=<meters>` sets the side of the clustering grid, at least one meter.
pub async fn clusters(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let cell: f64 = parse_param(&params, "cell", DEFAULT_CLUSTER_CELL.as_meters())?;
    if !cell.is_finite() || cell < MIN_CLUSTER_CELL.as_meters() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let guard = state.repository.read().await;
    let repository = guard.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;
    let clusters = repository.clusters(Distance::from_meters(cell), &state.config.cluster);
    Ok(Json(clusters).into_response())
}
