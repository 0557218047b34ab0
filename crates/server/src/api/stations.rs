use crate::{dto::StationDto, state::AppState};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use carshare::{engine::ALL, prelude::*};
use std::{collections::HashMap, sync::Arc};

pub async fn stations(State(state): State<Arc<AppState>>) -> Result<Response, StatusCode> {
    let guard = state.repository.read().await;
    let repository = guard.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;
    let result: Vec<_> = repository.stations().iter().map(StationDto::from).collect();
    Ok(Json(result).into_response())
}

pub async fn station(
    Path(code): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let guard = state.repository.read().await;
    let repository = guard.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;
    let station = repository
        .station_by_code(&code)
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(StationDto::from(station)).into_response())
}

/// `?prefecture=..&city=..&cars=a,b`, a missing value or "all" selects everything.
pub async fn filter(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let prefecture = params.get("prefecture").map(String::as_str).unwrap_or(ALL);
    let city = params.get("city").map(String::as_str).unwrap_or(ALL);
    let cars = params
        .get("cars")
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    let filter = StationFilter::from_selection(prefecture, city, cars);

    let guard = state.repository.read().await;
    let repository = guard.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;
    let result: Vec<_> = repository
        .filter(&filter)
        .into_iter()
        .map(StationDto::from)
        .collect();
    Ok(Json(result).into_response())
}

pub async fn filter_options(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let prefecture = params
        .get("prefecture")
        .map(String::as_str)
        .filter(|value| !value.is_empty() && *value != ALL);

    let guard = state.repository.read().await;
    let repository = guard.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;
    let options = repository.filter_options(prefecture, state.config.prefix_match);
    Ok(Json(options).into_response())
}
