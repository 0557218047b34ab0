use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use carshare::source;
use futures_util::StreamExt;
use reqwest::header::ACCEPT_ENCODING;
use std::{collections::HashMap, path::Path, sync::Arc};
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::error;

/// Seconds since the snapshot being served was loaded.
pub async fn age(State(state): State<Arc<AppState>>) -> Result<Response, StatusCode> {
    let guard = state.repository.read().await;
    let repository = guard.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;
    Ok(Json(repository.age().num_seconds()).into_response())
}

/// Downloads a snapshot from `?q=<url>` and swaps it in once it loads.
/// Concurrent calls are served one at a time.
pub async fn fetch_url(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let Some(q) = params.get("q") else {
        return Err(StatusCode::BAD_REQUEST);
    };
    let _refresh = state.refresh.lock().await;

    let response = reqwest::Client::new()
        .get(q)
        .header(ACCEPT_ENCODING, "gzip, deflate")
        .send()
        .await
        .map_err(|err| {
            error!("Failed to fetch snapshot: {err}");
            StatusCode::BAD_REQUEST
        })?;
    if !response.status().is_success() {
        error!("Snapshot download answered {}", response.status());
        return Err(StatusCode::BAD_GATEWAY);
    }

    let staged = state.staging_path();
    if let Err(status) = download(response, &staged).await {
        let _ = tokio::fs::remove_file(&staged).await;
        return Err(status);
    }

    let count = state.install_snapshot(&staged).await.map_err(|err| {
        error!("Failed to install downloaded snapshot: {err}");
        match err {
            source::Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    })?;
    Ok(Json(count).into_response())
}

async fn download(response: reqwest::Response, path: &Path) -> Result<(), StatusCode> {
    let mut file = File::create(path).await.map_err(|err| {
        error!("Failed to create {}: {err}", path.display());
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let data = chunk.map_err(|err| {
            error!("Snapshot download interrupted: {err}");
            StatusCode::BAD_GATEWAY
        })?;
        file.write_all(&data).await.map_err(|err| {
            error!("Failed to write {}: {err}", path.display());
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    }
    file.flush().await.map_err(|err| {
        error!("Failed to flush {}: {err}", path.display());
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
