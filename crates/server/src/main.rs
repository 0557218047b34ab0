mod api;
mod dto;
mod state;

use crate::state::{AppState, load_repository};
use axum::routing::get;
use carshare::prelude::*;
use std::{path::PathBuf, sync::Arc, time::Instant};
use tracing::{error, info, warn};

const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let args: Vec<_> = std::env::args().collect();
    if args.len() < 2 {
        error!("Missing station snapshot (.json, .zip or .csv)");
        std::process::exit(1);
    }
    let data_path = PathBuf::from(&args[1]);

    let config = match args.get(2) {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(err) => {
                error!("Failed to load config {path}: {err}");
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    let repository = if data_path.exists() {
        info!("Loading data...");
        let now = Instant::now();
        match load_repository(&data_path) {
            Ok(repository) => {
                info!(
                    "Loading {} stations took {:?}",
                    repository.stations().len(),
                    now.elapsed()
                );
                Some(repository)
            }
            Err(err) => {
                error!("Failed to load snapshot: {err}");
                std::process::exit(1);
            }
        }
    } else {
        warn!(
            "No snapshot at {}, waiting for /fetch",
            data_path.display()
        );
        None
    };
    let state = Arc::new(AppState::new(data_path, config, repository));

    let app = axum::Router::new()
        .route("/stations", get(api::stations))
        .route("/stations/{code}", get(api::station))
        .route("/dashboard", get(api::dashboard))
        .route("/ranking", get(api::ranking))
        .route("/filter", get(api::filter))
        .route("/filter/options", get(api::filter_options))
        .route("/clusters", get(api::clusters))
        .route("/age", get(api::age))
        .route("/fetch", get(api::fetch_url))
        .with_state(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {port}: {err}");
            std::process::exit(1);
        }
    };
    info!("Listening to port {port}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
    }
}

fn load_config(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let value = std::fs::read_to_string(path)?;
    Ok(Config::from_toml_str(&value)?)
}
