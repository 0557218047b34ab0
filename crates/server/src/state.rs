use carshare::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

pub struct AppState {
    pub data_path: PathBuf,
    pub config: Config,
    pub repository: RwLock<Option<Repository>>,
    /// Held for the whole download, load and swap of a new snapshot.
    pub refresh: Mutex<()>,
}

impl AppState {
    pub fn new(data_path: PathBuf, config: Config, repository: Option<Repository>) -> Self {
        Self {
            data_path,
            config,
            repository: RwLock::new(repository),
            refresh: Mutex::new(()),
        }
    }

    /// Where a downloaded snapshot is written before it is validated.
    /// Same directory and extension as the data file, so the final rename
    /// stays on one filesystem and the format is still detected.
    pub fn staging_path(&self) -> PathBuf {
        staging_path(&self.data_path)
    }

    /// Loads the staged snapshot and, only if that succeeds, moves it over
    /// the data file and swaps the repository. A failed load removes the
    /// staged file and leaves both the data file and the repository as they were.
    pub async fn install_snapshot(&self, staged: &Path) -> Result<usize, source::Error> {
        let repository = match load_repository(staged) {
            Ok(repository) => repository,
            Err(err) => {
                if let Err(remove_err) = fs::remove_file(staged) {
                    warn!("Failed to remove {}: {remove_err}", staged.display());
                }
                return Err(err);
            }
        };
        fs::rename(staged, &self.data_path)?;
        let count = repository.stations().len();
        let _ = self.repository.write().await.replace(repository);
        info!("Snapshot replaced with {count} stations");
        Ok(count)
    }
}

pub fn load_repository<P: AsRef<Path>>(path: P) -> Result<Repository, source::Error> {
    let reader = StationReader::default().from_path(path)?;
    Repository::new().load_stations(reader)
}

fn staging_path(data_path: &Path) -> PathBuf {
    let stem = data_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match data_path.extension() {
        Some(extension) => format!("{stem}.download.{}", extension.to_string_lossy()),
        None => format!("{stem}.download"),
    };
    data_path.with_file_name(name)
}

#[cfg(test)]
fn fixture() -> Vec<u8> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/fixtures/stations.json");
    fs::read(path).unwrap()
}

#[cfg(test)]
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("carshare-server-{}-{name}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn staging_keeps_directory_and_extension() {
    assert_eq!(
        staging_path(Path::new("/data/stations.json")),
        PathBuf::from("/data/stations.download.json")
    );
    assert_eq!(
        staging_path(Path::new("/data/snapshot.zip")),
        PathBuf::from("/data/snapshot.download.zip")
    );
}

#[tokio::test]
async fn invalid_download_leaves_snapshot_untouched() {
    let dir = scratch_dir("invalid");
    let data_path = dir.join("stations.json");
    fs::write(&data_path, fixture()).unwrap();
    let state = AppState::new(
        data_path.clone(),
        Config::default(),
        Some(load_repository(&data_path).unwrap()),
    );

    let staged = state.staging_path();
    fs::write(&staged, b"<html>not a snapshot</html>").unwrap();
    let error = state.install_snapshot(&staged).await.unwrap_err();
    assert!(matches!(error, source::Error::Json(_)));

    assert!(!staged.exists());
    assert_eq!(fs::read(&data_path).unwrap(), fixture());
    assert!(load_repository(&data_path).is_ok());
    let guard = state.repository.read().await;
    assert_eq!(guard.as_ref().map(|r| r.stations().len()), Some(6));

    fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn valid_download_replaces_snapshot() {
    let dir = scratch_dir("valid");
    let data_path = dir.join("stations.json");
    fs::write(&data_path, b"[]").unwrap();
    let state = AppState::new(data_path.clone(), Config::default(), None);

    let staged = state.staging_path();
    fs::write(&staged, fixture()).unwrap();
    assert_eq!(state.install_snapshot(&staged).await.unwrap(), 6);

    assert!(!staged.exists());
    assert_eq!(fs::read(&data_path).unwrap(), fixture());
    let guard = state.repository.read().await;
    assert!(guard.as_ref().is_some_and(|r| r.station_by_code("B001").is_some()));

    fs::remove_dir_all(&dir).unwrap();
}
