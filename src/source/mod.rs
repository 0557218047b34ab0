use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
};
use thiserror::Error;
use zip::{ZipArchive, read::ZipFile};

mod config;
pub mod models;
pub use config::*;
pub use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
    #[error("Unsupported snapshot format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("Invalid record on line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
}

#[derive(Default, Debug, Clone)]
pub enum StorageType {
    #[default]
    None,
    Json(PathBuf),
    Zip(PathBuf),
    Csv(PathBuf),
}

/// Reads station snapshots exported from the station database.
#[derive(Default)]
pub struct StationReader {
    config: Config,
    storage: StorageType,
}

impl StationReader {
    pub fn new(config: self::Config) -> Self {
        Self {
            config,
            storage: Default::default(),
        }
    }

    pub fn from_json<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage = StorageType::Json(path.as_ref().to_path_buf());
        self
    }

    pub fn from_zip<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage = StorageType::Zip(path.as_ref().to_path_buf());
        self
    }

    pub fn from_csv<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage = StorageType::Csv(path.as_ref().to_path_buf());
        self
    }

    /// Picks the storage from the file extension.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<Self, self::Error> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("json") => Ok(self.from_json(path)),
            Some("zip") => Ok(self.from_zip(path)),
            Some("csv") => Ok(self.from_csv(path)),
            _ => Err(self::Error::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn storage(&self) -> &StorageType {
        &self.storage
    }

    /// Visits every station in file order.
    pub fn stream_stations<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, StationRecord)),
    {
        let records: Vec<StationRecord> = match &self.storage {
            StorageType::None => Vec::new(),
            StorageType::Json(path) => {
                let file = File::open(path)?;
                read_json(BufReader::new(file))?
            }
            StorageType::Zip(path) => {
                let zip_file = File::open(path)?;
                let mut archive = ZipArchive::new(zip_file)?;
                let file = get_file(&mut archive, &self.config.stations_file_name)?;
                read_json(BufReader::new(file))?
            }
            StorageType::Csv(path) => {
                let file = File::open(path)?;
                read_fleet_csv(file)?
            }
        };
        records.into_iter().enumerate().for_each(f);
        Ok(())
    }
}

fn read_json<R, T>(reader: R) -> Result<Vec<T>, self::Error>
where
    R: Read,
    T: DeserializeOwned,
{
    Ok(serde_json::from_reader(reader)?)
}

/// Folds consecutive rows sharing a station code into one station.
pub fn read_fleet_csv<R: Read>(reader: R) -> Result<Vec<StationRecord>, self::Error> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut stations: Vec<StationRecord> = Vec::new();
    for (i, row) in reader.deserialize::<FleetRow>().enumerate() {
        let row = row?;
        if row.station_code.is_empty() {
            // Header is line 1
            return Err(self::Error::InvalidRecord {
                line: i + 2,
                reason: "missing station_code".into(),
            });
        }
        let car = row.car();
        match stations.last_mut() {
            Some(station) if station.station_code == row.station_code => {
                station.car_fleet.extend(car);
            }
            _ => {
                let mut station = StationRecord::from(&row);
                station.car_fleet.extend(car);
                stations.push(station);
            }
        }
    }
    Ok(stations)
}

fn get_file<'a>(
    archive: &'a mut ZipArchive<File>,
    name: &'a str,
) -> Result<ZipFile<'a, File>, self::Error> {
    let index = archive
        .index_for_name(name)
        .ok_or(self::Error::FileNotFound(name.to_string()))?;
    let file = archive.by_index(index)?;
    Ok(file)
}
