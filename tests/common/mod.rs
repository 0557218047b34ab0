#![allow(dead_code)]

use carshare::prelude::*;
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR")))
}

/// The six station fixture snapshot.
pub fn fixture_repository() -> Repository {
    let reader = StationReader::default().from_json(fixture_path("stations.json"));
    Repository::new().load_stations(reader).unwrap()
}

/// A station with one car per model name, all of class Basic.
pub fn station(code: &str, address: &str, models: &[&str]) -> Station {
    Station {
        id: code.into(),
        code: code.into(),
        name: format!("{code} station").into(),
        coordinate: Coordinate::new(35.0, 139.0),
        address: address.into(),
        fleet: models
            .iter()
            .map(|model| Car {
                class_name: CarClass::BASIC.into(),
                name: (*model).into(),
                comment: "".into(),
            })
            .collect(),
        ..Default::default()
    }
}

/// A scratch path unique to this test process.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("carshare-{}-{name}", std::process::id()))
}
