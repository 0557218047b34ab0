mod common;

use std::{fs, io::Write};

use carshare::{
    prelude::*,
    source::{self, Error, RecordId, StorageType},
};
use common::{fixture_path, temp_path};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

const FLEET_CSV: &str = "\
station_code,station_name,latitude,longitude,address,class_name,car_name,car_comments
S1,Shiba,35.65,139.75,東京都港区芝1-1,ベーシック,ヤリス,
S1,Shiba,35.65,139.75,東京都港区芝1-1,ミドル,カローラ,ETC付
S2,Sakae,35.17,136.90,愛知県名古屋市中区栄3-1,,,
S3,Tenjin,33.59,130.40,福岡県福岡市中央区天神2-1,プレミアム,アルファード,
";

#[test]
fn json_snapshot() {
    let reader = StationReader::default().from_json(fixture_path("stations.json"));
    let mut records = Vec::new();
    reader
        .stream_stations(|(_, record)| records.push(record))
        .unwrap();
    assert_eq!(records.len(), 6);
    assert_eq!(
        records[0].id,
        RecordId::ObjectId {
            oid: "66b0f1a2c3d4e5f601234567".into()
        }
    );
    assert_eq!(records[0].car_fleet.len(), 3);

    let empty = &records[3];
    assert_eq!(empty.station_code, "C001");
    assert!(empty.car_fleet.is_empty());
    assert!(empty.photo_urls.is_empty());
    assert!(empty.disp_1_month_reserve_label.is_none());
}

#[test]
fn repository_from_json() {
    let repository = common::fixture_repository();
    assert_eq!(repository.stations().len(), 6);
    let station = repository.station_by_code("A001").unwrap();
    assert_eq!(station.index, 0);
    assert_eq!(station.fleet_size(), 3);
    assert_eq!(station.model_variety(), 2);
    assert!(station.has_model("カローラ"));
    assert!(repository.station_by_code("Z999").is_none());
    assert!(repository.age().num_seconds() >= 0);
    assert!(repository.loaded_at() <= chrono::Utc::now());
}

#[test]
fn zip_snapshot() {
    let path = temp_path("snapshot.zip");
    {
        let file = fs::File::create(&path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        zip.start_file("stations.json", options).unwrap();
        zip.write_all(&fs::read(fixture_path("stations.json")).unwrap())
            .unwrap();
        zip.finish().unwrap();
    }

    let reader = StationReader::default().from_zip(&path);
    let repository = Repository::new().load_stations(reader).unwrap();
    assert_eq!(repository.stations().len(), 6);

    let reader = StationReader::new(source::Config {
        stations_file_name: "missing.json".into(),
    })
    .from_zip(&path);
    let error = Repository::new().load_stations(reader).unwrap_err();
    assert!(matches!(error, Error::FileNotFound(name) if name == "missing.json"));

    fs::remove_file(&path).unwrap();
}

#[test]
fn fleet_csv_rows_fold_into_stations() {
    let records = source::read_fleet_csv(FLEET_CSV.as_bytes()).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].station_code, "S1");
    assert_eq!(records[0].car_fleet.len(), 2);
    assert_eq!(records[0].car_fleet[1].car_comments, "ETC付");
    assert!(records[1].car_fleet.is_empty());
    assert_eq!(records[2].car_fleet[0].car_name, "アルファード");
}

#[test]
fn csv_snapshot_from_path() {
    let path = temp_path("fleet.csv");
    fs::write(&path, FLEET_CSV).unwrap();

    let reader = StationReader::default().from_path(&path).unwrap();
    assert!(matches!(reader.storage(), StorageType::Csv(_)));
    let repository = Repository::new().load_stations(reader).unwrap();
    let codes: Vec<&str> = repository
        .stations()
        .iter()
        .map(|station| station.code.as_ref())
        .collect();
    assert_eq!(codes, vec!["S1", "S2", "S3"]);

    fs::remove_file(&path).unwrap();
}

#[test]
fn csv_row_without_code_is_rejected() {
    let csv = "\
station_code,station_name,latitude,longitude,address,class_name,car_name,car_comments
S1,Shiba,35.65,139.75,東京都港区芝1-1,ベーシック,ヤリス,
,Nowhere,35.0,139.0,東京都港区,ベーシック,ノート,
";
    let error = source::read_fleet_csv(csv.as_bytes()).unwrap_err();
    assert!(matches!(error, Error::InvalidRecord { line: 3, .. }));
}

#[test]
fn unsupported_extension() {
    let error = StationReader::default()
        .from_path("snapshot.parquet")
        .err()
        .unwrap();
    assert!(matches!(error, Error::UnsupportedFormat(_)));
}

#[test]
fn missing_file() {
    let reader = StationReader::default().from_json(fixture_path("does-not-exist.json"));
    let error = Repository::new().load_stations(reader).unwrap_err();
    assert!(matches!(error, Error::Io(_)));
}

#[test]
fn duplicate_code_replaces_in_place() {
    let repository = Repository::new().with_stations([
        common::station("S1", "東京都港区", &["A"]),
        common::station("S2", "東京都港区", &["B"]),
        common::station("S1", "大阪府大阪市", &["C", "D"]),
    ]);
    assert_eq!(repository.stations().len(), 2);
    let station = repository.station_by_code("S1").unwrap();
    assert_eq!(station.index, 0);
    assert_eq!(station.address.as_ref(), "大阪府大阪市");
    assert_eq!(station.fleet_size(), 2);
    assert_eq!(repository.stations()[1].code.as_ref(), "S2");
}

#[test]
fn config_from_toml() {
    let config = Config::from_toml_str(
        r#"
        prefix_match = "longest"
        top_models = 5
        car_count_order = "count_descending"

        [histogram]
        bucket_width = 10

        [cluster]
        small_below = 3
        "#,
    )
    .unwrap();
    assert_eq!(config.prefix_match, PrefixMatch::Longest);
    assert_eq!(config.top_models, 5);
    assert_eq!(config.ranking_size, 10);
    assert_eq!(config.car_count_order, BucketOrder::CountDescending);
    assert_eq!(config.histogram.bucket_width, 10);
    assert_eq!(config.histogram.bucket_count, 11);
    assert_eq!(config.cluster.small_below, 3);
    assert_eq!(config.cluster.large_from, 100);

    assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
}

#[test]
fn config_rejects_zero_bucket_width() {
    let error = Config::from_toml_str("[histogram]\nbucket_width = 0\n").unwrap_err();
    assert!(matches!(error, carshare::engine::ConfigError::ZeroBucketWidth));
}
