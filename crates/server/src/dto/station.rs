use carshare::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarDto {
    pub class_name: String,
    pub car_name: String,
    pub car_comments: String,
}

impl CarDto {
    pub fn from(car: &Car) -> Self {
        Self {
            class_name: car.class_name.to_string(),
            car_name: car.name.to_string(),
            car_comments: car.comment.to_string(),
        }
    }
}

/// Station in the shape the station database stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub station_code: String,
    pub station_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub car_fleet: Vec<CarDto>,
    pub photo_urls: Vec<String>,
    pub station_comment: Option<String>,
    #[serde(rename = "disp1MonthReserveLabel")]
    pub disp_1_month_reserve_label: Option<String>,
    #[serde(rename = "disp3MonthReserveLabel")]
    pub disp_3_month_reserve_label: Option<String>,
}

impl StationDto {
    pub fn from(station: &Station) -> Self {
        Self {
            id: station.id.to_string(),
            station_code: station.code.to_string(),
            station_name: station.name.to_string(),
            latitude: station.coordinate.latitude,
            longitude: station.coordinate.longitude,
            address: station.address.to_string(),
            car_fleet: station.fleet.iter().map(CarDto::from).collect(),
            photo_urls: station.photo_urls.iter().map(|url| url.to_string()).collect(),
            station_comment: station.comment.as_ref().map(|value| value.to_string()),
            disp_1_month_reserve_label: station
                .one_month_reserve_label
                .as_ref()
                .map(|value| value.to_string()),
            disp_3_month_reserve_label: station
                .three_month_reserve_label
                .as_ref()
                .map(|value| value.to_string()),
        }
    }
}
