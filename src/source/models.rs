use serde::{Deserialize, Serialize};

/// Document id as exported, either a plain string or extended JSON `{"$oid": ".."}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RecordId {
    Plain(String),
    ObjectId {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

impl Default for RecordId {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl RecordId {
    pub fn as_str(&self) -> &str {
        match self {
            RecordId::Plain(id) => id,
            RecordId::ObjectId { oid } => oid,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CarRecord {
    pub class_name: String,
    pub car_name: String,
    #[serde(default)]
    pub car_comments: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct StationRecord {
    #[serde(rename = "_id", default)]
    pub id: RecordId,
    pub station_code: String,
    pub station_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    #[serde(default)]
    pub car_fleet: Vec<CarRecord>,
    #[serde(default)]
    pub photo_urls: Vec<String>,
    #[serde(default)]
    pub station_comment: Option<String>,
    #[serde(rename = "disp1MonthReserveLabel", default)]
    pub disp_1_month_reserve_label: Option<String>,
    #[serde(rename = "disp3MonthReserveLabel", default)]
    pub disp_3_month_reserve_label: Option<String>,
}

/// One row of the flat fleet export, a station with an empty `car_name`
/// has no cars.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FleetRow {
    pub station_code: String,
    pub station_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub car_name: String,
    #[serde(default)]
    pub car_comments: String,
}

impl From<&FleetRow> for StationRecord {
    fn from(row: &FleetRow) -> Self {
        Self {
            id: RecordId::Plain(row.station_code.clone()),
            station_code: row.station_code.clone(),
            station_name: row.station_name.clone(),
            latitude: row.latitude,
            longitude: row.longitude,
            address: row.address.clone(),
            ..Default::default()
        }
    }
}

impl FleetRow {
    pub fn car(&self) -> Option<CarRecord> {
        if self.car_name.is_empty() {
            return None;
        }
        Some(CarRecord {
            class_name: self.class_name.clone(),
            car_name: self.car_name.clone(),
            car_comments: self.car_comments.clone(),
        })
    }
}
