pub struct Config {
    /// Name of the JSON export inside a zip archive.
    pub stations_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stations_file_name: "stations.json".into(),
        }
    }
}
