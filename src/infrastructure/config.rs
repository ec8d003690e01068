use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct MotionSettings {
    /// Push channel endpoint serving the sensor event stream.
    pub events_url: String,
    #[serde(default = "default_event_name")]
    pub event_name: String,
    #[serde(default = "default_motion_page_size")]
    pub page_size: usize,
    #[serde(default = "default_chart_points")]
    pub chart_points: usize,
    #[serde(default = "default_motion_export")]
    pub export_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TemperatureSettings {
    /// Realtime database base URL and the watched path under it.
    pub feed_url: String,
    pub feed_path: String,
    /// Hosted tabular store base URL, API key and table name.
    pub store_url: String,
    pub store_key: String,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_temperature_page_size")]
    pub page_size: usize,
    #[serde(default = "default_temperature_export")]
    pub export_path: String,
}

fn default_event_name() -> String {
    "datas".to_string()
}

fn default_motion_page_size() -> usize {
    10
}

fn default_chart_points() -> usize {
    30
}

fn default_motion_export() -> String {
    "data.csv".to_string()
}

fn default_table() -> String {
    "data".to_string()
}

fn default_temperature_page_size() -> usize {
    20
}

fn default_temperature_export() -> String {
    "temperature_data.csv".to_string()
}

pub fn load_motion_settings() -> anyhow::Result<MotionSettings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/motion"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_temperature_settings() -> anyhow::Result<TemperatureSettings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/temperature"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_motion_defaults() {
        let settings: MotionSettings = config::Config::builder()
            .add_source(config::File::from_str(
                "events_url = \"http://192.168.4.1/events\"",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.event_name, "datas");
        assert_eq!(settings.page_size, 10);
        assert_eq!(settings.chart_points, 30);
        assert_eq!(settings.export_path, "data.csv");
    }

    #[test]
    fn test_temperature_defaults() {
        let toml = r#"
            feed_url = "https://rtdb.example.com"
            feed_path = "Example/myFloat"
            store_url = "https://example.supabase.co"
            store_key = "anon-key"
        "#;
        let settings: TemperatureSettings = config::Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.table, "data");
        assert_eq!(settings.page_size, 20);
        assert_eq!(settings.export_path, "temperature_data.csv");
    }
}
