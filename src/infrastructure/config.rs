use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct MonitorConfig {
    pub backend: BackendSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
}

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Load the monitor configuration. The file is optional; without it the
/// built-in defaults apply.
pub fn load_monitor_config() -> anyhow::Result<MonitorConfig> {
    let settings = config::Config::builder()
        .set_default("backend.base_url", DEFAULT_BASE_URL)?
        .add_source(config::File::with_name("config/monitor").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_without_a_file() {
        let settings = config::Config::builder()
            .set_default("backend.base_url", DEFAULT_BASE_URL)
            .unwrap()
            .build()
            .unwrap();
        let config: MonitorConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.backend.base_url, "http://127.0.0.1:8000");
    }
}
