use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::power::PowerModel;
use crate::view::{SortKey, ViewState};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub power: PowerConfig,
    pub colors: ColorsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub refresh_rate_ms: u64,
    pub top_n: usize,
    pub default_sort: String,
    pub log_file: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            refresh_rate_ms: 1000,
            top_n: 20,
            default_sort: "cpu".to_string(),
            log_file: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PowerConfig {
    pub cpu_tdp_watts: f64,
    pub mem_watts_per_gb: f64,
}

impl Default for PowerConfig {
    fn default() -> Self {
        let model = PowerModel::default();
        PowerConfig {
            cpu_tdp_watts: model.cpu_tdp_watts,
            mem_watts_per_gb: model.mem_watts_per_gb,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub theme: String,
    pub color_support: String,
    pub tier_low: String,
    pub tier_mid: String,
    pub tier_high: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            theme: "dark".to_string(),
            color_support: "auto".to_string(),
            tier_low: "#10b981".to_string(),
            tier_mid: "#f97316".to_string(),
            tier_high: "#ef4444".to_string(),
        }
    }
}

impl Config {
    pub fn power_model(&self) -> PowerModel {
        PowerModel::new(self.power.cpu_tdp_watts, self.power.mem_watts_per_gb)
    }

    pub fn view_state(&self) -> ViewState {
        ViewState::new(
            SortKey::from_str_config(&self.general.default_sort),
            self.general.top_n,
            self.general.refresh_rate_ms,
        )
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("wattop").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.general.refresh_rate_ms, 1000);
        assert_eq!(config.general.top_n, 20);
        assert_eq!(config.general.default_sort, "cpu");
        assert!(config.general.log_file.is_none());
        assert_eq!(config.power.cpu_tdp_watts, 15.0);
        assert_eq!(config.power.mem_watts_per_gb, 1.5);
        assert_eq!(config.colors.theme, "dark");
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[general]
refresh_rate_ms = 500
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.refresh_rate_ms, 500);
        assert_eq!(config.general.top_n, 20);
        assert_eq!(config.power.cpu_tdp_watts, 15.0);
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[general]
refresh_rate_ms = 2000
top_n = 40
default_sort = "power"
log_file = "/tmp/wattop.log"

[power]
cpu_tdp_watts = 45.0
mem_watts_per_gb = 0.5

[colors]
theme = "light"
color_support = "256"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.top_n, 40);
        assert_eq!(
            config.general.log_file.as_deref(),
            Some(Path::new("/tmp/wattop.log"))
        );
        assert_eq!(config.power_model(), PowerModel::new(45.0, 0.5));
        assert_eq!(config.colors.color_support, "256");

        let view = config.view_state();
        assert_eq!(view.sort_key, SortKey::Power);
        assert!(view.sort_descending);
        assert_eq!(view.refresh_interval_ms(), 2000);
    }

    #[test]
    fn out_of_range_values_are_clamped_into_state() {
        let toml_str = r#"
[general]
refresh_rate_ms = 10
top_n = 0

[power]
cpu_tdp_watts = -5.0
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let view = config.view_state();
        assert_eq!(view.refresh_interval_ms(), 200);
        assert_eq!(view.top_n, 1);
        assert_eq!(config.power_model().cpu_tdp_watts, 0.0);
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.general.refresh_rate_ms, 1000);
    }

    #[test]
    fn invalid_toml_returns_default() {
        let temp = std::env::temp_dir().join("wattop_test_invalid.toml");
        std::fs::write(&temp, "this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(&temp);
        assert_eq!(config.general.refresh_rate_ms, 1000);
        let _ = std::fs::remove_file(&temp);
    }
}
