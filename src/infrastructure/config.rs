use std::path::{Path, PathBuf};

use config::ConfigError;
use serde::Deserialize;

use crate::domain::config::FoldConfig;
use crate::utils;

const CONFIG: &str = include_str!("../../.config/config.json5");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    /// Horizontal padding, in cells, on each side of the text.
    #[serde(default)]
    pub padding: u16,
    #[serde(default)]
    pub fold: FoldConfig,
}

impl Config {
    /// Loads the bundled defaults, overlaid by any `config.*` file in the
    /// config directory (`FOLDTEXT_CONFIG` overrides its location).
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(&utils::get_data_dir(), &utils::get_config_dir())
    }

    pub fn load(data_dir: &Path, config_dir: &Path) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5))
            .set_default("_data_dir", data_dir.to_string_lossy().as_ref())?
            .set_default("_config_dir", config_dir.to_string_lossy().as_ref())?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            let path = config_dir.join(file);
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                found_config = true;
            }
            builder = builder.add_source(config::File::from(path).format(*format).required(false));
        }
        if !found_config {
            log::info!(
                "No configuration file found in {}, using defaults",
                config_dir.display()
            );
        }

        builder.build()?.try_deserialize().map_err(|e| {
            log::error!("Invalid configuration: {e}");
            e
        })
    }
}
