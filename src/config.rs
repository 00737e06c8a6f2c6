use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

const CONFIG_PATH: &str = "config.toml";

fn default_delay_ms() -> u64 {
    6000
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_output_dir() -> String {
    "scraped_data".to_string()
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub scraper: ScraperConfig,
}

#[derive(Debug, Deserialize)]
pub struct ScraperConfig {
    /// Pause between requests, applied after every target.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Whole-request timeout for each page fetch.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Directory receiving one `<theater>.json` per target.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scraper: ScraperConfig {
                delay_ms: default_delay_ms(),
                timeout_seconds: default_timeout_seconds(),
                output_dir: default_output_dir(),
            },
        }
    }
}

impl Config {
    /// Loads `config.toml` from the working directory. A missing file is
    /// not an error; the defaults above apply.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
