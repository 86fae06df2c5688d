//! User configuration (`config.toml`).
//!
//! Looked up in the platform config dir (e.g. `~/.config/colcalc/config.toml`)
//! unless a path is given on the command line. A missing file means defaults.

use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use colcalc_core::seed::DEFAULT_SEED;

use crate::error::{AppError, Result};

pub const DEFAULT_COL_WIDTH: u16 = 14;
pub const MIN_COL_WIDTH: u16 = 6;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Seed for the generated startup values.
    pub seed: u64,
    /// Display width of each grid column.
    pub col_width: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed: DEFAULT_SEED,
            col_width: DEFAULT_COL_WIDTH,
        }
    }
}

impl Config {
    pub fn parse(text: &str) -> std::result::Result<Config, toml::de::Error> {
        let mut config: Config = toml::from_str(text)?;
        config.col_width = config.col_width.max(MIN_COL_WIDTH);
        Ok(config)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "colcalc")?;
    Some(proj.config_dir().join("config.toml"))
}

/// Load the config from `path`, or from the default location when None.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            None => return Ok(Config::default()),
        },
    };
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(&path).map_err(|source| AppError::ConfigRead {
        path: path.clone(),
        source,
    })?;
    Config::parse(&text).map_err(|source| AppError::ConfigParse { path, source })
}
