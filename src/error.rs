//! Error types for the colcalc binary

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while setting up the application.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("cannot read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[cfg_attr(feature = "tui", allow(dead_code))]
    #[error("this build has no terminal front-end; use --print or --output")]
    NoFrontEnd,
}

pub type Result<T> = std::result::Result<T, AppError>;
