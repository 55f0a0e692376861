//! Service configuration.
//!
//! Defaults suit local development. Each field can be overridden from the
//! environment:
//!
//! - `BOOKVAULT_ADDR` - listen address (default `0.0.0.0:8000`)
//! - `BOOKVAULT_DATA_FILE` - snapshot file (default `data/books.json`)

use std::path::PathBuf;

pub const ADDR_VAR: &str = "BOOKVAULT_ADDR";
pub const DATA_FILE_VAR: &str = "BOOKVAULT_DATA_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Socket address to listen on.
    pub addr: String,
    /// Path of the JSON snapshot file.
    pub data_file: PathBuf,
}

fn default_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data/books.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            data_file: default_data_file(),
        }
    }
}

impl Config {
    /// Defaults, overridden by any of the `BOOKVAULT_*` variables that are set.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`. Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(addr) = var(ADDR_VAR) {
            self.addr = addr;
        }
        if let Some(path) = var(DATA_FILE_VAR) {
            self.data_file = PathBuf::from(path);
        }
        self
    }
}
