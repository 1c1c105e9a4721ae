//! Settings file loading.
//!
//! Settings come from a TOML file named on the command line, else the file
//! named by `WRAITH_CONFIG`, else built-in defaults:
//!
//! ```toml
//! log_level = "info"
//!
//! [parser]
//! stop_on_first_error = false
//! emit_debug_trace = true
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use wraith_foundation::{Error, Result};
use wraith_orders::ParseConfig;

/// Environment variable naming the settings file.
pub const CONFIG_ENV: &str = "WRAITH_CONFIG";

/// Host settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Parser options.
    pub parser: ParseConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            parser: ParseConfig::default(),
        }
    }
}

impl Settings {
    /// Loads settings from `explicit`, else from `WRAITH_CONFIG`, else defaults.
    ///
    /// # Errors
    /// Returns an error if the chosen file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match config_path(explicit, std::env::var_os(CONFIG_ENV)) {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let shown = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(&shown, &e))?;
        Self::from_toml(&contents).map_err(|e| e.with_source(shown))
    }

    /// Parses settings from TOML text.
    ///
    /// # Errors
    /// Returns a config error if the text is not valid settings TOML.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let settings: Self = toml::from_str(contents).map_err(|e| Error::config(e.message()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks values the deserializer cannot.
    ///
    /// # Errors
    /// Returns a config error if `log_level` is empty.
    pub fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            return Err(Error::config("log_level must not be empty"));
        }
        Ok(())
    }
}

/// Picks the settings file: the explicit path wins over the environment.
fn config_path(explicit: Option<&Path>, env: Option<OsString>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
}
