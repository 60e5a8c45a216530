//! Runtime settings
//!
//! Job definitions are fixed; settings only control where the status file goes,
//! how old a log may be, and the default log filter.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings for a status run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Directory holding the status file, created if missing
    pub output_dir: PathBuf,
    /// Name of the status file inside `output_dir`
    pub output_file: String,
    /// Maximum age of a job log, in minutes
    pub freshness_minutes: u64,
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl Settings {
    /// Loads settings for the given profile
    ///
    /// Sources, lowest precedence first:
    /// 1. Built-in defaults
    /// 2. config/{profile}.toml, next to the executable or in the current directory
    /// 3. Environment variables with prefix JOBSTATUS_ (e.g., JOBSTATUS_FRESHNESS_MINUTES=60)
    pub fn load(profile: &str) -> Result<Self> {
        Self::load_from(Self::find_config_dir().as_deref(), profile)
    }

    /// Loads settings, looking for the profile file in `config_dir`
    pub fn load_from(config_dir: Option<&Path>, profile: &str) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("output_dir", defaults.output_dir.to_string_lossy().as_ref())?
            .set_default("output_file", defaults.output_file)?
            .set_default("freshness_minutes", defaults.freshness_minutes)?
            .set_default("log_level", defaults.log_level)?;

        if let Some(dir) = config_dir {
            let profile_path = dir.join(profile);
            builder = builder.add_source(File::from(profile_path.as_path()).required(false));
        } else {
            builder =
                builder.add_source(File::with_name(&format!("config/{}", profile)).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("JOBSTATUS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.set_override("profile", profile)?.build()?;

        Ok(config.try_deserialize()?)
    }

    /// Finds the config directory next to the executable, then in the current directory
    fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Full path of the status file
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }

    pub fn freshness_threshold(&self) -> Duration {
        Duration::from_secs(self.freshness_minutes.saturating_mul(60))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile: "release".to_string(),
            output_dir: PathBuf::from("/home/ubuntu/jobstatus/metrics"),
            output_file: "index.html".to_string(),
            freshness_minutes: 720,
            log_level: "info".to_string(),
        }
    }
}
