use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What to do with each reconciled project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Link,
    Unlink,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Link => write!(f, "link"),
            Action::Unlink => write!(f, "unlink"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub run: RunSettings,
    #[serde(default)]
    pub files: FileSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub api: ApiSettings,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.run.account_id.trim().is_empty() {
            return Err("run.account_id must be set".into());
        }
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        if self.api.timeout_secs == 0 {
            return Err("api.timeout_secs must be > 0".into());
        }
        Ok(())
    }

    /// `validate` lifted into the crate error type.
    pub fn check(&self) -> crate::error::Result<()> {
        self.validate().map_err(crate::error::RelinkError::Config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSettings {
    #[serde(default = "default_action")]
    pub action: Action,
    /// Issue mutating calls. When false every record is reported as skipped.
    #[serde(default)]
    pub live: bool,
    /// Account that owns the applications to act on.
    #[serde(default)]
    pub account_id: String,
    /// Start as if the operator had already answered "x".
    #[serde(default)]
    pub assume_yes: bool,
}
fn default_action() -> Action {
    Action::Unlink
}
impl Default for RunSettings {
    fn default() -> Self {
        Self {
            action: default_action(),
            live: false,
            account_id: String::new(),
            assume_yes: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default = "default_linked_projects")]
    pub linked_projects: PathBuf,
    #[serde(default = "default_legacy_apps")]
    pub legacy_apps: PathBuf,
}
fn default_linked_projects() -> PathBuf {
    PathBuf::from("linked_projects.csv")
}
fn default_legacy_apps() -> PathBuf {
    PathBuf::from("legacy_apps.csv")
}
impl Default for FileSettings {
    fn default() -> Self {
        Self {
            linked_projects: default_linked_projects(),
            legacy_apps: default_legacy_apps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file: Option<PathBuf>,
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_file() -> Option<PathBuf> {
    Some(PathBuf::from("sca-relink.log"))
}
impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Overrides the region URL derived from the API key id.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}
fn default_timeout_secs() -> u64 {
    30
}
impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

pub mod loader {
    use super::*;
    use crate::error::{RelinkError, Result};
    use config::{Config, Environment, File};

    pub const DEFAULT_CONFIG_FILE: &str = "sca-relink.toml";
    pub const ENV_PREFIX: &str = "SCA_RELINK";

    /// Account ids are opaque strings; typed env parsing would turn
    /// `00000` into `0`.
    pub const ENV_ACCOUNT_ID: &str = "SCA_RELINK__RUN__ACCOUNT_ID";

    /// Load the configuration file (if present) and `SCA_RELINK__*`
    /// environment overrides. Validation is left to the caller so that
    /// command-line flags can be applied first.
    pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
        let mut builder = Config::builder();
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(RelinkError::Config(format!(
                        "config file not found: {}",
                        p.display()
                    )));
                }
                builder = builder.add_source(File::from(p));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    builder = builder.add_source(File::from(default_path));
                }
            }
        }
        // e.g. SCA_RELINK__RUN__LIVE=true
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .separator("__"),
        );
        let cfg = builder
            .build()
            .map_err(|e| RelinkError::Config(format!("config build error: {e}")))?;
        let mut merged: AppConfig = cfg
            .try_deserialize()
            .map_err(|e| RelinkError::Config(format!("config deserialize error: {e}")))?;

        if let Ok(account_id) = std::env::var(ENV_ACCOUNT_ID) {
            merged.run.account_id = account_id;
        }
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_trial_unlink() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.run.action, Action::Unlink);
        assert!(!cfg.run.live);
        assert!(!cfg.run.assume_yes);
        assert_eq!(cfg.logging.file.as_deref(), Some(Path::new("sca-relink.log")));
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn account_id_is_required() {
        let mut cfg = AppConfig::default();
        assert!(cfg.validate().unwrap_err().contains("account_id"));
        cfg.run.account_id = "00000".into();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn check_reports_config_error() {
        let err = AppConfig::default().check().unwrap_err();
        assert!(matches!(err, crate::error::RelinkError::Config(ref msg) if msg.contains("account_id")));
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut cfg = AppConfig::default();
        cfg.run.account_id = "1".into();
        cfg.logging.level = "loud".into();
        assert!(cfg.validate().unwrap_err().contains("logging.level"));
    }

    #[test]
    fn action_display_matches_config_spelling() {
        assert_eq!(Action::Link.to_string(), "link");
        assert_eq!(Action::Unlink.to_string(), "unlink");
    }
}
