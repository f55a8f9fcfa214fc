use std::fmt;
use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};

use crate::error::{ClientError, Result};

pub const ENV_KEY_ID: &str = "VERACODE_API_KEY_ID";
pub const ENV_KEY_SECRET: &str = "VERACODE_API_KEY_SECRET";
pub const ENV_PROFILE: &str = "VERACODE_API_PROFILE";

const DEFAULT_PROFILE: &str = "default";

/// API region, selected by the prefix of the key id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Commercial,
    European,
    Federal,
}

impl Region {
    pub fn from_key_id(key_id: &str) -> Self {
        match key_id.split_once('-') {
            Some(("vera01ei", _)) => Region::European,
            Some(("vera01es", _)) => Region::Federal,
            _ => Region::Commercial,
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            Region::Commercial => "https://api.veracode.com",
            Region::European => "https://api.veracode.eu",
            Region::Federal => "https://api.veracode.us",
        }
    }
}

/// Veracode API key pair.
#[derive(Clone)]
pub struct ApiCredentials {
    key_id: String,
    key_secret: String,
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("key_id", &self.key_id)
            .field("key_secret", &"<redacted>")
            .finish()
    }
}

impl ApiCredentials {
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        }
    }

    /// Resolve credentials from the environment (including a `.env` file),
    /// falling back to `~/.veracode/credentials`.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();

        if let (Ok(id), Ok(secret)) = (std::env::var(ENV_KEY_ID), std::env::var(ENV_KEY_SECRET))
            && !id.is_empty()
            && !secret.is_empty()
        {
            tracing::debug!("Using API credentials from environment");
            return Ok(Self::new(id, secret));
        }

        let profile = std::env::var(ENV_PROFILE).unwrap_or_else(|_| DEFAULT_PROFILE.to_string());
        let path = default_credentials_path()?;
        if !path.exists() {
            return Err(ClientError::Credentials(format!(
                "set {ENV_KEY_ID}/{ENV_KEY_SECRET} or create {}",
                path.display()
            )));
        }
        Self::from_file(&path, &profile)
    }

    /// Read one profile section of an INI credentials file.
    pub fn from_file(path: &Path, profile: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Ini))
            .build()
            .map_err(|e| ClientError::Credentials(format!("{}: {e}", path.display())))?;

        let read = |key: &str| {
            settings
                .get_string(&format!("{profile}.{key}"))
                .map_err(|_| {
                    ClientError::Credentials(format!(
                        "{key} missing from profile [{profile}] in {}",
                        path.display()
                    ))
                })
        };

        tracing::debug!(profile, path = %path.display(), "Using API credentials file");
        Ok(Self::new(
            read("veracode_api_key_id")?,
            read("veracode_api_key_secret")?,
        ))
    }

    pub fn region(&self) -> Region {
        Region::from_key_id(&self.key_id)
    }

    /// Key id as it appears in the signature, without any region prefix.
    pub fn signing_id(&self) -> &str {
        strip_region_prefix(&self.key_id)
    }

    pub(crate) fn signing_secret(&self) -> &str {
        strip_region_prefix(&self.key_secret)
    }
}

fn strip_region_prefix(value: &str) -> &str {
    match value.split_once('-') {
        Some((prefix, rest)) if prefix.starts_with("vera01") => rest,
        _ => value,
    }
}

fn default_credentials_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ClientError::Credentials("Cannot determine home directory".into()))?;
    Ok(home.join(".veracode").join("credentials"))
}
