//! # Drive Configuration Module
//!
//! Provides configuration loading for the drive index hosts.
//!
//! ## Overview
//!
//! A [`DriveConfig`] carries the Azure AD application credentials, the drive
//! to expose and the listen address of the HTTP front-end. It can be loaded
//! from a YAML file or from environment variables, and validated before any
//! network call is attempted.
//!
//! ## Usage
//!
//! ### From a YAML file
//!
//! ```ignore
//! use core_runtime::config::DriveConfig;
//!
//! let config = DriveConfig::load("config.yaml")?;
//! config.validate()?;
//! ```
//!
//! The file uses short keys:
//!
//! ```yaml
//! tenant: 7ce56c16-d70e-453f-893d-0d8d0878db3b
//! application: cd84edce-d529-411f-b9a5-c8b159ca0c1d
//! secret: "..."
//! drive: b!xaErFvCtpUaXFEZHOWXkd4Lea4xSTMlJtRYmPUtWwOHy0WIzEwqSR4bpgPfiO6JC
//! listen: ":8086"
//! ```
//!
//! ### From the environment
//!
//! ```ignore
//! let config = DriveConfig::from_env();
//! ```
//!
//! Reads `TENANT_ID`, `APP_ID`, `CLI_SECRET`, `DRIVE_ID` and `LISTEN`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Listen address written into generated configuration files.
pub const DEFAULT_LISTEN: &str = ":8086";

/// Environment variable names read by [`DriveConfig::from_env`].
pub mod env_keys {
    pub const TENANT_ID: &str = "TENANT_ID";
    pub const APPLICATION_ID: &str = "APP_ID";
    pub const CLIENT_SECRET: &str = "CLI_SECRET";
    pub const DRIVE_ID: &str = "DRIVE_ID";
    pub const LISTEN: &str = "LISTEN";
}

/// Configuration of a drive index deployment.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveConfig {
    /// Azure AD tenant (directory) id
    #[serde(default)]
    pub tenant: String,

    /// Azure AD application (client) id
    #[serde(default)]
    pub application: String,

    /// Application client secret
    #[serde(default)]
    pub secret: String,

    /// Id of the drive to expose
    #[serde(default)]
    pub drive: String,

    /// Listen address, either `host:port` or `:port`
    #[serde(default)]
    pub listen: String,
}

impl fmt::Debug for DriveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriveConfig")
            .field("tenant", &self.tenant)
            .field("application", &self.application)
            .field("secret", &"[REDACTED]")
            .field("drive", &self.drive)
            .field("listen", &self.listen)
            .finish()
    }
}

impl DriveConfig {
    /// Starter configuration written by the `new` command.
    pub fn template() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
            ..Self::default()
        }
    }

    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Build a configuration from environment variables. Missing variables
    /// yield empty fields; call [`validate`](Self::validate) afterwards.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).unwrap_or_default();
        Self {
            tenant: get(env_keys::TENANT_ID),
            application: get(env_keys::APPLICATION_ID),
            secret: get(env_keys::CLIENT_SECRET),
            drive: get(env_keys::DRIVE_ID),
            listen: lookup(env_keys::LISTEN).unwrap_or_else(|| DEFAULT_LISTEN.to_string()),
        }
    }

    /// Serialize the configuration as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check that every field needed to reach the drive is present.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("tenant", &self.tenant),
            ("application", &self.application),
            ("secret", &self.secret),
            ("drive", &self.drive),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("`{}` must not be empty", name)));
            }
        }

        Ok(())
    }

    /// Socket address to bind. A bare `:port` binds every interface and an
    /// empty value falls back to [`DEFAULT_LISTEN`].
    pub fn bind_address(&self) -> String {
        let listen = self.listen.trim();
        let listen = if listen.is_empty() {
            DEFAULT_LISTEN
        } else {
            listen
        };

        if listen.starts_with(':') {
            format!("0.0.0.0{}", listen)
        } else {
            listen.to_string()
        }
    }
}
