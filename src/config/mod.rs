// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logbook-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logbook and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layered settings.
//!
//! Sources, lowest priority first:
//!
//! 1. built-in defaults
//! 2. `$XDG_CONFIG_HOME/logbook/config.toml` (platform config dir)
//! 3. `./logbook.toml`
//! 4. `LOGBOOK_*` environment variables (`LOGBOOK_STORE_PATH`, `LOGBOOK_DURABLE_WRITES`, ...)

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::{RenderOptions, DEFAULT_DATETIME_FORMAT};
use crate::store::WriteDurability;

pub const APP_DIR: &str = "logbook";
pub const CONFIG_FILE: &str = "config.toml";
pub const LOCAL_CONFIG_FILE: &str = "logbook.toml";
pub const ENV_PREFIX: &str = "LOGBOOK_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {path:?}")]
    Missing { path: PathBuf },
    #[error("invalid configuration: {0}")]
    Extract(#[from] Box<figment::Error>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Template store document.
    pub store_path: PathBuf,
    /// Format for date/time values rendered without a specifier.
    pub default_datetime_format: String,
    /// fsync the store file and its directory on save.
    pub durable_writes: bool,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            default_datetime_format: DEFAULT_DATETIME_FORMAT.to_owned(),
            durable_writes: false,
            log_level: "warn".to_owned(),
        }
    }
}

fn default_store_path() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from("logbook.json"),
        |data_dir| data_dir.join(APP_DIR).join("templates.json"),
    )
}

impl Config {
    /// The user-level config file, if the platform has a config directory.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Every layer merged, without extracting.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(user_config) = Self::user_config_path() {
            figment = figment.merge(Toml::file(user_config));
        }
        figment
            .merge(Toml::file(LOCAL_CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).lowercase(true))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(|err| ConfigError::Extract(Box::new(err)))
    }

    /// Defaults, then the file at `path`, then the environment. The file must exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::Missing {
                path: path.to_path_buf(),
            });
        }
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).lowercase(true))
            .extract()
            .map_err(|err| ConfigError::Extract(Box::new(err)))
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            default_datetime_format: self.default_datetime_format.clone(),
        }
    }

    pub fn write_durability(&self) -> WriteDurability {
        if self.durable_writes {
            WriteDurability::Durable
        } else {
            WriteDurability::BestEffort
        }
    }
}
