// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logbook-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logbook and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Log output for binaries embedding the library.
//!
//! Library code only emits `tracing` events; nothing is printed until a subscriber is installed.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("invalid log filter {directive:?}: {source}")]
    Filter {
        directive: String,
        source: ParseError,
    },
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled(#[from] TryInitError),
}

/// `RUST_LOG` when set, otherwise `fallback` (e.g. `warn` or `logbook=debug`).
pub fn env_filter(fallback: &str) -> Result<EnvFilter, ObservabilityError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(fallback).map_err(|source| ObservabilityError::Filter {
        directive: fallback.to_owned(),
        source,
    })
}

/// Installs a compact stderr subscriber. Stdout stays reserved for command output.
pub fn init(fallback: &str) -> Result<(), ObservabilityError> {
    let filter = env_filter(fallback)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{env_filter, ObservabilityError};

    #[test]
    fn rejects_malformed_fallback() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let err = env_filter("logbook=loud").unwrap_err();
        assert!(matches!(err, ObservabilityError::Filter { .. }));
    }

    #[test]
    fn accepts_level_and_target_directives() {
        assert!(env_filter("warn").is_ok());
        assert!(env_filter("warn,logbook=debug").is_ok());
    }
}
