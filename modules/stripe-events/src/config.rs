use std::env;

use crate::error::{Result, StripeError};

/// Settings for decoding incoming webhook events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventConfig {
    /// API version events are expected to carry. `None` accepts any version.
    pub api_version: Option<String>,
    /// Accept events whose version differs from `api_version`, logging a warning.
    pub ignore_api_version_mismatch: bool,
}

impl EventConfig {
    /// Load configuration from environment variables:
    /// `STRIPE_API_VERSION` and `STRIPE_IGNORE_API_VERSION_MISMATCH`.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_version = lookup("STRIPE_API_VERSION")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let ignore_api_version_mismatch = match lookup("STRIPE_IGNORE_API_VERSION_MISMATCH") {
            Some(raw) => parse_flag("STRIPE_IGNORE_API_VERSION_MISMATCH", &raw)?,
            None => false,
        };

        Ok(Self {
            api_version,
            ignore_api_version_mismatch,
        })
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn with_ignore_api_version_mismatch(mut self, ignore: bool) -> Self {
        self.ignore_api_version_mismatch = ignore;
        self
    }

    /// Log the active settings.
    pub fn log(&self) {
        tracing::info!(
            api_version = self.api_version.as_deref().unwrap_or("<any>"),
            ignore_api_version_mismatch = self.ignore_api_version_mismatch,
            "Event config"
        );
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" => Ok(false),
        "1" | "true" | "yes" => Ok(true),
        other => Err(StripeError::Config(format!(
            "{key} must be a boolean, got {other:?}"
        ))),
    }
}
