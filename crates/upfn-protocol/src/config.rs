//! Provider configuration sourced from the environment.
//!
//! Providers take no command-line arguments; the host controls them through
//! the process environment. Only diagnostics are configurable: the protocol
//! itself has no knobs.

use std::env;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Environment variable holding the tracing filter expression.
pub const LOG_FILTER_ENV: &str = "UPFN_LOG";

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "UPFN_LOG_FORMAT";

/// Default log filter; stderr stays quiet unless something goes wrong.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Supported logging output formats.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Human-readable single line output.
    #[default]
    Compact,
    /// Structured JSON suitable for ingestion by logging stacks.
    Json,
}

/// Diagnostic settings shared by every provider binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    log_filter: String,
    log_format: LogFormat,
    rejected_log_format: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            log_filter: String::from(DEFAULT_LOG_FILTER),
            log_format: LogFormat::default(),
            rejected_log_format: None,
        }
    }
}

impl ProviderConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Variables that are unset or not valid Unicode are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(
            [LOG_FILTER_ENV, LOG_FORMAT_ENV]
                .into_iter()
                .filter_map(|key| env::var(key).ok().map(|value| (key, value))),
        )
    }

    /// Builds the configuration from explicit key/value pairs.
    ///
    /// Unknown keys are ignored. An empty filter keeps the default. An
    /// unrecognised format keeps the default and is remembered so it can be
    /// reported once logging is running.
    ///
    /// # Example
    ///
    /// ```
    /// use upfn_protocol::config::{LogFormat, ProviderConfig};
    ///
    /// let config = ProviderConfig::from_vars([
    ///     ("UPFN_LOG", "debug"),
    ///     ("UPFN_LOG_FORMAT", "JSON"),
    /// ]);
    /// assert_eq!(config.log_filter(), "debug");
    /// assert_eq!(config.log_format(), LogFormat::Json);
    /// ```
    #[must_use]
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in vars {
            let raw = value.as_ref().trim();
            match key.as_ref() {
                LOG_FILTER_ENV if !raw.is_empty() => raw.clone_into(&mut config.log_filter),
                LOG_FORMAT_ENV => match raw.parse::<LogFormat>() {
                    Ok(format) => config.log_format = format,
                    Err(_) => config.rejected_log_format = Some(raw.to_owned()),
                },
                _ => {}
            }
        }
        config
    }

    /// Returns the tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the unrecognised format value, if one was supplied.
    #[must_use]
    pub fn rejected_log_format(&self) -> Option<&str> {
        self.rejected_log_format.as_deref()
    }
}
