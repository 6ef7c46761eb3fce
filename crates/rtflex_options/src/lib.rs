//! rtflex_options: `rtflex.json` parsing and command-line options.
//!
//! The scanner takes no options. Everything here configures how the
//! `rtflex` front end reads input and prints the token stream.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "rtflex.json";

/// Options read from `rtflex.json`, matching its camelCase schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CliOptions {
    /// How tokens are printed.
    pub format: Option<OutputFormat>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Prefix each token with its `line:column` position.
    pub spans: Option<bool>,
    /// Report scanner diagnostics.
    pub diagnostics: Option<bool>,
    /// Default log level when `RUST_LOG` is not set.
    pub log_level: Option<LogLevel>,
}

/// Token stream output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The filter string understood by `env_logger`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Raise the level by `steps`, saturating at `Trace`.
    pub fn raised(self, steps: u8) -> LogLevel {
        const LEVELS: [LogLevel; 6] = [
            LogLevel::Off,
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        let index = LEVELS.iter().position(|l| *l == self).unwrap_or(2);
        LEVELS[(index + steps as usize).min(LEVELS.len() - 1)]
    }
}

impl CliOptions {
    /// Overlay `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merge(self, overrides: CliOptions) -> CliOptions {
        CliOptions {
            format: overrides.format.or(self.format),
            pretty: overrides.pretty.or(self.pretty),
            spans: overrides.spans.or(self.spans),
            diagnostics: overrides.diagnostics.or(self.diagnostics),
            log_level: overrides.log_level.or(self.log_level),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    pub fn pretty(&self) -> bool {
        self.pretty.unwrap_or(false)
    }

    pub fn spans(&self) -> bool {
        self.spans.unwrap_or(false)
    }

    pub fn diagnostics(&self) -> bool {
        self.diagnostics.unwrap_or(true)
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level.unwrap_or_default()
    }
}

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Cannot read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse `rtflex.json` content.
pub fn parse_config(content: &str) -> Result<CliOptions, OptionsError> {
    Ok(serde_json::from_str(content)?)
}

/// Parse a config file from a path.
pub fn parse_config_file(path: impl AsRef<Path>) -> Result<CliOptions, OptionsError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let options = parse_config(&content)?;
    log::debug!("loaded config from {}", path.display());
    Ok(options)
}

/// Load an explicitly requested config file, or `rtflex.json` from `dir`
/// when it exists. A missing default file yields empty options.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<CliOptions, OptionsError> {
    if let Some(path) = explicit {
        return parse_config_file(path);
    }
    let default_path = dir.join(CONFIG_FILE_NAME);
    if default_path.is_file() {
        parse_config_file(default_path)
    } else {
        Ok(CliOptions::default())
    }
}
