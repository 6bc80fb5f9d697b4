//! Repository configuration (`.gitlet/config.toml`).
//!
//! Ambient, optional settings layered on top of the persisted repository
//! state in `src/repo.rs`. A missing file is not an error: every field has a
//! default and the repository behaves exactly as it would with an empty
//! file.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

/// Top-level repository configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitletConfig {
    /// Author settings.
    #[serde(default)]
    pub author: AuthorConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Default-author override, applied at `init` time only.
///
/// The `author <name>` command still overrides this at any point; this
/// config only changes what a freshly initialized repository starts with.
/// Absent a config file (or an `[author]` section), this resolves to the
/// same `"Default author"` the core object model uses on its own.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorConfig {
    /// Default author name for new repositories (default: `"Default author"`).
    #[serde(default = "default_author_name")]
    pub name: String,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: default_author_name(),
        }
    }
}

fn default_author_name() -> String {
    crate::repo::DEFAULT_AUTHOR.to_owned()
}

/// Logging settings, consumed by `src/telemetry.rs`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Floor for the `tracing` `EnvFilter` when `GITLET_LOG` is unset
    /// (default: `"warn"`).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_owned()
}

/// Error loading a repository configuration file.
#[derive(Debug)]
pub struct ConfigError {
    /// The path that was being loaded, if the error happened on disk.
    pub path: Option<std::path::PathBuf>,
    /// Human-readable message, with a line number when one is known.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(p) = &self.path {
            write!(f, "{}: {}", p.display(), self.message)
        } else {
            write!(f, "config error: {}", self.message)
        }
    }
}

impl std::error::Error for ConfigError {}

impl GitletConfig {
    /// Load configuration from `path`.
    ///
    /// Returns all defaults if the file does not exist.
    ///
    /// # Errors
    /// Returns `ConfigError` on I/O errors (other than not-found) or
    /// malformed TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError {
                    path: Some(path.to_owned()),
                    message: format!("could not read file: {e}"),
                });
            }
        };
        Self::parse(&contents).map_err(|mut e| {
            e.path = Some(path.to_owned());
            e
        })
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `ConfigError` on invalid TOML or unknown fields.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| {
            let mut message = e.message().to_owned();
            if let Some(span) = e.span() {
                let line = toml_str[..span.start].chars().filter(|&c| c == '\n').count() + 1;
                message = format!("line {line}: {message}");
            }
            ConfigError {
                path: None,
                message,
            }
        })
    }
}
