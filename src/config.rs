// SPDX-License-Identifier: GPL-3.0-only

//! User configuration read from a JSON file.
//!
//! Every field is optional; a missing file means defaults.
//!
//! ```json
//! {
//!     "fallback_layout": "kb-us",
//!     "mapping_dir": "/usr/share/chromakeys/mapping",
//!     "default_model": "Razer BlackWidow Elite"
//! }
//! ```

use crate::app_settings::FALLBACK_LAYOUT;
use crate::keyboard::KeyboardWidget;
use crate::resources::LayoutSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// User configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Layout shown when a requested layout does not exist.
    pub fallback_layout: String,
    /// Directory of layout graphics; embedded graphics are used when unset.
    pub mapping_dir: Option<PathBuf>,
    /// Model loaded when none is given on the command line.
    pub default_model: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fallback_layout: FALLBACK_LAYOUT.to_string(),
            mapping_dir: None,
            default_model: None,
        }
    }
}

impl Config {
    /// Reads the configuration file at `path`.
    ///
    /// A file that does not exist yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::Io {
                    source: e,
                    path: path.display().to_string(),
                });
            }
        };

        serde_json::from_str(&text).map_err(|e| ConfigError::Json {
            line: e.line(),
            source: e,
            path: path.display().to_string(),
        })
    }

    /// Returns where layout graphics should be fetched from.
    #[must_use]
    pub fn layout_source(&self) -> LayoutSource {
        match &self.mapping_dir {
            Some(dir) => LayoutSource::Directory(dir.clone()),
            None => LayoutSource::Embedded,
        }
    }

    /// Creates an unloaded widget configured from this file.
    #[must_use]
    pub fn widget(&self, container_id: &str) -> KeyboardWidget {
        KeyboardWidget::new(container_id, self.layout_source())
            .with_fallback_layout(self.fallback_layout.clone())
    }
}

/// Error reading the configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// The file exists but could not be read
    Io {
        /// The underlying I/O error
        source: std::io::Error,
        /// Path of the file
        path: String,
    },
    /// The file is not valid configuration JSON
    Json {
        /// The underlying JSON error
        source: serde_json::Error,
        /// Path of the file
        path: String,
        /// Line of the error (from serde_json)
        line: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { source, path } => {
                write!(f, "I/O error reading config '{}': {}", path, source)
            }
            ConfigError::Json { source, path, line } => write!(
                f,
                "Invalid config '{}' at line {}: {}\n  Suggestion: \
                 Check the JSON syntax and field names",
                path, line, source
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Json { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load("/nonexistent/chromakeys.json").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.fallback_layout, "kb-gb");
        assert_eq!(config.layout_source(), LayoutSource::Embedded);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "mapping_dir": "/opt/maps" }}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.fallback_layout, "kb-gb");
        assert_eq!(
            config.layout_source(),
            LayoutSource::Directory(PathBuf::from("/opt/maps"))
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\n  \"fallback_layout\": 3\n}}").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        match &err {
            ConfigError::Json { line, .. } => assert_eq!(*line, 2),
            other => panic!("Expected Json error, got {:?}", other),
        }
        assert!(format!("{}", err).contains("Suggestion"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "fallback": "kb-us" }}"#).unwrap();
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_widget_uses_config() {
        let config = Config {
            fallback_layout: "kb-us".into(),
            mapping_dir: Some("/opt/maps".into()),
            default_model: None,
        };
        let widget = config.widget("kb");
        assert_eq!(widget.container_id(), "kb");
        assert_eq!(widget.source(), &LayoutSource::Directory("/opt/maps".into()));
    }
}
