/*!
Loading [`EnvironmentSettings`] from a TOML file.

```toml
[app_settings]
retries = 3
region = "eu-west-1"

[connection_strings]
db = "postgres://localhost/app"
```

Values may be strings, integers, floats or booleans; they're all stored as
strings, the same way they'd have appeared on the command line.
*/

use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::settings::EnvironmentSettings;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("couldn't read settings file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't parse settings")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(value) => f.write_str(value),
            Scalar::Integer(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
            Scalar::Boolean(value) => write!(f, "{value}"),
        }
    }
}

/// The on-disk layout of a settings file. Both tables are optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct AppConfig {
    app_settings: HashMap<String, Scalar>,
    connection_strings: HashMap<String, Scalar>,
}

impl AppConfig {
    /// Add this file's tables on top of `settings`.
    fn apply(self, settings: EnvironmentSettings) -> EnvironmentSettings {
        let settings = self
            .app_settings
            .into_iter()
            .fold(settings, |settings, (key, value)| {
                settings.with_app_setting(key, value.to_string())
            });

        self.connection_strings
            .into_iter()
            .fold(settings, |settings, (key, value)| {
                settings.with_connection_string(key, value.to_string())
            })
    }
}

impl EnvironmentSettings {
    /// Parse app settings and connection strings from TOML. The result has no
    /// environment variables.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        Ok(config.apply(Self::empty()))
    }

    /// Load app settings and connection strings from a TOML file, and
    /// environment variables from the current process.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        let config: AppConfig = toml::from_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            app_settings = config.app_settings.len(),
            connection_strings = config.connection_strings.len(),
            "loaded settings"
        );

        Ok(config.apply(Self::from_env()))
    }
}
