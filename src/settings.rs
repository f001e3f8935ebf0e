/*!
External, read-only key-value sources that parameters can fall back on when no
switch supplies them.
*/

use std::{collections::HashMap, fmt};

/// Where a parameter's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Switch,
    AppSetting,
    ConnectionString,
    EnvironmentVariable,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Source::Switch => "switch",
            Source::AppSetting => "app setting",
            Source::ConnectionString => "connection string",
            Source::EnvironmentVariable => "environment variable",
        })
    }
}

/**
The three fallback sources consulted while binding parameters: application
settings, connection strings, and environment variables. They're supplied
wholesale by the embedding application, and stay unchanged for the duration
of an invocation.

```
use switchboard::settings::{EnvironmentSettings, Source};

let settings = EnvironmentSettings::empty()
    .with_app_setting("retries", "3")
    .with_connection_string("db", "postgres://localhost");

assert_eq!(settings.lookup(Source::AppSetting, "retries"), Some("3"));
assert_eq!(settings.lookup(Source::EnvironmentVariable, "retries"), None);
```
*/
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSettings {
    app_settings: HashMap<String, String>,
    connection_strings: HashMap<String, String>,
    environment_variables: HashMap<String, String>,
}

impl EnvironmentSettings {
    /// Settings with nothing in any of the sources
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new(
        app_settings: HashMap<String, String>,
        connection_strings: HashMap<String, String>,
        environment_variables: HashMap<String, String>,
    ) -> Self {
        Self {
            app_settings,
            connection_strings,
            environment_variables,
        }
    }

    /// Settings whose environment variables are those of the current process.
    /// Variables that aren't valid unicode are skipped.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            environment_variables: std::env::vars_os()
                .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
                .collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_app_setting(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.app_settings.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_connection_string(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.connection_strings.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_environment_variable(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.environment_variables.insert(name.into(), value.into());
        self
    }

    pub fn app_settings(&self) -> &HashMap<String, String> {
        &self.app_settings
    }

    pub fn connection_strings(&self) -> &HashMap<String, String> {
        &self.connection_strings
    }

    pub fn environment_variables(&self) -> &HashMap<String, String> {
        &self.environment_variables
    }

    /// Look up `name` in one of the sources. There are no settings for
    /// [`Source::Switch`], so that always returns `None`.
    pub fn lookup(&self, source: Source, name: &str) -> Option<&str> {
        let map = match source {
            Source::Switch => return None,
            Source::AppSetting => &self.app_settings,
            Source::ConnectionString => &self.connection_strings,
            Source::EnvironmentVariable => &self.environment_variables,
        };

        map.get(name).map(String::as_str)
    }
}
