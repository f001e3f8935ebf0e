/*!
Declarative metadata for commands and their parameters.

Usually this is produced by [`#[derive(Parameters)]`][crate::Parameters], which
checks it for collisions at compile time. Hand-written specs should go through
[`CommandSpec::new`], which performs the same checks at runtime.
*/

use crate::{errors::SpecError, parameter::ValueKind, settings::Source};

/// Which external settings a parameter may fall back on when no switch
/// supplies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sources {
    pub app_setting: bool,
    pub connection_string: bool,
    pub environment_variable: bool,
}

impl Sources {
    pub const NONE: Self = Self {
        app_setting: false,
        connection_string: false,
        environment_variable: false,
    };

    /// The permitted fallback sources, in the order they're consulted
    pub fn fallbacks(self) -> impl Iterator<Item = Source> {
        [
            (self.app_setting, Source::AppSetting),
            (self.connection_string, Source::ConnectionString),
            (self.environment_variable, Source::EnvironmentVariable),
        ]
        .into_iter()
        .filter_map(|(allowed, source)| allowed.then_some(source))
    }
}

/**
Description of one bindable parameter of a command.

```
use switchboard::spec::ParameterSpec;

const PATH: ParameterSpec = ParameterSpec::new("path")
    .short("p")
    .allow_environment_variable()
    .required();

assert!(PATH.matches("p"));
assert!(PATH.matches("path"));
assert!(!PATH.matches("PATH"));
```
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSpec {
    /// The switch name, without the prefix. Also the key used to look the
    /// parameter up in the external settings.
    pub name: &'static str,
    pub short: Option<&'static str>,
    pub sources: Sources,
    pub kind: ValueKind,
    pub required: bool,
    pub description: &'static str,
}

impl ParameterSpec {
    #[inline]
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            short: None,
            sources: Sources::NONE,
            kind: ValueKind::Value,
            required: false,
            description: "",
        }
    }

    #[inline]
    #[must_use]
    pub const fn short(mut self, short: &'static str) -> Self {
        self.short = Some(short);
        self
    }

    #[inline]
    #[must_use]
    pub const fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    #[inline]
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[inline]
    #[must_use]
    pub const fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    #[inline]
    #[must_use]
    pub const fn allow_app_setting(mut self) -> Self {
        self.sources.app_setting = true;
        self
    }

    #[inline]
    #[must_use]
    pub const fn allow_connection_string(mut self) -> Self {
        self.sources.connection_string = true;
        self
    }

    #[inline]
    #[must_use]
    pub const fn allow_environment_variable(mut self) -> Self {
        self.sources.environment_variable = true;
        self
    }

    /// True if a switch with this key should be bound to this parameter.
    /// Keys are case sensitive.
    #[inline]
    pub fn matches(&self, key: &str) -> bool {
        self.name == key || self.short == Some(key)
    }
}

/// Metadata describing one command type: its name and its parameters, in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    name: &'static str,
    parameters: &'static [ParameterSpec],
}

impl CommandSpec {
    /// Create a spec, checking that the command name is usable and that every
    /// name and short name is unique across the command's parameters.
    pub fn new(
        name: &'static str,
        parameters: &'static [ParameterSpec],
    ) -> Result<Self, SpecError> {
        let spec = Self::new_unchecked(name, parameters);
        spec.validate()?;
        Ok(spec)
    }

    /// Create a spec without validating it. The derive macros use this after
    /// performing the same checks at compile time.
    #[doc(hidden)]
    #[inline]
    #[must_use]
    pub const fn new_unchecked(name: &'static str, parameters: &'static [ParameterSpec]) -> Self {
        Self { name, parameters }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn parameters(&self) -> &'static [ParameterSpec] {
        self.parameters
    }

    /// Find the parameter a switch key refers to. A parameter's full name is
    /// preferred over another parameter's short name.
    pub fn parameter(&self, key: &str) -> Option<&'static ParameterSpec> {
        let parameters = self.parameters;

        parameters
            .iter()
            .find(|parameter| parameter.name == key)
            .or_else(|| parameters.iter().find(|parameter| parameter.short == Some(key)))
    }

    pub fn validate(&self) -> Result<(), SpecError> {
        let command = self.name;

        if command.is_empty() {
            return Err(SpecError::EmptyCommandName);
        }

        if !is_valid_command_name(command) {
            return Err(SpecError::InvalidName {
                command,
                name: command,
            });
        }

        for (index, parameter) in self.parameters.iter().enumerate() {
            let name = parameter.name;

            if name.is_empty() {
                return Err(SpecError::EmptyName { command });
            }

            for tag in [Some(name), parameter.short].into_iter().flatten() {
                if !is_valid_switch_name(tag) {
                    return Err(SpecError::InvalidName { command, name: tag });
                }
            }

            if self.parameters[..index].iter().any(|other| other.name == name) {
                return Err(SpecError::DuplicateParameter { command, name });
            }

            // A short name may not repeat an earlier short name, or be any
            // parameter's full name (including its own)
            if let Some(short) = parameter.short {
                if let Some(other) = self
                    .parameters
                    .iter()
                    .enumerate()
                    .find(|&(other_index, other)| {
                        other.name == short || (other_index < index && other.short == Some(short))
                    })
                    .map(|(_, other)| other)
                {
                    return Err(SpecError::ShortCollision {
                        command,
                        parameter: name,
                        short,
                        other: other.name,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Switch names can be anything the tokenizer would split back out unchanged:
/// no separators, no letter directly followed by a digit, no whitespace, and
/// no leading prefix.
fn is_valid_switch_name(name: &str) -> bool {
    !name.starts_with(switchboard_parser::PREFIX)
        && !name.contains(char::is_whitespace)
        && switchboard_parser::split_switch(name) == (name, None)
}

/// Commands are the first token, so they just can't look like a switch.
fn is_valid_command_name(name: &str) -> bool {
    !name.starts_with(switchboard_parser::PREFIX) && !name.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BIMSE: &[ParameterSpec] = &[
        ParameterSpec::new("switch").short("s"),
        ParameterSpec::new("my-setting").allow_app_setting(),
        ParameterSpec::new("verbose").kind(ValueKind::Flag).short("v"),
    ];

    #[test]
    fn lookup_by_name_and_short() {
        let spec = CommandSpec::new("bimse", BIMSE).unwrap();

        assert_eq!(spec.parameter("switch").unwrap().name, "switch");
        assert_eq!(spec.parameter("s").unwrap().name, "switch");
        assert_eq!(spec.parameter("v").unwrap().name, "verbose");
        assert!(spec.parameter("S").is_none());
    }

    #[test]
    fn fallback_order() {
        let sources = Sources {
            app_setting: true,
            connection_string: false,
            environment_variable: true,
        };

        assert_eq!(
            sources.fallbacks().collect::<Vec<_>>(),
            [Source::AppSetting, Source::EnvironmentVariable]
        );
        assert_eq!(Sources::NONE.fallbacks().count(), 0);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        const PARAMS: &[ParameterSpec] = &[ParameterSpec::new("path"), ParameterSpec::new("path")];

        assert_eq!(
            CommandSpec::new("cmd", PARAMS),
            Err(SpecError::DuplicateParameter {
                command: "cmd",
                name: "path"
            })
        );
    }

    #[test]
    fn short_shadowing_a_name_is_rejected() {
        const PARAMS: &[ParameterSpec] = &[
            ParameterSpec::new("path").short("dir"),
            ParameterSpec::new("dir"),
        ];

        assert!(matches!(
            CommandSpec::new("cmd", PARAMS),
            Err(SpecError::ShortCollision { short: "dir", .. })
        ));

        const REVERSED: &[ParameterSpec] = &[
            ParameterSpec::new("dir"),
            ParameterSpec::new("path").short("dir"),
        ];

        assert!(matches!(
            CommandSpec::new("cmd", REVERSED),
            Err(SpecError::ShortCollision { short: "dir", .. })
        ));
    }

    #[test]
    fn repeated_shorts_are_rejected() {
        const PARAMS: &[ParameterSpec] = &[
            ParameterSpec::new("path").short("p"),
            ParameterSpec::new("port").short("p"),
        ];

        assert_eq!(
            CommandSpec::new("cmd", PARAMS),
            Err(SpecError::ShortCollision {
                command: "cmd",
                parameter: "port",
                short: "p",
                other: "path",
            })
        );
    }

    #[test]
    fn unusable_names_are_rejected() {
        const SEPARATOR: &[ParameterSpec] = &[ParameterSpec::new("a:b")];
        const NUMERIC: &[ParameterSpec] = &[ParameterSpec::new("n23")];
        const EMPTY: &[ParameterSpec] = &[ParameterSpec::new("")];
        const INNER_DIGIT: &[ParameterSpec] = &[ParameterSpec::new("ipv4-address")];
        const DIGIT_AFTER_DASH: &[ParameterSpec] = &[ParameterSpec::new("retry-2")];

        assert!(matches!(
            CommandSpec::new("cmd", SEPARATOR),
            Err(SpecError::InvalidName { name: "a:b", .. })
        ));
        assert!(matches!(
            CommandSpec::new("cmd", NUMERIC),
            Err(SpecError::InvalidName { name: "n23", .. })
        ));
        assert!(matches!(
            CommandSpec::new("cmd", INNER_DIGIT),
            Err(SpecError::InvalidName { name: "ipv4-address", .. })
        ));
        assert!(CommandSpec::new("cmd", DIGIT_AFTER_DASH).is_ok());
        assert_eq!(
            CommandSpec::new("cmd", EMPTY),
            Err(SpecError::EmptyName { command: "cmd" })
        );
        assert_eq!(CommandSpec::new("", &[]), Err(SpecError::EmptyCommandName));
        assert!(CommandSpec::new("-cmd", &[]).is_err());
    }
}
