/*!
The owned result of parsing a command line: an optional leading command and
the switches, in the order they were given.
*/

use core::fmt;

use joinery::JoinableIterator as _;
use switchboard_parser::{ArgumentsParser, FLAG_VALUE, Visitor};

use crate::{errors::ParameterError, parameter::Value};

/// One `name`/`value` pair from the command line. Flags carry
/// [`FLAG_VALUE`] as their value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Switch {
    pub key: String,
    pub value: String,
}

impl Switch {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn flag(key: impl Into<String>) -> Self {
        Self::new(key, FLAG_VALUE)
    }
}

impl From<switchboard_parser::Switch<'_>> for Switch {
    fn from(switch: switchboard_parser::Switch<'_>) -> Self {
        Self::new(switch.key, switch.value)
    }
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}:\"{}\"", switchboard_parser::PREFIX, self.key, self.value)
    }
}

/**
A parsed command line.

```
use switchboard::Arguments;

let args = Arguments::parse(["run", "-path", "c:\\Program Files", "-flag"]);

assert_eq!(args.command(), Some("run"));
assert_eq!(args.get::<String>("path").unwrap(), "c:\\Program Files");
assert!(args.get::<bool>("flag").unwrap());
assert!(!args.get::<bool>("unknown").unwrap());
```
*/
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    command: Option<String>,
    switches: Vec<Switch>,
}

impl Arguments {
    pub fn new(command: Option<String>, switches: Vec<Switch>) -> Self {
        Self { command, switches }
    }

    /// Parse a list of tokens. This list should *exclude* the name of the
    /// program. Parsing never fails: tokens it can't use are skipped.
    pub fn parse<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        let mut parser = ArgumentsParser::new(tokens.into_iter());
        let mut arguments = Self::default();

        while parser.next_arg(&mut arguments).is_some() {}

        arguments
    }

    /// Parse the arguments of the current process, skipping the program name.
    /// Arguments that aren't valid unicode are converted lossily.
    pub fn from_env() -> Self {
        let tokens: Vec<String> = std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        Self::parse(tokens.iter().map(String::as_str))
    }

    #[inline]
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    #[inline]
    pub fn switches(&self) -> &[Switch] {
        &self.switches
    }

    /// The value of the last switch named `name`, if any.
    pub fn last(&self, name: &str) -> Option<&str> {
        self.switches
            .iter()
            .rev()
            .find(|switch| switch.key == name)
            .map(|switch| switch.value.as_str())
    }

    /// Convert the last switch named `name` to `T`, or produce `T`'s default
    /// (`false`, `0`, an empty string) if there isn't one.
    pub fn get<T: Value + Default>(&self, name: &str) -> Result<T, ParameterError> {
        self.last(name)
            .map(T::from_arg)
            .transpose()
            .map(Option::unwrap_or_default)
    }

    /// Like [`get`][Self::get], but distinguishes an absent switch (`None`)
    /// from one that was given, converted or not.
    pub fn try_get<T: Value>(&self, name: &str) -> Option<Result<T, ParameterError>> {
        self.last(name).map(T::from_arg)
    }
}

impl<'arg> Visitor<'arg> for &mut Arguments {
    type Value = ();

    fn visit_command(self, command: &'arg str) {
        tracing::trace!(command, "found command");
        self.command = Some(command.to_owned());
    }

    fn visit_option(self, name: &'arg str, value: &'arg str) {
        tracing::trace!(name, value, "found switch");
        self.switches.push(Switch::new(name, value));
    }

    fn visit_flag(self, name: &'arg str) {
        tracing::trace!(name, "found flag");
        self.switches.push(Switch::flag(name));
    }

    fn visit_ignored(self, argument: &'arg str) {
        tracing::trace!(argument, "ignoring positional token");
    }
}

/// Renders the arguments back into tokens that parse to the same thing.
impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let command = self.command.iter().map(|command| command as &dyn fmt::Display);
        let switches = self.switches.iter().map(|switch| switch as &dyn fmt::Display);

        write!(f, "{}", command.chain(switches).join_with(' '))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn switches(arguments: &Arguments) -> Vec<(&str, &str)> {
        arguments
            .switches()
            .iter()
            .map(|switch| (switch.key.as_str(), switch.value.as_str()))
            .collect()
    }

    #[test]
    fn empty() {
        let args = Arguments::parse(Vec::new());

        assert_eq!(args.command(), None);
        assert!(args.switches().is_empty());
    }

    #[test]
    fn command_only() {
        let args = Arguments::parse(["run"]);

        assert_eq!(args.command(), Some("run"));
        assert!(args.switches().is_empty());
    }

    #[test]
    fn leading_switch_is_not_a_command() {
        let args = Arguments::parse(["-file", "\"C:\\temp\\file.json\""]);

        assert_eq!(args.command(), None);
        assert_eq!(switches(&args), [("file", "C:\\temp\\file.json")]);
    }

    #[test]
    fn mixed_forms() {
        let args = Arguments::parse([
            "run",
            "-path",
            "c:\\Program Files",
            "-dir",
            "c:\\Windows\\System32",
            "-flag",
            "-moreflag",
        ]);

        assert_eq!(args.command(), Some("run"));
        assert_eq!(
            switches(&args),
            [
                ("path", "c:\\Program Files"),
                ("dir", "c:\\Windows\\System32"),
                ("flag", "true"),
                ("moreflag", "true"),
            ]
        );
        assert_eq!(args.get::<String>("path").unwrap(), "c:\\Program Files");
        assert!(args.get::<bool>("flag").unwrap());
        assert!(!args.get::<bool>("unknown").unwrap());
        assert_eq!(args.get::<String>("unknown").unwrap(), "");
    }

    #[test]
    fn last_switch_wins() {
        let args = Arguments::parse(["-n1", "-n:2", "-m"]);

        assert_eq!(args.switches().len(), 3);
        assert_eq!(args.get::<u32>("n").unwrap(), 2);
        assert_eq!(args.try_get::<u32>("n"), Some(Ok(2)));
        assert_eq!(args.try_get::<u32>("missing"), None);
        assert_eq!(args.get::<u32>("missing").unwrap(), 0);
    }

    #[test]
    fn conversion_failure() {
        let args = Arguments::parse(["-count:many"]);

        assert!(matches!(
            args.get::<u32>("count"),
            Err(ParameterError::ParseError { .. })
        ));
        assert!(matches!(
            args.try_get::<u32>("count"),
            Some(Err(ParameterError::ParseError { .. }))
        ));
        assert_eq!(args.try_get::<u32>("absent"), None);
    }

    #[test]
    fn owned_from_borrowed() {
        let owned: Vec<Switch> = switchboard_parser::ArgumentsParser::new(["-a:1", "-b"])
            .filter_map(|token| match token {
                switchboard_parser::Token::Switch(switch) => Some(switch.into()),
                _ => None,
            })
            .collect();

        assert_eq!(owned, [Switch::new("a", "1"), Switch::flag("b")]);
    }

    #[test]
    fn display_round_trips() {
        let args = Arguments::parse(["copy", "-from", "a b", "-force", "-to=c"]);
        let rendered = args.to_string();

        assert_eq!(rendered, "copy -from:\"a b\" -force:\"true\" -to:\"c\"");

        let tokens = ["copy", "-from:\"a b\"", "-force:\"true\"", "-to:\"c\""];
        assert_eq!(Arguments::parse(tokens), args);
    }
}
