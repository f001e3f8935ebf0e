/*!
Concrete error types for everything that can go wrong between parsing the
command line and running a command.

Callers can tell "bad input" ([`BindError`], [`InvokeError::UnknownCommand`])
apart from "the command itself failed" ([`InvokeError::Execution`]). Parsing
never fails; the tokenizer accepts anything.
 */

use std::fmt::Display;

use joinery::JoinableIterator as _;

use crate::{parameter, settings::Source};

/// An error trying to convert a raw string into a parameter's type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParameterError {
    /// Failed to parse the argument
    #[error("couldn't parse {arg:?}: {message}")]
    ParseError { arg: String, message: String },

    /// The argument should have been one of these (or, possibly, a case
    /// insensitive variation)
    #[error("{arg:?} should be one of {}", .expected.iter().join_with(", "))]
    ShouldBe {
        arg: String,
        expected: &'static [&'static str],
    },

    /// A command was asked to assign a parameter it doesn't declare
    #[error("no parameter named {0:?}")]
    UnknownParameter(String),

    /// Something else went wrong
    #[error("{0}")]
    Custom(String),
}

impl ParameterError {
    pub fn unknown(parameter: &str) -> Self {
        Self::UnknownParameter(parameter.to_owned())
    }
}

impl parameter::Error for ParameterError {
    fn parse_error(arg: &str, message: impl Display) -> Self {
        Self::ParseError {
            arg: arg.to_owned(),
            message: message.to_string(),
        }
    }

    fn should_be(arg: &str, expected: &'static [&'static str]) -> Self {
        Self::ShouldBe {
            arg: arg.to_owned(),
            expected,
        }
    }

    fn custom(message: impl Display) -> Self {
        Self::Custom(message.to_string())
    }
}

/// A command or parameter declaration is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SpecError {
    #[error("command names can't be empty")]
    EmptyCommandName,

    #[error("command {command:?} has a parameter with an empty name")]
    EmptyName { command: &'static str },

    #[error("command {command:?}: {name:?} can't be used as a switch name")]
    InvalidName {
        command: &'static str,
        name: &'static str,
    },

    #[error("command {command:?} declares parameter {name:?} more than once")]
    DuplicateParameter {
        command: &'static str,
        name: &'static str,
    },

    /// A short name is reused, or shadows another parameter's name
    #[error("command {command:?}: short name {short:?} of {parameter:?} collides with {other:?}")]
    ShortCollision {
        command: &'static str,
        parameter: &'static str,
        short: &'static str,
        other: &'static str,
    },

    #[error("a command named {0:?} is already registered")]
    DuplicateCommand(&'static str),
}

/// Binding a command's parameters failed. Nothing is run after a binding
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BindError {
    /// No switch or permitted setting supplied a required parameter
    #[error("required parameter {parameter:?} wasn't given")]
    MissingRequired { parameter: &'static str },

    /// A value was found, but it couldn't be converted into the parameter's type
    #[error("invalid value {raw:?} for parameter {parameter:?} (from {origin})")]
    Conversion {
        parameter: &'static str,
        raw: String,
        origin: Source,
        #[source]
        error: ParameterError,
    },
}

impl BindError {
    /// The parameter that failed to bind
    pub fn parameter(&self) -> &'static str {
        match *self {
            Self::MissingRequired { parameter } | Self::Conversion { parameter, .. } => parameter,
        }
    }
}

/// Errors from resolving, creating, binding, running or releasing a command.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum InvokeError {
    /// Dispatch was requested, but the arguments didn't start with a command
    #[error("no command was given; expected one of {}", .known.iter().join_with(", "))]
    MissingCommand { known: Vec<&'static str> },

    /// The name doesn't match any registered command
    #[error("unknown command {name:?}; expected one of {}", .known.iter().join_with(", "))]
    UnknownCommand {
        name: String,
        known: Vec<&'static str>,
    },

    /// The factory couldn't produce an instance
    #[error("couldn't create command {command:?}")]
    Creation {
        command: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("couldn't bind parameters for command {command:?}")]
    Binding {
        command: &'static str,
        #[source]
        error: BindError,
    },

    /// The command's own `run` failed. The original error is preserved.
    #[error("command {command:?} failed")]
    Execution {
        command: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// Releasing the instance failed after everything else succeeded
    #[error("couldn't release command {command:?}")]
    Release {
        command: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl InvokeError {
    /// True if this error was caused by the command line or settings, rather
    /// than by the command or its factory.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MissingCommand { .. } | Self::UnknownCommand { .. } | Self::Binding { .. }
        )
    }
}
