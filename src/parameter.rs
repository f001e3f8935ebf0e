/*!
Traits for types that can be produced from the raw string value of a switch
or an external setting.

Every value reaching a command arrives as a string: the inline or two-token
value of a switch, the [`FLAG_VALUE`][switchboard_parser::FLAG_VALUE] of a bare
flag, or an entry from the [`EnvironmentSettings`][crate::settings::EnvironmentSettings].
[`Value`] is the "type" part of a parameter, responsible for turning that
string into the field's type.
*/

use core::fmt::Display;

/// How a parameter consumes its switch. This is informational; every kind
/// is still bound from a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// The parameter is normally given as a bare flag (`-verbose`)
    Flag,

    /// The parameter is normally given a value (`-path:value`)
    Value,
}

/// Error for things that can go wrong in a [`Value`] implementation
pub trait Error {
    /// The argument failed to parse into an instance of the type
    fn parse_error(arg: &str, msg: impl Display) -> Self;

    /// The argument should have been one of these (or, possibly, a case
    /// insensitive variation)
    fn should_be(arg: &str, expected: &'static [&'static str]) -> Self;

    /// Something else went wrong
    fn custom(msg: impl Display) -> Self;
}

/**
A type that can be parsed from the string value of a single parameter.

Implementations exist for the primitive types, [`String`], paths, network
addresses, and [`Option<T>`]. For your own enums and newtypes, use
[`#[derive(Value)]`][crate::Value].
*/
pub trait Value: Sized {
    const KIND: ValueKind = ValueKind::Value;

    /// Parse a `Value` from the raw string.
    fn from_arg<E: Error>(arg: &str) -> Result<Self, E>;
}

/// Parse a [`FromStr`][core::str::FromStr] type, reporting failures through `E`.
#[inline]
pub fn parse_value<T, E>(arg: &str) -> Result<T, E>
where
    T: core::str::FromStr,
    T::Err: Display,
    E: Error,
{
    arg.parse().map_err(|err| E::parse_error(arg, err))
}
