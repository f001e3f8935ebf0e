#![no_std]

/*!
Low-level implementation of switch-style argument handling. Takes care of
picking out the leading command, splitting switches from their values, and
deciding when a switch is just a flag. No type handling happens here; every
name and value is a borrowed slice of the original tokens. Usually this is too
low level to use directly.
*/

#[cfg(any(test, feature = "std"))]
extern crate std;

mod switch;

use core::{fmt, iter::Peekable};

pub use switch::{PREFIX, is_switch, split_switch, unquote};

/// The value given to a switch that appeared without one.
pub const FLAG_VALUE: &str = "true";

/// A single name/value pair, as it appeared on the command line (minus the
/// prefix and any surrounding quotes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Switch<'arg> {
    pub key: &'arg str,
    pub value: &'arg str,
}

impl<'arg> Switch<'arg> {
    /// A switch that was present without any value
    #[inline]
    #[must_use]
    pub const fn flag(key: &'arg str) -> Self {
        Self {
            key,
            value: FLAG_VALUE,
        }
    }
}

/**
The [`ArgumentsParser`] type operates by passing arguments it finds into a
[`Visitor`], to be handled.
 */
pub trait Visitor<'arg> {
    type Value;

    /// The first token, which didn't look like a switch.
    fn visit_command(self, command: &'arg str) -> Self::Value;

    /// A switch with a value, given either inline (`-name:value`) or as the
    /// following token (`-name value`).
    fn visit_option(self, name: &'arg str, value: &'arg str) -> Self::Value;

    /// A switch that had no value; either it was the last token or it was
    /// followed by another switch.
    fn visit_flag(self, name: &'arg str) -> Self::Value;

    /// A non-switch token that wasn't the command and wasn't consumed as the
    /// value of a switch.
    fn visit_ignored(self, argument: &'arg str) -> Self::Value;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing has been parsed yet; a non-switch token here is the command
    Start,
    Ready,
}

/**
An `ArgumentsParser` is the main entry point into `switchboard_parser`. It
parses arguments in each call to `next_arg`, sending those arguments to the
given [`Visitor`].

`switchboard_parser` operates entirely on borrowed data. The ubiquitous `'arg`
lifetime refers to the borrowed command line tokens.
*/
pub struct ArgumentsParser<I: Iterator> {
    state: State,
    args: Peekable<I>,
}

impl<I> Clone for ArgumentsParser<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            args: self.args.clone(),
        }
    }
}

impl<I> fmt::Debug for ArgumentsParser<I>
where
    I: Iterator + fmt::Debug,
    I::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentsParser")
            .field("state", &self.state)
            .field("args", &self.args)
            .finish()
    }
}

impl<'arg, I> ArgumentsParser<I>
where
    I: Iterator<Item = &'arg str>,
{
    /**
    Create a new [`ArgumentsParser`] from an iterator of tokens. This list
    should *exclude* the name of the program, which is commonly passed as the
    first argument in the list.
     */
    #[inline]
    #[must_use]
    pub fn new(args: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            state: State::Start,
            args: args.into_iter().peekable(),
        }
    }

    pub fn next_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        let argument = self.args.next()?;
        let state = core::mem::replace(&mut self.state, State::Ready);

        Some(match argument.strip_prefix(PREFIX) {
            None => match state {
                State::Start => visitor.visit_command(argument),
                State::Ready => visitor.visit_ignored(argument),
            },
            Some(body) => match split_switch(body) {
                (name, Some(value)) => visitor.visit_option(name, value),
                (name, None) => match self.args.next_if(|next| !is_switch(next)) {
                    Some(value) => visitor.visit_option(name, unquote(value)),
                    None => visitor.visit_flag(name),
                },
            },
        })
    }
}

/// A classified token, produced by iterating an [`ArgumentsParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'arg> {
    Command(&'arg str),
    Switch(Switch<'arg>),
    Ignored(&'arg str),
}

struct TokenVisitor;

impl<'arg> Visitor<'arg> for TokenVisitor {
    type Value = Token<'arg>;

    #[inline]
    fn visit_command(self, command: &'arg str) -> Token<'arg> {
        Token::Command(command)
    }

    #[inline]
    fn visit_option(self, key: &'arg str, value: &'arg str) -> Token<'arg> {
        Token::Switch(Switch { key, value })
    }

    #[inline]
    fn visit_flag(self, key: &'arg str) -> Token<'arg> {
        Token::Switch(Switch::flag(key))
    }

    #[inline]
    fn visit_ignored(self, argument: &'arg str) -> Token<'arg> {
        Token::Ignored(argument)
    }
}

impl<'arg, I> Iterator for ArgumentsParser<I>
where
    I: Iterator<Item = &'arg str>,
{
    type Item = Token<'arg>;

    #[inline]
    fn next(&mut self) -> Option<Token<'arg>> {
        self.next_arg(TokenVisitor)
    }
}
