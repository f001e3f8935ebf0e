/*!
Tokenizing of a single switch argument.

A switch can spell its value in several ways inside one token:

- `-path:value`
- `-path=value`
- `-path"value"`
- `-n23` (alphabetic name immediately followed by a number)

All of them collapse to the same `(name, value)` pair. A switch with no inline
value (`-path`) gets its value from the following token, or becomes a flag;
that decision belongs to the [`ArgumentsParser`][crate::ArgumentsParser].
*/

/// The character that introduces a switch.
pub const PREFIX: char = '-';

/// Returns true if this token should be treated as a switch.
#[inline]
#[must_use]
pub fn is_switch(token: &str) -> bool {
    token.starts_with(PREFIX)
}

/**
Split the body of a switch (the token with its [`PREFIX`] already removed)
into a name and an optional inline value.

The earliest of `:`, `=` or `"` splits the body. `:` and `=` are consumed; a
`"` is not, so that it can be stripped along with its partner by [`unquote`].
When there's no separator, the body is split at the first place a letter is
immediately followed by a digit (`n23` is `n` with the value `23`, and
`max-depth3` is `max-depth` with `3`). Otherwise the whole body is the name.

```
use switchboard_parser::split_switch;

assert_eq!(split_switch("path:\"c:\\temp\""), ("path", Some("c:\\temp")));
assert_eq!(split_switch("n23"), ("n", Some("23")));
assert_eq!(split_switch("max-depth3"), ("max-depth", Some("3")));
assert_eq!(split_switch("verbose"), ("verbose", None));
```
*/
#[must_use]
pub fn split_switch(body: &str) -> (&str, Option<&str>) {
    match memchr::memchr3(b':', b'=', b'"', body.as_bytes()) {
        Some(index) => {
            let (name, rest) = body.split_at(index);

            let value = match rest.as_bytes()[0] {
                b'"' => rest,
                _ => &rest[1..],
            };

            (name, Some(unquote(value)))
        }
        None => match split_at_digits(body) {
            Some((name, digits)) => (name, Some(digits)),
            None => (body, None),
        },
    }
}

/// Split before the first digit that directly follows a letter. `n23x` ->
/// (`n`, `23x`); `23` and `a-1` have no such digit.
fn split_at_digits(body: &str) -> Option<(&str, &str)> {
    let split = body
        .char_indices()
        .zip(body.chars().skip(1))
        .find(|&((_, current), next)| current.is_alphabetic() && next.is_ascii_digit())
        .map(|((index, current), _)| index + current.len_utf8())?;

    Some(body.split_at(split))
}

/**
Remove one pair of surrounding double quotes from a value, if it has them.
Values that only start or only end with a quote are returned unchanged.
*/
#[inline]
#[must_use]
pub fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colon_equals_and_quote_aliases_agree() {
        for body in ["path:\"c:\\temp\"", "path=\"c:\\temp\"", "path\"c:\\temp\""] {
            assert_eq!(split_switch(body), ("path", Some("c:\\temp")), "{body}");
        }
    }

    #[test]
    fn unquoted_inline_values() {
        assert_eq!(split_switch("switch:value2"), ("switch", Some("value2")));
        assert_eq!(split_switch("s=value2"), ("s", Some("value2")));
    }

    #[test]
    fn earliest_separator_wins() {
        assert_eq!(split_switch("a=b:c"), ("a", Some("b:c")));
        assert_eq!(split_switch("url:http://x=1"), ("url", Some("http://x=1")));
    }

    #[test]
    fn separator_beats_numeric_suffix() {
        assert_eq!(split_switch("n2:5"), ("n2", Some("5")));
    }

    #[test]
    fn short_numeric_form() {
        assert_eq!(split_switch("n23"), ("n", Some("23")));
        assert_eq!(split_switch("level10"), ("level", Some("10")));
    }

    #[test]
    fn first_letter_digit_transition_splits() {
        assert_eq!(split_switch("my-port8080"), ("my-port", Some("8080")));
        assert_eq!(split_switch("max-depth3"), ("max-depth", Some("3")));
        assert_eq!(split_switch("n23x"), ("n", Some("23x")));
        assert_eq!(split_switch("a1b2"), ("a", Some("1b2")));
    }

    #[test]
    fn digits_without_a_letter_before_them_stay_in_the_name() {
        assert_eq!(split_switch("23"), ("23", None));
        assert_eq!(split_switch("a-1"), ("a-1", None));
        assert_eq!(split_switch("x_9"), ("x_9", None));
    }

    #[test]
    fn empty_and_degenerate_bodies() {
        assert_eq!(split_switch(""), ("", None));
        assert_eq!(split_switch("=x"), ("", Some("x")));
        assert_eq!(split_switch("k:"), ("k", Some("")));
        assert_eq!(split_switch("k\"\""), ("k", Some("")));
    }

    #[test]
    fn unbalanced_quotes_are_kept() {
        assert_eq!(unquote("\"open"), "\"open");
        assert_eq!(unquote("close\""), "close\"");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(split_switch("k\"abc"), ("k", Some("\"abc")));
    }
}
