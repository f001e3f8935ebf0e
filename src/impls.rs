/*!
Implementations of the [`parameter`][crate::parameter] traits for various
primitive and standard library types
 */

use std::path::PathBuf;

use crate::parameter::{Error, Value, ValueKind, parse_value};

macro_rules! from_str {
    ($($type:ident $(:: $path:ident)*,)*) => {
        $(
            impl Value for $type $(:: $path)* {
                #[inline]
                fn from_arg<E: Error>(arg: &str) -> Result<Self, E> {
                    parse_value(arg)
                }
            }
        )*
    };
}

from_str! {
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64,
    char,

    String,
    PathBuf,

    std::net::Ipv4Addr,
    std::net::Ipv6Addr,
    std::net::IpAddr,
    std::net::SocketAddrV4,
    std::net::SocketAddrV6,
    std::net::SocketAddr,
}

/// Flags are bound from [`FLAG_VALUE`][switchboard_parser::FLAG_VALUE] when they
/// appear without a value, but can also be spelled out (`-verbose:false`).
impl Value for bool {
    const KIND: ValueKind = ValueKind::Flag;

    fn from_arg<E: Error>(arg: &str) -> Result<Self, E> {
        if arg.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if arg.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(E::should_be(arg, &["true", "false"]))
        }
    }
}

impl<T: Value> Value for Option<T> {
    const KIND: ValueKind = T::KIND;

    #[inline]
    fn from_arg<E: Error>(arg: &str) -> Result<Self, E> {
        T::from_arg(arg).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;
    use crate::errors::ParameterError;

    fn parse<T: Value>(arg: &str) -> Result<T, ParameterError> {
        T::from_arg(arg)
    }

    #[test]
    fn numbers() {
        assert_eq!(parse::<u32>("23").unwrap(), 23);
        assert_eq!(parse::<i64>("-5").unwrap(), -5);
        assert_eq!(parse::<f64>("1.5").unwrap(), 1.5);
    }

    #[test]
    fn bad_number_names_the_argument() {
        match parse::<u8>("300") {
            Err(ParameterError::ParseError { arg, .. }) => assert_eq!(arg, "300"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn bools() {
        assert!(parse::<bool>("true").unwrap());
        assert!(parse::<bool>("True").unwrap());
        assert!(!parse::<bool>("FALSE").unwrap());
        assert!(matches!(
            parse::<bool>("yes"),
            Err(ParameterError::ShouldBe { .. })
        ));
    }

    #[test]
    fn options_and_addresses() {
        assert_eq!(parse::<Option<u16>>("8080").unwrap(), Some(8080));
        assert_eq!(
            parse::<Ipv4Addr>("127.0.0.1").unwrap(),
            Ipv4Addr::new(127, 0, 0, 1)
        );
        assert_eq!(<Option<bool> as Value>::KIND, ValueKind::Flag);
        assert_eq!(<String as Value>::KIND, ValueKind::Value);
    }
}
