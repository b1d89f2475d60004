//! Enumeration wire codec.
//!
//! Every closed set of string constants the platform uses is a Rust enum
//! declared through [`wire_enum!`]. Each member maps to exactly one wire
//! token: its identifier run through [`to_snake_case`], or an explicit
//! override. Every enum carries an `Unknown` member that decoding falls back
//! to, so a token added by the platform later never breaks deserialization
//! of an otherwise valid message.
//!
//! Token tables are built on first use and never mutated afterwards.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use tracing::debug;

use crate::naming::to_snake_case;

/// Token of the fallback member.
pub const UNKNOWN_TOKEN: &str = "unknown";

/// One declared member of a wire enum.
#[derive(Debug, Clone, Copy)]
pub struct Member<E> {
    pub value: E,
    /// Rust identifier, the source of the derived token.
    pub ident: &'static str,
    /// Explicit token, used instead of the derived one.
    pub token: Option<&'static str>,
}

impl<E> Member<E> {
    pub fn wire_token(&self) -> String {
        match self.token {
            Some(token) => token.to_owned(),
            None => to_snake_case(self.ident),
        }
    }
}

/// A closed set of members with a total decode.
///
/// Implemented by [`wire_enum!`]; there is rarely a reason to implement it
/// by hand.
pub trait WireEnum: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Enum name, used in log output.
    const NAME: &'static str;
    /// All members in declaration order, fallback first.
    const MEMBERS: &'static [Member<Self>];
    /// Member returned for tokens the table does not contain.
    const FALLBACK: Self;

    fn table() -> &'static TokenTable<Self>;

    fn encode(self) -> &'static str {
        Self::table().encode(self)
    }

    fn decode(token: &str) -> Self {
        Self::table().decode(token)
    }

    fn is_known(self) -> bool {
        self != Self::FALLBACK
    }
}

/// Bidirectional member ↔ token lookup for one enum.
#[derive(Debug)]
pub struct TokenTable<E> {
    tokens: Vec<(E, String)>,
    lookup: HashMap<String, E>,
}

impl<E: WireEnum> TokenTable<E> {
    pub fn build() -> Self {
        let tokens: Vec<(E, String)> = E::MEMBERS
            .iter()
            .map(|member| (member.value, member.wire_token()))
            .collect();
        let lookup: HashMap<String, E> = tokens
            .iter()
            .map(|(member, token)| (token.clone(), *member))
            .collect();
        debug_assert_eq!(
            lookup.len(),
            tokens.len(),
            "duplicate wire token in {}",
            E::NAME
        );
        Self { tokens, lookup }
    }

    pub fn encode(&self, member: E) -> &str {
        self.tokens
            .iter()
            .find(|(candidate, _)| *candidate == member)
            .map(|(_, token)| token.as_str())
            .unwrap_or(UNKNOWN_TOKEN)
    }

    /// Exact, case-sensitive lookup. Never fails.
    pub fn decode(&self, token: &str) -> E {
        match self.lookup.get(token) {
            Some(member) => *member,
            None => {
                debug!(enum_name = E::NAME, token, "unrecognised wire token, using fallback");
                E::FALLBACK
            }
        }
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens.iter().map(|(_, token)| token.as_str())
    }
}

/// Declare a wire enum.
///
/// An `Unknown` member is inserted first (discriminant 0) and used as the
/// decode fallback. Members may name an explicit token with `= "token"`.
///
/// ```
/// botwire_core::wire_enum! {
///     /// Text formatting.
///     pub enum Style {
///         Plain,
///         Html = "HTML",
///     }
/// }
///
/// use botwire_core::WireEnum;
/// assert_eq!(Style::Html.encode(), "HTML");
/// assert_eq!(Style::decode("plain"), Style::Plain);
/// assert_eq!(Style::decode("bold"), Style::Unknown);
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident $(= $token:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis enum $name {
            /// Token not recognised by this client.
            #[default]
            Unknown,
            $(
                $(#[$vmeta])*
                $variant,
            )*
        }

        impl $crate::codec::WireEnum for $name {
            const NAME: &'static str = stringify!($name);
            const MEMBERS: &'static [$crate::codec::Member<Self>] = &[
                $crate::codec::Member {
                    value: $name::Unknown,
                    ident: "Unknown",
                    token: ::core::option::Option::Some($crate::codec::UNKNOWN_TOKEN),
                },
                $(
                    $crate::codec::Member {
                        value: $name::$variant,
                        ident: stringify!($variant),
                        token: $crate::__wire_token!($($token)?),
                    },
                )*
            ];
            const FALLBACK: Self = $name::Unknown;

            fn table() -> &'static $crate::codec::TokenTable<Self> {
                static TABLE: ::std::sync::OnceLock<$crate::codec::TokenTable<$name>> =
                    ::std::sync::OnceLock::new();
                TABLE.get_or_init($crate::codec::TokenTable::build)
            }
        }

        impl $crate::__serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__serde::Serializer,
            {
                serializer.serialize_str($crate::codec::WireEnum::encode(*self))
            }
        }

        impl<'de> $crate::__serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__serde::Deserializer<'de>,
            {
                let token =
                    <::std::string::String as $crate::__serde::Deserialize>::deserialize(deserializer)?;
                ::core::result::Result::Ok(<$name as $crate::codec::WireEnum>::decode(&token))
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::codec::WireEnum::encode(*self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::std::convert::Infallible;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                ::core::result::Result::Ok(<$name as $crate::codec::WireEnum>::decode(s))
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __wire_token {
    () => {
        ::core::option::Option::None
    };
    ($token:literal) => {
        ::core::option::Option::Some($token)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::wire_enum! {
        /// Fixture enum.
        pub enum Shade {
            LightGray,
            DarkRed,
            Cyan = "CYAN",
        }
    }

    #[test]
    fn derived_and_override_tokens() {
        assert_eq!(Shade::LightGray.encode(), "light_gray");
        assert_eq!(Shade::DarkRed.encode(), "dark_red");
        assert_eq!(Shade::Cyan.encode(), "CYAN");
    }

    #[test]
    fn decode_is_exact() {
        assert_eq!(Shade::decode("dark_red"), Shade::DarkRed);
        assert_eq!(Shade::decode("CYAN"), Shade::Cyan);
        assert_eq!(Shade::decode("cyan"), Shade::Unknown);
        assert_eq!(Shade::decode("DarkRed"), Shade::Unknown);
    }

    #[test]
    fn unknown_is_zero_and_default() {
        assert_eq!(Shade::Unknown as i32, 0);
        assert_eq!(Shade::LightGray as i32, 1);
        assert_eq!(Shade::default(), Shade::Unknown);
        assert_eq!(Shade::Unknown.encode(), UNKNOWN_TOKEN);
        assert!(!Shade::Unknown.is_known());
        assert!(Shade::Cyan.is_known());
    }

    #[test]
    fn serde_goes_through_the_table() {
        let json = serde_json::to_string(&Shade::LightGray).unwrap();
        assert_eq!(json, "\"light_gray\"");
        let back: Shade = serde_json::from_str("\"never_heard_of_it\"").unwrap();
        assert_eq!(back, Shade::Unknown);
    }

    #[test]
    fn display_and_from_str() {
        assert_eq!(Shade::DarkRed.to_string(), "dark_red");
        assert_eq!("CYAN".parse::<Shade>().unwrap(), Shade::Cyan);
        assert_eq!("".parse::<Shade>().unwrap(), Shade::Unknown);
    }

    #[test]
    fn table_lists_every_token_once() {
        let tokens: Vec<&str> = Shade::table().tokens().collect();
        assert_eq!(tokens, vec!["unknown", "light_gray", "dark_red", "CYAN"]);
    }
}
