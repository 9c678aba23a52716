/// Per-type conversions between raw command-line tokens and option values.
///
/// Parsing never fails at this layer. Numbers that do not parse fall back to
/// zero the way stream extraction does, and booleans only look at the first
/// character of the token. The only hard failures in option parsing come from
/// enum resolution (see [`super::choice`]).
use std::path::{Path, PathBuf};

use log::warn;

/// Parse a raw token into a value of this type.
pub trait FromOptionToken: Sized {
    /// Convert `token` into a value. Always produces something.
    fn from_option_token(token: &str) -> Self;
}

/// Render a value as the string shown for defaults and current values.
pub trait ToOptionString {
    /// Stringify `self` for help and introspection.
    fn to_option_string(&self) -> String;
}

impl<T: ToOptionString + ?Sized> ToOptionString for &T {
    fn to_option_string(&self) -> String {
        (**self).to_option_string()
    }
}

// --- Booleans ---

/// `"true"`, `"t"` and anything else starting with `t` is true.
impl FromOptionToken for bool {
    fn from_option_token(token: &str) -> Self {
        token.starts_with('t')
    }
}

impl ToOptionString for bool {
    fn to_option_string(&self) -> String {
        if *self { "true" } else { "false" }.to_owned()
    }
}

// --- Numbers ---

macro_rules! numeric_option_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromOptionToken for $ty {
                fn from_option_token(token: &str) -> Self {
                    token.trim().parse().unwrap_or_else(|_| {
                        warn!(
                            "'{token}' is not a valid {}, using {}",
                            stringify!($ty),
                            <$ty>::default()
                        );
                        <$ty>::default()
                    })
                }
            }

            impl ToOptionString for $ty {
                fn to_option_string(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

numeric_option_value!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

// --- Text ---

impl FromOptionToken for String {
    fn from_option_token(token: &str) -> Self {
        token.to_owned()
    }
}

impl ToOptionString for String {
    fn to_option_string(&self) -> String {
        self.clone()
    }
}

impl ToOptionString for str {
    fn to_option_string(&self) -> String {
        self.to_owned()
    }
}

/// First character of the token, NUL when empty.
impl FromOptionToken for char {
    fn from_option_token(token: &str) -> Self {
        token.chars().next().unwrap_or('\0')
    }
}

impl ToOptionString for char {
    fn to_option_string(&self) -> String {
        self.to_string()
    }
}

impl FromOptionToken for PathBuf {
    fn from_option_token(token: &str) -> Self {
        PathBuf::from(token)
    }
}

impl ToOptionString for PathBuf {
    fn to_option_string(&self) -> String {
        self.display().to_string()
    }
}

impl ToOptionString for Path {
    fn to_option_string(&self) -> String {
        self.display().to_string()
    }
}
