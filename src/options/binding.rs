/// Type-erased bindings between registered options and caller variables.
///
/// A binding owns a mutable borrow of the destination for the registry's
/// lifetime. Applying a token parses it, assigns into the destination, and
/// returns the canonical string to record as the option's current value.
use log::trace;

use super::choice::{ChoiceMatch, ChoiceTable};
use super::errors::ValueError;
use super::value::{FromOptionToken, ToOptionString};

/// Applies raw tokens to one destination variable.
pub trait OptionBinding {
    /// Parse `raw`, assign the result, and return the new current value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` when the token cannot select a value. Scalar
    /// bindings never fail.
    fn apply_token(&mut self, raw: &str) -> Result<String, ValueError>;

    /// Permitted labels, in order. Empty for scalar bindings.
    fn labels(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Binding for any type with a token conversion.
pub struct ScalarBinding<'a, T> {
    destination: &'a mut T,
}

impl<'a, T> ScalarBinding<'a, T> {
    #[must_use]
    pub fn new(destination: &'a mut T) -> Self {
        Self { destination }
    }
}

impl<T> OptionBinding for ScalarBinding<'_, T>
where
    T: FromOptionToken + ToOptionString,
{
    fn apply_token(&mut self, raw: &str) -> Result<String, ValueError> {
        *self.destination = T::from_option_token(raw);
        let current = self.destination.to_option_string();
        trace!("'{raw}' -> {current}");
        Ok(current)
    }
}

/// Binding that resolves tokens against an owned choice table.
pub struct EnumBinding<'a, T> {
    destination: &'a mut T,
    table: ChoiceTable<T>,
}

impl<'a, T> EnumBinding<'a, T> {
    #[must_use]
    pub fn new(destination: &'a mut T, table: ChoiceTable<T>) -> Self {
        Self { destination, table }
    }
}

impl<T: Clone> OptionBinding for EnumBinding<'_, T> {
    fn apply_token(&mut self, raw: &str) -> Result<String, ValueError> {
        match self.table.resolve(raw) {
            ChoiceMatch::Matched { label, value } => {
                trace!("'{raw}' -> {label}");
                *self.destination = value.clone();
                Ok(label.to_owned())
            }
            ChoiceMatch::Ambiguous { candidates } => Err(ValueError::Ambiguous {
                token: raw.to_owned(),
                candidates,
            }),
            ChoiceMatch::NoMatch => Err(ValueError::NoMatch {
                token: raw.to_owned(),
                candidates: self.labels(),
            }),
        }
    }

    fn labels(&self) -> Vec<String> {
        self.table.labels().map(str::to_owned).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_assigns_and_canonicalises() {
        let mut verbose = false;
        let current = ScalarBinding::new(&mut verbose).apply_token("t").unwrap();
        assert_eq!(current, "true");
        assert!(verbose);
    }

    #[test]
    fn test_scalar_malformed_number_succeeds() {
        let mut count = 7_i32;
        let current = ScalarBinding::new(&mut count).apply_token("abc").unwrap();
        assert_eq!(current, "0");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_enum_records_full_label() {
        let mut level = 0_u8;
        let table = ChoiceTable::new([("low", 1_u8), ("high", 9)]);
        let mut binding = EnumBinding::new(&mut level, table);
        assert_eq!(binding.apply_token("hi").unwrap(), "high");
        assert_eq!(binding.labels(), ["low", "high"]);
        drop(binding);
        assert_eq!(level, 9);
    }

    #[test]
    fn test_enum_failure_leaves_destination() {
        let mut level = 5_u8;
        let table = ChoiceTable::new([("low", 1_u8), ("lower", 0)]);
        let mut binding = EnumBinding::new(&mut level, table);
        assert!(matches!(
            binding.apply_token("low"),
            Err(ValueError::Ambiguous { .. })
        ));
        assert_eq!(
            binding.apply_token("mid"),
            Err(ValueError::NoMatch {
                token: "mid".to_owned(),
                candidates: vec!["low".to_owned(), "lower".to_owned()],
            })
        );
        drop(binding);
        assert_eq!(level, 5);
    }
}
