//! Enumerated option values resolved by prefix matching.
//!
//! A token selects a choice when it is a prefix of exactly one label. Labels
//! are compared byte-wise and case-sensitively from the start, in table
//! order. An exact label is not preferred over longer labels it prefixes:
//! with `run` and `running` registered, the token `run` is ambiguous.

/// Outcome of resolving a token against a [`ChoiceTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceMatch<'t, T> {
    /// Exactly one label starts with the token.
    Matched {
        /// The full label that matched.
        label: &'t str,
        /// The value associated with that label.
        value: &'t T,
    },
    /// Two or more labels start with the token.
    Ambiguous {
        /// Every matching label, in table order.
        candidates: Vec<String>,
    },
    /// No label starts with the token.
    NoMatch,
}

/// An owned, ordered list of `(label, value)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceTable<T> {
    entries: Vec<(String, T)>,
}

impl<T> ChoiceTable<T> {
    /// Build a table from `(label, value)` pairs, keeping their order.
    #[must_use]
    pub fn new<I, L>(entries: I) -> Self
    where
        I: IntoIterator<Item = (L, T)>,
        L: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(label, value)| (label.into(), value))
                .collect(),
        }
    }

    /// Labels in table order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve `token` as a prefix of the table's labels.
    #[must_use]
    pub fn resolve(&self, token: &str) -> ChoiceMatch<'_, T> {
        let mut matches = self
            .entries
            .iter()
            .filter(|(label, _)| label.as_bytes().starts_with(token.as_bytes()));

        let Some((label, value)) = matches.next() else {
            return ChoiceMatch::NoMatch;
        };

        match matches.next() {
            None => ChoiceMatch::Matched {
                label: label.as_str(),
                value,
            },
            Some((second, _)) => {
                let mut candidates = vec![label.clone(), second.clone()];
                candidates.extend(matches.map(|(label, _)| label.clone()));
                ChoiceMatch::Ambiguous { candidates }
            }
        }
    }
}

impl<T, L: Into<String>> FromIterator<(L, T)> for ChoiceTable<T> {
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        Self::new(iter)
    }
}
