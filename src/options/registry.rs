/// The option registry: long name → metadata and binding.
use std::collections::BTreeMap;
use std::fmt;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::binding::{EnumBinding, OptionBinding, ScalarBinding};
use super::choice::ChoiceTable;
use super::errors::ParseError;
use super::suggest::suggest;
use super::value::{FromOptionToken, ToOptionString};

/// Introspectable metadata for one registered option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionInfo {
    /// Unique long name, used as the registry key.
    pub name: String,
    /// Optional alternate spelling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Help text.
    pub description: String,
    /// Default value, stringified at registration.
    pub default_value: String,
    /// Value after the latest successful parse, or the default.
    pub current_value: String,
    /// Permitted labels for enum options, in order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub enum_values: Vec<String>,
}

impl OptionInfo {
    /// Whether this option only accepts enumerated values.
    #[must_use]
    pub fn is_enum(&self) -> bool {
        !self.enum_values.is_empty()
    }
}

/// Metadata plus the binding that writes into the caller's variable.
struct OptionEntry<'a> {
    info: OptionInfo,
    binding: Box<dyn OptionBinding + 'a>,
    /// Registration order, used to pick the owner of a shared alias.
    seq: u64,
}

/// Registered options, keyed and iterated by long name.
///
/// Destinations are borrowed for `'a`: read them back after the registry is
/// dropped.
#[derive(Default)]
pub struct OptionRegistry<'a> {
    entries: BTreeMap<String, OptionEntry<'a>>,
    next_seq: u64,
}

impl fmt::Debug for OptionRegistry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.options()).finish()
    }
}

impl<'a> OptionRegistry<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an option that parses tokens into `destination`.
    ///
    /// The destination is left untouched until a token is applied; the
    /// default is only recorded for display. An empty `short_name` means
    /// no alias.
    pub fn add_option<T, U>(
        &mut self,
        destination: &'a mut T,
        name: &str,
        short_name: &str,
        description: &str,
        default_value: U,
    ) -> &mut Self
    where
        T: FromOptionToken + ToOptionString + 'a,
        U: ToOptionString,
    {
        let info = new_info(name, short_name, description, default_value.to_option_string());
        self.insert(info, Box::new(ScalarBinding::new(destination)))
    }

    /// Register an option restricted to the labels of `enum_values`.
    ///
    /// Tokens select a value by unambiguous prefix. The table is copied into
    /// the registry; `default_value` is recorded as given.
    pub fn add_enum_option<T, I, L>(
        &mut self,
        destination: &'a mut T,
        name: &str,
        short_name: &str,
        description: &str,
        enum_values: I,
        default_value: &str,
    ) -> &mut Self
    where
        T: Clone + 'a,
        I: IntoIterator<Item = (L, T)>,
        L: Into<String>,
    {
        let table = ChoiceTable::new(enum_values);
        let binding = EnumBinding::new(destination, table);
        let mut info = new_info(name, short_name, description, default_value.to_owned());
        info.enum_values = binding.labels();
        self.insert(info, Box::new(binding))
    }

    fn insert(&mut self, info: OptionInfo, binding: Box<dyn OptionBinding + 'a>) -> &mut Self {
        let name = info.name.clone();
        let seq = self.next_seq;
        self.next_seq += 1;
        debug!(
            "registered option '{name}' (default '{}', {} enum values)",
            info.default_value,
            info.enum_values.len()
        );
        if self
            .entries
            .insert(name.clone(), OptionEntry { info, binding, seq })
            .is_some()
        {
            debug!("option '{name}' re-registered, previous entry replaced");
        }
        self
    }

    /// Apply a raw token to the option registered under `name`.
    ///
    /// On success the destination holds the parsed value and the option's
    /// current value is updated.
    ///
    /// # Errors
    ///
    /// - `ParseError::UnknownOption` — no option is registered under `name`
    /// - `ParseError::Ambiguous` / `ParseError::NoMatch` — an enum option
    ///   could not resolve the token
    pub fn apply(&mut self, name: &str, raw: &str) -> Result<(), ParseError> {
        let Some(entry) = self.entries.get_mut(name) else {
            return Err(ParseError::UnknownOption {
                flag: format!("--{name}"),
                suggestion: self.suggest_name(name),
            });
        };

        trace!("applying '{raw}' to option '{name}'");
        match entry.binding.apply_token(raw) {
            Ok(current) => {
                entry.info.current_value = current;
                Ok(())
            }
            Err(err) => {
                let suggestion = suggest(raw, entry.info.enum_values.iter().map(String::as_str));
                Err(ParseError::from_value_error(name, err, suggestion))
            }
        }
    }

    /// Metadata for the option registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OptionInfo> {
        self.entries.get(name).map(|entry| &entry.info)
    }

    /// Metadata for the option whose alias is `short`.
    ///
    /// When several options share an alias, the most recently registered
    /// one wins.
    #[must_use]
    pub fn find_short(&self, short: &str) -> Option<&OptionInfo> {
        self.entries
            .values()
            .filter(|entry| entry.info.short_name.as_deref() == Some(short))
            .max_by_key(|entry| entry.seq)
            .map(|entry| &entry.info)
    }

    /// Long name for a flag written without dashes, trying the alias first.
    #[must_use]
    pub fn resolve(&self, flag: &str) -> Option<&str> {
        self.find_short(flag)
            .or_else(|| self.get(flag))
            .map(|info| info.name.as_str())
    }

    /// All registered options in name order.
    pub fn options(&self) -> impl Iterator<Item = &OptionInfo> {
        self.entries.values().map(|entry| &entry.info)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Closest registered long name to a misspelled one.
    pub(crate) fn suggest_name(&self, name: &str) -> Option<String> {
        suggest(name, self.entries.keys().map(String::as_str))
    }
}

fn new_info(name: &str, short_name: &str, description: &str, default_value: String) -> OptionInfo {
    OptionInfo {
        name: name.to_owned(),
        short_name: (!short_name.is_empty()).then(|| short_name.to_owned()),
        description: description.to_owned(),
        current_value: default_value.clone(),
        default_value,
        enum_values: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Mode {
        Serial,
        Parallel,
    }

    #[test]
    fn test_default_population() {
        let mut threads = 1_u32;
        let mut verbose = false;
        let mut mode = Mode::Serial;
        let mut registry = OptionRegistry::new();
        registry
            .add_option(&mut threads, "threads", "j", "Worker count", 4)
            .add_option(&mut verbose, "verbose", "v", "Chatty output", false)
            .add_enum_option(
                &mut mode,
                "mode",
                "",
                "Execution mode",
                [("serial", Mode::Serial), ("parallel", Mode::Parallel)],
                "serial",
            );

        let threads_info = registry.get("threads").unwrap();
        assert_eq!(threads_info.default_value, "4");
        assert_eq!(threads_info.current_value, "4");
        assert_eq!(threads_info.short_name.as_deref(), Some("j"));

        assert_eq!(registry.get("verbose").unwrap().current_value, "false");

        let mode_info = registry.get("mode").unwrap();
        assert_eq!(mode_info.current_value, "serial");
        assert_eq!(mode_info.short_name, None);
        assert_eq!(mode_info.enum_values, ["serial", "parallel"]);
        assert!(mode_info.is_enum());

        drop(registry);
        assert_eq!(threads, 1, "registration must not assign the destination");
    }

    #[test]
    fn test_apply_updates_destination_and_current_value() {
        let mut threads = 1_u32;
        let mut mode = Mode::Serial;
        let mut registry = OptionRegistry::new();
        registry
            .add_option(&mut threads, "threads", "j", "Worker count", 1)
            .add_enum_option(
                &mut mode,
                "mode",
                "m",
                "Execution mode",
                [("serial", Mode::Serial), ("parallel", Mode::Parallel)],
                "serial",
            );

        registry.apply("threads", "8").unwrap();
        registry.apply("mode", "p").unwrap();
        assert_eq!(registry.get("threads").unwrap().current_value, "8");
        assert_eq!(registry.get("mode").unwrap().current_value, "parallel");

        drop(registry);
        assert_eq!(threads, 8);
        assert_eq!(mode, Mode::Parallel);
    }

    #[test]
    fn test_ambiguous_enum_is_fatal() {
        let mut word = String::new();
        let mut registry = OptionRegistry::new();
        registry.add_enum_option(
            &mut word,
            "word",
            "",
            "",
            [("alpha", "alpha".to_owned()), ("alphabet", "alphabet".to_owned())],
            "alpha",
        );

        let err = registry.apply("word", "a").unwrap_err();
        assert_eq!(
            err,
            ParseError::Ambiguous {
                option: "word".to_owned(),
                token: "a".to_owned(),
                candidates: vec!["alpha".to_owned(), "alphabet".to_owned()],
            }
        );
        assert_eq!(registry.get("word").unwrap().current_value, "alpha");
    }

    #[test]
    fn test_exact_enum_label_still_ambiguous() {
        let mut action = 0;
        let mut registry = OptionRegistry::new();
        registry.add_enum_option(
            &mut action,
            "action",
            "",
            "",
            [("run", 1), ("running", 2)],
            "run",
        );
        assert!(matches!(
            registry.apply("action", "run"),
            Err(ParseError::Ambiguous { .. })
        ));
    }

    #[test]
    fn test_unmatched_enum_suggests_label() {
        let mut mode = Mode::Serial;
        let mut registry = OptionRegistry::new();
        registry.add_enum_option(
            &mut mode,
            "mode",
            "",
            "",
            [("serial", Mode::Serial), ("parallel", Mode::Parallel)],
            "serial",
        );
        match registry.apply("mode", "paralel") {
            Err(ParseError::NoMatch {
                option,
                suggestion,
                candidates,
                ..
            }) => {
                assert_eq!(option, "mode");
                assert_eq!(suggestion.as_deref(), Some("parallel"));
                assert_eq!(candidates, ["serial", "parallel"]);
            }
            other => panic!("expected NoMatch, got {other:?}"),
        }
    }

    #[test]
    fn test_last_registration_wins() {
        let mut first = 0_i32;
        let mut second = 0_i32;
        let mut registry = OptionRegistry::new();
        registry
            .add_option(&mut first, "level", "l", "first", 1)
            .add_option(&mut second, "level", "L", "second", 2);

        assert_eq!(registry.len(), 1);
        let info = registry.get("level").unwrap();
        assert_eq!(info.description, "second");
        assert_eq!(info.short_name.as_deref(), Some("L"));
        assert_eq!(info.default_value, "2");

        registry.apply("level", "5").unwrap();
        drop(registry);
        assert_eq!(first, 0);
        assert_eq!(second, 5);
    }

    #[test]
    fn test_malformed_integer_does_not_raise() {
        let mut count = 3_i64;
        let mut registry = OptionRegistry::new();
        registry.add_option(&mut count, "count", "n", "", 3);
        assert!(registry.apply("count", "abc").is_ok());
        drop(registry);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_unknown_option() {
        let mut threads = 0_u32;
        let mut registry = OptionRegistry::new();
        registry.add_option(&mut threads, "threads", "j", "", 0);
        assert_eq!(
            registry.apply("thread", "2"),
            Err(ParseError::UnknownOption {
                flag: "--thread".to_owned(),
                suggestion: Some("threads".to_owned()),
            })
        );
    }

    #[test]
    fn test_alias_resolution() {
        let mut threads = 0_u32;
        let mut jobs = 0_u32;
        let mut registry = OptionRegistry::new();
        registry
            .add_option(&mut threads, "threads", "j", "", 0)
            .add_option(&mut jobs, "j", "", "", 0);

        assert_eq!(registry.resolve("j"), Some("threads"));
        assert_eq!(registry.resolve("threads"), Some("threads"));
        assert_eq!(registry.resolve("x"), None);
        assert_eq!(registry.find_short("j").unwrap().name, "threads");
    }

    #[test]
    fn test_shared_alias_belongs_to_latest_registration() {
        let mut zeta = 0_i32;
        let mut alpha = 0_i32;
        let parsed = {
            let mut registry = OptionRegistry::new();
            registry
                .add_option(&mut zeta, "zeta", "x", "", 0)
                .add_option(&mut alpha, "alpha", "x", "", 0);
            assert_eq!(registry.resolve("x"), Some("alpha"));
            registry.parse_args(["-x", "7"]).unwrap()
        };
        assert_eq!(parsed.applied, ["alpha"]);
        assert_eq!(alpha, 7);
        assert_eq!(zeta, 0);
    }

    #[test]
    fn test_re_registration_moves_alias_ownership() {
        let (mut a, mut b, mut c) = (0, 0, 0);
        let mut registry = OptionRegistry::new();
        registry
            .add_option(&mut a, "beta", "x", "", 0)
            .add_option(&mut b, "gamma", "x", "", 0);
        assert_eq!(registry.resolve("x"), Some("gamma"));

        registry.add_option(&mut c, "beta", "x", "", 0);
        assert_eq!(registry.resolve("x"), Some("beta"));
    }

    #[test]
    fn test_options_iterate_by_name() {
        let (mut a, mut b, mut c) = (0, 0, 0);
        let mut registry = OptionRegistry::new();
        registry
            .add_option(&mut b, "beta", "", "", 0)
            .add_option(&mut c, "gamma", "", "", 0)
            .add_option(&mut a, "alpha", "", "", 0);
        let names: Vec<&str> = registry.options().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["alpha", "beta", "gamma"]);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_info_serializes_without_empty_fields() {
        let mut flag = true;
        let mut registry = OptionRegistry::new();
        registry.add_option(&mut flag, "flag", "", "A flag", true);
        let json = serde_json::to_value(registry.get("flag").unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "flag",
                "description": "A flag",
                "default_value": "true",
                "current_value": "true",
            })
        );
    }
}
