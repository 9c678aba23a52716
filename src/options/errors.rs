/// Errors from applying command-line tokens to registered options.
use thiserror::Error;

/// A binding failed to accept a raw token.
///
/// Bindings do not know which option they belong to; the registry lifts
/// these into [`ParseError`] with the option name attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// More than one permitted value starts with the token.
    #[error("'{token}' is ambiguous between {}", .candidates.join(", "))]
    Ambiguous {
        /// The raw token.
        token: String,
        /// Labels that start with the token.
        candidates: Vec<String>,
    },

    /// No permitted value starts with the token.
    #[error("'{token}' is not one of {}", .candidates.join(", "))]
    NoMatch {
        /// The raw token.
        token: String,
        /// Every permitted label.
        candidates: Vec<String>,
    },
}

/// Errors that stop command-line parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An enum option received a token that prefixes several values.
    #[error("Ambiguous value '{token}' for option '{option}'. Candidates:\n  {}", .candidates.join("\n  "))]
    Ambiguous {
        /// Long name of the option.
        option: String,
        /// The raw token.
        token: String,
        /// Labels that start with the token.
        candidates: Vec<String>,
    },

    /// An enum option received a token that prefixes none of its values.
    #[error(
        "Invalid value '{token}' for option '{option}', expected one of: {}{}",
        .candidates.join(", "),
        .suggestion.as_deref().map(|s| format!(" (did you mean '{s}'?)")).unwrap_or_default()
    )]
    NoMatch {
        /// Long name of the option.
        option: String,
        /// The raw token.
        token: String,
        /// Every permitted label.
        candidates: Vec<String>,
        /// Closest label by fuzzy score, if any.
        suggestion: Option<String>,
    },

    /// The flag names no registered option.
    #[error(
        "Unknown option '{flag}'{}",
        .suggestion.as_deref().map(|s| format!(" (did you mean '--{s}'?)")).unwrap_or_default()
    )]
    UnknownOption {
        /// The flag as written, dashes included.
        flag: String,
        /// Closest registered long name, if any.
        suggestion: Option<String>,
    },

    /// The flag was the last token and has no value.
    #[error("Option '{flag}' requires a value")]
    MissingValue {
        /// The flag as written, dashes included.
        flag: String,
    },

    /// `-h` or `--help` was given and is not a registered option.
    #[error("Help requested")]
    HelpRequested,
}

impl ParseError {
    /// Attach an option name to a binding failure.
    #[must_use]
    pub fn from_value_error(option: &str, err: ValueError, suggestion: Option<String>) -> Self {
        match err {
            ValueError::Ambiguous { token, candidates } => Self::Ambiguous {
                option: option.to_owned(),
                token,
                candidates,
            },
            ValueError::NoMatch { token, candidates } => Self::NoMatch {
                option: option.to_owned(),
                token,
                candidates,
                suggestion,
            },
        }
    }

    /// Labels offered to the user alongside the error, if any.
    #[must_use]
    pub fn candidates(&self) -> Option<&[String]> {
        match self {
            Self::Ambiguous { candidates, .. } | Self::NoMatch { candidates, .. } => {
                Some(candidates.as_slice())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_option() {
        let err = ParseError::from_value_error(
            "mode",
            ValueError::Ambiguous {
                token: "a".to_owned(),
                candidates: vec!["alpha".to_owned(), "alphabet".to_owned()],
            },
            None,
        );
        let msg = err.to_string();
        assert!(msg.contains("'mode'"), "{msg}");
        assert!(msg.contains("alphabet"), "{msg}");
        assert_eq!(err.candidates().map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_no_match_suggestion() {
        let err = ParseError::from_value_error(
            "mode",
            ValueError::NoMatch {
                token: "paralel".to_owned(),
                candidates: vec!["serial".to_owned(), "parallel".to_owned()],
            },
            Some("parallel".to_owned()),
        );
        assert_eq!(
            err.to_string(),
            "Invalid value 'paralel' for option 'mode', expected one of: serial, parallel \
             (did you mean 'parallel'?)"
        );
    }

    #[test]
    fn test_unknown_option_message() {
        let err = ParseError::UnknownOption {
            flag: "--thread".to_owned(),
            suggestion: Some("threads".to_owned()),
        };
        assert_eq!(
            err.to_string(),
            "Unknown option '--thread' (did you mean '--threads'?)"
        );
        assert!(err.candidates().is_none());
    }
}
