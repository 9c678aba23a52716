/// JSON option schemas and the dynamically typed slots they bind to.
///
/// A schema declares options the way a program would register them in code.
/// Each option gets a [`Slot`] holding its typed value; [`Schema::bind`]
/// registers every slot in a fresh [`OptionRegistry`].
use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::options::{FromOptionToken, OptionRegistry, ToOptionString};

/// Errors from loading or validating a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema file could not be read.
    #[error("Cannot read schema '{}': {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The schema is not valid JSON or has the wrong shape.
    #[error("Invalid schema: {0}")]
    Json(#[from] serde_json::Error),

    /// An option has an empty name or one starting with a dash.
    #[error("Invalid option name '{name}'")]
    InvalidName {
        /// The offending name.
        name: String,
    },

    /// An enum option lists no values.
    #[error("Enum option '{option}' has no values")]
    EmptyEnum {
        /// Long name of the option.
        option: String,
    },
}

/// The value type of a schema option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Bool,
    Int,
    Uint,
    Float,
    #[default]
    String,
    Path,
    Enum,
}

/// One option as declared in a schema file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Long name.
    pub name: String,
    /// Alias, empty for none.
    #[serde(default)]
    pub short: String,
    /// Help text.
    #[serde(default)]
    pub description: String,
    /// Value type. Defaults to `string`.
    #[serde(rename = "type", default)]
    pub kind: ValueKind,
    /// Permitted labels for `enum` options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Default value as it would be typed on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// A program's option declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Program name shown in usage.
    pub program: String,
    /// One-line description shown in help.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    /// Declared options, in registration order.
    #[serde(default)]
    pub options: Vec<OptionSpec>,
}

/// A typed destination created from an [`OptionSpec`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Slot {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Path(PathBuf),
    Choice(String),
}

impl Slot {
    /// Initial value for `spec`: its default converted like a command-line
    /// token, or the type's zero value. Enums start at their default label,
    /// or the first one.
    #[must_use]
    pub fn from_spec(spec: &OptionSpec) -> Self {
        let default = spec.default.as_deref();
        match spec.kind {
            ValueKind::Bool => Self::Bool(default.is_some_and(bool::from_option_token)),
            ValueKind::Int => Self::Int(default.map_or(0, i64::from_option_token)),
            ValueKind::Uint => Self::Uint(default.map_or(0, u64::from_option_token)),
            ValueKind::Float => Self::Float(default.map_or(0.0, f64::from_option_token)),
            ValueKind::String => Self::Str(default.unwrap_or_default().to_owned()),
            ValueKind::Path => Self::Path(default.map(PathBuf::from).unwrap_or_default()),
            ValueKind::Enum => Self::Choice(
                default
                    .or_else(|| spec.values.first().map(String::as_str))
                    .unwrap_or_default()
                    .to_owned(),
            ),
        }
    }
}

impl ToOptionString for Slot {
    fn to_option_string(&self) -> String {
        match self {
            Self::Bool(v) => v.to_option_string(),
            Self::Int(v) => v.to_option_string(),
            Self::Uint(v) => v.to_option_string(),
            Self::Float(v) => v.to_option_string(),
            Self::Str(v) | Self::Choice(v) => v.clone(),
            Self::Path(v) => v.to_option_string(),
        }
    }
}

impl Schema {
    /// Parse and validate a schema from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Json` for malformed input, and
    /// `SchemaError::InvalidName` / `SchemaError::EmptyEnum` for bad options.
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        let schema: Self = serde_json::from_str(text)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Read, parse, and validate a schema file.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Io` if the file cannot be read, otherwise as
    /// [`Schema::from_json`].
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let text = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&text)
    }

    fn validate(&self) -> Result<(), SchemaError> {
        for (i, spec) in self.options.iter().enumerate() {
            if spec.name.is_empty() || spec.name.starts_with('-') {
                return Err(SchemaError::InvalidName {
                    name: spec.name.clone(),
                });
            }
            if spec.kind == ValueKind::Enum && spec.values.is_empty() {
                return Err(SchemaError::EmptyEnum {
                    option: spec.name.clone(),
                });
            }
            if self.options[..i].iter().any(|prev| prev.name == spec.name) {
                warn!("option '{}' declared twice, the later one wins", spec.name);
            }
        }
        Ok(())
    }

    /// Fresh slots, one per declared option, in declaration order.
    #[must_use]
    pub fn slots(&self) -> Vec<Slot> {
        self.options.iter().map(Slot::from_spec).collect()
    }

    /// Register every slot under its declared option.
    ///
    /// `slots` must come from [`Schema::slots`] on the same schema. The
    /// recorded default is the slot's initial value in canonical form, so a
    /// declared `"t"` shows as `true`.
    #[must_use]
    pub fn bind<'a>(&self, slots: &'a mut [Slot]) -> OptionRegistry<'a> {
        let mut registry = OptionRegistry::new();
        for (spec, slot) in self.options.iter().zip(slots.iter_mut()) {
            let default = slot.to_option_string();
            let (name, short, description) = (&spec.name, &spec.short, &spec.description);
            match slot {
                Slot::Bool(v) => registry.add_option(v, name, short, description, &default),
                Slot::Int(v) => registry.add_option(v, name, short, description, &default),
                Slot::Uint(v) => registry.add_option(v, name, short, description, &default),
                Slot::Float(v) => registry.add_option(v, name, short, description, &default),
                Slot::Str(v) => registry.add_option(v, name, short, description, &default),
                Slot::Path(v) => registry.add_option(v, name, short, description, &default),
                Slot::Choice(v) => registry.add_enum_option(
                    v,
                    name,
                    short,
                    description,
                    spec.values.iter().map(|label| (label.clone(), label.clone())),
                    &default,
                ),
            };
        }
        registry
    }
}
