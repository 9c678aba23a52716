/// Option domain layer: registration, value conversion, enum matching, argv parsing, help.
pub mod binding;
pub mod choice;
pub mod errors;
pub mod help;
pub mod registry;
pub mod suggest;
pub mod tokenize;
pub mod value;

pub use binding::{EnumBinding, OptionBinding, ScalarBinding};
pub use choice::{ChoiceMatch, ChoiceTable};
pub use errors::{ParseError, ValueError};
pub use help::{render_help, render_usage};
pub use registry::{OptionInfo, OptionRegistry};
pub use suggest::suggest;
pub use tokenize::ParsedArgs;
pub use value::{FromOptionToken, ToOptionString};
