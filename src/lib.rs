#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! optbind — bind command-line options to typed program variables.
//!
//! Options are registered against mutable borrows of the variables they
//! set. Parsing an argument vector assigns straight into those variables;
//! enum options accept any unambiguous prefix of their labels.
//!
//! ```
//! use optbind::OptionRegistry;
//!
//! let mut threads = 1_u32;
//! let mut mode = String::from("serial");
//! let positional = {
//!     let mut registry = OptionRegistry::new();
//!     registry
//!         .add_option(&mut threads, "threads", "j", "Worker count", 1)
//!         .add_enum_option(
//!             &mut mode,
//!             "mode",
//!             "m",
//!             "Execution mode",
//!             [("serial", "serial".to_owned()), ("parallel", "parallel".to_owned())],
//!             "serial",
//!         );
//!     registry.parse_args(["-j", "8", "--mode", "par", "input.txt"]).unwrap().positional
//! };
//! assert_eq!(threads, 8);
//! assert_eq!(mode, "parallel");
//! assert_eq!(positional, ["input.txt"]);
//! ```

pub mod options;
pub mod schema;

pub use options::{
    ChoiceMatch, ChoiceTable, FromOptionToken, OptionInfo, OptionRegistry, ParseError, ParsedArgs,
    ToOptionString, ValueError,
};
