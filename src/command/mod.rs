//! Voice command recognition
//!
//! Recognized text -> CommandParser (pattern table, resolvers) -> Command
//! -> validate_command -> executor.

pub mod executor;
pub mod intent;
pub mod parser;
pub mod patterns;
pub mod resolver;
pub mod validator;

pub use executor::{CommandExecutor, ExecutionResult};
pub use intent::{Action, Command, Intent, ParamValue};
pub use parser::{help_text, CommandParser};
pub use validator::{validate_command, ValidationError};
