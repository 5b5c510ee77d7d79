//! Pre-execution checks on parsed commands

use crate::command::intent::{Command, Intent};
use thiserror::Error;

/// Parameters an intent cannot execute without
const REQUIRED_PARAMETERS: &[(Intent, &[&str])] = &[
    (Intent::DeleteSlide, &["slide_number"]),
    (Intent::InsertImage, &["image_path"]),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No command provided")]
    NoCommand,

    #[error("Missing required parameter: {parameter}")]
    MissingParameter {
        intent: Intent,
        parameter: &'static str,
    },
}

/// Check that a command carries everything its intent requires
///
/// Reports the first missing parameter in table order. Intents without an
/// entry always pass.
pub fn validate_command(command: Option<&Command>) -> Result<(), ValidationError> {
    let command = command.ok_or(ValidationError::NoCommand)?;
    let intent = command.intent();

    let required = REQUIRED_PARAMETERS
        .iter()
        .find(|(i, _)| *i == intent)
        .map(|(_, params)| *params)
        .unwrap_or(&[]);

    for parameter in required {
        if !command.action.has_parameter(parameter) {
            return Err(ValidationError::MissingParameter {
                intent,
                parameter,
            });
        }
    }

    Ok(())
}
