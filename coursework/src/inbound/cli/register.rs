//! Interactive registration flow.

use std::io::{BufRead, Write};

use tracing::{info, warn};

use super::{ActionOutcome, CliError, Prompter};
use crate::domain::UserInput;

/// Ask for the four registration fields, validate them and report the result.
///
/// Accepted records are printed field by field, or as one JSON object when
/// `json` is set. Rejected input lists every violation in field order.
///
/// # Errors
///
/// Returns [`CliError::InputClosed`] when input ends before all four answers
/// arrive, and [`CliError::Io`] or [`CliError::Json`] when output fails.
pub fn run_registration<R, W>(
    prompter: &mut Prompter<R, W>,
    json: bool,
) -> Result<ActionOutcome, CliError>
where
    R: BufRead,
    W: Write,
{
    prompter.say("Please enter the following details:")?;
    let name = prompter.ask("Name: ")?;
    let email = prompter.ask("Email: ")?;
    let age = prompter.ask("Age: ")?;
    let username = prompter.ask("Username: ")?;

    match UserInput::new(name, email, age, username).validate() {
        Ok(user) => {
            info!(username = user.username(), "registration accepted");
            prompter.say("Registration accepted:")?;
            if json {
                let rendered = serde_json::to_string_pretty(&user)?;
                prompter.say(rendered)?;
            } else {
                prompter.say(format_args!("  Name: {}", user.name()))?;
                prompter.say(format_args!("  Email: {}", user.email()))?;
                prompter.say(format_args!("  Age: {}", user.age()))?;
                prompter.say(format_args!("  Username: {}", user.username()))?;
            }
            Ok(ActionOutcome::Completed)
        }
        Err(errors) => {
            warn!(violations = errors.len(), "registration rejected");
            prompter.say("Validation errors:")?;
            for violation in errors.violations() {
                prompter.say(format_args!("- {violation}"))?;
            }
            Ok(ActionOutcome::Rejected)
        }
    }
}
