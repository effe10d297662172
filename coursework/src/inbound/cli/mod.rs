//! Command-line adapter for the exercises.
//!
//! Every flow takes its input and output streams (and, for posts, the
//! service) as parameters; `main` wires stdin, stdout and the HTTP adapter.

mod args;
mod menu;
mod movies;
mod posts;
mod prompt;
mod register;

use std::io;
use std::process::ExitCode;

use thiserror::Error;

pub use args::{Cli, Command, PostsArgs, PostsCommand};
pub use menu::{ScriptAction, ScriptError, ScriptLine, parse_script_line, replay_menu_script};
pub use movies::run_movie_session;
pub use posts::{create_post, list_posts, render_post, resolve_limit};
pub use prompt::Prompter;
pub use register::run_registration;

/// Errors that abort a command-line flow.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input ended while a question was waiting for an answer.
    #[error("input closed before answering {question:?}")]
    InputClosed {
        /// Question left unanswered.
        question: String,
    },
    /// Reading input or writing output failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A record could not be rendered as JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// How a flow ended, once its output is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action succeeded.
    Completed,
    /// User input was rejected.
    Rejected,
    /// A downstream call failed.
    Failed,
}

impl ActionOutcome {
    /// Process exit status for this outcome.
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Completed => ExitCode::SUCCESS,
            Self::Rejected => ExitCode::from(1),
            Self::Failed => ExitCode::from(2),
        }
    }
}
