//! `coursework` entry-point: parses arguments, wires adapters and runs one
//! exercise on the terminal.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use coursework::config::{ConfigError, PostsSettings, parse_endpoint};
use coursework::domain::PostsService;
use coursework::inbound::cli::{
    ActionOutcome, Cli, CliError, Command, PostsArgs, PostsCommand, Prompter, create_post,
    list_posts, replay_menu_script, resolve_limit, run_movie_session, run_registration,
};
use coursework::outbound::placeholder::JsonPlaceholderClient;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error(transparent)]
    Cli(#[from] CliError),
    #[error("failed to create Tokio runtime: {0}")]
    Runtime(#[source] io::Error),
}

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ActionOutcome, AppError> {
    match command {
        Command::Register { json } => {
            let mut prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());
            Ok(run_registration(&mut prompter, json)?)
        }
        Command::Movies => {
            let mut prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());
            run_movie_session(&mut prompter)?;
            Ok(ActionOutcome::Completed)
        }
        Command::Menu => {
            let mut out = io::stdout().lock();
            replay_menu_script(io::stdin().lock(), &mut out)?;
            out.flush().map_err(CliError::from)?;
            Ok(ActionOutcome::Completed)
        }
        Command::Posts(args) => run_posts(args),
    }
}

fn run_posts(args: PostsArgs) -> Result<ActionOutcome, AppError> {
    let settings = PostsSettings::load_from_env()?;
    let endpoint = match args.endpoint.as_deref() {
        Some(raw) => parse_endpoint(raw)?,
        None => settings.endpoint()?,
    };
    let client = JsonPlaceholderClient::with_timeout(endpoint, settings.request_timeout())?;
    let service = PostsService::new(Arc::new(client));

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(AppError::Runtime)?;
    let mut out = io::stdout().lock();
    let outcome = runtime.block_on(async {
        match args.command {
            PostsCommand::List { limit, all } => {
                let limit = resolve_limit(limit, all, settings.list_limit());
                list_posts(&service, limit, &mut out).await
            }
            PostsCommand::Create { title, body } => {
                create_post(&service, &title, &body, &mut out).await
            }
        }
    })?;
    out.flush().map_err(CliError::from)?;
    Ok(outcome)
}
