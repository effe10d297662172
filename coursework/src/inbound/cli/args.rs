//! Command-line arguments for the `coursework` binary.

use clap::{Args, Parser, Subcommand};

/// `coursework` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "coursework",
    about = "Registration, menu, movie and post exercises on the terminal",
    version
)]
pub struct Cli {
    /// Exercise to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Exercises available from the command line.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Ask for registration details and validate them.
    Register {
        /// Print the accepted record as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List or create posts on the placeholder API.
    Posts(PostsArgs),
    /// Manage a movie list interactively.
    Movies,
    /// Replay a menu event script read from stdin.
    Menu,
}

/// Arguments shared by the posts subcommands.
#[derive(Debug, Clone, Args)]
pub struct PostsArgs {
    /// Posts API base URL. Overrides `COURSEWORK_ENDPOINT`.
    #[arg(long, global = true, value_name = "url")]
    pub endpoint: Option<String>,
    /// Posts operation.
    #[command(subcommand)]
    pub command: PostsCommand,
}

/// Posts operations.
#[derive(Debug, Clone, Subcommand)]
pub enum PostsCommand {
    /// Fetch and print posts.
    List {
        /// Maximum number of posts to fetch.
        #[arg(long, value_name = "n", value_parser = parse_limit)]
        limit: Option<usize>,
        /// Fetch every post.
        #[arg(long, conflicts_with = "limit")]
        all: bool,
    },
    /// Submit a new post.
    Create {
        /// Post title.
        #[arg(long, default_value = "")]
        title: String,
        /// Post body.
        #[arg(long, default_value = "")]
        body: String,
    },
}

fn parse_limit(raw: &str) -> Result<usize, String> {
    let limit = raw
        .trim()
        .parse::<usize>()
        .map_err(|error| format!("limit must be a whole number: {error}"))?;
    if limit == 0 {
        return Err("limit must be at least 1".to_owned());
    }
    Ok(limit)
}
