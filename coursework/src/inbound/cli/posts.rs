//! Post demo flows: list and create.
//!
//! API failures are reported to the user with a fixed message and logged with
//! the underlying error; they never abort the process.

use std::io::Write;

use tracing::{error, info};

use super::{ActionOutcome, CliError};
use crate::domain::ports::PostsApi;
use crate::domain::{Post, PostsError, PostsService};

/// Work out the `_limit` to request.
///
/// `all` wins and removes the cap; otherwise an explicit `limit` overrides
/// the configured default.
pub const fn resolve_limit(limit: Option<usize>, all: bool, default: usize) -> Option<usize> {
    if all {
        return None;
    }
    match limit {
        Some(limit) => Some(limit),
        None => Some(default),
    }
}

/// Render one post as a titled block followed by a blank line.
///
/// # Errors
///
/// Returns [`CliError::Io`] when writing fails.
pub fn render_post(out: &mut impl Write, post: &Post) -> Result<(), CliError> {
    writeln!(out, "#{} {}", post.id, post.title)?;
    for line in post.body.lines() {
        writeln!(out, "    {line}")?;
    }
    writeln!(out)?;
    Ok(())
}

/// Fetch posts and print them.
///
/// # Errors
///
/// Returns [`CliError::Io`] when writing fails. API failures are reported on
/// `out` and yield [`ActionOutcome::Failed`].
pub async fn list_posts<A>(
    service: &PostsService<A>,
    limit: Option<usize>,
    out: &mut impl Write,
) -> Result<ActionOutcome, CliError>
where
    A: PostsApi,
{
    writeln!(out, "Loading posts...")?;
    out.flush()?;

    match service.list(limit).await {
        Ok(posts) => {
            info!(count = posts.len(), ?limit, "posts loaded");
            for post in &posts {
                render_post(out, post)?;
            }
            Ok(ActionOutcome::Completed)
        }
        Err(err) => {
            error!(error = %err, ?limit, "failed to load posts");
            writeln!(out, "Failed to load posts!")?;
            Ok(ActionOutcome::Failed)
        }
    }
}

/// Submit a post and report the assigned identifier.
///
/// # Errors
///
/// Returns [`CliError::Io`] when writing fails. Blank fields yield
/// [`ActionOutcome::Rejected`] without any request; API failures yield
/// [`ActionOutcome::Failed`].
pub async fn create_post<A>(
    service: &PostsService<A>,
    title: &str,
    body: &str,
    out: &mut impl Write,
) -> Result<ActionOutcome, CliError>
where
    A: PostsApi,
{
    match service.create(title, body).await {
        Ok(post) => {
            info!(id = post.id, "post created");
            writeln!(out, "Post created successfully! ID: {}", post.id)?;
            render_post(out, &post)?;
            Ok(ActionOutcome::Completed)
        }
        Err(PostsError::Draft(_)) => {
            writeln!(out, "Please fill in all fields.")?;
            Ok(ActionOutcome::Rejected)
        }
        Err(PostsError::Api(err)) => {
            error!(error = %err, "failed to create post");
            writeln!(out, "Failed to create post. Please try again later.")?;
            Ok(ActionOutcome::Failed)
        }
    }
}
