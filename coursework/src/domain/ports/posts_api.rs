//! Driven port for the placeholder posts API.
//!
//! The domain owns the request and response shapes so the CLI flows can stay
//! adapter-agnostic; the HTTP details live in the outbound adapter.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::posts::{Post, PostDraft};

define_port_error! {
    /// Errors surfaced while calling the posts API.
    pub enum PostsApiError {
        /// Network transport failed before a response arrived.
        Transport {
            /// Transport failure description.
            message: String,
        } => "posts API transport failed: {message}",
        /// The call exceeded the configured request timeout.
        Timeout {
            /// Timeout description.
            message: String,
        } => "posts API timeout: {message}",
        /// The API answered with a non-success status.
        Status {
            /// HTTP status code.
            status: u16,
            /// Compact preview of the response body.
            message: String,
        } => "posts API returned status {status}: {message}",
        /// Response body could not be decoded.
        Decode {
            /// Decoder failure description.
            message: String,
        } => "posts API response decode failed: {message}",
        /// Adapter rejected the request before sending it.
        InvalidRequest {
            /// Why the request was rejected.
            message: String,
        } => "posts API request invalid: {message}",
    }
}

/// Port for reading and creating posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsApi: Send + Sync {
    /// Fetch posts, at most `limit` of them when a limit is given.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use coursework::domain::ports::{FixturePostsApi, PostsApi};
    ///
    /// let posts = FixturePostsApi.list_posts(Some(2)).await?;
    /// assert_eq!(posts.len(), 2);
    /// # Ok::<(), coursework::domain::ports::PostsApiError>(())
    /// ```
    async fn list_posts(&self, limit: Option<usize>) -> Result<Vec<Post>, PostsApiError>;

    /// Submit a new post and return it with its assigned identifier.
    async fn create_post(&self, draft: &PostDraft) -> Result<Post, PostsApiError>;
}

/// Identifier the placeholder API assigns to every created post.
pub const FIXTURE_CREATED_POST_ID: u64 = 101;

/// Deterministic in-memory implementation mirroring the placeholder API.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixturePostsApi;

impl FixturePostsApi {
    fn posts() -> Vec<Post> {
        (1..=10)
            .map(|id| Post {
                id,
                user_id: 1,
                title: format!("fixture post {id}"),
                body: format!("body of fixture post {id}"),
            })
            .collect()
    }
}

#[async_trait]
impl PostsApi for FixturePostsApi {
    async fn list_posts(&self, limit: Option<usize>) -> Result<Vec<Post>, PostsApiError> {
        let posts = Self::posts();
        Ok(match limit {
            Some(limit) => posts.into_iter().take(limit).collect(),
            None => posts,
        })
    }

    async fn create_post(&self, draft: &PostDraft) -> Result<Post, PostsApiError> {
        Ok(Post {
            id: FIXTURE_CREATED_POST_ID,
            user_id: draft.user_id(),
            title: draft.title().to_owned(),
            body: draft.body().to_owned(),
        })
    }
}
