//! Post creation and listing use cases.
//!
//! Drafts are checked before any network call; the [`PostsApi`] port does the
//! transport work.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::domain::ports::{PostsApi, PostsApiError};

/// Author identifier attached to every submitted post.
pub const PLACEHOLDER_USER_ID: u64 = 1;

/// A post as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Identifier assigned by the API.
    pub id: u64,
    /// Author identifier.
    pub user_id: u64,
    /// Post title.
    pub title: String,
    /// Post content.
    pub body: String,
}

/// Precondition failures raised before a post is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostDraftError {
    /// Title or body is blank once trimmed.
    MissingFields,
}

impl fmt::Display for PostDraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "title and body must not be empty"),
        }
    }
}

impl std::error::Error for PostDraftError {}

/// A post ready to be submitted.
///
/// ## Invariants
/// - `title` and `body` are non-empty once trimmed. The values are kept as
///   typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    body: String,
    user_id: u64,
}

impl PostDraft {
    /// Validate and construct a draft authored by [`PLACEHOLDER_USER_ID`].
    ///
    /// # Examples
    /// ```
    /// use coursework::domain::posts::{PostDraft, PostDraftError};
    ///
    /// assert!(PostDraft::new("Title", "Body").is_ok());
    /// assert_eq!(PostDraft::new("  ", "Body"), Err(PostDraftError::MissingFields));
    /// ```
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Result<Self, PostDraftError> {
        let title = title.into();
        let body = body.into();
        if title.trim().is_empty() || body.trim().is_empty() {
            return Err(PostDraftError::MissingFields);
        }
        Ok(Self {
            title,
            body,
            user_id: PLACEHOLDER_USER_ID,
        })
    }

    /// Post title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Post content.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Author identifier.
    pub const fn user_id(&self) -> u64 {
        self.user_id
    }
}

/// Errors returned by [`PostsService::create`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostsError {
    /// The draft failed its precondition checks; nothing was sent.
    #[error(transparent)]
    Draft(#[from] PostDraftError),
    /// The API call failed.
    #[error(transparent)]
    Api(#[from] PostsApiError),
}

/// Use-case service for the post demos.
pub struct PostsService<A> {
    api: Arc<A>,
}

impl<A> Clone for PostsService<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A> PostsService<A>
where
    A: PostsApi,
{
    /// Create a service backed by the given API port.
    pub const fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// List posts, capped at `limit` when given.
    ///
    /// # Errors
    ///
    /// Returns the port error when the API call fails.
    pub async fn list(&self, limit: Option<usize>) -> Result<Vec<Post>, PostsApiError> {
        self.api.list_posts(limit).await
    }

    /// Validate a title/body pair and submit it.
    ///
    /// # Errors
    ///
    /// Returns [`PostsError::Draft`] without calling the API when either
    /// field is blank, or [`PostsError::Api`] when the call fails.
    pub async fn create(&self, title: &str, body: &str) -> Result<Post, PostsError> {
        let draft = PostDraft::new(title, body)?;
        Ok(self.api.create_post(&draft).await?)
    }
}
