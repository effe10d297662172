//! Reqwest-backed posts API adapter.
//!
//! This adapter owns transport details only: URL building, request
//! serialisation, HTTP error mapping, and JSON decoding into domain posts.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{NewPostDto, PostDto};
use crate::domain::ports::{PostsApi, PostsApiError};
use crate::domain::posts::{Post, PostDraft};

/// Public placeholder API used by the post demos.
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com";
const USER_AGENT: &str = "coursework-posts-client/0.1";
const LIMIT_PARAM: &str = "_limit";

/// Posts API adapter issuing one HTTP request per call against one endpoint.
pub struct JsonPlaceholderClient {
    client: Client,
    base_url: Url,
}

impl JsonPlaceholderClient {
    /// Build an adapter without a request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, None)
    }

    /// Build an adapter, optionally bounding every request by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    ///
    /// use coursework::outbound::placeholder::{DEFAULT_ENDPOINT, JsonPlaceholderClient};
    /// use url::Url;
    ///
    /// let endpoint = Url::parse(DEFAULT_ENDPOINT).expect("endpoint parses");
    /// let client = JsonPlaceholderClient::with_timeout(endpoint, Some(Duration::from_secs(5)));
    /// assert!(client.is_ok());
    /// ```
    pub fn with_timeout(base_url: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    fn posts_url(&self) -> Result<Url, PostsApiError> {
        posts_url(&self.base_url)
    }
}

#[async_trait]
impl PostsApi for JsonPlaceholderClient {
    async fn list_posts(&self, limit: Option<usize>) -> Result<Vec<Post>, PostsApiError> {
        let mut url = self.posts_url()?;
        if let Some(limit) = limit {
            url.query_pairs_mut()
                .append_pair(LIMIT_PARAM, &limit.to_string());
        }
        debug!(%url, "listing posts");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_posts(body.as_ref())
    }

    async fn create_post(&self, draft: &PostDraft) -> Result<Post, PostsApiError> {
        let url = self.posts_url()?;
        debug!(%url, "creating post");

        let response = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&NewPostDto::from(draft))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_post(body.as_ref())
    }
}

fn posts_url(base_url: &Url) -> Result<Url, PostsApiError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| {
            PostsApiError::invalid_request(format!("endpoint {base_url} cannot be a base URL"))
        })?
        .pop_if_empty()
        .push("posts");
    Ok(url)
}

fn parse_posts(body: &[u8]) -> Result<Vec<Post>, PostsApiError> {
    let decoded: Vec<PostDto> = serde_json::from_slice(body).map_err(|error| {
        PostsApiError::decode(format!("invalid posts JSON payload: {error}"))
    })?;
    Ok(decoded.into_iter().map(Post::from).collect())
}

fn parse_post(body: &[u8]) -> Result<Post, PostsApiError> {
    let decoded: PostDto = serde_json::from_slice(body)
        .map_err(|error| PostsApiError::decode(format!("invalid post JSON payload: {error}")))?;
    Ok(decoded.into())
}

fn map_transport_error(error: reqwest::Error) -> PostsApiError {
    if error.is_timeout() {
        PostsApiError::timeout(error.to_string())
    } else {
        PostsApiError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PostsApiError {
    let preview = body_preview(body);
    let preview = if preview.is_empty() {
        "empty body".to_owned()
    } else {
        preview
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            PostsApiError::timeout(format!("status {}: {preview}", status.as_u16()))
        }
        _ => PostsApiError::status(status.as_u16(), preview),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
