//! Placeholder posts API outbound adapter.
//!
//! This module provides a thin HTTP implementation of the `PostsApi` port.

mod dto;
mod http_client;

pub use http_client::{DEFAULT_ENDPOINT, JsonPlaceholderClient};
