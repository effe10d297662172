//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod posts_api;

#[cfg(test)]
pub use posts_api::MockPostsApi;
pub use posts_api::{FIXTURE_CREATED_POST_ID, FixturePostsApi, PostsApi, PostsApiError};
