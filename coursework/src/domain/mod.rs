//! Domain rules and state for the exercises.
//!
//! Purpose: keep every rule pure and transport agnostic. Inbound adapters
//! collect input and render results; outbound adapters implement the ports.
//!
//! Public surface:
//! - `registration`: registration form rule table ([`UserInput`]).
//! - `menu`: navigation menu state and resize debouncing.
//! - `movies`: movie collection with pure transitions.
//! - `posts`: post drafts and the [`PostsService`] use case.
//! - `ports`: driven ports, currently the posts API.

pub mod menu;
pub mod movies;
pub mod ports;
pub mod posts;
pub mod registration;

pub use self::movies::{Movie, MovieCollection, MovieDraft, MovieDraftError, MovieId, Removal};
pub use self::posts::{Post, PostDraft, PostDraftError, PostsError, PostsService};
pub use self::registration::{UserInput, ValidatedUser, ValidationErrors, Violation};
