//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **placeholder**: reqwest-backed client for the public placeholder posts
//!   API.
//!
//! Adapters are thin translators that convert between domain types and
//! transport representations. They contain no business logic.

pub mod placeholder;
