//! Classroom web exercises as a library and terminal application.
//!
//! - [`domain`] holds the registration rules, menu and movie state, and the
//!   post use cases with their API port.
//! - [`inbound`] drives the domain from the command line.
//! - [`outbound`] talks to the placeholder posts API over HTTP.
//! - [`config`] resolves posts client settings.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
