//! Inbound adapters that translate terminal interaction into domain calls
//! while keeping prompt and argument-parsing details at the edge.
//!
//! Command-line flows live under [`cli`].

pub mod cli;
