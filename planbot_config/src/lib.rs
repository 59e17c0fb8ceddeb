#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Process configuration, read from the environment at startup.
//!
//! Every credential and connection parameter comes from environment
//! variables; a missing required variable is a fatal startup condition and
//! surfaces as an error out of `main`.

mod schema;

pub use schema::{Config, DatabaseConfig, ProviderConfig, TelegramConfig};
