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

//! Append-only persistence for completed conversation transcripts.
//!
//! One table, one insert per completed conversation. The only other
//! operation is an operator-invoked bulk purge exposed through the CLI;
//! the conversational flow never reads, updates, or deletes records.

pub mod entity;
mod repository;

pub use repository::TranscriptRepository;
