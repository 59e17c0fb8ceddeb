//! Database entities.

pub mod transcripts;
