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

//! Telegram front end.
//!
//! A thin adapter: every inbound text message is forwarded verbatim to the
//! dialogue engine, and outbound replies go back through a [`ReplySink`]
//! implemented over the Telegram send API. Per-chat ordering is Telegram's
//! long-polling guarantee; the engine relies on it.
//!
//! [`ReplySink`]: planbot_conversation::ReplySink

mod bot;
mod command;
mod error;
mod handler;

pub use bot::{Engine, PlanBot, TelegramSink};
pub use command::bot_commands;
pub use error::{Error, Result};
