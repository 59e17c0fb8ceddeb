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

//! The scripted dialogue: session state, session store, and the state
//! machine that drives the fixed question sequence.
//!
//! # Concurrency contract
//!
//! The chat id is the serialization key. The transport delivers one chat's
//! messages in order and the engine is re-entrant across chats, so no locks
//! are needed beyond the session map's own mutex. Handlers re-read session
//! state from the store at the start of every message and never hold a
//! session reference across an awaited external call; mutations go back
//! through the store by id.

mod engine;
mod session;
mod store;
pub mod text;

pub use engine::{DialogueEngine, ReplySink};
pub use session::{Answers, Session, Step};
pub use store::SessionStore;
