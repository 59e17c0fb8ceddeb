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

//! Core vocabulary for the planbot workspace.
//!
//! This crate defines the chat/LLM message types, the provider and
//! transcript-store traits that the outer crates implement, the applicant
//! domain model, and the recommendation requester.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod profile;
pub mod recommend;

pub use profile::{ApplicantProfile, Gender, Transcript};
pub use recommend::{FALLBACK_RECOMMENDATION, RecommendationRequester};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: String,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Sampling parameters sent to the provider with every request.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
}

#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        config: &GenerationConfig,
    ) -> anyhow::Result<LLMResponse>;

    fn default_model(&self) -> &str;
}

/// Append-only persistence for completed conversations.
///
/// Implementations must attempt the write exactly once; retry and alerting
/// policy is left to the caller (the dialogue engine logs and swallows
/// failures so the user-facing flow is never blocked on storage).
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    async fn insert(&self, transcript: &Transcript) -> anyhow::Result<()>;
}
