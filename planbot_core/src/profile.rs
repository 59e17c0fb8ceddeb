//! Applicant domain model.
//!
//! The dialogue collects three answers (family size, household income,
//! gender). Once all three are present they form an [`ApplicantProfile`],
//! and a completed conversation is persisted as a [`Transcript`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Self-reported gender of the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Parse user input. Only the full words are accepted, case-insensitively;
    /// abbreviations like `"m"` are rejected.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("male") {
            Some(Self::Male)
        } else if input.eq_ignore_ascii_case("female") {
            Some(Self::Female)
        } else if input.eq_ignore_ascii_case("other") {
            Some(Self::Other)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completed answer triple collected by the dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    /// Number of people in the household, at least 1
    pub family_size: u32,
    /// Household income in USD per month, at least 1
    pub income: u32,
    /// Self-reported gender
    pub gender: Gender,
}

/// Persisted record of a completed conversation.
///
/// Written exactly once after the recommendation has been delivered; never
/// updated or deleted by the conversational flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    /// Record identifier
    pub id: Uuid,
    /// Conversation identifier assigned by the chat transport
    pub chat_id: i64,
    /// The completed answers
    pub profile: ApplicantProfile,
    /// Generated (or fallback) recommendation text
    pub recommendation: String,
    /// Creation time of the record, not of the conversation
    pub created_at: DateTime<Utc>,
}

impl Transcript {
    /// Create a new record stamped with the current time.
    #[must_use]
    pub fn new(chat_id: i64, profile: ApplicantProfile, recommendation: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            chat_id,
            profile,
            recommendation,
            created_at: Utc::now(),
        }
    }
}
