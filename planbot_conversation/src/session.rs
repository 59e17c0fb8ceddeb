//! Per-conversation session state.

use planbot_core::{ApplicantProfile, Gender};

/// Position in the fixed question sequence.
///
/// Sessions only ever advance `AwaitingConsent` → `AwaitingFamilySize` →
/// `AwaitingIncome` → `AwaitingGender`; the conversation ends by removing
/// the session, never by regressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Session exists but the greeting has not gone out yet
    NotStarted,
    AwaitingConsent,
    AwaitingFamilySize,
    AwaitingIncome,
    AwaitingGender,
}

/// Partially collected answers, filled strictly in step order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Answers {
    pub family_size: Option<u32>,
    pub income: Option<u32>,
    pub gender: Option<Gender>,
}

impl Answers {
    /// The completed triple, once every field has been collected.
    #[must_use]
    pub const fn complete(&self) -> Option<ApplicantProfile> {
        match (self.family_size, self.income, self.gender) {
            (Some(family_size), Some(income), Some(gender)) => Some(ApplicantProfile {
                family_size,
                income,
                gender,
            }),
            _ => None,
        }
    }
}

/// In-memory state of one active conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub chat_id: i64,
    pub step: Step,
    pub answers: Answers,
}

impl Session {
    /// A fresh pre-greeting session with no answers.
    #[must_use]
    pub const fn new(chat_id: i64) -> Self {
        Self {
            chat_id,
            step: Step::NotStarted,
            answers: Answers {
                family_size: None,
                income: None,
                gender: None,
            },
        }
    }
}
