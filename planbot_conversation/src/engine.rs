//! The dialogue state machine.
//!
//! One inbound message at a time: look up the session, apply the transition
//! for the current step, emit the outbound message(s) through the injected
//! [`ReplySink`], and on the terminal step request the recommendation and
//! persist the transcript.
//!
//! The recommendation is always delivered to the user before the persistence
//! write is attempted, and a persistence failure never retracts it. A
//! `/cancel` arriving while a recommendation request is in flight does not
//! abort the request; its result is applied to whatever session state exists
//! once it resolves.

use crate::session::Step;
use crate::store::SessionStore;
use crate::text;
use async_trait::async_trait;
use planbot_core::{Gender, LLMProvider, RecommendationRequester, Transcript, TranscriptStore};
use tracing::{debug, info, warn};

/// Outbound message port.
///
/// Implemented by the chat transport adapter and by recording test doubles.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send(&self, chat_id: i64, text: &str) -> anyhow::Result<()>;
}

/// Drives the fixed question sequence for every active conversation.
pub struct DialogueEngine<P, T> {
    sessions: SessionStore,
    requester: RecommendationRequester<P>,
    transcripts: T,
}

impl<P, T> DialogueEngine<P, T>
where
    P: LLMProvider,
    T: TranscriptStore,
{
    pub fn new(requester: RecommendationRequester<P>, transcripts: T) -> Self {
        Self {
            sessions: SessionStore::new(),
            requester,
            transcripts,
        }
    }

    /// The session store, for inspection by the embedding application.
    #[must_use]
    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle one inbound message.
    ///
    /// Any fault inside dispatch is downgraded here: the session is forcibly
    /// removed so the conversation cannot get stuck mid-step, and the user
    /// gets a generic failure notice. Only a failure to deliver that notice
    /// propagates to the transport.
    pub async fn handle_message(
        &self,
        chat_id: i64,
        text: &str,
        out: &dyn ReplySink,
    ) -> anyhow::Result<()> {
        if let Err(e) = self.dispatch(chat_id, text, out).await {
            warn!("Failed to handle message for chat {chat_id}: {e}");
            self.sessions.remove(chat_id).await;
            out.send(chat_id, text::FAILURE).await?;
        }
        Ok(())
    }

    async fn dispatch(&self, chat_id: i64, text: &str, out: &dyn ReplySink) -> anyhow::Result<()> {
        let input = text.trim();

        match input {
            "/start" => self.start(chat_id, out).await,
            "/help" => out.send(chat_id, text::HELP).await,
            "/cancel" => self.cancel(chat_id, out).await,
            _ if input.starts_with('/') => {
                debug!("Ignoring unknown command from chat {chat_id}: {input}");
                Ok(())
            }
            _ => self.answer(chat_id, input, out).await,
        }
    }

    /// `/start`: greet, then open the consent question.
    ///
    /// The session sits at `NotStarted` until the greeting has gone out, so
    /// a crash in between leaves the user at the "please start" prompt
    /// rather than mid-dialogue.
    async fn start(&self, chat_id: i64, out: &dyn ReplySink) -> anyhow::Result<()> {
        self.sessions.reset(chat_id).await;
        info!("Chat {chat_id}: conversation started");

        out.send(chat_id, text::GREETING).await?;
        self.sessions
            .update(chat_id, |s| s.step = Step::AwaitingConsent)
            .await;
        Ok(())
    }

    async fn cancel(&self, chat_id: i64, out: &dyn ReplySink) -> anyhow::Result<()> {
        self.sessions.remove(chat_id).await;
        info!("Chat {chat_id}: conversation canceled");
        out.send(chat_id, text::CANCELED).await
    }

    /// Non-command text: apply the transition for the current step.
    async fn answer(&self, chat_id: i64, input: &str, out: &dyn ReplySink) -> anyhow::Result<()> {
        // Re-read on every message; the session may have been reset or
        // removed since the previous one.
        let Some(session) = self.sessions.get(chat_id).await else {
            return out.send(chat_id, text::PLEASE_START).await;
        };

        match session.step {
            Step::NotStarted => out.send(chat_id, text::PLEASE_START).await,
            Step::AwaitingConsent => self.consent(chat_id, input, out).await,
            Step::AwaitingFamilySize => {
                if let Some(n) = parse_positive(input) {
                    self.sessions
                        .update(chat_id, |s| {
                            s.answers.family_size = Some(n);
                            s.step = Step::AwaitingIncome;
                        })
                        .await;
                    out.send(chat_id, text::ASK_INCOME).await
                } else {
                    out.send(chat_id, text::INVALID_FAMILY_SIZE).await
                }
            }
            Step::AwaitingIncome => {
                if let Some(n) = parse_positive(input) {
                    self.sessions
                        .update(chat_id, |s| {
                            s.answers.income = Some(n);
                            s.step = Step::AwaitingGender;
                        })
                        .await;
                    out.send(chat_id, text::ASK_GENDER).await
                } else {
                    out.send(chat_id, text::INVALID_INCOME).await
                }
            }
            Step::AwaitingGender => match Gender::parse(input) {
                Some(gender) => self.finish(chat_id, gender, out).await,
                None => out.send(chat_id, text::INVALID_GENDER).await,
            },
        }
    }

    async fn consent(&self, chat_id: i64, input: &str, out: &dyn ReplySink) -> anyhow::Result<()> {
        match input.to_lowercase().as_str() {
            "yes" | "y" => {
                self.sessions
                    .update(chat_id, |s| s.step = Step::AwaitingFamilySize)
                    .await;
                out.send(chat_id, text::ASK_FAMILY_SIZE).await
            }
            "no" | "n" => {
                self.sessions.remove(chat_id).await;
                info!("Chat {chat_id}: declined");
                out.send(chat_id, text::FAREWELL).await
            }
            _ => out.send(chat_id, text::CONSENT_REPROMPT).await,
        }
    }

    /// Terminal transition: recommendation out first, then the best-effort
    /// persistence write, then thanks and session removal.
    async fn finish(&self, chat_id: i64, gender: Gender, out: &dyn ReplySink) -> anyhow::Result<()> {
        let updated = self
            .sessions
            .update(chat_id, |s| s.answers.gender = Some(gender))
            .await;

        let Some(profile) = updated.and_then(|s| s.answers.complete()) else {
            anyhow::bail!("chat {chat_id}: reached the final step with incomplete answers");
        };

        out.send(chat_id, text::GENERATING).await?;

        let recommendation = self.requester.request(&profile).await;
        out.send(chat_id, &recommendation).await?;

        let transcript = Transcript::new(chat_id, profile, recommendation);
        if let Err(e) = self.transcripts.insert(&transcript).await {
            warn!("Failed to persist transcript for chat {chat_id}: {e}");
        }

        out.send(chat_id, text::THANKS).await?;
        self.sessions.remove(chat_id).await;
        info!("Chat {chat_id}: conversation completed");
        Ok(())
    }
}

/// Base-10 positive integer; `0`, negatives, and non-numeric input are
/// rejected.
fn parse_positive(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok().filter(|n| *n > 0)
}
