//! End-to-end dialogue tests with recording doubles for the transport sink,
//! the generative provider, and the transcript store.

use async_trait::async_trait;
use planbot_conversation::{DialogueEngine, ReplySink, Step, text};
use planbot_core::{
    ChatMessage, FALLBACK_RECOMMENDATION, Gender, GenerationConfig, LLMProvider, LLMResponse,
    RecommendationRequester, Transcript, TranscriptStore,
};
use std::sync::Mutex;

const PLAN_TEXT: &str = "Health Insurance Plan Recommendation: a plan.";

struct StubProvider;

#[async_trait]
impl LLMProvider for StubProvider {
    async fn chat(
        &self,
        _messages: &[ChatMessage],
        _config: &GenerationConfig,
    ) -> anyhow::Result<LLMResponse> {
        Ok(LLMResponse {
            content: PLAN_TEXT.to_string(),
            usage: None,
        })
    }

    fn default_model(&self) -> &str {
        "stub-model"
    }
}

struct FailingProvider;

#[async_trait]
impl LLMProvider for FailingProvider {
    async fn chat(
        &self,
        _messages: &[ChatMessage],
        _config: &GenerationConfig,
    ) -> anyhow::Result<LLMResponse> {
        anyhow::bail!("service timed out")
    }

    fn default_model(&self) -> &str {
        "stub-model"
    }
}

#[derive(Default)]
struct RecordingStore {
    records: Mutex<Vec<Transcript>>,
}

impl RecordingStore {
    fn records(&self) -> Vec<Transcript> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranscriptStore for &RecordingStore {
    async fn insert(&self, transcript: &Transcript) -> anyhow::Result<()> {
        self.records.lock().unwrap().push(transcript.clone());
        Ok(())
    }
}

struct FailingStore;

#[async_trait]
impl TranscriptStore for FailingStore {
    async fn insert(&self, _transcript: &Transcript) -> anyhow::Result<()> {
        anyhow::bail!("write refused")
    }
}

#[derive(Default)]
struct RecordingSink {
    sent: Mutex<Vec<(i64, String)>>,
}

impl RecordingSink {
    fn texts(&self, chat_id: i64) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| *id == chat_id)
            .map(|(_, t)| t.clone())
            .collect()
    }

    fn last(&self, chat_id: i64) -> Option<String> {
        self.texts(chat_id).last().cloned()
    }
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn send(&self, chat_id: i64, text: &str) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }
}

/// Sink that refuses to deliver one specific message.
struct FlakySink {
    inner: RecordingSink,
    poison: &'static str,
}

#[async_trait]
impl ReplySink for FlakySink {
    async fn send(&self, chat_id: i64, text: &str) -> anyhow::Result<()> {
        if text == self.poison {
            anyhow::bail!("delivery failed")
        }
        self.inner.send(chat_id, text).await
    }
}

fn engine<P, T>(provider: P, store: T) -> DialogueEngine<P, T>
where
    P: LLMProvider,
    T: TranscriptStore,
{
    DialogueEngine::new(RecommendationRequester::new(provider), store)
}

async fn drive<P, T>(
    engine: &DialogueEngine<P, T>,
    sink: &dyn ReplySink,
    chat_id: i64,
    inputs: &[&str],
) where
    P: LLMProvider,
    T: TranscriptStore,
{
    for input in inputs {
        engine
            .handle_message(chat_id, input, sink)
            .await
            .expect("handler should not error");
    }
}

#[tokio::test]
async fn happy_path_emits_one_recommendation_and_one_record() {
    let store = RecordingStore::default();
    let engine = engine(StubProvider, &store);
    let sink = RecordingSink::default();

    drive(&engine, &sink, 1, &["/start", "yes", "4", "3000", "male"]).await;

    assert_eq!(
        sink.texts(1),
        vec![
            text::GREETING.to_string(),
            text::ASK_FAMILY_SIZE.to_string(),
            text::ASK_INCOME.to_string(),
            text::ASK_GENDER.to_string(),
            text::GENERATING.to_string(),
            PLAN_TEXT.to_string(),
            text::THANKS.to_string(),
        ]
    );

    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].chat_id, 1);
    assert_eq!(records[0].profile.family_size, 4);
    assert_eq!(records[0].profile.income, 3000);
    assert_eq!(records[0].profile.gender, Gender::Male);
    assert_eq!(records[0].recommendation, PLAN_TEXT);

    // Completion removes the session entirely.
    assert!(engine.sessions().get(1).await.is_none());
}

#[tokio::test]
async fn decline_ends_the_conversation() {
    let store = RecordingStore::default();
    let engine = engine(StubProvider, &store);
    let sink = RecordingSink::default();

    drive(&engine, &sink, 1, &["/start", "no"]).await;

    assert_eq!(sink.last(1).unwrap(), text::FAREWELL);
    assert!(engine.sessions().get(1).await.is_none());
    assert!(store.records().is_empty());

    drive(&engine, &sink, 1, &["hello?"]).await;
    assert_eq!(sink.last(1).unwrap(), text::PLEASE_START);
}

#[tokio::test]
async fn consent_reprompts_without_advancing() {
    let store = RecordingStore::default();
    let engine = engine(StubProvider, &store);
    let sink = RecordingSink::default();

    drive(&engine, &sink, 1, &["/start", "maybe", "Y"]).await;

    assert_eq!(
        sink.texts(1),
        vec![
            text::GREETING.to_string(),
            text::CONSENT_REPROMPT.to_string(),
            text::ASK_FAMILY_SIZE.to_string(),
        ]
    );
}

#[tokio::test]
async fn family_size_rejects_nonpositive_input_without_advancing() {
    let store = RecordingStore::default();
    let engine = engine(StubProvider, &store);
    let sink = RecordingSink::default();

    drive(&engine, &sink, 1, &["/start", "yes"]).await;

    for bad in ["0", "-3", "four", ""] {
        drive(&engine, &sink, 1, &[bad]).await;
        assert_eq!(sink.last(1).unwrap(), text::INVALID_FAMILY_SIZE);

        let session = engine.sessions().get(1).await.unwrap();
        assert_eq!(session.step, Step::AwaitingFamilySize);
        assert_eq!(session.answers.family_size, None);
    }

    drive(&engine, &sink, 1, &["1"]).await;
    let session = engine.sessions().get(1).await.unwrap();
    assert_eq!(session.step, Step::AwaitingIncome);
    assert_eq!(session.answers.family_size, Some(1));
}

#[tokio::test]
async fn income_rejects_nonpositive_input_without_advancing() {
    let store = RecordingStore::default();
    let engine = engine(StubProvider, &store);
    let sink = RecordingSink::default();

    drive(&engine, &sink, 1, &["/start", "yes", "2", "0"]).await;
    assert_eq!(sink.last(1).unwrap(), text::INVALID_INCOME);
    assert_eq!(
        engine.sessions().get(1).await.unwrap().step,
        Step::AwaitingIncome
    );

    drive(&engine, &sink, 1, &["2500"]).await;
    let session = engine.sessions().get(1).await.unwrap();
    assert_eq!(session.step, Step::AwaitingGender);
    assert_eq!(session.answers.income, Some(2500));
}

#[tokio::test]
async fn gender_accepts_case_folded_words_only() {
    let store = RecordingStore::default();
    let engine = engine(StubProvider, &store);
    let sink = RecordingSink::default();

    drive(&engine, &sink, 1, &["/start", "yes", "2", "2500", "m"]).await;
    assert_eq!(sink.last(1).unwrap(), text::INVALID_GENDER);
    assert_eq!(
        engine.sessions().get(1).await.unwrap().step,
        Step::AwaitingGender
    );

    drive(&engine, &sink, 1, &["Male"]).await;
    assert_eq!(sink.last(1).unwrap(), text::THANKS);
    assert_eq!(store.records()[0].profile.gender, Gender::Male);
}

#[tokio::test]
async fn provider_failure_falls_back_and_still_persists() {
    let store = RecordingStore::default();
    let engine = engine(FailingProvider, &store);
    let sink = RecordingSink::default();

    drive(&engine, &sink, 1, &["/start", "yes", "4", "3000", "other"]).await;

    let texts = sink.texts(1);
    assert!(texts.contains(&FALLBACK_RECOMMENDATION.to_string()));
    assert_eq!(texts.last().unwrap().as_str(), text::THANKS);

    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].recommendation, FALLBACK_RECOMMENDATION);
}

#[tokio::test]
async fn persistence_failure_never_reaches_the_user() {
    let engine = engine(StubProvider, FailingStore);
    let sink = RecordingSink::default();

    drive(&engine, &sink, 1, &["/start", "yes", "4", "3000", "female"]).await;

    let texts = sink.texts(1);
    assert!(texts.contains(&PLAN_TEXT.to_string()));
    assert_eq!(texts.last().unwrap().as_str(), text::THANKS);
    assert!(engine.sessions().get(1).await.is_none());
}

#[tokio::test]
async fn cancel_mid_flow_removes_the_session() {
    let store = RecordingStore::default();
    let engine = engine(StubProvider, &store);
    let sink = RecordingSink::default();

    drive(&engine, &sink, 1, &["/start", "yes", "2", "/cancel"]).await;

    assert_eq!(sink.last(1).unwrap(), text::CANCELED);
    assert!(engine.sessions().get(1).await.is_none());

    drive(&engine, &sink, 1, &["5"]).await;
    assert_eq!(sink.last(1).unwrap(), text::PLEASE_START);
}

#[tokio::test]
async fn help_leaves_state_unchanged() {
    let store = RecordingStore::default();
    let engine = engine(StubProvider, &store);
    let sink = RecordingSink::default();

    drive(&engine, &sink, 1, &["/start", "yes", "2", "/help"]).await;

    assert_eq!(sink.last(1).unwrap(), text::HELP);
    let session = engine.sessions().get(1).await.unwrap();
    assert_eq!(session.step, Step::AwaitingIncome);
    assert_eq!(session.answers.family_size, Some(2));
}

#[tokio::test]
async fn unknown_commands_are_ignored() {
    let store = RecordingStore::default();
    let engine = engine(StubProvider, &store);
    let sink = RecordingSink::default();

    drive(&engine, &sink, 1, &["/frobnicate"]).await;
    assert!(sink.texts(1).is_empty());
}

#[tokio::test]
async fn interleaved_conversations_stay_isolated() {
    let store = RecordingStore::default();
    let engine = engine(StubProvider, &store);
    let sink = RecordingSink::default();

    // Two chats progressing with interleaved deliveries.
    drive(&engine, &sink, 1, &["/start"]).await;
    drive(&engine, &sink, 2, &["/start"]).await;
    drive(&engine, &sink, 1, &["yes", "3"]).await;
    drive(&engine, &sink, 2, &["yes"]).await;
    drive(&engine, &sink, 1, &["4000"]).await;
    drive(&engine, &sink, 2, &["7"]).await;

    let one = engine.sessions().get(1).await.unwrap();
    assert_eq!(one.step, Step::AwaitingGender);
    assert_eq!(one.answers.family_size, Some(3));
    assert_eq!(one.answers.income, Some(4000));

    let two = engine.sessions().get(2).await.unwrap();
    assert_eq!(two.step, Step::AwaitingIncome);
    assert_eq!(two.answers.family_size, Some(7));
    assert_eq!(two.answers.income, None);
}

#[tokio::test]
async fn delivery_fault_resets_the_session_and_notifies() {
    let store = RecordingStore::default();
    let engine = engine(StubProvider, &store);
    let sink = FlakySink {
        inner: RecordingSink::default(),
        poison: text::GREETING,
    };

    engine
        .handle_message(1, "/start", &sink)
        .await
        .expect("failure notice should still be deliverable");

    assert_eq!(sink.inner.last(1).unwrap(), text::FAILURE);
    assert!(engine.sessions().get(1).await.is_none());
}

#[tokio::test]
async fn whitespace_is_trimmed_before_matching() {
    let store = RecordingStore::default();
    let engine = engine(StubProvider, &store);
    let sink = RecordingSink::default();

    drive(&engine, &sink, 1, &["  /start  ", " YES ", " 4 "]).await;

    let session = engine.sessions().get(1).await.unwrap();
    assert_eq!(session.step, Step::AwaitingIncome);
    assert_eq!(session.answers.family_size, Some(4));
}
