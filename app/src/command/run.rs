use planbot_config::Config;
use planbot_conversation::DialogueEngine;
use planbot_core::RecommendationRequester;
use planbot_providers::OpenAiProvider;
use planbot_store::TranscriptRepository;
use planbot_telegram::PlanBot;
use tracing::info;

/// Input parameters for the Run command strategy.
#[derive(Debug, Clone)]
pub struct RunInput {
    /// Optional model override (defaults to `OPENAI_MODEL` or the built-in
    /// default)
    pub model: Option<String>,
}

/// Strategy for running the Telegram bot.
///
/// Startup is fail-fast: a missing environment variable, an unreachable
/// database, or a rejected bot token terminates the process.
#[derive(Debug, Clone, Copy)]
pub struct RunStrategy;

impl super::CommandStrategy for RunStrategy {
    type Input = RunInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::from_env()?;

        let provider = OpenAiProvider::new(config.openai.api_key.clone());
        let requester = RecommendationRequester::new(provider)
            .with_model(input.model.unwrap_or_else(|| config.openai.model.clone()));

        info!("Connecting to database");
        let transcripts = TranscriptRepository::connect(&config.database.url()).await?;

        let engine = DialogueEngine::new(requester, transcripts);
        let bot = PlanBot::new(&config.telegram.token, engine);

        info!("planbot is running. Press Ctrl+C to stop.");
        bot.run().await?;

        Ok(())
    }
}
