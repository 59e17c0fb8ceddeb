use crate::Result;
use async_trait::async_trait;
use planbot_conversation::{DialogueEngine, ReplySink};
use planbot_providers::OpenAiProvider;
use planbot_store::TranscriptRepository;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::ChatId;
use tracing::info;

/// The dialogue engine wired to its production collaborators.
pub type Engine = DialogueEngine<OpenAiProvider, TranscriptRepository>;

/// Telegram front end for the dialogue engine.
#[derive(Clone)]
pub struct PlanBot {
    /// Teloxide bot instance
    pub bot: Bot,
    engine: Arc<Engine>,
}

impl PlanBot {
    /// Create a new bot over an already-constructed engine.
    #[must_use]
    pub fn new(token: &str, engine: Engine) -> Self {
        Self {
            bot: Bot::new(token),
            engine: Arc::new(engine),
        }
    }

    pub(crate) fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Verify the bot credential against the Telegram API.
    ///
    /// Called once at startup; failure is fatal, matching the rest of the
    /// startup path.
    async fn check_connection(&self) -> Result<()> {
        let me = self.bot.get_me().await?;
        info!(
            "Connected to Telegram API: @{} (id: {})",
            me.user
                .username
                .clone()
                .unwrap_or_else(|| "no username".to_string()),
            me.user.id
        );
        Ok(())
    }

    /// Run the bot until interrupted.
    pub async fn run(self) -> Result<()> {
        use teloxide::dispatching::{Dispatcher, UpdateFilterExt};
        use teloxide::dptree;
        use teloxide::types::Update;

        self.check_connection().await?;

        self.bot.set_my_commands(crate::bot_commands()).await?;
        info!("Registered command menu with Telegram");

        let bot = self.bot.clone();

        let schema = dptree::entry().branch(Update::filter_message().endpoint({
            let this = self.clone();
            move |_bot: Bot, msg: teloxide::types::Message| {
                let this = this.clone();
                async move { crate::handler::handle_message(this, msg).await }
            }
        }));

        Dispatcher::builder(bot, schema)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}

/// [`ReplySink`] over the Telegram send API.
pub struct TelegramSink {
    bot: Bot,
}

impl TelegramSink {
    #[must_use]
    pub const fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ReplySink for TelegramSink {
    async fn send(&self, chat_id: i64, text: &str) -> anyhow::Result<()> {
        self.bot.send_message(ChatId(chat_id), text).await?;
        Ok(())
    }
}
