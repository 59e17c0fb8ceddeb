use crate::bot::{PlanBot, TelegramSink};
use crate::{Error, Result};
use teloxide::{requests::Requester, types::Message};
use tracing::info;

/// Handle one inbound Telegram message.
pub async fn handle_message(bot: PlanBot, msg: Message) -> Result<()> {
    let chat_id = msg.chat.id.0;

    // Non-text payloads (photos, stickers, ...) are outside the dialogue.
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let username = msg
        .from
        .as_ref()
        .and_then(|u| u.username.as_deref())
        .unwrap_or("unknown");

    info!("[@{username}] Message: {text}");

    // Show typing indicator while the engine works
    bot.bot
        .send_chat_action(msg.chat.id, teloxide::types::ChatAction::Typing)
        .await?;

    let sink = TelegramSink::new(bot.bot.clone());
    bot.engine()
        .handle_message(chat_id, text, &sink)
        .await
        .map_err(Error::Dialogue)?;

    Ok(())
}
