use teloxide::types::BotCommand;

/// Menu entries registered with Telegram at startup.
///
/// Dispatch does not happen here: commands are matched on the raw message
/// text inside the dialogue engine, so the menu is purely discoverability.
#[must_use]
pub fn bot_commands() -> Vec<BotCommand> {
    vec![
        BotCommand {
            command: "start".to_string(),
            description: "Start a new conversation".to_string(),
        },
        BotCommand {
            command: "help".to_string(),
            description: "Show available commands".to_string(),
        },
        BotCommand {
            command: "cancel".to_string(),
            description: "Cancel the current conversation".to_string(),
        },
    ]
}
