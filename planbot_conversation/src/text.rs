//! Canned replies sent by the dialogue engine.

pub const GREETING: &str = "Welcome! Are you looking for a health insurance plan? (yes/no)";

pub const CONSENT_REPROMPT: &str = "Please answer with yes or no.";

pub const ASK_FAMILY_SIZE: &str = "Great! What is your family size?";

pub const INVALID_FAMILY_SIZE: &str = "Please enter a valid number for family size.";

pub const ASK_INCOME: &str = "What is your household income (USD per month)?";

pub const INVALID_INCOME: &str = "Please enter a valid income amount.";

pub const ASK_GENDER: &str = "What is your gender? (male/female/other)";

pub const INVALID_GENDER: &str = "Please specify your gender as male, female, or other.";

pub const GENERATING: &str =
    "Generating your health insurance plan recommendation...\nPlease wait.";

pub const THANKS: &str = "Thank you! Have a great day!";

pub const FAREWELL: &str = "No problem! See you next time.";

pub const CANCELED: &str = "Conversation canceled. Start again with /start.";

pub const PLEASE_START: &str = "Please start with /start.";

pub const FAILURE: &str = "Something went wrong. Please try again later.";

pub const HELP: &str = "Commands:
/start - Start a new conversation
/help - Show available commands
/cancel - Cancel the current conversation.";
