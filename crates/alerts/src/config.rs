//! Telegram credentials.

/// Bot token and destination chat for notifications.
#[derive(Clone, PartialEq, Eq)]
pub struct TelegramConfig {
    /// Bot API token
    pub bot_token: String,
    /// Chat that receives notifications
    pub chat_id: String,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramConfig {
    pub const TOKEN_VAR: &'static str = "TELEGRAM_BOT_TOKEN";
    pub const CHAT_ID_VAR: &'static str = "TELEGRAM_CHAT_ID";

    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// Read credentials from `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`.
    /// Returns None if either is unset or empty.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let bot_token = lookup(Self::TOKEN_VAR)?;
        let chat_id = lookup(Self::CHAT_ID_VAR)?;

        if bot_token.trim().is_empty() || chat_id.trim().is_empty() {
            return None;
        }

        Some(Self::new(bot_token.trim(), chat_id.trim()))
    }
}
