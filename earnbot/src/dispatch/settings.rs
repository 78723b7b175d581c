use earnbot_storage::RewardRules;

/// Everything the dispatcher needs besides the ledger.
#[derive(Debug, Clone)]
pub struct BotSettings {
    pub rules: RewardRules,
    /// Telegram username of the bot, without `@`; used in share links.
    pub bot_username: String,
    /// Name shown in welcome texts.
    pub display_name: String,
}

impl BotSettings {
    pub fn new(rules: RewardRules, bot_username: String, display_name: String) -> Self {
        Self {
            rules,
            bot_username,
            display_name,
        }
    }

    /// Deep link that starts the bot with `ref_code`.
    pub fn share_link(&self, ref_code: &str) -> String {
        format!("https://t.me/{}?start={}", self.bot_username, ref_code)
    }
}
