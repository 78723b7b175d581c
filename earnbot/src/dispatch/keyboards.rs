use earnbot_core::{InlineButton, InlineKeyboard};

use super::intent::CallbackIntent;

fn button(label: &str, intent: CallbackIntent) -> InlineButton {
    InlineButton::new(label, intent.data())
}

/// Main menu: earn, balance, leaderboard, referrals, withdraw, help.
pub fn main_keyboard() -> InlineKeyboard {
    InlineKeyboard::new()
        .row([
            button("💰 Earn", CallbackIntent::Earn),
            button("💳 Balance", CallbackIntent::Balance),
        ])
        .row([
            button("🏆 Leaderboard", CallbackIntent::Leaderboard),
            button("👥 Referrals", CallbackIntent::Referrals),
        ])
        .row([
            button("🏧 Withdraw", CallbackIntent::Withdraw),
            button("❓ Help", CallbackIntent::Help),
        ])
}

/// Withdrawal methods for `chat_id`, plus a way back.
pub fn withdraw_keyboard(chat_id: i64) -> InlineKeyboard {
    InlineKeyboard::new()
        .row([button(
            "💰 PayPal",
            CallbackIntent::WithdrawPaypal { account: chat_id },
        )])
        .row([button("🔙 Back", CallbackIntent::MainMenu)])
}
