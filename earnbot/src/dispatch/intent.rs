//! Intent parsing for text commands and callback data.

/// Prefix of the PayPal withdrawal callback; followed by the chat id it was issued for.
pub const WITHDRAW_PAYPAL_PREFIX: &str = "withdraw_paypal_";

/// Intent of a text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextIntent {
    /// `/start` with an optional referral code.
    Start { code: Option<String> },
    Balance,
    Referral,
    Unknown,
}

impl TextIntent {
    /// Parses trimmed message text. Any text starting with `/start` is a start, with the second
    /// token as the code. Other commands may carry a `@botname` suffix; `/balance` and
    /// `/referral` take no arguments.
    pub fn parse(text: &str) -> Self {
        let mut tokens = text.split_whitespace();
        let Some(first) = tokens.next() else {
            return TextIntent::Unknown;
        };
        if first.starts_with("/start") {
            return TextIntent::Start {
                code: tokens.next().map(str::to_owned),
            };
        }
        let command = first.split('@').next().unwrap_or(first);
        match command {
            "/balance" if tokens.next().is_none() => TextIntent::Balance,
            "/referral" if tokens.next().is_none() => TextIntent::Referral,
            _ => TextIntent::Unknown,
        }
    }
}

/// Intent of an inline keyboard button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackIntent {
    Earn,
    Balance,
    Leaderboard,
    Referrals,
    Withdraw,
    /// PayPal withdrawal for the account the button was issued to.
    WithdrawPaypal { account: i64 },
    Help,
    MainMenu,
    Unknown(String),
}

impl CallbackIntent {
    pub fn parse(data: &str) -> Self {
        match data {
            "earn" => CallbackIntent::Earn,
            "balance" => CallbackIntent::Balance,
            "leaderboard" => CallbackIntent::Leaderboard,
            "referrals" => CallbackIntent::Referrals,
            "withdraw" => CallbackIntent::Withdraw,
            "help" => CallbackIntent::Help,
            "main_menu" => CallbackIntent::MainMenu,
            other => match other
                .strip_prefix(WITHDRAW_PAYPAL_PREFIX)
                .and_then(|id| id.parse().ok())
            {
                Some(account) => CallbackIntent::WithdrawPaypal { account },
                None => CallbackIntent::Unknown(other.to_owned()),
            },
        }
    }

    /// Callback data that parses back into this intent.
    pub fn data(&self) -> String {
        match self {
            CallbackIntent::Earn => "earn".to_string(),
            CallbackIntent::Balance => "balance".to_string(),
            CallbackIntent::Leaderboard => "leaderboard".to_string(),
            CallbackIntent::Referrals => "referrals".to_string(),
            CallbackIntent::Withdraw => "withdraw".to_string(),
            CallbackIntent::WithdrawPaypal { account } => {
                format!("{}{}", WITHDRAW_PAYPAL_PREFIX, account)
            }
            CallbackIntent::Help => "help".to_string(),
            CallbackIntent::MainMenu => "main_menu".to_string(),
            CallbackIntent::Unknown(data) => data.clone(),
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            CallbackIntent::Earn => "earn",
            CallbackIntent::Balance => "balance",
            CallbackIntent::Leaderboard => "leaderboard",
            CallbackIntent::Referrals => "referrals",
            CallbackIntent::Withdraw => "withdraw",
            CallbackIntent::WithdrawPaypal { .. } => "withdraw_paypal",
            CallbackIntent::Help => "help",
            CallbackIntent::MainMenu => "main_menu",
            CallbackIntent::Unknown(_) => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start_with_and_without_code() {
        assert_eq!(
            TextIntent::parse("/start"),
            TextIntent::Start { code: None }
        );
        assert_eq!(
            TextIntent::parse("/start   ab12cd34  "),
            TextIntent::Start {
                code: Some("ab12cd34".to_string())
            }
        );
        assert_eq!(
            TextIntent::parse("/start@earn_bot xyz"),
            TextIntent::Start {
                code: Some("xyz".to_string())
            }
        );
        assert_eq!(
            TextIntent::parse("/startabc"),
            TextIntent::Start { code: None }
        );
        assert_eq!(
            TextIntent::parse("/startabc ab12cd34"),
            TextIntent::Start {
                code: Some("ab12cd34".to_string())
            }
        );
    }

    #[test]
    fn test_parse_other_commands() {
        assert_eq!(TextIntent::parse("/balance"), TextIntent::Balance);
        assert_eq!(TextIntent::parse("/referral"), TextIntent::Referral);
        assert_eq!(TextIntent::parse("/balance@earn_bot"), TextIntent::Balance);
        assert_eq!(TextIntent::parse("/balance now"), TextIntent::Unknown);
        assert_eq!(TextIntent::parse("/referrals"), TextIntent::Unknown);
        assert_eq!(TextIntent::parse("hello"), TextIntent::Unknown);
        assert_eq!(TextIntent::parse(""), TextIntent::Unknown);
    }

    #[test]
    fn test_parse_callbacks() {
        assert_eq!(CallbackIntent::parse("earn"), CallbackIntent::Earn);
        assert_eq!(CallbackIntent::parse("main_menu"), CallbackIntent::MainMenu);
        assert_eq!(
            CallbackIntent::parse("withdraw_paypal_-100123"),
            CallbackIntent::WithdrawPaypal { account: -100123 }
        );
        assert_eq!(
            CallbackIntent::parse("withdraw_paypal_abc"),
            CallbackIntent::Unknown("withdraw_paypal_abc".to_string())
        );
        assert_eq!(
            CallbackIntent::parse("spin"),
            CallbackIntent::Unknown("spin".to_string())
        );
    }

    #[test]
    fn test_callback_data_parses_back() {
        let intents = [
            CallbackIntent::Earn,
            CallbackIntent::Balance,
            CallbackIntent::Leaderboard,
            CallbackIntent::Referrals,
            CallbackIntent::Withdraw,
            CallbackIntent::WithdrawPaypal { account: 42 },
            CallbackIntent::Help,
            CallbackIntent::MainMenu,
        ];
        for intent in intents {
            assert_eq!(CallbackIntent::parse(&intent.data()), intent);
        }
    }
}
