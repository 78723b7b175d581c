//! Reward rules from env: EARN_AMOUNT, EARN_COOLDOWN_SECS, MIN_WITHDRAWAL, REFERRAL_BONUS, LEADERBOARD_SIZE.

use anyhow::{Context, Result};
use earnbot_storage::RewardRules;
use std::env;
use std::str::FromStr;

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(s) if !s.trim().is_empty() => s
            .trim()
            .parse()
            .with_context(|| format!("{} is not a valid number: {}", name, s)),
        _ => Ok(default),
    }
}

/// Loads rules from env, falling back to [`RewardRules::default`] per field.
pub fn load_rules() -> Result<RewardRules> {
    let defaults = RewardRules::default();
    Ok(RewardRules {
        earn_amount: parse_var("EARN_AMOUNT", defaults.earn_amount)?,
        earn_cooldown_secs: parse_var("EARN_COOLDOWN_SECS", defaults.earn_cooldown_secs)?,
        min_withdrawal: parse_var("MIN_WITHDRAWAL", defaults.min_withdrawal)?,
        referral_bonus: parse_var("REFERRAL_BONUS", defaults.referral_bonus)?,
        leaderboard_size: parse_var("LEADERBOARD_SIZE", defaults.leaderboard_size)?,
    })
}

/// All amounts and limits must be positive.
pub fn validate_rules(rules: &RewardRules) -> Result<()> {
    let checks = [
        ("EARN_AMOUNT", rules.earn_amount),
        ("EARN_COOLDOWN_SECS", rules.earn_cooldown_secs),
        ("MIN_WITHDRAWAL", rules.min_withdrawal),
        ("REFERRAL_BONUS", rules.referral_bonus),
    ];
    for (name, value) in checks {
        if value <= 0 {
            anyhow::bail!("{} must be positive, got {}", name, value);
        }
    }
    if rules.leaderboard_size == 0 {
        anyhow::bail!("LEADERBOARD_SIZE must be positive");
    }
    Ok(())
}
