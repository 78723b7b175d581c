/// Point amounts and limits applied by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardRules {
    /// Points credited per successful earn.
    pub earn_amount: i64,
    /// Minimum seconds between two earns.
    pub earn_cooldown_secs: i64,
    /// Balance required before a withdrawal can be requested.
    pub min_withdrawal: i64,
    /// Points credited to the referrer per referral.
    pub referral_bonus: i64,
    /// Number of users shown on the leaderboard.
    pub leaderboard_size: usize,
}

impl Default for RewardRules {
    fn default() -> Self {
        Self {
            earn_amount: 10,
            earn_cooldown_secs: 3600,
            min_withdrawal: 1000,
            referral_bonus: 50,
            leaderboard_size: 10,
        }
    }
}
