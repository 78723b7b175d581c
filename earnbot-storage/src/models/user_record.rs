//! Per-user ledger record, stored as one value of the ledger JSON object.

use serde::{Deserialize, Serialize};

/// How a withdrawal is paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalMethod {
    PayPal,
}

impl WithdrawalMethod {
    pub fn label(&self) -> &'static str {
        match self {
            WithdrawalMethod::PayPal => "PayPal",
        }
    }
}

/// Points taken off the balance and waiting for a manual payout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub amount: i64,
    pub method: WithdrawalMethod,
    /// Unix seconds.
    pub requested_at: i64,
}

/// One user's points account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub balance: i64,
    /// Unix seconds of the last successful earn; 0 when the user never earned.
    #[serde(default)]
    pub last_earn: i64,
    #[serde(default)]
    pub referrals: u32,
    pub ref_code: String,
    #[serde(default)]
    pub referred_by: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_withdrawal: Option<WithdrawalRequest>,
    #[serde(default)]
    pub withdrawn_total: i64,
}

impl UserRecord {
    /// Fresh account with a zero balance.
    pub fn new(ref_code: String, username: Option<String>) -> Self {
        Self {
            balance: 0,
            last_earn: 0,
            referrals: 0,
            ref_code,
            referred_by: None,
            username,
            pending_withdrawal: None,
            withdrawn_total: 0,
        }
    }

    /// Points earned through referrals under the given per-referral bonus.
    pub fn referral_earnings(&self, referral_bonus: i64) -> i64 {
        i64::from(self.referrals) * referral_bonus
    }
}
