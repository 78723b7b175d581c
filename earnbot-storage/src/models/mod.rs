mod leaderboard;
mod ledger;
mod rules;
mod user_record;

pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use ledger::{EarnOutcome, Ledger, ReferralOutcome, WithdrawalOutcome, REF_CODE_LEN};
pub use rules::RewardRules;
pub use user_record::{UserRecord, WithdrawalMethod, WithdrawalRequest};
