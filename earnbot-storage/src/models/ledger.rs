//! The whole user set plus the bookkeeping operations applied to it.
//!
//! Serialized as one JSON object `{"<user id>": UserRecord, ...}`. Key order is preserved both
//! ways, and the leaderboard uses it to break ties.

use std::collections::HashMap;
use std::fmt;

use rand::Rng;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use super::leaderboard::{Leaderboard, LeaderboardEntry};
use super::rules::RewardRules;
use super::user_record::{UserRecord, WithdrawalMethod, WithdrawalRequest};
use crate::error::StorageError;

/// Length of generated referral codes.
pub const REF_CODE_LEN: usize = 8;
const REF_CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Result of [`Ledger::try_earn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EarnOutcome {
    Earned { amount: i64, balance: i64 },
    CoolingDown { remaining_secs: i64, balance: i64 },
}

/// Result of [`Ledger::apply_referral`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferralOutcome {
    Credited { referrer: i64, bonus: i64 },
    AlreadyReferred,
    UnknownCode,
    SelfReferral,
    UnknownUser,
}

/// Result of [`Ledger::request_withdrawal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WithdrawalOutcome {
    Requested { amount: i64 },
    BelowMinimum { shortfall: i64 },
    AlreadyPending { amount: i64 },
}

/// Insertion-ordered map of user id to [`UserRecord`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    users: Vec<(i64, UserRecord)>,
    index: HashMap<i64, usize>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains(&self, user_id: i64) -> bool {
        self.index.contains_key(&user_id)
    }

    pub fn get(&self, user_id: i64) -> Option<&UserRecord> {
        self.index.get(&user_id).map(|&i| &self.users[i].1)
    }

    pub fn get_mut(&mut self, user_id: i64) -> Option<&mut UserRecord> {
        match self.index.get(&user_id) {
            Some(&i) => Some(&mut self.users[i].1),
            None => None,
        }
    }

    /// Users in ledger order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &UserRecord)> {
        self.users.iter().map(|(id, record)| (*id, record))
    }

    /// Inserts or replaces a record. New ids are appended.
    pub fn insert(&mut self, user_id: i64, record: UserRecord) {
        match self.index.get(&user_id) {
            Some(&i) => self.users[i].1 = record,
            None => {
                self.index.insert(user_id, self.users.len());
                self.users.push((user_id, record));
            }
        }
    }

    /// Sum of all balances.
    pub fn total_balance(&self) -> i64 {
        self.users.iter().map(|(_, r)| r.balance).sum()
    }

    /// Points moved out of balances by withdrawal requests.
    pub fn total_withdrawn(&self) -> i64 {
        self.users.iter().map(|(_, r)| r.withdrawn_total).sum()
    }

    /// Owner of `code`, if any.
    pub fn find_by_ref_code(&self, code: &str) -> Option<i64> {
        self.users
            .iter()
            .find(|(_, r)| r.ref_code == code)
            .map(|(id, _)| *id)
    }

    /// Returns the user's record, creating it with a unique referral code if missing.
    /// A known user's username is refreshed when `username` is set and differs.
    pub fn ensure_user<R: Rng + ?Sized>(
        &mut self,
        user_id: i64,
        username: Option<&str>,
        rng: &mut R,
    ) -> &mut UserRecord {
        let slot = match self.index.get(&user_id) {
            Some(&i) => i,
            None => {
                let code = self.generate_ref_code(rng);
                self.insert(user_id, UserRecord::new(code, username.map(str::to_owned)));
                tracing::debug!(user_id, "Created ledger record");
                self.users.len() - 1
            }
        };
        let record = &mut self.users[slot].1;
        if let Some(name) = username {
            if record.username.as_deref() != Some(name) {
                record.username = Some(name.to_owned());
            }
        }
        record
    }

    /// Random code that no user in the ledger holds yet.
    fn generate_ref_code<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        loop {
            let code: String = (0..REF_CODE_LEN)
                .map(|_| REF_CODE_ALPHABET[rng.gen_range(0..REF_CODE_ALPHABET.len())] as char)
                .collect();
            if self.find_by_ref_code(&code).is_none() {
                return code;
            }
        }
    }

    /// Attributes `user_id` to the owner of `code` and credits the owner with `bonus`.
    /// A user is attributed at most once and never to themselves.
    pub fn apply_referral(&mut self, user_id: i64, code: &str, bonus: i64) -> ReferralOutcome {
        let Some(user) = self.get(user_id) else {
            return ReferralOutcome::UnknownUser;
        };
        if user.referred_by.is_some() {
            return ReferralOutcome::AlreadyReferred;
        }
        let Some(referrer) = self.find_by_ref_code(code) else {
            return ReferralOutcome::UnknownCode;
        };
        if referrer == user_id {
            return ReferralOutcome::SelfReferral;
        }

        if let Some(user) = self.get_mut(user_id) {
            user.referred_by = Some(referrer);
        }
        if let Some(owner) = self.get_mut(referrer) {
            owner.referrals += 1;
            owner.balance += bonus;
        }
        ReferralOutcome::Credited { referrer, bonus }
    }

    /// Credits `earn_amount` if at least `earn_cooldown_secs` passed since the last earn.
    pub fn try_earn(
        &mut self,
        user_id: i64,
        now: i64,
        rules: &RewardRules,
    ) -> Result<EarnOutcome, StorageError> {
        let user = self
            .get_mut(user_id)
            .ok_or(StorageError::UnknownUser(user_id))?;
        let elapsed = now.saturating_sub(user.last_earn);
        if elapsed >= rules.earn_cooldown_secs {
            user.balance += rules.earn_amount;
            user.last_earn = now;
            Ok(EarnOutcome::Earned {
                amount: rules.earn_amount,
                balance: user.balance,
            })
        } else {
            // A last_earn in the future (clock skew) waits at most one full cooldown.
            let remaining_secs =
                (rules.earn_cooldown_secs - elapsed).clamp(0, rules.earn_cooldown_secs);
            Ok(EarnOutcome::CoolingDown {
                remaining_secs,
                balance: user.balance,
            })
        }
    }

    /// Points still missing before a withdrawal is allowed; `None` at or above the minimum.
    pub fn withdrawal_shortfall(
        &self,
        user_id: i64,
        rules: &RewardRules,
    ) -> Result<Option<i64>, StorageError> {
        let user = self.get(user_id).ok_or(StorageError::UnknownUser(user_id))?;
        if user.balance >= rules.min_withdrawal {
            Ok(None)
        } else {
            Ok(Some(rules.min_withdrawal - user.balance))
        }
    }

    /// Moves the whole balance into a pending withdrawal request.
    pub fn request_withdrawal(
        &mut self,
        user_id: i64,
        method: WithdrawalMethod,
        now: i64,
        rules: &RewardRules,
    ) -> Result<WithdrawalOutcome, StorageError> {
        let user = self
            .get_mut(user_id)
            .ok_or(StorageError::UnknownUser(user_id))?;
        if let Some(pending) = &user.pending_withdrawal {
            return Ok(WithdrawalOutcome::AlreadyPending {
                amount: pending.amount,
            });
        }
        if user.balance < rules.min_withdrawal {
            return Ok(WithdrawalOutcome::BelowMinimum {
                shortfall: rules.min_withdrawal - user.balance,
            });
        }

        let amount = user.balance;
        user.balance = 0;
        user.withdrawn_total += amount;
        user.pending_withdrawal = Some(WithdrawalRequest {
            amount,
            method,
            requested_at: now,
        });
        Ok(WithdrawalOutcome::Requested { amount })
    }

    /// Top `size` users by balance (descending, ties in ledger order) and the requester's rank.
    pub fn leaderboard(&self, requester: i64, size: usize) -> Leaderboard {
        let mut ranked: Vec<(i64, &UserRecord)> = self.iter().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.balance.cmp(&a.1.balance));

        let entries: Vec<LeaderboardEntry> = ranked
            .iter()
            .take(size)
            .enumerate()
            .map(|(i, (id, record))| LeaderboardEntry {
                position: i + 1,
                user_id: *id,
                username: record.username.clone(),
                balance: record.balance,
            })
            .collect();

        let requester_position = if entries.iter().any(|e| e.user_id == requester) {
            None
        } else {
            ranked
                .iter()
                .position(|(id, _)| *id == requester)
                .map(|p| p + 1)
        };

        Leaderboard {
            entries,
            requester_position,
            total_users: ranked.len(),
        }
    }
}

impl Serialize for Ledger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.users.iter().map(|(id, record)| (id.to_string(), record)))
    }
}

impl<'de> Deserialize<'de> for Ledger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LedgerVisitor)
    }
}

struct LedgerVisitor;

impl<'de> Visitor<'de> for LedgerVisitor {
    type Value = Ledger;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of user id to user record")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Ledger, A::Error> {
        let mut ledger = Ledger::new();
        while let Some((key, record)) = map.next_entry::<String, UserRecord>()? {
            let id: i64 = key
                .parse()
                .map_err(|_| de::Error::custom(format!("invalid user id key: {}", key)))?;
            if ledger.contains(id) {
                return Err(de::Error::custom(format!("duplicate user id: {}", id)));
            }
            ledger.insert(id, record);
        }
        Ok(ledger)
    }

    /// An empty ledger written by older deployments is `[]`.
    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Ledger, A::Error> {
        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(1, &self));
        }
        Ok(Ledger::new())
    }
}
