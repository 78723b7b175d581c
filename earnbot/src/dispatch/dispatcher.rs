//! Dispatcher: applies one update to the in-memory ledger and returns the replies to send.
//!
//! Does no I/O: the caller loads and saves the ledger and delivers the actions.

use earnbot_core::{CallbackQuery, IncomingMessage, InlineKeyboard, OutboundAction, Update, UpdateKind};
use earnbot_storage::{
    EarnOutcome, Ledger, ReferralOutcome, StorageError, UserRecord, WithdrawalMethod,
    WithdrawalOutcome,
};
use rand::Rng;
use tracing::{debug, info, warn};

use super::intent::{CallbackIntent, TextIntent};
use super::keyboards::{main_keyboard, withdraw_keyboard};
use super::messages;
use super::settings::BotSettings;

/// Routes updates to ledger operations and reply texts.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    settings: BotSettings,
}

impl Dispatcher {
    pub fn new(settings: BotSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &BotSettings {
        &self.settings
    }

    /// Applies `update` to `ledger` at unix time `now` and returns the outbound actions.
    pub fn dispatch<R: Rng + ?Sized>(
        &self,
        ledger: &mut Ledger,
        update: &Update,
        now: i64,
        rng: &mut R,
    ) -> Result<Vec<OutboundAction>, StorageError> {
        match update.kind() {
            UpdateKind::Message(message) => self.on_message(ledger, message, rng),
            UpdateKind::Callback(callback) => self.on_callback(ledger, callback, now, rng),
            UpdateKind::Other => Ok(Vec::new()),
        }
    }

    fn on_message<R: Rng + ?Sized>(
        &self,
        ledger: &mut Ledger,
        message: &IncomingMessage,
        rng: &mut R,
    ) -> Result<Vec<OutboundAction>, StorageError> {
        let chat_id = message.chat.id;
        ledger.ensure_user(chat_id, message.username(), rng);

        let mut out = Vec::new();
        match TextIntent::parse(message.trimmed_text()) {
            TextIntent::Start { code } => {
                if let Some(code) = code {
                    let outcome =
                        ledger.apply_referral(chat_id, &code, self.settings.rules.referral_bonus);
                    match outcome {
                        ReferralOutcome::Credited { referrer, bonus } => {
                            info!(user_id = chat_id, referrer, bonus, "Referral credited");
                            out.push(send(referrer, messages::new_referral(bonus), None));
                        }
                        other => debug!(user_id = chat_id, outcome = ?other, "Referral not applied"),
                    }
                }
                let user = record_of(ledger, chat_id)?;
                out.push(send(
                    chat_id,
                    messages::welcome(&self.settings, user),
                    Some(main_keyboard()),
                ));
            }
            TextIntent::Balance => {
                let user = record_of(ledger, chat_id)?;
                out.push(send(
                    chat_id,
                    messages::balance_line(user.balance),
                    Some(main_keyboard()),
                ));
            }
            TextIntent::Referral => {
                let user = record_of(ledger, chat_id)?;
                out.push(send(
                    chat_id,
                    messages::referral_program(&self.settings, user, false),
                    Some(main_keyboard()),
                ));
            }
            TextIntent::Unknown => {
                debug!(user_id = chat_id, "Ignoring text without a known command");
            }
        }
        Ok(out)
    }

    fn on_callback<R: Rng + ?Sized>(
        &self,
        ledger: &mut Ledger,
        callback: &CallbackQuery,
        now: i64,
        rng: &mut R,
    ) -> Result<Vec<OutboundAction>, StorageError> {
        let Some(message) = &callback.message else {
            debug!(callback_id = %callback.id, "Callback without message; answering only");
            return Ok(vec![answer(callback, None, false)]);
        };
        let chat_id = message.chat.id;
        let message_id = message.message_id;
        let edit = |text: String, keyboard: InlineKeyboard| OutboundAction::EditMessage {
            chat_id,
            message_id,
            text,
            keyboard: Some(keyboard),
        };

        ledger.ensure_user(chat_id, callback.username(), rng);

        let rules = &self.settings.rules;
        let intent = CallbackIntent::parse(callback.data.as_deref().unwrap_or(""));
        debug!(user_id = chat_id, action = intent.name(), "Dispatching callback");

        let out = match intent {
            CallbackIntent::Earn => match ledger.try_earn(chat_id, now, rules)? {
                EarnOutcome::Earned { amount, balance } => {
                    info!(user_id = chat_id, amount, balance, "Points earned");
                    vec![
                        edit(
                            messages::earned(amount, balance, rules.earn_cooldown_secs),
                            main_keyboard(),
                        ),
                        answer(callback, Some(messages::earned_toast(amount)), false),
                    ]
                }
                EarnOutcome::CoolingDown {
                    remaining_secs,
                    balance,
                } => vec![
                    edit(
                        messages::cooling_down(remaining_secs, balance),
                        main_keyboard(),
                    ),
                    answer(
                        callback,
                        Some(messages::cooling_down_toast(remaining_secs)),
                        false,
                    ),
                ],
            },
            CallbackIntent::Balance => {
                let user = record_of(ledger, chat_id)?;
                vec![
                    edit(messages::balance_info(&self.settings, user), main_keyboard()),
                    answer(callback, None, false),
                ]
            }
            CallbackIntent::Leaderboard => {
                let board = ledger.leaderboard(chat_id, rules.leaderboard_size);
                vec![
                    edit(messages::leaderboard(&board), main_keyboard()),
                    answer(callback, None, false),
                ]
            }
            CallbackIntent::Referrals => {
                let user = record_of(ledger, chat_id)?;
                vec![
                    edit(
                        messages::referral_program(&self.settings, user, true),
                        main_keyboard(),
                    ),
                    answer(callback, None, false),
                ]
            }
            CallbackIntent::Withdraw => {
                let balance = record_of(ledger, chat_id)?.balance;
                match ledger.withdrawal_shortfall(chat_id, rules)? {
                    None => vec![
                        edit(
                            messages::withdraw_menu(balance, rules.min_withdrawal),
                            withdraw_keyboard(chat_id),
                        ),
                        answer(callback, None, false),
                    ],
                    Some(shortfall) => vec![
                        edit(
                            messages::withdraw_unavailable(balance, rules.min_withdrawal),
                            main_keyboard(),
                        ),
                        answer(callback, Some(messages::shortfall_alert(shortfall)), true),
                    ],
                }
            }
            CallbackIntent::WithdrawPaypal { account } if account != chat_id => {
                warn!(user_id = chat_id, account, "Withdrawal button used by another account");
                vec![answer(
                    callback,
                    Some(messages::foreign_withdrawal_alert()),
                    true,
                )]
            }
            CallbackIntent::WithdrawPaypal { .. } => {
                let method = WithdrawalMethod::PayPal;
                match ledger.request_withdrawal(chat_id, method, now, rules)? {
                    WithdrawalOutcome::Requested { amount } => {
                        info!(user_id = chat_id, amount, method = method.label(), "Withdrawal requested");
                        vec![
                            edit(messages::withdrawal_requested(amount, method), main_keyboard()),
                            answer(
                                callback,
                                Some(messages::withdrawal_requested_alert(method)),
                                true,
                            ),
                        ]
                    }
                    WithdrawalOutcome::AlreadyPending { amount } => vec![
                        edit(messages::withdrawal_pending(amount), main_keyboard()),
                        answer(callback, None, false),
                    ],
                    WithdrawalOutcome::BelowMinimum { shortfall } => {
                        let balance = record_of(ledger, chat_id)?.balance;
                        vec![
                            edit(
                                messages::withdraw_unavailable(balance, rules.min_withdrawal),
                                main_keyboard(),
                            ),
                            answer(callback, Some(messages::shortfall_alert(shortfall)), true),
                        ]
                    }
                }
            }
            CallbackIntent::Help => vec![
                edit(messages::help(&self.settings), main_keyboard()),
                answer(callback, None, false),
            ],
            CallbackIntent::MainMenu => vec![
                edit(messages::welcome_back(&self.settings), main_keyboard()),
                answer(callback, None, false),
            ],
            CallbackIntent::Unknown(data) => {
                debug!(user_id = chat_id, data = %data, "Unknown callback data");
                vec![answer(callback, None, false)]
            }
        };
        Ok(out)
    }
}

fn record_of(ledger: &Ledger, user_id: i64) -> Result<&UserRecord, StorageError> {
    ledger.get(user_id).ok_or(StorageError::UnknownUser(user_id))
}

fn send(chat_id: i64, text: String, keyboard: Option<InlineKeyboard>) -> OutboundAction {
    OutboundAction::SendMessage {
        chat_id,
        text,
        keyboard,
    }
}

fn answer(callback: &CallbackQuery, text: Option<String>, show_alert: bool) -> OutboundAction {
    OutboundAction::AnswerCallback {
        callback_id: callback.id.clone(),
        text,
        show_alert,
    }
}
