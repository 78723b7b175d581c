//! Dispatcher scenarios: ledger effects and replies for each intent.

mod common;

use common::mock_bot::MockBot;
use common::updates::{callback, text};
use earnbot::dispatch::{BotSettings, Dispatcher};
use earnbot::{build_handler_chain, HandlerChain};
use earnbot_core::{HandlerResponse, OutboundAction};
use earnbot_storage::{Ledger, LedgerStore, RewardRules, UserRecord};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

const NOW: i64 = 1_700_000_000;

fn settings() -> BotSettings {
    BotSettings::new(
        RewardRules::default(),
        "earn_bot".to_string(),
        "Earning Bot".to_string(),
    )
}

fn dispatcher() -> Dispatcher {
    Dispatcher::new(settings())
}

fn run(ledger: &mut Ledger, update: &earnbot_core::Update, now: i64) -> Vec<OutboundAction> {
    let mut rng = StdRng::seed_from_u64(7);
    dispatcher().dispatch(ledger, update, now, &mut rng).unwrap()
}

fn with_balance(ledger: &mut Ledger, user_id: i64, balance: i64) {
    let mut record = UserRecord::new(format!("code{:04}", user_id), None);
    record.balance = balance;
    ledger.insert(user_id, record);
}

#[test]
fn test_start_creates_user_and_sends_welcome() {
    let mut ledger = Ledger::new();

    let out = run(&mut ledger, &text(10, Some("alice"), "/start"), NOW);

    let user = ledger.get(10).unwrap();
    assert_eq!(user.balance, 0);
    assert_eq!(user.username.as_deref(), Some("alice"));
    assert_eq!(user.ref_code.len(), 8);
    assert_eq!(out.len(), 1);
    match &out[0] {
        OutboundAction::SendMessage {
            chat_id,
            text,
            keyboard,
        } => {
            assert_eq!(*chat_id, 10);
            assert!(text.contains(&user.ref_code));
            assert!(text.contains("https://t.me/earn_bot?start="));
            assert!(keyboard.as_ref().unwrap().callback_data().contains(&"earn"));
        }
        other => panic!("unexpected action {:?}", other),
    }
}

#[test]
fn test_earn_then_cooldown() {
    let mut ledger = Ledger::new();

    let first = run(&mut ledger, &callback(10, "earn"), NOW);
    let second = run(&mut ledger, &callback(10, "earn"), NOW + 600);

    assert_eq!(ledger.get(10).unwrap().balance, 10);
    assert_eq!(ledger.get(10).unwrap().last_earn, NOW);
    assert_eq!(first[0].name(), "edit_message");
    assert!(first[0].text().unwrap().contains("You earned <b>10 points</b>"));
    assert_eq!(first[1].text(), Some("You earned 10 points!"));
    assert!(second[0].text().unwrap().contains("00:50:00"));
    assert_eq!(
        second[1],
        OutboundAction::AnswerCallback {
            callback_id: "cb-10".to_string(),
            text: Some("Please wait 00:50:00 before earning again".to_string()),
            show_alert: false,
        }
    );

    run(&mut ledger, &callback(10, "earn"), NOW + 3600);
    assert_eq!(ledger.get(10).unwrap().balance, 20);
}

#[test]
fn test_referral_credits_once_and_notifies_referrer() {
    let mut ledger = Ledger::new();
    run(&mut ledger, &text(1, Some("ref"), "/start"), NOW);
    let code = ledger.get(1).unwrap().ref_code.clone();
    let start = format!("/start {}", code);

    let first = run(&mut ledger, &text(2, None, &start), NOW);
    let again = run(&mut ledger, &text(2, None, &start), NOW);

    let referrer = ledger.get(1).unwrap();
    assert_eq!(referrer.balance, 50);
    assert_eq!(referrer.referrals, 1);
    assert_eq!(ledger.get(2).unwrap().referred_by, Some(1));
    assert_eq!(first.len(), 2);
    assert_eq!(
        first[0],
        OutboundAction::SendMessage {
            chat_id: 1,
            text: "🎉 New referral! +50 points bonus!".to_string(),
            keyboard: None,
        }
    );
    assert_eq!(again.len(), 1);
}

#[test]
fn test_text_starting_with_start_gets_welcome() {
    let mut ledger = Ledger::new();

    let out = run(&mut ledger, &text(9, None, "/startabc"), NOW);

    assert_eq!(out.len(), 1);
    assert!(out[0].text().unwrap().contains("Welcome to"));
    assert!(ledger.contains(9));
}

#[test]
fn test_own_code_is_not_a_referral() {
    let mut ledger = Ledger::new();
    run(&mut ledger, &text(1, None, "/start"), NOW);
    let code = ledger.get(1).unwrap().ref_code.clone();

    let out = run(&mut ledger, &text(1, None, &format!("/start {}", code)), NOW);

    assert_eq!(ledger.get(1).unwrap().balance, 0);
    assert_eq!(ledger.get(1).unwrap().referrals, 0);
    assert_eq!(out.len(), 1);
}

#[test]
fn test_balance_and_referral_commands() {
    let mut ledger = Ledger::new();
    with_balance(&mut ledger, 5, 123);

    let balance = run(&mut ledger, &text(5, None, "/balance"), NOW);
    let referral = run(&mut ledger, &text(5, None, "/referral@earn_bot"), NOW);

    assert_eq!(balance[0].text(), Some("💰 Your balance: <b>123</b> points"));
    assert!(referral[0].text().unwrap().contains("<code>code0005</code>"));
}

#[test]
fn test_unknown_text_gets_no_reply() {
    let mut ledger = Ledger::new();

    let out = run(&mut ledger, &text(3, None, "hello there"), NOW);

    assert!(out.is_empty());
    assert!(ledger.contains(3));
}

#[test]
fn test_leaderboard_orders_by_balance() {
    let mut ledger = Ledger::new();
    with_balance(&mut ledger, 1, 5);
    with_balance(&mut ledger, 2, 500);
    with_balance(&mut ledger, 3, 50);

    let out = run(&mut ledger, &callback(1, "leaderboard"), NOW);

    let board = out[0].text().unwrap();
    let second = board.find("User #2").unwrap();
    let third = board.find("User #3").unwrap();
    let first = board.find("User #1").unwrap();
    assert!(second < third && third < first);
    assert!(!board.contains("Your position"));
}

#[test]
fn test_withdraw_menu_never_changes_balance() {
    let mut ledger = Ledger::new();
    with_balance(&mut ledger, 1, 400);
    with_balance(&mut ledger, 2, 1_500);

    let low = run(&mut ledger, &callback(1, "withdraw"), NOW);
    let high = run(&mut ledger, &callback(2, "withdraw"), NOW);

    assert_eq!(ledger.get(1).unwrap().balance, 400);
    assert_eq!(ledger.get(2).unwrap().balance, 1_500);
    assert_eq!(
        low[1],
        OutboundAction::AnswerCallback {
            callback_id: "cb-1".to_string(),
            text: Some("You need 600 more points to withdraw".to_string()),
            show_alert: true,
        }
    );
    match &high[0] {
        OutboundAction::EditMessage { keyboard, .. } => {
            let data = keyboard.as_ref().unwrap().callback_data();
            assert_eq!(data, vec!["withdraw_paypal_2", "main_menu"]);
        }
        other => panic!("unexpected action {:?}", other),
    }
}

#[test]
fn test_paypal_withdrawal_debits_balance_once() {
    let mut ledger = Ledger::new();
    with_balance(&mut ledger, 2, 1_500);

    let first = run(&mut ledger, &callback(2, "withdraw_paypal_2"), NOW);
    let second = run(&mut ledger, &callback(2, "withdraw_paypal_2"), NOW + 5);

    let user = ledger.get(2).unwrap();
    assert_eq!(user.balance, 0);
    assert_eq!(user.withdrawn_total, 1_500);
    assert_eq!(user.pending_withdrawal.as_ref().unwrap().amount, 1_500);
    assert!(first[0].text().unwrap().contains("<b>1500</b> points"));
    assert_eq!(
        first[1].text(),
        Some("Admin will contact you for PayPal withdrawal")
    );
    assert!(second[0].text().unwrap().contains("Withdrawal Pending"));
}

#[test]
fn test_withdraw_button_of_another_account_is_refused() {
    let mut ledger = Ledger::new();
    with_balance(&mut ledger, 2, 1_500);
    with_balance(&mut ledger, 3, 1_500);

    let out = run(&mut ledger, &callback(3, "withdraw_paypal_2"), NOW);

    assert_eq!(ledger.get(2).unwrap().balance, 1_500);
    assert_eq!(ledger.get(3).unwrap().balance, 1_500);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name(), "answer_callback");
}

#[test]
fn test_unknown_callback_is_still_answered() {
    let mut ledger = Ledger::new();

    let out = run(&mut ledger, &callback(4, "bogus"), NOW);

    assert_eq!(out.len(), 1);
    assert_eq!(
        out[0],
        OutboundAction::AnswerCallback {
            callback_id: "cb-4".to_string(),
            text: None,
            show_alert: false,
        }
    );
}

fn chain_with(store: Arc<LedgerStore>, bot: Arc<MockBot>) -> HandlerChain {
    build_handler_chain(store, bot, settings())
}

#[tokio::test]
async fn test_chain_persists_and_delivers() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(LedgerStore::open(dir.path().join("users.json")).unwrap());
    let bot = MockBot::new();
    let chain = chain_with(store.clone(), bot.clone());

    let response = chain.handle(&callback(9, "earn")).await.unwrap();

    assert_eq!(response, HandlerResponse::Stop);
    assert_eq!(store.load().await.unwrap().get(9).unwrap().balance, 10);
    let calls = bot.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].name(), "edit_message");
    assert_eq!(calls[1].name(), "answer_callback");
}

#[tokio::test]
async fn test_failed_delivery_keeps_ledger_change() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(LedgerStore::open(dir.path().join("users.json")).unwrap());
    let bot = MockBot::failing_sends();
    let chain = chain_with(store.clone(), bot.clone());

    let response = chain.handle(&text(9, None, "/start")).await.unwrap();

    assert_eq!(response, HandlerResponse::Stop);
    assert!(store.load().await.unwrap().contains(9));
    assert_eq!(bot.calls().len(), 1);
}

#[tokio::test]
async fn test_corrupt_ledger_fails_update_and_sends_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    std::fs::write(&path, "{not json").unwrap();
    let store = Arc::new(LedgerStore::open(&path).unwrap());
    let bot = MockBot::new();
    let chain = chain_with(store, bot.clone());

    assert!(chain.handle(&callback(9, "earn")).await.is_err());
    assert!(bot.calls().is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{not json");
}
