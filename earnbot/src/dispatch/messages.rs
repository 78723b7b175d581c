//! Reply texts (Telegram HTML).

use earnbot_storage::{Leaderboard, UserRecord, WithdrawalMethod};
use teloxide::utils::html::escape;

use super::settings::BotSettings;

/// Formats seconds as `HH:MM:SS`; hours are not wrapped at 24.
pub fn format_duration(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// `@username`, or `User #id` for users without one. HTML-escaped.
pub fn display_name(user_id: i64, username: Option<&str>) -> String {
    match username {
        Some(name) if !name.is_empty() => format!("@{}", escape(name)),
        _ => format!("User #{}", user_id),
    }
}

pub fn welcome(settings: &BotSettings, user: &UserRecord) -> String {
    let rules = &settings.rules;
    format!(
        "👋 Welcome to <b>{name}</b>!\n\n\
         💰 <b>Earn points</b> with the Earn button\n\
         👥 <b>Invite friends</b> with your referral link and get {bonus} points for each referral\n\
         💵 <b>Withdraw</b> your earnings once you reach {min} points\n\n\
         🔹 Your referral code: <code>{code}</code>\n\
         🔹 Share your link: {link}",
        name = escape(&settings.display_name),
        bonus = rules.referral_bonus,
        min = rules.min_withdrawal,
        code = user.ref_code,
        link = settings.share_link(&user.ref_code),
    )
}

pub fn welcome_back(settings: &BotSettings) -> String {
    format!(
        "👋 Welcome back to <b>{name}</b>!\n\n\
         💰 <b>Earn points</b> with the Earn button\n\
         👥 <b>Invite friends</b> with your referral link\n\
         💵 <b>Withdraw</b> your earnings once you reach {min} points",
        name = escape(&settings.display_name),
        min = settings.rules.min_withdrawal,
    )
}

pub fn new_referral(bonus: i64) -> String {
    format!("🎉 New referral! +{} points bonus!", bonus)
}

pub fn balance_line(balance: i64) -> String {
    format!("💰 Your balance: <b>{}</b> points", balance)
}

pub fn balance_info(settings: &BotSettings, user: &UserRecord) -> String {
    let rules = &settings.rules;
    let mut text = format!(
        "💰 <b>Balance Information</b>\n\n\
         🔹 Current balance: <b>{balance}</b> points\n\
         🔹 Minimum withdrawal: <b>{min}</b> points\n\
         🔹 Referral earnings: <b>{earned}</b> points",
        balance = user.balance,
        min = rules.min_withdrawal,
        earned = user.referral_earnings(rules.referral_bonus),
    );
    if let Some(pending) = &user.pending_withdrawal {
        text.push_str(&format!(
            "\n🔹 Pending withdrawal: <b>{}</b> points",
            pending.amount
        ));
    }
    text
}

/// Referral program summary; `with_earnings` adds the points earned so far.
pub fn referral_program(settings: &BotSettings, user: &UserRecord, with_earnings: bool) -> String {
    let bonus = settings.rules.referral_bonus;
    let mut text = format!(
        "👥 <b>Referral Program</b>\n\n\
         🔹 Your referral code: <code>{code}</code>\n\
         🔹 Total referrals: <b>{count}</b>\n",
        code = user.ref_code,
        count = user.referrals,
    );
    if with_earnings {
        text.push_str(&format!(
            "🔹 Earned from referrals: <b>{}</b> points\n",
            user.referral_earnings(bonus)
        ));
    }
    text.push_str(&format!(
        "🔹 Share your link: {}\n\n💸 You earn <b>{} points</b> for each referral!",
        settings.share_link(&user.ref_code),
        bonus,
    ));
    text
}

pub fn earned(amount: i64, balance: i64, cooldown_secs: i64) -> String {
    format!(
        "✅ You earned <b>{amount} points</b>!\n\
         💰 Your balance: <b>{balance}</b> points\n\n\
         ⏳ Next earning available in {wait}",
        wait = format_duration(cooldown_secs),
    )
}

pub fn earned_toast(amount: i64) -> String {
    format!("You earned {} points!", amount)
}

pub fn cooling_down(remaining_secs: i64, balance: i64) -> String {
    format!(
        "⏳ Please wait <b>{wait}</b> before earning again\n\n\
         💰 Your balance: <b>{balance}</b> points",
        wait = format_duration(remaining_secs),
    )
}

pub fn cooling_down_toast(remaining_secs: i64) -> String {
    format!(
        "Please wait {} before earning again",
        format_duration(remaining_secs)
    )
}

pub fn leaderboard(board: &Leaderboard) -> String {
    let mut text = String::from("🏆 <b>Top Leaderboard</b>\n\n");
    if board.entries.is_empty() {
        text.push_str("No users yet.\n");
    }
    for entry in &board.entries {
        text.push_str(&format!(
            "{}. {} - <b>{}</b> points\n",
            entry.position,
            display_name(entry.user_id, entry.username.as_deref()),
            entry.balance,
        ));
    }
    if let Some(position) = board.requester_position {
        text.push_str(&format!(
            "\nYour position: <b>{}</b> of {}",
            position, board.total_users
        ));
    }
    text
}

pub fn withdraw_menu(balance: i64, min_withdrawal: i64) -> String {
    format!(
        "🏧 <b>Withdrawal Options</b>\n\n\
         💰 Your balance: <b>{balance}</b> points\n\
         🔹 Minimum withdrawal: <b>{min_withdrawal}</b> points\n\n\
         Select withdrawal method:"
    )
}

pub fn withdraw_unavailable(balance: i64, min_withdrawal: i64) -> String {
    format!(
        "⚠️ <b>Withdrawal Not Available</b>\n\n\
         You need at least <b>{min_withdrawal}</b> points to withdraw.\n\
         💰 Your current balance: <b>{balance}</b> points\n\n\
         Keep earning to reach the minimum amount!"
    )
}

pub fn shortfall_alert(shortfall: i64) -> String {
    format!("You need {} more points to withdraw", shortfall)
}

pub fn withdrawal_requested(amount: i64, method: WithdrawalMethod) -> String {
    format!(
        "📝 <b>{method} Withdrawal</b>\n\n\
         Your request has been recorded. Please send your {method} email to the bot admin.\n\n\
         💰 Withdrawal amount: <b>{amount}</b> points\n\
         👤 Your balance has been reset to <b>0</b> points.",
        method = method.label(),
    )
}

pub fn withdrawal_requested_alert(method: WithdrawalMethod) -> String {
    format!(
        "Admin will contact you for {} withdrawal",
        method.label()
    )
}

pub fn withdrawal_pending(amount: i64) -> String {
    format!(
        "⏳ <b>Withdrawal Pending</b>\n\n\
         You already have a pending withdrawal of <b>{}</b> points.\n\
         The admin will contact you to complete it.",
        amount
    )
}

pub fn foreign_withdrawal_alert() -> String {
    "This withdrawal button belongs to another account".to_string()
}

pub fn help(settings: &BotSettings) -> String {
    let rules = &settings.rules;
    format!(
        "❓ <b>Help Center</b>\n\n\
         💰 <b>Earning Points</b>\n\
         - Press the Earn button to get {amount} points\n\
         - Wait {cooldown} between earnings\n\n\
         👥 <b>Referral Program</b>\n\
         - Share your referral link to earn {bonus} points per referral\n\
         - You can find your link in the Referrals section\n\n\
         💵 <b>Withdrawals</b>\n\
         - Minimum withdrawal: {min} points\n\
         - Currently only PayPal withdrawals are available\n\n\
         📊 <b>Leaderboard</b>\n\
         - Check the top {top} users by points balance",
        amount = rules.earn_amount,
        cooldown = format_duration(rules.earn_cooldown_secs),
        bonus = rules.referral_bonus,
        min = rules.min_withdrawal,
        top = rules.leaderboard_size,
    )
}
