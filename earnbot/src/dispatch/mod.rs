//! Intent dispatch: parses commands and callback data, applies them to the ledger, renders replies.

mod dispatcher;
mod intent;
mod keyboards;
pub mod messages;
mod settings;

pub use dispatcher::Dispatcher;
pub use intent::{CallbackIntent, TextIntent, WITHDRAW_PAYPAL_PREFIX};
pub use keyboards::{main_keyboard, withdraw_keyboard};
pub use settings::BotSettings;
