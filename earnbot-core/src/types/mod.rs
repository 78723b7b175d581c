//! Core types: inbound update, inline keyboard, outbound action, handler response, and Handler trait.
//!
//! One file per main type.

mod handler;
mod keyboard;
mod outbound;
mod response;
mod update;

pub use handler::Handler;
pub use keyboard::{InlineButton, InlineKeyboard};
pub use outbound::OutboundAction;
pub use response::HandlerResponse;
pub use update::{CallbackMessage, CallbackQuery, Chat, IncomingMessage, Sender, Update, UpdateKind};
