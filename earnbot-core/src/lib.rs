//! # earnbot-core
//!
//! Core types and traits for the earning bot: the inbound [`Update`] model, inline keyboards,
//! [`OutboundAction`], the [`Bot`] and [`Handler`] traits, error types and tracing initialization.
//! Transport-agnostic; the Telegram implementation lives in the `earnbot` crate.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{deliver_all, parse_message_id, Bot};
pub use error::{EarnbotError, Result};
pub use logger::init_tracing;
pub use types::{
    CallbackMessage, CallbackQuery, Chat, Handler, HandlerResponse, IncomingMessage, InlineButton,
    InlineKeyboard, OutboundAction, Sender, Update, UpdateKind,
};
