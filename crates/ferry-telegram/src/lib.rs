//! # ferry-telegram
//!
//! The Telegram side of Ferry: a small Bot API client, the command router,
//! and the owner-only front-end that publishes task mutations on the
//! [`ferry_sync::bus::ListenerBus`] and re-sends the task board.

pub mod client;
pub mod command;
pub mod front;
pub mod poller;
pub mod types;

mod error;

pub use client::{BotClient, OwnerChat};
pub use command::Command;
pub use error::TelegramError;
pub use front::ChatFrontEnd;
pub use poller::run_polling;
