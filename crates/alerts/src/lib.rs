//! Notifications and price persistence for the ratio bot.
//!
//! This crate provides:
//! - Telegram Bot API integration for notifications
//! - Message formatting for ratio updates and threshold alerts
//! - JSON file storage of the last notified prices

pub mod config;
pub mod notifier;
pub mod store;
pub mod telegram;

pub use config::TelegramConfig;
pub use notifier::{AlertError, AlertSink, LogSink};
pub use store::{PriceStore, StoreError};
pub use telegram::{format_ratio_update, format_threshold_alert, TelegramNotifier};
