// Telegram Bot API over HTTPS long polling

pub mod api;
pub mod error;
pub mod types;

pub use api::BotApi;
pub use error::{Error, Result};
pub use types::{Chat, Message, Update, User};
