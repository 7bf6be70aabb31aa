use std::time::Duration;

/// Default chat platform API domain
pub static API_DOMAIN: &str = "https://api.telegram.org";

/// Route the webhook service listens on
pub static WEBHOOK_PATH: &str = "/user/webhook";

/// Header carrying the shared webhook secret
pub static HEADER_SECRET_TOKEN: &str = "X-Telegram-Bot-Api-Secret-Token";

/// Prefix that turns a text message into the start command
pub static START_COMMAND: &str = "/start";

/// Upper bound for one membership lookup
pub const MEMBERSHIP_TIMEOUT: Duration = Duration::from_secs(5);

/// 1 MB
pub const DEFAULT_BODY_SIZE: usize = 1024 * 1024;

pub static DEFAULT_DATABASE_PATH: &str = "./servidorgame.db";
