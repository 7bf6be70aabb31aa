mod chat_member;
mod role;
mod user;

pub use chat_member::*;
pub use role::*;
pub use user::*;
