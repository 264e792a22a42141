pub mod errors;
pub mod id;

pub use errors::{ConfigError, TypistError};
pub use id::{new_id, ChannelId, MessageId, SessionId, UserId};

pub type Result<T> = std::result::Result<T, TypistError>;
