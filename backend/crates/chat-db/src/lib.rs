pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::pool::{MIGRATOR, open_in_memory_pool, open_pool};
pub use error::{DbError, Result};
pub use repositories::chat_message_repository::ChatMessageRepository;
pub use repositories::chat_session_repository::ChatSessionRepository;
