pub mod error;
pub mod models;
pub mod store;

pub use error::{CoreError, Result};
pub use models::chat_message::ChatMessage;
pub use models::chat_session::ChatSession;
pub use models::inbound_message::InboundMessage;
pub use models::new_chat_message::NewChatMessage;
pub use models::session_access::SessionAccess;
pub use store::message_store::MessageStore;
pub use store::session_authorizer::SessionAuthorizer;

#[cfg(test)]
mod tests;
