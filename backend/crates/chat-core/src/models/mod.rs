pub mod chat_message;
pub mod chat_session;
pub mod inbound_message;
pub mod new_chat_message;
pub mod session_access;
