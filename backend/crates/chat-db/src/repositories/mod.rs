pub mod chat_message_repository;
pub mod chat_session_repository;

mod row;
