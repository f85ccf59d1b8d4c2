pub mod message_store;
pub mod session_authorizer;
