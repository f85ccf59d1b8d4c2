mod chat_message;
mod inbound_message;
