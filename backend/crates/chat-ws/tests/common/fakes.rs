#![allow(dead_code)]

use chat_core::{
    ChatMessage, CoreError, MessageStore, NewChatMessage, Result as CoreResult, SessionAccess,
    SessionAuthorizer,
};

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

/// Message store kept in memory. Can be switched into a failing mode.
#[derive(Default)]
pub struct InMemoryStore {
    messages: Mutex<Vec<ChatMessage>>,
    failing: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub fn messages_in(&self, session_id: Uuid) -> Vec<ChatMessage> {
        self.messages()
            .into_iter()
            .filter(|m| m.session_id == session_id)
            .collect()
    }
}

#[async_trait]
impl MessageStore for InMemoryStore {
    async fn append(&self, draft: NewChatMessage) -> CoreResult<ChatMessage> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CoreError::storage("database is locked"));
        }

        let message = ChatMessage {
            id: Uuid::new_v4(),
            session_id: draft.session_id,
            sender_id: draft.sender_id,
            content: draft.content,
            file_url: draft.file_url,
            is_ai_message: draft.is_ai_message,
            created_at: Utc::now(),
        };
        self.messages.lock().unwrap().push(message.clone());
        Ok(message)
    }
}

/// Authorizer backed by an explicit grant table.
#[derive(Default)]
pub struct StaticAuthorizer {
    grants: Mutex<HashMap<(Uuid, Uuid), SessionAccess>>,
    failing: AtomicBool,
}

impl StaticAuthorizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&self, user_id: Uuid, session_id: Uuid, access: SessionAccess) {
        self.grants
            .lock()
            .unwrap()
            .insert((user_id, session_id), access);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl SessionAuthorizer for StaticAuthorizer {
    async fn authorize(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> CoreResult<Option<SessionAccess>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CoreError::storage("connection refused"));
        }
        Ok(self
            .grants
            .lock()
            .unwrap()
            .get(&(user_id, session_id))
            .copied())
    }
}
