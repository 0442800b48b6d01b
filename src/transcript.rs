//! Append-only chat transcript
//!
//! The transcript is the outbound display surface: renderers read snapshots,
//! only the runtime appends. A restart replaces it wholesale.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    Bot,
    User,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub author: Author,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(author: Author, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            author,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Author::Bot, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Author::User, text)
    }
}

/// Storage for the conversation transcript
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append a message to the end of the log
    async fn append(&self, message: Message);

    /// Replace the whole log (restart)
    async fn replace(&self, messages: Vec<Message>);

    /// Read-only copy of the log in order
    async fn snapshot(&self) -> Vec<Message>;
}

#[async_trait]
impl<T: MessageStore + ?Sized> MessageStore for Arc<T> {
    async fn append(&self, message: Message) {
        (**self).append(message).await;
    }

    async fn replace(&self, messages: Vec<Message>) {
        (**self).replace(messages).await;
    }

    async fn snapshot(&self) -> Vec<Message> {
        (**self).snapshot().await
    }
}

/// In-memory transcript shared between the runtime and its handle
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Arc<Mutex<Vec<Message>>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Message>> {
        // A poisoned lock only means a reader panicked mid-clone; the data is intact.
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[async_trait]
impl MessageStore for Transcript {
    async fn append(&self, message: Message) {
        self.lock().push(message);
    }

    async fn replace(&self, messages: Vec<Message>) {
        *self.lock() = messages;
    }

    async fn snapshot(&self) -> Vec<Message> {
        self.lock().clone()
    }
}
