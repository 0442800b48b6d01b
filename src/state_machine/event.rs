//! Events that can occur in a conversation

use crate::fares::RideOption;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    UserMessage { text: String },
    Restart,

    // Search events
    /// Raw quotes from the fare source, not yet filtered or sorted
    FaresReady { options: Vec<RideOption> },
}

impl Event {
    pub fn user_message(text: impl Into<String>) -> Self {
        Event::UserMessage { text: text.into() }
    }
}
