//! Runtime for executing conversations
//!
//! Each conversation runs as one tokio task fed by an event channel. The
//! pure state machine decides what happens; this module carries it out:
//! transcript writes, pacing timers, fare generation and the booking hand-off.

mod executor;
mod scheduler;
pub mod traits;


pub use executor::ConversationRuntime;
pub use scheduler::{Scheduler, TimerId};
pub use traits::*;

use crate::fares::FareSource;
use crate::state_machine::{ConvContext, ConvState, Event};
use crate::transcript::{Message, MessageStore};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch};

/// Events sent to renderers
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// A message was appended to the transcript
    Message { message: Message },
    /// Typing indicator on or off; input is disabled while on
    Typing { active: bool },
    StateChange { state: String, state_data: Value },
    /// User input was not accepted; nothing changed
    InputRejected { reason: String },
    /// The transcript was replaced wholesale
    Reset { messages: Vec<Message> },
    /// The booking callback was invoked
    Booked { ride_id: String, booking_url: String },
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Conversation runtime has stopped")]
    Stopped,
}

/// Handle to interact with a running conversation
#[derive(Clone)]
pub struct ConversationHandle {
    event_tx: mpsc::Sender<Event>,
    broadcast_tx: broadcast::Sender<UiEvent>,
    state_rx: watch::Receiver<ConvState>,
    transcript: Arc<dyn MessageStore>,
}

impl ConversationHandle {
    /// Submit one user turn
    pub async fn submit(&self, text: impl Into<String>) -> Result<(), RuntimeError> {
        self.send(Event::user_message(text)).await
    }

    /// Start over from the greeting; legal at any time
    pub async fn restart(&self) -> Result<(), RuntimeError> {
        self.send(Event::Restart).await
    }

    async fn send(&self, event: Event) -> Result<(), RuntimeError> {
        self.event_tx
            .send(event)
            .await
            .map_err(|_| RuntimeError::Stopped)
    }

    /// Subscribe to conversation updates
    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.broadcast_tx.subscribe()
    }

    /// Read-only copy of the transcript
    pub async fn messages(&self) -> Vec<Message> {
        self.transcript.snapshot().await
    }

    /// Current conversation state
    pub fn state(&self) -> ConvState {
        self.state_rx.borrow().clone()
    }
}

/// Start a conversation runtime and return its handle
///
/// The greeting is in the transcript before this returns.
pub async fn spawn_conversation<F, B, S>(
    context: ConvContext,
    fares: F,
    booking: B,
    store: S,
) -> ConversationHandle
where
    F: FareSource + 'static,
    B: BookingHandler + 'static,
    S: MessageStore + Clone + 'static,
{
    let (event_tx, event_rx) = mpsc::channel(32);
    let (broadcast_tx, _) = broadcast::channel(256);
    let (state_tx, state_rx) = watch::channel(ConvState::Pickup);

    let transcript: Arc<dyn MessageStore> = Arc::new(store.clone());
    let conv_id = context.conversation_id.clone();

    let mut runtime = ConversationRuntime::new(
        context,
        fares,
        booking,
        store,
        event_rx,
        broadcast_tx.clone(),
        state_tx,
    );
    runtime.greet().await;

    tokio::spawn(async move {
        runtime.run().await;
        tracing::info!(conv_id = %conv_id, "Conversation runtime finished");
    });

    ConversationHandle {
        event_tx,
        broadcast_tx,
        state_rx,
        transcript,
    }
}
