//! Conversation runtime executor

use super::scheduler::{Scheduler, TimerId};
use super::traits::BookingHandler;
use super::UiEvent;
use crate::fares::FareSource;
use crate::state_machine::{replies, transition, ConvContext, ConvState, Effect, Event};
use crate::transcript::{Message, MessageStore};
use std::collections::VecDeque;
use tokio::sync::{broadcast, mpsc, watch};

/// Generic conversation runtime that can work with any fare source, booking
/// handler and transcript store
pub struct ConversationRuntime<F, B, S>
where
    F: FareSource + 'static,
    B: BookingHandler + 'static,
    S: MessageStore + 'static,
{
    context: ConvContext,
    state: ConvState,
    fares: F,
    booking: B,
    store: S,
    event_rx: mpsc::Receiver<Event>,
    broadcast_tx: broadcast::Sender<UiEvent>,
    state_tx: watch::Sender<ConvState>,
    scheduler: Scheduler,
    /// Effects held back until the pending typing timer fires
    parked: VecDeque<Effect>,
}

impl<F, B, S> ConversationRuntime<F, B, S>
where
    F: FareSource + 'static,
    B: BookingHandler + 'static,
    S: MessageStore + 'static,
{
    pub fn new(
        context: ConvContext,
        fares: F,
        booking: B,
        store: S,
        event_rx: mpsc::Receiver<Event>,
        broadcast_tx: broadcast::Sender<UiEvent>,
        state_tx: watch::Sender<ConvState>,
    ) -> Self {
        Self {
            context,
            state: ConvState::Pickup,
            fares,
            booking,
            store,
            event_rx,
            broadcast_tx,
            state_tx,
            scheduler: Scheduler::new(),
            parked: VecDeque::new(),
        }
    }

    /// Put the opening greeting in place before any input is accepted
    pub async fn greet(&mut self) {
        self.run_effects(vec![
            Effect::ResetTranscript {
                greeting: replies::GREETING.to_string(),
            },
            Effect::NotifyState,
        ])
        .await;
    }

    pub async fn run(mut self) {
        tracing::info!(conv_id = %self.context.conversation_id, "Starting conversation runtime");

        loop {
            tokio::select! {
                event = self.event_rx.recv() => match event {
                    Some(event) => self.process_event(event).await,
                    None => break,
                },
                Some(id) = self.scheduler.fired() => self.resume(id).await,
            }
        }

        self.scheduler.cancel();
        tracing::info!(conv_id = %self.context.conversation_id, "Conversation runtime stopped");
    }

    async fn process_event(&mut self, event: Event) {
        // Input is disabled while the bot is "typing"
        if matches!(event, Event::UserMessage { .. }) && self.scheduler.is_pending() {
            tracing::debug!(state = self.state.name(), "Input rejected while a reply is pending");
            self.reject("Please wait, RideGuide is still replying");
            return;
        }

        self.apply(event).await;
    }

    async fn apply(&mut self, event: Event) {
        match transition(&self.state, &self.context, event) {
            Ok(result) => {
                let from = self.state.name();
                self.state = result.new_state;
                if from != self.state.name() {
                    tracing::info!(
                        conv_id = %self.context.conversation_id,
                        from,
                        to = self.state.name(),
                        "State transition"
                    );
                }
                self.run_effects(result.effects).await;
            }
            Err(e) => {
                tracing::debug!(state = self.state.name(), error = %e, "Event rejected");
                self.reject(&e.to_string());
            }
        }
    }

    /// A pacing timer fired: continue with the parked effects
    async fn resume(&mut self, id: TimerId) {
        if !self.scheduler.complete(id) {
            tracing::trace!("Ignoring stale timer");
            return;
        }
        let _ = self.broadcast_tx.send(UiEvent::Typing { active: false });
        let parked = std::mem::take(&mut self.parked);
        self.run_effects(parked).await;
    }

    /// Execute effects in order until one needs to wait on a timer
    async fn run_effects(&mut self, effects: impl IntoIterator<Item = Effect>) {
        let mut queue: VecDeque<Effect> = effects.into_iter().collect();

        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Typing { delay } if delay.is_zero() => {}
                Effect::Typing { delay } => {
                    self.parked = queue;
                    self.scheduler.schedule(delay);
                    let _ = self.broadcast_tx.send(UiEvent::Typing { active: true });
                    return;
                }
                other => {
                    let Some(follow_up) = self.execute_effect(other).await else {
                        continue;
                    };
                    match transition(&self.state, &self.context, follow_up) {
                        Ok(result) => {
                            tracing::info!(
                                conv_id = %self.context.conversation_id,
                                from = self.state.name(),
                                to = result.new_state.name(),
                                "State transition"
                            );
                            self.state = result.new_state;
                            let rest = std::mem::take(&mut queue);
                            queue = result.effects.into_iter().chain(rest).collect();
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Follow-up event rejected");
                        }
                    }
                }
            }
        }
    }

    /// Execute one effect and optionally return a generated event
    async fn execute_effect(&mut self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::UserMessage { text } => {
                self.append(Message::user(text)).await;
                None
            }

            Effect::BotMessage { text } => {
                self.append(Message::bot(text)).await;
                None
            }

            Effect::SearchFares { trip } => {
                let options = self.fares.quote(&trip);
                tracing::info!(
                    conv_id = %self.context.conversation_id,
                    count = options.len(),
                    passengers = ?trip.passengers,
                    "Fares generated"
                );
                Some(Event::FaresReady { options })
            }

            Effect::BookRide {
                ride_id,
                booking_url,
            } => {
                tracing::info!(
                    conv_id = %self.context.conversation_id,
                    ride_id = %ride_id,
                    url = %booking_url,
                    "Handing off booking"
                );
                self.booking.book(&ride_id, &booking_url);
                let _ = self.broadcast_tx.send(UiEvent::Booked {
                    ride_id,
                    booking_url,
                });
                None
            }

            Effect::CancelTimers => {
                self.parked.clear();
                if self.scheduler.cancel() {
                    let _ = self.broadcast_tx.send(UiEvent::Typing { active: false });
                }
                None
            }

            Effect::ResetTranscript { greeting } => {
                let messages = vec![Message::bot(greeting)];
                self.store.replace(messages.clone()).await;
                let _ = self.broadcast_tx.send(UiEvent::Reset { messages });
                None
            }

            Effect::NotifyState => {
                self.state_tx.send_replace(self.state.clone());
                let state_data = serde_json::to_value(&self.state).unwrap_or_default();
                let _ = self.broadcast_tx.send(UiEvent::StateChange {
                    state: self.state.name().to_string(),
                    state_data,
                });
                None
            }

            // Zero-length pauses are filtered out by the caller
            Effect::Typing { .. } => None,
        }
    }

    async fn append(&mut self, message: Message) {
        self.store.append(message.clone()).await;
        let _ = self.broadcast_tx.send(UiEvent::Message { message });
    }

    fn reject(&self, reason: &str) {
        let _ = self.broadcast_tx.send(UiEvent::InputRejected {
            reason: reason.to_string(),
        });
    }
}
