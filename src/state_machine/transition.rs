//! Pure state transition function
//!
//! Given the same state, context and event this always produces the same
//! new state and effect list. Timers, fare generation and the booking
//! callback are all effects executed by the runtime.

use super::replies;
use super::state::{Pacing, TripRequest, MAX_PASSENGERS, MIN_PASSENGERS};
use super::{ConvContext, ConvState, Effect, Event};
use crate::fares::RideOptionSet;
use crate::selection::{leading_integer, resolve_selection};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConvState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConvState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Events the engine refuses outright; nothing is logged and nothing changes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Message is empty")]
    EmptyInput,
    #[error("Still searching for rides, please wait")]
    SearchInProgress,
    #[error("This booking is complete. Say 'book again' to plan another ride")]
    ConversationCompleted,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Bad user input, recovered by re-prompting
///
/// The display text is what the bot says back.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a valid number of passengers ({min}-{max}).", min = MIN_PASSENGERS, max = MAX_PASSENGERS)]
    InvalidPassengerCount,
    #[error("I didn't understand that selection. Please type a number (1, 2, 3, etc.) or the service name (Ola, Uber, InDrive, Rapido).")]
    UnrecognizedSelection,
}

/// Validate a passenger count reply
pub fn parse_passengers(text: &str) -> Result<u8, InputError> {
    leading_integer(text)
        .and_then(|n| u8::try_from(n).ok())
        .filter(|n| (MIN_PASSENGERS..=MAX_PASSENGERS).contains(n))
        .ok_or(InputError::InvalidPassengerCount)
}

/// Pure transition function
pub fn transition(
    state: &ConvState,
    context: &ConvContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    let pacing = context.pacing;

    match (state, event) {
        // ============================================================
        // Restart (legal from every state)
        // ============================================================
        (_, Event::Restart) => Ok(restart()),

        (_, Event::UserMessage { text }) if text.trim().is_empty() => {
            Err(TransitionError::EmptyInput)
        }

        // ============================================================
        // Collecting the trip
        // ============================================================

        // Pickup + UserMessage -> Dropoff
        (ConvState::Pickup, Event::UserMessage { text }) => {
            let trip = TripRequest {
                pickup: text.trim().to_string(),
                ..TripRequest::default()
            };
            Ok(TransitionResult::new(ConvState::Dropoff { trip })
                .with_effect(Effect::user_message(text))
                .with_effect(Effect::NotifyState)
                .with_effects(bot_reply(pacing, replies::ASK_DROPOFF)))
        }

        // Dropoff + UserMessage -> Passengers
        (ConvState::Dropoff { trip }, Event::UserMessage { text }) => {
            let trip = TripRequest {
                dropoff: text.trim().to_string(),
                ..trip.clone()
            };
            Ok(TransitionResult::new(ConvState::Passengers { trip })
                .with_effect(Effect::user_message(text))
                .with_effect(Effect::NotifyState)
                .with_effects(bot_reply(pacing, replies::ASK_PASSENGERS)))
        }

        // Passengers + valid count -> Searching; invalid count stays put
        (ConvState::Passengers { trip }, Event::UserMessage { text }) => {
            match parse_passengers(&text) {
                Ok(count) => {
                    let trip = TripRequest {
                        passengers: Some(count),
                        ..trip.clone()
                    };
                    Ok(TransitionResult::new(ConvState::Searching { trip: trip.clone() })
                        .with_effect(Effect::user_message(text))
                        .with_effect(Effect::NotifyState)
                        .with_effects(bot_reply(pacing, replies::SEARCHING))
                        .with_effect(Effect::typing(pacing.search))
                        .with_effect(Effect::SearchFares { trip }))
                }
                Err(e) => {
                    tracing::debug!(input = %text, "Rejected passenger count");
                    Ok(TransitionResult::new(state.clone())
                        .with_effect(Effect::user_message(text))
                        .with_effects(bot_reply(pacing, &e.to_string())))
                }
            }
        }

        // ============================================================
        // Searching
        // ============================================================
        (ConvState::Searching { .. }, Event::UserMessage { .. }) => {
            Err(TransitionError::SearchInProgress)
        }

        // Searching + FaresReady -> Results
        (ConvState::Searching { trip }, Event::FaresReady { options }) => {
            let passengers = trip.passengers.unwrap_or(MIN_PASSENGERS);
            let options = RideOptionSet::for_party(options, passengers);

            if options.is_empty() {
                // Nothing fits this party; ask again rather than strand the user
                let trip = TripRequest {
                    passengers: None,
                    ..trip.clone()
                };
                return Ok(TransitionResult::new(ConvState::Passengers { trip })
                    .with_effect(Effect::NotifyState)
                    .with_effect(Effect::bot_message(replies::NO_RIDES)));
            }

            let listings = options.iter().enumerate().flat_map(|(i, option)| {
                [
                    Effect::typing(pacing.option_stagger),
                    Effect::bot_message(option.listing(i + 1)),
                ]
            });
            let effects: Vec<Effect> = std::iter::once(Effect::NotifyState)
                .chain(std::iter::once(Effect::bot_message(replies::results_header(
                    options.len(),
                ))))
                .chain(listings)
                .chain([
                    Effect::typing(pacing.prompt),
                    Effect::bot_message(replies::ASK_SELECTION),
                ])
                .collect();

            Ok(TransitionResult::new(ConvState::Results {
                trip: trip.clone(),
                options,
            })
            .with_effects(effects))
        }

        // ============================================================
        // Picking a ride
        // ============================================================
        (ConvState::Results { trip, options }, Event::UserMessage { text }) => {
            match resolve_selection(&text, options) {
                Some(ride) => Ok(TransitionResult::new(ConvState::Completed {
                    trip: trip.clone(),
                    ride: ride.clone(),
                })
                .with_effect(Effect::user_message(text))
                .with_effect(Effect::NotifyState)
                .with_effect(Effect::book_ride(&ride.id, &ride.booking_url))
                .with_effects(bot_reply(pacing, &replies::confirmation(ride)))),
                None => {
                    tracing::debug!(input = %text, "Unrecognized selection");
                    Ok(TransitionResult::new(state.clone())
                        .with_effect(Effect::user_message(text))
                        .with_effects(bot_reply(
                            pacing,
                            &InputError::UnrecognizedSelection.to_string(),
                        )))
                }
            }
        }

        // ============================================================
        // Completed
        // ============================================================
        (ConvState::Completed { .. }, Event::UserMessage { text })
            if replies::is_restart_trigger(&text) =>
        {
            Ok(restart())
        }

        (ConvState::Completed { .. }, Event::UserMessage { .. }) => {
            Err(TransitionError::ConversationCompleted)
        }

        (state, Event::FaresReady { .. }) => Err(TransitionError::InvalidTransition(format!(
            "fares arrived while in {}",
            state.name()
        ))),
    }
}

fn restart() -> TransitionResult {
    TransitionResult::new(ConvState::Pickup)
        .with_effect(Effect::CancelTimers)
        .with_effect(Effect::ResetTranscript {
            greeting: replies::GREETING.to_string(),
        })
        .with_effect(Effect::NotifyState)
}

fn bot_reply(pacing: Pacing, text: &str) -> [Effect; 2] {
    [Effect::typing(pacing.typing), Effect::bot_message(text)]
}
