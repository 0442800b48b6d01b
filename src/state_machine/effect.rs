//! Effects produced by state transitions

use super::state::TripRequest;
use std::time::Duration;

/// Effects to be executed after state transition, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Echo the user's text into the transcript
    UserMessage { text: String },

    /// Append a bot reply to the transcript
    BotMessage { text: String },

    /// Show the typing indicator and hold the remaining effects for `delay`
    Typing { delay: Duration },

    /// Generate quotes for the trip and feed them back as `FaresReady`
    SearchFares { trip: TripRequest },

    /// Hand the chosen ride to the booking callback
    BookRide {
        ride_id: String,
        booking_url: String,
    },

    /// Drop any pending typing timer and its parked effects
    CancelTimers,

    /// Replace the transcript with a single greeting
    ResetTranscript { greeting: String },

    /// Tell renderers the state changed
    NotifyState,
}

impl Effect {
    pub fn user_message(text: impl Into<String>) -> Self {
        Effect::UserMessage { text: text.into() }
    }

    pub fn bot_message(text: impl Into<String>) -> Self {
        Effect::BotMessage { text: text.into() }
    }

    pub fn typing(delay: Duration) -> Self {
        Effect::Typing { delay }
    }

    pub fn book_ride(ride_id: impl Into<String>, booking_url: impl Into<String>) -> Self {
        Effect::BookRide {
            ride_id: ride_id.into(),
            booking_url: booking_url.into(),
        }
    }
}
