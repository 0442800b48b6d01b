//! Conversation state types

use crate::fares::{RideOption, RideOptionSet};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fewest passengers a trip may carry
pub const MIN_PASSENGERS: u8 = 1;
/// Most passengers a trip may carry
pub const MAX_PASSENGERS: u8 = 8;

// ============================================================================
// Trip Request
// ============================================================================

/// Details collected so far for one booking attempt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    pub pickup: String,
    pub dropoff: String,
    /// Set only once a count within bounds has been given
    pub passengers: Option<u8>,
}

impl TripRequest {
    pub fn is_empty(&self) -> bool {
        self.pickup.is_empty() && self.dropoff.is_empty() && self.passengers.is_none()
    }
}

// ============================================================================
// Conversation State
// ============================================================================

/// Conversation state
///
/// Moves strictly forward through the variants; only a restart goes back to
/// `Pickup`. Each variant carries what has been collected up to that point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConvState {
    /// Waiting for the pickup location
    #[default]
    Pickup,

    /// Waiting for the drop-off location
    Dropoff { trip: TripRequest },

    /// Waiting for a passenger count
    Passengers { trip: TripRequest },

    /// Fares are being generated; input is not accepted
    Searching { trip: TripRequest },

    /// Options shown, waiting for a pick
    Results {
        trip: TripRequest,
        options: RideOptionSet,
    },

    /// A ride was handed off for booking
    Completed { trip: TripRequest, ride: RideOption },
}

impl ConvState {
    /// Short name used in logs and UI notifications
    pub fn name(&self) -> &'static str {
        match self {
            ConvState::Pickup => "pickup",
            ConvState::Dropoff { .. } => "dropoff",
            ConvState::Passengers { .. } => "passengers",
            ConvState::Searching { .. } => "searching",
            ConvState::Results { .. } => "results",
            ConvState::Completed { .. } => "completed",
        }
    }

    /// Trip collected so far; `None` before a pickup is given
    pub fn trip(&self) -> Option<&TripRequest> {
        match self {
            ConvState::Pickup => None,
            ConvState::Dropoff { trip }
            | ConvState::Passengers { trip }
            | ConvState::Searching { trip }
            | ConvState::Results { trip, .. }
            | ConvState::Completed { trip, .. } => Some(trip),
        }
    }

    /// Options currently on screen, if any
    pub fn displayed_options(&self) -> Option<&RideOptionSet> {
        match self {
            ConvState::Results { options, .. } => Some(options),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ConvState::Completed { .. })
    }
}

// ============================================================================
// Context
// ============================================================================

/// Simulated delays used to pace the bot's replies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// "Bot is typing" pause before each reply
    pub typing: Duration,
    /// Pause while fares are being "searched"
    pub search: Duration,
    /// Gap between successive option listings
    pub option_stagger: Duration,
    /// Pause before the pick-a-ride prompt
    pub prompt: Duration,
}

impl Pacing {
    /// No delays at all
    pub fn instant() -> Self {
        Self {
            typing: Duration::ZERO,
            search: Duration::ZERO,
            option_stagger: Duration::ZERO,
            prompt: Duration::ZERO,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            typing: Duration::from_millis(1000),
            search: Duration::from_millis(1500),
            option_stagger: Duration::from_millis(300),
            prompt: Duration::from_millis(500),
        }
    }
}

/// Context for a conversation (immutable configuration)
#[derive(Debug, Clone)]
pub struct ConvContext {
    pub conversation_id: String,
    pub pacing: Pacing,
}

impl ConvContext {
    pub fn new(conversation_id: impl Into<String>, pacing: Pacing) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            pacing,
        }
    }
}
