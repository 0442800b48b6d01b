//! Bot copy

use crate::fares::{Provider, RideOption};

pub const GREETING: &str = "Hi! I'm RideGuide, your personal ride assistant. I'll help you find the best ride options from Ola, Uber, InDrive, and Rapido. Let's start - where would you like to be picked up?";

pub const ASK_DROPOFF: &str =
    "Great! Now, where would you like to go? Please enter your drop-off location.";

pub const ASK_PASSENGERS: &str =
    "Perfect! How many passengers will be traveling? (Enter a number between 1-8)";

pub const SEARCHING: &str = "Excellent! Let me search for the best ride options for you...";

pub const NO_RIDES: &str = "Sorry, no rides are available for a group that size right now. How many passengers will be traveling? (Enter a number between 1-8)";

pub const ASK_SELECTION: &str = "Which ride would you like to book? Just type the number (1, 2, 3, etc.) or say 'book [service name]'";

/// Phrases that start a new booking once one is completed
pub const RESTART_TRIGGERS: [&str; 4] = ["book again", "restart", "new ride", "start over"];

pub fn results_header(count: usize) -> String {
    format!("Found {count} ride options for you! Here are your choices sorted by price:")
}

pub fn confirmation(ride: &RideOption) -> String {
    format!(
        "Great choice! I'll redirect you to {} to complete your booking for ₹{}. Have a safe trip! Say 'book again' to plan another ride.",
        ride.service(),
        ride.fare
    )
}

/// Service names listed in the unrecognized-selection hint
pub fn service_names() -> String {
    Provider::ALL.map(Provider::name).join(", ")
}

pub fn is_restart_trigger(text: &str) -> bool {
    let text = text.trim().to_lowercase();
    RESTART_TRIGGERS.contains(&text.as_str())
}
