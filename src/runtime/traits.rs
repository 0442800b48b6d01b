//! Trait abstractions for runtime side effects
//!
//! These traits enable testing the executor with mock implementations.
//! Transcript storage lives in [`crate::transcript::MessageStore`] and fare
//! generation in [`crate::fares::FareSource`].

/// Receives the chosen ride once a selection completes
///
/// The URL is an opaque external link; the handler decides how to open it.
/// Called exactly once per completed selection and never awaited.
pub trait BookingHandler: Send + Sync {
    fn book(&self, ride_id: &str, booking_url: &str);
}

impl<F> BookingHandler for F
where
    F: Fn(&str, &str) + Send + Sync,
{
    fn book(&self, ride_id: &str, booking_url: &str) {
        self(ride_id, booking_url);
    }
}
