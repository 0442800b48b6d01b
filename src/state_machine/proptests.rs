//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::*;
use super::transition::*;
use super::*;
use crate::fares::{test_option, Provider, RideOption, VehicleClass};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> ConvContext {
    ConvContext::new("test-conv", Pacing::instant())
}

fn passengers_state() -> ConvState {
    ConvState::Passengers {
        trip: TripRequest {
            pickup: "Main St".to_string(),
            dropoff: "Airport".to_string(),
            passengers: None,
        },
    }
}

fn drive(state: ConvState, events: Vec<Event>) -> ConvState {
    let ctx = test_context();
    events.into_iter().fold(state, |state, event| {
        match transition(&state, &ctx, event) {
            Ok(result) => result.new_state,
            Err(_) => state,
        }
    })
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_provider() -> impl Strategy<Value = Provider> {
    prop_oneof![
        Just(Provider::Ola),
        Just(Provider::Uber),
        Just(Provider::InDrive),
        Just(Provider::Rapido),
    ]
}

fn arb_vehicle_class() -> impl Strategy<Value = VehicleClass> {
    prop_oneof![
        Just(VehicleClass::Bike),
        Just(VehicleClass::Auto),
        Just(VehicleClass::Mini),
        Just(VehicleClass::Sedan),
        Just(VehicleClass::Suv),
    ]
}

fn arb_ride_option() -> impl Strategy<Value = RideOption> {
    ("[a-z]{8}", arb_provider(), arb_vehicle_class(), 1u32..2000)
        .prop_map(|(id, provider, class, fare)| test_option(&id, provider, class, fare))
}

fn arb_quotes() -> impl Strategy<Value = Vec<RideOption>> {
    proptest::collection::vec(arb_ride_option(), 1..10)
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ]{0,20}",
        "[0-9]{1,3}",
        "-?[0-9]{1,2}[a-z ]{0,5}",
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        4 => arb_text().prop_map(|text| Event::UserMessage { text }),
        1 => arb_quotes().prop_map(|options| Event::FaresReady { options }),
        1 => Just(Event::Restart),
    ]
}

fn rank(state: &ConvState) -> u8 {
    match state {
        ConvState::Pickup => 0,
        ConvState::Dropoff { .. } => 1,
        ConvState::Passengers { .. } => 2,
        ConvState::Searching { .. } => 3,
        ConvState::Results { .. } => 4,
        ConvState::Completed { .. } => 5,
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Every count in range moves to Searching and is stored
    #[test]
    fn prop_valid_passenger_count_starts_search(count in MIN_PASSENGERS..=MAX_PASSENGERS) {
        let result = transition(&passengers_state(), &test_context(), Event::user_message(count.to_string())).unwrap();
        prop_assert_eq!(result.new_state.name(), "searching");
        prop_assert_eq!(result.new_state.trip().and_then(|t| t.passengers), Some(count));
    }

    // Anything outside 1..=8 leaves the state untouched
    #[test]
    fn prop_invalid_passenger_count_stays(count in prop_oneof![-1000i64..1, 9i64..100_000]) {
        let state = passengers_state();
        let result = transition(&state, &test_context(), Event::user_message(count.to_string())).unwrap();
        prop_assert_eq!(&result.new_state, &state);
        let searched = result.effects.iter().any(|e| matches!(e, Effect::SearchFares { .. }));
        prop_assert!(!searched);
    }

    #[test]
    fn prop_non_numeric_passenger_count_stays(text in "[a-zA-Z][a-zA-Z ]{0,15}") {
        let state = passengers_state();
        let result = transition(&state, &test_context(), Event::user_message(text)).unwrap();
        prop_assert_eq!(result.new_state, state);
    }

    // Results are always sorted and bike-free for groups
    #[test]
    fn prop_results_sorted_and_filtered(
        quotes in arb_quotes(),
        passengers in MIN_PASSENGERS..=MAX_PASSENGERS,
    ) {
        let state = ConvState::Searching {
            trip: TripRequest { passengers: Some(passengers), ..TripRequest::default() },
        };
        let result = transition(&state, &test_context(), Event::FaresReady { options: quotes }).unwrap();
        if let Some(options) = result.new_state.displayed_options() {
            let fares: Vec<u32> = options.iter().map(|o| o.fare).collect();
            prop_assert!(fares.windows(2).all(|w| w[0] <= w[1]), "unsorted: {:?}", fares);
            if passengers > 1 {
                prop_assert!(options.iter().all(|o| o.vehicle_class != VehicleClass::Bike));
            }
        } else {
            prop_assert_eq!(result.new_state.name(), "passengers");
        }
    }

    // Index selection returns exactly the displayed entry
    #[test]
    fn prop_index_selects_displayed_entry(quotes in arb_quotes(), pick in 0usize..10) {
        let state = ConvState::Searching {
            trip: TripRequest { passengers: Some(1), ..TripRequest::default() },
        };
        let results = transition(&state, &test_context(), Event::FaresReady { options: quotes }).unwrap().new_state;
        let options = results.displayed_options().unwrap().clone();
        let position = pick % options.len() + 1;

        let result = transition(&results, &test_context(), Event::user_message(position.to_string())).unwrap();
        match result.new_state {
            ConvState::Completed { ride, .. } => {
                prop_assert_eq!(Some(&ride), options.position(position));
            }
            other => prop_assert!(false, "Expected Completed, got {:?}", other),
        }
    }

    // Restart always lands on an empty Pickup
    #[test]
    fn prop_restart_always_resets(events in proptest::collection::vec(arb_event(), 0..20)) {
        let state = drive(ConvState::Pickup, events);
        let result = transition(&state, &test_context(), Event::Restart).unwrap();
        prop_assert_eq!(&result.new_state, &ConvState::Pickup);
        prop_assert!(result.new_state.trip().is_none());
    }

    // Only restart moves backwards
    #[test]
    fn prop_forward_only_without_restart(events in proptest::collection::vec(arb_event(), 0..30)) {
        let ctx = test_context();
        let mut state = ConvState::Pickup;
        for event in events {
            let is_restart = matches!(event, Event::Restart)
                || matches!(&event, Event::UserMessage { text } if replies::is_restart_trigger(text));
            let before = rank(&state);
            if let Ok(result) = transition(&state, &ctx, event) {
                let after = rank(&result.new_state);
                // Passengers is re-entered from Searching only when nothing fits the party
                let refused_party = before == 3 && after == 2;
                prop_assert!(is_restart || after >= before || refused_party, "{} -> {}", before, after);
                state = result.new_state;
            }
        }
    }

    // Exactly one booking per completed selection, and only on that transition
    #[test]
    fn prop_booking_only_on_completion(events in proptest::collection::vec(arb_event(), 0..30)) {
        let ctx = test_context();
        let mut state = ConvState::Pickup;
        for event in events {
            if let Ok(result) = transition(&state, &ctx, event) {
                let bookings = result.effects.iter().filter(|e| matches!(e, Effect::BookRide { .. })).count();
                let completed_now = !state.is_completed() && result.new_state.is_completed();
                prop_assert_eq!(bookings, usize::from(completed_now));
                state = result.new_state;
            }
        }
    }
}
