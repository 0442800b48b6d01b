//! Property-based tests for fare generation

use super::*;
use crate::state_machine::{TripRequest, MAX_PASSENGERS, MIN_PASSENGERS};
use proptest::prelude::*;

fn trip(passengers: u8) -> TripRequest {
    TripRequest {
        pickup: "Main St".to_string(),
        dropoff: "Airport".to_string(),
        passengers: Some(passengers),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn prop_quotes_satisfy_contract(
        seed in any::<u64>(),
        passengers in MIN_PASSENGERS..=MAX_PASSENGERS,
        hour in 0u32..24,
    ) {
        let mut generator = FareGenerator::seeded(seed, PeakWindows::default());
        let quotes = generator.quote_at(&trip(passengers), hour);

        prop_assert!(!quotes.is_empty());
        for option in &quotes {
            prop_assert!(option.fare > 0);
            prop_assert!((0.0..=5.0).contains(&option.rating), "rating {}", option.rating);

            let base_eta = option.vehicle_class.rates().base_eta_minutes;
            prop_assert!(
                (base_eta..=base_eta + 3).contains(&option.eta.min_minutes),
                "eta {} outside base {}", option.eta, base_eta
            );
            prop_assert_eq!(option.eta.max_minutes - option.eta.min_minutes, 4);

            let tenths = option.rating * 10.0;
            prop_assert!((tenths - tenths.round()).abs() < 1e-3, "rating {} not one decimal", option.rating);
            let base_rating = option.provider.base_rating();
            prop_assert!(option.rating >= base_rating - 0.2 - 1e-3 && option.rating <= base_rating + 0.3 + 1e-3);
        }
        if passengers > 1 {
            prop_assert!(quotes.iter().all(|o| o.vehicle_class != VehicleClass::Bike));
        }
    }

    #[test]
    fn prop_option_set_sorted_for_any_seed(
        seed in any::<u64>(),
        passengers in MIN_PASSENGERS..=MAX_PASSENGERS,
    ) {
        let mut generator = FareGenerator::seeded(seed, PeakWindows::none());
        let set = RideOptionSet::for_party(generator.quote_at(&trip(passengers), 12), passengers);
        let fares: Vec<u32> = set.iter().map(|o| o.fare).collect();
        prop_assert!(fares.windows(2).all(|w| w[0] <= w[1]));
    }

    // Off-peak fares stay inside the envelope of distance 3..11 km and surge 1.0..1.15
    #[test]
    fn prop_off_peak_fares_follow_formula(seed in any::<u64>()) {
        let mut generator = FareGenerator::seeded(seed, PeakWindows::none());
        let quotes = generator.quote_at(&trip(1), 12);
        prop_assert_eq!(quotes.len(), OFFERINGS.len());

        for option in &quotes {
            let rates = option.vehicle_class.rates();
            let multiplier = option.provider.multiplier();
            let low = (rates.per_km * 3.0).max(rates.minimum_fare) * multiplier;
            let high = (rates.per_km * 11.0).max(rates.minimum_fare) * multiplier * 1.15;
            let fare = f64::from(option.fare);
            prop_assert!(fare >= low.round() - 1.0 && fare <= high.round() + 1.0,
                "{} fare {} outside {}..{}", option.vehicle_type, fare, low, high);
        }

        // Same class shares distance and surge, so fares differ only by provider multiplier
        let by_class = |provider: Provider, class: VehicleClass| {
            quotes.iter().find(|o| o.provider == provider && o.vehicle_class == class)
        };
        for class in [VehicleClass::Mini, VehicleClass::Sedan, VehicleClass::Suv] {
            if let (Some(ola), Some(uber)) = (by_class(Provider::Ola, class), by_class(Provider::Uber, class)) {
                let ola_base = f64::from(ola.fare) / Provider::Ola.multiplier();
                let uber_base = f64::from(uber.fare) / Provider::Uber.multiplier();
                prop_assert!((ola_base - uber_base).abs() <= 1.0, "{:?}: {} vs {}", class, ola_base, uber_base);
            }
        }

        // Ola applies no multiplier, so its Mini fare bounds the surge directly
        if let Some(mini) = by_class(Provider::Ola, VehicleClass::Mini) {
            let rates = VehicleClass::Mini.rates();
            let metered_high = (rates.per_km * 11.0).max(rates.minimum_fare);
            let implied_surge_floor = f64::from(mini.fare) / metered_high;
            prop_assert!(implied_surge_floor < 1.15 + 0.01, "implied surge above off-peak range");
        }
    }

    // Peak fares never fall below the cheapest peak surge
    #[test]
    fn prop_peak_fares_carry_surge(seed in any::<u64>()) {
        let mut generator = FareGenerator::seeded(seed, PeakWindows::new(vec![(0, 24)]));
        for option in generator.quote_at(&trip(1), 12) {
            let rates = option.vehicle_class.rates();
            let low = (rates.per_km * 3.0).max(rates.minimum_fare) * option.provider.multiplier() * 1.2;
            prop_assert!(f64::from(option.fare) >= low.round() - 1.0, "{:?} under peak floor {}", option, low);
        }
    }

    // Peak surge never undercuts the off-peak ceiling for the same seed's distance draw
    #[test]
    fn prop_peak_not_cheaper_than_off_peak(seed in any::<u64>()) {
        let windows = PeakWindows::new(vec![(0, 24)]);
        let mut peak = FareGenerator::seeded(seed, windows);
        let mut off_peak = FareGenerator::seeded(seed, PeakWindows::none());

        let peak_quotes = peak.quote_at(&trip(1), 12);
        let off_quotes = off_peak.quote_at(&trip(1), 12);
        let peak_total: u64 = peak_quotes.iter().map(|o| u64::from(o.fare)).sum();
        let off_total: u64 = off_quotes.iter().map(|o| u64::from(o.fare)).sum();
        prop_assert!(peak_total >= off_total, "peak {} < off-peak {}", peak_total, off_total);
    }
}
