//! Synthetic pricing model
//!
//! fare = round(max(per_km * distance, minimum) * provider multiplier * surge)
//!
//! Distance is drawn once per search and shared by every offering, so the
//! relative order of quotes reflects the rate tables rather than noise.

use super::catalog::{Offering, OFFERINGS};
use super::option::{EtaRange, RideOption};
use crate::config::ConfigError;
use crate::state_machine::TripRequest;
use chrono::Timelike;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use std::str::FromStr;

const DISTANCE_KM: Range<f64> = 3.0..11.0;
const PEAK_SURGE: Range<f64> = 1.2..1.8;
const OFF_PEAK_SURGE: Range<f64> = 1.0..1.15;
const RATING_JITTER: Range<f32> = -0.2..0.3;
const ETA_OFFSET_MAX_MINUTES: u32 = 3;
const ETA_SPREAD_MINUTES: u32 = 4;

/// Source of ride quotes for a trip
///
/// Implementations must return a non-empty list with positive fares and
/// ratings within 0..=5. Filtering and ordering happen downstream.
pub trait FareSource: Send {
    fn quote(&mut self, trip: &TripRequest) -> Vec<RideOption>;
}

/// Hours of the day (local time) during which surge pricing applies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeakWindows {
    /// Half-open `[start, end)` hour ranges; `start > end` wraps midnight
    windows: Vec<(u32, u32)>,
}

impl PeakWindows {
    pub fn new(windows: Vec<(u32, u32)>) -> Self {
        Self { windows }
    }

    /// No peak hours at all
    pub fn none() -> Self {
        Self {
            windows: Vec::new(),
        }
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.windows.iter().any(|&(start, end)| {
            if start <= end {
                (start..end).contains(&hour)
            } else {
                hour >= start || hour < end
            }
        })
    }
}

impl Default for PeakWindows {
    fn default() -> Self {
        Self::new(vec![(8, 10), (17, 20)])
    }
}

impl FromStr for PeakWindows {
    type Err = ConfigError;

    /// Parses `"8-10,17-20"`; an empty string means no peak hours
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidPeakHours(s.to_string());
        let mut windows = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (start, end) = part.split_once('-').ok_or_else(invalid)?;
            let start: u32 = start.trim().parse().map_err(|_| invalid())?;
            let end: u32 = end.trim().parse().map_err(|_| invalid())?;
            if start > 23 || end > 24 || start == end {
                return Err(invalid());
            }
            windows.push((start, end));
        }
        Ok(Self { windows })
    }
}

/// Randomized fare generator over the fixed offering catalog
pub struct FareGenerator {
    rng: StdRng,
    peak_windows: PeakWindows,
}

impl FareGenerator {
    /// Generator seeded from OS entropy
    pub fn new(peak_windows: PeakWindows) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            peak_windows,
        }
    }

    /// Deterministic generator for reproducible runs and tests
    pub fn seeded(seed: u64, peak_windows: PeakWindows) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            peak_windows,
        }
    }

    /// Quote every eligible offering as if it were `hour` o'clock
    pub fn quote_at(&mut self, trip: &TripRequest, hour: u32) -> Vec<RideOption> {
        let passengers = trip.passengers.unwrap_or(1);
        let distance_km = self.rng.gen_range(DISTANCE_KM);
        let peak = self.peak_windows.contains(hour);
        let surge = if peak {
            self.rng.gen_range(PEAK_SURGE)
        } else {
            self.rng.gen_range(OFF_PEAK_SURGE)
        };

        tracing::debug!(
            distance_km,
            surge,
            peak,
            passengers,
            "Generating fares"
        );

        OFFERINGS
            .iter()
            .filter(|o| passengers <= 1 || !o.class.is_single_rider())
            .map(|o| self.price(o, distance_km, surge))
            .collect()
    }

    fn price(&mut self, offering: &Offering, distance_km: f64, surge: f64) -> RideOption {
        let rates = offering.class.rates();
        let metered = (rates.per_km * distance_km).max(rates.minimum_fare);
        let fare = (metered * offering.provider.multiplier() * surge)
            .round()
            .max(1.0) as u32;

        let eta_min = rates.base_eta_minutes + self.rng.gen_range(0..=ETA_OFFSET_MAX_MINUTES);
        let jitter = self.rng.gen_range(RATING_JITTER);
        let rating = ((offering.provider.base_rating() + jitter).clamp(0.0, 5.0) * 10.0).round() / 10.0;

        let id = uuid::Builder::from_random_bytes(self.rng.gen())
            .into_uuid()
            .to_string();

        RideOption {
            id,
            provider: offering.provider,
            fare,
            eta: EtaRange {
                min_minutes: eta_min,
                max_minutes: eta_min + ETA_SPREAD_MINUTES,
            },
            rating,
            vehicle_class: offering.class,
            vehicle_type: offering.label.to_string(),
            booking_url: offering.provider.booking_url().to_string(),
        }
    }
}

impl FareSource for FareGenerator {
    fn quote(&mut self, trip: &TripRequest) -> Vec<RideOption> {
        let hour = chrono::Local::now().hour();
        self.quote_at(trip, hour)
    }
}
