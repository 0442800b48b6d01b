//! Ride quotes and the ordered set shown to the user

use super::catalog::{Provider, VehicleClass};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Estimated pickup time window in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtaRange {
    pub min_minutes: u32,
    pub max_minutes: u32,
}

impl fmt::Display for EtaRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} min", self.min_minutes, self.max_minutes)
    }
}

/// One quoted fare from one provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideOption {
    pub id: String,
    pub provider: Provider,
    /// Whole rupees, always positive
    pub fare: u32,
    pub eta: EtaRange,
    /// 0.0 to 5.0
    pub rating: f32,
    pub vehicle_class: VehicleClass,
    /// Product name, e.g. "UberGo"
    pub vehicle_type: String,
    /// Opaque external link, passed through unchanged
    pub booking_url: String,
}

impl RideOption {
    pub fn service(&self) -> &'static str {
        self.provider.name()
    }

    /// Chat rendering of the option at a 1-based position
    pub fn listing(&self, position: usize) -> String {
        format!(
            "{position}. {} {}\n💰 ₹{}\n⏱️ {}\n⭐ {:.1}/5\n🚗 {}",
            self.service(),
            self.provider.logo(),
            self.fare,
            self.eta,
            self.rating,
            self.vehicle_type,
        )
    }
}

/// Quotes for one trip, filtered for the party size and sorted by fare
///
/// This is the exact sequence shown to the user and the one the selection
/// resolver indexes into.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RideOptionSet {
    options: Vec<RideOption>,
}

impl RideOptionSet {
    /// Drop single-rider vehicles for groups, then stable-sort by fare
    pub fn for_party(options: Vec<RideOption>, passengers: u8) -> Self {
        let mut options: Vec<RideOption> = options
            .into_iter()
            .filter(|o| passengers <= 1 || !o.vehicle_class.is_single_rider())
            .collect();
        options.sort_by_key(|o| o.fare);
        Self { options }
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Option at a 1-based position
    pub fn position(&self, position: usize) -> Option<&RideOption> {
        position
            .checked_sub(1)
            .and_then(|index| self.options.get(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RideOption> {
        self.options.iter()
    }
}

impl<'a> IntoIterator for &'a RideOptionSet {
    type Item = &'a RideOption;
    type IntoIter = std::slice::Iter<'a, RideOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}

#[cfg(test)]
pub(crate) fn test_option(id: &str, provider: Provider, class: VehicleClass, fare: u32) -> RideOption {
    RideOption {
        id: id.to_string(),
        provider,
        fare,
        eta: EtaRange {
            min_minutes: 5,
            max_minutes: 9,
        },
        rating: provider.base_rating(),
        vehicle_class: class,
        vehicle_type: format!("{class:?}"),
        booking_url: provider.booking_url().to_string(),
    }
}
