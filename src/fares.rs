//! Fare generation
//!
//! Produces synthetic ride quotes for a trip. There is no live pricing:
//! every fare comes from the rate tables in [`catalog`] and a seedable RNG.

mod catalog;
mod generator;
mod option;

#[cfg(test)]
mod proptests;

pub use catalog::{Offering, Provider, VehicleClass, OFFERINGS};
pub use generator::{FareGenerator, FareSource, PeakWindows};
pub use option::{EtaRange, RideOption, RideOptionSet};

#[cfg(test)]
pub(crate) use option::test_option;
