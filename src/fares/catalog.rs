//! Providers, vehicle classes and the offerings quoted for every search

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ride-hailing provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    Ola,
    Uber,
    InDrive,
    Rapido,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::Ola,
        Provider::Uber,
        Provider::InDrive,
        Provider::Rapido,
    ];

    /// Display name, also what the selection resolver matches against
    pub fn name(self) -> &'static str {
        match self {
            Provider::Ola => "Ola",
            Provider::Uber => "Uber",
            Provider::InDrive => "InDrive",
            Provider::Rapido => "Rapido",
        }
    }

    pub fn logo(self) -> &'static str {
        match self {
            Provider::Ola => "🚕",
            Provider::Uber => "🚙",
            Provider::InDrive => "🚗",
            Provider::Rapido => "🏍️",
        }
    }

    /// Store listing handed to the booking callback untouched
    pub fn booking_url(self) -> &'static str {
        match self {
            Provider::Ola => "https://play.google.com/store/apps/details?id=com.olacabs.customer",
            Provider::Uber => "https://play.google.com/store/apps/details?id=com.ubercab",
            Provider::InDrive => {
                "https://play.google.com/store/apps/details?id=sinet.startup.inDriver"
            }
            Provider::Rapido => {
                "https://play.google.com/store/apps/details?id=com.rapido.passenger"
            }
        }
    }

    /// Pricing multiplier applied on top of the metered fare
    pub fn multiplier(self) -> f64 {
        match self {
            Provider::Ola => 1.0,
            Provider::Uber => 1.12,
            Provider::InDrive => 0.92,
            Provider::Rapido => 0.88,
        }
    }

    pub fn base_rating(self) -> f32 {
        match self {
            Provider::Ola => 4.2,
            Provider::Uber => 4.5,
            Provider::InDrive => 4.1,
            Provider::Rapido => 4.0,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Vehicle class, which decides the rate table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    Bike,
    Auto,
    Mini,
    Sedan,
    Suv,
}

/// Rate table for one vehicle class
#[derive(Debug, Clone, Copy)]
pub struct ClassRates {
    pub per_km: f64,
    pub minimum_fare: f64,
    pub base_eta_minutes: u32,
}

impl VehicleClass {
    pub fn rates(self) -> ClassRates {
        let (per_km, minimum_fare, base_eta_minutes) = match self {
            VehicleClass::Bike => (6.0, 25.0, 3),
            VehicleClass::Auto => (11.0, 35.0, 5),
            VehicleClass::Mini => (13.0, 60.0, 6),
            VehicleClass::Sedan => (16.0, 85.0, 8),
            VehicleClass::Suv => (20.0, 120.0, 10),
        };
        ClassRates {
            per_km,
            minimum_fare,
            base_eta_minutes,
        }
    }

    /// Bikes carry a single rider
    pub fn is_single_rider(self) -> bool {
        matches!(self, VehicleClass::Bike)
    }
}

/// One (provider, vehicle class) pair quoted on every search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offering {
    pub provider: Provider,
    pub class: VehicleClass,
    /// Product name shown to the user
    pub label: &'static str,
}

const fn offering(provider: Provider, class: VehicleClass, label: &'static str) -> Offering {
    Offering {
        provider,
        class,
        label,
    }
}

/// Quote order before sorting; ties in fare keep this order
pub const OFFERINGS: [Offering; 9] = [
    offering(Provider::Ola, VehicleClass::Mini, "Mini"),
    offering(Provider::Ola, VehicleClass::Sedan, "Prime Sedan"),
    offering(Provider::Ola, VehicleClass::Suv, "Prime SUV"),
    offering(Provider::Uber, VehicleClass::Mini, "UberGo"),
    offering(Provider::Uber, VehicleClass::Sedan, "Premier"),
    offering(Provider::Uber, VehicleClass::Suv, "UberXL"),
    offering(Provider::InDrive, VehicleClass::Mini, "Economy"),
    offering(Provider::Rapido, VehicleClass::Bike, "Bike"),
    offering(Provider::Rapido, VehicleClass::Auto, "Auto"),
];
