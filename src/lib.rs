//! RideGuide - chat-style ride fare comparison
//!
//! A scripted assistant collects pickup, drop-off and party size, quotes
//! synthetic fares across Ola, Uber, InDrive and Rapido, and hands the chosen
//! ride off to a booking callback.

pub mod config;
pub mod fares;
pub mod runtime;
pub mod selection;
pub mod state_machine;
pub mod transcript;
