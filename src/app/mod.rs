//! Application layer — the hexagonal core.
//!
//! [`service::AlarmService`] holds the decision logic; [`ports`] defines
//! the trait boundary it drives hardware through; [`events`] carries the
//! structured events it emits.

pub mod events;
pub mod ports;
pub mod service;
