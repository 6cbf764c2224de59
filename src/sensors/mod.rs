//! Sensor subsystem — the DHT11 protocol decoder plus the raw levels of
//! the three event lines.
//!
//! The flame, water, and PIR lines are simple digital inputs; their edges
//! arrive through the ISR queue in [`crate::events`], and their levels are
//! sampled each poll tick into a [`SensorSnapshot`].

pub mod dht11;

#[cfg(not(target_os = "espidf"))]
pub mod sim;

/// Point-in-time levels of the three event sensor lines, with polarity
/// already applied (`true` = the sensor's trigger condition is present).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorSnapshot {
    /// KY-026 sees infrared flame (line low).
    pub flame_active: bool,
    /// FC-37 has water on the grid (line low).
    pub water_active: bool,
    /// PIR sees movement (line high).
    pub motion_active: bool,
}
