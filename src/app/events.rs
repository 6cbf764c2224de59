//! Outbound application events.
//!
//! The [`AlarmService`](super::service::AlarmService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log to serial, forward to a status
//! channel, etc.

use crate::events::SensorSource;
use crate::sensors::dht11::Reading;
use crate::sensors::SensorSnapshot;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// An edge arrived from one of the event lines.
    EdgeDetected(SensorSource),

    /// An edge was corroborated and the alarm sequence is about to run.
    AlarmRaised { source: SensorSource },

    /// The window motor was commanded (by either writer).
    WindowCommand { closing: bool },

    /// The application service has started.
    Started,
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone)]
pub struct TelemetryData {
    pub reading: Reading,
    pub lines: SensorSnapshot,
}
