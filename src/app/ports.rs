//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AlarmService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, the modem, event sinks) implement
//! these traits.  The [`AlarmService`](super::service::AlarmService)
//! consumes them via generics, so the domain core never touches hardware
//! directly and the full alarm pipeline runs on the host under mocks.

use crate::sensors::dht11::Reading;
use crate::sensors::SensorSnapshot;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Current humidity/temperature reading.  May be served from the
    /// decoder's cache; may block for tens of milliseconds on a live
    /// decode.
    fn read_climate(&mut self) -> Reading;

    /// Raw levels of the three event lines, polarity applied.
    fn read_lines(&mut self) -> SensorSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
///
/// Commands are best-effort; nothing is awaited or acknowledged.  The
/// window motor has **two** independent command sources (the water-edge
/// path and the poll loop) with last-writer-wins semantics — see the
/// service docs.
pub trait ActuatorPort {
    /// Energise or silence the alarm buzzer.
    fn set_buzzer(&mut self, on: bool);

    /// Drive the window motor: `closing = true` pulls the window shut,
    /// `false` pushes it open.  The motor stays energised until the next
    /// command; this port has no implicit stop.
    fn drive_window(&mut self, closing: bool);

    /// Kill buzzer and motor — known-safe state at boot.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Alert port (driven adapter: domain → cellular modem)
// ───────────────────────────────────────────────────────────────

/// Outbound text notification to the fixed alert number.
/// Fire-and-forget: no delivery status is observed.
pub trait AlertPort {
    fn send_text(&mut self, body: &str);
}

// ───────────────────────────────────────────────────────────────
// Sleep port (domain pacing)
// ───────────────────────────────────────────────────────────────

/// Blocking delay the alarm and motor sequences pace themselves through.
/// On the device this parks the calling task; mocks record the request
/// so tests can assert on sequence ordering without real time passing.
pub trait SleepPort {
    fn sleep_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log today;
/// an MQTT or SMS status channel would implement the same trait).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
