//! Application service — edge dispatch and the background poll loop.
//!
//! [`AlarmService`] owns the decision logic that sits between the edge
//! queue and the actuators.  All I/O flows through port traits injected at
//! call sites, making the whole pipeline testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ AlertPort
//!                 │      AlarmService      │ ──▶ EventSink
//! ActuatorPort ◀──│  corroborate · actuate │
//!                 └────────────────────────┘
//! ```
//!
//! ## Corroboration semantics
//!
//! Flame and water edges are corroborated against the cached DHT11
//! reading with plain threshold comparisons.  A failed reading carries
//! `-1` in both fields, which never satisfies `> threshold`, so an edge
//! arriving while the sensor is unreadable is silently dropped — no
//! explicit status check exists on these paths, deliberately.  The poll
//! loop's `< open threshold` test has the mirrored consequence: `-1`
//! satisfies it, so a dry line plus a failed reading still re-opens the
//! window.
//!
//! ## Motor ownership
//!
//! Two independent paths command the window motor: the water-edge path
//! (close) and the poll loop (open).  Neither path stops the motor when
//! its hold expires; whoever writes last wins.  Simultaneous intents are
//! resolved purely by arrival order.

use log::{info, warn};

use crate::config::SystemConfig;
use crate::events::SensorSource;

use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, AlertPort, EventSink, SensorPort, SleepPort};

/// SMS body for a corroborated flame edge.
const FIRE_ALERT_TEXT: &str = "Your house is on fire!";
/// SMS body for an intrusion edge.
const INTRUSION_ALERT_TEXT: &str = "Intruder detected in your house!";

// ───────────────────────────────────────────────────────────────
// AlarmService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AlarmService {
    config: SystemConfig,
}

impl AlarmService {
    pub fn new(config: SystemConfig) -> Self {
        Self { config }
    }

    /// Announce startup to the sink.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!("AlarmService started");
    }

    // ── Edge dispatch ─────────────────────────────────────────

    /// React to one edge from the ISR queue.  Exactly one source is
    /// processed per invocation; simultaneous edges arrive as separate
    /// calls in queue order.
    ///
    /// Blocks for the full alarm/motor sequence (seconds) — acceptable in
    /// the main loop, which is why ISRs enqueue instead of calling this.
    pub fn handle_edge(
        &mut self,
        source: SensorSource,
        hw: &mut (impl SensorPort + ActuatorPort + AlertPort + SleepPort),
        sink: &mut impl EventSink,
    ) {
        sink.emit(&AppEvent::EdgeDetected(source));

        match source {
            SensorSource::Flame => {
                let reading = hw.read_climate();
                if reading.temperature_c > self.config.fire_temperature_c {
                    warn!(
                        "flame edge corroborated at {}°C — raising alarm",
                        reading.temperature_c
                    );
                    sink.emit(&AppEvent::AlarmRaised { source });
                    self.run_alarm(FIRE_ALERT_TEXT, hw);
                } else {
                    info!(
                        "flame edge not corroborated ({}°C ≤ {}°C)",
                        reading.temperature_c, self.config.fire_temperature_c
                    );
                }
            }

            SensorSource::Water => {
                let reading = hw.read_climate();
                if reading.humidity_pct > self.config.close_window_humidity_pct {
                    info!(
                        "water edge corroborated at {}% RH — closing window",
                        reading.humidity_pct
                    );
                    sink.emit(&AppEvent::WindowCommand { closing: true });
                    hw.drive_window(true);
                    hw.sleep_ms(self.config.motor_run_ms);
                    // The motor stays energised; the poll loop issues the
                    // next command when conditions reverse.
                }
            }

            SensorSource::Motion => {
                // PIR edges need no corroboration.
                warn!("motion edge — raising alarm");
                sink.emit(&AppEvent::AlarmRaised { source });
                self.run_alarm(INTRUSION_ALERT_TEXT, hw);
            }
        }
    }

    // ── Background polling ────────────────────────────────────

    /// One pass of the 1 Hz housekeeping loop: snapshot sensors, emit
    /// telemetry, and re-open the window once the rain has cleared.
    pub fn poll_tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort + SleepPort),
        sink: &mut impl EventSink,
    ) {
        let reading = hw.read_climate();
        let lines = hw.read_lines();

        if !reading.is_ok() {
            warn!("climate read failed: {:?}", reading.status);
        }
        sink.emit(&AppEvent::Telemetry(TelemetryData { reading, lines }));

        if !lines.water_active && reading.humidity_pct < self.config.open_window_humidity_pct {
            sink.emit(&AppEvent::WindowCommand { closing: false });
            hw.drive_window(false);
            hw.sleep_ms(self.config.motor_run_ms);
        }
    }

    // ── Internal ──────────────────────────────────────────────

    /// Notify first, then pulse the buzzer.  Both are best-effort; the
    /// ordering is part of the contract.
    fn run_alarm(&self, body: &str, hw: &mut (impl ActuatorPort + AlertPort + SleepPort)) {
        hw.send_text(body);
        hw.sleep_ms(self.config.alarm_pause_ms);
        hw.set_buzzer(true);
        hw.sleep_ms(self.config.buzzer_hold_ms);
        hw.set_buzzer(false);
    }
}
