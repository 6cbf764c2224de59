//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A future MQTT or SMS status adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | status={:?} | T={}\u{00b0}C H={}% | flame={} water={} motion={}",
                    t.reading.status,
                    t.reading.temperature_c,
                    t.reading.humidity_pct,
                    t.lines.flame_active,
                    t.lines.water_active,
                    t.lines.motion_active,
                );
            }
            AppEvent::EdgeDetected(source) => {
                info!("EDGE  | {:?}", source);
            }
            AppEvent::AlarmRaised { source } => {
                warn!("ALARM | raised by {:?}", source);
            }
            AppEvent::WindowCommand { closing } => {
                info!("WINDW | {}", if *closing { "closing" } else { "opening" });
            }
            AppEvent::Started => {
                info!("START | monitor online");
            }
        }
    }
}
