//! Mock hardware adapter for integration tests.
//!
//! Records every port call so tests can assert on the full command
//! history — including ordering between the SMS send and the buzzer
//! pulse — without touching real GPIO/UART.

use homeguard::app::events::AppEvent;
use homeguard::app::ports::{ActuatorPort, AlertPort, EventSink, SensorPort, SleepPort};
use homeguard::sensors::dht11::{ReadStatus, Reading};
use homeguard::sensors::SensorSnapshot;

// ── Port call record ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HwCall {
    SendText(String),
    Sleep(u32),
    Buzzer(bool),
    Window { closing: bool },
    AllOff,
}

// ── Reading builders ──────────────────────────────────────────

pub fn ok_reading(temperature_c: i16, humidity_pct: i16) -> Reading {
    Reading {
        status: ReadStatus::Ok,
        temperature_c,
        humidity_pct,
    }
}

/// A failed decode: sentinel `-1` in both fields.
pub fn failed_reading(status: ReadStatus) -> Reading {
    Reading {
        status,
        temperature_c: -1,
        humidity_pct: -1,
    }
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<HwCall>,
    /// Served to every `read_climate` call.
    pub reading: Reading,
    /// Served to every `read_lines` call.
    pub lines: SensorSnapshot,
    pub climate_reads: usize,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            reading: ok_reading(25, 50),
            lines: SensorSnapshot {
                flame_active: false,
                water_active: false,
                motion_active: false,
            },
            climate_reads: 0,
        }
    }

    pub fn texts_sent(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::SendText(body) => Some(body.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn buzzer_events(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::Buzzer(on) => Some(*on),
                _ => None,
            })
            .collect()
    }

    pub fn window_commands(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::Window { closing } => Some(*closing),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_climate(&mut self) -> Reading {
        self.climate_reads += 1;
        self.reading
    }

    fn read_lines(&mut self) -> SensorSnapshot {
        self.lines
    }
}

impl ActuatorPort for MockHardware {
    fn set_buzzer(&mut self, on: bool) {
        self.calls.push(HwCall::Buzzer(on));
    }

    fn drive_window(&mut self, closing: bool) {
        self.calls.push(HwCall::Window { closing });
    }

    fn all_off(&mut self) {
        self.calls.push(HwCall::AllOff);
    }
}

impl AlertPort for MockHardware {
    fn send_text(&mut self, body: &str) {
        self.calls.push(HwCall::SendText(body.to_string()));
    }
}

impl SleepPort for MockHardware {
    fn sleep_ms(&mut self, ms: u32) {
        self.calls.push(HwCall::Sleep(ms));
    }
}

// ── LogSink ───────────────────────────────────────────────────

pub struct LogSink {
    pub events: Vec<String>,
}

impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(format!("{:?}", event));
    }
}
