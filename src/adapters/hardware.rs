//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the DHT11 decoder, the actuator drivers, and the modem, exposing
//! them through [`SensorPort`], [`ActuatorPort`], [`AlertPort`], and
//! [`SleepPort`].  This is the only module in the system that wires the
//! domain to actual hardware.  On non-espidf targets, the underlying
//! drivers use cfg-gated simulation stubs.

use log::warn;

use crate::adapters::modem::Sim800Modem;
use crate::adapters::time::Esp32TimeAdapter;
use crate::app::ports::{ActuatorPort, AlertPort, SensorPort, SleepPort};
use crate::config::SystemConfig;
use crate::drivers::buzzer::Buzzer;
use crate::drivers::hw_init;
use crate::drivers::window_motor::{Direction, WindowMotor};
use crate::pins;
use crate::sensors::dht11::{Dht11, Reading, SensorLine};
use crate::sensors::SensorSnapshot;

// ── Decoder line seam ─────────────────────────────────────────

/// Raw GPIO implementation of the decoder's single-wire line.
pub struct RawSensorLine {
    gpio: i32,
}

impl RawSensorLine {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }
}

impl SensorLine for RawSensorLine {
    fn set_output(&mut self) {
        hw_init::gpio_set_output(self.gpio, true);
    }

    fn set_input(&mut self) {
        hw_init::gpio_set_output(self.gpio, false);
    }

    fn write(&mut self, high: bool) {
        hw_init::gpio_write(self.gpio, high);
    }

    fn is_high(&mut self) -> bool {
        hw_init::gpio_read(self.gpio)
    }
}

// ── HardwareAdapter ───────────────────────────────────────────

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    dht: Dht11<RawSensorLine, Esp32TimeAdapter>,
    buzzer: Buzzer,
    motor: WindowMotor,
    modem: Sim800Modem,
}

impl HardwareAdapter {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            dht: Dht11::new(
                RawSensorLine::new(pins::DHT_GPIO),
                Esp32TimeAdapter::new(),
            ),
            buzzer: Buzzer::new(),
            motor: WindowMotor::new(),
            modem: Sim800Modem::new(config.alert_phone_number.clone()),
        }
    }

    /// Run the modem's AT bring-up sequence (blocking, seconds).
    pub fn init_modem(&mut self) -> crate::error::Result<()> {
        self.modem.init()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_climate(&mut self) -> Reading {
        self.dht.read()
    }

    fn read_lines(&mut self) -> SensorSnapshot {
        // Flame and rain boards pull their line low when triggered.
        SensorSnapshot {
            flame_active: !hw_init::gpio_read(pins::FLAME_GPIO),
            water_active: !hw_init::gpio_read(pins::WATER_GPIO),
            motion_active: hw_init::gpio_read(pins::PIR_GPIO),
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_buzzer(&mut self, on: bool) {
        self.buzzer.set(on);
    }

    fn drive_window(&mut self, closing: bool) {
        let dir = if closing {
            Direction::Close
        } else {
            Direction::Open
        };
        self.motor.drive(dir);
    }

    fn all_off(&mut self) {
        self.buzzer.set(false);
        self.motor.stop();
    }
}

// ── AlertPort implementation ──────────────────────────────────

impl AlertPort for HardwareAdapter {
    fn send_text(&mut self, body: &str) {
        // Fire-and-forget: a failed send must not stop the buzzer path.
        if let Err(e) = self.modem.send_text(body) {
            warn!("alert send failed: {e}");
        }
    }
}

// ── SleepPort implementation ──────────────────────────────────

impl SleepPort for HardwareAdapter {
    #[cfg(target_os = "espidf")]
    fn sleep_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }

    #[cfg(not(target_os = "espidf"))]
    fn sleep_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
