//! Alarm buzzer driver (active-HIGH piezo sounder).
//!
//! A dumb actuator: the alarm sequencing (pause, hold, silence) lives in
//! the application service, not here.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct Buzzer {
    on: bool,
}

impl Buzzer {
    pub fn new() -> Self {
        Self { on: false }
    }

    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(pins::BUZZER_GPIO, on);
        self.on = on;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl Default for Buzzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_commanded_state() {
        let mut buzzer = Buzzer::new();
        assert!(!buzzer.is_on());
        buzzer.set(true);
        assert!(buzzer.is_on());
        buzzer.set(false);
        assert!(!buzzer.is_on());
    }
}
