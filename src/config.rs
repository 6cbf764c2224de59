//! System configuration parameters
//!
//! All tunable parameters for the HomeGuard monitor.  Thresholds mirror the
//! deployed installation: a fire is only credible above 50 °C, the window
//! closes when ambient humidity passes 80 % and re-opens below 60 %.

use serde::{Deserialize, Serialize};

/// Maximum length of the alert destination phone number (E.164 + margin).
pub const PHONE_NUMBER_CAP: usize = 20;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Alarm corroboration thresholds ---
    /// Temperature (°C) above which a flame edge is treated as a real fire
    pub fire_temperature_c: i16,
    /// Humidity (%) above which a water edge closes the window
    pub close_window_humidity_pct: i16,
    /// Humidity (%) below which the poll loop re-opens the window
    pub open_window_humidity_pct: i16,

    // --- Alarm sequence timing ---
    /// Pause between the SMS send and the buzzer pulse (milliseconds)
    pub alarm_pause_ms: u32,
    /// How long the buzzer sounds per alarm (milliseconds)
    pub buzzer_hold_ms: u32,
    /// How long the window motor is driven per command (milliseconds)
    pub motor_run_ms: u32,

    // --- Timing ---
    /// Main polling loop interval (milliseconds)
    pub poll_interval_ms: u32,

    // --- Notification ---
    /// Destination for alert SMS messages
    pub alert_phone_number: heapless::String<PHONE_NUMBER_CAP>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Thresholds
            fire_temperature_c: 50,
            close_window_humidity_pct: 80,
            open_window_humidity_pct: 60,

            // Alarm timing
            alarm_pause_ms: 1000,
            buzzer_hold_ms: 1000,
            motor_run_ms: 5000,

            // Polling
            poll_interval_ms: 1000, // 1 Hz

            // Notification
            alert_phone_number: heapless::String::try_from("+84852517099")
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(c.fire_temperature_c > 0);
        assert!(c.close_window_humidity_pct > 0 && c.close_window_humidity_pct <= 100);
        assert!(c.alarm_pause_ms > 0);
        assert!(c.buzzer_hold_ms > 0);
        assert!(c.motor_run_ms > 0);
        assert!(c.poll_interval_ms > 0);
        assert!(!c.alert_phone_number.is_empty());
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.fire_temperature_c, c2.fire_temperature_c);
        assert_eq!(c.close_window_humidity_pct, c2.close_window_humidity_pct);
        assert_eq!(c.alert_phone_number, c2.alert_phone_number);
    }

    #[test]
    fn open_below_close_invariant() {
        let c = SystemConfig::default();
        assert!(
            c.open_window_humidity_pct < c.close_window_humidity_pct,
            "open threshold must sit below close to prevent the two motor \
             paths from fighting each other"
        );
    }
}
