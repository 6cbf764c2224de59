//! SIM800 cellular modem adapter — SMS alerts over UART AT commands.
//!
//! The modem is a fire-and-forget collaborator: commands are written to
//! the UART and paced by fixed delays; responses are never read and no
//! delivery acknowledgement is awaited.  A lost SMS is a lost SMS — the
//! buzzer still sounds.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes through the UART driver installed by hw_init and
//! parks the task between commands.
//! On host/test: UART writes are logged and the pacing delays collapse.

use core::fmt::Write as _;

use log::info;

use crate::config::PHONE_NUMBER_CAP;
use crate::drivers::hw_init;
use crate::error::{CommsError, Result};

/// Settle time between AT commands.  The SIM800 has no flow control at
/// 9600 baud; a fixed pause is the datasheet-sanctioned approach.
const CMD_PAUSE_MS: u32 = 1000;

/// Command buffer capacity — covers `AT+CMGS` plus the longest alert body.
const CMD_CAP: usize = 192;

/// Terminates an SMS body in text mode.
const CTRL_Z: char = '\u{1A}';

pub struct Sim800Modem {
    number: heapless::String<PHONE_NUMBER_CAP>,
}

impl Sim800Modem {
    pub fn new(number: heapless::String<PHONE_NUMBER_CAP>) -> Self {
        Self { number }
    }

    /// AT bring-up: probe the modem, then switch to SMS text mode.
    /// Blocking (seconds) — call once before the event loop.
    pub fn init(&mut self) -> Result<()> {
        self.send_command("AT\r\n")?;
        self.pause();
        self.send_command("AT+CMGF=1\r\n")?;
        self.pause();
        info!("sim800: modem initialised in text mode");
        Ok(())
    }

    /// Send one SMS to the configured alert number.
    pub fn send_text(&mut self, body: &str) -> Result<()> {
        let mut cmd: heapless::String<CMD_CAP> = heapless::String::new();
        write!(cmd, "AT+CMGS=\"{}\"\r\n", self.number)
            .map_err(|_| CommsError::CommandTooLong)?;
        self.send_command(&cmd)?;
        self.pause();

        let mut msg: heapless::String<CMD_CAP> = heapless::String::new();
        write!(msg, "{}{}\r\n", body, CTRL_Z).map_err(|_| CommsError::CommandTooLong)?;
        self.send_command(&msg)?;
        self.pause();

        info!("sim800: alert sent to {}", self.number);
        Ok(())
    }

    fn send_command(&self, cmd: &str) -> Result<()> {
        if hw_init::uart_write(cmd.as_bytes()) {
            Ok(())
        } else {
            Err(CommsError::UartWriteFailed.into())
        }
    }

    #[cfg(target_os = "espidf")]
    fn pause(&self) {
        esp_idf_hal::delay::FreeRtos::delay_ms(CMD_PAUSE_MS);
    }

    #[cfg(not(target_os = "espidf"))]
    fn pause(&self) {
        // No modem to settle on the host.
        log::debug!("sim800(sim): pause {}ms skipped", CMD_PAUSE_MS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn modem() -> Sim800Modem {
        Sim800Modem::new(heapless::String::try_from("+84852517099").unwrap())
    }

    #[test]
    fn short_body_sends() {
        assert!(modem().send_text("Your house is on fire!").is_ok());
    }

    #[test]
    fn oversized_body_is_rejected_not_truncated() {
        let body = "x".repeat(CMD_CAP + 1);
        let err = modem().send_text(&body).unwrap_err();
        assert_eq!(err, Error::Comms(CommsError::CommandTooLong));
    }
}
