//! Unified error types for the HomeGuard firmware.
//!
//! Sensor *readings* never surface here — the DHT11 decoder reports its
//! failures as a status field on [`Reading`](crate::sensors::dht11::Reading)
//! so that callers can cache and compare them as ordinary values.  This
//! module covers the infrastructure failures: modem I/O and peripheral
//! bring-up.  All variants are `Copy` so they pass through the control loop
//! without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible infrastructure operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A communication subsystem failed.
    Comms(CommsError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comms(e) => write!(f, "comms: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Communications errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommsError {
    /// UART write to the modem failed or wrote short.
    UartWriteFailed,
    /// UART driver could not be installed or configured.
    UartInitFailed,
    /// Command exceeds the modem command buffer.
    CommandTooLong,
}

impl fmt::Display for CommsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UartWriteFailed => write!(f, "UART write failed"),
            Self::UartInitFailed => write!(f, "UART init failed"),
            Self::CommandTooLong => write!(f, "command too long"),
        }
    }
}

impl From<CommsError> for Error {
    fn from(e: CommsError) -> Self {
        Self::Comms(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
