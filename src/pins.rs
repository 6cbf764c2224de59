//! GPIO / peripheral pin assignments for the HomeGuard main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// DHT11 humidity/temperature sensor (single-wire, bidirectional)
// ---------------------------------------------------------------------------

/// Data line shared by request and response; external 4.7 kΩ pull-up so the
/// idle level is HIGH.  Direction is switched at runtime by the decoder.
pub const DHT_GPIO: i32 = 19;

// ---------------------------------------------------------------------------
// Event sensor lines (edge-triggered inputs)
// ---------------------------------------------------------------------------

/// KY-026 flame sensor digital output.  LOW = flame detected (falling edge).
pub const FLAME_GPIO: i32 = 23;
/// FC-37 rain-drop sensor digital output.  LOW = water on the grid
/// (falling edge); HIGH = dry.
pub const WATER_GPIO: i32 = 27;
/// PIR motion sensor output.  HIGH = movement detected (rising edge).
pub const PIR_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// Actuators
// ---------------------------------------------------------------------------

/// Alarm buzzer (active HIGH).
pub const BUZZER_GPIO: i32 = 2;

/// Window motor H-bridge inputs.  IN1=1/IN2=0 pushes the window open,
/// IN1=0/IN2=1 pulls it closed.
pub const MOTOR_IN1_GPIO: i32 = 32;
pub const MOTOR_IN2_GPIO: i32 = 33;

// ---------------------------------------------------------------------------
// SIM800 cellular modem (UART1, 9600 8N1)
// ---------------------------------------------------------------------------

/// MCU TX → modem RX.
pub const SIM800_TX_GPIO: i32 = 1;
/// MCU RX ← modem TX.
pub const SIM800_RX_GPIO: i32 = 3;

/// UART receive buffer size for the modem driver.
pub const SIM800_UART_BUF: usize = 1024;
