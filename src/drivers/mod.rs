//! Actuator drivers and one-shot hardware bring-up.

pub mod buzzer;
pub mod hw_init;
pub mod window_motor;
