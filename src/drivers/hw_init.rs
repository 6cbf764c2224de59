//! One-shot hardware peripheral initialization.
//!
//! Configures GPIO directions, the SIM800 UART, and the GPIO interrupt
//! service using raw ESP-IDF sys calls.  Called once from `main()` before
//! the event loop starts.
//!
//! The DHT11 data line is deliberately *not* configured here — the
//! decoder owns it and switches its direction on every read.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    UartInitFailed(i32),
    IsrInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::UartInitFailed(rc) => write!(f, "UART init failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before event loop; single-threaded.
    unsafe {
        init_gpio_outputs()?;
        init_gpio_inputs()?;
        init_uart()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    // The sensor boards drive their outputs push-pull; no internal pulls.
    let input_pins = [pins::FLAME_GPIO, pins::WATER_GPIO, pins::PIR_GPIO];

    for &pin in &input_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }

    info!("hw_init: GPIO inputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    // Idle level for the active-low sensor lines.
    true
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let output_pins = [
        pins::BUZZER_GPIO,
        pins::MOTOR_IN1_GPIO,
        pins::MOTOR_IN2_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe {
        gpio_set_level(pin, if high { 1 } else { 0 });
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

/// Switch a pin between input and push-pull output at runtime.
/// The DHT11 decoder flips its data line twice per read.
#[cfg(target_os = "espidf")]
pub fn gpio_set_output(pin: i32, output: bool) {
    let mode = if output {
        gpio_mode_t_GPIO_MODE_OUTPUT
    } else {
        gpio_mode_t_GPIO_MODE_INPUT
    };
    // SAFETY: gpio_set_direction only touches the direction register of
    // `pin`; the DHT line is exclusively owned by the decoder during a read.
    unsafe {
        gpio_set_direction(pin, mode);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_set_output(_pin: i32, _output: bool) {}

// ── SIM800 UART ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_uart() -> Result<(), HwInitError> {
    let cfg = uart_config_t {
        baud_rate: 9600,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };

    // SAFETY: UART1 is exclusively owned by the modem; configured once
    // here before any writer exists.
    unsafe {
        let ret = uart_param_config(uart_port_t_UART_NUM_1, &cfg);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::UartInitFailed(ret));
        }

        let ret = uart_set_pin(
            uart_port_t_UART_NUM_1,
            pins::SIM800_TX_GPIO,
            pins::SIM800_RX_GPIO,
            UART_PIN_NO_CHANGE,
            UART_PIN_NO_CHANGE,
        );
        if ret != ESP_OK as i32 {
            return Err(HwInitError::UartInitFailed(ret));
        }

        let ret = uart_driver_install(
            uart_port_t_UART_NUM_1,
            (pins::SIM800_UART_BUF * 2) as i32,
            0,
            0,
            core::ptr::null_mut(),
            0,
        );
        if ret != ESP_OK as i32 {
            return Err(HwInitError::UartInitFailed(ret));
        }
    }

    info!("hw_init: UART1 configured for SIM800 (9600 8N1)");
    Ok(())
}

/// Blocking write of a complete command to the modem UART.
/// Returns `false` on a short or failed write.
#[cfg(target_os = "espidf")]
pub fn uart_write(bytes: &[u8]) -> bool {
    // SAFETY: uart_write_bytes copies from the slice into the driver's TX
    // ring; the driver was installed in init_uart().
    let written = unsafe {
        uart_write_bytes(
            uart_port_t_UART_NUM_1,
            bytes.as_ptr().cast(),
            bytes.len(),
        )
    };
    written == bytes.len() as i32
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_write(bytes: &[u8]) -> bool {
    log::debug!("uart(sim): {} bytes", bytes.len());
    true
}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
use crate::events::{push_edge, SensorSource};

#[cfg(target_os = "espidf")]
unsafe extern "C" fn flame_gpio_isr(_arg: *mut core::ffi::c_void) {
    push_edge(SensorSource::Flame);
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn water_gpio_isr(_arg: *mut core::ffi::c_void) {
    push_edge(SensorSource::Water);
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn pir_gpio_isr(_arg: *mut core::ffi::c_void) {
    push_edge(SensorSource::Motion);
}

/// Install the per-pin GPIO ISR service and register the three edge
/// handlers.  Call after init_peripherals() and before the event loop.
///
/// The handlers only push a source token onto the lock-free edge queue;
/// all corroboration and actuation happens in the main loop.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable). ISR handlers registered
    // below are static functions that only push to the lock-free edge queue.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        // Flame sensor: falling edge (active low).
        gpio_set_intr_type(pins::FLAME_GPIO, gpio_int_type_t_GPIO_INTR_NEGEDGE);
        gpio_isr_handler_add(pins::FLAME_GPIO, Some(flame_gpio_isr), core::ptr::null_mut());
        gpio_intr_enable(pins::FLAME_GPIO);

        // Rain sensor: falling edge (active low).
        gpio_set_intr_type(pins::WATER_GPIO, gpio_int_type_t_GPIO_INTR_NEGEDGE);
        gpio_isr_handler_add(pins::WATER_GPIO, Some(water_gpio_isr), core::ptr::null_mut());
        gpio_intr_enable(pins::WATER_GPIO);

        // PIR: rising edge (active high).
        gpio_set_intr_type(pins::PIR_GPIO, gpio_int_type_t_GPIO_INTR_POSEDGE);
        gpio_isr_handler_add(pins::PIR_GPIO, Some(pir_gpio_isr), core::ptr::null_mut());
        gpio_intr_enable(pins::PIR_GPIO);

        info!("hw_init: ISR service installed (flame, water, pir)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
