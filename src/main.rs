//! HomeGuard Firmware — Main Entry Point
//!
//! Hexagonal architecture with interrupt-driven edge events and a 1 Hz
//! housekeeping loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter            LogEventSink    Sim800Modem        │
//! │  (Sensor+Actuator+Sleep)    (EventSink)     (AlertPort)        │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AlarmService (pure logic)                 │    │
//! │  │  edge corroboration · alarm sequence · window policy   │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  edge queue (ISR → loop) · DHT11 decoder (re-poll cached)      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use homeguard::adapters::hardware::HardwareAdapter;
use homeguard::adapters::log_sink::LogEventSink;
use homeguard::app::ports::ActuatorPort;
use homeguard::app::service::AlarmService;
use homeguard::config::SystemConfig;
use homeguard::drivers::hw_init;
use homeguard::events::drain_edges;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  HomeGuard v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Peripheral bring-up ────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = hw_init::init_isr_service() {
        log::error!("ISR service init failed: {} — continuing without edge events", e);
    }

    // ── 3. Adapters ───────────────────────────────────────────
    let config = SystemConfig::default();
    let poll_ms = config.poll_interval_ms;

    let mut hw = HardwareAdapter::new(&config);
    hw.all_off();

    // Give the modem time to register on the network, then bring it up.
    esp_idf_hal::delay::FreeRtos::delay_ms(1000);
    if let Err(e) = hw.init_modem() {
        warn!("modem init failed ({e}) — SMS alerts disabled this session");
    }

    // ── 4. Domain service ─────────────────────────────────────
    let mut sink = LogEventSink::new();
    let mut service = AlarmService::new(config);
    service.start(&mut sink);

    // ── 5. Event loop ─────────────────────────────────────────
    //
    // ISRs only enqueue a source token; everything that blocks (DHT11
    // decode, SMS pacing, buzzer and motor holds) runs here in task
    // context.
    loop {
        drain_edges(|source| service.handle_edge(source, &mut hw, &mut sink));
        service.poll_tick(&mut hw, &mut sink);
        esp_idf_hal::delay::FreeRtos::delay_ms(poll_ms);
    }
}
