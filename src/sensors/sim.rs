//! Simulated single-wire bus for host-side decoder tests.
//!
//! A [`SimBus`] pairs a virtual microsecond clock with a scripted line:
//! the script is a list of `(level, duration_us)` segments that starts
//! playing the moment the decoder releases the line to input mode.  Time
//! only advances when the decoder delays, so every sample lands on a
//! deterministic script offset and the pulse-width tests are exact.
//!
//! Compiled for host targets only — on the device the decoder runs against
//! the real GPIO via [`crate::adapters::hardware`].

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;

use super::dht11::{checksum, MonotonicClock, SensorLine};

/// One scripted line segment: hold `level` for `duration_us`.
pub type Segment = (bool, u64);

/// Standard high-pulse width for a 1 bit (datasheet nominal is 70 µs;
/// anything above the 28 µs threshold decodes the same).
const ONE_PULSE_US: u64 = 54;
/// Standard high-pulse width for a 0 bit.
const ZERO_PULSE_US: u64 = 26;
/// Low pulse that starts every bit.
const BIT_START_US: u64 = 50;

#[derive(Default)]
struct BusState {
    now_us: u64,
    /// `Some(level)` while the MCU drives the line.
    driven: Option<bool>,
    script: Vec<Segment>,
    /// Virtual time at which the script started playing.
    armed_at: Option<u64>,
    /// Count of every line interaction: direction changes, writes, samples.
    ops: usize,
}

impl BusState {
    fn level(&self) -> bool {
        if let Some(level) = self.driven {
            return level;
        }
        if let Some(t0) = self.armed_at {
            let mut offset = self.now_us.saturating_sub(t0);
            for &(level, duration) in &self.script {
                if offset < duration {
                    return level;
                }
                offset -= duration;
            }
        }
        // Released and past the script end: the pull-up wins.
        true
    }
}

/// Shared virtual bus handed to the decoder as separate line and clock
/// handles.
#[derive(Clone)]
pub struct SimBus {
    state: Rc<RefCell<BusState>>,
}

impl SimBus {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(BusState::default())),
        }
    }

    /// Install the response script; it arms on the decoder's next
    /// switch to input mode.
    pub fn load_script(&self, script: Vec<Segment>) {
        self.state.borrow_mut().script = script;
    }

    /// Jump the virtual clock forward (e.g. past the re-poll interval).
    pub fn advance_us(&self, us: u64) {
        self.state.borrow_mut().now_us += us;
    }

    /// Number of active line operations performed so far.
    pub fn op_count(&self) -> usize {
        self.state.borrow().ops
    }

    pub fn line(&self) -> SimLine {
        SimLine {
            state: Rc::clone(&self.state),
        }
    }

    pub fn clock(&self) -> SimClock {
        SimClock {
            state: Rc::clone(&self.state),
        }
    }
}

impl Default for SimBus {
    fn default() -> Self {
        Self::new()
    }
}

/// [`SensorLine`] half of the bus.
pub struct SimLine {
    state: Rc<RefCell<BusState>>,
}

impl SensorLine for SimLine {
    fn set_output(&mut self) {
        let mut s = self.state.borrow_mut();
        s.driven = Some(true);
        s.armed_at = None;
        s.ops += 1;
    }

    fn set_input(&mut self) {
        let mut s = self.state.borrow_mut();
        s.driven = None;
        s.armed_at = Some(s.now_us);
        s.ops += 1;
    }

    fn write(&mut self, high: bool) {
        let mut s = self.state.borrow_mut();
        if s.driven.is_some() {
            s.driven = Some(high);
        }
        s.ops += 1;
    }

    fn is_high(&mut self) -> bool {
        let mut s = self.state.borrow_mut();
        s.ops += 1;
        s.level()
    }
}

/// Clock/delay half of the bus.
pub struct SimClock {
    state: Rc<RefCell<BusState>>,
}

impl MonotonicClock for SimClock {
    fn now_us(&self) -> u64 {
        self.state.borrow().now_us
    }
}

impl DelayNs for SimClock {
    fn delay_ns(&mut self, ns: u32) {
        self.state.borrow_mut().now_us += u64::from(ns.div_ceil(1000));
    }
}

// ── Script builders ───────────────────────────────────────────

/// Full response script for a 5-byte frame: preamble, 40 bits with
/// standard pulse widths, release.
pub fn script_for_frame(frame: &[u8; 5]) -> Vec<Segment> {
    let mut widths = [0u64; 40];
    for (i, width) in widths.iter_mut().enumerate() {
        *width = if bit_of(frame, i) { ONE_PULSE_US } else { ZERO_PULSE_US };
    }
    script_from_widths(&widths)
}

/// Like [`script_for_frame`] but with the first payload bit's high pulse
/// forced to `first_bit_us` — used to probe the 0/1 decision boundary.
/// `frame` supplies the remaining 39 bits (and the trailer the decoder is
/// expected to reconstruct).
pub fn script_with_first_bit(first_bit_us: u64, frame: &[u8; 5]) -> Vec<Segment> {
    let mut widths = [0u64; 40];
    for (i, width) in widths.iter_mut().enumerate() {
        *width = if bit_of(frame, i) { ONE_PULSE_US } else { ZERO_PULSE_US };
    }
    widths[0] = first_bit_us;
    script_from_widths(&widths)
}

/// Build a frame with a valid trailer from four payload bytes.
pub fn frame_with_checksum(payload: [u8; 4]) -> [u8; 5] {
    let mut frame = [payload[0], payload[1], payload[2], payload[3], 0];
    frame[4] = checksum(&frame);
    frame
}

fn script_from_widths(widths: &[u64; 40]) -> Vec<Segment> {
    let mut script = vec![(false, 80), (true, 80)];
    for &width in widths {
        script.push((false, BIT_START_US));
        script.push((true, width));
    }
    script.push((false, BIT_START_US));
    script
}

fn bit_of(frame: &[u8; 5], index: usize) -> bool {
    frame[index / 8] & (1 << (7 - (index % 8))) != 0
}
