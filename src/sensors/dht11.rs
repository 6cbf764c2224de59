//! DHT11 humidity/temperature sensor — single-wire protocol decoder.
//!
//! The DHT11 multiplexes request and response on one data line using pulse
//! widths instead of clocked framing: the MCU holds the line low for 20 ms
//! to request a reading, the sensor answers with an 80 µs low + 80 µs high
//! preamble, then 40 payload bits.  Every bit starts with a ~50 µs low
//! pulse; the width of the following high pulse carries the value (longer
//! than 28 µs = 1).  There is no UART framing to lean on, so the decoder
//! busy-waits and samples the line once per microsecond.
//!
//! The sensor's datasheet caps the query rate at one reading per cycle
//! time, so the decoder caches the last [`Reading`] (including failed
//! ones) and only touches the line again after [`MIN_POLL_INTERVAL_US`].
//!
//! ## Dual-target design
//!
//! The line and the clock sit behind the [`SensorLine`] and
//! [`MonotonicClock`] traits (pacing goes through `embedded_hal`'s
//! [`DelayNs`]).  Production wires these to a raw GPIO and the esp-idf
//! high-resolution timer; host tests drive a scripted simulated line on a
//! virtual clock (see [`super::sim`]).

use std::sync::Mutex;

use embedded_hal::delay::DelayNs;
use log::debug;

/// Minimum spacing between two decode attempts, in microseconds.
/// Calls inside this window return the cached reading without any line
/// activity.  This is a re-poll guard, not a TTL: failed readings are
/// cached and reused just like successful ones.
pub const MIN_POLL_INTERVAL_US: u64 = 10_000_000;

/// Request: hold the line low for 20 ms...
const START_LOW_US: u32 = 20_000;
/// ...then high for 40 µs before releasing it to the sensor.
const START_HIGH_US: u32 = 40;
/// Ceiling for each response preamble phase (low, then high).
const RESPONSE_CEILING_US: u16 = 80;
/// Ceiling for the low pulse that starts every bit.
const BIT_START_CEILING_US: u16 = 50;
/// Ceiling for the high pulse that carries the bit value.
const BIT_VALUE_CEILING_US: u16 = 70;
/// High pulses strictly longer than this decode as 1.
const BIT_ONE_THRESHOLD_US: u16 = 28;

const FRAME_BYTES: usize = 5;
const FRAME_BITS: usize = FRAME_BYTES * 8;

// ── Reading ───────────────────────────────────────────────────

/// Outcome classification of one decode attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// Frame received and checksum verified.
    Ok,
    /// The line did not complete the protocol within its bounded windows.
    Timeout,
    /// Frame completed but the trailer byte did not match the payload.
    ChecksumError,
}

/// One humidity/temperature reading.  Immutable once produced; the
/// temperature and humidity fields are only meaningful when `status` is
/// [`ReadStatus::Ok`] and hold `-1` otherwise.  Callers that compare the
/// fields against positive thresholds can skip the status check — the
/// sentinel never satisfies a `> threshold` test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub status: ReadStatus,
    /// Integer degrees Celsius.  The DHT11 transmits a fractional byte as
    /// well, but it is always zero on this part and is not modeled.
    pub temperature_c: i16,
    /// Integer relative humidity, percent.
    pub humidity_pct: i16,
}

impl Reading {
    const fn timeout() -> Self {
        Self {
            status: ReadStatus::Timeout,
            temperature_c: -1,
            humidity_pct: -1,
        }
    }

    const fn checksum_error() -> Self {
        Self {
            status: ReadStatus::ChecksumError,
            temperature_c: -1,
            humidity_pct: -1,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ReadStatus::Ok
    }
}

// ── Hardware seams ────────────────────────────────────────────

/// One bidirectional digital line with runtime direction switching.
/// The external pull-up keeps the released line high.
pub trait SensorLine {
    /// Switch the pin to push-pull output.
    fn set_output(&mut self);
    /// Release the pin to input; the sensor now drives the line.
    fn set_input(&mut self);
    /// Drive the line (output mode only).
    fn write(&mut self, high: bool);
    /// Sample the current line level.
    fn is_high(&mut self) -> bool;
}

/// Monotonic microsecond clock, used for the re-poll interval guard.
pub trait MonotonicClock {
    fn now_us(&self) -> u64;
}

// ── Timing primitive ──────────────────────────────────────────

/// Result of one bounded pulse-width measurement.  A distinct variant for
/// the timeout case means no integer sentinel can ever collide with a
/// legitimate duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pulse {
    /// The line left `level` after this many microseconds (≤ ceiling).
    Width(u16),
    /// The line was still at `level` after the ceiling elapsed.
    Timeout,
}

// ── Decoder ───────────────────────────────────────────────────

/// DHT11 protocol decoder with a minimum re-poll interval cache.
///
/// `read()` takes `&self`: the line, timer, and cache live behind one
/// mutex that is held for the whole check-and-maybe-decode operation, so
/// concurrent callers can never interleave a decode with a cache update
/// or tear the (timestamp, reading) pair.
pub struct Dht11<L, T> {
    inner: Mutex<Inner<L, T>>,
}

struct Inner<L, T> {
    line: L,
    timer: T,
    last_attempt_us: Option<u64>,
    last: Reading,
}

impl<L, T> Dht11<L, T>
where
    L: SensorLine,
    T: DelayNs + MonotonicClock,
{
    pub fn new(line: L, timer: T) -> Self {
        Self {
            inner: Mutex::new(Inner {
                line,
                timer,
                last_attempt_us: None,
                last: Reading::timeout(),
            }),
        }
    }

    /// Return the current reading, decoding a fresh one only if the
    /// minimum re-poll interval has elapsed since the last attempt.
    ///
    /// Blocks the calling context for up to ~25 ms during a live decode.
    /// Failures are ordinary return values; one call never retries.
    pub fn read(&self) -> Reading {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.read()
    }
}

impl<L, T> Inner<L, T>
where
    L: SensorLine,
    T: DelayNs + MonotonicClock,
{
    fn read(&mut self) -> Reading {
        let now = self.timer.now_us();
        if let Some(last) = self.last_attempt_us {
            if now.saturating_sub(last) < MIN_POLL_INTERVAL_US {
                return self.last;
            }
        }
        self.last_attempt_us = Some(now);
        self.last = self.decode();
        debug!(
            "dht11: status={:?} T={} H={}",
            self.last.status, self.last.temperature_c, self.last.humidity_pct
        );
        self.last
    }

    fn decode(&mut self) -> Reading {
        self.send_start();

        // Preamble: the sensor acknowledges with ~80 µs low, ~80 µs high.
        if matches!(self.measure(false, RESPONSE_CEILING_US), Pulse::Timeout)
            || matches!(self.measure(true, RESPONSE_CEILING_US), Pulse::Timeout)
        {
            return Reading::timeout();
        }

        let mut frame = [0u8; FRAME_BYTES];
        for bit in 0..FRAME_BITS {
            if matches!(self.measure(false, BIT_START_CEILING_US), Pulse::Timeout) {
                return Reading::timeout();
            }
            match self.measure(true, BIT_VALUE_CEILING_US) {
                Pulse::Timeout => return Reading::timeout(),
                Pulse::Width(us) if us > BIT_ONE_THRESHOLD_US => {
                    // MSB first within each byte; zeros need no write.
                    frame[bit / 8] |= 1 << (7 - (bit % 8));
                }
                Pulse::Width(_) => {}
            }
        }

        if frame[FRAME_BYTES - 1] != checksum(&frame) {
            return Reading::checksum_error();
        }

        Reading {
            status: ReadStatus::Ok,
            temperature_c: i16::from(frame[2]),
            humidity_pct: i16::from(frame[0]),
        }
    }

    /// 20 ms low + 40 µs high request, then release the line to the sensor.
    fn send_start(&mut self) {
        self.line.set_output();
        self.line.write(false);
        self.timer.delay_us(START_LOW_US);
        self.line.write(true);
        self.timer.delay_us(START_HIGH_US);
        self.line.set_input();
    }

    /// Count how long the line stays at `level`, sampling once per
    /// microsecond.  Returns [`Pulse::Timeout`] once the count would
    /// exceed `ceiling_us`, so a returned width never does.
    fn measure(&mut self, level: bool, ceiling_us: u16) -> Pulse {
        let mut elapsed: u16 = 0;
        while self.line.is_high() == level {
            elapsed += 1;
            if elapsed > ceiling_us {
                return Pulse::Timeout;
            }
            self.timer.delay_us(1);
        }
        Pulse::Width(elapsed)
    }
}

/// Trailer byte: wrapping sum of the four payload bytes.
pub fn checksum(frame: &[u8; FRAME_BYTES]) -> u8 {
    frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}
