//! Interrupt-driven edge event system.
//!
//! The three event sensor lines (flame, water, PIR) are wired to GPIO
//! interrupts.  An ISR must not spend seconds reading the DHT11 or pulsing
//! the buzzer, so the ISR only records *which* line fired; the main loop
//! drains the queue and runs the full corroborate-and-actuate sequence in
//! task context.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Flame ISR   │────▶│              │     │              │
//! │ Water ISR   │────▶│  Edge Queue  │────▶│  Main Loop   │
//! │ PIR ISR     │────▶│  (lock-free) │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use core::sync::atomic::{AtomicU8, Ordering};

/// Maximum number of pending edge events.
/// Power of 2 for efficient ring buffer modulo.
const EDGE_QUEUE_CAP: usize = 16;

/// Identity of the sensor line that produced an edge.  This is the only
/// payload an edge carries — level and timing are not captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SensorSource {
    /// KY-026 flame sensor (falling edge = flame detected).
    Flame = 0,
    /// FC-37 rain-drop sensor (falling edge = water on the grid).
    Water = 1,
    /// PIR motion sensor (rising edge = movement detected).
    Motion = 2,
}

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// ISRs write (produce), main loop reads (consume).
// Uses atomic head/tail indices.  The buffer is intentionally
// kept in a static so ISR callbacks can access it.

static EDGE_HEAD: AtomicU8 = AtomicU8::new(0);
static EDGE_TAIL: AtomicU8 = AtomicU8::new(0);
// SAFETY: EDGE_BUFFER is written only by push_edge (ISR context, single
// producer) at the head index and read only by pop_edge (main loop, single
// consumer) at the tail index.  The Release/Acquire pairs on the indices
// order the slot access; no concurrent access to the same slot is possible.
static mut EDGE_BUFFER: [u8; EDGE_QUEUE_CAP] = [0; EDGE_QUEUE_CAP];

/// Push an edge into the queue.
/// Safe to call from ISR context (lock-free).
/// Returns `false` if the queue is full (edge dropped).
pub fn push_edge(source: SensorSource) -> bool {
    let head = EDGE_HEAD.load(Ordering::Relaxed);
    let tail = EDGE_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % EDGE_QUEUE_CAP as u8;

    if next_head == tail {
        return false; // Queue full — drop edge.
    }

    // SAFETY: single producer; the head slot is not visible to the consumer
    // until the Release store below.
    unsafe {
        EDGE_BUFFER[head as usize] = source as u8;
    }

    EDGE_HEAD.store(next_head, Ordering::Release);
    true
}

/// Pop the next edge from the queue.
/// Called from the main loop (single consumer).
/// Returns `None` if the queue is empty.
pub fn pop_edge() -> Option<SensorSource> {
    let tail = EDGE_TAIL.load(Ordering::Relaxed);
    let head = EDGE_HEAD.load(Ordering::Acquire);

    if tail == head {
        return None; // Empty.
    }

    // SAFETY: single consumer; the tail slot was published by the producer's
    // Release store on EDGE_HEAD.
    let raw = unsafe { EDGE_BUFFER[tail as usize] };
    EDGE_TAIL.store((tail + 1) % EDGE_QUEUE_CAP as u8, Ordering::Release);

    source_from_u8(raw)
}

/// Drain all pending edges into a callback, in FIFO order.
///
/// Simultaneous edges on different lines arrive as independent queue
/// entries; no ordering is guaranteed beyond ISR delivery order.
pub fn drain_edges(mut handler: impl FnMut(SensorSource)) {
    while let Some(source) = pop_edge() {
        handler(source);
    }
}

/// Number of pending edges.
pub fn queue_len() -> usize {
    let head = EDGE_HEAD.load(Ordering::Relaxed) as usize;
    let tail = EDGE_TAIL.load(Ordering::Relaxed) as usize;
    (head + EDGE_QUEUE_CAP - tail) % EDGE_QUEUE_CAP
}

// ── Internal ──────────────────────────────────────────────────

fn source_from_u8(raw: u8) -> Option<SensorSource> {
    match raw {
        0 => Some(SensorSource::Flame),
        1 => Some(SensorSource::Water),
        2 => Some(SensorSource::Motion),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the static queue is never touched concurrently.
    #[test]
    fn fifo_order_and_overflow() {
        assert_eq!(queue_len(), 0);

        assert!(push_edge(SensorSource::Flame));
        assert!(push_edge(SensorSource::Water));
        assert!(push_edge(SensorSource::Motion));
        assert_eq!(queue_len(), 3);

        assert_eq!(pop_edge(), Some(SensorSource::Flame));
        assert_eq!(pop_edge(), Some(SensorSource::Water));
        assert_eq!(pop_edge(), Some(SensorSource::Motion));
        assert_eq!(pop_edge(), None);

        // One slot is sacrificed to distinguish full from empty.
        for _ in 0..EDGE_QUEUE_CAP - 1 {
            assert!(push_edge(SensorSource::Motion));
        }
        assert!(!push_edge(SensorSource::Flame), "full queue must drop");

        let mut drained = 0;
        drain_edges(|_| drained += 1);
        assert_eq!(drained, EDGE_QUEUE_CAP - 1);
    }
}
