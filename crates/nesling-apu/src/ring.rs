//! Lock-free single-producer/single-consumer sample ring.
//!
//! The emulator thread pushes mixed samples; an audio thread may pop
//! them concurrently. Indices grow monotonically and are masked into a
//! power-of-two slot array; the producer publishes its index with
//! Release ordering and the consumer observes it with Acquire, and
//! vice versa for the read index. A full ring drops the newest sample
//! rather than blocking.

use std::sync::atomic::{AtomicI16, AtomicUsize, Ordering};

/// SPSC ring of mono 16-bit samples.
pub struct SampleRing {
    slots: Box<[AtomicI16]>,
    mask: usize,
    /// Producer position (next slot to write).
    head: AtomicUsize,
    /// Consumer position (next slot to read).
    tail: AtomicUsize,
    /// Samples dropped to overflow since creation.
    dropped: AtomicUsize,
}

impl SampleRing {
    /// Ring holding at least `capacity` samples, rounded up to a power
    /// of two.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let size = capacity.max(2).next_power_of_two();
        let slots = (0..size).map(|_| AtomicI16::new(0)).collect::<Vec<_>>();
        Self {
            slots: slots.into_boxed_slice(),
            mask: size - 1,
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            dropped: AtomicUsize::new(0),
        }
    }

    /// Usable capacity in samples.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Samples currently buffered.
    #[must_use]
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        head.wrapping_sub(tail)
    }

    /// No samples buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Producer side: append one sample, dropping it when full.
    /// Returns false on overflow.
    pub fn push(&self, sample: i16) -> bool {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);
        if head.wrapping_sub(tail) == self.slots.len() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        self.slots[head & self.mask].store(sample, Ordering::Relaxed);
        self.head.store(head.wrapping_add(1), Ordering::Release);
        true
    }

    /// Consumer side: fill `out` with up to `out.len()` samples and
    /// return the count delivered.
    pub fn pop_into(&self, out: &mut [i16]) -> usize {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);
        let available = head.wrapping_sub(tail);
        let count = available.min(out.len());
        for (i, slot) in out.iter_mut().enumerate().take(count) {
            *slot = self.slots[tail.wrapping_add(i) & self.mask].load(Ordering::Relaxed);
        }
        self.tail.store(tail.wrapping_add(count), Ordering::Release);
        count
    }

    /// Total samples dropped to overflow.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }
}
