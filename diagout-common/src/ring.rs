// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Fixed-capacity circular byte queue shared between the mainline and one
//! interrupt handler.
//!
//! One slot is always left unused so that full and empty can be told apart
//! with two plain indices. `write_index` is only ever stored by the producer
//! and `read_index` only by the consumer; both are single-byte atomics, so a
//! preemption can never observe a torn or cached index.

use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};

/// Smallest supported capacity.
pub const MIN_CAPACITY: usize = 2;
/// Largest supported capacity (indices are `u8`).
pub const MAX_CAPACITY: usize = 256;

/// Rejected storage length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CapacityError {
    /// Length outside `MIN_CAPACITY..=MAX_CAPACITY`.
    OutOfRange(usize),
    /// Length is not a power of two.
    NotPowerOfTwo(usize),
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(n) => write!(
                f,
                "ring capacity {n} outside {MIN_CAPACITY}..={MAX_CAPACITY}"
            ),
            Self::NotPowerOfTwo(n) => write!(f, "ring capacity {n} is not a power of two"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CapacityError {}

/// Zeroed ring storage, usable as a `static` initializer.
pub const fn storage<const N: usize>() -> [AtomicU8; N] {
    [const { AtomicU8::new(0) }; N]
}

/// Circular byte queue over caller-supplied storage.
#[derive(Debug)]
pub struct RingBuffer<'a> {
    write_index: AtomicU8,
    read_index: AtomicU8,
    capacity_mask: u8,
    storage: &'a [AtomicU8],
}

impl<'a> RingBuffer<'a> {
    /// Bind a ring to `storage`, whose length is the capacity.
    ///
    /// `const` so that a ring can live in a `static` next to its storage.
    pub const fn new(storage: &'a [AtomicU8]) -> Result<Self, CapacityError> {
        let capacity = storage.len();
        if capacity < MIN_CAPACITY || capacity > MAX_CAPACITY {
            return Err(CapacityError::OutOfRange(capacity));
        }
        if !capacity.is_power_of_two() {
            return Err(CapacityError::NotPowerOfTwo(capacity));
        }

        Ok(Self {
            write_index: AtomicU8::new(0),
            read_index: AtomicU8::new(0),
            capacity_mask: (capacity - 1) as u8,
            storage,
        })
    }

    /// Number of slots, one of which is never filled.
    pub fn capacity(&self) -> usize {
        self.capacity_mask as usize + 1
    }

    /// Append a byte. Producer side only.
    ///
    /// Does not check for space, use [`is_full`](Self::is_full) first. Putting
    /// into a full ring makes it read as empty and loses its contents.
    pub fn put(&self, byte: u8) {
        let write = self.write_index.load(Ordering::Relaxed);
        self.storage[write as usize].store(byte, Ordering::Relaxed);
        self.write_index
            .store(write.wrapping_add(1) & self.capacity_mask, Ordering::Release);
    }

    /// Remove the oldest byte. Consumer side only.
    ///
    /// Does not check for data, use [`is_empty`](Self::is_empty) first.
    pub fn get(&self) -> u8 {
        let read = self.read_index.load(Ordering::Relaxed);
        let byte = self.storage[read as usize].load(Ordering::Relaxed);
        self.read_index
            .store(read.wrapping_add(1) & self.capacity_mask, Ordering::Release);
        byte
    }

    pub fn is_empty(&self) -> bool {
        self.write_index.load(Ordering::Acquire) == self.read_index.load(Ordering::Acquire)
    }

    pub fn is_full(&self) -> bool {
        let write = self.write_index.load(Ordering::Acquire);
        (write.wrapping_add(1) & self.capacity_mask) == self.read_index.load(Ordering::Acquire)
    }

    /// Bytes currently queued.
    pub fn used(&self) -> usize {
        let write = self.write_index.load(Ordering::Acquire);
        let read = self.read_index.load(Ordering::Acquire);
        (write.wrapping_sub(read) & self.capacity_mask) as usize
    }

    /// Occupancy in hundredths of a percent of the capacity (0..=10000).
    pub fn percent_used(&self) -> u16 {
        (self.used() * 10_000 / self.capacity()) as u16
    }
}
