// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Unit tests for the ring buffer.

mod common;

use std::collections::VecDeque;

use diagout::ring::{CapacityError, RingBuffer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use common::slots;

#[test]
fn test_new_ring_is_empty_and_not_full() {
    let storage = slots::<8>();
    let ring = RingBuffer::new(&storage).unwrap();

    assert!(ring.is_empty());
    assert!(!ring.is_full());
    assert_eq!(ring.used(), 0);
    assert_eq!(ring.capacity(), 8);
}

#[test]
fn test_full_after_capacity_minus_one_puts() {
    let storage = slots::<8>();
    let ring = RingBuffer::new(&storage).unwrap();

    for i in 0..7 {
        assert!(!ring.is_full(), "full too early after {i} puts");
        ring.put(i);
    }

    assert!(ring.is_full());
    assert!(!ring.is_empty());
    assert_eq!(ring.used(), 7);
}

#[test]
fn test_fifo_order_across_wraparound() {
    let storage = slots::<4>();
    let ring = RingBuffer::new(&storage).unwrap();
    let mut out = Vec::new();

    for chunk in [b"abc", b"def", b"ghi"] {
        for &b in chunk {
            ring.put(b);
        }
        while !ring.is_empty() {
            out.push(ring.get());
        }
    }

    assert_eq!(out, b"abcdefghi");
}

#[test]
fn test_randomized_interleaving_matches_queue() {
    let storage = slots::<16>();
    let ring = RingBuffer::new(&storage).unwrap();
    let mut model = VecDeque::new();
    let mut rng = StdRng::seed_from_u64(0x5EED);

    for _ in 0..10_000 {
        if rng.gen_bool(0.55) && !ring.is_full() {
            let byte: u8 = rng.gen();
            ring.put(byte);
            model.push_back(byte);
        } else if !ring.is_empty() {
            assert_eq!(Some(ring.get()), model.pop_front());
        }
        assert_eq!(ring.used(), model.len());
        assert_eq!(ring.is_empty(), model.is_empty());
        assert_eq!(ring.is_full(), model.len() == 15);
    }
}

#[test]
fn test_capacity_256_uses_full_index_range() {
    let storage = slots::<256>();
    let ring = RingBuffer::new(&storage).unwrap();

    for i in 0..255u8 {
        ring.put(i);
    }
    assert!(ring.is_full());
    assert_eq!(ring.used(), 255);

    for i in 0..255u8 {
        assert_eq!(ring.get(), i);
    }
    assert!(ring.is_empty());
}

#[test]
fn test_percent_used() {
    let storage = slots::<8>();
    let ring = RingBuffer::new(&storage).unwrap();

    assert_eq!(ring.percent_used(), 0);
    ring.put(1);
    ring.put(2);
    assert_eq!(ring.percent_used(), 2_500);
    for b in 3..8 {
        ring.put(b);
    }
    assert_eq!(ring.percent_used(), 8_750);
}

#[test]
fn test_rejects_bad_capacity() {
    let one = slots::<1>();
    let six = slots::<6>();
    let big = slots::<512>();

    assert_eq!(RingBuffer::new(&one).unwrap_err(), CapacityError::OutOfRange(1));
    assert_eq!(RingBuffer::new(&six).unwrap_err(), CapacityError::NotPowerOfTwo(6));
    assert_eq!(RingBuffer::new(&big).unwrap_err(), CapacityError::OutOfRange(512));
    assert!(RingBuffer::new(&[]).is_err());
}

#[test]
fn test_capacity_error_display() {
    assert_eq!(
        CapacityError::NotPowerOfTwo(6).to_string(),
        "ring capacity 6 is not a power of two"
    );
    assert_eq!(
        CapacityError::OutOfRange(512).to_string(),
        "ring capacity 512 outside 2..=256"
    );
}

#[test]
fn test_ring_in_static() {
    use std::sync::atomic::AtomicU8;

    static STORAGE: [AtomicU8; 4] = diagout::ring::storage();
    static RING: RingBuffer<'static> = match RingBuffer::new(&STORAGE) {
        Ok(ring) => ring,
        Err(_) => panic!("bad capacity"),
    };

    RING.put(0x42);
    assert_eq!(RING.used(), 1);
    assert_eq!(RING.get(), 0x42);
}
