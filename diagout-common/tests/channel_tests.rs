// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Transmit channel behaviour against a mock port.

mod common;

use diagout::channel::{Mode, TransmitChannel};
use diagout::poll::Bounded;
use diagout::ring::RingBuffer;
use diagout::sink::{BlockingSink, ByteSink, DirectSink, LossySink};

use common::{slots, MockPort};

/// Deliver drain notifications until the channel goes quiescent.
fn drain_all(channel: &TransmitChannel<'_, MockPort>) {
    while channel.mode() == Mode::Draining {
        channel.on_drain_notification();
    }
}

#[test]
fn test_idle_register_takes_byte_directly() {
    let storage = slots::<8>();
    let channel = TransmitChannel::new(RingBuffer::new(&storage).unwrap(), MockPort::ready());

    assert!(channel.send_nonblocking(b'A'));

    assert_eq!(channel.port().written(), b"A");
    assert!(channel.is_empty());
    assert_eq!(channel.mode(), Mode::Quiescent);
    assert_eq!(channel.port().masked_sections.get(), 1);
}

#[test]
fn test_busy_register_queues_and_enables_drain() {
    let storage = slots::<8>();
    let channel = TransmitChannel::new(RingBuffer::new(&storage).unwrap(), MockPort::busy());

    assert!(channel.send_nonblocking(b'A'));

    assert!(channel.port().written().is_empty());
    assert_eq!(channel.used(), 1);
    assert_eq!(channel.mode(), Mode::Draining);
    assert_eq!(*channel.port().enabled_while_masked.borrow(), [true]);
}

#[test]
fn test_draining_bytes_go_through_ring_even_when_ready() {
    let storage = slots::<8>();
    let channel = TransmitChannel::new(RingBuffer::new(&storage).unwrap(), MockPort::busy());

    channel.send_nonblocking(b'A');
    channel.port().ready.set(true);
    channel.send_nonblocking(b'B');

    // No overtaking of the queued byte.
    assert!(channel.port().written().is_empty());
    drain_all(&channel);
    assert_eq!(channel.port().written(), b"AB");
}

#[test]
fn test_full_ring_refuses_and_stays_untouched() {
    let storage = slots::<4>();
    let channel = TransmitChannel::new(RingBuffer::new(&storage).unwrap(), MockPort::busy());

    for b in *b"abc" {
        assert!(channel.send_nonblocking(b));
    }
    assert!(channel.is_full());

    assert!(!channel.send_nonblocking(b'd'));
    assert_eq!(channel.used(), 3);

    channel.on_drain_notification();
    assert!(channel.send_nonblocking(b'd'));

    drain_all(&channel);
    assert_eq!(channel.port().written(), b"abcd");
}

#[test]
fn test_drain_emptying_ring_returns_to_quiescent() {
    let storage = slots::<8>();
    let channel = TransmitChannel::new(RingBuffer::new(&storage).unwrap(), MockPort::busy());

    channel.send_nonblocking(b'x');
    channel.send_nonblocking(b'y');

    channel.on_drain_notification();
    assert_eq!(channel.mode(), Mode::Draining);
    channel.on_drain_notification();
    assert_eq!(channel.mode(), Mode::Quiescent);
    assert!(channel.is_empty());
    assert_eq!(channel.port().written(), b"xy");
}

#[test]
fn test_spurious_drain_writes_nothing() {
    let storage = slots::<8>();
    let channel = TransmitChannel::new(RingBuffer::new(&storage).unwrap(), MockPort::busy());
    channel.port().drain.set(true);

    channel.on_drain_notification();

    assert!(channel.port().written().is_empty());
    assert_eq!(channel.mode(), Mode::Quiescent);
    assert!(channel.is_empty());
}

#[test]
fn test_receive_notification_discards_byte() {
    let storage = slots::<8>();
    let channel = TransmitChannel::new(RingBuffer::new(&storage).unwrap(), MockPort::ready());
    channel.port().rx.set(b'?');

    channel.on_receive_notification();

    assert_eq!(channel.port().reads.get(), 1);
    assert!(channel.port().written().is_empty());
    assert!(channel.is_empty());
}

#[test]
fn test_bounded_blocking_send_gives_up_when_full() {
    let storage = slots::<2>();
    let channel = TransmitChannel::new(RingBuffer::new(&storage).unwrap(), MockPort::busy());
    let poll = Bounded::new(5);

    assert!(channel.send_blocking_with(b'1', &poll));
    assert!(!channel.send_blocking_with(b'2', &poll));
    assert_eq!(channel.port().masked_sections.get(), 6);
}

#[test]
fn test_blocking_send_on_ready_register() {
    let storage = slots::<8>();
    let channel = TransmitChannel::new(RingBuffer::new(&storage).unwrap(), MockPort::ready());

    for b in *b"ok\r\n" {
        channel.send_blocking(b);
    }

    assert_eq!(channel.port().written(), b"ok\r\n");
}

#[test]
fn test_direct_send_bypasses_ring() {
    let storage = slots::<8>();
    let channel = TransmitChannel::new(RingBuffer::new(&storage).unwrap(), MockPort::busy());
    let poll = Bounded::new(3);

    assert!(!channel.send_direct_with(b'!', &poll));
    channel.port().ready.set(true);
    assert!(channel.send_direct_with(b'!', &poll));

    assert_eq!(channel.port().written(), b"!");
    assert!(channel.is_empty());
    assert_eq!(channel.port().masked_sections.get(), 0);
}

#[test]
fn test_lossy_sink_counts_dropped_bytes() {
    let storage = slots::<4>();
    let channel = TransmitChannel::new(RingBuffer::new(&storage).unwrap(), MockPort::busy());
    let mut sink = LossySink::new(&channel);

    for b in *b"hello" {
        sink.put_byte(b);
    }

    assert_eq!(sink.dropped(), 2);
    drain_all(&channel);
    assert_eq!(channel.port().written(), b"hel");
}

#[test]
fn test_blocking_and_direct_sinks_reach_port() {
    let storage = slots::<8>();
    let channel = TransmitChannel::new(RingBuffer::new(&storage).unwrap(), MockPort::ready());

    BlockingSink(&channel).put_byte(b'a');
    DirectSink(&channel).put_byte(b'b');

    assert_eq!(channel.port().written(), b"ab");
}

#[test]
fn test_nonblocking_send_reads_state_only_while_masked() {
    let storage = slots::<4>();
    let channel = TransmitChannel::new(RingBuffer::new(&storage).unwrap(), MockPort::ready());
    let port = channel.port();

    // Quiescent fast path, quiescent busy, draining, draining full.
    assert!(channel.send_nonblocking(b'a'));
    port.ready.set(false);
    for b in *b"bcd" {
        assert!(channel.send_nonblocking(b));
    }
    assert!(!channel.send_nonblocking(b'e'));

    let reads = port.reads_while_masked.borrow();
    assert!(reads.len() >= 5, "expected a mode check per send, got {reads:?}");
    assert!(reads.iter().all(|&masked| masked), "unmasked state read: {reads:?}");
    assert_eq!(port.masked_sections.get(), 5);
}

#[test]
fn test_mode_queries_outside_send_are_not_masked() {
    let storage = slots::<4>();
    let channel = TransmitChannel::new(RingBuffer::new(&storage).unwrap(), MockPort::busy());
    let port = channel.port();

    channel.send_nonblocking(b'a');
    port.clear_reads();
    assert_eq!(channel.mode(), Mode::Draining);

    // The mock does see unmasked reads when they happen.
    assert_eq!(*port.reads_while_masked.borrow(), [false]);
}

#[test]
fn test_occupancy_queries() {
    let storage = slots::<8>();
    let channel = TransmitChannel::new(RingBuffer::new(&storage).unwrap(), MockPort::busy());

    assert_eq!(channel.capacity(), 8);
    assert_eq!(channel.percent_used(), 0);

    for b in *b"abcd" {
        channel.send_nonblocking(b);
    }

    assert_eq!(channel.used(), 4);
    assert_eq!(channel.percent_used(), 5_000);
    assert!(!channel.is_empty());
}
