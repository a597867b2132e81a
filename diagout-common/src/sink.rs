// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Byte sinks and the swappable binding the formatter writes through.

use crate::channel::{TransmitChannel, UartPort};
use heapless::Vec;

/// Destination for emitted bytes.
pub trait ByteSink {
    fn put_byte(&mut self, byte: u8);
}

impl<F: FnMut(u8)> ByteSink for F {
    fn put_byte(&mut self, byte: u8) {
        self(byte)
    }
}

/// The currently active sink.
///
/// Owned by whoever emits (normally a [`Formatter`](crate::format::Formatter))
/// instead of living in a global, so two emitters never fight over it.
pub struct SinkBinding<'s> {
    sink: &'s mut dyn ByteSink,
}

impl<'s> SinkBinding<'s> {
    pub fn new(sink: &'s mut dyn ByteSink) -> Self {
        Self { sink }
    }

    /// Make `sink` the active sink, returning the one it replaces.
    pub fn bind(&mut self, sink: &'s mut dyn ByteSink) -> &'s mut dyn ByteSink {
        core::mem::replace(&mut self.sink, sink)
    }

    pub fn emit_char(&mut self, c: u8) {
        self.sink.put_byte(c);
    }
}

/// Sends through [`TransmitChannel::send_blocking`]. The default binding.
pub struct BlockingSink<'c, 'a, P>(pub &'c TransmitChannel<'a, P>);

impl<P: UartPort> ByteSink for BlockingSink<'_, '_, P> {
    fn put_byte(&mut self, byte: u8) {
        self.0.send_blocking(byte);
    }
}

/// Sends through [`TransmitChannel::send_nonblocking`], dropping what the
/// channel refuses.
pub struct LossySink<'c, 'a, P> {
    channel: &'c TransmitChannel<'a, P>,
    dropped: u32,
}

impl<'c, 'a, P> LossySink<'c, 'a, P> {
    pub fn new(channel: &'c TransmitChannel<'a, P>) -> Self {
        Self {
            channel,
            dropped: 0,
        }
    }

    /// Bytes refused by the channel so far.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<P: UartPort> ByteSink for LossySink<'_, '_, P> {
    fn put_byte(&mut self, byte: u8) {
        if !self.channel.send_nonblocking(byte) {
            self.dropped = self.dropped.wrapping_add(1);
        }
    }
}

/// Sends through [`TransmitChannel::send_direct`], bypassing the ring.
pub struct DirectSink<'c, 'a, P>(pub &'c TransmitChannel<'a, P>);

impl<P: UartPort> ByteSink for DirectSink<'_, '_, P> {
    fn put_byte(&mut self, byte: u8) {
        self.0.send_direct(byte);
    }
}

/// Collects up to `N` bytes in memory, counting the ones that did not fit.
#[derive(Debug, Default)]
pub struct Capture<const N: usize> {
    bytes: Vec<u8, N>,
    overflow: usize,
}

impl<const N: usize> Capture<N> {
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            overflow: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Captured text, or `None` if it is not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.bytes).ok()
    }

    /// Bytes that arrived after the capture was full.
    pub fn overflow(&self) -> usize {
        self.overflow
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
        self.overflow = 0;
    }
}

impl<const N: usize> ByteSink for Capture<N> {
    fn put_byte(&mut self, byte: u8) {
        if self.bytes.push(byte).is_err() {
            self.overflow += 1;
        }
    }
}
