// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Interrupt-driven asynchronous transmitter.
//!
//! The channel has two modes, inferred from the hardware rather than stored:
//!
//! - `Quiescent`: drain notifications disabled, the ring is empty.
//! - `Draining`: drain notifications enabled, the ring decides what is sent next.
//!
//! `Quiescent -> Draining` happens when a byte has to be queued behind a busy
//! transmit register; `Draining -> Quiescent` happens when the drain handler
//! empties the ring. A full ring is reported to the producer as a `false`
//! return, never as a fault.
//!
//! All `send_*` methods belong to the mainline. `on_drain_notification` and
//! `on_receive_notification` belong to the interrupt trampoline of the port.

use crate::poll::{Poll, Spin};
use crate::ring::RingBuffer;

/// Hardware side of the channel, implemented by the port driver.
pub trait UartPort {
    /// Transmit register can take a byte.
    fn tx_ready(&self) -> bool;

    /// Place a byte in the transmit register. Also clears the pending
    /// "register empty" condition.
    fn write_data(&self, byte: u8);

    /// Read the receive register, clearing its pending condition.
    fn read_data(&self) -> u8;

    /// Drain notifications are currently enabled.
    fn drain_enabled(&self) -> bool;

    fn enable_drain(&self);

    fn disable_drain(&self);

    /// Run `f` with the drain notification source masked.
    fn without_drain_interrupt<R>(&self, f: impl FnOnce() -> R) -> R;
}

/// Operating mode of the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Quiescent,
    Draining,
}

/// Ring-buffer-backed transmitter over a [`UartPort`].
#[derive(Debug)]
pub struct TransmitChannel<'a, P> {
    ring: RingBuffer<'a>,
    port: P,
}

impl<'a, P> TransmitChannel<'a, P> {
    pub const fn new(ring: RingBuffer<'a>, port: P) -> Self {
        Self { ring, port }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// Ring slots, one of which is never filled.
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Bytes queued behind the transmit register.
    pub fn used(&self) -> usize {
        self.ring.used()
    }

    /// Ring occupancy in hundredths of a percent (0..=10000).
    pub fn percent_used(&self) -> u16 {
        self.ring.percent_used()
    }

    /// Nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }
}

impl<P: UartPort> TransmitChannel<'_, P> {
    pub fn mode(&self) -> Mode {
        if self.port.drain_enabled() {
            Mode::Draining
        } else {
            Mode::Quiescent
        }
    }

    /// The ring has no room for another byte.
    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    /// Offer a byte without waiting.
    ///
    /// Returns `false` only when the channel is draining and the ring is
    /// full; the byte is then not taken and the ring is left untouched.
    pub fn send_nonblocking(&self, byte: u8) -> bool {
        // Checking the mode and enabling drain must not be split by the drain
        // handler, or the wakeup for the queued byte is lost.
        self.port.without_drain_interrupt(|| {
            if self.port.drain_enabled() {
                if self.ring.is_full() {
                    return false;
                }
                self.ring.put(byte);
            } else if self.port.tx_ready() {
                self.port.write_data(byte);
            } else {
                self.ring.put(byte);
                self.port.enable_drain();
                #[cfg(feature = "defmt")]
                defmt::trace!("tx: quiescent -> draining");
            }
            true
        })
    }

    /// Send a byte, spinning until the channel accepts it.
    ///
    /// There is no timeout: if nothing ever services the drain notification
    /// this never returns.
    pub fn send_blocking(&self, byte: u8) {
        self.send_blocking_with(byte, &Spin);
    }

    /// [`send_blocking`](Self::send_blocking) with an explicit wait strategy.
    /// Returns `false` if `poll` gave up and the byte was not taken.
    pub fn send_blocking_with(&self, byte: u8, poll: &impl Poll) -> bool {
        poll.poll_until(|| self.send_nonblocking(byte))
    }

    /// Write straight to the transmit register, bypassing the ring.
    ///
    /// Usable before interrupts are set up. Bytes still queued in the ring
    /// are not waited for and may be overtaken.
    pub fn send_direct(&self, byte: u8) {
        self.send_direct_with(byte, &Spin);
    }

    /// [`send_direct`](Self::send_direct) with an explicit wait strategy.
    pub fn send_direct_with(&self, byte: u8, poll: &impl Poll) -> bool {
        if !poll.poll_until(|| self.port.tx_ready()) {
            return false;
        }
        self.port.write_data(byte);
        true
    }

    /// Transmit register became free.
    pub fn on_drain_notification(&self) {
        // A spurious notification with nothing queued writes nothing.
        if !self.ring.is_empty() {
            self.port.write_data(self.ring.get());
        }
        if self.ring.is_empty() {
            self.port.disable_drain();
            #[cfg(feature = "defmt")]
            defmt::trace!("tx: draining -> quiescent");
        }
    }

    /// A byte arrived. There is no receive path, so it is discarded.
    pub fn on_receive_notification(&self) {
        let _ = self.port.read_data();
    }
}
