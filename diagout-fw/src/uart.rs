// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! UART0 port driver and the diagnostic transmit channel.
//!
//! The PL011 runs with its FIFOs disabled, so the transmit holding register
//! is a single byte and the transmit interrupt fires whenever it is empty.
//! That interrupt is the channel's drain notification.

use core::sync::atomic::AtomicU8;

use diagout::channel::{TransmitChannel, UartPort};
use diagout::poll::{Poll, Spin};
use diagout::ring::{self, RingBuffer};
use rp2040_hal::pac::{self, interrupt};

use crate::config::TX_BUFFER_SIZE;

static TX_STORAGE: [AtomicU8; TX_BUFFER_SIZE] = ring::storage();

/// The diagnostic output channel.
pub static CHANNEL: TransmitChannel<'static, Uart0Port> = match RingBuffer::new(&TX_STORAGE) {
    Ok(ring) => TransmitChannel::new(ring, Uart0Port),
    Err(_) => panic!("TX_BUFFER_SIZE must be a power of two in 2..=256"),
};

/// Register-level access to UART0.
///
/// Zero-sized: the peripheral is brought up by the HAL, then only this type
/// touches its data, flag and interrupt mask registers.
pub struct Uart0Port;

impl Uart0Port {
    fn regs() -> &'static pac::uart0::RegisterBlock {
        // SAFETY: UART0 is a fixed MMIO block. After `configure` the HAL
        // driver is parked and every access goes through this type.
        unsafe { &*pac::UART0::ptr() }
    }

    /// Switch the enabled UART to single-byte mode and enable the receive
    /// interrupt. Drain notifications start disabled.
    pub fn configure(&self) {
        let regs = Self::regs();
        regs.uartimsc().modify(|_, w| w.txim().clear_bit().rxim().set_bit());

        // LCR_H may only change while the UART is disabled and idle.
        Spin.poll_until(|| regs.uartfr().read().busy().bit_is_clear());
        regs.uartcr().modify(|_, w| w.uarten().clear_bit());
        regs.uartlcr_h().modify(|_, w| w.fen().clear_bit());
        regs.uartcr().modify(|_, w| w.uarten().set_bit());

        defmt::debug!("uart0: fifo off, rx interrupt on");
    }
}

impl UartPort for Uart0Port {
    fn tx_ready(&self) -> bool {
        Self::regs().uartfr().read().txff().bit_is_clear()
    }

    fn write_data(&self, byte: u8) {
        // SAFETY: every 8-bit value is a valid data field.
        Self::regs()
            .uartdr()
            .write(|w| unsafe { w.data().bits(byte) });
    }

    fn read_data(&self) -> u8 {
        Self::regs().uartdr().read().data().bits()
    }

    fn drain_enabled(&self) -> bool {
        Self::regs().uartimsc().read().txim().bit_is_set()
    }

    fn enable_drain(&self) {
        Self::regs().uartimsc().modify(|_, w| w.txim().set_bit());
    }

    fn disable_drain(&self) {
        Self::regs().uartimsc().modify(|_, w| w.txim().clear_bit());
    }

    fn without_drain_interrupt<R>(&self, f: impl FnOnce() -> R) -> R {
        diagout::irq::masked(pac::Interrupt::UART0_IRQ, f)
    }
}

/// Let the drain and receive notifications through.
pub fn unmask_interrupt() {
    // SAFETY: the handler only touches CHANNEL, which is initialized at
    // compile time and has this handler as its only consumer.
    unsafe { pac::NVIC::unmask(pac::Interrupt::UART0_IRQ) };
}

#[interrupt]
fn UART0_IRQ() {
    let status = Uart0Port::regs().uartmis().read();
    if status.rxmis().bit_is_set() {
        CHANNEL.on_receive_notification();
    }
    if status.txmis().bit_is_set() {
        CHANNEL.on_drain_notification();
    }
}
