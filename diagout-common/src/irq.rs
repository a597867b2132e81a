// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Masking a single interrupt line on Cortex-M.
//!
//! [`UartPort::without_drain_interrupt`](crate::channel::UartPort::without_drain_interrupt)
//! implementations use this to keep the drain handler out of the channel's
//! check-then-enable step while every other interrupt stays live.

use cortex_m::interrupt::InterruptNumber;
use cortex_m::peripheral::NVIC;

/// Run `f` with `irq` masked in the NVIC, restoring its previous state after.
pub fn masked<I: InterruptNumber, R>(irq: I, f: impl FnOnce() -> R) -> R {
    let was_enabled = NVIC::is_enabled(irq);
    NVIC::mask(irq);
    // The mask must be in effect before the first access inside `f`.
    cortex_m::asm::dsb();
    cortex_m::asm::isb();

    let result = f();

    if was_enabled {
        // SAFETY: re-enables a line that was enabled on entry; no
        // mask-based critical section is broken by restoring it.
        unsafe { NVIC::unmask(irq) };
    }
    result
}
