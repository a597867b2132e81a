// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Cooperative services run from the firmware main loop.

use crate::format::Formatter;

/// Shared context passed to all services
pub struct ServiceContext<'a, 's, P> {
    pub peripherals: &'a mut P,
    /// Diagnostic output, bound to the transmit channel on target.
    pub out: &'a mut Formatter<'s>,
    /// Monotonic time of this pass of the loop.
    pub now_us: u64,
}

/// Trait for services that run in the main loop
pub trait Service<P> {
    /// Process this service's logic
    /// Uses interior mutability (Cell/RefCell) for state changes
    fn process(&self, ctx: &mut ServiceContext<P>);
}

/// Fires once every `period_us`, measured from the last time it fired.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Periodic {
    period_us: u64,
    since_us: u64,
}

impl Periodic {
    pub const fn new(period_us: u64) -> Self {
        Self {
            period_us,
            since_us: 0,
        }
    }

    /// Returns `true` and restarts the period if it has elapsed at `now_us`.
    pub fn elapsed(&mut self, now_us: u64) -> bool {
        if now_us.wrapping_sub(self.since_us) >= self.period_us {
            self.since_us = now_us;
            true
        } else {
            false
        }
    }
}
