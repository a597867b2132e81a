// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Busy-wait primitives.
//!
//! The blocking paths of the transmit channel wait by polling a condition.
//! On target that wait is unbounded; hosted tests substitute [`Bounded`] so a
//! stuck mock fails the test instead of hanging it.

/// Strategy for waiting until a condition holds.
pub trait Poll {
    /// Evaluate `condition` until it returns `true`.
    ///
    /// Returns `false` if the strategy gave up first.
    fn poll_until(&self, condition: impl FnMut() -> bool) -> bool;
}

/// Spin forever. Never gives up.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spin;

impl Poll for Spin {
    fn poll_until(&self, mut condition: impl FnMut() -> bool) -> bool {
        while !condition() {
            core::hint::spin_loop();
        }
        true
    }
}

/// Give up after a fixed number of evaluations.
#[derive(Debug, Clone, Copy)]
pub struct Bounded {
    pub attempts: u32,
}

impl Bounded {
    pub const fn new(attempts: u32) -> Self {
        Self { attempts }
    }
}

impl Poll for Bounded {
    fn poll_until(&self, mut condition: impl FnMut() -> bool) -> bool {
        (0..self.attempts).any(|_| condition())
    }
}
