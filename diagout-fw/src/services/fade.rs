// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! LED breathing, a liveness indicator independent of the UART.

use crate::config::{FADE_LEVELS, FADE_STEP_PERIOD_US};
use crate::peripherals::Peripherals;
use core::cell::Cell;
use diagout::service::{Periodic, Service, ServiceContext};
use embedded_hal::pwm::SetDutyCycle;

/// Fade direction
#[derive(Clone, Copy)]
enum FadeState {
    Rising { level: u16 },
    Falling { level: u16 },
}

/// Service that ramps the LED brightness up and down
pub struct FadeService {
    state: Cell<FadeState>,
    step: Cell<Periodic>,
}

impl FadeService {
    pub fn new() -> Self {
        Self {
            state: Cell::new(FadeState::Rising { level: 0 }),
            step: Cell::new(Periodic::new(FADE_STEP_PERIOD_US)),
        }
    }
}

impl Service<Peripherals> for FadeService {
    fn process(&self, ctx: &mut ServiceContext<Peripherals>) {
        let mut step = self.step.get();
        let due = step.elapsed(ctx.now_us);
        self.step.set(step);
        if !due {
            return;
        }

        let next = match self.state.get() {
            FadeState::Rising { level } if level >= FADE_LEVELS => {
                FadeState::Falling { level: level - 1 }
            }
            FadeState::Rising { level } => FadeState::Rising { level: level + 1 },
            FadeState::Falling { level: 0 } => FadeState::Rising { level: 1 },
            FadeState::Falling { level } => FadeState::Falling { level: level - 1 },
        };
        self.state.set(next);

        let (FadeState::Rising { level } | FadeState::Falling { level }) = next;
        // Squared level looks roughly linear to the eye.
        ctx.peripherals
            .led_pwm
            .channel_b
            .set_duty_cycle_fraction(level * level, FADE_LEVELS * FADE_LEVELS)
            .ok();
    }
}
