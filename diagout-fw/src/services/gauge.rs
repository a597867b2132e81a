// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! LED brightness as a transmit buffer gauge.

use crate::config::GAUGE_PERIOD_US;
use crate::peripherals::Peripherals;
use crate::uart::CHANNEL;
use core::cell::Cell;
use diagout::service::{Periodic, Service, ServiceContext};
use embedded_hal::pwm::SetDutyCycle;

/// Full ring reads as full brightness.
const GAUGE_SCALE: u16 = 10_000;

/// Service that drives the LED from the ring occupancy
pub struct GaugeService {
    update: Cell<Periodic>,
    last: Cell<u16>,
}

impl GaugeService {
    pub fn new() -> Self {
        Self {
            update: Cell::new(Periodic::new(GAUGE_PERIOD_US)),
            last: Cell::new(u16::MAX),
        }
    }
}

impl Service<Peripherals> for GaugeService {
    fn process(&self, ctx: &mut ServiceContext<Peripherals>) {
        let mut update = self.update.get();
        let due = update.elapsed(ctx.now_us);
        self.update.set(update);
        if !due {
            return;
        }

        let used = CHANNEL.percent_used();
        if used == self.last.get() {
            return;
        }
        self.last.set(used);

        ctx.peripherals
            .led_pwm
            .channel_b
            .set_duty_cycle_fraction(used, GAUGE_SCALE)
            .ok();
    }
}
