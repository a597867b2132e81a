// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Stress writer: a fast counter pushed through the lossy sink.
//!
//! Emits faster than 9600 baud can carry, so the ring fills and the
//! backpressure path is exercised continuously. Rejected bytes are counted,
//! never waited for.

use crate::config::STRESS_PERIOD_US;
use crate::peripherals::Peripherals;
use crate::uart::{Uart0Port, CHANNEL};
use core::cell::{Cell, RefCell};
use diagout::format::Formatter;
use diagout::outputf;
use diagout::service::{Periodic, Service, ServiceContext};
use diagout::sink::LossySink;

/// Service that writes `%08lx\r` every stress period without blocking
pub struct StressService {
    timer: Cell<Periodic>,
    counter: Cell<u32>,
    sink: RefCell<LossySink<'static, 'static, Uart0Port>>,
    reported_drops: Cell<u32>,
}

impl StressService {
    pub fn new() -> Self {
        Self {
            timer: Cell::new(Periodic::new(STRESS_PERIOD_US)),
            counter: Cell::new(0),
            sink: RefCell::new(LossySink::new(&CHANNEL)),
            reported_drops: Cell::new(0),
        }
    }
}

impl Service<Peripherals> for StressService {
    fn process(&self, ctx: &mut ServiceContext<Peripherals>) {
        let mut timer = self.timer.get();
        let due = timer.elapsed(ctx.now_us);
        self.timer.set(timer);
        if !due {
            return;
        }

        let count = self.counter.get();
        self.counter.set(count.wrapping_add(1));

        let mut sink = self.sink.borrow_mut();
        outputf!(Formatter::new(&mut *sink), "%08lx\r", count);

        let dropped = sink.dropped();
        if dropped.wrapping_sub(self.reported_drops.get()) >= 1_000 {
            defmt::warn!("stress: {} bytes dropped so far", dropped);
            self.reported_drops.set(dropped);
        }
    }
}
