// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Periodic diagnostic report on the UART.

use crate::config::REPORT_PERIOD_US;
use crate::peripherals::Peripherals;
use crate::uart::CHANNEL;
use core::cell::Cell;
use diagout::outputf;
use diagout::service::{Periodic, Service, ServiceContext};

/// Service that prints a status line once per report period
pub struct ReportService {
    timer: Cell<Periodic>,
    reports: Cell<u32>,
    passes: Cell<u32>,
    peak: Cell<usize>,
}

impl ReportService {
    pub fn new() -> Self {
        Self {
            timer: Cell::new(Periodic::new(REPORT_PERIOD_US)),
            reports: Cell::new(0),
            passes: Cell::new(0),
            peak: Cell::new(0),
        }
    }
}

impl Service<Peripherals> for ReportService {
    fn process(&self, ctx: &mut ServiceContext<Peripherals>) {
        self.passes.set(self.passes.get().wrapping_add(1));
        self.peak.set(self.peak.get().max(CHANNEL.used()));

        let mut timer = self.timer.get();
        let due = timer.elapsed(ctx.now_us);
        self.timer.set(timer);
        if !due {
            return;
        }

        let report = self.reports.get().wrapping_add(1);
        self.reports.set(report);

        // Sampled before printing: the line itself fills the ring.
        let used = CHANNEL.used() as u16;
        let peak = self.peak.replace(0) as u16;

        outputf!(
            ctx.out,
            "#%05lu t=%08lx loop=%lu tx=%u/%u peak=%u\r\n",
            report,
            ctx.now_us as u32,
            self.passes.replace(0),
            used,
            CHANNEL.capacity() as u16,
            peak,
        );
        defmt::debug!("report {}: ring peak {}", report, peak);
    }
}
