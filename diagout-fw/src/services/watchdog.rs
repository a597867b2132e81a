// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Watchdog feeding.

use crate::peripherals::Peripherals;
use diagout::service::{Service, ServiceContext};

/// Feeds the watchdog once per pass of the main loop
pub struct WatchdogService;

impl WatchdogService {
    pub fn new() -> Self {
        Self
    }
}

impl Service<Peripherals> for WatchdogService {
    fn process(&self, ctx: &mut ServiceContext<Peripherals>) {
        ctx.peripherals.watchdog.feed();
    }
}
