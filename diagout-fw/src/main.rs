// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

#![no_std]
#![no_main]

mod config;
mod peripherals;
mod services;
mod uart;

use defmt_rtt as _;
use diagout::format::Formatter;
use diagout::outputf;
use diagout::service::{Service, ServiceContext};
use diagout::sink::{BlockingSink, DirectSink};
use panic_probe as _;
use rp2040_hal::pac;

use crate::peripherals::Peripherals;
use crate::uart::CHANNEL;

defmt::timestamp!("{=u32:us}", {
    // SAFETY: read-only access to the free-running microsecond counter.
    unsafe { (*pac::TIMER::ptr()).timerawl().read().bits() }
});

use cortex_m_rt::entry;

#[unsafe(link_section = ".boot2")]
#[used]
pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

#[entry]
fn main() -> ! {
    defmt::println!("diagout-fw {} init", env!("DIAGOUT_VERSION"));

    let (mut peripherals, _uart) = peripherals::init();

    // Interrupts are still masked, so this goes straight to the register.
    let mut direct = DirectSink(&CHANNEL);
    Formatter::new(&mut direct).put_str("\r\nboot\r\n");

    uart::unmask_interrupt();

    let mut sink = BlockingSink(&CHANNEL);
    let mut out = Formatter::new(&mut sink);
    outputf!(
        out,
        "diagout-fw %s, %lu baud, tx ring %u\r\n",
        env!("DIAGOUT_VERSION"),
        config::BAUD_RATE,
        CHANNEL.capacity() as u16,
    );

    #[cfg(feature = "fade")]
    let led = services::FadeService::new();
    #[cfg(not(feature = "fade"))]
    let led = services::GaugeService::new();
    let report = services::ReportService::new();
    let watchdog = services::WatchdogService::new();
    #[cfg(feature = "stress")]
    let stress = services::StressService::new();

    #[cfg(not(feature = "stress"))]
    let services: &[&dyn Service<Peripherals>] = &[&watchdog, &led, &report];
    #[cfg(feature = "stress")]
    let services: &[&dyn Service<Peripherals>] = &[&watchdog, &led, &report, &stress];

    defmt::println!("entering main loop with {} services", services.len());

    loop {
        let now_us = peripherals.timer.get_counter().ticks();
        let mut ctx = ServiceContext {
            peripherals: &mut peripherals,
            out: &mut out,
            now_us,
        };
        for service in services {
            service.process(&mut ctx);
        }
    }
}
