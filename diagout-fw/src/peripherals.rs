// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Board bring-up and the peripherals handed to services.

use rp2040_hal::{
    self as hal,
    clocks::init_clocks_and_plls,
    fugit::{MicrosDurationU32, RateExtU32},
    gpio::{bank0::Gpio0, bank0::Gpio1, FunctionUart, Pin, PullDown},
    pac,
    pwm::{FreeRunning, Pwm4, Slice, Slices},
    uart::{DataBits, Enabled, StopBits, UartConfig, UartPeripheral},
    Clock, Sio, Timer, Watchdog,
};

use crate::config::{BAUD_RATE, WATCHDOG_TIMEOUT_US, XTAL_FREQ_HZ};
use crate::uart::CHANNEL;

type UartPins = (
    Pin<Gpio0, FunctionUart, PullDown>,
    Pin<Gpio1, FunctionUart, PullDown>,
);

/// Enabled HAL driver for UART0. Kept alive so the pins stay muxed; register
/// access goes through [`crate::uart::Uart0Port`].
pub type Uart0 = UartPeripheral<Enabled, pac::UART0, UartPins>;

pub struct Peripherals {
    pub timer: Timer,
    pub watchdog: Watchdog,
    /// PWM slice driving the onboard LED (GPIO25, channel B).
    pub led_pwm: Slice<Pwm4, FreeRunning>,
}

/// Bring up clocks, UART0 and the LED, then start the watchdog.
///
/// Any failure here is fatal.
pub fn init() -> (Peripherals, Uart0) {
    let Some(mut pac) = pac::Peripherals::take() else {
        defmt::panic!("peripherals already taken");
    };
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    let clocks = match init_clocks_and_plls(
        XTAL_FREQ_HZ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    ) {
        Ok(clocks) => clocks,
        Err(_) => defmt::panic!("clock init failed"),
    };

    let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let sio = Sio::new(pac.SIO);
    let pins = hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let uart_pins = (
        pins.gpio0.into_function::<FunctionUart>(),
        pins.gpio1.into_function::<FunctionUart>(),
    );
    let uart = match UartPeripheral::new(pac.UART0, uart_pins, &mut pac.RESETS).enable(
        UartConfig::new(BAUD_RATE.Hz(), DataBits::Eight, None, StopBits::One),
        clocks.peripheral_clock.freq(),
    ) {
        Ok(uart) => uart,
        Err(_) => defmt::panic!("uart0 enable failed"),
    };
    CHANNEL.port().configure();

    let slices = Slices::new(pac.PWM, &mut pac.RESETS);
    let mut led_pwm = slices.pwm4;
    led_pwm.set_ph_correct();
    led_pwm.enable();
    led_pwm.channel_b.output_to(pins.gpio25);

    watchdog.pause_on_debug(true);
    watchdog.start(MicrosDurationU32::micros(WATCHDOG_TIMEOUT_US));

    defmt::println!(
        "clocks: sys {} Hz, peri {} Hz",
        clocks.system_clock.freq().to_Hz(),
        clocks.peripheral_clock.freq().to_Hz()
    );

    (
        Peripherals {
            timer,
            watchdog,
            led_pwm,
        },
        uart,
    )
}
