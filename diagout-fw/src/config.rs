// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Compile-time board and output configuration.

/// Pico crystal.
pub const XTAL_FREQ_HZ: u32 = 12_000_000;

/// Diagnostic UART, 8N1.
pub const BAUD_RATE: u32 = 9_600;

/// Transmit ring slots. Must be a power of two in 2..=256; one slot stays unused.
pub const TX_BUFFER_SIZE: usize = 64;

/// Time between LED fade steps.
pub const FADE_STEP_PERIOD_US: u64 = 8_000;
/// Brightness levels from off to full.
pub const FADE_LEVELS: u16 = 128;

/// Time between gauge updates when the LED tracks buffer occupancy.
pub const GAUGE_PERIOD_US: u64 = 10_000;

/// Time between diagnostic reports.
pub const REPORT_PERIOD_US: u64 = 1_000_000;

/// Watchdog reset if the main loop stalls this long.
pub const WATCHDOG_TIMEOUT_US: u32 = 500_000;

/// Time between stress writer lines.
pub const STRESS_PERIOD_US: u64 = 1_000;
