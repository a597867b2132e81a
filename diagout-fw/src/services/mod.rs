// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Service implementations for the firmware main loop.

#[cfg(feature = "fade")]
pub mod fade;
#[cfg(not(feature = "fade"))]
pub mod gauge;
pub mod report;
#[cfg(feature = "stress")]
pub mod stress;
pub mod watchdog;

#[cfg(feature = "fade")]
pub use fade::FadeService;
#[cfg(not(feature = "fade"))]
pub use gauge::GaugeService;
pub use report::ReportService;
#[cfg(feature = "stress")]
pub use stress::StressService;
pub use watchdog::WatchdogService;
