// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Diagnostic serial output pipeline.
//!
//! Text produced by the [`Formatter`](format::Formatter) flows through a
//! swappable [`SinkBinding`](sink::SinkBinding) into a byte sink, which in the
//! production configuration is an interrupt-driven
//! [`TransmitChannel`](channel::TransmitChannel) backed by a lock-free
//! [`RingBuffer`](ring::RingBuffer).
//!
//! This crate supports both `no_std` (embedded) and `std` (host) environments:
//! - Default: `no_std` mode for embedded targets
//! - `std` feature: Enables `std` support for host tools
//! - `embedded` feature: Enables Cortex-M interrupt masking helpers
//! - `defmt` feature: Derives `defmt::Format` and traces channel transitions

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod channel;
pub mod digits;
pub mod format;
pub mod poll;
pub mod ring;
pub mod service;
pub mod sink;

// NVIC helpers for the port driver (requires embedded feature)
#[cfg(feature = "embedded")]
pub mod irq;

// Re-export commonly used types
pub use channel::{Mode, TransmitChannel, UartPort};
pub use digits::{Digits, Radix};
pub use format::{Arg, Formatter};
pub use poll::{Bounded, Poll, Spin};
pub use ring::{CapacityError, RingBuffer};
pub use service::{Periodic, Service, ServiceContext};
pub use sink::{BlockingSink, ByteSink, Capture, DirectSink, LossySink, SinkBinding};
