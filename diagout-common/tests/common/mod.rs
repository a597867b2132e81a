// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Shared mock UART port for integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use diagout::channel::UartPort;

/// Records everything the channel does to the "hardware".
#[derive(Default)]
pub struct MockPort {
    pub ready: Cell<bool>,
    pub drain: Cell<bool>,
    pub written: RefCell<Vec<u8>>,
    pub rx: Cell<u8>,
    pub reads: Cell<usize>,
    pub masked_sections: Cell<usize>,
    pub masked: Cell<bool>,
    /// `drain` flags observed at each `enable_drain` call while masked.
    pub enabled_while_masked: RefCell<Vec<bool>>,
    /// Mask state at each `tx_ready` / `drain_enabled` read.
    pub reads_while_masked: RefCell<Vec<bool>>,
}

impl MockPort {
    pub fn ready() -> Self {
        let port = Self::default();
        port.ready.set(true);
        port
    }

    pub fn busy() -> Self {
        Self::default()
    }

    pub fn written(&self) -> Vec<u8> {
        self.written.borrow().clone()
    }

    /// Forget recorded state reads.
    pub fn clear_reads(&self) {
        self.reads_while_masked.borrow_mut().clear();
    }
}

impl UartPort for MockPort {
    fn tx_ready(&self) -> bool {
        self.reads_while_masked.borrow_mut().push(self.masked.get());
        self.ready.get()
    }

    fn write_data(&self, byte: u8) {
        self.written.borrow_mut().push(byte);
    }

    fn read_data(&self) -> u8 {
        self.reads.set(self.reads.get() + 1);
        self.rx.get()
    }

    fn drain_enabled(&self) -> bool {
        self.reads_while_masked.borrow_mut().push(self.masked.get());
        self.drain.get()
    }

    fn enable_drain(&self) {
        self.enabled_while_masked
            .borrow_mut()
            .push(self.masked.get());
        self.drain.set(true);
    }

    fn disable_drain(&self) {
        self.drain.set(false);
    }

    fn without_drain_interrupt<R>(&self, f: impl FnOnce() -> R) -> R {
        self.masked_sections.set(self.masked_sections.get() + 1);
        self.masked.set(true);
        let result = f();
        self.masked.set(false);
        result
    }
}

/// Zeroed ring storage of `N` slots.
pub fn slots<const N: usize>() -> [std::sync::atomic::AtomicU8; N] {
    diagout::ring::storage::<N>()
}
