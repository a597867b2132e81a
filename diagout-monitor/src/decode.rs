// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Turning the raw byte stream into printable output.

use diagout::format::Formatter;

/// Longest line kept before it is emitted without a terminator.
pub const MAX_LINE: usize = 256;

/// Bytes per hex dump row.
pub const HEX_ROW: usize = 16;

/// Splits the stream into lines on `\r`, `\n` or `\r\n`.
///
/// Non-printable bytes are shown as `\xNN` so a corrupted stream stays
/// readable.
#[derive(Debug, Default)]
pub struct LineAssembler {
    pending: Vec<u8>,
    after_cr: bool,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte; returns a line when one is complete.
    pub fn push(&mut self, byte: u8) -> Option<String> {
        let after_cr = std::mem::replace(&mut self.after_cr, byte == b'\r');
        match byte {
            b'\n' if after_cr => None,
            b'\r' | b'\n' => Some(self.take()),
            _ => {
                self.pending.push(byte);
                (self.pending.len() >= MAX_LINE).then(|| self.take())
            }
        }
    }

    /// Unterminated tail, if any.
    pub fn flush(&mut self) -> Option<String> {
        (!self.pending.is_empty()).then(|| self.take())
    }

    fn take(&mut self) -> String {
        let line = render(&self.pending);
        self.pending.clear();
        line
    }
}

fn render(bytes: &[u8]) -> String {
    let mut line = String::with_capacity(bytes.len());
    for &b in bytes {
        if b == b'\t' || b.is_ascii_graphic() || b == b' ' {
            line.push(b as char);
        } else {
            line.push_str(&format!("\\x{b:02X}"));
        }
    }
    line
}

/// Missing lines in the stress writer's counter sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub expected: u32,
    pub got: u32,
}

impl Gap {
    pub fn lost(&self) -> u32 {
        self.got.wrapping_sub(self.expected)
    }
}

/// Follows the `%08lx` counter lines and reports discontinuities.
///
/// Lines that are not exactly eight hex digits (reports, truncated counters)
/// are ignored.
#[derive(Debug, Default)]
pub struct CounterCheck {
    expected: Option<u32>,
    seen: u64,
    gaps: u64,
}

impl CounterCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, line: &str) -> Option<Gap> {
        if line.len() != 8 {
            return None;
        }
        let got = u32::from_str_radix(line, 16).ok()?;
        self.seen += 1;

        let gap = match self.expected {
            Some(expected) if expected != got => Some(Gap { expected, got }),
            _ => None,
        };
        if gap.is_some() {
            self.gaps += 1;
        }
        self.expected = Some(got.wrapping_add(1));
        gap
    }

    /// `(counter lines seen, discontinuities)`
    pub fn totals(&self) -> (u64, u64) {
        (self.seen, self.gaps)
    }
}

/// One hex dump row: offset, bytes, ASCII column.
///
/// Rendered with the same formatter the firmware uses.
pub fn hex_row(offset: u32, bytes: &[u8]) -> String {
    let mut row = Vec::with_capacity(80);
    let mut sink = |b: u8| row.push(b);
    let mut out = Formatter::new(&mut sink);

    out.put_hex(offset, 8);
    out.put_str(" ");
    for i in 0..HEX_ROW {
        match bytes.get(i) {
            Some(&b) => {
                out.put_str(" ");
                out.put_hex(u32::from(b), 2);
            }
            None => out.put_str("   "),
        }
    }
    out.put_str("  |");
    for &b in bytes.iter().take(HEX_ROW) {
        out.emit_char(if b.is_ascii_graphic() || b == b' ' { b } else { b'.' });
    }
    out.put_str("|");
    drop(out);

    String::from_utf8_lossy(&row).into_owned()
}
