// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Restricted printf-style formatter.
//!
//! Output goes byte by byte through the bound sink; nothing is assembled in
//! memory. The template language:
//!
//! | Item | Meaning |
//! |------|---------|
//! | `%d` `%i` | signed decimal |
//! | `%u` `%p` | unsigned decimal |
//! | `%x` | unsigned hexadecimal, uppercase |
//! | `%c` | one character |
//! | `%s` | string, `.N` caps the characters copied |
//! | `%%` | literal `%` |
//! | `-` `+` ` ` | left-justify, force sign, space for sign |
//! | `N` | field width, a leading `0` selects zero padding |
//! | `l` / `b` | 32-bit / 8-bit argument (default is a 16-bit `int`) |
//!
//! Unknown conversion characters are printed as-is. Arguments are taken in
//! order and read the way the conversion says, whatever their [`Arg`] variant.

use crate::digits::{Digits, Magnitude, Radix, DIGIT_CAPACITY};
use crate::sink::{ByteSink, SinkBinding};

/// One formatter argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    Int(i32),
    Uint(u32),
    Char(u8),
    Str(&'a str),
}

impl Arg<'_> {
    /// Raw 32-bit view used by numeric and `%c` conversions.
    fn word(&self) -> u32 {
        match *self {
            Arg::Int(v) => v as u32,
            Arg::Uint(v) => v,
            Arg::Char(c) => c as u32,
            Arg::Str(_) => 0,
        }
    }

    fn text(&self) -> &str {
        match *self {
            Arg::Str(s) => s,
            _ => "",
        }
    }
}

macro_rules! arg_from {
    ($variant:ident as $target:ty: $($source:ty),*) => {
        $(
            impl From<$source> for Arg<'_> {
                fn from(value: $source) -> Self {
                    Arg::$variant(value as $target)
                }
            }
        )*
    };
}

arg_from!(Int as i32: i8, i16, i32);
arg_from!(Uint as u32: u8, u16, u32);

/// Only the low byte of `value` is kept.
impl From<char> for Arg<'_> {
    fn from(value: char) -> Self {
        Arg::Char(value as u8)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Arg::Str(value)
    }
}

/// Format `template` with the given arguments through a formatter.
///
/// ```
/// # use diagout::{outputf, Formatter, Capture};
/// let mut capture = Capture::<16>::new();
/// let mut out = Formatter::new(&mut capture);
/// let count = outputf!(out, "%04x|%-3d|", 0x2au32, 7);
/// assert_eq!(count, 9);
/// # drop(out);
/// assert_eq!(capture.as_str(), Some("002A|7  |"));
/// ```
#[macro_export]
macro_rules! outputf {
    ($out:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $out.format($template, &[$($crate::format::Arg::from($arg)),*])
    };
}

/// Modifiers collected between `%` and the conversion character.
#[derive(Debug, Default, Clone, Copy)]
struct Spec {
    left: bool,
    zero_pad: bool,
    plus: bool,
    space: bool,
    long: bool,
    byte: bool,
    width: u8,
    precision: Option<u8>,
}

impl Spec {
    /// Consume modifiers up to the conversion character, which is returned.
    /// `None` if the template ends first.
    fn scan(template: &mut impl Iterator<Item = u8>) -> Option<(Self, u8)> {
        let mut spec = Self::default();
        for c in template {
            match c {
                b'0'..=b'9' => {
                    let digit = c - b'0';
                    match spec.precision.as_mut() {
                        None => {
                            spec.width = spec.width.wrapping_mul(10).wrapping_add(digit);
                            if spec.width == 0 {
                                spec.zero_pad = true;
                            }
                        }
                        Some(precision) => {
                            *precision = precision.wrapping_mul(10).wrapping_add(digit);
                        }
                    }
                }
                b'.' => spec.precision = Some(0),
                b'-' => spec.left = true,
                b'+' => spec.plus = true,
                b' ' => spec.space = true,
                b'l' => spec.long = true,
                b'b' => spec.byte = true,
                _ => return Some((spec, c)),
            }
        }
        None
    }

    /// Read `arg` at the width selected by `b`/`l`, as `(negative, magnitude)`.
    fn fetch(&self, arg: Arg<'_>, signed: bool) -> (bool, Magnitude) {
        let raw = arg.word();
        let value = match (self.byte, self.long, signed) {
            (true, _, true) => raw as u8 as i8 as i32,
            (true, _, false) => (raw & 0xFF) as i32,
            (false, true, _) => raw as i32,
            (false, false, true) => raw as u16 as i16 as i32,
            (false, false, false) => (raw & 0xFFFF) as i32,
        };

        if signed && value < 0 {
            (true, value.unsigned_abs())
        } else {
            (false, value as Magnitude)
        }
    }

    fn sign(&self, negative: bool) -> Option<u8> {
        if negative {
            Some(b'-')
        } else if self.plus {
            Some(b'+')
        } else if self.space {
            Some(b' ')
        } else {
            None
        }
    }
}

/// Emits through the binding and counts what it emitted.
struct Counter<'b, 's> {
    binding: &'b mut SinkBinding<'s>,
    count: u16,
}

impl Counter<'_, '_> {
    fn put(&mut self, c: u8) {
        self.binding.emit_char(c);
        self.count = self.count.wrapping_add(1);
    }

    fn repeat(&mut self, c: u8, times: usize) {
        for _ in 0..times {
            self.put(c);
        }
    }

    fn number(&mut self, spec: &Spec, negative: bool, magnitude: Magnitude, radix: Radix) {
        let digits = Digits::new(magnitude, radix);
        let sign = spec.sign(negative);
        let used = digits.len() + usize::from(sign.is_some());
        let padding = (spec.width as usize).saturating_sub(used);

        if spec.left {
            self.sign(sign);
            self.digits(&digits);
            self.repeat(b' ', padding);
        } else if spec.zero_pad {
            self.sign(sign);
            self.repeat(b'0', padding);
            self.digits(&digits);
        } else {
            self.repeat(b' ', padding);
            self.sign(sign);
            self.digits(&digits);
        }
    }

    fn sign(&mut self, sign: Option<u8>) {
        if let Some(c) = sign {
            self.put(c);
        }
    }

    fn digits(&mut self, digits: &Digits) {
        for c in digits.symbols() {
            self.put(c);
        }
    }

    /// Padding is measured against the whole string, even when the
    /// precision cuts it shorter.
    fn string(&mut self, spec: &Spec, text: &str) {
        let bytes = text.as_bytes();
        let padding = (spec.width as usize).saturating_sub(bytes.len());
        let shown = spec.precision.map_or(bytes.len(), |p| bytes.len().min(p as usize));

        if !spec.left {
            self.repeat(b' ', padding);
        }
        for &c in &bytes[..shown] {
            self.put(c);
        }
        if spec.left {
            self.repeat(b' ', padding);
        }
    }
}

/// printf-style formatter writing through a [`SinkBinding`].
pub struct Formatter<'s> {
    binding: SinkBinding<'s>,
}

impl<'s> Formatter<'s> {
    pub fn new(sink: &'s mut dyn ByteSink) -> Self {
        Self {
            binding: SinkBinding::new(sink),
        }
    }

    /// Swap the active sink, returning the previous one.
    pub fn bind(&mut self, sink: &'s mut dyn ByteSink) -> &'s mut dyn ByteSink {
        self.binding.bind(sink)
    }

    pub fn emit_char(&mut self, c: u8) {
        self.binding.emit_char(c);
    }

    /// Expand `template` with `args`. Returns the number of characters
    /// emitted (wrapping at `u16::MAX`).
    pub fn format(&mut self, template: &str, args: &[Arg<'_>]) -> u16 {
        let mut out = Counter {
            binding: &mut self.binding,
            count: 0,
        };
        let mut args = args.iter().copied();
        let mut template = template.bytes();

        while let Some(c) = template.next() {
            if c != b'%' {
                out.put(c);
                continue;
            }

            // A template ending in the middle of a conversion prints nothing more.
            let Some((spec, conversion)) = Spec::scan(&mut template) else {
                break;
            };

            match conversion {
                b'd' | b'i' => {
                    let (negative, magnitude) = spec.fetch(next_arg(&mut args), true);
                    out.number(&spec, negative, magnitude, Radix::Decimal);
                }
                b'u' | b'p' => {
                    let (_, magnitude) = spec.fetch(next_arg(&mut args), false);
                    out.number(&spec, false, magnitude, Radix::Decimal);
                }
                b'x' => {
                    let (_, magnitude) = spec.fetch(next_arg(&mut args), false);
                    out.number(&spec, false, magnitude, Radix::Hex);
                }
                b'c' => out.put(next_arg(&mut args).word() as u8),
                b's' => out.string(&spec, next_arg(&mut args).text()),
                // `%%` and anything unrecognised
                other => out.put(other),
            }
        }

        out.count
    }

    /// Emit a string verbatim.
    pub fn put_str(&mut self, s: &str) {
        for c in s.bytes() {
            self.binding.emit_char(c);
        }
    }

    /// Emit an unsigned decimal with no padding.
    pub fn put_u32(&mut self, value: u32) {
        for c in Digits::new(value, Radix::Decimal).symbols() {
            self.binding.emit_char(c);
        }
    }

    /// Emit a signed decimal with no padding.
    pub fn put_i32(&mut self, value: i32) {
        if value < 0 {
            self.binding.emit_char(b'-');
        }
        self.put_u32(value.unsigned_abs());
    }

    /// Emit exactly `nibbles` hex digits of `value`, leading zeros kept and
    /// higher digits cut off.
    pub fn put_hex(&mut self, value: u32, nibbles: usize) {
        let digits = Digits::new(value, Radix::Hex);
        let nibbles = nibbles.min(DIGIT_CAPACITY);
        for _ in digits.len()..nibbles {
            self.binding.emit_char(b'0');
        }
        for c in digits.symbols().skip(digits.len().saturating_sub(nibbles)) {
            self.binding.emit_char(c);
        }
    }
}

impl core::fmt::Write for Formatter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.put_str(s);
        Ok(())
    }
}

/// Missing arguments read as zero / the empty string.
fn next_arg<'a>(args: &mut impl Iterator<Item = Arg<'a>>) -> Arg<'a> {
    args.next().unwrap_or(Arg::Uint(0))
}
