// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Divide-free integer to digit conversion.
//!
//! Cortex-M0+ has no divide instruction, so instead of calling into a generic
//! 32-bit division routine each digit is produced by a bit-serial
//! shift-and-subtract pass over the magnitude:
//!
//! ```text
//!   remainder <- (remainder << 1) | msb(quotient)
//!   quotient  <- quotient << 1
//!   if remainder >= radix { remainder -= radix; quotient |= 1 }
//! ```
//!
//! After one step per magnitude bit, `remainder` is `value % radix` and
//! `quotient` is `value / radix`. Digits come out least significant first and
//! are stored back to front, two per byte.

use static_assertions::const_assert;

/// Magnitude type the formatter converts.
pub type Magnitude = u32;

/// Shift-and-subtract steps per digit, one per magnitude bit.
pub const CONVERSION_STEPS: u32 = Magnitude::BITS;

/// Digit workspace size in symbols.
pub const DIGIT_CAPACITY: usize = 12;

const PACKED_LEN: usize = DIGIT_CAPACITY / 2;

const fn digits_needed(mut value: Magnitude, radix: Magnitude) -> usize {
    let mut count = 1;
    while value >= radix {
        value /= radix;
        count += 1;
    }
    count
}

// Widening `Magnitude` must fail here rather than overrun the workspace.
const_assert!(digits_needed(Magnitude::MAX, 10) <= DIGIT_CAPACITY);
const_assert!(digits_needed(Magnitude::MAX, 16) <= DIGIT_CAPACITY);
const_assert!(DIGIT_CAPACITY % 2 == 0);

/// Supported radices. Both fit a digit in a nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Radix {
    Decimal = 10,
    Hex = 16,
}

/// Split `value` into `(value / radix, value % radix)` without dividing.
pub fn divmod(value: Magnitude, radix: Radix) -> (Magnitude, u8) {
    let radix = radix as u8;
    let mut quotient = value;
    let mut remainder = 0u8;

    for _ in 0..CONVERSION_STEPS {
        remainder = (remainder << 1) | (quotient >> (CONVERSION_STEPS - 1)) as u8;
        quotient <<= 1;
        if remainder >= radix {
            remainder -= radix;
            quotient |= 1;
        }
    }

    (quotient, remainder)
}

/// ASCII symbol for a digit value, uppercase for 10..=15.
pub fn symbol(digit: u8) -> u8 {
    if digit < 10 {
        b'0' + digit
    } else {
        b'A' + (digit - 10)
    }
}

/// Digits of a magnitude, nibble-packed, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digits {
    packed: [u8; PACKED_LEN],
    len: u8,
}

impl Digits {
    /// Convert `value`. Zero yields the single digit `0`.
    pub fn new(value: Magnitude, radix: Radix) -> Self {
        let mut digits = Self {
            packed: [0; PACKED_LEN],
            len: 0,
        };

        let mut rest = value;
        loop {
            let (quotient, digit) = divmod(rest, radix);
            digits.len += 1;
            digits.set(DIGIT_CAPACITY - digits.len as usize, digit);
            rest = quotient;
            if rest == 0 {
                break;
            }
        }

        digits
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always `false`: there is at least one digit.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Digit values, most significant first.
    pub fn values(&self) -> impl Iterator<Item = u8> + '_ {
        (DIGIT_CAPACITY - self.len()..DIGIT_CAPACITY).map(|i| self.get(i))
    }

    /// ASCII symbols, most significant first.
    pub fn symbols(&self) -> impl Iterator<Item = u8> + '_ {
        self.values().map(symbol)
    }

    /// Render into `buf` and return the text.
    pub fn write_str<'b>(&self, buf: &'b mut [u8; DIGIT_CAPACITY]) -> &'b str {
        let len = self.len();
        for (slot, sym) in buf.iter_mut().zip(self.symbols()) {
            *slot = sym;
        }
        core::str::from_utf8(&buf[..len]).unwrap_or_default()
    }

    fn set(&mut self, index: usize, digit: u8) {
        let byte = &mut self.packed[index / 2];
        if index % 2 == 0 {
            *byte = (*byte & 0x0F) | (digit << 4);
        } else {
            *byte = (*byte & 0xF0) | (digit & 0x0F);
        }
    }

    fn get(&self, index: usize) -> u8 {
        let byte = self.packed[index / 2];
        if index % 2 == 0 {
            byte >> 4
        } else {
            byte & 0x0F
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divmod_matches_division_at_edges() {
        for value in [0, 1, 9, 10, 15, 16, 255, 65_535, 1 << 31, Magnitude::MAX] {
            assert_eq!(divmod(value, Radix::Decimal), (value / 10, (value % 10) as u8));
            assert_eq!(divmod(value, Radix::Hex), (value / 16, (value % 16) as u8));
        }
    }

    #[test]
    fn test_digits_packed_back_to_front() {
        let digits = Digits::new(0x1234, Radix::Hex);

        assert_eq!(digits.len(), 4);
        assert_eq!(digits.packed, [0, 0, 0, 0, 0x12, 0x34]);
    }

    #[test]
    fn test_odd_digit_count_shares_byte() {
        let digits = Digits::new(305, Radix::Decimal);

        assert_eq!(digits.packed[4], 0x03);
        assert_eq!(digits.packed[5], 0x05);
        assert_eq!(digits.values().collect::<Vec<_>>(), [3, 0, 5]);
    }
}
