// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Digit conversion checked against the standard formatter.

use diagout::digits::{divmod, symbol, Digits, Radix, DIGIT_CAPACITY};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn render(value: u32, radix: Radix) -> String {
    let mut buf = [0u8; DIGIT_CAPACITY];
    Digits::new(value, radix).write_str(&mut buf).to_owned()
}

#[test]
fn test_zero_is_one_digit() {
    let digits = Digits::new(0, Radix::Decimal);

    assert_eq!(digits.len(), 1);
    assert!(!digits.is_empty());
    assert_eq!(render(0, Radix::Hex), "0");
}

#[test]
fn test_extremes() {
    assert_eq!(render(u32::MAX, Radix::Decimal), "4294967295");
    assert_eq!(render(u32::MAX, Radix::Hex), "FFFFFFFF");
    assert_eq!(render(1 << 31, Radix::Decimal), "2147483648");
}

#[test]
fn test_random_values_match_std_formatting() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..5_000 {
        let value: u32 = rng.gen();
        assert_eq!(render(value, Radix::Decimal), value.to_string());
        assert_eq!(render(value, Radix::Hex), format!("{value:X}"));
    }
}

#[test]
fn test_random_divmod_matches_division() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..5_000 {
        let value: u32 = rng.gen();
        assert_eq!(divmod(value, Radix::Decimal), (value / 10, (value % 10) as u8));
        assert_eq!(divmod(value, Radix::Hex), (value >> 4, (value & 0xF) as u8));
    }
}

#[test]
fn test_symbols_are_uppercase() {
    let all: Vec<u8> = (0..16).map(symbol).collect();

    assert_eq!(all, b"0123456789ABCDEF");
}

#[test]
fn test_values_most_significant_first() {
    let digits = Digits::new(0xA0F, Radix::Hex);

    assert_eq!(digits.values().collect::<Vec<_>>(), [10, 0, 15]);
    assert_eq!(digits.symbols().collect::<Vec<_>>(), b"A0F");
}
