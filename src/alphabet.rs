/*
 * Copyright (C) 2023 taylor.fish <contact@taylor.fish>
 *
 * This file is part of z85.
 *
 * z85 is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * z85 is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with z85. If not, see <https://www.gnu.org/licenses/>.
 */

//! The Z85 alphabet and its inverse.

use super::BASE;

use core::convert::TryFrom;

/// The 85 characters of the Z85 alphabet, in digit order.
pub const ALPHABET: &str = "0123456789\
    abcdefghijklmnopqrstuvwxyz\
    ABCDEFGHIJKLMNOPQRSTUVWXYZ\
    .-:+=^!/*?&<>()[]{}@%$#";

const SYMBOLS: &[u8] = ALPHABET.as_bytes();

const NONE: u8 = 0xff;

const INVERSE: [u8; 128] = {
    let mut table = [NONE; 128];
    let mut i = 0;
    while i < SYMBOLS.len() {
        table[SYMBOLS[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// A base-85 digit. Always less than 85.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Digit(u8);

macro_rules! const_digit {
    ($n:expr) => {{
        use crate::alphabet::Digit;
        const DIGIT: Digit = Digit::__const($n);
        DIGIT
    }};
}

impl Digit {
    pub const MAX: Self = const_digit!(BASE as u8 - 1);

    pub fn new(x: u8) -> Option<Self> {
        (u32::from(x) < BASE).then(|| Self(x))
    }

    /// # Safety
    ///
    /// `x` must be less than 85.
    pub unsafe fn new_unchecked(x: u8) -> Self {
        debug_assert!(u32::from(x) < BASE);
        Self(x)
    }

    #[doc(hidden)]
    pub const fn __const(n: u8) -> Self {
        const BOUNDS_CHECK: [u8; 1] = [0];
        Self(n + BOUNDS_CHECK[(n as u32 >= BASE) as usize])
    }

    pub fn from_ascii(b: u8) -> Option<Self> {
        match INVERSE.get(usize::from(b)) {
            Some(&NONE) | None => None,
            // SAFETY: `INVERSE` only holds `NONE` or indices into `SYMBOLS`,
            // which has 85 elements.
            Some(&d) => Some(unsafe { Self::new_unchecked(d) }),
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        u8::try_from(c).ok().and_then(Self::from_ascii)
    }

    pub fn to_ascii(self) -> u8 {
        SYMBOLS[usize::from(self.0)]
    }

    pub fn to_char(self) -> char {
        char::from(self.to_ascii())
    }
}

impl From<Digit> for u8 {
    fn from(d: Digit) -> u8 {
        d.0
    }
}

impl From<Digit> for u32 {
    fn from(d: Digit) -> u32 {
        u32::from(d.0)
    }
}

/// Returns the digit value of `c`, or [`None`] if `c` is not part of the
/// Z85 alphabet.
pub fn value_of(c: char) -> Option<u8> {
    Digit::from_char(c).map(u8::from)
}

/// Returns the character that encodes the digit value `value`, or [`None`]
/// if `value` is 85 or greater.
pub fn char_of(value: u8) -> Option<char> {
    Digit::new(value).map(Digit::to_char)
}
