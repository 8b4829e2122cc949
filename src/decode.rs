/*
 * Copyright (C) 2021-2023 taylor.fish <contact@taylor.fish>
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

//! Functions and types for decoding Z85 data.

use super::alphabet::Digit;
use super::iter::{self, Flatten, Group};
use super::len::{decoded_len, InvalidLength};
use super::{BASE, BYTES_PER_GROUP, DIGITS_PER_GROUP};

use core::fmt::{self, Display, Formatter};
use core::iter::FusedIterator;
use core::slice::Chunks;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Error information for [`DecodeError::InvalidChar`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidChar {
    ch: char,
    position: usize,
}

impl InvalidChar {
    /// The character that is not part of the Z85 alphabet.
    pub fn char(&self) -> char {
        self.ch
    }

    /// The 1-based position of the character, counted in chars (not bytes).
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Display for InvalidChar {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "Character '{}' in position {} is not valid Z85",
            self.ch, self.position,
        )
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for InvalidChar {}

/// An error encountered while decoding.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The input contained a character outside the Z85 alphabet. This is
    /// always the first such character.
    InvalidChar(InvalidChar),
    /// The input was not the correct number of characters.
    InvalidLength(InvalidLength),
}

/// Alias of <code>[Result]\<T, [DecodeError]></code>.
pub type DecodeResult<T> = Result<T, DecodeError>;

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::InvalidChar(e) => write!(f, "{}", e),
            Self::InvalidLength(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for DecodeError {}

impl From<InvalidChar> for DecodeError {
    fn from(e: InvalidChar) -> Self {
        Self::InvalidChar(e)
    }
}

impl From<InvalidLength> for DecodeError {
    fn from(e: InvalidLength) -> Self {
        Self::InvalidLength(e)
    }
}

/// Used by the `decode_*_with` functions to configure the decoding process.
#[non_exhaustive]
#[derive(Clone, Copy, Debug)]
pub struct DecodeConfig {
    /// Whether to accept a trailing group of 2 to 4 characters, as produced
    /// by [`EncodeConfig::allow_partial`](crate::encode::EncodeConfig). A
    /// trailing group of *n* characters is decoded as *n* − 1 bytes.
    /// [default: false]
    pub allow_partial: bool,
}

impl DecodeConfig {
    /// Returns the default configuration.
    pub const fn new() -> Self {
        Self {
            allow_partial: false,
        }
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds the first char in `s` that is not in the alphabet.
fn validate(s: &str) -> Result<(), InvalidChar> {
    s.chars()
        .enumerate()
        .find(|(_, c)| Digit::from_char(*c).is_none())
        .map_or(Ok(()), |(i, ch)| {
            Err(InvalidChar {
                ch,
                position: i + 1,
            })
        })
}

struct DigitsToUnflatBytes<'a>(Chunks<'a, u8>);

type DigitsToUnflatBytesItem = Group<u8, BYTES_PER_GROUP>;

impl<'a> Iterator for DigitsToUnflatBytes<'a> {
    type Item = DigitsToUnflatBytesItem;

    fn next(&mut self) -> Option<Self::Item> {
        fn to_digit(b: u8) -> Digit {
            if let Some(d) = Digit::from_ascii(b) {
                d
            } else {
                panic!("unvalidated byte in input: {:#04x}", b);
            }
        }

        let chars = self.0.next()?;
        // A partial group is padded with the highest digit so that the
        // truncated bytes round back to the original value.
        let value = chars
            .iter()
            .copied()
            .map(to_digit)
            .chain(core::iter::repeat(Digit::MAX))
            .take(DIGITS_PER_GROUP)
            .fold(0_u32, |sum, d| {
                sum.wrapping_mul(BASE).wrapping_add(u32::from(d))
            });
        Some(iter::group(value.to_be_bytes(), chars.len() - 1))
    }
}

impl<'a> FusedIterator for DigitsToUnflatBytes<'a> {}

/// Iterator returned by [`decode_str`].
pub struct StrDecoder<'a> {
    iter: Flatten<DigitsToUnflatBytes<'a>, DigitsToUnflatBytesItem>,
    remaining: usize,
}

impl<'a> StrDecoder<'a> {
    pub(crate) fn new(s: &'a str, config: DecodeConfig) -> DecodeResult<Self> {
        validate(s)?;
        // Every char is now ASCII, so the byte length is the char count.
        let remaining = decoded_len(s.len(), config.allow_partial)?;
        Ok(Self {
            iter: Flatten::new(DigitsToUnflatBytes(
                s.as_bytes().chunks(DIGITS_PER_GROUP),
            )),
            remaining,
        })
    }
}

impl<'a> Iterator for StrDecoder<'a> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let b = self.iter.next()?;
        self.remaining -= 1;
        Some(b)
    }

    fn fold<B, F>(self, init: B, f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        self.iter.fold(init, f)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> ExactSizeIterator for StrDecoder<'a> {}

impl<'a> FusedIterator for StrDecoder<'a> {}

/// Decodes a Z85 `str`.
///
/// The whole input is validated before this function returns, so the
/// returned iterator cannot fail.
///
/// Groups are summed with wrapping 32-bit arithmetic. A group above `%nSc0`
/// (`u32::MAX`) wraps, so re-encoding its bytes gives a different string;
/// every group at or below `%nSc0` round-trips exactly.
pub fn decode_str(s: &str) -> DecodeResult<StrDecoder<'_>> {
    decode_str_with(s, DecodeConfig::new())
}

/// Decodes a Z85 `str` with the given config.
///
/// This function is like [`decode_str`], but takes a configuration object.
pub fn decode_str_with(
    s: &str,
    config: DecodeConfig,
) -> DecodeResult<StrDecoder<'_>> {
    StrDecoder::new(s, config)
}

/// Decodes a Z85 `str` into a [`Vec`] of exactly the decoded length.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_to_vec(s: &str) -> DecodeResult<Vec<u8>> {
    decode_to_vec_with(s, DecodeConfig::new())
}

/// Decodes a Z85 `str` into a [`Vec`] with the given config.
///
/// This function is like [`decode_to_vec`], but takes a configuration object.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_to_vec_with(
    s: &str,
    config: DecodeConfig,
) -> DecodeResult<Vec<u8>> {
    let decoder = decode_str_with(s, config)?;
    let mut vec = Vec::with_capacity(decoder.len());
    vec.extend(decoder);
    Ok(vec)
}
