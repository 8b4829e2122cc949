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

//! Functions and types for encoding Z85 data.

use super::alphabet::Digit;
use super::iter::{self, Flatten, Group};
use super::len::{encoded_len, InvalidLength};
use super::{BASE, BYTES_PER_GROUP, DIGITS_PER_GROUP};

use core::fmt::{self, Display, Formatter};
use core::iter::FusedIterator;
use core::slice::Chunks;

#[cfg(feature = "alloc")]
use alloc::string::String;

/// An error encountered while encoding.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodeError {
    /// The input length was not a multiple of 4, and
    /// [`EncodeConfig::allow_partial`] was false.
    InvalidLength(InvalidLength),
}

/// Alias of <code>[Result]\<T, [EncodeError]></code>.
pub type EncodeResult<T> = Result<T, EncodeError>;

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::InvalidLength(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for EncodeError {}

impl From<InvalidLength> for EncodeError {
    fn from(e: InvalidLength) -> Self {
        Self::InvalidLength(e)
    }
}

/// Used by the `encode_*_with` functions to configure the encoding process.
#[non_exhaustive]
#[derive(Clone, Copy, Debug)]
pub struct EncodeConfig {
    /// Whether to accept input whose length is not a multiple of 4. A
    /// trailing group of *n* bytes is encoded as *n* + 1 characters.
    /// [default: false]
    pub allow_partial: bool,
}

impl EncodeConfig {
    /// Returns the default configuration.
    pub const fn new() -> Self {
        Self {
            allow_partial: false,
        }
    }
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

struct BytesToUnflatDigits<'a>(Chunks<'a, u8>);

type BytesToUnflatDigitsItem = Group<Digit, DIGITS_PER_GROUP>;

impl<'a> Iterator for BytesToUnflatDigits<'a> {
    type Item = BytesToUnflatDigitsItem;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.0.next()?;
        let mut buf = [0; BYTES_PER_GROUP];
        buf[..bytes.len()].copy_from_slice(bytes);
        let mut value = u32::from_be_bytes(buf);

        let mut digits = [const_digit!(0); DIGITS_PER_GROUP];
        digits.iter_mut().rev().for_each(|d| {
            // SAFETY: `value % 85` is always less than 85.
            *d = unsafe { Digit::new_unchecked((value % BASE) as u8) };
            value /= BASE;
        });
        Some(iter::group(digits, bytes.len() + 1))
    }
}

impl<'a> FusedIterator for BytesToUnflatDigits<'a> {}

struct DigitEncoder<'a> {
    iter: Flatten<BytesToUnflatDigits<'a>, BytesToUnflatDigitsItem>,
    remaining: usize,
}

impl<'a> DigitEncoder<'a> {
    fn new(bytes: &'a [u8], config: EncodeConfig) -> EncodeResult<Self> {
        Ok(Self {
            remaining: encoded_len(bytes.len(), config.allow_partial)?,
            iter: Flatten::new(BytesToUnflatDigits(
                bytes.chunks(BYTES_PER_GROUP),
            )),
        })
    }
}

impl<'a> Iterator for DigitEncoder<'a> {
    type Item = Digit;

    fn next(&mut self) -> Option<Self::Item> {
        let d = self.iter.next()?;
        self.remaining -= 1;
        Some(d)
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

/// Iterator returned by [`encode_to_chars`].
pub struct CharEncoder<'a>(DigitEncoder<'a>);

impl<'a> Iterator for CharEncoder<'a> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(Digit::to_char)
    }

    fn fold<B, F>(self, init: B, mut f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        self.0.fold(init, |b, d| f(b, d.to_char()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> ExactSizeIterator for CharEncoder<'a> {}

impl<'a> FusedIterator for CharEncoder<'a> {}

/// Iterator returned by [`encode_to_bytes`].
///
/// Every byte produced is an ASCII character from the Z85 alphabet.
pub struct BytesEncoder<'a>(DigitEncoder<'a>);

impl<'a> Iterator for BytesEncoder<'a> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(Digit::to_ascii)
    }

    fn fold<B, F>(self, init: B, mut f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        self.0.fold(init, |b, d| f(b, d.to_ascii()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> ExactSizeIterator for BytesEncoder<'a> {}

impl<'a> FusedIterator for BytesEncoder<'a> {}

/// Encodes bytes as a sequence of Z85 chars.
///
/// Fails if the length of `bytes` is not a multiple of 4.
pub fn encode_to_chars<B>(bytes: &B) -> EncodeResult<CharEncoder<'_>>
where
    B: AsRef<[u8]> + ?Sized,
{
    encode_to_chars_with(bytes, EncodeConfig::new())
}

/// Encodes bytes as Z85 data in the form of ASCII bytes.
///
/// Fails if the length of `bytes` is not a multiple of 4.
pub fn encode_to_bytes<B>(bytes: &B) -> EncodeResult<BytesEncoder<'_>>
where
    B: AsRef<[u8]> + ?Sized,
{
    encode_to_bytes_with(bytes, EncodeConfig::new())
}

/// Encodes bytes as a Z85 [`String`].
///
/// Fails if the length of `bytes` is not a multiple of 4.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_to_string<B>(bytes: &B) -> EncodeResult<String>
where
    B: AsRef<[u8]> + ?Sized,
{
    encode_to_string_with(bytes, EncodeConfig::new())
}

/// Encodes bytes as a sequence of Z85 chars with the given config.
///
/// This function is like [`encode_to_chars`], but takes a configuration
/// object.
pub fn encode_to_chars_with<B>(
    bytes: &B,
    config: EncodeConfig,
) -> EncodeResult<CharEncoder<'_>>
where
    B: AsRef<[u8]> + ?Sized,
{
    DigitEncoder::new(bytes.as_ref(), config).map(CharEncoder)
}

/// Encodes bytes as ASCII Z85 data with the given config.
///
/// This function is like [`encode_to_bytes`], but takes a configuration
/// object.
pub fn encode_to_bytes_with<B>(
    bytes: &B,
    config: EncodeConfig,
) -> EncodeResult<BytesEncoder<'_>>
where
    B: AsRef<[u8]> + ?Sized,
{
    DigitEncoder::new(bytes.as_ref(), config).map(BytesEncoder)
}

/// Encodes bytes as a Z85 [`String`] with the given config.
///
/// This function is like [`encode_to_string`], but takes a configuration
/// object.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_to_string_with<B>(
    bytes: &B,
    config: EncodeConfig,
) -> EncodeResult<String>
where
    B: AsRef<[u8]> + ?Sized,
{
    let chars = encode_to_chars_with(bytes, config)?;
    let mut s = String::with_capacity(chars.len());
    s.extend(chars);
    Ok(s)
}
