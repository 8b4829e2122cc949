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

//! Length computations shared by the encoder and decoder.

use super::{BYTES_PER_GROUP, DIGITS_PER_GROUP};

use core::fmt::{self, Display, Formatter};

/// Error information for an input whose length cannot be encoded or decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidLength {
    len: usize,
    multiple: usize,
}

impl InvalidLength {
    pub(crate) fn new(len: usize, multiple: usize) -> Self {
        Self {
            len,
            multiple,
        }
    }

    /// The length of the input.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The number the input length was required to be a multiple of
    /// (4 when encoding, 5 when decoding).
    pub fn multiple(&self) -> usize {
        self.multiple
    }
}

impl Display for InvalidLength {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "Length {} is not a multiple of {}",
            self.len, self.multiple,
        )
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for InvalidLength {}

/// Number of characters produced by encoding `len` bytes.
///
/// With `partial` set, a trailing group of `r` bytes becomes `r + 1`
/// characters; otherwise `len` must be a multiple of 4.
pub fn encoded_len(len: usize, partial: bool) -> Result<usize, InvalidLength> {
    let rem = len % BYTES_PER_GROUP;
    let tail = match rem {
        0 => 0,
        _ if partial => rem + 1,
        _ => return Err(InvalidLength::new(len, BYTES_PER_GROUP)),
    };
    Ok(len / BYTES_PER_GROUP * DIGITS_PER_GROUP + tail)
}

/// Number of bytes produced by decoding `len` characters.
///
/// With `partial` set, a trailing group of `k` characters becomes `k - 1`
/// bytes, as long as `k` is not 1; otherwise `len` must be a multiple of 5.
pub fn decoded_len(len: usize, partial: bool) -> Result<usize, InvalidLength> {
    let rem = len % DIGITS_PER_GROUP;
    let tail = match rem {
        0 => 0,
        1 => return Err(InvalidLength::new(len, DIGITS_PER_GROUP)),
        _ if partial => rem - 1,
        _ => return Err(InvalidLength::new(len, DIGITS_PER_GROUP)),
    };
    Ok(len / DIGITS_PER_GROUP * BYTES_PER_GROUP + tail)
}
