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

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

//! Z85, ZeroMQ's variant of Base85.
//!
//! Every 4 bytes of input are encoded as 5 printable ASCII characters:
//!
//! ```
//! let bytes: [u8; 8] = [0x86, 0x4f, 0xd2, 0x6f, 0xb5, 0x59, 0xf7, 0x5b];
//! assert_eq!(z85::encode(&bytes).unwrap(), "HelloWorld");
//! assert_eq!(z85::decode("HelloWorld").unwrap(), bytes);
//! ```
//!
//! Decoding reports the first character outside the alphabet, counting
//! positions from 1:
//!
//! ```
//! let err = z85::decode("a_b").unwrap_err();
//! assert_eq!(err.to_string(), "Character '_' in position 2 is not valid Z85");
//! ```

#[macro_use]
pub mod alphabet;
pub mod decode;
pub mod encode;
mod iter;
mod len;

#[cfg(feature = "alloc")]
extern crate alloc;

const BASE: u32 = 85;
const BYTES_PER_GROUP: usize = 4;
const DIGITS_PER_GROUP: usize = 5;

pub use decode::{decode_str, DecodeError};
#[cfg(feature = "alloc")]
pub use decode::decode_to_vec;

pub use encode::{encode_to_bytes, encode_to_chars, EncodeError};
#[cfg(feature = "alloc")]
pub use encode::encode_to_string;

pub use len::{decoded_len, encoded_len, InvalidLength};

/// Encodes bytes as a Z85 string.
///
/// `bytes` may be any byte container or slice; its length must be a multiple
/// of 4. This is the same as [`encode_to_string`].
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode<B>(bytes: &B) -> Result<alloc::string::String, EncodeError>
where
    B: AsRef<[u8]> + ?Sized,
{
    encode_to_string(bytes)
}

/// Decodes a Z85 string into a newly allocated buffer.
///
/// The length of `s` must be a multiple of 5. This is the same as
/// [`decode_to_vec`].
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode(s: &str) -> Result<alloc::vec::Vec<u8>, DecodeError> {
    decode_to_vec(s)
}
