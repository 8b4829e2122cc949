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

use proptest::prelude::*;
use std::thread;

use z85::alphabet::{value_of, ALPHABET};
use z85::decode::{decode_to_vec_with, DecodeConfig};
use z85::encode::{encode_to_string_with, EncodeConfig};
use z85::{decode, encode, DecodeError, EncodeError};

fn partial_encode(bytes: &[u8]) -> String {
    let mut config = EncodeConfig::new();
    config.allow_partial = true;
    encode_to_string_with(bytes, config).unwrap()
}

fn partial_decode(s: &str) -> Vec<u8> {
    let mut config = DecodeConfig::new();
    config.allow_partial = true;
    decode_to_vec_with(s, config).unwrap()
}

#[test]
fn encodes_and_decodes_group() {
    let bytes = [0x0c_u8, 0x00, 0x0f, 0x0f];
    let encoded = encode(&bytes).unwrap();
    assert_eq!(encoded, "3&*!G");
    assert_eq!(decode(&encoded).unwrap(), bytes);
}

#[test]
fn rejects_unaligned_bytes() {
    let err = encode(&[0x0c_u8, 0x00, 0x0f, 0x0f, 0x0e, 0x0e]).unwrap_err();
    match err {
        EncodeError::InvalidLength(e) => {
            assert_eq!(e.len(), 6);
            assert_eq!(e.multiple(), 4);
        }
        e => panic!("unexpected error: {:?}", e),
    }
}

#[test]
fn encodes_subslices() {
    let bytes = [0_u8, 0, 0, 0x0c, 0x00, 0x0f, 0x0f, 0x0e, 0x0e, 0, 0, 0, 0];
    let view = &bytes[3..11];
    let copy = view.to_vec();
    let boxed: Box<[u8]> = copy.clone().into_boxed_slice();

    let encoded = encode(view).unwrap();
    assert_eq!(encoded, "3&*!G4H@Es");
    assert_eq!(encode(&copy).unwrap(), encoded);
    assert_eq!(encode(&*boxed).unwrap(), encoded);
    assert_eq!(&encoded[..8], "3&*!G4H@");

    // A view that ends mid-group only needs the partial-group config.
    assert!(encode(&bytes[3..9]).is_err());
    assert_eq!(partial_encode(&bytes[3..9]), "3&*!G4H@");
    assert_eq!(partial_decode("3&*!G4H@"), &bytes[3..9]);
}

#[test]
fn chokes_on_invalid_ascii() {
    let err = decode("a_b").unwrap_err();
    assert_eq!(err.to_string(), "Character '_' in position 2 is not valid Z85");
    match err {
        DecodeError::InvalidChar(e) => {
            assert_eq!(e.char(), '_');
            assert_eq!(e.position(), 2);
        }
        e => panic!("unexpected error: {:?}", e),
    }
}

#[test]
fn chokes_on_invalid_unicode() {
    let err = decode("12Ø").unwrap_err();
    assert_eq!(err.to_string(), "Character 'Ø' in position 3 is not valid Z85");
}

#[test]
fn reports_length_after_chars() {
    let err = decode("HelloWorld0").unwrap_err();
    assert_eq!(err.to_string(), "Length 11 is not a multiple of 5");
}

#[test]
fn usable_from_many_threads() {
    let handles: Vec<_> = (0..8_u8)
        .map(|i| {
            thread::spawn(move || {
                let bytes = [i; 64];
                decode(&encode(&bytes).unwrap()).unwrap() == bytes
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

fn group_value(group: &[char]) -> u64 {
    group.iter().fold(0, |sum, &c| {
        sum * 85 + u64::from(value_of(c).expect("char outside alphabet"))
    })
}

/// Five alphabet chars whose value fits in a `u32` (at most `%nSc0`).
fn z85_group() -> impl Strategy<Value = String> {
    let symbols: Vec<char> = ALPHABET.chars().collect();
    prop::collection::vec(prop::sample::select(symbols), 5)
        .prop_filter("group above %nSc0", |group| {
            group_value(group) <= u64::from(u32::MAX)
        })
        .prop_map(|group| group.into_iter().collect())
}

fn z85_string() -> impl Strategy<Value = String> {
    prop::collection::vec(z85_group(), 0..8).prop_map(|groups| groups.concat())
}

#[test]
fn groups_above_u32_max_wrap() {
    assert_eq!(group_value(&['%', 'n', 'S', 'c', '0']), u64::from(u32::MAX));
    assert_eq!(encode(&decode("%nSc0").unwrap()).unwrap(), "%nSc0");
    assert_eq!(encode(&decode("$0000").unwrap()).unwrap(), "0Zu&#");
    assert_eq!(encode(&decode("%nSc1").unwrap()).unwrap(), "00000");
}

proptest! {
    #[test]
    fn roundtrip(groups in prop::collection::vec(any::<[u8; 4]>(), 0..64)) {
        let bytes: Vec<u8> = groups.concat();
        let encoded = encode(&bytes).unwrap();
        prop_assert_eq!(encoded.len(), bytes.len() / 4 * 5);
        prop_assert!(encoded.chars().all(|c| ALPHABET.contains(c)));
        prop_assert_eq!(decode(&encoded).unwrap(), bytes);
    }

    #[test]
    fn inverse_roundtrip(s in z85_string()) {
        let decoded = decode(&s).unwrap();
        prop_assert_eq!(decoded.len(), s.len() / 5 * 4);
        prop_assert_eq!(encode(&decoded).unwrap(), s);
    }

    #[test]
    fn partial_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let encoded = partial_encode(&bytes);
        prop_assert_eq!(encoded.len(), z85::encoded_len(bytes.len(), true).unwrap());
        prop_assert_eq!(partial_decode(&encoded), bytes);
    }

    #[test]
    fn view_matches_copy(
        bytes in prop::collection::vec(any::<u8>(), 0..64),
        start in 0_usize..64,
        groups in 0_usize..16,
    ) {
        let start = start.min(bytes.len());
        let end = (start + groups * 4).min(bytes.len());
        let end = end - (end - start) % 4;
        let view = &bytes[start..end];
        prop_assert_eq!(encode(view).unwrap(), encode(&view.to_vec()).unwrap());
    }

    #[test]
    fn reports_first_invalid_char(
        s in z85_string(),
        index in any::<prop::sample::Index>(),
        bad in prop::sample::select(vec!['_', '~', '|', ' ', 'Ø', '\u{1f600}']),
    ) {
        prop_assume!(!s.is_empty());
        let mut chars: Vec<char> = s.chars().collect();
        let i = index.index(chars.len());
        chars[i] = bad;
        // A second bad char later on must not be reported.
        chars.push('`');
        let s: String = chars.into_iter().collect();
        match decode(&s) {
            Err(DecodeError::InvalidChar(e)) => {
                prop_assert_eq!(e.char(), bad);
                prop_assert_eq!(e.position(), i + 1);
            }
            other => prop_assert!(false, "unexpected result: {:?}", other),
        }
    }
}
