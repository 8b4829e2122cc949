/*
 * Copyright (C) 2022-2023 taylor.fish <contact@taylor.fish>
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

use std::ffi::OsStr;
use std::fmt::{Debug, Display};
use std::fs::File;
use std::io::{stdin, stdout, Read, Write};
use std::path::Path;
use std::process::exit;
use std::str::Utf8Error;

use z85::decode::{decode_str_with, DecodeConfig, DecodeError};
use z85::encode::{encode_to_bytes_with, EncodeConfig, EncodeError};

const USAGE: &str = "\
Usage: z85 [options] [file]

Encodes or decodes Z85 data from [file] and writes the result to standard
output. If [file] is missing or \"-\", the data is read from standard input.

Options:
  -d --decode   Decode data instead of encoding. A single trailing newline in
                the input is ignored.
  -p --partial  Allow input whose length is not a multiple of 4 (when
                encoding) or 5 (when decoding).
  -h --help     Show this help message
  -v --version  Show program version
";

#[macro_use]
mod error_exit {
    use super::{exit, Display};

    macro_rules! error_exit {
        ($($args:tt)*) => {
            crate::error_exit::__run(format_args!($($args)*));
        };
    }

    #[doc(hidden)]
    pub fn __run(args: impl Display) -> ! {
        eprintln!("error: {}", args);
        if cfg!(feature = "cli-panic") {
            panic!("error: {}", args);
        } else {
            exit(1);
        }
    }
}

fn expect<T, E: Debug>(result: Result<T, E>, msg: impl Display) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("error: {}", msg);
        if cfg!(feature = "cli-panic") {
            panic!("error: {}: {:?}", msg, e);
        } else {
            exit(1);
        }
    })
}

#[derive(Default)]
struct ParsedArgs<'a> {
    pub decode: bool,
    pub partial: bool,
    pub path: Option<&'a Path>,
}

fn show_usage() -> ! {
    print!("{}", USAGE);
    exit(0);
}

fn show_version() -> ! {
    println!("{}", env!("CARGO_PKG_VERSION"));
    exit(0);
}

macro_rules! args_error {
    ($($args:tt)*) => {
        error_exit!(
            "{}\n{}",
            format_args!($($args)*),
            "See `z85 --help` for usage information.",
        );
    };
}

fn set_flag(parsed: &mut ParsedArgs<'_>, flag: char) {
    match flag {
        'h' => show_usage(),
        'v' => show_version(),
        'd' => parsed.decode = true,
        'p' => parsed.partial = true,
        c => {
            args_error!("unrecognized option: -{}", c);
        }
    }
}

fn parse_args<'a, Args>(args: Args) -> ParsedArgs<'a>
where
    Args: IntoIterator<Item = &'a OsStr>,
{
    let mut parsed = ParsedArgs::default();
    let mut operands = Vec::new();
    let mut args = args.into_iter();

    for arg in args.by_ref() {
        match &*arg.to_string_lossy() {
            "--" => break,
            "--help" => show_usage(),
            "--version" => show_version(),
            "--decode" => set_flag(&mut parsed, 'd'),
            "--partial" => set_flag(&mut parsed, 'p'),
            s if s.starts_with("--") => {
                args_error!("unrecognized option: {}", s);
            }
            s if s.len() > 1 && s.starts_with('-') => {
                s.chars().skip(1).for_each(|c| set_flag(&mut parsed, c));
            }
            _ => operands.push(arg),
        }
    }
    operands.extend(args);

    if let Some(extra) = operands.get(1) {
        args_error!("unexpected argument: {}", extra.to_string_lossy());
    }
    parsed.path = operands.pop().filter(|&f| f != "-").map(Path::new);
    parsed
}

/// Why the input could not be converted.
#[derive(Debug)]
enum ConvertError {
    Encode(EncodeError),
    Utf8(Utf8Error),
    Decode(DecodeError),
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(e) => write!(f, "cannot encode input: {}", e),
            Self::Utf8(e) => write!(f, "input is not valid UTF-8: {}", e),
            Self::Decode(e) => write!(f, "input is not valid Z85 data: {}", e),
        }
    }
}

fn trim_newline(s: &str) -> &str {
    s.strip_suffix('\n')
        .map_or(s, |s| s.strip_suffix('\r').unwrap_or(s))
}

fn convert(
    input: &[u8],
    decode: bool,
    partial: bool,
) -> Result<Vec<u8>, ConvertError> {
    if !decode {
        let mut config = EncodeConfig::new();
        config.allow_partial = partial;
        let encoder = encode_to_bytes_with(input, config)
            .map_err(ConvertError::Encode)?;
        return Ok(encoder.collect());
    }

    let input = std::str::from_utf8(input).map_err(ConvertError::Utf8)?;
    let mut config = DecodeConfig::new();
    config.allow_partial = partial;
    let decoder = decode_str_with(trim_newline(input), config)
        .map_err(ConvertError::Decode)?;
    Ok(decoder.collect())
}

fn read_input(stream: &mut impl Read) -> Vec<u8> {
    let mut input = Vec::new();
    expect(stream.read_to_end(&mut input), "could not read input");
    input
}

fn main() {
    let args: Vec<_> = std::env::args_os().skip(1).collect();
    let parsed = parse_args(args.iter().map(|s| s.as_os_str()));

    let input = match parsed.path {
        Some(path) => read_input(&mut File::open(path).unwrap_or_else(|e| {
            error_exit!("could not open file '{}': {}", path.display(), e);
        })),
        None => read_input(&mut stdin()),
    };
    let output = convert(&input, parsed.decode, parsed.partial)
        .unwrap_or_else(|e| {
            error_exit!("{}", e);
        });

    let mut writer = stdout();
    expect(writer.write_all(&output), "could not write to standard output");
    expect(writer.flush(), "could not write to standard output");
}
