pub mod sequence;
pub mod shared;
pub mod utf;

use std::{ffi::OsString, fmt, str::FromStr, sync::Once};

use thiserror::Error;
use tracing::debug;

pub use sequence::{Buffer, CodepointSequence, Codepoints, SequenceError};
pub use shared::{release, retain, SharedSequence};
pub use utf::{CodeUnit, Codepoint, Encoding, Endianness};

static TRACING_INIT: Once = Once::new();

/// Installs a tracing subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=codepoints=trace`. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("no files given")]
    NoFiles,
    #[error("--encoding expects a value")]
    MissingEncoding,
    #[error("unknown encoding `{0}`, expected utf8, utf16le, utf16be, utf32le or utf32be")]
    UnknownEncoding(String),
}

/// How the bytes of a file are grouped into code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileEncoding {
    #[default]
    Utf8,
    Utf16(Endianness),
    Utf32(Endianness),
}

impl FromStr for FileEncoding {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "utf8" => Ok(FileEncoding::Utf8),
            "utf16le" => Ok(FileEncoding::Utf16(Endianness::LittleEndian)),
            "utf16be" => Ok(FileEncoding::Utf16(Endianness::BigEndian)),
            "utf32le" => Ok(FileEncoding::Utf32(Endianness::LittleEndian)),
            "utf32be" => Ok(FileEncoding::Utf32(Endianness::BigEndian)),
            _ => Err(CliError::UnknownEncoding(s.to_owned())),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub scalars: usize,
    pub faulty: usize,
    /// Bytes at the end of the file too few to make a whole code unit.
    pub trailing: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} scalars, {} faulty", self.scalars, self.faulty)?;
        if self.trailing > 0 {
            write!(f, ", {} trailing bytes", self.trailing)?;
        }
        Ok(())
    }
}

/// Decodes every codepoint in `bytes`. Returns `None` for empty input.
pub fn summarize(bytes: &[u8], encoding: FileEncoding) -> Option<Summary> {
    if bytes.is_empty() {
        return None;
    }
    let summary = match encoding {
        FileEncoding::Utf8 => tally(CodepointSequence::utf8(bytes), 0),
        FileEncoding::Utf16(endianness) => {
            let (units, trailing) = utf::utf16_units(bytes, endianness);
            tally(CodepointSequence::utf16(&units), trailing)
        }
        FileEncoding::Utf32(endianness) => {
            let (units, trailing) = utf::utf32_units(bytes, endianness);
            tally(CodepointSequence::utf32(&units), trailing)
        }
    };
    Some(summary)
}

fn tally(sequence: Option<CodepointSequence<'_>>, trailing: usize) -> Summary {
    let mut summary = Summary {
        trailing,
        ..Summary::default()
    };
    for (_, codepoint) in sequence.iter().flat_map(CodepointSequence::codepoints) {
        match codepoint {
            Codepoint::Scalar(_) => summary.scalars += 1,
            Codepoint::Faulty => summary.faulty += 1,
            Codepoint::Invalid => unreachable!(),
        }
    }
    summary
}

fn parse_args<I>(argv: I) -> Result<(FileEncoding, Vec<OsString>), CliError>
where
    I: IntoIterator<Item = OsString>,
{
    let mut encoding = FileEncoding::default();
    let mut files = Vec::new();
    let mut argv = argv.into_iter();
    while let Some(argument) = argv.next() {
        let text = argument.to_string_lossy().into_owned();
        if text == "--encoding" || text == "-e" {
            let value = argv.next().ok_or(CliError::MissingEncoding)?;
            encoding = value.to_string_lossy().parse()?;
        } else if let Some(value) = text.strip_prefix("--encoding=") {
            encoding = value.parse()?;
        } else {
            files.push(argument);
        }
    }
    if files.is_empty() {
        return Err(CliError::NoFiles);
    }
    Ok((encoding, files))
}

/// Reports how many scalars and faulty sequences each file holds.
pub fn codepoints<I>(argv: I) -> Result<(), Box<dyn std::error::Error>>
where
    I: IntoIterator<Item = OsString>,
{
    let (encoding, files) = parse_args(argv)?;
    for argument in files.iter() {
        print!("{}: ", argument.to_string_lossy());
        match std::fs::read(std::path::Path::new(argument)) {
            Ok(file) => {
                debug!(path = %argument.to_string_lossy(), bytes = file.len(), ?encoding, "decoding");
                match summarize(&file, encoding) {
                    Some(summary) => println!("{summary}"),
                    None => println!("empty"),
                }
            }
            Err(error) => {
                println!("{error}");
            }
        }
    }
    Ok(())
}
