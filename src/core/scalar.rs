//! Purpose: Render one scalar event as JSON text.
//! Exports: `write_key`, `write_value`.
//! Role: Leaf emitter shared by the sequence and mapping translators.
//! Invariants: Keys are always written as JSON strings, whatever their source style.
//! Invariants: Legacy mode copies bytes unchanged; Escaped mode always yields valid JSON tokens.
use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, Serializer};
use tracing::warn;

use crate::core::error::{Error, ErrorKind};
use crate::core::event::Scalar;
use crate::core::options::{StringMode, TranslateOptions};

pub(crate) fn write_key<W>(
    out: &mut W,
    key: &Scalar<'_>,
    options: &TranslateOptions,
) -> Result<(), Error>
where
    W: Write + ?Sized,
{
    match options.strings {
        StringMode::Legacy => {
            if key.value.is_empty() {
                return Err(Error::new(ErrorKind::Usage).with_message("mapping key is empty"));
            }
            write_raw_quoted(out, &key.value)
        }
        StringMode::Escaped => write_escaped(out, &key.value, options.ascii_only),
    }
}

pub(crate) fn write_value<W>(
    out: &mut W,
    scalar: &Scalar<'_>,
    options: &TranslateOptions,
) -> Result<(), Error>
where
    W: Write + ?Sized,
{
    let text: &str = &scalar.value;
    match options.strings {
        StringMode::Legacy => {
            if text.is_empty() {
                return Err(Error::new(ErrorKind::Usage).with_message("scalar value is empty"));
            }
            if !scalar.is_plain() {
                return write_raw_quoted(out, text);
            }
            if !is_json_literal(text) {
                warn!(
                    scalar = text,
                    "plain scalar is not a JSON literal; output is not valid JSON"
                );
            }
            out.write_all(text.as_bytes()).map_err(write_error)
        }
        StringMode::Escaped => {
            if scalar.is_plain() {
                if is_yaml_null(text) {
                    return out.write_all(b"null").map_err(write_error);
                }
                if is_json_literal(text) {
                    return out.write_all(text.as_bytes()).map_err(write_error);
                }
            }
            write_escaped(out, text, options.ascii_only)
        }
    }
}

fn is_yaml_null(text: &str) -> bool {
    text.is_empty() || text == "~"
}

/// True when `text` is a bare JSON token: `true`, `false`, `null` or a number.
fn is_json_literal(text: &str) -> bool {
    match text {
        "true" | "false" | "null" => true,
        _ => {
            let starts_like_number = text
                .bytes()
                .next()
                .is_some_and(|b| b == b'-' || b.is_ascii_digit());
            starts_like_number && serde_json::from_str::<serde_json::Number>(text).is_ok()
        }
    }
}

fn write_raw_quoted<W>(out: &mut W, text: &str) -> Result<(), Error>
where
    W: Write + ?Sized,
{
    out.write_all(b"\"").map_err(write_error)?;
    out.write_all(text.as_bytes()).map_err(write_error)?;
    out.write_all(b"\"").map_err(write_error)
}

fn write_escaped<W>(out: &mut W, text: &str, ascii_only: bool) -> Result<(), Error>
where
    W: Write + ?Sized,
{
    let result = if ascii_only {
        text.serialize(&mut Serializer::with_formatter(&mut *out, AsciiFormatter))
    } else {
        text.serialize(&mut Serializer::with_formatter(&mut *out, CompactFormatter))
    };
    result.map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to write JSON string")
            .with_source(err)
    })
}

fn write_error(err: io::Error) -> Error {
    Error::new(ErrorKind::Io)
        .with_message("failed to write output")
        .with_source(err)
}

/// Compact formatter that writes every non-ASCII character as a `\uXXXX` escape.
struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut rest = fragment;
        while let Some(pos) = rest.find(|ch: char| !ch.is_ascii()) {
            writer.write_all(rest[..pos].as_bytes())?;
            let mut chars = rest[pos..].chars();
            if let Some(ch) = chars.next() {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
            rest = chars.as_str();
        }
        writer.write_all(rest.as_bytes())
    }
}
