//! Purpose: Render translation failures as human-readable or JSON diagnostics.
//! Exports: `diagnostic_text`, `diagnostic_json`.
//! Role: Error reporter used by the CLI; pure formatting with no I/O.
//! Invariants: Diagnostics are written to stderr only and never mix with JSON output.
//! Invariants: Positions are printed 1-based, as recorded on the error.
//! Invariants: JSON schema is additive-only; optional fields are omitted when unknown.
use std::error::Error as StdError;

use serde_json::{Map, Value, json};

use crate::core::error::{Error, ErrorKind};
use crate::core::event::{EventKind, Mark};

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn category_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Memory => "Memory error:",
        ErrorKind::Read => "Reader error:",
        ErrorKind::Scan => "Scanner error:",
        ErrorKind::Parse => "Parser error:",
        ErrorKind::Grammar => "Event error:",
        ErrorKind::Limit => "Limit error:",
        ErrorKind::Usage => "Usage error:",
        ErrorKind::Io => "I/O error:",
        ErrorKind::Internal => "Internal error:",
    }
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Memory => "not enough memory for parsing".to_string(),
        ErrorKind::Read => "input could not be read".to_string(),
        ErrorKind::Scan => "malformed YAML".to_string(),
        ErrorKind::Parse => "malformed YAML document structure".to_string(),
        ErrorKind::Grammar => "unexpected event".to_string(),
        ErrorKind::Limit => "resource limit exceeded".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
        ErrorKind::Internal => "internal error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn at_mark(mark: Mark) -> String {
    format!(" at line {}, column {}", mark.line, mark.column)
}

/// Joins kinds as "A, B or C".
fn expected_list(expected: &[EventKind]) -> String {
    let names: Vec<&str> = expected.iter().map(|kind| kind.as_str()).collect();
    match names.split_last() {
        None => String::new(),
        Some((last, [])) => (*last).to_string(),
        Some((last, rest)) => format!("{} or {last}", rest.join(", ")),
    }
}

fn headline(err: &Error) -> String {
    let message = error_message(err);
    let position = err.mark().map(at_mark).unwrap_or_default();
    match err.kind() {
        ErrorKind::Read => match (err.value(), err.offset()) {
            (Some(value), Some(offset)) => format!("{message}: #{value:X} at {offset}"),
            (None, Some(offset)) => format!("{message} at {offset}"),
            _ => message,
        },
        ErrorKind::Grammar if !err.expected().is_empty() => {
            format!(
                "{message}{position}. Expected {}.",
                expected_list(err.expected())
            )
        }
        _ => format!("{message}{position}"),
    }
}

/// Formats `err` as libyaml-style diagnostic lines.
pub fn diagnostic_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    let label = colorize_label(category_label(err.kind()), use_color, AnsiColor::Red);
    match err.context() {
        Some((context, mark)) => {
            // The headline already carries the position when both share it.
            if err.mark() == Some(mark) {
                lines.push(format!("{label} {context}"));
            } else {
                lines.push(format!("{label} {context}{}", at_mark(mark)));
            }
            lines.push(headline(err));
        }
        None => lines.push(format!("{label} {}", headline(err))),
    }

    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {}",
            colorize_label("path:", use_color, AnsiColor::Yellow),
            path.display()
        ));
    }
    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

/// Formats `err` as a single `{"error": {...}}` JSON object.
pub fn diagnostic_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some((context, mark)) = err.context() {
        inner.insert(
            "context".to_string(),
            json!({"text": context, "line": mark.line, "column": mark.column}),
        );
    }
    if let Some(mark) = err.mark() {
        inner.insert("line".to_string(), json!(mark.line));
        inner.insert("column".to_string(), json!(mark.column));
    }
    if let Some(offset) = err.offset() {
        inner.insert("offset".to_string(), json!(offset));
    }
    if let Some(value) = err.value() {
        inner.insert("value".to_string(), json!(value));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    if let Some(found) = err.found() {
        inner.insert("found".to_string(), json!(found));
        inner.insert("expected".to_string(), json!(err.expected()));
    }
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

#[cfg(test)]
mod tests {
    use super::{diagnostic_json, diagnostic_text, expected_list};
    use crate::core::error::{Error, ErrorKind};
    use crate::core::event::{EventKind, Mark};

    #[test]
    fn memory_error_line() {
        let err = Error::new(ErrorKind::Memory);
        assert_eq!(
            diagnostic_text(&err, false),
            "Memory error: not enough memory for parsing"
        );
    }

    #[test]
    fn reader_error_with_and_without_value() {
        let err = Error::new(ErrorKind::Read)
            .with_message("invalid UTF-8 octet")
            .with_offset(12)
            .with_value(0xff);
        assert_eq!(
            diagnostic_text(&err, false),
            "Reader error: invalid UTF-8 octet: #FF at 12"
        );

        let err = Error::new(ErrorKind::Read)
            .with_message("incomplete UTF-8 octet sequence")
            .with_offset(3);
        assert_eq!(
            diagnostic_text(&err, false),
            "Reader error: incomplete UTF-8 octet sequence at 3"
        );
    }

    #[test]
    fn scanner_error_with_context_spans_two_lines() {
        let err = Error::new(ErrorKind::Scan)
            .with_context("while scanning a quoted scalar", Mark::new(3, 1, 4))
            .with_message("found unexpected end of stream")
            .with_mark(Mark::new(9, 2, 1));
        assert_eq!(
            diagnostic_text(&err, false),
            "Scanner error: while scanning a quoted scalar at line 1, column 4\n\
             found unexpected end of stream at line 2, column 1"
        );
    }

    #[test]
    fn shared_context_position_is_printed_once() {
        let err = Error::new(ErrorKind::Parse)
            .with_context("while parsing a flow sequence", Mark::new(8, 1, 9))
            .with_message("expected ',' or ']'")
            .with_mark(Mark::new(8, 1, 9));
        assert_eq!(
            diagnostic_text(&err, false),
            "Parser error: while parsing a flow sequence\n\
             expected ',' or ']' at line 1, column 9"
        );
    }

    #[test]
    fn parser_error_without_context() {
        let err = Error::new(ErrorKind::Parse)
            .with_message("did not find expected <document start>")
            .with_mark(Mark::new(0, 4, 2));
        assert_eq!(
            diagnostic_text(&err, false),
            "Parser error: did not find expected <document start> at line 4, column 2"
        );
    }

    #[test]
    fn grammar_error_lists_alternatives() {
        let err = Error::new(ErrorKind::Grammar)
            .with_message("unexpected ALIAS event")
            .with_unexpected(
                EventKind::Alias,
                &[EventKind::DocumentStart, EventKind::StreamEnd],
            )
            .with_mark(Mark::new(5, 2, 3));
        assert_eq!(
            diagnostic_text(&err, false),
            "Event error: unexpected ALIAS event at line 2, column 3. \
             Expected DOCUMENT_START or STREAM_END."
        );
    }

    #[test]
    fn hint_and_cause_lines_follow_headline() {
        let err = Error::new(ErrorKind::Io)
            .with_message("failed to write output")
            .with_hint("check the output pipe")
            .with_source(std::io::Error::other("broken pipe"));
        let text = diagnostic_text(&err, false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "I/O error: failed to write output");
        assert_eq!(lines[1], "hint: check the output pipe");
        assert_eq!(lines[2], "caused by: broken pipe");
    }

    #[test]
    fn color_wraps_labels_only_when_enabled() {
        let err = Error::new(ErrorKind::Usage).with_message("bad flag");
        assert!(!diagnostic_text(&err, false).contains('\u{1b}'));
        let colored = diagnostic_text(&err, true);
        assert!(colored.starts_with("\u{1b}[31mUsage error:\u{1b}[0m bad flag"));
    }

    #[test]
    fn expected_list_joins_with_or() {
        assert_eq!(expected_list(&[EventKind::DocumentEnd]), "DOCUMENT_END");
        assert_eq!(
            expected_list(&[
                EventKind::MappingStart,
                EventKind::SequenceStart,
                EventKind::Scalar
            ]),
            "MAPPING_START, SEQUENCE_START or SCALAR"
        );
    }

    #[test]
    fn json_has_required_and_positional_fields() {
        let err = Error::new(ErrorKind::Grammar)
            .with_message("unexpected SEQUENCE_END event")
            .with_unexpected(
                EventKind::SequenceEnd,
                &[EventKind::Scalar, EventKind::MappingEnd],
            )
            .with_mark(Mark::new(7, 2, 1));
        let value = diagnostic_json(&err);
        let obj = value
            .get("error")
            .and_then(|v| v.as_object())
            .expect("error object");

        assert_eq!(obj.get("kind").and_then(|v| v.as_str()), Some("Grammar"));
        assert_eq!(
            obj.get("message").and_then(|v| v.as_str()),
            Some("unexpected SEQUENCE_END event")
        );
        assert_eq!(obj.get("line").and_then(|v| v.as_u64()), Some(2));
        assert_eq!(obj.get("column").and_then(|v| v.as_u64()), Some(1));
        assert_eq!(
            obj.get("found").and_then(|v| v.as_str()),
            Some("SEQUENCE_END")
        );
        assert_eq!(
            obj.get("expected"),
            Some(&serde_json::json!(["SCALAR", "MAPPING_END"]))
        );
        assert!(obj.get("offset").is_none());
        assert!(obj.get("causes").is_none());
    }

    #[test]
    fn json_reports_reader_details() {
        let err = Error::new(ErrorKind::Read)
            .with_message("control characters are not allowed")
            .with_offset(4)
            .with_value(7)
            .with_path("input.yaml");
        let value = diagnostic_json(&err);
        assert_eq!(value["error"]["kind"], "Read");
        assert_eq!(value["error"]["offset"], 4);
        assert_eq!(value["error"]["value"], 7);
        assert_eq!(value["error"]["path"], "input.yaml");
    }
}
