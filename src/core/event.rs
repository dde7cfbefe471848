//! Purpose: Define the structural event vocabulary consumed by the translator.
//! Exports: `Event`, `EventKind`, `Scalar`, `ScalarStyle`, `Mark`.
//! Role: Producer-neutral contract between event sources and translators.
//! Invariants: Scalar content borrows from the input buffer whenever the producer allows it.
//! Invariants: `Mark::default()` means the position is unknown; real marks are 1-based.
use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    StreamStart,
    StreamEnd,
    DocumentStart,
    DocumentEnd,
    Alias,
    Scalar,
    SequenceStart,
    SequenceEnd,
    MappingStart,
    MappingEnd,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::StreamStart => "STREAM_START",
            EventKind::StreamEnd => "STREAM_END",
            EventKind::DocumentStart => "DOCUMENT_START",
            EventKind::DocumentEnd => "DOCUMENT_END",
            EventKind::Alias => "ALIAS",
            EventKind::Scalar => "SCALAR",
            EventKind::SequenceStart => "SEQUENCE_START",
            EventKind::SequenceEnd => "SEQUENCE_END",
            EventKind::MappingStart => "MAPPING_START",
            EventKind::MappingEnd => "MAPPING_END",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a scalar was written in the YAML source.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Scalar<'a> {
    pub value: Cow<'a, str>,
    pub style: ScalarStyle,
}

impl<'a> Scalar<'a> {
    pub fn new(value: impl Into<Cow<'a, str>>, style: ScalarStyle) -> Self {
        Self {
            value: value.into(),
            style,
        }
    }

    pub fn plain(value: impl Into<Cow<'a, str>>) -> Self {
        Self::new(value, ScalarStyle::Plain)
    }

    pub fn is_plain(&self) -> bool {
        self.style == ScalarStyle::Plain
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event<'a> {
    StreamStart,
    StreamEnd,
    DocumentStart,
    DocumentEnd,
    Alias,
    Scalar(Scalar<'a>),
    SequenceStart,
    SequenceEnd,
    MappingStart,
    MappingEnd,
}

impl Event<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::StreamStart => EventKind::StreamStart,
            Event::StreamEnd => EventKind::StreamEnd,
            Event::DocumentStart => EventKind::DocumentStart,
            Event::DocumentEnd => EventKind::DocumentEnd,
            Event::Alias => EventKind::Alias,
            Event::Scalar(_) => EventKind::Scalar,
            Event::SequenceStart => EventKind::SequenceStart,
            Event::SequenceEnd => EventKind::SequenceEnd,
            Event::MappingStart => EventKind::MappingStart,
            Event::MappingEnd => EventKind::MappingEnd,
        }
    }
}

/// Start position of an event or failure in the input.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Mark {
    pub index: usize,
    pub line: usize,
    pub column: usize,
}

impl Mark {
    pub fn new(index: usize, line: usize, column: usize) -> Self {
        Self {
            index,
            line,
            column,
        }
    }

    pub fn is_known(&self) -> bool {
        self.line > 0
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, EventKind, Mark, Scalar, ScalarStyle};

    #[test]
    fn kind_names_match_event_grammar() {
        assert_eq!(EventKind::SequenceStart.to_string(), "SEQUENCE_START");
        assert_eq!(EventKind::Alias.as_str(), "ALIAS");
        let encoded = serde_json::to_string(&EventKind::MappingEnd).expect("encode");
        assert_eq!(encoded, "\"MAPPING_END\"");
    }

    #[test]
    fn scalar_event_reports_scalar_kind() {
        let event = Event::Scalar(Scalar::new("x", ScalarStyle::Folded));
        assert_eq!(event.kind(), EventKind::Scalar);
        assert!(Scalar::plain("1").is_plain());
    }

    #[test]
    fn default_mark_is_unknown() {
        assert!(!Mark::default().is_known());
        assert!(Mark::new(0, 1, 1).is_known());
    }
}
