//! Purpose: Supply structural events to the translator and load raw input text.
//! Exports: `EventSource`, `YamlEvents`, `EventList`, `read_input`.
//! Role: Seam between the external YAML producer (`saphyr-parser`) and the translators.
//! Invariants: Producer failures surface as `Scan` or `Parse` errors with a position.
//! Invariants: Input is validated as printable UTF-8 before any event is produced.
//! Notes: Scanner vs parser classification follows the producer's message wording.
use std::collections::VecDeque;
use std::io::{self, Read};

use saphyr_parser::{
    Event as YamlEvent, Marker, Parser, ScalarStyle as YamlStyle, ScanError, StrInput,
};

use crate::core::error::{Error, ErrorKind};
use crate::core::event::{Event, Mark, Scalar, ScalarStyle};

const READ_CHUNK: usize = 64 * 1024;
const UTF8_BOM: &str = "\u{feff}";

/// A pull cursor over structural events.
pub trait EventSource<'a> {
    /// Returns the next event, or the failure that prevented producing it.
    fn next_event(&mut self) -> Result<(Event<'a>, Mark), Error>;
}

impl<'a, S> EventSource<'a> for &mut S
where
    S: EventSource<'a> + ?Sized,
{
    fn next_event(&mut self) -> Result<(Event<'a>, Mark), Error> {
        (**self).next_event()
    }
}

fn end_of_input(mark: Mark) -> Error {
    Error::new(ErrorKind::Parse)
        .with_message("unexpected end of event stream")
        .with_mark(mark)
}

/// Events produced by parsing YAML text with `saphyr-parser`.
pub struct YamlEvents<'a> {
    parser: Parser<'a, StrInput<'a>>,
    last: Mark,
}

impl<'a> YamlEvents<'a> {
    pub fn new(input: &'a str) -> Self {
        let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);
        Self {
            parser: Parser::new_from_str(input),
            last: Mark::default(),
        }
    }
}

impl<'a> EventSource<'a> for YamlEvents<'a> {
    fn next_event(&mut self) -> Result<(Event<'a>, Mark), Error> {
        loop {
            let Some(next) = self.parser.next() else {
                return Err(end_of_input(self.last));
            };
            let (event, span) = next.map_err(|err| scan_error(&err))?;
            let mark = mark_from(&span.start);
            self.last = mark;
            let event = match event {
                YamlEvent::Nothing => continue,
                YamlEvent::StreamStart => Event::StreamStart,
                YamlEvent::StreamEnd => Event::StreamEnd,
                YamlEvent::DocumentStart(..) => Event::DocumentStart,
                YamlEvent::DocumentEnd => Event::DocumentEnd,
                YamlEvent::Alias(..) => Event::Alias,
                YamlEvent::Scalar(value, style, ..) => {
                    let style = style_from(style);
                    // Omitted values arrive as a zero-width plain `~`.
                    if style == ScalarStyle::Plain && span.start.index() == span.end.index() {
                        Event::Scalar(Scalar::plain(""))
                    } else {
                        Event::Scalar(Scalar {
                            value: value.into(),
                            style,
                        })
                    }
                }
                YamlEvent::SequenceStart(..) => Event::SequenceStart,
                YamlEvent::SequenceEnd => Event::SequenceEnd,
                YamlEvent::MappingStart(..) => Event::MappingStart,
                YamlEvent::MappingEnd => Event::MappingEnd,
            };
            return Ok((event, mark));
        }
    }
}

fn mark_from(marker: &Marker) -> Mark {
    Mark::new(marker.index(), marker.line(), marker.col() + 1)
}

#[allow(unreachable_patterns)]
fn style_from(style: YamlStyle) -> ScalarStyle {
    match style {
        YamlStyle::Plain => ScalarStyle::Plain,
        YamlStyle::SingleQuoted => ScalarStyle::SingleQuoted,
        YamlStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
        YamlStyle::Literal => ScalarStyle::Literal,
        _ => ScalarStyle::Folded,
    }
}

fn scan_error(err: &ScanError) -> Error {
    let mark = mark_from(err.marker());
    let info = err.info();
    let error = Error::new(classify_message(info));
    match split_context(info) {
        Some((context, problem)) => error
            .with_context(context, mark)
            .with_message(problem)
            .with_mark(mark),
        None => error.with_message(info).with_mark(mark),
    }
}

/// Decides whether a producer message describes a scanning or a parsing failure.
pub(crate) fn classify_message(info: &str) -> ErrorKind {
    let parser_wording = info.starts_with("while parsing")
        || info.starts_with("did not find expected <")
        || info.contains("unknown anchor")
        || info.contains("TAG directive")
        || info.contains("YAML directive");
    if parser_wording {
        ErrorKind::Parse
    } else {
        ErrorKind::Scan
    }
}

/// Splits "while parsing X, problem" into its context and problem parts.
pub(crate) fn split_context(info: &str) -> Option<(&str, &str)> {
    if !info.starts_with("while ") {
        return None;
    }
    let (context, problem) = info.split_once(", ")?;
    Some((context, problem))
}

/// Events replayed from memory, in order.
#[derive(Clone, Debug, Default)]
pub struct EventList<'a> {
    events: VecDeque<(Event<'a>, Mark)>,
}

impl<'a> EventList<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event<'a>) {
        self.events.push_back((event, Mark::default()));
    }

    pub fn push_marked(&mut self, event: Event<'a>, mark: Mark) {
        self.events.push_back((event, mark));
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl<'a> From<Vec<Event<'a>>> for EventList<'a> {
    fn from(events: Vec<Event<'a>>) -> Self {
        Self {
            events: events
                .into_iter()
                .map(|event| (event, Mark::default()))
                .collect(),
        }
    }
}

impl<'a> EventSource<'a> for EventList<'a> {
    fn next_event(&mut self) -> Result<(Event<'a>, Mark), Error> {
        self.events
            .pop_front()
            .ok_or_else(|| end_of_input(Mark::default()))
    }
}

/// Reads all of `reader` into validated YAML text.
pub fn read_input<R: Read>(mut reader: R) -> Result<String, Error> {
    let mut bytes: Vec<u8> = Vec::new();
    let mut chunk = vec![0u8; READ_CHUNK];
    loop {
        let read = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                return Err(Error::new(ErrorKind::Read)
                    .with_message("input could not be read")
                    .with_offset(bytes.len() as u64)
                    .with_source(err));
            }
        };
        bytes.try_reserve(read).map_err(|err| {
            Error::new(ErrorKind::Memory)
                .with_message("not enough memory for reading input")
                .with_offset(bytes.len() as u64)
                .with_source(err)
        })?;
        bytes.extend_from_slice(&chunk[..read]);
    }
    decode_input(bytes)
}

fn decode_input(bytes: Vec<u8>) -> Result<String, Error> {
    let text = String::from_utf8(bytes).map_err(|err| {
        let utf8 = err.utf8_error();
        let offset = utf8.valid_up_to();
        let error = Error::new(ErrorKind::Read).with_offset(offset as u64);
        match utf8.error_len() {
            Some(_) => error
                .with_message("invalid UTF-8 octet")
                .with_value(u32::from(err.as_bytes()[offset])),
            None => error.with_message("incomplete UTF-8 octet sequence"),
        }
    })?;
    let body = text.strip_prefix(UTF8_BOM).unwrap_or(&text);
    let skipped = text.len() - body.len();
    if let Some((pos, ch)) = body.char_indices().find(|(_, ch)| !is_printable(*ch)) {
        return Err(Error::new(ErrorKind::Read)
            .with_message("control characters are not allowed")
            .with_offset((skipped + pos) as u64)
            .with_value(u32::from(ch)));
    }
    if skipped == 0 {
        return Ok(text);
    }
    Ok(body.to_string())
}

/// The YAML 1.2 printable character set.
fn is_printable(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\r'
            | '\u{20}'..='\u{7e}'
            | '\u{85}'
            | '\u{a0}'..='\u{d7ff}'
            | '\u{e000}'..='\u{fffd}'
            | '\u{10000}'..='\u{10ffff}'
    )
}
