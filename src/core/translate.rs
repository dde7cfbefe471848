//! Purpose: Translate a structural event stream into JSON text in a single pass.
//! Exports: `translate`, `Summary`.
//! Role: Recursive-descent driver (stream, document, sequence, mapping) over one cursor.
//! Invariants: Each frame consumes exactly the events between its start and matching end.
//! Invariants: Nothing is buffered beyond the current event; output is never rolled back.
//! Invariants: Every translated document is terminated by a single newline.
//! Invariants: Container nesting never exceeds `TranslateOptions::max_depth`.
use std::io::Write;

use tracing::{debug, trace};

use crate::core::error::{Error, ErrorKind};
use crate::core::event::{Event, EventKind, Mark};
use crate::core::options::{Punct, TranslateOptions};
use crate::core::scalar;
use crate::core::source::EventSource;

const STREAM_OPEN: &[EventKind] = &[EventKind::StreamStart];
const STREAM_BODY: &[EventKind] = &[EventKind::DocumentStart, EventKind::StreamEnd];
const DOCUMENT_ROOT: &[EventKind] = &[EventKind::MappingStart, EventKind::SequenceStart];
const DOCUMENT_CLOSE: &[EventKind] = &[EventKind::DocumentEnd];
const SEQUENCE_BODY: &[EventKind] = &[
    EventKind::MappingStart,
    EventKind::SequenceStart,
    EventKind::Scalar,
    EventKind::SequenceEnd,
];
const MAPPING_KEY: &[EventKind] = &[EventKind::Scalar, EventKind::MappingEnd];
const MAPPING_VALUE: &[EventKind] = &[
    EventKind::MappingStart,
    EventKind::SequenceStart,
    EventKind::Scalar,
];

/// Counters describing a successful translation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    pub documents: u64,
    pub events: u64,
    pub max_depth_seen: usize,
}

/// Consumes a whole event stream from `source`, writing JSON to `out`.
///
/// The first event must be STREAM_START. On failure the partial output is
/// left in `out` as written.
pub fn translate<'a, S, W>(
    source: &mut S,
    out: &mut W,
    options: &TranslateOptions,
) -> Result<Summary, Error>
where
    S: EventSource<'a> + ?Sized,
    W: Write + ?Sized,
{
    let mut translator = Translator {
        source,
        out,
        options,
        punct: Punct::for_layout(options.layout),
        depth: 0,
        summary: Summary::default(),
    };
    translator.stream()?;
    debug!(
        documents = translator.summary.documents,
        events = translator.summary.events,
        "stream translated"
    );
    Ok(translator.summary)
}

struct Translator<'t, S: ?Sized, W: ?Sized> {
    source: &'t mut S,
    out: &'t mut W,
    options: &'t TranslateOptions,
    punct: Punct,
    depth: usize,
    summary: Summary,
}

impl<'a, S, W> Translator<'_, S, W>
where
    S: EventSource<'a> + ?Sized,
    W: Write + ?Sized,
{
    fn advance(&mut self) -> Result<(Event<'a>, Mark), Error> {
        let (event, mark) = self.source.next_event()?;
        self.summary.events += 1;
        trace!(event = %event.kind(), line = mark.line, depth = self.depth, "event");
        Ok((event, mark))
    }

    fn stream(&mut self) -> Result<(), Error> {
        let (event, mark) = self.advance()?;
        if event != Event::StreamStart {
            return Err(unexpected(&event, mark, STREAM_OPEN));
        }
        loop {
            let (event, mark) = self.advance()?;
            match event {
                Event::StreamEnd => return Ok(()),
                Event::DocumentStart => self.document()?,
                other => return Err(unexpected(&other, mark, STREAM_BODY)),
            }
        }
    }

    fn document(&mut self) -> Result<(), Error> {
        let (event, mark) = self.advance()?;
        match event {
            Event::SequenceStart => self.sequence(mark)?,
            Event::MappingStart => self.mapping(mark)?,
            other => return Err(unexpected(&other, mark, DOCUMENT_ROOT)),
        }
        let (event, mark) = self.advance()?;
        if event != Event::DocumentEnd {
            return Err(unexpected(&event, mark, DOCUMENT_CLOSE));
        }
        self.write("\n")?;
        self.summary.documents += 1;
        debug!(document = self.summary.documents, "document translated");
        Ok(())
    }

    fn sequence(&mut self, start: Mark) -> Result<(), Error> {
        self.enter(start)?;
        self.write(self.punct.seq_open)?;
        let mut elements = 0usize;
        loop {
            let (event, mark) = self.advance()?;
            match event {
                Event::SequenceEnd => break,
                Event::Scalar(_) | Event::SequenceStart | Event::MappingStart => {
                    self.separator(elements)?;
                    self.value(event, mark)?;
                    elements += 1;
                }
                other => return Err(unexpected(&other, mark, SEQUENCE_BODY)),
            }
        }
        self.write(self.punct.seq_close)?;
        self.depth -= 1;
        Ok(())
    }

    fn mapping(&mut self, start: Mark) -> Result<(), Error> {
        self.enter(start)?;
        self.write(self.punct.map_open)?;
        let mut members = 0usize;
        loop {
            let (event, mark) = self.advance()?;
            match event {
                Event::MappingEnd => break,
                Event::Scalar(key) => {
                    self.separator(members)?;
                    scalar::write_key(&mut *self.out, &key, self.options)
                        .map_err(|err| err.with_mark(mark))?;
                    self.write(self.punct.key_value)?;
                }
                other => return Err(unexpected(&other, mark, MAPPING_KEY)),
            }

            let (event, mark) = self.advance()?;
            match event {
                Event::Scalar(_) | Event::SequenceStart | Event::MappingStart => {
                    self.value(event, mark)?;
                }
                other => return Err(unexpected(&other, mark, MAPPING_VALUE)),
            }
            members += 1;
        }
        self.write(self.punct.map_close)?;
        self.depth -= 1;
        Ok(())
    }

    fn value(&mut self, event: Event<'a>, mark: Mark) -> Result<(), Error> {
        match event {
            Event::Scalar(value) => scalar::write_value(&mut *self.out, &value, self.options)
                .map_err(|err| err.with_mark(mark)),
            Event::SequenceStart => self.sequence(mark),
            Event::MappingStart => self.mapping(mark),
            other => Err(unexpected(&other, mark, MAPPING_VALUE)),
        }
    }

    fn enter(&mut self, start: Mark) -> Result<(), Error> {
        if self.depth >= self.options.max_depth {
            return Err(Error::new(ErrorKind::Limit)
                .with_message(format!(
                    "nesting depth exceeds the limit of {}",
                    self.options.max_depth
                ))
                .with_mark(start)
                .with_hint("Raise the limit with --max-depth."));
        }
        self.depth += 1;
        self.summary.max_depth_seen = self.summary.max_depth_seen.max(self.depth);
        Ok(())
    }

    fn separator(&mut self, emitted: usize) -> Result<(), Error> {
        if emitted == 0 {
            self.write(self.punct.first)
        } else {
            self.write(self.punct.separator)
        }
    }

    fn write(&mut self, text: &str) -> Result<(), Error> {
        self.out.write_all(text.as_bytes()).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to write output")
                .with_source(err)
        })
    }
}

fn unexpected(event: &Event<'_>, mark: Mark, expected: &'static [EventKind]) -> Error {
    let found = event.kind();
    let error = Error::new(ErrorKind::Grammar)
        .with_message(format!("unexpected {found} event"))
        .with_unexpected(found, expected)
        .with_mark(mark);
    if found == EventKind::Alias {
        return error
            .with_hint("Anchors and aliases are not supported; expand them in the source.");
    }
    error
}
