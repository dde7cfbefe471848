use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::event::{EventKind, Mark};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Memory,
    Read,
    Scan,
    Parse,
    Grammar,
    Limit,
    Usage,
    Io,
    Internal,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    context: Option<(String, Mark)>,
    mark: Option<Mark>,
    offset: Option<u64>,
    value: Option<u32>,
    path: Option<PathBuf>,
    found: Option<EventKind>,
    expected: &'static [EventKind],
    hint: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            context: None,
            mark: None,
            offset: None,
            value: None,
            path: None,
            found: None,
            expected: &[],
            hint: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn context(&self) -> Option<(&str, Mark)> {
        self.context
            .as_ref()
            .map(|(text, mark)| (text.as_str(), *mark))
    }

    pub fn mark(&self) -> Option<Mark> {
        self.mark
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn found(&self) -> Option<EventKind> {
        self.found
    }

    pub fn expected(&self) -> &'static [EventKind] {
        self.expected
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>, mark: Mark) -> Self {
        self.context = Some((context.into(), mark));
        self
    }

    /// Attaches a position unless a more precise one is already recorded.
    pub fn with_mark(mut self, mark: Mark) -> Self {
        if self.mark.is_none() && mark.is_known() {
            self.mark = Some(mark);
        }
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_value(mut self, value: u32) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_unexpected(mut self, found: EventKind, expected: &'static [EventKind]) -> Self {
        self.found = Some(found);
        self.expected = expected;
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(found) = self.found {
            write!(f, " (found: {found})")?;
        }
        if let Some(mark) = self.mark {
            write!(f, " (line: {}, column: {})", mark.line, mark.column)?;
        }
        if let Some(offset) = self.offset {
            write!(f, " (offset: {offset})")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

/// Every failure category terminates the process with status 1.
pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Memory
        | ErrorKind::Read
        | ErrorKind::Scan
        | ErrorKind::Parse
        | ErrorKind::Grammar
        | ErrorKind::Limit
        | ErrorKind::Usage
        | ErrorKind::Io
        | ErrorKind::Internal => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, to_exit_code};
    use crate::core::event::{EventKind, Mark};

    #[test]
    fn exit_code_mapping_is_stable() {
        let kinds = [
            ErrorKind::Memory,
            ErrorKind::Read,
            ErrorKind::Scan,
            ErrorKind::Parse,
            ErrorKind::Grammar,
            ErrorKind::Limit,
            ErrorKind::Usage,
            ErrorKind::Io,
            ErrorKind::Internal,
        ];

        for kind in kinds {
            assert_eq!(to_exit_code(kind), 1);
        }
    }

    #[test]
    fn first_known_mark_wins() {
        let err = Error::new(ErrorKind::Usage)
            .with_mark(Mark::default())
            .with_mark(Mark::new(4, 2, 3))
            .with_mark(Mark::new(9, 5, 1));
        assert_eq!(err.mark(), Some(Mark::new(4, 2, 3)));
    }

    #[test]
    fn display_includes_found_kind_and_position() {
        let err = Error::new(ErrorKind::Grammar)
            .with_message("unexpected event")
            .with_unexpected(EventKind::Alias, &[EventKind::Scalar])
            .with_mark(Mark::new(0, 3, 7));
        let text = err.to_string();
        assert_eq!(
            text,
            "Grammar: unexpected event (found: ALIAS) (line: 3, column: 7)"
        );
    }
}
