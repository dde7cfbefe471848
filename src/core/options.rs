//! Purpose: Hold the knobs that shape JSON output and bound translation resources.
//! Exports: `TranslateOptions`, `Layout`, `StringMode`, `DEFAULT_MAX_DEPTH`, `MAX_DEPTH_LIMIT`.
//! Role: Plain configuration value threaded by reference through every translator frame.
//! Invariants: Defaults reproduce the historical spacing with escaped, ASCII-only strings.
//! Invariants: Options never change which event sequences are accepted, except `max_depth`.

/// Nesting limit applied when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Deepest nesting the YAML producer itself accepts; larger `max_depth` values have no effect.
pub const MAX_DEPTH_LIMIT: usize = 255;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Layout {
    /// `[ 1, 2 ]`, `{ "a": 1 }`, `[ ]`.
    #[default]
    Spaced,
    /// `[1,2]`, `{"a":1}`, `[]`.
    Compact,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum StringMode {
    #[default]
    Escaped,
    /// Scalar bytes are copied without escaping and empty scalars are rejected.
    Legacy,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TranslateOptions {
    pub layout: Layout,
    pub strings: StringMode,
    pub ascii_only: bool,
    pub max_depth: usize,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            layout: Layout::Spaced,
            strings: StringMode::Escaped,
            ascii_only: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TranslateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_strings(mut self, strings: StringMode) -> Self {
        self.strings = strings;
        self
    }

    pub fn with_ascii_only(mut self, ascii_only: bool) -> Self {
        self.ascii_only = ascii_only;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Punctuation written around container elements for one layout.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Punct {
    pub seq_open: &'static str,
    pub seq_close: &'static str,
    pub map_open: &'static str,
    pub map_close: &'static str,
    pub first: &'static str,
    pub separator: &'static str,
    pub key_value: &'static str,
}

impl Punct {
    pub fn for_layout(layout: Layout) -> Self {
        match layout {
            Layout::Spaced => Self {
                seq_open: "[",
                seq_close: " ]",
                map_open: "{",
                map_close: " }",
                first: " ",
                separator: ", ",
                key_value: ": ",
            },
            Layout::Compact => Self {
                seq_open: "[",
                seq_close: "]",
                map_open: "{",
                map_close: "}",
                first: "",
                separator: ",",
                key_value: ":",
            },
        }
    }
}
