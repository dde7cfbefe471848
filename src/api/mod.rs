//! Purpose: Define the public Rust API boundary for yaml2json.
//! Exports: Event contract, options, errors, translation entry points.
//! Role: Public, additive-only surface used by the CLI and library callers.
//! Invariants: This module is the only public path to translator internals.
//! Invariants: Internal helpers (scalar rendering, punctuation) stay crate-private.

mod convert;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::event::{Event, EventKind, Mark, Scalar, ScalarStyle};
pub use crate::core::options::{
    DEFAULT_MAX_DEPTH, Layout, MAX_DEPTH_LIMIT, StringMode, TranslateOptions,
};
pub use crate::core::source::{EventList, EventSource, YamlEvents, read_input};
pub use crate::core::translate::{Summary, translate};
pub use convert::{ApiResult, translate_reader, translate_str, yaml_to_json};
