//! Purpose: Library crate behind the `yaml2json` CLI.
//! Exports: `api` (translation entry points, event contract, errors), `diagnostic`.
//! Role: Streams YAML parser events straight into JSON text without building a tree.
//! Invariants: Callers go through `api`; `core` layout is not a stable surface.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
mod core;
pub mod diagnostic;
