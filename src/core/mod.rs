// Core modules implementing the event contract, translation, and error modeling.
pub mod error;
pub mod event;
pub mod options;
pub mod scalar;
pub mod source;
pub mod translate;
