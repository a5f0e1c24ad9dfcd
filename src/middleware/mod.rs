//! Request middleware: central error responder and panic conversion.

mod error_responder;
pub use error_responder::{handle_panic, respond_with_error};
