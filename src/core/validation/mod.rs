//! Request validation
//!
//! Payload models declare their rules with `#[derive(Validate)]`; the
//! [`Validated`] extractor enforces them at the API boundary so domain logic
//! only ever sees well-formed input.

pub mod extractor;

pub use extractor::Validated;
