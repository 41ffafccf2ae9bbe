//! HTTP server: handlers, diagnostics and the `ServerBuilder`

pub mod builder;
pub mod diagnostics;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use diagnostics::DiagnosticReport;
pub use handlers::AppState;
