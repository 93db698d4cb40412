//! OpenTelemetry tracing with spans exported to a local file.
//!
//! The plugin runs in a WASM sandbox with no collector to talk to, so spans
//! are serialized as OTLP JSON, one batch per line, into
//! `~/.local/share/zellij/bookshelf/bookshelf-otlp.json`:
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → OtlpFileExporter → RotatingFile
//! ```
//!
//! The filter comes from the `trace_level` plugin option and defaults to
//! `info`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: Span exporter and OTLP JSON encoding
//! - [`rotating_file`]: Append-only file with numbered backups

mod exporter;
mod init;
mod rotating_file;

pub use init::init_tracing;

/// Service and instrumentation scope name on every exported span.
pub const SERVICE_NAME: &str = "Bookshelf";
