//! OpenTelemetry tracing exported to a local OTLP JSON file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OtlpFileExporter → voidgate-otlp.json
//! ```
//!
//! The file lives in the plugin data directory and rotates at 10 MiB, keeping
//! three numbered backups. The level comes from the `trace_level` plugin
//! option and defaults to `info`.
//!
//! Operator alerts (such as a submission endpoint that cannot be reached) are
//! `warn!` events on the `voidgate::operator` target, so they can be filtered
//! on their own.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: Span exporter and OTLP JSON formatting
//! - [`file_writer`]: Rotating trace file

mod exporter;
mod file_writer;
mod init;

pub use init::init_tracing;

#[cfg(test)]
pub(crate) use init::traced;
