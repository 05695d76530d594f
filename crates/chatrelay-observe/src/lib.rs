//! Observability setup for chatrelay: structured logging and optional
//! OpenTelemetry trace export.

pub mod tracing_setup;
