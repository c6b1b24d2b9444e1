//! Audit sink implementations

mod http;
mod tracing_sink;

pub use http::HttpAuditSink;
pub use tracing_sink::TracingAuditSink;
