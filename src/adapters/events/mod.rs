//! Event sink implementations.
//!
//! - `TracingEventSink` - structured-log sink, the production default
//! - `RecordingEventSink` - captures events for test assertions

mod recording;
mod tracing_sink;

pub use recording::RecordingEventSink;
pub use tracing_sink::TracingEventSink;
