//! Reference invocation handlers
//!
//! - [`ForwardingHandler`]: answers every call from a local real object
//! - [`RecordingHandler`]: logs every call and its outcome around another
//!   handler

pub mod forwarding;
pub mod recording;

pub use forwarding::ForwardingHandler;
pub use recording::{CallOutcome, CallRecord, RecordingConfig, RecordingHandler};
