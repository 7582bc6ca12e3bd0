//! Email submission: the capture flow and the wire protocol it speaks.
//!
//! - `messages`: request, reply and response classification
//! - `flow`: local pre-check, guaranteed progression, reply matching

pub mod flow;
pub mod messages;

pub use flow::{Completion, SubmissionFlow};
pub use messages::{SubmissionOutcome, SubmissionReply, SubmissionRequest, TraceContext};
