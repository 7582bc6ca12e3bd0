//! Wire types for the email submission capability.
//!
//! The engine emits a [`SubmissionRequest`]; the host performs the HTTP call
//! and hands back a [`SubmissionReply`] whose outcome was classified with
//! [`SubmissionOutcome::from_http`]. The request id travels through the host's
//! request context so replies can be matched to the submission they answer.

use serde::{Deserialize, Serialize};

/// Trace and span ids of the span that issued a request.
///
/// Carried alongside the request through the host's web-request context so
/// that the reply can be linked back to the submitting span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    pub trace_id: String,
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry context of the current span, if it is valid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();
        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// One submission handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub request_id: u64,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_context: Option<TraceContext>,
}

impl SubmissionRequest {
    #[must_use]
    pub fn new(request_id: u64, email: impl Into<String>) -> Self {
        Self {
            request_id,
            email: email.into(),
            trace_context: TraceContext::from_current(),
        }
    }

    /// JSON request body, `{ "email": ... }`.
    ///
    /// # Errors
    ///
    /// Returns a serialization error; this cannot happen for a plain string.
    pub fn body(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&SubmitBody { email: &self.email })
    }
}

#[derive(Debug, Serialize)]
struct SubmitBody<'a> {
    email: &'a str,
}

/// Success payload: `{ "success": true, "message": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AcceptedBody {
    pub success: bool,
    pub message: String,
}

/// Classified result of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionOutcome {
    /// The address was stored.
    Accepted { message: String },
    /// The server answered a non-2xx status with a JSON body.
    Rejected { status: u16, error: String },
    /// No usable answer: network failure, non-JSON or malformed body.
    TransportFailure { reason: String },
}

impl SubmissionOutcome {
    /// Classifies a raw HTTP answer.
    ///
    /// `status` is `None` when no response was received at all.
    #[must_use]
    pub fn from_http(status: Option<u16>, body: &[u8]) -> Self {
        let Some(status) = status else {
            return Self::TransportFailure {
                reason: "no response".to_string(),
            };
        };

        if (200..300).contains(&status) {
            return match serde_json::from_slice::<AcceptedBody>(body) {
                Ok(accepted) => Self::Accepted {
                    message: accepted.message,
                },
                Err(e) => Self::TransportFailure {
                    reason: format!("status {status}: unreadable success body: {e}"),
                },
            };
        }

        // Any JSON answer is the server speaking; `error` is the usual field.
        match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(body) => Self::Rejected {
                status,
                error: body
                    .get("error")
                    .and_then(serde_json::Value::as_str)
                    .map_or_else(|| body.to_string(), ToOwned::to_owned),
            },
            Err(e) => Self::TransportFailure {
                reason: format!("status {status}: unreadable error body: {e}"),
            },
        }
    }
}

/// A classified outcome tagged with the request it answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReply {
    pub request_id: u64,
    pub outcome: SubmissionOutcome,
}

impl SubmissionReply {
    /// Reply for a request the host could not send at all.
    #[must_use]
    pub fn undelivered(request_id: u64, reason: impl Into<String>) -> Self {
        Self {
            request_id,
            outcome: SubmissionOutcome::TransportFailure { reason: reason.into() },
        }
    }
}
