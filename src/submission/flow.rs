//! Email capture orchestration.
//!
//! A submission that passes the local pre-check is handed to the host. When
//! its reply arrives, a structured rejection gets a brief error cue and
//! nothing else; every other outcome, including transport failure, moves to
//! the confirmation view and then, after [`CONFIRMATION_DELAY`], to the
//! terminal view.

use super::messages::{SubmissionOutcome, SubmissionReply, SubmissionRequest};
use crate::app::context::Context;
use crate::app::scheduler::TimerId;
use crate::app::timers::Timer;
use crate::app::Action;
use crate::domain::{Effect, NarrativeError, Result, ViewId};
use std::time::Duration;

pub const CONFIRMATION_DELAY: Duration = Duration::from_secs(3);
pub const ERROR_CUE: Duration = Duration::from_secs(1);

/// Log target of the operator side channel.
pub const OPERATOR_TARGET: &str = "voidgate::operator";

/// What a reply did, for the caller's bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Accepted,
    Rejected,
    /// Transport failure hidden behind the normal progression.
    Masked,
    /// Reply to a request that is no longer outstanding.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct SubmissionFlow {
    confirmation: ViewId,
    terminal: ViewId,
    next_request_id: u64,
    pending: Option<u64>,
    confirm_timer: Option<TimerId>,
}

impl SubmissionFlow {
    #[must_use]
    pub const fn new(confirmation: ViewId, terminal: ViewId) -> Self {
        Self {
            confirmation,
            terminal,
            next_request_id: 1,
            pending: None,
            confirm_timer: None,
        }
    }

    /// Id of the outstanding request, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<u64> {
        self.pending
    }

    /// Validates `raw` locally and, if it passes, emits [`Action::Submit`].
    ///
    /// A new submission supersedes an outstanding one; the older reply will be
    /// ignored when it arrives.
    ///
    /// # Errors
    ///
    /// Returns [`NarrativeError::ValidationRejected`] when the pre-check fails.
    /// The error cue has already been applied in that case.
    pub fn submit(&mut self, raw: &str, cx: &mut Context<'_>) -> Result<u64> {
        if raw.is_empty() || !raw.contains('@') {
            cx.flash(Effect::ErrorFlash, ERROR_CUE);
            return Err(NarrativeError::ValidationRejected(
                "address must be non-empty and contain '@'".to_string(),
            ));
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        if let Some(previous) = self.pending.replace(request_id) {
            tracing::debug!(previous, request_id, "superseding outstanding submission");
        }

        tracing::info!(request_id, "submitting address");
        cx.emit(Action::Submit(SubmissionRequest::new(request_id, raw)));
        Ok(request_id)
    }

    /// Applies a reply from the submission capability.
    ///
    /// # Errors
    ///
    /// Propagates [`NarrativeError::UnknownView`] if the confirmation view is
    /// not registered.
    pub fn complete(&mut self, reply: &SubmissionReply, cx: &mut Context<'_>) -> Result<Completion> {
        if self.pending != Some(reply.request_id) {
            tracing::debug!(request_id = reply.request_id, pending = ?self.pending, "ignoring stale reply");
            return Ok(Completion::Ignored);
        }
        self.pending = None;

        match &reply.outcome {
            SubmissionOutcome::Accepted { message } => {
                tracing::info!(request_id = reply.request_id, message = %message, "submission accepted");
                self.progress(cx)?;
                Ok(Completion::Accepted)
            }
            SubmissionOutcome::Rejected { status, error } => {
                tracing::debug!(request_id = reply.request_id, status, error = %error, "submission rejected");
                cx.flash(Effect::ErrorFlash, ERROR_CUE);
                Ok(Completion::Rejected)
            }
            SubmissionOutcome::TransportFailure { reason } => {
                let failure = NarrativeError::TransportFailure(reason.clone());
                // Own span: events are only exported from inside an enabled span.
                tracing::warn_span!(
                    target: OPERATOR_TARGET,
                    "submission_transport_failure",
                    request_id = reply.request_id
                )
                .in_scope(|| {
                    tracing::warn!(
                        target: OPERATOR_TARGET,
                        at = %chrono::Utc::now().to_rfc3339(),
                        error = %failure,
                        "submission transport failure masked"
                    );
                });
                self.progress(cx)?;
                Ok(Completion::Masked)
            }
        }
    }

    /// Confirmation delay elapsed.
    ///
    /// # Errors
    ///
    /// Propagates [`NarrativeError::UnknownView`] if the terminal view is not registered.
    pub fn confirmed(&mut self, id: TimerId, cx: &mut Context<'_>) -> Result<()> {
        if self.confirm_timer != Some(id) {
            return Ok(());
        }
        self.confirm_timer = None;
        cx.go_to(&self.terminal)
    }

    fn progress(&mut self, cx: &mut Context<'_>) -> Result<()> {
        cx.go_to(&self.confirmation)?;
        if let Some(stale) = self.confirm_timer.take() {
            cx.cancel(stale);
        }
        self.confirm_timer = Some(cx.schedule(CONFIRMATION_DELAY, Timer::SubmissionConfirmed));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::harness::{Harness, HOME, OTHER, PRIZE};

    fn flow() -> SubmissionFlow {
        SubmissionFlow::new(PRIZE, OTHER)
    }

    fn reply(request_id: u64, outcome: SubmissionOutcome) -> SubmissionReply {
        SubmissionReply { request_id, outcome }
    }

    #[test]
    fn test_precheck_rejects_without_network() {
        let mut harness = Harness::new();
        let mut flow = flow();

        for raw in ["", "nobody"] {
            harness.actions.clear();
            let err = flow.submit(raw, &mut harness.context()).unwrap_err();
            assert!(matches!(err, NarrativeError::ValidationRejected(_)));
            assert_eq!(
                harness.actions,
                vec![Action::ApplyEffect { effect: Effect::ErrorFlash, duration_ms: 1_000 }]
            );
        }
        assert_eq!(flow.pending(), None);
    }

    #[test]
    fn test_submit_emits_request() {
        let mut harness = Harness::new();
        let mut flow = flow();

        let id = flow.submit("who@where", &mut harness.context()).unwrap();
        assert_eq!(flow.pending(), Some(id));
        assert!(matches!(
            harness.actions.as_slice(),
            [Action::Submit(SubmissionRequest { email, .. })] if email == "who@where"
        ));
    }

    #[test]
    fn test_rejection_flashes_and_stays() {
        let mut harness = Harness::new();
        let mut flow = flow();
        let id = flow.submit("who@where", &mut harness.context()).unwrap();
        harness.actions.clear();

        let outcome = SubmissionOutcome::Rejected { status: 400, error: "Invalid email address".into() };
        let done = flow.complete(&reply(id, outcome), &mut harness.context()).unwrap();

        assert_eq!(done, Completion::Rejected);
        assert_eq!(harness.active(), &HOME);
        assert_eq!(
            harness.actions,
            vec![Action::ApplyEffect { effect: Effect::ErrorFlash, duration_ms: 1_000 }]
        );
    }

    #[test]
    fn test_transport_failure_still_progresses() {
        let mut harness = Harness::new();
        let mut flow = flow();
        let id = flow.submit("who@where", &mut harness.context()).unwrap();

        let outcome = SubmissionOutcome::TransportFailure { reason: "timeout".into() };
        let done = flow.complete(&reply(id, outcome), &mut harness.context()).unwrap();
        assert_eq!(done, Completion::Masked);
        assert_eq!(harness.active(), &PRIZE);

        let (timer_id, timer) = harness.scheduler.pop_due(3_000).unwrap();
        assert_eq!(timer, Timer::SubmissionConfirmed);
        flow.confirmed(timer_id, &mut harness.context()).unwrap();
        assert_eq!(harness.active(), &OTHER);
    }

    #[test]
    fn test_masked_failure_reaches_operator_channel_at_info() {
        let trace = crate::observability::traced("info", || {
            let mut harness = Harness::new();
            let mut flow = flow();
            let id = flow.submit("a@b.c", &mut harness.context()).unwrap();
            let outcome = SubmissionOutcome::from_http(None, b"");
            assert_eq!(flow.complete(&reply(id, outcome), &mut harness.context()).unwrap(), Completion::Masked);
        });

        assert!(trace.contains("submission_transport_failure"));
        assert!(trace.contains("submission transport failure masked"));
    }

    #[test]
    fn test_superseded_reply_is_ignored() {
        let mut harness = Harness::new();
        let mut flow = flow();
        let first = flow.submit("a@b", &mut harness.context()).unwrap();
        let second = flow.submit("c@d", &mut harness.context()).unwrap();

        let accepted = SubmissionOutcome::Accepted { message: "ok".into() };
        assert_eq!(
            flow.complete(&reply(first, accepted.clone()), &mut harness.context()).unwrap(),
            Completion::Ignored
        );
        assert_eq!(harness.active(), &HOME);
        assert_eq!(
            flow.complete(&reply(second, accepted), &mut harness.context()).unwrap(),
            Completion::Accepted
        );
        assert_eq!(harness.active(), &PRIZE);
    }
}
