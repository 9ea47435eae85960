//! # Lead Form State Machine
//!
//! File: cli/src/common/lead/form.rs
//!
//! ## Overview
//!
//! `LeadForm` owns one form instance: the entered fields, the current
//! `FormState`, and the field errors from the last attempt. A submit attempt
//! walks these states:
//!
//! ```text
//! Idle -> Validating -> Invalid ----------------------> Idle
//!                    -> Submitting -> Success -> Idle   (fields cleared)
//!                                  -> Failed  -> Idle   (fields kept)
//! ```
//!
//! The collaborator call is the only await point. While it is pending the form
//! refuses a second submission (`SubmitOutcome::Busy`) and refuses edits, so at
//! most one `LeadSubmission` per form is ever in flight. There is no automatic
//! retry; each retry is a fresh call to `submit`.
//!
use super::sinks::LeadSubmitter;
use super::validate::{validate, FieldErrors, LeadFields};
use crate::common::notify::{NotificationKind, Notifier};
use crate::core::error::SoftsellError;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

pub const SUCCESS_NOTICE: &str =
    "Thanks! We received your license details and will send a valuation within 24 hours.";
pub const FAILURE_NOTICE: &str = "We couldn't submit your details. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormState {
    Idle,
    Validating,
    Invalid,
    Submitting,
    Success,
    Failed,
}

/// Result of one call to [`LeadForm::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The collaborator accepted the lead; fields were cleared.
    Submitted,
    /// Validation failed; no collaborator call was made.
    Invalid(FieldErrors),
    /// The collaborator failed; fields were kept for a retry.
    Failed,
    /// Another submission on this form is still in flight.
    Busy,
}

#[derive(Debug)]
struct FormInner {
    fields: LeadFields,
    state: FormState,
    errors: FieldErrors,
    trail: Vec<FormState>,
}

impl FormInner {
    fn transition(&mut self, next: FormState) {
        debug!(from = ?self.state, to = ?next, "Lead form transition");
        self.state = next;
        self.trail.push(next);
    }
}

/// Clears the in-flight flag when an attempt ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct LeadForm {
    submitter: Arc<dyn LeadSubmitter>,
    notifier: Arc<dyn Notifier>,
    inner: Mutex<FormInner>,
    in_flight: AtomicBool,
}

impl LeadForm {
    pub fn new(submitter: Arc<dyn LeadSubmitter>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            submitter,
            notifier,
            inner: Mutex::new(FormInner {
                fields: LeadFields::default(),
                state: FormState::Idle,
                errors: FieldErrors::default(),
                trail: Vec::new(),
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the entered values. Refused while a submission is in flight.
    ///
    /// The in-flight check and the write happen under the form lock, and
    /// `submit` raises the flag under the same lock, so an accepted edit is
    /// always part of the next snapshot.
    pub fn set_fields(&self, fields: LeadFields) -> Result<(), SoftsellError> {
        let mut inner = self.lock();
        if self.is_submitting() {
            return Err(SoftsellError::Busy);
        }
        inner.fields = fields;
        Ok(())
    }

    #[cfg(test)]
    pub fn fields(&self) -> LeadFields {
        self.lock().fields.clone()
    }

    pub fn state(&self) -> FormState {
        self.lock().state
    }

    /// Errors from the most recent validation; empty once it passed.
    #[cfg(test)]
    pub fn field_errors(&self) -> FieldErrors {
        self.lock().errors.clone()
    }

    /// States visited by the most recent attempt, starting with `Idle`.
    pub fn last_trail(&self) -> Vec<FormState> {
        self.lock().trail.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// # Submit the Form (`submit`)
    ///
    /// Runs one attempt against the current fields:
    /// 1. Raises the in-flight flag under the form lock. If it is already raised,
    ///    returns `Busy` at once: no validation, no sink call, no state change.
    /// 2. Snapshots the fields and validates them. Invalid fields are stored as
    ///    the form's errors and the form returns to `Idle`.
    /// 3. Hands the `LeadSubmission` to the sink. The lock is released for the
    ///    whole call.
    /// 4. On success, clears the fields and sends the success notice. On
    ///    failure, keeps the fields for a retry and sends the error notice.
    ///
    /// The flag is lowered when the attempt ends, including on early return.
    ///
    /// ## Returns
    ///
    /// * `SubmitOutcome`: what happened. Sink failures and invalid fields are
    ///   outcomes here, not errors.
    pub async fn submit(&self) -> SubmitOutcome {
        let (fields, _in_flight) = {
            let mut inner = self.lock();
            if self
                .in_flight
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                warn!("Submit ignored: a submission is already in flight");
                return SubmitOutcome::Busy;
            }
            let guard = InFlight(&self.in_flight);
            inner.trail = vec![inner.state];
            inner.transition(FormState::Validating);
            (inner.fields.clone(), guard)
        };

        let submission = match validate(&fields) {
            Ok(submission) => submission,
            Err(errors) => {
                info!(fields = %errors.field_list(), "Lead form has invalid fields");
                let mut inner = self.lock();
                inner.transition(FormState::Invalid);
                inner.errors = errors.clone();
                inner.transition(FormState::Idle);
                return SubmitOutcome::Invalid(errors);
            }
        };

        {
            let mut inner = self.lock();
            inner.errors = FieldErrors::default();
            inner.transition(FormState::Submitting);
        }

        let result = self.submitter.submit_lead(&submission).await;

        match result {
            Ok(()) => {
                info!(email = submission.email(), "Lead submitted");
                {
                    let mut inner = self.lock();
                    inner.transition(FormState::Success);
                    inner.fields = LeadFields::default();
                }
                self.notifier.notify(NotificationKind::Success, SUCCESS_NOTICE);
                self.lock().transition(FormState::Idle);
                SubmitOutcome::Submitted
            }
            Err(e) => {
                warn!(error = %e, "Lead submission failed");
                self.lock().transition(FormState::Failed);
                self.notifier.notify(NotificationKind::Error, FAILURE_NOTICE);
                self.lock().transition(FormState::Idle);
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::lead::sinks::SubmissionError;
    use crate::common::lead::validate::{Field, LeadSubmission};
    use crate::common::notify::CollectingNotifier;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    /// Records calls and answers with a fixed result.
    #[derive(Default)]
    struct ScriptedSubmitter {
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LeadSubmitter for ScriptedSubmitter {
        async fn submit_lead(&self, _: &LeadSubmission) -> Result<(), SubmissionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(SubmissionError::new("backend unavailable"))
            } else {
                Ok(())
            }
        }
    }

    /// Holds every submission until released.
    #[derive(Default)]
    struct GatedSubmitter {
        started: Notify,
        release: Notify,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LeadSubmitter for GatedSubmitter {
        async fn submit_lead(&self, _: &LeadSubmission) -> Result<(), SubmissionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.started.notify_one();
            self.release.notified().await;
            Ok(())
        }
    }

    fn valid_fields() -> LeadFields {
        LeadFields {
            name: "A".into(),
            email: "a@b.com".into(),
            company: String::new(),
            message: "hi".into(),
        }
    }

    fn form_with(submitter: Arc<dyn LeadSubmitter>) -> (LeadForm, Arc<CollectingNotifier>) {
        let notifier = Arc::new(CollectingNotifier::new());
        let form = LeadForm::new(submitter, notifier.clone());
        (form, notifier)
    }

    #[tokio::test]
    async fn test_success_clears_fields_and_returns_to_idle() {
        let submitter = Arc::new(ScriptedSubmitter::default());
        let (form, notifier) = form_with(submitter.clone());
        form.set_fields(valid_fields()).unwrap();

        assert_eq!(form.submit().await, SubmitOutcome::Submitted);

        assert_eq!(form.state(), FormState::Idle);
        assert_eq!(form.fields(), LeadFields::default());
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            form.last_trail(),
            vec![
                FormState::Idle,
                FormState::Validating,
                FormState::Submitting,
                FormState::Success,
                FormState::Idle
            ]
        );
        let notice = notifier.last().unwrap();
        assert_eq!(notice.kind, NotificationKind::Success);
        assert_eq!(notice.message, SUCCESS_NOTICE);
    }

    #[tokio::test]
    async fn test_failure_keeps_fields_for_retry() {
        let submitter = Arc::new(ScriptedSubmitter {
            fail: true,
            ..Default::default()
        });
        let (form, notifier) = form_with(submitter.clone());
        form.set_fields(valid_fields()).unwrap();

        assert_eq!(form.submit().await, SubmitOutcome::Failed);
        assert_eq!(form.state(), FormState::Idle);
        assert_eq!(form.fields(), valid_fields());
        assert_eq!(
            form.last_trail(),
            vec![
                FormState::Idle,
                FormState::Validating,
                FormState::Submitting,
                FormState::Failed,
                FormState::Idle
            ]
        );
        assert_eq!(notifier.last().unwrap().kind, NotificationKind::Error);

        // A retry is a fresh attempt with the same data.
        assert_eq!(form.submit().await, SubmitOutcome::Failed);
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalid_fields_never_reach_collaborator() {
        let submitter = Arc::new(ScriptedSubmitter::default());
        let (form, notifier) = form_with(submitter.clone());
        form.set_fields(LeadFields {
            email: "not-an-email".into(),
            ..valid_fields()
        })
        .unwrap();

        match form.submit().await {
            SubmitOutcome::Invalid(errors) => assert!(errors.contains(Field::Email)),
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 0);
        assert!(notifier.notifications().is_empty());
        assert!(form.field_errors().contains(Field::Email));
        assert_eq!(form.state(), FormState::Idle);
        assert_eq!(
            form.last_trail(),
            vec![FormState::Idle, FormState::Validating, FormState::Invalid, FormState::Idle]
        );

        // Correct and resubmit.
        form.set_fields(valid_fields()).unwrap();
        assert_eq!(form.submit().await, SubmitOutcome::Submitted);
        assert!(form.field_errors().is_empty());
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_refused() {
        let submitter = Arc::new(GatedSubmitter::default());
        let (form, _notifier) = form_with(submitter.clone());
        form.set_fields(valid_fields()).unwrap();
        let form = Arc::new(form);

        let first = {
            let form = form.clone();
            tokio::spawn(async move { form.submit().await })
        };
        submitter.started.notified().await;

        assert!(form.is_submitting());
        assert_eq!(form.state(), FormState::Submitting);
        assert_eq!(form.submit().await, SubmitOutcome::Busy);
        assert!(matches!(form.set_fields(LeadFields::default()), Err(SoftsellError::Busy)));
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 1);

        submitter.release.notify_one();
        assert_eq!(first.await.unwrap(), SubmitOutcome::Submitted);
        assert!(!form.is_submitting());
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 1);
    }

    /// Remembers the name of every lead it accepts.
    #[derive(Default)]
    struct RecordingSubmitter {
        names: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LeadSubmitter for RecordingSubmitter {
        async fn submit_lead(&self, lead: &LeadSubmission) -> Result<(), SubmissionError> {
            tokio::task::yield_now().await;
            self.names.lock().unwrap().push(lead.name().to_string());
            Ok(())
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_accepted_edit_is_never_lost_to_a_concurrent_submit() {
        for round in 0..200 {
            let submitter = Arc::new(RecordingSubmitter::default());
            let (form, _notifier) = form_with(submitter.clone());
            let form = Arc::new(form);
            form.set_fields(valid_fields()).unwrap();

            let edited = LeadFields {
                name: format!("Edited {}", round),
                ..valid_fields()
            };
            let submit = {
                let form = form.clone();
                tokio::spawn(async move { form.submit().await })
            };
            let edit = {
                let form = form.clone();
                let edited = edited.clone();
                tokio::spawn(async move { form.set_fields(edited) })
            };

            let edit_result = edit.await.unwrap();
            assert_eq!(submit.await.unwrap(), SubmitOutcome::Submitted);

            let sent = submitter.names.lock().unwrap().clone();
            assert_eq!(sent.len(), 1);
            match edit_result {
                // Either the edit made it into the submission, or it landed
                // after the attempt finished and is still on the form.
                Ok(()) => assert!(
                    sent[0] == edited.name || form.fields() == edited,
                    "round {}: accepted edit vanished (sent {:?}, form {:?})",
                    round,
                    sent,
                    form.fields()
                ),
                Err(e) => {
                    assert!(matches!(e, SoftsellError::Busy));
                    assert_eq!(sent[0], "A");
                }
            }
        }
    }
}
