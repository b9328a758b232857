use crate::form::errors::{FieldErrors, Touched};
use crate::form::record::FormRecord;
use crate::task::{
    CancelToken, SubmitCompletion, SubmitExecutor, SubmitInvocation, SubmitRunState, Submitter,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub type FormValidator<R> =
    Box<dyn Fn(&R) -> FieldErrors<<R as FormRecord>::Field> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    /// Validation passed and the submit function was started.
    Started { run_id: u64 },
    /// Validation failed; every field is now touched.
    Invalid { error_count: usize },
    /// A previous submit has not settled yet; nothing happened.
    AlreadyInFlight,
}

/// Owns a form's values, errors, touched fields and submission state.
///
/// Change events validate live but only update the edited field's error;
/// blur and submit run the validator over the committed record. Whether an
/// error is shown is decided by [`FormController::visible_error`].
pub struct FormController<R: FormRecord> {
    initial: R,
    values: R,
    errors: FieldErrors<R::Field>,
    touched: Touched<R::Field>,
    validator: FormValidator<R>,
    submitter: Arc<dyn Submitter<R>>,
    executor: SubmitExecutor,
    run_state: SubmitRunState,
}

impl<R: FormRecord> FormController<R> {
    pub fn new<V, S>(initial: R, validator: V, submitter: S) -> Self
    where
        V: Fn(&R) -> FieldErrors<R::Field> + Send + Sync + 'static,
        S: Submitter<R> + 'static,
    {
        Self {
            values: initial.clone(),
            initial,
            errors: FieldErrors::new(),
            touched: Touched::default(),
            validator: Box::new(validator),
            submitter: Arc::new(submitter),
            executor: SubmitExecutor::new(),
            run_state: SubmitRunState::default(),
        }
    }

    /// Replaces the initial record and returns to the freshly mounted state.
    pub fn initialize(&mut self, initial: R) {
        self.initial = initial;
        self.reset();
    }

    pub fn change_field(&mut self, field: R::Field, raw_value: impl Into<String>) {
        self.values.set(field, raw_value.into());
        let pass = (self.validator)(&self.values);
        self.errors.copy_field_from(&pass, field);
    }

    pub fn blur_field(&mut self, field: R::Field) {
        self.touched.mark(field);
        let pass = (self.validator)(&self.values);
        self.errors.copy_field_from(&pass, field);
    }

    pub fn submit(&mut self) -> SubmitStatus {
        if let Some(run_id) = self.run_state.active_run_id() {
            debug!(run_id, "submit ignored while in flight");
            return SubmitStatus::AlreadyInFlight;
        }

        self.touched.mark_all(R::fields());
        self.errors = (self.validator)(&self.values);

        if !self.errors.is_empty() {
            debug!(error_count = self.errors.len(), "submit blocked by validation");
            return SubmitStatus::Invalid {
                error_count: self.errors.len(),
            };
        }

        let run_id = self.run_state.next_run_id();
        let cancel = CancelToken::new();
        self.run_state.on_started(run_id, cancel.clone(), Instant::now());
        self.executor.spawn(
            SubmitInvocation {
                run_id,
                values: self.values.clone(),
                cancel,
            },
            Arc::clone(&self.submitter),
        );
        info!(run_id, "form submission started");
        SubmitStatus::Started { run_id }
    }

    /// Drains finished runs. Returns the completion of the active run, if it
    /// settled; the controller is idle again afterwards either way.
    pub fn poll(&mut self) -> Option<SubmitCompletion> {
        let mut settled = None;
        for completion in self.executor.drain_ready() {
            if let Some(accepted) = self.accept(completion) {
                settled = Some(accepted);
            }
        }
        settled
    }

    /// Blocks until the active run settles or `timeout` elapses.
    pub fn wait_for_settle(&mut self, timeout: Duration) -> Option<SubmitCompletion> {
        let deadline = Instant::now() + timeout;
        while self.run_state.is_running() {
            let completion = self.executor.recv_until(deadline)?;
            if let Some(accepted) = self.accept(completion) {
                return Some(accepted);
            }
            if Instant::now() >= deadline {
                break;
            }
        }
        None
    }

    pub fn reset(&mut self) {
        if let Some(run_id) = self.run_state.abandon() {
            debug!(run_id, "abandoned in-flight submission on reset");
        }
        self.values = self.initial.clone();
        self.errors.clear();
        self.touched.clear();
    }

    pub fn values(&self) -> &R {
        &self.values
    }

    pub fn value(&self, field: R::Field) -> &str {
        self.values.get(field)
    }

    pub fn errors(&self) -> &FieldErrors<R::Field> {
        &self.errors
    }

    pub fn touched(&self) -> &Touched<R::Field> {
        &self.touched
    }

    pub fn is_touched(&self, field: R::Field) -> bool {
        self.touched.contains(field)
    }

    /// When the in-flight submission started.
    pub fn submitting_since(&self) -> Option<Instant> {
        self.run_state.active_since()
    }

    pub fn is_submitting(&self) -> bool {
        self.run_state.is_running()
    }

    /// The error to display for `field`: only once it was touched.
    pub fn visible_error(&self, field: R::Field) -> Option<&str> {
        if !self.touched.contains(field) {
            return None;
        }
        self.errors.get(field).filter(|msg| !msg.is_empty())
    }

    fn accept(&mut self, completion: SubmitCompletion) -> Option<SubmitCompletion> {
        if !self.run_state.on_finished(completion.run_id) {
            debug!(run_id = completion.run_id, "discarding stale submit completion");
            return None;
        }
        match &completion.outcome {
            Ok(_) => info!(run_id = completion.run_id, "form submission settled"),
            Err(error) => warn!(run_id = completion.run_id, %error, "form submission failed"),
        }
        Some(completion)
    }
}

impl<R: FormRecord> Drop for FormController<R> {
    fn drop(&mut self) {
        if let Some(run_id) = self.run_state.abandon() {
            debug!(run_id, "form dropped with submission in flight");
        }
    }
}
