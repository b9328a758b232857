use crate::error::SubmitError;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag a running submit checks to abandon its work early.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// The asynchronous side of a form: receives a snapshot of the values and
/// resolves with an acknowledgement or a failure.
pub trait Submitter<R>: Send + Sync {
    fn submit(&self, values: R, cancel: &CancelToken) -> Result<String, SubmitError>;
}

impl<R, F> Submitter<R> for F
where
    F: Fn(R, &CancelToken) -> Result<String, SubmitError> + Send + Sync,
{
    fn submit(&self, values: R, cancel: &CancelToken) -> Result<String, SubmitError> {
        self(values, cancel)
    }
}

#[derive(Debug, Clone)]
pub struct SubmitInvocation<R> {
    pub run_id: u64,
    pub values: R,
    pub cancel: CancelToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitCompletion {
    pub run_id: u64,
    pub outcome: Result<String, SubmitError>,
}

impl SubmitCompletion {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

pub fn execute_invocation<R>(
    invocation: SubmitInvocation<R>,
    submitter: Arc<dyn Submitter<R>>,
) -> SubmitCompletion {
    let SubmitInvocation {
        run_id,
        values,
        cancel,
    } = invocation;

    if cancel.is_cancelled() {
        return SubmitCompletion {
            run_id,
            outcome: Err(SubmitError::Cancelled),
        };
    }

    // A panicking submitter still settles the run.
    let outcome = catch_unwind(AssertUnwindSafe(|| submitter.submit(values, &cancel)))
        .unwrap_or_else(|_| Err(SubmitError::Failed("submitter panicked".into())));

    SubmitCompletion { run_id, outcome }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_invocation_skips_submitter() {
        let submitter: Arc<dyn Submitter<u8>> =
            Arc::new(|_: u8, _: &CancelToken| -> Result<String, SubmitError> {
                panic!("submitter must not run")
            });
        let cancel = CancelToken::new();
        cancel.cancel();

        let completion = execute_invocation(
            SubmitInvocation {
                run_id: 3,
                values: 7u8,
                cancel,
            },
            submitter,
        );

        assert_eq!(completion.run_id, 3);
        assert_eq!(completion.outcome, Err(SubmitError::Cancelled));
    }

    #[test]
    fn closure_submitter_receives_values() {
        let submitter: Arc<dyn Submitter<u8>> =
            Arc::new(|v: u8, _: &CancelToken| -> Result<String, SubmitError> {
                Ok(format!("got {v}"))
            });
        let completion = execute_invocation(
            SubmitInvocation {
                run_id: 1,
                values: 9u8,
                cancel: CancelToken::new(),
            },
            submitter,
        );
        assert!(completion.is_success());
        assert_eq!(completion.outcome, Ok("got 9".to_string()));
    }

    #[test]
    fn panicking_submitter_settles_as_failure() {
        let submitter: Arc<dyn Submitter<u8>> =
            Arc::new(|_: u8, _: &CancelToken| -> Result<String, SubmitError> {
                panic!("backend exploded")
            });
        let completion = execute_invocation(
            SubmitInvocation {
                run_id: 4,
                values: 1u8,
                cancel: CancelToken::new(),
            },
            submitter,
        );
        assert_eq!(completion.run_id, 4);
        assert_eq!(
            completion.outcome,
            Err(SubmitError::Failed("submitter panicked".into()))
        );
    }

    #[test]
    fn cancel_token_clones_share_state() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }
}
