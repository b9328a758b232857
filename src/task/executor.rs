use crate::task::execution::{SubmitCompletion, SubmitInvocation, Submitter, execute_invocation};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::{Duration, Instant};

/// Runs submit invocations on worker threads and hands completions back to
/// the owning thread through a channel.
pub struct SubmitExecutor {
    completion_tx: Sender<SubmitCompletion>,
    completion_rx: Receiver<SubmitCompletion>,
}

impl SubmitExecutor {
    pub fn new() -> Self {
        let (completion_tx, completion_rx) = mpsc::channel::<SubmitCompletion>();
        Self {
            completion_tx,
            completion_rx,
        }
    }

    pub fn spawn<R>(&self, invocation: SubmitInvocation<R>, submitter: Arc<dyn Submitter<R>>)
    where
        R: Send + 'static,
    {
        let completion_tx = self.completion_tx.clone();
        std::thread::spawn(move || {
            let completion = execute_invocation(invocation, submitter);
            let _ = completion_tx.send(completion);
        });
    }

    pub fn drain_ready(&self) -> Vec<SubmitCompletion> {
        let mut out = Vec::<SubmitCompletion>::new();
        loop {
            match self.completion_rx.try_recv() {
                Ok(completion) => out.push(completion),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }

    /// Blocks until a completion arrives or `deadline` passes.
    pub fn recv_until(&self, deadline: Instant) -> Option<SubmitCompletion> {
        let timeout = deadline.saturating_duration_since(Instant::now());
        match self.completion_rx.recv_timeout(timeout.max(Duration::from_millis(1))) {
            Ok(completion) => Some(completion),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Default for SubmitExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubmitError;
    use crate::task::execution::CancelToken;

    #[test]
    fn spawned_completion_is_received() {
        let executor = SubmitExecutor::new();
        let submitter: Arc<dyn Submitter<String>> =
            Arc::new(|v: String, _: &CancelToken| -> Result<String, SubmitError> {
                Ok(v.to_uppercase())
            });
        executor.spawn(
            SubmitInvocation {
                run_id: 5,
                values: "hi".to_string(),
                cancel: CancelToken::new(),
            },
            submitter,
        );

        let completion = executor
            .recv_until(Instant::now() + Duration::from_secs(5))
            .expect("completion");
        assert_eq!(completion.run_id, 5);
        assert_eq!(completion.outcome, Ok("HI".to_string()));
        assert!(executor.drain_ready().is_empty());
    }

    #[test]
    fn drain_on_idle_executor_is_empty() {
        let executor = SubmitExecutor::default();
        assert!(executor.drain_ready().is_empty());
        assert!(
            executor
                .recv_until(Instant::now() + Duration::from_millis(5))
                .is_none()
        );
    }
}
