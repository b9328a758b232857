use crate::task::execution::CancelToken;
use std::time::Instant;

#[derive(Debug, Clone)]
struct ActiveRun {
    run_id: u64,
    cancel: CancelToken,
    started_at: Instant,
}

/// Tracks the single submit run a form may have in flight.
#[derive(Debug, Clone, Default)]
pub struct SubmitRunState {
    active: Option<ActiveRun>,
    sequence: u64,
}

impl SubmitRunState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_run_id(&self) -> Option<u64> {
        self.active.as_ref().map(|run| run.run_id)
    }

    pub fn active_since(&self) -> Option<Instant> {
        self.active.as_ref().map(|run| run.started_at)
    }

    pub fn next_run_id(&mut self) -> u64 {
        self.sequence = self.sequence.saturating_add(1);
        self.sequence
    }

    pub fn on_started(&mut self, run_id: u64, cancel: CancelToken, now: Instant) {
        self.active = Some(ActiveRun {
            run_id,
            cancel,
            started_at: now,
        });
    }

    /// Returns false when `run_id` is not the active run (abandoned or stale).
    pub fn on_finished(&mut self, run_id: u64) -> bool {
        match &self.active {
            Some(run) if run.run_id == run_id => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    /// Cancels and forgets the active run, if any.
    pub fn abandon(&mut self) -> Option<u64> {
        let run = self.active.take()?;
        run.cancel.cancel();
        Some(run.run_id)
    }
}
