use crate::runtime::command::Command;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerCommand {
    /// Emits `command` after `delay`, superseding anything still pending
    /// under the same key.
    Debounce {
        key: String,
        delay: Duration,
        command: Command,
    },
    Cancel {
        key: String,
    },
}

#[derive(Debug, Clone)]
struct DelayedTask {
    due_at: Instant,
    key: String,
    version: u64,
    command: Command,
}

#[derive(Default)]
pub struct Scheduler {
    delayed: Vec<DelayedTask>,
    key_versions: HashMap<String, u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, command: SchedulerCommand, now: Instant) {
        match command {
            SchedulerCommand::Debounce {
                key,
                delay,
                command,
            } => {
                let version = self.bump_version(&key);
                self.delayed.push(DelayedTask {
                    due_at: now + delay,
                    key,
                    version,
                    command,
                });
            }
            SchedulerCommand::Cancel { key } => {
                self.bump_version(&key);
            }
        }
    }

    pub fn drain_ready(&mut self, now: Instant) -> Vec<Command> {
        let mut ready = Vec::new();
        let mut idx = 0usize;
        while idx < self.delayed.len() {
            if self.delayed[idx].due_at <= now {
                let task = self.delayed.swap_remove(idx);
                if self.task_is_current(&task) {
                    ready.push(task.command);
                }
            } else {
                idx += 1;
            }
        }
        ready
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        self.delayed
            .iter()
            .map(|task| task.due_at.saturating_duration_since(now))
            .fold(default_timeout, Duration::min)
    }

    pub fn pending(&self) -> usize {
        self.delayed.len()
    }

    fn task_is_current(&self, task: &DelayedTask) -> bool {
        self.key_versions.get(&task.key).copied().unwrap_or(0) == task.version
    }

    fn bump_version(&mut self, key: &str) -> u64 {
        let entry = self.key_versions.entry(key.to_string()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debounce(delay_ms: u64, command: Command) -> SchedulerCommand {
        SchedulerCommand::Debounce {
            key: "toast".into(),
            delay: Duration::from_millis(delay_ms),
            command,
        }
    }

    #[test]
    fn emits_once_due() {
        let mut scheduler = Scheduler::new();
        let t0 = Instant::now();
        scheduler.schedule(debounce(100, Command::DismissToast), t0);

        assert!(scheduler.drain_ready(t0 + Duration::from_millis(50)).is_empty());
        assert_eq!(
            scheduler.drain_ready(t0 + Duration::from_millis(100)),
            vec![Command::DismissToast]
        );
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn debounce_supersedes_earlier_task() {
        let mut scheduler = Scheduler::new();
        let t0 = Instant::now();
        scheduler.schedule(debounce(100, Command::DismissToast), t0);
        scheduler.schedule(
            debounce(100, Command::DismissToast),
            t0 + Duration::from_millis(80),
        );

        assert!(scheduler.drain_ready(t0 + Duration::from_millis(120)).is_empty());
        assert_eq!(
            scheduler.drain_ready(t0 + Duration::from_millis(180)),
            vec![Command::DismissToast]
        );
    }

    #[test]
    fn cancel_drops_pending_task() {
        let mut scheduler = Scheduler::new();
        let t0 = Instant::now();
        scheduler.schedule(debounce(10, Command::DismissToast), t0);
        scheduler.schedule(SchedulerCommand::Cancel { key: "toast".into() }, t0);
        assert!(scheduler.drain_ready(t0 + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn timeout_shrinks_to_next_due_task() {
        let mut scheduler = Scheduler::new();
        let t0 = Instant::now();
        let idle = Duration::from_millis(80);
        assert_eq!(scheduler.poll_timeout(t0, idle), idle);
        scheduler.schedule(debounce(30, Command::DismissToast), t0);
        assert_eq!(scheduler.poll_timeout(t0, idle), Duration::from_millis(30));
    }
}
