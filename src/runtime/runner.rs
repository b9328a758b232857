use crate::runtime::command::Command;
use crate::runtime::effect::Effect;
use crate::runtime::key_bindings::{KeyBindings, KeyMode};
use crate::runtime::reducer::Reducer;
use crate::runtime::scheduler::Scheduler;
use crate::state::app_state::AppState;
use crate::terminal::{Terminal, TerminalEvent};
use crate::ui::renderer::Renderer;
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Interval between ticks; paces submission polling, the spinner and the
/// stagger animation.
const TICK: Duration = Duration::from_millis(80);

/// Emits ticks on wall-clock time, whether or not input keeps arriving.
#[derive(Debug, Clone, Copy)]
struct TickPacer {
    interval: Duration,
    last: Instant,
}

impl TickPacer {
    fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last: now,
        }
    }

    fn remaining(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last))
    }

    /// Returns true at most once per interval.
    fn take_due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) < self.interval {
            return false;
        }
        self.last = now;
        true
    }
}

pub struct Runtime {
    state: AppState,
    terminal: Terminal,
    scheduler: Scheduler,
    key_bindings: KeyBindings,
    renderer: Renderer,
}

impl Runtime {
    pub fn new(state: AppState, terminal: Terminal) -> Self {
        Self {
            state,
            terminal,
            scheduler: Scheduler::new(),
            key_bindings: KeyBindings::new(),
            renderer: Renderer::default(),
        }
    }

    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.terminal.enter()?;
        info!("interactive session started");

        let run_result = (|| -> io::Result<()> {
            self.render()?;
            let mut pacer = TickPacer::new(TICK, Instant::now());

            while !self.state.should_exit() {
                self.process_scheduled_commands()?;

                let now = Instant::now();
                if pacer.take_due(now) {
                    self.process_command(Command::Tick)?;
                }

                let timeout = self.scheduler.poll_timeout(now, pacer.remaining(now));
                let event = self.terminal.poll_event(timeout)?;
                self.dispatch_terminal_event(event)?;
            }

            Ok(())
        })();

        self.state.teardown();
        let exit_result = self.terminal.exit();
        info!("interactive session ended");
        run_result.and(exit_result)
    }

    fn process_scheduled_commands(&mut self) -> io::Result<()> {
        for command in self.scheduler.drain_ready(Instant::now()) {
            self.process_command(command)?;
        }
        Ok(())
    }

    fn dispatch_terminal_event(&mut self, event: TerminalEvent) -> io::Result<()> {
        match event {
            TerminalEvent::Resize(size) => {
                debug!(width = size.width, height = size.height, "terminal resized");
                self.terminal.set_size(size);
                self.render()
            }
            TerminalEvent::Key(key) => {
                let mode = if self.state.contact().focus().is_some() {
                    KeyMode::Editing
                } else {
                    KeyMode::Browse
                };
                let command = self.key_bindings.resolve(key, mode);
                self.process_command(command)
            }
            TerminalEvent::Scroll(rows) => self.process_command(Command::Scroll(rows)),
            // Ticks come from the pacer in the run loop.
            TerminalEvent::Tick => Ok(()),
        }
    }

    fn process_command(&mut self, command: Command) -> io::Result<()> {
        let effects = Reducer::reduce(&mut self.state, command);
        self.apply_effects(effects)
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) -> io::Result<()> {
        let mut render_requested = false;

        for effect in effects {
            match effect {
                Effect::Schedule(cmd) => {
                    self.scheduler.schedule(cmd, Instant::now());
                }
                Effect::RequestRender => {
                    render_requested = true;
                }
            }
        }

        if render_requested && !self.state.should_exit() {
            self.render()?;
        }

        Ok(())
    }

    /// Lays the page out for the current size, runs the reveal pass against
    /// the new viewport and draws the screen.
    fn render(&mut self) -> io::Result<()> {
        let size = self.terminal.size();
        let now = Instant::now();
        self.state.set_viewport_height(Renderer::viewport_rows(size));

        let mut page = self.renderer.build_page(&self.state, size.width, now);
        self.state
            .set_layout(page.layout.clone(), page.fields.clone(), page.height());
        let revealed = self.state.sweep_reveals(now);
        if !revealed.is_empty() {
            debug!(count = revealed.len(), "elements revealed");
            page = self.renderer.build_page(&self.state, size.width, now);
        }

        let frame = self.renderer.compose(&self.state, &page, size);
        self.terminal.render_frame(&frame)
    }
}
