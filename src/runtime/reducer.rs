use crate::form::SubmitStatus;
use crate::runtime::command::Command;
use crate::runtime::effect::Effect;
use crate::section::SectionId;
use crate::state::app_state::AppState;
use std::time::Instant;
use tracing::debug;

pub struct Reducer;

impl Reducer {
    pub fn reduce(state: &mut AppState, command: Command) -> Vec<Effect> {
        let mut effects = match command {
            Command::Exit => {
                state.request_exit();
                vec![]
            }
            Command::Scroll(rows) => {
                state.scroll_by(rows);
                vec![Effect::RequestRender]
            }
            Command::ScrollPage(pages) => {
                state.scroll_pages(pages);
                vec![Effect::RequestRender]
            }
            Command::ScrollHome => {
                state.scroll_to(0);
                vec![Effect::RequestRender]
            }
            Command::ScrollEnd => {
                state.scroll_to(state.max_scroll());
                vec![Effect::RequestRender]
            }
            Command::JumpTo(section) => {
                state.jump_to(section);
                vec![Effect::RequestRender]
            }
            Command::Activate => {
                if state.contact().focus().is_some() {
                    submit(state);
                } else if state.current_section() == SectionId::Hero {
                    state.jump_to(SectionId::About);
                }
                vec![Effect::RequestRender]
            }
            Command::NextFocus => {
                state.focus_next();
                vec![Effect::RequestRender]
            }
            Command::PrevFocus => {
                state.focus_prev();
                vec![Effect::RequestRender]
            }
            Command::ClearFocus => {
                if state.clear_focus() {
                    vec![Effect::RequestRender]
                } else {
                    vec![]
                }
            }
            Command::ResetForm => {
                state.contact_mut().reset();
                debug!("contact form reset");
                vec![Effect::RequestRender]
            }
            Command::CarouselPrev => {
                state.carousel_step(-1);
                vec![Effect::RequestRender]
            }
            Command::CarouselNext => {
                state.carousel_step(1);
                vec![Effect::RequestRender]
            }
            Command::Edit(edit) => {
                if state.contact_mut().edit(edit) {
                    state.follow_focus();
                    vec![Effect::RequestRender]
                } else {
                    vec![]
                }
            }
            Command::DismissToast => {
                state.dismiss_toast();
                vec![Effect::RequestRender]
            }
            Command::Tick => {
                let settled = state.poll_submission();
                if settled || state.is_animating(Instant::now()) {
                    vec![Effect::RequestRender]
                } else {
                    vec![]
                }
            }
            Command::Noop => vec![],
        };

        effects.extend(
            state
                .take_pending_scheduler_commands()
                .into_iter()
                .map(Effect::Schedule),
        );

        effects
    }
}

fn submit(state: &mut AppState) {
    match state.contact_mut().submit() {
        SubmitStatus::Invalid { error_count } => {
            debug!(error_count, "contact submit rejected");
            state.follow_focus();
        }
        SubmitStatus::Started { run_id } => debug!(run_id, "contact submit accepted"),
        SubmitStatus::AlreadyInFlight => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SiteContent;
    use crate::error::SubmitError;
    use crate::form::{ContactField, ContactForm};
    use crate::runtime::scheduler::SchedulerCommand;
    use crate::state::text_edit::TextEdit;
    use crate::task::CancelToken;
    use std::time::Duration;

    fn state() -> AppState {
        let content = SiteContent::embedded().expect("embedded content");
        let mut state = AppState::new(
            content,
            2024,
            |values: ContactForm, _: &CancelToken| -> Result<String, SubmitError> {
                Ok(format!("thanks {}", values.name))
            },
        );
        state.set_viewport_height(20);
        state
    }

    fn type_into(state: &mut AppState, text: &str) {
        for ch in text.chars() {
            Reducer::reduce(state, Command::Edit(TextEdit::Insert(ch)));
        }
    }

    #[test]
    fn exit_sets_flag() {
        let mut state = state();
        Reducer::reduce(&mut state, Command::Exit);
        assert!(state.should_exit());
    }

    #[test]
    fn typing_without_focus_does_nothing() {
        let mut state = state();
        let effects = Reducer::reduce(&mut state, Command::Edit(TextEdit::Insert('x')));
        assert!(effects.is_empty());
    }

    #[test]
    fn enter_on_invalid_form_reveals_all_errors() {
        let mut state = state();
        Reducer::reduce(&mut state, Command::NextFocus);
        type_into(&mut state, "J");
        Reducer::reduce(&mut state, Command::Activate);

        let form = state.contact().form();
        assert!(!form.is_submitting());
        assert_eq!(
            form.visible_error(ContactField::Name),
            Some("Name must be at least 2 characters")
        );
        assert_eq!(form.visible_error(ContactField::Email), Some("Email is required"));
        assert_eq!(
            form.visible_error(ContactField::Message),
            Some("Message is required")
        );
        assert!(form.visible_error(ContactField::Phone).is_none());
    }

    #[test]
    fn valid_submit_acknowledges_on_tick() {
        let mut state = state();
        Reducer::reduce(&mut state, Command::NextFocus);
        type_into(&mut state, "Jane");
        Reducer::reduce(&mut state, Command::NextFocus);
        type_into(&mut state, "jane@example.com");
        for _ in 0..3 {
            Reducer::reduce(&mut state, Command::NextFocus);
        }
        type_into(&mut state, "Let's build something great together.");
        Reducer::reduce(&mut state, Command::Activate);
        assert!(state.contact().form().is_submitting());

        // a second Enter while in flight changes nothing
        Reducer::reduce(&mut state, Command::Activate);
        assert!(state.contact().form().is_submitting());

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut effects = Vec::new();
        while state.toast().is_none() && Instant::now() < deadline {
            effects = Reducer::reduce(&mut state, Command::Tick);
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(state.toast(), Some("thanks Jane"));
        assert!(effects.contains(&Effect::RequestRender));
        assert!(
            effects
                .iter()
                .any(|effect| matches!(effect, Effect::Schedule(SchedulerCommand::Debounce { .. })))
        );
        assert_eq!(state.contact().form().value(ContactField::Name), "");
    }

    #[test]
    fn reset_clears_values_and_errors() {
        let mut state = state();
        Reducer::reduce(&mut state, Command::NextFocus);
        type_into(&mut state, "x");
        Reducer::reduce(&mut state, Command::NextFocus);
        Reducer::reduce(&mut state, Command::ResetForm);
        let form = state.contact().form();
        assert_eq!(form.values(), &ContactForm::default());
        assert!(form.errors().is_empty());
        assert!(form.touched().is_empty());
    }

    #[test]
    fn dismiss_toast_clears_it() {
        let mut state = state();
        state.show_toast("hi".into());
        state.take_pending_scheduler_commands();
        Reducer::reduce(&mut state, Command::DismissToast);
        assert_eq!(state.toast(), None);
    }
}
