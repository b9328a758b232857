use crate::form::{ContactField, ContactForm, FormController, SubmitStatus, validate_contact};
use crate::state::text_edit::{self, TextEdit};
use crate::task::Submitter;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// The contact section: the form controller plus the editing state the
/// terminal needs on top of it (which field has focus, and where the cursor
/// sits inside each field).
pub struct ContactSection {
    form: FormController<ContactForm>,
    focus: Option<ContactField>,
    cursors: BTreeMap<ContactField, usize>,
}

impl ContactSection {
    pub fn new<S>(submitter: S) -> Self
    where
        S: Submitter<ContactForm> + 'static,
    {
        Self {
            form: FormController::new(ContactForm::default(), validate_contact, submitter),
            focus: None,
            cursors: BTreeMap::new(),
        }
    }

    pub fn form(&self) -> &FormController<ContactForm> {
        &self.form
    }

    pub fn focus(&self) -> Option<ContactField> {
        self.focus
    }

    pub fn is_focused(&self, field: ContactField) -> bool {
        self.focus == Some(field)
    }

    /// Moves focus; leaving a field blurs it.
    pub fn set_focus(&mut self, next: Option<ContactField>) {
        if self.focus == next {
            return;
        }
        if let Some(previous) = self.focus {
            self.form.blur_field(previous);
        }
        if let Some(field) = next {
            let end = self.form.value(field).chars().count();
            self.cursors.entry(field).or_insert(end);
        }
        debug!(from = ?self.focus, to = ?next, "contact focus changed");
        self.focus = next;
    }

    /// Tab order runs through every field and then leaves the form.
    pub fn focus_next(&mut self) {
        let next = match self.focus {
            None => ContactField::ALL.first().copied(),
            Some(current) => position(current)
                .and_then(|idx| ContactField::ALL.get(idx + 1))
                .copied(),
        };
        self.set_focus(next);
    }

    pub fn focus_prev(&mut self) {
        let prev = match self.focus {
            None => ContactField::ALL.last().copied(),
            Some(current) => position(current)
                .and_then(|idx| idx.checked_sub(1))
                .and_then(|idx| ContactField::ALL.get(idx))
                .copied(),
        };
        self.set_focus(prev);
    }

    pub fn cursor(&self, field: ContactField) -> usize {
        let len = self.form.value(field).chars().count();
        self.cursors.get(&field).copied().unwrap_or(len).min(len)
    }

    /// Applies an edit to the focused field. Returns false when nothing is
    /// focused.
    pub fn edit(&mut self, edit: TextEdit) -> bool {
        let Some(field) = self.focus else {
            return false;
        };
        if edit == TextEdit::Insert('\n') && !field.is_multiline() {
            return true;
        }
        let mut value = self.form.value(field).to_string();
        let mut cursor = self.cursor(field);
        let changed = text_edit::apply(edit, &mut value, &mut cursor);
        self.cursors.insert(field, cursor);
        if changed {
            self.form.change_field(field, value);
        }
        true
    }

    pub fn submit(&mut self) -> SubmitStatus {
        let status = self.form.submit();
        if let SubmitStatus::Invalid { .. } = status
            && let Some(first) = ContactField::ALL
                .iter()
                .copied()
                .find(|field| self.form.errors().has(*field))
        {
            self.set_focus(Some(first));
        }
        status
    }

    pub fn reset(&mut self) {
        self.form.reset();
        self.cursors.clear();
    }

    /// Elapsed time of the in-flight submission.
    pub fn busy_for(&self, now: Instant) -> Option<Duration> {
        self.form
            .submitting_since()
            .map(|since| now.saturating_duration_since(since))
    }

    /// Collects a settled submission. On success the form is cleared and
    /// the acknowledgement is returned for display.
    pub fn poll(&mut self) -> Option<String> {
        let completion = self.form.poll()?;
        match completion.outcome {
            Ok(acknowledgement) => {
                info!(run_id = completion.run_id, "contact message acknowledged");
                self.reset();
                Some(acknowledgement)
            }
            Err(_) => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn form_mut(&mut self) -> &mut FormController<ContactForm> {
        &mut self.form
    }
}

fn position(field: ContactField) -> Option<usize> {
    ContactField::ALL.iter().position(|candidate| *candidate == field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubmitError;
    use crate::task::CancelToken;

    fn instant_section() -> ContactSection {
        ContactSection::new(
            |values: ContactForm, _cancel: &CancelToken| -> Result<String, SubmitError> {
                Ok(crate::form::contact::acknowledgement(&values.name))
            },
        )
    }

    fn type_text(section: &mut ContactSection, text: &str) {
        for ch in text.chars() {
            section.edit(TextEdit::Insert(ch));
        }
    }

    #[test]
    fn tab_cycles_through_fields_and_out() {
        let mut section = instant_section();
        let mut seen = Vec::new();
        for _ in 0..6 {
            section.focus_next();
            seen.push(section.focus());
        }
        assert_eq!(
            seen,
            vec![
                Some(ContactField::Name),
                Some(ContactField::Email),
                Some(ContactField::Phone),
                Some(ContactField::Linkedin),
                Some(ContactField::Message),
                None,
            ]
        );
        section.focus_prev();
        assert_eq!(section.focus(), Some(ContactField::Message));
    }

    #[test]
    fn leaving_a_field_blurs_it() {
        let mut section = instant_section();
        section.focus_next();
        type_text(&mut section, "a");
        assert!(section.form().visible_error(ContactField::Name).is_none());

        section.focus_next();
        assert!(section.form().is_touched(ContactField::Name));
        assert_eq!(
            section.form().visible_error(ContactField::Name),
            Some("Name must be at least 2 characters")
        );
    }

    #[test]
    fn newline_only_lands_in_message() {
        let mut section = instant_section();
        section.set_focus(Some(ContactField::Name));
        section.edit(TextEdit::Insert('\n'));
        assert_eq!(section.form().value(ContactField::Name), "");

        section.set_focus(Some(ContactField::Message));
        type_text(&mut section, "a\nb");
        assert_eq!(section.form().value(ContactField::Message), "a\nb");
    }

    #[test]
    fn edit_without_focus_is_ignored() {
        let mut section = instant_section();
        assert!(!section.edit(TextEdit::Insert('x')));
        assert_eq!(section.form().values(), &ContactForm::default());
    }

    #[test]
    fn invalid_submit_focuses_first_error() {
        let mut section = instant_section();
        section.set_focus(Some(ContactField::Message));
        assert!(matches!(section.submit(), SubmitStatus::Invalid { .. }));
        assert_eq!(section.focus(), Some(ContactField::Name));
    }

    #[test]
    fn successful_submit_acknowledges_and_clears() {
        let mut section = instant_section();
        let form = section.form_mut();
        form.change_field(ContactField::Name, "Jane Doe");
        form.change_field(ContactField::Email, "jane@example.com");
        form.change_field(ContactField::Message, "Hello, I'd like to talk about a project.");

        assert!(matches!(section.submit(), SubmitStatus::Started { .. }));
        assert!(section.busy_for(Instant::now()).is_some());

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut acknowledgement = None;
        while acknowledgement.is_none() && Instant::now() < deadline {
            acknowledgement = section.poll();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(
            acknowledgement.as_deref(),
            Some("Thanks for your message, Jane Doe! I'll get back to you soon.")
        );
        assert_eq!(section.form().values(), &ContactForm::default());
        assert!(!section.form().is_submitting());
    }

    #[test]
    fn cursor_is_clamped_after_reset() {
        let mut section = instant_section();
        section.set_focus(Some(ContactField::Email));
        type_text(&mut section, "abc");
        assert_eq!(section.cursor(ContactField::Email), 3);
        section.reset();
        assert_eq!(section.cursor(ContactField::Email), 0);
    }
}
