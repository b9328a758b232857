use crate::form::ContactField;
use crate::reveal::Bounds;
use crate::section::{ElementId, SectionId};
use crate::state::app_state::AppState;
use crate::ui::layout::{chunk, chunk_cursor, wrap};
use crate::ui::span::{Span, SpanLine};
use crate::ui::spinner::Spinner;
use crate::ui::style::Style;
use crate::ui::theme::Theme;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

pub const MARGIN: usize = 2;
const MAX_TEXT_WIDTH: usize = 96;
const MIN_TEXT_WIDTH: usize = 16;
const MESSAGE_ROWS: usize = 4;
const FIELD_PREFIX: &str = "│ ";

/// The whole scrollable document, laid out for one terminal width.
#[derive(Debug, Default, Clone)]
pub struct Page {
    pub lines: Vec<SpanLine>,
    /// Row span of every revealable element, in document order.
    pub layout: IndexMap<ElementId, Bounds>,
    /// Row span of every contact field (label, input, error).
    pub fields: BTreeMap<ContactField, Bounds>,
    /// Page row and screen column of the text cursor.
    pub cursor: Option<(usize, u16)>,
}

impl Page {
    pub fn build(state: &AppState, theme: &Theme, width: u16, now: Instant) -> Self {
        let text_width = (width as usize)
            .saturating_sub(MARGIN * 2)
            .clamp(MIN_TEXT_WIDTH, MAX_TEXT_WIDTH);
        let mut builder = PageBuilder {
            state,
            theme,
            width: text_width,
            now,
            page: Page::default(),
        };
        builder.hero();
        builder.about();
        builder.highlights();
        builder.skills();
        builder.experience();
        builder.certifications();
        builder.contact();
        builder.footer();
        builder.page
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }
}

struct PageBuilder<'a> {
    state: &'a AppState,
    theme: &'a Theme,
    width: usize,
    now: Instant,
    page: Page,
}

impl PageBuilder<'_> {
    fn row(&self) -> usize {
        self.page.lines.len()
    }

    fn push(&mut self, spans: SpanLine) {
        let mut line = Vec::with_capacity(spans.len() + 1);
        line.push(Span::new(" ".repeat(MARGIN)));
        line.extend(spans);
        self.page.lines.push(line);
    }

    fn blank(&mut self) {
        self.page.lines.push(Vec::new());
    }

    fn text(&mut self, text: &str, style: Style, indent: &str) {
        let indent_width = UnicodeWidthStr::width(indent);
        for row in wrap(text, self.width.saturating_sub(indent_width)) {
            self.push(vec![Span::new(indent), Span::styled(row, style)]);
        }
    }

    fn title(&mut self, title: &str) {
        let underline = "─".repeat(UnicodeWidthStr::width(title).min(self.width));
        self.push(vec![Span::styled(title, self.theme.title)]);
        self.push(vec![Span::styled(underline, self.theme.accent)]);
        self.blank();
    }

    /// Lays out one element and records its bounds. Rows of an element that
    /// is not shown yet keep their height but render empty.
    fn element(&mut self, id: ElementId, draw: impl FnOnce(&mut Self)) {
        let top = self.row();
        draw(self);
        let bounds = Bounds::new(top, self.row() - top);
        self.page.layout.insert(id, bounds);
        if !self.state.is_shown(id, self.now) {
            for line in &mut self.page.lines[top..bounds.bottom()] {
                line.clear();
            }
            if self
                .page
                .cursor
                .is_some_and(|(row, _)| row >= top && row < bounds.bottom())
            {
                self.page.cursor = None;
            }
        }
    }

    fn section(&mut self, section: SectionId, draw: impl FnOnce(&mut Self)) {
        self.element(ElementId::Section(section), |b| {
            draw(b);
            b.blank();
        });
    }

    fn hero(&mut self) {
        let state = self.state;
        let hero = &state.content().hero;
        let min_rows = state.viewport_height();
        self.section(SectionId::Hero, |b| {
            let top = b.row();
            b.blank();
            b.blank();
            b.text(&hero.greeting, b.theme.brand, "");
            b.blank();
            b.text(&hero.tagline, b.theme.body, "");
            b.blank();
            let cta = format!("[ {} ]", hero.call_to_action);
            b.push(vec![
                Span::styled(cta, b.theme.button),
                Span::styled("  Enter", b.theme.muted),
            ]);
            while b.row() - top + 1 < min_rows {
                b.blank();
            }
        });
    }

    fn about(&mut self) {
        let state = self.state;
        let about = &state.content().about;
        self.section(SectionId::About, |b| {
            b.title(&about.title);
            for paragraph in &about.paragraphs {
                b.text(paragraph, b.theme.body, "");
                b.blank();
            }
            for (label, url) in &about.links {
                b.push(vec![
                    Span::styled(format!("{label}  "), b.theme.muted),
                    Span::styled(url.as_str(), b.theme.accent),
                ]);
            }
        });
    }

    fn highlights(&mut self) {
        let state = self.state;
        let highlights = &state.content().highlights;
        self.section(SectionId::Highlights, |b| {
            b.title(&highlights.title);
            for (idx, item) in highlights.items.iter().enumerate() {
                b.element(ElementId::Item(SectionId::Highlights, idx), |b| {
                    b.push(vec![
                        Span::styled("◆ ", b.theme.accent),
                        Span::styled(item.title.as_str(), b.theme.title),
                    ]);
                    b.text(&item.description, b.theme.body, "  ");
                });
                b.blank();
            }
        });
    }

    fn skills(&mut self) {
        let state = self.state;
        let skills = &state.content().skills;
        self.section(SectionId::Skills, |b| {
            b.title(&skills.title);
            for (idx, skill) in skills.items.iter().enumerate() {
                b.element(ElementId::Item(SectionId::Skills, idx), |b| {
                    b.push(vec![
                        Span::styled("▸ ", b.theme.accent),
                        Span::styled(skill.as_str(), b.theme.body),
                    ]);
                });
            }
        });
    }

    fn experience(&mut self) {
        let state = self.state;
        let experience = &state.content().experience;
        self.section(SectionId::Experience, |b| {
            b.title(&experience.title);
            for (idx, role) in experience.items.iter().enumerate() {
                b.element(ElementId::Item(SectionId::Experience, idx), |b| {
                    b.push(vec![Span::styled(role.period.as_str(), b.theme.muted)]);
                    b.push(vec![
                        Span::styled("● ", b.theme.accent),
                        Span::styled(role.role.as_str(), b.theme.title),
                    ]);
                    b.push(vec![
                        Span::styled(FIELD_PREFIX, b.theme.accent),
                        Span::styled(format!("{}, {}", role.company, role.location), b.theme.accent),
                    ]);
                    for duty in &role.responsibilities {
                        let rows = wrap(duty, b.width.saturating_sub(4));
                        for (row_idx, row) in rows.into_iter().enumerate() {
                            let bullet = if row_idx == 0 { "• " } else { "  " };
                            b.push(vec![
                                Span::styled(FIELD_PREFIX, b.theme.accent),
                                Span::styled(bullet, b.theme.muted),
                                Span::styled(row, b.theme.body),
                            ]);
                        }
                    }
                });
                b.blank();
            }
        });
    }

    fn certifications(&mut self) {
        let state = self.state;
        let certifications = &state.content().certifications;
        let current = state.carousel_index();
        self.section(SectionId::Certifications, |b| {
            b.title(&certifications.title);
            let Some(card) = certifications.items.get(current) else {
                return;
            };
            b.push(vec![
                Span::styled(card.name.as_str(), b.theme.title),
                Span::styled(format!("  {}", card.year), b.theme.muted),
            ]);
            b.push(vec![Span::styled(card.issuer.as_str(), b.theme.accent)]);
            b.text(&card.description, b.theme.body, "");
            b.blank();

            let mut indicator = vec![Span::styled("◀ ", b.theme.muted)];
            for idx in 0..certifications.items.len() {
                let (dot, style) = if idx == current {
                    ("● ", b.theme.accent)
                } else {
                    ("○ ", b.theme.muted)
                };
                indicator.push(Span::styled(dot, style));
            }
            indicator.push(Span::styled(
                format!("▶   {}/{}   [ and ] to browse", current + 1, certifications.items.len()),
                b.theme.muted,
            ));
            b.push(indicator);
        });
    }

    fn contact(&mut self) {
        let state = self.state;
        let content = &state.content().contact;
        self.section(SectionId::Contact, |b| {
            b.title(&content.title);
            b.text(&content.intro, b.theme.body, "");
            b.blank();
            for field in ContactField::ALL {
                let top = b.row();
                b.field(field);
                let height = b.row() - top;
                b.page.fields.insert(field, Bounds::new(top, height));
                b.blank();
            }
            b.submit_button();
        });
    }

    fn field(&mut self, field: ContactField) {
        let state = self.state;
        let contact = state.contact();
        let form = contact.form();
        let focused = contact.is_focused(field);
        let frame_style = if focused {
            self.theme.focused
        } else {
            self.theme.muted
        };

        self.push(vec![Span::styled(
            field.label(),
            if focused { self.theme.focused } else { self.theme.title },
        )]);

        let value = form.value(field);
        let input_width = self.width.saturating_sub(FIELD_PREFIX.chars().count()).max(1);
        let mut rows = chunk(value, input_width);
        let input_top = self.row();
        if focused {
            let (row, col) = chunk_cursor(value, contact.cursor(field), input_width);
            if row >= rows.len() {
                rows.resize(row + 1, String::new());
            }
            let screen_col = MARGIN + FIELD_PREFIX.chars().count() + col;
            self.page.cursor = Some((input_top + row, screen_col.min(u16::MAX as usize) as u16));
        }
        let min_rows = if field.is_multiline() { MESSAGE_ROWS } else { 1 };
        if rows.len() < min_rows {
            rows.resize(min_rows, String::new());
        }

        for (idx, row) in rows.into_iter().enumerate() {
            let body = match field.placeholder() {
                Some(placeholder) if idx == 0 && value.is_empty() && !focused => {
                    Span::styled(placeholder, self.theme.muted)
                }
                _ => Span::styled(row, self.theme.body),
            };
            self.push(vec![Span::styled(FIELD_PREFIX, frame_style), body]);
        }

        if let Some(error) = form.visible_error(field) {
            self.push(vec![Span::styled(format!("✗ {error}"), self.theme.error)]);
        }
    }

    fn submit_button(&mut self) {
        match self.state.contact().busy_for(self.now) {
            Some(elapsed) => {
                self.push(vec![
                    Span::styled("[ ", self.theme.button_busy),
                    Spinner::span(elapsed, self.theme.button_busy),
                    Span::styled(" Processing... ]", self.theme.button_busy),
                ]);
            }
            None => {
                self.push(vec![
                    Span::styled("[ Send Message ]", self.theme.button),
                    Span::styled("  Enter to send · Ctrl+R to reset", self.theme.muted),
                ]);
            }
        }
    }

    fn footer(&mut self) {
        let state = self.state;
        let footer = &state.content().footer;
        let year = state.year();
        self.element(ElementId::Section(SectionId::Footer), |b| {
            b.push(vec![Span::styled("─".repeat(b.width), b.theme.muted)]);
            for (label, url) in &footer.links {
                b.push(vec![
                    Span::styled(format!("{label:<10}"), b.theme.accent),
                    Span::styled(url.as_str(), b.theme.muted),
                ]);
            }
            b.blank();
            b.push(vec![Span::styled(footer.copyright_for(year), b.theme.muted)]);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SiteContent;
    use crate::error::SubmitError;
    use crate::form::ContactForm;
    use crate::state::text_edit::TextEdit;
    use crate::task::CancelToken;
    use crate::ui::span::line_text;

    fn state() -> AppState {
        let content = SiteContent::embedded().expect("embedded content");
        let mut state = AppState::new(
            content,
            2024,
            |_: ContactForm, _: &CancelToken| -> Result<String, SubmitError> {
                Ok("ok".to_string())
            },
        );
        state.set_viewport_height(24);
        state
    }

    fn page_text(page: &Page) -> Vec<String> {
        page.lines.iter().map(line_text).collect()
    }

    #[test]
    fn unrevealed_sections_keep_height_but_render_blank() {
        let state = state();
        let page = Page::build(&state, &Theme::default(), 80, Instant::now());
        let about = page.layout[&ElementId::Section(SectionId::About)];
        assert!(about.height > 3);
        assert!(
            page.lines[about.top..about.bottom()]
                .iter()
                .all(|line| line.is_empty())
        );
        let footer = page_text(&page).join("\n");
        assert!(footer.contains("© 2024 Srikant Gunti. All rights reserved."));
    }

    #[test]
    fn revealed_section_is_drawn() {
        let mut state = state();
        let now = Instant::now();
        let page = Page::build(&state, &Theme::default(), 80, now);
        state.set_layout(page.layout, page.fields, page.lines.len());
        state.sweep_reveals(now);

        let page = Page::build(&state, &Theme::default(), 80, now);
        let text = page_text(&page).join("\n");
        assert!(text.contains("Hi, I'm Srikant"));
        assert!(!text.contains("About Me"));
    }

    #[test]
    fn hero_fills_the_first_screen() {
        let state = state();
        let page = Page::build(&state, &Theme::default(), 80, Instant::now());
        let hero = page.layout[&ElementId::Section(SectionId::Hero)];
        assert_eq!(hero.top, 0);
        assert!(hero.height >= 24);
    }

    #[test]
    fn layout_lists_every_watched_element() {
        let state = state();
        let page = Page::build(&state, &Theme::default(), 80, Instant::now());
        assert_eq!(page.layout.len(), 7 + 3 + 8 + 3 + 1);
        let mut last_top = 0;
        for section in SectionId::NAV {
            let bounds = page.layout[&ElementId::Section(section)];
            assert!(bounds.top >= last_top);
            last_top = bounds.top;
        }
    }

    #[test]
    fn focused_field_places_cursor() {
        let mut state = state();
        state.contact_mut().set_focus(Some(ContactField::Email));
        state.contact_mut().edit(TextEdit::Insert('a'));
        let now = Instant::now();
        let page = Page::build(&state, &Theme::default(), 80, now);
        let email = page.fields[&ContactField::Email];
        // the contact section is still hidden, so the cursor is suppressed
        assert!(page.cursor.is_none());

        state.set_layout(page.layout, page.fields, page.lines.len());
        state.scroll_to(email.top);
        state.sweep_reveals(now);
        let page = Page::build(&state, &Theme::default(), 80, now);
        assert_eq!(page.cursor, Some((email.top + 1, (MARGIN + 2 + 1) as u16)));
    }

    #[test]
    fn visible_errors_add_a_row() {
        let mut state = state();
        let before = Page::build(&state, &Theme::default(), 80, Instant::now());
        state.contact_mut().set_focus(Some(ContactField::Name));
        state.contact_mut().set_focus(None);
        let after = Page::build(&state, &Theme::default(), 80, Instant::now());
        assert_eq!(
            after.fields[&ContactField::Name].height,
            before.fields[&ContactField::Name].height + 1
        );
    }
}
