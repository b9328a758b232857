use crate::section::SectionId;
use crate::state::app_state::AppState;
use crate::terminal::{CursorPos, TerminalSize};
use crate::ui::page::{MARGIN, Page};
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;
use std::time::Instant;

/// Rows taken by the sticky navigation bar.
pub const HEADER_ROWS: usize = 2;

/// One screen's worth of styled rows plus the terminal cursor.
#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
}

#[derive(Debug, Default, Clone)]
pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Page rows visible below the header.
    pub fn viewport_rows(size: TerminalSize) -> usize {
        (size.height as usize).saturating_sub(HEADER_ROWS)
    }

    pub fn build_page(&self, state: &AppState, width: u16, now: Instant) -> Page {
        Page::build(state, &self.theme, width, now)
    }

    pub fn compose(&self, state: &AppState, page: &Page, size: TerminalSize) -> RenderFrame {
        let mut frame = RenderFrame::default();
        frame.lines.push(self.nav_bar(state));
        frame.lines.push(vec![Span::styled(
            "─".repeat(size.width as usize),
            self.theme.muted,
        )]);

        let viewport = state.viewport();
        for row in viewport.offset..viewport.bottom() {
            frame
                .lines
                .push(page.lines.get(row).cloned().unwrap_or_default());
        }

        if let Some((row, col)) = page.cursor
            && row >= viewport.offset
            && row < viewport.bottom()
        {
            frame.cursor = Some(CursorPos {
                col,
                row: (HEADER_ROWS + row - viewport.offset).min(u16::MAX as usize) as u16,
            });
        }

        if let Some(message) = state.toast()
            && frame.lines.len() > HEADER_ROWS
            && let Some(last) = frame.lines.last_mut()
        {
            *last = vec![
                Span::new(" ".repeat(MARGIN)),
                Span::styled(format!(" ✓ {message} "), self.theme.toast),
            ];
        }

        frame
    }

    fn nav_bar(&self, state: &AppState) -> SpanLine {
        let brand = &state.content().header.brand;
        let active = state.current_section();
        let mut line = vec![
            Span::new(" ".repeat(MARGIN)),
            Span::styled(brand.as_str(), self.theme.brand),
            Span::new(" ".repeat(4)),
        ];
        for (idx, section) in SectionId::NAV.iter().enumerate() {
            let style = if *section == active {
                self.theme.nav_active
            } else {
                self.theme.nav
            };
            line.push(Span::styled(format!("{}", idx + 1), self.theme.muted));
            line.push(Span::new(" "));
            line.push(Span::styled(section.nav_label(), style));
            line.push(Span::new("  "));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SiteContent;
    use crate::error::SubmitError;
    use crate::form::ContactForm;
    use crate::task::CancelToken;
    use crate::ui::span::line_text;

    fn state_for(size: TerminalSize) -> AppState {
        let content = SiteContent::embedded().expect("embedded content");
        let mut state = AppState::new(
            content,
            2024,
            |_: ContactForm, _: &CancelToken| -> Result<String, SubmitError> {
                Ok("ok".to_string())
            },
        );
        state.set_viewport_height(Renderer::viewport_rows(size));
        state
    }

    #[test]
    fn frame_is_exactly_one_screen() {
        let size = TerminalSize {
            width: 80,
            height: 24,
        };
        let mut state = state_for(size);
        let renderer = Renderer::default();
        let now = Instant::now();
        let page = renderer.build_page(&state, size.width, now);
        state.set_layout(page.layout.clone(), page.fields.clone(), page.height());
        state.sweep_reveals(now);
        let page = renderer.build_page(&state, size.width, now);

        let frame = renderer.compose(&state, &page, size);
        assert_eq!(frame.lines.len(), 24);
        assert!(line_text(&frame.lines[0]).contains("Srikant Gunti"));
        assert!(line_text(&frame.lines[0]).contains("1 Home"));
        assert!(frame.cursor.is_none());
    }

    #[test]
    fn toast_takes_the_bottom_row() {
        let size = TerminalSize {
            width: 100,
            height: 20,
        };
        let mut state = state_for(size);
        state.show_toast("Thanks!".into());
        let renderer = Renderer::default();
        let page = renderer.build_page(&state, size.width, Instant::now());
        let frame = renderer.compose(&state, &page, size);
        assert_eq!(line_text(&frame.lines[19]).trim(), "✓ Thanks!");
    }

    #[test]
    fn nav_bar_fits_a_wide_terminal() {
        let size = TerminalSize {
            width: 120,
            height: 30,
        };
        let state = state_for(size);
        let bar = Renderer::default().nav_bar(&state);
        let width: usize = bar.iter().map(Span::width).sum();
        assert!(width <= 120);
    }
}
