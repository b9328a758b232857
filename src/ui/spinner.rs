use crate::ui::span::Span;
use crate::ui::style::Style;
use std::time::Duration;

const BRAILLE: &[char] = &['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];
const FRAME_INTERVAL: Duration = Duration::from_millis(80);

/// Time-driven spinner: the frame is derived from how long the
/// operation has been running, so redraws at any cadence stay in phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spinner;

impl Spinner {
    pub fn glyph(elapsed: Duration) -> char {
        let frame = elapsed.as_millis() / FRAME_INTERVAL.as_millis();
        BRAILLE[(frame % BRAILLE.len() as u128) as usize]
    }

    pub fn span(elapsed: Duration, style: Style) -> Span {
        Span::styled(Self::glyph(elapsed).to_string(), style)
    }
}
