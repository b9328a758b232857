use crate::ui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub brand: Style,
    pub nav: Style,
    pub nav_active: Style,
    pub title: Style,
    pub accent: Style,
    pub body: Style,
    pub muted: Style,
    pub error: Style,
    pub focused: Style,
    pub button: Style,
    pub button_busy: Style,
    pub toast: Style,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            brand: Style::new().color(Color::Cyan).bold(),
            nav: Style::new().color(Color::DarkGrey),
            nav_active: Style::new().color(Color::Cyan).underline(),
            title: Style::new().color(Color::White).bold(),
            accent: Style::new().color(Color::Cyan),
            body: Style::new(),
            muted: Style::new().color(Color::DarkGrey),
            error: Style::new().color(Color::Red),
            focused: Style::new().color(Color::Yellow).bold(),
            button: Style::new().color(Color::Black).background(Color::Cyan).bold(),
            button_busy: Style::new().color(Color::Black).background(Color::DarkGrey),
            toast: Style::new().color(Color::Black).background(Color::Green).bold(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
