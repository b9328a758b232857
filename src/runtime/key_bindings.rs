use crate::runtime::command::Command;
use crate::section::SectionId;
use crate::state::text_edit::TextEdit;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn alt(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::ALT)
    }

    pub fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Which binding layer sits under the global one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// No form field focused: keys navigate the page.
    Browse,
    /// A form field is focused: printable keys edit it.
    Editing,
}

/// Global bindings apply in every mode; browse and editing bindings only
/// when their mode is active. Unbound printable characters are typed into
/// the focused field while editing.
#[derive(Default)]
pub struct KeyBindings {
    global: HashMap<KeyBinding, Command>,
    browse: HashMap<KeyBinding, Command>,
    editing: HashMap<KeyBinding, Command>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut manager = Self::default();
        manager.install_defaults();
        manager
    }

    pub fn bind(&mut self, mode: Option<KeyMode>, key: KeyBinding, command: Command) {
        self.layer_mut(mode).insert(key, command);
    }

    pub fn unbind(&mut self, mode: Option<KeyMode>, key: &KeyBinding) {
        self.layer_mut(mode).remove(key);
    }

    pub fn resolve(&self, event: KeyEvent, mode: KeyMode) -> Command {
        let key = KeyBinding::from_event(event);
        if let Some(command) = self.global.get(&key) {
            return *command;
        }
        let layer = match mode {
            KeyMode::Browse => &self.browse,
            KeyMode::Editing => &self.editing,
        };
        if let Some(command) = layer.get(&key) {
            return *command;
        }
        match (mode, event.code) {
            (KeyMode::Editing, KeyCode::Char(ch))
                if !event.modifiers.contains(KeyModifiers::CONTROL)
                    && !event.modifiers.contains(KeyModifiers::ALT) =>
            {
                Command::Edit(TextEdit::Insert(ch))
            }
            _ => Command::Noop,
        }
    }

    fn layer_mut(&mut self, mode: Option<KeyMode>) -> &mut HashMap<KeyBinding, Command> {
        match mode {
            None => &mut self.global,
            Some(KeyMode::Browse) => &mut self.browse,
            Some(KeyMode::Editing) => &mut self.editing,
        }
    }

    fn install_defaults(&mut self) {
        let global = None;
        self.bind(global, KeyBinding::ctrl(KeyCode::Char('c')), Command::Exit);
        self.bind(global, KeyBinding::ctrl(KeyCode::Char('r')), Command::ResetForm);
        self.bind(global, KeyBinding::key(KeyCode::Tab), Command::NextFocus);
        self.bind(
            global,
            KeyBinding::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            Command::PrevFocus,
        );
        self.bind(global, KeyBinding::key(KeyCode::BackTab), Command::PrevFocus);
        self.bind(global, KeyBinding::key(KeyCode::Esc), Command::ClearFocus);
        self.bind(global, KeyBinding::key(KeyCode::Enter), Command::Activate);
        self.bind(global, KeyBinding::key(KeyCode::Up), Command::Scroll(-1));
        self.bind(global, KeyBinding::key(KeyCode::Down), Command::Scroll(1));
        self.bind(global, KeyBinding::key(KeyCode::PageUp), Command::ScrollPage(-1));
        self.bind(global, KeyBinding::key(KeyCode::PageDown), Command::ScrollPage(1));

        let browse = Some(KeyMode::Browse);
        self.bind(browse, KeyBinding::key(KeyCode::Char('q')), Command::Exit);
        self.bind(browse, KeyBinding::key(KeyCode::Char(' ')), Command::ScrollPage(1));
        self.bind(browse, KeyBinding::key(KeyCode::Char('k')), Command::Scroll(-1));
        self.bind(browse, KeyBinding::key(KeyCode::Char('j')), Command::Scroll(1));
        self.bind(browse, KeyBinding::key(KeyCode::Home), Command::ScrollHome);
        self.bind(browse, KeyBinding::key(KeyCode::End), Command::ScrollEnd);
        self.bind(browse, KeyBinding::key(KeyCode::Char('[')), Command::CarouselPrev);
        self.bind(browse, KeyBinding::key(KeyCode::Char(']')), Command::CarouselNext);
        for (idx, section) in SectionId::NAV.iter().enumerate() {
            if let Some(digit) = char::from_digit(idx as u32 + 1, 10) {
                self.bind(
                    browse,
                    KeyBinding::key(KeyCode::Char(digit)),
                    Command::JumpTo(*section),
                );
            }
        }

        let editing = Some(KeyMode::Editing);
        let edits = [
            (KeyBinding::key(KeyCode::Backspace), TextEdit::Backspace),
            (KeyBinding::key(KeyCode::Delete), TextEdit::Delete),
            (KeyBinding::key(KeyCode::Left), TextEdit::Left),
            (KeyBinding::key(KeyCode::Right), TextEdit::Right),
            (KeyBinding::key(KeyCode::Home), TextEdit::Home),
            (KeyBinding::key(KeyCode::End), TextEdit::End),
            (KeyBinding::ctrl(KeyCode::Left), TextEdit::WordLeft),
            (KeyBinding::ctrl(KeyCode::Right), TextEdit::WordRight),
            (KeyBinding::ctrl(KeyCode::Backspace), TextEdit::DeleteWordLeft),
            (KeyBinding::ctrl(KeyCode::Char('w')), TextEdit::DeleteWordLeft),
            (KeyBinding::alt(KeyCode::Enter), TextEdit::Insert('\n')),
        ];
        for (key, edit) in edits {
            self.bind(editing, key, Command::Edit(edit));
        }
    }
}
