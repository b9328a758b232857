/// Cursor-relative edits applied to a field value. Positions count chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Backspace,
    Delete,
    DeleteWordLeft,
    Left,
    Right,
    WordLeft,
    WordRight,
    Home,
    End,
}

/// Applies `edit` in place. Returns true when the value changed; cursor
/// moves alone return false.
pub fn apply(edit: TextEdit, value: &mut String, cursor: &mut usize) -> bool {
    let len = value.chars().count();
    *cursor = (*cursor).min(len);

    match edit {
        TextEdit::Insert(ch) => {
            let at = byte_index(value, *cursor);
            value.insert(at, ch);
            *cursor += 1;
            true
        }
        TextEdit::Backspace => {
            if *cursor == 0 {
                return false;
            }
            let at = byte_index(value, *cursor - 1);
            value.remove(at);
            *cursor -= 1;
            true
        }
        TextEdit::Delete => {
            if *cursor >= len {
                return false;
            }
            let at = byte_index(value, *cursor);
            value.remove(at);
            true
        }
        TextEdit::DeleteWordLeft => {
            let start = word_start(value, *cursor);
            if start == *cursor {
                return false;
            }
            let from = byte_index(value, start);
            let to = byte_index(value, *cursor);
            value.replace_range(from..to, "");
            *cursor = start;
            true
        }
        TextEdit::Left => {
            *cursor = cursor.saturating_sub(1);
            false
        }
        TextEdit::Right => {
            *cursor = (*cursor + 1).min(len);
            false
        }
        TextEdit::WordLeft => {
            *cursor = word_start(value, *cursor);
            false
        }
        TextEdit::WordRight => {
            *cursor = word_end(value, *cursor);
            false
        }
        TextEdit::Home => {
            *cursor = 0;
            false
        }
        TextEdit::End => {
            *cursor = len;
            false
        }
    }
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '.' | '/' | ',' | '-' | '@')
}

fn byte_index(value: &str, char_pos: usize) -> usize {
    value
        .char_indices()
        .nth(char_pos)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len())
}

fn word_start(value: &str, cursor: usize) -> usize {
    let chars: Vec<char> = value.chars().collect();
    let mut pos = cursor.min(chars.len());
    while pos > 0 && is_separator(chars[pos - 1]) {
        pos -= 1;
    }
    while pos > 0 && !is_separator(chars[pos - 1]) {
        pos -= 1;
    }
    pos
}

fn word_end(value: &str, cursor: usize) -> usize {
    let chars: Vec<char> = value.chars().collect();
    let mut pos = cursor.min(chars.len());
    while pos < chars.len() && is_separator(chars[pos]) {
        pos += 1;
    }
    while pos < chars.len() && !is_separator(chars[pos]) {
        pos += 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(value: &str, cursor: usize, edits: &[TextEdit]) -> (String, usize) {
        let mut value = value.to_string();
        let mut cursor = cursor;
        for edit in edits {
            apply(*edit, &mut value, &mut cursor);
        }
        (value, cursor)
    }

    #[test]
    fn inserts_at_cursor_with_multibyte_chars() {
        assert_eq!(
            run("añb", 2, &[TextEdit::Insert('x')]),
            ("añxb".to_string(), 3)
        );
    }

    #[test]
    fn backspace_and_delete() {
        assert_eq!(run("abc", 1, &[TextEdit::Backspace]), ("bc".to_string(), 0));
        assert_eq!(run("abc", 0, &[TextEdit::Backspace]), ("abc".to_string(), 0));
        assert_eq!(run("abc", 1, &[TextEdit::Delete]), ("ac".to_string(), 1));
        assert_eq!(run("abc", 3, &[TextEdit::Delete]), ("abc".to_string(), 3));
    }

    #[test]
    fn word_motions_stop_at_separators() {
        assert_eq!(
            run("jane@example.com", 16, &[TextEdit::WordLeft]),
            ("jane@example.com".to_string(), 13)
        );
        assert_eq!(
            run("hello big world", 0, &[TextEdit::WordRight, TextEdit::WordRight]),
            ("hello big world".to_string(), 9)
        );
        assert_eq!(
            run("hello big world", 15, &[TextEdit::DeleteWordLeft]),
            ("hello big ".to_string(), 10)
        );
    }

    #[test]
    fn cursor_moves_do_not_report_change() {
        let mut value = "abc".to_string();
        let mut cursor = 3;
        assert!(!apply(TextEdit::Home, &mut value, &mut cursor));
        assert_eq!(cursor, 0);
        assert!(apply(TextEdit::Insert('z'), &mut value, &mut cursor));
        assert_eq!(value, "zabc");
    }

    #[test]
    fn stale_cursor_is_clamped() {
        assert_eq!(run("ab", 10, &[TextEdit::Backspace]), ("a".to_string(), 1));
    }
}
