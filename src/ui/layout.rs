use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Word-wraps `text` into rows no wider than `width` display columns.
/// Words wider than a row are split at the column limit. Explicit newlines
/// start a new row; an empty input yields a single empty row.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph, width, &mut rows);
    }
    rows
}

fn wrap_paragraph(paragraph: &str, width: usize, rows: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in paragraph.split_whitespace() {
        let word_width = UnicodeWidthStr::width(word);
        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + 1 + word_width
        };

        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
            continue;
        }

        if !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        for ch in word.chars() {
            let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
            if current_width + ch_width > width && !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
    }

    rows.push(current);
}

/// Splits raw text at a fixed column count, keeping every character
/// (including spaces). Used for editable fields where the cursor must map
/// one-to-one onto the value.
pub fn chunk(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = vec![String::new()];
    let mut used = 0usize;
    for ch in text.chars() {
        if ch == '\n' {
            rows.push(String::new());
            used = 0;
            continue;
        }
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > width {
            rows.push(String::new());
            used = 0;
        }
        if let Some(row) = rows.last_mut() {
            row.push(ch);
        }
        used += ch_width;
    }
    rows
}

/// Row and column of the `cursor`-th character once `text` is chunked at
/// `width`.
pub fn chunk_cursor(text: &str, cursor: usize, width: usize) -> (usize, usize) {
    let width = width.max(1);
    let mut row = 0usize;
    let mut col = 0usize;
    for ch in text.chars().take(cursor) {
        if ch == '\n' {
            row += 1;
            col = 0;
            continue;
        }
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if col + ch_width > width {
            row += 1;
            col = 0;
        }
        col += ch_width;
    }
    if col >= width {
        row += 1;
        col = 0;
    }
    (row, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn splits_overlong_words() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn empty_text_is_one_row() {
        assert_eq!(wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn chunk_keeps_spaces() {
        assert_eq!(chunk("ab  cd", 3), vec!["ab ", " cd"]);
        assert_eq!(chunk("a\nb", 3), vec!["a", "b"]);
    }

    #[test]
    fn cursor_tracks_chunk_rows() {
        assert_eq!(chunk_cursor("abcdef", 4, 3), (1, 1));
        assert_eq!(chunk_cursor("abc", 3, 3), (1, 0));
        assert_eq!(chunk_cursor("a\nbc", 3, 10), (1, 1));
    }
}
