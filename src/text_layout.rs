/// Word-wraps one scrollback line to `width` columns. Words longer than the
/// width are broken; leading indentation is kept on the first row.
pub fn wrap_words(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    if text.chars().count() <= width {
        return vec![text.to_string()];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_inclusive(' ') {
        let word_len = word.chars().count();
        let visible_len = word.trim_end_matches(' ').chars().count();

        if current_len > 0 && current_len + visible_len > width {
            rows.push(current.trim_end().to_string());
            current.clear();
            current_len = 0;
        }

        if visible_len > width {
            let (visible, spaces) = word.split_at(word.trim_end_matches(' ').len());
            for ch in visible.chars() {
                if current_len == width {
                    rows.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                current.push(ch);
                current_len += 1;
            }
            // Trailing spaces stay on this row; the next break trims them.
            current.push_str(spaces);
            current_len += word_len - visible_len;
            continue;
        }

        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() || rows.is_empty() {
        rows.push(current.trim_end().to_string());
    }
    rows
}

/// Hard-wraps the prompt row the way a terminal does, one cell per char.
pub fn wrap_chars(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Row and column of char offset `offset` inside a `wrap_chars` layout.
pub fn char_wrap_position(offset: usize, width: u16) -> (u16, u16) {
    let width = usize::from(width.max(1));
    let row = (offset / width).min(usize::from(u16::MAX));
    let col = offset % width;
    (row as u16, col as u16)
}
