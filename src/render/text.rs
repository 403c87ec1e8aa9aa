//! Point text layout.
//!
//! Idle points show their text cut to a maximum width with `...`; hovered and
//! selected points show it word wrapped, splitting words that are too long on
//! their own with a trailing `-`.

/// Shorten `text` so it fits `max_width`, appending `...` when cut
pub fn shorten(text: &str, max_width: f64, measure: &dyn Fn(&str) -> f64) -> String {
    if measure(text) <= max_width {
        return text.to_string();
    }

    let mut prefix = String::new();
    for c in text.chars() {
        prefix.push(c);
        if measure(&format!("{prefix}...")) > max_width {
            prefix.pop();
            break;
        }
    }
    format!("{prefix}...")
}

/// Break `text` into lines no wider than `max_width` where possible
pub fn wrap(text: &str, max_width: f64, measure: &dyn Fn(&str) -> f64) -> Vec<String> {
    let mut words = Vec::new();
    for word in text.split(' ') {
        let mut rest = word.to_string();
        while measure(&rest) > max_width {
            let (head, tail) = split_long_word(&rest, max_width, measure);
            if tail.is_empty() {
                break;
            }
            words.push(format!("{head}-"));
            rest = tail;
        }
        words.push(rest);
    }

    let mut lines = vec![String::new()];
    for word in words {
        let Some(current) = lines.last_mut() else {
            break;
        };
        let candidate = if current.is_empty() {
            word.clone()
        } else {
            format!("{current} {word}")
        };
        if measure(&candidate) <= max_width || current.is_empty() {
            *current = candidate;
        } else {
            lines.push(word);
        }
    }
    lines
}

/// Longest head of `word` that still fits with a hyphen, and the rest
fn split_long_word(word: &str, max_width: f64, measure: &dyn Fn(&str) -> f64) -> (String, String) {
    let mut head = String::new();
    let mut split_at = 0;
    for (index, c) in word.char_indices() {
        head.push(c);
        if measure(&format!("{head}-")) > max_width {
            break;
        }
        split_at = index + c.len_utf8();
    }
    // Always make progress, even if a single character is too wide.
    if split_at == 0 {
        split_at = word.chars().next().map_or(0, char::len_utf8);
    }
    let (head, tail) = word.split_at(split_at);
    (head.to_string(), tail.to_string())
}
