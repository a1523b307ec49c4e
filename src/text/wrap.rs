use std::num::NonZeroUsize;

/// Breaks `text` into lines of at most `limit` characters.
///
/// Lines are filled greedily, one word at a time. Words are never split: a
/// word longer than `limit` is placed on a line of its own, unshortened. Any
/// run of whitespace (including newlines) counts as a single word separator.
/// Characters are counted as Unicode scalar values.
pub fn wrap(text: &str, limit: NonZeroUsize) -> Vec<String> {
    let limit = limit.get();
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= limit {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// A wrap limit known at compile time.
pub const fn limit(n: usize) -> NonZeroUsize {
    match NonZeroUsize::new(n) {
        Some(n) => n,
        None => panic!("wrap limit must be positive"),
    }
}
