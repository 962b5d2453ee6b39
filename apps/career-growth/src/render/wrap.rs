//! Greedy word wrap against a measured pixel width.
//!
//! Same greedy rule as a typesetter's first-fit pass: keep appending words while the
//! candidate line still fits, otherwise start a new line. A single word wider than
//! the limit gets its own line and is never truncated or hyphenated.

/// Anything that can report the rendered width of a string in pixels.
///
/// Implementations must be monotone: appending text never makes a line narrower.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> u32;
}

/// Wraps `text` into lines no wider than `max_width` as reported by `measure`.
///
/// Whitespace runs collapse to single spaces. Empty or all-whitespace input
/// yields no lines.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    text: &str,
    max_width: u32,
    measure: &M,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measure.measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
