//! Text helpers for chat output

/// Longest external text placed in a single reply field.
pub const MAX_FIELD_TEXT: usize = 1000;

/// Make text produced by a compiler or program safe to show inside a code
/// block: strip terminal escape sequences (colors, hyperlinks), keep
/// backticks from closing the block, and cap the length.
pub fn conform_external_str(input: &str) -> String {
    let stripped = strip_ansi_escapes::strip_str(input);
    let escaped = escape_backticks(&stripped);
    truncate_chars(&escaped, MAX_FIELD_TEXT)
}

/// Prefix every backtick with a zero-width space.
pub fn escape_backticks(input: &str) -> String {
    input.replace('`', "\u{200B}`")
}

pub fn truncate_chars(input: &str, max: usize) -> String {
    match input.char_indices().nth(max) {
        Some((end, _)) => input[..end].to_string(),
        None => input.to_string(),
    }
}

/// `HH:MM:SS`, dropping a leading `00` hour group. Whole days are prefixed
/// as `Nd`.
pub fn format_time(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let hours = (total_seconds / 3600) % 24;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;

    let clock = if hours == 0 && days == 0 {
        format!("{minutes:02}:{seconds:02}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    };

    if days > 0 {
        format!("{days}d {clock}")
    } else {
        clock
    }
}

/// Thousands separators: `1234567` -> `1,234,567`.
pub fn format_number(number: u64) -> String {
    let digits = number.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }

    out
}
