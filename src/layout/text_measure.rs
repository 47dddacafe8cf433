//! Text Measurement
//!
//! Display widths in terminal cells, from the `unicode-width` tables:
//! ASCII is 1 cell, CJK and most emoji are 2, combining marks and
//! control characters are 0.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in cells.
pub fn string_width(s: &str) -> i32 {
    i32::try_from(s.width()).unwrap_or(i32::MAX)
}

/// Display width of one character. Control characters are zero-width.
pub fn char_width(c: char) -> i32 {
    c.width().map_or(0, |w| w as i32)
}

/// Natural size of a text leaf: (widest line, line count).
pub fn text_size(text: &str) -> (i32, i32) {
    let mut width = 0;
    let mut lines = 0;
    for line in text.split('\n') {
        width = width.max(string_width(line));
        lines += 1;
    }
    (width, lines)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        assert_eq!(string_width("Text1"), 5);
        assert_eq!(string_width(""), 0);
    }

    #[test]
    fn test_wide_and_zero_width() {
        assert_eq!(string_width("日本"), 4);
        assert_eq!(char_width('日'), 2);
        assert_eq!(char_width('\u{0301}'), 0);
        assert_eq!(char_width('\x07'), 0);
    }

    #[test]
    fn test_text_size_multiline() {
        assert_eq!(text_size("ab\nlonger\nc"), (6, 3));
        assert_eq!(text_size(""), (0, 1));
    }
}
