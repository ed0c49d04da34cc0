//! Code page encoding utilities for receipt printers
//!
//! Receipt text is printed through a single-byte code page
//! (Windows-1252, ESC/POS code table 16), which covers Spanish text.
//! Every character occupies exactly one column, so widths are counted
//! in characters rather than bytes.

/// Byte printed in place of characters the code page cannot represent
pub const PLACEHOLDER: u8 = b'?';

/// ESC/POS character code table for Windows-1252
pub(crate) const CODE_PAGE_WPC1252: u8 = 16;

/// Encode text to the printer code page
///
/// Unmappable characters and control characters are replaced with
/// [`PLACEHOLDER`]; control characters would otherwise be interpreted
/// as printer commands.
pub fn encode_text(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for c in s.chars() {
        if c.is_control() {
            out.push(PLACEHOLDER);
            continue;
        }
        if c.is_ascii() {
            out.push(c as u8);
            continue;
        }
        let mut tmp = [0u8; 4];
        let (cow, _, had_errors) = encoding_rs::WINDOWS_1252.encode(c.encode_utf8(&mut tmp));
        if had_errors || cow.len() != 1 {
            out.push(PLACEHOLDER);
        } else {
            out.extend_from_slice(&cow);
        }
    }
    out
}

/// Number of printer columns a string occupies
pub fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to at most `max_width` columns
pub fn truncate_width(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Pad a string to exactly `width` columns
///
/// If the string is longer than the width, it will be truncated.
pub fn pad_width(s: &str, width: usize, align_right: bool) -> String {
    let current_width = text_width(s);
    if current_width >= width {
        return truncate_width(s, width);
    }
    let spaces = width - current_width;
    if align_right {
        format!("{}{}", " ".repeat(spaces), s)
    } else {
        format!("{}{}", s, " ".repeat(spaces))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_ascii_passthrough() {
        assert_eq!(encode_text("Folio: F0001"), b"Folio: F0001".to_vec());
    }

    #[test]
    fn test_encode_spanish() {
        // Windows-1252: í = 0xED, ñ = 0xF1, ¡ = 0xA1
        assert_eq!(encode_text("í"), vec![0xED]);
        assert_eq!(encode_text("Niño"), vec![b'N', b'i', 0xF1, b'o']);
        assert_eq!(encode_text("¡Gracias!")[0], 0xA1);
    }

    #[test]
    fn test_encode_unmappable_uses_placeholder() {
        assert_eq!(encode_text("A你B"), vec![b'A', PLACEHOLDER, b'B']);
        assert_eq!(encode_text("💲5"), vec![PLACEHOLDER, b'5']);
    }

    #[test]
    fn test_encode_strips_control_bytes() {
        assert_eq!(encode_text("a\x1B@b"), vec![b'a', PLACEHOLDER, b'@', b'b']);
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("hello"), 5);
        assert_eq!(text_width("Matrícula"), 9);
    }

    #[test]
    fn test_truncate_width() {
        assert_eq!(truncate_width("hello world", 5), "hello");
        assert_eq!(truncate_width("Inscripción", 20), "Inscripción");
    }

    #[test]
    fn test_pad_width() {
        assert_eq!(pad_width("hi", 5, false), "hi   ");
        assert_eq!(pad_width("hi", 5, true), "   hi");
        assert_eq!(pad_width("hello world", 5, false), "hello");
    }
}
