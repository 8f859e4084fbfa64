use terminal_size::{Width, terminal_size};

use crate::ui::ascii::ESC_BYTE;

#[derive(Debug, Default, Clone)]
pub struct WidthUtil;

impl WidthUtil {
    fn strip_ansi(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut bytes = s.bytes().peekable();

        while let Some(byte) = bytes.next() {
            if byte == ESC_BYTE && matches!(bytes.peek(), Some(b'[')) {
                let _ = bytes.next(); // skip '['
                for nb in bytes.by_ref() {
                    if (nb as char).is_ascii_alphabetic() {
                        break;
                    }
                }
                continue;
            }
            out.push(byte as char);
        }
        out
    }

    pub fn visible_width(&self, s: &str) -> usize {
        Self::strip_ansi(s).chars().count()
    }

    #[cfg(test)]
    pub(crate) fn strip_ansi_for_test(s: &str) -> String {
        Self::strip_ansi(s)
    }

    pub fn pad_visible(&self, s: &str, width: usize) -> String {
        let w = self.visible_width(s);
        if w >= width {
            s.to_string()
        } else {
            let mut out = String::with_capacity(s.len() + (width - w));
            out.push_str(s);
            for _ in 0..(width - w) {
                out.push(' ');
            }
            out
        }
    }

    /// Shorten `s` to at most `width` visible characters, appending "..."
    /// when something was cut. ANSI-styled strings are left alone.
    pub fn truncate_visible(&self, s: &str, width: usize) -> String {
        if self.visible_width(s) <= width || s.bytes().any(|b| b == ESC_BYTE) {
            return s.to_string();
        }
        let keep = width.saturating_sub(3);
        let mut out: String = s.chars().take(keep).collect();
        out.push_str("...");
        out
    }

    /// Best-effort terminal width (defaults to 100).
    pub fn terminal_width(&self) -> usize {
        if let Some((Width(w), _)) = terminal_size() {
            w as usize
        } else {
            100
        }
    }
}
