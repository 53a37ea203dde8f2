//! HTML and URI escaping used by tag emission

use pct_str::{Encoder, PctString};

/// Escaping capability consulted by every rendering
pub trait Escaper: Send + Sync {
    /// Escape text for inclusion as HTML content
    fn escape_html(&self, text: &str) -> String;

    /// Escape a value for inclusion inside a URI attribute
    fn escape_uri(&self, text: &str) -> String;
}

/// Default escaper
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEscaper;

impl Escaper for StandardEscaper {
    fn escape_html(&self, text: &str) -> String {
        escape_html(text)
    }

    fn escape_uri(&self, text: &str) -> String {
        escape_uri(text)
    }
}

/// Escape the five HTML special characters
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Percent-encode everything that may not appear literally in a URI,
/// leaving the reserved delimiters intact
pub fn escape_uri(s: &str) -> String {
    PctString::encode(s.chars(), UriUnsafe).to_string()
}

struct UriUnsafe;

impl Encoder for UriUnsafe {
    fn encode(&self, c: char) -> bool {
        !c.is_ascii_graphic() || matches!(c, '"' | '<' | '>' | '\\' | '^' | '`' | '{' | '|' | '}' | '%')
    }
}
