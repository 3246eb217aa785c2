//! `java.util.Properties` text format

use std::fmt::Write;

use super::comment_lines;

/// An ordered `key=value` document with leading comment lines.
///
/// Rendering escapes keys and values the way `Properties.store` does, so a
/// Java server reads back exactly what was set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertiesDocument {
    comments: Vec<String>,
    entries: Vec<(String, String)>,
}

impl PropertiesDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a comment. Rendered before all entries, one `#` line per line of text.
    pub fn comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.comments.push(text.into());
        self
    }

    /// Set `key`, keeping its original position if it was set before.
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for comment in &self.comments {
            for line in comment_lines(comment) {
                let _ = writeln!(out, "# {line}");
            }
        }
        for (key, value) in &self.entries {
            let _ = writeln!(out, "{}={}", escape(key, true), escape(value, false));
        }
        out
    }
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || (c as u32) > 0x7e => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{unit:04X}");
                }
            }
            c => out.push(c),
        }
    }
    out
}
