//! Plugin reference interpretation

use carcass_fs::NormalizedPath;

const WILDCARD: char = '*';

/// How a plugin file reference should be looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferencePattern {
    /// A path used as-is.
    Literal(NormalizedPath),
    /// `<directory>/<prefix>*`: first entry of `directory` starting with `prefix`.
    Prefix {
        directory: NormalizedPath,
        prefix: String,
    },
}

impl ReferencePattern {
    /// Interpret a raw reference.
    ///
    /// Only a reference with exactly one `*` is a pattern. The directory is
    /// everything before the last separator preceding the `*` (the current
    /// directory if there is none) and the prefix is the rest of that final
    /// segment up to the `*`. Anything after the `*` is ignored.
    pub fn parse(reference: &str) -> Self {
        let normalized = NormalizedPath::new(reference);
        let text = normalized.as_str();

        if text.matches(WILDCARD).count() != 1 {
            return Self::Literal(normalized);
        }

        let Some(star) = text.find(WILDCARD) else {
            return Self::Literal(normalized);
        };
        let before = &text[..star];

        let (directory, prefix) = match before.rfind('/') {
            Some(0) => ("/", &before[1..]),
            Some(sep) => (&before[..sep], &before[sep + 1..]),
            None => (".", before),
        };

        Self::Prefix {
            directory: NormalizedPath::new(directory),
            prefix: prefix.to_string(),
        }
    }
}
