//! Configuration documents written into server directories
//!
//! Each builder returns the rendered text; the provisioner decides where it
//! goes. Values always pass through a structured encoder, never through
//! string interpolation into the target syntax.

mod backend;
mod properties;
mod proxy;

pub use backend::{
    eula_document, ops_document, paper_global_document, server_properties, spigot_document,
};
pub use properties::PropertiesDocument;
pub use proxy::proxy_config_document;

use serde::Serialize;

use crate::error::{Error, Result};

/// Lines of a comment, split on every terminator YAML and Java recognize.
fn comment_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\r', '\n']).filter(|line| !line.is_empty())
}

/// Serialize `value` as YAML below `# ...` header lines.
fn yaml_with_header<T: Serialize>(document: &str, header: &str, value: &T) -> Result<String> {
    let body = serde_yaml::to_string(value).map_err(|e| Error::document(document, e))?;
    let mut out = String::new();
    for line in comment_lines(header) {
        out.push_str("# ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&body);
    Ok(out)
}
