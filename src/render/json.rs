//! JSON rendering for outlines and reports.

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with two-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
    /// Pretty-printed JSON with the given number of spaces
    Indented(usize),
}

/// Serialize a value to JSON. Non-ASCII text is written as-is.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
        JsonFormat::Indented(width) => return to_json_indented(value, width),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

fn to_json_indented<T: Serialize + ?Sized>(value: &T, width: usize) -> Result<String> {
    let indent = vec![b' '; width];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| Error::Render(e.to_string()))
}
