//! Front matter splitting and YAML parsing.
//!
//! A document is a YAML block, a line reading exactly `---`, then the
//! Markdown body. There is no opening delimiter.

use serde_json::Value;

/// Parsed front matter.
///
/// Always contains a `title` key after [`parse_meta`].
pub type Meta = serde_json::Map<String, Value>;

/// Split document content at the first line consisting of exactly `---`.
///
/// Returns `(front_matter, body)`. A trailing `\r` on the delimiter line is
/// tolerated. Content without a delimiter line is all body.
pub(crate) fn split_front_matter(content: &str) -> (&str, &str) {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let bare = line.strip_suffix('\n').unwrap_or(line);
        let bare = bare.strip_suffix('\r').unwrap_or(bare);
        if bare == "---" {
            return (&content[..offset], &content[offset + line.len()..]);
        }
        offset += line.len();
    }
    ("", content)
}

/// Parse a YAML front matter block into [`Meta`].
///
/// Empty and `null` blocks yield an empty mapping. A missing or `null`
/// `title` defaults to the empty string.
///
/// # Errors
///
/// Returns a message if the YAML is malformed or is not a mapping.
pub(crate) fn parse_meta(yaml: &str) -> Result<Meta, String> {
    let trimmed = yaml.trim();
    let mut meta = if trimmed.is_empty() {
        Meta::new()
    } else {
        let value: Value =
            serde_yaml::from_str(trimmed).map_err(|e| format!("Invalid YAML: {e}"))?;
        match value {
            Value::Object(map) => map,
            Value::Null => Meta::new(),
            other => {
                return Err(format!(
                    "expected a mapping, found {}",
                    value_kind(&other)
                ));
            }
        }
    };

    if meta.get("title").is_none_or(Value::is_null) {
        meta.insert("title".to_owned(), Value::String(String::new()));
    }
    Ok(meta)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
