//! Placeholder Template Engine
//!
//! Fills `{name}` placeholders in template contents with parameter values.
//!
//! - Strings, numbers and booleans are substituted as text.
//! - A line containing a placeholder whose value is `null` is dropped.
//! - A placeholder naming a missing parameter is an error.
//! - Braces that do not enclose an identifier (`{ `, `{}`) are literal text.

use serde_json::{Map, Value};

use crate::error::TemplateError;

/// Apply `params` to the template `contents`
///
/// # Example
/// ```ignore
/// let out = apply_template_on_contents(
///     "neighbor.tmpl",
///     "neighbor {address} remote-as {peer_as}\n",
///     &json!({"address": "192.0.2.1", "peer_as": 65001}),
/// )?;
/// // out == "neighbor 192.0.2.1 remote-as 65001\n"
/// ```
pub fn apply_template_on_contents(
    name: &str,
    contents: &str,
    params: &Value,
) -> Result<String, TemplateError> {
    let params = params.as_object().ok_or_else(|| TemplateError::InvalidParams {
        template: name.to_string(),
    })?;

    let mut rendered = String::with_capacity(contents.len());
    for line in contents.split_inclusive('\n') {
        if let Some(filled) = fill_line(name, line, params)? {
            rendered.push_str(&filled);
        }
    }
    Ok(rendered)
}

/// Fill one line, returning `None` when the line must be dropped
fn fill_line(
    name: &str,
    line: &str,
    params: &Map<String, Value>,
) -> Result<Option<String>, TemplateError> {
    let mut result = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(start) = rest.find('{') {
        result.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let Some(key) = placeholder_at(after) else {
            result.push('{');
            rest = after;
            continue;
        };

        match params.get(key) {
            Some(Value::Null) => return Ok(None),
            Some(Value::String(s)) => result.push_str(s),
            Some(Value::Number(n)) => result.push_str(&n.to_string()),
            Some(Value::Bool(b)) => result.push_str(&b.to_string()),
            Some(_) => {
                return Err(TemplateError::NotScalar {
                    template: name.to_string(),
                    placeholder: key.to_string(),
                })
            }
            None => {
                return Err(TemplateError::Unresolved {
                    template: name.to_string(),
                    placeholder: key.to_string(),
                })
            }
        }
        rest = &after[key.len() + 1..];
    }

    result.push_str(rest);
    Ok(Some(result))
}

/// Identifier directly followed by `}` at the start of `text`, if any
fn placeholder_at(text: &str) -> Option<&str> {
    let end = text.find('}')?;
    let key = &text[..end];
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    valid.then_some(key)
}
