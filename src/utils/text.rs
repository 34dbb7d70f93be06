//! Naming conversions and small pattern helpers

use regex::Regex;

use crate::error::{Error, Result};

/// True when `text` is empty or only whitespace
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// `user_name` → `userName`. Letters outside word starts are lowercased.
pub fn underline_to_camel(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut upper_next = false;
    for c in text.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// `userName` → `user_name`
pub fn camel_to_underline(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        if c.is_uppercase() {
            out.push('_');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Every match of capture `group` of `pattern` in `text`, in order
pub fn capture_all(text: &str, pattern: &str, group: usize) -> Result<Vec<String>> {
    let re = Regex::new(pattern).map_err(|e| Error::InvalidArgument(e.to_string()))?;
    Ok(capture_with(&re, text, group))
}

pub(crate) fn capture_with(re: &Regex, text: &str, group: usize) -> Vec<String> {
    re.captures_iter(text)
        .filter_map(|caps| caps.get(group).map(|m| m.as_str().to_string()))
        .collect()
}
