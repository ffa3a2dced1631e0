// This file is part of cpe-rs, a Common Platform Enumeration toolkit.
// Copyright (C) 2026 the cpe-rs authors

//! The formatted string binding
//!
//! A formatted string spells a name as `cpe:2.3:` followed by exactly
//! eleven colon-separated fields in serialization order. A whole field of
//! `*` is `Any` and `-` is `NotApplicable`. Within a field, alphanumerics,
//! `_`, `.`, and `-` appear bare, a bare `?` or `*` is a wildcard, and any
//! other punctuation carries a backslash escape. A colon inside a value is
//! always escaped, so fields are split at unescaped colons only.

use crate::attribute::Attribute;
use crate::name::{Binding, Element, Name, ParseError};
use crate::value::{ComponentValue, ValueError};
use itertools::Itertools;

/// Prefix that selects this grammar
pub const PREFIX: &str = "cpe:2.3:";

/// Parses a name in the formatted string binding.
pub fn parse(text: &str) -> Result<Name, ParseError> {
    let rest = text
        .strip_prefix(PREFIX)
        .ok_or(ParseError::MissingPrefix(PREFIX))?;
    let fields = split_unescaped(rest);
    if fields.len() != 11 {
        return Err(ParseError::WrongFieldCount(fields.len()));
    }
    let mut element = Element::filled(ComponentValue::Any);
    for (attribute, field) in Attribute::iter().zip(fields) {
        element.set(attribute, decode(field, attribute)?);
    }
    Ok(Name::with_binding(Binding::FormattedString, vec![element]))
}

/// Splits the input at colons that are not preceded by a backslash escape.
fn split_unescaped(text: &str) -> Vec<&str> {
    let mut fields = Vec::with_capacity(11);
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == ':' {
            fields.push(&text[start..i]);
            start = i + 1;
        }
    }
    fields.push(&text[start..]);
    fields
}

fn decode(field: &str, attribute: Attribute) -> Result<ComponentValue, ParseError> {
    match field {
        "*" => return Ok(ComponentValue::Any),
        "-" => return Ok(ComponentValue::NotApplicable),
        _ => {}
    }
    let invalid = || {
        ParseError::Value(ValueError::InvalidValue {
            attribute,
            text: field.to_string(),
        })
    };
    if attribute == Attribute::Part {
        // The part field of a bound name admits no wildcard and no escape.
        return match field {
            "a" | "o" | "h" => Ok(ComponentValue::new(field, attribute)?),
            _ => Err(invalid()),
        };
    }
    let mut canonical = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = chars.next().ok_or_else(invalid)?;
                canonical.push('\\');
                canonical.push(escaped);
            }
            '.' | '-' => {
                canonical.push('\\');
                canonical.push(c);
            }
            '_' | '?' | '*' => canonical.push(c),
            c if c.is_ascii_alphanumeric() => canonical.push(c),
            _ => return Err(invalid()),
        }
    }
    Ok(ComponentValue::new(&canonical, attribute)?)
}

/// Emits an element in the formatted string binding.
#[must_use]
pub fn emit(element: &Element) -> String {
    let fields = Attribute::iter()
        .map(|attribute| encode_value(element.get(attribute)))
        .join(":");
    format!("cpe:2.3:{fields}")
}

/// Emits one value as a formatted string field.
///
/// `Undefined` and `Empty` have no spelling of their own here and emit as
/// `*`.
#[must_use]
pub fn encode_value(value: &ComponentValue) -> String {
    let simple = match value {
        ComponentValue::Any | ComponentValue::Undefined | ComponentValue::Empty => {
            return "*".to_string();
        }
        ComponentValue::NotApplicable => return "-".to_string(),
        ComponentValue::Simple(simple) => simple,
    };
    let mut out = String::with_capacity(simple.value().len());
    let mut chars = simple.value().chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                if matches!(escaped, '.' | '-') {
                    out.push(escaped);
                } else {
                    out.push('\\');
                    out.push(escaped);
                }
            }
        } else {
            out.push(c);
        }
    }
    // A lone hyphen field would read back as NotApplicable.
    if out == "-" { r"\-".to_string() } else { out }
}
