// This file is part of cpe-rs, a Common Platform Enumeration toolkit.
// Copyright (C) 2026 the cpe-rs authors

//! The well-formed name binding
//!
//! A WFN spells a name as `wfn:[` followed by comma-space-separated
//! `attribute=value` pairs and a closing `]`. A value is either a
//! double-quoted string in canonical form or one of the bare keywords `ANY`
//! and `NA`. Attributes may appear in any order but at most once; missing
//! attributes default to `Any`. Emission always writes all eleven
//! attributes in serialization order.

use crate::attribute::Attribute;
use crate::name::{Binding, Element, Name, ParseError};
use crate::value::ComponentValue;
use std::fmt::Write;

/// Prefix that selects this grammar
pub const PREFIX: &str = "wfn:[";

/// Parses a name in the WFN binding.
pub fn parse(text: &str) -> Result<Name, ParseError> {
    let rest = text
        .strip_prefix(PREFIX)
        .ok_or(ParseError::MissingPrefix(PREFIX))?;
    let body = rest.strip_suffix(']').ok_or(ParseError::UnclosedBracket)?;

    let mut element = Element::filled(ComponentValue::Any);
    let mut seen = Vec::new();
    let mut rest = body;
    while !rest.is_empty() {
        if !seen.is_empty() {
            rest = rest
                .strip_prefix(", ")
                .ok_or_else(|| ParseError::ExpectedSeparator(head(rest)))?;
        }
        let (attribute, after_tag) = parse_tag(rest)?;
        if seen.contains(&attribute) {
            return Err(ParseError::DuplicateAttribute(attribute));
        }
        seen.push(attribute);
        let after_equals = after_tag
            .strip_prefix('=')
            .ok_or(ParseError::ExpectedEquals(attribute))?;
        let (value, after_value) = parse_value(after_equals, attribute)?;
        element.set(attribute, value);
        rest = after_value;
    }
    Ok(Name::with_binding(Binding::WellFormed, vec![element]))
}

/// Returns a short copy of the input for use in error messages.
fn head(text: &str) -> String {
    text.chars().take(12).collect()
}

fn parse_tag(text: &str) -> Result<(Attribute, &str), ParseError> {
    let len = text
        .find(|c: char| !(c.is_ascii_lowercase() || c == '_'))
        .unwrap_or(text.len());
    if len == 0 {
        return Err(ParseError::ExpectedAttribute(head(text)));
    }
    let (tag, rest) = text.split_at(len);
    let attribute = tag
        .parse()
        .map_err(|e| ParseError::Value(crate::value::ValueError::from(e)))?;
    Ok((attribute, rest))
}

fn parse_value(text: &str, attribute: Attribute) -> Result<(ComponentValue, &str), ParseError> {
    if let Some(quoted) = text.strip_prefix('"') {
        let end = closing_quote(quoted).ok_or(ParseError::UnclosedQuote(attribute))?;
        let value = ComponentValue::new(&quoted[..end], attribute)?;
        Ok((value, &quoted[end + 1..]))
    } else if let Some(rest) = text.strip_prefix("ANY") {
        Ok((ComponentValue::Any, rest))
    } else if let Some(rest) = text.strip_prefix("NA") {
        Ok((ComponentValue::NotApplicable, rest))
    } else {
        Err(ParseError::ExpectedValue(attribute))
    }
}

/// Finds the position of the first unescaped double quote.
fn closing_quote(text: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return Some(i);
        }
    }
    None
}

/// Emits one value as it appears to the right of `=` in a WFN.
///
/// `Undefined` and `Empty` have no WFN spelling of their own and emit as
/// `ANY`.
#[must_use]
pub fn encode_value(value: &ComponentValue) -> String {
    match value {
        ComponentValue::Simple(simple) => format!("\"{}\"", simple.value()),
        ComponentValue::NotApplicable => "NA".to_string(),
        ComponentValue::Any | ComponentValue::Undefined | ComponentValue::Empty => {
            "ANY".to_string()
        }
    }
}

/// Emits an element in the WFN binding.
#[must_use]
pub fn emit(element: &Element) -> String {
    let mut out = String::from("wfn:[");
    for (i, attribute) in Attribute::iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write!(out, "{attribute}={}", encode_value(element.get(attribute))).unwrap();
    }
    out.push(']');
    out
}
