// This file is part of cpe-rs, a Common Platform Enumeration toolkit.
// Copyright (C) 2026 the cpe-rs authors

//! The 2.2 URI binding
//!
//! A URI spells a name as `cpe:/` followed by up to seven colon-separated
//! fields in serialization order: part, vendor, product, version, update,
//! edition, language. An empty or omitted field is `Empty` (which matches
//! as `Any`) and a whole field of `-` is `NotApplicable`.
//!
//! Within a field, alphanumerics, `_`, `.`, and `-` appear bare and every
//! other character is percent-encoded. The escapes `%01` and `%02` denote
//! the `?` and `*` wildcards.
//!
//! An edition field that begins with `~` packs the edition together with
//! the four extended attributes as
//! `~edition~sw_edition~target_sw~target_hw~other`. The packed form exists
//! only in the serialized text: parsing unpacks it into the five attribute
//! slots, and emission packs it back when any extended attribute holds a
//! value.

use crate::attribute::Attribute;
use crate::name::{Binding, Element, Name, ParseError};
use crate::value::{ComponentValue, Simple, ValueError};
use itertools::Itertools;

/// Prefix that selects this grammar
pub const PREFIX: &str = "cpe:/";

/// Attributes carried by a packed edition field, in packing order
const PACKED: [Attribute; 5] = [
    Attribute::Edition,
    Attribute::SwEdition,
    Attribute::TargetSw,
    Attribute::TargetHw,
    Attribute::Other,
];

/// Parses a name in the 2.2 URI binding.
pub fn parse(text: &str) -> Result<Name, ParseError> {
    let rest = text
        .strip_prefix(PREFIX)
        .ok_or(ParseError::MissingPrefix(PREFIX))?;
    let fields: Vec<&str> = rest.split(':').collect();
    if fields.len() > 7 {
        return Err(ParseError::TooManyFields(fields.len()));
    }

    let mut element = Element::filled(ComponentValue::Empty);
    for attribute in Attribute::iter().skip(7) {
        element.set(attribute, ComponentValue::Undefined);
    }
    for (attribute, field) in Attribute::iter().zip(fields) {
        if attribute == Attribute::Edition && field.starts_with('~') {
            unpack_edition(field, &mut element)?;
        } else {
            element.set(attribute, decode(field, attribute)?);
        }
    }
    Ok(Name::with_binding(Binding::Uri, vec![element]))
}

fn decode(field: &str, attribute: Attribute) -> Result<ComponentValue, ParseError> {
    match field {
        "" => Ok(ComponentValue::Empty),
        "-" => Ok(ComponentValue::NotApplicable),
        "a" | "o" | "h" if attribute == Attribute::Part => {
            Ok(ComponentValue::new(field, attribute)?)
        }
        _ if attribute == Attribute::Part => Err(ParseError::Value(ValueError::InvalidValue {
            attribute,
            text: field.to_string(),
        })),
        _ => Ok(ComponentValue::new(
            &percent_decode(field, attribute, true)?,
            attribute,
        )?),
    }
}

/// Unpacks a `~`-led edition field into the five packed attribute slots.
fn unpack_edition(field: &str, element: &mut Element) -> Result<(), ParseError> {
    let pieces: Vec<&str> = field.split('~').collect();
    if pieces.len() != 6 || !pieces[0].is_empty() {
        return Err(ParseError::MalformedPackedEdition(field.to_string()));
    }
    for (attribute, piece) in PACKED.into_iter().zip(&pieces[1..]) {
        let value = match *piece {
            "" => ComponentValue::Any,
            "-" => ComponentValue::NotApplicable,
            piece => ComponentValue::new(&percent_decode(piece, attribute, true)?, attribute)?,
        };
        element.set(attribute, value);
    }
    Ok(())
}

/// Lowers a percent-encoded field to the canonical value form.
///
/// `%01` and `%02` decode to the `?` and `*` wildcards when
/// `allow_wildcards` is set; the 1.1 grammar, which predates wildcards,
/// passes false. Other percent escapes must decode to ASCII punctuation.
pub(crate) fn percent_decode(
    field: &str,
    attribute: Attribute,
    allow_wildcards: bool,
) -> Result<String, ParseError> {
    let invalid = || {
        ParseError::Value(ValueError::InvalidValue {
            attribute,
            text: field.to_string(),
        })
    };
    let bytes = field.as_bytes();
    let mut canonical = String::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'%' => {
                let hex = bytes.get(i + 1..i + 3).ok_or_else(invalid)?;
                let hex = std::str::from_utf8(hex).map_err(|_| invalid())?;
                let code = u8::from_str_radix(hex, 16).map_err(|_| invalid())?;
                match code {
                    0x01 if allow_wildcards => canonical.push('?'),
                    0x02 if allow_wildcards => canonical.push('*'),
                    code if (code as char).is_ascii_punctuation() => {
                        canonical.push('\\');
                        canonical.push(code as char);
                    }
                    _ => return Err(invalid()),
                }
                i += 3;
            }
            b'.' | b'-' | b'~' => {
                canonical.push('\\');
                canonical.push(b as char);
                i += 1;
            }
            b'_' => {
                canonical.push('_');
                i += 1;
            }
            b if b.is_ascii_alphanumeric() => {
                canonical.push(b as char);
                i += 1;
            }
            _ => return Err(invalid()),
        }
    }
    Ok(canonical)
}

/// Emits an element in the 2.2 URI binding.
///
/// Trailing `Any` fields are omitted, and the extended attributes are
/// packed into the edition field when any of them holds a value.
#[must_use]
pub fn emit(element: &Element) -> String {
    let mut fields: Vec<String> = Attribute::iter()
        .take(7)
        .map(|attribute| {
            if attribute == Attribute::Edition {
                edition_field(element)
            } else {
                encode_value(element.get(attribute))
            }
        })
        .collect();
    while fields.last().is_some_and(String::is_empty) {
        fields.pop();
    }
    format!("cpe:/{}", fields.iter().join(":"))
}

fn edition_field(element: &Element) -> String {
    let extended_in_use = PACKED[1..]
        .iter()
        .any(|&attribute| !element.get(attribute).is_any_equivalent());
    if extended_in_use {
        let packed = PACKED
            .into_iter()
            .map(|attribute| encode_value(element.get(attribute)))
            .join("~");
        format!("~{packed}")
    } else {
        encode_value(element.get(Attribute::Edition))
    }
}

/// Emits one value as a URI field.
///
/// `Undefined` and `Empty` have no spelling of their own here and emit as
/// the empty field.
#[must_use]
pub fn encode_value(value: &ComponentValue) -> String {
    match value {
        ComponentValue::Any | ComponentValue::Undefined | ComponentValue::Empty => String::new(),
        ComponentValue::NotApplicable => "-".to_string(),
        ComponentValue::Simple(simple) => percent_encode(simple),
    }
}

/// Raises a canonical value to its percent-encoded field form.
pub(crate) fn percent_encode(simple: &Simple) -> String {
    let mut out = String::with_capacity(simple.value().len());
    let mut chars = simple.value().chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    if matches!(escaped, '.' | '-') {
                        out.push(escaped);
                    } else {
                        out.push_str(&format!("%{:02x}", escaped as u32));
                    }
                }
            }
            '?' => out.push_str("%01"),
            '*' => out.push_str("%02"),
            c => out.push(c),
        }
    }
    // A lone hyphen field would read back as NotApplicable.
    if out == "-" { "%2d".to_string() } else { out }
}
