// This file is part of cpe-rs, a Common Platform Enumeration toolkit.
// Copyright (C) 2026 the cpe-rs authors

//! The 1.1 URI binding
//!
//! A 1.1 URI spells a name as `cpe://` followed by up to three
//! `/`-separated parts in the fixed order hardware, operating system,
//! application. Each part is a `;`-separated list of elements, and each
//! element is a `:`-separated list of values binding, in order, vendor,
//! product, version, update, edition, language. The part position supplies
//! the `part` component of every element in it, so a single 1.1 name can
//! describe several systems at once.
//!
//! The grammar predates wildcards; percent escapes denote literal
//! punctuation only.

use crate::attribute::Attribute;
use crate::name::{Binding, Element, Name, ParseError};
use crate::uri::{percent_decode, percent_encode};
use crate::value::ComponentValue;
use itertools::Itertools;

/// Prefix that selects this grammar
pub const PREFIX: &str = "cpe://";

/// Part class tags in the order the slashes assign them
const CLASSES: [&str; 3] = ["h", "o", "a"];

/// Values of a 1.1 element, in the order the colons assign them
const COMPONENTS: [Attribute; 6] = [
    Attribute::Vendor,
    Attribute::Product,
    Attribute::Version,
    Attribute::Update,
    Attribute::Edition,
    Attribute::Language,
];

/// Parses a name in the 1.1 URI binding.
pub fn parse(text: &str) -> Result<Name, ParseError> {
    let rest = text
        .strip_prefix(PREFIX)
        .ok_or(ParseError::MissingPrefix(PREFIX))?;
    let parts: Vec<&str> = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split('/').collect()
    };
    if parts.len() > 3 {
        return Err(ParseError::TooManyParts(parts.len()));
    }

    let mut elements = Vec::new();
    for (class, part) in CLASSES.into_iter().zip(parts) {
        if part.is_empty() {
            continue;
        }
        for element_text in part.split(';') {
            if element_text.is_empty() {
                return Err(ParseError::EmptyElement);
            }
            elements.push(parse_element(element_text, class)?);
        }
    }
    Ok(Name::with_binding(Binding::V11Uri, elements))
}

fn parse_element(text: &str, class: &str) -> Result<Element, ParseError> {
    let components: Vec<&str> = text.split(':').collect();
    if components.len() > COMPONENTS.len() {
        return Err(ParseError::TooManyComponents(components.len()));
    }

    let mut element = Element::filled(ComponentValue::Empty);
    for attribute in Attribute::iter().skip(7) {
        element.set(attribute, ComponentValue::Undefined);
    }
    element.set(Attribute::Part, ComponentValue::new(class, Attribute::Part)?);
    for (attribute, component) in COMPONENTS.into_iter().zip(components) {
        let value = match component {
            "" => ComponentValue::Empty,
            _ => ComponentValue::new(&percent_decode(component, attribute, false)?, attribute)?,
        };
        element.set(attribute, value);
    }
    Ok(element)
}

/// Emits elements in the 1.1 URI binding.
///
/// Elements are grouped into the hardware, operating system, and
/// application parts according to their `part` component.
#[must_use]
pub fn emit(elements: &[Element]) -> String {
    let mut parts: [Vec<String>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for element in elements {
        // Names carrying this binding always have a concrete class.
        let slot = match element.get(Attribute::Part) {
            ComponentValue::Simple(simple) if simple.value() == "h" => 0,
            ComponentValue::Simple(simple) if simple.value() == "o" => 1,
            _ => 2,
        };
        parts[slot].push(emit_element(element));
    }
    let mut parts: Vec<String> = parts.into_iter().map(|part| part.join(";")).collect();
    while parts.last().is_some_and(String::is_empty) {
        parts.pop();
    }
    format!("cpe://{}", parts.iter().join("/"))
}

fn emit_element(element: &Element) -> String {
    let mut values: Vec<String> = COMPONENTS
        .into_iter()
        .map(|attribute| match element.get(attribute) {
            ComponentValue::Simple(simple) => percent_encode(simple),
            _ => String::new(),
        })
        .collect();
    while values.last().is_some_and(String::is_empty) {
        values.pop();
    }
    values.iter().join(":")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn single_element_round_trips() {
        let text = "cpe://microsoft:windows:2000";
        let name = parse(text).unwrap();
        assert_eq!(name.elements().len(), 1);
        let element = &name.elements()[0];
        assert_eq!(element.get(Attribute::Part).as_simple().unwrap().value(), "h");
        assert_eq!(
            element.get(Attribute::Vendor).as_simple().unwrap().value(),
            "microsoft"
        );
        assert_eq!(emit(name.elements()), text);
    }

    #[test]
    fn parts_assign_system_classes() {
        let text = "cpe://sun:sparc/sun:sunos:5.9/bea:weblogic:8.1;mysql:server:5.0";
        let name = parse(text).unwrap();
        assert_eq!(name.elements().len(), 4);
        let classes: Vec<&str> = name
            .elements()
            .iter()
            .map(|e| e.get(Attribute::Part).as_simple().unwrap().value())
            .collect();
        assert_eq!(classes, ["h", "o", "a", "a"]);
        assert_eq!(emit(name.elements()), text);
    }

    #[test]
    fn empty_part_skips_a_class() {
        let text = "cpe://sun:sunos:5.9//bea:weblogic:8.1";
        let name = parse(text).unwrap();
        let classes: Vec<&str> = name
            .elements()
            .iter()
            .map(|e| e.get(Attribute::Part).as_simple().unwrap().value())
            .collect();
        assert_eq!(classes, ["h", "a"]);
        assert_eq!(emit(name.elements()), text);
    }

    #[test]
    fn empty_components_are_empty_values() {
        let name = parse("cpe://microsoft:windows:2000::sp4").unwrap();
        let element = &name.elements()[0];
        assert_eq!(*element.get(Attribute::Update), ComponentValue::Empty);
        assert_eq!(
            element.get(Attribute::Edition).as_simple().unwrap().value(),
            "sp4"
        );
        assert_eq!(emit(name.elements()), "cpe://microsoft:windows:2000::sp4");
    }

    #[test]
    fn empty_name_has_no_elements() {
        let name = parse("cpe://").unwrap();
        assert!(name.elements().is_empty());
        assert_eq!(emit(name.elements()), "cpe://");
    }

    #[test]
    fn percent_escapes_decode_to_literals() {
        let name = parse("cpe://red%2dhat:enterprise%2elinux").unwrap();
        let element = &name.elements()[0];
        assert_eq!(
            element.get(Attribute::Vendor).as_simple().unwrap().value(),
            r"red\-hat"
        );
        assert_eq!(
            element.get(Attribute::Product).as_simple().unwrap().value(),
            r"enterprise\.linux"
        );
    }

    #[test]
    fn wildcards_do_not_exist_in_1_1() {
        for text in [
            "cpe://acme:prod%01",
            "cpe://acme:prod%02",
            "cpe://acme:prod*",
            "cpe://acme:prod?",
        ] {
            assert_matches!(
                parse(text).unwrap_err(),
                ParseError::Value(_),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn structural_errors() {
        assert_eq!(
            parse("cpe:/a:hp").unwrap_err(),
            ParseError::MissingPrefix(PREFIX)
        );
        assert_eq!(
            parse("cpe://a/b/c/d").unwrap_err(),
            ParseError::TooManyParts(4)
        );
        assert_eq!(
            parse("cpe://acme:prod;;other:prod").unwrap_err(),
            ParseError::EmptyElement
        );
        assert_eq!(
            parse("cpe://a:b:c:d:e:f:g").unwrap_err(),
            ParseError::TooManyComponents(7)
        );
    }
}
