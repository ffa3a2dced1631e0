// This file is part of cpe-rs, a Common Platform Enumeration toolkit.
// Copyright (C) 2026 the cpe-rs authors

//! Names and their textual bindings
//!
//! A [`Name`] identifies a class of products. It consists of a [`Binding`]
//! (the textual encoding the name was parsed from or converted to) and one
//! or more [`Element`]s, each holding a [`ComponentValue`] for every
//! attribute. Names in 2.2 and 2.3 bindings have exactly one element; a 1.1
//! URI may describe several elements at once.
//!
//! [`Name::parse`] selects a grammar by prefix; [`Name::detect`] tries every
//! grammar in turn and reports all rejection reasons on failure.

use crate::attribute::Attribute;
use crate::value::{ComponentValue, ValueError};
use crate::{fs, uri, v11, wfn};
use itertools::Itertools;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Textual binding a name is expressed in
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Binding {
    /// The `cpe://` URI form of version 1.1
    V11Uri,
    /// The `cpe:/` URI form of version 2.2
    Uri,
    /// The `cpe:2.3:` formatted string of version 2.3
    FormattedString,
    /// The bracketed well-formed name of version 2.3
    WellFormed,
}

impl Binding {
    /// Returns the CPE version this binding belongs to.
    #[must_use]
    pub const fn version(self) -> Version {
        match self {
            Binding::V11Uri => Version::V1_1,
            Binding::Uri => Version::V2_2,
            Binding::FormattedString | Binding::WellFormed => Version::V2_3,
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::V11Uri => "1.1 URI".fmt(f),
            Binding::Uri => "URI".fmt(f),
            Binding::FormattedString => "formatted string".fmt(f),
            Binding::WellFormed => "WFN".fmt(f),
        }
    }
}

/// Version of the naming specification
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Version {
    /// CPE 1.1
    V1_1,
    /// CPE 2.2
    V2_2,
    /// CPE 2.3
    V2_3,
}

impl Version {
    /// Returns the number of attributes a name of this version carries.
    #[must_use]
    pub const fn attribute_count(self) -> usize {
        match self {
            Version::V1_1 | Version::V2_2 => 7,
            Version::V2_3 => 11,
        }
    }

    /// Iterates over the attributes available in this version, in
    /// serialization order.
    pub fn attributes(self) -> impl Iterator<Item = Attribute> {
        Attribute::iter().take(self.attribute_count())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::V1_1 => "1.1".fmt(f),
            Version::V2_2 => "2.2".fmt(f),
            Version::V2_3 => "2.3".fmt(f),
        }
    }
}

/// One system or product described by a name
///
/// An element assigns a [`ComponentValue`] to each of the eleven attributes.
/// Attributes that a binding cannot carry hold
/// [`Undefined`](ComponentValue::Undefined).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Element {
    part: ComponentValue,
    vendor: ComponentValue,
    product: ComponentValue,
    version: ComponentValue,
    update: ComponentValue,
    edition: ComponentValue,
    language: ComponentValue,
    sw_edition: ComponentValue,
    target_sw: ComponentValue,
    target_hw: ComponentValue,
    other: ComponentValue,
}

impl Element {
    /// Creates an element with every attribute set to a clone of the given
    /// value.
    pub(crate) fn filled(value: ComponentValue) -> Self {
        Element {
            part: value.clone(),
            vendor: value.clone(),
            product: value.clone(),
            version: value.clone(),
            update: value.clone(),
            edition: value.clone(),
            language: value.clone(),
            sw_edition: value.clone(),
            target_sw: value.clone(),
            target_hw: value.clone(),
            other: value,
        }
    }

    /// Returns the value of the given attribute.
    #[must_use]
    pub fn get(&self, attribute: Attribute) -> &ComponentValue {
        match attribute {
            Attribute::Part => &self.part,
            Attribute::Vendor => &self.vendor,
            Attribute::Product => &self.product,
            Attribute::Version => &self.version,
            Attribute::Update => &self.update,
            Attribute::Edition => &self.edition,
            Attribute::Language => &self.language,
            Attribute::SwEdition => &self.sw_edition,
            Attribute::TargetSw => &self.target_sw,
            Attribute::TargetHw => &self.target_hw,
            Attribute::Other => &self.other,
        }
    }

    /// Replaces the value of the given attribute.
    pub fn set(&mut self, attribute: Attribute, value: ComponentValue) {
        let slot = match attribute {
            Attribute::Part => &mut self.part,
            Attribute::Vendor => &mut self.vendor,
            Attribute::Product => &mut self.product,
            Attribute::Version => &mut self.version,
            Attribute::Update => &mut self.update,
            Attribute::Edition => &mut self.edition,
            Attribute::Language => &mut self.language,
            Attribute::SwEdition => &mut self.sw_edition,
            Attribute::TargetSw => &mut self.target_sw,
            Attribute::TargetHw => &mut self.target_hw,
            Attribute::Other => &mut self.other,
        };
        *slot = value;
    }

    /// Iterates over all attribute-value pairs in serialization order.
    pub fn values(&self) -> impl Iterator<Item = (Attribute, &ComponentValue)> {
        Attribute::iter().map(|attribute| (attribute, self.get(attribute)))
    }

    /// Returns a copy with `Undefined` and `Empty` replaced by `Any`.
    ///
    /// This is the canonical eleven-attribute form used for comparison and
    /// for conversion to the WFN binding.
    #[must_use]
    pub fn normalized(&self) -> Element {
        let mut element = self.clone();
        for attribute in Attribute::iter() {
            if element.get(attribute).is_any_equivalent() {
                element.set(attribute, ComponentValue::Any);
            }
        }
        element
    }

    /// Returns true if the part attribute is the given concrete class tag.
    fn has_class(&self, tag: &str) -> bool {
        match &self.part {
            ComponentValue::Simple(simple) => simple.value() == tag,
            _ => false,
        }
    }
}

/// Error in parsing a name against a binding grammar
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum ParseError {
    /// The input does not begin with the prefix of the selected grammar.
    #[error("missing the {0:?} prefix")]
    MissingPrefix(&'static str),
    /// The WFN attribute list is not closed with `]`.
    #[error("the attribute list is not closed with `]`")]
    UnclosedBracket,
    /// Something other than an attribute tag where one was expected.
    #[error("expected an attribute tag near {0:?}")]
    ExpectedAttribute(String),
    /// Missing `=` between an attribute tag and its value.
    #[error("expected `=` after the {0} tag")]
    ExpectedEquals(Attribute),
    /// A WFN value is neither a quoted string nor `ANY` nor `NA`.
    #[error("expected a quoted string, ANY, or NA for {0}")]
    ExpectedValue(Attribute),
    /// A quoted WFN value is missing its closing quote.
    #[error("the value of {0} is missing its closing quote")]
    UnclosedQuote(Attribute),
    /// Missing `, ` between attribute-value pairs.
    #[error("expected `, ` before {0:?}")]
    ExpectedSeparator(String),
    /// The same attribute appears twice in a WFN.
    #[error("the {0} attribute appears more than once")]
    DuplicateAttribute(Attribute),
    /// A formatted string does not have exactly eleven fields.
    #[error("expected 11 fields, found {0}")]
    WrongFieldCount(usize),
    /// A URI has more fields than the grammar allows.
    #[error("expected at most 7 fields, found {0}")]
    TooManyFields(usize),
    /// A packed edition field does not have five `~`-separated subfields.
    #[error("malformed packed edition field {0:?}")]
    MalformedPackedEdition(String),
    /// A 1.1 URI has more than three `/`-separated parts.
    #[error("expected at most 3 parts, found {0}")]
    TooManyParts(usize),
    /// A 1.1 part contains an empty element between `;` separators.
    #[error("a part contains an empty element")]
    EmptyElement,
    /// A 1.1 element has more components than the grammar allows.
    #[error("expected at most 6 components in an element, found {0}")]
    TooManyComponents(usize),
    /// A field failed value validation.
    #[error(transparent)]
    Value(#[from] ValueError),
}

/// Aggregate error returned by [`Name::detect`]
///
/// Contains the rejection reason of every binding grammar that was tried.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DetectError {
    /// Rejection reason per binding, in the order the grammars were tried
    pub causes: Vec<(Binding, ParseError)>,
}

impl fmt::Display for DetectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "the name matches no supported grammar: {}",
            self.causes
                .iter()
                .map(|(binding, error)| format!("{binding}: {error}"))
                .join("; ")
        )
    }
}

impl std::error::Error for DetectError {}

/// CPE name
///
/// See the [module documentation](self) for an overview.
#[derive(Clone, Debug)]
pub struct Name {
    binding: Binding,
    elements: Vec<Element>,
}

impl Name {
    /// Creates a name from parsed elements.
    pub(crate) fn with_binding(binding: Binding, elements: Vec<Element>) -> Self {
        Name { binding, elements }
    }

    /// Parses a name, selecting the grammar by its prefix.
    ///
    /// `wfn:[` selects the WFN grammar, `cpe:2.3:` the formatted string,
    /// `cpe://` the 1.1 URI, and `cpe:/` the 2.2 URI. Anything else is
    /// attempted as a 1.1 URI and fails accordingly.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        if text.starts_with(wfn::PREFIX) {
            wfn::parse(text)
        } else if text.starts_with(fs::PREFIX) {
            fs::parse(text)
        } else if text.starts_with(v11::PREFIX) {
            v11::parse(text)
        } else if text.starts_with(uri::PREFIX) {
            uri::parse(text)
        } else {
            v11::parse(text)
        }
    }

    /// Parses a name by trying every binding grammar in turn.
    ///
    /// On failure the error lists every grammar's rejection reason.
    pub fn detect(text: &str) -> Result<Self, DetectError> {
        let grammars: [(Binding, fn(&str) -> Result<Name, ParseError>); 4] = [
            (Binding::WellFormed, wfn::parse),
            (Binding::FormattedString, fs::parse),
            (Binding::Uri, uri::parse),
            (Binding::V11Uri, v11::parse),
        ];
        let mut causes = Vec::new();
        for (binding, parse) in grammars {
            match parse(text) {
                Ok(name) => return Ok(name),
                Err(error) => causes.push((binding, error)),
            }
        }
        Err(DetectError { causes })
    }

    /// Returns the binding this name is expressed in.
    #[must_use]
    pub const fn binding(&self) -> Binding {
        self.binding
    }

    /// Returns the naming version of this name's binding.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.binding.version()
    }

    /// Returns the elements of this name.
    ///
    /// Names in 2.2 and 2.3 bindings have exactly one element.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Returns the value of the given attribute in every element.
    ///
    /// The result has one entry per element; only 1.1 names can yield more
    /// than one.
    #[must_use]
    pub fn get(&self, attribute: Attribute) -> Vec<&ComponentValue> {
        self.elements
            .iter()
            .map(|element| element.get(attribute))
            .collect()
    }

    /// Replaces the value of the given attribute with a freshly validated
    /// concrete value.
    ///
    /// The new value must be expressible in this name's binding: a wildcard
    /// `part` is only accepted in a WFN, and a 1.1 name accepts neither
    /// wildcards nor the extended 2.3 attributes. Names with more than one
    /// element do not support this operation.
    pub fn set(&mut self, attribute: Attribute, value: &str) -> Result<(), ValueError> {
        let new = ComponentValue::new(value, attribute)?;
        let invalid = || ValueError::InvalidValue {
            attribute,
            text: value.to_string(),
        };
        if let ComponentValue::Simple(simple) = &new {
            match self.binding {
                Binding::WellFormed => {}
                Binding::V11Uri => {
                    if simple.has_wildcard() {
                        return Err(invalid());
                    }
                    if attribute.is_extended() {
                        return Err(ValueError::UnsupportedOperation);
                    }
                }
                Binding::Uri | Binding::FormattedString => {
                    if attribute == Attribute::Part && simple.has_wildcard() {
                        return Err(invalid());
                    }
                }
            }
        }
        match self.elements.as_mut_slice() {
            [element] => {
                element.set(attribute, new);
                Ok(())
            }
            _ => Err(ValueError::UnsupportedOperation),
        }
    }

    /// Returns true if any element describes a hardware platform.
    #[must_use]
    pub fn is_hardware(&self) -> bool {
        self.elements.iter().any(|element| element.has_class("h"))
    }

    /// Returns true if any element describes an operating system.
    #[must_use]
    pub fn is_operating_system(&self) -> bool {
        self.elements.iter().any(|element| element.has_class("o"))
    }

    /// Returns true if any element describes an application.
    #[must_use]
    pub fn is_application(&self) -> bool {
        self.elements.iter().any(|element| element.has_class("a"))
    }
}

/// Names compare equal iff their canonical eleven-attribute forms agree,
/// regardless of the bindings they were parsed from.
impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.elements.len() == other.elements.len()
            && self
                .elements
                .iter()
                .zip(&other.elements)
                .all(|(a, b)| a.normalized() == b.normalized())
    }
}

impl Eq for Name {}

/// Emits the name in its own binding.
impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.binding {
            Binding::V11Uri => f.write_str(&v11::emit(&self.elements)),
            Binding::Uri => f.write_str(&uri::emit(&self.elements[0])),
            Binding::FormattedString => f.write_str(&fs::emit(&self.elements[0])),
            Binding::WellFormed => f.write_str(&wfn::emit(&self.elements[0])),
        }
    }
}

impl FromStr for Name {
    type Err = ParseError;
    fn from_str(text: &str) -> Result<Self, ParseError> {
        Name::parse(text)
    }
}
