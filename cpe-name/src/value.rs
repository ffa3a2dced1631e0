// This file is part of cpe-rs, a Common Platform Enumeration toolkit.
// Copyright (C) 2026 the cpe-rs authors

//! Component values occupying the attribute slots of a name
//!
//! A [`ComponentValue`] is either a concrete string ([`Simple`]) or one of
//! the logical values `Any`, `NotApplicable`, `Undefined`, and `Empty`.
//!
//! Concrete values are stored in the canonical form shared by all bindings:
//! alphanumerics and `_` appear bare, every other punctuation character is
//! backslash-escaped, and a bare `?` or `*` is a wildcard. The parsers in
//! [`wfn`](crate::wfn), [`uri`](crate::uri), [`fs`](crate::fs), and
//! [`v11`](crate::v11) lower their respective escape conventions to this
//! form, and the emitters raise it back, so a value decodes to the same
//! canonical form regardless of the binding it came from.

use crate::attribute::{Attribute, InvalidAttribute};
use cpe_pattern::{Pattern, PatternChar, with_escape};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Error in the construction or use of a component value
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum ValueError {
    /// An attribute tag is not one of the known attributes.
    #[error(transparent)]
    InvalidAttribute(#[from] InvalidAttribute),

    /// A value does not conform to the grammar of its attribute.
    #[error("invalid value {text:?} for attribute {attribute}")]
    InvalidValue {
        /// Attribute the value was validated against
        attribute: Attribute,
        /// Offending value in canonical form
        text: String,
    },

    /// The requested operation is meaningful only for concrete values.
    #[error("unsupported operation on a logical value")]
    UnsupportedOperation,
}

/// Grammar of the `language` attribute: a two- or three-letter language
/// subtag, optionally followed by an escaped hyphen and a region subtag of
/// two letters or three digits. A wildcard may replace either subtag.
static LANGUAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z]{2,3}|\*|\?{2,3})(?:\\-(?:[A-Za-z]{2}|[0-9]{3}|\*|\?{2,3}))?$")
        .unwrap()
});

/// Checks a canonical value against the general attribute grammar.
///
/// The grammar permits bare alphanumerics and `_`, backslash-escaped
/// punctuation, a wildcard prefix (one `*` or a run of `?`), and a wildcard
/// suffix of the same shape. Wildcards anywhere else are rejected, as is a
/// value consisting of two wildcard groups with nothing in between.
fn conforms_to_general_grammar(text: &str) -> bool {
    // A trailing unpaired backslash escapes nothing.
    let trailing_backslashes = text.chars().rev().take_while(|&c| c == '\\').count();
    if trailing_backslashes % 2 != 0 {
        return false;
    }

    let chars: Vec<PatternChar> = with_escape(text).collect();
    if chars.is_empty() {
        return false;
    }
    let permitted = chars.iter().all(|pc| match *pc {
        PatternChar::Normal(c) => c.is_ascii_alphanumeric() || matches!(c, '_' | '?' | '*'),
        PatternChar::Literal(c) => c.is_ascii_punctuation(),
    });
    if !permitted {
        return false;
    }

    // Strip the wildcard prefix and suffix; what remains must be free of
    // wildcards, and the two groups may not abut.
    let count = chars.len();
    let mut start = 0;
    match chars[0] {
        PatternChar::Normal('*') => start = 1,
        PatternChar::Normal('?') => {
            while start < count && chars[start] == PatternChar::Normal('?') {
                start += 1;
            }
        }
        _ => {}
    }
    let mut end = count;
    if end > start {
        match chars[end - 1] {
            PatternChar::Normal('*') => end -= 1,
            PatternChar::Normal('?') => {
                while end > start && chars[end - 1] == PatternChar::Normal('?') {
                    end -= 1;
                }
            }
            _ => {}
        }
    }
    if start == end && start > 0 && end < count {
        return false;
    }
    chars[start..end].iter().all(|pc| !pc.is_wildcard())
}

fn conforms(text: &str, attribute: Attribute) -> bool {
    match attribute {
        Attribute::Part => matches!(text, "a" | "o" | "h" | "?"),
        Attribute::Language => LANGUAGE.is_match(text),
        _ => conforms_to_general_grammar(text),
    }
}

/// Concrete component value
///
/// A `Simple` pairs an attribute tag with a value in canonical form. Two
/// `Simple`s are equal iff both the attribute and the canonical form agree.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Simple {
    attribute: Attribute,
    value: String,
}

impl Simple {
    /// Creates a concrete value, validating it against the attribute grammar.
    ///
    /// The stored form is normalized so that equal values have equal
    /// spellings: an escape on `_` (the one character that is valid both
    /// bare and escaped) is dropped.
    pub fn new(value: &str, attribute: Attribute) -> Result<Self, ValueError> {
        if conforms(value, attribute) {
            let mut normalized = String::with_capacity(value.len());
            for pc in with_escape(value) {
                match pc {
                    PatternChar::Literal('_') | PatternChar::Normal(_) => {}
                    PatternChar::Literal(_) => normalized.push('\\'),
                }
                normalized.push(pc.char_value());
            }
            Ok(Simple {
                attribute,
                value: normalized,
            })
        } else {
            Err(ValueError::InvalidValue {
                attribute,
                text: value.to_string(),
            })
        }
    }

    /// Returns the attribute this value belongs to.
    #[must_use]
    pub const fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// Returns the value in canonical form.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the value with all escapes removed.
    ///
    /// Wildcards become ordinary characters in the result, so this is the
    /// form a value takes when it is the subject of a match rather than the
    /// pattern.
    #[must_use]
    pub fn unescaped(&self) -> String {
        with_escape(&self.value).map(PatternChar::char_value).collect()
    }

    /// Returns true if the value contains a `?` or `*` wildcard.
    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        with_escape(&self.value).any(PatternChar::is_wildcard)
    }

    /// Returns true if this value, read as a wildcard pattern, covers the
    /// whole of the other value's unescaped text.
    ///
    /// Values of different attributes never contain one another.
    #[must_use]
    pub fn contains(&self, other: &Simple) -> bool {
        self.attribute == other.attribute
            && match Pattern::parse(with_escape(&self.value)) {
                Ok(pattern) => pattern.matches(&other.unescaped()),
                Err(_) => false,
            }
    }
}

/// Value occupying one attribute slot
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ComponentValue {
    /// Concrete string value
    Simple(Simple),
    /// Matches any value
    Any,
    /// The attribute does not apply to the product
    NotApplicable,
    /// No value was provided; behaves as [`Any`](Self::Any) in matching
    Undefined,
    /// Absent field in a URI; behaves as [`Any`](Self::Any) in matching
    Empty,
}

impl ComponentValue {
    /// Creates a concrete value, validating it against the attribute grammar.
    pub fn new(value: &str, attribute: Attribute) -> Result<Self, ValueError> {
        Simple::new(value, attribute).map(ComponentValue::Simple)
    }

    /// Returns true if this is a logical value rather than a concrete one.
    #[must_use]
    pub const fn is_logical(&self) -> bool {
        !matches!(self, ComponentValue::Simple(_))
    }

    /// Returns true if this value matches anything.
    ///
    /// `Undefined` and `Empty` behave as `Any` on either side of a match,
    /// so all three answer true here.
    #[must_use]
    pub const fn is_any_equivalent(&self) -> bool {
        use ComponentValue::*;
        matches!(self, Any | Undefined | Empty)
    }

    /// Returns the concrete value, or `UnsupportedOperation` for a logical
    /// value.
    pub fn as_simple(&self) -> Result<&Simple, ValueError> {
        match self {
            ComponentValue::Simple(simple) => Ok(simple),
            _ => Err(ValueError::UnsupportedOperation),
        }
    }

    /// Replaces this value with a freshly validated concrete value.
    pub fn set(&mut self, value: &str, attribute: Attribute) -> Result<(), ValueError> {
        *self = Self::new(value, attribute)?;
        Ok(())
    }

    /// Emits this value in the WFN convention: a quoted canonical string,
    /// `ANY`, or `NA`.
    #[must_use]
    pub fn as_wfn(&self) -> String {
        crate::wfn::encode_value(self)
    }

    /// Emits this value as a 2.2 URI field with percent escapes.
    #[must_use]
    pub fn as_uri(&self) -> String {
        crate::uri::encode_value(self)
    }

    /// Emits this value as a formatted string field.
    #[must_use]
    pub fn as_fs(&self) -> String {
        crate::fs::encode_value(self)
    }

    /// The matching subset relation over component values.
    ///
    /// - `Any` (and its equivalents `Undefined` and `Empty`) contains every
    ///   value.
    /// - `NotApplicable` contains only `NotApplicable`.
    /// - A concrete value contains another concrete value iff its wildcard
    ///   pattern covers the other's unescaped text; it contains no logical
    ///   value.
    ///
    /// This relation never fails: incomparable operands are simply not in
    /// the relation.
    #[must_use]
    pub fn contains(&self, other: &ComponentValue) -> bool {
        use ComponentValue::*;
        match (self, other) {
            (Any | Undefined | Empty, _) => true,
            (NotApplicable, other) => matches!(other, NotApplicable),
            (Simple(a), Simple(b)) => a.contains(b),
            (Simple(_), _) => false,
        }
    }
}

impl From<Simple> for ComponentValue {
    fn from(simple: Simple) -> Self {
        ComponentValue::Simple(simple)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn simple(value: &str, attribute: Attribute) -> ComponentValue {
        ComponentValue::new(value, attribute).unwrap()
    }

    fn vendor(value: &str) -> ComponentValue {
        simple(value, Attribute::Vendor)
    }

    #[test]
    fn plain_values_are_accepted() {
        simple("microsoft", Attribute::Vendor);
        simple("insight_diagnostics", Attribute::Product);
        simple(r"7\.4\.0\.1570", Attribute::Version);
        simple("x32", Attribute::TargetHw);
        simple("SP1", Attribute::Update);
    }

    #[test]
    fn bare_punctuation_is_rejected() {
        for text in ["a!b", "a|b", "a@b", "a~b", "a#b", "a.b", "a-b", "a b"] {
            assert_matches!(
                ComponentValue::new(text, Attribute::Vendor),
                Err(ValueError::InvalidValue { attribute: Attribute::Vendor, .. }),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn escaped_punctuation_is_accepted() {
        simple(r"a\!b", Attribute::Vendor);
        simple(r"a\~b", Attribute::Vendor);
        simple(r"a\\b", Attribute::Vendor);
        simple(r"sp\?", Attribute::Update);
    }

    #[test]
    fn escaped_alphanumerics_are_rejected() {
        assert_matches!(
            ComponentValue::new(r"a\bc", Attribute::Vendor),
            Err(ValueError::InvalidValue { .. })
        );
    }

    #[test]
    fn empty_value_is_rejected() {
        assert_matches!(
            ComponentValue::new("", Attribute::Vendor),
            Err(ValueError::InvalidValue { .. })
        );
    }

    #[test]
    fn trailing_backslash_is_rejected() {
        assert_matches!(
            ComponentValue::new("a\\", Attribute::Vendor),
            Err(ValueError::InvalidValue { .. })
        );
        simple(r"a\\", Attribute::Vendor);
    }

    #[test]
    fn wildcards_at_the_edges_are_accepted() {
        vendor("*");
        vendor("?");
        vendor("???");
        vendor("*soft");
        vendor("micro*");
        vendor("*cro*");
        vendor("??soft??");
        simple(r"8\.*", Attribute::Version);
    }

    #[test]
    fn wildcards_in_the_middle_are_rejected() {
        for text in ["mi*soft", "mi?soft", "m*s*t", "?*", "*?", "**", "*??"] {
            assert_matches!(
                ComponentValue::new(text, Attribute::Vendor),
                Err(ValueError::InvalidValue { .. }),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn part_accepts_class_tags_only() {
        simple("a", Attribute::Part);
        simple("o", Attribute::Part);
        simple("h", Attribute::Part);
        simple("?", Attribute::Part);
        for text in ["j", "x", "ao", "*", "A"] {
            assert_matches!(
                ComponentValue::new(text, Attribute::Part),
                Err(ValueError::InvalidValue { attribute: Attribute::Part, .. }),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn language_subtags() {
        simple("en", Attribute::Language);
        simple("spa", Attribute::Language);
        simple(r"en\-us", Attribute::Language);
        simple(r"es\-419", Attribute::Language);
        simple("*", Attribute::Language);
        simple(r"en\-*", Attribute::Language);
        simple(r"*\-us", Attribute::Language);
        simple(r"??\-us", Attribute::Language);
        for text in ["e", "engl", "en-us", r"en\-u", r"en\-4199", r"en\-?"] {
            assert_matches!(
                ComponentValue::new(text, Attribute::Language),
                Err(ValueError::InvalidValue { attribute: Attribute::Language, .. }),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn escaped_underscore_normalizes_to_bare() {
        assert_eq!(vendor(r"a\_b"), vendor("a_b"));
        assert_eq!(vendor(r"a\_b").as_simple().unwrap().value(), "a_b");
        // The escape belongs to the backslash here, so the underscore is
        // already bare and the value is unchanged.
        assert_eq!(vendor(r"a\\_b").as_simple().unwrap().value(), r"a\\_b");
    }

    #[test]
    fn unescaped_strips_escapes() {
        let v = Simple::new(r"8\.*", Attribute::Version).unwrap();
        assert_eq!(v.unescaped(), "8.*");
        assert!(v.has_wildcard());

        let v = Simple::new(r"sp\?", Attribute::Update).unwrap();
        assert_eq!(v.unescaped(), "sp?");
        assert!(!v.has_wildcard());
    }

    #[test]
    fn any_contains_everything() {
        use ComponentValue::*;
        for other in [
            Any,
            NotApplicable,
            Undefined,
            Empty,
            vendor("microsoft"),
            vendor("*"),
        ] {
            assert!(Any.contains(&other));
            assert!(Undefined.contains(&other));
            assert!(Empty.contains(&other));
        }
    }

    #[test]
    fn not_applicable_contains_only_itself() {
        use ComponentValue::*;
        assert!(NotApplicable.contains(&NotApplicable));
        assert!(!NotApplicable.contains(&Any));
        assert!(!NotApplicable.contains(&Undefined));
        assert!(!NotApplicable.contains(&Empty));
        assert!(!NotApplicable.contains(&vendor("microsoft")));
        assert!(Any.contains(&NotApplicable));
        assert!(!vendor("microsoft").contains(&NotApplicable));
        assert!(!vendor("*").contains(&NotApplicable));
    }

    #[test]
    fn simple_containment_is_reflexive() {
        for text in ["microsoft", r"8\.1", "*", "?", r"sp\?"] {
            let v = vendor(text);
            assert!(v.contains(&v), "{text:?} should contain itself");
        }
    }

    #[test]
    fn wildcard_pattern_containment() {
        assert!(vendor("micro*").contains(&vendor("microsoft")));
        assert!(vendor("*").contains(&vendor("microsoft")));
        assert!(!vendor("microsoft").contains(&vendor("micro*")));
        assert!(!vendor("micro*").contains(&vendor("mic")));

        let pattern = simple(r"8\.*", Attribute::Version);
        assert!(pattern.contains(&simple(r"8\.1", Attribute::Version)));
        assert!(pattern.contains(&simple(r"8\.1\.6", Attribute::Version)));
        assert!(!pattern.contains(&simple("9", Attribute::Version)));

        let one = simple("sp?", Attribute::Update);
        assert!(one.contains(&simple("sp1", Attribute::Update)));
        assert!(!one.contains(&simple("sp10", Attribute::Update)));
    }

    #[test]
    fn escaped_wildcards_match_literally() {
        let literal = simple(r"sp\?", Attribute::Update);
        assert!(!literal.contains(&simple("sp1", Attribute::Update)));
        let v = simple("sp?", Attribute::Update);
        assert!(v.contains(&literal));
    }

    #[test]
    fn different_attributes_never_contain_each_other() {
        let vendor = simple("microsoft", Attribute::Vendor);
        let product = simple("microsoft", Attribute::Product);
        assert!(!vendor.contains(&product));
        assert!(!product.contains(&vendor));
    }

    #[test]
    fn simple_does_not_contain_logical_values() {
        use ComponentValue::*;
        let v = vendor("*");
        assert!(!v.contains(&Any));
        assert!(!v.contains(&Undefined));
        assert!(!v.contains(&Empty));
    }

    #[test]
    fn as_simple_on_logical_value_fails() {
        use ComponentValue::*;
        assert_matches!(Any.as_simple(), Err(ValueError::UnsupportedOperation));
        assert_matches!(
            NotApplicable.as_simple(),
            Err(ValueError::UnsupportedOperation)
        );
        let v = vendor("microsoft");
        assert_eq!(v.as_simple().unwrap().value(), "microsoft");
    }

    #[test]
    fn per_binding_emission() {
        let v = simple(r"8\.*", Attribute::Version);
        assert_eq!(v.as_wfn(), "\"8\\.*\"");
        assert_eq!(v.as_uri(), "8.%02");
        assert_eq!(v.as_fs(), "8.*");

        use ComponentValue::*;
        assert_eq!(Any.as_wfn(), "ANY");
        assert_eq!(Any.as_uri(), "");
        assert_eq!(Any.as_fs(), "*");
        assert_eq!(NotApplicable.as_wfn(), "NA");
        assert_eq!(NotApplicable.as_uri(), "-");
        assert_eq!(NotApplicable.as_fs(), "-");
        assert_eq!(Undefined.as_wfn(), "ANY");
        assert_eq!(Empty.as_fs(), "*");
    }

    #[test]
    fn set_replaces_after_validation() {
        let mut v = vendor("microsoft");
        v.set("hp", Attribute::Vendor).unwrap();
        assert_eq!(v, vendor("hp"));

        let error = v.set("h p", Attribute::Vendor).unwrap_err();
        assert_matches!(error, ValueError::InvalidValue { .. });
        assert_eq!(v, vendor("hp"));
    }
}
