// This file is part of cpe-rs, a Common Platform Enumeration toolkit.
// Copyright (C) 2026 the cpe-rs authors

//! Conversion between bindings
//!
//! Every binding lowers to the same canonical value form at parse time, so
//! converting a name is a matter of checking that the target binding can
//! express its structure and re-emitting. Lifting to the WFN binding fills
//! the attributes a lower version lacks with `Any`; lowering fails with
//! [`Incompatible`] when the target cannot carry the name's structure: more
//! than one element, a wildcard `part`, or, for the 1.1 binding, wildcards,
//! `NotApplicable`, or the extended 2.3 attributes.

use crate::attribute::Attribute;
use crate::name::{Binding, Element, Name};
use crate::value::ComponentValue;
use crate::{fs, uri, v11, wfn};
use thiserror::Error;

/// Error returned when a name cannot be expressed in a requested binding
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum Incompatible {
    /// The name describes several elements and the target holds one.
    #[error("a name with {count} elements cannot be expressed as {target}")]
    MultipleElements {
        /// Number of elements in the source name
        count: usize,
        /// Requested binding
        target: Binding,
    },
    /// The part attribute holds a wildcard, which only a WFN can carry.
    #[error("a wildcard part cannot be expressed as {target}")]
    IndefinitePart {
        /// Requested binding
        target: Binding,
    },
    /// The part attribute names no concrete system class.
    #[error("the part attribute must name a system class to select a {target} slot")]
    UnknownClass {
        /// Requested binding
        target: Binding,
    },
    /// A value contains a wildcard the target grammar predates.
    #[error("the {attribute} value contains a wildcard, which {target} cannot express")]
    Wildcard {
        /// Attribute holding the wildcard
        attribute: Attribute,
        /// Requested binding
        target: Binding,
    },
    /// An attribute does not exist in the target version.
    #[error("the {attribute} attribute is not available in {target}")]
    ExtendedAttribute {
        /// Attribute absent from the target version
        attribute: Attribute,
        /// Requested binding
        target: Binding,
    },
    /// The target has no spelling for `NotApplicable`.
    #[error("a not-applicable {attribute} cannot be expressed in {target}")]
    NotApplicable {
        /// Attribute holding the value
        attribute: Attribute,
        /// Requested binding
        target: Binding,
    },
}

impl Name {
    /// Lifts this name to the canonical WFN binding.
    ///
    /// Attributes the source version lacks become `Any`, packed editions
    /// have already been unpacked at parse time, and escapes are already in
    /// the canonical convention. Fails when the name describes more than
    /// one element.
    pub fn to_wfn(&self) -> Result<Name, Incompatible> {
        let element = self.single_element(Binding::WellFormed)?;
        Ok(Name::with_binding(
            Binding::WellFormed,
            vec![element.normalized()],
        ))
    }

    /// Converts this name to the given binding.
    ///
    /// Converting to the name's own binding is the identity.
    pub fn to_binding(&self, target: Binding) -> Result<Name, Incompatible> {
        if self.binding() == target {
            return Ok(self.clone());
        }
        if target == Binding::WellFormed {
            return self.to_wfn();
        }
        let element = self.single_element(target)?.normalized();
        check_representable(&element, target)?;
        Ok(Name::with_binding(target, vec![element]))
    }

    /// Emits this name in the WFN binding.
    pub fn as_wfn(&self) -> Result<String, Incompatible> {
        let name = self.to_wfn()?;
        Ok(wfn::emit(&name.elements()[0]))
    }

    /// Emits this name in the formatted string binding.
    pub fn as_fs(&self) -> Result<String, Incompatible> {
        let name = self.to_binding(Binding::FormattedString)?;
        Ok(fs::emit(&name.elements()[0]))
    }

    /// Emits this name in the 2.2 URI binding, packing the extended
    /// attributes into the edition field when any of them holds a value.
    pub fn as_uri(&self) -> Result<String, Incompatible> {
        let name = self.to_binding(Binding::Uri)?;
        Ok(uri::emit(&name.elements()[0]))
    }

    /// Emits this name in the 1.1 URI binding.
    pub fn as_uri_1_1(&self) -> Result<String, Incompatible> {
        let name = self.to_binding(Binding::V11Uri)?;
        Ok(v11::emit(name.elements()))
    }

    fn single_element(&self, target: Binding) -> Result<&Element, Incompatible> {
        match self.elements() {
            [element] => Ok(element),
            elements => Err(Incompatible::MultipleElements {
                count: elements.len(),
                target,
            }),
        }
    }
}

fn check_representable(element: &Element, target: Binding) -> Result<(), Incompatible> {
    if let ComponentValue::Simple(part) = element.get(Attribute::Part) {
        if part.has_wildcard() {
            return Err(Incompatible::IndefinitePart { target });
        }
    }
    if target != Binding::V11Uri {
        return Ok(());
    }

    if !matches!(element.get(Attribute::Part), ComponentValue::Simple(_)) {
        return Err(Incompatible::UnknownClass { target });
    }
    for (attribute, value) in element.values() {
        match value {
            ComponentValue::Simple(simple) if simple.has_wildcard() => {
                return Err(Incompatible::Wildcard { attribute, target });
            }
            ComponentValue::Simple(_) if attribute.is_extended() => {
                return Err(Incompatible::ExtendedAttribute { attribute, target });
            }
            ComponentValue::NotApplicable => {
                return Err(Incompatible::NotApplicable { attribute, target });
            }
            _ => {}
        }
    }
    Ok(())
}
