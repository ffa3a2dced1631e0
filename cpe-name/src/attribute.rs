// This file is part of cpe-rs, a Common Platform Enumeration toolkit.
// Copyright (C) 2026 the cpe-rs authors

//! Attribute tags of a CPE name

use std::str::FromStr;
use thiserror::Error;

/// Name of one attribute slot in a CPE name
///
/// The first seven attributes exist in every CPE version. The last four were
/// introduced with version 2.3; in older names they are carried implicitly
/// (see [`ComponentValue::Undefined`](crate::ComponentValue::Undefined)).
///
/// The declaration order of the variants is the serialization order common to
/// all bindings, which [`Attribute::iter`] follows.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Attribute {
    /// System class: application, operating system, or hardware
    Part,
    /// Supplier or developer of the product
    Vendor,
    /// Product name
    Product,
    /// Version of the product
    Version,
    /// Update or service pack level
    Update,
    /// Edition of the product (legacy; superseded by the last four attributes)
    Edition,
    /// User interface language
    Language,
    /// Market or class of end users (2.3 only)
    SwEdition,
    /// Software environment the product runs in (2.3 only)
    TargetSw,
    /// Instruction set architecture the product runs on (2.3 only)
    TargetHw,
    /// Any other vendor- or product-specific descriptor (2.3 only)
    Other,
}

/// Error returned when a string is not a known attribute tag
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
#[error("unknown attribute tag {0:?}")]
pub struct InvalidAttribute(pub String);

impl FromStr for Attribute {
    type Err = InvalidAttribute;
    fn from_str(tag: &str) -> Result<Self, InvalidAttribute> {
        use Attribute::*;
        match tag {
            "part" => Ok(Part),
            "vendor" => Ok(Vendor),
            "product" => Ok(Product),
            "version" => Ok(Version),
            "update" => Ok(Update),
            "edition" => Ok(Edition),
            "language" => Ok(Language),
            "sw_edition" => Ok(SwEdition),
            "target_sw" => Ok(TargetSw),
            "target_hw" => Ok(TargetHw),
            "other" => Ok(Other),
            _ => Err(InvalidAttribute(tag.to_string())),
        }
    }
}

impl Attribute {
    /// Returns true if this attribute exists only in version 2.3 names.
    #[must_use]
    pub const fn is_extended(self) -> bool {
        use Attribute::*;
        matches!(self, SwEdition | TargetSw | TargetHw | Other)
    }

    /// Iterates over all attributes in serialization order.
    ///
    /// This is a convenience alias for the iterator produced by
    /// [`strum::IntoEnumIterator`].
    pub fn iter() -> impl Iterator<Item = Attribute> {
        <Self as strum::IntoEnumIterator>::iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for attribute in Attribute::iter() {
            let tag = attribute.to_string();
            assert_eq!(tag.parse::<Attribute>(), Ok(attribute));
        }
    }

    #[test]
    fn extended_tags_spell_with_underscores() {
        assert_eq!(Attribute::SwEdition.to_string(), "sw_edition");
        assert_eq!(Attribute::TargetSw.to_string(), "target_sw");
        assert_eq!(Attribute::TargetHw.to_string(), "target_hw");
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(
            "swedition".parse::<Attribute>(),
            Err(InvalidAttribute("swedition".to_string()))
        );
        assert_eq!(
            "Part".parse::<Attribute>(),
            Err(InvalidAttribute("Part".to_string()))
        );
    }

    #[test]
    fn serialization_order() {
        let order: Vec<Attribute> = Attribute::iter().collect();
        assert_eq!(order.len(), 11);
        assert_eq!(order[0], Attribute::Part);
        assert_eq!(order[6], Attribute::Language);
        assert_eq!(order[10], Attribute::Other);
        assert!(order[..7].iter().all(|a| !a.is_extended()));
        assert!(order[7..].iter().all(|a| a.is_extended()));
    }
}
