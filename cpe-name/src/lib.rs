// This file is part of cpe-rs, a Common Platform Enumeration toolkit.
// Copyright (C) 2026 the cpe-rs authors

//! This crate parses, emits, and converts Common Platform Enumeration
//! names in their four textual bindings: the 1.1 URI, the 2.2 URI, the 2.3
//! formatted string, and the 2.3 well-formed name (WFN).
//!
//! Every parser lowers attribute values to one canonical form (see
//! [`value`]), so a name converts between bindings by re-emission rather
//! than by pairwise translation, and names parsed from different bindings
//! compare equal when they denote the same products:
//!
//! ```
//! # use cpe_name::Name;
//! let uri = Name::parse("cpe:/a:microsoft:ie:5.5").unwrap();
//! let fs = Name::parse("cpe:2.3:a:microsoft:ie:5.5:*:*:*:*:*:*:*").unwrap();
//! assert_eq!(uri, fs);
//! assert_eq!(
//!     uri.as_wfn().unwrap(),
//!     "wfn:[part=\"a\", vendor=\"microsoft\", product=\"ie\", version=\"5\\.5\", \
//!      update=ANY, edition=ANY, language=ANY, sw_edition=ANY, target_sw=ANY, \
//!      target_hw=ANY, other=ANY]"
//! );
//! ```
//!
//! Conversion fails with [`Incompatible`] when the target binding cannot
//! express the name, such as a multi-element 1.1 name in any 2.x binding.

pub mod attribute;
pub mod convert;
pub mod fs;
pub mod name;
pub mod uri;
pub mod v11;
pub mod value;
pub mod wfn;

pub use attribute::{Attribute, InvalidAttribute};
pub use convert::Incompatible;
pub use name::{Binding, DetectError, Element, Name, ParseError, Version};
pub use value::{ComponentValue, Simple, ValueError};
