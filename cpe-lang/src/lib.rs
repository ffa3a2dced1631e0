// This file is part of cpe-rs, a Common Platform Enumeration toolkit.
// Copyright (C) 2026 the cpe-rs authors

//! This crate parses and evaluates applicability statements: boolean
//! expressions over CPE names that answer whether a described platform
//! matches a target system.
//!
//! A document contains one or more [`Platform`]s. Each platform owns an
//! optional title and one root [`LogicalTest`], a tree whose leaves are
//! fact references (names) and whose inner nodes combine children with
//! `AND` or `OR`, optionally negated. Two document formats are supported:
//!
//! - the platform-specification XML of the CPE applicability language
//!   (namespace `http://cpe.mitre.org/language/2.0`), via
//!   [`PlatformSpecification::from_xml`], and
//! - the JSON node shape used by the National Vulnerability Database, via
//!   [`PlatformSpecification::from_json`].
//!
//! Evaluation is pure: a fact reference is true iff the known-instance set
//! covers its name, children evaluate left to right with short-circuiting,
//! and a document is satisfied iff any of its platforms is.
//!
//! ```
//! # use cpe_lang::PlatformSpecification;
//! # use cpe_match::NameSet;
//! # use cpe_name::Name;
//! let document = PlatformSpecification::from_xml(r#"
//!     <cpe:platform-specification xmlns:cpe="http://cpe.mitre.org/language/2.0">
//!       <cpe:platform id="1">
//!         <cpe:title>Weblogic 8.1 on Solaris</cpe:title>
//!         <cpe:logical-test operator="AND" negate="FALSE">
//!           <cpe:fact-ref name="cpe:/o:sun:solaris:5.9"/>
//!           <cpe:fact-ref name="cpe:/a:bea:weblogic:8.1"/>
//!         </cpe:logical-test>
//!       </cpe:platform>
//!     </cpe:platform-specification>"#)
//! .unwrap();
//!
//! let known: NameSet = [
//!     Name::parse("cpe:/o:sun:solaris:5.9").unwrap(),
//!     Name::parse("cpe:/a:bea:weblogic:8.1").unwrap(),
//! ]
//! .into_iter()
//! .collect();
//! assert!(document.evaluate(&known));
//! ```

mod json;
mod xml;

use cpe_match::NameSet;
use cpe_name::{Name, ParseError};
use std::path::Path;
use thiserror::Error;

/// Error in parsing an applicability document
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum ExpressionError {
    /// The XML is not well-formed.
    #[error("malformed XML: {0}")]
    Xml(String),
    /// The JSON does not have the expected shape.
    #[error("malformed JSON: {0}")]
    Json(String),
    /// A logical test names no operator at all.
    #[error("a logical test names no operator")]
    MissingOperator,
    /// A logical test names an operator other than `AND` or `OR`.
    #[error("unknown operator {0:?}")]
    UnknownOperator(String),
    /// A negation flag is neither `TRUE` nor `FALSE`.
    #[error("invalid negation flag {0:?}")]
    InvalidNegation(String),
    /// A logical test has no operand.
    #[error("a logical test has no operand")]
    MissingOperands,
    /// A fact reference carries no name.
    #[error("a fact reference carries no name")]
    MissingName,
    /// A fact reference carries a name that does not parse.
    #[error("invalid name in fact reference: {0}")]
    InvalidName(#[from] ParseError),
    /// A platform has no root logical test.
    #[error("a platform has no logical test")]
    MissingTest,
    /// A platform has more than one root logical test.
    #[error("a platform has more than one root logical test")]
    MultipleTests,
    /// A structural element appears outside its allowed parent.
    #[error("element {0:?} is not allowed here")]
    MisplacedElement(String),
    /// A file could not be read.
    #[error("cannot read {path:?}: {message}")]
    Io {
        /// Path of the file
        path: String,
        /// Description of the failure
        message: String,
    },
}

/// Operator combining the operands of a logical test
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operator {
    /// True iff every operand is true
    And,
    /// True iff any operand is true
    Or,
}

impl Operator {
    /// Parses an operator keyword, ignoring case.
    pub(crate) fn parse(text: &str) -> Result<Self, ExpressionError> {
        if text.eq_ignore_ascii_case("AND") {
            Ok(Operator::And)
        } else if text.eq_ignore_ascii_case("OR") {
            Ok(Operator::Or)
        } else {
            Err(ExpressionError::UnknownOperator(text.to_string()))
        }
    }
}

/// One operand of a logical test
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Operand {
    /// Reference to a name; true iff the known set covers it
    FactRef(Name),
    /// Nested logical test
    Test(LogicalTest),
}

impl Operand {
    /// Evaluates this operand against the known-instance set.
    #[must_use]
    pub fn evaluate(&self, known: &NameSet) -> bool {
        match self {
            Operand::FactRef(name) => known.matches(name),
            Operand::Test(test) => test.evaluate(known),
        }
    }
}

/// Boolean combination of operands
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogicalTest {
    /// How the operands combine
    pub operator: Operator,
    /// Whether the combined result is inverted
    pub negate: bool,
    /// Operands in document order
    pub operands: Vec<Operand>,
}

impl LogicalTest {
    /// Evaluates this test against the known-instance set.
    ///
    /// Operands evaluate left to right; `AND` stops at the first false
    /// operand and `OR` at the first true one.
    #[must_use]
    pub fn evaluate(&self, known: &NameSet) -> bool {
        let combined = match self.operator {
            Operator::And => self.operands.iter().all(|operand| operand.evaluate(known)),
            Operator::Or => self.operands.iter().any(|operand| operand.evaluate(known)),
        };
        combined != self.negate
    }
}

/// One platform description within a document
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Platform {
    /// Identifier from the document, if any
    pub id: Option<String>,
    /// Human-readable title, if any (the first one when the document
    /// carries several language variants)
    pub title: Option<String>,
    /// Root logical test
    pub test: LogicalTest,
}

impl Platform {
    /// Evaluates this platform's root test against the known-instance set.
    #[must_use]
    pub fn evaluate(&self, known: &NameSet) -> bool {
        self.test.evaluate(known)
    }
}

/// Parsed applicability document
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PlatformSpecification {
    /// Platforms in document order
    pub platforms: Vec<Platform>,
}

impl PlatformSpecification {
    /// Parses a platform-specification XML document.
    pub fn from_xml(text: &str) -> Result<Self, ExpressionError> {
        xml::parse(text)
    }

    /// Parses the NVD JSON configuration shape.
    pub fn from_json(text: &str) -> Result<Self, ExpressionError> {
        json::parse(text)
    }

    /// Reads and parses a platform-specification XML file.
    ///
    /// The file handle is released before this function returns.
    pub fn from_xml_file<P: AsRef<Path>>(path: P) -> Result<Self, ExpressionError> {
        Self::from_xml(&read(path.as_ref())?)
    }

    /// Reads and parses an NVD JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ExpressionError> {
        Self::from_json(&read(path.as_ref())?)
    }

    /// Evaluates the document against the known-instance set.
    ///
    /// The document is satisfied iff at least one platform evaluates true;
    /// a document without platforms is never satisfied.
    #[must_use]
    pub fn evaluate(&self, known: &NameSet) -> bool {
        self.platforms.iter().any(|platform| platform.evaluate(known))
    }
}

fn read(path: &Path) -> Result<String, ExpressionError> {
    std::fs::read_to_string(path).map_err(|error| ExpressionError::Io {
        path: path.display().to_string(),
        message: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(names: &[&str]) -> NameSet {
        names.iter().map(|text| Name::parse(text).unwrap()).collect()
    }

    fn fact(text: &str) -> Operand {
        Operand::FactRef(Name::parse(text).unwrap())
    }

    #[test]
    fn fact_ref_consults_the_known_set() {
        let operand = fact("cpe:/a:bea:weblogic:8.1");
        assert!(operand.evaluate(&known(&["cpe:/a:bea:weblogic:8.1"])));
        assert!(!operand.evaluate(&known(&["cpe:/a:bea:weblogic:9.0"])));
    }

    #[test]
    fn and_or_combine_operands() {
        let k = known(&["cpe:/o:sun:solaris:5.9", "cpe:/a:bea:weblogic:8.1"]);
        let both = LogicalTest {
            operator: Operator::And,
            negate: false,
            operands: vec![fact("cpe:/o:sun:solaris:5.9"), fact("cpe:/a:bea:weblogic:8.1")],
        };
        assert!(both.evaluate(&k));

        let either = LogicalTest {
            operator: Operator::Or,
            negate: false,
            operands: vec![fact("cpe:/o:sun:solaris:5.8"), fact("cpe:/o:sun:solaris:5.9")],
        };
        assert!(either.evaluate(&k));

        let neither = LogicalTest {
            operator: Operator::And,
            negate: false,
            operands: vec![fact("cpe:/o:sun:solaris:5.8"), fact("cpe:/o:sun:solaris:5.9")],
        };
        assert!(!neither.evaluate(&k));
    }

    #[test]
    fn negate_inverts_the_test() {
        let k = known(&["cpe:/a:bea:weblogic:8.1"]);
        let mut test = LogicalTest {
            operator: Operator::Or,
            negate: false,
            operands: vec![fact("cpe:/a:bea:weblogic:8.1")],
        };
        assert!(test.evaluate(&k));
        test.negate = true;
        assert!(!test.evaluate(&k));
    }

    #[test]
    fn nested_tests_evaluate_recursively() {
        // AND(OR(solaris 5.8, solaris 5.9), weblogic 8.1)
        let test = LogicalTest {
            operator: Operator::And,
            negate: false,
            operands: vec![
                Operand::Test(LogicalTest {
                    operator: Operator::Or,
                    negate: false,
                    operands: vec![
                        fact("cpe:/o:sun:solaris:5.8"),
                        fact("cpe:/o:sun:solaris:5.9"),
                    ],
                }),
                fact("cpe:/a:bea:weblogic:8.1"),
            ],
        };
        assert!(test.evaluate(&known(&["cpe:/o:sun:solaris:5.9", "cpe:/a:bea:weblogic:8.1"])));
        assert!(!test.evaluate(&known(&["cpe:/o:sun:solaris:5.7", "cpe:/a:bea:weblogic:8.1"])));
        assert!(!test.evaluate(&known(&["cpe:/o:sun:solaris:5.9"])));
    }

    #[test]
    fn document_without_platforms_is_never_satisfied() {
        let document = PlatformSpecification::default();
        assert!(!document.evaluate(&known(&["cpe:/a:bea:weblogic:8.1"])));
    }

    #[test]
    fn any_satisfied_platform_satisfies_the_document() {
        let platform = |text: &str| Platform {
            id: None,
            title: None,
            test: LogicalTest {
                operator: Operator::Or,
                negate: false,
                operands: vec![fact(text)],
            },
        };
        let document = PlatformSpecification {
            platforms: vec![
                platform("cpe:/a:bea:weblogic:9.0"),
                platform("cpe:/a:bea:weblogic:8.1"),
            ],
        };
        assert!(document.evaluate(&known(&["cpe:/a:bea:weblogic:8.1"])));
        assert!(!document.evaluate(&known(&["cpe:/a:bea:weblogic:7.0"])));
    }

    #[test]
    fn wildcard_fact_refs_match_concrete_instances() {
        let operand = fact("cpe:2.3:a:bea:weblogic:8.*:*:*:*:*:*:*:*");
        assert!(operand.evaluate(&known(&["cpe:2.3:a:bea:weblogic:8.1:*:*:*:*:*:*:*"])));
        assert!(!operand.evaluate(&known(&["cpe:2.3:a:bea:weblogic:9.0:*:*:*:*:*:*:*"])));
    }
}
