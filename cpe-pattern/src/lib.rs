// This file is part of cpe-rs, a Common Platform Enumeration toolkit.
// Copyright (C) 2026 the cpe-rs authors

//! This crate performs wildcard matching for CPE attribute values.
//!
//! A CPE attribute value in its canonical form may contain two
//! metacharacters: `?` matches exactly one character and `*` matches any
//! sequence of characters including the empty one. Every other character
//! matches itself. A backslash makes the following character literal, so
//! `8\.*` consists of the literal `8`, the literal `.`, and the `*`
//! wildcard.
//!
//! A [`Pattern`] is parsed from a sequence of [`PatternChar`]s, which the
//! [`with_escape`] function produces from a backslash-escaped string. The
//! pattern is then matched against a plain (unescaped) string:
//!
//! ```
//! # use cpe_pattern::{Pattern, with_escape};
//! let pattern = Pattern::parse(with_escape(r"8\.*")).unwrap();
//! assert!(pattern.matches("8.1"));
//! assert!(pattern.matches("8."));
//! assert!(!pattern.matches("8_1"));
//! ```
//!
//! Matching always covers the whole subject string; there is no substring
//! search. Patterns that contain no wildcard are compared by plain string
//! equality without involving the regular expression engine.

pub mod ast;
mod char_iter;

pub use ast::{Ast, Atom};
pub use char_iter::{PatternChar, WithEscape, with_escape};

use regex::Regex;
use thiserror::Error;

/// Error returned when a pattern cannot be compiled
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The converted regular expression was rejected by the regex engine.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

/// Main part of a compiled [`Pattern`]
#[derive(Clone, Debug)]
enum Body {
    /// Pattern without any wildcard, compared by string equality
    Literal(String),
    /// Pattern compiled to a regular expression
    Regex(Regex),
}

/// Compiled wildcard pattern
///
/// A `Pattern` is created with [`parse`](Self::parse) and examined with
/// [`matches`](Self::matches).
#[derive(Clone, Debug)]
#[must_use = "creating a pattern without using it is nonsense"]
pub struct Pattern {
    body: Body,
}

impl Pattern {
    /// Compiles a pattern from pattern characters.
    pub fn parse<I>(pattern: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = PatternChar>,
    {
        let ast = Ast::new(pattern);
        let body = if let Some(literal) = ast.to_literal() {
            Body::Literal(literal)
        } else {
            Body::Regex(Regex::new(&ast.to_regex())?)
        };
        Ok(Pattern { body })
    }

    /// Returns true if this pattern contains no wildcard.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self.body, Body::Literal(_))
    }

    /// Returns the literal string matched by this pattern, if any.
    ///
    /// The result is `None` if the pattern contains a wildcard.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match &self.body {
            Body::Literal(s) => Some(s),
            Body::Regex(_) => None,
        }
    }

    /// Returns true if this pattern matches the whole of the given string.
    #[must_use]
    pub fn matches(&self, subject: &str) -> bool {
        match &self.body {
            Body::Literal(s) => s == subject,
            Body::Regex(regex) => regex.is_match(subject),
        }
    }
}
