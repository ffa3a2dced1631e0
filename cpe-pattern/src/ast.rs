// This file is part of cpe-rs, a Common Platform Enumeration toolkit.
// Copyright (C) 2026 the cpe-rs authors

//! Abstract syntax tree for wildcard patterns

use crate::PatternChar;
use regex_syntax::is_meta_character;

/// Pattern component
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Atom {
    /// Literal character
    Char(char),
    /// Wildcard that matches a single character (`?`)
    AnyChar,
    /// Wildcard that matches any string (`*`)
    AnyString,
}

impl From<PatternChar> for Atom {
    fn from(pc: PatternChar) -> Self {
        match pc {
            PatternChar::Normal('?') => Atom::AnyChar,
            PatternChar::Normal('*') => Atom::AnyString,
            pc => Atom::Char(pc.char_value()),
        }
    }
}

/// Abstract syntax tree for a whole pattern
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Ast {
    /// Content of the pattern
    pub atoms: Vec<Atom>,
}

impl Ast {
    /// Creates a pattern.
    #[inline]
    #[must_use]
    pub fn new<I>(pattern: I) -> Self
    where
        I: IntoIterator<Item = PatternChar>,
    {
        let atoms = pattern.into_iter().map(Atom::from).collect();
        Ast { atoms }
    }

    /// Returns the string this pattern matches literally.
    ///
    /// The result is `None` if the pattern contains a wildcard.
    #[must_use]
    pub fn to_literal(&self) -> Option<String> {
        self.atoms
            .iter()
            .map(|atom| match atom {
                Atom::Char(c) => Some(*c),
                Atom::AnyChar | Atom::AnyString => None,
            })
            .collect()
    }

    /// Converts the AST to a regular expression.
    ///
    /// The result is anchored on both ends so that the pattern matches whole
    /// strings only.
    #[must_use]
    pub fn to_regex(&self) -> String {
        let mut regex = String::with_capacity(self.atoms.len() + 4);
        regex.push_str(r"\A");
        for atom in &self.atoms {
            match atom {
                Atom::Char(c) => {
                    if is_meta_character(*c) {
                        regex.push('\\');
                    }
                    regex.push(*c);
                }
                Atom::AnyChar => regex.push('.'),
                Atom::AnyString => regex.push_str(".*"),
            }
        }
        regex.push_str(r"\z");
        regex
    }
}
