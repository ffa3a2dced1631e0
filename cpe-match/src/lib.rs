// This file is part of cpe-rs, a Common Platform Enumeration toolkit.
// Copyright (C) 2026 the cpe-rs authors

//! This crate decides whether a candidate name matches a set of known
//! names.
//!
//! The primitive relation is [`covers`]: a name covers an instance iff for
//! every attribute, each of the instance's values is contained by some
//! value of the name (see
//! [`ComponentValue::contains`](cpe_name::ComponentValue::contains)). A
//! candidate matches a [`NameSet`] iff the candidate covers at least one
//! known instance: the candidate is the general side (it may carry
//! wildcards and absent attributes), while the known names describe the
//! concrete products of a target system.
//!
//! Names of different versions compare in their canonical
//! eleven-attribute forms, where the attributes a lower version lacks
//! match as `Any`, so a 2.2 name and a 2.3 name can cover one another
//! without any explicit conversion step. Matching never fails:
//! incomparable names are simply not in the relation.
//!
//! ```
//! # use cpe_match::NameSet;
//! # use cpe_name::Name;
//! let known: NameSet = [
//!     Name::parse("cpe:/o:microsoft:windows_2000::sp3:pro").unwrap(),
//!     Name::parse("cpe:/a:microsoft:ie:5.5").unwrap(),
//! ]
//! .into_iter()
//! .collect();
//!
//! let candidate = Name::parse("cpe:/o:microsoft:windows_2000").unwrap();
//! assert!(known.matches(&candidate));
//! assert!(!known.matches(&Name::parse("cpe:/a:microsoft:ie:6.0").unwrap()));
//! ```

use cpe_name::{Attribute, Name};

/// Returns true if the name covers the instance.
///
/// For each attribute, every value of the instance must be contained by
/// some value of the name. Only multi-element 1.1 names have more than one
/// value per attribute; for everything else this degenerates to a pairwise
/// component check.
#[must_use]
pub fn covers(name: &Name, instance: &Name) -> bool {
    Attribute::iter().all(|attribute| {
        let name_values = name.get(attribute);
        instance
            .get(attribute)
            .iter()
            .all(|value| name_values.iter().any(|n| n.contains(value)))
    })
}

/// Set of known names describing the products of a target system
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NameSet {
    names: Vec<Name>,
}

impl NameSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        NameSet { names: Vec::new() }
    }

    /// Adds a known name to the set.
    pub fn insert(&mut self, name: Name) {
        self.names.push(name);
    }

    /// Returns true if the candidate covers any known name.
    ///
    /// The scan stops at the first covered name. Adding names to the set
    /// can only grow the set of matching candidates.
    #[must_use]
    pub fn matches(&self, candidate: &Name) -> bool {
        self.names.iter().any(|known| covers(candidate, known))
    }

    /// Returns every known name the candidate covers.
    #[must_use]
    pub fn matching_names(&self, candidate: &Name) -> Vec<&Name> {
        self.names
            .iter()
            .filter(|known| covers(candidate, known))
            .collect()
    }

    /// Iterates over the known names.
    pub fn iter(&self) -> std::slice::Iter<'_, Name> {
        self.names.iter()
    }

    /// Returns the number of known names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the set holds no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<Vec<Name>> for NameSet {
    fn from(names: Vec<Name>) -> Self {
        NameSet { names }
    }
}

impl FromIterator<Name> for NameSet {
    fn from_iter<I: IntoIterator<Item = Name>>(iter: I) -> Self {
        NameSet {
            names: iter.into_iter().collect(),
        }
    }
}

impl Extend<Name> for NameSet {
    fn extend<I: IntoIterator<Item = Name>>(&mut self, iter: I) {
        self.names.extend(iter);
    }
}

impl<'a> IntoIterator for &'a NameSet {
    type Item = &'a Name;
    type IntoIter = std::slice::Iter<'a, Name>;
    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

impl IntoIterator for NameSet {
    type Item = Name;
    type IntoIter = std::vec::IntoIter<Name>;
    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(text: &str) -> Name {
        Name::parse(text).unwrap()
    }

    #[test]
    fn covering_is_reflexive() {
        let n = name("cpe:/a:microsoft:ie:5.5");
        assert!(covers(&n, &n));
    }

    #[test]
    fn absent_attributes_cover_concrete_ones() {
        let broad = name("cpe:/o:microsoft:windows_2000");
        let narrow = name("cpe:/o:microsoft:windows_2000::sp3:pro");
        assert!(covers(&broad, &narrow));
        assert!(!covers(&narrow, &broad));
    }

    #[test]
    fn wildcard_versions_cover_their_instances() {
        let pattern = name("cpe:2.3:a:bea:weblogic:8.*:*:*:*:*:*:*:*");
        let instance = name("cpe:2.3:a:bea:weblogic:8.1:*:*:*:*:*:*:*");
        assert!(covers(&pattern, &instance));
        assert!(!covers(&instance, &pattern));
    }

    #[test]
    fn versions_mix_in_the_relation() {
        let uri = name("cpe:/a:bea:weblogic:8.1");
        let formatted = name("cpe:2.3:a:bea:weblogic:8.1:*:*:*:*:*:*:*");
        assert!(covers(&uri, &formatted));
        assert!(covers(&formatted, &uri));

        // The 2.2 name's absent attributes cover anything, while its
        // concrete values are not covered by a narrower 2.3 name.
        let narrow = name("cpe:2.3:a:bea:weblogic:8.1:*:*:*:*:win2003:*:*");
        assert!(covers(&uri, &narrow));
        assert!(!covers(&narrow, &uri));
    }

    #[test]
    fn not_applicable_is_covered_only_by_itself_and_any() {
        let na = name("cpe:2.3:a:bea:weblogic:8.1:-:*:*:*:*:*:*");
        let any = name("cpe:2.3:a:bea:weblogic:8.1:*:*:*:*:*:*:*");
        let concrete = name("cpe:2.3:a:bea:weblogic:8.1:sp2:*:*:*:*:*:*");
        assert!(covers(&na, &na));
        assert!(covers(&any, &na));
        assert!(!covers(&concrete, &na));
        assert!(!covers(&na, &concrete));
    }

    #[test]
    fn multi_element_names_compare_value_lists() {
        let full = name("cpe://sun:sunos:5.9//bea:weblogic:8.1;mysql:server:5.0");
        let subset = name("cpe://sun:sunos:5.9//mysql:server:5.0");
        assert!(covers(&full, &subset));
        assert!(!covers(&subset, &full));
    }

    #[test]
    fn set_matches_a_candidate_covering_any_element() {
        let known: NameSet = [
            name("cpe:/o:microsoft:windows_2000::sp3:pro"),
            name("cpe:/a:microsoft:ie:5.5"),
        ]
        .into_iter()
        .collect();

        assert!(known.matches(&name("cpe:/o:microsoft:windows_2000")));
        assert!(known.matches(&name("cpe:/a:microsoft:ie:5.5")));
        assert!(!known.matches(&name("cpe:/o:microsoft:windows_xp")));
        assert!(!known.matches(&name("cpe:/a:microsoft:ie:6.0")));
    }

    #[test]
    fn empty_set_matches_nothing() {
        let set = NameSet::new();
        assert!(set.is_empty());
        assert!(!set.matches(&name("cpe:/a:microsoft:ie:5.5")));
    }

    #[test]
    fn set_match_is_monotone() {
        let candidate = name("cpe:/a:microsoft:ie");
        let mut set = NameSet::from(vec![name("cpe:/o:microsoft:windows_2000")]);
        assert!(!set.matches(&candidate));

        set.insert(name("cpe:/a:microsoft:ie:6.0"));
        assert!(set.matches(&candidate));

        // Adding more names never turns a match into a non-match.
        set.insert(name("cpe:/h:acme:router"));
        assert!(set.matches(&candidate));
    }

    #[test]
    fn matching_names_lists_every_covered_instance() {
        let exact = name("cpe:/a:microsoft:ie:6.0");
        let with_update = name("cpe:/a:microsoft:ie:6.0:sp1");
        let unrelated = name("cpe:/o:microsoft:windows_2000");
        let set = NameSet::from(vec![exact.clone(), with_update.clone(), unrelated]);

        let candidate = name("cpe:/a:microsoft:ie:6.0");
        let found = set.matching_names(&candidate);
        assert_eq!(found, [&exact, &with_update]);
    }

    #[test]
    fn wfn_candidates_participate_in_matching() {
        let known = NameSet::from(vec![name("cpe:/a:microsoft:ie:6.0")]);
        let candidate = name("wfn:[part=\"a\", vendor=\"microsoft\", product=\"ie\"]");
        assert!(known.matches(&candidate));
    }
}
