// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logbook-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logbook and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use smol_str::SmolStr;

/// A placeholder name that compares case-insensitively but remembers how it was spelled.
///
/// `{Ticket}` and `{ticket}` address the same placeholder; maps keyed by this type keep the
/// spelling of whichever key was inserted first.
#[derive(Debug, Clone)]
pub struct PlaceholderName {
    spelled: SmolStr,
    folded: SmolStr,
}

impl PlaceholderName {
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim();
        Self {
            spelled: SmolStr::new(name),
            folded: SmolStr::new(name.to_lowercase()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.spelled
    }

    pub fn matches(&self, other: &str) -> bool {
        self.folded == other.trim().to_lowercase()
    }
}

impl PartialEq for PlaceholderName {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for PlaceholderName {}

impl PartialOrd for PlaceholderName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PlaceholderName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded.cmp(&other.folded)
    }
}

impl Hash for PlaceholderName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl fmt::Display for PlaceholderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spelled)
    }
}

impl From<&str> for PlaceholderName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PlaceholderName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Per-placeholder choice lists.
pub type OptionMap = BTreeMap<PlaceholderName, Vec<String>>;

/// Appends `values` to `list`, skipping values already present. Existing order is kept and the
/// first occurrence of a value wins.
pub fn union_options<'a>(list: &mut Vec<String>, values: impl IntoIterator<Item = &'a String>) {
    for value in values {
        if !list.iter().any(|existing| existing == value) {
            list.push(value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{union_options, PlaceholderName};

    #[test]
    fn names_compare_case_insensitively() {
        assert_eq!(PlaceholderName::new("Ticket"), PlaceholderName::new("ticket"));
        assert_ne!(PlaceholderName::new("Ticket"), PlaceholderName::new("Tickets"));
        assert!(PlaceholderName::new("Ticket").matches("TICKET"));
    }

    #[test]
    fn map_keeps_first_spelling_and_latest_value() {
        let mut map = BTreeMap::new();
        map.insert(PlaceholderName::new("When"), 1);
        map.insert(PlaceholderName::new("when"), 2);
        assert_eq!(map.len(), 1);
        let (key, value) = map.iter().next().expect("entry");
        assert_eq!(key.as_str(), "When");
        assert_eq!(*value, 2);
    }

    #[test]
    fn union_keeps_first_seen_order_and_drops_duplicates() {
        let mut list = vec!["a".to_owned(), "b".to_owned()];
        let extra = vec!["b".to_owned(), "c".to_owned(), "a".to_owned(), "c".to_owned()];
        union_options(&mut list, &extra);
        assert_eq!(list, ["a", "b", "c"]);
    }
}
