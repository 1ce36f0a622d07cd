// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logbook-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logbook and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Separator between category names in a path key.
pub const PATH_SEPARATOR: char = '-';

/// One-or-more category names from a root category down to a target category.
///
/// The textual form is the path key used for template lookup, e.g. `Eng-Backend-Oncall`.
/// Keys are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryPath {
    segments: Vec<String>,
}

impl CategoryPath {
    pub fn new(segments: Vec<String>) -> Result<Self, CategoryPathError> {
        if segments.is_empty() {
            return Err(CategoryPathError::Empty);
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(CategoryPathError::EmptySegment);
        }
        if segments.iter().any(|s| s.contains(PATH_SEPARATOR)) {
            return Err(CategoryPathError::SeparatorInSegment);
        }
        Ok(Self { segments })
    }

    pub fn parse(key: &str) -> Result<Self, CategoryPathError> {
        if key.is_empty() {
            return Err(CategoryPathError::Empty);
        }
        Self::new(key.split(PATH_SEPARATOR).map(ToOwned::to_owned).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn leaf(&self) -> &str {
        // Non-empty by construction.
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn child(&self, name: impl Into<String>) -> Result<Self, CategoryPathError> {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self::new(segments)
    }

    /// Root-first chain of every prefix of this path, ending with the path itself.
    pub fn ancestors(&self) -> Vec<Self> {
        (1..=self.segments.len())
            .map(|len| Self {
                segments: self.segments[..len].to_vec(),
            })
            .collect()
    }

    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        self.segments.len() < other.segments.len()
            && other.segments[..self.segments.len()] == self.segments[..]
    }
}

impl fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                write!(f, "{PATH_SEPARATOR}")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl FromStr for CategoryPath {
    type Err = CategoryPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CategoryPathError {
    #[error("category path must not be empty")]
    Empty,
    #[error("category path must not contain empty segments")]
    EmptySegment,
    #[error("category path segment must not contain '-'")]
    SeparatorInSegment,
}

/// Root-first list of the ancestor keys of `key`, ending with `key` itself.
///
/// Works on the raw key without validating it: `"a--b"` yields `["a", "a-", "a--b"]`, which
/// simply find no category. An empty key yields no ancestors.
pub fn ancestor_keys(key: &str) -> Vec<String> {
    if key.is_empty() {
        return Vec::new();
    }

    let mut keys = Vec::new();
    let mut current = String::with_capacity(key.len());
    for (index, part) in key.split(PATH_SEPARATOR).enumerate() {
        if index > 0 {
            current.push(PATH_SEPARATOR);
        }
        current.push_str(part);
        keys.push(current.clone());
    }
    keys
}
