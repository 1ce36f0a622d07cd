// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logbook-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logbook and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Placeholder rendering.
//!
//! Format text contains `{name}` and `{name:format}` tokens. Rendering replaces every token with
//! the matching field value in a single left-to-right pass, then fills the reserved `{ItemTitle}`
//! and `{CategoryPath}` tokens. Rendering never fails: unknown names become empty text.
//!
//! Token names are trimmed, so `{ ticket }` reads the `ticket` field. A blank name such as `{ }`
//! never matches a field and renders empty. A reserved token with a format suffix and no field
//! value also renders empty.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::{Captures, Regex};

use crate::model::PlaceholderName;

pub mod datefmt;

pub use datefmt::{format_datetime, parse_datetime};

pub const ITEM_TITLE_TOKEN: &str = "ItemTitle";
pub const CATEGORY_PATH_TOKEN: &str = "CategoryPath";

/// Fallback for date/time values rendered without a format specifier.
pub const DEFAULT_DATETIME_FORMAT: &str = "yyyy-MM-dd HH:mm";

static TOKEN_PATTERN: OnceLock<Regex> = OnceLock::new();

fn token_pattern() -> &'static Regex {
    TOKEN_PATTERN.get_or_init(|| {
        // Constant pattern; covered by the module tests.
        Regex::new(r"\{([^{}:]+)(?::([^{}]*))?\}").expect("placeholder token pattern")
    })
}

/// True for the names filled by the reserved pass rather than by field values.
pub fn is_reserved_token(name: &str) -> bool {
    name == ITEM_TITLE_TOKEN || name == CATEGORY_PATH_TOKEN
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldValue {
    #[default]
    Absent,
    Text(String),
    DateTime(NaiveDateTime),
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Plain string form; date/time values use `default_format`.
    pub fn to_plain_string(&self, default_format: &str) -> String {
        match self {
            Self::Absent => String::new(),
            Self::Text(text) => text.clone(),
            Self::DateTime(value) => format_datetime(value, default_format),
        }
    }

    /// Applies a format specifier. Text that parses as a date/time is formatted too; other text
    /// is returned unchanged.
    pub fn to_formatted_string(&self, format: &str) -> String {
        match self {
            Self::Absent => String::new(),
            Self::Text(text) => match parse_datetime(text) {
                Some(value) => format_datetime(&value, format),
                None => text.clone(),
            },
            Self::DateTime(value) => format_datetime(value, format),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_string(DEFAULT_DATETIME_FORMAT))
    }
}

/// Field values keyed by placeholder name, compared case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: BTreeMap<PlaceholderName, FieldValue>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<PlaceholderName>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets the resolved category path used by the reserved `{CategoryPath}` token.
    pub fn with_category_path(self, path: impl Into<String>) -> Self {
        self.with(CATEGORY_PATH_TOKEN, path.into())
    }

    /// Stores `value` under `name`, replacing any value whose name differs only in case.
    pub fn insert(&mut self, name: impl Into<PlaceholderName>, value: impl Into<FieldValue>) {
        let name = name.into();
        self.values.remove(&name);
        self.values.insert(name, value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(&PlaceholderName::new(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn category_path(&self) -> Option<&FieldValue> {
        self.get(CATEGORY_PATH_TOKEN)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlaceholderName, &FieldValue)> {
        self.values.iter()
    }
}

impl<N, V> FromIterator<(N, V)> for FieldValues
where
    N: Into<PlaceholderName>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (name, value) in iter {
            values.insert(name, value);
        }
        values
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub default_datetime_format: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            default_datetime_format: DEFAULT_DATETIME_FORMAT.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Substitutes every token in `format_text` and then the reserved tokens.
    pub fn render(&self, format_text: &str, values: &FieldValues, item_title: &str) -> String {
        let default_format = self.options.default_datetime_format.as_str();

        let substituted = token_pattern().replace_all(format_text, |caps: &Captures<'_>| {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            let name = caps.get(1).map_or("", |m| m.as_str());
            let format = caps
                .get(2)
                .map(|m| m.as_str())
                .filter(|format| !format.is_empty());

            match values.get(name).filter(|value| !value.is_absent()) {
                Some(value) => match format {
                    Some(format) => value.to_formatted_string(format),
                    None => value.to_plain_string(default_format),
                },
                // Left for the reserved pass, which only fills the bare form.
                None if format.is_none() && is_reserved_token(name) => whole.to_owned(),
                None => String::new(),
            }
        });

        let category_path = values
            .category_path()
            .map(|value| value.to_plain_string(default_format))
            .unwrap_or_default();

        substituted
            .replace(&format!("{{{ITEM_TITLE_TOKEN}}}"), item_title)
            .replace(&format!("{{{CATEGORY_PATH_TOKEN}}}"), &category_path)
    }
}

/// Renders with default options.
pub fn render_template(format_text: &str, values: &FieldValues, item_title: &str) -> String {
    Renderer::default().render(format_text, values, item_title)
}

/// Token names in `text`, in order of first appearance. Names differing only in case are listed
/// once, spelled as first seen.
pub fn placeholder_tokens(text: &str) -> Vec<String> {
    let mut seen = Vec::<PlaceholderName>::new();
    for caps in token_pattern().captures_iter(text) {
        let Some(name) = caps.get(1) else {
            continue;
        };
        let name = PlaceholderName::new(name.as_str());
        if name.as_str().is_empty() || seen.contains(&name) {
            continue;
        }
        seen.push(name);
    }
    seen.iter().map(|name| name.as_str().to_owned()).collect()
}
