// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logbook-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logbook and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::ids::{CategoryId, TemplateId};
use super::name::{union_options, OptionMap, PlaceholderName};

/// How the form builder should collect a placeholder's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum PlaceholderKind {
    #[default]
    Text,
    MultilineText,
    SingleChoice,
    MultipleChoice,
    DateTime,
}

impl PlaceholderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::MultilineText => "multiline",
            Self::SingleChoice => "choice",
            Self::MultipleChoice => "multichoice",
            Self::DateTime => "datetime",
        }
    }

    pub fn is_choice(self) -> bool {
        matches!(self, Self::SingleChoice | Self::MultipleChoice)
    }
}

impl fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown placeholder kind: {0:?}")]
pub struct ParsePlaceholderKindError(pub String);

impl FromStr for PlaceholderKind {
    type Err = ParsePlaceholderKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        match folded.as_str() {
            "text" | "" => Ok(Self::Text),
            "multiline" | "multilinetext" | "textarea" => Ok(Self::MultilineText),
            "choice" | "singlechoice" | "select" => Ok(Self::SingleChoice),
            "multichoice" | "multiplechoice" | "multiselect" => Ok(Self::MultipleChoice),
            "datetime" | "date" => Ok(Self::DateTime),
            _ => Err(ParsePlaceholderKindError(s.to_owned())),
        }
    }
}

/// Placeholder declarations, keyed case-insensitively.
pub type PlaceholderMap = BTreeMap<PlaceholderName, PlaceholderKind>;

/// A category's own template: format text plus the placeholders and choice lists it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    template_id: TemplateId,
    name: String,
    category_id: CategoryId,
    content: String,
    tags: Vec<String>,
    placeholders: PlaceholderMap,
    options: OptionMap,
}

impl Template {
    pub fn new(template_id: TemplateId, name: impl Into<String>, category_id: CategoryId) -> Self {
        Self {
            template_id,
            name: name.into(),
            category_id,
            content: String::new(),
            tags: Vec::new(),
            placeholders: PlaceholderMap::new(),
            options: OptionMap::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_placeholder(mut self, name: impl Into<PlaceholderName>, kind: PlaceholderKind) -> Self {
        self.set_placeholder(name, kind);
        self
    }

    pub fn with_options<I, S>(mut self, name: impl Into<PlaceholderName>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_options(name, values);
        self
    }

    pub fn template_id(&self) -> &TemplateId {
        &self.template_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    pub fn set_category_id(&mut self, category_id: CategoryId) {
        self.category_id = category_id;
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Adds a tag unless it is blank or already present. Returns whether the tag was added.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_owned());
        true
    }

    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.clear();
        for tag in tags {
            self.add_tag(tag);
        }
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn placeholders(&self) -> &PlaceholderMap {
        &self.placeholders
    }

    pub fn placeholder_kind(&self, name: &str) -> Option<PlaceholderKind> {
        self.placeholders.get(&PlaceholderName::new(name)).copied()
    }

    pub fn set_placeholder(&mut self, name: impl Into<PlaceholderName>, kind: PlaceholderKind) {
        self.placeholders.insert(name.into(), kind);
    }

    /// Removes a placeholder declaration together with its choice list.
    pub fn remove_placeholder(&mut self, name: &str) -> Option<PlaceholderKind> {
        let key = PlaceholderName::new(name);
        self.options.remove(&key);
        self.placeholders.remove(&key)
    }

    pub fn options(&self) -> &OptionMap {
        &self.options
    }

    pub fn options_for(&self, name: &str) -> Option<&[String]> {
        self.options
            .get(&PlaceholderName::new(name))
            .map(Vec::as_slice)
    }

    pub fn add_options<I, S>(&mut self, name: impl Into<PlaceholderName>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect::<Vec<String>>();
        let list = self.options.entry(name.into()).or_default();
        union_options(list, &values);
    }

    pub fn clear_options(&mut self, name: &str) {
        self.options.remove(&PlaceholderName::new(name));
    }
}
