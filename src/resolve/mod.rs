// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logbook-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logbook and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Effective-template resolution.
//!
//! A category inherits the templates of all of its ancestors. Resolution walks the ancestor keys of
//! a path key from the root down and folds every template it finds into one
//! [`EffectiveTemplate`].

use tracing::debug;

use crate::model::{
    ancestor_keys, union_options, OptionMap, PlaceholderMap, PlaceholderName, Template,
};

/// Separator placed between format-text fragments of successive layers.
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// Finds the template owned by the category addressed by an exact path key.
pub trait TemplateLookup {
    fn template_for_path(&self, key: &str) -> Option<&Template>;
}

/// The merged view of a category's own template and every ancestor template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveTemplate {
    format_text: String,
    placeholders: PlaceholderMap,
    options: OptionMap,
    sources: Vec<String>,
}

impl EffectiveTemplate {
    /// A single layer holding `template` verbatim.
    pub fn from_template(template: &Template) -> Self {
        Self {
            format_text: template.content().to_owned(),
            placeholders: template.placeholders().clone(),
            options: template.options().clone(),
            sources: Vec::new(),
        }
    }

    pub fn with_source(mut self, key: impl Into<String>) -> Self {
        self.sources.push(key.into());
        self
    }

    pub fn format_text(&self) -> &str {
        &self.format_text
    }

    pub fn placeholders(&self) -> &PlaceholderMap {
        &self.placeholders
    }

    pub fn options(&self) -> &OptionMap {
        &self.options
    }

    pub fn options_for(&self, name: &str) -> Option<&[String]> {
        self.options
            .get(&PlaceholderName::new(name))
            .map(Vec::as_slice)
    }

    /// Path keys whose templates contributed, root first.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Folds a more specific layer into this one.
    ///
    /// Non-blank text is appended after a blank line. A blank accumulated text is replaced by the
    /// fragment rather than joined, so an empty root template adds no leading separator.
    /// Placeholder kinds from `layer` overwrite existing ones while the first spelling of a name is
    /// kept. Option lists are unioned.
    pub fn merge(&mut self, layer: &EffectiveTemplate) {
        if !layer.format_text.trim().is_empty() {
            if self.format_text.trim().is_empty() {
                self.format_text.clone_from(&layer.format_text);
            } else {
                self.format_text.push_str(FRAGMENT_SEPARATOR);
                self.format_text.push_str(&layer.format_text);
            }
        }

        for (name, kind) in &layer.placeholders {
            self.placeholders.insert(name.clone(), *kind);
        }

        for (name, values) in &layer.options {
            let list = self.options.entry(name.clone()).or_default();
            union_options(list, values);
        }

        self.sources.extend(layer.sources.iter().cloned());
    }

    /// Token names used in the format text that no layer declares, in order of first use.
    pub fn undeclared_placeholders(&self) -> Vec<String> {
        crate::render::placeholder_tokens(&self.format_text)
            .into_iter()
            .filter(|name| !crate::render::is_reserved_token(name))
            .filter(|name| !self.placeholders.keys().any(|declared| declared.matches(name)))
            .collect()
    }
}

/// Resolves the effective template for `key`, or `None` when no category on the chain owns one.
pub fn resolve_effective_template<L>(lookup: &L, key: &str) -> Option<EffectiveTemplate>
where
    L: TemplateLookup + ?Sized,
{
    let mut merged: Option<EffectiveTemplate> = None;

    for ancestor in ancestor_keys(key) {
        let Some(template) = lookup.template_for_path(&ancestor) else {
            continue;
        };
        let layer = EffectiveTemplate::from_template(template).with_source(ancestor);
        match merged.as_mut() {
            Some(acc) => acc.merge(&layer),
            None => merged = Some(layer),
        }
    }

    match &merged {
        Some(effective) => debug!(
            key,
            sources = ?effective.sources(),
            placeholders = effective.placeholders().len(),
            "resolved effective template"
        ),
        None => debug!(key, "no template on category chain"),
    }
    merged
}
