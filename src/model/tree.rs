// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logbook-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logbook and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The category tree and its checked mutations.
//!
//! Storage is passive: [`CategoryTree::from_categories`] accepts whatever was persisted. The
//! mutation methods (`create`, `rename`, `move_to`, `upsert`, `delete`) are all-or-nothing and
//! keep the parent relation acyclic, names non-empty and sibling names unique.

use std::collections::BTreeSet;

use thiserror::Error;

use super::category::Category;
use super::ids::CategoryId;
use super::path::PATH_SEPARATOR;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("category name must not be empty")]
    Empty,
    #[error("category name {name:?} must not contain '-'")]
    ContainsSeparator { name: String },
    #[error("a sibling category is already named {name:?}")]
    DuplicateSibling { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    #[error("category not found (id={category_id})")]
    NotFound { category_id: CategoryId },
    #[error("moving category {category_id} under {new_parent_id} would create a cycle")]
    CycleRejected {
        category_id: CategoryId,
        new_parent_id: CategoryId,
    },
    #[error("invalid category name: {0}")]
    Validation(#[from] NameError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTree {
    categories: Vec<Category>,
}

impl CategoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps already-persisted categories without validating them.
    pub fn from_categories(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn list(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, category_id: &CategoryId) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.category_id() == category_id)
    }

    pub fn contains(&self, category_id: &CategoryId) -> bool {
        self.get(category_id).is_some()
    }

    fn get_mut(&mut self, category_id: &CategoryId) -> Option<&mut Category> {
        self.categories
            .iter_mut()
            .find(|c| c.category_id() == category_id)
    }

    fn require(&self, category_id: &CategoryId) -> Result<&Category, CategoryError> {
        self.get(category_id).ok_or_else(|| CategoryError::NotFound {
            category_id: category_id.clone(),
        })
    }

    /// Direct children of `parent_id` (roots for `None`), ordered by sort order then id.
    pub fn children(&self, parent_id: Option<&CategoryId>) -> Vec<&Category> {
        let mut children = self
            .categories
            .iter()
            .filter(|c| c.parent_id() == parent_id)
            .collect::<Vec<_>>();
        children.sort_by(|a, b| {
            a.sort_order()
                .cmp(&b.sort_order())
                .then_with(|| a.category_id().cmp(b.category_id()))
        });
        children
    }

    pub fn roots(&self) -> Vec<&Category> {
        self.children(None)
    }

    /// Depth-first list of every category below `category_id`, in sibling order.
    pub fn descendants(&self, category_id: &CategoryId) -> Vec<CategoryId> {
        let mut out = Vec::new();
        let mut seen = BTreeSet::new();
        seen.insert(category_id.clone());
        self.collect_descendants(category_id, &mut seen, &mut out);
        out
    }

    fn collect_descendants(
        &self,
        category_id: &CategoryId,
        seen: &mut BTreeSet<CategoryId>,
        out: &mut Vec<CategoryId>,
    ) {
        for child in self.children(Some(category_id)) {
            if !seen.insert(child.category_id().clone()) {
                continue;
            }
            out.push(child.category_id().clone());
            self.collect_descendants(child.category_id(), seen, out);
        }
    }

    /// Root-first chain of categories ending at `category_id`.
    ///
    /// A persisted parent cycle or a dangling parent id stops the walk; the chain then starts at
    /// the last category reached.
    pub fn ancestors(&self, category_id: &CategoryId) -> Vec<&Category> {
        let mut chain = Vec::new();
        let mut seen = BTreeSet::new();
        let mut current = self.get(category_id);
        while let Some(category) = current {
            if !seen.insert(category.category_id()) {
                break;
            }
            chain.push(category);
            current = category.parent_id().and_then(|parent_id| self.get(parent_id));
        }
        chain.reverse();
        chain
    }

    /// Whether `candidate` sits somewhere below `ancestor_id`.
    pub fn is_descendant(&self, candidate: &CategoryId, ancestor_id: &CategoryId) -> bool {
        self.ancestors(candidate)
            .iter()
            .any(|c| c.category_id() == ancestor_id && c.category_id() != candidate)
    }

    /// The path key of `category_id`: names from the root down, joined with `-`.
    pub fn path_key(&self, category_id: &CategoryId) -> Option<String> {
        let chain = self.ancestors(category_id);
        if chain.is_empty() {
            return None;
        }
        let separator = PATH_SEPARATOR.to_string();
        let names = chain.iter().map(|c| c.name()).collect::<Vec<_>>();
        Some(names.join(separator.as_str()))
    }

    /// The category addressed by `key`, matched case-sensitively. First match in stored order
    /// wins if persisted data holds duplicate paths.
    pub fn find_by_path(&self, key: &str) -> Option<&Category> {
        if key.is_empty() {
            return None;
        }
        self.categories
            .iter()
            .find(|c| self.path_key(c.category_id()).as_deref() == Some(key))
    }

    pub fn create(
        &mut self,
        name: &str,
        parent_id: Option<&CategoryId>,
    ) -> Result<Category, CategoryError> {
        if let Some(parent_id) = parent_id {
            self.require(parent_id)?;
        }
        let name = validate_name(name)?;
        self.ensure_unique_sibling(&name, parent_id, None)?;

        let category = Category::new(CategoryId::generate(), name)
            .with_parent(parent_id.cloned())
            .with_sort_order(self.next_sort_order(parent_id));
        self.categories.push(category.clone());
        Ok(category)
    }

    pub fn rename(&mut self, category_id: &CategoryId, new_name: &str) -> Result<(), CategoryError> {
        let parent_id = self.require(category_id)?.parent_id().cloned();
        let name = validate_name(new_name)?;
        self.ensure_unique_sibling(&name, parent_id.as_ref(), Some(category_id))?;

        if let Some(category) = self.get_mut(category_id) {
            category.set_name(name);
        }
        Ok(())
    }

    /// Re-parents `category_id`. A changed parent places the category after its new siblings.
    pub fn move_to(
        &mut self,
        category_id: &CategoryId,
        new_parent_id: Option<&CategoryId>,
    ) -> Result<(), CategoryError> {
        let category = self.require(category_id)?;
        let name = category.name().to_owned();
        let old_parent_id = category.parent_id().cloned();

        if let Some(new_parent_id) = new_parent_id {
            self.require(new_parent_id)?;
            self.ensure_acyclic(category_id, new_parent_id)?;
        }
        if old_parent_id.as_ref() == new_parent_id {
            return Ok(());
        }
        self.ensure_unique_sibling(&name, new_parent_id, Some(category_id))?;

        let sort_order = self.next_sort_order(new_parent_id);
        if let Some(category) = self.get_mut(category_id) {
            category.set_parent_id(new_parent_id.cloned());
            category.set_sort_order(sort_order);
        }
        Ok(())
    }

    pub fn set_sort_order(
        &mut self,
        category_id: &CategoryId,
        sort_order: i64,
    ) -> Result<(), CategoryError> {
        let category = self
            .get_mut(category_id)
            .ok_or_else(|| CategoryError::NotFound {
                category_id: category_id.clone(),
            })?;
        category.set_sort_order(sort_order);
        Ok(())
    }

    /// Inserts `category` or replaces the one with the same id, applying the same checks as
    /// `create`, `rename` and `move_to`. The stored name is trimmed.
    pub fn upsert(&mut self, mut category: Category) -> Result<(), CategoryError> {
        let category_id = category.category_id().clone();
        if let Some(parent_id) = category.parent_id() {
            self.require(parent_id)?;
            self.ensure_acyclic(&category_id, parent_id)?;
        }
        let name = validate_name(category.name())?;
        self.ensure_unique_sibling(&name, category.parent_id(), Some(&category_id))?;
        category.set_name(name);

        match self.get_mut(&category_id) {
            Some(existing) => *existing = category,
            None => self.categories.push(category),
        }
        Ok(())
    }

    /// Removes `category_id` and its whole subtree. Returns the removed ids, target first.
    pub fn delete(&mut self, category_id: &CategoryId) -> Result<Vec<CategoryId>, CategoryError> {
        self.require(category_id)?;
        let mut removed = vec![category_id.clone()];
        removed.extend(self.descendants(category_id));

        let removed_set = removed.iter().collect::<BTreeSet<_>>();
        self.categories
            .retain(|c| !removed_set.contains(c.category_id()));
        Ok(removed)
    }

    fn ensure_acyclic(
        &self,
        category_id: &CategoryId,
        new_parent_id: &CategoryId,
    ) -> Result<(), CategoryError> {
        if new_parent_id == category_id || self.is_descendant(new_parent_id, category_id) {
            return Err(CategoryError::CycleRejected {
                category_id: category_id.clone(),
                new_parent_id: new_parent_id.clone(),
            });
        }
        Ok(())
    }

    fn ensure_unique_sibling(
        &self,
        name: &str,
        parent_id: Option<&CategoryId>,
        except: Option<&CategoryId>,
    ) -> Result<(), CategoryError> {
        let taken = self
            .children(parent_id)
            .iter()
            .any(|c| c.name() == name && Some(c.category_id()) != except);
        if taken {
            return Err(NameError::DuplicateSibling {
                name: name.to_owned(),
            }
            .into());
        }
        Ok(())
    }

    fn next_sort_order(&self, parent_id: Option<&CategoryId>) -> i64 {
        self.children(parent_id)
            .iter()
            .map(|c| c.sort_order())
            .max()
            .map_or(0, |max| max.saturating_add(1))
    }
}

fn validate_name(name: &str) -> Result<String, NameError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.contains(PATH_SEPARATOR) {
        return Err(NameError::ContainsSeparator {
            name: name.to_owned(),
        });
    }
    Ok(name.to_owned())
}

#[cfg(test)]
mod tests;
