// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logbook-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logbook and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::CategoryId;

/// A node in the category tree.
///
/// A category is a plain value; the parent relation is only checked for cycles when a category
/// passes through [`CategoryTree`](super::CategoryTree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    category_id: CategoryId,
    name: String,
    parent_id: Option<CategoryId>,
    sort_order: i64,
}

impl Category {
    pub fn new(category_id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            category_id,
            name: name.into(),
            parent_id: None,
            sort_order: 0,
        }
    }

    pub fn with_parent(mut self, parent_id: Option<CategoryId>) -> Self {
        self.parent_id = parent_id;
        self
    }

    pub fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn parent_id(&self) -> Option<&CategoryId> {
        self.parent_id.as_ref()
    }

    pub fn set_parent_id(&mut self, parent_id: Option<CategoryId>) {
        self.parent_id = parent_id;
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn sort_order(&self) -> i64 {
        self.sort_order
    }

    pub fn set_sort_order(&mut self, sort_order: i64) {
        self.sort_order = sort_order;
    }
}
