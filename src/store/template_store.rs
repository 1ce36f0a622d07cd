// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logbook-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logbook and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::model::{
    Category, CategoryError, CategoryId, CategoryTree, IdError, PlaceholderKind, PlaceholderName,
    Template, TemplateId,
};
use crate::resolve::TemplateLookup;

/// Version written into every saved document. Documents with a newer version are refused.
pub const STORE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("template store not found at {path:?}")]
    NotFound { path: PathBuf },
    #[error("cannot read template store at {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("malformed template store at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid template store at {path:?}: {reason}")]
    Invalid { path: PathBuf, reason: String },
    #[error("cannot write template store to {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("refusing to write through symlink at {path:?}")]
    SymlinkRefused { path: PathBuf },
    #[error("template store has no save location")]
    NoTarget,
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error("template not found (id={template_id})")]
    TemplateNotFound { template_id: TemplateId },
    #[error("category {category_id} already has template {existing}")]
    TemplateSlotTaken {
        category_id: CategoryId,
        existing: TemplateId,
    },
    #[error("template name must not be empty")]
    EmptyTemplateName,
}

/// Coarse failure classes callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Parse,
    Write,
    NoTarget,
    CycleRejected,
    Validation,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::Read { .. } | Self::TemplateNotFound { .. } => {
                ErrorKind::NotFound
            }
            Self::Parse { .. } | Self::Invalid { .. } => ErrorKind::Parse,
            Self::Write { .. } | Self::SymlinkRefused { .. } => ErrorKind::Write,
            Self::NoTarget => ErrorKind::NoTarget,
            Self::Category(CategoryError::NotFound { .. }) => ErrorKind::NotFound,
            Self::Category(CategoryError::CycleRejected { .. }) => ErrorKind::CycleRejected,
            Self::Category(CategoryError::Validation(_))
            | Self::TemplateSlotTaken { .. }
            | Self::EmptyTemplateName => ErrorKind::Validation,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Writes a temp file and renames it into place, without fsync.
    #[default]
    BestEffort,

    /// Additionally flushes the file and its directory to stable storage where the platform
    /// allows it.
    Durable,
}

/// What `remove_category` took out of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovedCategory {
    pub categories: Vec<CategoryId>,
    pub templates: Vec<TemplateId>,
}

/// All categories and templates of one work log, loaded from and saved to a single document.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    categories: CategoryTree,
    templates: Vec<Template>,
    location: Option<PathBuf>,
    durability: WriteDurability,
    dirty: bool,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an in-memory store from existing parts without validating them.
    pub fn from_parts(categories: CategoryTree, templates: Vec<Template>) -> Self {
        Self {
            categories,
            templates,
            ..Self::default()
        }
    }

    /// Loads the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        store.load(path)?;
        Ok(store)
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Sets where `save` writes without touching the in-memory state.
    pub fn set_location(&mut self, path: impl Into<PathBuf>) {
        self.location = Some(path.into());
    }

    /// True once a mutation succeeded since the last `load` or `save`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn categories(&self) -> &CategoryTree {
        &self.categories
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn template(&self, template_id: &TemplateId) -> Option<&Template> {
        self.templates
            .iter()
            .find(|t| t.template_id() == template_id)
    }

    pub fn template_for_category(&self, category_id: &CategoryId) -> Option<&Template> {
        self.templates
            .iter()
            .find(|t| t.category_id() == category_id)
    }

    /// Replaces the in-memory state with the document at `path` and remembers `path` for `save`.
    ///
    /// On failure the current state is left untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let document: StoreDocumentJson =
            serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let (categories, templates) = store_from_json(path, document)?;

        info!(
            path = %path.display(),
            categories = categories.len(),
            templates = templates.len(),
            "loaded template store"
        );

        self.categories = categories;
        self.templates = templates;
        self.location = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    /// Atomically writes the whole store to its location.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let path = self.location.clone().ok_or(StoreError::NoTarget)?;

        let document = store_to_json(&self.categories, &self.templates);
        let body = serde_json::to_string_pretty(&document).map_err(|source| StoreError::Write {
            path: path.clone(),
            source: io::Error::other(source),
        })?;
        write_atomic(&path, format!("{body}\n").as_bytes(), self.durability)?;

        info!(
            path = %path.display(),
            categories = self.categories.len(),
            templates = self.templates.len(),
            "saved template store"
        );
        self.dirty = false;
        Ok(())
    }

    /// Points the store at `path` and saves there.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<(), StoreError> {
        self.set_location(path);
        self.save()
    }

    pub fn create_category(
        &mut self,
        name: &str,
        parent_id: Option<&CategoryId>,
    ) -> Result<Category, StoreError> {
        let category = self.categories.create(name, parent_id)?;
        debug!(category_id = %category.category_id(), name = category.name(), "created category");
        self.dirty = true;
        Ok(category)
    }

    pub fn rename_category(
        &mut self,
        category_id: &CategoryId,
        new_name: &str,
    ) -> Result<(), StoreError> {
        self.categories.rename(category_id, new_name)?;
        self.dirty = true;
        Ok(())
    }

    pub fn move_category(
        &mut self,
        category_id: &CategoryId,
        new_parent_id: Option<&CategoryId>,
    ) -> Result<(), StoreError> {
        self.categories.move_to(category_id, new_parent_id)?;
        self.dirty = true;
        Ok(())
    }

    pub fn set_category_sort_order(
        &mut self,
        category_id: &CategoryId,
        sort_order: i64,
    ) -> Result<(), StoreError> {
        self.categories.set_sort_order(category_id, sort_order)?;
        self.dirty = true;
        Ok(())
    }

    pub fn add_or_update_category(&mut self, category: Category) -> Result<(), StoreError> {
        self.categories.upsert(category)?;
        self.dirty = true;
        Ok(())
    }

    /// Removes a category, all of its descendants and every template attached to any of them.
    pub fn remove_category(
        &mut self,
        category_id: &CategoryId,
    ) -> Result<RemovedCategory, StoreError> {
        let categories = self.categories.delete(category_id)?;
        let removed_set = categories.iter().collect::<BTreeSet<_>>();

        let mut templates = Vec::new();
        self.templates.retain(|t| {
            if removed_set.contains(t.category_id()) {
                templates.push(t.template_id().clone());
                false
            } else {
                true
            }
        });

        debug!(
            category_id = %category_id,
            categories = categories.len(),
            templates = templates.len(),
            "removed category subtree"
        );
        self.dirty = true;
        Ok(RemovedCategory {
            categories,
            templates,
        })
    }

    /// Inserts `template` or replaces the template with the same id.
    ///
    /// The template's category must exist and must not already own a different template.
    pub fn add_or_update_template(&mut self, template: Template) -> Result<(), StoreError> {
        if template.name().trim().is_empty() {
            return Err(StoreError::EmptyTemplateName);
        }
        if !self.categories.contains(template.category_id()) {
            return Err(CategoryError::NotFound {
                category_id: template.category_id().clone(),
            }
            .into());
        }
        if let Some(existing) = self.templates.iter().find(|t| {
            t.category_id() == template.category_id() && t.template_id() != template.template_id()
        }) {
            return Err(StoreError::TemplateSlotTaken {
                category_id: template.category_id().clone(),
                existing: existing.template_id().clone(),
            });
        }

        match self
            .templates
            .iter_mut()
            .find(|t| t.template_id() == template.template_id())
        {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
        self.dirty = true;
        Ok(())
    }

    pub fn remove_template(&mut self, template_id: &TemplateId) -> Result<Template, StoreError> {
        let index = self
            .templates
            .iter()
            .position(|t| t.template_id() == template_id)
            .ok_or_else(|| StoreError::TemplateNotFound {
                template_id: template_id.clone(),
            })?;
        self.dirty = true;
        Ok(self.templates.remove(index))
    }
}

impl TemplateLookup for TemplateStore {
    fn template_for_path(&self, key: &str) -> Option<&Template> {
        let category = self.categories.find_by_path(key)?;
        self.template_for_category(category.category_id())
    }
}

// JSON document conversion and atomic file writes for `TemplateStore`.
include!("template_store/helpers.rs");
