// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logbook-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logbook and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Categories form a tree addressed by path keys; each category may own one template.

pub mod category;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod name;
pub mod path;
pub mod template;
pub mod tree;

pub use category::Category;
pub use ids::{CategoryId, Id, IdError, TemplateId};
pub use name::{union_options, OptionMap, PlaceholderName};
pub use path::{ancestor_keys, CategoryPath, CategoryPathError, PATH_SEPARATOR};
pub use template::{ParsePlaceholderKindError, PlaceholderKind, PlaceholderMap, Template};
pub use tree::{CategoryError, CategoryTree, NameError};
