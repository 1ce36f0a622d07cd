// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logbook-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logbook and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Logbook: hierarchical work-log templates.
//!
//! Categories form a tree; each may own a template. A category inherits every ancestor template,
//! and the merged result is rendered by substituting `{name}` / `{name:format}` placeholders.

pub mod config;
pub mod model;
pub mod observability;
pub mod render;
pub mod resolve;
pub mod store;
