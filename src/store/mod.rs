// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logbook-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logbook and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for the template store.
//!
//! The store keeps every category and template in memory and reads/writes them as a single JSON
//! document. Mutations only touch memory; `save` is explicit.

pub mod template_store;

pub use template_store::{
    ErrorKind, RemovedCategory, StoreError, TemplateStore, WriteDurability, STORE_FORMAT_VERSION,
};
