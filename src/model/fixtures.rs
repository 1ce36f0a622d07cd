// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logbook-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logbook and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::category::Category;
use super::ids::{CategoryId, TemplateId};
use super::template::{PlaceholderKind, Template};
use super::tree::CategoryTree;

pub(crate) fn cid(value: &str) -> CategoryId {
    CategoryId::new(value).expect("category id")
}

pub(crate) fn tid(value: &str) -> TemplateId {
    TemplateId::new(value).expect("template id")
}

/// `Eng`, `Eng-Backend`, `Eng-Backend-Oncall`, `Eng-Frontend` and `Ops`, with templates on `Eng`,
/// `Eng-Backend` and `Eng-Backend-Oncall` (the latter with empty format text).
pub(crate) fn engineering_catalog() -> (CategoryTree, Vec<Template>) {
    let tree = CategoryTree::from_categories(vec![
        Category::new(cid("c:eng"), "Eng"),
        Category::new(cid("c:backend"), "Backend").with_parent(Some(cid("c:eng"))),
        Category::new(cid("c:oncall"), "Oncall").with_parent(Some(cid("c:backend"))),
        Category::new(cid("c:frontend"), "Frontend")
            .with_parent(Some(cid("c:eng")))
            .with_sort_order(1),
        Category::new(cid("c:ops"), "Ops").with_sort_order(1),
    ]);

    let mut eng = Template::new(tid("t:eng"), "Engineering", cid("c:eng"))
        .with_content("{ItemTitle} ({CategoryPath})\nStarted: {start:yyyy-MM-dd HH:mm}")
        .with_placeholder("start", PlaceholderKind::DateTime)
        .with_placeholder("Status", PlaceholderKind::SingleChoice)
        .with_options("status", ["open", "done"]);
    eng.set_tags(["eng"]);

    let backend = Template::new(tid("t:backend"), "Backend", cid("c:backend"))
        .with_content("Service: {service}\nStatus: {status}")
        .with_placeholder("service", PlaceholderKind::SingleChoice)
        .with_placeholder("status", PlaceholderKind::SingleChoice)
        .with_options("service", ["api", "worker"])
        .with_options("STATUS", ["done", "blocked"]);

    let oncall = Template::new(tid("t:oncall"), "Oncall", cid("c:oncall"))
        .with_content("  ")
        .with_placeholder("pager", PlaceholderKind::Text)
        .with_placeholder("Service", PlaceholderKind::MultipleChoice)
        .with_options("service", ["api", "db"]);

    (tree, vec![eng, backend, oncall])
}
