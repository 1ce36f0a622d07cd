// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logbook-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logbook and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use super::{CategoryError, CategoryTree, NameError};
use crate::model::{Category, CategoryId};

struct TreeCtx {
    tree: CategoryTree,
    eng: CategoryId,
    backend: CategoryId,
    oncall: CategoryId,
    ops: CategoryId,
}

#[fixture]
fn ctx() -> TreeCtx {
    let mut tree = CategoryTree::new();
    let eng = tree.create("Eng", None).expect("eng").category_id().clone();
    let backend = tree
        .create("Backend", Some(&eng))
        .expect("backend")
        .category_id()
        .clone();
    let oncall = tree
        .create("Oncall", Some(&backend))
        .expect("oncall")
        .category_id()
        .clone();
    let ops = tree.create("Ops", None).expect("ops").category_id().clone();
    TreeCtx { tree, eng, backend, oncall, ops }
}

fn id(raw: &str) -> CategoryId {
    CategoryId::new(raw).expect("category id")
}

#[rstest]
fn create_assigns_fresh_ids_and_sibling_order(ctx: TreeCtx) {
    let roots = ctx.tree.roots();
    assert_eq!(roots.iter().map(|c| c.name()).collect::<Vec<_>>(), ["Eng", "Ops"]);
    assert_eq!(roots[0].sort_order(), 0);
    assert_eq!(roots[1].sort_order(), 1);
    assert_eq!(ctx.tree.len(), 4);
    assert_ne!(ctx.eng, ctx.ops);
}

#[rstest]
fn path_keys_join_names_from_the_root(ctx: TreeCtx) {
    assert_eq!(ctx.tree.path_key(&ctx.eng).as_deref(), Some("Eng"));
    assert_eq!(ctx.tree.path_key(&ctx.oncall).as_deref(), Some("Eng-Backend-Oncall"));
    assert_eq!(ctx.tree.path_key(&id("missing")), None);

    let found = ctx.tree.find_by_path("Eng-Backend").expect("found");
    assert_eq!(found.category_id(), &ctx.backend);
    assert!(ctx.tree.find_by_path("eng-backend").is_none());
    assert!(ctx.tree.find_by_path("").is_none());
}

#[rstest]
fn create_rejects_invalid_names(mut ctx: TreeCtx) {
    let before = ctx.tree.clone();

    assert_eq!(
        ctx.tree.create("   ", None).unwrap_err(),
        CategoryError::Validation(NameError::Empty)
    );
    assert!(matches!(
        ctx.tree.create("Front-End", Some(&ctx.eng)).unwrap_err(),
        CategoryError::Validation(NameError::ContainsSeparator { .. })
    ));
    assert!(matches!(
        ctx.tree.create("Backend", Some(&ctx.eng)).unwrap_err(),
        CategoryError::Validation(NameError::DuplicateSibling { .. })
    ));
    assert!(matches!(
        ctx.tree.create("Child", Some(&id("missing"))).unwrap_err(),
        CategoryError::NotFound { .. }
    ));

    assert_eq!(ctx.tree, before);
}

#[rstest]
fn create_trims_names(mut ctx: TreeCtx) {
    let created = ctx.tree.create("  Frontend ", Some(&ctx.eng)).expect("create");
    assert_eq!(created.name(), "Frontend");
    assert_eq!(created.sort_order(), 1);
}

#[rstest]
fn rename_updates_in_place(mut ctx: TreeCtx) {
    ctx.tree.rename(&ctx.backend, "Platform").expect("rename");
    assert_eq!(ctx.tree.path_key(&ctx.oncall).as_deref(), Some("Eng-Platform-Oncall"));

    ctx.tree.rename(&ctx.backend, "Platform").expect("rename to same name");
    assert!(matches!(
        ctx.tree.rename(&ctx.ops, "Eng").unwrap_err(),
        CategoryError::Validation(NameError::DuplicateSibling { .. })
    ));
    assert!(matches!(
        ctx.tree.rename(&id("missing"), "X").unwrap_err(),
        CategoryError::NotFound { .. }
    ));
}

#[rstest]
fn move_under_own_descendant_is_rejected_and_tree_unchanged(mut ctx: TreeCtx) {
    let before = ctx.tree.clone();

    let err = ctx.tree.move_to(&ctx.eng, Some(&ctx.backend)).unwrap_err();
    assert_eq!(
        err,
        CategoryError::CycleRejected {
            category_id: ctx.eng.clone(),
            new_parent_id: ctx.backend.clone(),
        }
    );
    assert!(matches!(
        ctx.tree.move_to(&ctx.eng, Some(&ctx.oncall)).unwrap_err(),
        CategoryError::CycleRejected { .. }
    ));
    assert!(matches!(
        ctx.tree.move_to(&ctx.eng, Some(&ctx.eng)).unwrap_err(),
        CategoryError::CycleRejected { .. }
    ));

    assert_eq!(ctx.tree, before);
}

#[rstest]
fn move_against_unknown_ids_reports_not_found(mut ctx: TreeCtx) {
    let before = ctx.tree.clone();
    assert!(matches!(
        ctx.tree.move_to(&id("missing"), None).unwrap_err(),
        CategoryError::NotFound { .. }
    ));
    assert!(matches!(
        ctx.tree.move_to(&ctx.ops, Some(&id("missing"))).unwrap_err(),
        CategoryError::NotFound { .. }
    ));
    assert_eq!(ctx.tree, before);
}

#[rstest]
fn move_reparents_and_appends_to_new_siblings(mut ctx: TreeCtx) {
    ctx.tree.move_to(&ctx.oncall, Some(&ctx.ops)).expect("move");
    assert_eq!(ctx.tree.path_key(&ctx.oncall).as_deref(), Some("Ops-Oncall"));
    assert!(ctx.tree.children(Some(&ctx.backend)).is_empty());

    ctx.tree.move_to(&ctx.backend, None).expect("move to root");
    let roots = ctx.tree.roots();
    assert_eq!(roots.iter().map(|c| c.name()).collect::<Vec<_>>(), ["Eng", "Ops", "Backend"]);
}

#[rstest]
fn siblings_order_by_sort_order_then_id() {
    let tree = CategoryTree::from_categories(vec![
        Category::new(id("b"), "B").with_sort_order(1),
        Category::new(id("c"), "C").with_sort_order(0),
        Category::new(id("a"), "A").with_sort_order(1),
    ]);
    let names = tree.roots().iter().map(|c| c.name()).collect::<Vec<_>>();
    assert_eq!(names, ["C", "A", "B"]);
}

#[rstest]
fn delete_cascades_to_descendants(mut ctx: TreeCtx) {
    let removed = ctx.tree.delete(&ctx.eng).expect("delete");
    assert_eq!(removed, vec![ctx.eng.clone(), ctx.backend.clone(), ctx.oncall.clone()]);
    assert_eq!(ctx.tree.len(), 1);
    assert!(ctx.tree.contains(&ctx.ops));

    assert!(matches!(
        ctx.tree.delete(&ctx.eng).unwrap_err(),
        CategoryError::NotFound { .. }
    ));
}

#[rstest]
fn upsert_inserts_replaces_and_checks_cycles(mut ctx: TreeCtx) {
    let team = Category::new(id("team"), "Team").with_parent(Some(ctx.ops.clone()));
    ctx.tree.upsert(team).expect("insert");
    assert_eq!(ctx.tree.path_key(&id("team")).as_deref(), Some("Ops-Team"));

    let renamed = Category::new(id("team"), " Crew ").with_parent(Some(ctx.ops.clone()));
    ctx.tree.upsert(renamed).expect("replace");
    assert_eq!(ctx.tree.len(), 5);
    assert_eq!(ctx.tree.get(&id("team")).expect("team").name(), "Crew");

    let cyclic = Category::new(ctx.eng.clone(), "Eng").with_parent(Some(ctx.oncall.clone()));
    assert!(matches!(
        ctx.tree.upsert(cyclic).unwrap_err(),
        CategoryError::CycleRejected { .. }
    ));
    assert!(ctx.tree.get(&ctx.eng).expect("eng").is_root());
}

#[test]
fn ancestors_survive_persisted_cycles() {
    let tree = CategoryTree::from_categories(vec![
        Category::new(id("a"), "A").with_parent(Some(id("b"))),
        Category::new(id("b"), "B").with_parent(Some(id("a"))),
    ]);
    let chain = tree.ancestors(&id("a"));
    assert_eq!(chain.len(), 2);
    assert_eq!(tree.path_key(&id("a")).as_deref(), Some("B-A"));
    assert_eq!(tree.descendants(&id("a")), vec![id("b")]);
}
