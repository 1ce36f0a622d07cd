// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logbook-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logbook and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::TempDir;

use logbook::model::{CategoryId, PlaceholderKind, Template, TemplateId};
use logbook::resolve::TemplateLookup;
use logbook::render::{render_template, FieldValues};
use logbook::resolve::resolve_effective_template;
use logbook::store::{ErrorKind, TemplateStore};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("worklog")
        .join("templates.json")
}

fn open_copy() -> (TempDir, PathBuf, TemplateStore) {
    let tmp = TempDir::new().expect("temp dir");
    let path = tmp.path().join("templates.json");
    fs::copy(fixture_path(), &path).expect("copy fixture");
    let store = TemplateStore::open(&path).expect("open fixture store");
    (tmp, path, store)
}

fn id(raw: &str) -> CategoryId {
    CategoryId::new(raw).expect("category id")
}

#[test]
fn standup_entry_renders_from_inherited_templates() {
    let (_tmp, _path, store) = open_copy();

    let effective =
        resolve_effective_template(&store, "Work-Meetings-Standup").expect("effective template");
    assert_eq!(effective.sources(), ["Work", "Work-Meetings"]);
    assert_eq!(
        effective.options_for("project"),
        Some(&["logbook".to_owned(), "infra".to_owned(), "hiring".to_owned()][..])
    );
    assert_eq!(
        effective
            .placeholders()
            .iter()
            .find(|(name, _)| name.matches("attendees"))
            .map(|(_, kind)| *kind),
        Some(PlaceholderKind::MultipleChoice)
    );

    let logged = NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|date| date.and_hms_opt(9, 15, 0))
        .expect("timestamp");
    let values = FieldValues::new()
        .with_category_path("Work-Meetings-Standup")
        .with("logged", logged)
        .with("Attendees", "ana, li");

    assert_eq!(
        render_template(effective.format_text(), &values, "Daily sync"),
        "Daily sync [Work-Meetings-Standup]\nLogged: 2024-05-01 09:15\n\nAttendees: ana, li\nNotes: "
    );
}

#[test]
fn category_without_chain_template_has_no_effective_template() {
    let (_tmp, _path, store) = open_copy();
    assert!(resolve_effective_template(&store, "Personal").is_none());
    assert!(resolve_effective_template(&store, "").is_none());

    let reviews = resolve_effective_template(&store, "Work-Reviews").expect("inherits Work");
    assert_eq!(reviews.sources(), ["Work"]);
}

#[test]
fn edits_survive_save_and_reload() {
    let (_tmp, path, mut store) = open_copy();

    let oncall = store
        .create_category("Oncall", Some(&id("work")))
        .expect("create");
    store
        .add_or_update_template(
            Template::new(TemplateId::generate(), "Oncall", oncall.category_id().clone())
                .with_content("Pager: {pager}")
                .with_placeholder("pager", PlaceholderKind::Text),
        )
        .expect("template");
    store.rename_category(&id("meetings"), "Syncs").expect("rename");

    let err = store
        .move_category(&id("work"), Some(&id("standup")))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CycleRejected);

    store.save().expect("save");
    let reloaded = TemplateStore::open(&path).expect("reload");

    assert_eq!(reloaded.categories().list(), store.categories().list());
    assert_eq!(reloaded.templates(), store.templates());
    assert!(reloaded.template_for_path("Work-Oncall").is_some());
    assert!(resolve_effective_template(&reloaded, "Work-Syncs-Standup").is_some());
    assert!(resolve_effective_template(&reloaded, "Work-Meetings-Standup")
        .is_some_and(|effective| effective.sources() == ["Work"]));
}

#[test]
fn removing_a_branch_drops_its_templates_on_disk() {
    let (_tmp, path, mut store) = open_copy();
    let removed = store.remove_category(&id("meetings")).expect("remove");
    assert_eq!(removed.categories.len(), 2);
    assert_eq!(removed.templates.len(), 1);
    store.save().expect("save");

    let raw = fs::read_to_string(&path).expect("read");
    assert!(!raw.contains("tpl-meetings"));
    assert!(!raw.contains("\"standup\""));

    let reloaded = TemplateStore::open(&path).expect("reload");
    assert_eq!(reloaded.categories().len(), 3);
    assert_eq!(reloaded.templates().len(), 1);
}
