// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logbook-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logbook and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Logbook CLI entrypoint.
//!
//! Manages the category tree and templates of a template store and renders work-log entries from
//! the effective template of a category path.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use logbook::config::Config;
use logbook::model::{
    Category, CategoryId, CategoryPath, PlaceholderKind, Template, TemplateId,
};
use logbook::render::{parse_datetime, placeholder_tokens, FieldValue, FieldValues, Renderer};
use logbook::resolve::{resolve_effective_template, EffectiveTemplate};
use logbook::store::{ErrorKind, TemplateStore};

#[derive(Debug, Parser)]
#[command(name = "logbook", version, about = "Hierarchical work-log templates", long_about = None)]
struct Cli {
    /// Template store document (overrides `store_path`).
    #[arg(long, global = true, value_name = "FILE")]
    store: Option<PathBuf>,

    /// Read settings from this file instead of the default locations.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// fsync the store on save.
    #[arg(long, global = true)]
    durable_writes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List categories as a tree with their path keys.
    Categories,
    /// Create a category.
    AddCategory {
        name: String,
        /// Path key of the parent; omit for a root category.
        #[arg(long)]
        parent: Option<String>,
    },
    /// Rename the category at a path key.
    RenameCategory { path: String, new_name: String },
    /// Move the category at a path key under another one.
    MoveCategory {
        path: String,
        /// Path key of the new parent; omit to make it a root.
        #[arg(long)]
        to: Option<String>,
    },
    /// Remove a category, its descendants and their templates.
    RemoveCategory { path: String },
    /// Create or replace the template owned by a category.
    SetTemplate {
        path: String,
        /// Template name; defaults to the category name.
        #[arg(long)]
        name: Option<String>,
        /// Format text.
        #[arg(long, default_value = "")]
        content: String,
        /// Placeholder declaration, `name=kind` (text, multiline, choice, multichoice, datetime).
        #[arg(long = "placeholder", value_name = "NAME=KIND")]
        placeholders: Vec<String>,
        /// Allowed value for a choice placeholder, `name=value`. Repeatable.
        #[arg(long = "option", value_name = "NAME=VALUE")]
        options: Vec<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Remove the template owned by a category.
    RemoveTemplate { path: String },
    /// Show the effective template of a category path.
    Show { path: String },
    /// Render the effective template of a category path.
    Render {
        path: String,
        /// Item title for `{ItemTitle}`.
        #[arg(long, default_value = "")]
        title: String,
        /// Field value, `name=value`. Date/time placeholders also accept `now`.
        #[arg(long = "set", value_name = "NAME=VALUE")]
        values: Vec<String>,
    },
    /// List the placeholder tokens used by the effective template.
    Tokens { path: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;
    if let Some(store) = &cli.store {
        config.store_path.clone_from(store);
    }
    config.durable_writes |= cli.durable_writes;

    logbook::observability::init(&config.log_level).context("installing log subscriber")?;
    debug!(store = %config.store_path.display(), "starting");

    run(cli.command, &config)
}

fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Categories => {
            let store = open_store(config, false)?;
            print_tree(&store, None, 0);
        }
        Command::AddCategory { name, parent } => {
            let mut store = open_store(config, true)?;
            let parent_id = parent
                .as_deref()
                .map(|key| category_at(&store, key))
                .transpose()?;
            let category = store.create_category(&name, parent_id.as_ref())?;
            let key = store
                .categories()
                .path_key(category.category_id())
                .unwrap_or_default();
            store.save()?;
            println!("{key}\t{}", category.category_id());
        }
        Command::RenameCategory { path, new_name } => {
            let mut store = open_store(config, false)?;
            let category_id = category_at(&store, &path)?;
            store.rename_category(&category_id, &new_name)?;
            store.save()?;
        }
        Command::MoveCategory { path, to } => {
            let mut store = open_store(config, false)?;
            let category_id = category_at(&store, &path)?;
            let parent_id = to
                .as_deref()
                .map(|key| category_at(&store, key))
                .transpose()?;
            store
                .move_category(&category_id, parent_id.as_ref())
                .map_err(|err| match err.kind() {
                    ErrorKind::CycleRejected => {
                        anyhow!("cannot move {path} under its own subtree")
                    }
                    _ => err.into(),
                })?;
            store.save()?;
        }
        Command::RemoveCategory { path } => {
            let mut store = open_store(config, false)?;
            let category_id = category_at(&store, &path)?;
            let removed = store.remove_category(&category_id)?;
            store.save()?;
            println!(
                "removed {} categories and {} templates",
                removed.categories.len(),
                removed.templates.len()
            );
        }
        Command::SetTemplate {
            path,
            name,
            content,
            placeholders,
            options,
            tags,
        } => {
            let mut store = open_store(config, true)?;
            let template =
                build_template(&store, &path, name, content, &placeholders, &options, tags)?;
            store.add_or_update_template(template)?;
            store.save()?;
        }
        Command::RemoveTemplate { path } => {
            let mut store = open_store(config, false)?;
            let category_id = category_at(&store, &path)?;
            let template_id = store
                .template_for_category(&category_id)
                .map(|t| t.template_id().clone())
                .ok_or_else(|| anyhow!("category {path} has no template of its own"))?;
            store.remove_template(&template_id)?;
            store.save()?;
        }
        Command::Show { path } => {
            let store = open_store(config, false)?;
            let effective = effective_at(&store, &path)?;
            print_effective(&effective);
        }
        Command::Render {
            path,
            title,
            values,
        } => {
            let store = open_store(config, false)?;
            let effective = effective_at(&store, &path)?;
            let values = field_values(&effective, &path, &values)?;
            let renderer = Renderer::new(config.render_options());
            println!("{}", renderer.render(effective.format_text(), &values, &title));
        }
        Command::Tokens { path } => {
            let store = open_store(config, false)?;
            let effective = effective_at(&store, &path)?;
            for token in placeholder_tokens(effective.format_text()) {
                println!("{token}");
            }
        }
    }
    Ok(())
}

/// Loads the configured store. With `create_missing`, a missing file yields an empty store that
/// saves to the configured path.
fn open_store(config: &Config, create_missing: bool) -> Result<TemplateStore> {
    let path = config.store_path.as_path();
    match TemplateStore::open(path) {
        Ok(store) => Ok(store.with_durability(config.write_durability())),
        Err(err) if create_missing && err.kind() == ErrorKind::NotFound => {
            let mut store = TemplateStore::new().with_durability(config.write_durability());
            store.set_location(path);
            Ok(store)
        }
        Err(err) => Err(err).with_context(|| store_hint(path)),
    }
}

fn store_hint(path: &Path) -> String {
    format!("opening template store {}", path.display())
}

fn category_at(store: &TemplateStore, key: &str) -> Result<CategoryId> {
    let path = key
        .parse::<CategoryPath>()
        .with_context(|| format!("invalid category path {key:?}"))?;
    store
        .categories()
        .find_by_path(&path.to_string())
        .map(|category| category.category_id().clone())
        .ok_or_else(|| anyhow!("no category at path {key:?}"))
}

fn effective_at(store: &TemplateStore, key: &str) -> Result<EffectiveTemplate> {
    resolve_effective_template(store, key)
        .ok_or_else(|| anyhow!("no template on the category chain of {key:?}"))
}

fn split_pair(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim(), value))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| anyhow!("expected NAME=VALUE, got {raw:?}"))
}

fn build_template(
    store: &TemplateStore,
    key: &str,
    name: Option<String>,
    content: String,
    placeholders: &[String],
    options: &[String],
    tags: Vec<String>,
) -> Result<Template> {
    let category_id = category_at(store, key)?;
    let category_name = store
        .categories()
        .get(&category_id)
        .map(Category::name)
        .unwrap_or(key)
        .to_owned();
    let template_id = store
        .template_for_category(&category_id)
        .map(|t| t.template_id().clone())
        .unwrap_or_else(TemplateId::generate);

    let mut template = Template::new(template_id, name.unwrap_or(category_name), category_id)
        .with_content(content);
    template.set_tags(tags);
    for raw in placeholders {
        let (name, kind) = split_pair(raw)?;
        let kind = kind
            .parse::<PlaceholderKind>()
            .with_context(|| format!("placeholder {name:?}"))?;
        template.set_placeholder(name, kind);
    }
    for raw in options {
        let (name, value) = split_pair(raw)?;
        template.add_options(name, [value]);
    }
    Ok(template)
}

fn field_values(effective: &EffectiveTemplate, key: &str, raw: &[String]) -> Result<FieldValues> {
    let mut values = FieldValues::new().with_category_path(key);
    for pair in raw {
        let (name, value) = split_pair(pair)?;
        let is_datetime = effective
            .placeholders()
            .iter()
            .any(|(declared, kind)| declared.matches(name) && *kind == PlaceholderKind::DateTime);
        let value = if is_datetime && value.trim().eq_ignore_ascii_case("now") {
            FieldValue::DateTime(chrono::Local::now().naive_local())
        } else if is_datetime {
            parse_datetime(value)
                .map(FieldValue::DateTime)
                .ok_or_else(|| anyhow!("{name}: {value:?} is not a date/time"))?
        } else {
            FieldValue::from(value)
        };
        values.insert(name, value);
    }
    Ok(values)
}

fn print_tree(store: &TemplateStore, parent_id: Option<&CategoryId>, depth: usize) {
    for category in store.categories().children(parent_id) {
        let marker = if store.template_for_category(category.category_id()).is_some() {
            " *"
        } else {
            ""
        };
        let key = store
            .categories()
            .path_key(category.category_id())
            .unwrap_or_default();
        println!("{}{}{marker}\t{key}", "  ".repeat(depth), category.name());
        print_tree(store, Some(category.category_id()), depth + 1);
    }
}

fn print_effective(effective: &EffectiveTemplate) {
    println!("sources: {}", effective.sources().join(" > "));
    println!("placeholders:");
    for (name, kind) in effective.placeholders() {
        match effective.options_for(name.as_str()) {
            Some(options) if !options.is_empty() => {
                println!("  {name}: {kind} [{}]", options.join(", "))
            }
            _ => println!("  {name}: {kind}"),
        }
    }
    let undeclared = effective.undeclared_placeholders();
    if !undeclared.is_empty() {
        println!("undeclared: {}", undeclared.join(", "));
    }
    println!("---");
    println!("{}", effective.format_text());
}
