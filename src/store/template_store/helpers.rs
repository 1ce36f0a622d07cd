// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logbook-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logbook and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Template store persistence helpers:
// document <-> model conversion, load-time integrity checks and safe filesystem writes.

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreDocumentJson {
    #[serde(default = "default_document_version")]
    version: u32,
    #[serde(default)]
    categories: Vec<CategoryJson>,
    #[serde(default)]
    templates: Vec<TemplateJson>,
}

fn default_document_version() -> u32 {
    STORE_FORMAT_VERSION
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CategoryJson {
    id: String,
    name: String,
    #[serde(default)]
    parent_id: Option<String>,
    #[serde(default)]
    sort_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TemplateJson {
    id: String,
    name: String,
    category_id: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    placeholders: BTreeMap<String, String>,
    #[serde(default)]
    options: BTreeMap<String, Vec<String>>,
}

fn store_to_json(categories: &CategoryTree, templates: &[Template]) -> StoreDocumentJson {
    StoreDocumentJson {
        version: STORE_FORMAT_VERSION,
        categories: categories
            .list()
            .iter()
            .map(|category| CategoryJson {
                id: category.category_id().to_string(),
                name: category.name().to_owned(),
                parent_id: category.parent_id().map(ToString::to_string),
                sort_order: category.sort_order(),
            })
            .collect(),
        templates: templates.iter().map(template_to_json).collect(),
    }
}

fn template_to_json(template: &Template) -> TemplateJson {
    TemplateJson {
        id: template.template_id().to_string(),
        name: template.name().to_owned(),
        category_id: template.category_id().to_string(),
        content: template.content().to_owned(),
        tags: template.tags().to_vec(),
        placeholders: template
            .placeholders()
            .iter()
            .map(|(name, kind)| (name.to_string(), kind.as_str().to_owned()))
            .collect(),
        options: template
            .options()
            .iter()
            .map(|(name, values)| (name.to_string(), values.clone()))
            .collect(),
    }
}

fn invalid(path: &Path, reason: impl Into<String>) -> StoreError {
    StoreError::Invalid {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

fn parse_id<T>(path: &Path, field: &str, value: String) -> Result<crate::model::Id<T>, StoreError> {
    crate::model::Id::new(value.clone()).map_err(|err: IdError| {
        invalid(path, format!("{field}: {err} (value {value:?})"))
    })
}

fn store_from_json(
    path: &Path,
    document: StoreDocumentJson,
) -> Result<(CategoryTree, Vec<Template>), StoreError> {
    if document.version > STORE_FORMAT_VERSION {
        return Err(invalid(
            path,
            format!(
                "unsupported document version {} (newest supported is {STORE_FORMAT_VERSION})",
                document.version
            ),
        ));
    }

    let mut categories = Vec::with_capacity(document.categories.len());
    let mut category_ids = BTreeSet::<CategoryId>::new();
    for category_json in document.categories {
        let category_id: CategoryId = parse_id(path, "categories[].id", category_json.id)?;
        if !category_ids.insert(category_id.clone()) {
            return Err(invalid(path, format!("duplicate category id {category_id}")));
        }
        let parent_id = category_json
            .parent_id
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| parse_id::<_>(path, "categories[].parent_id", raw))
            .transpose()?;
        categories.push(
            Category::new(category_id, category_json.name)
                .with_parent(parent_id)
                .with_sort_order(category_json.sort_order),
        );
    }

    for category in &categories {
        if let Some(parent_id) = category.parent_id() {
            if !category_ids.contains(parent_id) {
                return Err(invalid(
                    path,
                    format!(
                        "category {} references unknown parent {parent_id}",
                        category.category_id()
                    ),
                ));
            }
        }
    }

    let mut templates = Vec::<Template>::with_capacity(document.templates.len());
    let mut template_ids = BTreeSet::<TemplateId>::new();
    for template_json in document.templates {
        let template = template_from_json(path, template_json)?;
        if !template_ids.insert(template.template_id().clone()) {
            return Err(invalid(
                path,
                format!("duplicate template id {}", template.template_id()),
            ));
        }
        if !category_ids.contains(template.category_id()) {
            return Err(invalid(
                path,
                format!(
                    "template {} references unknown category {}",
                    template.template_id(),
                    template.category_id()
                ),
            ));
        }
        if let Some(other) = templates
            .iter()
            .find(|t| t.category_id() == template.category_id())
        {
            warn!(
                category_id = %template.category_id(),
                kept = %other.template_id(),
                shadowed = %template.template_id(),
                "category owns more than one template; lookups use the first"
            );
        }
        templates.push(template);
    }

    Ok((CategoryTree::from_categories(categories), templates))
}

fn template_from_json(path: &Path, template_json: TemplateJson) -> Result<Template, StoreError> {
    let template_id: TemplateId = parse_id(path, "templates[].id", template_json.id)?;
    let category_id: CategoryId =
        parse_id(path, "templates[].category_id", template_json.category_id)?;

    let mut template = Template::new(template_id, template_json.name, category_id)
        .with_content(template_json.content);
    template.set_tags(template_json.tags);

    for (name, raw_kind) in template_json.placeholders {
        let kind = raw_kind.parse::<PlaceholderKind>().map_err(|err| {
            invalid(
                path,
                format!("template {}: placeholder {name:?}: {err}", template.template_id()),
            )
        })?;
        template.set_placeholder(PlaceholderName::new(name), kind);
    }

    // Keys differing only in case collapse into one list.
    for (name, values) in template_json.options {
        template.add_options(PlaceholderName::new(name), values);
    }

    Ok(template)
}

fn write_atomic(path: &Path, contents: &[u8], durability: WriteDurability) -> Result<(), StoreError> {
    let write_err = |path: &Path, source: io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|source| write_err(&parent, source))?;

    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::SymlinkRefused {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => return Err(write_err(path, source)),
    }

    let Some(file_name) = path.file_name() else {
        return Err(write_err(path, io::Error::other("path has no file name")));
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".logbook.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| write_err(&tmp_path, source))?;

    if let Err(source) = file.write_all(contents) {
        drop(file);
        let _ = fs::remove_file(&tmp_path);
        return Err(write_err(&tmp_path, source));
    }

    if durability == WriteDurability::Durable {
        if let Err(source) = file.sync_all() {
            drop(file);
            let _ = fs::remove_file(&tmp_path);
            return Err(write_err(&tmp_path, source));
        }
    }
    drop(file);

    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_err(path, source));
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(&parent).map_err(|source| write_err(&parent, source))?;
            dir.sync_all().map_err(|source| write_err(&parent, source))?;
        }
    }

    Ok(())
}
