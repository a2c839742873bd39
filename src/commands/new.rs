//! Create a new article

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::content::store::normalize_slug;
use crate::Site;

/// Write a new article scaffold into the store
///
/// The slug defaults to the slugified title.
pub fn create_article(site: &Site, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(slug) => normalize_slug(slug).to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() || slug.contains(['/', '\\']) {
        anyhow::bail!("Invalid slug: {:?}", slug);
    }

    fs::create_dir_all(&site.articles_dir)
        .with_context(|| format!("Failed to create {:?}", site.articles_dir))?;

    let file_path = site.store().path_for(&slug);
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let today = chrono::Local::now().format("%Y-%m-%d");
    let content = format!(
        "---\ntitle: {}\ndate: {}\ndescription: \"\"\n---\n\n",
        yaml_string(title),
        today
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Quote a title so any YAML-significant characters survive
fn yaml_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
