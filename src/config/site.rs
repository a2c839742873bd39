//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub author: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub articles_dir: String,
    pub public_dir: String,

    // Writing
    pub default_image: String,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Letters list page
    #[serde(default)]
    pub letters: LettersConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            author: "Driss Nafii".to_string(),

            url: "https://drissnafii.me".to_string(),
            root: "/".to_string(),

            articles_dir: "articles".to_string(),
            public_dir: "public".to_string(),

            default_image: "/static/images/home-opt.jpg".to_string(),
            highlight: HighlightConfig::default(),

            letters: LettersConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }
}

/// Settings for the letters list page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LettersConfig {
    pub title: String,
    pub tagline: String,
    pub image: String,
    /// Slugs shown as featured, in display order
    #[serde(default)]
    pub featured: Vec<String>,
}

impl Default for LettersConfig {
    fn default() -> Self {
        Self {
            title: "Letters".to_string(),
            tagline: "Stories. Updates. Guides.".to_string(),
            image: "/static/images/articles-bw.jpg".to_string(),
            featured: Vec::new(),
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
