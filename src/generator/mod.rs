//! Generator module - assembles page props from articles and writes them as JSON
//!
//! The props are the plain data the site's page templates consume: one
//! object per article page, one for the letters list, and the list of
//! static paths to prerender.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tokio::task::JoinSet;

use crate::content::collection::without_skipped;
use crate::content::{ArticleLoader, ContentError, Fields, MarkdownRenderer};
use crate::helpers::{full_url_for, iso_instant, parse_date, url_for};
use crate::Site;

/// Fields an article page needs
const POST_FIELDS: &[&str] = &[
    "canonical_url",
    "content",
    "date",
    "description",
    "image",
    "lang",
    "slug",
    "title",
];

/// Fields of each entry in the letters list
const LIST_FIELDS: &[&str] = &["date", "skip", "slug", "title"];

/// Fields of each featured letter
const FEATURED_FIELDS: &[&str] = &["date", "slug", "title", "image", "content", "description"];

const WORDS_PER_MINUTE: usize = 200;

/// Props of one article page
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PostPage {
    Found(Box<PostProps>),
    NotFound { error_code: u16 },
}

impl PostPage {
    fn not_found() -> Self {
        PostPage::NotFound { error_code: 404 }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostProps {
    /// Page title, suffixed with the author
    pub title: String,
    pub description: String,
    pub slug: String,
    pub url: String,
    pub image: String,
    /// Publication instant, when the article's date parses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Rendered HTML body
    pub content: String,
    pub json_ld: serde_json::Value,
}

/// Props of the letters list page
#[derive(Debug, Clone, Serialize)]
pub struct LettersPage {
    pub title: String,
    pub tagline: String,
    pub image: String,
    pub featured_posts: Vec<FeaturedEntry>,
    pub all_posts: Vec<ListEntry>,
    /// Number of articles in the store, skipped ones included
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub href: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeaturedEntry {
    pub href: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub reading_time: String,
}

/// A route to prerender
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticPath {
    pub slug: String,
    pub path: String,
}

/// Assembles page props for the letters section
#[derive(Clone)]
pub struct Generator {
    site: Site,
    loader: ArticleLoader,
    renderer: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Self {
        Self {
            site: site.clone(),
            loader: site.loader(),
            renderer: site.renderer(),
        }
    }

    pub fn loader(&self) -> &ArticleLoader {
        &self.loader
    }

    /// Build the props of one article page
    ///
    /// A slug without an article yields [`PostPage::NotFound`]; other
    /// failures are returned to the caller.
    pub async fn post_page(&self, slug: &str) -> Result<PostPage, ContentError> {
        let mut post = match self.loader.load_fields(slug, POST_FIELDS) {
            Ok(post) => post,
            Err(e) if e.is_not_found() => {
                tracing::debug!("No article for {}", slug);
                return Ok(PostPage::not_found());
            }
            Err(e) => return Err(e),
        };

        let markdown = post.take("content").unwrap_or_default();
        let content = self.renderer.render(&markdown).await?;

        Ok(PostPage::Found(Box::new(self.post_props(&post, content))))
    }

    fn post_props(&self, post: &Fields, content: String) -> PostProps {
        let config = &self.site.config;
        let slug = post.slug().unwrap_or_default().to_string();

        let title = format!("{} // {}", post.title().unwrap_or_default(), config.author);
        let description = post.description().unwrap_or_default().to_string();
        let url = full_url_for(config, &slug);
        let image = full_url_for(config, post.image().unwrap_or(config.default_image.as_str()));
        let date = post.date().and_then(parse_date).map(|d| iso_instant(&d));

        let json_ld = serde_json::json!({
            "@context": "https://schema.org",
            "@type": "Blog",
            "mainEntityOfPage": { "@type": "WebPage", "@id": url },
            "headline": title,
            "image": [image],
            "datePublished": date,
            "dateModified": date,
            "author": { "@type": "Person", "name": config.author },
            "description": description,
        });

        PostProps {
            title,
            description,
            slug,
            url,
            image,
            date,
            canonical_url: post.canonical_url().map(str::to_string),
            lang: post.lang().map(str::to_string),
            content,
            json_ld,
        }
    }

    /// Build the props of the letters list page
    pub fn letters_page(&self) -> Result<LettersPage, ContentError> {
        let config = &self.site.config;

        let posts = self.loader.load_all(LIST_FIELDS)?;
        let count = posts.len();

        let all_posts = without_skipped(posts)
            .iter()
            .map(|post| ListEntry {
                href: self.href(post),
                title: post.title().unwrap_or_default().to_string(),
                date: post.date().map(str::to_string),
            })
            .collect();

        let featured_posts = self
            .loader
            .load_featured(&config.letters.featured, FEATURED_FIELDS)?
            .iter()
            .map(|post| FeaturedEntry {
                href: self.href(post),
                title: post.title().unwrap_or_default().to_string(),
                description: post.description().unwrap_or_default().to_string(),
                image: post.image().unwrap_or_default().to_string(),
                reading_time: reading_time(post.content().unwrap_or_default()),
            })
            .collect();

        Ok(LettersPage {
            title: format!("{} // {}", config.letters.title, config.author),
            tagline: config.letters.tagline.clone(),
            image: config.letters.image.clone(),
            featured_posts,
            all_posts,
            count,
        })
    }

    /// Enumerate one route per article
    pub fn static_paths(&self) -> Result<Vec<StaticPath>, ContentError> {
        Ok(self
            .loader
            .load_all(&["slug"])?
            .iter()
            .map(|post| StaticPath {
                slug: post.slug().unwrap_or_default().to_string(),
                path: self.href(post),
            })
            .collect())
    }

    fn href(&self, post: &Fields) -> String {
        url_for(
            &self.site.config,
            &format!("{}/", post.slug().unwrap_or_default()),
        )
    }

    /// Write every page's props into the public directory
    ///
    /// Returns the number of article pages written.
    pub async fn generate(&self) -> Result<usize> {
        let public_dir = &self.site.public_dir;
        fs::create_dir_all(public_dir)
            .with_context(|| format!("Failed to create {:?}", public_dir))?;

        let letters = self.letters_page()?;
        write_json(&public_dir.join("letters.json"), &letters)?;
        tracing::info!("Generated letters.json ({} entries)", letters.all_posts.len());

        let paths = self.static_paths()?;
        write_json(&public_dir.join("paths.json"), &paths)?;

        // Each article loads and renders independently
        let mut tasks = JoinSet::new();
        for path in paths {
            let generator = self.clone();
            tasks.spawn(async move {
                let page = generator.post_page(&path.slug).await;
                (path.slug, page)
            });
        }

        let mut written = 0;
        while let Some(joined) = tasks.join_next().await {
            let (slug, page) = joined?;
            let page = page.with_context(|| format!("Failed to generate {}", slug))?;
            write_json(&public_dir.join(&slug).join("index.json"), &page)?;
            tracing::debug!("Generated {}/index.json", slug);
            written += 1;
        }

        Ok(written)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

/// Estimated reading time of a markdown body, e.g. "3 min read"
pub fn reading_time(markdown: &str) -> String {
    let words = count_words(markdown);
    format!("{} min read", words.div_ceil(WORDS_PER_MINUTE))
}

/// Count words in text (CJK characters count as one word each)
fn count_words(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphanumeric() && !is_cjk(c) {
            if !in_word {
                in_word = true;
                count += 1;
            }
        } else if is_cjk(c) {
            count += 1;
            in_word = false;
        } else if c == '\'' && in_word {
            // Contractions stay one word
        } else {
            in_word = false;
        }
    }

    count
}

fn is_cjk(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}
