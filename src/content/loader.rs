//! Article loader - materializes articles and requested fields from the store

use serde::Serialize;

use super::{ContentError, ContentStore, Fields, FrontMatter};

/// One article as read from the store
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    /// Filename without the `.md` extension
    pub slug: String,

    /// Metadata block
    pub front_matter: FrontMatter,

    /// Raw markdown after the metadata block
    pub body: String,
}

impl Article {
    /// Project the requested fields out of this article
    ///
    /// `slug` and `content` are synthesized; anything else comes from the
    /// front-matter and is left out when the article does not define it.
    pub fn fields(&self, fields: &[&str]) -> Fields {
        let mut items = Fields::new();
        for &field in fields {
            match field {
                "slug" => items.insert(field, self.slug.as_str()),
                "content" => items.insert(field, self.body.as_str()),
                _ => {
                    if let Some(value) = self.front_matter.get(field) {
                        items.insert(field, value);
                    }
                }
            }
        }
        items
    }
}

/// Loads articles from a content store
#[derive(Debug, Clone)]
pub struct ArticleLoader {
    store: ContentStore,
}

impl ArticleLoader {
    /// Create a new article loader
    pub fn new(store: ContentStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Load a single article
    pub fn load_article(&self, slug: &str) -> Result<Article, ContentError> {
        let (slug, text) = self.store.read(slug)?;
        let (front_matter, body) =
            FrontMatter::parse(&text).map_err(|e| ContentError::MalformedFrontMatter {
                slug: slug.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!("Loaded article {} ({} front-matter keys)", slug, front_matter.len());

        Ok(Article {
            body: body.to_string(),
            slug,
            front_matter,
        })
    }

    /// Load only the requested fields of an article
    pub fn load_fields(&self, slug: &str, fields: &[&str]) -> Result<Fields, ContentError> {
        Ok(self.load_article(slug)?.fields(fields))
    }
}
