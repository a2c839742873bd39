//! Collection builder - every article's fields, newest first

use std::cmp::Reverse;

use super::{ArticleLoader, ContentError, Fields};

impl ArticleLoader {
    /// Load the requested fields of every article, sorted by date descending
    ///
    /// Articles without a `date` field come last. Articles with equal dates
    /// keep the store's enumeration order. Pass `date` in `fields` for the
    /// ordering to take effect.
    pub fn load_all(&self, fields: &[&str]) -> Result<Vec<Fields>, ContentError> {
        let slugs = self.store().list_slugs()?;

        let mut posts = slugs
            .iter()
            .map(|slug| self.load_fields(slug, fields))
            .collect::<Result<Vec<_>, _>>()?;

        // Sort by date descending (newest first)
        posts.sort_by_cached_key(|post| Reverse(post.date_key()));

        Ok(posts)
    }

    /// Load specific articles in the given order, without sorting
    pub fn load_featured<S: AsRef<str>>(
        &self,
        slugs: &[S],
        fields: &[&str],
    ) -> Result<Vec<Fields>, ContentError> {
        slugs
            .iter()
            .map(|slug| self.load_fields(slug.as_ref(), fields))
            .collect()
    }
}

/// Drop entries whose `skip` flag is set
pub fn without_skipped(posts: Vec<Fields>) -> Vec<Fields> {
    posts.into_iter().filter(|post| !post.skip()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentStore;
    use std::fs;

    fn loader_with(files: &[(&str, &str)]) -> (tempfile::TempDir, ArticleLoader) {
        let dir = tempfile::tempdir().unwrap();
        for (name, text) in files {
            fs::write(dir.path().join(name), text).unwrap();
        }
        let loader = ArticleLoader::new(ContentStore::new(dir.path()));
        (dir, loader)
    }

    fn dated(date: &str) -> String {
        format!("---\ntitle: Post\ndate: {}\n---\nBody", date)
    }

    #[test]
    fn test_load_all_sorts_newest_first() {
        let (_dir, loader) = loader_with(&[
            ("january.md", dated("2024-01-01").as_str()),
            ("undated.md", "---\ntitle: Undated\n---\nBody"),
            ("june.md", dated("2024-06-01").as_str()),
        ]);

        let posts = loader.load_all(&["date", "slug"]).unwrap();
        let order: Vec<_> = posts.iter().map(|p| p.slug().unwrap()).collect();
        assert_eq!(order, vec!["june", "january", "undated"]);

        let dates: Vec<_> = posts.iter().map(|p| p.date()).collect();
        assert_eq!(dates, vec![Some("2024-06-01"), Some("2024-01-01"), None]);
    }

    #[test]
    fn test_load_all_returns_every_article() {
        let (_dir, loader) = loader_with(&[
            ("a.md", dated("2023-03-03").as_str()),
            ("b.md", dated("2023-03-03").as_str()),
            ("c.md", "No front-matter at all"),
        ]);
        let posts = loader.load_all(&["slug"]).unwrap();
        assert_eq!(posts.len(), 3);
        assert!(posts.iter().all(|p| p.len() == 1));
    }

    #[test]
    fn test_load_all_with_dotted_filenames() {
        let (_dir, loader) = loader_with(&[
            ("ok.md", dated("2024-01-01").as_str()),
            ("wait...what.md", dated("2024-02-01").as_str()),
        ]);
        let slugs = loader.store().list_slugs().unwrap();
        let posts = loader.load_all(&["slug", "date"]).unwrap();
        assert_eq!(posts.len(), slugs.len());
        let order: Vec<_> = posts.iter().map(|p| p.slug().unwrap()).collect();
        assert_eq!(order, vec!["wait...what", "ok"]);
    }

    #[test]
    fn test_ties_are_deterministic() {
        let (_dir, loader) = loader_with(&[
            ("a.md", dated("2023-03-03").as_str()),
            ("b.md", dated("2023-03-03").as_str()),
            ("c.md", dated("2023-03-03").as_str()),
        ]);
        let first = loader.load_all(&["date", "slug"]).unwrap();
        let second = loader.load_all(&["date", "slug"]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_all_propagates_bad_articles() {
        let (_dir, loader) = loader_with(&[
            ("good.md", dated("2024-01-01").as_str()),
            ("bad.md", "---\ntitle: unterminated\n"),
        ]);
        let err = loader.load_all(&["slug"]).unwrap_err();
        assert!(matches!(err, ContentError::MalformedFrontMatter { .. }));
    }

    #[test]
    fn test_load_all_missing_store() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ArticleLoader::new(ContentStore::new(dir.path().join("articles")));
        let err = loader.load_all(&["slug"]).unwrap_err();
        assert!(matches!(err, ContentError::StoreUnavailable { .. }));
    }

    #[test]
    fn test_skip_filter() {
        let (_dir, loader) = loader_with(&[
            ("shown.md", "---\ndate: 2024-01-01\n---\n"),
            ("hidden.md", "---\ndate: 2024-02-01\nskip: true\n---\n"),
            ("explicit.md", "---\ndate: 2024-03-01\nskip: false\n---\n"),
        ]);
        let posts = loader.load_all(&["date", "skip", "slug"]).unwrap();
        assert_eq!(posts.len(), 3);

        let visible = without_skipped(posts);
        let slugs: Vec<_> = visible.iter().map(|p| p.slug().unwrap()).collect();
        assert_eq!(slugs, vec!["explicit", "shown"]);
    }

    #[test]
    fn test_load_featured_keeps_order() {
        let (_dir, loader) = loader_with(&[
            ("old.md", dated("2020-01-01").as_str()),
            ("new.md", dated("2024-01-01").as_str()),
        ]);
        let posts = loader.load_featured(&["old", "new"], &["slug"]).unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug().unwrap()).collect();
        assert_eq!(slugs, vec!["old", "new"]);

        let err = loader.load_featured(&["gone"], &["slug"]).unwrap_err();
        assert!(err.is_not_found());
    }
}
