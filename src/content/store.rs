//! Content store - the directory of article source files

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::ContentError;

/// Strip a trailing `.md` from a slug or filename
pub fn normalize_slug(slug: &str) -> &str {
    slug.strip_suffix(".md").unwrap_or(slug)
}

/// Read-only view of the articles directory
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List every article filename in the store
    ///
    /// Names are returned as they appear on disk, `.md` included, in
    /// directory enumeration order.
    pub fn list_slugs(&self) -> Result<Vec<String>, ContentError> {
        if !self.root.is_dir() {
            return Err(ContentError::StoreUnavailable {
                path: self.root.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "not a directory"),
            });
        }

        let mut slugs = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| ContentError::StoreUnavailable {
                path: self.root.clone(),
                source: e.into(),
            })?;

            // Follows symlinks, like `read` does
            if !entry.path().is_file() || !is_markdown_file(entry.path()) {
                continue;
            }

            match entry.file_name().to_str() {
                Some(name) => slugs.push(name.to_string()),
                None => tracing::warn!("Skipping non UTF-8 filename {:?}", entry.path()),
            }
        }

        tracing::debug!("Found {} articles in {:?}", slugs.len(), self.root);
        Ok(slugs)
    }

    /// Path an article slug resolves to
    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.root.join(format!("{}.md", normalize_slug(slug)))
    }

    /// Read an article's source text
    ///
    /// Returns the normalized slug together with the file contents.
    pub fn read(&self, slug: &str) -> Result<(String, String), ContentError> {
        let slug = normalize_slug(slug);
        if !is_plain_name(slug) {
            return Err(ContentError::ArticleNotFound {
                slug: slug.to_string(),
            });
        }

        let path = self.path_for(slug);
        match fs::read_to_string(&path) {
            Ok(text) => Ok((slug.to_string(), text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ContentError::ArticleNotFound {
                slug: slug.to_string(),
            }),
            Err(source) => Err(ContentError::Io { path, source }),
        }
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

/// A slug must name a file directly inside the store
fn is_plain_name(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn store_with(files: &[(&str, &str)]) -> (tempfile::TempDir, ContentStore) {
        let dir = tempfile::tempdir().unwrap();
        for (name, text) in files {
            fs::write(dir.path().join(name), text).unwrap();
        }
        let store = ContentStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_normalize_slug() {
        assert_eq!(normalize_slug("hello.md"), "hello");
        assert_eq!(normalize_slug("hello"), "hello");
        assert_eq!(normalize_slug("Mixed-Case.md"), "Mixed-Case");
        assert_eq!(normalize_slug("notes.md.md"), "notes.md");
    }

    #[test]
    fn test_list_slugs() {
        let (dir, store) = store_with(&[("a.md", "A"), ("b.md", "B"), ("notes.txt", "x")]);
        fs::create_dir(dir.path().join("drafts.md")).unwrap();

        let slugs: BTreeSet<_> = store.list_slugs().unwrap().into_iter().collect();
        assert_eq!(slugs, BTreeSet::from(["a.md".to_string(), "b.md".to_string()]));
    }

    #[test]
    fn test_list_slugs_is_stable() {
        let (_dir, store) = store_with(&[("one.md", ""), ("two.md", ""), ("three.md", "")]);
        let first: BTreeSet<_> = store.list_slugs().unwrap().into_iter().collect();
        let second: BTreeSet<_> = store.list_slugs().unwrap().into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_missing_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContentStore::new(dir.path().join("nope"));
        let err = store.list_slugs().unwrap_err();
        assert!(matches!(err, ContentError::StoreUnavailable { .. }));
    }

    #[test]
    fn test_read_strips_extension() {
        let (_dir, store) = store_with(&[("hello.md", "Hi")]);
        let (slug, text) = store.read("hello.md").unwrap();
        assert_eq!(slug, "hello");
        assert_eq!(text, "Hi");
        assert_eq!(store.read("hello").unwrap().1, "Hi");
    }

    #[test]
    fn test_dotted_filenames_are_readable() {
        let (_dir, store) = store_with(&[("wait...what.md", "Dots"), ("v1..2.md", "Range")]);
        for name in store.list_slugs().unwrap() {
            assert!(store.read(&name).is_ok(), "{name}");
        }
        let (slug, text) = store.read("wait...what").unwrap();
        assert_eq!(slug, "wait...what");
        assert_eq!(text, "Dots");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_articles_are_listed() {
        let (dir, store) = store_with(&[("real.md", "Real")]);
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("shared.md"), "Shared").unwrap();
        std::os::unix::fs::symlink(outside.path().join("shared.md"), dir.path().join("linked.md"))
            .unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.md"), dir.path().join("broken.md"))
            .unwrap();

        let slugs: BTreeSet<_> = store.list_slugs().unwrap().into_iter().collect();
        assert_eq!(
            slugs,
            BTreeSet::from(["linked.md".to_string(), "real.md".to_string()])
        );
        assert_eq!(store.read("linked").unwrap().1, "Shared");
    }

    #[test]
    fn test_read_missing_and_escaping_slugs() {
        let (_dir, store) = store_with(&[("hello.md", "Hi")]);
        for slug in ["missing", "", "../hello", "sub/hello", ".."] {
            let err = store.read(slug).unwrap_err();
            assert!(err.is_not_found(), "{slug:?}: {err}");
        }
    }
}
