//! Content module - article store, front-matter, loading and rendering

pub mod collection;
mod error;
mod fields;
mod frontmatter;
pub mod loader;
mod markdown;
pub mod store;

pub use error::ContentError;
pub use fields::{DateKey, Fields};
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use loader::{Article, ArticleLoader};
pub use markdown::MarkdownRenderer;
pub use store::ContentStore;
