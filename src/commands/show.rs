//! Print the props of one article page

use anyhow::Result;

use crate::generator::{Generator, PostPage};
use crate::Site;

/// Print an article page's props as JSON
pub async fn run(site: &Site, slug: &str) -> Result<()> {
    let generator = Generator::new(site);

    match generator.post_page(slug).await? {
        page @ PostPage::Found(_) => {
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        PostPage::NotFound { .. } => {
            anyhow::bail!("No article found for {:?} in {:?}", slug, site.articles_dir);
        }
    }

    Ok(())
}
