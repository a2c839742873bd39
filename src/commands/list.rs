//! List site content

use anyhow::Result;

use crate::generator::Generator;
use crate::helpers::{full_date, parse_date};
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let generator = Generator::new(site);

    match content_type {
        "letter" | "letters" | "post" | "posts" => {
            let posts = generator
                .loader()
                .load_all(&["date", "skip", "slug", "title"])?;
            println!("Letters ({}):", posts.len());
            for post in posts {
                let date = match post.date() {
                    Some(date) => parse_date(date)
                        .map(|d| full_date(&d))
                        .unwrap_or_else(|| date.to_string()),
                    None => "undated".to_string(),
                };
                println!(
                    "  {} - {} [{}]{}",
                    date,
                    post.title().unwrap_or("Untitled"),
                    post.slug().unwrap_or_default(),
                    if post.skip() { " (skipped)" } else { "" }
                );
            }
        }
        "path" | "paths" => {
            let paths = generator.static_paths()?;
            println!("Paths ({}):", paths.len());
            for path in paths {
                println!("  {}", path.path);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: letters, paths",
                content_type
            );
        }
    }

    Ok(())
}
