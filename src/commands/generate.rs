//! Generate page props

use anyhow::Result;
use notify::Watcher;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::generator::Generator;
use crate::Site;

/// Write page props for every article
pub async fn run(site: &Site) -> Result<()> {
    let start = Instant::now();

    let written = Generator::new(site).generate().await?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} letters in {:.2}s",
        written,
        duration.as_secs_f64()
    );

    Ok(())
}

/// Watch for file changes and regenerate
pub async fn watch(site: &Site) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    // Watch articles directory
    watcher.watch(&site.articles_dir, notify::RecursiveMode::NonRecursive)?;

    // Watch config file
    let config_path = site.config_path();
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching {:?} for changes. Press Ctrl+C to stop.", site.articles_dir);

    // Debounce events
    let mut last_rebuild = Instant::now();

    while let Some(event) = rx.recv().await {
        // Generated output is not watched, so every event is a source change
        if last_rebuild.elapsed() < Duration::from_millis(500) {
            continue;
        }
        tracing::info!("{:?} changed, regenerating...", event.paths);

        // Pick up config edits between runs
        let site = match Site::new(&site.base_dir) {
            Ok(site) => site,
            Err(e) => {
                tracing::error!("Failed to reload config: {:#}", e);
                continue;
            }
        };
        if let Err(e) = run(&site).await {
            tracing::error!("Generation failed: {:#}", e);
        }
        last_rebuild = Instant::now();
    }

    Ok(())
}
