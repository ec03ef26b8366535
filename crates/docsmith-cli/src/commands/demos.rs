//! Demos command: flatten configured demo roots into a bundle manifest.

use docsmith_demos::{flatten_demo_variants, DemoBundle};
use docsmith_types::PlainHighlighter;
use futures::future::join_all;
use tracing::info;

use crate::cli::DemosArgs;
use crate::commands::utils::{load_config, resolve_path};
use crate::error::{CliError, Result};

pub async fn execute(args: DemosArgs) -> Result<()> {
    let (config, base) = load_config(args.config.as_deref())?;
    let Some(demos) = &config.demos else {
        info!("no demos configured");
        return Ok(());
    };

    let highlighter = PlainHighlighter;
    // Roots bundle independently; results stay in configuration order.
    let results = join_all(demos.roots.iter().map(|root| {
        let root = resolve_path(&base, root);
        let highlighter = &highlighter;
        async move { flatten_demo_variants(&root, highlighter).await }
    }))
    .await;

    let mut bundles: Vec<DemoBundle> = Vec::new();
    for result in results {
        bundles.extend(result?);
    }
    info!(
        "bundled {} demo variant(s) from {} root(s)",
        bundles.len(),
        demos.roots.len()
    );

    let manifest_out = args
        .out
        .clone()
        .or_else(|| demos.manifest_out.clone())
        .map(|path| resolve_path(&base, &path));
    if let Some(out) = manifest_out {
        if let Some(parent) = out.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|error| CliError::io(parent, error))?;
        }
        let json = serde_json::to_vec_pretty(&bundles)?;
        tokio::fs::write(&out, json)
            .await
            .map_err(|error| CliError::io(&out, error))?;
        info!("wrote {}", out.display());
    }
    Ok(())
}
