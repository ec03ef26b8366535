//! Build command: extractor JSON in, markdown (and optional JSON sidecar) out.

use std::path::Path;
use std::sync::Arc;

use docsmith_config::PageConfig;
use docsmith_format::{
    CmarkStyler, EntityFormatter, FormatPolicy, FormatServices, TypeLayoutPrinter,
};
use docsmith_markdown::{generate, organize};
use docsmith_types::{Extraction, PlainHighlighter, TypeNode, VariantTypes};
use futures::future::join_all;
use indexmap::IndexMap;
use tracing::info;

use crate::cli::BuildArgs;
use crate::commands::utils::{load_config, resolve_path};
use crate::error::{CliError, Result};
use crate::service::ExtractorCache;

pub async fn execute(args: BuildArgs) -> Result<()> {
    let (config, base) = load_config(args.config.as_deref())?;
    let cache = ExtractorCache::new();

    let styler = CmarkStyler;
    let highlighter = PlainHighlighter;
    let printer = TypeLayoutPrinter;
    let services = FormatServices {
        styler: &styler,
        highlighter: &highlighter,
        printer: &printer,
    };

    for page in &config.pages {
        build_page(page, &base, &config.policy, services, &cache).await?;
    }
    info!("built {} page(s)", config.pages.len());
    Ok(())
}

async fn build_page(
    page: &PageConfig,
    base: &Path,
    policy: &FormatPolicy,
    services: FormatServices<'_>,
    cache: &ExtractorCache,
) -> Result<()> {
    // Variant loads are independent; run them together and collect
    // positionally so variant order stays configuration order.
    let loads = join_all(page.variants.iter().map(|(variant, path)| {
        let path = resolve_path(base, path);
        async move {
            cache
                .load(&path)
                .await
                .map(|extraction| (variant.clone(), extraction))
        }
    }))
    .await;

    let mut extractions: Vec<(String, Arc<Extraction>)> = Vec::with_capacity(loads.len());
    for load in loads {
        extractions.push(load?);
    }

    // The global canonical map is the union of the per-variant maps, in
    // variant order.
    let mut type_name_map: IndexMap<String, String> = IndexMap::new();
    let mut variant_maps: IndexMap<String, IndexMap<String, String>> = IndexMap::new();
    for (variant, extraction) in &extractions {
        for (flat, dotted) in &extraction.type_name_map {
            type_name_map
                .entry(flat.clone())
                .or_insert_with(|| dotted.clone());
        }
        variant_maps.insert(variant.clone(), extraction.type_name_map.clone());
    }

    let export_names = derive_export_names(&extractions, &type_name_map, policy);

    let variant_data: Vec<VariantTypes> = extractions
        .iter()
        .map(|(variant, extraction)| {
            let formatter =
                EntityFormatter::new(services, policy, &export_names, &type_name_map);
            VariantTypes {
                variant: variant.clone(),
                types: formatter.format_exports(&extraction.exports),
            }
        })
        .collect();

    let data = organize(&variant_data, &type_name_map, Some(&variant_maps));
    let document = generate(&page.title, &data);

    let out = resolve_path(base, &page.out);
    write_output(&out, document.as_bytes()).await?;
    info!("wrote {}", out.display());

    if let Some(json_out) = &page.json_out {
        let json_out = resolve_path(base, json_out);
        let json = serde_json::to_vec_pretty(&data)?;
        write_output(&json_out, &json).await?;
        info!("wrote {}", json_out.display());
    }
    Ok(())
}

async fn write_output(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|error| CliError::io(parent, error))?;
    }
    tokio::fs::write(path, contents)
        .await
        .map_err(|error| CliError::io(path, error))
}

/// The page's primary export names, used for namespace-segment substitution
/// during qualified-name resolution.
fn derive_export_names(
    extractions: &[(String, Arc<Extraction>)],
    type_name_map: &IndexMap<String, String>,
    policy: &FormatPolicy,
) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (_, extraction) in extractions {
        for export in &extraction.exports {
            if !matches!(export.ty, TypeNode::Component(_) | TypeNode::Function(_)) {
                continue;
            }
            let display = docsmith_format::resolve_qualified_name(
                &export.name,
                &[],
                type_name_map,
                policy,
            );
            let segment = display
                .rsplit('.')
                .next()
                .unwrap_or(display.as_str())
                .to_string();
            if !names.contains(&segment) {
                names.push(segment);
            }
        }
    }
    names
}
