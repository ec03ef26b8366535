//! Check command: parse each generated markdown file and report drift
//! against a fresh regeneration, without touching extractor output.

use docsmith_format::{CmarkStyler, FormatServices, TypeLayoutPrinter};
use docsmith_markdown::{generate, parse};
use docsmith_types::PlainHighlighter;
use tracing::{info, warn};

use crate::cli::CheckArgs;
use crate::commands::utils::{load_config, resolve_path};
use crate::error::{CliError, Result};

pub async fn execute(args: CheckArgs) -> Result<()> {
    let (config, base) = load_config(args.config.as_deref())?;

    let styler = CmarkStyler;
    let highlighter = PlainHighlighter;
    let printer = TypeLayoutPrinter;
    let services = FormatServices {
        styler: &styler,
        highlighter: &highlighter,
        printer: &printer,
    };

    let mut drifted: Vec<String> = Vec::new();
    for page in &config.pages {
        let out = resolve_path(&base, &page.out);
        let source = tokio::fs::read_to_string(&out)
            .await
            .map_err(|error| CliError::io(&out, error))?;

        let parsed = parse(&source, &services, &config.policy)?;
        let title = parsed.title.clone().unwrap_or_else(|| page.title.clone());
        let regenerated = generate(&title, &parsed.data);

        if regenerated == source {
            info!("{} is up to date", out.display());
        } else {
            warn!("{} drifts from its regenerated form", out.display());
            drifted.push(page.title.clone());
        }
    }

    if drifted.is_empty() {
        info!("all {} page(s) round-trip cleanly", config.pages.len());
        Ok(())
    } else {
        Err(CliError::drift(format!(
            "{} page(s) need regeneration: {}",
            drifted.len(),
            drifted.join(", ")
        )))
    }
}
