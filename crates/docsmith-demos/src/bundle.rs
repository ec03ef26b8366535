//! Demo flattening: resolve the relative import graph of a demo entry point
//! and rewrite it into a self-contained, flat bundle.

use std::path::{Path, PathBuf};

use docsmith_types::{Highlighter, StyledTree};
use path_clean::PathClean;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{DemoError, Result};
use crate::scan::{is_relative, scan_specifiers};

/// Extensions probed when a specifier omits one, in resolution order.
const RESOLVE_EXTENSIONS: [&str; 4] = ["tsx", "ts", "jsx", "js"];

/// Entry file names probed inside a demo directory, in order.
const ENTRY_CANDIDATES: [&str; 4] = ["index.tsx", "index.ts", "index.jsx", "index.js"];

/// One file of a flattened demo bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoFile {
    /// Flattened file name inside the bundle.
    pub name: String,
    /// Original path on disk.
    pub path: PathBuf,
    /// Source text with bundle-internal imports rewritten.
    pub source: String,
    /// Highlighting language, derived from the extension.
    pub language: String,
    /// Precomputed syntax highlighting of [`Self::source`].
    pub highlighted: StyledTree,
}

/// A self-contained demo: the entry file first, dependencies in discovery
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoBundle {
    /// Variant name, usually the demo subdirectory (`css-modules`).
    pub variant: String,
    /// Flattened name of the entry file.
    pub entry: String,
    pub files: Vec<DemoFile>,
}

/// Flatten one demo starting from its entry file.
pub async fn flatten_demo(
    variant: impl Into<String>,
    entry: &Path,
    highlighter: &dyn Highlighter,
) -> Result<DemoBundle> {
    let entry = entry.to_path_buf().clean();
    let mut ordered: Vec<(PathBuf, String, Vec<(String, PathBuf)>)> = Vec::new();
    let mut queue: std::collections::VecDeque<PathBuf> = std::collections::VecDeque::new();
    queue.push_back(entry.clone());
    let mut visited: Vec<PathBuf> = Vec::new();

    while let Some(path) = queue.pop_front() {
        if visited.contains(&path) {
            continue;
        }
        visited.push(path.clone());

        let source = tokio::fs::read_to_string(&path)
            .await
            .map_err(|error| DemoError::io(&path, error))?;

        let mut resolved_imports = Vec::new();
        for specifier in scan_specifiers(&source) {
            if !is_relative(&specifier) {
                continue;
            }
            match resolve_specifier(&path, &specifier).await {
                Some(target) => {
                    resolved_imports.push((specifier, target.clone()));
                    if !visited.contains(&target) {
                        queue.push_back(target);
                    }
                }
                None => {
                    // Unresolvable imports stay untouched in the source.
                    warn!(
                        "could not resolve '{specifier}' from {}; leaving it as-is",
                        path.display()
                    );
                }
            }
        }
        ordered.push((path, source, resolved_imports));
    }

    let flat_names = assign_flat_names(&ordered);
    let files = ordered
        .iter()
        .enumerate()
        .map(|(index, (path, source, imports))| {
            let source = rewrite_imports(source, imports, &ordered, &flat_names);
            let language = language_for(path);
            debug!("bundled {} as {}", path.display(), flat_names[index]);
            DemoFile {
                name: flat_names[index].clone(),
                path: path.clone(),
                highlighted: highlighter.highlight(&source, &language),
                language,
                source,
            }
        })
        .collect();

    Ok(DemoBundle {
        variant: variant.into(),
        entry: flat_names[0].clone(),
        files,
    })
}

/// Flatten every variant subdirectory of a demo directory. A variant that
/// fails to load is skipped with a warning; the others still bundle.
pub async fn flatten_demo_variants(
    demo_dir: &Path,
    highlighter: &dyn Highlighter,
) -> Result<Vec<DemoBundle>> {
    let mut entries = tokio::fs::read_dir(demo_dir)
        .await
        .map_err(|error| DemoError::io(demo_dir, error))?;

    let mut variant_dirs = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|error| DemoError::io(demo_dir, error))?
    {
        let path = entry.path();
        if path.is_dir() {
            variant_dirs.push(path);
        }
    }
    variant_dirs.sort();

    let mut bundles = Vec::new();
    for dir in variant_dirs {
        let variant = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        match find_entry(&dir).await {
            Some(entry) => match flatten_demo(&variant, &entry, highlighter).await {
                Ok(bundle) => bundles.push(bundle),
                Err(error) => {
                    warn!("skipping demo variant '{variant}': {error}");
                }
            },
            None => {
                warn!(
                    "skipping demo variant '{variant}': no entry point in {}",
                    dir.display()
                );
            }
        }
    }
    Ok(bundles)
}

async fn find_entry(dir: &Path) -> Option<PathBuf> {
    for candidate in ENTRY_CANDIDATES {
        let path = dir.join(candidate);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Some(path);
        }
    }
    None
}

/// Node-style relative resolution: the literal path, then extension probing,
/// then directory `index.*` files.
async fn resolve_specifier(from: &Path, specifier: &str) -> Option<PathBuf> {
    let base = from.parent()?.join(specifier).clean();

    if is_file(&base).await {
        return Some(base);
    }
    for extension in RESOLVE_EXTENSIONS {
        let candidate = base.with_extension(extension);
        if is_file(&candidate).await {
            return Some(candidate);
        }
    }
    for candidate in ENTRY_CANDIDATES {
        let candidate = base.join(candidate);
        if is_file(&candidate).await {
            return Some(candidate);
        }
    }
    None
}

async fn is_file(path: &Path) -> bool {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata.is_file(),
        Err(_) => false,
    }
}

/// Unique flat file names: the base name, disambiguated by the parent
/// directory when two files share one.
fn assign_flat_names(ordered: &[(PathBuf, String, Vec<(String, PathBuf)>)]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(ordered.len());
    for (path, _, _) in ordered {
        let base = file_name(path);
        let mut flat = base.clone();
        if names.contains(&flat) {
            let parent = path
                .parent()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            flat = format!("{parent}-{base}");
        }
        let mut counter = 2;
        while names.contains(&flat) {
            flat = format!("{counter}-{base}");
            counter += 1;
        }
        names.push(flat);
    }
    names
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Rewrite bundle-internal specifiers to point at the flattened names.
fn rewrite_imports(
    source: &str,
    imports: &[(String, PathBuf)],
    ordered: &[(PathBuf, String, Vec<(String, PathBuf)>)],
    flat_names: &[String],
) -> String {
    let mut rewritten = source.to_string();
    for (specifier, target) in imports {
        let Some(index) = ordered.iter().position(|(path, _, _)| path == target) else {
            continue;
        };
        let flat = &flat_names[index];
        let new_specifier = format!("./{}", specifier_for(flat));
        if new_specifier == *specifier {
            continue;
        }
        rewritten = rewritten.replace(
            &format!("'{specifier}'"),
            &format!("'{new_specifier}'"),
        );
        rewritten = rewritten.replace(
            &format!("\"{specifier}\""),
            &format!("\"{new_specifier}\""),
        );
    }
    rewritten
}

/// Script files are imported without their extension; everything else (CSS,
/// JSON) keeps it.
fn specifier_for(flat_name: &str) -> String {
    for extension in RESOLVE_EXTENSIONS {
        if let Some(stem) = flat_name.strip_suffix(&format!(".{extension}")) {
            return stem.to_string();
        }
    }
    flat_name.to_string()
}

fn language_for(path: &Path) -> String {
    path.extension()
        .map(|extension| extension.to_string_lossy().into_owned())
        .unwrap_or_else(|| "txt".to_string())
}
