//! Import scanning over demo source text.
//!
//! Demo files are small and well-formed, so specifier extraction works on the
//! source text directly: static imports, re-exports, side-effect imports, and
//! dynamic `import()` calls.

use regex::Regex;
use std::sync::OnceLock;

/// All import specifiers referenced by a source file, in order of first
/// appearance, without duplicates.
pub fn scan_specifiers(source: &str) -> Vec<String> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        vec![
            // import defaultExport, { named } from './mod'
            Regex::new(r#"(?m)^\s*import\s+[^'";]*?from\s+['"]([^'"]+)['"]"#)
                .expect("static regex"),
            // import './side-effect.css'
            Regex::new(r#"(?m)^\s*import\s+['"]([^'"]+)['"]"#).expect("static regex"),
            // export { x } from './mod'  /  export * from './mod'
            Regex::new(r#"(?m)^\s*export\s+(?:\*|\{[^}]*\})\s+from\s+['"]([^'"]+)['"]"#)
                .expect("static regex"),
            // import('./lazy')
            Regex::new(r#"import\(\s*['"]([^'"]+)['"]\s*\)"#).expect("static regex"),
        ]
    });

    let mut specifiers = Vec::new();
    for pattern in patterns {
        for captures in pattern.captures_iter(source) {
            let specifier = captures[1].to_string();
            if !specifiers.contains(&specifier) {
                specifiers.push(specifier);
            }
        }
    }
    specifiers
}

/// Whether a specifier points into the local file tree rather than a package.
pub fn is_relative(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../")
}
