//! Qualified-name resolution.
//!
//! The type system sees flattened names (`AccordionRootState`); the docs show
//! dotted display names (`Accordion.Root.State`). Resolution walks an ordered
//! fallback chain; the order is load-bearing, since a later rule firing before
//! an earlier one produces wrong or duplicated namespace prefixes.

use indexmap::IndexMap;

use crate::policy::FormatPolicy;

/// Resolve a flattened type name to its dotted display name.
///
/// Fallback order:
/// 1. exact hit in the canonical name map
/// 2. a mapped dotted name whose dots-stripped form equals the flat name
/// 3. export-name substitution inside a namespace segment
/// 4. longest-prefix match against the map keys
/// 5. the name as-is (an external, unmapped type)
pub fn resolve_qualified_name(
    flat: &str,
    export_names: &[String],
    type_name_map: &IndexMap<String, String>,
    policy: &FormatPolicy,
) -> String {
    // The framework's own namespace is never remapped.
    let framework_prefix = format!("{}.", policy.framework_namespace);
    if flat.starts_with(&framework_prefix) {
        return flat.to_string();
    }
    if let Some(collapsed) = collapse_react_element(flat) {
        return collapsed;
    }

    if let Some(dotted) = type_name_map.get(flat) {
        return dotted.clone();
    }

    if let Some(dotted) = type_name_map
        .values()
        .find(|dotted| dotted.replace('.', "") == flat)
    {
        return dotted.clone();
    }

    if let Some(substituted) = substitute_export_segment(flat, export_names) {
        return substituted;
    }

    if let Some(expanded) = longest_prefix_match(flat, type_name_map) {
        return expanded;
    }

    flat.to_string()
}

/// `ReactElement<...>` collapses to `ReactElement` regardless of arguments.
fn collapse_react_element(flat: &str) -> Option<String> {
    if flat == "ReactElement" || flat.starts_with("ReactElement<") {
        Some("ReactElement".to_string())
    } else {
        None
    }
}

/// Splits a known export name out of a namespace segment:
/// `Menu.RootProps` with export `Root` becomes `Menu.Root.Props`.
fn substitute_export_segment(flat: &str, export_names: &[String]) -> Option<String> {
    let mut changed = false;
    let mut exports: Vec<&String> = export_names.iter().collect();
    // Longest export name wins so `CheckboxGroup` beats `Checkbox`.
    exports.sort_by_key(|name| std::cmp::Reverse(name.len()));

    let segments: Vec<String> = flat
        .split('.')
        .map(|segment| {
            for export in &exports {
                if let Some(rest) = segment.strip_prefix(export.as_str()) {
                    if rest.chars().next().is_some_and(|c| c.is_uppercase()) {
                        changed = true;
                        return format!("{export}.{rest}");
                    }
                }
            }
            segment.to_string()
        })
        .collect();

    changed.then(|| segments.join("."))
}

/// Longest map key that is a strict prefix of the flat name; the unmatched
/// remainder is appended as a final segment.
fn longest_prefix_match(flat: &str, type_name_map: &IndexMap<String, String>) -> Option<String> {
    type_name_map
        .iter()
        .filter(|(key, _)| flat.len() > key.len() && flat.starts_with(key.as_str()))
        .max_by_key(|(key, _)| key.len())
        .map(|(key, dotted)| format!("{}.{}", dotted, &flat[key.len()..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> IndexMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn exact_match_wins() {
        let names = map(&[("AccordionRootState", "Accordion.Root.State")]);
        let resolved =
            resolve_qualified_name("AccordionRootState", &[], &names, &FormatPolicy::default());
        assert_eq!(resolved, "Accordion.Root.State");
    }

    #[test]
    fn dots_stripped_match_fires_second() {
        let names = map(&[("MenuItemInternal", "Menu.Item")]);
        let resolved = resolve_qualified_name("MenuItem", &[], &names, &FormatPolicy::default());
        assert_eq!(resolved, "Menu.Item");
    }

    #[test]
    fn export_segment_substitution() {
        let names = map(&[]);
        let exports = vec!["Root".to_string()];
        let resolved =
            resolve_qualified_name("Menu.RootProps", &exports, &names, &FormatPolicy::default());
        assert_eq!(resolved, "Menu.Root.Props");
    }

    #[test]
    fn longest_prefix_appends_remainder() {
        let names = map(&[
            ("Accordion", "Accordion"),
            ("AccordionRoot", "Accordion.Root"),
        ]);
        let resolved =
            resolve_qualified_name("AccordionRootProps", &[], &names, &FormatPolicy::default());
        assert_eq!(resolved, "Accordion.Root.Props");
    }

    #[test]
    fn unmapped_name_passes_through() {
        let resolved =
            resolve_qualified_name("HTMLElement", &[], &map(&[]), &FormatPolicy::default());
        assert_eq!(resolved, "HTMLElement");
    }

    #[test]
    fn react_element_collapses() {
        let resolved = resolve_qualified_name(
            "ReactElement<SomeProps>",
            &[],
            &map(&[]),
            &FormatPolicy::default(),
        );
        assert_eq!(resolved, "ReactElement");
    }

    #[test]
    fn framework_namespace_is_untouched() {
        let names = map(&[("React.Ref", "Mangled.Wrong")]);
        let resolved = resolve_qualified_name("React.Ref", &[], &names, &FormatPolicy::default());
        assert_eq!(resolved, "React.Ref");
    }
}
