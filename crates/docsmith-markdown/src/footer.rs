//! The metadata footer: the one part of the document that exists purely to
//! make parsing lossless.
//!
//! Two bullet lists carry the variant groupings and the canonical name map
//! in a constrained, human-readable grammar. A legacy format embedded the
//! same information as single-line JSON comments (markdown link definitions);
//! the parser accepts both, preferring the bullet lists.

use std::fmt::Write;

use indexmap::IndexMap;
use markdown::mdast::{List, Node};
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

use crate::blocks::inline_markdown;
use docsmith_types::TypesSourceData;

/// Footer fields accumulated while parsing.
#[derive(Debug, Default)]
pub struct FooterData {
    pub variant_type_names: IndexMap<String, Vec<String>>,
    pub type_name_map: IndexMap<String, String>,
    pub variant_type_name_maps: IndexMap<String, IndexMap<String, String>>,
    /// Set when the canonical list used per-line variant annotations, in
    /// which case the per-variant maps are authoritative as parsed.
    saw_canonical_list: bool,
}

impl FooterData {
    /// Resolve "no annotation = applies to all variants" and the legacy
    /// fallback once the whole document has been read.
    pub fn finish(mut self) -> Self {
        if self.variant_type_name_maps.is_empty() && !self.saw_canonical_list {
            // Legacy JSON footers carry no per-variant maps; scope each
            // mapping to the variants whose type list contains its dotted
            // display name.
            for (flat, dotted) in &self.type_name_map {
                for (variant, names) in &self.variant_type_names {
                    if names.contains(dotted) || names.contains(flat) {
                        self.variant_type_name_maps
                            .entry(variant.clone())
                            .or_default()
                            .insert(flat.clone(), dotted.clone());
                    }
                }
            }
        }
        // Every known variant gets a map entry, even an empty one, so both
        // build paths produce the same shape.
        let variants: Vec<String> = self.variant_type_names.keys().cloned().collect();
        for variant in variants {
            self.variant_type_name_maps.entry(variant).or_default();
        }
        self
    }

    fn insert_canonical(&mut self, flat: &str, dotted: &str, variants: Option<&[String]>) {
        self.type_name_map
            .insert(flat.to_string(), dotted.to_string());
        self.saw_canonical_list = true;
        match variants {
            Some(variants) => {
                for variant in variants {
                    self.variant_type_name_maps
                        .entry(variant.clone())
                        .or_default()
                        .insert(flat.to_string(), dotted.to_string());
                }
            }
            // No annotation: the mapping applies to every known variant.
            None => {
                let variants: Vec<String> = self.variant_type_names.keys().cloned().collect();
                for variant in variants {
                    self.variant_type_name_maps
                        .entry(variant)
                        .or_default()
                        .insert(flat.to_string(), dotted.to_string());
                }
            }
        }
    }
}

fn backtick_names(segment: &str) -> Vec<String> {
    static NAMES: OnceLock<Regex> = OnceLock::new();
    let re = NAMES.get_or_init(|| Regex::new(r"`([^`]+)`").expect("static regex"));
    re.captures_iter(segment)
        .map(|captures| captures[1].to_string())
        .collect()
}

/// Parse one `## Export Groups` bullet list.
pub fn parse_export_groups(list: &List, footer: &mut FooterData) {
    static LINE: OnceLock<Regex> = OnceLock::new();
    let re = LINE.get_or_init(|| {
        Regex::new(r"^`([^`]+)`(?::\s*(.+))?$").expect("static regex")
    });
    for line in list_lines(list) {
        let Some(captures) = re.captures(line.trim()) else {
            warn!("skipping malformed export-group line: {line}");
            continue;
        };
        let variant = captures[1].to_string();
        let names = match captures.get(2) {
            Some(rest) => backtick_names(rest.as_str()),
            // Shorthand: the variant name doubles as its single type name.
            None => vec![variant.clone()],
        };
        footer.variant_type_names.insert(variant, names);
    }
}

/// Parse one `## Canonical Types` bullet list.
pub fn parse_canonical_types(list: &List, footer: &mut FooterData) {
    static LINE: OnceLock<Regex> = OnceLock::new();
    let re = LINE.get_or_init(|| {
        Regex::new(r"^`([^`]+)`(?:\s*\(([^)]*)\))?:\s*(.+)$").expect("static regex")
    });
    for line in list_lines(list) {
        let Some(captures) = re.captures(line.trim()) else {
            warn!("skipping malformed canonical-type line: {line}");
            continue;
        };
        let dotted = captures[1].to_string();
        let variants = captures.get(2).map(|group| backtick_names(group.as_str()));
        let flats = backtick_names(&captures[3]);
        for flat in flats {
            footer.insert_canonical(&flat, &dotted, variants.as_deref());
        }
    }
}

/// Accept a legacy `[//]: # 'variantTypes: {...}'` / `'typeNameMap: {...}'`
/// JSON comment, which markdown parses as a link definition.
pub fn parse_legacy_definition(definition: &markdown::mdast::Definition, footer: &mut FooterData) {
    let Some(title) = definition.title.as_deref() else {
        return;
    };
    if let Some(json) = title.trim().strip_prefix("variantTypes:") {
        match serde_json::from_str::<IndexMap<String, Vec<String>>>(json.trim()) {
            Ok(groups) => {
                // The bullet list wins when both formats are present.
                if footer.variant_type_names.is_empty() {
                    footer.variant_type_names = groups;
                }
            }
            Err(error) => warn!("ignoring malformed legacy variantTypes comment: {error}"),
        }
    } else if let Some(json) = title.trim().strip_prefix("typeNameMap:") {
        match serde_json::from_str::<IndexMap<String, String>>(json.trim()) {
            Ok(map) => {
                if footer.type_name_map.is_empty() {
                    footer.type_name_map = map;
                }
            }
            Err(error) => warn!("ignoring malformed legacy typeNameMap comment: {error}"),
        }
    }
}

fn list_lines(list: &List) -> Vec<String> {
    list.children
        .iter()
        .filter_map(|item| {
            let Node::ListItem(item) = item else {
                return None;
            };
            let mut line = String::new();
            for child in &item.children {
                if let Node::Paragraph(paragraph) = child {
                    line.push_str(&inline_markdown(&paragraph.children));
                }
            }
            (!line.is_empty()).then_some(line)
        })
        .collect()
}

/// Serialize the footer for a generated document.
pub fn write_footer(out: &mut String, data: &TypesSourceData) {
    if !data.variant_type_names.is_empty() {
        let _ = writeln!(out, "\n## Export Groups\n");
        for (variant, names) in &data.variant_type_names {
            if names.len() == 1 && names[0] == *variant {
                let _ = writeln!(out, "- `{variant}`");
            } else {
                let joined = names
                    .iter()
                    .map(|name| format!("`{name}`"))
                    .collect::<Vec<_>>()
                    .join(", ");
                let _ = writeln!(out, "- `{variant}`: {joined}");
            }
        }
    }

    if !data.type_name_map.is_empty() {
        let _ = writeln!(out, "\n## Canonical Types\n");
        for line in canonical_lines(data) {
            let _ = writeln!(out, "{line}");
        }
    }
}

/// Group the canonical map into footer lines: one line per
/// (dotted name, variant set) pair, in first-appearance order.
fn canonical_lines(data: &TypesSourceData) -> Vec<String> {
    let variant_count = data.variant_type_name_maps.len();
    let mut groups: Vec<(String, Vec<String>, Vec<String>)> = Vec::new();

    for (flat, dotted) in &data.type_name_map {
        let mut variants: Vec<String> = data
            .variant_type_name_maps
            .iter()
            .filter(|(_, map)| map.contains_key(flat))
            .map(|(variant, _)| variant.clone())
            .collect();
        // Present everywhere (or nowhere trackable) means unannotated.
        if variants.len() == variant_count || variants.is_empty() {
            variants.clear();
        }
        if let Some(group) = groups
            .iter_mut()
            .find(|(name, set, _)| name == dotted && *set == variants)
        {
            group.2.push(flat.clone());
        } else {
            groups.push((dotted.clone(), variants, vec![flat.clone()]));
        }
    }

    groups
        .into_iter()
        .map(|(dotted, variants, flats)| {
            let flats = flats
                .iter()
                .map(|flat| format!("`{flat}`"))
                .collect::<Vec<_>>()
                .join(", ");
            if variants.is_empty() {
                format!("- `{dotted}`: {flats}")
            } else {
                let variants = variants
                    .iter()
                    .map(|variant| format!("`{variant}`"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("- `{dotted}` ({variants}): {flats}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown::ParseOptions;

    fn parse_list(source: &str) -> List {
        let Ok(Node::Root(root)) = markdown::to_mdast(source, &ParseOptions::gfm()) else {
            panic!("parse failed");
        };
        for child in root.children {
            if let Node::List(list) = child {
                return list;
            }
        }
        panic!("no list found");
    }

    #[test]
    fn export_group_shorthand_expands() {
        let list = parse_list("- `useAccordion`\n- `CssModules`: `Accordion.Root`, `Accordion.Trigger`\n");
        let mut footer = FooterData::default();
        parse_export_groups(&list, &mut footer);
        assert_eq!(
            footer.variant_type_names["useAccordion"],
            vec!["useAccordion".to_string()]
        );
        assert_eq!(
            footer.variant_type_names["CssModules"],
            vec!["Accordion.Root".to_string(), "Accordion.Trigger".to_string()]
        );
    }

    #[test]
    fn canonical_lines_scope_variants() {
        let list = parse_list(
            "- `Accordion.Root.State` (`CssModules`): `AccordionRootState`\n- `Accordion.Root.Props`: `AccordionRootProps`\n",
        );
        let mut footer = FooterData::default();
        footer
            .variant_type_names
            .insert("CssModules".to_string(), vec![]);
        footer
            .variant_type_names
            .insert("Tailwind".to_string(), vec![]);
        parse_canonical_types(&list, &mut footer);
        let footer = footer.finish();

        assert_eq!(
            footer.type_name_map["AccordionRootState"],
            "Accordion.Root.State"
        );
        // Annotated mapping only lands in its variant.
        assert!(footer.variant_type_name_maps["CssModules"].contains_key("AccordionRootState"));
        assert!(
            !footer
                .variant_type_name_maps
                .get("Tailwind")
                .is_some_and(|map| map.contains_key("AccordionRootState"))
        );
        // Unannotated mapping lands everywhere.
        assert!(footer.variant_type_name_maps["Tailwind"].contains_key("AccordionRootProps"));
    }

    #[test]
    fn legacy_json_comments_are_accepted() {
        let mut footer = FooterData::default();
        let definition = markdown::mdast::Definition {
            position: None,
            url: "#".to_string(),
            title: Some(r#"variantTypes: {"CssModules": ["Accordion.Root"]}"#.to_string()),
            identifier: "//".to_string(),
            label: Some("//".to_string()),
        };
        parse_legacy_definition(&definition, &mut footer);
        let definition = markdown::mdast::Definition {
            position: None,
            url: "#".to_string(),
            title: Some(r#"typeNameMap: {"AccordionRoot": "Accordion.Root"}"#.to_string()),
            identifier: "//".to_string(),
            label: Some("//".to_string()),
        };
        parse_legacy_definition(&definition, &mut footer);
        let footer = footer.finish();

        assert_eq!(footer.type_name_map["AccordionRoot"], "Accordion.Root");
        assert!(footer.variant_type_name_maps["CssModules"].contains_key("AccordionRoot"));
    }

    #[test]
    fn malformed_legacy_json_is_skipped() {
        let mut footer = FooterData::default();
        let definition = markdown::mdast::Definition {
            position: None,
            url: "#".to_string(),
            title: Some("typeNameMap: {not json".to_string()),
            identifier: "//".to_string(),
            label: Some("//".to_string()),
        };
        parse_legacy_definition(&definition, &mut footer);
        assert!(footer.type_name_map.is_empty());
    }
}
