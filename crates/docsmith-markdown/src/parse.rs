//! Markdown parsing: the inverse of generation.
//!
//! A recursive-descent pass over the typed mdast block sequence, one
//! transition per block kind. Section state opens at each `###` heading,
//! bold block headings arm the router for the table/code block that follows,
//! and the footer lists rebuild the variant groupings and canonical name
//! map. A malformed fragment is skipped with a warning; it never fails the
//! rest of the document.

use docsmith_format::{FormatPolicy, FormatServices};
use docsmith_types::{
    ClassMeta, ComponentMeta, FormattedProperty, FunctionMeta, HookMeta, ObjectReturn, RawMeta,
    ReExport, ReturnValue, SimpleReturn, StyledTree, TypesMeta, TypesSourceData, VariantTypes,
};
use indexmap::IndexMap;
use markdown::mdast::{Node, Table};
use markdown::ParseOptions;
use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::OnceLock;
use tracing::warn;

use crate::blocks::{bold_heading, inline_markdown, plain_text, rehydrate_property};
use crate::error::{MarkdownError, Result};
use crate::footer::{
    parse_canonical_types, parse_export_groups, parse_legacy_definition, FooterData,
};
use crate::organize::organize;

/// A parsed documentation file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub title: Option<String>,
    pub data: TypesSourceData,
}

/// Which document region the walker is inside, set by `##` headings.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Region {
    Main,
    ExternalTypes,
    ExportGroups,
    CanonicalTypes,
}

/// Parse a generated markdown document back into structured data.
pub fn parse(
    source: &str,
    services: &FormatServices<'_>,
    policy: &FormatPolicy,
) -> Result<ParsedDocument> {
    let mdast = markdown::to_mdast(source, &parse_options())
        .map_err(|message| MarkdownError::parse(message.to_string()))?;
    let Node::Root(root) = mdast else {
        return Err(MarkdownError::parse("expected a root node"));
    };

    let mut title = None;
    let mut region = Region::Main;
    let mut footer = FooterData::default();
    let mut finished: Vec<SectionBuilder> = Vec::new();
    let mut current: Option<SectionBuilder> = None;

    for node in &root.children {
        match node {
            Node::Heading(heading) if heading.depth == 1 => {
                title = Some(plain_text(&heading.children).trim().to_string());
            }
            Node::Heading(heading) if heading.depth == 2 => {
                finished.extend(current.take());
                region = match plain_text(&heading.children).trim() {
                    "External Types" => Region::ExternalTypes,
                    "Export Groups" => Region::ExportGroups,
                    "Canonical Types" => Region::CanonicalTypes,
                    _ => Region::Main,
                };
            }
            Node::Heading(heading) if heading.depth == 3 => {
                finished.extend(current.take());
                if matches!(region, Region::Main | Region::ExternalTypes) {
                    current = Some(SectionBuilder::new(
                        plain_text(&heading.children).trim().to_string(),
                        region == Region::ExternalTypes,
                    ));
                }
            }
            Node::List(list) => match region {
                Region::ExportGroups => parse_export_groups(list, &mut footer),
                Region::CanonicalTypes => parse_canonical_types(list, &mut footer),
                _ => {}
            },
            Node::Definition(definition) => parse_legacy_definition(definition, &mut footer),
            other => {
                if let Some(section) = current.as_mut() {
                    section.handle_block(other);
                }
            }
        }
    }
    finished.extend(current.take());
    let footer = footer.finish();

    let mut parsed: IndexMap<String, TypesMeta> = IndexMap::new();
    let mut external_types: IndexMap<String, TypesMeta> = IndexMap::new();
    for builder in finished {
        let external = builder.external;
        let meta = builder.finish(services, policy);
        if external {
            external_types.insert(meta.name().to_string(), meta);
        } else {
            parsed.insert(meta.name().to_string(), meta);
        }
    }

    let variant_data = reconstruct_variants(&parsed, &footer);
    let variant_maps = (!footer.variant_type_name_maps.is_empty())
        .then(|| footer.variant_type_name_maps.clone());
    let mut data = organize(&variant_data, &footer.type_name_map, variant_maps.as_ref());
    // The footer lists are the source of truth for variant membership.
    if !footer.variant_type_names.is_empty() {
        data.variant_type_names = footer.variant_type_names;
    }
    data.external_types = external_types;

    Ok(ParsedDocument { title, data })
}

fn parse_options() -> ParseOptions {
    ParseOptions::gfm()
}

/// Rebuild per-variant type lists from the footer groupings, with a catch-all
/// for sections no grouping claims.
fn reconstruct_variants(
    parsed: &IndexMap<String, TypesMeta>,
    footer: &FooterData,
) -> Vec<VariantTypes> {
    let mut variants: Vec<VariantTypes> = footer
        .variant_type_names
        .iter()
        .map(|(variant, names)| VariantTypes {
            variant: variant.clone(),
            types: names
                .iter()
                .filter_map(|name| parsed.get(name).cloned())
                .collect(),
        })
        .collect();

    let covered: FxHashSet<String> = footer
        .variant_type_names
        .values()
        .flatten()
        .cloned()
        .collect();
    let leftovers: Vec<TypesMeta> = parsed
        .iter()
        .filter(|(name, _)| !covered.contains(name.as_str()))
        .map(|(_, meta)| meta.clone())
        .collect();
    if !leftovers.is_empty() {
        variants.push(VariantTypes {
            variant: String::new(),
            types: leftovers,
        });
    }
    variants
}

/// Kind of field table a bold heading announces.
#[derive(Debug, Clone, Copy, PartialEq)]
enum TableKind {
    Props,
    DataAttributes,
    CssVariables,
    Parameters,
    ConstructorParameters,
    ClassProperties,
    Methods,
    ReturnObject,
}

impl TableKind {
    /// Star tables mark required entries; question tables mark optional ones.
    fn optional_marker(self) -> bool {
        matches!(
            self,
            TableKind::Parameters | TableKind::ConstructorParameters | TableKind::Methods
        )
    }
}

/// What the most recent bold heading routed the next block to.
#[derive(Debug, Clone, PartialEq)]
enum Pending {
    Table(TableKind),
    ReturnValue,
    RawType,
    Members,
    FieldExample(String),
    FieldDetail(String),
}

/// Accumulator for one `###` section.
struct SectionBuilder {
    name: String,
    external: bool,
    description_parts: Vec<String>,
    saw_bold_heading: bool,
    pending: Option<Pending>,
    last_table: Option<TableKind>,
    props: IndexMap<String, FormattedProperty>,
    data_attributes: IndexMap<String, FormattedProperty>,
    css_variables: IndexMap<String, FormattedProperty>,
    parameters: IndexMap<String, FormattedProperty>,
    constructor_parameters: IndexMap<String, FormattedProperty>,
    class_properties: IndexMap<String, FormattedProperty>,
    methods: IndexMap<String, FormattedProperty>,
    return_value: Option<ReturnValue>,
    return_description_parts: Vec<String>,
    code_text: Option<String>,
    enum_members: IndexMap<String, String>,
}

impl SectionBuilder {
    fn new(name: String, external: bool) -> Self {
        Self {
            name,
            external,
            description_parts: Vec::new(),
            saw_bold_heading: false,
            pending: None,
            last_table: None,
            props: IndexMap::new(),
            data_attributes: IndexMap::new(),
            css_variables: IndexMap::new(),
            parameters: IndexMap::new(),
            constructor_parameters: IndexMap::new(),
            class_properties: IndexMap::new(),
            methods: IndexMap::new(),
            return_value: None,
            return_description_parts: Vec::new(),
            code_text: None,
            enum_members: IndexMap::new(),
        }
    }

    fn handle_block(&mut self, node: &Node) {
        match node {
            Node::Paragraph(paragraph) => {
                if let Some(heading) = bold_heading(paragraph) {
                    self.saw_bold_heading = true;
                    self.pending = classify_heading(&heading);
                    if self.pending.is_none() {
                        warn!("unrecognized block heading: {heading}");
                    }
                } else if matches!(self.pending, Some(Pending::ReturnValue)) {
                    self.return_description_parts
                        .push(inline_markdown(&paragraph.children));
                } else if !self.saw_bold_heading {
                    // Plain paragraphs count as description only until the
                    // first bold heading.
                    self.description_parts
                        .push(inline_markdown(&paragraph.children));
                }
            }
            Node::Table(table) => self.handle_table(table),
            Node::Code(code) => self.handle_code(code),
            _ => {}
        }
    }

    fn handle_table(&mut self, table: &Table) {
        match self.pending.take() {
            Some(Pending::Table(kind)) => {
                let fields = parse_field_rows(table, kind.optional_marker());
                self.last_table = Some(kind);
                match kind {
                    TableKind::Props => self.props = fields,
                    TableKind::DataAttributes => self.data_attributes = fields,
                    TableKind::CssVariables => self.css_variables = fields,
                    TableKind::Parameters => self.parameters = fields,
                    TableKind::ConstructorParameters => self.constructor_parameters = fields,
                    TableKind::ClassProperties => self.class_properties = fields,
                    TableKind::Methods => self.methods = fields,
                    TableKind::ReturnObject => {}
                }
            }
            Some(Pending::ReturnValue) => {
                self.return_value = Some(ReturnValue::Object(ObjectReturn {
                    properties: parse_field_rows(table, false),
                }));
                self.last_table = Some(TableKind::ReturnObject);
                // Keep the return-value context armed for the trailing
                // description paragraph.
                self.pending = Some(Pending::ReturnValue);
            }
            Some(Pending::Members) => {
                self.enum_members = parse_member_rows(table);
            }
            pending => {
                // A table with no (or the wrong) preceding heading is skipped.
                warn!("skipping table without heading context in `{}`", self.name);
                self.pending = pending;
            }
        }
    }

    fn handle_code(&mut self, code: &markdown::mdast::Code) {
        match self.pending.take() {
            Some(Pending::RawType) => {
                self.code_text = Some(code.value.clone());
            }
            Some(Pending::ReturnValue) => {
                self.return_value = Some(ReturnValue::Simple(SimpleReturn {
                    type_tree: StyledTree::inline_code(code.value.trim()),
                    type_text: code.value.trim().to_string(),
                }));
                self.pending = Some(Pending::ReturnValue);
            }
            Some(Pending::FieldExample(field)) => {
                if !self.set_field_text(&field, code.value.clone(), FieldSlot::Example) {
                    warn!("example for unknown field `{field}` in `{}`", self.name);
                }
            }
            Some(Pending::FieldDetail(field)) => {
                if !self.set_field_text(&field, code.value.clone(), FieldSlot::DetailedType) {
                    warn!("detailed type for unknown field `{field}` in `{}`", self.name);
                }
            }
            pending => {
                self.pending = pending;
            }
        }
    }

    /// Attach a per-field code block to the map of the most recent table, or
    /// to any map that knows the field as a fallback.
    fn set_field_text(&mut self, field: &str, value: String, slot: FieldSlot) -> bool {
        if let Some(kind) = self.last_table {
            if let Some(target) = self.field_in_table(kind, field) {
                slot.assign(target, value);
                return true;
            }
        }
        for kind in [
            TableKind::Props,
            TableKind::Parameters,
            TableKind::ConstructorParameters,
            TableKind::ClassProperties,
            TableKind::Methods,
            TableKind::DataAttributes,
            TableKind::CssVariables,
            TableKind::ReturnObject,
        ] {
            if let Some(target) = self.field_in_table(kind, field) {
                slot.assign(target, value);
                return true;
            }
        }
        false
    }

    fn field_in_table(
        &mut self,
        kind: TableKind,
        field: &str,
    ) -> Option<&mut FormattedProperty> {
        let map = match kind {
            TableKind::Props => &mut self.props,
            TableKind::DataAttributes => &mut self.data_attributes,
            TableKind::CssVariables => &mut self.css_variables,
            TableKind::Parameters => &mut self.parameters,
            TableKind::ConstructorParameters => &mut self.constructor_parameters,
            TableKind::ClassProperties => &mut self.class_properties,
            TableKind::Methods => &mut self.methods,
            TableKind::ReturnObject => match &mut self.return_value {
                Some(ReturnValue::Object(object)) => &mut object.properties,
                _ => return None,
            },
        };
        map.get_mut(field)
    }

    fn finish(mut self, services: &FormatServices<'_>, policy: &FormatPolicy) -> TypesMeta {
        for map in [
            &mut self.props,
            &mut self.data_attributes,
            &mut self.css_variables,
            &mut self.parameters,
            &mut self.constructor_parameters,
            &mut self.class_properties,
            &mut self.methods,
        ] {
            for field in map.values_mut() {
                rehydrate_property(field, services, policy);
            }
        }
        if let Some(ReturnValue::Object(object)) = &mut self.return_value {
            for field in object.properties.values_mut() {
                rehydrate_property(field, services, policy);
            }
        }

        let mut description_text = join_paragraphs(&self.description_parts);
        let reexport = description_text.as_deref().and_then(parse_reexport);
        if reexport.is_some() {
            description_text = None;
        }
        let description = description_text
            .as_deref()
            .map(|text| services.styler.to_styled(text));
        let slug = Some(docsmith_format::slugify(&self.name));

        let has_component_tables = !self.props.is_empty()
            || !self.data_attributes.is_empty()
            || !self.css_variables.is_empty();
        let has_class_tables =
            !self.constructor_parameters.is_empty() || !self.methods.is_empty();
        let has_function_shape = !self.parameters.is_empty() || self.return_value.is_some();

        if has_component_tables {
            TypesMeta::Component(ComponentMeta {
                name: self.name,
                slug,
                description,
                description_text,
                props: self.props,
                data_attributes: self.data_attributes,
                css_variables: self.css_variables,
            })
        } else if has_class_tables {
            TypesMeta::Class(ClassMeta {
                name: self.name,
                slug,
                description,
                description_text,
                constructor_parameters: self.constructor_parameters,
                properties: self.class_properties,
                methods: self.methods,
            })
        } else if is_hook_name(&self.name, policy) {
            TypesMeta::Hook(HookMeta {
                name: self.name,
                slug,
                description,
                description_text,
                parameters: self.parameters,
                return_value: self.return_value,
            })
        } else if has_function_shape {
            let return_value_description_text = join_paragraphs(&self.return_description_parts);
            TypesMeta::Function(FunctionMeta {
                name: self.name,
                slug,
                description,
                description_text,
                parameters: self.parameters,
                return_value: self.return_value,
                return_value_description: return_value_description_text
                    .as_deref()
                    .map(|text| services.styler.to_styled(text)),
                return_value_description_text,
            })
        } else {
            TypesMeta::Raw(RawMeta {
                name: self.name,
                slug,
                description,
                description_text,
                formatted_code: self
                    .code_text
                    .as_deref()
                    .map(|code| services.highlighter.highlight(code, "ts")),
                code_text: self.code_text,
                enum_members: (!self.enum_members.is_empty()).then_some(self.enum_members),
                reexport,
            })
        }
    }
}

/// Which text slot a per-field code block fills.
#[derive(Debug, Clone, Copy)]
enum FieldSlot {
    Example,
    DetailedType,
}

impl FieldSlot {
    fn assign(self, field: &mut FormattedProperty, value: String) {
        match self {
            FieldSlot::Example => field.example_text = Some(value),
            FieldSlot::DetailedType => field.detailed_type_text = Some(value),
        }
    }
}

fn join_paragraphs(parts: &[String]) -> Option<String> {
    let joined = parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    (!joined.is_empty()).then_some(joined)
}

fn is_hook_name(name: &str, policy: &FormatPolicy) -> bool {
    let last = name.rsplit('.').next().unwrap_or(name);
    last.strip_prefix(policy.hook_prefix.as_str())
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_uppercase())
}

/// `Re-export of [Target](#anchor).`
fn parse_reexport(description: &str) -> Option<ReExport> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^Re-export of \[([^\]]+)\]\(#([^)]+)\)\.?$").expect("static regex")
    });
    let captures = re.captures(description.trim())?;
    Some(ReExport {
        target: captures[1].to_string(),
        anchor: captures[2].to_string(),
    })
}

/// Route a bold heading to the block parser it announces. Longer suffixes are
/// matched first so `Detailed Type` never falls through to `Type`.
fn classify_heading(heading: &str) -> Option<Pending> {
    let suffixes: [(&str, fn(String) -> Pending); 12] = [
        (" Detailed Type", |field| Pending::FieldDetail(field)),
        (" Constructor Parameters", |_| {
            Pending::Table(TableKind::ConstructorParameters)
        }),
        (" Data Attributes", |_| {
            Pending::Table(TableKind::DataAttributes)
        }),
        (" CSS Variables", |_| Pending::Table(TableKind::CssVariables)),
        (" Return Value", |_| Pending::ReturnValue),
        (" Parameters", |_| Pending::Table(TableKind::Parameters)),
        (" Properties", |_| Pending::Table(TableKind::ClassProperties)),
        (" Props", |_| Pending::Table(TableKind::Props)),
        (" Methods", |_| Pending::Table(TableKind::Methods)),
        (" Members", |_| Pending::Members),
        (" Example", |field| Pending::FieldExample(field)),
        (" Type", |_| Pending::RawType),
    ];
    let heading = heading.trim();
    for (suffix, build) in suffixes {
        if let Some(prefix) = heading.strip_suffix(suffix) {
            if prefix.is_empty() {
                continue;
            }
            return Some(build(prefix.to_string()));
        }
    }
    None
}

/// Parse a field table. `optional_marker` selects the `?` convention
/// (parameter tables) over the `*` convention (props tables).
fn parse_field_rows(table: &Table, optional_marker: bool) -> IndexMap<String, FormattedProperty> {
    let mut fields = IndexMap::new();
    for row in table.children.iter().skip(1) {
        let Node::TableRow(row) = row else {
            continue;
        };
        let cells: Vec<&Node> = row.children.iter().collect();
        if cells.len() < 3 {
            warn!("skipping short table row ({} cells)", cells.len());
            continue;
        }
        let raw_name = cell_plain(cells[0]);
        let raw_name = raw_name.trim();
        if raw_name.is_empty() {
            continue;
        }
        let (name, required) = strip_marker(raw_name, optional_marker);
        let type_text = cell_plain(cells[1]).trim().to_string();
        let (default_text, description_cell) = if cells.len() >= 4 {
            (absent_dash(cell_plain(cells[2]).trim()), cells[3])
        } else {
            (None, cells[2])
        };
        let description_text = absent_dash(cell_markdown(description_cell).trim());

        fields.insert(
            name,
            FormattedProperty {
                type_text,
                default_text,
                description_text,
                required,
                ..FormattedProperty::default()
            },
        );
    }
    fields
}

fn parse_member_rows(table: &Table) -> IndexMap<String, String> {
    let mut members = IndexMap::new();
    for row in table.children.iter().skip(1) {
        let Node::TableRow(row) = row else {
            continue;
        };
        let cells: Vec<&Node> = row.children.iter().collect();
        if cells.len() < 2 {
            continue;
        }
        let name = cell_plain(cells[0]).trim().to_string();
        let value = cell_plain(cells[1]).trim().to_string();
        if !name.is_empty() {
            members.insert(name, value);
        }
    }
    members
}

fn cell_plain(cell: &Node) -> String {
    match cell {
        Node::TableCell(cell) => plain_text(&cell.children),
        _ => String::new(),
    }
}

fn cell_markdown(cell: &Node) -> String {
    match cell {
        Node::TableCell(cell) => inline_markdown(&cell.children),
        _ => String::new(),
    }
}

/// A trailing `*` marks required in props-style tables; a trailing `?` marks
/// optional in parameter-style tables. The unmarked state is the table's
/// default.
fn strip_marker(name: &str, optional_marker: bool) -> (String, bool) {
    if optional_marker {
        match name.strip_suffix('?') {
            Some(stripped) => (stripped.to_string(), false),
            None => (name.to_string(), true),
        }
    } else {
        match name.strip_suffix('*') {
            Some(stripped) => (stripped.to_string(), true),
            None => (name.to_string(), false),
        }
    }
}

/// Absent table cells are a literal dash, never an empty string.
fn absent_dash(value: &str) -> Option<String> {
    if value.is_empty() || value == "-" {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsmith_format::{CmarkStyler, TypeLayoutPrinter};
    use docsmith_types::PlainHighlighter;

    fn with_parser<R>(run: impl FnOnce(&FormatServices<'_>, &FormatPolicy) -> R) -> R {
        let styler = CmarkStyler;
        let highlighter = PlainHighlighter;
        let printer = TypeLayoutPrinter;
        let services = FormatServices {
            styler: &styler,
            highlighter: &highlighter,
            printer: &printer,
        };
        let policy = FormatPolicy::default();
        run(&services, &policy)
    }

    #[test]
    fn props_table_row_integrity() {
        let doc = "\
# Button

## API Reference

### Button

A button.

**Button Props:**

| Prop | Type | Default | Description |
| --- | --- | --- | --- |
| variant* | `\"primary\" \\| \"secondary\"` | - | Visual style. |
| disabled | `boolean` | - | Whether disabled |
";
        with_parser(|services, policy| {
            let parsed = parse(doc, services, policy).unwrap();
            assert_eq!(parsed.title.as_deref(), Some("Button"));
            let TypesMeta::Component(button) = &parsed.data.exports["Button"].type_meta else {
                panic!("expected component");
            };
            let disabled = &button.props["disabled"];
            assert_eq!(disabled.type_text, "boolean");
            assert!(!disabled.required);
            assert!(disabled.default_text.is_none());
            assert_eq!(disabled.description_text.as_deref(), Some("Whether disabled"));
            let variant = &button.props["variant"];
            assert!(variant.required);
            assert_eq!(variant.type_text, "\"primary\" | \"secondary\"");
        });
    }

    #[test]
    fn code_block_without_heading_context_is_skipped() {
        let doc = "\
# Docs

## API Reference

### Thing

Some description.

```ts
stray code
```
";
        with_parser(|services, policy| {
            let parsed = parse(doc, services, policy).unwrap();
            let meta = &parsed.data.additional_types[0];
            let TypesMeta::Raw(raw) = meta else {
                panic!("expected raw");
            };
            assert!(raw.code_text.is_none());
            assert_eq!(raw.description_text.as_deref(), Some("Some description."));
        });
    }

    #[test]
    fn reexport_sentences_capture_provenance() {
        let doc = "\
# Docs

## API Reference

### Toolbar.Root.Props

Re-export of [Menu.Root.Props](#menu-root-props).
";
        with_parser(|services, policy| {
            let parsed = parse(doc, services, policy).unwrap();
            let TypesMeta::Raw(raw) = &parsed.data.additional_types[0] else {
                panic!("expected raw");
            };
            let reexport = raw.reexport.as_ref().expect("reexport captured");
            assert_eq!(reexport.target, "Menu.Root.Props");
            assert_eq!(reexport.anchor, "menu-root-props");
            assert!(raw.description_text.is_none());
        });
    }

    #[test]
    fn hook_sections_classify_by_name_prefix() {
        let doc = "\
# Docs

## API Reference

### useToggle

**useToggle Return Value:**

```ts
boolean
```
";
        with_parser(|services, policy| {
            let parsed = parse(doc, services, policy).unwrap();
            let TypesMeta::Hook(hook) = &parsed.data.exports["useToggle"].type_meta else {
                panic!("expected hook");
            };
            let Some(ReturnValue::Simple(simple)) = &hook.return_value else {
                panic!("expected simple return");
            };
            assert_eq!(simple.type_text, "boolean");
        });
    }
}
