//! Markdown generation.
//!
//! Serializes [`TypesSourceData`] into the deterministic document grammar the
//! parser understands: one `###` section per documentable type, bold block
//! headings announcing each table or code block, and the machine-parseable
//! footer. Identical input always produces identical bytes.

use std::fmt::Write;

use docsmith_types::{
    ClassMeta, ComponentMeta, FormattedProperty, FunctionMeta, HookMeta, RawMeta, ReturnValue,
    TypesMeta, TypesSourceData,
};
use indexmap::IndexMap;

use crate::blocks::escape_cell;
use crate::footer::write_footer;

/// Marker style for the name column of a field table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Marker {
    /// Required entries carry a trailing `*` (props-style tables).
    RequiredStar,
    /// Optional entries carry a trailing `?` (parameter-style tables).
    OptionalQuestion,
}

/// Serialize documentation data into the markdown intermediate format.
pub fn generate(title: &str, data: &TypesSourceData) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {title}");

    let _ = writeln!(out, "\n## API Reference");
    for export in data.exports.values() {
        write_section(&mut out, &export.type_meta);
        for additional in &export.additional_types {
            write_section(&mut out, additional);
        }
    }
    for additional in &data.additional_types {
        write_section(&mut out, additional);
    }

    if !data.external_types.is_empty() {
        let _ = writeln!(out, "\n## External Types");
        for external in data.external_types.values() {
            write_section(&mut out, external);
        }
    }

    write_footer(&mut out, data);
    out
}

fn write_section(out: &mut String, meta: &TypesMeta) {
    let _ = writeln!(out, "\n### {}", meta.name());
    match meta {
        TypesMeta::Component(component) => write_component(out, component),
        TypesMeta::Hook(hook) => write_hook(out, hook),
        TypesMeta::Function(function) => write_function(out, function),
        TypesMeta::Class(class) => write_class(out, class),
        TypesMeta::Raw(raw) => write_raw(out, raw),
    }
}

fn write_description(out: &mut String, description: Option<&str>) {
    if let Some(description) = description {
        let trimmed = description.trim();
        if !trimmed.is_empty() {
            let _ = writeln!(out, "\n{trimmed}");
        }
    }
}

fn write_component(out: &mut String, component: &ComponentMeta) {
    write_description(out, component.description_text.as_deref());
    write_field_table(
        out,
        &component.name,
        "Props",
        &["Prop", "Type", "Default", "Description"],
        &component.props,
        Marker::RequiredStar,
    );
    write_field_table(
        out,
        &component.name,
        "Data Attributes",
        &["Attribute", "Type", "Description"],
        &component.data_attributes,
        Marker::RequiredStar,
    );
    write_field_table(
        out,
        &component.name,
        "CSS Variables",
        &["Variable", "Type", "Description"],
        &component.css_variables,
        Marker::RequiredStar,
    );
}

fn write_hook(out: &mut String, hook: &HookMeta) {
    write_description(out, hook.description_text.as_deref());
    write_field_table(
        out,
        &hook.name,
        "Parameters",
        &["Parameter", "Type", "Default", "Description"],
        &hook.parameters,
        Marker::OptionalQuestion,
    );
    write_return_value(out, &hook.name, hook.return_value.as_ref(), None);
}

fn write_function(out: &mut String, function: &FunctionMeta) {
    write_description(out, function.description_text.as_deref());
    write_field_table(
        out,
        &function.name,
        "Parameters",
        &["Parameter", "Type", "Default", "Description"],
        &function.parameters,
        Marker::OptionalQuestion,
    );
    write_return_value(
        out,
        &function.name,
        function.return_value.as_ref(),
        function.return_value_description_text.as_deref(),
    );
}

fn write_class(out: &mut String, class: &ClassMeta) {
    write_description(out, class.description_text.as_deref());
    write_field_table(
        out,
        &class.name,
        "Constructor Parameters",
        &["Parameter", "Type", "Default", "Description"],
        &class.constructor_parameters,
        Marker::OptionalQuestion,
    );
    write_field_table(
        out,
        &class.name,
        "Properties",
        &["Property", "Type", "Default", "Description"],
        &class.properties,
        Marker::RequiredStar,
    );
    write_field_table(
        out,
        &class.name,
        "Methods",
        &["Method", "Type", "Description"],
        &class.methods,
        Marker::OptionalQuestion,
    );
}

fn write_raw(out: &mut String, raw: &RawMeta) {
    match &raw.reexport {
        Some(reexport) => {
            let _ = writeln!(
                out,
                "\nRe-export of [{}](#{}).",
                reexport.target, reexport.anchor
            );
        }
        None => write_description(out, raw.description_text.as_deref()),
    }
    if let Some(code) = raw.code_text.as_deref() {
        let _ = writeln!(out, "\n**{} Type:**", raw.name);
        let _ = writeln!(out, "\n```ts\n{}\n```", code.trim_end());
    }
    if let Some(members) = &raw.enum_members {
        if !members.is_empty() {
            let _ = writeln!(out, "\n**{} Members:**", raw.name);
            let _ = writeln!(out, "\n| Member | Value |");
            let _ = writeln!(out, "| --- | --- |");
            for (member, value) in members {
                let _ = writeln!(
                    out,
                    "| {} | `{}` |",
                    escape_cell(member),
                    escape_cell(value)
                );
            }
        }
    }
}

fn write_return_value(
    out: &mut String,
    owner: &str,
    return_value: Option<&ReturnValue>,
    description: Option<&str>,
) {
    let Some(return_value) = return_value else {
        return;
    };
    let _ = writeln!(out, "\n**{owner} Return Value:**");
    match return_value {
        ReturnValue::Simple(simple) => {
            let _ = writeln!(out, "\n```ts\n{}\n```", simple.type_text.trim_end());
        }
        ReturnValue::Object(object) => {
            write_table_rows(
                out,
                &["Property", "Type", "Default", "Description"],
                &object.properties,
                Marker::RequiredStar,
            );
            write_field_blocks(out, &object.properties);
        }
    }
    if let Some(description) = description {
        let trimmed = description.trim();
        if !trimmed.is_empty() {
            let _ = writeln!(out, "\n{trimmed}");
        }
    }
}

fn write_field_table(
    out: &mut String,
    owner: &str,
    label: &str,
    columns: &[&str],
    fields: &IndexMap<String, FormattedProperty>,
    marker: Marker,
) {
    if fields.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n**{owner} {label}:**");
    write_table_rows(out, columns, fields, marker);
    write_field_blocks(out, fields);
}

fn write_table_rows(
    out: &mut String,
    columns: &[&str],
    fields: &IndexMap<String, FormattedProperty>,
    marker: Marker,
) {
    let with_default = columns.len() == 4;
    let _ = writeln!(out, "\n| {} |", columns.join(" | "));
    let _ = writeln!(
        out,
        "|{}",
        " --- |".repeat(columns.len())
    );
    for (name, field) in fields {
        let marked = match marker {
            Marker::RequiredStar if field.required => format!("{name}*"),
            Marker::OptionalQuestion if !field.required => format!("{name}?"),
            _ => name.clone(),
        };
        let type_cell = format!("`{}`", escape_cell(&field.type_text));
        let description_cell = field
            .description_text
            .as_deref()
            .map(escape_cell)
            .unwrap_or_else(|| "-".to_string());
        if with_default {
            let default_cell = field
                .default_text
                .as_deref()
                .map(|default| format!("`{}`", escape_cell(default)))
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} |",
                escape_cell(&marked),
                type_cell,
                default_cell,
                description_cell
            );
        } else {
            let _ = writeln!(
                out,
                "| {} | {} | {} |",
                escape_cell(&marked),
                type_cell,
                description_cell
            );
        }
    }
}

/// Per-field example and detailed-type blocks follow the table they belong to.
fn write_field_blocks(out: &mut String, fields: &IndexMap<String, FormattedProperty>) {
    for (name, field) in fields {
        if let Some(example) = field.example_text.as_deref() {
            let _ = writeln!(out, "\n**{name} Example:**");
            let _ = writeln!(out, "\n```tsx\n{}\n```", example.trim_end());
        }
        if let Some(detail) = field.detailed_type_text.as_deref() {
            let _ = writeln!(out, "\n**{name} Detailed Type:**");
            let _ = writeln!(out, "\n```ts\n{}\n```", detail.trim_end());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsmith_types::{Export, SimpleReturn, StyledTree};

    fn prop(type_text: &str, required: bool) -> FormattedProperty {
        FormattedProperty {
            type_text: type_text.to_string(),
            required,
            ..FormattedProperty::default()
        }
    }

    #[test]
    fn component_section_shape() {
        let mut props = IndexMap::new();
        props.insert("variant".to_string(), prop("\"primary\" | \"secondary\"", true));
        props.insert("disabled".to_string(), prop("boolean", false));
        let mut data = TypesSourceData::default();
        data.exports.insert(
            "Button".to_string(),
            Export {
                type_meta: TypesMeta::Component(ComponentMeta {
                    name: "Button".to_string(),
                    description_text: Some("A button.".to_string()),
                    props,
                    ..ComponentMeta::default()
                }),
                additional_types: Vec::new(),
            },
        );

        let doc = generate("Button", &data);
        assert!(doc.starts_with("# Button\n"));
        assert!(doc.contains("## API Reference"));
        assert!(doc.contains("### Button"));
        assert!(doc.contains("**Button Props:**"));
        assert!(doc.contains("| variant* | `\"primary\" \\| \"secondary\"` | - | - |"));
        assert!(doc.contains("| disabled | `boolean` | - | - |"));
    }

    #[test]
    fn generation_is_deterministic() {
        let mut data = TypesSourceData::default();
        data.exports.insert(
            "useToggle".to_string(),
            Export {
                type_meta: TypesMeta::Hook(HookMeta {
                    name: "useToggle".to_string(),
                    return_value: Some(ReturnValue::Simple(SimpleReturn {
                        type_tree: StyledTree::inline_code("boolean"),
                        type_text: "boolean".to_string(),
                    })),
                    ..HookMeta::default()
                }),
                additional_types: Vec::new(),
            },
        );
        assert_eq!(generate("Hooks", &data), generate("Hooks", &data));
    }

    #[test]
    fn reexport_sections_emit_the_provenance_sentence() {
        let mut data = TypesSourceData::default();
        data.additional_types.push(TypesMeta::Raw(RawMeta {
            name: "Toolbar.Root.Props".to_string(),
            reexport: Some(docsmith_types::ReExport {
                target: "Menu.Root.Props".to_string(),
                anchor: "menu-root-props".to_string(),
            }),
            ..RawMeta::default()
        }));
        let doc = generate("Toolbar", &data);
        assert!(doc.contains("Re-export of [Menu.Root.Props](#menu-root-props)."));
    }
}
