//! Entity formatting: from module exports to documentable metadata.
//!
//! Classifies each export as a component, hook, function, or raw type alias
//! and assembles the matching [`TypesMeta`] record from formatted fields.
//! Sibling exports supply component data attributes and CSS variables by the
//! `{Name}DataAttributes` / `{Name}CssVars` suffix convention.

use docsmith_types::{
    ComponentMeta, Documentation, ExportNode, FormattedProperty, FunctionMeta, HookMeta,
    ObjectReturn, RawMeta, ReturnValue, SimpleReturn, StyledTree, TypeNode, TypesMeta,
};
use indexmap::IndexMap;
use tracing::warn;

use crate::policy::FormatPolicy;
use crate::properties::{normalize_single_line, PropertyFormatter};
use crate::render::{render_type, RenderContext};
use crate::services::FormatServices;

/// Suffix of sibling exports that document data attributes.
const DATA_ATTRIBUTES_SUFFIX: &str = "DataAttributes";
/// Suffix of sibling exports that document CSS variables.
const CSS_VARIABLES_SUFFIX: &str = "CssVars";

/// Formats a module's exports into documentable entities.
pub struct EntityFormatter<'a> {
    services: FormatServices<'a>,
    policy: &'a FormatPolicy,
    export_names: &'a [String],
    type_name_map: &'a IndexMap<String, String>,
}

impl<'a> EntityFormatter<'a> {
    pub fn new(
        services: FormatServices<'a>,
        policy: &'a FormatPolicy,
        export_names: &'a [String],
        type_name_map: &'a IndexMap<String, String>,
    ) -> Self {
        Self {
            services,
            policy,
            export_names,
            type_name_map,
        }
    }

    /// Format every export of a module. Sibling exports consumed as data
    /// attributes or CSS variables of a component do not produce entities of
    /// their own.
    pub fn format_exports(&self, exports: &[ExportNode]) -> Vec<TypesMeta> {
        let consumed = sibling_names(exports);
        exports
            .iter()
            .filter(|export| !consumed.contains(&export.name))
            .map(|export| self.format_export(export, exports))
            .collect()
    }

    fn format_export(&self, export: &ExportNode, all_exports: &[ExportNode]) -> TypesMeta {
        let display_name = self.display_name(&export.name);
        let formatter = PropertyFormatter::new(
            self.services,
            self.policy,
            self.export_names,
            self.type_name_map,
        )
        .with_all_exports(all_exports);

        match &export.ty {
            TypeNode::Component(component) => {
                let (data_attributes, css_variables) =
                    self.sibling_tables(&export.name, all_exports, &formatter);
                TypesMeta::Component(ComponentMeta {
                    slug: Some(slugify(&display_name)),
                    description: self.styled_description(export.documentation.as_ref()),
                    description_text: description_text(export.documentation.as_ref()),
                    props: formatter.format_properties(&component.props),
                    data_attributes,
                    css_variables,
                    name: display_name,
                })
            }
            TypeNode::Function(function) if self.is_hook(&export.name) => {
                let (parameters, return_value) =
                    self.format_callable(function, &formatter);
                TypesMeta::Hook(HookMeta {
                    slug: Some(slugify(&display_name)),
                    description: self.styled_description(export.documentation.as_ref()),
                    description_text: description_text(export.documentation.as_ref()),
                    parameters,
                    return_value,
                    name: display_name,
                })
            }
            TypeNode::Function(function) => {
                let (parameters, return_value) =
                    self.format_callable(function, &formatter);
                let returns_text = export
                    .documentation
                    .as_ref()
                    .and_then(|docs| docs.tag_value("returns"))
                    .map(normalize_single_line)
                    .filter(|text| !text.is_empty());
                TypesMeta::Function(FunctionMeta {
                    slug: Some(slugify(&display_name)),
                    description: self.styled_description(export.documentation.as_ref()),
                    description_text: description_text(export.documentation.as_ref()),
                    parameters,
                    return_value,
                    return_value_description: returns_text
                        .as_deref()
                        .map(|text| self.services.styler.to_styled(text)),
                    return_value_description_text: returns_text,
                    name: display_name,
                })
            }
            ty => self.format_raw(export, ty, display_name),
        }
    }

    fn format_raw(&self, export: &ExportNode, ty: &TypeNode, display_name: String) -> TypesMeta {
        let ctx = self
            .render_context()
            .with_self_name(Some(&export.name))
            .with_expand_objects(true);
        let rendered = render_type(ty, &ctx);
        let code_text = match self
            .services
            .printer
            .format(&rendered, self.policy.print_width)
        {
            Ok(formatted) => formatted,
            Err(error) => {
                warn!(
                    "pretty-printing type alias `{}` failed: {error}; keeping unformatted text",
                    export.name
                );
                rendered
            }
        };

        let enum_members = match ty {
            TypeNode::Enum(enumeration) => {
                let members: IndexMap<String, String> = enumeration
                    .members
                    .iter()
                    .map(|member| (member.name.clone(), member.value.clone()))
                    .collect();
                (!members.is_empty()).then_some(members)
            }
            _ => None,
        };

        TypesMeta::Raw(RawMeta {
            slug: Some(slugify(&display_name)),
            description: self.styled_description(export.documentation.as_ref()),
            description_text: description_text(export.documentation.as_ref()),
            formatted_code: Some(self.services.highlighter.highlight(&code_text, "ts")),
            code_text: Some(code_text),
            enum_members,
            reexport: None,
            name: display_name,
        })
    }

    fn format_callable(
        &self,
        function: &docsmith_types::FunctionNode,
        formatter: &PropertyFormatter<'_>,
    ) -> (IndexMap<String, FormattedProperty>, Option<ReturnValue>) {
        let Some(signature) = function.signatures.first() else {
            return (IndexMap::new(), None);
        };
        let parameters = formatter.format_parameters(&signature.parameters);
        let return_value = match signature.return_type.as_ref() {
            TypeNode::Object(object) if object.name.is_none() => {
                Some(ReturnValue::Object(ObjectReturn {
                    properties: formatter.format_properties(&object.properties),
                }))
            }
            other => {
                let type_text = render_type(other, &self.render_context());
                Some(ReturnValue::Simple(SimpleReturn {
                    type_tree: StyledTree::inline_code(type_text.as_str()),
                    type_text,
                }))
            }
        };
        (parameters, return_value)
    }

    /// Data-attribute and CSS-variable tables from sibling exports.
    fn sibling_tables(
        &self,
        component_name: &str,
        all_exports: &[ExportNode],
        formatter: &PropertyFormatter<'_>,
    ) -> (
        IndexMap<String, FormattedProperty>,
        IndexMap<String, FormattedProperty>,
    ) {
        let data_attributes = self.sibling_table(
            &format!("{component_name}{DATA_ATTRIBUTES_SUFFIX}"),
            all_exports,
            formatter,
        );
        let css_variables = self.sibling_table(
            &format!("{component_name}{CSS_VARIABLES_SUFFIX}"),
            all_exports,
            formatter,
        );
        (data_attributes, css_variables)
    }

    fn sibling_table(
        &self,
        sibling_name: &str,
        all_exports: &[ExportNode],
        formatter: &PropertyFormatter<'_>,
    ) -> IndexMap<String, FormattedProperty> {
        let Some(sibling) = all_exports.iter().find(|export| export.name == sibling_name)
        else {
            return IndexMap::new();
        };
        match &sibling.ty {
            TypeNode::Object(object) => formatter.format_properties(&object.properties),
            TypeNode::Enum(enumeration) => enumeration
                .members
                .iter()
                .map(|member| {
                    let attribute = member.value.trim_matches(&['"', '\''][..]).to_string();
                    let description_text = member
                        .description
                        .as_deref()
                        .map(normalize_single_line)
                        .filter(|text| !text.is_empty());
                    let formatted = FormattedProperty {
                        type_tree: StyledTree::inline_code("string"),
                        type_text: "string".to_string(),
                        description: description_text
                            .as_deref()
                            .map(|text| self.services.styler.to_styled(text)),
                        description_text,
                        ..FormattedProperty::default()
                    };
                    (attribute, formatted)
                })
                .collect(),
            _ => IndexMap::new(),
        }
    }

    fn render_context(&self) -> RenderContext<'_> {
        RenderContext::new(self.export_names, self.type_name_map, self.policy)
    }

    fn display_name(&self, flat: &str) -> String {
        crate::names::resolve_qualified_name(
            flat,
            self.export_names,
            self.type_name_map,
            self.policy,
        )
    }

    fn is_hook(&self, name: &str) -> bool {
        name.strip_prefix(self.policy.hook_prefix.as_str())
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_uppercase())
    }

    fn styled_description(&self, documentation: Option<&Documentation>) -> Option<StyledTree> {
        documentation
            .and_then(|docs| docs.description.as_deref())
            .map(|text| self.services.styler.to_styled(text))
    }
}

fn description_text(documentation: Option<&Documentation>) -> Option<String> {
    documentation
        .and_then(|docs| docs.description.as_deref())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Names of sibling exports that are folded into component tables.
fn sibling_names(exports: &[ExportNode]) -> Vec<String> {
    exports
        .iter()
        .filter(|export| matches!(export.ty, TypeNode::Component(_)))
        .flat_map(|component| {
            [
                format!("{}{DATA_ATTRIBUTES_SUFFIX}", component.name),
                format!("{}{CSS_VARIABLES_SUFFIX}", component.name),
            ]
        })
        .filter(|name| exports.iter().any(|export| &export.name == name))
        .collect()
}

/// Kebab-case anchor slug for a display name: `Accordion.Root` →
/// `accordion-root`, `useAccordion` -> `use-accordion`.
///
/// Computed from the name alone so the format and parse paths agree.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c == '.' || c == ' ' {
            if !slug.ends_with('-') {
                slug.push('-');
            }
            prev_lower = false;
        } else if c.is_uppercase() {
            if prev_lower && !slug.ends_with('-') {
                slug.push('-');
            }
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
            prev_lower = false;
        } else {
            slug.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    slug.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TypeLayoutPrinter;
    use crate::styler::CmarkStyler;
    use docsmith_types::{
        CallSignature, ComponentNode, EnumMember, EnumNode, FunctionNode, IntrinsicNode,
        ObjectNode, ParameterNode, PlainHighlighter, PropertyNode,
    };

    fn intrinsic(name: &str) -> TypeNode {
        TypeNode::Intrinsic(IntrinsicNode {
            name: name.to_string(),
        })
    }

    fn with_formatter<R>(
        map: IndexMap<String, String>,
        run: impl FnOnce(EntityFormatter<'_>) -> R,
    ) -> R {
        let styler = CmarkStyler;
        let highlighter = PlainHighlighter;
        let printer = TypeLayoutPrinter;
        let services = FormatServices {
            styler: &styler,
            highlighter: &highlighter,
            printer: &printer,
        };
        let policy = FormatPolicy::default();
        let formatter = EntityFormatter::new(services, &policy, &[], &map);
        run(formatter)
    }

    #[test]
    fn slugs_are_kebab_case() {
        assert_eq!(slugify("Accordion.Root"), "accordion-root");
        assert_eq!(slugify("useAccordion"), "use-accordion");
        assert_eq!(slugify("Accordion.Root.Props"), "accordion-root-props");
    }

    #[test]
    fn components_fold_sibling_data_attributes() {
        let mut map = IndexMap::new();
        map.insert("AccordionRoot".to_string(), "Accordion.Root".to_string());
        with_formatter(map, |formatter| {
            let exports = vec![
                ExportNode {
                    name: "AccordionRoot".to_string(),
                    ty: TypeNode::Component(ComponentNode {
                        name: Some("AccordionRoot".to_string()),
                        props: vec![PropertyNode {
                            name: "disabled".to_string(),
                            ty: intrinsic("boolean"),
                            optional: true,
                            documentation: None,
                        }],
                    }),
                    documentation: None,
                },
                ExportNode {
                    name: "AccordionRootDataAttributes".to_string(),
                    ty: TypeNode::Enum(EnumNode {
                        name: Some("AccordionRootDataAttributes".to_string()),
                        members: vec![EnumMember {
                            name: "open".to_string(),
                            value: "\"data-open\"".to_string(),
                            description: Some("Present when the panel is open.".to_string()),
                        }],
                    }),
                    documentation: None,
                },
            ];
            let entities = formatter.format_exports(&exports);
            assert_eq!(entities.len(), 1);
            let TypesMeta::Component(component) = &entities[0] else {
                panic!("expected component");
            };
            assert_eq!(component.name, "Accordion.Root");
            assert_eq!(component.slug.as_deref(), Some("accordion-root"));
            assert!(component.props.contains_key("disabled"));
            let attribute = &component.data_attributes["data-open"];
            assert_eq!(
                attribute.description_text.as_deref(),
                Some("Present when the panel is open.")
            );
        });
    }

    #[test]
    fn hooks_are_detected_by_prefix() {
        with_formatter(IndexMap::new(), |formatter| {
            let exports = vec![ExportNode {
                name: "useAccordion".to_string(),
                ty: TypeNode::Function(FunctionNode {
                    name: Some("useAccordion".to_string()),
                    signatures: vec![CallSignature {
                        parameters: vec![ParameterNode {
                            name: "options".to_string(),
                            ty: intrinsic("object"),
                            optional: true,
                            default_value: None,
                            documentation: None,
                        }],
                        return_type: Box::new(TypeNode::Object(ObjectNode {
                            name: None,
                            properties: vec![PropertyNode {
                                name: "open".to_string(),
                                ty: intrinsic("boolean"),
                                optional: false,
                                documentation: None,
                            }],
                            index_signature: None,
                        })),
                    }],
                }),
                documentation: None,
            }];
            let entities = formatter.format_exports(&exports);
            let TypesMeta::Hook(hook) = &entities[0] else {
                panic!("expected hook");
            };
            assert_eq!(hook.name, "useAccordion");
            assert!(hook.parameters.contains_key("options"));
            let Some(ReturnValue::Object(object)) = &hook.return_value else {
                panic!("expected object return");
            };
            assert!(object.properties.contains_key("open"));
        });
    }

    #[test]
    fn plain_aliases_become_raw_entities() {
        with_formatter(IndexMap::new(), |formatter| {
            let exports = vec![ExportNode {
                name: "Orientation".to_string(),
                ty: TypeNode::Union(docsmith_types::UnionNode {
                    name: Some("Orientation".to_string()),
                    types: vec![
                        TypeNode::Literal(docsmith_types::LiteralNode {
                            value: "\"horizontal\"".to_string(),
                        }),
                        TypeNode::Literal(docsmith_types::LiteralNode {
                            value: "\"vertical\"".to_string(),
                        }),
                    ],
                }),
                documentation: None,
            }];
            let entities = formatter.format_exports(&exports);
            let TypesMeta::Raw(raw) = &entities[0] else {
                panic!("expected raw alias");
            };
            // The alias renders its members, not itself.
            assert_eq!(
                raw.code_text.as_deref(),
                Some("\"horizontal\" | \"vertical\"")
            );
            assert!(raw.enum_members.is_none());
        });
    }
}
