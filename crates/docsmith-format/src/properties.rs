//! Property and parameter formatting.
//!
//! One [`FormattedProperty`] per declared prop/parameter: canonical type text,
//! derived styled trees, default, description, example, and the detailed type
//! when the heuristic asks for one.

use docsmith_types::{
    Documentation, ExportNode, FormattedProperty, ParameterNode, PropertyNode, StyledTree,
    TypeNode,
};
use indexmap::IndexMap;
use tracing::warn;

use crate::expand::expand_type;
use crate::layout::compute_short_type;
use crate::policy::FormatPolicy;
use crate::render::{render_type, RenderContext};
use crate::services::FormatServices;

/// Formats the fields of one documentation page.
///
/// Holds the page-level context (export names, canonical name map, services)
/// so individual fields format with one call.
pub struct PropertyFormatter<'a> {
    services: FormatServices<'a>,
    policy: &'a FormatPolicy,
    export_names: &'a [String],
    type_name_map: &'a IndexMap<String, String>,
    all_exports: Option<&'a [ExportNode]>,
}

impl<'a> PropertyFormatter<'a> {
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
            all_exports: None,
        }
    }

    /// Provide the full export list for external-reference expansion.
    pub fn with_all_exports(mut self, all_exports: &'a [ExportNode]) -> Self {
        self.all_exports = Some(all_exports);
        self
    }

    /// Format component props. `ref` and `@ignore`-tagged props are dropped.
    pub fn format_properties(
        &self,
        properties: &[PropertyNode],
    ) -> IndexMap<String, FormattedProperty> {
        properties
            .iter()
            .filter_map(|property| {
                self.format_field(
                    &property.name,
                    &property.ty,
                    property.optional,
                    property.documentation.as_ref(),
                    true,
                )
                .map(|formatted| (property.name.clone(), formatted))
            })
            .collect()
    }

    /// Format function/hook parameters.
    pub fn format_parameters(
        &self,
        parameters: &[ParameterNode],
    ) -> IndexMap<String, FormattedProperty> {
        parameters
            .iter()
            .filter_map(|parameter| {
                let mut formatted = self.format_field(
                    &parameter.name,
                    &parameter.ty,
                    parameter.optional,
                    parameter.documentation.as_ref(),
                    false,
                )?;
                // A declaration-level default (`= 0`) wins over the doc tag.
                if let Some(default) = &parameter.default_value {
                    formatted.default = Some(StyledTree::inline_code(default.as_str()));
                    formatted.default_text = Some(default.clone());
                }
                Some((parameter.name.clone(), formatted))
            })
            .collect()
    }

    fn format_field(
        &self,
        name: &str,
        ty: &TypeNode,
        optional: bool,
        documentation: Option<&Documentation>,
        component_context: bool,
    ) -> Option<FormattedProperty> {
        if component_context && name == "ref" {
            return None;
        }
        if documentation.is_some_and(|docs| docs.has_tag("ignore")) {
            return None;
        }

        let ctx = RenderContext::new(self.export_names, self.type_name_map, self.policy)
            .with_remove_undefined(optional);

        // An explicit `@type` tag wins verbatim over the rendered type.
        let type_text = documentation
            .and_then(|docs| docs.tag_value("type"))
            .map(str::to_string)
            .unwrap_or_else(|| render_type(ty, &ctx));

        let short_type_text = compute_short_type(&type_text, self.policy);
        let default_text = documentation.and_then(|docs| docs.default_value.clone());
        let description_text = documentation
            .and_then(|docs| docs.description.as_deref())
            .map(normalize_single_line)
            .filter(|text| !text.is_empty());
        let example_text = documentation
            .and_then(|docs| docs.tag_value("example"))
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        let detailed_type_text = self.detailed_type_for(name, ty, &type_text, &ctx);

        Some(FormattedProperty {
            type_tree: StyledTree::inline_code(type_text.as_str()),
            short_type: short_type_text
                .as_deref()
                .map(StyledTree::inline_code),
            default: default_text.as_deref().map(StyledTree::inline_code),
            required: !optional,
            description: description_text
                .as_deref()
                .map(|text| self.services.styler.to_styled(text)),
            example: example_text
                .as_deref()
                .map(|text| self.services.highlighter.highlight(text, "tsx")),
            detailed_type: detailed_type_text
                .as_deref()
                .map(|text| self.services.highlighter.highlight(text, "ts")),
            type_text,
            short_type_text,
            default_text,
            description_text,
            example_text,
            detailed_type_text,
        })
    }

    fn detailed_type_for(
        &self,
        name: &str,
        ty: &TypeNode,
        type_text: &str,
        ctx: &RenderContext<'_>,
    ) -> Option<String> {
        if !self.should_show_detailed_type(name, ty, type_text) {
            return None;
        }
        let expanded = expand_type(ty, ctx, self.all_exports);
        let formatted = match self
            .services
            .printer
            .format(&expanded, self.policy.print_width)
        {
            Ok(formatted) => formatted,
            Err(error) => {
                warn!("pretty-printing type of `{name}` failed: {error}; keeping unformatted text");
                expanded
            }
        };
        (formatted != type_text).then_some(formatted)
    }

    fn should_show_detailed_type(&self, name: &str, ty: &TypeNode, type_text: &str) -> bool {
        if self.policy.wants_detail_for_name(name) {
            return true;
        }
        if let TypeNode::Union(union) = ty {
            if union.types.len() >= self.policy.detail_union_members {
                return true;
            }
        }
        type_text.len() >= self.policy.detail_type_length
    }
}

/// Collapse whitespace runs to single spaces. Descriptions land in markdown
/// table cells, which cannot carry newlines; normalizing here keeps the
/// generator and the parser in agreement.
pub fn normalize_single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TypeLayoutPrinter;
    use crate::styler::CmarkStyler;
    use docsmith_types::{DocTag, IntrinsicNode, LiteralNode, PlainHighlighter, UnionNode};

    fn intrinsic(name: &str) -> TypeNode {
        TypeNode::Intrinsic(IntrinsicNode {
            name: name.to_string(),
        })
    }

    fn prop(name: &str, ty: TypeNode, optional: bool) -> PropertyNode {
        PropertyNode {
            name: name.to_string(),
            ty,
            optional,
            documentation: None,
        }
    }

    fn with_services<R>(run: impl FnOnce(PropertyFormatter<'_>) -> R) -> R {
        let styler = CmarkStyler;
        let highlighter = PlainHighlighter;
        let printer = TypeLayoutPrinter;
        let services = FormatServices {
            styler: &styler,
            highlighter: &highlighter,
            printer: &printer,
        };
        let policy = FormatPolicy::default();
        let map = IndexMap::new();
        let formatter = PropertyFormatter::new(services, &policy, &[], &map);
        run(formatter)
    }

    #[test]
    fn ref_and_ignored_props_are_dropped() {
        with_services(|formatter| {
            let props = vec![
                prop("ref", intrinsic("unknown"), true),
                PropertyNode {
                    name: "hidden".to_string(),
                    ty: intrinsic("boolean"),
                    optional: true,
                    documentation: Some(Documentation {
                        tags: vec![DocTag {
                            name: "ignore".to_string(),
                            value: None,
                        }],
                        ..Documentation::default()
                    }),
                },
                prop("disabled", intrinsic("boolean"), true),
            ];
            let formatted = formatter.format_properties(&props);
            assert_eq!(formatted.len(), 1);
            assert!(formatted.contains_key("disabled"));
        });
    }

    #[test]
    fn optional_prop_drops_undefined_and_clears_required() {
        with_services(|formatter| {
            let props = vec![prop(
                "value",
                TypeNode::Union(UnionNode {
                    name: None,
                    types: vec![intrinsic("string"), intrinsic("undefined")],
                }),
                true,
            )];
            let formatted = formatter.format_properties(&props);
            let value = &formatted["value"];
            assert_eq!(value.type_text, "string");
            assert!(!value.required);
            assert!(value.default_text.is_none());
        });
    }

    #[test]
    fn type_tag_overrides_rendered_type() {
        with_services(|formatter| {
            let props = vec![PropertyNode {
                name: "align".to_string(),
                ty: intrinsic("string"),
                optional: false,
                documentation: Some(Documentation {
                    tags: vec![DocTag {
                        name: "type".to_string(),
                        value: Some("Alignment".to_string()),
                    }],
                    ..Documentation::default()
                }),
            }];
            let formatted = formatter.format_properties(&props);
            assert_eq!(formatted["align"].type_text, "Alignment");
        });
    }

    #[test]
    fn multiline_descriptions_are_normalized() {
        with_services(|formatter| {
            let props = vec![PropertyNode {
                name: "open".to_string(),
                ty: intrinsic("boolean"),
                optional: true,
                documentation: Some(Documentation {
                    description: Some("Whether the popup\nis currently open.".to_string()),
                    ..Documentation::default()
                }),
            }];
            let formatted = formatter.format_properties(&props);
            assert_eq!(
                formatted["open"].description_text.as_deref(),
                Some("Whether the popup is currently open.")
            );
        });
    }

    #[test]
    fn event_handlers_get_a_detailed_type() {
        with_services(|formatter| {
            let handler = TypeNode::Function(docsmith_types::FunctionNode {
                name: Some("AccordionOpenChangeHandler".to_string()),
                signatures: vec![docsmith_types::CallSignature {
                    parameters: vec![ParameterNode {
                        name: "open".to_string(),
                        ty: intrinsic("boolean"),
                        optional: false,
                        default_value: None,
                        documentation: None,
                    }],
                    return_type: Box::new(intrinsic("void")),
                }],
            });
            let props = vec![prop("onOpenChange", handler, true)];
            let formatted = formatter.format_properties(&props);
            let formatted = &formatted["onOpenChange"];
            // Compact cell shows the alias, the detail shows the signature.
            assert_eq!(formatted.type_text, "AccordionOpenChangeHandler");
            assert_eq!(
                formatted.detailed_type_text.as_deref(),
                Some("(open: boolean) => void")
            );
        });
    }

    #[test]
    fn detail_identical_to_basic_type_is_discarded() {
        with_services(|formatter| {
            let props = vec![prop("className", intrinsic("string"), true)];
            let formatted = formatter.format_properties(&props);
            assert!(formatted["className"].detailed_type_text.is_none());
        });
    }

    #[test]
    fn literal_union_members_format_once_each() {
        with_services(|formatter| {
            let union = TypeNode::Union(UnionNode {
                name: None,
                types: vec![
                    TypeNode::Literal(LiteralNode {
                        value: "\"primary\"".to_string(),
                    }),
                    TypeNode::Literal(LiteralNode {
                        value: "\"primary\"".to_string(),
                    }),
                    TypeNode::Literal(LiteralNode {
                        value: "\"secondary\"".to_string(),
                    }),
                ],
            });
            let props = vec![prop("variant", union, false)];
            let formatted = formatter.format_properties(&props);
            assert_eq!(formatted["variant"].type_text, "\"primary\" | \"secondary\"");
            assert!(formatted["variant"].required);
        });
    }

    #[test]
    fn parameter_declaration_default_wins() {
        with_services(|formatter| {
            let parameters = vec![ParameterNode {
                name: "count".to_string(),
                ty: intrinsic("number"),
                optional: true,
                default_value: Some("0".to_string()),
                documentation: Some(Documentation {
                    default_value: Some("1".to_string()),
                    ..Documentation::default()
                }),
            }];
            let formatted = formatter.format_parameters(&parameters);
            assert_eq!(formatted["count"].default_text.as_deref(), Some("0"));
        });
    }
}
