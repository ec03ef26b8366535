//! Detailed-type expansion.
//!
//! A table cell shows the compact type; the detailed view shows the fully
//! expanded body, with external references substituted by their definitions.
//! Substitution walks `allExports` with a visited set keyed by qualified name,
//! so mutually recursive aliases terminate, and falls back to a curated table
//! of well-known external shapes before giving up and leaving the reference
//! as a name.

use docsmith_types::{
    ArrayNode, CallSignature, ComponentNode, ExportNode, FunctionNode, IndexSignature,
    IntersectionNode, IntrinsicNode, ObjectNode, ParameterNode, PropertyNode, TupleNode,
    TypeNode, TypeParameterNode, UnionNode,
};
use rustc_hash::FxHashSet;

use crate::render::{render_type, RenderContext};

/// Render the fully expanded form of a type.
pub fn expand_type(
    node: &TypeNode,
    ctx: &RenderContext<'_>,
    all_exports: Option<&[ExportNode]>,
) -> String {
    let mut visited = FxHashSet::default();
    let resolved = resolve_externals(node, all_exports, &mut visited);
    render_type(&resolved, &ctx.with_expand_objects(true))
}

/// Clone-transform the tree, substituting external references with their
/// definitions where those can be found.
fn resolve_externals(
    node: &TypeNode,
    all_exports: Option<&[ExportNode]>,
    visited: &mut FxHashSet<String>,
) -> TypeNode {
    match node {
        TypeNode::External(external) => {
            if !visited.insert(external.name.clone()) {
                // Already expanding this name further up the stack.
                return node.clone();
            }
            let resolved = lookup_export(&external.name, all_exports)
                .map(|target| resolve_externals(target, all_exports, visited))
                .or_else(|| known_external_shape(&external.name))
                .unwrap_or_else(|| node.clone());
            visited.remove(&external.name);
            resolved
        }
        TypeNode::Union(union) => TypeNode::Union(UnionNode {
            name: union.name.clone(),
            types: resolve_all(&union.types, all_exports, visited),
        }),
        TypeNode::Intersection(intersection) => TypeNode::Intersection(IntersectionNode {
            name: intersection.name.clone(),
            types: resolve_all(&intersection.types, all_exports, visited),
        }),
        TypeNode::Object(object) => TypeNode::Object(ObjectNode {
            name: object.name.clone(),
            properties: resolve_properties(&object.properties, all_exports, visited),
            index_signature: object.index_signature.as_ref().map(|index| IndexSignature {
                key_name: index.key_name.clone(),
                key: Box::new(resolve_externals(&index.key, all_exports, visited)),
                value: Box::new(resolve_externals(&index.value, all_exports, visited)),
            }),
        }),
        TypeNode::Array(array) => TypeNode::Array(ArrayNode {
            element: Box::new(resolve_externals(&array.element, all_exports, visited)),
        }),
        TypeNode::Function(function) => TypeNode::Function(FunctionNode {
            name: function.name.clone(),
            signatures: function
                .signatures
                .iter()
                .map(|signature| CallSignature {
                    parameters: signature
                        .parameters
                        .iter()
                        .map(|parameter| ParameterNode {
                            name: parameter.name.clone(),
                            ty: resolve_externals(&parameter.ty, all_exports, visited),
                            optional: parameter.optional,
                            default_value: parameter.default_value.clone(),
                            documentation: parameter.documentation.clone(),
                        })
                        .collect(),
                    return_type: Box::new(resolve_externals(
                        &signature.return_type,
                        all_exports,
                        visited,
                    )),
                })
                .collect(),
        }),
        TypeNode::Tuple(tuple) => TypeNode::Tuple(TupleNode {
            name: tuple.name.clone(),
            members: resolve_all(&tuple.members, all_exports, visited),
        }),
        TypeNode::TypeParameter(parameter) => TypeNode::TypeParameter(TypeParameterNode {
            name: parameter.name.clone(),
            constraint: parameter
                .constraint
                .as_ref()
                .map(|constraint| Box::new(resolve_externals(constraint, all_exports, visited))),
            default: parameter.default.clone(),
        }),
        TypeNode::Component(component) => TypeNode::Component(ComponentNode {
            name: component.name.clone(),
            props: resolve_properties(&component.props, all_exports, visited),
        }),
        TypeNode::Intrinsic(_)
        | TypeNode::Literal(_)
        | TypeNode::Enum(_)
        | TypeNode::Unknown => node.clone(),
    }
}

fn resolve_all(
    types: &[TypeNode],
    all_exports: Option<&[ExportNode]>,
    visited: &mut FxHashSet<String>,
) -> Vec<TypeNode> {
    types
        .iter()
        .map(|node| resolve_externals(node, all_exports, visited))
        .collect()
}

fn resolve_properties(
    properties: &[PropertyNode],
    all_exports: Option<&[ExportNode]>,
    visited: &mut FxHashSet<String>,
) -> Vec<PropertyNode> {
    properties
        .iter()
        .map(|property| PropertyNode {
            name: property.name.clone(),
            ty: resolve_externals(&property.ty, all_exports, visited),
            optional: property.optional,
            documentation: property.documentation.clone(),
        })
        .collect()
}

fn lookup_export<'a>(name: &str, all_exports: Option<&'a [ExportNode]>) -> Option<&'a TypeNode> {
    all_exports?
        .iter()
        .find(|export| export.name == name)
        .map(|export| &export.ty)
}

/// Shapes of external types the extractor cannot see into but the docs want
/// expanded anyway.
fn known_external_shape(name: &str) -> Option<TypeNode> {
    match name {
        "Padding" => Some(TypeNode::Union(UnionNode {
            name: None,
            types: vec![
                intrinsic("number"),
                TypeNode::Object(ObjectNode {
                    name: None,
                    properties: ["top", "right", "bottom", "left"]
                        .into_iter()
                        .map(|side| PropertyNode {
                            name: side.to_string(),
                            ty: intrinsic("number"),
                            optional: true,
                            documentation: None,
                        })
                        .collect(),
                    index_signature: None,
                }),
            ],
        })),
        "VirtualElement" => Some(TypeNode::Object(ObjectNode {
            name: None,
            properties: vec![PropertyNode {
                name: "getBoundingClientRect".to_string(),
                ty: TypeNode::Function(FunctionNode {
                    name: None,
                    signatures: vec![CallSignature {
                        parameters: vec![],
                        return_type: Box::new(TypeNode::External(
                            docsmith_types::ExternalNode {
                                name: "DOMRect".to_string(),
                            },
                        )),
                    }],
                }),
                optional: false,
                documentation: None,
            }],
            index_signature: None,
        })),
        _ => None,
    }
}

fn intrinsic(name: &str) -> TypeNode {
    TypeNode::Intrinsic(IntrinsicNode {
        name: name.to_string(),
    })
}
