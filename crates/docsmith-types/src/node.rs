//! The extractor-facing type graph.
//!
//! The TypeScript extractor runs out of process and hands us its type graph as
//! JSON: a tagged union discriminated on `kind`. The enum below is the closed
//! Rust mirror of that union. Kinds the extractor grows later deserialize into
//! [`TypeNode::Unknown`] so a newer extractor never fails an older build.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// On-disk output of one extractor run over a module variant: the exports
/// plus the canonical name map the extractor derived for them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    pub exports: Vec<ExportNode>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub type_name_map: IndexMap<String, String>,
}

/// One node in the extracted type graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeNode {
    /// A built-in type such as `string`, `number`, or `boolean`.
    Intrinsic(IntrinsicNode),
    /// A literal type such as `"primary"`, `42`, or `true`.
    Literal(LiteralNode),
    Union(UnionNode),
    Intersection(IntersectionNode),
    Object(ObjectNode),
    Array(ArrayNode),
    Function(FunctionNode),
    Tuple(TupleNode),
    Enum(EnumNode),
    TypeParameter(TypeParameterNode),
    /// A reference to a type declared outside the analyzed module.
    External(ExternalNode),
    /// A React-style component type.
    Component(ComponentNode),
    /// Any kind this model does not know about. Renders as the `unknown` sentinel.
    #[serde(other)]
    Unknown,
}

impl TypeNode {
    /// The alias name of the node, when the kind carries one.
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeNode::Union(node) => node.name.as_deref(),
            TypeNode::Intersection(node) => node.name.as_deref(),
            TypeNode::Object(node) => node.name.as_deref(),
            TypeNode::Function(node) => node.name.as_deref(),
            TypeNode::Tuple(node) => node.name.as_deref(),
            TypeNode::Enum(node) => node.name.as_deref(),
            TypeNode::Component(node) => node.name.as_deref(),
            TypeNode::External(node) => Some(&node.name),
            TypeNode::Intrinsic(node) => Some(&node.name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntrinsicNode {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralNode {
    /// Source-level rendering of the literal, quotes included for strings.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub types: Vec<TypeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub types: Vec<TypeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: Vec<PropertyNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_signature: Option<IndexSignature>,
}

/// An `[key: K]: V` member of an object type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSignature {
    pub key_name: String,
    pub key: Box<TypeNode>,
    pub value: Box<TypeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayNode {
    pub element: Box<TypeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub signatures: Vec<CallSignature>,
}

/// One call signature of a function type. Overloaded functions carry several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSignature {
    #[serde(default)]
    pub parameters: Vec<ParameterNode>,
    pub return_type: Box<TypeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TupleNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub members: Vec<TypeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    /// Source-level rendering of the member value, quotes included for strings.
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParameterNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Box<TypeNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Box<TypeNode>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalNode {
    /// Flattened name as the type system sees it, e.g. `AccordionRootState`
    /// or `ReactElement<SomeProps>`.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub props: Vec<PropertyNode>,
}

/// A declared property of an object/component type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyNode {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeNode,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<Documentation>,
}

/// A declared parameter of a function/hook signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterNode {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeNode,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<Documentation>,
}

/// One export of an analyzed module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportNode {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<Documentation>,
}

/// Documentation comment attached to a declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Documentation {
    /// Markdown source of the description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `@default` value, rendered as source text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<DocTag>,
}

impl Documentation {
    /// Returns `true` when a tag with the given name is present.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name == name)
    }

    /// Returns the value of the first tag with the given name, if any.
    pub fn tag_value(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.name == name)
            .and_then(|tag| tag.value.as_deref())
    }
}

/// A raw documentation tag such as `@example` or `@type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocTag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    Public,
    Private,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_deserializes_to_sentinel() {
        let json = r#"{"kind": "mappedType", "weird": true}"#;
        let node: TypeNode = serde_json::from_str(json).unwrap();
        assert_eq!(node, TypeNode::Unknown);
    }

    #[test]
    fn union_round_trips_through_json() {
        let node = TypeNode::Union(UnionNode {
            name: Some("Orientation".to_string()),
            types: vec![
                TypeNode::Literal(LiteralNode {
                    value: "\"horizontal\"".to_string(),
                }),
                TypeNode::Literal(LiteralNode {
                    value: "\"vertical\"".to_string(),
                }),
            ],
        });
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"kind\":\"union\""));
        let back: TypeNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn property_optional_defaults_to_false() {
        let json = r#"{"name": "value", "type": {"kind": "intrinsic", "name": "string"}}"#;
        let prop: PropertyNode = serde_json::from_str(json).unwrap();
        assert!(!prop.optional);
        assert!(prop.documentation.is_none());
    }

    #[test]
    fn documentation_tag_lookup() {
        let docs = Documentation {
            description: Some("A trigger.".to_string()),
            tags: vec![
                DocTag {
                    name: "type".to_string(),
                    value: Some("CustomType".to_string()),
                },
                DocTag {
                    name: "ignore".to_string(),
                    value: None,
                },
            ],
            ..Documentation::default()
        };
        assert!(docs.has_tag("ignore"));
        assert_eq!(docs.tag_value("type"), Some("CustomType"));
        assert_eq!(docs.tag_value("ignore"), None);
    }
}
