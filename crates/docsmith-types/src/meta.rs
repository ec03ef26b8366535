//! Formatted documentation metadata.
//!
//! Everything in this module is a build-time artifact: recomputed on every
//! documentation build, never mutated after construction. Fields ending in
//! `_text` are authoritative for markdown serialization; their styled-tree
//! companions are derived renderings that can always be regenerated from the
//! text.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::styled::StyledTree;

/// The canonical per-field record for a prop, parameter, data attribute,
/// CSS variable, or class member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedProperty {
    /// Styled rendering of [`Self::type_text`].
    #[serde(rename = "type", default, skip_serializing_if = "StyledTree::is_empty")]
    pub type_tree: StyledTree,
    /// Canonical type string. Authoritative for round-tripping.
    pub type_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_type: Option<StyledTree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_type_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<StyledTree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_text: Option<String>,
    /// Props tables mark required entries; parameter tables mark the inverse.
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<StyledTree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<StyledTree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_text: Option<String>,
    /// Fully expanded type body. Only populated when it differs from the
    /// basic type text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_type: Option<StyledTree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_type_text: Option<String>,
}

impl FormattedProperty {
    /// Whether the field is optional (the inverse of `required`).
    pub fn optional(&self) -> bool {
        !self.required
    }
}

/// A documentable entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypesMeta {
    Component(ComponentMeta),
    Hook(HookMeta),
    Function(FunctionMeta),
    Class(ClassMeta),
    Raw(RawMeta),
}

impl TypesMeta {
    pub fn name(&self) -> &str {
        match self {
            TypesMeta::Component(meta) => &meta.name,
            TypesMeta::Hook(meta) => &meta.name,
            TypesMeta::Function(meta) => &meta.name,
            TypesMeta::Class(meta) => &meta.name,
            TypesMeta::Raw(meta) => &meta.name,
        }
    }

    pub fn slug(&self) -> Option<&str> {
        match self {
            TypesMeta::Component(meta) => meta.slug.as_deref(),
            TypesMeta::Hook(meta) => meta.slug.as_deref(),
            TypesMeta::Function(meta) => meta.slug.as_deref(),
            TypesMeta::Class(meta) => meta.slug.as_deref(),
            TypesMeta::Raw(meta) => meta.slug.as_deref(),
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, TypesMeta::Raw(_))
    }

    pub fn description_text(&self) -> Option<&str> {
        match self {
            TypesMeta::Component(meta) => meta.description_text.as_deref(),
            TypesMeta::Hook(meta) => meta.description_text.as_deref(),
            TypesMeta::Function(meta) => meta.description_text.as_deref(),
            TypesMeta::Class(meta) => meta.description_text.as_deref(),
            TypesMeta::Raw(meta) => meta.description_text.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<StyledTree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_text: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub props: IndexMap<String, FormattedProperty>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub data_attributes: IndexMap<String, FormattedProperty>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub css_variables: IndexMap<String, FormattedProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<StyledTree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_text: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, FormattedProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_value: Option<ReturnValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<StyledTree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_text: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, FormattedProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_value: Option<ReturnValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_value_description: Option<StyledTree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_value_description_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<StyledTree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_text: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub constructor_parameters: IndexMap<String, FormattedProperty>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, FormattedProperty>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub methods: IndexMap<String, FormattedProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<StyledTree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_text: Option<String>,
    /// Styled rendering of [`Self::code_text`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_code: Option<StyledTree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_members: Option<IndexMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reexport: Option<ReExport>,
}

/// Provenance of a re-exported type alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReExport {
    /// Display name of the re-exported type.
    pub target: String,
    /// Anchor of the original definition, without the leading `#`.
    pub anchor: String,
}

/// Return value of a hook or function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReturnValue {
    Simple(SimpleReturn),
    Object(ObjectReturn),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleReturn {
    #[serde(rename = "type", default, skip_serializing_if = "StyledTree::is_empty")]
    pub type_tree: StyledTree,
    pub type_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReturn {
    pub properties: IndexMap<String, FormattedProperty>,
}

/// One primary documentable type plus the cluster of aliases that belong to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Export {
    #[serde(rename = "type")]
    pub type_meta: TypesMeta,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_types: Vec<TypesMeta>,
}

/// The complete structured output of a documentation build, equal on both the
/// fresh-format path and the markdown-parse path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypesSourceData {
    pub exports: IndexMap<String, Export>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_types: Vec<TypesMeta>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub external_types: IndexMap<String, TypesMeta>,
    /// Flattened type name -> dotted display name, global across variants.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub type_name_map: IndexMap<String, String>,
    /// Variant name -> ordered list of type names the variant contributes.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variant_type_names: IndexMap<String, Vec<String>>,
    /// Variant name -> the slice of the canonical map scoped to that variant.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variant_type_name_maps: IndexMap<String, IndexMap<String, String>>,
}

/// The formatted types contributed by one rendering variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantTypes {
    pub variant: String,
    pub types: Vec<TypesMeta>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_property_defaults_are_absent() {
        let prop = FormattedProperty {
            type_text: "boolean".to_string(),
            ..FormattedProperty::default()
        };
        let json = serde_json::to_string(&prop).unwrap();
        assert_eq!(json, r#"{"typeText":"boolean","required":false}"#);
        assert!(prop.optional());
    }

    #[test]
    fn types_meta_kind_tags() {
        let meta = TypesMeta::Raw(RawMeta {
            name: "Accordion.Root.Props".to_string(),
            code_text: Some("{ children?: ReactNode }".to_string()),
            ..RawMeta::default()
        });
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"kind\":\"raw\""));
        let back: TypesMeta = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name(), "Accordion.Root.Props");
        assert!(back.is_raw());
    }

    #[test]
    fn return_value_is_kind_tagged() {
        let simple = ReturnValue::Simple(SimpleReturn {
            type_text: "boolean".to_string(),
            ..SimpleReturn::default()
        });
        let json = serde_json::to_string(&simple).unwrap();
        assert!(json.contains("\"kind\":\"simple\""));
    }
}
