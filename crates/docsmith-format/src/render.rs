//! The type renderer: canonical string rendering of extracted type graphs.
//!
//! Rendering is total: every node kind produces a string, unknown kinds
//! produce the `unknown` sentinel, and nothing in this module can fail or
//! panic. Documentation generation must never fall over a single odd type.

use docsmith_types::{
    CallSignature, EnumNode, FunctionNode, IndexSignature, IntersectionNode, ObjectNode,
    TupleNode, TypeNode, UnionNode,
};
use indexmap::IndexMap;

use crate::names::resolve_qualified_name;
use crate::policy::FormatPolicy;

/// Sentinel rendering for kinds the renderer does not understand.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Everything the renderer needs to know about its surroundings.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Strip `undefined` members from top-level unions (used for optional
    /// fields, where `undefined` is implied by optionality).
    pub remove_undefined: bool,
    /// Render named object/function types as their full body instead of the
    /// qualified name.
    pub expand_objects: bool,
    /// Primary export names of the current documentation page.
    pub export_names: &'a [String],
    /// Flattened name -> dotted display name.
    pub type_name_map: &'a IndexMap<String, String>,
    /// Name of the alias currently being rendered; guards `type Foo = Foo`
    /// self-reference loops.
    pub self_name: Option<&'a str>,
    pub policy: &'a FormatPolicy,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        export_names: &'a [String],
        type_name_map: &'a IndexMap<String, String>,
        policy: &'a FormatPolicy,
    ) -> Self {
        Self {
            remove_undefined: false,
            expand_objects: false,
            export_names,
            type_name_map,
            self_name: None,
            policy,
        }
    }

    pub fn with_remove_undefined(mut self, remove_undefined: bool) -> Self {
        self.remove_undefined = remove_undefined;
        self
    }

    pub fn with_expand_objects(mut self, expand_objects: bool) -> Self {
        self.expand_objects = expand_objects;
        self
    }

    pub fn with_self_name(mut self, self_name: Option<&'a str>) -> Self {
        self.self_name = self_name;
        self
    }

    /// Context for rendering members of a composite: `remove_undefined` only
    /// applies to the top-level union, expansion carries through.
    fn member(&self) -> Self {
        Self {
            remove_undefined: false,
            ..*self
        }
    }

    fn resolve(&self, flat: &str) -> String {
        resolve_qualified_name(flat, self.export_names, self.type_name_map, self.policy)
    }

    fn is_self(&self, name: &str) -> bool {
        self.self_name == Some(name)
    }
}

/// Render a type node to its canonical string form.
pub fn render_type(node: &TypeNode, ctx: &RenderContext<'_>) -> String {
    match node {
        TypeNode::Intrinsic(intrinsic) => ctx.resolve(&intrinsic.name),
        TypeNode::Literal(literal) => literal.value.clone(),
        TypeNode::Union(union) => render_union(union, ctx),
        TypeNode::Intersection(intersection) => render_intersection(intersection, ctx),
        TypeNode::Object(object) => render_object(object, ctx),
        TypeNode::Array(array) => render_array_element(&array.element, ctx),
        TypeNode::Function(function) => render_function(function, ctx),
        TypeNode::Tuple(tuple) => render_tuple(tuple, ctx),
        TypeNode::Enum(enumeration) => render_enum(enumeration, ctx),
        TypeNode::TypeParameter(parameter) => match &parameter.constraint {
            Some(constraint) => render_type(constraint, &ctx.member()),
            None => parameter.name.clone(),
        },
        TypeNode::External(external) => ctx.resolve(&external.name),
        TypeNode::Component(component) => component
            .name
            .as_deref()
            .map(|name| ctx.resolve(name))
            .unwrap_or_else(|| "Component".to_string()),
        TypeNode::Unknown => UNKNOWN_TYPE.to_string(),
    }
}

fn render_union(union: &UnionNode, ctx: &RenderContext<'_>) -> String {
    // A named alias short-circuits re-expansion, except when the alias is the
    // type currently being rendered (`type Foo = Foo | Bar`).
    if let Some(name) = &union.name {
        if !ctx.is_self(name) {
            return ctx.resolve(name);
        }
    }

    let mut members = Vec::new();
    flatten_union_members(&union.types, &mut members);

    let member_ctx = ctx.member();
    let mut rendered: Vec<String> = Vec::new();
    for member in members {
        if ctx.remove_undefined && is_undefined(member) {
            continue;
        }
        let text = render_type(member, &member_ctx);
        if !rendered.contains(&text) {
            rendered.push(text);
        }
    }
    if rendered.is_empty() {
        return "undefined".to_string();
    }
    order_specials_last(&mut rendered);
    rendered.join(" | ")
}

/// Collect union members, inlining anonymous nested unions and anonymous
/// union-typed constraints of type parameters.
fn flatten_union_members<'a>(types: &'a [TypeNode], out: &mut Vec<&'a TypeNode>) {
    for node in types {
        match node {
            TypeNode::Union(nested) if nested.name.is_none() => {
                flatten_union_members(&nested.types, out);
            }
            TypeNode::TypeParameter(parameter) => match parameter.constraint.as_deref() {
                Some(TypeNode::Union(constraint)) if constraint.name.is_none() => {
                    flatten_union_members(&constraint.types, out);
                }
                _ => out.push(node),
            },
            _ => out.push(node),
        }
    }
}

fn is_undefined(node: &TypeNode) -> bool {
    match node {
        TypeNode::Intrinsic(intrinsic) => intrinsic.name == "undefined",
        TypeNode::Literal(literal) => literal.value == "undefined",
        _ => false,
    }
}

/// `any`, `null`, and `undefined` read better at the end of a union; keep
/// them there in that relative order no matter where the source put them.
fn order_specials_last(rendered: &mut Vec<String>) {
    const SPECIALS: [&str; 3] = ["any", "null", "undefined"];
    let mut head = Vec::with_capacity(rendered.len());
    let mut tail: Vec<String> = Vec::new();
    for text in rendered.drain(..) {
        if SPECIALS.contains(&text.as_str()) {
            tail.push(text);
        } else {
            head.push(text);
        }
    }
    tail.sort_by_key(|text| {
        SPECIALS
            .iter()
            .position(|s| *s == text.as_str())
            .unwrap_or(SPECIALS.len())
    });
    head.extend(tail);
    *rendered = head;
}

fn render_intersection(intersection: &IntersectionNode, ctx: &RenderContext<'_>) -> String {
    if let Some(name) = &intersection.name {
        if !ctx.is_self(name) {
            return ctx.resolve(name);
        }
    }
    let member_ctx = ctx.member();
    let mut rendered: Vec<String> = Vec::new();
    for member in &intersection.types {
        let text = render_type(member, &member_ctx);
        if !rendered.contains(&text) {
            rendered.push(text);
        }
    }
    rendered.join(" & ")
}

fn render_object(object: &ObjectNode, ctx: &RenderContext<'_>) -> String {
    if let Some(name) = &object.name {
        if !ctx.expand_objects && !ctx.is_self(name) {
            return ctx.resolve(name);
        }
    }
    render_object_body(object, ctx)
}

fn render_object_body(object: &ObjectNode, ctx: &RenderContext<'_>) -> String {
    if object.properties.is_empty() && object.index_signature.is_none() {
        return "{}".to_string();
    }
    let member_ctx = ctx.member();
    let mut parts: Vec<String> = object
        .properties
        .iter()
        .map(|property| {
            let marker = if property.optional { "?" } else { "" };
            format!(
                "{}{}: {}",
                property.name,
                marker,
                render_type(&property.ty, &member_ctx)
            )
        })
        .collect();
    if let Some(index) = &object.index_signature {
        parts.push(render_index_signature(index, &member_ctx));
    }
    format!("{{ {} }}", parts.join("; "))
}

fn render_index_signature(index: &IndexSignature, ctx: &RenderContext<'_>) -> String {
    format!(
        "[{}: {}]: {}",
        index.key_name,
        render_type(&index.key, ctx),
        render_type(&index.value, ctx)
    )
}

fn render_array_element(element: &TypeNode, ctx: &RenderContext<'_>) -> String {
    let rendered = render_type(element, &ctx.member());
    if rendered.contains(char::is_whitespace) {
        format!("({rendered})[]")
    } else {
        format!("{rendered}[]")
    }
}

fn render_function(function: &FunctionNode, ctx: &RenderContext<'_>) -> String {
    if let Some(name) = &function.name {
        if !ctx.expand_objects && !ctx.is_self(name) {
            return ctx.resolve(name);
        }
    }
    match function.signatures.len() {
        0 => "() => void".to_string(),
        1 => render_signature(&function.signatures[0], ctx),
        _ => function
            .signatures
            .iter()
            .map(|signature| format!("({})", render_signature(signature, ctx)))
            .collect::<Vec<_>>()
            .join(" | "),
    }
}

fn render_signature(signature: &CallSignature, ctx: &RenderContext<'_>) -> String {
    let member_ctx = ctx.member();
    let parameters: Vec<String> = signature
        .parameters
        .iter()
        .enumerate()
        .map(|(index, parameter)| {
            if parameter.optional {
                // `?:` is only legal when every later parameter is optional
                // too; otherwise keep `| undefined` in the type.
                let rest_optional = signature.parameters[index..]
                    .iter()
                    .all(|later| later.optional);
                let text =
                    render_type(&parameter.ty, &member_ctx.with_remove_undefined(true));
                if rest_optional {
                    format!("{}?: {}", parameter.name, text)
                } else {
                    format!("{}: {}", parameter.name, with_undefined(text))
                }
            } else {
                format!(
                    "{}: {}",
                    parameter.name,
                    render_type(&parameter.ty, &member_ctx)
                )
            }
        })
        .collect();
    format!(
        "({}) => {}",
        parameters.join(", "),
        render_type(&signature.return_type, &member_ctx)
    )
}

fn with_undefined(text: String) -> String {
    if text.starts_with('(') && text.contains("=>") {
        format!("({text}) | undefined")
    } else {
        format!("{text} | undefined")
    }
}

fn render_tuple(tuple: &TupleNode, ctx: &RenderContext<'_>) -> String {
    if let Some(name) = &tuple.name {
        if !ctx.is_self(name) {
            return ctx.resolve(name);
        }
    }
    let member_ctx = ctx.member();
    let members: Vec<String> = tuple
        .members
        .iter()
        .map(|member| render_type(member, &member_ctx))
        .collect();
    format!("[{}]", members.join(", "))
}

fn render_enum(enumeration: &EnumNode, ctx: &RenderContext<'_>) -> String {
    if let Some(name) = &enumeration.name {
        if !ctx.is_self(name) {
            return ctx.resolve(name);
        }
    }
    if enumeration.members.is_empty() {
        return UNKNOWN_TYPE.to_string();
    }
    enumeration
        .members
        .iter()
        .map(|member| member.value.clone())
        .collect::<Vec<_>>()
        .join(" | ")
}
