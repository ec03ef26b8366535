//! Styled trees, the HAST-like rendering target.
//!
//! A styled tree is what the docs UI ultimately renders: a fragment of
//! element/text nodes produced by markdown styling or syntax highlighting.
//! Trees are always derived from an authoritative `*_text` field and are
//! recomputable from it, so they never participate in round-trip equality.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A fragment of styled nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyledTree {
    pub children: Vec<StyledNode>,
}

impl StyledTree {
    pub fn new(children: Vec<StyledNode>) -> Self {
        Self { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// A tree holding a single text node.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            children: vec![StyledNode::text(value)],
        }
    }

    /// A tree holding `<code>{value}</code>`.
    pub fn inline_code(value: impl Into<String>) -> Self {
        Self {
            children: vec![StyledNode::Element(
                StyledElement::new("code").with_child(StyledNode::text(value)),
            )],
        }
    }

    /// A tree holding `<pre><code class="language-{lang}">{code}</code></pre>`.
    pub fn code_block(code: impl Into<String>, language: &str) -> Self {
        let code_element = StyledElement::new("code")
            .with_property("className", format!("language-{language}"))
            .with_child(StyledNode::text(code));
        Self {
            children: vec![StyledNode::Element(
                StyledElement::new("pre").with_child(StyledNode::Element(code_element)),
            )],
        }
    }

    /// Concatenated text content of the whole fragment.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}

/// One node of a styled tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StyledNode {
    Element(StyledElement),
    Text(TextNode),
}

impl StyledNode {
    pub fn text(value: impl Into<String>) -> Self {
        StyledNode::Text(TextNode {
            value: value.into(),
        })
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            StyledNode::Text(text) => out.push_str(&text.value),
            StyledNode::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// An element node: tag name, string properties, children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledElement {
    pub tag_name: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<StyledNode>,
}

impl StyledElement {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            properties: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: StyledNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<StyledNode>) -> Self {
        self.children.extend(children);
        self
    }
}

/// A text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_walks_nested_elements() {
        let tree = StyledTree::new(vec![
            StyledNode::Element(
                StyledElement::new("strong").with_child(StyledNode::text("bold")),
            ),
            StyledNode::text(" tail"),
        ]);
        assert_eq!(tree.text_content(), "bold tail");
    }

    #[test]
    fn code_block_carries_language_class() {
        let tree = StyledTree::code_block("type A = string;", "ts");
        let StyledNode::Element(pre) = &tree.children[0] else {
            panic!("expected element");
        };
        assert_eq!(pre.tag_name, "pre");
        let StyledNode::Element(code) = &pre.children[0] else {
            panic!("expected code element");
        };
        assert_eq!(
            code.properties.get("className").map(String::as_str),
            Some("language-ts")
        );
        assert_eq!(tree.text_content(), "type A = string;");
    }

    #[test]
    fn serde_shape_is_hast_like() {
        let tree = StyledTree::inline_code("boolean");
        let json = serde_json::to_string(&tree).unwrap();
        assert!(json.contains("\"type\":\"element\""));
        assert!(json.contains("\"tagName\":\"code\""));
        let back: StyledTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }
}
