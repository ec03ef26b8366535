//! Markdown styling: documentation comments to styled trees.
//!
//! Descriptions and examples arrive as markdown source. The UI renders styled
//! trees, so the formatter converts through mdast here. The conversion covers
//! the node kinds documentation comments actually use; anything else falls
//! back to its text content.

use docsmith_types::{MarkdownStyler, StyledElement, StyledNode, StyledTree};
use markdown::mdast::Node;
use markdown::ParseOptions;

/// [`MarkdownStyler`] backed by the `markdown` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmarkStyler;

impl MarkdownStyler for CmarkStyler {
    fn to_styled(&self, source: &str) -> StyledTree {
        match markdown::to_mdast(source, &ParseOptions::gfm()) {
            Ok(Node::Root(root)) => StyledTree::new(nodes_to_styled(&root.children)),
            // Unparseable markdown is still worth showing as plain text.
            _ => StyledTree::text(source),
        }
    }
}

fn nodes_to_styled(nodes: &[Node]) -> Vec<StyledNode> {
    nodes.iter().filter_map(node_to_styled).collect()
}

fn node_to_styled(node: &Node) -> Option<StyledNode> {
    match node {
        Node::Paragraph(paragraph) => Some(element("p", nodes_to_styled(&paragraph.children))),
        Node::Heading(heading) => Some(element(
            &format!("h{}", heading.depth),
            nodes_to_styled(&heading.children),
        )),
        Node::Text(text) => Some(StyledNode::text(text.value.as_str())),
        Node::Strong(strong) => Some(element("strong", nodes_to_styled(&strong.children))),
        Node::Emphasis(emphasis) => Some(element("em", nodes_to_styled(&emphasis.children))),
        Node::Delete(delete) => Some(element("del", nodes_to_styled(&delete.children))),
        Node::InlineCode(code) => Some(StyledNode::Element(
            StyledElement::new("code").with_child(StyledNode::text(code.value.as_str())),
        )),
        Node::Code(code) => {
            let language = code.lang.as_deref().unwrap_or("txt");
            let tree = StyledTree::code_block(code.value.as_str(), language);
            Some(tree.children.into_iter().next().unwrap_or_else(|| {
                StyledNode::text(code.value.as_str())
            }))
        }
        Node::Link(link) => Some(StyledNode::Element(
            StyledElement::new("a")
                .with_property("href", link.url.as_str())
                .with_children(nodes_to_styled(&link.children)),
        )),
        Node::List(list) => {
            let tag = if list.ordered { "ol" } else { "ul" };
            Some(element(tag, nodes_to_styled(&list.children)))
        }
        Node::ListItem(item) => Some(element("li", nodes_to_styled(&item.children))),
        Node::Blockquote(quote) => Some(element("blockquote", nodes_to_styled(&quote.children))),
        Node::Break(_) => Some(StyledNode::Element(StyledElement::new("br"))),
        Node::Html(html) => Some(StyledNode::text(html.value.as_str())),
        // Definitions, frontmatter, and anything unexpected carry no visible
        // content of their own.
        _ => None,
    }
}

fn element(tag: &str, children: Vec<StyledNode>) -> StyledNode {
    StyledNode::Element(StyledElement::new(tag).with_children(children))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_with_inline_code() {
        let tree = CmarkStyler.to_styled("Whether the accordion is `disabled`.");
        let StyledNode::Element(p) = &tree.children[0] else {
            panic!("expected paragraph element");
        };
        assert_eq!(p.tag_name, "p");
        assert_eq!(tree.text_content(), "Whether the accordion is disabled.");
    }

    #[test]
    fn links_keep_their_href() {
        let tree = CmarkStyler.to_styled("See [the docs](https://example.com).");
        let StyledNode::Element(p) = &tree.children[0] else {
            panic!("expected paragraph element");
        };
        let link = p
            .children
            .iter()
            .find_map(|node| match node {
                StyledNode::Element(el) if el.tag_name == "a" => Some(el),
                _ => None,
            })
            .expect("link element");
        assert_eq!(
            link.properties.get("href").map(String::as_str),
            Some("https://example.com")
        );
    }

    #[test]
    fn fenced_code_becomes_pre_block() {
        let tree = CmarkStyler.to_styled("```ts\nconst a = 1;\n```");
        let StyledNode::Element(pre) = &tree.children[0] else {
            panic!("expected pre element");
        };
        assert_eq!(pre.tag_name, "pre");
        assert_eq!(tree.text_content(), "const a = 1;");
    }
}
