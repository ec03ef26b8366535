//! Helpers over mdast inline nodes and formatted fields.
//!
//! The parser reads typed mdast nodes; these helpers extract cell text,
//! re-serialize inline markdown losslessly enough for the constructs the
//! generator emits, and rebuild the derived styled trees from authoritative
//! text fields.

use docsmith_format::{compute_short_type, FormatPolicy, FormatServices};
use docsmith_types::{FormattedProperty, StyledTree};
use markdown::mdast::Node;

/// Plain-text content of inline nodes: code spans contribute their verbatim
/// value. Used for name/type/default table cells, where the inline-code
/// wrapper is presentation, not content.
pub fn plain_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        collect_plain(node, &mut out);
    }
    out
}

fn collect_plain(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&text.value),
        Node::InlineCode(code) => out.push_str(&code.value),
        Node::Html(html) => out.push_str(&html.value),
        _ => {
            if let Some(children) = node.children() {
                for child in children {
                    collect_plain(child, out);
                }
            }
        }
    }
}

/// Re-serialize inline nodes to markdown source. Covers the inline constructs
/// the generator writes into description cells and paragraphs; anything else
/// degrades to its text content.
pub fn inline_markdown(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        collect_markdown(node, &mut out);
    }
    out
}

fn collect_markdown(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&text.value),
        Node::InlineCode(code) => {
            out.push('`');
            out.push_str(&code.value);
            out.push('`');
        }
        Node::Strong(strong) => {
            out.push_str("**");
            out.push_str(&inline_markdown(&strong.children));
            out.push_str("**");
        }
        Node::Emphasis(emphasis) => {
            out.push('*');
            out.push_str(&inline_markdown(&emphasis.children));
            out.push('*');
        }
        Node::Delete(delete) => {
            out.push_str("~~");
            out.push_str(&inline_markdown(&delete.children));
            out.push_str("~~");
        }
        Node::Link(link) => {
            out.push('[');
            out.push_str(&inline_markdown(&link.children));
            out.push_str("](");
            out.push_str(&link.url);
            out.push(')');
        }
        Node::Break(_) => out.push(' '),
        Node::Html(html) => out.push_str(&html.value),
        _ => {
            if let Some(children) = node.children() {
                for child in children {
                    collect_markdown(child, out);
                }
            }
        }
    }
}

/// The text of a bold block heading (`**Accordion.Root Props:**`), without
/// the trailing colon, or `None` when the paragraph is ordinary prose.
pub fn bold_heading(paragraph: &markdown::mdast::Paragraph) -> Option<String> {
    if paragraph.children.len() != 1 {
        return None;
    }
    let Node::Strong(strong) = &paragraph.children[0] else {
        return None;
    };
    let text = plain_text(&strong.children);
    let text = text.trim();
    text.strip_suffix(':').map(str::to_string)
}

/// Escape a value for a GFM table cell. Pipes split cells even inside code
/// spans, so they must be escaped everywhere.
pub fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

/// Rebuild every derived styled-tree field of a property from its `*_text`
/// companions, mirroring exactly what the property formatter produces.
pub fn rehydrate_property(
    property: &mut FormattedProperty,
    services: &FormatServices<'_>,
    policy: &FormatPolicy,
) {
    property.type_tree = StyledTree::inline_code(property.type_text.as_str());
    property.short_type_text = compute_short_type(&property.type_text, policy);
    property.short_type = property
        .short_type_text
        .as_deref()
        .map(StyledTree::inline_code);
    property.default = property.default_text.as_deref().map(StyledTree::inline_code);
    property.description = property
        .description_text
        .as_deref()
        .map(|text| services.styler.to_styled(text));
    property.example = property
        .example_text
        .as_deref()
        .map(|text| services.highlighter.highlight(text, "tsx"));
    property.detailed_type = property
        .detailed_type_text
        .as_deref()
        .map(|text| services.highlighter.highlight(text, "ts"));
}
