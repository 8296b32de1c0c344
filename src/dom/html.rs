//! Serialize fragments to HTML or plain text.
//!
//! Text and attribute values are escaped, so server-provided strings can never inject
//! markup into the page.

use super::node::{Element, Node};

const BLOCK_TAGS: &[&str] = &["div", "h4", "p"];

/// Serialize a sequence of sibling nodes.
pub fn to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, &mut out);
    }
    out
}

/// Readable text: block elements start their own line, adjacent inline elements are
/// separated by a space and blank lines are dropped.
pub fn to_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_text(node, &mut out);
    }
    out.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) => {
            let block = BLOCK_TAGS.contains(&element.tag.as_str());
            if block {
                out.push('\n');
            } else if !out.is_empty() && !out.ends_with(char::is_whitespace) {
                out.push(' ');
            }
            for child in &element.children {
                write_text(child, out);
            }
            if block {
                out.push('\n');
            }
        }
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => push_escaped(text, out, false),
        Node::Element(element) => write_element(element, out),
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);
    if let Some(id) = &element.id {
        push_attr("id", id, out);
    }
    if !element.classes.is_empty() {
        push_attr("class", &element.classes.join(" "), out);
    }
    for (name, value) in &element.attrs {
        push_attr(name, value, out);
    }
    out.push('>');
    for child in &element.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

fn push_attr(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    push_escaped(value, out, true);
    out.push('"');
}

fn push_escaped(text: &str, out: &mut String, attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
