use crate::types::{Id, Node};

pub fn find_node(node: &Node, id: Id) -> Option<&Node> {
    if node.id() == id {
        return Some(node);
    }
    match node {
        Node::Document { children, .. } | Node::Element { children, .. } => {
            for c in children {
                if let Some(found) = find_node(c, id) {
                    return Some(found);
                }
            }
        }
        _ => {}
    }
    None
}

pub fn is_non_rendering_element(node: &Node) -> bool {
    match node {
        Node::Element { name, .. } => {
            name.eq_ignore_ascii_case("head")
                || name.eq_ignore_ascii_case("style")
                || name.eq_ignore_ascii_case("script")
                || name.eq_ignore_ascii_case("title")
                || name.eq_ignore_ascii_case("meta")
                || name.eq_ignore_ascii_case("link")
        }
        _ => false,
    }
}

/// A rendered text node in document order.
#[derive(Clone, Copy, Debug)]
pub struct TextNodeView<'a> {
    pub id: Id,
    pub text: &'a str,
    /// True when some ancestor element carries the marker class.
    pub marked: bool,
}

/// Collect rendered text nodes in document order, skipping non-rendering
/// subtrees. Text under a marker element is still listed, flagged `marked`.
pub fn collect_text_nodes<'a>(node: &'a Node, marker: &str, out: &mut Vec<TextNodeView<'a>>) {
    fn walk<'a>(node: &'a Node, marker: &str, under_marker: bool, out: &mut Vec<TextNodeView<'a>>) {
        match node {
            Node::Text { id, text } => {
                out.push(TextNodeView {
                    id: *id,
                    text,
                    marked: under_marker,
                });
            }
            Node::Element { children, .. } => {
                if is_non_rendering_element(node) {
                    return;
                }
                let under = under_marker || node.has_class(marker);
                for c in children {
                    walk(c, marker, under, out);
                }
            }
            Node::Document { children, .. } => {
                for c in children {
                    walk(c, marker, under_marker, out);
                }
            }
            Node::Comment { .. } => {}
        }
    }

    walk(node, marker, false, out);
}
