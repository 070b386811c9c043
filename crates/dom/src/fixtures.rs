//! Tree construction helpers for tests and embedding examples.

use crate::document::Document;
use crate::types::{Id, Node};

pub fn doc(url: &str, children: Vec<Node>) -> Document {
    Document::new(
        url,
        Node::Document {
            id: Id::UNSET,
            children,
        },
    )
}

pub fn el(name: &str, children: Vec<Node>) -> Node {
    Node::Element {
        id: Id::UNSET,
        name: name.to_string(),
        attributes: Vec::new(),
        style: Vec::new(),
        children,
    }
}

pub fn el_class(name: &str, class: &str, children: Vec<Node>) -> Node {
    Node::Element {
        id: Id::UNSET,
        name: name.to_string(),
        attributes: vec![("class".to_string(), Some(class.to_string()))],
        style: Vec::new(),
        children,
    }
}

pub fn text(t: &str) -> Node {
    Node::Text {
        id: Id::UNSET,
        text: t.to_string(),
    }
}

pub fn comment(t: &str) -> Node {
    Node::Comment {
        id: Id::UNSET,
        text: t.to_string(),
    }
}

/// First text node in document order whose content equals `needle`.
pub fn text_node_id(doc: &Document, needle: &str) -> Option<Id> {
    fn walk(node: &Node, needle: &str) -> Option<Id> {
        if let Node::Text { id, text } = node {
            if text == needle {
                return Some(*id);
            }
        }
        for c in node.children().unwrap_or_default() {
            if let Some(found) = walk(c, needle) {
                return Some(found);
            }
        }
        None
    }
    walk(doc.root(), needle)
}
