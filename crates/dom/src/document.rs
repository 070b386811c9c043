//! Live document value: owns the tree, assigns node ids, and queues
//! mutation records for the observer feed.
//!
//! Invariants:
//! - Ids are unique within a document and never reused.
//! - Every structural edit emits exactly one `MutationRecord`; records are
//!   drained in emission order by `take_mutations`.
//! - `wrap_text_slice` never nests a wrapper under an existing one with the
//!   same class.

use crate::error::DomError;
use crate::mutation::{MutationRecord, NodeSummary};
use crate::range::{RangeSlice, TextRange};
use crate::traverse::find_node;
use crate::types::{Id, Node};

/// Shape of the wrapper elements inserted around text slices.
#[derive(Clone, Debug)]
pub struct WrapTemplate {
    pub name: String,
    pub class: String,
    pub style: Vec<(String, String)>,
}

impl WrapTemplate {
    pub fn styled_span(class: &str, style: Vec<(String, String)>) -> Self {
        Self {
            name: "span".to_string(),
            class: class.to_string(),
            style,
        }
    }
}

#[derive(Debug)]
pub struct Document {
    url: String,
    root: Node,
    next_id: u32,
    scroll: (f64, f64),
    selection: Option<TextRange>,
    pending: Vec<MutationRecord>,
}

impl Document {
    pub fn new(url: impl Into<String>, mut root: Node) -> Self {
        let mut next_id = 1;
        assign_ids(&mut root, &mut next_id);
        Self {
            url: url.into(),
            root,
            next_id,
            scroll: (0.0, 0.0),
            selection: None,
            pending: Vec::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn scroll(&self) -> (f64, f64) {
        self.scroll
    }

    pub fn set_scroll(&mut self, x: f64, y: f64) {
        self.scroll = (x, y);
    }

    pub fn selection(&self) -> Option<&TextRange> {
        self.selection.as_ref()
    }

    /// Set the live selection. A range whose boundary nodes are no longer
    /// part of the tree is dropped rather than kept dangling.
    pub fn select(&mut self, range: TextRange) {
        let valid = find_node(&self.root, range.start.node).is_some()
            && find_node(&self.root, range.end.node).is_some();
        self.selection = valid.then_some(range);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Drain the mutation feed accumulated since the last call.
    pub fn take_mutations(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.pending)
    }

    pub fn find(&self, id: Id) -> Option<&Node> {
        find_node(&self.root, id)
    }

    /// True when some strict ancestor of `id` carries `class`.
    pub fn has_marked_ancestor(&self, id: Id, class: &str) -> bool {
        fn walk(node: &Node, id: Id, class: &str, under: bool) -> Option<bool> {
            if node.id() == id {
                return Some(under);
            }
            let under_here = under || node.has_class(class);
            if let Some(children) = node.children() {
                for c in children {
                    if let Some(found) = walk(c, id, class, under_here) {
                        return Some(found);
                    }
                }
            }
            None
        }
        walk(&self.root, id, class, false).unwrap_or(false)
    }

    pub fn append_child(&mut self, parent: Id, mut node: Node) -> Result<Id, DomError> {
        assign_ids(&mut node, &mut self.next_id);
        let summary = NodeSummary::of(&node);
        let new_id = node.id();
        let target = find_mut(&mut self.root, parent).ok_or(DomError::NodeNotFound(parent))?;
        let children = target.children_mut().ok_or(DomError::NotAContainer(parent))?;
        children.push(node);
        log::trace!(target: "dom.edit", "append {} under {}", new_id.0, parent.0);
        self.pending
            .push(MutationRecord::child_list(parent, vec![summary], Vec::new()));
        Ok(new_id)
    }

    pub fn insert_before(&mut self, sibling: Id, mut node: Node) -> Result<Id, DomError> {
        let parent = parent_of(&self.root, sibling).ok_or(DomError::NodeNotFound(sibling))?;
        assign_ids(&mut node, &mut self.next_id);
        let summary = NodeSummary::of(&node);
        let new_id = node.id();
        let target = find_mut(&mut self.root, parent).ok_or(DomError::NodeNotFound(parent))?;
        let children = target.children_mut().ok_or(DomError::NotAContainer(parent))?;
        let ix = children
            .iter()
            .position(|c| c.id() == sibling)
            .ok_or(DomError::NodeNotFound(sibling))?;
        children.insert(ix, node);
        self.pending
            .push(MutationRecord::child_list(parent, vec![summary], Vec::new()));
        Ok(new_id)
    }

    pub fn remove_node(&mut self, id: Id) -> Result<(), DomError> {
        let parent = parent_of(&self.root, id).ok_or(DomError::NodeNotFound(id))?;
        let target = find_mut(&mut self.root, parent).ok_or(DomError::NodeNotFound(parent))?;
        let children = target.children_mut().ok_or(DomError::NotAContainer(parent))?;
        let ix = children
            .iter()
            .position(|c| c.id() == id)
            .ok_or(DomError::NodeNotFound(id))?;
        children.remove(ix);
        self.pending
            .push(MutationRecord::child_list(parent, Vec::new(), vec![id]));
        Ok(())
    }

    /// In-place text replacement. Emits a character-data record, which the
    /// rescan guard ignores (only child-list changes can re-anchor).
    pub fn set_text(&mut self, id: Id, new_text: impl Into<String>) -> Result<(), DomError> {
        let node = find_mut(&mut self.root, id).ok_or(DomError::NodeNotFound(id))?;
        match node {
            Node::Text { text, .. } => {
                *text = new_text.into();
                self.pending.push(MutationRecord::character_data(id));
                Ok(())
            }
            _ => Err(DomError::NotAText(id)),
        }
    }

    /// Decompose a range into one slice per intersected text node, in
    /// document order. First and last slices are clipped to the boundary
    /// offsets; interior slices cover their whole node.
    pub fn covered_slices(&self, range: &TextRange) -> Result<Vec<RangeSlice>, DomError> {
        let mut order = Vec::new();
        text_node_order(&self.root, &mut order);

        let start_ix = order
            .iter()
            .position(|&(id, _)| id == range.start.node)
            .ok_or(DomError::BadRange)?;
        let end_ix = order
            .iter()
            .position(|&(id, _)| id == range.end.node)
            .ok_or(DomError::BadRange)?;
        if end_ix < start_ix {
            return Err(DomError::BadRange);
        }
        if start_ix == end_ix && range.end.offset < range.start.offset {
            return Err(DomError::BadRange);
        }

        let mut slices = Vec::with_capacity(end_ix - start_ix + 1);
        for (ix, &(id, len)) in order[start_ix..=end_ix].iter().enumerate() {
            let first = ix == 0;
            let last = start_ix + ix == end_ix;
            let start = if first { range.start.offset } else { 0 };
            let end = if last { range.end.offset } else { len };
            if start > len || end > len {
                return Err(DomError::BadOffsets { start, end });
            }
            if start < end {
                slices.push(RangeSlice { node: id, start, end });
            }
        }
        Ok(slices)
    }

    /// Read back the text covered by a range, concatenated across nodes.
    pub fn range_text(&self, range: &TextRange) -> Result<String, DomError> {
        let mut out = String::new();
        for slice in self.covered_slices(range)? {
            let node = self.find(slice.node).ok_or(DomError::NodeNotFound(slice.node))?;
            let text = node.text().ok_or(DomError::NotAText(slice.node))?;
            if !text.is_char_boundary(slice.start) || !text.is_char_boundary(slice.end) {
                return Err(DomError::BadOffsets {
                    start: slice.start,
                    end: slice.end,
                });
            }
            out.push_str(&text[slice.start..slice.end]);
        }
        Ok(out)
    }

    /// Split a text node and enclose `slice` in a fresh wrapper element.
    /// Returns the wrapper's id. Refuses to nest under an existing wrapper
    /// with the template's class.
    pub fn wrap_text_slice(
        &mut self,
        template: &WrapTemplate,
        slice: RangeSlice,
    ) -> Result<Id, DomError> {
        if self.has_marked_ancestor(slice.node, &template.class) {
            return Err(DomError::AlreadyWrapped(slice.node));
        }
        let parent = parent_of(&self.root, slice.node).ok_or(DomError::NodeNotFound(slice.node))?;

        let text = {
            let node = self
                .find(slice.node)
                .ok_or(DomError::NodeNotFound(slice.node))?;
            node.text().ok_or(DomError::NotAText(slice.node))?.to_string()
        };
        if slice.start >= slice.end
            || slice.end > text.len()
            || !text.is_char_boundary(slice.start)
            || !text.is_char_boundary(slice.end)
        {
            return Err(DomError::BadOffsets {
                start: slice.start,
                end: slice.end,
            });
        }

        let mut replacement: Vec<Node> = Vec::with_capacity(3);
        if slice.start > 0 {
            replacement.push(Node::Text {
                id: Id::UNSET,
                text: text[..slice.start].to_string(),
            });
        }
        let wrapper_ix = replacement.len();
        replacement.push(Node::Element {
            id: Id::UNSET,
            name: template.name.clone(),
            attributes: vec![("class".to_string(), Some(template.class.clone()))],
            style: template.style.clone(),
            children: vec![Node::Text {
                id: Id::UNSET,
                text: text[slice.start..slice.end].to_string(),
            }],
        });
        if slice.end < text.len() {
            replacement.push(Node::Text {
                id: Id::UNSET,
                text: text[slice.end..].to_string(),
            });
        }
        for node in &mut replacement {
            assign_ids(node, &mut self.next_id);
        }
        let wrapper_id = replacement[wrapper_ix].id();
        let added: Vec<NodeSummary> = replacement.iter().map(NodeSummary::of).collect();

        let target = find_mut(&mut self.root, parent).ok_or(DomError::NodeNotFound(parent))?;
        let children = target.children_mut().ok_or(DomError::NotAContainer(parent))?;
        let ix = children
            .iter()
            .position(|c| c.id() == slice.node)
            .ok_or(DomError::NodeNotFound(slice.node))?;
        children.splice(ix..=ix, replacement).for_each(drop);

        log::trace!(
            target: "dom.edit",
            "wrapped {}..{} of node {} as {}",
            slice.start,
            slice.end,
            slice.node.0,
            wrapper_id.0
        );
        self.pending
            .push(MutationRecord::child_list(parent, added, vec![slice.node]));
        Ok(wrapper_id)
    }

    /// All wrapper elements currently in the tree, in document order.
    pub fn marked_elements(&self, class: &str) -> Vec<Id> {
        fn walk(node: &Node, class: &str, out: &mut Vec<Id>) {
            if node.has_class(class) {
                out.push(node.id());
            }
            if let Some(children) = node.children() {
                for c in children {
                    walk(c, class, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.root, class, &mut out);
        out
    }
}

pub(crate) fn assign_ids(node: &mut Node, next: &mut u32) {
    // only assign if currently unset
    if node.id() == Id::UNSET {
        let id = Id(*next);
        *next = next.wrapping_add(1);
        node.set_id(id);
    }
    if let Some(children) = node.children_mut() {
        for c in children {
            assign_ids(c, next);
        }
    }
}

fn find_mut(node: &mut Node, id: Id) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    if let Some(children) = node.children_mut() {
        for c in children {
            if let Some(found) = find_mut(c, id) {
                return Some(found);
            }
        }
    }
    None
}

fn parent_of(node: &Node, id: Id) -> Option<Id> {
    if let Some(children) = node.children() {
        for c in children {
            if c.id() == id {
                return Some(node.id());
            }
            if let Some(found) = parent_of(c, id) {
                return Some(found);
            }
        }
    }
    None
}

/// All text nodes in document order with their byte lengths, including ones
/// under non-rendering elements (ranges address literal nodes).
fn text_node_order(node: &Node, out: &mut Vec<(Id, usize)>) {
    match node {
        Node::Text { id, text } => out.push((*id, text.len())),
        Node::Document { children, .. } | Node::Element { children, .. } => {
            for c in children {
                text_node_order(c, out);
            }
        }
        Node::Comment { .. } => {}
    }
}
