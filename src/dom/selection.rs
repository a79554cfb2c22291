//! Selections - ordered sets of root containers to lay out.

use super::{Document, NodeId};

/// An ordered, duplicate-free list of nodes.
///
/// Layout processes each node of a selection as an independent root, in the
/// order the selection holds them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    nodes: Vec<NodeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from handles, dropping repeats but keeping first-seen order.
    pub fn from_nodes(nodes: impl IntoIterator<Item = NodeId>) -> Self {
        let mut selection = Self::new();
        for node in nodes {
            selection.push(node);
        }
        selection
    }

    pub fn single(node: NodeId) -> Self {
        Self { nodes: vec![node] }
    }

    /// Every element with the given tag name, in document order.
    pub fn select_all(doc: &Document, tag_name: &str) -> Self {
        Self::from_nodes(
            doc.elements()
                .into_iter()
                .filter(|&n| doc.tag_name(n) == Some(tag_name)),
        )
    }

    /// The element whose `id` attribute matches, or an empty selection.
    pub fn select_id(doc: &Document, id: &str) -> Self {
        Self::from_nodes(doc.find_by_id(id))
    }

    pub fn push(&mut self, node: NodeId) {
        if !self.nodes.contains(&node) {
            self.nodes.push(node);
        }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl FromIterator<NodeId> for Selection {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self::from_nodes(iter)
    }
}

impl From<NodeId> for Selection {
    fn from(node: NodeId) -> Self {
        Self::single(node)
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all_in_document_order() {
        let mut doc = Document::new();
        let outer = doc.create_element("svg");
        let g = doc.create_element("g");
        let inner = doc.create_element("svg");
        doc.append_child(outer, g);
        doc.append_child(g, inner);

        let selection = Selection::select_all(&doc, "svg");
        assert_eq!(selection.nodes(), &[outer, inner]);
    }

    #[test]
    fn test_from_nodes_dedups() {
        let mut doc = Document::new();
        let a = doc.create_element("svg");
        let b = doc.create_element("svg");

        let selection = Selection::from_nodes([b, a, b]);
        assert_eq!(selection.nodes(), &[b, a]);
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_select_id() {
        let mut doc = Document::new();
        let svg = doc.create_element_with("svg", [("id", "chart")]);

        assert_eq!(Selection::select_id(&doc, "chart").nodes(), &[svg]);
        assert!(Selection::select_id(&doc, "nope").is_empty());
    }
}
