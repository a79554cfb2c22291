//! Document model - the host tree that layout reads from and writes to.
//!
//! Nodes live in a flat arena owned by [`Document`] and are addressed by
//! [`NodeId`] handles. Layout trees hold handles only, so the document's
//! lifetime stays with whoever created it.
//!
//! ```text
//! Index 0: <svg>   (parent=None, children=[1, 2])
//! Index 1: "\n  "  (parent=0)
//! Index 2: <rect>  (parent=0, layout-css="flex: 1")
//! ```

mod node;
mod selection;

pub use node::*;
pub use selection::*;

// =============================================================================
// Document
// =============================================================================

/// Arena-backed document tree.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of nodes ever allocated.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Node creation
    // =========================================================================

    fn allocate(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Create a detached element with no attributes.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.allocate(Node::new(NodeData::Element {
            tag_name: tag_name.to_string(),
            attrs: Vec::new(),
        }))
    }

    /// Create a detached element with the given attributes.
    ///
    /// A repeated attribute name keeps the last value.
    pub fn create_element_with<K, V>(
        &mut self,
        tag_name: &str,
        attrs: impl IntoIterator<Item = (K, V)>,
    ) -> NodeId
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let id = self.create_element(tag_name);
        for (name, value) in attrs {
            self.set_attribute(id, name.as_ref(), value.as_ref());
        }
        id
    }

    pub fn create_text(&mut self, data: &str) -> NodeId {
        self.allocate(Node::new(NodeData::Text(data.to_string())))
    }

    pub fn create_comment(&mut self, data: &str) -> NodeId {
        self.allocate(Node::new(NodeData::Comment(data.to_string())))
    }

    // =========================================================================
    // Tree mutation
    // =========================================================================

    /// Append `child` as the last child of `parent`.
    ///
    /// A child that already has a parent is moved. Appending a node under
    /// itself or under one of its own descendants does nothing.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() {
            return;
        }
        if self.ancestors(parent).any(|a| a == child) {
            return;
        }

        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        let parent_node = &mut self.nodes[parent.0];
        parent_node.children.push(child);
        parent_node.dirty |= DirtyFlags::CHILDREN;
    }

    /// Remove `node` from its parent's child list. The node stays allocated.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get(node.0).and_then(|n| n.parent) else {
            return;
        };
        let parent_node = &mut self.nodes[parent.0];
        parent_node.children.retain(|&c| c != node);
        parent_node.dirty |= DirtyFlags::CHILDREN;
        self.nodes[node.0].parent = None;
    }

    /// Set an attribute on an element.
    ///
    /// Returns `true` when the stored value changed. Writing the current value
    /// again is a no-op and does not dirty the node.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> bool {
        let Some(Node {
            data: NodeData::Element { attrs, .. },
            dirty,
            ..
        }) = self.nodes.get_mut(node.0)
        else {
            return false;
        };

        match attrs.iter_mut().find(|a| a.name == name) {
            Some(attr) if attr.value == value => return false,
            Some(attr) => attr.value = value.to_string(),
            None => attrs.push(Attr::new(name, value)),
        }
        *dirty |= DirtyFlags::ATTRIBUTES;
        true
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Option<String> {
        let Some(Node {
            data: NodeData::Element { attrs, .. },
            dirty,
            ..
        }) = self.nodes.get_mut(node.0)
        else {
            return None;
        };

        let position = attrs.iter().position(|a| a.name == name)?;
        *dirty |= DirtyFlags::ATTRIBUTES;
        Some(attrs.remove(position).value)
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn get(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node.0)
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(Node::is_element)
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.get(node).and_then(Node::tag_name)
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node).and_then(|n| n.attribute(name))
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    pub fn attributes(&self, node: NodeId) -> &[Attr] {
        self.get(node).map(Node::attrs).unwrap_or(&[])
    }

    /// Text payload of a text or comment node.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.get(node)?.data {
            NodeData::Text(data) | NodeData::Comment(data) => Some(data),
            NodeData::Element { .. } => None,
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(Node::parent)
    }

    /// Child handles in document order (empty for unknown handles).
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(Node::children).unwrap_or(&[])
    }

    /// Walk from the parent of `node` up to the top of its tree.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(node), move |&n| self.parent(n))
    }

    /// The first top-level element, i.e. the outermost `<svg>` of a parsed file.
    pub fn root(&self) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.parent.is_none() && n.is_element())
            .map(NodeId)
    }

    /// All descendants of `node` in pre-order (document order), excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Every element of every top-level tree, in document order.
    pub fn elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        for (index, node) in self.nodes.iter().enumerate() {
            if node.parent.is_some() {
                continue;
            }
            let top = NodeId(index);
            out.push(top);
            out.extend(self.descendants(top));
        }
        out.retain(|&n| self.is_element(n));
        out
    }

    /// Find the element whose `id` attribute equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements()
            .into_iter()
            .find(|&n| self.attribute(n, "id") == Some(id))
    }

    // =========================================================================
    // Dirty tracking
    // =========================================================================

    pub fn dirty(&self, node: NodeId) -> DirtyFlags {
        self.get(node).map(Node::dirty).unwrap_or_default()
    }

    /// Collect every dirty node (in arena order) and mark it clean.
    pub fn take_dirty(&mut self) -> Vec<NodeId> {
        let mut out = Vec::new();
        for (index, node) in self.nodes.iter_mut().enumerate() {
            if !node.dirty.is_empty() {
                out.push(NodeId(index));
                node.dirty = DirtyFlags::empty();
            }
        }
        out
    }
}
