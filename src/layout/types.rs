//! Layout tree types.

use crate::dom::NodeId;
use crate::style::StyleMap;

/// Solver output slot for one node.
///
/// `width`/`height` start unset; `top`/`left` start at zero. Offsets are
/// relative to the parent node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeLayout {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub top: f32,
    pub left: f32,
}

/// Intermediate node handed to the box-model solver.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    /// Constraint inputs.
    pub style: StyleMap,
    /// Participating children in document order.
    pub children: Vec<LayoutNode>,
    /// The document element this node lays out. Not owned.
    pub element: NodeId,
    pub layout: NodeLayout,
}

impl LayoutNode {
    pub fn new(element: NodeId, style: StyleMap) -> Self {
        Self {
            style,
            children: Vec::new(),
            element,
            layout: NodeLayout::default(),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(LayoutNode::len).sum::<usize>()
    }

    /// Always false: a subtree contains at least its own root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Pre-order walk over this subtree.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// First node in the subtree that lays out `element`.
    pub fn find(&self, element: NodeId) -> Option<&LayoutNode> {
        self.iter().find(|n| n.element == element)
    }
}

/// Pre-order iterator returned by [`LayoutNode::iter`].
pub struct Iter<'a> {
    stack: Vec<&'a LayoutNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a LayoutNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
