//! Layout Tree Builder - document subtree → [`LayoutNode`] tree.
//!
//! Which elements take part is decided by a [`ParticipantPolicy`]. The
//! default policy admits elements that carry the style attribute and hides
//! everything below an element that does not.

use crate::dom::{Document, NodeId};
use crate::error::StyleDiagnostic;
use crate::style::extract_style;

use super::types::LayoutNode;

// =============================================================================
// Participation policy
// =============================================================================

/// Decides which elements become layout nodes.
pub trait ParticipantPolicy {
    /// Whether `node` gets its own layout node.
    fn is_layout_participant(&self, doc: &Document, node: NodeId) -> bool;

    /// For a non-participant, whether its participating descendants are
    /// spliced into the parent's child list instead of being dropped.
    fn looks_through(&self, _doc: &Document, _node: NodeId) -> bool {
        false
    }
}

/// Elements carrying the style attribute participate; unstyled elements hide
/// their whole subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleAttributePolicy {
    attribute: String,
}

impl StyleAttributePolicy {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
        }
    }
}

impl Default for StyleAttributePolicy {
    fn default() -> Self {
        Self::new("layout-css")
    }
}

impl ParticipantPolicy for StyleAttributePolicy {
    fn is_layout_participant(&self, doc: &Document, node: NodeId) -> bool {
        doc.has_attribute(node, &self.attribute)
    }
}

/// Like [`StyleAttributePolicy`], but unstyled wrappers are transparent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LookThroughPolicy {
    inner: StyleAttributePolicy,
}

impl LookThroughPolicy {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            inner: StyleAttributePolicy::new(attribute),
        }
    }
}

impl ParticipantPolicy for LookThroughPolicy {
    fn is_layout_participant(&self, doc: &Document, node: NodeId) -> bool {
        self.inner.is_layout_participant(doc, node)
    }

    fn looks_through(&self, _doc: &Document, _node: NodeId) -> bool {
        true
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Result of [`TreeBuilder::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltTree {
    pub root: LayoutNode,
    /// Skipped declarations, tagged with the element they came from.
    pub diagnostics: Vec<(NodeId, StyleDiagnostic)>,
}

/// Walks a document subtree and extracts styles into layout nodes.
pub struct TreeBuilder<'a> {
    doc: &'a Document,
    policy: &'a dyn ParticipantPolicy,
    attribute: &'a str,
    diagnostics: Vec<(NodeId, StyleDiagnostic)>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(doc: &'a Document, policy: &'a dyn ParticipantPolicy, attribute: &'a str) -> Self {
        Self {
            doc,
            policy,
            attribute,
            diagnostics: Vec::new(),
        }
    }

    /// Build the tree rooted at `root`. The root is always included, whatever
    /// the policy says about it.
    pub fn build(mut self, root: NodeId) -> BuiltTree {
        let root = self.node(root);
        BuiltTree {
            root,
            diagnostics: self.diagnostics,
        }
    }

    fn node(&mut self, element: NodeId) -> LayoutNode {
        let parsed = extract_style(self.doc, element, self.attribute);
        self.diagnostics
            .extend(parsed.skipped.into_iter().map(|d| (element, d)));

        let mut node = LayoutNode::new(element, parsed.map);
        self.collect_children(element, &mut node.children);
        node
    }

    fn collect_children(&mut self, parent: NodeId, out: &mut Vec<LayoutNode>) {
        let doc = self.doc;
        for &child in doc.children(parent) {
            if !doc.is_element(child) {
                continue;
            }
            if self.policy.is_layout_participant(doc, child) {
                out.push(self.node(child));
            } else if self.policy.looks_through(doc, child) {
                self.collect_children(child, out);
            }
        }
    }
}

/// Build a layout tree with the default policy.
pub fn build_tree(doc: &Document, root: NodeId, attribute: &str) -> BuiltTree {
    let policy = StyleAttributePolicy::new(attribute);
    TreeBuilder::new(doc, &policy, attribute).build(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::NodeLayout;
    use crate::style::StyleValue;

    const CSS: &str = "layout-css";

    /// svg > [rect(styled), g(unstyled) > rect(styled), g(styled)]
    fn fixture() -> (Document, NodeId, Vec<NodeId>) {
        let mut doc = Document::new();
        let svg = doc.create_element_with("svg", [(CSS, "width: 999; height: 999")]);
        let first = doc.create_element_with("rect", [(CSS, "height: 10")]);
        let wrapper = doc.create_element("g");
        let hidden = doc.create_element_with("rect", [(CSS, "flex: 1")]);
        let last = doc.create_element_with("g", [(CSS, "flex: 2")]);
        let text = doc.create_text("\n");
        let comment = doc.create_comment("axis");

        doc.append_child(svg, text);
        doc.append_child(svg, first);
        doc.append_child(svg, wrapper);
        doc.append_child(wrapper, hidden);
        doc.append_child(svg, comment);
        doc.append_child(svg, last);

        (doc, svg, vec![first, wrapper, hidden, last])
    }

    #[test]
    fn test_unstyled_wrapper_hides_descendants() {
        let (doc, svg, nodes) = fixture();

        let built = build_tree(&doc, svg, CSS);

        assert_eq!(built.root.element, svg);
        assert_eq!(built.root.children.len(), 2);
        assert_eq!(built.root.children[0].element, nodes[0]);
        assert_eq!(built.root.children[1].element, nodes[3]);
        assert!(built.root.find(nodes[2]).is_none());
    }

    #[test]
    fn test_look_through_policy_splices_descendants() {
        let (doc, svg, nodes) = fixture();
        let policy = LookThroughPolicy::new(CSS);

        let built = TreeBuilder::new(&doc, &policy, CSS).build(svg);

        let children: Vec<NodeId> = built.root.children.iter().map(|c| c.element).collect();
        assert_eq!(children, vec![nodes[0], nodes[2], nodes[3]]);
    }

    #[test]
    fn test_styles_and_initial_layout() {
        let (doc, svg, _) = fixture();

        let built = build_tree(&doc, svg, CSS);

        assert_eq!(
            built.root.children[1].style.get("flex"),
            Some(&StyleValue::Number(2.0))
        );
        for node in built.root.iter() {
            assert_eq!(node.layout, NodeLayout {
                width: None,
                height: None,
                top: 0.0,
                left: 0.0,
            });
        }
        assert_eq!(built.root.len(), 3);
    }

    #[test]
    fn test_unstyled_root_is_still_built() {
        let mut doc = Document::new();
        let svg = doc.create_element("svg");
        let child = doc.create_element_with("rect", [(CSS, "flex: 1")]);
        doc.append_child(svg, child);

        let built = build_tree(&doc, svg, CSS);

        assert!(built.root.style.is_empty());
        assert_eq!(built.root.children.len(), 1);
    }

    #[test]
    fn test_diagnostics_are_tagged_with_element() {
        let mut doc = Document::new();
        let svg = doc.create_element("svg");
        let bad = doc.create_element_with("g", [(CSS, "flex:1;a:b:c")]);
        doc.append_child(svg, bad);

        let built = build_tree(&doc, svg, CSS);

        assert_eq!(built.diagnostics.len(), 1);
        assert_eq!(built.diagnostics[0].0, bad);
    }
}
