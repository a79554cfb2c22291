//! Geometry Applier - writes solved layout back onto document elements.
//!
//! Box-kind elements (`<svg>`, `<rect>` by default) receive `width`,
//! `height`, `x` and `y`. Everything else is a group and receives
//! `transform="translate(left, top)"`. Every node also gets the auxiliary
//! `layout-width` / `layout-height` attributes.

use tracing::{trace, warn};

use crate::config::{LayoutConfig, UnresolvedSize};
use crate::dom::{Document, NodeId};
use crate::error::{ApplyDiagnostic, Axis};

use super::types::LayoutNode;

/// How a node's geometry is expressed on its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Native `width`/`height`/`x`/`y` attributes.
    Box,
    /// Translation transform only.
    Group,
}

impl NodeKind {
    pub fn of(doc: &Document, node: NodeId, config: &LayoutConfig) -> Self {
        match doc.tag_name(node) {
            Some(tag) if config.is_box_tag(tag) => NodeKind::Box,
            _ => NodeKind::Group,
        }
    }
}

/// Format a pixel value in shortest round-trip form (`100`, `12.5`).
pub fn format_number(value: f32) -> String {
    if value == 0.0 {
        // Also folds -0.
        return "0".to_string();
    }
    value.to_string()
}

/// Write the solved geometry of `root` and its descendants, parents first.
///
/// Returns one diagnostic per width/height the solver left unset.
pub fn apply_layout(
    doc: &mut Document,
    root: &LayoutNode,
    config: &LayoutConfig,
) -> Vec<ApplyDiagnostic> {
    let mut applier = Applier {
        doc,
        config,
        diagnostics: Vec::new(),
    };
    applier.apply(root);
    applier.diagnostics
}

struct Applier<'a> {
    doc: &'a mut Document,
    config: &'a LayoutConfig,
    diagnostics: Vec<ApplyDiagnostic>,
}

impl Applier<'_> {
    fn apply(&mut self, node: &LayoutNode) {
        let element = node.element;
        let layout = node.layout;
        let kind = NodeKind::of(self.doc, element, self.config);

        let width = self.resolve(element, Axis::Width, layout.width);
        let height = self.resolve(element, Axis::Height, layout.height);

        match kind {
            NodeKind::Box => {
                self.write(element, "width", width);
                self.write(element, "height", height);
                self.write(element, "x", Some(layout.left));
                self.write(element, "y", Some(layout.top));
            }
            NodeKind::Group => {
                let transform = format!(
                    "translate({}, {})",
                    format_number(layout.left),
                    format_number(layout.top)
                );
                self.doc.set_attribute(element, "transform", &transform);
            }
        }

        let config = self.config;
        self.write(element, &config.width_attribute, width);
        self.write(element, &config.height_attribute, height);

        trace!(
            node = %element,
            ?kind,
            left = layout.left,
            top = layout.top,
            width = ?layout.width,
            height = ?layout.height,
            "applied layout"
        );

        for child in &node.children {
            self.apply(child);
        }
    }

    /// Settle an unset or non-finite size according to the configured policy.
    fn resolve(&mut self, node: NodeId, axis: Axis, value: Option<f32>) -> Option<f32> {
        match value {
            Some(v) if v.is_finite() => Some(v),
            _ => {
                warn!(%node, %axis, policy = ?self.config.unresolved_size, "solver left size unresolved");
                self.diagnostics
                    .push(ApplyDiagnostic::UnresolvedSize { node, axis });
                match self.config.unresolved_size {
                    UnresolvedSize::Zero => Some(0.0),
                    UnresolvedSize::Skip => None,
                }
            }
        }
    }

    fn write(&mut self, node: NodeId, name: &str, value: Option<f32>) {
        if let Some(value) = value {
            self.doc.set_attribute(node, name, &format_number(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::NodeLayout;
    use crate::style::StyleMap;

    fn solved(element: NodeId, width: f32, height: f32, left: f32, top: f32) -> LayoutNode {
        let mut node = LayoutNode::new(element, StyleMap::new());
        node.layout = NodeLayout {
            width: Some(width),
            height: Some(height),
            top,
            left,
        };
        node
    }

    #[test]
    fn test_box_and_group_attributes() {
        let mut doc = Document::new();
        let svg = doc.create_element("svg");
        let g = doc.create_element("g");
        let rect = doc.create_element("rect");
        doc.append_child(svg, g);
        doc.append_child(g, rect);

        let mut root = solved(svg, 300.0, 200.0, 0.0, 0.0);
        let mut group = solved(g, 280.0, 150.5, 10.0, 20.0);
        group.children.push(solved(rect, 40.0, 12.5, 5.0, 6.0));
        root.children.push(group);

        let diagnostics = apply_layout(&mut doc, &root, &LayoutConfig::default());
        assert!(diagnostics.is_empty());

        assert_eq!(doc.attribute(svg, "width"), Some("300"));
        assert_eq!(doc.attribute(svg, "height"), Some("200"));
        assert_eq!(doc.attribute(svg, "x"), Some("0"));
        assert_eq!(doc.attribute(svg, "y"), Some("0"));

        assert_eq!(doc.attribute(g, "transform"), Some("translate(10, 20)"));
        assert_eq!(doc.attribute(g, "width"), None);
        assert_eq!(doc.attribute(g, "height"), None);
        assert_eq!(doc.attribute(g, "layout-width"), Some("280"));
        assert_eq!(doc.attribute(g, "layout-height"), Some("150.5"));

        assert_eq!(doc.attribute(rect, "x"), Some("5"));
        assert_eq!(doc.attribute(rect, "y"), Some("6"));
        assert_eq!(doc.attribute(rect, "height"), Some("12.5"));
        assert_eq!(doc.attribute(rect, "layout-height"), Some("12.5"));
    }

    #[test]
    fn test_unresolved_size_written_as_zero() {
        let mut doc = Document::new();
        let rect = doc.create_element("rect");
        let root = LayoutNode::new(rect, StyleMap::new());

        let diagnostics = apply_layout(&mut doc, &root, &LayoutConfig::default());

        assert_eq!(diagnostics, vec![
            ApplyDiagnostic::UnresolvedSize { node: rect, axis: Axis::Width },
            ApplyDiagnostic::UnresolvedSize { node: rect, axis: Axis::Height },
        ]);
        assert_eq!(doc.attribute(rect, "width"), Some("0"));
        assert_eq!(doc.attribute(rect, "layout-height"), Some("0"));
        assert_eq!(doc.attribute(rect, "x"), Some("0"));
    }

    #[test]
    fn test_unresolved_size_skipped() {
        let mut doc = Document::new();
        let rect = doc.create_element_with("rect", [("width", "7")]);
        let root = LayoutNode::new(rect, StyleMap::new());
        let config = LayoutConfig::default().with_unresolved_size(UnresolvedSize::Skip);

        let diagnostics = apply_layout(&mut doc, &root, &config);

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(doc.attribute(rect, "width"), Some("7"));
        assert_eq!(doc.attribute(rect, "layout-width"), None);
        assert_eq!(doc.attribute(rect, "y"), Some("0"));
    }

    #[test]
    fn test_custom_box_tag() {
        let mut doc = Document::new();
        let image = doc.create_element("image");
        let root = solved(image, 10.0, 10.0, 1.0, 2.0);
        let config = LayoutConfig::default().with_box_tag("image");

        apply_layout(&mut doc, &root, &config);

        assert_eq!(doc.attribute(image, "x"), Some("1"));
        assert_eq!(doc.attribute(image, "transform"), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-3.25), "-3.25");
    }
}
