//! Layout Pipeline
//!
//! Drives one layout pass per root container:
//!
//! ```text
//! measure root → build LayoutNode tree → force root size → solve → apply
//! ```
//!
//! Roots are processed one after another in selection order. Each gets a
//! fresh layout tree that is dropped once its geometry has been written, so
//! nothing carries over between roots or between calls.

mod report;

pub use report::{LayoutReport, RootReport};

use tracing::{debug, debug_span, warn};

use crate::config::LayoutConfig;
use crate::dom::{Document, NodeId, Selection};
use crate::error::LayoutError;
use crate::layout::{
    apply_layout, AttributeHost, BoxModelSolver, ParticipantPolicy, StyleAttributePolicy,
    StyleHost, TaffySolver, TreeBuilder,
};
use crate::style::StyleValue;

/// How the root container's size is determined.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Sizing {
    /// Measure the container's computed box and use its content size.
    #[default]
    Measure,
    /// Use exactly this size. The style host is never consulted.
    Fixed { width: f32, height: f32 },
}

/// The layout driver.
///
/// Owns the configuration and the three injectable collaborators: the
/// box-model solver, the participation policy and the measurement host.
pub struct FlexLayout {
    config: LayoutConfig,
    solver: Box<dyn BoxModelSolver>,
    policy: Box<dyn ParticipantPolicy>,
    host: Box<dyn StyleHost>,
}

impl Default for FlexLayout {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl FlexLayout {
    /// Driver with the Taffy solver, the style-attribute policy and the
    /// attribute-based measurement host.
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            solver: Box::new(TaffySolver::from_config(&config)),
            policy: Box::new(StyleAttributePolicy::new(config.style_attribute.clone())),
            host: Box::new(AttributeHost),
            config,
        }
    }

    pub fn with_solver(mut self, solver: impl BoxModelSolver + 'static) -> Self {
        self.solver = Box::new(solver);
        self
    }

    pub fn with_policy(mut self, policy: impl ParticipantPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn with_host(mut self, host: impl StyleHost + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out every root of `selection` and write the geometry into `doc`.
    pub fn layout(&mut self, doc: &mut Document, selection: &Selection, sizing: Sizing) -> LayoutReport {
        let mut report = LayoutReport::default();

        for root in selection {
            let span = debug_span!("layout_root", root = %root);
            let _enter = span.enter();

            let mut outcome = RootReport::new(root);
            if let Err(error) = self.layout_root(doc, root, sizing, &mut outcome) {
                warn!(%error, "layout pass failed");
                outcome.error = Some(error);
            }
            report.roots.push(outcome);
        }

        report
    }

    fn layout_root(
        &mut self,
        doc: &mut Document,
        root: NodeId,
        sizing: Sizing,
        outcome: &mut RootReport,
    ) -> Result<(), LayoutError> {
        if !doc.is_element(root) {
            return Err(LayoutError::NotAnElement { node: root });
        }

        let (width, height) = match sizing {
            Sizing::Fixed { width, height } => (width, height),
            Sizing::Measure => {
                let computed = self
                    .host
                    .computed_box(doc, root)
                    .ok_or(LayoutError::Unmeasurable { node: root })?;
                (computed.content_width(), computed.content_height())
            }
        };
        outcome.size = Some((width, height));

        let built = TreeBuilder::new(doc, self.policy.as_ref(), &self.config.style_attribute)
            .build(root);
        outcome.style_diagnostics = built.diagnostics;
        let mut tree = built.root;

        // The container's real size always wins over whatever the root declares,
        // in any spelling.
        tree.style.remove_property("width");
        tree.style.remove_property("height");
        tree.style.insert("width", StyleValue::Number(f64::from(width)));
        tree.style.insert("height", StyleValue::Number(f64::from(height)));

        self.solver.solve(&mut tree)?;

        outcome.apply_diagnostics = apply_layout(doc, &tree, &self.config);
        outcome.nodes = tree.len();

        debug!(nodes = outcome.nodes, width, height, "layout applied");
        Ok(())
    }
}

/// Lay out `selection`, measuring each root, with default settings.
pub fn layout(doc: &mut Document, selection: &Selection) -> LayoutReport {
    FlexLayout::default().layout(doc, selection, Sizing::Measure)
}

/// Lay out `selection` at a fixed size with default settings.
pub fn layout_with_size(doc: &mut Document, selection: &Selection, width: f32, height: f32) -> LayoutReport {
    FlexLayout::default().layout(doc, selection, Sizing::Fixed { width, height })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::layout::{ComputedBox, Edges, LayoutNode, LookThroughPolicy};

    const CSS: &str = "layout-css";

    /// svg(root) > [rect(height 20), g(unstyled) > rect(styled), g(flex 1) > rect(height 10)]
    struct Fixture {
        doc: Document,
        svg: NodeId,
        header: NodeId,
        hidden: NodeId,
        body: NodeId,
        inner: NodeId,
    }

    fn fixture() -> Fixture {
        let mut doc = Document::new();
        let svg = doc.create_element_with("svg", [(CSS, "width: 10; height: 10; padding: 5")]);
        let header = doc.create_element_with("rect", [(CSS, "height: 20")]);
        let wrapper = doc.create_element("g");
        let hidden = doc.create_element_with("rect", [(CSS, "flex: 1")]);
        let body = doc.create_element_with("g", [(CSS, "flex: 1")]);
        let inner = doc.create_element_with("rect", [(CSS, "height: 10")]);
        doc.append_child(svg, header);
        doc.append_child(svg, wrapper);
        doc.append_child(wrapper, hidden);
        doc.append_child(svg, body);
        doc.append_child(body, inner);
        Fixture {
            doc,
            svg,
            header,
            hidden,
            body,
            inner,
        }
    }

    fn attr<'a>(doc: &'a Document, node: NodeId, name: &str) -> Option<&'a str> {
        doc.attribute(node, name)
    }

    #[test]
    fn test_fixed_size_overrides_root_style() {
        let mut f = fixture();
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let solver = move |root: &mut LayoutNode| {
            *sink.borrow_mut() = Some((root.style.get("width").cloned(), root.style.get("height").cloned()));
            TaffySolver::default().solve(root)
        };

        let report = FlexLayout::default().with_solver(solver).layout(
            &mut f.doc,
            &Selection::single(f.svg),
            Sizing::Fixed { width: 200.0, height: 100.0 },
        );

        assert!(report.is_clean());
        assert_eq!(
            *seen.borrow(),
            Some((Some(StyleValue::Number(200.0)), Some(StyleValue::Number(100.0))))
        );
        assert_eq!(attr(&f.doc, f.svg, "width"), Some("200"));
        assert_eq!(attr(&f.doc, f.svg, "height"), Some("100"));
    }

    #[test]
    fn test_fixed_size_beats_root_aliases() {
        let mut doc = Document::new();
        let svg = doc.create_element_with("svg", [(CSS, "width: 10; WIDTH: 999; height: 10; he-ight: 7")]);
        let rect = doc.create_element_with("rect", [(CSS, "flex: 1")]);
        doc.append_child(svg, rect);

        let report = layout_with_size(&mut doc, &Selection::single(svg), 200.0, 100.0);

        assert!(report.is_clean());
        assert_eq!(attr(&doc, svg, "width"), Some("200"));
        assert_eq!(attr(&doc, svg, "height"), Some("100"));
        assert_eq!(attr(&doc, rect, "width"), Some("200"));
        assert_eq!(attr(&doc, rect, "height"), Some("100"));
    }

    #[test]
    fn test_full_pass_geometry() {
        let mut f = fixture();

        let report = layout_with_size(&mut f.doc, &Selection::single(f.svg), 200.0, 100.0);

        assert!(report.is_clean());
        assert_eq!(report.roots[0].nodes, 4);

        // Root padding 5: header box at (5, 5), 190 wide.
        assert_eq!(attr(&f.doc, f.header, "x"), Some("5"));
        assert_eq!(attr(&f.doc, f.header, "y"), Some("5"));
        assert_eq!(attr(&f.doc, f.header, "width"), Some("190"));
        assert_eq!(attr(&f.doc, f.header, "height"), Some("20"));

        // Body group takes the rest: 100 - 2*5 - 20 = 70.
        assert_eq!(attr(&f.doc, f.body, "transform"), Some("translate(5, 25)"));
        assert_eq!(attr(&f.doc, f.body, "width"), None);
        assert_eq!(attr(&f.doc, f.body, "layout-width"), Some("190"));
        assert_eq!(attr(&f.doc, f.body, "layout-height"), Some("70"));

        // Offsets are relative to the parent group.
        assert_eq!(attr(&f.doc, f.inner, "x"), Some("0"));
        assert_eq!(attr(&f.doc, f.inner, "y"), Some("0"));
        assert_eq!(attr(&f.doc, f.inner, "layout-width"), Some("190"));

        // Hidden behind an unstyled wrapper: untouched.
        assert!(f.doc.attributes(f.hidden).iter().all(|a| a.name == CSS));
    }

    #[test]
    fn test_measure_uses_content_box() {
        let mut f = fixture();
        let host = |_: &Document, _: NodeId| {
            Some(ComputedBox {
                width: 320.0,
                height: 240.0,
                padding: Edges {
                    top: 10.0,
                    right: 15.0,
                    bottom: 30.0,
                    left: 5.0,
                },
            })
        };

        let report = FlexLayout::default().with_host(host).layout(
            &mut f.doc,
            &Selection::single(f.svg),
            Sizing::Measure,
        );

        assert_eq!(report.roots[0].size, Some((300.0, 200.0)));
        assert_eq!(attr(&f.doc, f.svg, "width"), Some("300"));
        assert_eq!(attr(&f.doc, f.svg, "height"), Some("200"));
    }

    #[test]
    fn test_fixed_size_never_measures() {
        let mut f = fixture();
        let host = |_: &Document, _: NodeId| -> Option<ComputedBox> {
            panic!("host must not be consulted for a fixed size")
        };

        let report = FlexLayout::default().with_host(host).layout(
            &mut f.doc,
            &Selection::single(f.svg),
            Sizing::Fixed { width: 50.0, height: 50.0 },
        );

        assert!(report.is_clean());
    }

    #[test]
    fn test_roots_are_independent() {
        let mut doc = Document::new();
        let unmeasurable = doc.create_element_with("svg", [(CSS, "")]);
        let measurable = doc.create_element_with("svg", [("width", "80"), ("height", "60")]);
        let text = doc.create_text("not an element");

        let report = layout(&mut doc, &Selection::from_nodes([unmeasurable, text, measurable]));

        assert_eq!(report.roots.len(), 3);
        assert!(matches!(
            report.roots[0].error,
            Some(LayoutError::Unmeasurable { node }) if node == unmeasurable
        ));
        assert!(matches!(
            report.roots[1].error,
            Some(LayoutError::NotAnElement { .. })
        ));
        assert!(report.roots[2].error.is_none());
        assert_eq!(doc.attribute(measurable, "layout-width"), Some("80"));
        assert_eq!(report.errors().count(), 2);
    }

    #[test]
    fn test_solver_failure_is_reported() {
        let mut f = fixture();
        let solver = |_: &mut LayoutNode| -> Result<(), LayoutError> {
            Err(LayoutError::Rejected {
                reason: "conflicting constraints".into(),
            })
        };

        let report = FlexLayout::default().with_solver(solver).layout(
            &mut f.doc,
            &Selection::single(f.svg),
            Sizing::Fixed { width: 10.0, height: 10.0 },
        );

        assert!(matches!(report.roots[0].error, Some(LayoutError::Rejected { .. })));
        assert_eq!(attr(&f.doc, f.svg, "layout-width"), None);
    }

    #[test]
    fn test_look_through_policy() {
        let mut f = fixture();

        FlexLayout::default()
            .with_policy(LookThroughPolicy::new(CSS))
            .layout(
                &mut f.doc,
                &Selection::single(f.svg),
                Sizing::Fixed { width: 200.0, height: 100.0 },
            );

        assert!(attr(&f.doc, f.hidden, "layout-width").is_some());
    }

    #[test]
    fn test_second_pass_is_idempotent() {
        let mut f = fixture();
        let selection = Selection::single(f.svg);

        layout_with_size(&mut f.doc, &selection, 200.0, 100.0);
        let first: Vec<_> = f.doc.elements().iter().map(|&n| f.doc.attributes(n).to_vec()).collect();
        f.doc.take_dirty();

        layout_with_size(&mut f.doc, &selection, 200.0, 100.0);
        let second: Vec<_> = f.doc.elements().iter().map(|&n| f.doc.attributes(n).to_vec()).collect();

        assert_eq!(first, second);
        assert!(f.doc.take_dirty().is_empty());
    }

    #[test]
    fn test_style_diagnostics_reported() {
        let mut doc = Document::new();
        let svg = doc.create_element("svg");
        let rect = doc.create_element_with("rect", [(CSS, "flex: 1; x:y:z")]);
        doc.append_child(svg, rect);

        let report = layout_with_size(&mut doc, &Selection::single(svg), 10.0, 10.0);

        assert!(!report.is_clean());
        assert_eq!(report.roots[0].style_diagnostics.len(), 1);
        assert_eq!(report.roots[0].style_diagnostics[0].0, rect);
        assert!(report.roots[0].error.is_none());
    }
}
