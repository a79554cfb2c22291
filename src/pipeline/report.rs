//! Per-pass outcome reporting.

use crate::dom::NodeId;
use crate::error::{ApplyDiagnostic, LayoutError, StyleDiagnostic};

/// What happened to one root container.
#[derive(Debug, Default)]
pub struct RootReport {
    pub root: Option<NodeId>,
    /// Width and height handed to the solver for the root.
    pub size: Option<(f32, f32)>,
    /// Nodes in the layout tree, root included.
    pub nodes: usize,
    pub style_diagnostics: Vec<(NodeId, StyleDiagnostic)>,
    pub apply_diagnostics: Vec<ApplyDiagnostic>,
    /// Set when this root could not be laid out. Other roots are unaffected.
    pub error: Option<LayoutError>,
}

impl RootReport {
    pub(crate) fn new(root: NodeId) -> Self {
        Self {
            root: Some(root),
            ..Default::default()
        }
    }

    pub fn is_clean(&self) -> bool {
        self.error.is_none() && self.style_diagnostics.is_empty() && self.apply_diagnostics.is_empty()
    }
}

/// Outcome of one [`FlexLayout::layout`](super::FlexLayout::layout) call.
///
/// Lenient callers can drop it; strict callers can reject anything that is
/// not [`is_clean`](Self::is_clean).
#[derive(Debug, Default)]
pub struct LayoutReport {
    pub roots: Vec<RootReport>,
}

impl LayoutReport {
    /// No errors and no diagnostics for any root.
    pub fn is_clean(&self) -> bool {
        self.roots.iter().all(RootReport::is_clean)
    }

    pub fn errors(&self) -> impl Iterator<Item = &LayoutError> {
        self.roots.iter().filter_map(|r| r.error.as_ref())
    }

    pub fn root(&self, node: NodeId) -> Option<&RootReport> {
        self.roots.iter().find(|r| r.root == Some(node))
    }
}
