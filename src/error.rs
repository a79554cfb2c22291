//! Error and diagnostic types.
//!
//! Layout degrades silently by default: malformed declarations and unresolved
//! sizes are collected as diagnostics instead of aborting a pass. Hard
//! failures ([`LayoutError`]) are scoped to a single root and never stop the
//! remaining roots of a selection.

use std::fmt;

use thiserror::Error;

use crate::dom::NodeId;

// =============================================================================
// Errors
// =============================================================================

/// Failure while laying out one root container.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("box-model solver failed: {0}")]
    Solver(#[from] taffy::TaffyError),

    #[error("solver rejected the tree: {reason}")]
    Rejected { reason: String },

    #[error("cannot measure container {node}: no computed width/height")]
    Unmeasurable { node: NodeId },

    #[error("node {node} is not an element")]
    NotAnElement { node: NodeId },
}

/// Failure while reading SVG markup into a [`Document`](crate::dom::Document).
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("invalid SVG markup: {0}")]
    Xml(#[from] roxmltree::Error),
}

// =============================================================================
// Diagnostics
// =============================================================================

/// A style declaration that was skipped during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleDiagnostic {
    #[error("malformed declaration {declaration:?}: expected exactly one ':', found {colons}")]
    MalformedDeclaration { declaration: String, colons: usize },
}

/// Geometry axis, used when reporting unresolved sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

/// Something the applier had to paper over while writing geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyDiagnostic {
    #[error("node {node} has no solved {axis}")]
    UnresolvedSize { node: NodeId, axis: Axis },
}
