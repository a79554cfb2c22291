//! Layout Module
//!
//! Flexbox layout of SVG subtrees using Taffy.
//!
//! # Architecture
//!
//! One pass over a root container runs four stages:
//!
//! 1. [`tree`] extracts `layout-css` styles into a [`LayoutNode`] tree
//! 2. [`measure`] sizes the root when no explicit size is given
//! 3. a [`BoxModelSolver`] (by default [`TaffySolver`]) fills each node's
//!    [`NodeLayout`]
//! 4. [`apply`] writes the geometry back onto the document
//!
//! The driver that strings these together lives in [`crate::pipeline`].

mod types;
mod solver;
mod taffy_bridge;
pub mod apply;
pub mod measure;
pub mod tree;

pub use types::*;
pub use solver::BoxModelSolver;
pub use taffy_bridge::TaffySolver;
pub use apply::{apply_layout, format_number, NodeKind};
pub use measure::{AttributeHost, ComputedBox, Edges, StyleHost};
pub use tree::{
    build_tree, BuiltTree, LookThroughPolicy, ParticipantPolicy, StyleAttributePolicy,
    TreeBuilder,
};
