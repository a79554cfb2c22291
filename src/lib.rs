//! # svg-flex
//!
//! Declarative Flexbox layout for SVG trees.
//!
//! Elements opt in by carrying a `layout-css` attribute with a small set of
//! CSS-like declarations (`flex: 1; flexDirection: row; padding: 10`). A
//! layout pass turns those into geometry that SVG understands: `width`,
//! `height`, `x` and `y` on box-like elements, `transform="translate(x, y)"`
//! on groups.
//!
//! ## Architecture
//!
//! ```text
//! Document → Style Extractor → Layout Tree Builder → Taffy → Geometry Applier → Document
//! ```
//!
//! The box-model algorithm itself is delegated to [Taffy](https://github.com/DioxusLabs/taffy)
//! behind the [`layout::BoxModelSolver`] trait.
//!
//! ## Modules
//!
//! - [`dom`] - Arena document, node handles and selections
//! - [`svg`] - SVG text in and out of a [`Document`]
//! - [`style`] - `layout-css` parsing and numeric coercion
//! - [`layout`] - Layout tree, solver seam, Taffy bridge, measurement and applier
//! - [`pipeline`] - The driver that runs one pass per root container
//! - [`config`] - Attribute names and policies
//! - [`error`] - Errors and non-fatal diagnostics
//!
//! ## Example
//!
//! ```
//! use svg_flex::{layout_with_size, svg, Selection};
//!
//! let mut doc = svg::parse(
//!     r#"<svg layout-css="flexDirection: row"><rect layout-css="flex: 1"/><g layout-css="width: 50"/></svg>"#,
//! ).unwrap();
//! let root = doc.root().unwrap();
//!
//! let report = layout_with_size(&mut doc, &Selection::single(root), 300.0, 200.0);
//! assert!(report.is_clean());
//!
//! let rect = doc.children(root)[0];
//! assert_eq!(doc.attribute(rect, "width"), Some("250"));
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod style;
pub mod svg;

// Re-export commonly used items
pub use config::{FlexDirection, LayoutConfig, UnresolvedSize};

pub use dom::{Document, NodeId, Selection};

pub use error::{ApplyDiagnostic, Axis, LayoutError, StyleDiagnostic, SvgError};

pub use style::{parse_style, StyleMap, StyleValue};

pub use layout::{BoxModelSolver, LayoutNode, NodeLayout, TaffySolver};

pub use pipeline::{layout, layout_with_size, FlexLayout, LayoutReport, RootReport, Sizing};
