//! Box-model solver seam.

use crate::error::LayoutError;

use super::types::LayoutNode;

/// Fills in the `layout` slot of every node reachable from `root`.
///
/// Implementations read each node's `style` and write `width`, `height`,
/// `top` and `left` in place. Offsets are relative to the parent node.
/// [`TaffySolver`](super::TaffySolver) is the stock Flexbox implementation;
/// any closure with the same shape works too.
pub trait BoxModelSolver {
    fn solve(&mut self, root: &mut LayoutNode) -> Result<(), LayoutError>;
}

impl<F> BoxModelSolver for F
where
    F: FnMut(&mut LayoutNode) -> Result<(), LayoutError>,
{
    fn solve(&mut self, root: &mut LayoutNode) -> Result<(), LayoutError> {
        self(root)
    }
}
