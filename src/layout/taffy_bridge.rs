//! Taffy Bridge - Flexbox solving through the Taffy layout engine.
//!
//! Converts each node's [`StyleMap`] into a Taffy [`Style`], mirrors the
//! layout tree into a `TaffyTree`, runs the computation, and copies the
//! results back into the [`LayoutNode`] slots.
//!
//! Property names are matched case-insensitively with `-` and `_` ignored,
//! so `flexDirection`, `flex-direction` and `flex_direction` all work.

use taffy::{
    AlignContent as TaffyAlignContent, AlignItems as TaffyAlignItems, AvailableSpace,
    Dimension as TaffyDimension, Display, FlexDirection as TaffyFlexDirection,
    FlexWrap as TaffyFlexWrap, JustifyContent as TaffyJustifyContent, LengthPercentage,
    LengthPercentageAuto, NodeId as TaffyNodeId, Position as TaffyPosition, Rect, Size, Style,
    TaffyTree,
};
use tracing::debug;

use crate::config::{FlexDirection, LayoutConfig};
use crate::error::LayoutError;
use crate::style::{normalize_property, StyleMap, StyleValue};

use super::solver::BoxModelSolver;
use super::types::{LayoutNode, NodeLayout};

// =============================================================================
// VALUE CONVERSION
// =============================================================================

/// A parsed length before it is narrowed to one of Taffy's length types.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Length {
    Auto,
    Points(f32),
    /// Fraction of the parent (0.5 = 50%).
    Percent(f32),
}

fn finite(n: f64) -> Option<f32> {
    n.is_finite().then_some(n as f32)
}

fn number(value: &StyleValue) -> Option<f32> {
    value.as_number().and_then(finite)
}

/// Numbers are pixels; text may be `auto`, `<n>%` or `<n>px`.
fn parse_length(value: &StyleValue) -> Option<Length> {
    let text = match value {
        StyleValue::Number(n) => return finite(*n).map(Length::Points),
        StyleValue::Text(text) => text.trim(),
    };

    if text.eq_ignore_ascii_case("auto") {
        return Some(Length::Auto);
    }
    if let Some(percent) = text.strip_suffix('%') {
        let p: f32 = percent.trim().parse().ok()?;
        return p.is_finite().then_some(Length::Percent(p / 100.0));
    }
    let px: f32 = text.strip_suffix("px").unwrap_or(text).trim().parse().ok()?;
    px.is_finite().then_some(Length::Points(px))
}

fn to_taffy_dimension(length: Length) -> TaffyDimension {
    match length {
        Length::Auto => TaffyDimension::Auto,
        Length::Points(n) => TaffyDimension::Length(n),
        Length::Percent(p) => TaffyDimension::Percent(p),
    }
}

fn to_taffy_lpa(length: Length) -> LengthPercentageAuto {
    match length {
        Length::Auto => LengthPercentageAuto::Auto,
        Length::Points(n) => LengthPercentageAuto::Length(n),
        Length::Percent(p) => LengthPercentageAuto::Percent(p),
    }
}

/// Padding, border and gap have no `auto`.
fn to_taffy_lp(length: Length) -> Option<LengthPercentage> {
    match length {
        Length::Auto => None,
        Length::Points(n) => Some(LengthPercentage::Length(n)),
        Length::Percent(p) => Some(LengthPercentage::Percent(p)),
    }
}

fn dimension(value: &StyleValue) -> Option<TaffyDimension> {
    parse_length(value).map(to_taffy_dimension)
}

fn lpa(value: &StyleValue) -> Option<LengthPercentageAuto> {
    parse_length(value).map(to_taffy_lpa)
}

fn lp(value: &StyleValue) -> Option<LengthPercentage> {
    parse_length(value).and_then(to_taffy_lp)
}

fn keyword(value: &StyleValue) -> Option<String> {
    value.as_str().map(|s| s.trim().to_ascii_lowercase())
}

// =============================================================================
// ENUM CONVERSIONS
// =============================================================================

fn to_taffy_flex_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::Row => TaffyFlexDirection::Row,
        FlexDirection::ColumnReverse => TaffyFlexDirection::ColumnReverse,
        FlexDirection::RowReverse => TaffyFlexDirection::RowReverse,
    }
}

fn parse_flex_direction(value: &StyleValue) -> Option<TaffyFlexDirection> {
    Some(match keyword(value)?.as_str() {
        "column" => TaffyFlexDirection::Column,
        "row" => TaffyFlexDirection::Row,
        "column-reverse" => TaffyFlexDirection::ColumnReverse,
        "row-reverse" => TaffyFlexDirection::RowReverse,
        _ => return None,
    })
}

fn parse_flex_wrap(value: &StyleValue) -> Option<TaffyFlexWrap> {
    Some(match keyword(value)?.as_str() {
        "nowrap" => TaffyFlexWrap::NoWrap,
        "wrap" => TaffyFlexWrap::Wrap,
        "wrap-reverse" => TaffyFlexWrap::WrapReverse,
        _ => return None,
    })
}

fn parse_justify_content(value: &StyleValue) -> Option<TaffyJustifyContent> {
    Some(match keyword(value)?.as_str() {
        "flex-start" => TaffyJustifyContent::FlexStart,
        "center" => TaffyJustifyContent::Center,
        "flex-end" => TaffyJustifyContent::FlexEnd,
        "space-between" => TaffyJustifyContent::SpaceBetween,
        "space-around" => TaffyJustifyContent::SpaceAround,
        "space-evenly" => TaffyJustifyContent::SpaceEvenly,
        _ => return None,
    })
}

fn parse_align_items(value: &StyleValue) -> Option<TaffyAlignItems> {
    Some(match keyword(value)?.as_str() {
        "stretch" => TaffyAlignItems::Stretch,
        "flex-start" => TaffyAlignItems::FlexStart,
        "center" => TaffyAlignItems::Center,
        "flex-end" => TaffyAlignItems::FlexEnd,
        "baseline" => TaffyAlignItems::Baseline,
        _ => return None,
    })
}

fn parse_align_content(value: &StyleValue) -> Option<TaffyAlignContent> {
    Some(match keyword(value)?.as_str() {
        "stretch" => TaffyAlignContent::Stretch,
        "flex-start" => TaffyAlignContent::FlexStart,
        "center" => TaffyAlignContent::Center,
        "flex-end" => TaffyAlignContent::FlexEnd,
        "space-between" => TaffyAlignContent::SpaceBetween,
        "space-around" => TaffyAlignContent::SpaceAround,
        _ => return None,
    })
}

fn parse_position(value: &StyleValue) -> Option<TaffyPosition> {
    Some(match keyword(value)?.as_str() {
        "relative" => TaffyPosition::Relative,
        "absolute" => TaffyPosition::Absolute,
        _ => return None,
    })
}

fn parse_display(value: &StyleValue) -> Option<Display> {
    Some(match keyword(value)?.as_str() {
        "flex" => Display::Flex,
        "none" => Display::None,
        _ => return None,
    })
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

/// Applied before everything else so per-edge longhands win regardless of
/// declaration order.
const SHORTHANDS: [&str; 5] = ["margin", "padding", "borderwidth", "gap", "flex"];

fn all_edges<T: Copy>(v: T) -> Rect<T> {
    Rect {
        left: v,
        right: v,
        top: v,
        bottom: v,
    }
}

/// Apply one declaration. `None` means the property or its value is not
/// understood and nothing was changed.
fn apply_property(style: &mut Style, key: &str, value: &StyleValue) -> Option<()> {
    match key {
        // Dimensions
        "width" => style.size.width = dimension(value)?,
        "height" => style.size.height = dimension(value)?,
        "minwidth" => style.min_size.width = dimension(value)?,
        "minheight" => style.min_size.height = dimension(value)?,
        "maxwidth" => style.max_size.width = dimension(value)?,
        "maxheight" => style.max_size.height = dimension(value)?,
        "aspectratio" => style.aspect_ratio = Some(number(value)?),

        // Insets
        "top" => style.inset.top = lpa(value)?,
        "right" => style.inset.right = lpa(value)?,
        "bottom" => style.inset.bottom = lpa(value)?,
        "left" => style.inset.left = lpa(value)?,

        // Margins
        "margin" => style.margin = all_edges(lpa(value)?),
        "margintop" => style.margin.top = lpa(value)?,
        "marginright" => style.margin.right = lpa(value)?,
        "marginbottom" => style.margin.bottom = lpa(value)?,
        "marginleft" => style.margin.left = lpa(value)?,

        // Padding
        "padding" => style.padding = all_edges(lp(value)?),
        "paddingtop" => style.padding.top = lp(value)?,
        "paddingright" => style.padding.right = lp(value)?,
        "paddingbottom" => style.padding.bottom = lp(value)?,
        "paddingleft" => style.padding.left = lp(value)?,

        // Border widths
        "borderwidth" => style.border = all_edges(lp(value)?),
        "bordertopwidth" => style.border.top = lp(value)?,
        "borderrightwidth" => style.border.right = lp(value)?,
        "borderbottomwidth" => style.border.bottom = lp(value)?,
        "borderleftwidth" => style.border.left = lp(value)?,

        // Gaps (width = between columns, height = between rows)
        "gap" => {
            let gap = lp(value)?;
            style.gap = Size {
                width: gap,
                height: gap,
            };
        }
        "rowgap" => style.gap.height = lp(value)?,
        "columngap" => style.gap.width = lp(value)?,

        // Flex item
        "flex" => {
            let flex = number(value)?;
            if flex > 0.0 {
                style.flex_grow = flex;
                style.flex_shrink = 1.0;
                style.flex_basis = TaffyDimension::Length(0.0);
            } else {
                style.flex_grow = 0.0;
                style.flex_shrink = -flex;
            }
        }
        "flexgrow" => style.flex_grow = number(value)?.max(0.0),
        "flexshrink" => style.flex_shrink = number(value)?.max(0.0),
        "flexbasis" => style.flex_basis = dimension(value)?,
        "alignself" => {
            style.align_self = match keyword(value)?.as_str() {
                "auto" => None,
                _ => Some(parse_align_items(value)?),
            }
        }

        // Flex container
        "flexdirection" => style.flex_direction = parse_flex_direction(value)?,
        "flexwrap" => style.flex_wrap = parse_flex_wrap(value)?,
        "justifycontent" => style.justify_content = Some(parse_justify_content(value)?),
        "alignitems" => style.align_items = Some(parse_align_items(value)?),
        "aligncontent" => style.align_content = Some(parse_align_content(value)?),

        // Other
        "position" => style.position = parse_position(value)?,
        "display" => style.display = parse_display(value)?,

        _ => return None,
    }
    Some(())
}

/// Converts style maps and drives the Taffy computation.
#[derive(Debug, Clone, PartialEq)]
pub struct TaffySolver {
    default_direction: FlexDirection,
    rounding: bool,
}

impl Default for TaffySolver {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl TaffySolver {
    pub fn new(default_direction: FlexDirection, rounding: bool) -> Self {
        Self {
            default_direction,
            rounding,
        }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(config.default_direction, config.rounding)
    }

    /// Build a Taffy style from a style map.
    pub fn build_style(&self, map: &StyleMap) -> Style {
        let mut style = Style {
            display: Display::Flex,
            flex_direction: to_taffy_flex_direction(self.default_direction),
            ..Default::default()
        };

        let (shorthands, longhands): (Vec<_>, Vec<_>) = map
            .iter()
            .map(|(name, value)| (normalize_property(name), name, value))
            .partition(|(key, _, _)| SHORTHANDS.contains(&key.as_str()));

        for (key, name, value) in shorthands.into_iter().chain(longhands) {
            if apply_property(&mut style, &key, value).is_none() {
                debug!(property = name, value = %value, "ignoring unsupported layout property");
            }
        }

        style
    }

    fn insert(&self, tree: &mut TaffyTree<()>, node: &LayoutNode) -> Result<TaffyNodeId, LayoutError> {
        let children = node
            .children
            .iter()
            .map(|child| self.insert(tree, child))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tree.new_with_children(self.build_style(&node.style), &children)?)
    }
}

/// Root constraints: a numeric root size is definite, anything else sizes to content.
fn available_space(value: Option<&StyleValue>) -> AvailableSpace {
    value
        .and_then(number)
        .map(AvailableSpace::Definite)
        .unwrap_or(AvailableSpace::MaxContent)
}

fn extract(tree: &TaffyTree<()>, id: TaffyNodeId, node: &mut LayoutNode) -> Result<(), LayoutError> {
    let layout = tree.layout(id)?;
    node.layout = NodeLayout {
        width: Some(layout.size.width),
        height: Some(layout.size.height),
        top: layout.location.y,
        left: layout.location.x,
    };

    let child_ids = tree.children(id)?;
    for (child_id, child) in child_ids.into_iter().zip(node.children.iter_mut()) {
        extract(tree, child_id, child)?;
    }
    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

impl BoxModelSolver for TaffySolver {
    fn solve(&mut self, root: &mut LayoutNode) -> Result<(), LayoutError> {
        let mut tree: TaffyTree<()> = TaffyTree::new();
        if !self.rounding {
            tree.disable_rounding();
        }

        let root_id = self.insert(&mut tree, root)?;
        let available = Size {
            width: available_space(root.style.get("width")),
            height: available_space(root.style.get("height")),
        };
        tree.compute_layout(root_id, available)?;

        extract(&tree, root_id, root)
    }
}
