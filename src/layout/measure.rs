//! Container measurement.
//!
//! When no explicit size is given, a root container is sized from its
//! computed box: outer width/height minus padding. Measurement goes through a
//! [`StyleHost`] so embedders can answer from a real style system.

use crate::dom::{Document, NodeId};

/// Per-edge lengths in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

/// Resolved on-screen box of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComputedBox {
    pub width: f32,
    pub height: f32,
    pub padding: Edges,
}

impl ComputedBox {
    /// Usable width: outer width minus left and right padding.
    pub fn content_width(&self) -> f32 {
        self.width - self.padding.left - self.padding.right
    }

    /// Usable height: outer height minus top and bottom padding.
    pub fn content_height(&self) -> f32 {
        self.height - self.padding.top - self.padding.bottom
    }
}

/// Source of computed boxes for root containers.
pub trait StyleHost {
    fn computed_box(&self, doc: &Document, node: NodeId) -> Option<ComputedBox>;
}

impl<F> StyleHost for F
where
    F: Fn(&Document, NodeId) -> Option<ComputedBox>,
{
    fn computed_box(&self, doc: &Document, node: NodeId) -> Option<ComputedBox> {
        self(doc, node)
    }
}

/// Reads the box from the element itself.
///
/// Width and height come from the `width`/`height` attributes (unitless or
/// `px`); padding comes from `padding` / `padding-*` declarations in the CSS
/// `style` attribute. Relative units cannot be resolved and yield `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeHost;

impl StyleHost for AttributeHost {
    fn computed_box(&self, doc: &Document, node: NodeId) -> Option<ComputedBox> {
        let width = parse_px(doc.attribute(node, "width")?)?;
        let height = parse_px(doc.attribute(node, "height")?)?;
        let padding = doc
            .attribute(node, "style")
            .map(css_padding)
            .unwrap_or_default();

        Some(ComputedBox {
            width,
            height,
            padding,
        })
    }
}

fn parse_px(text: &str) -> Option<f32> {
    let text = text.trim();
    let value: f32 = text.strip_suffix("px").unwrap_or(text).trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Padding from a CSS declaration list. Later declarations override earlier ones.
fn css_padding(css: &str) -> Edges {
    let mut edges = Edges::default();

    for declaration in css.split(';') {
        let Some((name, value)) = declaration.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match name.trim().to_ascii_lowercase().as_str() {
            "padding" => {
                if let Some(shorthand) = padding_shorthand(value) {
                    edges = shorthand;
                }
            }
            "padding-top" => edges.top = parse_px(value).unwrap_or(edges.top),
            "padding-right" => edges.right = parse_px(value).unwrap_or(edges.right),
            "padding-bottom" => edges.bottom = parse_px(value).unwrap_or(edges.bottom),
            "padding-left" => edges.left = parse_px(value).unwrap_or(edges.left),
            _ => {}
        }
    }

    edges
}

/// CSS 1-4 value expansion: `t`, `t r`, `t r b`, `t r b l`.
fn padding_shorthand(value: &str) -> Option<Edges> {
    let values = value
        .split_whitespace()
        .map(parse_px)
        .collect::<Option<Vec<f32>>>()?;

    let (top, right, bottom, left) = match values.as_slice() {
        [all] => (*all, *all, *all, *all),
        [v, h] => (*v, *h, *v, *h),
        [t, h, b] => (*t, *h, *b, *h),
        [t, r, b, l] => (*t, *r, *b, *l),
        _ => return None,
    };
    Some(Edges {
        top,
        right,
        bottom,
        left,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_host_subtracts_padding() {
        let mut doc = Document::new();
        let svg = doc.create_element_with("svg", [
            ("width", "400px"),
            ("height", "300"),
            ("style", "padding: 10px 20px; padding-bottom: 5px"),
        ]);

        let computed = AttributeHost.computed_box(&doc, svg).expect("box");

        assert_eq!(computed.padding, Edges {
            top: 10.0,
            right: 20.0,
            bottom: 5.0,
            left: 20.0,
        });
        assert_eq!(computed.content_width(), 360.0);
        assert_eq!(computed.content_height(), 285.0);
    }

    #[test]
    fn test_attribute_host_requires_absolute_size() {
        let mut doc = Document::new();
        let relative = doc.create_element_with("svg", [("width", "100%"), ("height", "300")]);
        let missing = doc.create_element("svg");

        assert!(AttributeHost.computed_box(&doc, relative).is_none());
        assert!(AttributeHost.computed_box(&doc, missing).is_none());
    }

    #[test]
    fn test_padding_shorthand_forms() {
        assert_eq!(padding_shorthand("1 2 3"), Some(Edges {
            top: 1.0,
            right: 2.0,
            bottom: 3.0,
            left: 2.0,
        }));
        assert_eq!(padding_shorthand("1 2 3 4 5"), None);
        assert_eq!(padding_shorthand("1em"), None);
    }

    #[test]
    fn test_closure_host() {
        let doc = Document::new();
        let host = |_: &Document, _: NodeId| {
            Some(ComputedBox {
                width: 50.0,
                height: 40.0,
                padding: Edges::default(),
            })
        };

        let computed = host.computed_box(&doc, NodeId(0)).expect("box");
        assert_eq!(computed.content_width(), 50.0);
    }
}
