//! Layout configuration.
//!
//! Defaults match the `layout-css` convention: constraints are read from
//! `layout-css`, `<svg>` and `<rect>` are sized directly, everything else is
//! translated, and solved sizes are mirrored into `layout-width` /
//! `layout-height`.

/// What the applier writes when the solver left a width or height unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum UnresolvedSize {
    /// Write `0`.
    #[default]
    Zero,
    /// Leave the attribute as it was.
    Skip,
}

/// Main axis used when a node does not declare `flexDirection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FlexDirection {
    #[default]
    Column,
    Row,
    ColumnReverse,
    RowReverse,
}

/// Engine-wide settings shared by the extractor, solver and applier.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Attribute holding the style microformat.
    pub style_attribute: String,
    /// Auxiliary attribute receiving the solved width.
    pub width_attribute: String,
    /// Auxiliary attribute receiving the solved height.
    pub height_attribute: String,
    /// Tags sized through `width`/`height`/`x`/`y` instead of a transform.
    pub box_tags: Vec<String>,
    pub unresolved_size: UnresolvedSize,
    pub default_direction: FlexDirection,
    /// Round solved geometry to whole pixels.
    pub rounding: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            style_attribute: "layout-css".to_string(),
            width_attribute: "layout-width".to_string(),
            height_attribute: "layout-height".to_string(),
            box_tags: vec!["svg".to_string(), "rect".to_string()],
            unresolved_size: UnresolvedSize::default(),
            default_direction: FlexDirection::default(),
            rounding: true,
        }
    }
}

impl LayoutConfig {
    pub fn with_style_attribute(mut self, name: impl Into<String>) -> Self {
        self.style_attribute = name.into();
        self
    }

    pub fn with_size_attributes(
        mut self,
        width: impl Into<String>,
        height: impl Into<String>,
    ) -> Self {
        self.width_attribute = width.into();
        self.height_attribute = height.into();
        self
    }

    /// Treat an extra tag as box-kind (e.g. `image`, `foreignObject`).
    pub fn with_box_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.is_box_tag(&tag) {
            self.box_tags.push(tag);
        }
        self
    }

    pub fn with_unresolved_size(mut self, policy: UnresolvedSize) -> Self {
        self.unresolved_size = policy;
        self
    }

    pub fn with_default_direction(mut self, direction: FlexDirection) -> Self {
        self.default_direction = direction;
        self
    }

    pub fn with_rounding(mut self, rounding: bool) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn is_box_tag(&self, tag: &str) -> bool {
        self.box_tags.iter().any(|t| t == tag)
    }
}
