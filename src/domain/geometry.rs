/// Padding around a component's content.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Insets {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub const fn horizontal(value: f32) -> Self {
        Self::new(value, 0.0, value, 0.0)
    }
}

/// Size and padding of a component after the host's layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewBox {
    pub width: f32,
    pub height: f32,
    pub padding: Insets,
}

impl ViewBox {
    pub fn new(width: f32, height: f32, padding: Insets) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    /// Width available to text inside the padding.
    pub fn content_width(&self) -> f32 {
        (self.width - self.padding.left - self.padding.right).max(0.0)
    }

    /// The padded content box.
    pub fn content_rect(&self) -> RegionRect {
        RegionRect {
            min_x: self.padding.left,
            max_x: (self.width - self.padding.right).max(self.padding.left),
            min_y: self.padding.top,
            max_y: (self.height - self.padding.bottom).max(self.padding.top),
        }
    }

    /// Whether a layout change requires the text to be laid out again.
    pub fn reflows(&self, other: &ViewBox) -> bool {
        self.content_width() != other.content_width()
    }
}

/// Axis-aligned rectangle in component coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegionRect {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl RegionRect {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.min_x <= x && x < self.max_x && self.min_y <= y && y < self.max_y
    }

    pub fn is_within(&self, bounds: &RegionRect) -> bool {
        bounds.min_x <= self.min_x
            && self.max_x <= bounds.max_x
            && bounds.min_y <= self.min_y
            && self.max_y <= bounds.max_y
    }

    /// Shrinks the rectangle so it lies inside `bounds`.
    pub fn clamped_to(&self, bounds: &RegionRect) -> RegionRect {
        let min_x = self.min_x.clamp(bounds.min_x, bounds.max_x);
        let min_y = self.min_y.clamp(bounds.min_y, bounds.max_y);
        RegionRect {
            min_x,
            max_x: self.max_x.clamp(min_x, bounds.max_x),
            min_y,
            max_y: self.max_y.clamp(min_y, bounds.max_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_content_width_never_negative() {
        let view = ViewBox::new(4.0, 2.0, Insets::horizontal(3.0));
        assert_eq!(view.content_width(), 0.0);
    }

    #[test]
    fn test_clamped_to() {
        let bounds = ViewBox::new(20.0, 5.0, Insets::uniform(1.0)).content_rect();
        let rect = RegionRect {
            min_x: -2.0,
            max_x: 30.0,
            min_y: 3.0,
            max_y: 4.0,
        };
        let clamped = rect.clamped_to(&bounds);
        assert_eq!(
            clamped,
            RegionRect {
                min_x: 1.0,
                max_x: 19.0,
                min_y: 3.0,
                max_y: 4.0,
            }
        );
        assert!(clamped.is_within(&bounds));
    }

    #[test]
    fn test_contains_is_half_open() {
        let rect = RegionRect {
            min_x: 1.0,
            max_x: 3.0,
            min_y: 0.0,
            max_y: 1.0,
        };
        assert!(rect.contains(1.0, 0.0));
        assert!(rect.contains(2.5, 0.5));
        assert!(!rect.contains(3.0, 0.5));
        assert!(!rect.contains(2.0, 1.0));
    }
}
