//! A minimal vector scene model for layout drawings.
//!
//! Scenes hold plain geometry (circles and lines with stroke styles) in
//! drawing units, independent of any rendering surface. Serialization lives
//! in [`svg`].
//!
//! # Example
//!
//! ```
//! use tubesheet_layout::support::drawing::{Circle, Point, Scene, Shape, Style};
//!
//! let mut scene = Scene::new("Example", "One circle");
//! scene.push(Shape::Circle(Circle::new(Point::ORIGIN, 10.0, Style::solid(1.0))));
//!
//! let view_box = scene.view_box().unwrap();
//! assert!((view_box.width - 11.0).abs() < 1e-12);
//! assert!(scene.to_svg().contains("<circle"));
//! ```

pub mod svg;

/// Default viewport padding, as a fraction of the scene bounds.
pub const VIEWBOX_PADDING: f64 = 0.1;

/// A position in drawing units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Stroke appearance of a shape.
///
/// Strokes are black, unfilled and keep their width when the drawing is scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Stroke width in screen pixels.
    pub stroke_width: f64,

    /// Dash and gap lengths, or `None` for a solid stroke.
    pub dash: Option<[f64; 2]>,
}

impl Style {
    /// A solid stroke.
    #[must_use]
    pub const fn solid(stroke_width: f64) -> Self {
        Self {
            stroke_width,
            dash: None,
        }
    }

    /// A dashed stroke.
    #[must_use]
    pub const fn dashed(stroke_width: f64, dash: f64, gap: f64) -> Self {
        Self {
            stroke_width,
            dash: Some([dash, gap]),
        }
    }
}

/// A circle, optionally tagged with a sequence number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub diameter: f64,
    pub id: Option<usize>,
    pub style: Style,
}

impl Circle {
    #[must_use]
    pub const fn new(center: Point, diameter: f64, style: Style) -> Self {
        Self {
            center,
            diameter,
            id: None,
            style,
        }
    }

    /// Tags the circle with a sequence number.
    #[must_use]
    pub const fn with_id(mut self, id: usize) -> Self {
        self.id = Some(id);
        self
    }
}

/// A straight line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: Point,
    pub to: Point,
    pub style: Style,
}

/// Any drawable shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Line(Line),
}

impl Shape {
    /// Axis-aligned bounds of the shape.
    #[must_use]
    pub fn bounds(&self) -> ViewBox {
        match self {
            Self::Circle(circle) => {
                let radius = circle.diameter / 2.0;
                ViewBox {
                    min_x: circle.center.x - radius,
                    min_y: circle.center.y - radius,
                    width: circle.diameter,
                    height: circle.diameter,
                }
            }
            Self::Line(line) => {
                let min_x = line.from.x.min(line.to.x);
                let min_y = line.from.y.min(line.to.y);
                ViewBox {
                    min_x,
                    min_y,
                    width: line.from.x.max(line.to.x) - min_x,
                    height: line.from.y.max(line.to.y) - min_y,
                }
            }
        }
    }
}

/// A rectangular viewport, in drawing units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.min_x + self.width
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.min_y + self.height
    }

    /// Smallest viewport containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let min_x = self.min_x.min(other.min_x);
        let min_y = self.min_y.min(other.min_y);
        Self {
            min_x,
            min_y,
            width: self.max_x().max(other.max_x()) - min_x,
            height: self.max_y().max(other.max_y()) - min_y,
        }
    }

    /// Scales every component by `1 + fraction`.
    ///
    /// For bounds centred on the origin this grows the viewport evenly.
    #[must_use]
    pub fn padded(&self, fraction: f64) -> Self {
        let scale = 1.0 + fraction;
        Self {
            min_x: self.min_x * scale,
            min_y: self.min_y * scale,
            width: self.width * scale,
            height: self.height * scale,
        }
    }
}

/// An ordered collection of shapes with descriptive metadata.
///
/// Shapes are drawn in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub title: String,
    pub description: String,
    pub padding: f64,
    shapes: Vec<Shape>,
}

impl Scene {
    /// Creates a scene with no shapes and the default padding.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            padding: VIEWBOX_PADDING,
            shapes: Vec::new(),
        }
    }

    /// A scene with nothing to draw.
    #[must_use]
    pub fn empty() -> Self {
        Self::new("", "")
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Union of all shape bounds, expanded by the scene padding.
    ///
    /// Returns `None` for an empty scene.
    #[must_use]
    pub fn view_box(&self) -> Option<ViewBox> {
        self.shapes
            .iter()
            .map(Shape::bounds)
            .reduce(|acc, bounds| acc.union(&bounds))
            .map(|bounds| bounds.padded(self.padding))
    }
}

impl Extend<Shape> for Scene {
    fn extend<I: IntoIterator<Item = Shape>>(&mut self, iter: I) {
        self.shapes.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn line_bounds_ignore_direction() {
        let line = Shape::Line(Line {
            from: Point::new(5.0, 0.0),
            to: Point::new(-5.0, 0.0),
            style: Style::solid(1.0),
        });
        assert_eq!(
            line.bounds(),
            ViewBox {
                min_x: -5.0,
                min_y: 0.0,
                width: 10.0,
                height: 0.0,
            }
        );
    }

    #[test]
    fn view_box_covers_every_shape() {
        let mut scene = Scene::new("t", "d");
        assert!(scene.view_box().is_none());

        scene.push(Shape::Circle(Circle::new(Point::ORIGIN, 20.0, Style::solid(2.0))));
        scene.push(Shape::Circle(
            Circle::new(Point::new(12.0, 0.0), 4.0, Style::solid(1.0)).with_id(1),
        ));

        let view_box = scene.view_box().unwrap();
        assert_relative_eq!(view_box.min_x, -11.0);
        assert_relative_eq!(view_box.min_y, -11.0);
        assert_relative_eq!(view_box.width, 26.4);
        assert_relative_eq!(view_box.height, 22.0);
    }

    #[test]
    fn union_is_symmetric() {
        let a = ViewBox {
            min_x: -1.0,
            min_y: 2.0,
            width: 3.0,
            height: 1.0,
        };
        let b = ViewBox {
            min_x: 0.0,
            min_y: -4.0,
            width: 1.0,
            height: 1.0,
        };
        assert_eq!(a.union(&b), b.union(&a));
        assert_relative_eq!(a.union(&b).max_y(), 3.0);
    }
}
