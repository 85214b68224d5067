//! Vector shape element.

use super::ElementKind;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Shape outlines offered by the shape picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    Rectangle,
    RoundedRectangle,
    Circle,
    TriangleUp,
    TriangleDown,
    TriangleLeft,
    TriangleRight,
    Diamond,
    Plus,
    Pentagon,
    Hexagon,
    Trapezoid,
    Parallelogram,
    RightTriangle,
}

/// How a shape is drawn by the player.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeOutline {
    /// Axis-aligned box.
    Rect,
    /// Box with rounded corners.
    RoundedRect { radius: f64 },
    /// Ellipse inscribed in the box.
    Ellipse,
    /// Closed polygon, vertices relative to the box origin.
    Polygon(Vec<Point>),
}

impl ShapeType {
    /// Corner radius of a rounded rectangle relative to its shorter side.
    const ROUNDED_RADIUS_RATIO: f64 = 0.1;

    /// Every shape type, in picker order.
    pub const ALL: [ShapeType; 14] = [
        ShapeType::Rectangle,
        ShapeType::RoundedRectangle,
        ShapeType::Circle,
        ShapeType::TriangleUp,
        ShapeType::TriangleDown,
        ShapeType::TriangleLeft,
        ShapeType::TriangleRight,
        ShapeType::Diamond,
        ShapeType::Plus,
        ShapeType::Pentagon,
        ShapeType::Hexagon,
        ShapeType::Trapezoid,
        ShapeType::Parallelogram,
        ShapeType::RightTriangle,
    ];

    /// Outline of this shape when fitted into a `width` x `height` box.
    pub fn outline(self, width: f64, height: f64) -> ShapeOutline {
        let (w, h) = (width, height);
        let poly = |pts: &[(f64, f64)]| {
            ShapeOutline::Polygon(pts.iter().map(|&(x, y)| Point::new(x * w, y * h)).collect())
        };
        match self {
            ShapeType::Rectangle => ShapeOutline::Rect,
            ShapeType::RoundedRectangle => ShapeOutline::RoundedRect {
                radius: w.min(h) * Self::ROUNDED_RADIUS_RATIO,
            },
            ShapeType::Circle => ShapeOutline::Ellipse,
            ShapeType::TriangleUp => poly(&[(0.5, 0.0), (1.0, 1.0), (0.0, 1.0)]),
            ShapeType::TriangleDown => poly(&[(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)]),
            ShapeType::TriangleLeft => poly(&[(0.0, 0.5), (1.0, 0.0), (1.0, 1.0)]),
            ShapeType::TriangleRight => poly(&[(0.0, 0.0), (1.0, 0.5), (0.0, 1.0)]),
            ShapeType::Diamond => poly(&[(0.5, 0.0), (1.0, 0.5), (0.5, 1.0), (0.0, 0.5)]),
            ShapeType::Plus => poly(&[
                (1.0 / 3.0, 0.0),
                (2.0 / 3.0, 0.0),
                (2.0 / 3.0, 1.0 / 3.0),
                (1.0, 1.0 / 3.0),
                (1.0, 2.0 / 3.0),
                (2.0 / 3.0, 2.0 / 3.0),
                (2.0 / 3.0, 1.0),
                (1.0 / 3.0, 1.0),
                (1.0 / 3.0, 2.0 / 3.0),
                (0.0, 2.0 / 3.0),
                (0.0, 1.0 / 3.0),
                (1.0 / 3.0, 1.0 / 3.0),
            ]),
            ShapeType::Pentagon => ShapeOutline::Polygon(regular_polygon(5, w, h)),
            ShapeType::Hexagon => ShapeOutline::Polygon(regular_polygon(6, w, h)),
            ShapeType::Trapezoid => poly(&[(0.25, 0.0), (0.75, 0.0), (1.0, 1.0), (0.0, 1.0)]),
            ShapeType::Parallelogram => poly(&[(0.25, 0.0), (1.0, 0.0), (0.75, 1.0), (0.0, 1.0)]),
            ShapeType::RightTriangle => poly(&[(0.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
        }
    }
}

/// Vertices of a regular polygon stretched to fill the box, first vertex on top.
fn regular_polygon(sides: usize, width: f64, height: f64) -> Vec<Point> {
    let (rx, ry) = (width / 2.0, height / 2.0);
    (0..sides)
        .map(|i| {
            let angle = -std::f64::consts::FRAC_PI_2 + std::f64::consts::TAU * i as f64 / sides as f64;
            Point::new(rx + rx * angle.cos(), ry + ry * angle.sin())
        })
        .collect()
}

/// A filled vector shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeElement {
    pub shape_type: ShapeType,
    pub width: f64,
    pub height: f64,
    /// Fill color.
    pub fill: String,
}

impl ShapeElement {
    pub const DEFAULT_SIZE: Size = Size::new(400.0, 400.0);
    pub const DEFAULT_FILL: &'static str = "#4a90d9";
    pub const MIN_SIZE: Size = Size::new(40.0, 40.0);

    pub fn new(shape_type: ShapeType) -> Self {
        Self {
            shape_type,
            width: Self::DEFAULT_SIZE.width,
            height: Self::DEFAULT_SIZE.height,
            fill: Self::DEFAULT_FILL.to_string(),
        }
    }

    /// Outline fitted to the shape's box.
    pub fn outline(&self) -> ShapeOutline {
        self.shape_type.outline(self.width, self.height)
    }
}

boxed_body!(ShapeElement, ElementKind::Shape);
