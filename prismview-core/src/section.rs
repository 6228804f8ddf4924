//! 2D cross-section outlines swept by the extruder
use nalgebra::Point2;
use std::f32::consts::TAU;

/// A polygonal outline built like a path: move to the first corner, draw
/// lines to the following ones and close back onto the start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossSection {
    points: Vec<Point2<f32>>,
}

impl CrossSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh outline at `(x, y)`, discarding any previous points.
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.points.clear();
        self.points.push(Point2::new(x, y));
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.points.push(Point2::new(x, y));
        self
    }

    /// Return to the first point. A no-op on empty or already closed outlines.
    pub fn close(self) -> Self {
        match self.points.first().copied() {
            Some(first) if !self.is_closed() => {
                let Self { mut points } = self;
                points.push(first);
                Self { points }
            }
            _ => self,
        }
    }

    /// A regular polygon of `sides` corners on a circle of `radius`, the first
    /// corner on the positive X axis, counter-clockwise.
    pub fn regular(sides: usize, radius: f32) -> Self {
        let corner = |i: usize| {
            let angle = i as f32 * TAU / sides as f32;
            (angle.cos() * radius, angle.sin() * radius)
        };

        let (x0, y0) = corner(0);
        (1..sides)
            .map(corner)
            .fold(Self::new().move_to(x0, y0), |section, (x, y)| {
                section.line_to(x, y)
            })
            .close()
    }

    /// Every point of the path, including the closing point when closed.
    pub fn path(&self) -> &[Point2<f32>] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.points.len() > 1 && self.points.first() == self.points.last()
    }

    /// Corners of the outline without the closing duplicate.
    pub fn perimeter(&self) -> &[Point2<f32>] {
        if self.is_closed() {
            &self.points[..self.points.len() - 1]
        } else {
            &self.points
        }
    }

    /// Mean of the perimeter corners.
    pub fn centroid(&self) -> Option<Point2<f32>> {
        let perimeter = self.perimeter();
        if perimeter.is_empty() {
            return None;
        }
        let sum = perimeter
            .iter()
            .fold(nalgebra::Vector2::zeros(), |acc, p| acc + p.coords);
        Some(Point2::from(sum / perimeter.len() as f32))
    }

    /// Shoelace area; positive for counter-clockwise outlines.
    pub fn signed_area(&self) -> f32 {
        let perimeter = self.perimeter();
        let n = perimeter.len();
        (0..n)
            .map(|i| {
                let (a, b) = (perimeter[i], perimeter[(i + 1) % n]);
                a.x * b.y - b.x * a.y
            })
            .sum::<f32>()
            / 2.0
    }
}
