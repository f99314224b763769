//! Region rendering through a caller-supplied drawing surface.
//!
//! The core never draws pixels itself; it walks the boundary and delegates
//! one call per element, resolving a default color from the material role.

use crate::geometry::{Element, Segment};
use crate::math::Point2;
use crate::region::{MaterialType, Region};

/// Draw colors understood by every surface implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Blue,
    Green,
    Red,
    Magenta,
}

impl Color {
    /// Default color for a material role.
    #[must_use]
    pub fn for_material(material: MaterialType) -> Self {
        match material {
            MaterialType::Iron => Color::Blue,
            MaterialType::Windings => Color::Green,
            MaterialType::Magnet => Color::Red,
            MaterialType::Air => Color::Magenta,
            MaterialType::Unknown => Color::Black,
        }
    }
}

/// Drawing operations a rendering backend must provide.
pub trait DrawingSurface {
    /// Draws a straight segment.
    fn line(&mut self, from: Point2, to: Point2, color: Color);

    /// Draws a circular arc swept counter-clockwise between the angles.
    fn arc(&mut self, center: Point2, radius: f64, start_angle: f64, end_angle: f64, color: Color);

    /// Draws a full circle.
    fn circle(&mut self, center: Point2, radius: f64, color: Color);

    /// Marks a boundary node.
    fn node(&mut self, at: Point2);
}

impl Region {
    /// Renders the boundary onto `surface`.
    ///
    /// With no explicit `color` the region's material decides; `show_nodes`
    /// additionally marks every element endpoint.
    pub fn render(&self, surface: &mut dyn DrawingSurface, color: Option<Color>, show_nodes: bool) {
        let color = color.unwrap_or_else(|| Color::for_material(self.material));
        for element in &self.elements {
            match element {
                Element::Line(line) => surface.line(line.start(), line.end(), color),
                Element::Arc(arc) => surface.arc(
                    *arc.center(),
                    arc.radius(),
                    arc.start_angle(),
                    arc.end_angle(),
                    color,
                ),
                Element::Circle(circle) => {
                    surface.circle(*circle.center(), circle.radius(), color);
                }
            }
            if show_nodes {
                surface.node(element.start());
                surface.node(element.end());
            }
        }
    }
}
