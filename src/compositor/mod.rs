//! Depth-sorted compositing of helix primitives.
//!
//! The drawing surface has no depth buffer, so occlusion comes entirely
//! from draw order: every frame's primitives are stable-sorted by depth,
//! far to near, and handed to a [`DrawBackend`] one by one. Radius and
//! thickness are derived from depth at dispatch time by [`DepthStyle`].

mod style;

use std::cmp::Ordering;

use glam::Vec2;

pub use style::DepthStyle;

use crate::options::Rgb;

/// Primitive rasterization consumed by the compositor.
///
/// Coordinates are canvas pixels with the origin in the top-left corner and
/// y pointing down. Implementations draw immediately or record; either way
/// calls must take effect in the order they are made.
pub trait DrawBackend {
    /// Fill a circle.
    fn fill_circle(&mut self, color: Rgb, center: Vec2, radius: f32);
    /// Draw a straight line with flat ends.
    fn draw_line(&mut self, color: Rgb, from: Vec2, to: Vec2, thickness: f32);
}

/// Geometry of a [`Primitive`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Backbone point, drawn as a filled circle.
    Dot {
        /// Circle center in canvas pixels.
        center: Vec2,
    },
    /// One half of a base-pair rung, drawn as a line.
    RungSegment {
        /// Rung midpoint.
        from: Vec2,
        /// Backbone end.
        to: Vec2,
    },
}

/// A depth-tagged drawable emitted for a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    /// Pseudo-depth in [-1, 1]; larger is closer to the viewer.
    pub depth: f32,
    /// Fill or stroke color.
    pub color: Rgb,
    /// What to draw.
    pub shape: Shape,
}

impl Primitive {
    /// Backbone dot at `center`.
    #[must_use]
    pub const fn dot(depth: f32, color: Rgb, center: Vec2) -> Self {
        Self {
            depth,
            color,
            shape: Shape::Dot { center },
        }
    }

    /// Rung half from `from` to `to`.
    #[must_use]
    pub const fn rung_segment(
        depth: f32,
        color: Rgb,
        from: Vec2,
        to: Vec2,
    ) -> Self {
        Self {
            depth,
            color,
            shape: Shape::RungSegment { from, to },
        }
    }

    /// Whether this is a backbone dot.
    #[must_use]
    pub const fn is_dot(&self) -> bool {
        matches!(self.shape, Shape::Dot { .. })
    }
}

/// A recorded draw call, as produced by the `Vec<DrawCall>` backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    /// [`DrawBackend::fill_circle`].
    Circle {
        /// Fill color.
        color: Rgb,
        /// Center in canvas pixels.
        center: Vec2,
        /// Radius in pixels.
        radius: f32,
    },
    /// [`DrawBackend::draw_line`].
    Line {
        /// Stroke color.
        color: Rgb,
        /// Start point.
        from: Vec2,
        /// End point.
        to: Vec2,
        /// Width in pixels.
        thickness: f32,
    },
}

/// Records calls instead of drawing them.
impl DrawBackend for Vec<DrawCall> {
    fn fill_circle(&mut self, color: Rgb, center: Vec2, radius: f32) {
        self.push(DrawCall::Circle {
            color,
            center,
            radius,
        });
    }

    fn draw_line(&mut self, color: Rgb, from: Vec2, to: Vec2, thickness: f32) {
        self.push(DrawCall::Line {
            color,
            from,
            to,
            thickness,
        });
    }
}

/// Painter's-algorithm compositor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Compositor {
    style: DepthStyle,
}

impl Compositor {
    /// Compositor using `style` for depth-derived sizes.
    #[must_use]
    pub const fn new(style: DepthStyle) -> Self {
        Self { style }
    }

    /// Depth styling in use.
    #[must_use]
    pub const fn style(&self) -> &DepthStyle {
        &self.style
    }

    /// Order `primitives` far to near.
    ///
    /// `slice::sort_by` is a stable sort, so equal depths keep insertion
    /// order and identical input always yields an identical frame.
    /// `-0.0` and `0.0` compare equal.
    pub fn sort_back_to_front(primitives: &mut [Primitive]) {
        primitives.sort_by(|a, b| {
            a.depth.partial_cmp(&b.depth).unwrap_or(Ordering::Equal)
        });
    }

    /// Sort `primitives` in place and draw every one of them.
    ///
    /// Returns the number of draw calls issued, always `primitives.len()`.
    pub fn composite<B: DrawBackend + ?Sized>(
        &self,
        primitives: &mut [Primitive],
        backend: &mut B,
    ) -> usize {
        Self::sort_back_to_front(primitives);
        for primitive in primitives.iter() {
            self.dispatch(primitive, backend);
        }
        primitives.len()
    }

    fn dispatch<B: DrawBackend + ?Sized>(
        &self,
        primitive: &Primitive,
        backend: &mut B,
    ) {
        match primitive.shape {
            Shape::Dot { center } => backend.fill_circle(
                primitive.color,
                center,
                self.style.dot_radius(primitive.depth),
            ),
            Shape::RungSegment { from, to } => backend.draw_line(
                primitive.color,
                from,
                to,
                self.style.rung_thickness(primitive.depth),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(depth: f32, color: Rgb) -> Primitive {
        Primitive::dot(depth, color, Vec2::new(10.0, 10.0))
    }

    fn colors(calls: &[DrawCall]) -> Vec<Rgb> {
        calls
            .iter()
            .map(|call| match *call {
                DrawCall::Circle { color, .. }
                | DrawCall::Line { color, .. } => color,
            })
            .collect()
    }

    #[test]
    fn draws_far_before_near() {
        let mut prims = vec![
            dot(0.9, Rgb::RED),
            dot(-0.7, Rgb::BLUE),
            dot(0.1, Rgb::GREEN),
        ];
        let mut calls: Vec<DrawCall> = Vec::new();
        let drawn = Compositor::default().composite(&mut prims, &mut calls);

        assert_eq!(drawn, 3);
        assert_eq!(colors(&calls), vec![Rgb::BLUE, Rgb::GREEN, Rgb::RED]);
    }

    #[test]
    fn equal_depths_keep_insertion_order() {
        let mut prims = vec![
            dot(0.5, Rgb::RED),
            dot(0.0, Rgb::PURPLE),
            dot(0.5, Rgb::BLUE),
            dot(-0.0, Rgb::CYAN),
            dot(0.5, Rgb::GREEN),
        ];
        let mut calls: Vec<DrawCall> = Vec::new();
        let _ = Compositor::default().composite(&mut prims, &mut calls);

        assert_eq!(
            colors(&calls),
            vec![Rgb::PURPLE, Rgb::CYAN, Rgb::RED, Rgb::BLUE, Rgb::GREEN]
        );
    }

    #[test]
    fn dispatches_by_kind_with_depth_styling() {
        let from = Vec2::new(400.0, 50.0);
        let to = Vec2::new(500.0, 50.0);
        let mut prims = vec![
            Primitive::rung_segment(0.0, Rgb::YELLOW, from, to),
            Primitive::dot(1.0, Rgb::WHITE, to),
        ];
        let mut calls: Vec<DrawCall> = Vec::new();
        let _ = Compositor::default().composite(&mut prims, &mut calls);

        assert_eq!(
            calls,
            vec![
                DrawCall::Line {
                    color: Rgb::YELLOW,
                    from,
                    to,
                    thickness: 2.0,
                },
                DrawCall::Circle {
                    color: Rgb::WHITE,
                    center: to,
                    radius: 12.0,
                },
            ]
        );
    }

    #[test]
    fn nothing_is_skipped_or_merged() {
        let mut prims = vec![dot(0.25, Rgb::RED); 40];
        let mut calls: Vec<DrawCall> = Vec::new();
        let drawn = Compositor::default().composite(&mut prims, &mut calls);
        assert_eq!(drawn, 40);
        assert_eq!(calls.len(), 40);
    }
}
