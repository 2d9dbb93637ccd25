//! Orthographic projection of the double helix into canvas space.
//!
//! The helix axis is vertical. Each slot `i` sits at a fixed height and
//! carries two backbone points on opposite sides of the axis:
//!
//! ```text
//! angle_a = phase + i * twist        angle_b = angle_a + π
//! x       = center_x + radius * cos(angle)
//! y       = origin_y + i * spacing
//! depth   = sin(angle)               (1 = toward the viewer)
//! ```
//!
//! Rotation only changes `x` and `depth`; `y` is fixed per slot.

use std::f32::consts::PI;

use glam::Vec2;

use crate::{
    compositor::Primitive,
    options::{BasePairPalette, Options, Rgb},
};

/// Primitives emitted per slot: two rung halves and two backbone dots.
pub const PRIMITIVES_PER_SLOT: usize = 4;

/// One backbone point of a slot after projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrandPoint {
    /// Angle around the axis, in radians (unwrapped).
    pub angle: f32,
    /// Projected position in canvas pixels.
    pub position: Vec2,
    /// `sin(angle)`, in [-1, 1].
    pub depth: f32,
}

/// Layout constants and colors needed to emit a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HelixGeometry {
    center_x: f32,
    origin_y: i64,
    spacing: i64,
    radius: f32,
    twist: f32,
    base_pairs: u32,
    backbone: [Rgb; 2],
    palette: BasePairPalette,
}

impl HelixGeometry {
    /// Geometry for the configured canvas and helix.
    ///
    /// The helix is centered horizontally and its slots are centered
    /// vertically, using whole-pixel division for both.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        let helix = &options.helix;
        let spacing = i64::from(helix.pair_spacing);
        let span = i64::from(helix.base_pairs) * spacing;
        Self {
            center_x: options.canvas.center_x() as f32,
            origin_y: i64::from(options.canvas.height / 2) - span / 2,
            spacing,
            radius: helix.radius,
            twist: helix.twist_per_pair,
            base_pairs: helix.base_pairs,
            backbone: options.colors.backbone,
            palette: options.colors.base_pairs.clone(),
        }
    }

    /// Number of slots per frame.
    #[must_use]
    pub const fn base_pairs(&self) -> u32 {
        self.base_pairs
    }

    /// Number of primitives in every frame.
    #[must_use]
    pub const fn primitive_count(&self) -> usize {
        self.base_pairs as usize * PRIMITIVES_PER_SLOT
    }

    /// Rung colors, cycled by slot.
    #[must_use]
    pub const fn palette(&self) -> &BasePairPalette {
        &self.palette
    }

    /// Canvas y of `slot`.
    #[must_use]
    pub fn slot_y(&self, slot: u32) -> f32 {
        (self.origin_y + i64::from(slot) * self.spacing) as f32
    }

    fn project(&self, angle: f32, y: f32) -> StrandPoint {
        StrandPoint {
            angle,
            position: Vec2::new(self.center_x + self.radius * angle.cos(), y),
            depth: angle.sin(),
        }
    }

    /// The two backbone points of `slot` at `phase`. Strand B is always
    /// half a turn ahead of strand A.
    #[must_use]
    pub fn strand_points(&self, phase: f32, slot: u32) -> [StrandPoint; 2] {
        let y = self.slot_y(slot);
        let angle_a = phase + slot as f32 * self.twist;
        let angle_b = angle_a + PI;
        [self.project(angle_a, y), self.project(angle_b, y)]
    }

    /// Append the four primitives of `slot` to `out`: rung half A, rung
    /// half B, dot A, dot B.
    ///
    /// Both rung halves start at the midpoint between the strands and share
    /// the average depth of the two backbone points, so a rung always sorts
    /// as one unit.
    pub fn emit_slot(&self, phase: f32, slot: u32, out: &mut Vec<Primitive>) {
        let [a, b] = self.strand_points(phase, slot);
        let pair = self.palette.pair_for_slot(slot);
        let mid = (a.position + b.position) * 0.5;
        let rung_depth = (a.depth + b.depth) * 0.5;

        out.extend([
            Primitive::rung_segment(rung_depth, pair.a, mid, a.position),
            Primitive::rung_segment(rung_depth, pair.b, mid, b.position),
            Primitive::dot(a.depth, self.backbone[0], a.position),
            Primitive::dot(b.depth, self.backbone[1], b.position),
        ]);
    }

    /// Replace the contents of `out` with the whole frame at `phase`, in
    /// slot order.
    pub fn emit_frame(&self, phase: f32, out: &mut Vec<Primitive>) {
        out.clear();
        out.reserve(self.primitive_count());
        for slot in 0..self.base_pairs {
            self.emit_slot(phase, slot, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::TAU;

    use super::*;
    use crate::compositor::Shape;

    fn frame(geometry: &HelixGeometry, phase: f32) -> Vec<Primitive> {
        let mut out = Vec::new();
        geometry.emit_frame(phase, &mut out);
        out
    }

    fn default_geometry() -> HelixGeometry {
        HelixGeometry::from_options(&Options::default())
    }

    #[test]
    fn emits_four_primitives_per_slot() {
        for pairs in [1, 7, 20, 64] {
            let mut options = Options::default();
            options.helix.base_pairs = pairs;
            let geometry = HelixGeometry::from_options(&options);
            let prims = frame(&geometry, 1.234);

            let n = pairs as usize;
            assert_eq!(prims.len(), 4 * n);
            assert_eq!(prims.len(), geometry.primitive_count());
            assert_eq!(prims.iter().filter(|p| p.is_dot()).count(), 2 * n);
        }
    }

    #[test]
    fn strands_are_antipodal() {
        let geometry = default_geometry();
        for step in 0..50 {
            let phase = step as f32 * 0.13;
            for slot in 0..geometry.base_pairs() {
                let [a, b] = geometry.strand_points(phase, slot);
                assert!((b.angle - a.angle - PI).abs() < 1e-5);
                assert!(
                    (a.depth + b.depth).abs() < 1e-5,
                    "phase {phase} slot {slot}"
                );
            }
        }
    }

    #[test]
    fn depths_stay_in_unit_range() {
        let geometry = default_geometry();
        for step in 0..100 {
            let phase = step as f32 * TAU / 100.0;
            for prim in frame(&geometry, phase) {
                assert!((-1.0..=1.0).contains(&prim.depth));
            }
        }
    }

    #[test]
    fn rung_halves_share_average_depth() {
        let geometry = default_geometry();
        let prims = frame(&geometry, 0.8);
        for (slot, chunk) in prims.chunks(PRIMITIVES_PER_SLOT).enumerate() {
            let [a, b] = geometry.strand_points(0.8, slot as u32);
            let expected = (a.depth + b.depth) * 0.5;
            assert_eq!(chunk[0].depth, expected);
            assert_eq!(chunk[1].depth, expected);
            assert_eq!(chunk[2].depth, a.depth);
            assert_eq!(chunk[3].depth, b.depth);
        }
    }

    #[test]
    fn rung_halves_run_from_midpoint_to_each_strand() {
        let geometry = default_geometry();
        let prims = frame(&geometry, 2.0);
        let [a, b] = geometry.strand_points(2.0, 3);
        let slot = &prims[3 * PRIMITIVES_PER_SLOT..4 * PRIMITIVES_PER_SLOT];
        let mid = (a.position + b.position) * 0.5;

        assert_eq!(
            slot[0].shape,
            Shape::RungSegment {
                from: mid,
                to: a.position
            }
        );
        assert_eq!(
            slot[1].shape,
            Shape::RungSegment {
                from: mid,
                to: b.position
            }
        );
        assert_eq!(slot[2].shape, Shape::Dot { center: a.position });
        assert_eq!(slot[3].shape, Shape::Dot { center: b.position });
    }

    #[test]
    fn generation_is_deterministic() {
        let geometry = default_geometry();
        let first = frame(&geometry, 4.56);
        let second = frame(&geometry, 4.56);
        assert_eq!(first, second);
    }

    #[test]
    fn wrapped_phase_matches_unwrapped() {
        let geometry = default_geometry();
        let wrapped = frame(&geometry, 0.1);
        let unwrapped = frame(&geometry, TAU + 0.1);

        for (w, u) in wrapped.iter().zip(&unwrapped) {
            assert!((w.depth - u.depth).abs() < 1e-4);
            assert_eq!(w.color, u.color);
            match (w.shape, u.shape) {
                (Shape::Dot { center: cw }, Shape::Dot { center: cu }) => {
                    assert!(cw.abs_diff_eq(cu, 1e-3));
                }
                (
                    Shape::RungSegment { from: fw, to: tw },
                    Shape::RungSegment { from: fu, to: tu },
                ) => {
                    assert!(fw.abs_diff_eq(fu, 1e-3));
                    assert!(tw.abs_diff_eq(tu, 1e-3));
                }
                _ => panic!("primitive kinds diverged"),
            }
        }
    }

    #[test]
    fn reference_layout_at_phase_zero() {
        let geometry = default_geometry();
        let [a, b] = geometry.strand_points(0.0, 0);

        // 800x600 canvas, 20 pairs spaced 25 apart: origin 300 - 250.
        assert_eq!(geometry.slot_y(0), 50.0);
        assert_eq!(geometry.slot_y(19), 525.0);

        assert_eq!(a.angle, 0.0);
        assert_eq!(a.position, Vec2::new(500.0, 50.0));
        assert_eq!(a.depth, 0.0);

        assert!((b.angle - PI).abs() < 1e-7);
        assert!((b.position.x - 300.0).abs() < 1e-4);
        assert_eq!(b.position.y, 50.0);
        assert!(b.depth.abs() < 1e-6);

        let style = crate::compositor::DepthStyle::default();
        assert_eq!(style.dot_radius(a.depth), 8.0);
        assert!((style.dot_radius(b.depth) - 8.0).abs() < 1e-5);
    }

    #[test]
    fn palette_cycles_across_slots() {
        let geometry = default_geometry();
        let prims = frame(&geometry, 0.0);
        let pairs = geometry.palette().pairs();
        assert_eq!(pairs.len(), 4);

        for (slot, expected) in [0, 1, 2, 3, 0].into_iter().enumerate() {
            let base = slot * PRIMITIVES_PER_SLOT;
            assert_eq!(prims[base].color, pairs[expected].a);
            assert_eq!(prims[base + 1].color, pairs[expected].b);
        }
    }

    #[test]
    fn palette_is_stable_across_frames() {
        let geometry = default_geometry();
        let colors = |phase| -> Vec<Rgb> {
            frame(&geometry, phase).iter().map(|p| p.color).collect()
        };
        assert_eq!(colors(0.0), colors(3.3));
    }

    #[test]
    fn backbone_dots_use_strand_colors() {
        let geometry = default_geometry();
        let prims = frame(&geometry, 0.0);
        let options = Options::default();
        for chunk in prims.chunks(PRIMITIVES_PER_SLOT) {
            assert_eq!(chunk[2].color, options.colors.backbone[0]);
            assert_eq!(chunk[3].color, options.colors.backbone[1]);
        }
    }

    #[test]
    fn tall_helix_may_start_above_canvas() {
        let mut options = Options::default();
        options.helix.base_pairs = 40;
        options.helix.pair_spacing = 20;
        let geometry = HelixGeometry::from_options(&options);
        assert_eq!(geometry.slot_y(0), -100.0);
    }
}
