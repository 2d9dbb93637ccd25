use crate::options::HelixOptions;

/// Smallest radius or thickness a primitive is drawn with.
const MIN_EXTENT: f32 = 1.0;

/// Linear depth → size mapping that sells the 3D illusion.
///
/// Near primitives (depth → 1) are drawn larger, far ones smaller. Results
/// are clamped to at least one pixel so nothing vanishes at any depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthStyle {
    /// Dot radius at depth 0.
    pub dot_radius_base: f32,
    /// Dot radius change per unit depth.
    pub dot_radius_depth_factor: f32,
    /// Rung thickness at depth 0.
    pub rung_thickness_base: f32,
    /// Rung thickness change per unit depth.
    pub rung_thickness_depth_factor: f32,
}

impl DepthStyle {
    /// Styling constants from the helix options.
    #[must_use]
    pub fn from_options(helix: &HelixOptions) -> Self {
        Self {
            dot_radius_base: helix.dot_radius_base,
            dot_radius_depth_factor: helix.dot_radius_depth_factor,
            rung_thickness_base: helix.rung_thickness_base,
            rung_thickness_depth_factor: helix.rung_thickness_depth_factor,
        }
    }

    /// Backbone dot radius in pixels. Sub-pixel radii are kept; the
    /// rasterizer antialiases the edge.
    #[must_use]
    pub fn dot_radius(&self, depth: f32) -> f32 {
        (self.dot_radius_base + depth * self.dot_radius_depth_factor)
            .max(MIN_EXTENT)
    }

    /// Rung line thickness in whole pixels (rounded).
    #[must_use]
    pub fn rung_thickness(&self, depth: f32) -> f32 {
        (self.rung_thickness_base + depth * self.rung_thickness_depth_factor)
            .round()
            .max(MIN_EXTENT)
    }
}

impl Default for DepthStyle {
    fn default() -> Self {
        Self::from_options(&HelixOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sizes_at_reference_depths() {
        let style = DepthStyle::default();
        assert_eq!(style.dot_radius(0.0), 8.0);
        assert_eq!(style.dot_radius(1.0), 12.0);
        assert_eq!(style.dot_radius(-1.0), 4.0);
        assert!((style.dot_radius(0.5) - 10.0).abs() < 1e-6);

        assert_eq!(style.rung_thickness(0.0), 2.0);
        assert_eq!(style.rung_thickness(1.0), 4.0);
        assert_eq!(style.rung_thickness(-1.0), 1.0);
        assert_eq!(style.rung_thickness(0.4), 3.0);
    }

    #[test]
    fn sizes_never_drop_below_one() {
        let style = DepthStyle {
            dot_radius_base: 1.0,
            dot_radius_depth_factor: 10.0,
            rung_thickness_base: 0.0,
            rung_thickness_depth_factor: 5.0,
        };
        for step in -20..=20 {
            let depth = step as f32 / 20.0;
            assert!(style.dot_radius(depth) >= 1.0, "depth {depth}");
            assert!(style.rung_thickness(depth) >= 1.0, "depth {depth}");
        }
    }
}
