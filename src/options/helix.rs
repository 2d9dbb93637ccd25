use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Helix", inline)]
#[serde(default)]
/// Helix layout, rotation, and depth styling parameters.
pub struct HelixOptions {
    /// Distance from the helix axis to each backbone strand, in pixels.
    #[schemars(title = "Radius", range(min = 10.0, max = 300.0), extend("step" = 1.0))]
    pub radius: f32,
    /// Number of base-pair slots along the axis.
    #[schemars(title = "Base Pairs", range(min = 1, max = 100))]
    pub base_pairs: u32,
    /// Vertical distance between neighbouring slots, in pixels.
    #[schemars(title = "Pair Spacing", range(min = 1, max = 100))]
    pub pair_spacing: u32,
    /// Angle added per slot, in radians. Controls how tightly the helix is
    /// wound.
    #[schemars(title = "Twist", range(min = 0.0, max = 1.5), extend("step" = 0.01))]
    pub twist_per_pair: f32,
    /// Phase increment per frame, in radians.
    #[schemars(title = "Rotation Speed", range(min = -0.2, max = 0.2), extend("step" = 0.005))]
    pub rotation_speed: f32,
    /// Backbone dot radius at depth 0, in pixels.
    #[schemars(title = "Dot Radius", range(min = 1.0, max = 30.0), extend("step" = 0.5))]
    pub dot_radius_base: f32,
    /// Radius change between depth 0 and depth ±1.
    #[schemars(title = "Dot Depth Scale", range(min = 0.0, max = 15.0), extend("step" = 0.5))]
    pub dot_radius_depth_factor: f32,
    /// Rung line thickness at depth 0, in pixels.
    #[schemars(skip)]
    pub rung_thickness_base: f32,
    /// Thickness change between depth 0 and depth ±1.
    #[schemars(skip)]
    pub rung_thickness_depth_factor: f32,
}

impl Default for HelixOptions {
    fn default() -> Self {
        Self {
            radius: 100.0,
            base_pairs: 20,
            pair_spacing: 25,
            twist_per_pair: 0.3,
            rotation_speed: 0.01,
            dot_radius_base: 8.0,
            dot_radius_depth_factor: 4.0,
            rung_thickness_base: 2.0,
            rung_thickness_depth_factor: 1.5,
        }
    }
}
