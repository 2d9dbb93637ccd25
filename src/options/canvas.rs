use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Canvas", inline)]
#[serde(default)]
/// Drawing surface size, window title, and frame rate.
pub struct CanvasOptions {
    /// Canvas width in pixels. Primitive coordinates are in this space.
    #[schemars(title = "Width", range(min = 1))]
    pub width: u32,
    /// Canvas height in pixels.
    #[schemars(title = "Height", range(min = 1))]
    pub height: u32,
    /// Target frames per second (0 = unlimited).
    #[schemars(title = "Target FPS", range(min = 0, max = 240))]
    pub target_fps: u32,
    /// Window title.
    #[schemars(skip)]
    pub title: String,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            target_fps: 60,
            title: "DNA Animation".to_owned(),
        }
    }
}

impl CanvasOptions {
    /// Horizontal axis of the helix, in whole pixels.
    #[must_use]
    pub fn center_x(&self) -> u32 {
        self.width / 2
    }
}
