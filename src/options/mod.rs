//! Centralized animation options with TOML file support.
//!
//! Canvas size, helix layout, rotation speed, depth styling, colors, and
//! keybindings are consolidated here. Options are loaded once at startup
//! and validated before the first frame; the frame loop never sees an
//! invalid configuration.

mod canvas;
mod colors;
mod helix;
mod keybindings;

use std::{fmt, path::Path};

pub use canvas::CanvasOptions;
pub use colors::{BasePair, BasePairPalette, ColorOptions, Rgb};
pub use helix::HelixOptions;
pub use keybindings::{KeyAction, KeybindingOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::DuplexError;

/// Configuration invariant violations, reported at startup.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionsError {
    /// The base-pair palette has no entries.
    EmptyPalette,
    /// `helix.base_pairs` is zero.
    NoBasePairs,
    /// The canvas has a zero dimension.
    EmptyCanvas {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// A numeric option is NaN or infinite.
    NonFinite {
        /// Dotted option path.
        field: &'static str,
        /// Offending value.
        value: f32,
    },
    /// A numeric option that must be strictly positive is not.
    NonPositive {
        /// Dotted option path.
        field: &'static str,
        /// Offending value.
        value: f32,
    },
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPalette => {
                write!(f, "colors.base_pairs must contain at least one pair")
            }
            Self::NoBasePairs => {
                write!(f, "helix.base_pairs must be greater than zero")
            }
            Self::EmptyCanvas { width, height } => {
                write!(f, "canvas must be non-empty, got {width}x{height}")
            }
            Self::NonFinite { field, value } => {
                write!(f, "{field} must be finite, got {value}")
            }
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
        }
    }
}

impl std::error::Error for OptionsError {}

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[helix]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Canvas size, title, and frame rate.
    pub canvas: CanvasOptions,
    /// Helix layout, rotation, and depth styling.
    pub helix: HelixOptions,
    /// Background, backbone, and base-pair colors.
    #[schemars(skip)]
    pub colors: ColorOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the numeric option sections.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file and validate them. Missing fields use
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DuplexError::Io`] if the file cannot be read,
    /// [`DuplexError::OptionsParse`] if it is not valid options TOML, and
    /// [`DuplexError::InvalidOptions`] if a value violates an invariant.
    pub fn load(path: &Path) -> Result<Self, DuplexError> {
        let content = std::fs::read_to_string(path).map_err(DuplexError::Io)?;
        let mut options: Self = toml::from_str(&content)
            .map_err(|e| DuplexError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`DuplexError::OptionsParse`] if serialization fails and
    /// [`DuplexError::Io`] if the file or its parent directory cannot be
    /// written.
    pub fn save(&self, path: &Path) -> Result<(), DuplexError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DuplexError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(DuplexError::Io)?;
        }
        std::fs::write(path, content).map_err(DuplexError::Io)
    }

    /// Check every configuration invariant the frame loop relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let canvas = &self.canvas;
        if canvas.width == 0 || canvas.height == 0 {
            return Err(OptionsError::EmptyCanvas {
                width: canvas.width,
                height: canvas.height,
            });
        }

        let helix = &self.helix;
        if helix.base_pairs == 0 {
            return Err(OptionsError::NoBasePairs);
        }
        if self.colors.base_pairs.is_empty() {
            return Err(OptionsError::EmptyPalette);
        }

        let finite = [
            ("helix.radius", helix.radius),
            ("helix.twist_per_pair", helix.twist_per_pair),
            ("helix.rotation_speed", helix.rotation_speed),
            ("helix.dot_radius_base", helix.dot_radius_base),
            ("helix.dot_radius_depth_factor", helix.dot_radius_depth_factor),
            ("helix.rung_thickness_base", helix.rung_thickness_base),
            (
                "helix.rung_thickness_depth_factor",
                helix.rung_thickness_depth_factor,
            ),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(OptionsError::NonFinite { field, value });
            }
        }

        if helix.radius <= 0.0 {
            return Err(OptionsError::NonPositive {
                field: "helix.radius",
                value: helix.radius,
            });
        }
        Ok(())
    }
}
