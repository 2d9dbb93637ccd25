use serde::{Deserialize, Serialize};

use super::OptionsError;

/// An 8-bit-per-channel sRGB color.
///
/// Serialized as a plain `[r, g, b]` array so TOML stays compact:
/// ```toml
/// background = [0, 0, 0]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Soft red.
    pub const RED: Self = Self::new(255, 100, 100);
    /// Soft green.
    pub const GREEN: Self = Self::new(100, 255, 100);
    /// Soft blue.
    pub const BLUE: Self = Self::new(100, 100, 255);
    /// Soft yellow.
    pub const YELLOW: Self = Self::new(255, 255, 100);
    /// Dark purple.
    pub const PURPLE: Self = Self::new(150, 0, 150);
    /// Dark cyan.
    pub const CYAN: Self = Self::new(0, 150, 150);

    /// Color from its three channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Opaque RGBA in [0, 1].
    ///
    /// With `linear` set the channels are decoded from sRGB, which is what
    /// an sRGB render target expects to receive.
    #[must_use]
    pub fn to_rgba(self, linear: bool) -> [f32; 4] {
        let channel = |c: u8| {
            let v = f32::from(c) / 255.0;
            if linear {
                srgb_to_linear(v)
            } else {
                v
            }
        };
        [channel(self.r), channel(self.g), channel(self.b), 1.0]
    }

    /// Opaque `wgpu::Color` for clearing a render target.
    #[must_use]
    pub fn to_clear_color(self, linear: bool) -> wgpu::Color {
        let [r, g, b, a] = self.to_rgba(linear);
        wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: f64::from(a),
        }
    }
}

fn srgb_to_linear(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// The two base colors of one rung, one per half-segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasePair {
    /// Color of the half-rung attached to strand A.
    pub a: Rgb,
    /// Color of the half-rung attached to strand B.
    pub b: Rgb,
}

impl BasePair {
    /// Pair from its two base colors.
    #[must_use]
    pub const fn new(a: Rgb, b: Rgb) -> Self {
        Self { a, b }
    }
}

/// Non-empty, cyclically indexed list of base-pair colors.
///
/// Emptiness is rejected at construction and when deserializing, so
/// [`pair_for_slot`](Self::pair_for_slot) never has to handle it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<BasePair>", into = "Vec<BasePair>")]
pub struct BasePairPalette {
    pairs: Vec<BasePair>,
}

impl BasePairPalette {
    /// Palette from an ordered list of pairs.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::EmptyPalette`] if `pairs` is empty.
    pub fn new(pairs: Vec<BasePair>) -> Result<Self, OptionsError> {
        if pairs.is_empty() {
            return Err(OptionsError::EmptyPalette);
        }
        Ok(Self { pairs })
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the palette has no entries; never true once constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Palette index used by `slot` (`slot mod len`).
    #[must_use]
    pub fn index_for_slot(&self, slot: u32) -> usize {
        slot as usize % self.pairs.len()
    }

    /// Colors used by `slot`. Stable across frames.
    #[must_use]
    pub fn pair_for_slot(&self, slot: u32) -> BasePair {
        self.pairs[self.index_for_slot(slot)]
    }

    /// All entries in order.
    #[must_use]
    pub fn pairs(&self) -> &[BasePair] {
        &self.pairs
    }
}

impl Default for BasePairPalette {
    /// A-T / G-C inspired pairs.
    fn default() -> Self {
        Self {
            pairs: vec![
                BasePair::new(Rgb::RED, Rgb::YELLOW),
                BasePair::new(Rgb::BLUE, Rgb::GREEN),
                BasePair::new(Rgb::PURPLE, Rgb::CYAN),
                BasePair::new(Rgb::YELLOW, Rgb::RED),
            ],
        }
    }
}

impl TryFrom<Vec<BasePair>> for BasePairPalette {
    type Error = OptionsError;

    fn try_from(pairs: Vec<BasePair>) -> Result<Self, Self::Error> {
        Self::new(pairs)
    }
}

impl From<BasePairPalette> for Vec<BasePair> {
    fn from(palette: BasePairPalette) -> Self {
        palette.pairs
    }
}

/// Color options for the background, backbone strands, and rungs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ColorOptions {
    /// Canvas clear color.
    pub background: Rgb,
    /// Dot colors for strand A and strand B. Kept slightly different so
    /// the strands stay distinguishable.
    pub backbone: [Rgb; 2],
    /// Rung colors, cycled by slot index.
    pub base_pairs: BasePairPalette,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            background: Rgb::BLACK,
            backbone: [Rgb::WHITE, Rgb::new(200, 200, 200)],
            base_pairs: BasePairPalette::default(),
        }
    }
}
