//! GPU rendering of compositor output.
//!
//! The helix is flat 2D art, so a single instanced pass of signed-distance
//! discs and segments is all the renderer needs.

mod instance_buffer;
pub(crate) mod pipeline_util;
pub mod shapes;

pub use shapes::{ShapeInstance, ShapeKind, ShapeRenderer};
