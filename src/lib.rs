// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! A rotating double helix drawn with nothing but filled circles and line
//! segments.
//!
//! Each frame the helix is sampled at a fixed number of base-pair slots,
//! projected orthographically onto the canvas, and the resulting
//! primitives are drawn back to front (painter's algorithm) so that the
//! strand facing the viewer occludes the one behind it.
//!
//! # Key entry points
//!
//! - [`animation::HelixAnimation`] - per-frame update-and-render against
//!   any [`compositor::DrawBackend`]
//! - [`helix::HelixGeometry`] - slot sampling and projection
//! - [`compositor::Compositor`] - stable depth sort and draw dispatch
//! - [`options::Options`] - TOML-backed configuration
//! - [`engine::HelixRenderEngine`] - wgpu presentation of the animation
//!
//! # Architecture
//!
//! The geometry and compositing core is pure and deterministic: given a
//! phase and options it always emits the same primitives in the same
//! order. Everything environment-dependent (window, GPU surface, frame
//! pacing, quit handling) lives in [`engine`] and, with the `viewer`
//! feature, in `viewer`.

pub mod animation;
pub mod compositor;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod helix;
pub mod options;
pub mod renderer;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use animation::HelixAnimation;
pub use compositor::{Compositor, DrawBackend, Primitive, Shape};
pub use engine::HelixRenderEngine;
pub use error::DuplexError;
pub use options::{Options, OptionsError, Rgb};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
