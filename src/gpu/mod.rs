//! GPU setup and shader composition.

/// Device, queue, and window surface.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
