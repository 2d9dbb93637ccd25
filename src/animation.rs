//! Per-frame update-and-render entry point.
//!
//! [`HelixAnimation`] owns everything that survives between frames: the
//! rotation state, the resolved geometry, the compositor, and the reused
//! primitive buffer. It knows nothing about windows or GPUs; any
//! [`DrawBackend`] can receive its frames.

use crate::{
    compositor::{Compositor, DepthStyle, DrawBackend, Primitive},
    helix::{HelixGeometry, HelixState},
    options::{Options, OptionsError},
};

/// The rotating double helix.
#[derive(Debug, Clone)]
pub struct HelixAnimation {
    state: HelixState,
    geometry: HelixGeometry,
    compositor: Compositor,
    rotation_speed: f32,
    frame: Vec<Primitive>,
}

impl HelixAnimation {
    /// Validate `options` and build the animation at phase 0.
    ///
    /// # Errors
    ///
    /// Returns the first configuration invariant `options` violates.
    pub fn new(options: &Options) -> Result<Self, OptionsError> {
        options.validate()?;
        let geometry = HelixGeometry::from_options(options);
        let frame = Vec::with_capacity(geometry.primitive_count());
        log::info!(
            "helix: {} base pairs, radius {}, {} rad/frame",
            geometry.base_pairs(),
            options.helix.radius,
            options.helix.rotation_speed,
        );
        Ok(Self {
            state: HelixState::new(),
            geometry,
            compositor: Compositor::new(DepthStyle::from_options(
                &options.helix,
            )),
            rotation_speed: options.helix.rotation_speed,
            frame,
        })
    }

    /// Replace the rotation state, e.g. to start from a given phase.
    #[must_use]
    pub fn with_state(mut self, state: HelixState) -> Self {
        self.state = state;
        self
    }

    /// Current rotation state.
    #[must_use]
    pub const fn state(&self) -> &HelixState {
        &self.state
    }

    /// Resolved layout.
    #[must_use]
    pub const fn geometry(&self) -> &HelixGeometry {
        &self.geometry
    }

    /// Step the rotation by one frame.
    pub fn advance(&mut self) {
        self.state.advance(self.rotation_speed);
    }

    /// The current phase's primitives in emission order (unsorted).
    #[must_use]
    pub fn generate(&self) -> Vec<Primitive> {
        let mut out = Vec::with_capacity(self.geometry.primitive_count());
        self.geometry.emit_frame(self.state.phase(), &mut out);
        out
    }

    /// Draw the current phase back to front. Returns the number of draw
    /// calls issued.
    pub fn render<B: DrawBackend + ?Sized>(&mut self, backend: &mut B) -> usize {
        self.geometry
            .emit_frame(self.state.phase(), &mut self.frame);
        let drawn = self.compositor.composite(&mut self.frame, backend);
        log::trace!(
            "frame at phase {:.4}: {drawn} primitives",
            self.state.phase()
        );
        drawn
    }

    /// Advance one frame, then draw it.
    pub fn update_and_render<B: DrawBackend + ?Sized>(
        &mut self,
        backend: &mut B,
    ) -> usize {
        self.advance();
        self.render(backend)
    }
}
