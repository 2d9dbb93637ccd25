//! GPU presentation of the helix animation.
//!
//! [`HelixRenderEngine`] ties the pure animation core to a wgpu surface:
//! each paced frame it advances the rotation, composites into the
//! [`ShapeRenderer`], and presents.

use crate::{
    animation::HelixAnimation,
    error::DuplexError,
    gpu::{render_context::RenderContext, shader_composer::ShaderComposer},
    options::Options,
    renderer::ShapeRenderer,
    util::frame_timing::FrameTiming,
};

/// Owns the GPU context, the shape renderer, and the animation.
pub struct HelixRenderEngine {
    context: RenderContext,
    shapes: ShapeRenderer,
    animation: HelixAnimation,
    frame_timing: FrameTiming,
    clear_color: wgpu::Color,
}

impl HelixRenderEngine {
    /// Engine drawing into `window` at `size` physical pixels.
    ///
    /// # Errors
    ///
    /// Returns [`DuplexError`] if `options` are invalid, GPU initialization
    /// fails, or the shape shader does not compose.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: &Options,
    ) -> Result<Self, DuplexError> {
        let animation = HelixAnimation::new(options)?;
        let context = RenderContext::new(window, size).await?;

        let mut shader_composer = ShaderComposer::new()?;
        let canvas = (options.canvas.width, options.canvas.height);
        let shapes = ShapeRenderer::new(&context, &mut shader_composer, canvas)?;
        let clear_color =
            options.colors.background.to_clear_color(context.is_srgb());

        log::info!(
            "engine ready: {}x{} canvas, surface {:?}, {} fps target",
            canvas.0,
            canvas.1,
            context.format(),
            options.canvas.target_fps,
        );

        Ok(Self {
            context,
            shapes,
            animation,
            frame_timing: FrameTiming::new(options.canvas.target_fps),
            clear_color,
        })
    }

    /// The animation being presented.
    #[must_use]
    pub const fn animation(&self) -> &HelixAnimation {
        &self.animation
    }

    /// Whether the next frame is due.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.frame_timing.should_render()
    }

    /// When the next frame is due.
    #[must_use]
    pub fn next_frame_at(&self) -> web_time::Instant {
        self.frame_timing.next_frame_at()
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Advance one frame and present it, if the frame is due.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain image cannot be
    /// acquired. The animation does not advance in that case.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if !self.frame_timing.should_render() {
            return Ok(());
        }

        let mut frame = self.context.begin_frame()?;
        let _ = self.animation.update_and_render(&mut self.shapes);
        let _ = self.shapes.flush(
            &self.context,
            &mut frame.encoder,
            &frame.view,
            self.clear_color,
        );
        self.context.finish_frame(frame);

        self.frame_timing.end_frame();
        Ok(())
    }

    /// Reconfigure the surface for a new window size. The canvas keeps its
    /// configured pixel coordinates and is scaled to fill the surface.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            log::debug!("surface resized to {width}x{height}");
            self.context.resize(width, height);
        }
    }
}
