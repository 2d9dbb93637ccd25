//! The window surface and the device that draws into it.
//!
//! There is exactly one surface, sized to the window, and every frame is a
//! single clear-and-draw pass. [`RenderContext::begin_frame`] hands out the
//! swapchain view together with a fresh encoder; [`RenderContext::finish_frame`]
//! submits and presents.

use std::fmt;

/// GPU setup failures. All of them are fatal at startup.
#[derive(Debug)]
pub enum GpuInitError {
    /// The window handle could not back a surface.
    Surface(wgpu::CreateSurfaceError),
    /// No adapter can present to the surface.
    Adapter(wgpu::RequestAdapterError),
    /// The adapter refused the device request.
    Device(wgpu::RequestDeviceError),
    /// The surface reports no texture formats for this adapter.
    NoSurfaceFormat,
}

impl fmt::Display for GpuInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(e) => write!(f, "cannot create surface: {e}"),
            Self::Adapter(e) => write!(f, "no usable GPU adapter: {e}"),
            Self::Device(e) => write!(f, "GPU device request failed: {e}"),
            Self::NoSurfaceFormat => {
                write!(f, "surface has no formats for this adapter")
            }
        }
    }
}

impl std::error::Error for GpuInitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(e) => Some(e),
            Self::Adapter(e) => Some(e),
            Self::Device(e) => Some(e),
            Self::NoSurfaceFormat => None,
        }
    }
}

/// Pick the surface format: the first sRGB one, else whatever comes first.
fn preferred_format(
    formats: &[wgpu::TextureFormat],
) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(wgpu::TextureFormat::is_srgb)
        .or_else(|| formats.first().copied())
}

/// One acquired swapchain image plus the encoder recording into it.
pub struct Frame {
    texture: wgpu::SurfaceTexture,
    /// Render target view of the swapchain image.
    pub view: wgpu::TextureView,
    /// Encoder for this frame's passes.
    pub encoder: wgpu::CommandEncoder,
}

/// Device, queue, and the single window surface.
pub struct RenderContext {
    /// Logical device.
    pub device: wgpu::Device,
    /// Submission queue.
    pub queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

impl RenderContext {
    /// Context presenting to `window` at `size` physical pixels, vsynced.
    ///
    /// # Errors
    ///
    /// Returns [`GpuInitError`] if any step of surface, adapter, or device
    /// setup fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
    ) -> Result<Self, GpuInitError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(GpuInitError::Surface)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(GpuInitError::Adapter)?;
        let info = adapter.get_info();
        log::info!("GPU adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Helix Device"),
                required_limits: wgpu::Limits::downlevel_defaults(),
                ..Default::default()
            })
            .await
            .map_err(GpuInitError::Device)?;

        let caps = surface.get_capabilities(&adapter);
        let format = preferred_format(&caps.formats)
            .ok_or(GpuInitError::NoSurfaceFormat)?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.0.max(1),
            height: size.1.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            desired_maximum_frame_latency: 2,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: Vec::new(),
        };
        surface.configure(&device, &config);

        Ok(Self {
            device,
            queue,
            surface,
            config,
        })
    }

    /// Swapchain texture format.
    #[must_use]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Whether the swapchain encodes to sRGB on write, so colors must be
    /// handed to it linear.
    #[must_use]
    pub fn is_srgb(&self) -> bool {
        self.config.format.is_srgb()
    }

    /// Reconfigure the surface at `width`x`height`. Zero sizes (minimized
    /// windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Acquire the next swapchain image and start recording.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if no image can be acquired; `Lost`
    /// and `Outdated` are cured by [`resize`](Self::resize).
    pub fn begin_frame(&self) -> Result<Frame, wgpu::SurfaceError> {
        let texture = self.surface.get_current_texture()?;
        let view = texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder =
            self.device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Frame Encoder"),
                });
        Ok(Frame {
            texture,
            view,
            encoder,
        })
    }

    /// Submit everything recorded into `frame` and present it.
    pub fn finish_frame(&self, frame: Frame) {
        let Frame {
            texture, encoder, ..
        } = frame;
        let _ = self.queue.submit(std::iter::once(encoder.finish()));
        texture.present();
    }
}

#[cfg(test)]
mod tests {
    use wgpu::TextureFormat;

    use super::*;

    #[test]
    fn prefers_srgb_format() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(
            preferred_format(&formats),
            Some(TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [TextureFormat::Rgba8Unorm, TextureFormat::Bgra8Unorm];
        assert_eq!(preferred_format(&formats), Some(TextureFormat::Rgba8Unorm));
    }

    #[test]
    fn no_formats_means_no_surface() {
        assert_eq!(preferred_format(&[]), None);
    }
}
