//! Instanced signed-distance shapes.
//!
//! Every `fill_circle`/`draw_line` call becomes one [`ShapeInstance`] in a
//! CPU-side list. [`ShapeRenderer::flush`] uploads the list and issues a
//! single `draw(0..6, 0..n)`. Instances rasterize in index order with alpha
//! blending and no depth test, so the on-screen stacking matches the call
//! order exactly.

use glam::Vec2;
use wgpu::util::DeviceExt;

use crate::{
    compositor::DrawBackend,
    error::DuplexError,
    gpu::{
        render_context::RenderContext,
        shader_composer::{Shader, ShaderComposer},
    },
    options::Rgb,
    renderer::{instance_buffer::InstanceBuffer, pipeline_util},
};

const VERTICES_PER_INSTANCE: u32 = 6;

/// Which distance function the fragment shader evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Filled circle around `endpoints.xy`.
    Disc,
    /// Flat-capped stroke from `endpoints.xy` to `endpoints.zw`.
    Segment,
}

impl ShapeKind {
    fn code(self) -> f32 {
        match self {
            Self::Disc => 0.0,
            Self::Segment => 1.0,
        }
    }
}

/// Per-instance data for the shape shader.
/// Must match the WGSL ShapeInstance struct layout exactly.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShapeInstance {
    /// Start (xy) and end (zw) in canvas pixels; equal for discs.
    pub endpoints: [f32; 4],
    /// RGBA as the shader should output it.
    pub color: [f32; 4],
    /// Radius or half thickness (x), kind code (y), zw unused.
    pub params: [f32; 4],
}

impl ShapeInstance {
    /// Filled disc.
    #[must_use]
    pub fn disc(center: Vec2, radius: f32, color: [f32; 4]) -> Self {
        Self {
            endpoints: [center.x, center.y, center.x, center.y],
            color,
            params: [radius, ShapeKind::Disc.code(), 0.0, 0.0],
        }
    }

    /// Stroke `thickness` pixels wide.
    #[must_use]
    pub fn segment(
        from: Vec2,
        to: Vec2,
        thickness: f32,
        color: [f32; 4],
    ) -> Self {
        Self {
            endpoints: [from.x, from.y, to.x, to.y],
            color,
            params: [thickness * 0.5, ShapeKind::Segment.code(), 0.0, 0.0],
        }
    }
}

/// Canvas size uniform: maps pixel coordinates to clip space.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct CanvasUniform {
    size: [f32; 2],
    _pad: [f32; 2],
}

/// Records draw calls as instances and renders them in one pass.
pub struct ShapeRenderer {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: InstanceBuffer,
    instance_layout: wgpu::BindGroupLayout,
    instance_bind_group: wgpu::BindGroup,
    canvas_bind_group: wgpu::BindGroup,
    instances: Vec<ShapeInstance>,
    linear_colors: bool,
}

impl ShapeRenderer {
    /// Renderer for a canvas of `canvas_size` pixels drawing into the
    /// context's surface format.
    ///
    /// # Errors
    ///
    /// Returns [`DuplexError::Shader`] if the shape shader fails to compose.
    pub fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
        canvas_size: (u32, u32),
    ) -> Result<Self, DuplexError> {
        let device = &context.device;

        let instance_buffer = InstanceBuffer::new(device);
        let instance_layout = Self::create_instance_layout(device);
        let instance_bind_group = Self::create_instance_bind_group(
            device,
            &instance_layout,
            &instance_buffer,
        );

        let canvas = CanvasUniform {
            size: [canvas_size.0 as f32, canvas_size.1 as f32],
            _pad: [0.0; 2],
        };
        let canvas_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Shape Canvas Buffer"),
                contents: bytemuck::cast_slice(&[canvas]),
                usage: wgpu::BufferUsages::UNIFORM,
            });
        let canvas_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Shape Canvas Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });
        let canvas_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Shape Canvas Bind Group"),
                layout: &canvas_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: canvas_buffer.as_entire_binding(),
                }],
            });

        let pipeline = Self::create_pipeline(
            context,
            shader_composer,
            &instance_layout,
            &canvas_layout,
        )?;

        Ok(Self {
            pipeline,
            instance_buffer,
            instance_layout,
            instance_bind_group,
            canvas_bind_group,
            instances: Vec::new(),
            linear_colors: context.is_srgb(),
        })
    }

    fn create_instance_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Shape Instance Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX
                    | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    }

    fn create_instance_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &InstanceBuffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Shape Instance Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.buffer().as_entire_binding(),
            }],
        })
    }

    fn create_pipeline(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
        instance_layout: &wgpu::BindGroupLayout,
        canvas_layout: &wgpu::BindGroupLayout,
    ) -> Result<wgpu::RenderPipeline, DuplexError> {
        let shader = shader_composer.compose(
            &context.device,
            "Shape Shader",
            Shader::Shape,
        )?;

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Shape Pipeline Layout"),
                bind_group_layouts: &[instance_layout, canvas_layout],
                push_constant_ranges: &[],
            },
        );

        Ok(context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Shape Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::surface_fragment_targets(
                        context.format(),
                    ),
                    compilation_options: Default::default(),
                }),
                primitive: pipeline_util::unculled_triangles(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            }))
    }

    /// Clear `view` to `clear`, then draw every pending instance in the
    /// order it was recorded.
    ///
    /// Returns the number of instances drawn. The pending list is empty
    /// afterwards.
    pub fn flush(
        &mut self,
        context: &RenderContext,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        clear: wgpu::Color,
    ) -> u32 {
        let count = self.instances.len() as u32;
        let reallocated = self.instance_buffer.upload(
            &context.device,
            &context.queue,
            &self.instances,
        );
        if reallocated {
            log::debug!(
                "shape buffer grew to {} instances",
                self.instance_buffer.capacity()
            );
            self.instance_bind_group = Self::create_instance_bind_group(
                &context.device,
                &self.instance_layout,
                &self.instance_buffer,
            );
        }

        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Shape Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(clear),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });

            if count > 0 {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.instance_bind_group, &[]);
                pass.set_bind_group(1, &self.canvas_bind_group, &[]);
                pass.draw(0..VERTICES_PER_INSTANCE, 0..count);
            }
        }

        self.instances.clear();
        count
    }
}

impl DrawBackend for ShapeRenderer {
    fn fill_circle(&mut self, color: Rgb, center: Vec2, radius: f32) {
        self.instances.push(ShapeInstance::disc(
            center,
            radius,
            color.to_rgba(self.linear_colors),
        ));
    }

    fn draw_line(&mut self, color: Rgb, from: Vec2, to: Vec2, thickness: f32) {
        self.instances.push(ShapeInstance::segment(
            from,
            to,
            thickness,
            color.to_rgba(self.linear_colors),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(inst: &ShapeInstance) -> ShapeKind {
        if inst.params[1] < 0.5 {
            ShapeKind::Disc
        } else {
            ShapeKind::Segment
        }
    }

    #[test]
    fn instance_matches_wgsl_layout() {
        assert_eq!(size_of::<ShapeInstance>(), 48);
        assert_eq!(size_of::<CanvasUniform>(), 16);
    }

    #[test]
    fn disc_collapses_endpoints() {
        let inst = ShapeInstance::disc(
            Vec2::new(400.0, 50.0),
            12.0,
            Rgb::WHITE.to_rgba(false),
        );
        assert_eq!(inst.endpoints, [400.0, 50.0, 400.0, 50.0]);
        assert_eq!(inst.params[0], 12.0);
        assert_eq!(kind(&inst), ShapeKind::Disc);
        assert_eq!(inst.color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn segment_stores_half_thickness() {
        let inst = ShapeInstance::segment(
            Vec2::new(400.0, 75.0),
            Vec2::new(495.5, 75.0),
            3.0,
            Rgb::BLUE.to_rgba(false),
        );
        assert_eq!(inst.endpoints, [400.0, 75.0, 495.5, 75.0]);
        assert_eq!(inst.params[0], 1.5);
        assert_eq!(kind(&inst), ShapeKind::Segment);
    }

    #[test]
    fn instances_pack_into_bytes_in_order() {
        let instances = [
            ShapeInstance::disc(Vec2::ZERO, 4.0, [0.0; 4]),
            ShapeInstance::segment(Vec2::ZERO, Vec2::ONE, 2.0, [0.0; 4]),
        ];
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 96);
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        // params.y of the second instance
        assert_eq!(floats[12 + 8 + 1], 1.0);
    }
}
