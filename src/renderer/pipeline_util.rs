/// Single color target writing straight to the swapchain.
///
/// Alpha blending lets each shape's antialiased edge fall over whatever was
/// drawn before it.
pub(crate) fn surface_fragment_targets(
    format: wgpu::TextureFormat,
) -> [Option<wgpu::ColorTargetState>; 1] {
    [Some(wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
        write_mask: wgpu::ColorWrites::ALL,
    })]
}

/// Instanced quads may be wound either way depending on segment direction.
pub(crate) fn unculled_triangles() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        cull_mode: None,
        ..Default::default()
    }
}
