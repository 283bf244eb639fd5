/// A single acquired surface texture.
///
/// Short-lived: holding the surface texture prevents acquisition of the next
/// frame. `Gpu::clear_and_submit` consumes and presents it.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
}
