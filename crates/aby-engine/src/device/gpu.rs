use aby_diag::ErrorAggregator;
use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface;
use super::{GpuFrame, GpuInit, SurfaceErrorAction};

/// Owns wgpu core objects and the surface configuration.
///
/// This type is the whole graphics context of a window:
/// - creates and stores Adapter/Device/Queue
/// - creates and configures the Surface (swapchain)
/// - owns the multisampled color target when MSAA is on
/// - clears and presents frames
pub struct Gpu<'w> {
    /// Surface bound to the window.
    ///
    /// Surface lifetime is tied to the window; the runtime keeps the window
    /// alive for as long as the `Gpu` exists.
    surface: wgpu::Surface<'w>,

    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Present modes the surface supports, for vsync switching.
    present_modes: Vec<wgpu::PresentMode>,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,

    vsync: bool,
    sample_count: u32,

    /// Multisampled color target resolved into the surface texture.
    msaa_view: Option<wgpu::TextureView>,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to a window.
    ///
    /// Unmet preferences (sRGB, vsync off, MSAA count) are not errors: they
    /// are recorded as warnings under a `gpu` context folded into `diag`.
    pub async fn new(
        window: &'w Window,
        init: GpuInit,
        vsync: bool,
        samples: u32,
        diag: &mut ErrorAggregator,
    ) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let mut warnings = ErrorAggregator::new("gpu");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: init.backends,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("aby-engine device"),
                required_features: init.required_features,
                required_limits: init.required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps.formats, init.prefer_srgb)
            .context("no supported surface formats")?;
        if init.prefer_srgb && !format.is_srgb() {
            warnings.add_warning(format!("no sRGB surface format, using {format:?}"));
        }

        let alpha_mode = surface::choose_alpha_mode(&caps.alpha_modes, init.alpha_mode);
        if let Some(requested) = init.alpha_mode.filter(|m| *m != alpha_mode) {
            warnings.add_warning(format!("alpha mode {requested:?} unsupported, using {alpha_mode:?}"));
        }

        let present = surface::choose_present_mode(&caps.present_modes, vsync);
        if present.fallback {
            warnings.add_warning("surface cannot present without vsync, keeping vsync on");
        }

        let features = adapter.get_texture_format_features(format);
        let sample_count =
            surface::choose_sample_count(samples, |n| features.flags.sample_count_supported(n));
        if sample_count < samples.max(1) {
            warnings.add_warning(format!(
                "{samples}x MSAA unsupported for {format:?}, using {sample_count}x"
            ));
        }

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: present.mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);

        let mut gpu = Gpu {
            surface,
            adapter,
            device,
            queue,
            config,
            present_modes: caps.present_modes,
            size,
            vsync: present.mode == wgpu::PresentMode::Fifo,
            sample_count,
            msaa_view: None,
        };
        gpu.rebuild_msaa_target();

        log::info!("graphics: {}", gpu.adapter_summary());
        log::debug!(
            "surface {:?} {}x{} {:?}, {}x MSAA",
            gpu.config.format,
            gpu.config.width,
            gpu.config.height,
            gpu.config.present_mode,
            gpu.sample_count
        );

        diag.push_from(&warnings);
        diag.fold();

        Ok(gpu)
    }

    /// Backend, adapter and driver, on one line.
    pub fn adapter_summary(&self) -> String {
        let info = self.adapter.get_info();
        surface::describe_adapter(
            &format!("{:?}", info.backend),
            &info.name,
            &info.driver,
            &info.driver_info,
        )
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn vsync(&self) -> bool {
        self.vsync
    }

    /// Effective MSAA sample count; 1 when MSAA is off.
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Switches the present mode. When the surface cannot turn vsync off a
    /// warning lands in `diag` under a `vsync` context and vsync stays on.
    pub fn set_vsync(&mut self, enabled: bool, diag: &mut ErrorAggregator) {
        let present = surface::choose_present_mode(&self.present_modes, enabled);
        if present.fallback {
            log::warn!("surface cannot present without vsync, keeping vsync on");
            diag.push("vsync");
            diag.add_warning("surface cannot present without vsync, keeping vsync on");
            diag.fold();
        }

        self.vsync = present.mode == wgpu::PresentMode::Fifo;
        if self.config.present_mode == present.mode {
            return;
        }

        self.config.present_mode = present.mode;
        if self.size.width > 0 && self.size.height > 0 {
            self.surface.configure(&self.device, &self.config);
        }
        log::debug!("present mode set to {:?}", present.mode);
    }

    /// Reconfigures the surface after a resize.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let configured = surface::apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            new_size,
        );
        if configured {
            self.rebuild_msaa_target();
        }
    }

    /// Acquires the next surface texture.
    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Ok(GpuFrame { surface_texture, view })
    }

    /// Clears `frame` to `color`, submits, and presents it.
    pub fn clear_and_submit(&self, frame: GpuFrame, color: wgpu::Color) {
        let GpuFrame { surface_texture, view: frame_view } = frame;

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("aby frame encoder"),
            });

        // With MSAA the multisampled target is cleared and resolved into the
        // surface texture.
        let (view, resolve_target) = match &self.msaa_view {
            Some(msaa) => (msaa, Some(&frame_view)),
            None => (&frame_view, None),
        };

        {
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("aby clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(frame_view);
        surface_texture.present();
    }

    /// Converts a `SurfaceError` into a higher-level action.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        let action =
            surface::map_surface_error(&self.surface, &self.device, &self.config, self.size, err);
        if action == SurfaceErrorAction::Reconfigured {
            self.rebuild_msaa_target();
        }
        action
    }

    fn rebuild_msaa_target(&mut self) {
        if self.sample_count <= 1 {
            self.msaa_view = None;
            return;
        }

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("aby msaa color"),
            size: wgpu::Extent3d {
                width: self.config.width,
                height: self.config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: self.sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: self.config.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        self.msaa_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
    }
}
