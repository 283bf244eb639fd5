use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

/// MSAA sample counts tried, highest first.
const SAMPLE_COUNTS: [u32; 4] = [16, 8, 4, 2];

pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let first = *formats.first()?;

    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        if let Some(f) = preferred.into_iter().find(|f| formats.contains(f)) {
            return Some(f);
        }
    }

    Some(first)
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Present mode picked for a vsync setting.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PresentChoice {
    pub mode: wgpu::PresentMode,
    /// True when the surface could not honor the request and vsync stays on.
    pub fallback: bool,
}

/// Picks the present mode for `vsync`.
///
/// Vsync on is `Fifo`, which every surface supports. Vsync off prefers
/// `Immediate`, then `Mailbox` (no tearing, no blocking), and falls back to
/// `Fifo` when neither is available.
pub fn choose_present_mode(supported: &[wgpu::PresentMode], vsync: bool) -> PresentChoice {
    if vsync {
        return PresentChoice { mode: wgpu::PresentMode::Fifo, fallback: false };
    }

    [wgpu::PresentMode::Immediate, wgpu::PresentMode::Mailbox]
        .into_iter()
        .find(|m| supported.contains(m))
        .map(|mode| PresentChoice { mode, fallback: false })
        .unwrap_or(PresentChoice { mode: wgpu::PresentMode::Fifo, fallback: true })
}

/// Highest supported MSAA sample count not above `requested`; 1 disables MSAA.
pub fn choose_sample_count(requested: u32, supported: impl Fn(u32) -> bool) -> u32 {
    SAMPLE_COUNTS
        .into_iter()
        .find(|&n| n <= requested && supported(n))
        .unwrap_or(1)
}

/// One-line description of the graphics stack, e.g.
/// `Vulkan, AMD Radeon RX 6800 (radv, Mesa 24.0.5)`.
pub fn describe_adapter(backend: &str, name: &str, driver: &str, driver_info: &str) -> String {
    let driver = [driver, driver_info]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    if driver.is_empty() {
        format!("{backend}, {name}")
    } else {
        format!("{backend}, {name} ({driver})")
    }
}

pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) -> bool {
    *size = new_size;

    // wgpu rejects 0x0 surfaces (minimized windows); configuration is deferred.
    if new_size.width == 0 || new_size.height == 0 {
        return false;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
    true
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if size.width > 0 && size.height > 0 {
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, PresentMode, TextureFormat};

    // ── present mode ──────────────────────────────────────────────────────

    #[test]
    fn vsync_on_is_fifo() {
        let c = choose_present_mode(&[PresentMode::Immediate, PresentMode::Fifo], true);
        assert_eq!(c, PresentChoice { mode: PresentMode::Fifo, fallback: false });
    }

    #[test]
    fn vsync_off_prefers_immediate() {
        let modes = [PresentMode::Fifo, PresentMode::Mailbox, PresentMode::Immediate];
        assert_eq!(choose_present_mode(&modes, false).mode, PresentMode::Immediate);
    }

    #[test]
    fn vsync_off_uses_mailbox_without_immediate() {
        let modes = [PresentMode::Fifo, PresentMode::Mailbox];
        let c = choose_present_mode(&modes, false);
        assert_eq!(c, PresentChoice { mode: PresentMode::Mailbox, fallback: false });
    }

    #[test]
    fn vsync_off_falls_back_to_fifo() {
        let c = choose_present_mode(&[PresentMode::Fifo], false);
        assert_eq!(c, PresentChoice { mode: PresentMode::Fifo, fallback: true });
    }

    // ── sample count ──────────────────────────────────────────────────────

    #[test]
    fn sample_count_exact_match() {
        assert_eq!(choose_sample_count(4, |n| n == 4 || n == 2), 4);
    }

    #[test]
    fn sample_count_steps_down() {
        assert_eq!(choose_sample_count(8, |n| n == 4), 4);
        assert_eq!(choose_sample_count(4, |n| n == 2), 2);
    }

    #[test]
    fn sample_count_never_exceeds_request() {
        assert_eq!(choose_sample_count(4, |_| true), 4);
        assert_eq!(choose_sample_count(3, |_| true), 2);
    }

    #[test]
    fn sample_count_disabled() {
        assert_eq!(choose_sample_count(0, |_| true), 1);
        assert_eq!(choose_sample_count(1, |_| true), 1);
        assert_eq!(choose_sample_count(4, |_| false), 1);
    }

    // ── format / alpha ────────────────────────────────────────────────────

    #[test]
    fn format_prefers_srgb() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Rgba8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(TextureFormat::Rgba8UnormSrgb));
        assert_eq!(choose_surface_format(&formats, false), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn format_none_when_empty() {
        assert_eq!(choose_surface_format(&[], true), None);
    }

    #[test]
    fn alpha_mode_honors_supported_request() {
        let modes = [CompositeAlphaMode::Opaque, CompositeAlphaMode::PreMultiplied];
        assert_eq!(
            choose_alpha_mode(&modes, Some(CompositeAlphaMode::PreMultiplied)),
            CompositeAlphaMode::PreMultiplied
        );
        assert_eq!(
            choose_alpha_mode(&modes, Some(CompositeAlphaMode::PostMultiplied)),
            CompositeAlphaMode::Opaque
        );
        assert_eq!(choose_alpha_mode(&[], None), CompositeAlphaMode::Auto);
    }

    // ── adapter description ───────────────────────────────────────────────

    #[test]
    fn describe_with_driver() {
        assert_eq!(
            describe_adapter("Vulkan", "GPU", "radv", "Mesa 24"),
            "Vulkan, GPU (radv, Mesa 24)"
        );
    }

    #[test]
    fn describe_without_driver() {
        assert_eq!(describe_adapter("Metal", "Apple M2", "", ""), "Metal, Apple M2");
        assert_eq!(describe_adapter("Gl", "llvmpipe", "", "4.5"), "Gl, llvmpipe (4.5)");
    }
}
