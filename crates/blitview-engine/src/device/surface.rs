use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::view::DrawableSource;

use super::{Gpu, SurfaceDrawable, SurfaceErrorAction};

/// 8-bit formats, in preference order, that an RGBA8 image can be copied into.
const SRGB_FIRST: [wgpu::TextureFormat; 4] = [
    wgpu::TextureFormat::Bgra8UnormSrgb,
    wgpu::TextureFormat::Rgba8UnormSrgb,
    wgpu::TextureFormat::Bgra8Unorm,
    wgpu::TextureFormat::Rgba8Unorm,
];

const LINEAR_FIRST: [wgpu::TextureFormat; 4] = [
    wgpu::TextureFormat::Bgra8Unorm,
    wgpu::TextureFormat::Rgba8Unorm,
    wgpu::TextureFormat::Bgra8UnormSrgb,
    wgpu::TextureFormat::Rgba8UnormSrgb,
];

/// Returns `None` when the surface offers no format an RGBA8 image can be
/// copied into.
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let preferred = if prefer_srgb { SRGB_FIRST } else { LINEAR_FIRST };

    preferred.into_iter().find(|f| formats.contains(f))
}

/// Usage flags for the drawable.
///
/// Returns `None` when the drawable must accept copies but the surface does
/// not support `COPY_DST`.
pub(crate) fn surface_usage(
    supported: wgpu::TextureUsages,
    framebuffer_only: bool,
) -> Option<wgpu::TextureUsages> {
    let mut usage = wgpu::TextureUsages::RENDER_ATTACHMENT;
    if framebuffer_only {
        return Some(usage);
    }

    if !supported.contains(wgpu::TextureUsages::COPY_DST) {
        return None;
    }
    usage |= wgpu::TextureUsages::COPY_DST;

    if supported.contains(wgpu::TextureUsages::COPY_SRC) {
        usage |= wgpu::TextureUsages::COPY_SRC;
    }

    Some(usage)
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// wgpu does not support configuring a surface with a 0x0 size; in that case,
/// only the recorded size changes and configuration is deferred.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;
    if new_size.width == 0 || new_size.height == 0 {
        return;
    }

    config.width = new_size.width;
    config.height = new_size.height;

    surface.configure(device, config);
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

/// Hands the window surface's current texture to the image view.
///
/// Lives for one redraw. The surface is resized to the requested drawable
/// size before acquisition.
pub struct SurfaceDrawables<'a, 'w> {
    gpu: &'a mut Gpu<'w>,
    window: &'a Window,
    action: Option<SurfaceErrorAction>,
}

impl<'a, 'w> SurfaceDrawables<'a, 'w> {
    pub fn new(gpu: &'a mut Gpu<'w>, window: &'a Window) -> Self {
        Self { gpu, window, action: None }
    }

    /// The action taken for the last acquisition failure, if any.
    pub fn error_action(&self) -> Option<SurfaceErrorAction> {
        self.action
    }
}

impl DrawableSource for SurfaceDrawables<'_, '_> {
    type Drawable = SurfaceDrawable;

    fn current_drawable(&mut self, size: PhysicalSize<u32>) -> Option<SurfaceDrawable> {
        if size.width == 0 || size.height == 0 {
            return None;
        }
        if size != self.gpu.size() {
            log::debug!("drawable resized to {}x{}", size.width, size.height);
            self.gpu.resize(size);
        }

        match self.gpu.current_texture() {
            Ok(texture) => {
                self.window.pre_present_notify();
                Some(SurfaceDrawable::new(texture))
            }
            Err(err) => {
                log::debug!("no drawable: {err}");
                self.action = Some(self.gpu.handle_surface_error(err));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{TextureFormat as F, TextureUsages as U};

    // ── choose_surface_format ─────────────────────────────────────────────

    #[test]
    fn prefers_srgb_8bit() {
        let formats = [F::Rgba16Float, F::Bgra8Unorm, F::Bgra8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(F::Bgra8UnormSrgb));
    }

    #[test]
    fn prefers_linear_when_asked() {
        let formats = [F::Rgba8UnormSrgb, F::Rgba8Unorm];
        assert_eq!(choose_surface_format(&formats, false), Some(F::Rgba8Unorm));
    }

    #[test]
    fn wide_only_surface_is_rejected() {
        let formats = [F::Rgb10a2Unorm, F::Rgba16Float];
        assert_eq!(choose_surface_format(&formats, true), None);
    }

    #[test]
    fn no_formats() {
        assert_eq!(choose_surface_format(&[], true), None);
    }

    // ── surface_usage ─────────────────────────────────────────────────────

    #[test]
    fn framebuffer_only_is_render_attachment() {
        assert_eq!(surface_usage(U::empty(), true), Some(U::RENDER_ATTACHMENT));
    }

    #[test]
    fn copyable_surface_gets_copy_dst() {
        let usage = surface_usage(U::RENDER_ATTACHMENT | U::COPY_DST, false).unwrap();
        assert_eq!(usage, U::RENDER_ATTACHMENT | U::COPY_DST);
    }

    #[test]
    fn copy_src_added_when_supported() {
        let supported = U::RENDER_ATTACHMENT | U::COPY_DST | U::COPY_SRC;
        let usage = surface_usage(supported, false).unwrap();
        assert!(usage.contains(U::COPY_SRC));
    }

    #[test]
    fn missing_copy_dst_is_rejected() {
        assert_eq!(surface_usage(U::RENDER_ATTACHMENT, false), None);
    }
}
