/// Placement of the window relative to the drawable.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ContentMode {
    /// Shrink the window to fit the drawable while keeping its aspect ratio.
    #[default]
    ScaleAspectFit,
    /// Fill the available bounds, ignoring aspect ratio.
    ScaleToFill,
    /// Keep the drawable's pixel size.
    Center,
}

/// When the runtime produces frames.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum RenderMode {
    /// Only after an explicit needs-display request (or a platform expose).
    #[default]
    OnDemand,
    /// Every event-loop iteration.
    Continuous,
}

/// Display parameters fixed when an [`super::ImageView`] is constructed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ViewConfig {
    /// When `false`, the drawable can also be used as a copy target/source,
    /// not only as a render attachment.
    pub framebuffer_only: bool,

    /// Track window resizes with the drawable size.
    pub auto_resize_drawable: bool,

    /// Flip image rows before upload.
    ///
    /// This is a calibration constant for the backend's coordinate system.
    /// wgpu images and surfaces share a top-left origin, so it is off by default.
    pub flip_vertical: bool,

    pub content_mode: ContentMode,
    pub render_mode: RenderMode,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            framebuffer_only: false,
            auto_resize_drawable: false,
            flip_vertical: false,
            content_mode: ContentMode::ScaleAspectFit,
            render_mode: RenderMode::OnDemand,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_copyable_on_demand_and_fixed_size() {
        let c = ViewConfig::default();
        assert!(!c.framebuffer_only);
        assert!(!c.auto_resize_drawable);
        assert_eq!(c.content_mode, ContentMode::ScaleAspectFit);
        assert_eq!(c.render_mode, RenderMode::OnDemand);
    }

    #[test]
    fn default_does_not_flip_for_top_left_origin() {
        assert!(!ViewConfig::default().flip_vertical);
    }
}
