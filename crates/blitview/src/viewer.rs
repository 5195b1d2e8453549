use std::path::PathBuf;

use anyhow::Result;
use winit::dpi::LogicalSize;

use blitview_engine::core::{App, LoadCtx};
use blitview_engine::device::GpuInit;
use blitview_engine::view::ViewConfig;
use blitview_engine::window::{Runtime, RuntimeConfig};

use crate::bootstrap::{bootstrap, DEFAULT_IMAGE_NAME};
use crate::bundle::AppBundle;

/// Image viewer application builder.
///
/// ```rust,ignore
/// Viewer::new()
///     .title("blitview")
///     .resources("./assets")
///     .run()?;
/// ```
pub struct Viewer {
    title:       String,
    width:       f64,
    height:      f64,
    image_name:  String,
    resources:   Option<PathBuf>,
    view_config: ViewConfig,
    gpu_init:    GpuInit,
}

impl Viewer {
    pub fn new() -> Self {
        Self {
            title:       "blitview".to_string(),
            width:       800.0,
            height:      600.0,
            image_name:  DEFAULT_IMAGE_NAME.to_string(),
            resources:   None,
            view_config: ViewConfig::default(),
            gpu_init:    GpuInit::default(),
        }
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels, used until an image loads.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width  = width;
        self.height = height;
        self
    }

    /// Logical name of the bundled image to show.
    pub fn image(mut self, name: impl Into<String>) -> Self {
        self.image_name = name.into();
        self
    }

    /// Directory searched for images before the embedded ones.
    ///
    /// Without it, `BLITVIEW_RESOURCES` is consulted.
    pub fn resources(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resources = Some(dir.into());
        self
    }

    pub fn view_config(mut self, config: ViewConfig) -> Self {
        self.view_config = config;
        self
    }

    pub fn gpu_init(mut self, init: GpuInit) -> Self {
        self.gpu_init = init;
        self
    }

    fn bundle(&self) -> AppBundle {
        match &self.resources {
            Some(dir) => AppBundle::new().with_dir(dir),
            None => AppBundle::from_env(),
        }
    }

    /// Opens the window and blocks until it is closed.
    pub fn run(self) -> Result<()> {
        let controller = ViewController {
            bundle:     self.bundle(),
            image_name: self.image_name,
        };

        Runtime::run(
            RuntimeConfig {
                title:        self.title,
                initial_size: LogicalSize::new(self.width, self.height),
            },
            self.gpu_init,
            self.view_config,
            controller,
        )
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

/// Wires the system device and the named image into the view at startup.
struct ViewController {
    bundle:     AppBundle,
    image_name: String,
}

impl App for ViewController {
    fn view_did_load(&mut self, ctx: &mut LoadCtx<'_>) {
        let device = ctx.system_default_device();
        bootstrap(&mut *ctx.view, device, &self.bundle, &self.image_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_show_lena() {
        let v = Viewer::new();
        assert_eq!(v.image_name, "Lena");
        assert_eq!(v.view_config, ViewConfig::default());
        assert!(v.resources.is_none());
    }

    #[test]
    fn builder_overrides() {
        let v = Viewer::new()
            .title("t")
            .size(320.0, 240.0)
            .image("Mandrill")
            .resources("/tmp/res");
        assert_eq!(v.title, "t");
        assert_eq!((v.width, v.height), (320.0, 240.0));
        assert_eq!(v.image_name, "Mandrill");
        assert_eq!(v.bundle().dir(), Some(std::path::Path::new("/tmp/res")));
    }

    #[test]
    fn gpu_init_is_replaced() {
        let v = Viewer::new().gpu_init(GpuInit { prefer_srgb: false, ..GpuInit::default() });
        assert!(!v.gpu_init.prefer_srgb);
    }
}
