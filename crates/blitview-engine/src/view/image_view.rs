use image::DynamicImage;
use winit::dpi::PhysicalSize;

use super::backend::{BlitRegion, CommandQueue, Drawable, DrawableSource, RenderDevice, TextureExtent};
use super::{ViewConfig, ViewError};

/// Lifecycle of an [`ImageView`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ViewState {
    /// No device and command queue attached.
    Uninitialized,
    /// Device and queue attached, no texture yet.
    Configured,
    /// A texture is attached and the drawable is sized to it.
    Ready,
}

/// Why a redraw did no GPU work.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SkipReason {
    NoCommandQueue,
    NoTexture,
    NoDrawable,
}

/// Result of [`ImageView::draw`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawOutcome {
    /// One blit was submitted and the drawable presented.
    Presented,
    /// Nothing was submitted.
    Skipped(SkipReason),
}

/// GPU-backed view presenting a single texture.
///
/// The view only draws when asked: loading a texture sets the needs-display
/// flag, the runtime consumes it with [`take_needs_display`] and requests one
/// redraw, which ends up in [`draw`].
///
/// [`take_needs_display`]: ImageView::take_needs_display
/// [`draw`]: ImageView::draw
pub struct ImageView<D: RenderDevice> {
    config: ViewConfig,
    device: Option<D>,
    command_queue: Option<D::Queue>,
    texture: Option<D::Texture>,
    drawable_size: PhysicalSize<u32>,
    needs_display: bool,
}

impl<D: RenderDevice> ImageView<D> {
    /// Creates a view without a device.
    pub fn new(config: ViewConfig, drawable_size: PhysicalSize<u32>) -> Self {
        Self::init_common(config, drawable_size, None)
    }

    /// Creates a view with an explicit device. A command queue still has to be
    /// attached before it can draw.
    pub fn with_device(config: ViewConfig, drawable_size: PhysicalSize<u32>, device: D) -> Self {
        Self::init_common(config, drawable_size, Some(device))
    }

    fn init_common(config: ViewConfig, drawable_size: PhysicalSize<u32>, device: Option<D>) -> Self {
        log::debug!(
            "image view created ({}x{}, {:?})",
            drawable_size.width,
            drawable_size.height,
            config
        );

        Self {
            config,
            device,
            command_queue: None,
            texture: None,
            drawable_size,
            needs_display: false,
        }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn device(&self) -> Option<&D> {
        self.device.as_ref()
    }

    pub fn set_device(&mut self, device: D) {
        self.device = Some(device);
    }

    pub fn set_command_queue(&mut self, queue: D::Queue) {
        self.command_queue = Some(queue);
    }

    pub fn texture(&self) -> Option<&D::Texture> {
        self.texture.as_ref()
    }

    pub fn state(&self) -> ViewState {
        match (&self.device, &self.command_queue, &self.texture) {
            (Some(_), Some(_), Some(_)) => ViewState::Ready,
            (Some(_), Some(_), None) => ViewState::Configured,
            _ => ViewState::Uninitialized,
        }
    }

    /// Current drawable size in physical pixels.
    pub fn drawable_size(&self) -> PhysicalSize<u32> {
        self.drawable_size
    }

    /// Overrides the drawable size.
    ///
    /// Used by the runtime when `auto_resize_drawable` is enabled.
    pub fn set_drawable_size(&mut self, size: PhysicalSize<u32>) {
        self.drawable_size = size;
    }

    pub fn needs_display(&self) -> bool {
        self.needs_display
    }

    pub fn set_needs_display(&mut self) {
        self.needs_display = true;
    }

    /// Returns and clears the needs-display flag.
    pub fn take_needs_display(&mut self) -> bool {
        std::mem::take(&mut self.needs_display)
    }

    /// Replaces the held texture.
    ///
    /// Post-condition: the drawable size is exactly the texture's width and
    /// height, and one redraw is pending. The previous texture is dropped.
    pub fn set_texture(&mut self, texture: D::Texture) {
        self.drawable_size = PhysicalSize::new(texture.width(), texture.height());
        self.texture = Some(texture);
        self.needs_display = true;
    }

    /// Decodes `bytes` and loads the result as the view's texture.
    ///
    /// Failures are logged and leave the view unchanged.
    pub fn load_encoded(&mut self, bytes: &[u8]) {
        match image::load_from_memory(bytes) {
            Ok(image) => self.load_image(&image),
            Err(e) => log::error!("{}", ViewError::from(e)),
        }
    }

    /// Converts `image` into a texture on the attached device and displays it.
    ///
    /// Failures are logged and leave the view unchanged.
    pub fn load_image(&mut self, image: &DynamicImage) {
        match self.make_texture(image) {
            Ok(texture) => {
                log::info!("loaded {}x{} texture", texture.width(), texture.height());
                self.set_texture(texture);
            }
            Err(e) => log::error!("failed to create a texture from the image: {e}"),
        }
    }

    fn make_texture(&self, image: &DynamicImage) -> Result<D::Texture, ViewError> {
        let device = self.device.as_ref().ok_or(ViewError::NoDevice)?;

        let mut pixels = image.to_rgba8();
        if self.config.flip_vertical {
            image::imageops::flip_vertical_in_place(&mut pixels);
        }

        device.new_texture(&pixels)
    }

    /// True when a command queue and a texture are both held.
    pub fn can_draw(&self) -> bool {
        self.draw_inputs().is_ok()
    }

    fn draw_inputs(&self) -> Result<(&D::Queue, &D::Texture), SkipReason> {
        match (&self.command_queue, &self.texture) {
            (Some(queue), Some(texture)) => Ok((queue, texture)),
            (None, _) => Err(SkipReason::NoCommandQueue),
            (Some(_), None) => Err(SkipReason::NoTexture),
        }
    }

    /// Copies the texture onto the source's current drawable and presents it.
    ///
    /// Does nothing unless [`can_draw`] holds and the source has a drawable.
    /// The drawable is only requested once `can_draw` is known to hold.
    ///
    /// [`can_draw`]: ImageView::can_draw
    pub fn draw<S>(&self, drawables: &mut S) -> DrawOutcome
    where
        S: DrawableSource<Drawable = <D::Queue as CommandQueue>::Drawable>,
    {
        let (queue, texture) = match self.draw_inputs() {
            Ok(inputs) => inputs,
            Err(reason) => return DrawOutcome::Skipped(reason),
        };

        let Some(drawable) = drawables.current_drawable(self.drawable_size) else {
            return DrawOutcome::Skipped(SkipReason::NoDrawable);
        };

        let region = BlitRegion::full(texture.extent().clamp_to(drawable.size()));
        queue.blit_and_present(texture, drawable, region);

        DrawOutcome::Presented
    }
}
