use image::RgbaImage;
use winit::dpi::PhysicalSize;

use super::ViewError;

/// Texel coordinate inside a texture.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Origin {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Origin {
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };
}

/// Size of a copy in texels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Extent {
    pub fn new(width: u32, height: u32, depth: u32) -> Self {
        Self { width, height, depth }
    }

    /// Component-wise minimum with a 2D drawable size.
    pub fn clamp_to(self, size: PhysicalSize<u32>) -> Self {
        Self {
            width: self.width.min(size.width),
            height: self.height.min(size.height),
            depth: self.depth,
        }
    }
}

/// One texture-to-texture copy.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BlitRegion {
    pub source_origin: Origin,
    pub destination_origin: Origin,
    pub extent: Extent,
}

impl BlitRegion {
    /// Copy of `extent` texels between the origins of both textures.
    pub fn full(extent: Extent) -> Self {
        Self {
            source_origin: Origin::ZERO,
            destination_origin: Origin::ZERO,
            extent,
        }
    }
}

/// Dimensions of a GPU texture.
pub trait TextureExtent {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Depth or array slice count.
    fn depth(&self) -> u32;

    fn extent(&self) -> Extent {
        Extent::new(self.width(), self.height(), self.depth())
    }
}

/// A presentable target handed out by a [`DrawableSource`].
pub trait Drawable {
    /// Size of the drawable's texture in physical pixels.
    fn size(&self) -> PhysicalSize<u32>;
}

/// Rendering device: allocates command queues and textures.
pub trait RenderDevice {
    type Texture: TextureExtent;
    type Queue: CommandQueue<Texture = Self::Texture>;

    /// Creates a work-submission channel on this device.
    fn new_command_queue(&self) -> Self::Queue;

    /// Uploads decoded RGBA8 pixels into a new texture.
    fn new_texture(&self, image: &RgbaImage) -> Result<Self::Texture, ViewError>;
}

/// Work-submission channel.
///
/// Submission is fire-and-forget: implementations must not wait for the GPU.
pub trait CommandQueue {
    type Texture;
    type Drawable: Drawable;

    /// Records one blit from `source` into `drawable`, submits it and
    /// presents the drawable.
    fn blit_and_present(&self, source: &Self::Texture, drawable: Self::Drawable, region: BlitRegion);
}

/// Provider of the presentable target for the current frame.
pub trait DrawableSource {
    type Drawable: Drawable;

    /// Returns the drawable for this frame, sized to `size`, or `None` when no
    /// target is currently available.
    fn current_drawable(&mut self, size: PhysicalSize<u32>) -> Option<Self::Drawable>;
}

/// Rejects images a device with a `max` 2D dimension cannot hold.
pub fn check_texture_size(width: u32, height: u32, max: u32) -> Result<(), ViewError> {
    if width == 0 || height == 0 {
        return Err(ViewError::EmptyImage);
    }
    if width > max || height > max {
        return Err(ViewError::TooLarge { width, height, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_is_empty() {
        assert!(matches!(check_texture_size(0, 10, 64), Err(ViewError::EmptyImage)));
        assert!(matches!(check_texture_size(10, 0, 64), Err(ViewError::EmptyImage)));
    }

    #[test]
    fn limit_is_inclusive() {
        assert!(check_texture_size(64, 64, 64).is_ok());
        assert!(matches!(
            check_texture_size(65, 1, 64),
            Err(ViewError::TooLarge { width: 65, height: 1, max: 64 })
        ));
    }

    #[test]
    fn extent_clamps_to_drawable() {
        let e = Extent::new(512, 256, 1).clamp_to(PhysicalSize::new(300, 400));
        assert_eq!(e, Extent::new(300, 256, 1));
    }
}
