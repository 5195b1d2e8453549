use image::RgbaImage;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use crate::view::{
    check_texture_size, BlitRegion, CommandQueue, Drawable, Origin, RenderDevice, TextureExtent,
    ViewError,
};

/// wgpu device handle for the image view.
///
/// Textures are created in the surface format so they can be copied into the
/// drawable without a conversion pass.
#[derive(Debug, Clone)]
pub struct WgpuDevice {
    device: wgpu::Device,
    queue: wgpu::Queue,
    format: wgpu::TextureFormat,
}

impl WgpuDevice {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        Self { device, queue, format }
    }
}

/// Submission handle.
///
/// wgpu hands out its queue together with the device; this wraps that queue
/// plus the device used to record command encoders.
#[derive(Debug, Clone)]
pub struct WgpuQueue {
    device: wgpu::Device,
    queue: wgpu::Queue,
}

/// The surface texture acquired for one frame.
pub struct SurfaceDrawable(wgpu::SurfaceTexture);

impl SurfaceDrawable {
    pub(crate) fn new(texture: wgpu::SurfaceTexture) -> Self {
        Self(texture)
    }
}

impl Drawable for SurfaceDrawable {
    fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.0.texture.width(), self.0.texture.height())
    }
}

impl TextureExtent for wgpu::Texture {
    fn width(&self) -> u32 {
        wgpu::Texture::width(self)
    }

    fn height(&self) -> u32 {
        wgpu::Texture::height(self)
    }

    fn depth(&self) -> u32 {
        self.depth_or_array_layers()
    }
}

impl RenderDevice for WgpuDevice {
    type Texture = wgpu::Texture;
    type Queue = WgpuQueue;

    fn new_command_queue(&self) -> WgpuQueue {
        WgpuQueue {
            device: self.device.clone(),
            queue: self.queue.clone(),
        }
    }

    fn new_texture(&self, image: &RgbaImage) -> Result<wgpu::Texture, ViewError> {
        let (width, height) = image.dimensions();
        check_texture_size(width, height, self.device.limits().max_texture_dimension_2d)?;
        let data = pack_pixels(image, self.format)?;

        let texture = self.device.create_texture_with_data(
            &self.queue,
            &wgpu::TextureDescriptor {
                label: Some("blitview image"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: self.format,
                usage: wgpu::TextureUsages::COPY_SRC
                    | wgpu::TextureUsages::COPY_DST
                    | wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &data,
        );

        Ok(texture)
    }
}

impl CommandQueue for WgpuQueue {
    type Texture = wgpu::Texture;
    type Drawable = SurfaceDrawable;

    fn blit_and_present(&self, source: &wgpu::Texture, drawable: SurfaceDrawable, region: BlitRegion) {
        let SurfaceDrawable(target) = drawable;

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("blitview blit encoder"),
            });

        encoder.copy_texture_to_texture(
            wgpu::TexelCopyTextureInfo {
                texture: source,
                mip_level: 0,
                origin: origin_3d(region.source_origin),
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyTextureInfo {
                texture: &target.texture,
                mip_level: 0,
                origin: origin_3d(region.destination_origin),
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::Extent3d {
                width: region.extent.width,
                height: region.extent.height,
                depth_or_array_layers: region.extent.depth,
            },
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        target.present();
    }
}

fn origin_3d(o: Origin) -> wgpu::Origin3d {
    wgpu::Origin3d { x: o.x, y: o.y, z: o.z }
}

/// Lays out RGBA8 pixels in the byte order of `format`.
pub(crate) fn pack_pixels(image: &RgbaImage, format: wgpu::TextureFormat) -> Result<Vec<u8>, ViewError> {
    use wgpu::TextureFormat as F;

    match format {
        F::Rgba8Unorm | F::Rgba8UnormSrgb => Ok(image.as_raw().clone()),
        F::Bgra8Unorm | F::Bgra8UnormSrgb => Ok(image
            .as_raw()
            .chunks_exact(4)
            .flat_map(|px| [px[2], px[1], px[0], px[3]])
            .collect()),
        other => Err(ViewError::UnsupportedFormat(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn two_pixels() -> RgbaImage {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([1, 2, 3, 4]));
        img.put_pixel(1, 0, Rgba([5, 6, 7, 8]));
        img
    }

    #[test]
    fn rgba_is_copied_verbatim() {
        let out = pack_pixels(&two_pixels(), wgpu::TextureFormat::Rgba8UnormSrgb).unwrap();
        assert_eq!(out, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn bgra_swaps_red_and_blue() {
        let out = pack_pixels(&two_pixels(), wgpu::TextureFormat::Bgra8Unorm).unwrap();
        assert_eq!(out, vec![3, 2, 1, 4, 7, 6, 5, 8]);
    }

    #[test]
    fn wide_formats_are_unsupported() {
        let err = pack_pixels(&two_pixels(), wgpu::TextureFormat::Rgba16Float).unwrap_err();
        assert!(matches!(err, ViewError::UnsupportedFormat(wgpu::TextureFormat::Rgba16Float)));
    }
}
