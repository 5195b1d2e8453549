//! Image display surface.
//!
//! [`ImageView`] holds a command queue and one texture, and copies that
//! texture onto the current drawable whenever a redraw is requested. It is
//! generic over the [`RenderDevice`] seam so it can be driven by the
//! wgpu backend in [`crate::device`] or by the recording fakes in tests.

mod backend;
mod config;
mod error;
mod image_view;

pub use backend::{
    check_texture_size, BlitRegion, CommandQueue, Drawable, DrawableSource, Extent, Origin,
    RenderDevice, TextureExtent,
};
pub use config::{ContentMode, RenderMode, ViewConfig};
pub use error::ViewError;
pub use image_view::{DrawOutcome, ImageView, SkipReason, ViewState};
