//! wgpu backend for the image view.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain) as a copy destination
//! - implementing the view's device, queue and drawable traits on top of them

mod backend;
mod error;
mod gpu;
mod init;
mod surface;

pub use backend::{SurfaceDrawable, WgpuDevice, WgpuQueue};
pub use error::SurfaceErrorAction;
pub use gpu::Gpu;
pub use init::GpuInit;
pub use surface::SurfaceDrawables;
