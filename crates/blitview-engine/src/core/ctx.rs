use crate::device::WgpuDevice;
use crate::view::ImageView;

/// Startup context passed to [`super::App::view_did_load`].
pub struct LoadCtx<'a> {
    pub view: &'a mut ImageView<WgpuDevice>,
    device: Option<WgpuDevice>,
}

impl<'a> LoadCtx<'a> {
    pub(crate) fn new(view: &'a mut ImageView<WgpuDevice>, device: Option<WgpuDevice>) -> Self {
        Self { view, device }
    }

    /// The system's default rendering device, if one could be acquired.
    pub fn system_default_device(&self) -> Option<WgpuDevice> {
        self.device.clone()
    }
}
