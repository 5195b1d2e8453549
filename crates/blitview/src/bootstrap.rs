use blitview_engine::view::{ImageView, RenderDevice};

use crate::bundle::ResourceBundle;

/// Logical name of the image shown at startup.
pub const DEFAULT_IMAGE_NAME: &str = "Lena";

/// One-time wiring of a freshly created view.
///
/// Attaches `device` and one command queue created from it, then loads the
/// bundle's `image_name`. Every failure is logged and leaves the view blank.
pub fn bootstrap<D, B>(view: &mut ImageView<D>, device: Option<D>, bundle: &B, image_name: &str)
where
    D: RenderDevice,
    B: ResourceBundle + ?Sized,
{
    let Some(device) = device else {
        log::error!("no available rendering device");
        return;
    };

    let queue = device.new_command_queue();
    view.set_device(device);
    view.set_command_queue(queue);

    match bundle.image_data(image_name) {
        Some(bytes) => view.load_encoded(&bytes),
        None => log::error!("failed to read the image named {image_name:?}"),
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use blitview_engine::testing::{FakeDevice, FakeDrawables};
    use blitview_engine::view::{DrawOutcome, Extent, Origin, SkipReason, ViewConfig, ViewState};
    use winit::dpi::PhysicalSize;

    use super::*;
    use crate::bundle::AppBundle;

    struct Bundle(Vec<(&'static str, Vec<u8>)>);

    impl ResourceBundle for Bundle {
        fn image_data(&self, name: &str) -> Option<Cow<'_, [u8]>> {
            self.0
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, b)| Cow::Borrowed(b.as_slice()))
        }
    }

    fn initial() -> PhysicalSize<u32> {
        PhysicalSize::new(800, 600)
    }

    fn view() -> ImageView<FakeDevice> {
        ImageView::new(ViewConfig::default(), initial())
    }

    #[test]
    fn lena_is_loaded_and_blitted() {
        let device = FakeDevice::new();
        let mut view = view();

        bootstrap(&mut view, Some(device.clone()), &AppBundle::new(), DEFAULT_IMAGE_NAME);

        assert_eq!(view.state(), ViewState::Ready);
        assert!(view.device().is_some());
        assert!(view.can_draw());
        assert_eq!(view.drawable_size(), PhysicalSize::new(512, 512));
        assert!(view.take_needs_display());
        assert_eq!(device.queues_created(), 1);

        let mut drawables = FakeDrawables::available();
        assert_eq!(view.draw(&mut drawables), DrawOutcome::Presented);

        let blits = device.blits();
        assert_eq!(blits.len(), 1);
        assert_eq!(blits[0].region.source_origin, Origin::ZERO);
        assert_eq!(blits[0].region.destination_origin, Origin::ZERO);
        assert_eq!(blits[0].region.extent, Extent::new(512, 512, 1));
    }

    #[test]
    fn missing_resource_leaves_view_blank() {
        let device = FakeDevice::new();
        let mut view = view();

        bootstrap(&mut view, Some(device.clone()), &Bundle(vec![]), DEFAULT_IMAGE_NAME);

        assert_eq!(view.state(), ViewState::Configured);
        assert_eq!(view.drawable_size(), initial());
        assert!(!view.needs_display());

        let mut drawables = FakeDrawables::available();
        assert_eq!(view.draw(&mut drawables), DrawOutcome::Skipped(SkipReason::NoTexture));
        assert_eq!(device.submissions(), 0);
    }

    #[test]
    fn undecodable_resource_leaves_view_blank() {
        let device = FakeDevice::new();
        let mut view = view();
        let bundle = Bundle(vec![("Lena", b"not a png".to_vec())]);

        bootstrap(&mut view, Some(device.clone()), &bundle, "Lena");

        assert!(view.texture().is_none());
        assert_eq!(device.textures_created(), 0);
    }

    #[test]
    fn no_device_keeps_view_inert() {
        let mut view = view();

        bootstrap(&mut view, None, &AppBundle::new(), DEFAULT_IMAGE_NAME);

        assert_eq!(view.state(), ViewState::Uninitialized);
        assert!(view.device().is_none());
        assert_eq!(view.drawable_size(), initial());

        let bundle = AppBundle::new();
        let lena = bundle.image_data(DEFAULT_IMAGE_NAME).unwrap();
        view.load_encoded(&lena);
        assert!(view.texture().is_none());

        let mut drawables = FakeDrawables::available();
        assert_eq!(view.draw(&mut drawables), DrawOutcome::Skipped(SkipReason::NoCommandQueue));
        assert!(drawables.requests.is_empty());
    }
}
