use winit::dpi::PhysicalSize;

use crate::view::ContentMode;

/// Window size that presents a `content`-sized drawable inside `bounds`.
///
/// `ScaleAspectFit` never upscales: content that already fits keeps its size.
pub fn fit_size(
    mode: ContentMode,
    content: PhysicalSize<u32>,
    bounds: PhysicalSize<u32>,
) -> PhysicalSize<u32> {
    match mode {
        ContentMode::Center => content,
        ContentMode::ScaleToFill => bounds,
        ContentMode::ScaleAspectFit => {
            if content.width == 0 || content.height == 0 {
                return content;
            }
            if content.width <= bounds.width && content.height <= bounds.height {
                return content;
            }

            let scale = f64::min(
                bounds.width as f64 / content.width as f64,
                bounds.height as f64 / content.height as f64,
            );
            PhysicalSize::new(
                ((content.width as f64 * scale).round() as u32).max(1),
                ((content.height as f64 * scale).round() as u32).max(1),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(w: u32, h: u32) -> PhysicalSize<u32> { PhysicalSize::new(w, h) }

    #[test]
    fn aspect_fit_keeps_content_that_fits() {
        assert_eq!(fit_size(ContentMode::ScaleAspectFit, s(512, 512), s(1920, 1080)), s(512, 512));
    }

    #[test]
    fn aspect_fit_shrinks_tall_content() {
        // Height-bound: 2000 -> 1000 halves both sides.
        assert_eq!(fit_size(ContentMode::ScaleAspectFit, s(800, 2000), s(1920, 1000)), s(400, 1000));
    }

    #[test]
    fn aspect_fit_shrinks_wide_content() {
        assert_eq!(fit_size(ContentMode::ScaleAspectFit, s(4000, 1000), s(2000, 2000)), s(2000, 500));
    }

    #[test]
    fn aspect_fit_never_collapses_to_zero() {
        assert_eq!(fit_size(ContentMode::ScaleAspectFit, s(10000, 1), s(100, 100)), s(100, 1));
    }

    #[test]
    fn fill_takes_bounds() {
        assert_eq!(fit_size(ContentMode::ScaleToFill, s(10, 10), s(300, 200)), s(300, 200));
    }

    #[test]
    fn center_keeps_content() {
        assert_eq!(fit_size(ContentMode::Center, s(4000, 10), s(300, 200)), s(4000, 10));
    }
}
