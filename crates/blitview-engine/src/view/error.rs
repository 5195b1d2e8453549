use std::fmt;

/// Failure while turning an image into a texture.
///
/// These never escape [`super::ImageView`]; they are logged where they occur.
#[derive(Debug)]
pub enum ViewError {
    /// No rendering device is attached to the view.
    NoDevice,
    /// The encoded image could not be decoded.
    Decode(image::ImageError),
    /// The image has a zero width or height.
    EmptyImage,
    /// The image exceeds the device's 2D texture limit.
    TooLarge { width: u32, height: u32, max: u32 },
    /// The drawable format cannot receive a copy of 8-bit RGBA data.
    UnsupportedFormat(wgpu::TextureFormat),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDevice => write!(f, "no rendering device attached"),
            Self::Decode(e) => write!(f, "failed to decode image: {e}"),
            Self::EmptyImage => write!(f, "image has no pixels"),
            Self::TooLarge { width, height, max } => {
                write!(f, "image is {width}x{height}, device limit is {max}x{max}")
            }
            Self::UnsupportedFormat(format) => {
                write!(f, "drawable format {format:?} cannot receive an RGBA8 copy")
            }
        }
    }
}

impl std::error::Error for ViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for ViewError {
    fn from(e: image::ImageError) -> Self {
        Self::Decode(e)
    }
}
