//! blitview — shows one bundled image by blitting it onto the window surface.
//!
//! ```rust,ignore
//! Viewer::new()
//!     .title("blitview")
//!     .image("Lena")
//!     .run()?;
//! ```

pub mod bootstrap;
pub mod bundle;
pub mod viewer;

pub use bootstrap::{bootstrap, DEFAULT_IMAGE_NAME};
pub use bundle::{AppBundle, ResourceBundle};
pub use viewer::Viewer;
