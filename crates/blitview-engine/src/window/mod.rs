//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires them to the GPU layer and
//! the image view.

mod fit;
mod runtime;

pub use fit::fit_size;
pub use runtime::{Runtime, RuntimeConfig};
