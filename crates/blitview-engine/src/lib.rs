//! blitview engine crate.
//!
//! Owns the image display surface, its wgpu backend and the winit runtime
//! that drives it. The application layer only supplies a bootstrap through
//! [`core::App`].

pub mod core;
pub mod device;
pub mod logging;
pub mod view;
pub mod window;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
