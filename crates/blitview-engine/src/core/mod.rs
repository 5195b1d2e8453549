//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! the application that wires the image view at startup.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::LoadCtx;
