//! Window + runtime loop.
//!
//! [`WindowBuilder`] collects creation hints, [`Window`] carries the
//! listeners, and [`Window::run`] owns the `winit` event loop and wires the
//! native window to the GPU layer.

mod builder;
mod fullscreen;
mod runtime;

pub use builder::{Window, WindowBuilder, WindowConfig};
pub use fullscreen::{VideoModeSpec, choose_video_mode};
