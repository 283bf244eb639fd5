//! Aby engine crate.
//!
//! Owns the platform + GPU runtime pieces the game builds on: one window,
//! its wgpu surface, input dispatch and event timing.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod time;
pub mod window;
