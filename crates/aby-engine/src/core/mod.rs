//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the game:
//! the `App` trait, the per-window control surface handed to listeners, and
//! the per-frame context.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{CursorMode, FrameCtx, WindowCommand, WindowCtx, WindowSnapshot};
