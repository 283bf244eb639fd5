//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! `platform::winit` translates window system events into `RawEvent`s;
//! `EventState` turns them into `EventData`; `Listeners` dispatch it.

mod listeners;
pub mod platform;
mod state;
mod types;

pub use listeners::{Listener, Listeners};
pub use state::EventState;
pub use types::{
    EventData,
    EventKind,
    Key,
    Modifiers,
    MouseButton,
    MouseWheelDelta,
    RawEvent,
};
