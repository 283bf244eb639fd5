use crate::input::EventData;

use super::ctx::{FrameCtx, WindowCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the game.
///
/// Input is usually handled through [`Listeners`](crate::input::Listeners)
/// registered on the window; `on_event` sees every event after them.
pub trait App {
    /// Called once, after the window and its GPU surface exist.
    fn on_open(&mut self, ctx: &mut WindowCtx) {
        let _ = ctx;
    }

    /// Called for every dispatched input event, after the listeners.
    fn on_event(&mut self, ctx: &mut WindowCtx, data: &EventData) -> AppControl {
        let _ = (ctx, data);
        AppControl::Continue
    }

    /// Called once per frame. The default clears to black and presents.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        ctx.clear(crate::device::Color::BLACK)
    }
}

/// No-op application: listeners only, black frames.
impl App for () {}
