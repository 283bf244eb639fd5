use aby_diag::ErrorAggregator;
use winit::window::Window;

use crate::device::{Color, Gpu, SurfaceErrorAction};
use crate::input::{EventData, EventState, RawEvent};
use crate::time::EventClock;

use super::app::AppControl;

/// Cursor presentation over the window.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CursorMode {
    /// Visible, free to leave the window.
    Normal,
    /// Invisible while over the window.
    Hidden,
    /// Invisible and confined to the window (mouse-look).
    Grabbed,
}

/// Window operation requested from a callback.
///
/// Commands are applied by the runtime after the current callback returns,
/// in the order they were issued.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowCommand {
    SetWindowed { width: u32, height: u32, x: i32, y: i32 },
    /// Fullscreen on the window's monitor at its current resolution. With a
    /// refresh rate, switches the monitor to a matching exclusive video mode.
    SetFullscreen { refresh_hz: Option<u32> },
    /// Exclusive fullscreen with the video mode closest to the given size.
    SetFullscreenSized { width: u32, height: u32, refresh_hz: Option<u32> },
    SetSize { width: u32, height: u32 },
    SetPos { x: i32, y: i32 },
    SetTitle(String),
    SetVisible(bool),
    Focus,
    SetCursor(CursorMode),
    SetVsync(bool),
}

/// Window properties as of the start of the current callback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowSnapshot {
    /// Inner size in logical pixels.
    pub size: (u32, u32),
    /// Drawable size of the GPU surface in physical pixels.
    pub framebuffer_size: (u32, u32),
    /// Outer position, when the platform reports one.
    pub pos: Option<(i32, i32)>,
    pub fullscreen: bool,
    pub focused: bool,
    pub visible: bool,
    pub vsync: bool,
    pub cursor: Option<CursorMode>,
    pub adapter_summary: String,
}

/// Per-window control surface handed to listeners and the app.
///
/// Queries answer from a snapshot taken before the callback started; setters
/// queue a [`WindowCommand`]. The close flag is the exception: it is read and
/// written directly.
#[derive(Debug)]
pub struct WindowCtx {
    snapshot: WindowSnapshot,
    input: EventState,
    clock: EventClock,
    diagnostics: ErrorAggregator,
    commands: Vec<WindowCommand>,
    should_close: bool,
}

impl WindowCtx {
    pub(crate) fn new(snapshot: WindowSnapshot, diagnostics: ErrorAggregator) -> Self {
        // Pointer events arrive in physical pixels.
        let (width, height) = snapshot.framebuffer_size;
        let (x, y) = snapshot.pos.unwrap_or((0, 0));
        Self {
            input: EventState::new(width, height, x, y),
            snapshot,
            clock: EventClock::new(),
            diagnostics,
            commands: Vec::new(),
            should_close: false,
        }
    }

    /// A context not bound to any window. Commands are queued and never
    /// applied, which makes it suitable for exercising listeners in tests.
    pub fn detached(width: u32, height: u32) -> Self {
        let snapshot = WindowSnapshot {
            size: (width, height),
            framebuffer_size: (width, height),
            visible: true,
            ..WindowSnapshot::default()
        };
        Self::new(snapshot, ErrorAggregator::new("window"))
    }

    // ── close flag ────────────────────────────────────────────────────────

    pub fn should_close(&self) -> bool {
        self.should_close
    }

    pub fn set_should_close(&mut self, flag: bool) {
        self.should_close = flag;
    }

    // ── queries ───────────────────────────────────────────────────────────

    pub fn size(&self) -> (u32, u32) {
        self.snapshot.size
    }

    pub fn framebuffer_size(&self) -> (u32, u32) {
        self.snapshot.framebuffer_size
    }

    pub fn pos(&self) -> Option<(i32, i32)> {
        self.snapshot.pos
    }

    pub fn is_fullscreen(&self) -> bool {
        self.snapshot.fullscreen
    }

    pub fn is_focused(&self) -> bool {
        self.snapshot.focused
    }

    pub fn is_visible(&self) -> bool {
        self.snapshot.visible
    }

    pub fn vsync(&self) -> bool {
        self.snapshot.vsync
    }

    /// Graphics backend, adapter and driver the surface runs on.
    pub fn adapter_summary(&self) -> &str {
        &self.snapshot.adapter_summary
    }

    pub fn input(&self) -> &EventState {
        &self.input
    }

    /// Seconds since the window was opened.
    pub fn time(&self) -> f64 {
        self.clock.now()
    }

    /// Warnings collected while creating and reconfiguring the window.
    pub fn diagnostics(&self) -> &ErrorAggregator {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut ErrorAggregator {
        &mut self.diagnostics
    }

    // ── commands ──────────────────────────────────────────────────────────

    pub fn set_windowed_mode(&mut self, width: u32, height: u32, x: i32, y: i32) {
        self.commands.push(WindowCommand::SetWindowed { width, height, x, y });
    }

    pub fn set_fullscreen_mode(&mut self, refresh_hz: Option<u32>) {
        self.commands.push(WindowCommand::SetFullscreen { refresh_hz });
    }

    pub fn set_fullscreen_mode_sized(&mut self, width: u32, height: u32, refresh_hz: Option<u32>) {
        self.commands
            .push(WindowCommand::SetFullscreenSized { width, height, refresh_hz });
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.commands.push(WindowCommand::SetSize { width, height });
    }

    pub fn set_pos(&mut self, x: i32, y: i32) {
        self.commands.push(WindowCommand::SetPos { x, y });
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.commands.push(WindowCommand::SetTitle(title.into()));
    }

    pub fn show(&mut self) {
        self.commands.push(WindowCommand::SetVisible(true));
    }

    pub fn hide(&mut self) {
        self.commands.push(WindowCommand::SetVisible(false));
    }

    pub fn focus(&mut self) {
        self.commands.push(WindowCommand::Focus);
    }

    pub fn grab_cursor(&mut self) {
        self.commands.push(WindowCommand::SetCursor(CursorMode::Grabbed));
    }

    pub fn hide_cursor(&mut self) {
        self.commands.push(WindowCommand::SetCursor(CursorMode::Hidden));
    }

    pub fn show_cursor(&mut self) {
        self.commands.push(WindowCommand::SetCursor(CursorMode::Normal));
    }

    pub fn set_vsync(&mut self, enabled: bool) {
        self.commands.push(WindowCommand::SetVsync(enabled));
    }

    /// Commands issued since the runtime last applied them.
    pub fn pending_commands(&self) -> &[WindowCommand] {
        &self.commands
    }

    // ── runtime side ──────────────────────────────────────────────────────

    pub(crate) fn take_commands(&mut self) -> Vec<WindowCommand> {
        std::mem::take(&mut self.commands)
    }

    pub(crate) fn snapshot_mut(&mut self) -> &mut WindowSnapshot {
        &mut self.snapshot
    }

    /// Feeds a translated event through the input state.
    pub(crate) fn apply_input(&mut self, raw: RawEvent) -> Option<EventData> {
        self.input.apply(raw, &mut self.clock).copied()
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a mut WindowCtx,
    pub(crate) native: &'a Window,
    pub(crate) gpu: &'a mut Gpu<'w>,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Clears the surface to `color` and presents it.
    ///
    /// Returns `AppControl::Exit` when the surface is lost for good.
    pub fn clear(&mut self, color: Color) -> AppControl {
        let frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let action = self.gpu.handle_surface_error(err);
                if action == SurfaceErrorAction::Fatal {
                    log::error!("surface lost for good, closing window");
                    return AppControl::Exit;
                }
                return AppControl::Continue;
            }
        };

        self.native.pre_present_notify();
        self.gpu.clear_and_submit(frame, color);

        AppControl::Continue
    }
}
