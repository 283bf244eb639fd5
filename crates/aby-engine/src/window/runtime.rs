use aby_diag::ErrorAggregator;
use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::monitor::{MonitorHandle, VideoModeHandle};
use winit::window::{CursorGrabMode, Fullscreen, Window as NativeWindow, WindowId};

use crate::core::{App, AppControl, CursorMode, FrameCtx, WindowCommand, WindowCtx, WindowSnapshot};
use crate::device::Gpu;
use crate::input::Listeners;
use crate::input::platform::winit::translate_window_event;

use super::builder::WindowConfig;
use super::fullscreen::{VideoModeSpec, choose_video_mode};

/// Event loop driver behind [`Window::run`](super::Window::run).
pub(crate) struct Runtime;

impl Runtime {
    pub(crate) fn run<A>(config: WindowConfig, listeners: Listeners, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, listeners, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: NativeWindow,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// The open window: native handle, its GPU context and the app-facing ctx.
struct OpenWindow {
    entry: WindowEntry,
    ctx: WindowCtx,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: WindowConfig,
    listeners: Listeners,
    app: A,

    open: Option<OpenWindow>,
    /// Startup failure, returned from `Runtime::run` once the loop exits.
    failure: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: WindowConfig, listeners: Listeners, app: A) -> Self {
        Self { config, listeners, app, open: None, failure: None }
    }

    fn open_window(&self, event_loop: &ActiveEventLoop) -> Result<OpenWindow> {
        let config = &self.config;

        let mut attrs = NativeWindow::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(f64::from(config.width), f64::from(config.height)))
            .with_resizable(config.resizable)
            .with_visible(config.visible)
            .with_decorations(config.decorated)
            .with_maximized(config.maximized);

        if let Some((x, y)) = config.position {
            attrs = attrs.with_position(PhysicalPosition::new(x, y));
        }
        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let mut diag = ErrorAggregator::new("window");
        let (gpu_init, vsync, samples) = (config.gpu.clone(), config.vsync, config.samples);

        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init, vsync, samples, &mut diag)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        let mut snapshot = WindowSnapshot {
            cursor: Some(CursorMode::Normal),
            ..WindowSnapshot::default()
        };
        entry.with(|f| {
            snapshot.adapter_summary = f.gpu.adapter_summary();
            refresh_snapshot(f.window, f.gpu, &mut snapshot);
        });

        Ok(OpenWindow { entry, ctx: WindowCtx::new(snapshot, diag) })
    }

    /// Applies queued commands, refreshes the snapshot and honors the close flag.
    fn after_callback(&mut self, event_loop: &ActiveEventLoop) {
        let Some(OpenWindow { entry, ctx }) = self.open.as_mut() else {
            return;
        };

        let commands = ctx.take_commands();
        entry.with_mut(|f| {
            for cmd in commands {
                apply_command(f.window, f.gpu, ctx, cmd);
            }
            refresh_snapshot(f.window, f.gpu, ctx.snapshot_mut());
        });

        if ctx.should_close() {
            log::debug!("window closing");
            self.open = None;
            event_loop.exit();
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.open.is_some() || self.failure.is_some() {
            return;
        }

        match self.open_window(event_loop) {
            Ok(mut open) => {
                self.app.on_open(&mut open.ctx);
                open.entry.with_window(|w| w.request_redraw());
                self.open = Some(open);
                self.after_callback(event_loop);
            }
            Err(err) => {
                log::error!("failed to create window: {err:#}");
                self.failure = Some(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(open) = &self.open else {
            return;
        };

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: the game renders every frame.
        open.entry.with_window(|w| w.request_redraw());
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, listeners) = (&mut self.app, &mut self.listeners);
        let Some(OpenWindow { entry, ctx }) = self.open.as_mut() else {
            return;
        };
        if entry.borrow_window().id() != window_id {
            return;
        }

        if let Some(raw) = translate_window_event(&event) {
            if let Some(data) = ctx.apply_input(raw) {
                listeners.dispatch(ctx, &data);
                if app.on_event(ctx, &data) == AppControl::Exit {
                    ctx.set_should_close(true);
                }
            }
        }

        match &event {
            WindowEvent::CloseRequested => ctx.set_should_close(true),

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                let mut control = AppControl::Continue;
                entry.with_mut(|f| {
                    let mut frame = FrameCtx { window: &mut *ctx, native: f.window, gpu: f.gpu };
                    control = app.on_frame(&mut frame);
                });

                if control == AppControl::Exit {
                    ctx.set_should_close(true);
                }
            }

            _ => {}
        }

        self.after_callback(event_loop);
    }
}

fn refresh_snapshot(window: &NativeWindow, gpu: &Gpu<'_>, snapshot: &mut WindowSnapshot) {
    let logical: LogicalSize<f64> = window.inner_size().to_logical(window.scale_factor());
    snapshot.size = (logical.width.round() as u32, logical.height.round() as u32);

    let fb = gpu.size();
    snapshot.framebuffer_size = (fb.width, fb.height);
    snapshot.pos = window.outer_position().ok().map(|p| (p.x, p.y));
    snapshot.fullscreen = window.fullscreen().is_some();
    snapshot.focused = window.has_focus();
    snapshot.visible = window.is_visible().unwrap_or(true);
    snapshot.vsync = gpu.vsync();
}

fn apply_command(window: &NativeWindow, gpu: &mut Gpu<'_>, ctx: &mut WindowCtx, cmd: WindowCommand) {
    match cmd {
        WindowCommand::SetWindowed { width, height, x, y } => {
            window.set_fullscreen(None);
            let _ = window.request_inner_size(LogicalSize::new(f64::from(width), f64::from(height)));
            window.set_outer_position(PhysicalPosition::new(x, y));
        }

        WindowCommand::SetFullscreen { refresh_hz } => {
            let monitor = window.current_monitor().or_else(|| window.primary_monitor());
            match (monitor, refresh_hz) {
                (Some(monitor), Some(hz)) => {
                    let size = monitor.size();
                    set_exclusive(window, ctx, monitor, size.width, size.height, Some(hz));
                }
                (monitor, _) => window.set_fullscreen(Some(Fullscreen::Borderless(monitor))),
            }
        }

        WindowCommand::SetFullscreenSized { width, height, refresh_hz } => {
            match window.current_monitor().or_else(|| window.primary_monitor()) {
                Some(monitor) => set_exclusive(window, ctx, monitor, width, height, refresh_hz),
                None => {
                    record_warning(ctx, "fullscreen", "no monitor found, using borderless fullscreen");
                    window.set_fullscreen(Some(Fullscreen::Borderless(None)));
                }
            }
        }

        WindowCommand::SetSize { width, height } => {
            let _ = window.request_inner_size(LogicalSize::new(f64::from(width), f64::from(height)));
        }

        WindowCommand::SetPos { x, y } => window.set_outer_position(PhysicalPosition::new(x, y)),
        WindowCommand::SetTitle(title) => window.set_title(&title),
        WindowCommand::SetVisible(visible) => window.set_visible(visible),
        WindowCommand::Focus => window.focus_window(),
        WindowCommand::SetCursor(mode) => set_cursor_mode(window, ctx, mode),
        WindowCommand::SetVsync(enabled) => gpu.set_vsync(enabled, ctx.diagnostics_mut()),
    }
}

fn set_exclusive(
    window: &NativeWindow,
    ctx: &mut WindowCtx,
    monitor: MonitorHandle,
    width: u32,
    height: u32,
    refresh_hz: Option<u32>,
) {
    let modes: Vec<VideoModeHandle> = monitor.video_modes().collect();
    let specs: Vec<VideoModeSpec> = modes
        .iter()
        .map(|m| {
            let size = m.size();
            VideoModeSpec {
                width: size.width,
                height: size.height,
                refresh_millihertz: m.refresh_rate_millihertz(),
            }
        })
        .collect();

    let Some(index) = choose_video_mode(&specs, width, height, refresh_hz) else {
        record_warning(ctx, "fullscreen", "monitor reports no video modes, using borderless fullscreen");
        window.set_fullscreen(Some(Fullscreen::Borderless(Some(monitor))));
        return;
    };

    let chosen = specs[index];
    if (chosen.width, chosen.height) != (width, height) {
        record_warning(
            ctx,
            "fullscreen",
            format!(
                "no {width}x{height} video mode, using {}x{}",
                chosen.width, chosen.height
            ),
        );
    }

    log::debug!(
        "exclusive fullscreen {}x{} @ {} mHz",
        chosen.width,
        chosen.height,
        chosen.refresh_millihertz
    );
    window.set_fullscreen(Some(Fullscreen::Exclusive(modes[index].clone())));
}

fn set_cursor_mode(window: &NativeWindow, ctx: &mut WindowCtx, mode: CursorMode) {
    let grab = match mode {
        CursorMode::Normal | CursorMode::Hidden => window.set_cursor_grab(CursorGrabMode::None),
        // Not every platform can lock the pointer; confining it is the next best.
        CursorMode::Grabbed => window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined)),
    };

    if let Err(err) = grab {
        record_warning(ctx, "cursor", format!("cursor grab failed: {err}"));
    }

    window.set_cursor_visible(mode == CursorMode::Normal);
    ctx.snapshot_mut().cursor = Some(mode);
}

/// Logs a runtime warning and records it in the window diagnostics under
/// `window > <context>`.
fn record_warning(ctx: &mut WindowCtx, context: &str, text: impl Into<String>) {
    let text = text.into();
    log::warn!("{context}: {text}");

    let diag = ctx.diagnostics_mut();
    diag.push(context);
    diag.add_warning(text);
    diag.fold();
}
