use anyhow::Result;

use crate::core::App;
use crate::device::GpuInit;
use crate::input::Listeners;

use super::runtime::Runtime;

/// Window/runtime configuration.
///
/// Sizes are logical pixels, positions physical pixels (as the platform
/// reports window positions).
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub visible: bool,
    pub decorated: bool,
    pub maximized: bool,
    pub position: Option<(i32, i32)>,
    /// Open borderless-fullscreen on the current monitor.
    pub fullscreen: bool,
    pub vsync: bool,
    /// Requested MSAA sample count; 1 disables MSAA.
    pub samples: u32,
    pub gpu: GpuInit,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "aby".to_string(),
            width: 1280,
            height: 720,
            resizable: true,
            visible: true,
            decorated: true,
            maximized: false,
            position: None,
            fullscreen: false,
            vsync: true,
            samples: 1,
            gpu: GpuInit::default(),
        }
    }
}

/// Collects creation hints and produces a [`Window`].
///
/// ```no_run
/// use aby_engine::window::WindowBuilder;
///
/// let window = WindowBuilder::new()
///     .title("demo")
///     .size(800, 600)
///     .samples(4)
///     .build();
/// window.run(()).unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct WindowBuilder {
    config: WindowConfig,
}

impl WindowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.config.resizable = resizable;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.config.visible = visible;
        self
    }

    pub fn decorated(mut self, decorated: bool) -> Self {
        self.config.decorated = decorated;
        self
    }

    pub fn maximized(mut self, maximized: bool) -> Self {
        self.config.maximized = maximized;
        self
    }

    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.config.position = Some((x, y));
        self
    }

    pub fn fullscreen(mut self, fullscreen: bool) -> Self {
        self.config.fullscreen = fullscreen;
        self
    }

    pub fn vsync(mut self, vsync: bool) -> Self {
        self.config.vsync = vsync;
        self
    }

    pub fn samples(mut self, samples: u32) -> Self {
        self.config.samples = samples;
        self
    }

    pub fn gpu(mut self, gpu: GpuInit) -> Self {
        self.config.gpu = gpu;
        self
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn build(self) -> Window {
        Window { config: self.config, listeners: Listeners::default() }
    }
}

/// A configured window with its event listeners, not yet opened.
///
/// [`run`](Self::run) opens it and blocks until it closes.
#[derive(Debug)]
pub struct Window {
    config: WindowConfig,
    listeners: Listeners,
}

impl Window {
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Listener registry for this window.
    pub fn events(&mut self) -> &mut Listeners {
        &mut self.listeners
    }

    /// Opens the window and runs the event loop until the window should close.
    ///
    /// Fails when the event loop, the window or its GPU surface cannot be created.
    pub fn run<A>(self, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        Runtime::run(self.config, self.listeners, app)
    }
}
