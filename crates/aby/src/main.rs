mod controls;

use std::io;
use std::process::ExitCode;

use aby_engine::core::{App, WindowCtx};
use aby_engine::logging::{LoggingConfig, init_logging};
use aby_engine::window::WindowBuilder;

/// The game shell: a window that clears every frame.
struct Aby;

impl App for Aby {
    fn on_open(&mut self, ctx: &mut WindowCtx) {
        println!("Graphics API version : {}", ctx.adapter_summary());

        // Unmet window hints (vsync, MSAA, sRGB) are reported, not fatal.
        if let Err(err) = ctx.diagnostics().write_to(&mut io::stderr()) {
            log::warn!("failed to write window diagnostics: {err}");
        }
    }
}

fn open_window() -> anyhow::Result<()> {
    let (width, height) = controls::WINDOWED_SIZE;

    let mut window = WindowBuilder::new()
        .title("Aby - The 3D labyrinth game")
        .size(width, height)
        .resizable(true)
        .samples(4)
        .vsync(true)
        .build();

    controls::register(window.events());

    window.run(Aby)
}

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match open_window() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error while creating the window : {err:#}");
            ExitCode::FAILURE
        }
    }
}
