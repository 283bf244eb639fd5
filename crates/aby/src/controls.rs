use aby_engine::core::WindowCtx;
use aby_engine::input::{EventData, Key, Listeners};

/// Windowed-mode geometry restored when leaving fullscreen.
pub const WINDOWED_SIZE: (u32, u32) = (800, 600);
pub const WINDOWED_POS: (i32, i32) = (50, 50);

/// Registers the global key bindings: Escape quits, F11 toggles fullscreen,
/// V toggles vsync.
pub fn register(listeners: &mut Listeners) {
    listeners.on_key_down(on_key);
}

fn on_key(ctx: &mut WindowCtx, data: &EventData) {
    match data.key {
        Some(Key::Escape) => ctx.set_should_close(true),
        Some(Key::F11) => toggle_fullscreen(ctx),
        Some(Key::V) => {
            let enabled = !ctx.vsync();
            log::info!("vsync {}", if enabled { "on" } else { "off" });
            ctx.set_vsync(enabled);
        }
        _ => {}
    }
}

fn toggle_fullscreen(ctx: &mut WindowCtx) {
    if ctx.is_fullscreen() {
        let (width, height) = WINDOWED_SIZE;
        let (x, y) = WINDOWED_POS;
        ctx.set_windowed_mode(width, height, x, y);
    } else {
        ctx.set_fullscreen_mode(None);
    }
}

#[cfg(test)]
mod tests {
    use aby_engine::core::WindowCommand;
    use aby_engine::input::EventKind;

    use super::*;

    fn press(key: Key) -> EventData {
        EventData {
            kind: EventKind::KeyPress,
            key: Some(key),
            is_key_press: true,
            ..EventData::default()
        }
    }

    fn setup() -> (Listeners, WindowCtx) {
        let mut listeners = Listeners::default();
        register(&mut listeners);
        (listeners, WindowCtx::detached(800, 600))
    }

    #[test]
    fn escape_requests_close() {
        let (mut listeners, mut ctx) = setup();
        listeners.dispatch(&mut ctx, &press(Key::Escape));
        assert!(ctx.should_close());
        assert!(ctx.pending_commands().is_empty());
    }

    #[test]
    fn f11_enters_fullscreen_from_windowed() {
        let (mut listeners, mut ctx) = setup();
        listeners.dispatch(&mut ctx, &press(Key::F11));
        assert_eq!(
            ctx.pending_commands(),
            [WindowCommand::SetFullscreen { refresh_hz: None }]
        );
    }

    #[test]
    fn v_flips_vsync() {
        let (mut listeners, mut ctx) = setup();
        assert!(!ctx.vsync());
        listeners.dispatch(&mut ctx, &press(Key::V));
        assert_eq!(ctx.pending_commands(), [WindowCommand::SetVsync(true)]);
    }

    #[test]
    fn releases_and_other_keys_are_ignored() {
        let (mut listeners, mut ctx) = setup();

        let release = EventData { kind: EventKind::KeyRelease, is_key_press: false, ..press(Key::Escape) };
        listeners.dispatch(&mut ctx, &release);
        listeners.dispatch(&mut ctx, &press(Key::W));

        assert!(!ctx.should_close());
        assert!(ctx.pending_commands().is_empty());
    }
}
