use std::fmt;

use crate::core::WindowCtx;

use super::types::{EventData, EventKind};

/// Callback invoked with the window controls and the event that fired.
pub type Listener = Box<dyn FnMut(&mut WindowCtx, &EventData)>;

/// Per-kind listener lists.
///
/// Listeners of a kind run in registration order. There is no removal; a
/// listener lives as long as the window.
pub struct Listeners {
    by_kind: [Vec<Listener>; EventKind::COUNT],
}

impl Default for Listeners {
    fn default() -> Self {
        Self { by_kind: std::array::from_fn(|_| Vec::new()) }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for kind in EventKind::ALL {
            map.entry(&kind, &self.by_kind[kind.index()].len());
        }
        map.finish()
    }
}

impl Listeners {
    /// Registers `listener` for events of `kind`.
    pub fn on<F>(&mut self, kind: EventKind, listener: F) -> &mut Self
    where
        F: FnMut(&mut WindowCtx, &EventData) + 'static,
    {
        self.by_kind[kind.index()].push(Box::new(listener));
        self
    }

    pub fn on_mouse_move<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut WindowCtx, &EventData) + 'static,
    {
        self.on(EventKind::MouseMove, f)
    }

    pub fn on_mouse_down<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut WindowCtx, &EventData) + 'static,
    {
        self.on(EventKind::MousePress, f)
    }

    pub fn on_mouse_up<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut WindowCtx, &EventData) + 'static,
    {
        self.on(EventKind::MouseRelease, f)
    }

    pub fn on_mouse_scroll<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut WindowCtx, &EventData) + 'static,
    {
        self.on(EventKind::MouseScroll, f)
    }

    pub fn on_key_down<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut WindowCtx, &EventData) + 'static,
    {
        self.on(EventKind::KeyPress, f)
    }

    pub fn on_key_up<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut WindowCtx, &EventData) + 'static,
    {
        self.on(EventKind::KeyRelease, f)
    }

    pub fn on_window_move<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut WindowCtx, &EventData) + 'static,
    {
        self.on(EventKind::WindowMove, f)
    }

    pub fn on_window_resize<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut WindowCtx, &EventData) + 'static,
    {
        self.on(EventKind::WindowResize, f)
    }

    pub fn on_focus<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut WindowCtx, &EventData) + 'static,
    {
        self.on(EventKind::Focus, f)
    }

    pub fn on_blur<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut WindowCtx, &EventData) + 'static,
    {
        self.on(EventKind::Blur, f)
    }

    /// Number of listeners registered for `kind`.
    pub fn count(&self, kind: EventKind) -> usize {
        self.by_kind[kind.index()].len()
    }

    /// Runs every listener registered for `data.kind`.
    pub fn dispatch(&mut self, ctx: &mut WindowCtx, data: &EventData) {
        for listener in &mut self.by_kind[data.kind.index()] {
            listener(ctx, data);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn data(kind: EventKind) -> EventData {
        EventData { kind, ..EventData::default() }
    }

    #[test]
    fn dispatch_routes_by_kind() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();

        let h = hits.clone();
        listeners.on_key_down(move |_, _| h.borrow_mut().push("down"));
        let h = hits.clone();
        listeners.on_key_up(move |_, _| h.borrow_mut().push("up"));

        let mut ctx = WindowCtx::detached(800, 600);
        listeners.dispatch(&mut ctx, &data(EventKind::KeyRelease));
        listeners.dispatch(&mut ctx, &data(EventKind::MouseMove));

        assert_eq!(*hits.borrow(), ["up"]);
    }

    #[test]
    fn dispatch_runs_in_registration_order() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();

        for i in 0..3 {
            let h = hits.clone();
            listeners.on_focus(move |_, _| h.borrow_mut().push(i));
        }
        assert_eq!(listeners.count(EventKind::Focus), 3);

        let mut ctx = WindowCtx::detached(800, 600);
        listeners.dispatch(&mut ctx, &data(EventKind::Focus));

        assert_eq!(*hits.borrow(), [0, 1, 2]);
    }

    #[test]
    fn listeners_can_drive_the_window() {
        let mut listeners = Listeners::default();
        listeners.on_key_down(|ctx, d| {
            if d.key == Some(crate::input::Key::Escape) {
                ctx.set_should_close(true);
            }
        });

        let mut ctx = WindowCtx::detached(800, 600);
        let mut d = data(EventKind::KeyPress);

        d.key = Some(crate::input::Key::Space);
        listeners.dispatch(&mut ctx, &d);
        assert!(!ctx.should_close());

        d.key = Some(crate::input::Key::Escape);
        listeners.dispatch(&mut ctx, &d);
        assert!(ctx.should_close());
    }

    #[test]
    fn listeners_keep_state_between_calls() {
        let mut count = 0;
        let seen = Rc::new(RefCell::new(0));
        let s = seen.clone();

        let mut listeners = Listeners::default();
        listeners.on_mouse_scroll(move |_, _| {
            count += 1;
            *s.borrow_mut() = count;
        });

        let mut ctx = WindowCtx::detached(1, 1);
        for _ in 0..4 {
            listeners.dispatch(&mut ctx, &data(EventKind::MouseScroll));
        }
        assert_eq!(*seen.borrow(), 4);
    }
}
