use std::fmt;

/// Keyboard key identifier.
///
/// Physical keys are mapped to these variants where possible; everything else
/// is `Key::Unknown` carrying the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,
    Meta,

    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    Unknown(u32),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Mouse buttons reported to listeners. Extra buttons are reported as `None`
/// in [`EventData::button`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Mouse wheel delta.
///
/// `Line` corresponds to "scroll lines" style input; `Pixel` is high precision.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    pub const NONE: MouseWheelDelta = MouseWheelDelta::Line { x: 0.0, y: 0.0 };

    /// Vertical component, whatever the unit.
    pub fn y(&self) -> f32 {
        match *self {
            MouseWheelDelta::Line { y, .. } | MouseWheelDelta::Pixel { y, .. } => y,
        }
    }
}

impl Default for MouseWheelDelta {
    fn default() -> Self {
        Self::NONE
    }
}

/// Kinds of events listeners can subscribe to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EventKind {
    MouseMove,
    MousePress,
    MouseRelease,
    MouseScroll,
    KeyPress,
    KeyRelease,
    WindowMove,
    WindowResize,
    Focus,
    Blur,
}

impl EventKind {
    pub const COUNT: usize = 10;

    pub const ALL: [EventKind; Self::COUNT] = [
        EventKind::MouseMove,
        EventKind::MousePress,
        EventKind::MouseRelease,
        EventKind::MouseScroll,
        EventKind::KeyPress,
        EventKind::KeyRelease,
        EventKind::WindowMove,
        EventKind::WindowResize,
        EventKind::Focus,
        EventKind::Blur,
    ];

    /// Dense index in `0..COUNT`, for per-kind tables.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Platform-agnostic input, as produced by the platform translation layer.
///
/// Coordinates are physical pixels with a top-left origin, as the window
/// system reports them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RawEvent {
    Key { key: Key, pressed: bool, repeat: bool },
    CursorMoved { x: f64, y: f64 },
    MouseButton { button: Option<MouseButton>, pressed: bool },
    Scroll(MouseWheelDelta),
    Moved { x: i32, y: i32 },
    Resized { width: u32, height: u32 },
    Focused(bool),
    ModifiersChanged(Modifiers),
}

/// Snapshot handed to listeners.
///
/// Fields not touched by the current event keep the value set by the last
/// event that did, so a key listener can still read the mouse position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EventData {
    pub kind: EventKind,

    /// Pointer position; `mouse_y` grows upwards from the bottom edge.
    pub mouse_x: f64,
    pub mouse_y: f64,
    pub last_mouse_x: f64,
    pub last_mouse_y: f64,
    /// `mouse - last_mouse`.
    pub offset_x: f64,
    pub offset_y: f64,

    pub button: Option<MouseButton>,

    /// Wheel movement; zero for every event except `MouseScroll`.
    pub scroll: MouseWheelDelta,

    pub key: Option<Key>,
    /// True for presses and repeats, false for releases.
    pub is_key_press: bool,
    pub modifiers: Modifiers,

    pub window_width: u32,
    pub window_height: u32,
    pub window_x: i32,
    pub window_y: i32,

    /// Seconds since the runtime started.
    pub timestamp: f64,
    /// Seconds since the previous event of the same kind.
    pub interval: f64,
}

impl Default for EventData {
    fn default() -> Self {
        Self {
            kind: EventKind::WindowResize,
            mouse_x: 0.0,
            mouse_y: 0.0,
            last_mouse_x: 0.0,
            last_mouse_y: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            button: None,
            scroll: MouseWheelDelta::NONE,
            key: None,
            is_key_press: false,
            modifiers: Modifiers::default(),
            window_width: 0,
            window_height: 0,
            window_x: 0,
            window_y: 0,
            timestamp: 0.0,
            interval: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_indices_are_dense() {
        for (i, kind) in EventKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn wheel_y_ignores_unit() {
        assert_eq!(MouseWheelDelta::Line { x: 1.0, y: -2.0 }.y(), -2.0);
        assert_eq!(MouseWheelDelta::Pixel { x: 0.0, y: 12.5 }.y(), 12.5);
        assert_eq!(MouseWheelDelta::default().y(), 0.0);
    }

    #[test]
    fn modifiers_any() {
        assert!(!Modifiers::default().any());
        assert!(Modifiers { alt: true, ..Modifiers::default() }.any());
    }
}
