use std::collections::HashSet;

use crate::time::EventClock;

use super::types::{EventData, EventKind, Key, MouseButton, MouseWheelDelta, RawEvent};

/// Current input state for a single window.
///
/// Holds "is down" information and the data of the last dispatched event.
/// Each [`RawEvent`] updates the state and yields the [`EventData`] that
/// listeners receive.
#[derive(Debug, Clone)]
pub struct EventState {
    keys_down: HashSet<Key>,
    buttons_down: HashSet<MouseButton>,
    data: EventData,
    seen_pointer: bool,
}

impl EventState {
    /// Creates the state for a window of the given size and position.
    pub fn new(width: u32, height: u32, x: i32, y: i32) -> Self {
        Self {
            keys_down: HashSet::new(),
            buttons_down: HashSet::new(),
            data: EventData {
                window_width: width,
                window_height: height,
                window_x: x,
                window_y: y,
                ..EventData::default()
            },
            seen_pointer: false,
        }
    }

    /// Data of the last dispatched event.
    pub fn data(&self) -> &EventData {
        &self.data
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Applies `raw`, stamped with the clock's current time.
    ///
    /// Returns `None` for events listeners never see (modifier changes).
    pub fn apply(&mut self, raw: RawEvent, clock: &mut EventClock) -> Option<&EventData> {
        let now = clock.now();
        self.apply_at(raw, clock, now)
    }

    /// Applies `raw` with an explicit timestamp.
    pub fn apply_at(
        &mut self,
        raw: RawEvent,
        clock: &mut EventClock,
        timestamp: f64,
    ) -> Option<&EventData> {
        if let RawEvent::ModifiersChanged(m) = raw {
            self.data.modifiers = m;
            return None;
        }

        self.data.scroll = MouseWheelDelta::NONE;

        let kind = match raw {
            RawEvent::Key { key, pressed, repeat } => {
                self.data.key = Some(key);
                // Repeats count as presses.
                self.data.is_key_press = pressed || repeat;
                if self.data.is_key_press {
                    self.keys_down.insert(key);
                    EventKind::KeyPress
                } else {
                    self.keys_down.remove(&key);
                    EventKind::KeyRelease
                }
            }

            RawEvent::CursorMoved { x, y } => {
                let y = f64::from(self.data.window_height) - y;
                let (last_x, last_y) = if self.seen_pointer {
                    (self.data.mouse_x, self.data.mouse_y)
                } else {
                    self.seen_pointer = true;
                    (x, y)
                };

                self.data.mouse_x = x;
                self.data.mouse_y = y;
                self.data.last_mouse_x = last_x;
                self.data.last_mouse_y = last_y;
                self.data.offset_x = x - last_x;
                self.data.offset_y = y - last_y;
                EventKind::MouseMove
            }

            RawEvent::MouseButton { button, pressed } => {
                self.data.button = button;
                if let Some(b) = button {
                    if pressed {
                        self.buttons_down.insert(b);
                    } else {
                        self.buttons_down.remove(&b);
                    }
                }
                if pressed { EventKind::MousePress } else { EventKind::MouseRelease }
            }

            RawEvent::Scroll(delta) => {
                self.data.scroll = delta;
                EventKind::MouseScroll
            }

            RawEvent::Moved { x, y } => {
                self.data.window_x = x;
                self.data.window_y = y;
                EventKind::WindowMove
            }

            RawEvent::Resized { width, height } => {
                self.data.window_width = width;
                self.data.window_height = height;
                EventKind::WindowResize
            }

            RawEvent::Focused(true) => EventKind::Focus,

            RawEvent::Focused(false) => {
                // Releases are not delivered to unfocused windows.
                self.keys_down.clear();
                self.buttons_down.clear();
                EventKind::Blur
            }

            RawEvent::ModifiersChanged(_) => return None,
        };

        let time = clock.stamp_at(kind, timestamp);
        self.data.kind = kind;
        self.data.timestamp = time.timestamp;
        self.data.interval = time.interval;

        Some(&self.data)
    }
}
