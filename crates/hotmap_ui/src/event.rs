use serde::{Deserialize, Serialize};

use crate::Point;

/// Input events delivered to a canvas editor.
///
/// Positions are in screen space, relative to the canvas origin.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Mouse button pressed.
    MousePressed {
        button: MouseButton,
        position: Point,
        modifiers: KeyModifiers,
    },
    /// Mouse button released.
    MouseReleased { button: MouseButton, position: Point },
    /// Mouse moved.
    MouseMoved { position: Point },
    /// Mouse wheel scrolled. Positive delta zooms in.
    MouseWheel { delta: f32, position: Point },
    /// Keyboard key pressed.
    KeyPressed {
        key: KeyCode,
        modifiers: KeyModifiers,
    },
}

impl Event {
    /// Left-button press without modifiers.
    pub fn press(x: f32, y: f32) -> Self {
        Event::MousePressed {
            button: MouseButton::Left,
            position: Point::new(x, y),
            modifiers: KeyModifiers::default(),
        }
    }

    /// Left-button release.
    pub fn release(x: f32, y: f32) -> Self {
        Event::MouseReleased {
            button: MouseButton::Left,
            position: Point::new(x, y),
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Event::MouseMoved {
            position: Point::new(x, y),
        }
    }

    pub fn key(key: KeyCode) -> Self {
        Event::KeyPressed {
            key,
            modifiers: KeyModifiers::default(),
        }
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Keyboard keys the editors bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    Space,
}

/// Keyboard modifiers held while an event fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Cmd on macOS, the Windows key elsewhere.
    pub meta: bool,
}

impl KeyModifiers {
    pub const NONE: KeyModifiers = KeyModifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl (or Cmd) only.
    pub fn command() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    /// Ctrl (or Cmd) plus Shift.
    pub fn command_shift() -> Self {
        Self {
            ctrl: true,
            shift: true,
            ..Self::NONE
        }
    }

    /// Alt (Option on macOS) only.
    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::NONE
        }
    }

    /// True when the platform command modifier (Ctrl or Cmd) is held.
    pub fn has_command(&self) -> bool {
        self.ctrl || self.meta
    }
}
