//! Input state shared between the host and the scene.
//!
//! The host owns the real event loop; it mirrors held keys and the pointer
//! position here so that components can poll them from `update` and the
//! input callbacks.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Keys the navigation components care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Plus,
    Minus,
    /// Any other key, by host key code.
    Other(u32),
}

impl Key {
    /// Whether this is one of the four arrow keys.
    pub const fn is_arrow(&self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::Left | Self::Right)
    }
}

/// Keyboard modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKey {
    Control,
    Shift,
    Alt,
}

/// Keys and modifiers currently held down.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<Key>,
    modifiers: HashSet<ModifierKey>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    pub fn set_modifier(&mut self, modifier: ModifierKey, held: bool) {
        if held {
            self.modifiers.insert(modifier);
        } else {
            self.modifiers.remove(&modifier);
        }
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn is_modifier_key_pressed(&self, modifier: ModifierKey) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Forget every held key and modifier (e.g. on focus loss).
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.modifiers.clear();
    }
}

/// Last known canvas geometry and pointer position, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    /// Pointer X relative to the canvas' top-left corner.
    pub mouse_x: i32,
    /// Pointer Y relative to the canvas' top-left corner, growing downwards.
    pub mouse_y: i32,
}

impl Viewport {
    /// Pointer position in normalized device coordinates (y up).
    pub fn mouse_ndc(&self) -> (f32, f32) {
        let (mx, my) = (self.mouse_x as f32, self.mouse_y as f32);
        let (w, h) = (self.width as f32, self.height as f32);
        (2.0 * (mx - w / 2.0) / w, -2.0 * (my - h / 2.0) / h)
    }
}
