// src/engine/input.rs
use std::collections::HashSet;

use winit::event::{ElementState, KeyboardInput, VirtualKeyCode, WindowEvent};

/// Tracks which keys are currently held down.
#[derive(Debug, Default)]
pub struct Keyboard {
    held: HashSet<VirtualKeyCode>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a window event; returns the key if it was just pressed.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<VirtualKeyCode> {
        match event {
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state,
                        virtual_keycode: Some(keycode),
                        ..
                    },
                ..
            } => self.set(*keycode, *state),
            WindowEvent::Focused(false) => {
                // Releases are not delivered while unfocused
                self.held.clear();
                None
            }
            _ => None,
        }
    }

    pub fn set(&mut self, keycode: VirtualKeyCode, state: ElementState) -> Option<VirtualKeyCode> {
        match state {
            ElementState::Pressed => self.held.insert(keycode).then_some(keycode),
            ElementState::Released => {
                self.held.remove(&keycode);
                None
            }
        }
    }

    pub fn is_held(&self, keycode: VirtualKeyCode) -> bool {
        self.held.contains(&keycode)
    }
}

/// Keys that close any demo.
pub fn is_quit_key(keycode: VirtualKeyCode) -> bool {
    matches!(keycode, VirtualKeyCode::Escape | VirtualKeyCode::Q)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keyboard = Keyboard::new();
        assert_eq!(keyboard.set(VirtualKeyCode::A, ElementState::Pressed), Some(VirtualKeyCode::A));
        assert!(keyboard.is_held(VirtualKeyCode::A));

        // Key repeat is not a fresh press
        assert_eq!(keyboard.set(VirtualKeyCode::A, ElementState::Pressed), None);

        keyboard.set(VirtualKeyCode::A, ElementState::Released);
        assert!(!keyboard.is_held(VirtualKeyCode::A));
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit_key(VirtualKeyCode::Q));
        assert!(is_quit_key(VirtualKeyCode::Escape));
        assert!(!is_quit_key(VirtualKeyCode::W));
    }
}
