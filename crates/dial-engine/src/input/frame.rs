use std::collections::HashSet;

use super::types::MouseButton;

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held buttons, pointer position).
/// `InputFrame` provides the transitions since the last frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Mouse buttons released this frame after a press inside the window.
    pub buttons_released: HashSet<MouseButton>,

    /// Whether the pointer moved inside the window this frame.
    pub pointer_moved: bool,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.buttons_released.clear();
        self.pointer_moved = false;
    }

    /// A button counts as clicked once it has been released this frame.
    pub fn clicked(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }
}
