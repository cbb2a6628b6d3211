use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
    InputEvent,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
};

/// Current input state for a single window.
///
/// Holds the pointer position and which buttons are held, so a release only
/// counts when the press was seen by this window.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((x, y));
                frame.pointer_moved = true;
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }) => {
                self.pointer_pos = Some((x, y));

                match state {
                    MouseButtonState::Pressed => {
                        self.buttons_down.insert(button);
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(&button) {
                            frame.buttons_released.insert(button);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(state: MouseButtonState) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            x: 10.0,
            y: 20.0,
        })
    }

    #[test]
    fn press_then_release_is_a_click() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, button(MouseButtonState::Pressed));
        assert!(!frame.clicked(MouseButton::Left));

        state.apply_event(&mut frame, button(MouseButtonState::Released));
        assert!(frame.clicked(MouseButton::Left));
        assert_eq!(state.pointer_pos, Some((10.0, 20.0)));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, button(MouseButtonState::Released));
        assert!(!frame.clicked(MouseButton::Left));
    }

    #[test]
    fn each_press_yields_one_click() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, button(MouseButtonState::Pressed));
        state.apply_event(&mut frame, button(MouseButtonState::Released));
        frame.clear();

        state.apply_event(&mut frame, button(MouseButtonState::Released));
        assert!(!frame.clicked(MouseButton::Left));
    }

    #[test]
    fn pointer_moves_are_tracked_until_cleared() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 1.0, y: 2.0 }));
        assert!(frame.pointer_moved);

        frame.clear();
        assert!(!frame.pointer_moved);

        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
    }
}
