use winit::keyboard::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Start,
    Restart,
    ToggleOverlay,
    Quit,
}

const ACTION_COUNT: usize = 8;

/// Held flags per action. A key event overwrites the flag, so only the latest edge counts.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
            InputAction::Start => 4,
            InputAction::Restart => 5,
            InputAction::ToggleOverlay => 6,
            InputAction::Quit => 7,
        }
    }

    /// Actions that only fire once per physical press.
    pub(crate) const fn is_edge_triggered(self) -> bool {
        matches!(
            self,
            InputAction::Start | InputAction::Restart | InputAction::ToggleOverlay
        )
    }
}

/// Letter keys and arrow keys are synonyms for movement.
pub(crate) fn action_for_key(key: KeyCode) -> Option<InputAction> {
    match key {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(InputAction::MoveUp),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(InputAction::MoveDown),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(InputAction::MoveLeft),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(InputAction::MoveRight),
        KeyCode::Enter | KeyCode::NumpadEnter | KeyCode::Space => Some(InputAction::Start),
        KeyCode::KeyR => Some(InputAction::Restart),
        KeyCode::F3 => Some(InputAction::ToggleOverlay),
        KeyCode::Escape => Some(InputAction::Quit),
        _ => None,
    }
}
