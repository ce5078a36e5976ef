/// Run state of the animation and the control that flips it.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    Paused,
}

impl RunState {
    /// Text for the pause button: the action a click would take.
    pub fn label(self) -> &'static str {
        match self {
            RunState::Running => "Pause",
            RunState::Paused => "Resume",
        }
    }

    pub fn is_paused(self) -> bool {
        self == RunState::Paused
    }

    fn flipped(self) -> Self {
        match self {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        }
    }
}

/// Two-state machine, starting Running. `toggle` is the only transition.
#[derive(Debug, Clone, Default)]
pub struct PauseController {
    state: RunState,
}

impl PauseController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the state and return the new one.
    pub fn toggle(&mut self) -> RunState {
        self.state = self.state.flipped();
        self.state
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }
}
