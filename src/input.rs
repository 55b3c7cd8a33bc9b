//! Keyboard mapping
//!
//! Platform front ends pass raw key names (DOM `KeyboardEvent.key` values)
//! here. Directional keys become held intents; everything else becomes a
//! one-shot command.

use crate::driver::Session;
use crate::sim::GamePhase;

/// What a key means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    /// Start from the title screen, or play again after game over
    Confirm,
    Pause,
    Restart,
    ToggleAutopilot,
}

/// Map a key name to an action
pub fn action_for_key(key: &str) -> Option<Action> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Action::MoveUp),
        "ArrowDown" | "s" | "S" => Some(Action::MoveDown),
        " " | "Enter" => Some(Action::Confirm),
        "Escape" | "p" | "P" => Some(Action::Pause),
        "r" | "R" => Some(Action::Restart),
        "i" | "I" => Some(Action::ToggleAutopilot),
        _ => None,
    }
}

/// Apply a key press or release to the session.
///
/// Auto-repeated presses only refresh held intents; they never re-fire a
/// command. Returns true if the key is bound.
pub fn handle_key(session: &mut Session, key: &str, pressed: bool, repeat: bool) -> bool {
    let Some(action) = action_for_key(key) else {
        return false;
    };

    match action {
        Action::MoveUp => session.set_moving_up(pressed),
        Action::MoveDown => session.set_moving_down(pressed),
        _ if !pressed || repeat => {}
        Action::Confirm => match session.state().phase {
            GamePhase::Idle => session.start_game(),
            GamePhase::Over => session.restart_game(),
            GamePhase::Running | GamePhase::Paused => {}
        },
        Action::Pause => session.toggle_pause(),
        Action::Restart => session.restart_game(),
        Action::ToggleAutopilot => {
            let enabled = !session.autopilot();
            session.set_autopilot(enabled);
        }
    }
    true
}
