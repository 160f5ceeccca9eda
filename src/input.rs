//! Key bindings shared by the local and remote front-ends.

use crossterm::event::KeyCode;

/// Which kind of screen is showing; decides how keys are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Welcome,
    Question,
    Review,
    /// Connecting, disconnected, waiting.
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    SelectNext,
    SelectPrevious,
    ToggleHint,
    Next,
    Previous,
    ScrollDown,
    ScrollUp,
    Restart,
    Quit,
}

pub fn action_for(phase: Phase, key: KeyCode) -> Option<Action> {
    if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')) {
        return Some(Action::Quit);
    }

    match phase {
        Phase::Welcome => match key {
            KeyCode::Enter => Some(Action::Start),
            KeyCode::Esc => Some(Action::Quit),
            _ => None,
        },
        Phase::Question => match key {
            KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrevious),
            KeyCode::Char('h') | KeyCode::Char('?') => Some(Action::ToggleHint),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => {
                Some(Action::Next)
            }
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('p') => Some(Action::Previous),
            _ => None,
        },
        Phase::Review => match key {
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Restart),
            KeyCode::Esc => Some(Action::Quit),
            _ => None,
        },
        Phase::Status => match key {
            KeyCode::Esc | KeyCode::Enter => Some(Action::Quit),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_works_everywhere() {
        for phase in [Phase::Welcome, Phase::Question, Phase::Review, Phase::Status] {
            assert_eq!(action_for(phase, KeyCode::Char('q')), Some(Action::Quit));
        }
    }

    #[test]
    fn test_question_bindings() {
        assert_eq!(
            action_for(Phase::Question, KeyCode::Char('j')),
            Some(Action::SelectNext)
        );
        assert_eq!(action_for(Phase::Question, KeyCode::Enter), Some(Action::Next));
        assert_eq!(
            action_for(Phase::Question, KeyCode::Backspace),
            Some(Action::Previous)
        );
        assert_eq!(action_for(Phase::Question, KeyCode::Char('r')), None);
    }

    #[test]
    fn test_restart_only_from_review() {
        assert_eq!(
            action_for(Phase::Review, KeyCode::Char('r')),
            Some(Action::Restart)
        );
        assert_eq!(action_for(Phase::Welcome, KeyCode::Char('r')), None);
        assert_eq!(action_for(Phase::Review, KeyCode::Enter), None);
    }
}
