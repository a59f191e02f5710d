use serde::{Deserialize, Serialize};

/// Fast-forward sub-state machine.
///
/// This type only owns the start/stop transition; the fast-forward loop
/// itself belongs to the frame driver. Transitions are deliberately lenient:
/// `start` while already skipping replaces the target (last write wins) and
/// `end` while idle is a no-op, matching the permissive behavior players
/// rely on when correcting a mistyped target frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipState {
    #[default]
    Idle,
    Skipping {
        target_frame: i32,
    },
}

impl SkipState {
    pub fn start(&mut self, target_frame: i32) {
        *self = SkipState::Skipping { target_frame };
    }

    pub fn end(&mut self) {
        *self = SkipState::Idle;
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SkipState::Skipping { .. })
    }

    pub fn target_frame(&self) -> Option<i32> {
        match self {
            SkipState::Idle => None,
            SkipState::Skipping { target_frame } => Some(*target_frame),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_then_end_returns_to_idle() {
        let mut skip = SkipState::default();
        skip.start(100);
        assert_eq!(skip.target_frame(), Some(100));
        skip.end();
        assert_eq!(skip, SkipState::Idle);
    }

    #[test]
    fn restart_while_skipping_is_last_write_wins() {
        let mut skip = SkipState::default();
        skip.start(100);
        skip.start(50);
        assert_eq!(skip.target_frame(), Some(50));
    }

    #[test]
    fn end_while_idle_is_a_no_op() {
        let mut skip = SkipState::default();
        skip.end();
        assert!(!skip.is_active());
    }
}
