use sim_state::PlayerId;

/// One synced action as agreed by the lockstep layer.
///
/// Immutable once constructed; lives for a single dispatch. `player` is
/// `None` when the action was injected by the system or an autohost rather
/// than a seated participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedAction {
    command: String,
    args: String,
    player: Option<PlayerId>,
}

impl SyncedAction {
    pub fn new(
        command: impl Into<String>,
        args: impl Into<String>,
        player: Option<PlayerId>,
    ) -> Self {
        Self {
            command: command.into().to_ascii_lowercase(),
            args: args.into().trim().to_string(),
            player,
        }
    }

    /// Splits a raw `command [args...]` line. Returns `None` for blank
    /// input.
    pub fn from_line(line: &str, player: Option<PlayerId>) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.split_once(char::is_whitespace) {
            Some((command, args)) => Some(Self::new(command, args, player)),
            None => Some(Self::new(trimmed, "", player)),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn args(&self) -> &str {
        &self.args
    }

    pub fn player(&self) -> Option<PlayerId> {
        self.player
    }
}
