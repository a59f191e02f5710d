use std::fmt;

use sim_state::SimWorld;

use crate::action::SyncedAction;
use crate::registry::CommandSpec;

/// Why the execution gate denied a handler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    CheatRequired,
    InvalidPlayer,
}

impl fmt::Display for Refusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Refusal::CheatRequired => write!(f, "cheating is not enabled"),
            Refusal::InvalidPlayer => write!(f, "issuer is not a valid player"),
        }
    }
}

/// Decides whether a handler may run for this action.
///
/// The decision consults only synchronized state (the cheat flag, the
/// player directory) and the registration-time command spec, so every
/// participant reaches the same verdict for the same action. Wall-clock
/// time, local RNG and unsynced UI state must never appear here.
///
/// Commands with `requires_player` need a seated, registered issuer because
/// they act on the issuer's team; for everything else an absent issuer
/// (system/autohost) bypasses the per-player check.
pub fn authorize(
    spec: &CommandSpec,
    action: &SyncedAction,
    world: &SimWorld,
) -> Result<(), Refusal> {
    if spec.requires_cheat && !world.global.cheat_enabled {
        return Err(Refusal::CheatRequired);
    }
    if spec.requires_player {
        match action.player() {
            Some(id) if world.players.is_valid_player(id) => {}
            _ => return Err(Refusal::InvalidPlayer),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CommandId;
    use sim_state::{Player, PlayerId, TeamId};

    fn spec(requires_cheat: bool, requires_player: bool) -> CommandSpec {
        CommandSpec {
            id: CommandId::Give,
            requires_cheat,
            requires_player,
            description: "",
        }
    }

    fn world_with_player() -> SimWorld {
        let mut world = SimWorld::new(1);
        world.players.insert(
            PlayerId(0),
            Player {
                team: TeamId(0),
                active: true,
                spectator: false,
            },
        );
        world
    }

    #[test]
    fn cheat_requirement_tracks_the_synced_flag() {
        let mut world = world_with_player();
        let action = SyncedAction::new("give", "", Some(PlayerId(0)));

        assert_eq!(
            authorize(&spec(true, false), &action, &world),
            Err(Refusal::CheatRequired)
        );
        world.global.cheat_enabled = true;
        assert_eq!(authorize(&spec(true, false), &action, &world), Ok(()));
    }

    #[test]
    fn player_requirement_rejects_autohost_and_unknown_issuers() {
        let world = world_with_player();
        let spec = spec(false, true);

        let autohost = SyncedAction::new("give", "", None);
        assert_eq!(
            authorize(&spec, &autohost, &world),
            Err(Refusal::InvalidPlayer)
        );

        let stranger = SyncedAction::new("give", "", Some(PlayerId(9)));
        assert_eq!(
            authorize(&spec, &stranger, &world),
            Err(Refusal::InvalidPlayer)
        );

        let seated = SyncedAction::new("give", "", Some(PlayerId(0)));
        assert_eq!(authorize(&spec, &seated, &world), Ok(()));
    }

    #[test]
    fn autohost_bypasses_player_checks_when_not_required() {
        let world = world_with_player();
        let autohost = SyncedAction::new("cheat", "", None);
        assert_eq!(authorize(&spec(false, false), &autohost, &world), Ok(()));
    }
}
