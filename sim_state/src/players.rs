use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::teams::TeamId;

/// Identifier of one participating (or spectating) player.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub team: TeamId,
    pub active: bool,
    pub spectator: bool,
}

/// Registry of players known to the session.
///
/// Backed by a `BTreeMap` so iteration order is the id order on every
/// participant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDirectory {
    players: BTreeMap<PlayerId, Player>,
}

impl PlayerDirectory {
    pub fn insert(&mut self, id: PlayerId, player: Player) {
        self.players.insert(id, player);
    }

    pub fn is_valid_player(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter().map(|(id, player)| (*id, player))
    }

    /// True when at least one active, non-spectating player controls `team`.
    /// This is the abandonment test used by the `take` command and consults
    /// only synchronized player state.
    pub fn team_has_active_player(&self, team: TeamId) -> bool {
        self.players
            .values()
            .any(|player| player.active && !player.spectator && player.team == team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spectators_do_not_count_as_active_team_players() {
        let mut players = PlayerDirectory::default();
        players.insert(
            PlayerId(0),
            Player {
                team: TeamId(0),
                active: true,
                spectator: true,
            },
        );
        players.insert(
            PlayerId(1),
            Player {
                team: TeamId(0),
                active: false,
                spectator: false,
            },
        );
        assert!(!players.team_has_active_player(TeamId(0)));

        if let Some(p) = players.player_mut(PlayerId(1)) {
            p.active = true;
        }
        assert!(players.team_has_active_player(TeamId(0)));
    }
}
