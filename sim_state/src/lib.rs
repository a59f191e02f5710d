//! Synchronized simulation state for the Basalt lockstep prototype.
//!
//! Everything in this crate is part of the lockstep contract: two
//! participants that apply the same ordered action stream to the same
//! starting [`SimWorld`] must end up with bit-identical state, as probed by
//! [`world_hash`]. Local presentation state lives in [`LocalState`] and is
//! deliberately excluded from that contract.

mod global;
mod hashing;
mod los;
mod players;
mod skip;
mod teams;
mod units;
mod world;

pub use global::GlobalState;
pub use hashing::{world_hash, FnvHasher, HashError};
pub use los::GlobalLosTable;
pub use players::{Player, PlayerDirectory, PlayerId};
pub use skip::SkipState;
pub use teams::{AllyTeamId, Team, TeamDirectory, TeamId};
pub use units::{DeathEvent, KillRejected, Unit, UnitId, UnitRegistry};
pub use world::{LocalState, SimWorld};
