use std::collections::BTreeMap;

use thiserror::Error;

/// Closed set of synced commands. Dispatch is an exhaustive match over this
/// enum, so adding a command without wiring its handler fails to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    Cheat,
    NoHelp,
    NoSpecDraw,
    GodMode,
    GlobalLos,
    NoCost,
    Give,
    Destroy,
    NoSpectatorChat,
    ReloadCob,
    ReloadCegs,
    DevLua,
    EditDefs,
    LuaRules,
    LuaGaia,
    Desync,
    Atm,
    Take,
    Skip,
}

/// Per-command requirements recorded at registration time and consulted by
/// the execution gate on every dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub id: CommandId,
    pub requires_cheat: bool,
    pub requires_player: bool,
    pub description: &'static str,
}

/// Session-fixed mod configuration consulted once, at registration.
///
/// A command a config flag disables is simply never registered, so the
/// decision needs no per-action synchronization: the table shape is fixed
/// for the game's duration and identical on every participant.
#[derive(Debug, Clone, Copy)]
pub struct ModConfig {
    pub allow_take: bool,
    pub enable_gaia: bool,
    pub allow_desync_debug: bool,
}

impl Default for ModConfig {
    fn default() -> Self {
        Self {
            allow_take: true,
            enable_gaia: true,
            allow_desync_debug: false,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegisterError {
    #[error("command '{0}' is already registered")]
    Duplicate(String),
}

/// Name-to-spec table owned by the simulation session.
///
/// Explicitly constructed and passed by reference into dispatch; there is
/// no process-wide singleton and no second registration path.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    entries: BTreeMap<String, CommandSpec>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command under a case-insensitive name. Duplicate names
    /// are reported to the caller instead of panicking.
    pub fn register(&mut self, name: &str, spec: CommandSpec) -> Result<(), RegisterError> {
        let key = name.to_ascii_lowercase();
        if self.entries.contains_key(&key) {
            return Err(RegisterError::Duplicate(key));
        }
        self.entries.insert(key, spec);
        Ok(())
    }

    pub fn lookup(&self, command: &str) -> Option<&CommandSpec> {
        self.entries.get(&command.to_ascii_lowercase())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the standard synced command table for one session.
    pub fn with_default_commands(config: &ModConfig) -> Self {
        let mut registry = Self::new();
        let mut add = |name: &str, spec: CommandSpec| {
            // The default table uses unique literal names; a collision here
            // is a programming error worth surfacing immediately in tests.
            if let Err(err) = registry.register(name, spec) {
                debug_assert!(false, "default command table: {err}");
            }
        };

        add(
            "cheat",
            CommandSpec {
                id: CommandId::Cheat,
                requires_cheat: false,
                requires_player: false,
                description: "Enables/Disables cheating, which is required for a lot of other commands to be usable",
            },
        );
        add(
            "nohelp",
            CommandSpec {
                id: CommandId::NoHelp,
                requires_cheat: false,
                requires_player: false,
                description: "Enables/Disables helper AIs",
            },
        );
        add(
            "nospecdraw",
            CommandSpec {
                id: CommandId::NoSpecDraw,
                requires_cheat: false,
                requires_player: false,
                description: "Allows/Disallows spectators to draw on the map",
            },
        );
        add(
            "godmode",
            CommandSpec {
                id: CommandId::GodMode,
                requires_cheat: true,
                requires_player: false,
                description: "Enables/Disables god-mode, which allows all players (even spectators) to control all units",
            },
        );
        add(
            "globallos",
            CommandSpec {
                id: CommandId::GlobalLos,
                requires_cheat: true,
                requires_player: false,
                description: "Enables/Disables global line-of-sight for everyone or one allyteam",
            },
        );
        add(
            "nocost",
            CommandSpec {
                id: CommandId::NoCost,
                requires_cheat: true,
                requires_player: false,
                description: "Enables/Disables everything-for-free (zero resource costs)",
            },
        );
        add(
            "give",
            CommandSpec {
                id: CommandId::Give,
                requires_cheat: true,
                requires_player: true,
                description: "Places one or multiple units on the map, by default for your own team",
            },
        );
        add(
            "destroy",
            CommandSpec {
                id: CommandId::Destroy,
                requires_cheat: true,
                requires_player: false,
                description: "Destroys one or multiple units by unit-ID",
            },
        );
        add(
            "nospectatorchat",
            CommandSpec {
                id: CommandId::NoSpectatorChat,
                requires_cheat: false,
                requires_player: false,
                description: "Enables/Disables spectator chat",
            },
        );
        add(
            "reloadcob",
            CommandSpec {
                id: CommandId::ReloadCob,
                requires_cheat: true,
                requires_player: false,
                description: "Reloads unit scripts",
            },
        );
        add(
            "reloadcegs",
            CommandSpec {
                id: CommandId::ReloadCegs,
                requires_cheat: true,
                requires_player: false,
                description: "Reloads explosion generators",
            },
        );
        add(
            "devlua",
            CommandSpec {
                id: CommandId::DevLua,
                requires_cheat: true,
                requires_player: false,
                description: "Enables/Disables Lua dev-mode (can cause desyncs if enabled)",
            },
        );
        add(
            "editdefs",
            CommandSpec {
                id: CommandId::EditDefs,
                requires_cheat: true,
                requires_player: false,
                description: "Allows/Disallows editing of unit-, feature- and weapon-defs through Lua",
            },
        );
        add(
            "luarules",
            CommandSpec {
                id: CommandId::LuaRules,
                requires_cheat: false,
                requires_player: false,
                description: "Reloads or disables LuaRules, or sends it a chat message",
            },
        );
        if config.enable_gaia {
            add(
                "luagaia",
                CommandSpec {
                    id: CommandId::LuaGaia,
                    requires_cheat: false,
                    requires_player: false,
                    description: "Reloads or disables LuaGaia, or sends it a chat message",
                },
            );
        }
        if config.allow_desync_debug {
            add(
                "desync",
                CommandSpec {
                    id: CommandId::Desync,
                    requires_cheat: true,
                    requires_player: false,
                    description: "Deliberately desyncs the issuing client from the other participants",
                },
            );
        }
        add(
            "atm",
            CommandSpec {
                id: CommandId::Atm,
                requires_cheat: true,
                requires_player: true,
                description: "Gives 1000 metal and 1000 energy to the issuing player's team",
            },
        );
        if config.allow_take {
            add(
                "take",
                CommandSpec {
                    id: CommandId::Take,
                    requires_cheat: false,
                    requires_player: true,
                    description: "Transfers all units of abandoned allied teams to the issuing player's team",
                },
            );
        }
        add(
            "skip",
            CommandSpec {
                id: CommandId::Skip,
                requires_cheat: false,
                requires_player: false,
                description: "Fast-forwards to a given frame, or stops fast-forwarding",
            },
        );

        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_registration_is_reported_not_thrown() {
        let mut registry = CommandRegistry::new();
        let spec = CommandSpec {
            id: CommandId::Cheat,
            requires_cheat: false,
            requires_player: false,
            description: "",
        };
        registry.register("Cheat", spec).expect("first");
        assert_eq!(
            registry.register("cheat", spec),
            Err(RegisterError::Duplicate("cheat".to_string()))
        );
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let registry = CommandRegistry::with_default_commands(&ModConfig::default());
        assert!(registry.lookup("GlobalLOS").is_some());
        assert!(registry.lookup("globallos").is_some());
        assert!(registry.lookup("nosuchcommand").is_none());
    }

    #[test]
    fn config_flags_shape_the_table_at_registration() {
        let full = CommandRegistry::with_default_commands(&ModConfig {
            allow_take: true,
            enable_gaia: true,
            allow_desync_debug: true,
        });
        assert!(full.lookup("take").is_some());
        assert!(full.lookup("luagaia").is_some());
        assert!(full.lookup("desync").is_some());

        let bare = CommandRegistry::with_default_commands(&ModConfig {
            allow_take: false,
            enable_gaia: false,
            allow_desync_debug: false,
        });
        assert!(bare.lookup("take").is_none());
        assert!(bare.lookup("luagaia").is_none());
        assert!(bare.lookup("desync").is_none());
        assert_eq!(bare.len(), full.len() - 3);
    }
}
