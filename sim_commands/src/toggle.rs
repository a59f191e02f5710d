use tracing::info;

/// Resolves a boolean-toggle argument against the flag's current value.
///
/// Empty input inverts. `1/true/yes/on` sets, `0/false/no/off` clears (both
/// case-insensitive); any other text falls back to inverting rather than
/// failing the dispatch. `invert_meaning` flips the set/clear tokens for
/// commands phrased negatively against their flag (e.g. a "no spectator
/// draw" command driving an "allow spectator draw" flag).
pub fn set_or_invert(current: bool, args: &str, invert_meaning: bool) -> bool {
    let token = args.trim().to_ascii_lowercase();
    let requested = match token.as_str() {
        "" => return !current,
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => return !current,
    };
    requested != invert_meaning
}

/// Emits the status line shared by the toggle family. Log output is local
/// only and exempt from the lockstep contract.
pub(crate) fn log_system_status(name: &str, enabled: bool) {
    info!(
        "{} is {}",
        name,
        if enabled { "enabled" } else { "disabled" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_argument_inverts() {
        assert!(set_or_invert(false, "", false));
        assert!(!set_or_invert(true, "", false));
    }

    #[test]
    fn empty_argument_twice_is_an_involution() {
        let start = false;
        let once = set_or_invert(start, "", false);
        assert_eq!(set_or_invert(once, "", false), start);
    }

    #[test]
    fn explicit_tokens_set_and_clear() {
        for token in ["1", "true", "YES", "On"] {
            assert!(set_or_invert(false, token, false));
        }
        for token in ["0", "false", "NO", "Off"] {
            assert!(!set_or_invert(true, token, false));
        }
    }

    #[test]
    fn invert_meaning_flips_explicit_tokens() {
        assert!(!set_or_invert(true, "1", true));
        assert!(set_or_invert(false, "off", true));
    }

    #[test]
    fn garbage_falls_back_to_inverting() {
        assert!(set_or_invert(false, "maybe", false));
        assert!(!set_or_invert(true, "maybe", false));
    }
}
