//! Purpose: Closed vocabularies observed from the game client, plus the
//! enum validator that checks decoded scalars against them.
//! Exports: `Vocabulary`, `validate_enum`, and one constant per vocabulary.
//! Role: Single source of truth for every enum-backed field.
//! Invariants: Absence is always valid; a present non-member yields exactly
//! one diagnostic carrying the offending value and the full allowed set.

use crate::core::diag::Diagnostic;

/// A fixed, enumerable set of valid string values for one field.
#[derive(Clone, Copy, Debug)]
pub struct Vocabulary {
    pub name: &'static str,
    pub members: &'static [&'static str],
}

impl Vocabulary {
    pub fn contains(&self, value: &str) -> bool {
        self.members.contains(&value)
    }
}

/// Checks `value` against `vocab`. Absent values are valid by definition:
/// the client may simply not report a field.
pub fn validate_enum(
    path: &str,
    value: Option<&str>,
    vocab: &Vocabulary,
) -> Option<Diagnostic> {
    let value = value?;
    if vocab.contains(value) {
        return None;
    }
    Some(Diagnostic::new(
        path,
        format!(
            "'{value}' is not a known {}; allowed: {}",
            vocab.name,
            vocab.members.join(", ")
        ),
    ))
}

pub const BOMB_STATES: Vocabulary = Vocabulary {
    name: "bomb state",
    members: &[
        "carried", "dropped", "planting", "planted", "defusing", "defused", "exploded",
    ],
};

pub const WEAPON_NAMES: Vocabulary = Vocabulary {
    name: "weapon name",
    members: &[
        "weapon_c4",
        "weapon_knife",
        "weapon_knife_t",
        "weapon_taser",
        "weapon_shield",
        "weapon_bumpmine",
        "weapon_breachcharge",
        "weapon_decoy",
        "weapon_flashbang",
        "weapon_healthshot",
        "weapon_hegrenade",
        "weapon_incgrenade",
        "weapon_molotov",
        "weapon_smokegrenade",
        "weapon_tagrenade",
        "weapon_m249",
        "weapon_mag7",
        "weapon_negev",
        "weapon_nova",
        "weapon_sawedoff",
        "weapon_xm1014",
        "weapon_cz75a",
        "weapon_deagle",
        "weapon_elite",
        "weapon_fiveseven",
        "weapon_glock",
        "weapon_hkp2000",
        "weapon_p250",
        "weapon_revolver",
        "weapon_tec9",
        "weapon_usp_silencer",
        "weapon_ak47",
        "weapon_aug",
        "weapon_awp",
        "weapon_famas",
        "weapon_g3sg1",
        "weapon_galilar",
        "weapon_m4a1",
        "weapon_m4a1_silencer",
        "weapon_scar20",
        "weapon_sg556",
        "weapon_ssg08",
        "weapon_bizon",
        "weapon_mac10",
        "weapon_mp5sd",
        "weapon_mp7",
        "weapon_mp9",
        "weapon_p90",
        "weapon_ump45",
    ],
};

pub const WEAPON_TYPES: Vocabulary = Vocabulary {
    name: "weapon type",
    members: &[
        "Pistol",
        "Knife",
        "Rifle",
        "SniperRifle",
        "Submachine Gun",
        "C4",
        "Grenade",
        "Shotgun",
        "Machine Gun",
        "StackableItem",
    ],
};

pub const WEAPON_STATES: Vocabulary = Vocabulary {
    name: "weapon state",
    members: &["active", "holstered", "reloading"],
};

pub const GRENADE_TYPES: Vocabulary = Vocabulary {
    name: "grenade type",
    members: &["decoy", "frag", "flashbang", "smoke", "inferno", "firebomb"],
};

pub const MAP_PHASES: Vocabulary = Vocabulary {
    name: "map phase",
    members: &["warmup", "live", "intermission", "gameover"],
};

// Further modes likely exist; these are the ones observed so far.
pub const GAME_MODES: Vocabulary = Vocabulary {
    name: "game mode",
    members: &["competitive", "casual", "deathmatch"],
};

pub const ROUND_WIN_CONDITIONS: Vocabulary = Vocabulary {
    name: "round win condition",
    members: &[
        "ct_win_elimination",
        "t_win_elimination",
        "ct_win_defuse",
        "t_win_bomb",
        "ct_win_time",
    ],
};

pub const ROUND_PHASES: Vocabulary = Vocabulary {
    name: "round phase",
    members: &["freezetime", "live", "over"],
};

// Superset of the round phases with the bomb, defuse and warmup countdowns.
pub const COUNTDOWN_PHASES: Vocabulary = Vocabulary {
    name: "countdown phase",
    members: &["freezetime", "live", "over", "bomb", "defuse", "warmup"],
};

pub const PLAYER_ACTIVITIES: Vocabulary = Vocabulary {
    name: "player activity",
    members: &["playing", "menu", "textinput"],
};

pub const TEAMS: Vocabulary = Vocabulary {
    name: "team",
    members: &["T", "CT"],
};

#[cfg(test)]
mod tests {
    use super::{BOMB_STATES, TEAMS, WEAPON_NAMES, validate_enum};

    #[test]
    fn absent_value_is_always_valid() {
        assert!(validate_enum("bomb.state", None, &BOMB_STATES).is_none());
    }

    #[test]
    fn member_value_yields_no_diagnostic() {
        for member in BOMB_STATES.members {
            assert!(validate_enum("bomb.state", Some(member), &BOMB_STATES).is_none());
        }
    }

    #[test]
    fn non_member_names_path_value_and_allowed_set() {
        let diag = validate_enum("round.win_team", Some("XX"), &TEAMS).expect("diagnostic");
        assert_eq!(diag.path, "round.win_team");
        assert!(diag.message.contains("'XX'"));
        assert!(diag.message.contains("T, CT"));
    }

    #[test]
    fn weapon_names_cover_the_observed_set() {
        assert_eq!(WEAPON_NAMES.members.len(), 49);
        assert!(WEAPON_NAMES.contains("weapon_ak47"));
        assert!(!WEAPON_NAMES.contains("weapon_portalgun"));
    }
}
