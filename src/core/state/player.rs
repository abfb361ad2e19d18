use crate::core::coerce::{self, JsonMap};
use crate::core::diag::{Diagnostic, Validate, extend_prefixed, join_path};
use crate::core::state::{Equipment, Vec3};
use crate::core::vocab::{self, validate_enum};
use serde::Serialize;

/// Round-scoped player state. Intensities range 0 (none) to 255 (full);
/// burning jumps to 255 when ignited and decays once the player leaves
/// the fire.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PlayerState {
    pub health: Option<i64>,
    pub armor: Option<i64>,
    pub helmet: Option<bool>,
    pub flashed: Option<i64>,
    pub smoked: Option<i64>,
    pub burning: Option<i64>,
    pub money: Option<i64>,
    pub round_kills: Option<i64>,
    /// Head-shot kills this round; at most `round_kills`.
    pub round_killhs: Option<i64>,
    pub equip_value: Option<i64>,
    pub round_totaldmg: Option<i64>,
    pub defusekit: Option<bool>,
}

impl PlayerState {
    pub(crate) fn decode(doc: &JsonMap, path: &str, notes: &mut Vec<Diagnostic>) -> Self {
        let int =
            |doc: &JsonMap, key: &str, notes: &mut Vec<Diagnostic>| -> Option<i64> {
                coerce::integer(doc, key, &join_path(path, key), notes)
            };
        Self {
            health: int(doc, "health", notes),
            armor: int(doc, "armor", notes),
            helmet: coerce::boolean(doc, "helmet", &join_path(path, "helmet"), notes),
            flashed: int(doc, "flashed", notes),
            smoked: int(doc, "smoked", notes),
            burning: int(doc, "burning", notes),
            money: int(doc, "money", notes),
            round_kills: int(doc, "round_kills", notes),
            round_killhs: int(doc, "round_killhs", notes),
            equip_value: int(doc, "equip_value", notes),
            round_totaldmg: int(doc, "round_totaldmg", notes),
            defusekit: coerce::boolean(doc, "defusekit", &join_path(path, "defusekit"), notes),
        }
    }
}

/// Whole-match statistics of one player.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MatchStats {
    pub kills: Option<i64>,
    pub assists: Option<i64>,
    pub deaths: Option<i64>,
    pub mvps: Option<i64>,
    pub score: Option<i64>,
}

impl MatchStats {
    pub(crate) fn decode(doc: &JsonMap, path: &str, notes: &mut Vec<Diagnostic>) -> Self {
        let int =
            |doc: &JsonMap, key: &str, notes: &mut Vec<Diagnostic>| -> Option<i64> {
                coerce::integer(doc, key, &join_path(path, key), notes)
            };
        Self {
            kills: int(doc, "kills", notes),
            assists: int(doc, "assists", notes),
            deaths: int(doc, "deaths", notes),
            mvps: int(doc, "mvps", notes),
            score: int(doc, "score", notes),
        }
    }
}

/// The player currently active or spectated, or one `allplayers` entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Player {
    pub name: Option<String>,
    pub clan: Option<String>,
    /// May differ from the provider steamid when spectating.
    pub steamid: Option<String>,
    pub observer_slot: Option<i64>,
    /// `T` or `CT`; may be absent in the menu.
    pub team: Option<String>,
    /// playing, menu or textinput.
    pub activity: Option<String>,
    /// Steam id of the spectated player.
    pub spectarget: Option<String>,
    pub position: Option<Vec3>,
    pub forward: Option<Vec3>,
    pub state: Option<PlayerState>,
    pub match_stats: Option<MatchStats>,
    pub weapons: Option<Equipment>,
}

impl Player {
    pub(crate) fn decode(doc: &JsonMap, path: &str, notes: &mut Vec<Diagnostic>) -> Self {
        let state = coerce::object(doc, "state", &join_path(path, "state"), notes)
            .map(|state| PlayerState::decode(state, &join_path(path, "state"), notes));
        let match_stats = coerce::object(doc, "match_stats", &join_path(path, "match_stats"), notes)
            .map(|stats| MatchStats::decode(stats, &join_path(path, "match_stats"), notes));
        let weapons = coerce::object(doc, "weapons", &join_path(path, "weapons"), notes)
            .map(|weapons| Equipment::decode(weapons, &join_path(path, "weapons"), notes));
        Self {
            name: coerce::string(doc, "name", &join_path(path, "name"), notes),
            clan: coerce::string(doc, "clan", &join_path(path, "clan"), notes),
            steamid: coerce::string(doc, "steamid", &join_path(path, "steamid"), notes),
            observer_slot: coerce::integer(
                doc,
                "observer_slot",
                &join_path(path, "observer_slot"),
                notes,
            ),
            team: coerce::string(doc, "team", &join_path(path, "team"), notes),
            activity: coerce::string(doc, "activity", &join_path(path, "activity"), notes),
            spectarget: coerce::string(doc, "spectarget", &join_path(path, "spectarget"), notes),
            position: coerce::vec3(doc, "position", &join_path(path, "position"), notes),
            forward: coerce::vec3(doc, "forward", &join_path(path, "forward"), notes),
            state,
            match_stats,
            weapons,
        }
    }
}

impl Validate for Player {
    fn validate(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        out.extend(validate_enum("team", self.team.as_deref(), &vocab::TEAMS));
        out.extend(validate_enum(
            "activity",
            self.activity.as_deref(),
            &vocab::PLAYER_ACTIVITIES,
        ));
        if let Some(weapons) = &self.weapons {
            extend_prefixed(&mut out, "weapons", weapons.validate());
        }
        out
    }
}
