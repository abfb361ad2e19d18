use crate::core::coerce::{self, JsonMap};
use crate::core::diag::{Diagnostic, Validate, entry_path, join_path};
use crate::core::vocab::{self, validate_enum};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-side team information on the current map.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Team {
    pub score: Option<i64>,
    pub consecutive_round_losses: Option<i64>,
    pub timeouts_remaining: Option<i64>,
    /// Series wins; only meaningful in best-of-X tournament play.
    pub matches_won_this_series: Option<i64>,
}

impl Team {
    pub(crate) fn decode(doc: &JsonMap, path: &str, notes: &mut Vec<Diagnostic>) -> Self {
        Self {
            score: coerce::integer(doc, "score", &join_path(path, "score"), notes),
            consecutive_round_losses: coerce::integer(
                doc,
                "consecutive_round_losses",
                &join_path(path, "consecutive_round_losses"),
                notes,
            ),
            timeouts_remaining: coerce::integer(
                doc,
                "timeouts_remaining",
                &join_path(path, "timeouts_remaining"),
                notes,
            ),
            matches_won_this_series: coerce::integer(
                doc,
                "matches_won_this_series",
                &join_path(path, "matches_won_this_series"),
                notes,
            ),
        }
    }
}

/// The "map" component, which also carries game mode, team state and the
/// round-win history of the match.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Map {
    /// Console identifier of the map, e.g. `de_dust2`.
    pub name: Option<String>,
    pub mode: Option<String>,
    /// warmup, live, intermission or gameover.
    pub phase: Option<String>,
    pub round: Option<i64>,
    pub team_t: Option<Team>,
    pub team_ct: Option<Team>,
    /// Round number to win condition, e.g. `"1": "ct_win_elimination"`.
    pub round_wins: Option<BTreeMap<String, String>>,
    pub num_matches_to_win_series: Option<i64>,
    pub current_spectators: Option<i64>,
    pub souvenirs_total: Option<i64>,
}

impl Map {
    pub(crate) fn decode(doc: &JsonMap, path: &str, notes: &mut Vec<Diagnostic>) -> Self {
        let team_t = coerce::object(doc, "team_t", &join_path(path, "team_t"), notes)
            .map(|team| Team::decode(team, &join_path(path, "team_t"), notes));
        let team_ct = coerce::object(doc, "team_ct", &join_path(path, "team_ct"), notes)
            .map(|team| Team::decode(team, &join_path(path, "team_ct"), notes));
        let round_wins = coerce::object(doc, "round_wins", &join_path(path, "round_wins"), notes)
            .map(|wins| decode_round_wins(wins, &join_path(path, "round_wins"), notes));
        Self {
            name: coerce::string(doc, "name", &join_path(path, "name"), notes),
            mode: coerce::string(doc, "mode", &join_path(path, "mode"), notes),
            phase: coerce::string(doc, "phase", &join_path(path, "phase"), notes),
            round: coerce::integer(doc, "round", &join_path(path, "round"), notes),
            team_t,
            team_ct,
            round_wins,
            num_matches_to_win_series: coerce::integer(
                doc,
                "num_matches_to_win_series",
                &join_path(path, "num_matches_to_win_series"),
                notes,
            ),
            current_spectators: coerce::integer(
                doc,
                "current_spectators",
                &join_path(path, "current_spectators"),
                notes,
            ),
            souvenirs_total: coerce::integer(
                doc,
                "souvenirs_total",
                &join_path(path, "souvenirs_total"),
                notes,
            ),
        }
    }
}

fn decode_round_wins(
    doc: &JsonMap,
    path: &str,
    notes: &mut Vec<Diagnostic>,
) -> BTreeMap<String, String> {
    let mut wins = BTreeMap::new();
    for (round, value) in doc {
        match value.as_str() {
            Some(condition) => {
                wins.insert(round.clone(), condition.to_string());
            }
            None => {
                // Entry dropped, the rest of the history stays usable.
                notes.push(Diagnostic::new(
                    entry_path(path, round),
                    "expected win condition string".to_string(),
                ));
            }
        }
    }
    wins
}

impl Validate for Map {
    // Teams carry no enum-backed fields; the history map is validated here
    // explicitly because plain maps do not auto-recurse.
    fn validate(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        out.extend(validate_enum("phase", self.phase.as_deref(), &vocab::MAP_PHASES));
        out.extend(validate_enum("mode", self.mode.as_deref(), &vocab::GAME_MODES));
        if let Some(wins) = &self.round_wins {
            for (round, condition) in wins {
                out.extend(validate_enum(
                    &entry_path("round_wins", round),
                    Some(condition),
                    &vocab::ROUND_WIN_CONDITIONS,
                ));
            }
        }
        out
    }
}
