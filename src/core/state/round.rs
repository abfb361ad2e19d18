use crate::core::coerce::{self, JsonMap};
use crate::core::diag::{Diagnostic, Validate, join_path};
use crate::core::vocab::{self, validate_enum};
use serde::Serialize;

/// State of the current round. Timeouts report as `freezetime` too.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Round {
    /// freezetime, live or over.
    pub phase: Option<String>,
    /// Winning team once the round is over; absent while it runs.
    pub win_team: Option<String>,
    /// Bomb sub-state, only present once the bomb has been planted.
    pub bomb: Option<String>,
}

impl Round {
    pub(crate) fn decode(doc: &JsonMap, path: &str, notes: &mut Vec<Diagnostic>) -> Self {
        Self {
            phase: coerce::string(doc, "phase", &join_path(path, "phase"), notes),
            win_team: coerce::string(doc, "win_team", &join_path(path, "win_team"), notes),
            bomb: coerce::string(doc, "bomb", &join_path(path, "bomb"), notes),
        }
    }
}

impl Validate for Round {
    fn validate(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        out.extend(validate_enum("phase", self.phase.as_deref(), &vocab::ROUND_PHASES));
        out.extend(validate_enum("win_team", self.win_team.as_deref(), &vocab::TEAMS));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::Round;
    use crate::core::diag::Validate;
    use serde_json::json;

    #[test]
    fn bad_win_team_decodes_but_yields_one_diagnostic() {
        let doc = json!({"phase": "live", "win_team": "XX"})
            .as_object()
            .expect("object")
            .clone();
        let mut notes = Vec::new();
        let round = Round::decode(&doc, "round", &mut notes);
        assert!(notes.is_empty());
        assert_eq!(round.win_team.as_deref(), Some("XX"));
        let diags = round.validate();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].path, "win_team");
    }

    #[test]
    fn ongoing_round_without_winner_is_valid() {
        let doc = json!({"phase": "live"}).as_object().expect("object").clone();
        let mut notes = Vec::new();
        let round = Round::decode(&doc, "round", &mut notes);
        assert!(round.validate().is_empty());
    }
}
