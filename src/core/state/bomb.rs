use crate::core::coerce::{self, JsonMap};
use crate::core::diag::{Diagnostic, Validate, join_path};
use crate::core::state::Vec3;
use crate::core::vocab::{self, validate_enum};
use serde::Serialize;

/// State of the bomb while a match is running.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Bomb {
    /// carried, dropped, planting, planted, defusing, defused or exploded.
    pub state: Option<String>,
    pub position: Option<Vec3>,
    /// Seconds remaining; the meaning depends on `state` (time to
    /// explosion when planted, to fully planted when planting, to fully
    /// defused when defusing).
    pub countdown: Option<f64>,
    /// Steam id of the player interacting with the bomb: the carrier, the
    /// planter or the defuser.
    pub player: Option<String>,
}

impl Bomb {
    pub(crate) fn decode(doc: &JsonMap, path: &str, notes: &mut Vec<Diagnostic>) -> Self {
        Self {
            state: coerce::string(doc, "state", &join_path(path, "state"), notes),
            position: coerce::vec3(doc, "position", &join_path(path, "position"), notes),
            countdown: coerce::float(doc, "countdown", &join_path(path, "countdown"), notes),
            player: coerce::string(doc, "player", &join_path(path, "player"), notes),
        }
    }
}

impl Validate for Bomb {
    fn validate(&self) -> Vec<Diagnostic> {
        validate_enum("state", self.state.as_deref(), &vocab::BOMB_STATES)
            .into_iter()
            .collect()
    }
}
