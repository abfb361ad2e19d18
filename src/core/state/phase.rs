use crate::core::coerce::{self, JsonMap};
use crate::core::diag::{Diagnostic, Validate, join_path};
use crate::core::vocab::{self, validate_enum};
use serde::Serialize;

/// Countdown for the current match phase. The phase vocabulary is a
/// superset of the round phases with `bomb` (planted), `defuse` and the
/// pre-game `warmup`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PhaseCountdowns {
    pub phase: Option<String>,
    /// Seconds until the current phase ends, e.g. until the bomb explodes
    /// while the phase is `bomb`.
    pub phase_ends_in: Option<f64>,
}

impl PhaseCountdowns {
    pub(crate) fn decode(doc: &JsonMap, path: &str, notes: &mut Vec<Diagnostic>) -> Self {
        Self {
            phase: coerce::string(doc, "phase", &join_path(path, "phase"), notes),
            phase_ends_in: coerce::float(
                doc,
                "phase_ends_in",
                &join_path(path, "phase_ends_in"),
                notes,
            ),
        }
    }
}

impl Validate for PhaseCountdowns {
    fn validate(&self) -> Vec<Diagnostic> {
        validate_enum("phase", self.phase.as_deref(), &vocab::COUNTDOWN_PHASES)
            .into_iter()
            .collect()
    }
}
