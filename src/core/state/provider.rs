use crate::core::coerce::{self, JsonMap};
use crate::core::diag::{Diagnostic, Validate, join_path};
use serde::Serialize;

/// Steam app id the game client reports for Counter-Strike.
pub const CS_APP_ID: i64 = 730;

/// Identity of the game process reporting state.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Provider {
    pub name: Option<String>,
    pub appid: Option<i64>,
    pub version: Option<i64>,
    pub steamid: Option<String>,
    /// Unix timestamp at which this snapshot was produced.
    pub timestamp: Option<i64>,
}

impl Provider {
    pub(crate) fn decode(doc: &JsonMap, path: &str, notes: &mut Vec<Diagnostic>) -> Self {
        Self {
            name: coerce::string(doc, "name", &join_path(path, "name"), notes),
            appid: coerce::integer(doc, "appid", &join_path(path, "appid"), notes),
            version: coerce::integer(doc, "version", &join_path(path, "version"), notes),
            steamid: coerce::string(doc, "steamid", &join_path(path, "steamid"), notes),
            timestamp: coerce::integer(doc, "timestamp", &join_path(path, "timestamp"), notes),
        }
    }
}

impl Validate for Provider {
    // Wrong provider identity is advisory; decoding never depends on it.
    fn validate(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        if let Some(appid) = self.appid {
            if appid != CS_APP_ID {
                out.push(Diagnostic::new(
                    "appid",
                    format!("appid {appid} does not match the Counter-Strike app id {CS_APP_ID}"),
                ));
            }
        }
        out
    }
}
