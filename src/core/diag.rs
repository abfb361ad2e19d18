//! Purpose: Path-qualified diagnostics shared by decoding and validation.
//! Exports: `Diagnostic`, `Validate`, `join_path`, `entry_path`.
//! Role: Shared contract for decode notes and validation output.
//! Invariants: Diagnostics are advisory; producing them never fails a decode.
//! Invariants: Paths are dotted for fields and bracketed for map entries.

use serde::Serialize;
use std::fmt;

/// One problem found while decoding or validating a snapshot, located by a
/// dotted/keyed path relative to the snapshot root (for example
/// `player.weapons[weapon_1].state`).
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Diagnostic {
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Advisory validation over a decoded entity. Implementations dispatch to
/// their typed sub-entities explicitly; there is no reflective walk.
pub trait Validate {
    fn validate(&self) -> Vec<Diagnostic>;
}

/// Joins a parent path and a child segment. Bracketed child segments attach
/// without a dot so `weapons` + `[weapon_0].name` reads naturally.
pub fn join_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        return child.to_string();
    }
    if child.is_empty() {
        return parent.to_string();
    }
    if child.starts_with('[') {
        format!("{parent}{child}")
    } else {
        format!("{parent}.{child}")
    }
}

/// Path of one entry in a map-valued field, e.g. `allplayers[765...]`.
pub fn entry_path(field: &str, key: &str) -> String {
    format!("{field}[{key}]")
}

/// Re-roots child diagnostics under `field` and appends them to `out`.
pub fn extend_prefixed(out: &mut Vec<Diagnostic>, field: &str, children: Vec<Diagnostic>) {
    for child in children {
        out.push(Diagnostic {
            path: join_path(field, &child.path),
            message: child.message,
        });
    }
}
