//! Purpose: Presence-marker tree for the snapshot's `added` block.
//! Exports: `FieldMarkers`, `Marker`.
//! Role: The `added` block mirrors the shape of the snapshot but every leaf
//! is a plain boolean meaning "this value is new in this tick". It is
//! decoded as markers only, never reified into typed entities.
//! Invariants: Depth is bounded by a budget; overflow is a note, not a panic.

use crate::core::diag::{Diagnostic, join_path};
use serde::Serialize;
use std::collections::BTreeMap;

const MAX_MARKER_DEPTH: u32 = 32;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Marker {
    Present(bool),
    Nested(FieldMarkers),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldMarkers {
    entries: BTreeMap<String, Marker>,
}

impl FieldMarkers {
    pub(crate) fn decode(
        doc: &crate::core::coerce::JsonMap,
        path: &str,
        depth: u32,
        notes: &mut Vec<Diagnostic>,
    ) -> Self {
        let mut entries = BTreeMap::new();
        for (key, value) in doc {
            let child_path = join_path(path, key);
            match value {
                serde_json::Value::Bool(flag) => {
                    entries.insert(key.clone(), Marker::Present(*flag));
                }
                serde_json::Value::Object(nested) => {
                    if depth + 1 > MAX_MARKER_DEPTH {
                        notes.push(Diagnostic::new(
                            child_path,
                            "marker nesting exceeds the depth budget",
                        ));
                        continue;
                    }
                    entries.insert(
                        key.clone(),
                        Marker::Nested(FieldMarkers::decode(nested, &child_path, depth + 1, notes)),
                    );
                }
                other => {
                    // Presence markers are booleans by contract; anything
                    // else is dropped with a note.
                    notes.push(Diagnostic::new(
                        child_path,
                        format!(
                            "expected presence boolean, got {}",
                            match other {
                                serde_json::Value::Null => "null",
                                serde_json::Value::Number(_) => "number",
                                serde_json::Value::String(_) => "string",
                                serde_json::Value::Array(_) => "array",
                                _ => "value",
                            }
                        ),
                    ));
                }
            }
        }
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&Marker> {
        self.entries.get(key)
    }

    /// True when `key` is marked as newly appearing in this tick.
    pub fn is_added(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Some(Marker::Present(true)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Marker)> {
        self.entries.iter().map(|(key, marker)| (key.as_str(), marker))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldMarkers, Marker};
    use serde_json::json;

    fn decode(value: serde_json::Value) -> (FieldMarkers, Vec<crate::core::diag::Diagnostic>) {
        let doc = value.as_object().expect("object").clone();
        let mut notes = Vec::new();
        let markers = FieldMarkers::decode(&doc, "added", 0, &mut notes);
        (markers, notes)
    }

    #[test]
    fn leaves_stay_booleans_and_never_become_entities() {
        let (markers, notes) = decode(json!({
            "round": {"win_team": true},
            "bomb": true,
        }));
        assert!(notes.is_empty());
        assert!(markers.is_added("bomb"));
        match markers.get("round").expect("round") {
            Marker::Nested(round) => assert!(round.is_added("win_team")),
            Marker::Present(_) => panic!("round must be a nested marker"),
        }
    }

    #[test]
    fn non_boolean_leaf_is_dropped_with_note() {
        let (markers, notes) = decode(json!({"bomb": "planted"}));
        assert!(markers.is_empty());
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].path, "added.bomb");
    }

    #[test]
    fn depth_budget_overflow_is_a_note() {
        let mut value = json!(true);
        for _ in 0..40 {
            value = json!({"inner": value});
        }
        let (_, notes) = decode(value);
        assert!(
            notes
                .iter()
                .any(|note| note.message.contains("depth budget"))
        );
    }
}
