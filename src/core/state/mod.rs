//! Purpose: Typed snapshot entities and their tolerant decoders.
//! Exports: entity types, `Vec3`, `Snapshot`, `decode_snapshot`.
//! Role: Turns one untyped JSON document into an immutable state tree plus
//! decode notes; only a non-object root fails the whole operation.
//! Invariants: Entities are never mutated after construction; sanitization
//! happens during decoding.

mod bomb;
mod equipment;
mod gamestate;
mod grenade;
mod map;
mod markers;
mod phase;
mod player;
mod provider;
mod round;

pub use bomb::Bomb;
pub use equipment::{Equipment, Weapon};
pub use gamestate::GameState;
pub use grenade::ActiveGrenade;
pub use map::{Map, Team};
pub use markers::{FieldMarkers, Marker};
pub use phase::PhaseCountdowns;
pub use player::{MatchStats, Player, PlayerState};
pub use provider::Provider;
pub use round::Round;

use crate::core::diag::Diagnostic;
use crate::core::error::{Error, ErrorKind};
use serde::Serialize;
use serde_json::Value;

/// Cartesian coordinate triple; serialized as a three-element array.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Vec3(pub f64, pub f64, pub f64);

/// One decoded snapshot: the typed tree plus the notes recorded while
/// repairing or dropping malformed fields along the way.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub state: GameState,
    pub notes: Vec<Diagnostic>,
}

/// Decodes one inbound document. Decoding is best-effort: malformed fields
/// become absent and are reported through `Snapshot::notes`; only a root
/// that is not a JSON object is an error.
pub fn decode_snapshot(value: &Value) -> Result<Snapshot, Error> {
    let doc = match value {
        Value::Object(map) => map,
        other => {
            return Err(Error::new(ErrorKind::Decode).with_message(format!(
                "snapshot root must be a JSON object, got {}",
                match other {
                    Value::Null => "null",
                    Value::Bool(_) => "a boolean",
                    Value::Number(_) => "a number",
                    Value::String(_) => "a string",
                    Value::Array(_) => "an array",
                    Value::Object(_) => unreachable!(),
                }
            )));
        }
    };
    let mut notes = Vec::new();
    let state = GameState::decode(doc, "", 0, &mut notes);
    Ok(Snapshot { state, notes })
}

#[cfg(test)]
mod tests {
    use super::decode_snapshot;
    use crate::core::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn non_object_root_is_a_single_decode_error() {
        for root in [json!(3), json!("state"), json!([1, 2]), json!(true)] {
            let err = decode_snapshot(&root).expect_err("must fail");
            assert_eq!(err.kind(), ErrorKind::Decode);
        }
    }

    #[test]
    fn empty_object_decodes_to_empty_state() {
        let snapshot = decode_snapshot(&json!({})).expect("decode");
        assert!(snapshot.notes.is_empty());
        assert!(snapshot.state.provider.is_none());
        assert!(snapshot.state.player.is_none());
        assert!(snapshot.state.previously.is_none());
    }
}
