use crate::core::coerce::{self, JsonMap};
use crate::core::diag::{Diagnostic, Validate, entry_path, join_path};
use crate::core::state::Vec3;
use crate::core::vocab::{self, validate_enum};
use serde::Serialize;
use std::collections::BTreeMap;

/// One grenade effect currently active in the world.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ActiveGrenade {
    /// Steam id of the player who threw the grenade.
    pub owner: Option<String>,
    pub position: Option<Vec3>,
    pub velocity: Option<Vec3>,
    pub lifetime: Option<f64>,
    /// Grenade type as reported on the wire's `type` field: decoy, frag,
    /// flashbang, smoke, inferno or firebomb.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub effecttime: Option<f64>,
    /// Flame-piece id to position; molotov and incendiary only.
    pub flames: Option<BTreeMap<String, Vec3>>,
}

impl ActiveGrenade {
    pub(crate) fn decode(doc: &JsonMap, path: &str, notes: &mut Vec<Diagnostic>) -> Self {
        let flames = coerce::object(doc, "flames", &join_path(path, "flames"), notes)
            .map(|flames| decode_flames(flames, &join_path(path, "flames"), notes));
        Self {
            owner: coerce::string(doc, "owner", &join_path(path, "owner"), notes),
            position: coerce::vec3(doc, "position", &join_path(path, "position"), notes),
            velocity: coerce::vec3(doc, "velocity", &join_path(path, "velocity"), notes),
            lifetime: coerce::float(doc, "lifetime", &join_path(path, "lifetime"), notes),
            kind: coerce::string(doc, "type", &join_path(path, "type"), notes),
            effecttime: coerce::float(doc, "effecttime", &join_path(path, "effecttime"), notes),
            flames,
        }
    }
}

fn decode_flames(
    doc: &JsonMap,
    path: &str,
    notes: &mut Vec<Diagnostic>,
) -> BTreeMap<String, Vec3> {
    let mut flames = BTreeMap::new();
    for (id, value) in doc {
        if let Some(position) = coerce::vec3_value(value, &entry_path(path, id), notes) {
            flames.insert(id.clone(), position);
        }
    }
    flames
}

impl Validate for ActiveGrenade {
    fn validate(&self) -> Vec<Diagnostic> {
        validate_enum("type", self.kind.as_deref(), &vocab::GRENADE_TYPES)
            .into_iter()
            .collect()
    }
}
