//! Purpose: Weapon descriptors and the per-player equipment container.
//! Exports: `Weapon`, `Equipment`.
//! Role: Replaces the wire's slot-keyed weapon map with a named container
//! exposing typed queries instead of raw map lookups.
//! Invariants: Slot encounter order from the document is preserved.

use crate::core::coerce::{self, JsonMap};
use crate::core::diag::{Diagnostic, Validate, entry_path, extend_prefixed, join_path};
use crate::core::vocab::{self, validate_enum};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Weapon {
    /// Game-internal name, e.g. `weapon_ak47`.
    pub name: Option<String>,
    /// Skin name; `default` when the weapon has no skin.
    pub paintkit: Option<String>,
    /// Weapon type as reported on the wire's `type` field.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub ammo_clip: Option<i64>,
    pub ammo_clip_max: Option<i64>,
    pub ammo_reserve: Option<i64>,
    /// `active`, `holstered` or `reloading`.
    pub state: Option<String>,
}

impl Weapon {
    pub(crate) fn decode(doc: &JsonMap, path: &str, notes: &mut Vec<Diagnostic>) -> Self {
        Self {
            name: coerce::string(doc, "name", &join_path(path, "name"), notes),
            paintkit: coerce::string(doc, "paintkit", &join_path(path, "paintkit"), notes),
            kind: coerce::string(doc, "type", &join_path(path, "type"), notes),
            ammo_clip: coerce::integer(doc, "ammo_clip", &join_path(path, "ammo_clip"), notes),
            ammo_clip_max: coerce::integer(
                doc,
                "ammo_clip_max",
                &join_path(path, "ammo_clip_max"),
                notes,
            ),
            ammo_reserve: coerce::integer(
                doc,
                "ammo_reserve",
                &join_path(path, "ammo_reserve"),
                notes,
            ),
            state: coerce::string(doc, "state", &join_path(path, "state"), notes),
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.as_deref() == Some("active")
    }

    pub fn is_grenade(&self) -> bool {
        self.kind.as_deref() == Some("Grenade")
    }
}

impl Validate for Weapon {
    fn validate(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        out.extend(validate_enum("name", self.name.as_deref(), &vocab::WEAPON_NAMES));
        out.extend(validate_enum("type", self.kind.as_deref(), &vocab::WEAPON_TYPES));
        out.extend(validate_enum("state", self.state.as_deref(), &vocab::WEAPON_STATES));
        out
    }
}

/// A player's equipped weapons, keyed by slot (`weapon_0`, `weapon_1`, ...,
/// occasionally `weapon_c4`). Serialized back as a map in slot order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Equipment {
    slots: Vec<(String, Weapon)>,
}

impl Equipment {
    pub(crate) fn decode(doc: &JsonMap, path: &str, notes: &mut Vec<Diagnostic>) -> Self {
        let mut slots = Vec::with_capacity(doc.len());
        for (slot, value) in doc {
            let slot_path = entry_path(path, slot);
            let Some(weapon_doc) = coerce::object_value(value, &slot_path, notes) else {
                // Undecodable slots are dropped, never the whole container.
                continue;
            };
            slots.push((slot.clone(), Weapon::decode(weapon_doc, &slot_path, notes)));
        }
        Self { slots }
    }

    /// The currently active weapon. Game rules say at most one weapon is
    /// active; if the client ever reports several, the first slot in
    /// document order wins. That is a provider anomaly, not a decode bug.
    pub fn active(&self) -> Option<&Weapon> {
        self.slots
            .iter()
            .map(|(_, weapon)| weapon)
            .find(|weapon| weapon.is_active())
    }

    /// The subset of equipped grenades, in slot order.
    pub fn grenades(&self) -> impl Iterator<Item = (&str, &Weapon)> {
        self.slots
            .iter()
            .filter(|(_, weapon)| weapon.is_grenade())
            .map(|(slot, weapon)| (slot.as_str(), weapon))
    }

    /// Looks up the weapon at slot index `n` (wire key `weapon_<n>`).
    pub fn slot(&self, index: usize) -> Option<&Weapon> {
        let key = format!("weapon_{index}");
        self.get(&key)
    }

    pub fn get(&self, slot: &str) -> Option<&Weapon> {
        self.slots
            .iter()
            .find(|(key, _)| key == slot)
            .map(|(_, weapon)| weapon)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Weapon)> {
        self.slots.iter().map(|(slot, weapon)| (slot.as_str(), weapon))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Validate for Equipment {
    fn validate(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        for (slot, weapon) in &self.slots {
            extend_prefixed(&mut out, &entry_path("", slot), weapon.validate());
        }
        out
    }
}

impl Serialize for Equipment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (slot, weapon) in &self.slots {
            map.serialize_entry(slot, weapon)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::Equipment;
    use crate::core::diag::Validate;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> (Equipment, Vec<crate::core::diag::Diagnostic>) {
        let doc = value.as_object().expect("object").clone();
        let mut notes = Vec::new();
        let equipment = Equipment::decode(&doc, "weapons", &mut notes);
        (equipment, notes)
    }

    #[test]
    fn active_lookup_finds_the_active_weapon() {
        let (equipment, notes) = decode(json!({
            "weapon_0": {"name": "weapon_knife", "type": "Knife", "state": "holstered"},
            "weapon_1": {"name": "weapon_ak47", "type": "Rifle", "state": "active"},
        }));
        assert!(notes.is_empty());
        let active = equipment.active().expect("active weapon");
        assert_eq!(active.name.as_deref(), Some("weapon_ak47"));
    }

    #[test]
    fn two_active_weapons_still_decode_and_first_slot_wins() {
        let (equipment, _) = decode(json!({
            "weapon_0": {"name": "weapon_glock", "type": "Pistol", "state": "active"},
            "weapon_1": {"name": "weapon_ak47", "type": "Rifle", "state": "active"},
        }));
        assert_eq!(equipment.len(), 2);
        // Contract: one of the active weapons, in practice the first in
        // document order.
        assert_eq!(
            equipment.active().expect("active").name.as_deref(),
            Some("weapon_glock")
        );
    }

    #[test]
    fn grenade_subset_filters_by_type() {
        let (equipment, _) = decode(json!({
            "weapon_0": {"name": "weapon_ak47", "type": "Rifle"},
            "weapon_1": {"name": "weapon_flashbang", "type": "Grenade"},
            "weapon_2": {"name": "weapon_smokegrenade", "type": "Grenade"},
        }));
        let grenades: Vec<_> = equipment.grenades().collect();
        assert_eq!(grenades.len(), 2);
        assert_eq!(grenades[0].0, "weapon_1");
        assert_eq!(grenades[1].1.name.as_deref(), Some("weapon_smokegrenade"));
    }

    #[test]
    fn slot_index_lookup() {
        let (equipment, _) = decode(json!({
            "weapon_0": {"name": "weapon_knife"},
            "weapon_c4": {"name": "weapon_c4"},
        }));
        assert_eq!(
            equipment.slot(0).expect("slot 0").name.as_deref(),
            Some("weapon_knife")
        );
        assert!(equipment.slot(1).is_none());
        assert_eq!(
            equipment.get("weapon_c4").expect("c4").name.as_deref(),
            Some("weapon_c4")
        );
    }

    #[test]
    fn undecodable_slot_is_dropped_with_note() {
        let (equipment, notes) = decode(json!({
            "weapon_0": {"name": "weapon_knife"},
            "weapon_1": 17,
        }));
        assert_eq!(equipment.len(), 1);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].path, "weapons[weapon_1]");
    }

    #[test]
    fn validation_prefixes_slot_keys() {
        let (equipment, _) = decode(json!({
            "weapon_0": {"name": "weapon_ak47", "type": "Rifle", "state": "juggling"},
        }));
        let diags = equipment.validate();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].path, "[weapon_0].state");
        assert!(diags[0].message.contains("juggling"));
    }

    #[test]
    fn serializes_as_slot_keyed_map() {
        let (equipment, _) = decode(json!({
            "weapon_0": {"name": "weapon_knife"},
        }));
        let out = serde_json::to_value(&equipment).expect("serialize");
        assert_eq!(out["weapon_0"]["name"], "weapon_knife");
    }
}
