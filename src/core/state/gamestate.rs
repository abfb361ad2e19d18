//! Purpose: Root snapshot entity and the delta/history resolver.
//! Exports: `GameState`.
//! Role: Composes every entity decoder; resolves the self-referential
//! `previously` link and the `added` marker block.
//! Invariants: `previously` reuses the full decoder behind an explicit
//! depth budget; `added` is selected structurally by field name and only
//! ever decodes presence markers.

use crate::core::coerce::{self, JsonMap};
use crate::core::diag::{Diagnostic, Validate, entry_path, extend_prefixed, join_path};
use crate::core::state::{
    ActiveGrenade, Bomb, FieldMarkers, Map, PhaseCountdowns, Player, Provider, Round,
};
use serde::Serialize;
use std::collections::BTreeMap;

// The client sends at most one level of `previously` nesting; the budget
// only guards against a misbehaving sender.
const MAX_PREVIOUS_DEPTH: u32 = 32;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GameState {
    pub provider: Option<Provider>,
    pub player: Option<Player>,
    pub bomb: Option<Bomb>,
    pub round: Option<Round>,
    pub phase_countdowns: Option<PhaseCountdowns>,
    pub map: Option<Map>,
    /// All players in the game, keyed by steam id. Observer mode only.
    pub allplayers: Option<BTreeMap<String, Player>>,
    /// Active grenade effects, keyed by entity id. Observer mode only.
    pub grenades: Option<BTreeMap<String, ActiveGrenade>>,
    /// Which fields newly appeared this tick; presence markers only.
    pub added: Option<FieldMarkers>,
    /// The changed subset of the prior tick, in the same shape as the root.
    pub previously: Option<Box<GameState>>,
}

impl GameState {
    pub(crate) fn decode(
        doc: &JsonMap,
        path: &str,
        depth: u32,
        notes: &mut Vec<Diagnostic>,
    ) -> Self {
        let provider = coerce::object(doc, "provider", &join_path(path, "provider"), notes)
            .map(|d| Provider::decode(d, &join_path(path, "provider"), notes));
        let player = coerce::object(doc, "player", &join_path(path, "player"), notes)
            .map(|d| Player::decode(d, &join_path(path, "player"), notes));
        let bomb = coerce::object(doc, "bomb", &join_path(path, "bomb"), notes)
            .map(|d| Bomb::decode(d, &join_path(path, "bomb"), notes));
        let round = coerce::object(doc, "round", &join_path(path, "round"), notes)
            .map(|d| Round::decode(d, &join_path(path, "round"), notes));
        let phase_countdowns = coerce::object(
            doc,
            "phase_countdowns",
            &join_path(path, "phase_countdowns"),
            notes,
        )
        .map(|d| PhaseCountdowns::decode(d, &join_path(path, "phase_countdowns"), notes));
        let map = coerce::object(doc, "map", &join_path(path, "map"), notes)
            .map(|d| Map::decode(d, &join_path(path, "map"), notes));

        let allplayers = coerce::object(doc, "allplayers", &join_path(path, "allplayers"), notes)
            .map(|d| decode_entity_map(d, &join_path(path, "allplayers"), notes, Player::decode));
        let grenades = coerce::object(doc, "grenades", &join_path(path, "grenades"), notes).map(
            |d| decode_entity_map(d, &join_path(path, "grenades"), notes, ActiveGrenade::decode),
        );

        // `added` mirrors the snapshot shape but its leaves are presence
        // booleans, so it never goes through the entity decoders.
        let added = coerce::object(doc, "added", &join_path(path, "added"), notes)
            .map(|d| FieldMarkers::decode(d, &join_path(path, "added"), 0, notes));

        let previously = coerce::object(doc, "previously", &join_path(path, "previously"), notes)
            .and_then(|d| {
                let prev_path = join_path(path, "previously");
                if depth + 1 > MAX_PREVIOUS_DEPTH {
                    notes.push(Diagnostic::new(
                        prev_path,
                        "previous-state nesting exceeds the depth budget",
                    ));
                    return None;
                }
                Some(Box::new(GameState::decode(d, &prev_path, depth + 1, notes)))
            });

        Self {
            provider,
            player,
            bomb,
            round,
            phase_countdowns,
            map,
            allplayers,
            grenades,
            added,
            previously,
        }
    }
}

// Map-of-entity fields decode each entry independently; a bad entry is
// dropped, not the whole map.
fn decode_entity_map<T>(
    doc: &JsonMap,
    path: &str,
    notes: &mut Vec<Diagnostic>,
    decode_one: fn(&JsonMap, &str, &mut Vec<Diagnostic>) -> T,
) -> BTreeMap<String, T> {
    let mut entries = BTreeMap::new();
    for (key, value) in doc {
        let key_path = entry_path(path, key);
        if let Some(entry_doc) = coerce::object_value(value, &key_path, notes) {
            entries.insert(key.clone(), decode_one(entry_doc, &key_path, notes));
        }
    }
    entries
}

impl Validate for GameState {
    fn validate(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        if let Some(provider) = &self.provider {
            extend_prefixed(&mut out, "provider", provider.validate());
        }
        if let Some(player) = &self.player {
            extend_prefixed(&mut out, "player", player.validate());
        }
        if let Some(bomb) = &self.bomb {
            extend_prefixed(&mut out, "bomb", bomb.validate());
        }
        if let Some(round) = &self.round {
            extend_prefixed(&mut out, "round", round.validate());
        }
        if let Some(phase_countdowns) = &self.phase_countdowns {
            extend_prefixed(&mut out, "phase_countdowns", phase_countdowns.validate());
        }
        if let Some(map) = &self.map {
            extend_prefixed(&mut out, "map", map.validate());
        }
        if let Some(allplayers) = &self.allplayers {
            for (id, player) in allplayers {
                extend_prefixed(&mut out, &entry_path("allplayers", id), player.validate());
            }
        }
        if let Some(grenades) = &self.grenades {
            for (id, grenade) in grenades {
                extend_prefixed(&mut out, &entry_path("grenades", id), grenade.validate());
            }
        }
        if let Some(previously) = &self.previously {
            extend_prefixed(&mut out, "previously", previously.validate());
        }
        // `added` holds markers, not entities; nothing to validate there.
        out
    }
}
