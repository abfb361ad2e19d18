//! Purpose: End-to-end contract tests for snapshot decoding and validation.
//! Role: Exercises the public decode/validate surface the way the endpoint
//! consumer does, including the documented wire quirks.

use csgsi::core::{Validate, decode_snapshot};
use serde_json::json;

#[test]
fn boolean_placeholder_fields_decode_as_absent() {
    let snapshot = decode_snapshot(&json!({
        "player": false,
        "bomb": false,
        "round": {"phase": "live"},
    }))
    .expect("decode succeeds");
    assert!(snapshot.state.player.is_none());
    assert!(snapshot.state.bomb.is_none());
    assert!(snapshot.state.round.is_some());
    assert!(snapshot.notes.is_empty());
}

#[test]
fn coordinate_strings_parse_and_redecode_identically() {
    let snapshot = decode_snapshot(&json!({
        "player": {"position": "1.5,-2.0,3.25"},
    }))
    .expect("decode");
    let position = snapshot.state.player.as_ref().and_then(|p| p.position);
    let position = position.expect("position");
    assert_eq!((position.0, position.1, position.2), (1.5, -2.0, 3.25));

    // Serializing the decoded vector and decoding again is a fixed point.
    let reencoded = json!({
        "player": {"position": serde_json::to_value(position).expect("serialize")},
    });
    let again = decode_snapshot(&reencoded).expect("decode again");
    assert_eq!(
        again.state.player.as_ref().and_then(|p| p.position),
        Some(position)
    );
    assert!(again.notes.is_empty());
}

#[test]
fn planted_bomb_scenario() {
    let snapshot = decode_snapshot(&json!({
        "bomb": {
            "state": "planted",
            "position": "100.0,200.5,0.0",
            "countdown": "3.5",
        },
    }))
    .expect("decode");
    let bomb = snapshot.state.bomb.expect("bomb");
    assert_eq!(bomb.state.as_deref(), Some("planted"));
    let position = bomb.position.expect("position");
    assert_eq!((position.0, position.1, position.2), (100.0, 200.5, 0.0));
    assert_eq!(bomb.countdown, Some(3.5));
}

#[test]
fn bad_win_team_yields_exactly_one_diagnostic() {
    let snapshot = decode_snapshot(&json!({
        "round": {"phase": "live", "win_team": "XX"},
    }))
    .expect("decode succeeds despite the bad value");
    let diags = snapshot.state.validate();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].path, "round.win_team");
    assert!(diags[0].message.contains("'XX'"));
    assert!(diags[0].message.contains("T, CT"));
}

#[test]
fn active_weapon_lookup_scenario() {
    let snapshot = decode_snapshot(&json!({
        "player": {
            "team": "CT",
            "weapons": {
                "weapon_0": {"name": "weapon_ak47", "type": "Rifle", "state": "active"},
            },
        },
    }))
    .expect("decode");
    let player = snapshot.state.player.expect("player");
    let weapons = player.weapons.expect("weapons");
    assert_eq!(
        weapons.active().expect("active").name.as_deref(),
        Some("weapon_ak47")
    );
}

#[test]
fn double_active_equipment_still_decodes() {
    let snapshot = decode_snapshot(&json!({
        "player": {
            "weapons": {
                "weapon_0": {"name": "weapon_glock", "type": "Pistol", "state": "active"},
                "weapon_1": {"name": "weapon_awp", "type": "SniperRifle", "state": "active"},
            },
        },
    }))
    .expect("decode never fails on this");
    let weapons = snapshot.state.player.expect("player").weapons.expect("weapons");
    assert_eq!(weapons.len(), 2);
    let active = weapons.active().expect("one of the active weapons");
    assert!(active.is_active());
}

#[test]
fn minimal_valid_snapshot_round_trips_clean() {
    let snapshot = decode_snapshot(&json!({"provider": {"appid": 730}})).expect("decode");
    assert!(snapshot.notes.is_empty());
    assert!(snapshot.state.validate().is_empty());
}

#[test]
fn member_enum_values_validate_clean_across_the_tree() {
    let snapshot = decode_snapshot(&json!({
        "provider": {"appid": 730, "name": "Counter-Strike: Global Offensive"},
        "player": {"team": "T", "activity": "playing"},
        "bomb": {"state": "carried"},
        "round": {"phase": "freezetime"},
        "phase_countdowns": {"phase": "warmup", "phase_ends_in": 12.0},
        "map": {"phase": "warmup", "mode": "casual"},
    }))
    .expect("decode");
    assert!(snapshot.notes.is_empty());
    assert!(snapshot.state.validate().is_empty());
}

#[test]
fn full_observer_snapshot_decodes_with_delta_links() {
    let snapshot = decode_snapshot(&json!({
        "provider": {"appid": 730, "timestamp": 1680000000},
        "map": {
            "name": "de_inferno",
            "mode": "competitive",
            "phase": "live",
            "round": 3,
            "team_t": {"score": 1},
            "team_ct": {"score": 2},
            "round_wins": {"1": "ct_win_defuse", "2": "ct_win_time"},
        },
        "grenades": {
            "129": {"owner": "765", "type": "smoke", "position": "0,0,0",
                     "velocity": [0.0, 0.0, 0.0], "lifetime": "3.2", "effecttime": "1.1"},
        },
        "allplayers": {
            "765": {"name": "alice", "team": "CT", "position": "1,2,3"},
        },
        "added": {"grenades": true},
        "previously": {"map": {"round": 2}},
    }))
    .expect("decode");
    assert!(snapshot.notes.is_empty());
    assert!(snapshot.state.validate().is_empty());
    assert_eq!(
        snapshot
            .state
            .previously
            .as_ref()
            .and_then(|prev| prev.map.as_ref())
            .and_then(|map| map.round),
        Some(2)
    );
    assert!(snapshot.state.added.expect("added").is_added("grenades"));
}
