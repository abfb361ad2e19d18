//! Purpose: Scoreboard aggregation over a decoded snapshot.
//! Exports: `ScoreRow`, `Scoreboard`, `scoreboard`.
//! Role: Groups `allplayers` by team, sorted the way the in-game board
//! sorts: score, then kills, then assists, descending.
//! Invariants: Requires the `allplayers` component; anything else is absent
//! and yields no board.

use crate::core::state::{GameState, Player};
use serde::Serialize;
use std::cmp::Reverse;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreRow {
    pub name: Option<String>,
    pub team: Option<String>,
    pub kills: Option<i64>,
    pub assists: Option<i64>,
    pub deaths: Option<i64>,
    pub mvps: Option<i64>,
    pub score: Option<i64>,
}

impl ScoreRow {
    fn from_player(player: &Player) -> Self {
        let stats = player.match_stats.as_ref();
        Self {
            name: player.name.clone(),
            team: player.team.clone(),
            kills: stats.and_then(|s| s.kills),
            assists: stats.and_then(|s| s.assists),
            deaths: stats.and_then(|s| s.deaths),
            mvps: stats.and_then(|s| s.mvps),
            score: stats.and_then(|s| s.score),
        }
    }
}

/// Both team boards, each sorted descending.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Scoreboard {
    pub ct: Vec<ScoreRow>,
    pub t: Vec<ScoreRow>,
}

/// Builds the scoreboard, or `None` when the snapshot lacks `allplayers`.
pub fn scoreboard(state: &GameState) -> Option<Scoreboard> {
    let allplayers = state.allplayers.as_ref()?;
    let mut rows: Vec<ScoreRow> = allplayers.values().map(ScoreRow::from_player).collect();
    rows.sort_by_key(|row| Reverse((row.score, row.kills, row.assists)));

    let mut board = Scoreboard::default();
    for row in rows {
        match row.team.as_deref() {
            Some("CT") => board.ct.push(row),
            Some("T") => board.t.push(row),
            // Unknown or absent teams stay off the board.
            _ => {}
        }
    }
    Some(board)
}
