pub mod scoreboard;

pub use scoreboard::{ScoreRow, Scoreboard, scoreboard};
