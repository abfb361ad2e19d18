//! Purpose: Render the game-side registration file for a GSI service.
//! Exports: `GsiConfig`.
//! Role: Produces the brace-delimited `gamestate_integration_<name>.cfg`
//! block the game client reads to start POSTing snapshots.
//! Invariants: Booleans render as the literal strings "1"/"0"; every other
//! value renders as its literal string form.
//! Invariants: The `data` section lists the subscription flags in the order
//! the game documents them.

use std::fmt::Write as _;

/// One game state integration service registration. Defaults subscribe to
/// everything, which suits a consumer that wants the full tree.
#[derive(Clone, Debug, PartialEq)]
pub struct GsiConfig {
    /// Unique service name; several services can be registered at once.
    pub name: String,
    /// Endpoint address including port and path.
    pub uri: String,
    /// Seconds the game waits for the "OK" response.
    pub timeout: f64,
    /// Seconds of in-game events collected before the next update.
    pub buffer: f64,
    /// Quiet period after an "OK" before the next update is sent.
    pub throttle: f64,
    /// Heartbeat period: an update is sent even when nothing changed.
    pub heartbeat: f64,

    pub precision_time: f64,
    pub precision_position: f64,
    pub precision_vector: f64,

    pub provider: bool,
    pub player_id: bool,
    pub player_state: bool,
    pub map: bool,
    pub map_round_wins: bool,
    pub player_match_stats: bool,
    pub player_weapons: bool,
    pub round: bool,

    // The remaining components are only reported when spectating or
    // replaying a recording.
    pub player_position: bool,
    pub allgrenades: bool,
    pub allplayers_id: bool,
    pub allplayers_state: bool,
    pub allplayers_match_stats: bool,
    pub allplayers_weapons: bool,
    pub allplayers_position: bool,
    pub bomb: bool,
    pub phase_countdowns: bool,
}

impl GsiConfig {
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            timeout: 1.1,
            buffer: 0.1,
            throttle: 0.1,
            heartbeat: 30.0,
            precision_time: 0.01,
            precision_position: 0.1,
            precision_vector: 0.1,
            provider: true,
            player_id: true,
            player_state: true,
            map: true,
            map_round_wins: true,
            player_match_stats: true,
            player_weapons: true,
            round: true,
            player_position: true,
            allgrenades: true,
            allplayers_id: true,
            allplayers_state: true,
            allplayers_match_stats: true,
            allplayers_weapons: true,
            allplayers_position: true,
            bomb: true,
            phase_countdowns: true,
        }
    }

    /// Sets every subscribable component flag at once.
    pub fn subscribe_to_all(&mut self, enabled: bool) {
        self.provider = enabled;
        self.player_id = enabled;
        self.player_state = enabled;
        self.map = enabled;
        self.map_round_wins = enabled;
        self.player_match_stats = enabled;
        self.player_weapons = enabled;
        self.round = enabled;
        self.player_position = enabled;
        self.allgrenades = enabled;
        self.allplayers_id = enabled;
        self.allplayers_state = enabled;
        self.allplayers_match_stats = enabled;
        self.allplayers_weapons = enabled;
        self.allplayers_position = enabled;
        self.bomb = enabled;
        self.phase_countdowns = enabled;
    }

    /// File name the game expects for this registration.
    pub fn file_name(&self) -> String {
        format!("gamestate_integration_{}.cfg", self.name)
    }

    /// Renders the registration block.
    pub fn render(&self) -> String {
        let mut cfg = String::new();
        let _ = writeln!(cfg, "\"{}\"", self.name);
        cfg.push_str("{\n");
        push_str_setting(&mut cfg, 1, "uri", &self.uri);
        push_float_setting(&mut cfg, 1, "timeout", self.timeout);
        push_float_setting(&mut cfg, 1, "buffer", self.buffer);
        push_float_setting(&mut cfg, 1, "throttle", self.throttle);
        push_float_setting(&mut cfg, 1, "heartbeat", self.heartbeat);
        cfg.push_str("    \"output\"\n    {\n");
        push_float_setting(&mut cfg, 2, "precision_time", self.precision_time);
        push_float_setting(&mut cfg, 2, "precision_position", self.precision_position);
        push_float_setting(&mut cfg, 2, "precision_vector", self.precision_vector);
        cfg.push_str("    }\n");
        cfg.push_str("    \"data\"\n    {\n");
        for (key, flag) in self.data_flags() {
            push_bool_setting(&mut cfg, 2, key, flag);
        }
        cfg.push_str("    }\n");
        cfg.push_str("}\n");
        cfg
    }

    fn data_flags(&self) -> [(&'static str, bool); 17] {
        [
            ("provider", self.provider),
            ("player_id", self.player_id),
            ("player_state", self.player_state),
            ("map", self.map),
            ("map_round_wins", self.map_round_wins),
            ("player_match_stats", self.player_match_stats),
            ("player_weapons", self.player_weapons),
            ("round", self.round),
            ("player_position", self.player_position),
            ("allgrenades", self.allgrenades),
            ("allplayers_id", self.allplayers_id),
            ("allplayers_state", self.allplayers_state),
            ("allplayers_match_stats", self.allplayers_match_stats),
            ("allplayers_weapons", self.allplayers_weapons),
            ("allplayers_position", self.allplayers_position),
            ("bomb", self.bomb),
            ("phase_countdowns", self.phase_countdowns),
        ]
    }
}

fn indent(cfg: &mut String, level: usize) {
    for _ in 0..level {
        cfg.push_str("    ");
    }
}

fn push_str_setting(cfg: &mut String, level: usize, key: &str, value: &str) {
    indent(cfg, level);
    let _ = writeln!(cfg, "\"{key}\" \"{value}\"");
}

// Whole floats keep one decimal place so `30.0` does not collapse to `30`.
fn push_float_setting(cfg: &mut String, level: usize, key: &str, value: f64) {
    indent(cfg, level);
    if value == value.trunc() {
        let _ = writeln!(cfg, "\"{key}\" \"{value:.1}\"");
    } else {
        let _ = writeln!(cfg, "\"{key}\" \"{value}\"");
    }
}

fn push_bool_setting(cfg: &mut String, level: usize, key: &str, value: bool) {
    indent(cfg, level);
    let _ = writeln!(cfg, "\"{key}\" \"{}\"", if value { "1" } else { "0" });
}

#[cfg(test)]
mod tests {
    use super::GsiConfig;

    #[test]
    fn renders_all_sections_in_order() {
        let config = GsiConfig::new("observer", "http://127.0.0.1:3000/gsi");
        let cfg = config.render();
        let uri = cfg.find("\"uri\"").expect("uri");
        let output = cfg.find("\"output\"").expect("output");
        let data = cfg.find("\"data\"").expect("data");
        assert!(uri < output && output < data);
        assert!(cfg.starts_with("\"observer\"\n{\n"));
        assert!(cfg.ends_with("}\n"));
        assert!(cfg.contains("\"uri\" \"http://127.0.0.1:3000/gsi\""));
    }

    #[test]
    fn booleans_render_as_one_and_zero() {
        let mut config = GsiConfig::new("svc", "http://localhost:3000/");
        config.subscribe_to_all(false);
        config.bomb = true;
        let cfg = config.render();
        assert!(cfg.contains("\"bomb\" \"1\""));
        assert!(cfg.contains("\"provider\" \"0\""));
        assert!(cfg.contains("\"phase_countdowns\" \"0\""));
    }

    #[test]
    fn whole_floats_keep_a_decimal_place() {
        let config = GsiConfig::new("svc", "http://localhost:3000/");
        let cfg = config.render();
        assert!(cfg.contains("\"heartbeat\" \"30.0\""));
        assert!(cfg.contains("\"timeout\" \"1.1\""));
        assert!(cfg.contains("\"precision_time\" \"0.01\""));
    }

    #[test]
    fn data_section_lists_all_seventeen_flags() {
        let config = GsiConfig::new("svc", "http://localhost:3000/");
        assert_eq!(config.data_flags().len(), 17);
        let cfg = config.render();
        for (key, _) in config.data_flags() {
            assert!(cfg.contains(&format!("\"{key}\"")), "missing {key}");
        }
    }

    #[test]
    fn file_name_matches_game_convention() {
        let config = GsiConfig::new("observer", "http://localhost:3000/");
        assert_eq!(config.file_name(), "gamestate_integration_observer.cfg");
    }
}
