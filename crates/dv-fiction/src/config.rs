//! Configuration for a game session.

use std::path::PathBuf;

use chrono::Duration;

/// Settings a session is started with.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// RNG seed for reproducible runs.
    pub seed: u64,
    /// Name of a new player.
    pub player_name: String,
    /// Gold a new player starts with.
    pub starting_gold: u32,
    /// Time between village rests.
    pub rest_cooldown: Duration,
    /// Health restored by a rest.
    pub rest_heal: i32,
    /// Where `save` and `load` go by default.
    pub save_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            player_name: "Adventurer".to_string(),
            starting_gold: 10_000,
            rest_cooldown: Duration::seconds(60),
            rest_heal: 30,
            save_path: PathBuf::from("savegame.txt"),
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the player name. Blank names keep the default.
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.player_name = name.trim().to_string();
        }
        self
    }

    /// Set the starting gold.
    pub fn with_starting_gold(mut self, gold: u32) -> Self {
        self.starting_gold = gold;
        self
    }

    /// Set the rest cooldown.
    pub fn with_rest_cooldown(mut self, cooldown: Duration) -> Self {
        self.rest_cooldown = cooldown;
        self
    }

    /// Set the health a rest restores (negative values become 0).
    pub fn with_rest_heal(mut self, amount: i32) -> Self {
        self.rest_heal = amount.max(0);
        self
    }

    /// Set the save file path.
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.player_name, "Adventurer");
        assert_eq!(cfg.starting_gold, 10_000);
        assert_eq!(cfg.rest_cooldown, Duration::seconds(60));
        assert_eq!(cfg.rest_heal, 30);
    }

    #[test]
    fn builder_methods() {
        let cfg = GameConfig::default()
            .with_seed(7)
            .with_player_name("Ayla")
            .with_starting_gold(50)
            .with_save_path("slot.txt");
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.player_name, "Ayla");
        assert_eq!(cfg.starting_gold, 50);
        assert_eq!(cfg.save_path, PathBuf::from("slot.txt"));
    }

    #[test]
    fn blank_name_keeps_default() {
        let cfg = GameConfig::default().with_player_name("   ");
        assert_eq!(cfg.player_name, "Adventurer");
    }

    #[test]
    fn rest_heal_not_negative() {
        assert_eq!(GameConfig::default().with_rest_heal(-5).rest_heal, 0);
    }
}
