//! The flat `key:value` save format.
//!
//! ```text
//! name:Ayla
//! health:87
//! max_health:300
//! gold:9850
//! inventory:Machine Gun,Leather Armor,Apple
//! active_quests:bandit_hunt
//! completed_quests:wooden_sword
//! location:Forest
//! weapon:Machine Gun
//! armor:Leather Armor
//! quest_progress:bandit_hunt=2
//! ```
//!
//! Reading is tolerant. Unknown keys are ignored, missing keys and bad
//! numbers take their defaults, and empty list segments are skipped.

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult};
use crate::item::ItemCatalog;
use crate::player::{Player, refresh_stats};
use crate::quest::{QuestId, QuestLedger};
use crate::world::STARTING_LOCATION;

/// Health when the key is missing or unusable.
pub const DEFAULT_HEALTH: i32 = 100;
/// Gold when the key is missing or unusable.
pub const DEFAULT_GOLD: u32 = 10;
/// Name when the key is missing.
pub const DEFAULT_NAME: &str = "Adventurer";

/// Keys in the order they are written.
pub const KEYS: [&str; 11] = [
    "name",
    "health",
    "max_health",
    "gold",
    "inventory",
    "active_quests",
    "completed_quests",
    "location",
    "weapon",
    "armor",
    "quest_progress",
];

/// Everything a save file records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveData {
    /// Player name.
    pub name: String,
    /// Current health.
    pub health: i32,
    /// Max health as it was when saved.
    pub max_health: i32,
    /// Gold.
    pub gold: u32,
    /// Inventory in order.
    pub inventory: Vec<String>,
    /// Active quests.
    pub active_quests: Vec<QuestId>,
    /// Completed quests.
    pub completed_quests: Vec<QuestId>,
    /// Name of the current location.
    pub location: String,
    /// Equipped weapon.
    pub weapon: Option<String>,
    /// Equipped armor.
    pub armor: Option<String>,
    /// Non-zero quest counters.
    pub quest_progress: Vec<(QuestId, u32)>,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            health: DEFAULT_HEALTH,
            max_health: DEFAULT_HEALTH,
            gold: DEFAULT_GOLD,
            inventory: Vec::new(),
            active_quests: Vec::new(),
            completed_quests: Vec::new(),
            location: STARTING_LOCATION.to_string(),
            weapon: None,
            armor: None,
            quest_progress: Vec::new(),
        }
    }
}

impl SaveData {
    /// Snapshot a player standing at `location`.
    pub fn from_player(player: &Player, location: &str) -> Self {
        Self {
            name: player.name.clone(),
            health: player.health,
            max_health: player.max_health,
            gold: player.gold,
            inventory: player.inventory.clone(),
            active_quests: player.quests.active().to_vec(),
            completed_quests: player.quests.completed().to_vec(),
            location: location.to_string(),
            weapon: player.weapon.clone(),
            armor: player.armor.clone(),
            quest_progress: player.quests.progress_entries().collect(),
        }
    }

    /// Render as `key:value` lines in [`KEYS`] order.
    pub fn encode(&self) -> String {
        let keys = |ids: &[QuestId]| ids.iter().map(|id| id.key()).collect::<Vec<_>>().join(",");
        let progress = self
            .quest_progress
            .iter()
            .map(|(id, count)| format!("{}={count}", id.key()))
            .collect::<Vec<_>>()
            .join(",");

        let values = [
            self.name.clone(),
            self.health.to_string(),
            self.max_health.to_string(),
            self.gold.to_string(),
            self.inventory.join(","),
            keys(&self.active_quests),
            keys(&self.completed_quests),
            self.location.clone(),
            self.weapon.clone().unwrap_or_default(),
            self.armor.clone().unwrap_or_default(),
            progress,
        ];

        let mut out = String::new();
        for (key, value) in KEYS.iter().zip(values) {
            out.push_str(key);
            out.push(':');
            out.push_str(&value);
            out.push('\n');
        }
        out
    }

    /// Parse save text.
    ///
    /// Fails only when no line has the `key:value` shape at all.
    pub fn decode(text: &str) -> CoreResult<Self> {
        let mut data = Self::default();
        let mut records = 0;

        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            let Some((key, value)) = line.split_once(':') else {
                if !line.trim().is_empty() {
                    tracing::warn!(line, "ignoring save line without a key");
                }
                continue;
            };
            records += 1;
            let value = value.trim();
            match key.trim() {
                "name" => {
                    if !value.is_empty() {
                        data.name = value.to_string();
                    }
                }
                "health" => data.health = number(key, value, DEFAULT_HEALTH),
                "max_health" => data.max_health = number(key, value, DEFAULT_HEALTH),
                "gold" => data.gold = number(key, value, DEFAULT_GOLD),
                "inventory" => data.inventory = list(value).map(str::to_string).collect(),
                "active_quests" => data.active_quests = quest_ids(value),
                "completed_quests" => data.completed_quests = quest_ids(value),
                "location" => {
                    if !value.is_empty() {
                        data.location = value.to_string();
                    }
                }
                "weapon" => data.weapon = slot(value),
                "armor" => data.armor = slot(value),
                "quest_progress" => data.quest_progress = progress(value),
                other => tracing::warn!(key = other, "ignoring unknown save key"),
            }
        }

        if records == 0 {
            return Err(CoreError::CorruptSave(
                "no key:value records found".to_string(),
            ));
        }
        Ok(data)
    }

    /// Rebuild the player. Returns the player and the saved location name.
    ///
    /// Equipment is authoritative: derived stats and max health are
    /// recomputed from it, and equipment the catalog does not know is dropped.
    pub fn into_player(self, catalog: &ItemCatalog, now: DateTime<Utc>) -> (Player, String) {
        let mut player = Player::new(self.name, self.gold, now);
        player.health = if self.health > 0 {
            self.health
        } else {
            tracing::warn!(health = self.health, "saved health not positive, using default");
            DEFAULT_HEALTH
        };
        player.inventory = self.inventory;
        player.weapon = self
            .weapon
            .filter(|w| known_gear(catalog.weapon_attack(w).is_some(), "weapon", w));
        player.armor = self
            .armor
            .filter(|a| known_gear(catalog.armor_defense(a).is_some(), "armor", a));
        player.quests = QuestLedger::restore(
            self.active_quests,
            self.completed_quests,
            self.quest_progress,
        );
        refresh_stats(&mut player, catalog);

        if player.max_health != self.max_health {
            tracing::warn!(
                saved = self.max_health,
                derived = player.max_health,
                "saved max health disagrees with equipment"
            );
        }
        (player, self.location)
    }
}

fn number<T: std::str::FromStr>(key: &str, value: &str, default: T) -> T {
    value.parse().unwrap_or_else(|_| {
        tracing::warn!(key, value, "unparseable number in save, using default");
        default
    })
}

fn list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn quest_ids(value: &str) -> Vec<QuestId> {
    list(value)
        .filter_map(|key| {
            let id = QuestId::parse(key);
            if id.is_none() {
                tracing::warn!(quest = key, "dropping unknown quest id");
            }
            id
        })
        .collect()
}

fn slot(value: &str) -> Option<String> {
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(value.to_string())
    }
}

fn progress(value: &str) -> Vec<(QuestId, u32)> {
    list(value)
        .filter_map(|pair| {
            let (key, count) = pair.split_once('=')?;
            let id = QuestId::parse(key)?;
            let count = count.trim().parse().ok()?;
            Some((id, count))
        })
        .collect()
}

fn known_gear(known: bool, kind: &str, name: &str) -> bool {
    if !known {
        tracing::warn!(kind, item = name, "dropping unknown equipment from save");
    }
    known
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy;
    use proptest::prelude::*;

    #[test]
    fn encode_writes_keys_in_order() {
        let text = SaveData::default().encode();
        let keys: Vec<_> = text
            .lines()
            .map(|l| l.split_once(':').unwrap().0)
            .collect();
        assert_eq!(keys, KEYS);
        assert!(text.contains("weapon:\n"));
    }

    #[test]
    fn missing_gold_uses_default() {
        let data = SaveData::decode("name:Ayla\nhealth:50\nlocation:Lake\n").unwrap();
        assert_eq!(data.gold, DEFAULT_GOLD);
        assert_eq!(data.health, 50);
        assert_eq!(data.location, "Lake");
    }

    #[test]
    fn tolerant_decode() {
        let text = "health:lots\nfavourite_colour:blue\ninventory:Apple,,Ore,\nweapon:none\nnonsense\n";
        let data = SaveData::decode(text).unwrap();
        assert_eq!(data.health, DEFAULT_HEALTH);
        assert_eq!(data.inventory, vec!["Apple", "Ore"]);
        assert_eq!(data.weapon, None);
        assert_eq!(data.location, STARTING_LOCATION);
    }

    #[test]
    fn value_may_contain_colons() {
        let data = SaveData::decode("name:Sir: the Brave\n").unwrap();
        assert_eq!(data.name, "Sir: the Brave");
    }

    #[test]
    fn unknown_quest_ids_are_dropped() {
        let data =
            SaveData::decode("active_quests:bandit_hunt,slay_dragon\nquest_progress:bandit_hunt=3,x=1\n")
                .unwrap();
        assert_eq!(data.active_quests, vec![QuestId::BanditHunt]);
        assert_eq!(data.quest_progress, vec![(QuestId::BanditHunt, 3)]);
    }

    #[test]
    fn no_records_is_corrupt() {
        assert!(matches!(
            SaveData::decode("garbage\n\nmore garbage"),
            Err(CoreError::CorruptSave(_))
        ));
        assert!(matches!(SaveData::decode(""), Err(CoreError::CorruptSave(_))));
    }

    #[test]
    fn equipment_is_authoritative_on_load() {
        let catalog = ItemCatalog::standard();
        let data = SaveData {
            health: 500,
            max_health: 9999,
            armor: Some("Leather Armor".to_string()),
            weapon: Some("Banana".to_string()),
            ..SaveData::default()
        };
        let (player, location) = data.into_player(&catalog, Utc::now());
        assert_eq!(player.max_health, 300);
        assert_eq!(player.health, 300);
        assert_eq!(player.weapon, None);
        assert_eq!(location, STARTING_LOCATION);
    }

    fn item() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("Apple"),
            Just("Ore"),
            Just("Fishing Rod"),
            Just("Machine Gun"),
            Just("Leather Armor"),
            Just("Princess's Ring"),
        ]
    }

    proptest! {
        #[test]
        fn round_trip_preserves_player(
            name in "[A-Za-z][A-Za-z ]{0,12}[A-Za-z]",
            gold in 0u32..1_000_000,
            damage in 0i32..99,
            inventory in proptest::collection::vec(item(), 0..8),
            equip_weapon in any::<bool>(),
            equip_armor in any::<bool>(),
            quest_mask in 0u8..81,
            bandits in 0u32..5,
            location in prop_oneof![Just("Village"), Just("Forest"), Just("Cave"), Just("Lake")],
        ) {
            let catalog = ItemCatalog::standard();
            let now = Utc::now();
            let mut player = Player::new(name, gold, now);
            player.add_items(inventory);
            if equip_weapon {
                player.add_item("Machine Gun");
                economy::equip(&mut player, &catalog, "Machine Gun").unwrap();
            }
            if equip_armor {
                player.add_item("Leather Armor");
                economy::equip(&mut player, &catalog, "Leather Armor").unwrap();
            }
            player.health -= damage;

            // Base-3 digits: 0 not offered, 1 active, 2 completed.
            let mut mask = quest_mask;
            for id in QuestId::all() {
                match mask % 3 {
                    1 => player.quests.activate(*id, false).unwrap(),
                    2 => {
                        player.quests.activate(*id, false).unwrap();
                        player.quests.complete(*id).unwrap();
                    }
                    _ => {}
                }
                mask /= 3;
            }
            if player.quests.is_active(QuestId::BanditHunt) {
                for _ in 0..bandits {
                    player.quests.bump_progress(QuestId::BanditHunt);
                }
            }

            let text = SaveData::from_player(&player, location).encode();
            let decoded = SaveData::decode(&text).unwrap();
            let (restored, restored_location) = decoded.into_player(&catalog, now);

            prop_assert_eq!(restored, player);
            prop_assert_eq!(restored_location, location);
        }
    }
}
