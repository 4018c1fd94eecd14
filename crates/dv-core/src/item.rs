//! The item catalog.
//!
//! An item name is the one key shared by every table: the shop, weapon and
//! armor stats, the buyer's price list, and consumables. A name may appear in
//! any number of them, or none (quest items like the fishing rod).

use std::collections::HashMap;

/// How much a consumable heals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heal {
    /// Restore a fixed amount, clamped to max health.
    Amount(i32),
    /// Restore to max health.
    Full,
}

/// Extra effect of a consumable beyond healing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialEffect {
    /// Cures poison.
    Cure,
}

/// Everything the catalog knows about one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemEntry {
    /// Item name, unique across the catalog.
    pub name: String,
    /// Price at the shop, if the shop stocks it.
    pub shop_price: Option<u32>,
    /// Attack granted when equipped as a weapon.
    pub weapon_attack: Option<i32>,
    /// Defense granted when equipped as armor.
    pub armor_defense: Option<i32>,
    /// What the shop pays for one copy.
    pub sell_price: Option<u32>,
    /// Healing when consumed.
    pub heal: Option<Heal>,
    /// Extra effect when consumed.
    pub effect: Option<SpecialEffect>,
}

/// An equipment slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipSlot {
    /// Adds to attack.
    Weapon,
    /// Adds to defense and max health.
    Armor,
}

impl std::fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weapon => write!(f, "weapon"),
            Self::Armor => write!(f, "armor"),
        }
    }
}

/// Item tables keyed by name, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    entries: Vec<ItemEntry>,
    by_name: HashMap<String, usize>,
}

impl ItemCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog every game uses.
    pub fn standard() -> Self {
        let mut catalog = Self::new();

        for (name, price) in [
            ("Fine Sword", 50),
            ("Machine Gun", 150),
            ("Rocket Launcher", 300),
            ("Vibranium Mail", 200),
            ("Powered Armor", 500),
            ("Elixir", 100),
        ] {
            catalog.entry(name).shop_price = Some(price);
        }

        for (name, attack) in [
            ("Wooden Sword", 10),
            ("Fine Sword", 50),
            ("Machine Gun", 88),
            ("Rocket Launcher", 333),
            ("Short Sword", 30),
            ("Pistol", 100),
        ] {
            catalog.entry(name).weapon_attack = Some(attack);
        }

        for (name, defense) in [
            ("Vibranium Mail", 1000),
            ("Powered Armor", 888),
            ("Leather Armor", 200),
        ] {
            catalog.entry(name).armor_defense = Some(defense);
        }

        for (name, price) in [
            ("Coin Pouch", 1000),
            ("Piranha", 800),
            ("Wolf Pelt", 300),
            ("Spider Venom", 500),
            ("Ore", 150),
            ("Apple", 10),
            ("Bread", 15),
            ("Herb", 25),
            ("Torch", 30),
            ("Bat Wing", 400),
            ("Bat Fang", 600),
            ("Short Sword", 350),
            ("Leather Armor", 500),
            ("Bandit Badge", 200),
            ("Spirits", 80),
            ("Pistol", 300),
        ] {
            catalog.entry(name).sell_price = Some(price);
        }

        for (name, heal) in [
            ("Apple", Heal::Amount(20)),
            ("Bread", Heal::Amount(30)),
            ("Herb", Heal::Amount(40)),
            ("Spirits", Heal::Amount(50)),
            ("Elixir", Heal::Full),
        ] {
            catalog.entry(name).heal = Some(heal);
        }
        catalog.entry("Herb").effect = Some(SpecialEffect::Cure);

        catalog
    }

    /// Get or create the entry for a name.
    pub fn entry(&mut self, name: &str) -> &mut ItemEntry {
        let index = match self.by_name.get(name) {
            Some(index) => *index,
            None => {
                self.entries.push(ItemEntry {
                    name: name.to_string(),
                    ..ItemEntry::default()
                });
                self.by_name.insert(name.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[index]
    }

    /// Look up an entry by exact name.
    pub fn get(&self, name: &str) -> Option<&ItemEntry> {
        self.by_name.get(name).map(|i| &self.entries[*i])
    }

    /// Shop price, if the shop stocks this item.
    pub fn shop_price(&self, name: &str) -> Option<u32> {
        self.get(name).and_then(|e| e.shop_price)
    }

    /// Weapon attack, if this is a weapon.
    pub fn weapon_attack(&self, name: &str) -> Option<i32> {
        self.get(name).and_then(|e| e.weapon_attack)
    }

    /// Armor defense, if this is armor.
    pub fn armor_defense(&self, name: &str) -> Option<i32> {
        self.get(name).and_then(|e| e.armor_defense)
    }

    /// What the shop pays for one copy, if it buys this item at all.
    pub fn sell_price(&self, name: &str) -> Option<u32> {
        self.get(name).and_then(|e| e.sell_price)
    }

    /// Which slot the item goes into, weapons taking precedence.
    pub fn slot_for(&self, name: &str) -> Option<EquipSlot> {
        let entry = self.get(name)?;
        if entry.weapon_attack.is_some() {
            Some(EquipSlot::Weapon)
        } else if entry.armor_defense.is_some() {
            Some(EquipSlot::Armor)
        } else {
            None
        }
    }

    /// Items the shop sells, with prices, in catalog order.
    pub fn shop_listing(&self) -> Vec<(&str, u32)> {
        self.entries
            .iter()
            .filter_map(|e| e.shop_price.map(|p| (e.name.as_str(), p)))
            .collect()
    }

    /// All entries in registration order.
    pub fn entries(&self) -> &[ItemEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_span_multiple_tables() {
        let catalog = ItemCatalog::standard();
        let pistol = catalog.get("Pistol").unwrap();
        assert_eq!(pistol.weapon_attack, Some(100));
        assert_eq!(pistol.sell_price, Some(300));
        assert_eq!(pistol.shop_price, None);
    }

    #[test]
    fn quest_items_are_unknown() {
        let catalog = ItemCatalog::standard();
        assert!(catalog.get("Fishing Rod").is_none());
        assert_eq!(catalog.sell_price("Fish"), None);
    }

    #[test]
    fn shop_listing_order() {
        let catalog = ItemCatalog::standard();
        let names: Vec<_> = catalog.shop_listing().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec![
                "Fine Sword",
                "Machine Gun",
                "Rocket Launcher",
                "Vibranium Mail",
                "Powered Armor",
                "Elixir"
            ]
        );
    }

    #[test]
    fn slots() {
        let catalog = ItemCatalog::standard();
        assert_eq!(catalog.slot_for("Machine Gun"), Some(EquipSlot::Weapon));
        assert_eq!(catalog.slot_for("Leather Armor"), Some(EquipSlot::Armor));
        assert_eq!(catalog.slot_for("Apple"), None);
        assert_eq!(catalog.slot_for("nonsense"), None);
    }

    #[test]
    fn consumables() {
        let catalog = ItemCatalog::standard();
        assert_eq!(catalog.get("Elixir").unwrap().heal, Some(Heal::Full));
        assert_eq!(catalog.get("Herb").unwrap().effect, Some(SpecialEffect::Cure));
        assert_eq!(catalog.get("Bread").unwrap().heal, Some(Heal::Amount(30)));
    }
}
