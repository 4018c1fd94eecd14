//! Buying, selling, equipment and consumables.
//!
//! Every function here either applies all of its effects or returns an error
//! with the player untouched. Any change to equipment ends with
//! [`refresh_stats`].

use crate::error::{CoreError, CoreResult};
use crate::item::{EquipSlot, Heal, ItemCatalog, SpecialEffect};
use crate::player::{Player, refresh_stats};

/// A completed purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    /// Items bought, in request order.
    pub items: Vec<String>,
    /// Gold debited.
    pub total: u32,
    /// Items that went straight into an equipment slot.
    pub equipped: Vec<String>,
}

/// One line of the buyer's offer list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellOffer {
    /// Item name.
    pub item: String,
    /// Copies carried.
    pub owned: usize,
    /// Gold per copy.
    pub price: u32,
}

/// A completed sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    /// Item sold.
    pub item: String,
    /// Copies sold.
    pub quantity: usize,
    /// Gold received.
    pub gold: u32,
}

/// What eating or drinking a batch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consumption {
    /// Items used up.
    pub consumed: Vec<String>,
    /// Selected items that cannot be consumed. They stay in the inventory.
    pub skipped: Vec<String>,
    /// Health actually gained.
    pub healed: i32,
    /// Whether a curing item cleared poison.
    pub cured: bool,
}

/// Buy a batch of items from the shop.
///
/// Unknown names are checked before funds, so a batch with a typo is reported
/// as [`CoreError::UnknownItem`] even when it is also unaffordable.
pub fn buy<S: AsRef<str>>(
    player: &mut Player,
    catalog: &ItemCatalog,
    names: &[S],
) -> CoreResult<Purchase> {
    if names.is_empty() {
        return Err(CoreError::EmptyBatch);
    }

    let mut unknown = Vec::new();
    let mut total: u64 = 0;
    for name in names {
        match catalog.shop_price(name.as_ref()) {
            Some(price) => total += u64::from(price),
            None => unknown.push(name.as_ref().to_string()),
        }
    }
    if !unknown.is_empty() {
        return Err(CoreError::UnknownItem(unknown));
    }
    let total = u32::try_from(total).unwrap_or(u32::MAX);
    if total > player.gold {
        return Err(CoreError::InsufficientFunds {
            needed: total,
            available: player.gold,
        });
    }

    player.gold -= total;
    let mut equipped = Vec::new();
    for name in names {
        let name = name.as_ref();
        player.add_item(name);
        if let Some(slot) = catalog.slot_for(name) {
            *player.slot_mut(slot) = Some(name.to_string());
            equipped.push(name.to_string());
        }
    }
    refresh_stats(player, catalog);
    tracing::info!(total, items = names.len(), gold = player.gold, "purchase");

    Ok(Purchase {
        items: names.iter().map(|n| n.as_ref().to_string()).collect(),
        total,
        equipped,
    })
}

/// Carried items the shop will buy, grouped, in inventory order.
pub fn sell_offers(player: &Player, catalog: &ItemCatalog) -> Vec<SellOffer> {
    player
        .grouped_inventory()
        .into_iter()
        .filter_map(|(item, owned)| {
            catalog.sell_price(item).map(|price| SellOffer {
                item: item.to_string(),
                owned,
                price,
            })
        })
        .collect()
}

/// Sell `quantity` copies of the offer at `index` (zero-based) in
/// [`sell_offers`].
pub fn sell(
    player: &mut Player,
    catalog: &ItemCatalog,
    index: usize,
    quantity: usize,
) -> CoreResult<Sale> {
    let offers = sell_offers(player, catalog);
    let offer = offers
        .get(index)
        .ok_or_else(|| CoreError::InvalidSelection(format!("no offer number {}", index + 1)))?;
    if quantity == 0 || quantity > offer.owned {
        return Err(CoreError::InvalidSelection(format!(
            "quantity must be between 1 and {}",
            offer.owned
        )));
    }

    let count = u32::try_from(quantity).unwrap_or(u32::MAX);
    let gold = offer.price.saturating_mul(count);
    for _ in 0..quantity {
        player.remove_item(&offer.item);
    }
    player.gold = player.gold.saturating_add(gold);
    release_missing_equipment(player, catalog);
    tracing::info!(item = %offer.item, quantity, gold, "sale");

    Ok(Sale {
        item: offer.item.clone(),
        quantity,
        gold,
    })
}

/// Equip a carried weapon or armor, replacing whatever was in that slot.
pub fn equip(player: &mut Player, catalog: &ItemCatalog, item: &str) -> CoreResult<EquipSlot> {
    if !player.has_item(item) {
        return Err(CoreError::ItemNotInInventory(item.to_string()));
    }
    let slot = catalog
        .slot_for(item)
        .ok_or_else(|| CoreError::NotEquippable(item.to_string()))?;
    *player.slot_mut(slot) = Some(item.to_string());
    refresh_stats(player, catalog);
    tracing::debug!(item, %slot, "equipped");
    Ok(slot)
}

/// Clear a slot. The item stays in the inventory.
pub fn unequip(player: &mut Player, catalog: &ItemCatalog, slot: EquipSlot) -> CoreResult<String> {
    let item = player.slot_mut(slot).take().ok_or(CoreError::SlotEmpty(slot))?;
    refresh_stats(player, catalog);
    tracing::debug!(item = %item, %slot, "unequipped");
    Ok(item)
}

/// Eat or drink a batch of carried items.
///
/// Healing is summed over the batch and then clamped to max health; a
/// full-heal item restores to max regardless of the sum.
pub fn consume<S: AsRef<str>>(
    player: &mut Player,
    catalog: &ItemCatalog,
    names: &[S],
) -> CoreResult<Consumption> {
    if names.is_empty() {
        return Err(CoreError::EmptyBatch);
    }
    check_carried(player, names)?;

    let mut consumed = Vec::new();
    let mut skipped = Vec::new();
    let mut amount: i32 = 0;
    let mut full = false;
    let mut cure = false;
    for name in names {
        let name = name.as_ref();
        let Some(entry) = catalog.get(name).filter(|e| e.heal.is_some()) else {
            skipped.push(name.to_string());
            continue;
        };
        match entry.heal {
            Some(Heal::Amount(n)) => amount = amount.saturating_add(n),
            Some(Heal::Full) => full = true,
            None => {}
        }
        if entry.effect == Some(SpecialEffect::Cure) {
            cure = true;
        }
        consumed.push(name.to_string());
    }
    if consumed.is_empty() {
        return Err(CoreError::NothingConsumable);
    }

    for name in &consumed {
        player.remove_item(name);
    }
    let before = player.health;
    if full {
        player.heal_full();
    } else {
        player.heal(amount);
    }
    let cured = cure && player.poisoned;
    if cured {
        player.poisoned = false;
    }
    release_missing_equipment(player, catalog);
    let healed = player.health - before;
    tracing::debug!(items = consumed.len(), healed, "consumed");

    Ok(Consumption {
        consumed,
        skipped,
        healed,
        cured,
    })
}

/// Drop a batch of carried items. Returns them for the caller to put on the
/// ground.
pub fn discard<S: AsRef<str>>(
    player: &mut Player,
    catalog: &ItemCatalog,
    names: &[S],
) -> CoreResult<Vec<String>> {
    if names.is_empty() {
        return Err(CoreError::EmptyBatch);
    }
    check_carried(player, names)?;

    let dropped: Vec<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
    for name in &dropped {
        player.remove_item(name);
    }
    release_missing_equipment(player, catalog);
    Ok(dropped)
}

/// Every name must be carried, counting repeats.
fn check_carried<S: AsRef<str>>(player: &Player, names: &[S]) -> CoreResult<()> {
    for (i, name) in names.iter().enumerate() {
        let name = name.as_ref();
        let wanted = names[..=i].iter().filter(|n| n.as_ref() == name).count();
        if player.count_item(name) < wanted {
            return Err(CoreError::ItemNotInInventory(name.to_string()));
        }
    }
    Ok(())
}

/// Clear slots whose item left the inventory.
fn release_missing_equipment(player: &mut Player, catalog: &ItemCatalog) {
    for slot in [EquipSlot::Weapon, EquipSlot::Armor] {
        let gone = player
            .equipped(slot)
            .is_some_and(|item| !player.has_item(item));
        if gone {
            *player.slot_mut(slot) = None;
        }
    }
    refresh_stats(player, catalog);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;

    fn rich_player() -> Player {
        Player::new("Tester", 10_000, Utc::now())
    }

    #[test]
    fn buying_one_item() {
        let catalog = ItemCatalog::standard();
        let mut p = rich_player();
        let purchase = buy(&mut p, &catalog, &["Machine Gun"]).unwrap();

        assert_eq!(purchase.total, 150);
        assert_eq!(p.gold, 9850);
        assert!(p.has_item("Machine Gun"));
        assert_eq!(p.weapon.as_deref(), Some("Machine Gun"));
        assert_eq!(p.attack_bonus, 88);
    }

    #[test]
    fn unknown_item_rejects_whole_batch() {
        let catalog = ItemCatalog::standard();
        let mut p = rich_player();
        let err = buy(&mut p, &catalog, &["Elixir", "Lightsaber"]).unwrap_err();

        assert_eq!(err, CoreError::UnknownItem(vec!["Lightsaber".to_string()]));
        assert_eq!(p.gold, 10_000);
        assert!(p.inventory.is_empty());
    }

    #[test]
    fn insufficient_funds_rejects_whole_batch() {
        let catalog = ItemCatalog::standard();
        let mut p = Player::new("Tester", 400, Utc::now());
        let err = buy(&mut p, &catalog, &["Rocket Launcher", "Vibranium Mail"]).unwrap_err();

        assert_eq!(
            err,
            CoreError::InsufficientFunds {
                needed: 500,
                available: 400
            }
        );
        assert_eq!(p.gold, 400);
        assert!(p.inventory.is_empty());
    }

    #[test]
    fn armor_purchase_keeps_current_health() {
        let catalog = ItemCatalog::standard();
        let mut p = rich_player();
        p.health = 40;
        buy(&mut p, &catalog, &["Vibranium Mail"]).unwrap();
        assert_eq!(p.max_health, 1100);
        assert_eq!(p.health, 40);
    }

    #[test]
    fn elixir_is_not_auto_consumed() {
        let catalog = ItemCatalog::standard();
        let mut p = rich_player();
        p.health = 10;
        let purchase = buy(&mut p, &catalog, &["Elixir"]).unwrap();
        assert!(purchase.equipped.is_empty());
        assert_eq!(p.health, 10);
        assert!(p.has_item("Elixir"));
    }

    #[test]
    fn later_purchase_replaces_slot() {
        let catalog = ItemCatalog::standard();
        let mut p = rich_player();
        buy(&mut p, &catalog, &["Fine Sword", "Rocket Launcher"]).unwrap();
        assert_eq!(p.weapon.as_deref(), Some("Rocket Launcher"));
        assert_eq!(p.attack_bonus, 333);
        assert_eq!(p.count_item("Fine Sword"), 1);
    }

    #[test]
    fn sell_offers_skip_unsellable() {
        let catalog = ItemCatalog::standard();
        let mut p = rich_player();
        p.add_items(["Fishing Rod", "Ore", "Wolf Pelt", "Ore"]);
        let offers = sell_offers(&p, &catalog);
        let names: Vec<_> = offers.iter().map(|o| (o.item.as_str(), o.owned)).collect();
        assert_eq!(names, vec![("Ore", 2), ("Wolf Pelt", 1)]);
    }

    #[test]
    fn selling_pays_price_times_quantity() {
        let catalog = ItemCatalog::standard();
        let mut p = Player::new("Tester", 0, Utc::now());
        p.add_items(["Ore", "Ore", "Ore"]);
        let sale = sell(&mut p, &catalog, 0, 2).unwrap();
        assert_eq!(sale.gold, 300);
        assert_eq!(p.gold, 300);
        assert_eq!(p.count_item("Ore"), 1);
    }

    #[test]
    fn bad_sell_selection_changes_nothing() {
        let catalog = ItemCatalog::standard();
        let mut p = Player::new("Tester", 0, Utc::now());
        p.add_item("Ore");
        let before = p.clone();
        assert!(matches!(
            sell(&mut p, &catalog, 3, 1),
            Err(CoreError::InvalidSelection(_))
        ));
        assert!(matches!(
            sell(&mut p, &catalog, 0, 2),
            Err(CoreError::InvalidSelection(_))
        ));
        assert_eq!(p, before);
    }

    #[test]
    fn selling_last_equipped_copy_unequips() {
        let catalog = ItemCatalog::standard();
        let mut p = Player::new("Tester", 0, Utc::now());
        p.add_item("Leather Armor");
        equip(&mut p, &catalog, "Leather Armor").unwrap();
        p.heal_full();
        assert_eq!(p.health, 300);

        sell(&mut p, &catalog, 0, 1).unwrap();
        assert_eq!(p.armor, None);
        assert_eq!(p.max_health, 100);
        assert_eq!(p.health, 100);
    }

    #[test]
    fn equip_and_unequip_keep_inventory() {
        let catalog = ItemCatalog::standard();
        let mut p = Player::new("Tester", 0, Utc::now());
        p.add_item("Short Sword");

        assert_eq!(equip(&mut p, &catalog, "Short Sword"), Ok(EquipSlot::Weapon));
        assert_eq!(p.attack_bonus, 30);
        assert_eq!(
            unequip(&mut p, &catalog, EquipSlot::Weapon),
            Ok("Short Sword".to_string())
        );
        assert_eq!(p.attack_bonus, 0);
        assert!(p.has_item("Short Sword"));
        assert_eq!(
            unequip(&mut p, &catalog, EquipSlot::Weapon),
            Err(CoreError::SlotEmpty(EquipSlot::Weapon))
        );
    }

    #[test]
    fn equip_rejects_non_gear() {
        let catalog = ItemCatalog::standard();
        let mut p = Player::new("Tester", 0, Utc::now());
        p.add_item("Apple");
        assert_eq!(
            equip(&mut p, &catalog, "Apple"),
            Err(CoreError::NotEquippable("Apple".to_string()))
        );
        assert_eq!(
            equip(&mut p, &catalog, "Pistol"),
            Err(CoreError::ItemNotInInventory("Pistol".to_string()))
        );
    }

    #[test]
    fn consume_sums_then_clamps() {
        let catalog = ItemCatalog::standard();
        let mut p = Player::new("Tester", 0, Utc::now());
        p.health = 50;
        p.poisoned = true;
        p.add_items(["Bread", "Herb", "Ore"]);

        let result = consume(&mut p, &catalog, &["Bread", "Herb", "Ore"]).unwrap();
        assert_eq!(result.healed, 50);
        assert!(result.cured);
        assert!(!p.poisoned);
        assert_eq!(result.skipped, vec!["Ore".to_string()]);
        assert_eq!(p.health, 100);
        assert_eq!(p.inventory, vec!["Ore".to_string()]);
    }

    #[test]
    fn herb_without_poison_only_heals() {
        let catalog = ItemCatalog::standard();
        let mut p = Player::new("Tester", 0, Utc::now());
        p.health = 50;
        p.add_item("Herb");

        let result = consume(&mut p, &catalog, &["Herb"]).unwrap();
        assert!(!result.cured);
        assert_eq!(result.healed, 40);
    }

    #[test]
    fn bread_leaves_poison_alone() {
        let catalog = ItemCatalog::standard();
        let mut p = Player::new("Tester", 0, Utc::now());
        p.poisoned = true;
        p.add_item("Bread");

        let result = consume(&mut p, &catalog, &["Bread"]).unwrap();
        assert!(!result.cured);
        assert!(p.poisoned);
    }

    #[test]
    fn elixir_restores_to_max() {
        let catalog = ItemCatalog::standard();
        let mut p = Player::new("Tester", 0, Utc::now());
        p.health = 3;
        p.add_item("Elixir");
        consume(&mut p, &catalog, &["Elixir"]).unwrap();
        assert_eq!(p.health, p.max_health);
    }

    #[test]
    fn consume_nothing_edible() {
        let catalog = ItemCatalog::standard();
        let mut p = Player::new("Tester", 0, Utc::now());
        p.add_item("Ore");
        assert_eq!(
            consume(&mut p, &catalog, &["Ore"]),
            Err(CoreError::NothingConsumable)
        );
        assert!(p.has_item("Ore"));
    }

    #[test]
    fn discard_counts_repeats() {
        let catalog = ItemCatalog::standard();
        let mut p = Player::new("Tester", 0, Utc::now());
        p.add_item("Torch");
        assert_eq!(
            discard(&mut p, &catalog, &["Torch", "Torch"]),
            Err(CoreError::ItemNotInInventory("Torch".to_string()))
        );
        assert_eq!(
            discard(&mut p, &catalog, &["Torch"]),
            Ok(vec!["Torch".to_string()])
        );
        assert!(p.inventory.is_empty());
    }

    fn shop_item() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("Fine Sword".to_string()),
            Just("Machine Gun".to_string()),
            Just("Rocket Launcher".to_string()),
            Just("Vibranium Mail".to_string()),
            Just("Powered Armor".to_string()),
            Just("Elixir".to_string()),
            Just("Cursed Amulet".to_string()),
        ]
    }

    proptest! {
        #[test]
        fn purchase_is_all_or_nothing(
            gold in 0u32..2000,
            batch in proptest::collection::vec(shop_item(), 1..6),
        ) {
            let catalog = ItemCatalog::standard();
            let mut p = Player::new("Tester", gold, Utc::now());
            let before = p.clone();

            match buy(&mut p, &catalog, &batch) {
                Ok(purchase) => {
                    let sum: u32 = batch.iter().filter_map(|n| catalog.shop_price(n)).sum();
                    prop_assert_eq!(purchase.total, sum);
                    prop_assert_eq!(p.gold, gold - sum);
                    prop_assert_eq!(&p.inventory, &batch);
                }
                Err(_) => prop_assert_eq!(p, before),
            }
        }
    }
}
