//! Ordinary combat against a single enemy.
//!
//! A fight is a sequence of rounds. Each round the player attacks or tries to
//! flee; the enemy answers only if it is still standing. A round is applied
//! in full before it returns, so there is no half-resolved state to observe.

pub mod action;

pub use action::{CombatAction, RoundOutcome, RoundReport, Spoils};

use dv_core::{EnemyKind, Player};

use crate::dice::Roller;
use crate::error::{MechError, MechResult};

/// Percent chance that fleeing succeeds.
pub const FLEE_CHANCE: u32 = 50;
/// The least damage any enemy hit can do.
pub const MIN_ENEMY_DAMAGE: i32 = 1;
/// Damage poison deals at the end of each round it ticks.
pub const POISON_DAMAGE: i32 = 3;

/// Item that counts as a starter weapon when nothing is equipped.
pub const STARTER_WEAPON: &str = "Wooden Sword";

/// Roll the player's damage for one attack.
///
/// An equipped weapon deals its attack plus `0..5`. Without one, carrying the
/// starter weapon deals `10..20`, and bare hands deal `5..10`.
pub fn player_damage(player: &Player, roller: &mut dyn Roller) -> i32 {
    if player.weapon.is_some() {
        player.attack_bonus + roller.range(0, 5)
    } else if player.has_item(STARTER_WEAPON) {
        roller.range(10, 20)
    } else {
        roller.range(5, 10)
    }
}

/// Roll one enemy hit against `defense`.
///
/// Never less than [`MIN_ENEMY_DAMAGE`], however high the defense.
pub fn enemy_damage(enemy: EnemyKind, defense: i32, roller: &mut dyn Roller) -> i32 {
    let range = enemy.stats().damage;
    let raw = roller.range(range.start, range.end);
    raw.saturating_sub(defense).max(MIN_ENEMY_DAMAGE)
}

/// A fight in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encounter {
    enemy: EnemyKind,
    health: i32,
    finished: bool,
}

impl Encounter {
    /// Start a fight against a fresh enemy.
    pub fn new(enemy: EnemyKind) -> Self {
        Self {
            enemy,
            health: enemy.stats().max_health,
            finished: false,
        }
    }

    /// Pick one of `enemies` uniformly. `None` when the list is empty.
    pub fn ambush(enemies: &[EnemyKind], roller: &mut dyn Roller) -> Option<Self> {
        if enemies.is_empty() {
            return None;
        }
        let enemy = enemies[roller.index(enemies.len())];
        tracing::debug!(enemy = enemy.name(), "ambush");
        Some(Self::new(enemy))
    }

    /// The enemy being fought.
    pub fn enemy(&self) -> EnemyKind {
        self.enemy
    }

    /// The enemy's remaining health.
    pub fn enemy_health(&self) -> i32 {
        self.health
    }

    /// Whether a previous round ended the fight.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Resolve one round.
    ///
    /// On victory the enemy's gold and loot are added to `player` before this
    /// returns. Counting the kill toward quests is the caller's job.
    pub fn round(
        &mut self,
        player: &mut Player,
        action: CombatAction,
        roller: &mut dyn Roller,
    ) -> MechResult<RoundReport> {
        if self.finished {
            return Err(MechError::EncounterOver);
        }

        let mut report = RoundReport {
            action,
            dealt: None,
            taken: None,
            poison: None,
            outcome: RoundOutcome::Continue,
        };

        match action {
            CombatAction::Attack => {
                let dealt = player_damage(player, roller);
                self.health -= dealt;
                report.dealt = Some(dealt);
                tracing::debug!(enemy = self.enemy.name(), dealt, left = self.health, "player hits");

                if self.health <= 0 {
                    report.outcome = RoundOutcome::Victory(self.claim_spoils(player));
                    self.finished = true;
                    return Ok(report);
                }
            }
            CombatAction::Flee => {
                if roller.chance(FLEE_CHANCE) {
                    tracing::debug!(enemy = self.enemy.name(), "escaped");
                    report.outcome = RoundOutcome::Escaped;
                    self.finished = true;
                    return Ok(report);
                }
            }
        }

        // Poison from this round's hit starts ticking next round.
        let poisoned = player.poisoned;
        let taken = enemy_damage(self.enemy, player.defense_bonus, roller);
        player.take_damage(taken);
        report.taken = Some(taken);
        tracing::debug!(enemy = self.enemy.name(), taken, health = player.health, "enemy hits");
        if self.enemy.stats().venomous && !player.poisoned {
            player.poisoned = true;
            tracing::debug!(enemy = self.enemy.name(), "player poisoned");
        }

        if poisoned {
            player.take_damage(POISON_DAMAGE);
            report.poison = Some(POISON_DAMAGE);
        }

        if player.is_defeated() {
            report.outcome = RoundOutcome::Defeat;
            self.finished = true;
        }
        Ok(report)
    }

    fn claim_spoils(&self, player: &mut Player) -> Spoils {
        let stats = self.enemy.stats();
        player.gold = player.gold.saturating_add(stats.reward_gold);
        player.add_items(stats.loot.iter().copied());
        tracing::info!(enemy = stats.name, gold = stats.reward_gold, "enemy defeated");
        Spoils {
            enemy: self.enemy,
            gold: stats.reward_gold,
            loot: stats.loot.iter().map(|item| (*item).to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{Dice, ScriptedRoller};
    use chrono::Utc;
    use dv_core::{ItemCatalog, economy};
    use proptest::prelude::*;

    fn player() -> Player {
        Player::new("Tester", 0, Utc::now())
    }

    #[test]
    fn unknown_input_attacks() {
        assert_eq!(CombatAction::from_input("2"), CombatAction::Flee);
        assert_eq!(CombatAction::from_input(" FLEE "), CombatAction::Flee);
        assert_eq!(CombatAction::from_input("1"), CombatAction::Attack);
        assert_eq!(CombatAction::from_input("dance"), CombatAction::Attack);
    }

    #[test]
    fn damage_sources() {
        let catalog = ItemCatalog::standard();
        let mut p = player();
        assert_eq!(player_damage(&p, &mut ScriptedRoller::new([7])), 7);

        p.add_item(STARTER_WEAPON);
        assert_eq!(player_damage(&p, &mut ScriptedRoller::new([15])), 15);

        p.add_item("Fine Sword");
        economy::equip(&mut p, &catalog, "Fine Sword").unwrap();
        assert_eq!(player_damage(&p, &mut ScriptedRoller::new([4])), 54);
    }

    #[test]
    fn forced_flee_changes_nothing() {
        let mut p = player();
        let mut fight = Encounter::new(EnemyKind::Bandit);
        let before_player = p.clone();
        let before_enemy = fight.enemy_health();

        let report = fight
            .round(&mut p, CombatAction::Flee, &mut ScriptedRoller::new([0]))
            .unwrap();

        assert_eq!(report.outcome, RoundOutcome::Escaped);
        assert_eq!(p, before_player);
        assert_eq!(fight.enemy_health(), before_enemy);
        assert!(fight.is_finished());
    }

    #[test]
    fn failed_flee_takes_a_hit() {
        let mut p = player();
        let mut fight = Encounter::new(EnemyKind::Wolf);
        let report = fight
            .round(&mut p, CombatAction::Flee, &mut ScriptedRoller::new([50, 8]))
            .unwrap();

        assert_eq!(report.outcome, RoundOutcome::Continue);
        assert_eq!(report.dealt, None);
        assert_eq!(report.taken, Some(8));
        assert_eq!(p.health, 92);
        assert_eq!(fight.enemy_health(), 20);
    }

    #[test]
    fn victory_grants_loot_and_gold() {
        let mut p = player();
        let mut fight = Encounter::new(EnemyKind::Bat);
        // Rocket launcher hits far harder than a bat's 80 health.
        p.weapon = Some("Rocket Launcher".to_string());
        p.attack_bonus = 333;

        let report = fight
            .round(&mut p, CombatAction::Attack, &mut ScriptedRoller::new([0]))
            .unwrap();

        let RoundOutcome::Victory(spoils) = report.outcome else {
            panic!("expected victory");
        };
        assert_eq!(spoils.gold, 12);
        assert_eq!(spoils.loot, vec!["Bat Wing", "Bat Fang"]);
        assert_eq!(p.gold, 12);
        assert_eq!(p.inventory, vec!["Bat Wing", "Bat Fang"]);
        assert_eq!(report.taken, None);
    }

    #[test]
    fn enemy_strikes_back_when_alive() {
        let mut p = player();
        let mut fight = Encounter::new(EnemyKind::Bandit);
        let report = fight
            .round(&mut p, CombatAction::Attack, &mut ScriptedRoller::new([9, 14]))
            .unwrap();

        assert_eq!(report.dealt, Some(9));
        assert_eq!(report.taken, Some(14));
        assert_eq!(fight.enemy_health(), 291);
        assert_eq!(p.health, 86);
    }

    #[test]
    fn defeat_ends_the_fight() {
        let mut p = player();
        p.health = 5;
        let mut fight = Encounter::new(EnemyKind::Bat);
        let report = fight
            .round(&mut p, CombatAction::Attack, &mut ScriptedRoller::new([5, 40]))
            .unwrap();

        assert_eq!(report.outcome, RoundOutcome::Defeat);
        assert!(p.is_defeated());
        assert_eq!(
            fight.round(&mut p, CombatAction::Attack, &mut ScriptedRoller::default()),
            Err(MechError::EncounterOver)
        );
    }

    #[test]
    fn spider_bite_poisons_then_ticks() {
        let catalog = ItemCatalog::standard();
        let mut p = player();
        let mut fight = Encounter::new(EnemyKind::VenomSpider);

        let first = fight
            .round(&mut p, CombatAction::Attack, &mut ScriptedRoller::new([5, 8]))
            .unwrap();
        assert!(p.poisoned);
        assert_eq!(first.poison, None);
        assert_eq!(p.health, 92);

        let second = fight
            .round(&mut p, CombatAction::Attack, &mut ScriptedRoller::new([5, 8]))
            .unwrap();
        assert_eq!(second.poison, Some(POISON_DAMAGE));
        assert_eq!(p.health, 92 - 8 - POISON_DAMAGE);

        p.add_item("Herb");
        let eaten = economy::consume(&mut p, &catalog, &["Herb"]).unwrap();
        assert!(eaten.cured);
        assert!(!p.poisoned);

        let third = fight
            .round(&mut p, CombatAction::Flee, &mut ScriptedRoller::new([50, 8]))
            .unwrap();
        assert_eq!(third.outcome, RoundOutcome::Continue);
        assert_eq!(third.poison, None);
        assert!(p.poisoned);
    }

    #[test]
    fn poison_tick_can_finish_the_player() {
        let mut p = player();
        p.health = 10;
        p.poisoned = true;
        let mut fight = Encounter::new(EnemyKind::Wolf);
        let report = fight
            .round(&mut p, CombatAction::Attack, &mut ScriptedRoller::new([1, 8]))
            .unwrap();

        assert_eq!(report.taken, Some(8));
        assert_eq!(report.poison, Some(POISON_DAMAGE));
        assert_eq!(report.outcome, RoundOutcome::Defeat);
    }

    #[test]
    fn ambush_picks_from_list() {
        let enemies = [EnemyKind::Bandit, EnemyKind::Wolf];
        let fight = Encounter::ambush(&enemies, &mut ScriptedRoller::new([1])).unwrap();
        assert_eq!(fight.enemy(), EnemyKind::Wolf);
        assert!(Encounter::ambush(&[], &mut ScriptedRoller::default()).is_none());
    }

    proptest! {
        #[test]
        fn enemy_damage_never_below_one(
            defense in 0i32..5000,
            seed in any::<u64>(),
            enemy in prop_oneof![
                Just(EnemyKind::Wolf),
                Just(EnemyKind::VenomSpider),
                Just(EnemyKind::Bandit),
                Just(EnemyKind::Bat),
            ],
        ) {
            let mut dice = Dice::seeded(seed);
            let hit = enemy_damage(enemy, defense, &mut dice);
            prop_assert!(hit >= MIN_ENEMY_DAMAGE);
            prop_assert!(hit < enemy.stats().damage.end);
        }
    }
}
