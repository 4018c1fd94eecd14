//! The game session.
//!
//! [`GameSession`] owns every piece of mutable game state: the world, the
//! player, the current location, any fight or fishing duel in progress, and
//! the boss. Each method is one player command. A command that returns an
//! error leaves the session exactly as it was.

use std::path::{Path, PathBuf};

use chrono::Utc;
use dv_core::economy::{self, Consumption, Purchase, Sale, SellOffer};
use dv_core::player::RestOutcome;
use dv_core::quest::{Acceptance, QuestProgress};
use dv_core::{
    CoreError, Direction, EnemyKind, EquipSlot, ItemCatalog, Location, LocationId, LocationRole,
    Player, QuestBook, QuestId, SaveData, WorldGraph,
};
use dv_mechanics::fishing::FISHING_ROD;
use dv_mechanics::{
    Angler, Boss, BossAction, BossOutcome, BossReport, CastOutcome, Catch, CombatAction, Dice,
    DuelOutcome, Encounter, FishDuel, MechError, ReelReport, Roller, RoundOutcome, RoundReport,
};

use crate::config::GameConfig;
use crate::dialogue::{self, DialogueLine, LineKind};
use crate::error::{GameError, GameResult};
use crate::parser::{resolve_name, resolve_names, suggest_names};

/// Percent chance that anything happens between commands.
const AMBIENT_CHANCE: u32 = 40;
/// Percent chance that an ambient event is an ambush rather than a visitor.
const AMBIENT_AMBUSH_CHANCE: u32 = 50;

/// Whether the run is still going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Still playing.
    Exploring,
    /// The player fell. Terminal.
    Defeated,
    /// The boss fell. Terminal.
    Victorious,
}

impl GameStatus {
    /// Whether the run has ended.
    pub fn is_over(self) -> bool {
        self != Self::Exploring
    }
}

/// A fight in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// An ordinary enemy.
    Skirmish(Encounter),
    /// The boss. Its state lives on the session so it survives an escape.
    Boss,
}

/// Something that happened on arriving at a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalEvent {
    /// The village offered a rest.
    Rest(RestOutcome),
    /// An enemy attacked. Resolve it with [`GameSession::combat_round`].
    Ambush(EnemyKind),
    /// The boss woke. Resolve it with [`GameSession::boss_round`].
    BossAwakens,
}

/// Result of moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    /// Where the player now is.
    pub location: LocationId,
    /// What happened there, if anything.
    pub event: Option<ArrivalEvent>,
}

/// Result of picking up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pickup {
    /// Items moved into the inventory.
    pub items: Vec<String>,
    /// Active quests whose objective is now met. Talk to hand them in.
    pub ready: Vec<QuestId>,
}

/// A round of ordinary combat, with any quest progress it caused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatTurn {
    /// What happened in the round.
    pub report: RoundReport,
    /// Counting quests advanced by a victory.
    pub progress: Vec<QuestProgress>,
}

/// Something that happened between commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmbientEvent {
    /// An enemy jumped the player.
    Ambush(EnemyKind),
    /// Someone came over to talk.
    Visitor(Vec<DialogueLine>),
}

/// Kinds of command the player can give.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Walk through an exit.
    Move,
    /// Recall to the village.
    Village,
    /// Pick up ground items.
    Take,
    /// Talk to someone.
    Talk,
    /// Accept an offered quest.
    Accept,
    /// Browse and buy.
    Shop,
    /// Sell carried items.
    Sell,
    /// Equip or unequip.
    Equip,
    /// Eat or drink.
    Eat,
    /// Drop items.
    Discard,
    /// Cast a line.
    Fish,
    /// Write the save file.
    Save,
    /// Read the save file.
    Load,
}

/// A running game.
pub struct GameSession {
    config: GameConfig,
    world: WorldGraph,
    catalog: ItemCatalog,
    quests: QuestBook,
    player: Player,
    location: LocationId,
    roller: Box<dyn Roller>,
    conflict: Option<Conflict>,
    boss: Option<Boss>,
    boss_defeated: bool,
    angler: Angler,
    duel: Option<FishDuel>,
    status: GameStatus,
    pending_offers: Vec<QuestId>,
}

impl GameSession {
    /// Start a new game in the standard valley.
    pub fn new(config: GameConfig) -> Self {
        let world = WorldGraph::standard();
        let location = world.starting_location();
        let player = Player::new(
            config.player_name.clone(),
            config.starting_gold,
            Utc::now(),
        );
        tracing::info!(
            player = %player.name,
            seed = config.seed,
            gold = player.gold,
            "new game"
        );
        Self {
            roller: Box::new(Dice::seeded(config.seed)),
            config,
            world,
            catalog: ItemCatalog::standard(),
            quests: QuestBook::standard(),
            player,
            location,
            conflict: None,
            boss: None,
            boss_defeated: false,
            angler: Angler::new(),
            duel: None,
            status: GameStatus::Exploring,
            pending_offers: Vec::new(),
        }
    }

    /// Replace the source of randomness.
    pub fn with_roller(mut self, roller: impl Roller + 'static) -> Self {
        self.roller = Box::new(roller);
        self
    }

    /// The session's settings.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The world.
    pub fn world(&self) -> &WorldGraph {
        &self.world
    }

    /// The item catalog.
    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// The quest definitions.
    pub fn quest_book(&self) -> &QuestBook {
        &self.quests
    }

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable access to the player.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Where the player is.
    pub fn location_id(&self) -> LocationId {
        self.location
    }

    /// The location the player is at.
    pub fn location(&self) -> &Location {
        self.world.location(self.location)
    }

    /// The fight in progress, if any.
    pub fn conflict(&self) -> Option<&Conflict> {
        self.conflict.as_ref()
    }

    /// The ordinary fight in progress, if any.
    pub fn encounter(&self) -> Option<&Encounter> {
        match &self.conflict {
            Some(Conflict::Skirmish(encounter)) => Some(encounter),
            _ => None,
        }
    }

    /// The boss, once it has woken.
    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    /// The fishing duel in progress, if any.
    pub fn duel(&self) -> Option<&FishDuel> {
        self.duel.as_ref()
    }

    /// Whether the run is still going.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Offers from the last conversation, in the order they were made.
    pub fn pending_offers(&self) -> &[QuestId] {
        &self.pending_offers
    }

    /// Whether every quest is done and the boss still waits.
    pub fn boss_warning(&self) -> bool {
        !self.boss_defeated && self.quests.all_completed(&self.player)
    }

    /// Exits from the current location, with destination names.
    pub fn exits(&self) -> Vec<(Direction, &str)> {
        self.location()
            .exits()
            .iter()
            .map(|exit| (exit.direction, self.world.location(exit.to).name.as_str()))
            .collect()
    }

    /// Commands that make sense right now.
    ///
    /// Nothing is available during a fight or duel, or after the run ends.
    pub fn available_commands(&self) -> Vec<CommandKind> {
        if self.ensure_exploring().is_err() {
            return Vec::new();
        }
        let here = self.location();
        let mut kinds = vec![CommandKind::Move, CommandKind::Village];
        if !here.items.is_empty() {
            kinds.push(CommandKind::Take);
        }
        if here.has_villager {
            kinds.push(CommandKind::Talk);
        }
        if !self.pending_offers.is_empty() {
            kinds.push(CommandKind::Accept);
        }
        kinds.extend([CommandKind::Shop, CommandKind::Sell, CommandKind::Equip]);
        if !self.player.inventory.is_empty() {
            kinds.extend([CommandKind::Eat, CommandKind::Discard]);
        }
        if here.role == LocationRole::Lake && self.player.has_item(FISHING_ROD) {
            kinds.push(CommandKind::Fish);
        }
        kinds.extend([CommandKind::Save, CommandKind::Load]);
        kinds
    }

    /// Walk through an exit.
    pub fn move_to(&mut self, direction: Direction) -> GameResult<Arrival> {
        self.ensure_exploring()?;
        let to = self.world.travel(self.location, direction)?;
        Ok(self.arrive(to))
    }

    /// Recall to the village from anywhere.
    pub fn return_to_village(&mut self) -> GameResult<Arrival> {
        self.ensure_exploring()?;
        let village = self
            .world
            .find_by_role(&LocationRole::Village)
            .unwrap_or_else(|| self.world.starting_location());
        Ok(self.arrive(village))
    }

    fn arrive(&mut self, to: LocationId) -> Arrival {
        self.location = to;
        self.pending_offers.clear();
        let role = self.world.location(to).role.clone();
        tracing::debug!(location = %self.world.location(to).name, "arrived");

        let event = match &role {
            LocationRole::Village => Some(ArrivalEvent::Rest(self.player.try_rest(
                Utc::now(),
                self.config.rest_cooldown,
                self.config.rest_heal,
            ))),
            LocationRole::BossLair { .. } if self.boss_warning() => {
                self.boss.get_or_insert_with(Boss::new);
                self.conflict = Some(Conflict::Boss);
                tracing::info!("the boss awakens");
                Some(ArrivalEvent::BossAwakens)
            }
            LocationRole::Hostile { enemies } | LocationRole::BossLair { enemies } => {
                self.start_ambush(enemies).map(ArrivalEvent::Ambush)
            }
            LocationRole::Lake => None,
        };
        Arrival {
            location: to,
            event,
        }
    }

    fn start_ambush(&mut self, enemies: &[EnemyKind]) -> Option<EnemyKind> {
        let encounter = Encounter::ambush(enemies, self.roller.as_mut())?;
        let enemy = encounter.enemy();
        self.conflict = Some(Conflict::Skirmish(encounter));
        Some(enemy)
    }

    /// Pick up everything on the ground here.
    pub fn pick_up(&mut self) -> GameResult<Pickup> {
        self.ensure_exploring()?;
        if self.location().items.is_empty() {
            return Err(GameError::NothingToPickUp);
        }
        let items = self.world.take_ground_items(self.location);
        self.player.add_items(items.iter().cloned());
        let ready = self
            .player
            .quests
            .active()
            .iter()
            .copied()
            .filter(|id| self.quests.is_ready(*id, &self.player))
            .collect();
        tracing::debug!(count = items.len(), "picked up");
        Ok(Pickup { items, ready })
    }

    /// Talk to whoever is here.
    ///
    /// Ready quests are handed in immediately. Offers are remembered until the
    /// player moves, for [`GameSession::accept_quest`].
    pub fn talk(&mut self) -> GameResult<Vec<DialogueLine>> {
        self.ensure_exploring()?;
        let here = self.world.location(self.location);
        if !here.has_villager {
            return Err(GameError::NoVillager);
        }
        let lines = dialogue::converse(&self.quests, &here.role, &here.items, &mut self.player)?;
        self.pending_offers = lines
            .iter()
            .filter_map(|line| match line.kind {
                LineKind::Offer(id) => Some(id),
                LineKind::Completed(_) | LineKind::Loan(_) | LineKind::Remark => None,
            })
            .collect();
        for line in &lines {
            if let LineKind::Loan(item) = line.kind {
                self.world
                    .location_mut(self.location)
                    .items
                    .push(item.to_string());
            }
        }
        Ok(lines)
    }

    /// Accept the `choice`-th offer (1-based) from the last conversation.
    ///
    /// A loaned item is placed on the ground here.
    pub fn accept_quest(&mut self, choice: usize) -> GameResult<Acceptance> {
        self.ensure_exploring()?;
        let index = choice
            .checked_sub(1)
            .filter(|i| *i < self.pending_offers.len())
            .ok_or(GameError::NoSuchOffer)?;
        let acceptance = self
            .quests
            .accept(self.pending_offers[index], &mut self.player)?;
        self.pending_offers.remove(index);
        if let Some(item) = acceptance.loaned_item {
            self.world
                .location_mut(self.location)
                .items
                .push(item.to_string());
        }
        Ok(acceptance)
    }

    /// The shop's stock.
    pub fn shop(&self) -> Vec<(&str, u32)> {
        self.catalog.shop_listing()
    }

    /// Buy a batch. Names are matched against the shop ignoring case.
    pub fn buy(&mut self, items: &[String]) -> GameResult<Purchase> {
        self.ensure_exploring()?;
        let listing: Vec<&str> = self.catalog.shop_listing().into_iter().map(|(n, _)| n).collect();
        let names = resolve_names(items, &listing);
        economy::buy(&mut self.player, &self.catalog, &names)
            .map_err(|err| with_suggestions(err, &listing))
    }

    /// What the shop will buy from the player.
    pub fn sell_offers(&self) -> Vec<SellOffer> {
        economy::sell_offers(&self.player, &self.catalog)
    }

    /// Sell `quantity` copies of offer number `offer` (1-based).
    pub fn sell(&mut self, offer: usize, quantity: usize) -> GameResult<Sale> {
        self.ensure_exploring()?;
        let index = offer
            .checked_sub(1)
            .ok_or_else(|| CoreError::InvalidSelection("offers are numbered from 1".to_string()))?;
        Ok(economy::sell(&mut self.player, &self.catalog, index, quantity)?)
    }

    /// Equip a carried item.
    pub fn equip(&mut self, item: &str) -> GameResult<EquipSlot> {
        self.ensure_exploring()?;
        let name = self.carried_name(item);
        Ok(economy::equip(&mut self.player, &self.catalog, &name)?)
    }

    /// Clear an equipment slot.
    pub fn unequip(&mut self, slot: EquipSlot) -> GameResult<String> {
        self.ensure_exploring()?;
        Ok(economy::unequip(&mut self.player, &self.catalog, slot)?)
    }

    /// Eat or drink a batch of carried items.
    pub fn consume(&mut self, items: &[String]) -> GameResult<Consumption> {
        self.ensure_exploring()?;
        let names = self.carried_names(items);
        Ok(economy::consume(&mut self.player, &self.catalog, &names)?)
    }

    /// Drop a batch of carried items on the ground here.
    pub fn discard(&mut self, items: &[String]) -> GameResult<Vec<String>> {
        self.ensure_exploring()?;
        let names = self.carried_names(items);
        let dropped = economy::discard(&mut self.player, &self.catalog, &names)?;
        self.world
            .location_mut(self.location)
            .items
            .extend(dropped.iter().cloned());
        Ok(dropped)
    }

    fn carried_name(&self, input: &str) -> String {
        resolve_name(input, self.player.inventory.iter().map(String::as_str))
            .map_or_else(|| input.trim().to_string(), str::to_string)
    }

    fn carried_names(&self, inputs: &[String]) -> Vec<String> {
        inputs.iter().map(|input| self.carried_name(input)).collect()
    }

    /// Fight one round against the current ordinary enemy.
    ///
    /// Unrecognized input attacks.
    pub fn combat_round(&mut self, input: &str) -> GameResult<CombatTurn> {
        self.ensure_running()?;
        let Some(Conflict::Skirmish(encounter)) = &mut self.conflict else {
            return Err(GameError::NotInCombat);
        };
        let action = CombatAction::from_input(input);
        let report = encounter.round(&mut self.player, action, self.roller.as_mut())?;

        let mut progress = Vec::new();
        match &report.outcome {
            RoundOutcome::Continue => {}
            RoundOutcome::Victory(spoils) => {
                progress = self.quests.record_defeat(spoils.enemy, &mut self.player);
                self.conflict = None;
            }
            RoundOutcome::Escaped => self.conflict = None,
            RoundOutcome::Defeat => self.end(GameStatus::Defeated),
        }
        Ok(CombatTurn { report, progress })
    }

    /// Fight one round against the boss.
    ///
    /// Item names for a use action are matched against the inventory ignoring
    /// case.
    pub fn boss_round(&mut self, input: &str) -> GameResult<BossReport> {
        self.ensure_running()?;
        if self.conflict != Some(Conflict::Boss) {
            return Err(GameError::NotInCombat);
        }
        let action = match BossAction::from_input(input) {
            BossAction::UseItem(items) => BossAction::UseItem(self.carried_names(&items)),
            other => other,
        };
        let boss = self.boss.as_mut().ok_or(GameError::NotInCombat)?;
        let report = boss
            .round(&mut self.player, &self.catalog, &action, self.roller.as_mut())
            .map_err(unwrap_core)?;

        match report.outcome {
            BossOutcome::Continue => {}
            BossOutcome::Victory(_) => {
                self.boss_defeated = true;
                self.boss = None;
                self.end(GameStatus::Victorious);
            }
            BossOutcome::Escaped => self.conflict = None,
            BossOutcome::Defeat => self.end(GameStatus::Defeated),
        }
        Ok(report)
    }

    /// Cast a line. `Some` when something bit; reel it in with
    /// [`GameSession::fish_reel`].
    pub fn fish_cast(&mut self) -> GameResult<Option<Catch>> {
        self.ensure_exploring()?;
        if self.location().role != LocationRole::Lake {
            return Err(GameError::NotAtLake);
        }
        if !self.player.has_item(FISHING_ROD) {
            return Err(GameError::NoFishingRod);
        }
        match self.angler.cast(self.roller.as_mut()) {
            CastOutcome::LineBroke => Ok(None),
            CastOutcome::Hooked(duel) => {
                let catch = duel.catch();
                self.duel = Some(duel);
                Ok(Some(catch))
            }
        }
    }

    /// Play one round of the fishing duel.
    pub fn fish_reel(&mut self, input: &str) -> GameResult<ReelReport> {
        self.ensure_running()?;
        let duel = self.duel.as_mut().ok_or(GameError::NotFishing)?;
        let report = duel.reel(input, &mut self.player, self.roller.as_mut())?;
        match report.outcome {
            DuelOutcome::Continue => {}
            DuelOutcome::Landed(_) | DuelOutcome::Escaped => self.duel = None,
            DuelOutcome::Defeat => {
                self.duel = None;
                self.end(GameStatus::Defeated);
            }
        }
        Ok(report)
    }

    /// Roll for something to happen between commands.
    ///
    /// Ambushes need enemies here; visitors need someone to talk to.
    pub fn ambient_event(&mut self) -> GameResult<Option<AmbientEvent>> {
        self.ensure_exploring()?;
        if !self.roller.chance(AMBIENT_CHANCE) {
            return Ok(None);
        }
        // Outside the village a won ambush roll is spent even where nothing
        // lives to attack.
        let ambush = self.roller.chance(AMBIENT_AMBUSH_CHANCE);
        if ambush && self.location().role != LocationRole::Village {
            let enemies = self.location().role.enemies().to_vec();
            return Ok(self.start_ambush(&enemies).map(AmbientEvent::Ambush));
        }
        if self.location().has_villager {
            tracing::debug!("a villager approaches");
            return Ok(Some(AmbientEvent::Visitor(self.talk()?)));
        }
        Ok(None)
    }

    /// Write the game to the configured save path.
    pub fn save(&self) -> GameResult<PathBuf> {
        let path = self.config.save_path.clone();
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write the game to `path`.
    pub fn save_to(&self, path: &Path) -> GameResult<()> {
        self.ensure_exploring()?;
        let data = SaveData::from_player(&self.player, &self.location().name);
        std::fs::write(path, data.encode())?;
        tracing::info!(path = %path.display(), "game saved");
        Ok(())
    }

    /// Restore the game from the configured save path.
    pub fn load(&mut self) -> GameResult<PathBuf> {
        let path = self.config.save_path.clone();
        self.load_from(&path)?;
        Ok(path)
    }

    /// Restore the game from `path`.
    ///
    /// Replaces the player and location. The boss is not saved, so it sleeps
    /// again until the lair is entered.
    pub fn load_from(&mut self, path: &Path) -> GameResult<()> {
        self.ensure_exploring()?;
        if !path.exists() {
            return Err(GameError::MissingSave(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let data = SaveData::decode(&text).map_err(|err| match err {
            CoreError::CorruptSave(reason) => GameError::CorruptSave {
                path: path.to_path_buf(),
                reason,
            },
            other => other.into(),
        })?;

        let (player, location_name) = data.into_player(&self.catalog, Utc::now());
        self.location = self.world.find_by_name(&location_name).unwrap_or_else(|| {
            tracing::warn!(location = %location_name, "unknown saved location, starting in the village");
            self.world.starting_location()
        });
        self.player = player;
        self.pending_offers.clear();
        self.boss = None;
        tracing::info!(path = %path.display(), player = %self.player.name, "game loaded");
        Ok(())
    }

    fn end(&mut self, status: GameStatus) {
        tracing::info!(?status, "game over");
        self.status = status;
        self.conflict = None;
    }

    fn ensure_running(&self) -> GameResult<()> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    fn ensure_exploring(&self) -> GameResult<()> {
        self.ensure_running()?;
        if self.conflict.is_some() {
            return Err(GameError::InCombat);
        }
        if self.duel.is_some() {
            return Err(GameError::ReelingIn);
        }
        Ok(())
    }
}

fn with_suggestions(err: CoreError, candidates: &[&str]) -> GameError {
    match err {
        CoreError::UnknownItem(items) => {
            let mut suggestions: Vec<String> = Vec::new();
            for item in &items {
                for name in suggest_names(item, candidates.iter().copied(), 1) {
                    if !suggestions.contains(&name) {
                        suggestions.push(name);
                    }
                }
            }
            GameError::UnknownItem { items, suggestions }
        }
        other => other.into(),
    }
}

fn unwrap_core(err: MechError) -> GameError {
    match err {
        MechError::Core(core) => core.into(),
        other => other.into(),
    }
}
