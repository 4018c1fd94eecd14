//! Everything the shell prints.

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dv_core::economy::{Consumption, SellOffer};
use dv_core::player::RestOutcome;
use dv_core::{Player, QuestId, QuestStatus};
use dv_fiction::{CombatTurn, CommandKind, DialogueLine, GameSession, GameStatus, LineKind};
use dv_mechanics::boss::{BOSS_NAME, BossReport};
use dv_mechanics::fishing::ReelReport;
use dv_mechanics::{BossOutcome, Catch, DuelOutcome, RoundOutcome};

pub fn warn(e: &impl std::fmt::Display) {
    println!("{}\n", e.to_string().yellow());
}

fn table() -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn location(session: &GameSession) {
    let here = session.location();
    println!("  {}", here.name.bold());
    println!("  {}", here.description);
    if !here.items.is_empty() {
        println!("  On the ground: {}", here.items.join(", "));
    }
    if here.has_villager {
        println!("  Someone here might want to talk.");
    }
    let exits: Vec<String> = session
        .exits()
        .iter()
        .map(|(direction, to)| format!("{direction} ({to})"))
        .collect();
    println!("  Exits: {}", exits.join(", ").dimmed());
    if session.boss_warning() {
        println!("  {}", "A dark presence stirs in the cave...".magenta());
    }
    println!();
}

pub fn rest(outcome: RestOutcome) {
    match outcome {
        RestOutcome::Rested { healed } => {
            println!("  You rest in the village and recover {healed} HP.\n");
        }
        RestOutcome::Cooldown { remaining_secs } => {
            println!("  You are not tired yet. You can rest again in {remaining_secs}s.\n");
        }
    }
}

pub fn dialogue(lines: &[DialogueLine]) {
    let mut offer = 0;
    for line in lines {
        match &line.kind {
            LineKind::Offer(quest) => {
                offer += 1;
                println!("  {}: \"{}\"", line.speaker.bold(), line.text);
                println!("    {} accept {offer} to take on \"{quest}\"", "->".cyan());
            }
            LineKind::Completed(reward) => {
                println!("  {}: \"{}\"", line.speaker.bold(), line.text);
                println!("    {} {}", "Quest complete:".green(), reward.quest);
            }
            LineKind::Loan(item) => {
                println!("  {}: \"{}\"", line.speaker.bold(), line.text);
                println!("    {} A {item} is left on the ground for you.", "->".cyan());
            }
            LineKind::Remark => println!("  {}: \"{}\"", line.speaker.bold(), line.text),
        }
    }
    println!();
}

pub fn shop(listing: &[(&str, u32)], gold: u32) {
    let mut table = table();
    table.set_header(vec!["#", "Item", "Price"]);
    for (i, (item, price)) in listing.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), (*item).to_string(), price.to_string()]);
    }
    println!("{table}");
    println!("  You have {gold} gold. Buy with: buy Item, Item\n");
}

pub fn sell_offers(offers: &[SellOffer]) {
    if offers.is_empty() {
        println!("  You have nothing the shop wants.\n");
        return;
    }
    let mut table = table();
    table.set_header(vec!["#", "Item", "Owned", "Price"]);
    for (i, offer) in offers.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            offer.item.clone(),
            offer.owned.to_string(),
            offer.price.to_string(),
        ]);
    }
    println!("{table}");
    println!("  Sell with: sell <#> [quantity]\n");
}

pub fn inventory(player: &Player) {
    let grouped = player.grouped_inventory();
    if grouped.is_empty() {
        println!("  Your bag is empty.\n");
        return;
    }
    let mut table = table();
    table.set_header(vec!["Item", "Count", ""]);
    for (item, count) in grouped {
        let note = if player.weapon.as_deref() == Some(item) || player.armor.as_deref() == Some(item) {
            "equipped"
        } else {
            ""
        };
        table.add_row(vec![item.to_string(), format!("x{count}"), note.to_string()]);
    }
    println!("{table}\n");
}

pub fn status(session: &GameSession) {
    let player = session.player();
    let mut table = table();
    table.set_header(vec!["", player.name.as_str()]);
    table.add_row(vec!["Health".to_string(), format!("{}/{}", player.health, player.max_health)]);
    if player.poisoned {
        table.add_row(vec!["Condition".to_string(), "poisoned".to_string()]);
    }
    table.add_row(vec!["Gold".to_string(), player.gold.to_string()]);
    table.add_row(vec![
        "Weapon".to_string(),
        player.weapon.clone().unwrap_or_else(|| "-".to_string()),
    ]);
    table.add_row(vec![
        "Armor".to_string(),
        player.armor.clone().unwrap_or_else(|| "-".to_string()),
    ]);
    table.add_row(vec!["Attack".to_string(), player.attack_bonus.to_string()]);
    table.add_row(vec!["Defense".to_string(), player.defense_bonus.to_string()]);
    table.add_row(vec!["Location".to_string(), session.location().name.clone()]);
    println!("{table}");

    let mut quests = self::table();
    quests.set_header(vec!["Quest", "Status"]);
    for def in session.quest_book().quests() {
        quests.add_row(vec![def.id.to_string(), quest_status(player, def.id)]);
    }
    println!("{quests}");
    if session.boss_warning() {
        println!("  {}", "Every quest is done. Something waits in the cave.".magenta());
    }
    println!();
}

fn quest_status(player: &Player, id: QuestId) -> String {
    match player.quests.status(id) {
        QuestStatus::NotOffered => "-".to_string(),
        QuestStatus::Active if id == QuestId::BanditHunt => format!(
            "active ({}/{})",
            player.quests.progress(id),
            dv_core::quest::BANDIT_QUEST_REQUIREMENT
        ),
        QuestStatus::Active => "active".to_string(),
        QuestStatus::Completed => "completed".to_string(),
    }
}

pub fn consumption(consumption: &Consumption) {
    println!(
        "  You consume {} and recover {} HP.",
        consumption.consumed.join(", "),
        consumption.healed
    );
    if consumption.cured {
        println!("  You feel the poison leave your body.");
    }
    if !consumption.skipped.is_empty() {
        println!("  You can't eat {}.", consumption.skipped.join(", "));
    }
    println!();
}

pub fn combat_turn(enemy: dv_core::EnemyKind, turn: &CombatTurn) {
    let report = &turn.report;
    if let Some(dealt) = report.dealt {
        println!("  You hit the {enemy} for {dealt}.");
    }
    if let Some(taken) = report.taken {
        println!("  The {enemy} hits you for {}.", taken.to_string().red());
    }
    if let Some(poison) = report.poison {
        println!("  The poison burns for {}.", poison.to_string().green());
    }
    match &report.outcome {
        RoundOutcome::Continue => {}
        RoundOutcome::Victory(spoils) => {
            println!("  {} The {enemy} is defeated.", "Victory!".green().bold());
            println!("  You gain {} gold.", spoils.gold);
            if !spoils.loot.is_empty() {
                println!("  Loot: {}", spoils.loot.join(", "));
            }
        }
        RoundOutcome::Escaped => println!("  You got away."),
        RoundOutcome::Defeat => println!("  {}", "You collapse.".red().bold()),
    }
    for progress in &turn.progress {
        println!(
            "  {}: {}/{}",
            progress.quest, progress.current, progress.required
        );
    }
    println!();
}

pub fn boss_report(report: &BossReport) {
    if let Some(phase) = report.phase_change {
        println!("  {} enters phase {phase}!", BOSS_NAME.magenta().bold());
    }
    if let Some(consumed) = &report.consumed {
        consumption(consumed);
    }
    if let Some(dealt) = report.dealt {
        println!("  You strike {BOSS_NAME} for {dealt}.");
    }
    if let Some(healed) = report.boss_healed {
        println!("  {BOSS_NAME} mends its wounds and recovers {healed} HP.");
    }
    if let Some(strike) = &report.strike {
        println!(
            "  {BOSS_NAME} uses {} and deals {} damage.",
            strike.attack,
            strike.damage.to_string().red()
        );
        if strike.drained > 0 {
            println!("  {BOSS_NAME} drinks in {} HP of your life.", strike.drained);
        }
    }
    match &report.outcome {
        BossOutcome::Continue => {}
        BossOutcome::Victory(spoils) => {
            println!("  {} {BOSS_NAME} falls.", "Victory!".green().bold());
            println!("  You gain {} gold and {}.", spoils.gold, spoils.items.join(", "));
        }
        BossOutcome::Escaped => println!("  You escape. {BOSS_NAME} still waits in the dark."),
        BossOutcome::Defeat => println!("  {}", "You collapse.".red().bold()),
    }
    println!();
}

pub fn reel(catch: Catch, report: &ReelReport) {
    if report.correct {
        println!("  You reel in hard.");
    } else {
        println!("  You fumble the line.");
    }
    if let Some(bite) = report.bite {
        println!("  The {catch} bites you for {}.", bite.to_string().red());
    }
    match report.outcome {
        DuelOutcome::Continue => {}
        DuelOutcome::Landed(catch) => println!("  {} You land a {catch}.", "Caught!".green()),
        DuelOutcome::Escaped => println!("  The {catch} slips away."),
        DuelOutcome::Defeat => println!("  {}", "You collapse.".red().bold()),
    }
    if report.rod_broke {
        println!("  {}", "Your fishing rod snaps.".yellow());
    }
    if report.outcome != DuelOutcome::Continue {
        println!();
    }
}

pub fn help(session: &GameSession) {
    let mut table = table();
    table.set_header(vec!["Command", "What it does"]);
    for (command, what) in [
        ("north / south / east / west (n/s/e/w)", "walk through an exit"),
        ("village", "return to the village"),
        ("take", "pick up everything on the ground"),
        ("talk", "talk to whoever is here"),
        ("accept <#>", "accept a quest offer"),
        ("shop", "see what the shop sells"),
        ("buy <item>, <item>", "buy items"),
        ("sell [<#> [qty]]", "see offers, or sell"),
        ("equip <item>", "equip a weapon or armor"),
        ("unequip weapon|armor", "clear a slot"),
        ("eat <item>, <item>", "eat or drink items"),
        ("drop <item>, <item>", "drop items here"),
        ("inventory (i)", "list your items"),
        ("fish", "cast a line at the lake"),
        ("status", "show your stats and quests"),
        ("save / load", "write or read the save file"),
        ("quit", "leave the game"),
    ] {
        table.add_row(vec![command, what]);
    }
    println!("{table}");

    let available: Vec<&str> = session
        .available_commands()
        .into_iter()
        .filter_map(|kind| match kind {
            CommandKind::Take => Some("take"),
            CommandKind::Talk => Some("talk"),
            CommandKind::Accept => Some("accept"),
            CommandKind::Fish => Some("fish"),
            _ => None,
        })
        .collect();
    if !available.is_empty() {
        println!("  Right now you can also: {}", available.join(", "));
    }
    println!();
}

pub fn epilogue(session: &GameSession) {
    match session.status() {
        GameStatus::Victorious => {
            println!("  {}", "The shadow lifts from the valley.".green().bold());
            println!(
                "  {} returns home a hero, {} gold richer than any tale.",
                session.player().name,
                session.player().gold
            );
        }
        GameStatus::Defeated => {
            println!("  {}", "Darkness takes you.".red().bold());
            println!("  Your adventure ends here. GAME OVER.");
        }
        GameStatus::Exploring => {}
    }
}
