//! Sub-loops for fights and the fishing duel.

use colored::Colorize;
use dv_fiction::{Conflict, GameSession};
use dv_mechanics::Catch;

use super::display;
use super::{Failure, Flow, Prompt};

pub fn skirmish(session: &mut GameSession, prompt: &mut Prompt) -> Result<Flow, Failure> {
    while let Some(encounter) = session.encounter() {
        let enemy = encounter.enemy();
        println!(
            "  {} {} HP | You {}/{} HP",
            enemy.to_string().red().bold(),
            encounter.enemy_health(),
            session.player().health,
            session.player().max_health
        );
        println!("  1) Attack  2) Flee");
        let Some(input) = prompt.read("fight>")? else {
            return Ok(Flow::Stop);
        };
        match session.combat_round(&input) {
            Ok(turn) => display::combat_turn(enemy, &turn),
            Err(e) => display::warn(&e),
        }
    }
    Ok(Flow::Continue)
}

pub fn boss(session: &mut GameSession, prompt: &mut Prompt) -> Result<Flow, Failure> {
    while session.conflict() == Some(&Conflict::Boss) {
        if let Some(boss) = session.boss() {
            println!(
                "  {} {} HP, phase {} | You {}/{} HP",
                dv_mechanics::boss::BOSS_NAME.magenta().bold(),
                boss.health(),
                boss.phase(),
                session.player().health,
                session.player().max_health
            );
        }
        println!("  1) Attack  2) Use item (e.g. '2 Elixir, Herb')  3) Flee");
        let Some(input) = prompt.read("boss>")? else {
            return Ok(Flow::Stop);
        };
        // A bad item choice costs nothing; ask again.
        match session.boss_round(&input) {
            Ok(report) => display::boss_report(&report),
            Err(e) => display::warn(&e),
        }
    }
    Ok(Flow::Continue)
}

pub fn fish(session: &mut GameSession, prompt: &mut Prompt, catch: Catch) -> Result<Flow, Failure> {
    println!("  Something bites! A {catch} is on the line.");
    while let Some(duel) = session.duel() {
        println!(
            "  Fish stamina {} | Your stamina {}  (1 or 'reel' to reel in)",
            duel.fish_stamina(),
            duel.player_stamina()
        );
        let Some(input) = prompt.read("reel>")? else {
            return Ok(Flow::Stop);
        };
        match session.fish_reel(&input) {
            Ok(report) => display::reel(catch, &report),
            Err(e) => display::warn(&e),
        }
    }
    Ok(Flow::Continue)
}
