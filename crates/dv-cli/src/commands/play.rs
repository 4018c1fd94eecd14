//! The main prompt loop.

use std::io;

use colored::Colorize;
use dv_fiction::{AmbientEvent, Arrival, ArrivalEvent, Command, GameConfig, GameSession, parse_command};

use super::{Failure, Flow, Prompt, display, fight};

pub fn run(config: GameConfig, load: bool) -> io::Result<()> {
    let mut session = GameSession::new(config);
    let mut prompt = Prompt::stdin();

    println!("  {} Duskvale", "Welcome to".bold());
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    if load {
        match session.load() {
            Ok(path) => println!("  Loaded {}.\n", path.display()),
            Err(e) => display::warn(&format!("{e}; starting a new game")),
        }
    }
    display::location(&session);

    loop {
        let Some(input) = prompt.read(">")? else {
            break; // EOF
        };
        if input.is_empty() {
            continue;
        }

        let command = parse_command(&input);
        tracing::debug!(?command, "parsed");
        if command == Command::Quit {
            println!("  Farewell, {}.", session.player().name);
            break;
        }

        if settle(execute(&mut session, command, &mut prompt))? == Flow::Stop {
            break;
        }

        if session.status().is_over() {
            display::epilogue(&session);
            break;
        }
    }

    Ok(())
}

/// Report a refused command and carry on. Only a broken terminal stops play.
fn settle(result: Result<Flow, Failure>) -> io::Result<Flow> {
    match result {
        Ok(flow) => Ok(flow),
        Err(Failure::Game(e)) => {
            display::warn(&e);
            Ok(Flow::Continue)
        }
        Err(Failure::Io(e)) => Err(e),
    }
}

fn execute(session: &mut GameSession, command: Command, prompt: &mut Prompt) -> Result<Flow, Failure> {
    match command {
        Command::Move { direction } => {
            let arrival = session.move_to(direction)?;
            arrive(session, arrival, prompt)
        }
        Command::Village => {
            let arrival = session.return_to_village()?;
            arrive(session, arrival, prompt)
        }
        Command::Take => {
            let pickup = session.pick_up()?;
            println!("  You pick up {}.", pickup.items.join(", "));
            for quest in &pickup.ready {
                println!("  {} is ready to hand in.", quest.to_string().green());
            }
            println!();
            ambient(session, prompt)
        }
        Command::Talk => {
            let lines = session.talk()?;
            display::dialogue(&lines);
            ambient(session, prompt)
        }
        Command::Accept { choice } => {
            let acceptance = session.accept_quest(choice)?;
            println!("  Quest accepted: {}", acceptance.quest.to_string().bold());
            if let Some(item) = acceptance.loaned_item {
                println!("  A {item} is left on the ground for you.");
            }
            println!();
            ambient(session, prompt)
        }
        Command::Shop => {
            display::shop(&session.shop(), session.player().gold);
            Ok(Flow::Continue)
        }
        Command::Buy { items } => {
            let purchase = session.buy(&items)?;
            println!(
                "  You buy {} for {} gold.",
                purchase.items.join(", "),
                purchase.total
            );
            if !purchase.equipped.is_empty() {
                println!("  Equipped: {}", purchase.equipped.join(", "));
            }
            println!();
            ambient(session, prompt)
        }
        Command::Sell { order: None } => {
            display::sell_offers(&session.sell_offers());
            Ok(Flow::Continue)
        }
        Command::Sell {
            order: Some((offer, quantity)),
        } => {
            let sale = session.sell(offer, quantity)?;
            println!(
                "  You sell {} x{} for {} gold.\n",
                sale.item, sale.quantity, sale.gold
            );
            ambient(session, prompt)
        }
        Command::Equip { item } => {
            let slot = session.equip(&item)?;
            println!("  {item} is now your {slot}.\n");
            ambient(session, prompt)
        }
        Command::Unequip { slot } => {
            let item = session.unequip(slot)?;
            println!("  You put away the {item}.\n");
            ambient(session, prompt)
        }
        Command::Eat { items } => {
            let consumption = session.consume(&items)?;
            display::consumption(&consumption);
            ambient(session, prompt)
        }
        Command::Discard { items } => {
            let dropped = session.discard(&items)?;
            println!("  You drop {}.\n", dropped.join(", "));
            ambient(session, prompt)
        }
        Command::Inventory => {
            display::inventory(session.player());
            Ok(Flow::Continue)
        }
        Command::Fish => match session.fish_cast()? {
            Some(catch) => fight::fish(session, prompt, catch),
            None => {
                println!("  The line breaks before anything bites.\n");
                Ok(Flow::Continue)
            }
        },
        Command::Status => {
            display::status(session);
            Ok(Flow::Continue)
        }
        Command::Save => {
            let path = session.save()?;
            println!("  Game saved to {}.\n", path.display());
            Ok(Flow::Continue)
        }
        Command::Load => {
            let path = session.load()?;
            println!("  Loaded {}.\n", path.display());
            display::location(session);
            Ok(Flow::Continue)
        }
        Command::Help => {
            display::help(session);
            Ok(Flow::Continue)
        }
        Command::Quit => Ok(Flow::Stop),
        Command::Unknown { input } => {
            display::warn(&format!("I don't understand \"{input}\". Type 'help' for commands."));
            Ok(Flow::Continue)
        }
    }
}

fn arrive(session: &mut GameSession, arrival: Arrival, prompt: &mut Prompt) -> Result<Flow, Failure> {
    display::location(session);
    match arrival.event {
        None => Ok(Flow::Continue),
        Some(ArrivalEvent::Rest(outcome)) => {
            display::rest(outcome);
            Ok(Flow::Continue)
        }
        Some(ArrivalEvent::Ambush(enemy)) => {
            println!("  {} A {enemy} attacks!\n", "Ambush!".red().bold());
            fight::skirmish(session, prompt)
        }
        Some(ArrivalEvent::BossAwakens) => {
            println!(
                "  {}\n",
                "The ground shakes. Shadow Lord Kaos rises from the depths of the cave!"
                    .magenta()
                    .bold()
            );
            fight::boss(session, prompt)
        }
    }
}

fn ambient(session: &mut GameSession, prompt: &mut Prompt) -> Result<Flow, Failure> {
    match session.ambient_event()? {
        None => Ok(Flow::Continue),
        Some(AmbientEvent::Ambush(enemy)) => {
            println!("  {} A {enemy} jumps out at you!\n", "Ambush!".red().bold());
            fight::skirmish(session, prompt)
        }
        Some(AmbientEvent::Visitor(lines)) => {
            println!("  Someone comes over to talk.");
            display::dialogue(&lines);
            Ok(Flow::Continue)
        }
    }
}
