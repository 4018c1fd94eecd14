//! Command parsing.

use dv_core::{Direction, EquipSlot};

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Walk through an exit.
    Move {
        /// The direction to move.
        direction: Direction,
    },
    /// Recall to the village from anywhere.
    Village,
    /// Pick up everything on the ground.
    Take,
    /// Talk to whoever is here.
    Talk,
    /// Accept a quest from the last conversation.
    Accept {
        /// 1-based offer number.
        choice: usize,
    },
    /// Show the shop's stock.
    Shop,
    /// Buy a batch of items.
    Buy {
        /// Item names as typed.
        items: Vec<String>,
    },
    /// Show what the shop will buy, or sell.
    Sell {
        /// 1-based offer number and quantity. `None` lists offers.
        order: Option<(usize, usize)>,
    },
    /// Equip a carried item.
    Equip {
        /// Item name as typed.
        item: String,
    },
    /// Clear an equipment slot.
    Unequip {
        /// Slot to clear.
        slot: EquipSlot,
    },
    /// Eat or drink carried items.
    Eat {
        /// Item names as typed.
        items: Vec<String>,
    },
    /// Drop carried items on the ground.
    Discard {
        /// Item names as typed.
        items: Vec<String>,
    },
    /// List the inventory.
    Inventory,
    /// Cast a line at the lake.
    Fish,
    /// Show player status.
    Status,
    /// Write the save file.
    Save,
    /// Read the save file.
    Load,
    /// Show help.
    Help,
    /// Quit the game.
    Quit,
    /// Input that parsed to nothing known, or a verb missing its argument.
    Unknown {
        /// The original input.
        input: String,
    },
}

const TAKE_VERBS: &[&str] = &["take", "get", "pick", "grab"];
const TALK_VERBS: &[&str] = &["talk", "speak", "chat"];
const EAT_VERBS: &[&str] = &["eat", "drink", "consume", "use"];
const DROP_VERBS: &[&str] = &["drop", "discard"];
const INVENTORY_VERBS: &[&str] = &["inventory", "inv", "i", "bag"];
const HELP_VERBS: &[&str] = &["help", "h", "?", "commands"];
const QUIT_VERBS: &[&str] = &["quit", "q", "exit"];

/// Parse a line of player input.
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let (verb, rest) = match input.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb.to_lowercase(), rest.trim()),
        None => (input.to_lowercase(), ""),
    };
    let unknown = || Command::Unknown {
        input: input.to_string(),
    };

    if let Some(direction) = Direction::parse(&verb) {
        return Command::Move { direction };
    }
    if verb == "go" {
        return Direction::parse(rest).map_or_else(unknown, |direction| Command::Move { direction });
    }

    match verb.as_str() {
        "village" | "recall" => Command::Village,
        "accept" => rest
            .parse()
            .map_or_else(|_| unknown(), |choice| Command::Accept { choice }),
        "shop" => Command::Shop,
        "buy" => non_empty(item_list(rest)).map_or_else(unknown, |items| Command::Buy { items }),
        "sell" => parse_sell(rest).unwrap_or_else(unknown),
        "equip" | "wield" | "wear" if !rest.is_empty() => Command::Equip {
            item: rest.to_string(),
        },
        "unequip" | "remove" => parse_slot(rest).map_or_else(unknown, |slot| Command::Unequip { slot }),
        "fish" => Command::Fish,
        "status" | "stats" => Command::Status,
        "save" => Command::Save,
        "load" => Command::Load,
        v if TAKE_VERBS.contains(&v) => Command::Take,
        v if TALK_VERBS.contains(&v) => Command::Talk,
        v if EAT_VERBS.contains(&v) => {
            non_empty(item_list(rest)).map_or_else(unknown, |items| Command::Eat { items })
        }
        v if DROP_VERBS.contains(&v) => {
            non_empty(item_list(rest)).map_or_else(unknown, |items| Command::Discard { items })
        }
        v if INVENTORY_VERBS.contains(&v) => Command::Inventory,
        v if HELP_VERBS.contains(&v) => Command::Help,
        v if QUIT_VERBS.contains(&v) => Command::Quit,
        _ => unknown(),
    }
}

/// Split `"Apple, Bread,Herb"` into names, dropping empty segments.
fn item_list(rest: &str) -> Vec<String> {
    rest.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    (!items.is_empty()).then_some(items)
}

fn parse_sell(rest: &str) -> Option<Command> {
    let mut words = rest.split_whitespace();
    let Some(first) = words.next() else {
        return Some(Command::Sell { order: None });
    };
    let offer = first.parse().ok()?;
    let quantity = match words.next() {
        Some(word) => word.parse().ok()?,
        None => 1,
    };
    Some(Command::Sell {
        order: Some((offer, quantity)),
    })
}

fn parse_slot(rest: &str) -> Option<EquipSlot> {
    match rest.trim().to_lowercase().as_str() {
        "weapon" => Some(EquipSlot::Weapon),
        "armor" | "armour" => Some(EquipSlot::Armor),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_bare_direction() {
        assert_eq!(
            parse_command("n"),
            Command::Move {
                direction: Direction::North
            }
        );
        assert_eq!(
            parse_command("go West"),
            Command::Move {
                direction: Direction::West
            }
        );
    }

    #[test]
    fn parse_item_lists() {
        assert_eq!(
            parse_command("buy machine gun, Elixir,"),
            Command::Buy {
                items: vec!["machine gun".to_string(), "Elixir".to_string()]
            }
        );
        assert_eq!(
            parse_command("eat Apple"),
            Command::Eat {
                items: vec!["Apple".to_string()]
            }
        );
        assert_eq!(
            parse_command("drop Torch, Ore"),
            Command::Discard {
                items: vec!["Torch".to_string(), "Ore".to_string()]
            }
        );
    }

    #[test]
    fn parse_sell() {
        assert_eq!(parse_command("sell"), Command::Sell { order: None });
        assert_eq!(
            parse_command("sell 2"),
            Command::Sell {
                order: Some((2, 1))
            }
        );
        assert_eq!(
            parse_command("sell 1 3"),
            Command::Sell {
                order: Some((1, 3))
            }
        );
        assert!(matches!(parse_command("sell lots"), Command::Unknown { .. }));
    }

    #[test]
    fn parse_equipment() {
        assert_eq!(
            parse_command("equip Short Sword"),
            Command::Equip {
                item: "Short Sword".to_string()
            }
        );
        assert_eq!(
            parse_command("unequip armour"),
            Command::Unequip {
                slot: EquipSlot::Armor
            }
        );
        assert!(matches!(parse_command("equip"), Command::Unknown { .. }));
    }

    #[test]
    fn parse_simple_verbs() {
        assert_eq!(parse_command("take"), Command::Take);
        assert_eq!(parse_command("TALK"), Command::Talk);
        assert_eq!(parse_command("accept 2"), Command::Accept { choice: 2 });
        assert_eq!(parse_command("village"), Command::Village);
        assert_eq!(parse_command("inv"), Command::Inventory);
        assert_eq!(parse_command("fish"), Command::Fish);
        assert_eq!(parse_command("status"), Command::Status);
        assert_eq!(parse_command("save"), Command::Save);
        assert_eq!(parse_command("?"), Command::Help);
        assert_eq!(parse_command("quit"), Command::Quit);
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            parse_command("dance wildly"),
            Command::Unknown {
                input: "dance wildly".to_string()
            }
        );
        assert!(matches!(parse_command(""), Command::Unknown { .. }));
        assert!(matches!(parse_command("buy"), Command::Unknown { .. }));
    }

    proptest! {
        #[test]
        fn item_lists_never_hold_blank_names(input in "[a-zA-Z ,]{0,40}") {
            if let Command::Buy { items } = parse_command(&format!("buy {input}")) {
                prop_assert!(!items.is_empty());
                prop_assert!(items.iter().all(|item| !item.trim().is_empty()));
            }
        }
    }
}
