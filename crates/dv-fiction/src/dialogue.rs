//! Quest givers and what they say.
//!
//! A conversation walks every giver present at a location, in a fixed order.
//! A giver whose quest is ready hands it in on the spot; a giver whose quest
//! can be offered makes an offer, which only takes effect once the player
//! accepts it. A giver whose loaned item went missing lends another.

use dv_core::quest::{BANDIT_QUEST_REQUIREMENT, QuestReward};
use dv_core::{CoreResult, LocationRole, Player, QuestBook, QuestId, QuestStatus};

/// Someone who hands out one quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestGiver {
    /// Who speaks.
    pub name: &'static str,
    /// The quest they give.
    pub quest: QuestId,
    /// Said when offering.
    pub offer: &'static str,
    /// Said while the quest is in progress.
    pub reminder: &'static str,
    /// Said on hand-in.
    pub thanks: &'static str,
}

const VILLAGE_GIVERS: [QuestGiver; 3] = [
    QuestGiver {
        name: "Chief",
        quest: QuestId::BanditHunt,
        offer: "Bandits have been raiding the roads. Could you put an end to five of them?",
        reminder: "The bandits are still out there in the forest.",
        thanks: "You broke the bandits! Take this, with the village's thanks.",
    },
    QuestGiver {
        name: "Villager",
        quest: QuestId::WoodenSword,
        offer: "I lost my wooden sword somewhere in the forest. Would you bring it back?",
        reminder: "Have you found my wooden sword? It's in the forest.",
        thanks: "My sword! Thank you, here's something for your trouble.",
    },
    QuestGiver {
        name: "Blacksmith",
        quest: QuestId::CollectOre,
        offer: "I saw you help the villager. Could you fetch me some ore from the cave?",
        reminder: "Any luck with the ore? Try the cave.",
        thanks: "Good ore, this. Here's your pay.",
    },
];

const LAKE_GIVERS: [QuestGiver; 1] = [QuestGiver {
    name: "Fisherman",
    quest: QuestId::Fishing,
    offer: "Fancy catching me a fish? I'll lend you my rod.",
    reminder: "Cast your line from the shore and you'll catch something.",
    thanks: "What a catch! Here, you've earned this.",
}];

/// The givers at a location with this role, in speaking order.
pub fn givers_for(role: &LocationRole) -> &'static [QuestGiver] {
    match role {
        LocationRole::Village => &VILLAGE_GIVERS,
        LocationRole::Lake => &LAKE_GIVERS,
        LocationRole::Hostile { .. } | LocationRole::BossLair { .. } => &[],
    }
}

/// What a line of dialogue does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Offers a quest. Accept it to make it active.
    Offer(QuestId),
    /// A quest was handed in during this conversation.
    Completed(QuestReward),
    /// A lost loan is replaced. The item goes on the ground.
    Loan(&'static str),
    /// Just talk.
    Remark,
}

/// One thing someone said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueLine {
    /// Who said it.
    pub speaker: &'static str,
    /// What they said.
    pub text: String,
    /// Its effect.
    pub kind: LineKind,
}

/// Talk to everyone at a location with `role` and `ground` items.
///
/// Completions are applied to `player` as they happen; offers and loans are
/// only reported.
pub fn converse(
    book: &QuestBook,
    role: &LocationRole,
    ground: &[String],
    player: &mut Player,
) -> CoreResult<Vec<DialogueLine>> {
    let mut lines = Vec::new();
    for giver in givers_for(role) {
        let quest = giver.quest;
        if book.is_ready(quest, player) {
            let reward = book.complete(quest, player)?;
            lines.push(DialogueLine {
                speaker: giver.name,
                text: format!("{} (+{} gold)", giver.thanks, reward.gold),
                kind: LineKind::Completed(reward),
            });
        } else if book.can_offer(quest, player) {
            let text = if player.quests.status(quest) == QuestStatus::Completed {
                format!("Back again, {}? {}", player.name, giver.offer)
            } else {
                giver.offer.to_string()
            };
            lines.push(DialogueLine {
                speaker: giver.name,
                text,
                kind: LineKind::Offer(quest),
            });
        } else if player.quests.is_active(quest) {
            let lost = book
                .get(quest)
                .and_then(|def| def.loaned_item)
                .filter(|item| !player.has_item(item) && !ground.iter().any(|g| g == item));
            lines.push(match lost {
                Some(item) => DialogueLine {
                    speaker: giver.name,
                    text: format!("No {}? Here, take another.", item.to_lowercase()),
                    kind: LineKind::Loan(item),
                },
                None => DialogueLine {
                    speaker: giver.name,
                    text: reminder(giver, player),
                    kind: LineKind::Remark,
                },
            });
        }
    }

    if lines.is_empty() && !givers_for(role).is_empty() {
        lines.push(DialogueLine {
            speaker: givers_for(role)[0].name,
            text: format!("Good to see you, {}.", player.name),
            kind: LineKind::Remark,
        });
    }
    Ok(lines)
}

fn reminder(giver: &QuestGiver, player: &Player) -> String {
    match giver.quest {
        QuestId::BanditHunt => {
            let left = BANDIT_QUEST_REQUIREMENT.saturating_sub(player.quests.progress(giver.quest));
            format!("{} {left} to go.", giver.reminder)
        }
        _ => giver.reminder.to_string(),
    }
}
