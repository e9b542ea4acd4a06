//! Player-facing transcript text
//!
//! Engine code never prints; everything a player reads is rendered here
//! from the structured results the engine returns.

use crate::actions::ActionOutcome;
use crate::combat::{CombatEvent, CombatEventType, CombatOutcome, Side};
use crate::entity::{ActionResolution, DamageReport, Entity};
use crate::world::{MoveOutcome, TileEvent};
use std::fmt::Write;

/// Numbered (1-based) action menu for the controlled side
pub fn action_menu(actor: &Entity, target: &Entity) -> String {
    let mut menu = String::new();
    let _ = writeln!(
        menu,
        "{} [HP: {}/{} | Mana: {}/{}]  vs  {} [HP: {}]",
        actor.name(),
        actor.health(),
        actor.max_health(),
        actor.mana(),
        actor.max_mana(),
        target.name(),
        target.health()
    );
    let _ = writeln!(menu, "Choose an action:");
    for (i, action) in actor.actions().iter().enumerate() {
        let _ = writeln!(
            menu,
            "{}. {} ({})",
            i + 1,
            action.name(),
            action.id().category().label()
        );
    }
    menu.push_str(">>> ");
    menu
}

pub fn describe_damage(target: &str, report: &DamageReport) -> String {
    let mut text = String::new();
    if report.blocked {
        let _ = writeln!(text, "{} blocks part of the damage!", target);
    }
    let _ = write!(
        text,
        "{} takes {} damage. [HP: {}]",
        target, report.effective, report.health_after
    );
    text
}

pub fn describe_resolution(actor: &str, target: &str, resolution: &ActionResolution) -> String {
    match resolution {
        ActionResolution::Performed { outcome, .. } => match outcome {
            ActionOutcome::Struck { damage } => format!(
                "{} attacks {}!\n{}",
                actor,
                target,
                describe_damage(target, damage)
            ),
            ActionOutcome::BoltCast { mana_spent, damage } => format!(
                "{} hurls a fireball at {}! (-{} mana)\n{}",
                actor,
                target,
                mana_spent,
                describe_damage(target, damage)
            ),
            ActionOutcome::InsufficientMana {
                available,
                required,
            } => format!(
                "{} tries to cast a fireball, but lacks the mana! ({}/{})",
                actor, available, required
            ),
            ActionOutcome::Braced => format!("{} raises a guard!", actor),
        },
        ActionResolution::UnknownAction { .. } | ActionResolution::NoSelection => {
            format!("{} doesn't know that action!", actor)
        }
    }
}

pub fn describe_outcome(outcome: CombatOutcome, controlled: &str, opponent: &str) -> String {
    match outcome {
        CombatOutcome::ControlledWon => format!("{} is defeated!", opponent),
        CombatOutcome::ControlledLost => format!("{} has fallen...", controlled),
    }
}

/// Transcript lines for one logged event
pub fn describe_event(event: &CombatEvent) -> String {
    match &event.event_type {
        CombatEventType::Started {
            controlled,
            opponent,
        } => format!("\n=== BATTLE: {} vs {} ===", controlled, opponent),
        CombatEventType::TurnStarted { side, actor } => match side {
            Side::Controlled => format!("\n--- {}'s turn ---", actor),
            Side::Opponent => format!("\n---- {}'s turn ----", actor),
        },
        CombatEventType::ActionResolved {
            actor,
            target,
            resolution,
            ..
        } => describe_resolution(actor, target, resolution),
        CombatEventType::Ended {
            outcome,
            controlled,
            opponent,
        } => format!(
            "\n=== BATTLE OVER ===\n{}",
            describe_outcome(*outcome, controlled, opponent)
        ),
    }
}

pub fn describe_tile_event(event: &TileEvent) -> String {
    match event {
        TileEvent::Healed { health } => format!("A healing draught! Health restored to {}", health),
        TileEvent::ManaRestored { mana } => format!("A mana crystal! Mana restored to {}", mana),
        TileEvent::GoldFound { total } => format!("You found gold! ({} so far)", total),
        TileEvent::AdversaryDefeated { name, turns } => {
            format!("{} lies defeated after {} turns.", name, turns)
        }
    }
}

/// Transcript line for one map command, or `None` for a quiet step
pub fn describe_move(outcome: &MoveOutcome) -> Option<String> {
    match outcome {
        MoveOutcome::Moved { event, .. } => event.as_ref().map(describe_tile_event),
        MoveOutcome::Blocked => Some("There's a wall there!".to_string()),
        MoveOutcome::UnknownCommand(_) => Some("Unknown command.".to_string()),
        MoveOutcome::Defeated { by, .. } => Some(format!("Slain by {}. Your journey ends here.", by)),
        MoveOutcome::Halted => Some("You can no longer move.".to_string()),
    }
}

/// Render a whole log
pub fn transcript(events: &[CombatEvent]) -> String {
    events
        .iter()
        .map(describe_event)
        .collect::<Vec<_>>()
        .join("\n")
}
