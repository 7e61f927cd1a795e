#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic expedition system that walks adventurers through their routes.
//!
//! Each round every adventurer with queued instructions executes exactly one
//! of them, strictly in declaration order. The world resolves each command
//! against the positions left by the commands before it, so an adventurer
//! processed earlier in a round wins any contested cell.

use treasure_hunt_core::{AdventurerView, Command, Event};
use treasure_hunt_world::{self as world, query, World};

/// Totals gathered from the events of an expedition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ExpeditionReport {
    rounds: u64,
    advances: u64,
    turns: u64,
    blocked_moves: u64,
    treasures_collected: u64,
}

impl ExpeditionReport {
    /// Number of rounds played.
    #[must_use]
    pub const fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Number of successful single-cell moves.
    #[must_use]
    pub const fn advances(&self) -> u64 {
        self.advances
    }

    /// Number of quarter turns.
    #[must_use]
    pub const fn turns(&self) -> u64 {
        self.turns
    }

    /// Number of advances rejected by the map edge, a mountain or an adventurer.
    #[must_use]
    pub const fn blocked_moves(&self) -> u64 {
        self.blocked_moves
    }

    /// Number of treasure units picked up.
    #[must_use]
    pub const fn treasures_collected(&self) -> u64 {
        self.treasures_collected
    }

    fn record(&mut self, event: &Event) {
        let counter = match event {
            Event::RoundStarted { .. } => &mut self.rounds,
            Event::AdventurerAdvanced { .. } => &mut self.advances,
            Event::AdventurerTurned { .. } => &mut self.turns,
            Event::AdventurerBlocked { .. } => &mut self.blocked_moves,
            Event::TreasureCollected { .. } => &mut self.treasures_collected,
            Event::InstructionsExhausted { .. } => return,
        };
        *counter = counter.saturating_add(1);
    }
}

/// Pure system that schedules one instruction per adventurer per round.
#[derive(Debug, Default)]
pub struct Expedition {
    report: ExpeditionReport,
}

impl Expedition {
    /// Creates a new expedition system with an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the totals observed so far.
    #[must_use]
    pub fn report(&self) -> ExpeditionReport {
        self.report
    }

    /// Consumes world events and the adventurer view to emit the next round.
    ///
    /// Emits nothing once every queue is empty.
    pub fn handle(&mut self, events: &[Event], adventurers: &AdventurerView, out: &mut Vec<Command>) {
        for event in events {
            self.report.record(event);
        }

        if !adventurers.has_pending_instructions() {
            return;
        }

        out.push(Command::StartRound);
        out.extend(
            adventurers
                .iter()
                .filter(|adventurer| adventurer.pending_instructions > 0)
                .map(|adventurer| Command::ExecuteInstruction {
                    adventurer: adventurer.id,
                }),
        );
    }
}

/// Plays rounds until every adventurer has exhausted its instructions.
pub fn run_to_completion(world: &mut World) -> ExpeditionReport {
    run_to_completion_with(world, |_| {})
}

/// Plays rounds until quiescent, handing every world event to `observe`.
pub fn run_to_completion_with<F>(world: &mut World, mut observe: F) -> ExpeditionReport
where
    F: FnMut(&Event),
{
    let mut expedition = Expedition::new();
    let mut events = Vec::new();

    loop {
        let view = query::adventurer_view(world);
        let mut commands = Vec::new();
        expedition.handle(&events, &view, &mut commands);
        if commands.is_empty() {
            break;
        }

        events.clear();
        for command in commands {
            world::apply(world, command, &mut events);
        }
        for event in &events {
            log::trace!("{event:?}");
            observe(event);
        }
    }

    let report = expedition.report();
    log::debug!(
        "expedition finished after {} rounds: {} advances, {} blocked, {} treasures collected",
        report.rounds(),
        report.advances(),
        report.blocked_moves(),
        report.treasures_collected()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use treasure_hunt_core::{AdventurerId, Obstruction, Orientation, Position};

    #[test]
    fn report_counts_each_event_kind() {
        let adventurer = AdventurerId::new(0);
        let mut report = ExpeditionReport::default();
        for event in [
            Event::RoundStarted { round: 1 },
            Event::AdventurerTurned {
                adventurer,
                from: Orientation::North,
                to: Orientation::East,
            },
            Event::AdventurerAdvanced {
                adventurer,
                from: Position::new(0, 0),
                to: Position::new(1, 0),
            },
            Event::TreasureCollected {
                adventurer,
                position: Position::new(1, 0),
                remaining: 0,
            },
            Event::AdventurerBlocked {
                adventurer,
                at: Position::new(1, 0),
                toward: Orientation::East,
                reason: Obstruction::Mountain,
            },
            Event::InstructionsExhausted { adventurer },
        ] {
            report.record(&event);
        }

        assert_eq!(report.rounds(), 1);
        assert_eq!(report.turns(), 1);
        assert_eq!(report.advances(), 1);
        assert_eq!(report.treasures_collected(), 1);
        assert_eq!(report.blocked_moves(), 1);
    }
}
