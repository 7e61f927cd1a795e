#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Treasure Hunt.

mod treasures;

use std::collections::VecDeque;

use treasure_hunt_core::{
    AdventurerId, AdventurerSnapshot, Command, Dimension, Event, Instruction, Obstruction,
    Orientation, Position,
};

pub use treasures::{TreasureStack, TreasureStacks};

/// Validated description of an adventurer before it joins the world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdventurerSeed {
    /// Display name of the adventurer.
    pub name: String,
    /// Starting cell.
    pub position: Position,
    /// Starting orientation.
    pub orientation: Orientation,
    /// Route executed one step per round, front first.
    pub instructions: Vec<Instruction>,
}

/// Adventurer owned by the world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Adventurer {
    id: AdventurerId,
    name: String,
    position: Position,
    orientation: Orientation,
    instructions: VecDeque<Instruction>,
    treasures: u32,
}

impl Adventurer {
    fn from_seed(id: AdventurerId, seed: AdventurerSeed) -> Self {
        Self {
            id,
            name: seed.name,
            position: seed.position,
            orientation: seed.orientation,
            instructions: seed.instructions.into(),
            treasures: 0,
        }
    }

    /// Identifier assigned in declaration order.
    #[must_use]
    pub const fn id(&self) -> AdventurerId {
        self.id
    }

    /// Display name of the adventurer.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell currently occupied.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Direction currently faced.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Treasure units collected so far.
    #[must_use]
    pub const fn treasures(&self) -> u32 {
        self.treasures
    }

    /// Instructions still queued, next one first.
    pub fn instructions(&self) -> impl Iterator<Item = Instruction> + '_ {
        self.instructions.iter().copied()
    }

    /// Number of instructions still queued.
    #[must_use]
    pub fn pending_instructions(&self) -> usize {
        self.instructions.len()
    }

    fn snapshot(&self) -> AdventurerSnapshot {
        AdventurerSnapshot {
            id: self.id,
            position: self.position,
            orientation: self.orientation,
            pending_instructions: self.instructions.len(),
            treasures: self.treasures,
        }
    }
}

/// Represents the authoritative Treasure Hunt world state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct World {
    dimension: Dimension,
    mountains: Vec<Position>,
    treasures: TreasureStacks,
    adventurers: Vec<Adventurer>,
    round: u64,
}

impl World {
    /// Assembles a world from already validated parts.
    ///
    /// Adventurers receive identifiers in the order they are provided, which
    /// fixes their turn order for the rest of the expedition.
    #[must_use]
    pub fn new(
        dimension: Dimension,
        mountains: Vec<Position>,
        treasures: TreasureStacks,
        adventurers: Vec<AdventurerSeed>,
    ) -> Self {
        let adventurers = adventurers
            .into_iter()
            .enumerate()
            .map(|(index, seed)| Adventurer::from_seed(AdventurerId::new(index as u32), seed))
            .collect();

        Self {
            dimension,
            mountains,
            treasures,
            adventurers,
            round: 0,
        }
    }

    fn adventurer_index(&self, id: AdventurerId) -> Option<usize> {
        self.adventurers
            .iter()
            .position(|adventurer| adventurer.id == id)
    }

    fn execute_instruction(&mut self, id: AdventurerId, out_events: &mut Vec<Event>) {
        let Some(index) = self.adventurer_index(id) else {
            return;
        };
        let Some(instruction) = self.adventurers[index].instructions.pop_front() else {
            return;
        };

        match instruction {
            Instruction::TurnLeft | Instruction::TurnRight => {
                let adventurer = &mut self.adventurers[index];
                let from = adventurer.orientation;
                let to = if instruction == Instruction::TurnLeft {
                    from.turned_left()
                } else {
                    from.turned_right()
                };
                adventurer.orientation = to;
                out_events.push(Event::AdventurerTurned {
                    adventurer: id,
                    from,
                    to,
                });
            }
            Instruction::Advance => self.advance(index, out_events),
        }

        if self.adventurers[index].instructions.is_empty() {
            out_events.push(Event::InstructionsExhausted { adventurer: id });
        }
    }

    fn advance(&mut self, index: usize, out_events: &mut Vec<Event>) {
        let (id, from, toward) = {
            let adventurer = &self.adventurers[index];
            (adventurer.id, adventurer.position, adventurer.orientation)
        };

        let to = match self.destination(index, from, toward) {
            Ok(to) => to,
            Err(reason) => {
                out_events.push(Event::AdventurerBlocked {
                    adventurer: id,
                    at: from,
                    toward,
                    reason,
                });
                return;
            }
        };

        self.adventurers[index].position = to;
        out_events.push(Event::AdventurerAdvanced {
            adventurer: id,
            from,
            to,
        });

        if let Some(remaining) = self.treasures.take_one(to) {
            let adventurer = &mut self.adventurers[index];
            adventurer.treasures = adventurer.treasures.saturating_add(1);
            out_events.push(Event::TreasureCollected {
                adventurer: id,
                position: to,
                remaining,
            });
        }
    }

    /// Resolves the cell one step ahead, checked against the live positions
    /// of every other adventurer.
    fn destination(
        &self,
        index: usize,
        from: Position,
        toward: Orientation,
    ) -> Result<Position, Obstruction> {
        let to = from
            .step(toward)
            .filter(|cell| self.dimension.contains(*cell))
            .ok_or(Obstruction::OutOfBounds)?;

        if self.mountains.contains(&to) {
            return Err(Obstruction::Mountain);
        }

        let occupant = self
            .adventurers
            .iter()
            .enumerate()
            .find(|(other, adventurer)| *other != index && adventurer.position == to);
        if let Some((_, adventurer)) = occupant {
            return Err(Obstruction::Adventurer(adventurer.id));
        }

        Ok(to)
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartRound => {
            world.round = world.round.saturating_add(1);
            out_events.push(Event::RoundStarted { round: world.round });
        }
        Command::ExecuteInstruction { adventurer } => {
            world.execute_instruction(adventurer, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use treasure_hunt_core::{AdventurerView, Dimension, Position};

    use super::{Adventurer, TreasureStacks, World};

    /// Provides the extent of the map.
    #[must_use]
    pub fn dimension(world: &World) -> Dimension {
        world.dimension
    }

    /// Provides the mountains in declaration order.
    #[must_use]
    pub fn mountains(world: &World) -> &[Position] {
        &world.mountains
    }

    /// Provides the remaining treasure stacks.
    #[must_use]
    pub fn treasures(world: &World) -> &TreasureStacks {
        &world.treasures
    }

    /// Provides the adventurers in turn order.
    #[must_use]
    pub fn adventurers(world: &World) -> &[Adventurer] {
        &world.adventurers
    }

    /// Captures a read-only view of the adventurers for systems.
    #[must_use]
    pub fn adventurer_view(world: &World) -> AdventurerView {
        AdventurerView::from_snapshots(
            world
                .adventurers
                .iter()
                .map(Adventurer::snapshot)
                .collect(),
        )
    }

    /// Number of rounds started so far.
    #[must_use]
    pub fn round(world: &World) -> u64 {
        world.round
    }

    /// Reports whether every instruction queue is empty.
    #[must_use]
    pub fn is_quiescent(world: &World) -> bool {
        world
            .adventurers
            .iter()
            .all(|adventurer| adventurer.instructions.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(name: &str, x: u32, y: u32, orientation: Orientation, route: &str) -> AdventurerSeed {
        AdventurerSeed {
            name: name.to_owned(),
            position: Position::new(x, y),
            orientation,
            instructions: route
                .chars()
                .map(|code| Instruction::from_code(code).expect("valid route"))
                .collect(),
        }
    }

    fn world_with(adventurers: Vec<AdventurerSeed>) -> World {
        let mut treasures = TreasureStacks::new();
        treasures.deposit(Position::new(2, 2), 2);
        World::new(
            Dimension::new(5, 4),
            vec![Position::new(1, 1)],
            treasures,
            adventurers,
        )
    }

    fn execute(world: &mut World, id: u32) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::ExecuteInstruction {
                adventurer: AdventurerId::new(id),
            },
            &mut events,
        );
        events
    }

    #[test]
    fn start_round_increments_counter() {
        let mut world = world_with(Vec::new());
        let mut events = Vec::new();

        apply(&mut world, Command::StartRound, &mut events);
        apply(&mut world, Command::StartRound, &mut events);

        assert_eq!(query::round(&world), 2);
        assert_eq!(
            events,
            vec![
                Event::RoundStarted { round: 1 },
                Event::RoundStarted { round: 2 }
            ]
        );
    }

    #[test]
    fn turns_rotate_without_moving() {
        let mut world = world_with(vec![seed("Lara", 3, 3, Orientation::East, "GD")]);

        let events = execute(&mut world, 0);
        assert_eq!(
            events,
            vec![Event::AdventurerTurned {
                adventurer: AdventurerId::new(0),
                from: Orientation::East,
                to: Orientation::North,
            }]
        );

        let events = execute(&mut world, 0);
        assert_eq!(events.len(), 2);
        let adventurer = &query::adventurers(&world)[0];
        assert_eq!(adventurer.orientation(), Orientation::East);
        assert_eq!(adventurer.position(), Position::new(3, 3));
    }

    #[test]
    fn advance_moves_one_cell_forward() {
        let mut world = world_with(vec![seed("Lara", 3, 3, Orientation::North, "AA")]);

        let events = execute(&mut world, 0);

        assert_eq!(
            events,
            vec![Event::AdventurerAdvanced {
                adventurer: AdventurerId::new(0),
                from: Position::new(3, 3),
                to: Position::new(3, 2),
            }]
        );
        assert_eq!(query::adventurers(&world)[0].pending_instructions(), 1);
    }

    #[test]
    fn advance_past_low_edge_is_blocked() {
        let mut world = world_with(vec![seed("Lara", 0, 0, Orientation::West, "A")]);

        let events = execute(&mut world, 0);

        assert_eq!(
            events[0],
            Event::AdventurerBlocked {
                adventurer: AdventurerId::new(0),
                at: Position::new(0, 0),
                toward: Orientation::West,
                reason: Obstruction::OutOfBounds,
            }
        );
        let adventurer = &query::adventurers(&world)[0];
        assert_eq!(adventurer.position(), Position::new(0, 0));
        assert_eq!(adventurer.orientation(), Orientation::West);
    }

    #[test]
    fn advance_onto_far_edge_is_blocked() {
        let mut world = world_with(vec![seed("Lara", 4, 3, Orientation::East, "DA")]);

        let _ = execute(&mut world, 0);
        let events = execute(&mut world, 0);

        assert!(matches!(
            events[0],
            Event::AdventurerBlocked {
                reason: Obstruction::OutOfBounds,
                ..
            }
        ));
        assert_eq!(query::adventurers(&world)[0].position(), Position::new(4, 3));
    }

    #[test]
    fn mountains_block_advance() {
        let mut world = world_with(vec![seed("Lara", 1, 2, Orientation::North, "A")]);

        let events = execute(&mut world, 0);

        assert!(matches!(
            events[0],
            Event::AdventurerBlocked {
                reason: Obstruction::Mountain,
                ..
            }
        ));
        assert_eq!(query::adventurers(&world)[0].position(), Position::new(1, 2));
    }

    #[test]
    fn adventurers_block_each_other() {
        let mut world = world_with(vec![
            seed("Lara", 3, 3, Orientation::North, "A"),
            seed("Indiana", 3, 2, Orientation::South, "A"),
        ]);

        let events = execute(&mut world, 0);
        assert!(matches!(
            events[0],
            Event::AdventurerBlocked {
                reason: Obstruction::Adventurer(other),
                ..
            } if other == AdventurerId::new(1)
        ));

        let events = execute(&mut world, 1);
        assert!(matches!(
            events[0],
            Event::AdventurerBlocked {
                reason: Obstruction::Adventurer(other),
                ..
            } if other == AdventurerId::new(0)
        ));
    }

    #[test]
    fn each_arrival_collects_one_treasure_unit() {
        let mut world = world_with(vec![seed("Lara", 2, 3, Orientation::North, "ADDADDA")]);

        let events = execute(&mut world, 0);
        assert_eq!(
            events[1],
            Event::TreasureCollected {
                adventurer: AdventurerId::new(0),
                position: Position::new(2, 2),
                remaining: 1,
            }
        );
        assert_eq!(query::treasures(&world).count_at(Position::new(2, 2)), 1);

        for _ in 0..6 {
            let _ = execute(&mut world, 0);
        }

        let adventurer = &query::adventurers(&world)[0];
        assert_eq!(adventurer.treasures(), 2);
        assert_eq!(adventurer.position(), Position::new(2, 2));
        assert!(query::treasures(&world).is_empty());
    }

    #[test]
    fn final_instruction_reports_exhaustion() {
        let mut world = world_with(vec![seed("Lara", 3, 3, Orientation::North, "D")]);

        let events = execute(&mut world, 0);

        assert_eq!(
            events.last(),
            Some(&Event::InstructionsExhausted {
                adventurer: AdventurerId::new(0)
            })
        );
        assert!(query::is_quiescent(&world));
        assert!(execute(&mut world, 0).is_empty());
    }

    #[test]
    fn unknown_adventurer_is_ignored() {
        let mut world = world_with(vec![seed("Lara", 3, 3, Orientation::North, "A")]);
        let before = world.clone();

        assert!(execute(&mut world, 7).is_empty());
        assert_eq!(world, before);
    }
}
