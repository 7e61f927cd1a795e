//! Treasure stacks keyed by position.

use treasure_hunt_core::Position;

/// Collectible units piled on a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TreasureStack {
    position: Position,
    count: u32,
}

impl TreasureStack {
    /// Cell holding the stack.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Units remaining in the stack.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }
}

/// Treasure multiset stored as one stack per position.
///
/// Stacks keep the order in which their position was first deposited and
/// disappear once their last unit is taken.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreasureStacks {
    stacks: Vec<TreasureStack>,
}

impl TreasureStacks {
    /// Creates an empty treasure registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` units at `position`, merging with an existing stack.
    ///
    /// Depositing zero units is a no-op.
    pub fn deposit(&mut self, position: Position, count: u32) {
        if count == 0 {
            return;
        }

        match self.stack_mut(position) {
            Some(stack) => stack.count = stack.count.saturating_add(count),
            None => self.stacks.push(TreasureStack { position, count }),
        }
    }

    /// Units available at the provided position.
    #[must_use]
    pub fn count_at(&self, position: Position) -> u32 {
        self.stacks
            .iter()
            .find(|stack| stack.position == position)
            .map_or(0, TreasureStack::count)
    }

    /// Total number of units across every stack.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.stacks.iter().map(|stack| u64::from(stack.count)).sum()
    }

    /// Reports whether no treasure remains on the map.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Iterator over the stacks in first-deposit order.
    pub fn iter(&self) -> impl Iterator<Item = &TreasureStack> {
        self.stacks.iter()
    }

    /// Removes one unit at `position`, returning how many remain there.
    pub(crate) fn take_one(&mut self, position: Position) -> Option<u32> {
        let index = self
            .stacks
            .iter()
            .position(|stack| stack.position == position)?;
        let stack = &mut self.stacks[index];
        stack.count -= 1;
        let remaining = stack.count;
        if remaining == 0 {
            let _ = self.stacks.remove(index);
        }
        Some(remaining)
    }

    fn stack_mut(&mut self, position: Position) -> Option<&mut TreasureStack> {
        self.stacks
            .iter_mut()
            .find(|stack| stack.position == position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposits_merge_per_position() {
        let mut treasures = TreasureStacks::new();
        treasures.deposit(Position::new(2, 2), 2);
        treasures.deposit(Position::new(1, 1), 1);
        treasures.deposit(Position::new(2, 2), 3);

        let stacks: Vec<(Position, u32)> = treasures
            .iter()
            .map(|stack| (stack.position(), stack.count()))
            .collect();
        assert_eq!(
            stacks,
            vec![(Position::new(2, 2), 5), (Position::new(1, 1), 1)]
        );
        assert_eq!(treasures.total(), 6);
    }

    #[test]
    fn zero_deposit_creates_no_stack() {
        let mut treasures = TreasureStacks::new();
        treasures.deposit(Position::new(1, 3), 0);
        assert!(treasures.is_empty());
        assert_eq!(treasures.count_at(Position::new(1, 3)), 0);
    }

    #[test]
    fn taking_last_unit_removes_stack() {
        let mut treasures = TreasureStacks::new();
        treasures.deposit(Position::new(0, 3), 2);

        assert_eq!(treasures.take_one(Position::new(0, 3)), Some(1));
        assert_eq!(treasures.take_one(Position::new(0, 3)), Some(0));
        assert_eq!(treasures.take_one(Position::new(0, 3)), None);
        assert!(treasures.is_empty());
    }
}
