#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Treasure Hunt engine.
//!
//! This crate defines the value types and the message surface that connect
//! the authoritative world, the map codec, and the pure expedition system.
//! Systems submit [`Command`] values describing desired mutations, the world
//! executes those commands via its `apply` entry point, and then reports the
//! outcome as [`Event`] values. Systems observe events and immutable
//! [`AdventurerView`] snapshots and respond exclusively with new commands.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Location of a single grid cell expressed as horizontal and vertical coordinates.
///
/// Positions carry no intrinsic bounds; validity is decided against a [`Dimension`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: u32,
    y: u32,
}

impl Position {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based horizontal coordinate of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based vertical coordinate of the cell, growing southward.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Returns the neighbouring cell one step toward `orientation`.
    ///
    /// Yields `None` when the step would cross below zero on either axis.
    /// Stepping past the far edge of a grid still yields a position; callers
    /// check it against the grid's [`Dimension`].
    #[must_use]
    pub fn step(self, orientation: Orientation) -> Option<Self> {
        let (dx, dy) = orientation.displacement();
        Some(Self::new(
            self.x.checked_add_signed(dx)?,
            self.y.checked_add_signed(dy)?,
        ))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Extent of the map measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    width: u32,
    height: u32,
}

impl Dimension {
    /// Creates a new dimension descriptor.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of cells along the horizontal axis.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of cells along the vertical axis.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the position lies inside the grid.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x() < self.width && position.y() < self.height
    }
}

/// Cardinal direction an adventurer faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Facing toward decreasing vertical coordinates.
    North,
    /// Facing toward increasing horizontal coordinates.
    East,
    /// Facing toward increasing vertical coordinates.
    South,
    /// Facing toward decreasing horizontal coordinates.
    West,
}

impl Orientation {
    /// Unit displacement applied when advancing while facing this way.
    #[must_use]
    pub const fn displacement(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Orientation reached after a quarter turn clockwise.
    #[must_use]
    pub const fn turned_right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Orientation reached after a quarter turn counter-clockwise.
    #[must_use]
    pub const fn turned_left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// Single letter used by the map format.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    /// Resolves a map format letter. Matching is case-sensitive.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'N' => Some(Self::North),
            'E' => Some(Self::East),
            'S' => Some(Self::South),
            'W' => Some(Self::West),
            _ => None,
        }
    }
}

/// Single step of an adventurer's route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    /// Move one cell forward (`A`).
    Advance,
    /// Quarter turn counter-clockwise (`G`).
    TurnLeft,
    /// Quarter turn clockwise (`D`).
    TurnRight,
}

impl Instruction {
    /// Resolves a map format instruction code.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'A' => Some(Self::Advance),
            'G' => Some(Self::TurnLeft),
            'D' => Some(Self::TurnRight),
            _ => None,
        }
    }

    /// Code used by the map format.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Advance => 'A',
            Self::TurnLeft => 'G',
            Self::TurnRight => 'D',
        }
    }
}

/// Unique identifier assigned to an adventurer.
///
/// Identifiers follow declaration order, so sorting by id yields turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AdventurerId(u32);

impl AdventurerId {
    /// Creates a new adventurer identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Commands that express all permissible world mutations during an expedition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Opens a new round of instruction execution.
    StartRound,
    /// Dequeues and applies the next pending instruction of an adventurer.
    ExecuteInstruction {
        /// Adventurer whose queue is consumed.
        adventurer: AdventurerId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Announces that a new round began.
    RoundStarted {
        /// One-based index of the round.
        round: u64,
    },
    /// Confirms that an adventurer rotated in place.
    AdventurerTurned {
        /// Adventurer that turned.
        adventurer: AdventurerId,
        /// Orientation before the turn.
        from: Orientation,
        /// Orientation after the turn.
        to: Orientation,
    },
    /// Confirms that an adventurer moved between two cells.
    AdventurerAdvanced {
        /// Adventurer that advanced.
        adventurer: AdventurerId,
        /// Cell occupied before moving.
        from: Position,
        /// Cell occupied after moving.
        to: Position,
    },
    /// Reports that an advance was rejected and the adventurer stayed put.
    AdventurerBlocked {
        /// Adventurer whose move was rejected.
        adventurer: AdventurerId,
        /// Cell the adventurer still occupies.
        at: Position,
        /// Direction of the rejected move.
        toward: Orientation,
        /// What prevented the move.
        reason: Obstruction,
    },
    /// Confirms that an adventurer picked up one treasure unit.
    TreasureCollected {
        /// Adventurer that collected the treasure.
        adventurer: AdventurerId,
        /// Cell holding the treasure stack.
        position: Position,
        /// Units left in the stack after collection.
        remaining: u32,
    },
    /// Reports that an adventurer executed its final instruction.
    InstructionsExhausted {
        /// Adventurer with an empty queue.
        adventurer: AdventurerId,
    },
}

/// Reasons an advance may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Obstruction {
    /// The destination lies outside the map.
    OutOfBounds,
    /// A mountain occupies the destination.
    Mountain,
    /// Another adventurer currently stands on the destination.
    Adventurer(AdventurerId),
}

/// Immutable representation of a single adventurer's state used for queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdventurerSnapshot {
    /// Identifier assigned to the adventurer.
    pub id: AdventurerId,
    /// Cell currently occupied.
    pub position: Position,
    /// Direction currently faced.
    pub orientation: Orientation,
    /// Number of instructions still queued.
    pub pending_instructions: usize,
    /// Treasure units collected so far.
    pub treasures: u32,
}

/// Read-only snapshot describing all adventurers in turn order.
#[derive(Clone, Debug, Default)]
pub struct AdventurerView {
    snapshots: Vec<AdventurerSnapshot>,
}

impl AdventurerView {
    /// Creates a new adventurer view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<AdventurerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in turn order.
    pub fn iter(&self) -> impl Iterator<Item = &AdventurerSnapshot> {
        self.snapshots.iter()
    }

    /// Reports whether any adventurer still has queued instructions.
    #[must_use]
    pub fn has_pending_instructions(&self) -> bool {
        self.snapshots
            .iter()
            .any(|snapshot| snapshot.pending_instructions > 0)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<AdventurerSnapshot> {
        self.snapshots
    }
}
