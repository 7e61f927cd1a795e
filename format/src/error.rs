use std::fmt;

use thiserror::Error;
use treasure_hunt_core::Position;

/// Kind of map entry named in error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The `C` line declaring the map dimension.
    Map,
    /// An `M` line.
    Mountain,
    /// A `T` line.
    Treasure,
    /// An `A` line.
    Adventurer,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Map => "map",
            Self::Mountain => "mountain",
            Self::Treasure => "treasure",
            Self::Adventurer => "adventurer",
        };
        f.write_str(label)
    }
}

/// Reasons a map description cannot initialise a world.
///
/// Line numbers are one-based and count every input line, including blank
/// and comment lines.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MapInitError {
    /// Nothing but blank or comment lines were provided.
    #[error("no map data was provided")]
    EmptyInput,
    /// The first data line does not declare the map.
    #[error("line {line}: first line must declare the map with `C`, found `{found}`")]
    MissingDimension {
        /// Offending line.
        line: usize,
        /// Tag found instead of `C`.
        found: String,
    },
    /// A second `C` line was found.
    #[error("line {line}: the map dimension is declared more than once")]
    DuplicateDimension {
        /// Offending line.
        line: usize,
    },
    /// The map declares a zero width or height.
    #[error("line {line}: map dimension must be positive, found {width} x {height}")]
    EmptyDimension {
        /// Offending line.
        line: usize,
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },
    /// A line carries more fields than its entity type allows.
    #[error("line {line}: too many arguments in a {entity} line: expected {expected}, found {found}")]
    TooManyFields {
        /// Offending line.
        line: usize,
        /// Entity type declared by the line.
        entity: EntityKind,
        /// Field count required by the entity type.
        expected: usize,
        /// Field count found.
        found: usize,
    },
    /// A line carries fewer fields than its entity type requires.
    #[error("line {line}: not enough arguments in a {entity} line: expected {expected}, found {found}")]
    NotEnoughFields {
        /// Offending line.
        line: usize,
        /// Entity type declared by the line.
        entity: EntityKind,
        /// Field count required by the entity type.
        expected: usize,
        /// Field count found.
        found: usize,
    },
    /// A line contains a negative number.
    #[error("line {line}: unauthorized negative number in `{text}`")]
    NegativeNumber {
        /// Offending line.
        line: usize,
        /// Raw text of the line.
        text: String,
    },
    /// A numeric field does not hold a non-negative integer.
    #[error("line {line}: {entity} {field} `{value}` is not a valid number")]
    InvalidNumber {
        /// Offending line.
        line: usize,
        /// Entity type declared by the line.
        entity: EntityKind,
        /// Name of the field.
        field: &'static str,
        /// Raw field text.
        value: String,
    },
    /// An adventurer line has an empty name.
    #[error("line {line}: adventurer name is empty")]
    EmptyName {
        /// Offending line.
        line: usize,
    },
    /// The orientation field is not one of `N`, `E`, `S`, `W`.
    #[error("line {line}: orientation `{value}` is invalid")]
    InvalidOrientation {
        /// Offending line.
        line: usize,
        /// Raw field text.
        value: String,
    },
    /// The instruction string contains something other than `A`, `G`, `D`.
    #[error("line {line}: {instruction} is not a valid instruction")]
    InvalidInstruction {
        /// Offending line.
        line: usize,
        /// First invalid character.
        instruction: char,
    },
    /// An entity lies outside the map.
    #[error("line {line}: {entity} at position {position} is out of map's bounds")]
    OutOfBounds {
        /// Offending line.
        line: usize,
        /// Entity type declared by the line.
        entity: EntityKind,
        /// Declared position.
        position: Position,
    },
    /// Two solid entities share a cell.
    #[error("entities are overlapping at position {position}")]
    Overlap {
        /// Contested cell.
        position: Position,
    },
}
