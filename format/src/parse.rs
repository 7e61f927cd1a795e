use std::collections::HashSet;

use treasure_hunt_core::{Dimension, Instruction, Orientation, Position};
use treasure_hunt_world::{AdventurerSeed, TreasureStacks, World};

use crate::{EntityKind, MapInitError};

const COMMENT_MARKER: char = '#';
const FIELD_DELIMITER: char = '-';

const MAP_TAG: &str = "C";
const MOUNTAIN_TAG: &str = "M";
const TREASURE_TAG: &str = "T";
const ADVENTURER_TAG: &str = "A";

const MAP_FIELDS: usize = 3;
const MOUNTAIN_FIELDS: usize = 3;
const TREASURE_FIELDS: usize = 4;
const ADVENTURER_FIELDS: usize = 6;

/// Builds a world from the lines of a map description.
///
/// Blank lines and lines starting with `#` are ignored. The first remaining
/// line declares the map; mountain, treasure and adventurer lines may follow
/// in any order, and adventurers take turns in the order they are declared.
/// Lines with any other tag are skipped.
///
/// Validation is fail-fast: mountains are checked first, then adventurers,
/// then the overlap rule between them, and treasures last.
pub fn parse<I>(lines: I) -> Result<World, MapInitError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let lines: Vec<I::Item> = lines.into_iter().collect();
    let mut records = lines
        .iter()
        .enumerate()
        .map(|(index, text)| Record {
            line: index + 1,
            text: text.as_ref(),
        })
        .filter(|record| !record.is_ignored());

    let header = records.next().ok_or(MapInitError::EmptyInput)?;
    let dimension = parse_dimension(&header)?;

    let mut mountain_records = Vec::new();
    let mut treasure_records = Vec::new();
    let mut adventurer_records = Vec::new();
    for record in records {
        match record.tag() {
            MOUNTAIN_TAG => mountain_records.push(record),
            TREASURE_TAG => treasure_records.push(record),
            ADVENTURER_TAG => adventurer_records.push(record),
            MAP_TAG => {
                return Err(MapInitError::DuplicateDimension { line: record.line });
            }
            tag => log::warn!("line {}: skipping entry with unknown tag `{tag}`", record.line),
        }
    }

    let mountains = mountain_records
        .iter()
        .map(|record| parse_mountain(record, dimension))
        .collect::<Result<Vec<_>, _>>()?;
    let adventurers = adventurer_records
        .iter()
        .map(|record| parse_adventurer(record, dimension))
        .collect::<Result<Vec<_>, _>>()?;
    verify_no_overlap(&mountains, &adventurers)?;

    let mut treasures = TreasureStacks::new();
    for record in &treasure_records {
        let (position, count) = parse_treasure(record, dimension)?;
        treasures.deposit(position, count);
    }

    log::debug!(
        "parsed {}x{} map with {} mountains, {} treasure units and {} adventurers",
        dimension.width(),
        dimension.height(),
        mountains.len(),
        treasures.total(),
        adventurers.len()
    );

    Ok(World::new(dimension, mountains, treasures, adventurers))
}

/// Single non-blank, non-comment input line.
#[derive(Clone, Copy, Debug)]
struct Record<'a> {
    line: usize,
    text: &'a str,
}

impl<'a> Record<'a> {
    fn is_ignored(&self) -> bool {
        let trimmed = self.text.trim_start();
        trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER)
    }

    fn tag(&self) -> &'a str {
        self.text
            .split(FIELD_DELIMITER)
            .next()
            .map_or("", str::trim)
    }

    /// Splits the line into trimmed fields, enforcing the entity's field count.
    fn fields(&self, entity: EntityKind, expected: usize) -> Result<Vec<&'a str>, MapInitError> {
        if contains_negative_number(self.text) {
            return Err(MapInitError::NegativeNumber {
                line: self.line,
                text: self.text.to_owned(),
            });
        }

        let fields: Vec<&str> = self.text.split(FIELD_DELIMITER).map(str::trim).collect();
        let found = fields.len();
        if found > expected {
            return Err(MapInitError::TooManyFields {
                line: self.line,
                entity,
                expected,
                found,
            });
        }
        if found < expected {
            return Err(MapInitError::NotEnoughFields {
                line: self.line,
                entity,
                expected,
                found,
            });
        }

        Ok(fields)
    }

    fn number(&self, entity: EntityKind, field: &'static str, value: &str) -> Result<u32, MapInitError> {
        value.parse().map_err(|_| MapInitError::InvalidNumber {
            line: self.line,
            entity,
            field,
            value: value.to_owned(),
        })
    }

    fn position(
        &self,
        entity: EntityKind,
        x: &str,
        y: &str,
        dimension: Dimension,
    ) -> Result<Position, MapInitError> {
        let position = Position::new(self.number(entity, "x", x)?, self.number(entity, "y", y)?);
        if !dimension.contains(position) {
            return Err(MapInitError::OutOfBounds {
                line: self.line,
                entity,
                position,
            });
        }
        Ok(position)
    }
}

fn parse_dimension(record: &Record<'_>) -> Result<Dimension, MapInitError> {
    let fields = record.fields(EntityKind::Map, MAP_FIELDS)?;
    if fields[0] != MAP_TAG {
        return Err(MapInitError::MissingDimension {
            line: record.line,
            found: fields[0].to_owned(),
        });
    }

    let width = record.number(EntityKind::Map, "width", fields[1])?;
    let height = record.number(EntityKind::Map, "height", fields[2])?;
    if width == 0 || height == 0 {
        return Err(MapInitError::EmptyDimension {
            line: record.line,
            width,
            height,
        });
    }

    Ok(Dimension::new(width, height))
}

fn parse_mountain(record: &Record<'_>, dimension: Dimension) -> Result<Position, MapInitError> {
    let fields = record.fields(EntityKind::Mountain, MOUNTAIN_FIELDS)?;
    record.position(EntityKind::Mountain, fields[1], fields[2], dimension)
}

fn parse_treasure(
    record: &Record<'_>,
    dimension: Dimension,
) -> Result<(Position, u32), MapInitError> {
    let fields = record.fields(EntityKind::Treasure, TREASURE_FIELDS)?;
    let position = record.position(EntityKind::Treasure, fields[1], fields[2], dimension)?;
    let count = record.number(EntityKind::Treasure, "count", fields[3])?;
    Ok((position, count))
}

fn parse_adventurer(
    record: &Record<'_>,
    dimension: Dimension,
) -> Result<AdventurerSeed, MapInitError> {
    let fields = record.fields(EntityKind::Adventurer, ADVENTURER_FIELDS)?;

    let name = fields[1];
    if name.is_empty() {
        return Err(MapInitError::EmptyName { line: record.line });
    }

    let position = record.position(EntityKind::Adventurer, fields[2], fields[3], dimension)?;

    let instructions = fields[5]
        .chars()
        .map(|code| {
            Instruction::from_code(code).ok_or(MapInitError::InvalidInstruction {
                line: record.line,
                instruction: code,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let orientation = parse_orientation(fields[4]).ok_or_else(|| MapInitError::InvalidOrientation {
        line: record.line,
        value: fields[4].to_owned(),
    })?;

    Ok(AdventurerSeed {
        name: name.to_owned(),
        position,
        orientation,
        instructions,
    })
}

fn parse_orientation(field: &str) -> Option<Orientation> {
    let mut letters = field.chars();
    match (letters.next(), letters.next()) {
        (Some(letter), None) => Orientation::from_letter(letter),
        _ => None,
    }
}

fn verify_no_overlap(
    mountains: &[Position],
    adventurers: &[AdventurerSeed],
) -> Result<(), MapInitError> {
    let mut occupied = HashSet::new();
    let solids = mountains
        .iter()
        .copied()
        .chain(adventurers.iter().map(|seed| seed.position));
    for position in solids {
        if !occupied.insert(position) {
            return Err(MapInitError::Overlap { position });
        }
    }
    Ok(())
}

/// Reports whether the text holds a delimiter directly followed by a non-zero digit.
fn contains_negative_number(text: &str) -> bool {
    text.as_bytes()
        .windows(2)
        .any(|pair| pair[0] == FIELD_DELIMITER as u8 && matches!(pair[1], b'1'..=b'9'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_literals_are_detected() {
        assert!(contains_negative_number("T - -5 - 4"));
        assert!(contains_negative_number("M --1 - 2"));
        assert!(!contains_negative_number("C - 5 - 4"));
        assert!(!contains_negative_number("T - 1 - 0 - 0"));
    }

    #[test]
    fn orientation_requires_a_single_letter() {
        assert_eq!(parse_orientation("S"), Some(Orientation::South));
        assert_eq!(parse_orientation("South"), None);
        assert_eq!(parse_orientation(""), None);
        assert_eq!(parse_orientation("s"), None);
    }

    #[test]
    fn tag_ignores_surrounding_whitespace() {
        let record = Record {
            line: 1,
            text: "  M - 1 - 0",
        };
        assert_eq!(record.tag(), "M");
        assert!(!record.is_ignored());
    }

    #[test]
    fn indented_comments_are_ignored() {
        let record = Record {
            line: 1,
            text: "   # {M comme Montagne}",
        };
        assert!(record.is_ignored());
    }
}
