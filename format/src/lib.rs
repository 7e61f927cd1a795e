#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text codec for Treasure Hunt maps.
//!
//! The format is line based, with fields separated by hyphens:
//!
//! ```text
//! C - <width> - <height>
//! M - <x> - <y>
//! T - <x> - <y> - <count>
//! A - <name> - <x> - <y> - <N|E|S|W> - <instructions over A, G, D>
//! ```
//!
//! [`parse`] validates a description and builds a [`World`]; [`serialize`]
//! renders a world back into the same grammar, replacing each adventurer's
//! instruction string with the number of treasures it collected.

mod error;
mod parse;
mod serialize;

pub use error::{EntityKind, MapInitError};
pub use parse::parse;
pub use serialize::serialize;

use treasure_hunt_world::World;

/// Builds a world from a complete map description.
pub fn parse_str(text: &str) -> Result<World, MapInitError> {
    parse(text.lines())
}
