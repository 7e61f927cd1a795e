use treasure_hunt_world::{query, World};

const MAP_HEADER: &str = "# {C comme Carte} - {Nb. de case en largeur} - {Nb. de case en hauteur}";
const MOUNTAIN_HEADER: &str = "# {M comme Montagne} - {Axe horizontal} - {Axe vertical}";
const TREASURE_HEADER: &str =
    "# {T comme Trésor} - {Axe horizontal} - {Axe vertical} - {Nb. de trésors restants}";
const ADVENTURER_HEADER: &str = "# {A comme Aventurier} - {Nom de l’aventurier} - {Axe horizontal} - {Axe vertical} - {Orientation} - {Nb. trésors ramassés}";

/// Renders the world in the map format.
///
/// Sections appear in a fixed order (map, mountains, treasures, adventurers),
/// each preceded by a comment naming its columns. Empty sections are omitted
/// entirely and the output carries no trailing newline.
#[must_use]
pub fn serialize(world: &World) -> String {
    let dimension = query::dimension(world);
    let mut lines = vec![
        MAP_HEADER.to_owned(),
        format!("C - {} - {}", dimension.width(), dimension.height()),
    ];

    let mountains = query::mountains(world);
    if !mountains.is_empty() {
        lines.push(MOUNTAIN_HEADER.to_owned());
        lines.extend(
            mountains
                .iter()
                .map(|mountain| format!("M - {} - {}", mountain.x(), mountain.y())),
        );
    }

    let treasures = query::treasures(world);
    if !treasures.is_empty() {
        lines.push(TREASURE_HEADER.to_owned());
        lines.extend(treasures.iter().map(|stack| {
            let position = stack.position();
            format!("T - {} - {} - {}", position.x(), position.y(), stack.count())
        }));
    }

    let adventurers = query::adventurers(world);
    if !adventurers.is_empty() {
        lines.push(ADVENTURER_HEADER.to_owned());
        lines.extend(adventurers.iter().map(|adventurer| {
            let position = adventurer.position();
            format!(
                "A - {} - {} - {} - {} - {}",
                adventurer.name(),
                position.x(),
                position.y(),
                adventurer.orientation().letter(),
                adventurer.treasures()
            )
        }));
    }

    lines.join("\n")
}
