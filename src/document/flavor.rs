//! # Room Flavor Text
//!
//! Fixed name and description templates. Selection depends only on a cell's
//! kind, exit count and coordinates, never on the RNG, so re-serializing a
//! grid always yields the same text.

use crate::{Cell, CellKind, City, PoiKind, Position};

type Template = (&'static str, &'static str);

const DEAD_END: &[Template] = &[
    (
        "Blind Alcove",
        "The passage ends in a cramped alcove. Old scratches mark the stone where others turned back.",
    ),
    (
        "Collapsed Passage",
        "Fallen masonry seals the way forward. The only way out is back the way you came.",
    ),
    (
        "Silent Nook",
        "A narrow nook swallows every sound. Dust lies undisturbed on the floor.",
    ),
];

const CORRIDOR: &[Template] = &[
    (
        "Winding Corridor",
        "The corridor bends out of sight in both directions, its walls slick with damp.",
    ),
    (
        "Narrow Passage",
        "The walls press close here. You have to turn sideways in places to squeeze through.",
    ),
    (
        "Echoing Hall",
        "Footsteps echo far longer than they should along this stretch of hall.",
    ),
    (
        "Mossy Tunnel",
        "Pale moss carpets the floor and glows faintly in the dark.",
    ),
];

const JUNCTION: &[Template] = &[
    (
        "Three-Way Junction",
        "Three passages meet beneath a low vaulted ceiling.",
    ),
    (
        "Forked Path",
        "The way splits. A faded arrow scratched into the wall points nowhere useful.",
    ),
    (
        "Worn Junction",
        "Countless travellers have worn a shallow groove where these passages join.",
    ),
];

const CROSSING: &[Template] = &[
    (
        "Labyrinth Crossroads",
        "Four passages meet at a wide crossing. A cracked pillar stands at its center.",
    ),
    (
        "Grand Intersection",
        "A broad chamber opens onto passages in every direction.",
    ),
    (
        "Cairn Crossing",
        "Someone has stacked a small cairn of stones where the four ways cross.",
    ),
];

const TREASURE: &[Template] = &[
    (
        "Forgotten Vault",
        "An iron-banded chest sits half buried in rubble at the end of the passage.",
    ),
    (
        "Glittering Hollow",
        "Something glints among the bones piled in this hollow.",
    ),
    (
        "Smuggler's Cache",
        "A loose flagstone hides a cache left behind by someone in a hurry.",
    ),
];

const MERCHANT: &[Template] = &[
    (
        "Wandering Trader's Camp",
        "A trader has set up a small camp here, wares spread on a threadbare rug.",
    ),
    (
        "Lantern Stall",
        "A hooded merchant sits beneath a hanging lantern, ready to haggle.",
    ),
    (
        "Tinker's Corner",
        "Tools and trinkets hang from hooks driven into the walls. A tinker looks up hopefully.",
    ),
];

const LORE_NPC: &[Template] = &[
    (
        "Hermit's Refuge",
        "An old hermit tends a tiny fire and mutters about the labyrinth's makers.",
    ),
    (
        "Scribe's Niche",
        "A gaunt scribe copies the wall carvings into a crumbling ledger.",
    ),
    (
        "Shrine of Whispers",
        "A robed keeper kneels before a weathered shrine, eager to share old stories.",
    ),
];

const PORTAL: &[Template] = &[
    (
        "Shimmering Portal",
        "A shimmering rift hangs in the air, showing glimpses of a distant passage.",
    ),
    (
        "Runic Gateway",
        "Runes carved into an archway pulse with light. Beyond it the air twists toward somewhere far away.",
    ),
];

/// Name, description and feature list for one room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flavor {
    pub name: String,
    pub description: String,
    pub features: Vec<String>,
}

impl Flavor {
    fn from_template(template: Template, features: &[&str]) -> Self {
        Self {
            name: template.0.to_string(),
            description: template.1.to_string(),
            features: features.iter().map(|feature| feature.to_string()).collect(),
        }
    }
}

/// Rotation index from coordinates. Adjacent cells differ by one, so
/// neighbors never share a variant.
fn variant_index(pos: Position, len: usize) -> usize {
    (pos.x + pos.y).rem_euclid(len as i32) as usize
}

fn pick(templates: &'static [Template], pos: Position) -> Template {
    templates[variant_index(pos, templates.len())]
}

/// Templates for plain passages, chosen by exit count.
fn passage_templates(exits: usize) -> &'static [Template] {
    match exits {
        0 | 1 => DEAD_END,
        2 => CORRIDOR,
        3 => JUNCTION,
        _ => CROSSING,
    }
}

fn gate_flavor(city: City) -> Flavor {
    Flavor {
        name: format!("{} Gate", city.display_name()),
        description: format!(
            "A towering archway marks the road to {}. Torchlight spills in from the city, \
             and the labyrinth's passages stretch away into darkness.",
            city.display_name()
        ),
        features: vec!["city_gate".to_string()],
    }
}

/// Builds the flavor for a cell.
pub fn describe(cell: &Cell) -> Flavor {
    let pos = cell.position;
    match cell.kind {
        CellKind::Gate(city) => gate_flavor(city),
        CellKind::PointOfInterest(PoiKind::Treasure) => {
            Flavor::from_template(pick(TREASURE, pos), &["treasure_cache"])
        }
        CellKind::PointOfInterest(PoiKind::Merchant) => {
            Flavor::from_template(pick(MERCHANT, pos), &["merchant"])
        }
        CellKind::PointOfInterest(PoiKind::LoreNpc) => {
            Flavor::from_template(pick(LORE_NPC, pos), &["lore_keeper"])
        }
        CellKind::ShortcutEndpoint { .. } => Flavor::from_template(pick(PORTAL, pos), &["portal"]),
        CellKind::Passage => {
            Flavor::from_template(pick(passage_templates(cell.passage_count()), pos), &[])
        }
    }
}
