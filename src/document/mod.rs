//! # Document Module
//!
//! Converts a generated labyrinth into the room graph document consumed by
//! the world loader, and reads such documents back.
//!
//! Rooms are keyed by `labyrinth_<x>_<y>` and written in row-major order.
//! The same grid always serializes to the same bytes.

pub mod flavor;
pub mod preview;

pub use flavor::*;
pub use preview::*;

use crate::{config, Cell, Direction, Labyrinth, LabyrinthError, LabyrinthResult, Position};
use log::info;
use pathfinding::prelude::bfs_reach;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name of the non-cardinal exit that follows a shortcut.
pub const PORTAL_EXIT: &str = "portal";

/// Stable room identifier for a cell.
///
/// # Examples
///
/// ```
/// use labyrinth_gen::{room_id, Position};
///
/// assert_eq!(room_id(Position::new(5, 12)), "labyrinth_5_12");
/// ```
pub fn room_id(pos: Position) -> String {
    format!("{}_{}_{}", config::ROOM_ID_PREFIX, pos.x, pos.y)
}

/// Encoding of the emitted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Yaml,
    Json,
}

impl DocumentFormat {
    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Yaml => "yaml",
            DocumentFormat::Json => "json",
        }
    }

    /// Picks the format from a file extension, defaulting to YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            "json" => Ok(DocumentFormat::Json),
            other => Err(format!("unknown document format '{other}' (expected yaml or json)")),
        }
    }
}

/// Serialized form of one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub room_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    /// Exit name to destination room identifier
    pub exits: BTreeMap<String, String>,
}

impl Room {
    /// Builds the room for a cell of a finished labyrinth.
    pub fn from_cell(labyrinth: &Labyrinth, cell: &Cell) -> Self {
        let flavor = describe(cell);

        let mut exits = BTreeMap::new();
        for direction in cell.exit_directions() {
            let next = labyrinth.grid.neighbor(cell.position, direction);
            if labyrinth.grid.in_bounds(next) {
                exits.insert(direction.name().to_string(), room_id(next));
            }
        }
        if let Some(partner) = labyrinth.portal_partner(cell.position) {
            exits.insert(PORTAL_EXIT.to_string(), room_id(partner));
        }

        Self {
            name: flavor.name,
            description: flavor.description,
            room_type: cell.kind.type_tag().to_string(),
            features: flavor.features,
            exits,
        }
    }

    /// Destination of the named exit, if present.
    pub fn exit(&self, name: &str) -> Option<&str> {
        self.exits.get(name).map(String::as_str)
    }
}

/// Rooms in a fixed order, serialized as a map from identifier to room.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomTable(Vec<(String, Room)>);

impl RoomTable {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Room)> {
        self.0.iter().map(|(id, room)| (id.as_str(), room))
    }

    /// Looks up a room by identifier. Linear; build an index for bulk lookups.
    pub fn get(&self, id: &str) -> Option<&Room> {
        self.0
            .iter()
            .find(|(room_id, _)| room_id == id)
            .map(|(_, room)| room)
    }

    fn index(&self) -> HashMap<&str, &Room> {
        self.iter().collect()
    }
}

impl Serialize for RoomTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(id, room)| (id, room)))
    }
}

struct RoomTableVisitor;

impl<'de> Visitor<'de> for RoomTableVisitor {
    type Value = RoomTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of room identifiers to rooms")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RoomTable, A::Error> {
        let mut rooms = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((id, room)) = access.next_entry::<String, Room>()? {
            rooms.push((id, room));
        }
        Ok(RoomTable(rooms))
    }
}

impl<'de> Deserialize<'de> for RoomTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RoomTableVisitor)
    }
}

/// A city gate as listed in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateRecord {
    pub city: String,
    pub name: String,
    pub room: String,
}

/// A shortcut as listed in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutRecord {
    pub a: String,
    pub b: String,
}

/// The generator's output: the complete labyrinth room graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabyrinthDocument {
    pub width: u32,
    pub height: u32,
    pub seed: i64,
    pub gates: Vec<GateRecord>,
    pub shortcuts: Vec<ShortcutRecord>,
    pub rooms: RoomTable,
}

impl LabyrinthDocument {
    /// Serializes every cell of a labyrinth into a room.
    ///
    /// Rooms are sorted row-major before they are handed to the encoder.
    pub fn from_labyrinth(labyrinth: &Labyrinth) -> Self {
        let mut rooms: Vec<(Position, Room)> = labyrinth
            .grid
            .cells()
            .map(|cell| (cell.position, Room::from_cell(labyrinth, cell)))
            .collect();
        rooms.sort_by_key(|(pos, _)| pos.row_major_key());

        let gates = labyrinth
            .gates
            .iter()
            .map(|gate| GateRecord {
                city: gate.city_id().to_string(),
                name: gate.display_name().to_string(),
                room: room_id(gate.position),
            })
            .collect();

        let shortcuts = labyrinth
            .shortcuts
            .iter()
            .map(|shortcut| ShortcutRecord {
                a: room_id(shortcut.a),
                b: room_id(shortcut.b),
            })
            .collect();

        Self {
            width: labyrinth.grid.width(),
            height: labyrinth.grid.height(),
            seed: labyrinth.seed,
            gates,
            shortcuts,
            rooms: RoomTable(
                rooms
                    .into_iter()
                    .map(|(pos, room)| (room_id(pos), room))
                    .collect(),
            ),
        }
    }

    /// Encodes the document as text.
    pub fn encode(&self, format: DocumentFormat) -> LabyrinthResult<String> {
        match format {
            DocumentFormat::Yaml => Ok(serde_yaml::to_string(self)?),
            DocumentFormat::Json => {
                let mut text = serde_json::to_string_pretty(self)?;
                text.push('\n');
                Ok(text)
            }
        }
    }

    /// Decodes a document from text.
    pub fn decode(text: &str, format: DocumentFormat) -> LabyrinthResult<Self> {
        match format {
            DocumentFormat::Yaml => Ok(serde_yaml::from_str(text)?),
            DocumentFormat::Json => Ok(serde_json::from_str(text)?),
        }
    }

    /// Writes the document into `dir`, creating the directory if needed.
    ///
    /// Returns the path of the written file.
    pub fn write_to_dir(&self, dir: &Path, format: DocumentFormat) -> LabyrinthResult<PathBuf> {
        fs::create_dir_all(dir).map_err(|source| LabyrinthError::OutputDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(format!("{}.{}", config::DOCUMENT_STEM, format.extension()));
        let text = self.encode(format)?;
        fs::write(&path, text)?;

        info!("Wrote {} rooms to {}", self.rooms.len(), path.display());
        Ok(path)
    }

    /// Reads a document, choosing the format from the file extension.
    pub fn load(path: &Path) -> LabyrinthResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::decode(&text, DocumentFormat::from_path(path))
    }

    /// Checks that the document describes a closed, consistent room graph:
    /// every exit resolves, gates and shortcut ends exist, and portals point
    /// at each other.
    pub fn validate(&self) -> LabyrinthResult<()> {
        let index = self.rooms.index();
        if index.len() != self.rooms.len() {
            return Err(LabyrinthError::InvalidDocument(
                "duplicate room identifiers".to_string(),
            ));
        }

        let expected = self.width as usize * self.height as usize;
        if self.rooms.len() != expected {
            return Err(LabyrinthError::InvalidDocument(format!(
                "{} rooms for a {}x{} grid",
                self.rooms.len(),
                self.width,
                self.height
            )));
        }

        for (id, room) in self.rooms.iter() {
            for (exit, target) in &room.exits {
                if !index.contains_key(target.as_str()) {
                    return Err(LabyrinthError::InvalidDocument(format!(
                        "{id} exit {exit} leads to unknown room {target}"
                    )));
                }
            }
        }

        for gate in &self.gates {
            match index.get(gate.room.as_str()) {
                Some(room) if room.room_type == "gate" => {}
                _ => {
                    return Err(LabyrinthError::InvalidDocument(format!(
                        "gate for {} does not point at a gate room",
                        gate.city
                    )))
                }
            }
        }

        let mut endpoints = HashSet::new();
        for shortcut in &self.shortcuts {
            for (from, to) in [(&shortcut.a, &shortcut.b), (&shortcut.b, &shortcut.a)] {
                if !endpoints.insert(from.as_str()) {
                    return Err(LabyrinthError::InvalidDocument(format!(
                        "room {from} is used by more than one shortcut"
                    )));
                }
                let portal = index.get(from.as_str()).and_then(|room| room.exit(PORTAL_EXIT));
                if portal != Some(to.as_str()) {
                    return Err(LabyrinthError::InvalidDocument(format!(
                        "portal in {from} does not lead to {to}"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Follows cardinal exits from `start` and returns every room reached.
    pub fn reachable_by_cardinal_exits(&self, start: &str) -> HashSet<String> {
        let index = self.rooms.index();
        if !index.contains_key(start) {
            return HashSet::new();
        }

        bfs_reach(start.to_string(), |id| {
            index
                .get(id.as_str())
                .into_iter()
                .flat_map(|room| {
                    Direction::ALL
                        .into_iter()
                        .filter_map(|direction| room.exit(direction.name()).map(str::to_string))
                })
                .collect::<Vec<_>>()
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils::create_rng;
    use crate::{GenerationConfig, Generator, LabyrinthGenerator};

    fn labyrinth(size: u32, seed: i64) -> Labyrinth {
        let config = GenerationConfig::new(size, seed);
        let mut rng = create_rng(&config);
        LabyrinthGenerator::new().generate(&config, &mut rng).unwrap()
    }

    #[test]
    fn test_room_ids_follow_scheme() {
        assert_eq!(room_id(Position::new(0, 0)), "labyrinth_0_0");
        assert_eq!(room_id(Position::new(39, 20)), "labyrinth_39_20");
    }

    #[test]
    fn test_rooms_are_row_major() {
        let document = LabyrinthDocument::from_labyrinth(&labyrinth(12, 4));
        let ids: Vec<_> = document.rooms.iter().map(|(id, _)| id.to_string()).collect();
        assert_eq!(ids[0], "labyrinth_0_0");
        assert_eq!(ids[1], "labyrinth_1_0");
        assert_eq!(ids[12], "labyrinth_0_1");
        assert_eq!(ids.len(), 144);
    }

    #[test]
    fn test_exits_match_walls() {
        let labyrinth = labyrinth(10, 8);
        let document = LabyrinthDocument::from_labyrinth(&labyrinth);

        for cell in labyrinth.grid.cells() {
            let room = document.rooms.get(&room_id(cell.position)).unwrap();
            for direction in Direction::ALL {
                let expected = (!cell.has_wall(direction))
                    .then(|| room_id(cell.position.step(direction)));
                assert_eq!(room.exit(direction.name()).map(str::to_string), expected);
            }
            assert_eq!(room.room_type, cell.kind.type_tag());
        }
    }

    #[test]
    fn test_portal_exits_are_symmetric() {
        let labyrinth = labyrinth(24, 17);
        let document = LabyrinthDocument::from_labyrinth(&labyrinth);

        assert!(!document.shortcuts.is_empty());
        for shortcut in &document.shortcuts {
            let a = document.rooms.get(&shortcut.a).unwrap();
            let b = document.rooms.get(&shortcut.b).unwrap();
            assert_eq!(a.exit(PORTAL_EXIT), Some(shortcut.b.as_str()));
            assert_eq!(b.exit(PORTAL_EXIT), Some(shortcut.a.as_str()));
            assert_eq!(a.features, vec!["portal".to_string()]);
        }

        let portal_rooms = document
            .rooms
            .iter()
            .filter(|(_, room)| room.exit(PORTAL_EXIT).is_some())
            .count();
        assert_eq!(portal_rooms, document.shortcuts.len() * 2);
    }

    #[test]
    fn test_serialization_is_idempotent() {
        let labyrinth = labyrinth(16, 3);
        let first = LabyrinthDocument::from_labyrinth(&labyrinth);
        let second = LabyrinthDocument::from_labyrinth(&labyrinth);
        assert_eq!(first, second);
        assert_eq!(
            first.encode(DocumentFormat::Yaml).unwrap(),
            second.encode(DocumentFormat::Yaml).unwrap()
        );
    }

    #[test]
    fn test_yaml_and_json_decode_back() {
        let document = LabyrinthDocument::from_labyrinth(&labyrinth(8, 21));
        for format in [DocumentFormat::Yaml, DocumentFormat::Json] {
            let text = document.encode(format).unwrap();
            let decoded = LabyrinthDocument::decode(&text, format).unwrap();
            assert_eq!(decoded, document);
        }
    }

    #[test]
    fn test_features_omitted_for_plain_rooms() {
        let document = LabyrinthDocument::from_labyrinth(&labyrinth(8, 2));
        let yaml = document.encode(DocumentFormat::Yaml).unwrap();
        let plain_rooms = document
            .rooms
            .iter()
            .filter(|(_, room)| room.room_type == "passage")
            .count();
        let feature_lines = yaml.matches("features:").count();
        assert_eq!(feature_lines, document.rooms.len() - plain_rooms);
    }

    #[test]
    fn test_validate_accepts_generated_document() {
        let document = LabyrinthDocument::from_labyrinth(&labyrinth(20, 5));
        assert!(document.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_dangling_exit() {
        let mut document = LabyrinthDocument::from_labyrinth(&labyrinth(6, 5));
        let (_, room) = document.rooms.0.first_mut().unwrap();
        room.exits
            .insert("north".to_string(), "labyrinth_99_99".to_string());
        assert!(matches!(
            document.validate(),
            Err(LabyrinthError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_validate_rejects_broken_portal() {
        let mut document = LabyrinthDocument::from_labyrinth(&labyrinth(20, 5));
        let Some(shortcut) = document.shortcuts.first().cloned() else {
            return;
        };
        for (id, room) in document.rooms.0.iter_mut() {
            if *id == shortcut.a {
                room.exits.remove(PORTAL_EXIT);
            }
        }
        assert!(document.validate().is_err());
    }

    #[test]
    fn test_cardinal_reachability() {
        let document = LabyrinthDocument::from_labyrinth(&labyrinth(10, 1));
        let reached = document.reachable_by_cardinal_exits("labyrinth_5_5");
        assert_eq!(reached.len(), 100);
        assert!(document.reachable_by_cardinal_exits("missing").is_empty());
    }

    #[test]
    fn test_cardinal_reachability_ignores_portals() {
        let mut grid = crate::Grid::new(3, 1);
        grid.remove_wall_between(Position::new(0, 0), Direction::East);
        grid.set_kind(
            Position::new(0, 0),
            crate::CellKind::ShortcutEndpoint {
                pair: 0,
                side: crate::ShortcutSide::A,
            },
        );
        grid.set_kind(
            Position::new(2, 0),
            crate::CellKind::ShortcutEndpoint {
                pair: 0,
                side: crate::ShortcutSide::B,
            },
        );
        let labyrinth = Labyrinth {
            seed: 0,
            grid,
            gates: Vec::new(),
            shortcuts: vec![crate::ShortcutPair {
                a: Position::new(0, 0),
                b: Position::new(2, 0),
            }],
        };
        let document = LabyrinthDocument::from_labyrinth(&labyrinth);

        let reached = document.reachable_by_cardinal_exits("labyrinth_0_0");
        let expected: HashSet<String> = ["labyrinth_0_0", "labyrinth_1_0"]
            .into_iter()
            .map(str::to_string)
            .collect();
        assert_eq!(reached, expected);
        assert_eq!(
            document.rooms.get("labyrinth_0_0").unwrap().exit(PORTAL_EXIT),
            Some("labyrinth_2_0")
        );
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("out/labyrinth.json")),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("out/labyrinth.yaml")),
            DocumentFormat::Yaml
        );
    }

    #[test]
    fn test_format_parses_from_cli_text() {
        assert_eq!("json".parse::<DocumentFormat>(), Ok(DocumentFormat::Json));
        assert_eq!("YAML".parse::<DocumentFormat>(), Ok(DocumentFormat::Yaml));
        assert_eq!("yml".parse::<DocumentFormat>(), Ok(DocumentFormat::Yaml));
        assert!("toml".parse::<DocumentFormat>().is_err());
        assert_eq!(DocumentFormat::Json.to_string(), "json");
    }
}
