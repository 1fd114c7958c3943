//! # ASCII Preview
//!
//! Plain-text rendering of a grid for eyeballing a generated maze.

use crate::{CellKind, Direction, Grid, PoiKind, Position};

fn glyph(kind: CellKind) -> char {
    match kind {
        CellKind::Passage => ' ',
        CellKind::Gate(_) => 'G',
        CellKind::PointOfInterest(PoiKind::Treasure) => '$',
        CellKind::PointOfInterest(PoiKind::Merchant) => 'M',
        CellKind::PointOfInterest(PoiKind::LoreNpc) => 'L',
        CellKind::ShortcutEndpoint { .. } => '*',
    }
}

/// Byte length of a rendering: `4w + 2` per line, `2h + 1` lines.
fn rendered_len(width: u32, height: u32) -> usize {
    (width as usize * 4 + 2) * (height as usize * 2 + 1)
}

/// Renders the grid with `+`, `-` and `|` walls and one glyph per cell.
///
/// # Examples
///
/// ```
/// use labyrinth_gen::{render_ascii, Grid};
///
/// let text = render_ascii(&Grid::new(2, 1));
/// assert_eq!(text, "+---+---+\n|   |   |\n+---+---+\n");
/// ```
pub fn render_ascii(grid: &Grid) -> String {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let mut out = String::with_capacity(rendered_len(grid.width(), grid.height()));

    for y in 0..height {
        out.push('+');
        for x in 0..width {
            let open = grid.has_passage(Position::new(x, y), Direction::North);
            out.push_str(if open { "   +" } else { "---+" });
        }
        out.push('\n');

        out.push('|');
        for x in 0..width {
            let pos = Position::new(x, y);
            let kind = grid.cell(pos).map(|cell| cell.kind).unwrap_or_default();
            out.push(' ');
            out.push(glyph(kind));
            out.push(' ');
            out.push(if grid.has_passage(pos, Direction::East) { ' ' } else { '|' });
        }
        out.push('\n');
    }

    out.push('+');
    for _ in 0..width {
        out.push_str("---+");
    }
    out.push('\n');

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::City;

    #[test]
    fn test_render_open_walls() {
        let mut grid = Grid::new(2, 2);
        grid.remove_wall_between(Position::new(0, 0), Direction::East);
        grid.remove_wall_between(Position::new(0, 0), Direction::South);
        grid.set_kind(Position::new(1, 1), CellKind::Gate(City::Saltmere));

        let expected = "\
+---+---+
|       |
+   +---+
|   | G |
+---+---+
";
        assert_eq!(render_ascii(&grid), expected);
    }

    #[test]
    fn test_render_line_count() {
        let text = render_ascii(&Grid::new(5, 3));
        assert_eq!(text.lines().count(), 7);
        assert!(text.lines().all(|line| line.len() == 21));
        assert_eq!(text.len(), rendered_len(5, 3));
    }

    #[test]
    fn test_rendered_len_does_not_wrap_on_huge_grids() {
        // Past i32::MAX, where a 32-bit product would wrap.
        let len = rendered_len(20_000, 20_000);
        assert_eq!(len, 80_002 * 40_001);
        assert!(len > i32::MAX as usize);
        assert_eq!(rendered_len(u32::MAX, 0), u32::MAX as usize * 4 + 2);
    }
}
