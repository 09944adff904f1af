//! Maze layouts and the static wall state built from them
//!
//! A layout is a rectangular grid of single-character symbols:
//!
//! | Symbol | Meaning                                         |
//! |--------|-------------------------------------------------|
//! | `X`    | wall                                            |
//! | `O`    | pen opening (ghosts pass, the player does not)  |
//! | `Y`    | player start                                    |
//! | `B`    | direct chaser start, also the pen-exit point    |
//! | `P`    | ahead-chaser start                              |
//! | `I`    | behind-chaser start                             |
//! | `C`    | roamer start                                    |
//! | `.`    | dot                                             |
//! | `E`    | energiser                                       |
//! | `F`    | fruit spawn point                               |
//!
//! Anything else is ignored.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::ghost::GhostKind;
use crate::consts::*;

/// Wall tile classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    /// Solid wall, drawn with the given style variant
    Wall { style: u8 },
    /// Pen door: blocks the player only
    PenOpening,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallTile {
    pub pos: Vec2,
    pub kind: TileKind,
}

impl WallTile {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::cell(self.pos)
    }
}

/// Who is moving through the maze
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    Player,
    Ghost,
}

impl Traversal {
    fn blocked_by(self, kind: TileKind) -> bool {
        match kind {
            TileKind::Wall { .. } => true,
            TileKind::PenOpening => self == Traversal::Player,
        }
    }
}

/// Errors raised while building a level from a layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    Empty,
    MissingPlayerStart,
    MissingGhostStart(GhostKind),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "layout has no rows"),
            Self::MissingPlayerStart => write!(f, "layout has no player start ('Y')"),
            Self::MissingGhostStart(kind) => {
                write!(f, "layout has no start for {kind:?} ('{}')", kind.symbol())
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Everything a level is built from, parsed out of a symbolic layout
#[derive(Debug, Clone)]
pub struct Layout {
    pub walls: Vec<WallTile>,
    pub player_start: Vec2,
    /// Ghost starts in `GhostKind::ALL` order
    pub ghost_starts: [(GhostKind, Vec2); 4],
    pub dots: Vec<Vec2>,
    pub energisers: Vec<Vec2>,
    pub fruit_pos: Vec2,
}

/// Pixel position of layout cell (col, row)
fn cell_pos(col: usize, row: usize) -> Vec2 {
    Vec2::new(
        col as f32 * GRID + LAYOUT_ORIGIN_X,
        row as f32 * GRID + LAYOUT_ORIGIN_Y,
    )
}

/// Half-cell shift for actors that sit centred between two bricks
const BETWEEN_BRICKS: Vec2 = Vec2::new(-GRID / 2.0, 0.0);

impl Layout {
    /// Parse a layout. `style` selects the wall variant for the level.
    pub fn parse(text: &str, style: u8) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        if rows.is_empty() {
            return Err(LayoutError::Empty);
        }

        let mut walls = Vec::new();
        let mut dots = Vec::new();
        let mut energisers = Vec::new();
        let mut player_start = None;
        let mut fruit_pos = None;
        let mut ghost_starts: [Option<Vec2>; 4] = [None; 4];

        for (row, line) in rows.iter().enumerate() {
            for (col, symbol) in line.chars().enumerate() {
                let pos = cell_pos(col, row);
                match symbol {
                    'X' => walls.push(WallTile {
                        pos,
                        kind: TileKind::Wall { style },
                    }),
                    'O' => walls.push(WallTile {
                        pos,
                        kind: TileKind::PenOpening,
                    }),
                    'Y' => player_start = Some(pos + BETWEEN_BRICKS),
                    '.' => dots.push(pos),
                    'E' => energisers.push(pos),
                    'F' => fruit_pos = Some(pos + BETWEEN_BRICKS),
                    ' ' => {}
                    other => match GhostKind::from_symbol(other) {
                        Some(kind) => {
                            let pos = if kind == GhostKind::Direct {
                                pos + BETWEEN_BRICKS
                            } else {
                                pos
                            };
                            ghost_starts[kind.index()] = Some(pos);
                        }
                        None => log::debug!("Ignoring layout symbol {other:?} at ({col}, {row})"),
                    },
                }
            }
        }

        let player_start = player_start.ok_or(LayoutError::MissingPlayerStart)?;
        let mut starts = [(GhostKind::Direct, Vec2::ZERO); 4];
        for kind in GhostKind::ALL {
            let pos = ghost_starts[kind.index()].ok_or(LayoutError::MissingGhostStart(kind))?;
            starts[kind.index()] = (kind, pos);
        }
        let fruit_pos = fruit_pos.unwrap_or_else(|| {
            log::debug!("Layout has no fruit point, using the player start");
            player_start
        });

        Ok(Self {
            walls,
            player_start,
            ghost_starts: starts,
            dots,
            energisers,
            fruit_pos,
        })
    }

    /// Pen-exit point: where the direct chaser starts
    pub fn pen_exit(&self) -> Vec2 {
        self.ghost_starts[GhostKind::Direct.index()].1
    }
}

/// Static maze for one level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeState {
    pub walls: Vec<WallTile>,
    pub pen_exit: Vec2,
    pub fruit_pos: Vec2,
}

impl MazeState {
    pub fn from_layout(layout: &Layout) -> Self {
        Self {
            walls: layout.walls.clone(),
            pen_exit: layout.pen_exit(),
            fruit_pos: layout.fruit_pos,
        }
    }

    /// First tile blocking `traversal` that overlaps `rect`
    pub fn first_blocking(&self, rect: &Rect, traversal: Traversal) -> Option<&WallTile> {
        self.walls
            .iter()
            .filter(|tile| traversal.blocked_by(tile.kind))
            .find(|tile| tile.rect().overlaps(rect))
    }

    /// Whether `rect` overlaps any tile blocking `traversal`
    pub fn is_blocked(&self, rect: &Rect, traversal: Traversal) -> bool {
        self.first_blocking(rect, traversal).is_some()
    }
}

/// Built-in maze layouts, cycled by level
pub const BUILTIN_LAYOUTS: [&str; 1] = [CLASSIC];

/// Number of wall style variants available to the renderer
pub const WALL_STYLES: u8 = 4;

const CLASSIC: &str = "\
XXXXXXXXXXXXXXXXXXXXXXXXXXX
X............X............X
X.XXXX.XXXXX.X.XXXXX.XXXX.X
XEXXXX.XXXXX.X.XXXXX.XXXXEX
X.........................X
X.XXXX.XX.XXXXXXX.XX.XXXX.X
X......XX....X....XX......X
XXXXXX.XXXXX.X.XXXXX.XXXXXX
XXXXXX.XX     B   XX.XXXXXX
XXXXXX.XX XXXOOXX XX.XXXXXX
      .   XP I CX   .
XXXXXX.XX XXXXXXX XX.XXXXXX
XXXXXX.XX    F    XX.XXXXXX
XXXXXX.XX.XXXXXXX.XX.XXXXXX
X............X............X
X.XXXX.XXXXX.X.XXXXX.XXXX.X
XE..XX.......Y.......XX..EX
XXX.XX.XX.XXXXXXX.XX.XX.XXX
X......XX....X....XX......X
X.XXXXXXXXXX.X.XXXXXXXXXX.X
X.........................X
XXXXXXXXXXXXXXXXXXXXXXXXXXX
";

/// Wall style variant for a 1-based level
pub fn wall_style_for_level(level: u32) -> u8 {
    (level.saturating_sub(1) % WALL_STYLES as u32) as u8
}

/// Built-in layout text and wall style for a 1-based level
pub fn layout_for_level(level: u32) -> (&'static str, u8) {
    let index = level.saturating_sub(1) as usize;
    let text = BUILTIN_LAYOUTS[index % BUILTIN_LAYOUTS.len()];
    (text, wall_style_for_level(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY: &str = "\
XXXXXXX
XY.E.FX
XOX?XXX
XBPIC X
XXXXXXX
";

    #[test]
    fn test_parse_tiny_layout() {
        let layout = Layout::parse(TINY, 2).unwrap();
        assert_eq!(layout.player_start, Vec2::new(30.0, 60.0));
        assert_eq!(layout.dots.len(), 2);
        assert_eq!(layout.energisers, vec![Vec2::new(80.0, 60.0)]);
        assert_eq!(layout.fruit_pos, Vec2::new(110.0, 60.0));
        assert_eq!(layout.pen_exit(), Vec2::new(30.0, 100.0));
        assert_eq!(layout.ghost_starts[1], (GhostKind::Ahead, Vec2::new(60.0, 100.0)));
        // '?' is skipped, not fatal
        let openings = layout
            .walls
            .iter()
            .filter(|w| w.kind == TileKind::PenOpening)
            .count();
        assert_eq!(openings, 1);
        assert!(layout.walls.iter().any(|w| w.kind == TileKind::Wall { style: 2 }));
    }

    #[test]
    fn test_missing_starts_are_rejected() {
        assert_eq!(Layout::parse("", 0).unwrap_err(), LayoutError::Empty);
        assert_eq!(
            Layout::parse("XBPIC", 0).unwrap_err(),
            LayoutError::MissingPlayerStart
        );
        assert_eq!(
            Layout::parse("XYBPI", 0).unwrap_err(),
            LayoutError::MissingGhostStart(GhostKind::Roamer)
        );
    }

    #[test]
    fn test_openings_block_player_only() {
        let layout = Layout::parse(TINY, 0).unwrap();
        let maze = MazeState::from_layout(&layout);
        let opening = Rect::cell(Vec2::new(40.0, 80.0));
        assert!(maze.is_blocked(&opening, Traversal::Player));
        assert!(!maze.is_blocked(&opening, Traversal::Ghost));
    }

    #[test]
    fn test_builtin_layouts_parse() {
        for level in 1..=8 {
            let (text, style) = layout_for_level(level);
            let layout = Layout::parse(text, style).unwrap();
            assert!(layout.dots.len() > FRUIT_THRESHOLDS[1] as usize);
            assert_eq!(layout.energisers.len(), 4);
            assert_eq!(text.lines().count(), 22);
        }
    }
}
