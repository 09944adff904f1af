//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (ghosts by kind, collectibles by ID)
//! - No rendering, audio or platform dependencies

pub mod actor;
pub mod collectible;
pub mod geom;
pub mod ghost;
pub mod maze;
pub mod movement;
pub mod schedule;
pub mod state;
pub mod tick;

pub use actor::{Actor, Direction, Player, PlayerSprite};
pub use collectible::{Collectible, CollectibleKind};
pub use geom::Rect;
pub use ghost::{AiContext, Ghost, GhostKind, GhostMode, GhostSprite, MoveStage};
pub use maze::{BUILTIN_LAYOUTS, Layout, LayoutError, MazeState, TileKind, Traversal, WallTile};
pub use schedule::{LiveTimer, ModeScheduler, ScheduleChange, ScheduledMode};
pub use state::{EntityId, GameEvent, GamePhase, GameState, Sprite};
pub use tick::{TickInput, tick};
