//! Game state and presentation events
//!
//! All mutable session state lives in [`GameState`]: entities, timers,
//! counters and the seeded RNG. Nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Direction, Player, PlayerSprite};
use super::collectible::{Collectible, CollectibleKind};
use super::ghost::{Ghost, GhostKind, GhostSprite};
use super::maze::{BUILTIN_LAYOUTS, Layout, LayoutError, MazeState, TileKind, wall_style_for_level};
use super::schedule::ModeScheduler;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// All collectibles gone; waiting out the level-clear delay
    LevelCleared,
    /// Run ended
    GameOver,
}

/// Identifies an entity in draw events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityId {
    Player,
    Ghost(GhostKind),
    Collectible(u32),
}

/// What to draw for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sprite {
    Player(PlayerSprite),
    Ghost(GhostSprite),
    Collectible(CollectibleKind),
}

/// Events emitted by the simulation for the presentation layer.
///
/// Drained with [`GameState::drain_events`] after each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Draw { entity: EntityId, pos: Vec2, sprite: Sprite },
    EnergiserEaten,
    GhostCaptured { kind: GhostKind, score: u64 },
    FruitEaten { score: u64 },
    /// Floating score text at a position
    ScorePopup { score: u64, pos: Vec2 },
    LifeLost { lives_left: u8 },
    LevelComplete { level: u32 },
    ExtraLifeEarned { lives: u8 },
    GameOver { score: u64, level: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub settings: Settings,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u8,
    pub score: u64,
    /// Score at which the next extra life is awarded
    pub next_life_target: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Remaining level-clear delay
    pub level_clear_ticks: u32,
    pub player: Player,
    /// Ghosts in `GhostKind::ALL` order
    pub ghosts: Vec<Ghost>,
    /// Remaining collectibles (sorted by id)
    pub collectibles: Vec<Collectible>,
    pub maze: MazeState,
    pub scheduler: ModeScheduler,
    /// Collectibles eaten this level
    pub dots_eaten: u32,
    /// Latched player direction; a Hold input keeps the previous one
    pub next_direction: Direction,
    events: Vec<GameEvent>,
    layouts: Vec<Layout>,
    next_id: u32,
}

impl GameState {
    /// Create a new game on the built-in mazes
    pub fn new(seed: u64, settings: Settings) -> Result<Self, LayoutError> {
        Self::with_layouts(seed, settings, &BUILTIN_LAYOUTS)
    }

    /// Create a new game cycling through the given layout texts by level
    pub fn with_layouts(seed: u64, settings: Settings, layouts: &[&str]) -> Result<Self, LayoutError> {
        let parsed = layouts
            .iter()
            .map(|text| Layout::parse(text, 0))
            .collect::<Result<Vec<_>, _>>()?;
        let first = parsed.first().ok_or(LayoutError::Empty)?;

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            scheduler: ModeScheduler::new(&settings),
            level: 1,
            lives: settings.start_lives,
            score: 0,
            next_life_target: settings.extra_life_interval,
            time_ticks: 0,
            phase: GamePhase::Playing,
            level_clear_ticks: 0,
            player: Player::new(first.player_start),
            ghosts: Vec::new(),
            collectibles: Vec::new(),
            maze: MazeState::from_layout(first),
            dots_eaten: 0,
            next_direction: Direction::Hold,
            events: Vec::new(),
            layouts: parsed,
            next_id: 1,
            settings,
        };
        state.build_level();
        Ok(state)
    }

    /// Start over from level 1 with the same layouts and settings
    pub fn new_game(&mut self) {
        self.level = 1;
        self.score = 0;
        self.lives = self.settings.start_lives;
        self.next_life_target = self.settings.extra_life_interval;
        self.scheduler = ModeScheduler::new(&self.settings);
        self.build_level();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Speed percentage for the current level: slower early levels ramp up to
    /// full speed at `Settings::full_speed_level`.
    pub fn speed_percent_for_level(&self) -> f32 {
        let full = self.settings.full_speed_level;
        let ramp = if self.level < full {
            100.0 - (full - self.level) as f32 * 5.0
        } else {
            100.0
        };
        (ramp.max(0.0) * self.settings.speed_percent / 100.0).clamp(0.0, 100.0)
    }

    /// Rebuild maze and entities for the current level
    pub fn build_level(&mut self) {
        let index = (self.level.saturating_sub(1) as usize) % self.layouts.len();
        let style = wall_style_for_level(self.level);
        let layout = self.layouts[index].clone();

        self.maze = MazeState::from_layout(&layout);
        for tile in &mut self.maze.walls {
            if let TileKind::Wall { style: s } = &mut tile.kind {
                *s = style;
            }
        }

        let percent = self.speed_percent_for_level();
        self.player = Player::new(layout.player_start);
        self.player.actor.set_speed_percent(PLAYER_MAX_SPEED, percent);

        self.ghosts = layout
            .ghost_starts
            .iter()
            .map(|&(kind, pos)| {
                let mut ghost = Ghost::new(kind, pos);
                ghost.set_speed_percent(percent);
                ghost
            })
            .collect();

        self.collectibles.clear();
        for pos in layout.dots {
            let id = self.next_entity_id();
            self.collectibles.push(Collectible::dot(id, pos));
        }
        for pos in layout.energisers {
            let id = self.next_entity_id();
            self.collectibles.push(Collectible::energiser(id, pos));
        }
        self.collectibles.sort_by_key(|c| c.id);

        self.scheduler.start_level();
        self.dots_eaten = 0;
        self.next_direction = Direction::Hold;
        self.level_clear_ticks = 0;
        self.phase = GamePhase::Playing;

        log::info!(
            "Level {}: {} walls, {} collectibles, speed {:.0}%",
            self.level,
            self.maze.walls.len(),
            self.collectibles.len(),
            percent
        );
    }

    /// Move on to the next level, tightening the mode schedule
    pub fn advance_level(&mut self) {
        self.level += 1;
        self.scheduler.advance_level();
        self.build_level();
    }

    /// Add points and award an extra life when the next threshold is crossed
    pub fn award(&mut self, points: u64) {
        self.score += points;
        if self.score >= self.next_life_target {
            self.next_life_target += self.settings.extra_life_interval;
            if self.lives < self.settings.max_lives {
                self.lives += 1;
                self.push_event(GameEvent::ExtraLifeEarned { lives: self.lives });
            }
        }
    }

    /// Player and ghosts back to their starts after a lost life
    pub fn reset_after_life_lost(&mut self) {
        self.player.return_to_start();
        self.next_direction = Direction::Hold;
        for ghost in &mut self.ghosts {
            ghost.jump_to_start();
        }
        self.scheduler.end_fright();
        for ghost in &mut self.ghosts {
            ghost.set_default_mode(false);
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Peek at pending events without draining them
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Queue one draw event per entity
    pub fn emit_draw_events(&mut self) {
        let mut draws = Vec::with_capacity(1 + self.ghosts.len() + self.collectibles.len());
        for c in &self.collectibles {
            draws.push(GameEvent::Draw {
                entity: EntityId::Collectible(c.id),
                pos: c.pos,
                sprite: Sprite::Collectible(c.kind),
            });
        }
        for g in &self.ghosts {
            draws.push(GameEvent::Draw {
                entity: EntityId::Ghost(g.kind),
                pos: g.pos(),
                sprite: Sprite::Ghost(g.sprite),
            });
        }
        draws.push(GameEvent::Draw {
            entity: EntityId::Player,
            pos: self.player.actor.pos,
            sprite: Sprite::Player(self.player.sprite),
        });
        self.events.extend(draws);
    }

    pub fn ghost(&self, kind: GhostKind) -> Option<&Ghost> {
        self.ghosts.iter().find(|g| g.kind == kind)
    }

    pub fn ghost_mut(&mut self, kind: GhostKind) -> Option<&mut Ghost> {
        self.ghosts.iter_mut().find(|g| g.kind == kind)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
