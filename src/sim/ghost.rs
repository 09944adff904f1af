//! Ghost AI: mode state machine, per-kind targeting and movement fallback
//!
//! Each tick a released ghost picks a target for its mode, proposes a single
//! direction toward it (a guess that ignores walls), and the orchestrator then
//! validates that guess with [`Ghost::move_with_fallback`]. The cascade always
//! ends in a legal move in a connected maze, so ghosts never stall at dead ends.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Direction};
use super::maze::{MazeState, Traversal};
use super::movement;
use crate::consts::*;

/// The four ghost flavours sharing one state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GhostKind {
    /// Heads straight for the player; its start is the pen-exit point
    Direct,
    /// Aims ahead of the player
    Ahead,
    /// Aims behind the player
    Behind,
    /// Wanders randomly instead of chasing
    Roamer,
}

impl GhostKind {
    pub const ALL: [GhostKind; 4] = [
        GhostKind::Direct,
        GhostKind::Ahead,
        GhostKind::Behind,
        GhostKind::Roamer,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Layout symbol for this kind's start cell
    pub fn symbol(self) -> char {
        match self {
            GhostKind::Direct => 'B',
            GhostKind::Ahead => 'P',
            GhostKind::Behind => 'I',
            GhostKind::Roamer => 'C',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        GhostKind::ALL.into_iter().find(|kind| kind.symbol() == symbol)
    }

    /// Collectibles eaten before first release
    pub fn release_delay(self) -> u32 {
        [1, 10, 30, 90][self.index()]
    }

    /// Collectibles eaten before release after being caught
    pub fn recapture_delay(self) -> u32 {
        [1, 5, 15, 25][self.index()]
    }

    pub fn default_mode(self) -> GhostMode {
        match self {
            GhostKind::Roamer => GhostMode::Random,
            _ => GhostMode::Chase,
        }
    }

    /// Scatter corner, outside the maze so the ghost hugs that corner
    pub fn scatter_corner(self) -> Vec2 {
        match self {
            GhostKind::Direct => Vec2::new(-200.0, -100.0),
            GhostKind::Ahead => Vec2::new(WIDTH + 200.0, -100.0),
            GhostKind::Behind => Vec2::new(-200.0, HEIGHT + 250.0),
            GhostKind::Roamer => Vec2::new(WIDTH + 200.0, HEIGHT + 250.0),
        }
    }

    /// Chase-mode target for this kind
    pub fn chase_target(self, ctx: &AiContext) -> Vec2 {
        CHASE_TARGETS[self.index()](ctx)
    }
}

type ChaseTargetFn = fn(&AiContext) -> Vec2;

/// Chase targeting strategy, indexed by `GhostKind::index`
const CHASE_TARGETS: [ChaseTargetFn; 4] = [
    target_player,
    target_ahead_of_player,
    target_behind_player,
    target_player,
];

fn target_player(ctx: &AiContext) -> Vec2 {
    ctx.player_pos
}

/// Offset along the player's facing axis; a holding player counts as facing left
fn facing_offset(facing: Direction) -> Vec2 {
    let facing = if facing == Direction::Hold {
        Direction::Left
    } else {
        facing
    };
    facing.unit() * CHASE_LEAD
}

fn target_ahead_of_player(ctx: &AiContext) -> Vec2 {
    ctx.player_pos + facing_offset(ctx.player_facing)
}

fn target_behind_player(ctx: &AiContext) -> Vec2 {
    ctx.player_pos - facing_offset(ctx.player_facing)
}

/// Ghost behaviour mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GhostMode {
    Chase,
    Scatter,
    Frightened,
    Random,
    Caught,
}

/// Ghost sprite selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GhostSprite {
    Facing(Direction),
    Frightened,
    /// Alternate frightened image shown while the fright is about to end
    FrightenedFlash,
    Caught,
}

/// What a ghost reads about the rest of the world when choosing a direction
#[derive(Debug, Clone, Copy)]
pub struct AiContext {
    pub player_pos: Vec2,
    pub player_facing: Direction,
    pub pen_exit: Vec2,
    /// Shared frightened countdown (0 when no fright is active)
    pub fright_remaining: u32,
}

/// Which stage of the movement cascade produced the move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveStage {
    /// The proposed direction was walkable
    Guess,
    /// Kept going in the current direction
    Current,
    /// Took a direction from the target-quadrant ordering
    Ordered(Direction),
    /// Everything else failed; turned back the way it came
    Reversed,
    /// Walled in on every side; the ghost did not move
    Stuck,
}

/// Direction orderings tried when both the guess and the current direction
/// are blocked: toward the target on the major axis, then the minor axis,
/// then away.
const FALLBACK_ORDERS: [[Direction; 4]; 8] = {
    use Direction::*;
    [
        [Right, Down, Left, Up],
        [Left, Down, Right, Up],
        [Right, Up, Left, Down],
        [Left, Up, Right, Down],
        [Down, Right, Up, Left],
        [Down, Left, Up, Right],
        [Up, Right, Down, Left],
        [Up, Left, Down, Right],
    ]
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ghost {
    pub actor: Actor,
    pub kind: GhostKind,
    pub mode: GhostMode,
    pub target: Vec2,
    pub last_random_target: Vec2,
    /// Ticks since the last random target re-roll
    pub random_timer: u32,
    /// Collectibles still to be eaten before this ghost leaves the pen
    pub release_delay: u32,
    pub start_pos: Vec2,
    pub sprite: GhostSprite,
    /// How the last movement attempt was resolved (`None` if it did not move)
    pub last_move: Option<MoveStage>,
}

impl Ghost {
    pub fn new(kind: GhostKind, start_pos: Vec2) -> Self {
        let placeholder = Vec2::new(400.0, 600.0);
        Self {
            actor: Actor::new(start_pos, GHOST_MAX_SPEED),
            kind,
            mode: kind.default_mode(),
            target: placeholder,
            last_random_target: placeholder,
            random_timer: RANDOM_TARGET_INTERVAL,
            release_delay: kind.release_delay(),
            start_pos,
            sprite: GhostSprite::Facing(Direction::Hold),
            last_move: None,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.actor.pos
    }

    /// Still waiting in the pen
    pub fn is_penned(&self) -> bool {
        self.release_delay > 0
    }

    /// Set speed for the level; out-of-range percentages are rejected
    pub fn set_speed_percent(&mut self, percent: f32) -> bool {
        self.actor.set_speed_percent(GHOST_MAX_SPEED, percent)
    }

    fn reverse(&mut self) {
        self.actor.current_direction = self.actor.current_direction.reverse();
    }

    /// Restore the kind's default mode and base speed (caught ghosts are left alone)
    pub fn set_default_mode(&mut self, reverse: bool) {
        if self.mode == GhostMode::Caught {
            return;
        }
        self.mode = self.kind.default_mode();
        self.sprite = GhostSprite::Facing(self.actor.current_direction);
        if reverse {
            self.reverse();
        }
        self.actor.speed = self.actor.base_speed;
    }

    pub fn set_scatter_mode(&mut self) {
        if self.mode == GhostMode::Caught {
            return;
        }
        self.mode = GhostMode::Scatter;
        self.reverse();
    }

    pub fn set_frightened_mode(&mut self) {
        if self.mode == GhostMode::Caught {
            return;
        }
        self.mode = GhostMode::Frightened;
        self.sprite = GhostSprite::Frightened;
        self.reverse();
        self.actor.speed = self.actor.base_speed * FRIGHT_SPEED_FACTOR;
    }

    /// Captured by the player: race back to the pen exit at double speed
    pub fn return_to_pen(&mut self) {
        self.mode = GhostMode::Caught;
        self.sprite = GhostSprite::Caught;
        self.actor.speed = GHOST_MAX_SPEED * 2.0;
    }

    /// Called once per collectible eaten
    pub fn reduce_delay(&mut self) {
        self.release_delay = self.release_delay.saturating_sub(1);
    }

    /// Back to the start point in the pen (life lost or level restart)
    pub fn jump_to_start(&mut self) {
        self.actor.pos = self.start_pos;
        self.mode = self.kind.default_mode();
        self.sprite = GhostSprite::Facing(Direction::Hold);
        self.release_delay = self.kind.release_delay();
        self.actor.speed = self.actor.base_speed;
        self.actor.current_direction = Direction::Hold;
    }

    /// Compute this tick's target and propose a direction toward it.
    ///
    /// Returns `None` while the ghost is penned (or has just been returned to
    /// the pen after capture). The proposal never reverses the current
    /// direction and is not checked against walls.
    pub fn propose_direction<R: Rng>(&mut self, ctx: &AiContext, rng: &mut R) -> Option<Direction> {
        if self.is_penned() {
            return None;
        }

        if self.actor.current_direction == Direction::Hold {
            self.actor.pos = ctx.pen_exit;
        }

        match self.mode {
            GhostMode::Chase => self.target = self.kind.chase_target(ctx),
            GhostMode::Scatter => self.target = self.kind.scatter_corner(),
            GhostMode::Random | GhostMode::Frightened => {
                self.random_timer += 1;
                if self.random_timer >= RANDOM_TARGET_INTERVAL - 1 {
                    self.last_random_target = Vec2::new(
                        rng.random_range(0..WIDTH as u32) as f32,
                        rng.random_range(0..HEIGHT as u32) as f32,
                    );
                    self.random_timer = 0;
                    self.target = self.last_random_target;
                }
                if self.mode == GhostMode::Frightened {
                    self.update_fright_flash(ctx.fright_remaining);
                }
            }
            GhostMode::Caught => {
                let delta = (ctx.pen_exit - self.actor.pos).abs();
                if delta.x < GRID && delta.y < GRID {
                    self.arrive_home();
                    return None;
                }
                self.target = ctx.pen_exit;
            }
        }

        Some(self.heading_toward_target())
    }

    fn update_fright_flash(&mut self, fright_remaining: u32) {
        if fright_remaining < FRIGHT_FLASH_TICKS && fright_remaining % FRIGHT_FLASH_PERIOD == 0 {
            self.sprite = match self.sprite {
                GhostSprite::Frightened => GhostSprite::FrightenedFlash,
                _ => GhostSprite::Frightened,
            };
        }
    }

    /// Reached the pen exit after capture
    fn arrive_home(&mut self) {
        self.actor.pos = self.start_pos;
        self.mode = self.kind.default_mode();
        self.sprite = GhostSprite::Facing(Direction::Hold);
        self.actor.current_direction = Direction::Hold;
        self.actor.speed = self.actor.base_speed;
        self.release_delay = self.kind.recapture_delay();
    }

    /// Primary-axis heuristic toward `self.target`
    fn heading_toward_target(&mut self) -> Direction {
        use Direction::*;

        let delta = self.target - self.actor.pos;
        if self.actor.current_direction == Hold {
            // Just released: pick a side
            self.actor.current_direction = if delta.x > 0.0 { Right } else { Left };
        }
        let current = self.actor.current_direction;

        if delta.x.abs() > delta.y.abs() {
            if delta.x > 0.0 {
                if current != Left {
                    Right
                } else if delta.y > 0.0 {
                    Down
                } else {
                    Up
                }
            } else if current != Right {
                Left
            } else if delta.y < 0.0 {
                Up
            } else {
                Down
            }
        } else if delta.y > 0.0 {
            if current != Up {
                Down
            } else if delta.x > 0.0 {
                Right
            } else {
                Left
            }
        } else if current != Down {
            Up
        } else if delta.x > 0.0 {
            Right
        } else {
            Left
        }
    }

    /// Fallback ordering for the current target quadrant
    pub fn fallback_order(&self) -> [Direction; 4] {
        let delta = self.target - self.actor.pos;
        let (tx, ty) = (delta.x, delta.y);
        let x_major = tx.abs() > ty.abs();
        let y_major = tx.abs() < ty.abs();
        let index = if tx > 0.0 && ty > 0.0 && x_major {
            0
        } else if tx > 0.0 && ty > 0.0 && y_major {
            4
        } else if tx < 0.0 && ty > 0.0 && x_major {
            1
        } else if tx < 0.0 && ty > 0.0 && y_major {
            5
        } else if tx > 0.0 && ty < 0.0 && x_major {
            2
        } else if tx > 0.0 && ty < 0.0 && y_major {
            6
        } else if tx < 0.0 && ty < 0.0 && x_major {
            3
        } else {
            7
        };
        FALLBACK_ORDERS[index]
    }

    fn try_step(&mut self, direction: Direction, maze: &MazeState) -> bool {
        if !movement::step(&mut self.actor, direction, maze, Traversal::Ghost) {
            return false;
        }
        if !matches!(self.mode, GhostMode::Frightened | GhostMode::Caught) {
            self.sprite = GhostSprite::Facing(direction);
        }
        true
    }

    /// Validate the proposed direction, falling back until a move succeeds:
    /// the guess, then the current direction, then the quadrant ordering
    /// (never reversing), and finally a forced reversal.
    pub fn move_with_fallback(&mut self, guess: Direction, maze: &MazeState) -> MoveStage {
        if self.try_step(guess, maze) {
            return MoveStage::Guess;
        }
        let current = self.actor.current_direction;
        if self.try_step(current, maze) {
            return MoveStage::Current;
        }
        let back = current.reverse();
        for direction in self.fallback_order() {
            if direction == back {
                continue;
            }
            if self.try_step(direction, maze) {
                return MoveStage::Ordered(direction);
            }
        }
        if self.try_step(back, maze) {
            MoveStage::Reversed
        } else {
            log::debug!("{:?} ghost boxed in at {}", self.kind, self.actor.pos);
            MoveStage::Stuck
        }
    }
}
