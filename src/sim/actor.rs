//! Moving actors: shared movement state and the player

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Movement intent / facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Hold,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// The four movement directions, in a stable order
    pub const MOVES: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Opposite direction (Hold stays Hold)
    pub fn reverse(self) -> Self {
        match self {
            Direction::Hold => Direction::Hold,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Unit step in screen space (y grows downward)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Hold => Vec2::ZERO,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
            Direction::Up => Vec2::NEG_Y,
            Direction::Down => Vec2::Y,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Movement state shared by the player and the ghosts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
    pub speed: f32,
    /// Speed for the current level (restored after fright/capture)
    pub base_speed: f32,
    pub current_direction: Direction,
    /// Set when `current_direction` changed on the last successful move
    pub direction_changed: bool,
}

impl Actor {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            speed,
            base_speed: speed,
            current_direction: Direction::Hold,
            direction_changed: false,
        }
    }

    /// Set speed (and base speed) to `percent` of `max_speed`.
    ///
    /// Values outside `[0, 100]` are rejected and the prior speed is kept.
    pub fn set_speed_percent(&mut self, max_speed: f32, percent: f32) -> bool {
        if !(0.0..=100.0).contains(&percent) {
            log::warn!("Rejected speed percentage {percent}");
            return false;
        }
        self.speed = max_speed * percent / 100.0;
        self.base_speed = self.speed;
        true
    }
}

/// Player sprite selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerSprite {
    /// Mouth closed
    Whole,
    /// Mouth open, facing a direction
    Open(Direction),
    /// Death animation frame (0-5)
    Dying(u8),
}

/// The player-controlled actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub actor: Actor,
    pub start_pos: Vec2,
    pub caught: bool,
    /// Counts down from `CAUGHT_ANIMATION_TICKS` once caught
    pub caught_timer: i32,
    pub sprite: PlayerSprite,
    frame_count: u32,
}

impl Player {
    pub fn new(start_pos: Vec2) -> Self {
        Self {
            actor: Actor::new(start_pos, PLAYER_MAX_SPEED),
            start_pos,
            caught: false,
            caught_timer: 0,
            sprite: PlayerSprite::Whole,
            frame_count: 0,
        }
    }

    /// Start the death animation
    pub fn set_caught(&mut self) {
        self.caught = true;
        self.caught_timer = CAUGHT_ANIMATION_TICKS;
        self.sprite = PlayerSprite::Whole;
    }

    /// Death animation has finished playing
    pub fn caught_finished(&self) -> bool {
        self.caught && self.caught_timer <= -6
    }

    pub fn return_to_start(&mut self) {
        self.actor.pos = self.start_pos;
        self.actor.speed = self.actor.base_speed;
        self.actor.current_direction = Direction::Hold;
        self.actor.direction_changed = false;
        self.caught = false;
        self.caught_timer = 0;
        self.sprite = PlayerSprite::Whole;
        self.frame_count = 0;
    }

    /// Advance the mouth or death animation by one tick
    pub fn animate(&mut self) {
        if self.caught {
            self.caught_timer -= 1;
            if self.caught_timer >= -6 && self.caught_timer % 6 == 0 {
                let frame = (5 - self.caught_timer.max(0) / 15).clamp(0, 5);
                self.sprite = PlayerSprite::Dying(frame as u8);
            }
            return;
        }

        let direction = self.actor.current_direction;
        if direction == Direction::Hold {
            self.sprite = PlayerSprite::Whole;
            return;
        }

        self.frame_count += 1;
        if self.frame_count > 10 || self.actor.direction_changed {
            self.frame_count = 0;
            self.actor.direction_changed = false;
            self.sprite = match self.sprite {
                PlayerSprite::Whole => PlayerSprite::Open(direction),
                _ => PlayerSprite::Whole,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_is_involution() {
        for dir in Direction::MOVES {
            assert_ne!(dir.reverse(), dir);
            assert_eq!(dir.reverse().reverse(), dir);
        }
        assert_eq!(Direction::Hold.reverse(), Direction::Hold);
    }

    #[test]
    fn test_speed_percent_rejects_out_of_range() {
        let mut actor = Actor::new(Vec2::ZERO, 3.0);
        assert!(actor.set_speed_percent(4.0, 50.0));
        assert_eq!(actor.speed, 2.0);
        assert!(!actor.set_speed_percent(4.0, 120.0));
        assert!(!actor.set_speed_percent(4.0, -1.0));
        assert_eq!(actor.speed, 2.0);
        assert_eq!(actor.base_speed, 2.0);
    }

    #[test]
    fn test_caught_animation_runs_to_completion() {
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        player.set_caught();
        let mut ticks = 0;
        while !player.caught_finished() {
            player.animate();
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert_eq!(ticks, CAUGHT_ANIMATION_TICKS + 6);
        assert_eq!(player.sprite, PlayerSprite::Dying(5));

        player.return_to_start();
        assert!(!player.caught);
        assert_eq!(player.actor.current_direction, Direction::Hold);
    }

    #[test]
    fn test_mouth_toggles_on_direction_change() {
        let mut player = Player::new(Vec2::ZERO);
        player.actor.current_direction = Direction::Left;
        player.actor.direction_changed = true;
        player.animate();
        assert_eq!(player.sprite, PlayerSprite::Open(Direction::Left));
        player.animate();
        assert_eq!(player.sprite, PlayerSprite::Open(Direction::Left));
    }
}
