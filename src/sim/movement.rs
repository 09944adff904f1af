//! Grid-constrained movement with wall collision
//!
//! Actors move freely along corridors but can only turn when they are close
//! enough to a grid line to be snapped onto it. A blocked move leaves the actor
//! flush against the wall it hit.

use glam::Vec2;

use super::actor::{Actor, Direction};
use super::geom::{Rect, snap_to_grid};
use super::maze::{MazeState, Traversal};
use crate::consts::*;

/// Try to move `actor` one step in `direction`.
///
/// Returns `true` if the move was committed. On a blocked move the actor is
/// pushed against the near edge of the first tile it hit and `false` is
/// returned; its facing is left unchanged.
pub fn attempt_move(
    actor: &mut Actor,
    direction: Direction,
    maze: &MazeState,
    traversal: Traversal,
) -> bool {
    if direction != actor.current_direction {
        actor.pos.x = snap_to_grid(actor.pos.x, actor.speed);
        actor.pos.y = snap_to_grid(actor.pos.y, actor.speed);
    }

    let candidate = actor.pos + direction.unit() * actor.speed;

    if let Some(tile) = maze.first_blocking(&Rect::cell(candidate), traversal) {
        actor.pos = push_out(candidate, direction, tile.pos);
        return false;
    }

    actor.pos = candidate;
    if actor.current_direction != direction {
        actor.current_direction = direction;
        actor.direction_changed = true;
    }
    true
}

/// Place `candidate` flush against the tile at `tile`, on the side chosen by
/// which half of its cell the candidate's coordinate falls in.
fn push_out(candidate: Vec2, direction: Direction, tile: Vec2) -> Vec2 {
    let half = GRID / 2.0;
    let mut pos = candidate;
    if direction.is_horizontal() {
        pos.x = if candidate.x.rem_euclid(GRID) > half {
            tile.x + GRID
        } else {
            tile.x - GRID
        };
    } else {
        pos.y = if candidate.y.rem_euclid(GRID) > half {
            tile.y + GRID
        } else {
            tile.y - GRID
        };
    }
    pos
}

/// Tunnel effect: leaving one side of the screen re-enters from the other.
///
/// Returns `true` if the actor was teleported.
pub fn wrap_tunnel(actor: &mut Actor) -> bool {
    if actor.pos.x < WRAP_LEFT {
        actor.pos.x = WRAP_RIGHT;
        true
    } else if actor.pos.x > WRAP_RIGHT {
        actor.pos.x = WRAP_LEFT;
        true
    } else {
        false
    }
}

/// Attempt a move and apply the tunnel wrap if it succeeded
pub fn step(actor: &mut Actor, direction: Direction, maze: &MazeState, traversal: Traversal) -> bool {
    if !attempt_move(actor, direction, maze, traversal) {
        return false;
    }
    wrap_tunnel(actor);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::maze::{Layout, layout_for_level};
    use proptest::prelude::*;

    // Corridor along row 1 with a side opening down at column 3
    const CORRIDOR: &str = "\
XXXXXXXX
X     YX
XXX XXXX
XXX XXXX
XBPIC  X
XXXXXXXX
";

    fn corridor() -> MazeState {
        MazeState::from_layout(&Layout::parse(CORRIDOR, 0).unwrap())
    }

    #[test]
    fn test_move_along_open_corridor() {
        let maze = corridor();
        let mut actor = Actor::new(Vec2::new(60.0, 60.0), 3.0);
        assert!(attempt_move(&mut actor, Direction::Right, &maze, Traversal::Player));
        assert_eq!(actor.pos, Vec2::new(63.0, 60.0));
        assert_eq!(actor.current_direction, Direction::Right);
        assert!(actor.direction_changed);
    }

    #[test]
    fn test_blocked_move_pushes_flush() {
        let maze = corridor();
        // Wall at column 7 starts at x = 160
        let mut actor = Actor::new(Vec2::new(139.0, 60.0), 3.0);
        actor.current_direction = Direction::Right;
        assert!(!attempt_move(&mut actor, Direction::Right, &maze, Traversal::Player));
        assert_eq!(actor.pos, Vec2::new(140.0, 60.0));

        // Left wall at column 0 ends at x = 40
        let mut actor = Actor::new(Vec2::new(41.0, 60.0), 3.0);
        actor.current_direction = Direction::Left;
        assert!(!attempt_move(&mut actor, Direction::Left, &maze, Traversal::Player));
        assert_eq!(actor.pos, Vec2::new(40.0, 60.0));
        assert_eq!(actor.current_direction, Direction::Left);
    }

    #[test]
    fn test_turn_only_near_intersection() {
        let maze = corridor();
        // Opening below column 3 is at x = 80; too far away to snap
        let mut actor = Actor::new(Vec2::new(90.0, 60.0), 3.0);
        actor.current_direction = Direction::Left;
        assert!(!attempt_move(&mut actor, Direction::Down, &maze, Traversal::Player));
        assert_eq!(actor.current_direction, Direction::Left);

        // Within the 2 px window the actor snaps onto the line and turns
        let mut actor = Actor::new(Vec2::new(81.5, 60.0), 3.0);
        actor.current_direction = Direction::Left;
        assert!(attempt_move(&mut actor, Direction::Down, &maze, Traversal::Player));
        assert_eq!(actor.pos, Vec2::new(80.0, 63.0));
        assert_eq!(actor.current_direction, Direction::Down);
    }

    #[test]
    fn test_tunnel_wrap() {
        let mut actor = Actor::new(Vec2::new(1.0, 240.0), 3.0);
        assert!(wrap_tunnel(&mut actor));
        assert_eq!(actor.pos.x, WRAP_RIGHT);
        actor.pos.x = WRAP_RIGHT + 1.0;
        assert!(wrap_tunnel(&mut actor));
        assert_eq!(actor.pos.x, WRAP_LEFT);
        actor.pos.x = 200.0;
        assert!(!wrap_tunnel(&mut actor));
    }

    proptest! {
        #[test]
        fn prop_player_never_overlaps_walls(moves in proptest::collection::vec(0usize..5, 1..600)) {
            let (text, style) = layout_for_level(1);
            let layout = Layout::parse(text, style).unwrap();
            let maze = MazeState::from_layout(&layout);
            let mut actor = Actor::new(layout.player_start, PLAYER_MAX_SPEED * 0.75);
            let choices = [
                Direction::Hold,
                Direction::Left,
                Direction::Right,
                Direction::Up,
                Direction::Down,
            ];
            for index in moves {
                let dir = choices[index];
                if !step(&mut actor, dir, &maze, Traversal::Player) {
                    let current = actor.current_direction;
                    step(&mut actor, current, &maze, Traversal::Player);
                }
                prop_assert!(!maze.is_blocked(&Rect::cell(actor.pos), Traversal::Player));
            }
        }
    }
}
