//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically. Each tick
//! runs in a fixed order: player input and movement, level-clear check,
//! player/ghost collisions, mode timers, collectibles, then ghost AI and
//! ghost movement. Draw events for every entity are queued at the end.

use super::actor::Direction;
use super::collectible::{Collectible, CollectibleKind};
use super::geom::Rect;
use super::ghost::{AiContext, GhostMode};
use super::maze::Traversal;
use super::movement;
use super::schedule::ScheduleChange;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Requested direction; Hold keeps the previously requested one
    pub direction: Direction,
}

impl TickInput {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.time_ticks += 1;
    advance(state, input);
    if state.phase != GamePhase::GameOver {
        state.emit_draw_events();
    }
}

fn advance(state: &mut GameState, input: &TickInput) {
    if state.player.caught_finished() {
        if state.lives == 0 {
            state.phase = GamePhase::GameOver;
            log::info!("Game over: score {} on level {}", state.score, state.level);
            state.push_event(GameEvent::GameOver {
                score: state.score,
                level: state.level,
            });
        } else {
            state.reset_after_life_lost();
        }
        return;
    }

    if state.phase != GamePhase::LevelCleared {
        move_player(state, input);
        state.player.animate();
    }

    if state.player.caught {
        return;
    }

    if state.collectibles.is_empty() {
        run_level_clear(state);
        return;
    }

    resolve_ghost_contacts(state);
    advance_schedule(state);
    update_collectibles(state);
    move_ghosts(state);
}

fn move_player(state: &mut GameState, input: &TickInput) {
    if input.direction != Direction::Hold {
        state.next_direction = input.direction;
    }
    let wanted = state.next_direction;
    if wanted == Direction::Hold || state.player.caught {
        return;
    }
    let actor = &mut state.player.actor;
    if !movement::step(actor, wanted, &state.maze, Traversal::Player) {
        let current = actor.current_direction;
        movement::step(actor, current, &state.maze, Traversal::Player);
    }
}

fn run_level_clear(state: &mut GameState) {
    if state.phase != GamePhase::LevelCleared {
        state.phase = GamePhase::LevelCleared;
        state.level_clear_ticks = LEVEL_CLEAR_TICKS;
        log::info!("Level {} cleared", state.level);
        state.push_event(GameEvent::LevelComplete { level: state.level });
    }
    state.level_clear_ticks = state.level_clear_ticks.saturating_sub(1);
    if state.level_clear_ticks == 0 {
        state.advance_level();
    }
}

fn resolve_ghost_contacts(state: &mut GameState) {
    let player_rect = Rect::cell(state.player.actor.pos);
    for i in 0..state.ghosts.len() {
        if !Rect::cell(state.ghosts[i].pos()).overlaps(&player_rect) {
            continue;
        }
        match state.ghosts[i].mode {
            GhostMode::Frightened => {
                let score = state.scheduler.capture_score();
                state.award(score);
                let ghost = &mut state.ghosts[i];
                ghost.return_to_pen();
                let (kind, pos) = (ghost.kind, ghost.pos());
                state.push_event(GameEvent::GhostCaptured { kind, score });
                state.push_event(GameEvent::ScorePopup { score, pos });
            }
            GhostMode::Caught => {}
            _ if !state.player.caught => {
                state.player.set_caught();
                state.lives = state.lives.saturating_sub(1);
                log::debug!("Player caught by {:?}, {} lives left", state.ghosts[i].kind, state.lives);
                state.push_event(GameEvent::LifeLost {
                    lives_left: state.lives,
                });
            }
            _ => {}
        }
    }
}

fn advance_schedule(state: &mut GameState) {
    let Some(change) = state.scheduler.advance() else {
        return;
    };
    for ghost in &mut state.ghosts {
        match change {
            ScheduleChange::FrightOver => ghost.set_default_mode(false),
            ScheduleChange::ToScatter => ghost.set_scatter_mode(),
            ScheduleChange::ToChase => ghost.set_default_mode(true),
        }
    }
}

fn update_collectibles(state: &mut GameState) {
    let player_rect = Rect::cell(state.player.actor.pos);
    let mut eaten = Vec::new();
    state.collectibles.retain_mut(|c| {
        let expired = c.tick_display();
        if c.rect().overlaps(&player_rect) {
            eaten.push(c.clone());
            return false;
        }
        !expired
    });

    for collectible in eaten {
        eat(state, &collectible);
    }
}

fn eat(state: &mut GameState, collectible: &Collectible) {
    state.award(collectible.score);
    state.dots_eaten += 1;
    for ghost in &mut state.ghosts {
        ghost.reduce_delay();
    }

    match collectible.kind {
        CollectibleKind::Energiser => {
            for ghost in &mut state.ghosts {
                ghost.set_frightened_mode();
            }
            state.scheduler.start_fright();
            state.push_event(GameEvent::EnergiserEaten);
        }
        CollectibleKind::Fruit { .. } => {
            let score = collectible.score;
            state.push_event(GameEvent::FruitEaten { score });
            state.push_event(GameEvent::ScorePopup {
                score,
                pos: collectible.pos,
            });
        }
        CollectibleKind::Dot => {}
    }

    if FRUIT_THRESHOLDS.contains(&state.dots_eaten) {
        let id = state.next_entity_id();
        let fruit = Collectible::fruit(id, state.maze.fruit_pos, state.level);
        log::debug!("Bonus fruit {:?} spawned", fruit.kind);
        state.collectibles.push(fruit);
    }
}

fn move_ghosts(state: &mut GameState) {
    let ctx = AiContext {
        player_pos: state.player.actor.pos,
        player_facing: state.player.actor.current_direction,
        pen_exit: state.maze.pen_exit,
        fright_remaining: state.scheduler.fright_timer,
    };
    for ghost in &mut state.ghosts {
        let guess = ghost.propose_direction(&ctx, &mut state.rng);
        let stage = guess.map(|guess| ghost.move_with_fallback(guess, &state.maze));
        ghost.last_move = stage;
    }
}
