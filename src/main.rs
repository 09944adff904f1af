//! Headless runner: plays the simulation with a simple autopilot and logs events.
//!
//! Usage:
//!   RUST_LOG=info cargo run --release -- --seed 7 --max-ticks 20000

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use glam::Vec2;
use maze_chase::sim::{Direction, GameEvent, GameState, TickInput, tick};
use maze_chase::{HighScore, Settings};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

#[derive(Parser)]
#[command(name = "maze-chase")]
#[command(about = "Run the maze-chase simulation headless with an autopilot player")]
struct Args {
    /// Game seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Stop after this many ticks even if the game is still running
    #[arg(long, default_value_t = 60 * 60 * 10)]
    max_ticks: u64,

    /// Custom maze layout (text grid) used for every level
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// High score file
    #[arg(long, default_value = "highscore.txt")]
    high_score: PathBuf,
}

/// Steers toward the nearest collectible; takes a random turn after stalling
struct Autopilot {
    rng: Pcg32,
    last_pos: Vec2,
    detour: Option<(Direction, u32)>,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed ^ 0x5eed_a070),
            last_pos: Vec2::NAN,
            detour: None,
        }
    }

    fn next_input(&mut self, state: &GameState) -> TickInput {
        let pos = state.player.actor.pos;
        let stalled = pos == self.last_pos;
        self.last_pos = pos;

        if let Some((direction, ticks)) = self.detour.as_mut() {
            if *ticks > 0 && !stalled {
                *ticks -= 1;
                return TickInput::new(*direction);
            }
            self.detour = None;
        }

        if stalled {
            let direction = Direction::MOVES[self.rng.random_range(0..Direction::MOVES.len())];
            self.detour = Some((direction, self.rng.random_range(10..40)));
            return TickInput::new(direction);
        }

        let nearest = state
            .collectibles
            .iter()
            .min_by(|a, b| a.pos.distance_squared(pos).total_cmp(&b.pos.distance_squared(pos)));
        let Some(target) = nearest else {
            return TickInput::default();
        };
        let delta = target.pos - pos;
        let direction = if delta.x.abs() > delta.y.abs() {
            if delta.x < 0.0 { Direction::Left } else { Direction::Right }
        } else if delta.y < 0.0 {
            Direction::Up
        } else {
            Direction::Down
        };
        TickInput::new(direction)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };

    let mut state = match &args.layout {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read layout {}", path.display()))?;
            GameState::with_layouts(args.seed, settings, &[text.as_str()])
                .map_err(|e| anyhow!("layout {} rejected: {e}", path.display()))?
        }
        None => GameState::new(args.seed, settings).context("built-in layout rejected")?,
    };

    let mut high_score = HighScore::load_from(&args.high_score);
    let mut autopilot = Autopilot::new(args.seed);
    log::info!("Maze chase (headless) seed {} high score {}", args.seed, high_score.best);

    while state.time_ticks < args.max_ticks && !state.is_game_over() {
        let input = autopilot.next_input(&state);
        tick(&mut state, &input);
        for event in state.drain_events() {
            match event {
                GameEvent::Draw { .. } => {}
                GameEvent::GameOver { score, level } => {
                    log::info!("Game over at tick {}: score {score}, level {level}", state.time_ticks);
                }
                other => log::debug!("tick {}: {other:?}", state.time_ticks),
            }
        }
    }

    println!("Seed:   {}", args.seed);
    println!("Ticks:  {}", state.time_ticks);
    println!("Level:  {}", state.level);
    println!("Score:  {}", state.score);
    println!("Lives:  {}", state.lives);

    if state.is_game_over() {
        let is_new = high_score
            .confirm(state.score, &args.high_score)
            .with_context(|| format!("failed to save high score to {}", args.high_score.display()))?;
        if is_new {
            println!("New high score!");
        }
    }
    Ok(())
}
