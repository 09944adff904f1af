//! Shared mode scheduling: chase/scatter alternation and the fright override
//!
//! Exactly one countdown is live at a time. While `fright_timer` is positive
//! it governs; otherwise `mode_timer` does.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::Settings;

/// Mode the ghosts are scheduled into outside of a fright
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledMode {
    Chase,
    Scatter,
}

/// The countdown currently driving the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveTimer {
    Mode,
    Fright,
}

/// Result of advancing the scheduler by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleChange {
    ToScatter,
    ToChase,
    FrightOver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeScheduler {
    pub chase_length: u32,
    pub scatter_length: u32,
    pub fright_length: u32,
    pub mode_timer: u32,
    pub scatter_count: u32,
    pub current: ScheduledMode,
    pub fright_timer: u32,
    /// Ghosts captured during the current fright
    pub ghosts_eaten: u32,
}

impl ModeScheduler {
    pub fn new(settings: &Settings) -> Self {
        let chase_length = settings.chase_ticks();
        Self {
            chase_length,
            scatter_length: settings.scatter_ticks(),
            fright_length: settings.fright_ticks(),
            mode_timer: chase_length,
            scatter_count: 0,
            current: ScheduledMode::Chase,
            fright_timer: 0,
            ghosts_eaten: 0,
        }
    }

    /// Reset per-level counters (lengths are kept)
    pub fn start_level(&mut self) {
        self.scatter_count = 0;
        self.ghosts_eaten = 0;
        self.current = ScheduledMode::Chase;
        self.mode_timer = self.chase_length;
        self.fright_timer = 0;
    }

    /// Lengthen chase and shorten scatter/fright for the next level
    pub fn advance_level(&mut self) {
        self.chase_length += CHASE_GROWTH_PER_LEVEL;
        if self.scatter_length > SCATTER_FLOOR_TICKS {
            self.scatter_length = self
                .scatter_length
                .saturating_sub(SCATTER_SHRINK_PER_LEVEL)
                .max(SCATTER_FLOOR_TICKS);
        }
        if self.fright_length > FRIGHT_FLOOR_TICKS {
            self.fright_length = self
                .fright_length
                .saturating_sub(FRIGHT_SHRINK_PER_LEVEL)
                .max(FRIGHT_FLOOR_TICKS);
        }
        self.start_level();
    }

    pub fn live_timer(&self) -> LiveTimer {
        if self.fright_timer > 0 {
            LiveTimer::Fright
        } else {
            LiveTimer::Mode
        }
    }

    /// (Re)start the shared fright countdown; capture scoring starts over
    pub fn start_fright(&mut self) {
        self.fright_timer = self.fright_length;
        self.ghosts_eaten = 0;
        log::debug!("Fright started for {} ticks", self.fright_length);
    }

    /// End any fright immediately and resume chasing
    pub fn end_fright(&mut self) {
        self.fright_timer = 0;
        self.ghosts_eaten = 0;
        self.current = ScheduledMode::Chase;
        self.mode_timer = self.chase_length;
    }

    /// Record a capture and return the score it is worth
    pub fn capture_score(&mut self) -> u64 {
        self.ghosts_eaten += 1;
        let index = (self.ghosts_eaten as usize - 1).min(CAPTURE_SCORES.len() - 1);
        CAPTURE_SCORES[index]
    }

    /// Advance whichever countdown is live by one tick
    pub fn advance(&mut self) -> Option<ScheduleChange> {
        if self.live_timer() == LiveTimer::Fright {
            self.fright_timer -= 1;
            if self.fright_timer == 0 {
                self.end_fright();
                log::debug!("Fright over");
                return Some(ScheduleChange::FrightOver);
            }
            return None;
        }

        self.mode_timer = self.mode_timer.saturating_sub(1);
        if self.mode_timer > 0 {
            return None;
        }

        match self.current {
            ScheduledMode::Chase if self.scatter_count < MAX_SCATTERS_PER_LEVEL => {
                self.scatter_count += 1;
                self.current = ScheduledMode::Scatter;
                self.mode_timer = self.scatter_length;
                log::debug!("Scatter phase {} started", self.scatter_count);
                Some(ScheduleChange::ToScatter)
            }
            // Scatters used up: keep chasing without a toggle
            ScheduledMode::Chase => {
                self.mode_timer = self.chase_length;
                None
            }
            ScheduledMode::Scatter => {
                self.current = ScheduledMode::Chase;
                self.mode_timer = self.chase_length;
                log::debug!("Chase phase started");
                Some(ScheduleChange::ToChase)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> ModeScheduler {
        ModeScheduler::new(&Settings::default())
    }

    #[test]
    fn test_alternates_and_caps_scatters() {
        let mut s = scheduler();
        let mut changes = Vec::new();
        let total = (CHASE_TICKS + SCATTER_TICKS) * 5;
        for _ in 0..total {
            if let Some(change) = s.advance() {
                changes.push(change);
            }
        }
        let scatters = changes
            .iter()
            .filter(|c| **c == ScheduleChange::ToScatter)
            .count();
        assert_eq!(scatters, 3);
        assert_eq!(changes[0], ScheduleChange::ToScatter);
        assert_eq!(changes[1], ScheduleChange::ToChase);
        assert_eq!(changes.len(), 6);
        assert_eq!(s.current, ScheduledMode::Chase);
    }

    #[test]
    fn test_chase_expiry_after_last_scatter_is_not_a_toggle() {
        let mut s = scheduler();
        s.scatter_count = MAX_SCATTERS_PER_LEVEL;
        s.mode_timer = 1;
        assert_eq!(s.advance(), None);
        assert_eq!(s.current, ScheduledMode::Chase);
        assert_eq!(s.mode_timer, s.chase_length);
        assert_eq!(s.scatter_count, MAX_SCATTERS_PER_LEVEL);
    }

    #[test]
    fn test_fright_overrides_mode_timer() {
        let mut s = scheduler();
        s.advance();
        let mode_before = s.mode_timer;
        s.start_fright();
        assert_eq!(s.live_timer(), LiveTimer::Fright);
        for _ in 0..FRIGHT_TICKS - 1 {
            assert_eq!(s.advance(), None);
        }
        assert_eq!(s.mode_timer, mode_before);
        assert_eq!(s.advance(), Some(ScheduleChange::FrightOver));
        assert_eq!(s.live_timer(), LiveTimer::Mode);
        assert_eq!(s.mode_timer, s.chase_length);
    }

    #[test]
    fn test_capture_scores_cap_at_fourth() {
        let mut s = scheduler();
        s.start_fright();
        let scores: Vec<u64> = (0..5).map(|_| s.capture_score()).collect();
        assert_eq!(scores, vec![200, 400, 800, 1600, 1600]);
        s.start_fright();
        assert_eq!(s.capture_score(), 200);
    }

    #[test]
    fn test_level_lengths_adjust_with_floor() {
        let mut s = scheduler();
        s.advance_level();
        assert_eq!(s.chase_length, CHASE_TICKS + CHASE_GROWTH_PER_LEVEL);
        assert_eq!(s.scatter_length, SCATTER_TICKS - SCATTER_SHRINK_PER_LEVEL);
        assert_eq!(s.fright_length, FRIGHT_TICKS - FRIGHT_SHRINK_PER_LEVEL);
        for _ in 0..50 {
            s.advance_level();
        }
        assert_eq!(s.scatter_length, SCATTER_FLOOR_TICKS);
        assert_eq!(s.fright_length, FRIGHT_FLOOR_TICKS);
        assert_eq!(s.scatter_count, 0);
    }
}
