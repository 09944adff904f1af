//! Game settings
//!
//! Tunable rules persisted as JSON. Compile-time tables live in `consts`.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Rejected settings value
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// Speed percentage outside [0, 100]
    SpeedPercentOutOfRange(f32),
    /// Start lives must be in 1..=max_lives
    StartLivesOutOfRange { value: u8, max: u8 },
    /// Max lives must be at least 1 and not below start lives
    MaxLivesOutOfRange { value: u8, start: u8 },
    /// Extra-life interval must be positive
    ZeroExtraLifeInterval,
    /// Phase lengths must be positive and finite
    InvalidDuration { field: &'static str, value: f32 },
    /// Full-speed level must be at least 1
    InvalidFullSpeedLevel(u32),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::SpeedPercentOutOfRange(v) => {
                write!(f, "speed percentage {v} is outside 0..=100")
            }
            SettingsError::StartLivesOutOfRange { value, max } => {
                write!(f, "start lives {value} must be between 1 and {max}")
            }
            SettingsError::MaxLivesOutOfRange { value, start } => {
                write!(f, "max lives {value} must be at least {start}")
            }
            SettingsError::ZeroExtraLifeInterval => write!(f, "extra-life interval must be positive"),
            SettingsError::InvalidDuration { field, value } => {
                write!(f, "{field} must be a positive number of seconds, got {value}")
            }
            SettingsError::InvalidFullSpeedLevel(v) => {
                write!(f, "full-speed level {v} must be at least 1")
            }
        }
    }
}

impl std::error::Error for SettingsError {}

/// Game rules that can be changed without recompiling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Lives ===
    pub start_lives: u8,
    pub max_lives: u8,
    /// Points between extra lives
    pub extra_life_interval: u64,

    // === Mode schedule (level 1 lengths) ===
    pub chase_seconds: f32,
    pub scatter_seconds: f32,
    pub fright_seconds: f32,

    // === Speed ===
    /// Level at which actors reach full speed; earlier levels lose 5% per level
    pub full_speed_level: u32,
    /// Global speed scale applied on top of the level ramp (0 - 100)
    pub speed_percent: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_lives: START_LIVES,
            max_lives: MAX_LIVES,
            extra_life_interval: EXTRA_LIFE_INTERVAL,

            chase_seconds: CHASE_TICKS as f32 / TICK_RATE as f32,
            scatter_seconds: SCATTER_TICKS as f32 / TICK_RATE as f32,
            fright_seconds: FRIGHT_TICKS as f32 / TICK_RATE as f32,

            full_speed_level: 6,
            speed_percent: 100.0,
        }
    }
}

fn seconds_to_ticks(seconds: f32) -> u32 {
    (seconds * TICK_RATE as f32).round().max(1.0) as u32
}

fn check_duration(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::InvalidDuration { field, value })
    }
}

impl Settings {
    pub fn chase_ticks(&self) -> u32 {
        seconds_to_ticks(self.chase_seconds)
    }

    pub fn scatter_ticks(&self) -> u32 {
        seconds_to_ticks(self.scatter_seconds)
    }

    pub fn fright_ticks(&self) -> u32 {
        seconds_to_ticks(self.fright_seconds)
    }

    pub fn set_speed_percent(&mut self, percent: f32) -> Result<(), SettingsError> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(SettingsError::SpeedPercentOutOfRange(percent));
        }
        self.speed_percent = percent;
        Ok(())
    }

    pub fn set_start_lives(&mut self, lives: u8) -> Result<(), SettingsError> {
        if lives == 0 || lives > self.max_lives {
            return Err(SettingsError::StartLivesOutOfRange {
                value: lives,
                max: self.max_lives,
            });
        }
        self.start_lives = lives;
        Ok(())
    }

    pub fn set_max_lives(&mut self, lives: u8) -> Result<(), SettingsError> {
        if lives == 0 || lives < self.start_lives {
            return Err(SettingsError::MaxLivesOutOfRange {
                value: lives,
                start: self.start_lives,
            });
        }
        self.max_lives = lives;
        Ok(())
    }

    pub fn set_extra_life_interval(&mut self, points: u64) -> Result<(), SettingsError> {
        if points == 0 {
            return Err(SettingsError::ZeroExtraLifeInterval);
        }
        self.extra_life_interval = points;
        Ok(())
    }

    pub fn set_chase_seconds(&mut self, seconds: f32) -> Result<(), SettingsError> {
        check_duration("chase_seconds", seconds)?;
        self.chase_seconds = seconds;
        Ok(())
    }

    pub fn set_scatter_seconds(&mut self, seconds: f32) -> Result<(), SettingsError> {
        check_duration("scatter_seconds", seconds)?;
        self.scatter_seconds = seconds;
        Ok(())
    }

    pub fn set_fright_seconds(&mut self, seconds: f32) -> Result<(), SettingsError> {
        check_duration("fright_seconds", seconds)?;
        self.fright_seconds = seconds;
        Ok(())
    }

    pub fn set_full_speed_level(&mut self, level: u32) -> Result<(), SettingsError> {
        if level == 0 {
            return Err(SettingsError::InvalidFullSpeedLevel(level));
        }
        self.full_speed_level = level;
        Ok(())
    }

    /// Check every field against its setter's rules
    pub fn validate(&self) -> Result<(), SettingsError> {
        let mut checked = Self::default();
        checked.set_max_lives(self.max_lives.max(checked.start_lives))?;
        checked.set_start_lives(self.start_lives)?;
        checked.set_max_lives(self.max_lives)?;
        checked.set_extra_life_interval(self.extra_life_interval)?;
        checked.set_chase_seconds(self.chase_seconds)?;
        checked.set_scatter_seconds(self.scatter_seconds)?;
        checked.set_fright_seconds(self.fright_seconds)?;
        checked.set_full_speed_level(self.full_speed_level)?;
        checked.set_speed_percent(self.speed_percent)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Settings file {} unreadable ({e}), using defaults", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str::<Self>(&json) {
            Ok(settings) => match settings.validate() {
                Ok(()) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {} ({e}), using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Corrupt settings file {} ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("maze_chase_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_defaults_match_constants() {
        let settings = Settings::default();
        assert_eq!(settings.chase_ticks(), CHASE_TICKS);
        assert_eq!(settings.scatter_ticks(), SCATTER_TICKS);
        assert_eq!(settings.fright_ticks(), FRIGHT_TICKS);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejected_values_keep_prior() {
        let mut settings = Settings::default();
        assert_eq!(
            settings.set_speed_percent(120.0),
            Err(SettingsError::SpeedPercentOutOfRange(120.0))
        );
        assert_eq!(settings.speed_percent, 100.0);
        assert!(settings.set_speed_percent(-1.0).is_err());
        assert!(settings.set_speed_percent(50.0).is_ok());
        assert_eq!(settings.speed_percent, 50.0);

        assert!(settings.set_start_lives(0).is_err());
        assert!(settings.set_start_lives(MAX_LIVES + 1).is_err());
        assert_eq!(settings.start_lives, START_LIVES);

        assert!(settings.set_fright_seconds(0.0).is_err());
        assert!(settings.set_chase_seconds(f32::NAN).is_err());
        assert_eq!(settings.fright_ticks(), FRIGHT_TICKS);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = temp_path("settings.json");
        let mut settings = Settings::default();
        settings.set_fright_seconds(4.0).unwrap();
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path);
        assert_eq!(loaded, settings);
        assert_eq!(loaded.fright_ticks(), 240);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_or_corrupt_file_gives_defaults() {
        let missing = temp_path("missing.json");
        assert_eq!(Settings::load_from(&missing), Settings::default());

        let corrupt = temp_path("corrupt.json");
        std::fs::write(&corrupt, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&corrupt), Settings::default());

        let invalid = temp_path("invalid.json");
        std::fs::write(&invalid, r#"{ "speed_percent": 250.0 }"#).unwrap();
        assert_eq!(Settings::load_from(&invalid), Settings::default());

        let _ = std::fs::remove_file(&corrupt);
        let _ = std::fs::remove_file(&invalid);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "start_lives": 2 }"#).unwrap();
        assert_eq!(settings.start_lives, 2);
        assert_eq!(settings.max_lives, MAX_LIVES);
    }
}
