//! High score persistence
//!
//! A single best score stored as a plain-text integer.

use std::path::Path;

/// Best score seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Read the high score; a missing or corrupt file counts as zero
    pub fn load_from(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("High score file {} unreadable ({e}), starting at 0", path.display());
                return Self::default();
            }
        };
        match text.trim().parse::<u64>() {
            Ok(best) => {
                log::info!("Loaded high score {best}");
                Self { best }
            }
            Err(e) => {
                log::warn!("Corrupt high score file {} ({e}), starting at 0", path.display());
                Self::default()
            }
        }
    }

    /// Check if a score beats the stored one
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a final score, writing the file only when it is a new best.
    /// Returns whether the score was a new high score.
    pub fn confirm(&mut self, score: u64, path: &Path) -> std::io::Result<bool> {
        if !self.qualifies(score) {
            return Ok(false);
        }
        self.best = score;
        std::fs::write(path, score.to_string())?;
        log::info!("New high score {score} saved");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("maze_chase_hs_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_qualifies() {
        let hs = HighScore::new(500);
        assert!(!hs.qualifies(0));
        assert!(!hs.qualifies(500));
        assert!(hs.qualifies(501));
    }

    #[test]
    fn test_confirm_writes_only_new_best() {
        let path = temp_path("confirm.txt");
        let mut hs = HighScore::default();
        assert!(hs.confirm(1200, &path).unwrap());
        assert_eq!(HighScore::load_from(&path).best, 1200);

        assert!(!hs.confirm(800, &path).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1200");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_or_corrupt_is_zero() {
        assert_eq!(HighScore::load_from(&temp_path("missing.txt")).best, 0);

        let path = temp_path("corrupt.txt");
        std::fs::write(&path, "lots").unwrap();
        assert_eq!(HighScore::load_from(&path).best, 0);
        std::fs::write(&path, " 4200\n").unwrap();
        assert_eq!(HighScore::load_from(&path).best, 4200);
        let _ = std::fs::remove_file(&path);
    }
}
