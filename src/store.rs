//! High-score persistence — one decimal integer in a dot-file.

use std::fs;
use std::path::PathBuf;

/// Durable store for the single high-score value.  The default location
/// is a dot-file in the user's home directory; tests point it at a
/// temporary path instead.
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_location() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        Self::new(PathBuf::from(home).join(".flappy_term_score"))
    }

    /// Missing or malformed contents count as "no high score yet".
    pub fn load(&self) -> u32 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Write failures are ignored.
    pub fn save(&self, score: u32) {
        let _ = fs::write(&self.path, score.to_string());
    }
}
