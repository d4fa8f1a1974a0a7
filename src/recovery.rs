//! Recovery decisions for runtime faults in the page shell.
//!
//! Failures to load a code chunk usually mean a new build was deployed while the page
//! was open; those get an automatic reload, with retries counted per [`ChunkRecovery`]
//! instance and spaced by its [`Backoff`]. Anything else gets a retry affordance.

use log::{info, warn};
use std::time::Duration;

const CHUNK_ERROR_PATTERNS: [&str; 5] = [
    "loading chunk",
    "chunkloaderror",
    "loading css chunk",
    "failed to fetch dynamically imported module",
    "importing a module script failed",
];

/// Whether `message` describes a failed load of a stale bundle chunk.
pub fn is_chunk_load_error(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    CHUNK_ERROR_PATTERNS.iter().any(|p| message.contains(p))
}

/// Delay before a reload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    Fixed(Duration),
    /// `base * 2^attempt`, never more than `max`.
    Exponential { base: Duration, max: Duration },
}

impl Backoff {
    /// Delay before attempt number `attempt` (0-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        match *self {
            Backoff::Fixed(delay) => delay,
            Backoff::Exponential { base, max } => {
                let factor = 2u32.saturating_pow(attempt);
                base.saturating_mul(factor).min(max)
            }
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff::Exponential {
            base: Duration::from_millis(500),
            max: Duration::from_secs(8),
        }
    }
}

/// What the shell should do about an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Reload the page after the delay.
    Reload { after: Duration },
    /// Show the error with a retry button.
    ShowRetry,
    /// Chunk reloads are exhausted; show the error with a manual reload button.
    GiveUp,
}

/// Tracks reload attempts for one page session.
#[derive(Debug, Clone)]
pub struct ChunkRecovery {
    max_retries: u32,
    backoff: Backoff,
    attempts: u32,
}

impl ChunkRecovery {
    pub fn new(max_retries: u32, backoff: Backoff) -> Self {
        Self {
            max_retries,
            backoff,
            attempts: 0,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Decides how to react to an error and records the attempt when it is a reload.
    pub fn on_error(&mut self, message: &str) -> RecoveryAction {
        if !is_chunk_load_error(message) {
            return RecoveryAction::ShowRetry;
        }
        if self.attempts >= self.max_retries {
            warn!("Chunk load failed after {} reload(s); giving up", self.attempts);
            return RecoveryAction::GiveUp;
        }
        let after = self.backoff.delay(self.attempts);
        self.attempts += 1;
        info!(
            "Stale chunk detected; reload {}/{} in {:?}",
            self.attempts, self.max_retries, after
        );
        RecoveryAction::Reload { after }
    }

    /// Call after a successful load.
    pub fn reset(&mut self) {
        self.attempts = 0;
    }
}

impl Default for ChunkRecovery {
    fn default() -> Self {
        Self::new(3, Backoff::default())
    }
}
