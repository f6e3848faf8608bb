//! Request generations: each new translation request supersedes the previous
//! one, so a slow stale response can never overwrite a newer result.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

pub struct RequestGenerations {
    generation: Arc<AtomicU64>,
    current_token: Mutex<CancellationToken>,
}

impl RequestGenerations {
    pub fn new() -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            current_token: Mutex::new(CancellationToken::new()),
        }
    }

    /// Cancel the in-flight request, advance the generation and hand out its guard
    pub fn begin(&self) -> GenerationGuard {
        let mut token_guard = self.current_token.lock();
        token_guard.cancel();
        let token = CancellationToken::new();
        *token_guard = token.clone();
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        GenerationGuard {
            generation: Arc::clone(&self.generation),
            my_generation,
            token,
        }
    }

    pub fn current(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }

    /// Cancel whatever is in flight without advancing
    pub fn cancel_all(&self) {
        self.current_token.lock().cancel();
    }
}

impl Default for RequestGenerations {
    fn default() -> Self {
        Self::new()
    }
}

/// Checked by a request task before its result is delivered
#[derive(Clone)]
pub struct GenerationGuard {
    generation: Arc<AtomicU64>,
    my_generation: u64,
    token: CancellationToken,
}

impl GenerationGuard {
    #[inline]
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.my_generation
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    #[inline]
    pub fn should_deliver(&self) -> bool {
        !self.is_cancelled() && self.is_current()
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn my_generation(&self) -> u64 {
        self.my_generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_request_supersedes_older() {
        let generations = RequestGenerations::new();

        let first = generations.begin();
        assert_eq!(first.my_generation(), 1);
        assert!(first.should_deliver());

        let second = generations.begin();
        assert_eq!(second.my_generation(), 2);
        assert!(first.is_cancelled());
        assert!(!first.is_current());
        assert!(!first.should_deliver());
        assert!(second.should_deliver());

        assert!(generations.is_current(2));
        assert!(!generations.is_current(1));
    }

    #[test]
    fn cancel_all_keeps_generation() {
        let generations = RequestGenerations::new();
        let guard = generations.begin();
        generations.cancel_all();

        assert!(guard.is_cancelled());
        assert!(guard.is_current());
        assert!(!guard.should_deliver());
        assert_eq!(generations.current(), 1);
    }
}
