//! View lifetime tracking for asynchronous completions.
//!
//! A view creates a [`ViewLifetime`] when it mounts and ends it on cleanup.
//! Every spawned request captures a [`LiveToken`]; when the response arrives
//! the completion checks the token and drops the result if the view is gone.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone)]
pub struct ViewLifetime {
    alive: Arc<AtomicBool>,
}

impl ViewLifetime {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn token(&self) -> LiveToken {
        LiveToken {
            alive: self.alive.clone(),
        }
    }

    /// Marks the view as unmounted. Idempotent.
    pub fn end(&self) {
        self.alive.store(false, Ordering::Release);
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

impl Default for ViewLifetime {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct LiveToken {
    alive: Arc<AtomicBool>,
}

impl LiveToken {
    pub fn is_live(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Runs `apply` only while the view is still mounted.
    pub fn run<R>(&self, apply: impl FnOnce() -> R) -> Option<R> {
        self.is_live().then(apply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_follow_the_lifetime() {
        let lifetime = ViewLifetime::new();
        let token = lifetime.token();
        assert!(token.is_live());
        assert_eq!(token.run(|| 1), Some(1));

        lifetime.end();
        lifetime.end();
        assert!(!token.is_live());
        assert!(!lifetime.token().is_live());

        let mut applied = false;
        token.run(|| applied = true);
        assert!(!applied);
    }
}
