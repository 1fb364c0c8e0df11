use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared "logged out" flag, flipped by the gateway on a 401.
#[derive(Debug, Clone, Default)]
pub struct Session {
    logged_out: Arc<AtomicBool>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_out(&self) -> bool {
        self.logged_out.load(Ordering::SeqCst)
    }

    pub fn mark_logged_out(&self) {
        self.logged_out.store(true, Ordering::SeqCst);
    }
}
