// ── Generation counters ──
//
// One counter per class of operation. Starting an operation bumps its
// counter; a completion is applied only if no newer operation of the same
// class has started since.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub(crate) struct Generation(AtomicU64);

impl Generation {
    /// Start a new operation, returning its generation.
    pub(crate) fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.0.load(Ordering::Acquire) == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_bump_supersedes_older() {
        let counter = Generation::default();
        let first = counter.bump();
        assert!(counter.is_current(first));

        let second = counter.bump();
        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
    }
}
