use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::storage::Generations;

/// Ticket handed out when a view starts loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub view: String,
    pub number: u64
}

/// Latest requested generation per view, shared by every in-flight load.
///
/// Numbers come from one counter across all views and never repeat, so a view's entry can be
/// dropped once its newest load finishes without an older load later passing for current.
#[derive(Debug, Clone, Default)]
pub struct RequestGenerations {
    latest: Arc<DashMap<String, u64>>,
    counter: Arc<AtomicU64>
}

impl RequestGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Views with a load in flight.
    #[cfg(test)]
    pub fn tracked_views(&self) -> usize {
        self.latest.len()
    }
}

impl Generations for RequestGenerations {
    fn begin(&self, view: &str) -> Generation {
        let number = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        self.latest.insert(view.to_string(), number);

        Generation {
            view: view.to_string(),
            number
        }
    }

    fn is_current(&self, generation: &Generation) -> bool {
        self.latest.get(&generation.view)
            .is_some_and(|latest| *latest == generation.number)
    }

    fn release(&self, generation: &Generation) {
        self.latest.remove_if(&generation.view, |_, latest| *latest == generation.number);
    }
}
