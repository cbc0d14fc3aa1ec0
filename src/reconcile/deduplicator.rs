use std::collections::HashMap;

use tracing::trace;

use crate::models::{DedupKey, Transaction};

/// Collapses records describing the same logical event down to a single survivor.
///
/// Survivors keep the slot of the first record seen for their key, so the output
/// order is the first-seen order and running the result through again changes nothing.
pub fn deduplicate(transactions: impl IntoIterator<Item = Transaction>) -> Vec<Transaction> {
    let mut slots = HashMap::<DedupKey, usize>::new();
    let mut survivors = Vec::<Transaction>::new();

    for candidate in transactions {
        let key = candidate.dedup_key();

        match slots.get(&key) {
            None => {
                slots.insert(key, survivors.len());
                survivors.push(candidate);
            },
            Some(&slot) => {
                if supersedes(&candidate, &survivors[slot]) {
                    trace!("Record [{}] from [{}] supersedes [{}]", candidate.display_id(), candidate.source, survivors[slot].display_id());
                    survivors[slot] = candidate;
                } else {
                    trace!("Dropping duplicate record [{}] from [{}]", candidate.display_id(), candidate.source);
                }
            }
        }
    }

    survivors
}

/// Whether `candidate` should replace the `stored` record sharing its key.
pub fn supersedes(candidate: &Transaction, stored: &Transaction) -> bool {
    if stored.is_pending() && candidate.is_completed() {
        return true;
    }

    if stored.is_completed() && candidate.is_pending() {
        return false;
    }

    candidate.freshness_millis() > stored.freshness_millis()
}
