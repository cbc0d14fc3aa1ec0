use super::{Generations, RequestGenerations};

use std::sync::Arc;

use anyhow::Result;

#[test]
fn test_newest_generation_is_current() {
    let generations = RequestGenerations::new();

    let first = generations.begin("player-1");

    assert!(generations.is_current(&first));

    let second = generations.begin("player-1");

    assert!(!generations.is_current(&first));
    assert!(generations.is_current(&second));
    assert_eq!(second.number, first.number + 1);
}

#[test]
fn test_views_are_tracked_independently() {
    let generations = RequestGenerations::new();

    let player_1 = generations.begin("player-1");
    let player_2 = generations.begin("player-2");
    generations.begin("player-2");

    assert!(generations.is_current(&player_1));
    assert!(!generations.is_current(&player_2));
}

#[test]
fn test_clones_share_the_same_counters() {
    let generations = RequestGenerations::new();
    let clone = generations.clone();

    let stale = generations.begin("player-1");
    clone.begin("player-1");

    assert!(!generations.is_current(&stale));
}

#[tokio::test]
async fn test_concurrent_begins_hand_out_unique_numbers() -> Result<()> {
    let generations = Arc::new(RequestGenerations::new());

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let generations = generations.clone();
            tokio::spawn(async move { generations.begin("player-1").number })
        })
        .collect();

    let mut numbers = Vec::new();

    for handle in handles {
        numbers.push(handle.await?);
    }

    numbers.sort_unstable();
    numbers.dedup();

    assert_eq!(numbers.len(), 32);
    assert_eq!(numbers.last().copied(), Some(32));

    Ok(())
}

#[test]
fn test_releasing_the_newest_generation_forgets_the_view() {
    let generations = RequestGenerations::new();

    let stale = generations.begin("player-1");
    let newest = generations.begin("player-1");

    generations.release(&stale);

    assert_eq!(generations.tracked_views(), 1);

    generations.release(&newest);

    assert_eq!(generations.tracked_views(), 0);
    assert!(!generations.is_current(&stale));
}

#[test]
fn test_stale_load_stays_stale_after_the_view_is_restarted() {
    let generations = RequestGenerations::new();

    let stale = generations.begin("player-1");
    let finished = generations.begin("player-1");
    generations.release(&finished);

    let restarted = generations.begin("player-1");

    assert!(!generations.is_current(&stale));
    assert!(generations.is_current(&restarted));
}
