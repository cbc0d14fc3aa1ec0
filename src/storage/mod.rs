mod request_generations;
#[cfg(test)]
mod tests;

pub use request_generations::{Generation, RequestGenerations};

/// Tracks which load of a view is the most recent one so older responses can be discarded.
pub trait Generations: Send + Sync + 'static {
    fn begin(&self, view: &str) -> Generation;
    fn is_current(&self, generation: &Generation) -> bool;
    /// Forgets the view if `generation` is still its newest load.
    fn release(&self, generation: &Generation);
}
