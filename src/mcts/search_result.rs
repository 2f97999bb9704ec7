use serde::Serialize;
use std::time::Duration;

/// Statistics of one root child after the search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildStats<M> {
    pub mv: M,
    pub visits: u32,
    pub mean_score: f64,
}

/// Outcome of one search call.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport<M> {
    /// Most visited root child
    pub best_move: M,
    pub best_visits: u32,
    /// Mean result of the best move from the mover's side
    pub best_mean_score: f64,
    /// Iterations actually completed (fewer than configured on timeout)
    pub iterations: usize,
    pub tree_size: usize,
    /// Root children in expansion order
    pub children: Vec<ChildStats<M>>,
    pub elapsed: Duration,
}

impl<M: PartialEq> SearchReport<M> {
    pub fn child(&self, mv: &M) -> Option<&ChildStats<M>> {
        self.children.iter().find(|c| &c.mv == mv)
    }
}
