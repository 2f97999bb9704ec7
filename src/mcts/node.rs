//! Search tree node.
//!
//! Nodes live in the [`SearchTree`](crate::mcts::tree::SearchTree) arena and
//! refer to each other by [`NodeId`], so the parent link used during
//! backpropagation is a plain index.

use crate::game::GameState;
use std::fmt;

/// Index of a node inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One position in the explored tree.
#[derive(Debug, Clone)]
pub struct SearchNode<M, P> {
    /// Move that led here, `None` at the root
    pub mv: Option<M>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Legal moves not yet expanded into children
    pub untried_moves: Vec<M>,
    /// Player whose move produced this position; results are scored for them
    pub node_player: P,
    pub visits: u32,
    pub score_sum: f64,
}

impl<M: Copy + Eq, P: Copy> SearchNode<M, P> {
    pub fn new<G>(mv: Option<M>, parent: Option<NodeId>, state: &G) -> Self
    where
        G: GameState<Move = M, Player = P>,
    {
        Self {
            mv,
            parent,
            children: Vec::new(),
            untried_moves: state.legal_moves(),
            node_player: state.player_just_moved(),
            visits: 0,
            score_sum: 0.0,
        }
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried_moves.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn mean_score(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.score_sum / self.visits as f64
        }
    }

    /// UCB1 with the classical constant:
    /// `score_sum / visits + sqrt(2 ln(parent_visits) / visits)`
    pub fn ucb1(&self, parent_visits: u32) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let visits = self.visits as f64;
        self.score_sum / visits + (2.0 * (parent_visits as f64).ln() / visits).sqrt()
    }

    /// Records one visit. `result` must already be from `node_player`'s side.
    pub fn update(&mut self, result: f64) {
        self.visits += 1;
        self.score_sum += result;
    }
}

impl<M: fmt::Debug, P> fmt::Display for SearchNode<M, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mv {
            Some(mv) => write!(f, "[M:{:?}", mv)?,
            None => write!(f, "[M:root")?,
        }
        write!(
            f,
            " W/V:{:.1}/{} U:{:?}]",
            self.score_sum, self.visits, self.untried_moves
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Mark};

    #[test]
    fn test_new_root_node() {
        let board = Board::new();
        let node = SearchNode::new(None, None, &board);
        assert_eq!(node.mv, None);
        assert_eq!(node.parent, None);
        assert_eq!(node.untried_moves.len(), 25);
        assert_eq!(node.node_player, Mark::O);
        assert_eq!(node.visits, 0);
        assert!(node.is_leaf());
        assert!(!node.is_fully_expanded());
    }

    #[test]
    fn test_terminal_node_has_no_untried_moves() {
        let board = Board::from_moves(&[11, 0, 12, 4, 13]).unwrap();
        let node = SearchNode::new(Some(13), Some(NodeId(0)), &board);
        assert!(node.untried_moves.is_empty());
        assert_eq!(node.node_player, Mark::X);
    }

    #[test]
    fn test_update_accumulates() {
        let mut node = SearchNode::new(None, None, &Board::new());
        let results = [1.0, 0.0, 0.5, 1.0, 0.0];
        for r in results {
            node.update(r);
        }
        assert_eq!(node.visits, 5);
        assert_eq!(node.score_sum, 2.5);
        assert!((node.mean_score() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ucb1() {
        let mut node = SearchNode::new(Some(3), Some(NodeId(0)), &Board::new());
        assert_eq!(node.ucb1(10), f64::INFINITY);

        for r in [1.0, 1.0, 0.0, 1.0] {
            node.update(r);
        }
        let expected = 0.75 + (2.0 * 10f64.ln() / 4.0).sqrt();
        assert!((node.ucb1(10) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        let mut node = SearchNode::new(Some(7usize), None, &Board::from_moves(&[0]).unwrap());
        node.update(1.0);
        let text = node.to_string();
        assert!(text.starts_with("[M:7 W/V:1.0/1 U:[1, 2"));
    }
}
