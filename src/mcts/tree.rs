//! Arena-allocated search tree.
//!
//! All nodes are stored in one `Vec` and addressed by [`NodeId`]; the root is
//! always index 0. The tree is built by one search call and dropped with it.

use crate::game::GameState;
use crate::mcts::node::{NodeId, SearchNode};
use crate::{Result, SquavaError};

pub type Node<G> = SearchNode<<G as GameState>::Move, <G as GameState>::Player>;

#[derive(Debug)]
pub struct SearchTree<G: GameState> {
    nodes: Vec<Node<G>>,
}

impl<G: GameState> SearchTree<G> {
    pub fn new(root_state: &G) -> Self {
        Self {
            nodes: vec![SearchNode::new(None, None, root_state)],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<G> {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<G> {
        &mut self.nodes[id.0]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root exists from construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Child with the highest UCB1 score. Only defined once every move of
    /// `id` has been expanded; returns `None` otherwise or when `id` has no
    /// children. Ties go to the last child encountered.
    pub fn select_best_child(&self, id: NodeId) -> Option<NodeId> {
        let node = self.get(id);
        if !node.is_fully_expanded() {
            return None;
        }

        let mut best: Option<(NodeId, f64)> = None;
        for &child in &node.children {
            let score = self.get(child).ucb1(node.visits);
            match best {
                Some((_, best_score)) if score < best_score => {}
                _ => best = Some((child, score)),
            }
        }
        best.map(|(child, _)| child)
    }

    /// Removes `mv` from `id`'s untried moves and attaches a child built from
    /// `state`, the position after `mv`.
    pub fn expand(&mut self, id: NodeId, mv: G::Move, state: &G) -> Result<NodeId> {
        let untried = &mut self.get_mut(id).untried_moves;
        let slot = untried
            .iter()
            .position(|&m| m == mv)
            .ok_or(SquavaError::MoveNotUntried)?;
        untried.remove(slot);

        let child_id = NodeId(self.nodes.len());
        self.nodes.push(SearchNode::new(Some(mv), Some(id), state));
        self.get_mut(id).children.push(child_id);
        Ok(child_id)
    }

    /// Child with the most visits, first one on ties.
    pub fn most_visited_child(&self, id: NodeId) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        for &child in &self.get(id).children {
            match best {
                Some(b) if self.get(child).visits <= self.get(b).visits => {}
                _ => best = Some(child),
            }
        }
        best
    }

    /// Indented dump of the subtree at `id`, `max_depth` levels deep.
    pub fn render(&self, id: NodeId, max_depth: usize) -> String {
        let mut out = String::new();
        self.render_into(id, 0, max_depth, &mut out);
        out
    }

    fn render_into(&self, id: NodeId, depth: usize, max_depth: usize, out: &mut String) {
        let node = self.get(id);
        out.push_str(&"| ".repeat(depth));
        out.push_str(&node.to_string());
        out.push('\n');
        if depth < max_depth {
            for &child in &node.children {
                self.render_into(child, depth + 1, max_depth, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Board;
    use assert_matches::assert_matches;

    fn expand_all(tree: &mut SearchTree<Board>, board: &Board) -> Vec<NodeId> {
        let root = tree.root();
        let moves = tree.get(root).untried_moves.clone();
        moves
            .into_iter()
            .map(|mv| {
                let mut next = board.clone();
                next.apply_move(mv).unwrap();
                tree.expand(root, mv, &next).unwrap()
            })
            .collect()
    }

    fn near_end_board() -> Board {
        // two empty cells, O to move
        "XXOOX OOXXO XXOOX OOXXO XXO__".parse().unwrap()
    }

    #[test]
    fn test_expand_moves_untried_into_children() {
        let board = Board::new();
        let mut tree = SearchTree::new(&board);
        let root = tree.root();

        let mut next = board.clone();
        next.apply_move(12).unwrap();
        let child = tree.expand(root, 12, &next).unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(root).children, vec![child]);
        assert!(!tree.get(root).untried_moves.contains(&12));
        assert_eq!(tree.get(root).untried_moves.len(), 24);
        assert_eq!(tree.get(child).parent, Some(root));
        assert_eq!(tree.get(child).mv, Some(12));
        assert_eq!(tree.get(child).untried_moves.len(), 24);
    }

    #[test]
    fn test_expand_rejects_moves_already_tried() {
        let board = Board::new();
        let mut tree = SearchTree::new(&board);
        let root = tree.root();
        let mut next = board.clone();
        next.apply_move(3).unwrap();
        tree.expand(root, 3, &next).unwrap();

        assert_matches!(tree.expand(root, 3, &next), Err(SquavaError::MoveNotUntried));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_select_requires_full_expansion() {
        let board = near_end_board();
        let mut tree = SearchTree::new(&board);
        let root = tree.root();
        assert_eq!(tree.select_best_child(root), None);

        let mut next = board.clone();
        next.apply_move(23).unwrap();
        tree.expand(root, 23, &next).unwrap();
        assert_eq!(tree.select_best_child(root), None);

        let mut next = board.clone();
        next.apply_move(24).unwrap();
        tree.expand(root, 24, &next).unwrap();
        assert!(tree.select_best_child(root).is_some());
    }

    #[test]
    fn test_select_best_child_uses_ucb1() {
        let board = near_end_board();
        let mut tree = SearchTree::new(&board);
        let children = expand_all(&mut tree, &board);
        let root = tree.root();

        tree.get_mut(root).visits = 10;
        // 0.8 + sqrt(2 ln 10 / 5) ~= 1.76
        tree.get_mut(children[0]).visits = 5;
        tree.get_mut(children[0]).score_sum = 4.0;
        // 0.5 + sqrt(2 ln 10 / 2) ~= 2.02
        tree.get_mut(children[1]).visits = 2;
        tree.get_mut(children[1]).score_sum = 1.0;

        assert_eq!(tree.select_best_child(root), Some(children[1]));
    }

    #[test]
    fn test_select_ties_go_to_last_child() {
        let board = near_end_board();
        let mut tree = SearchTree::new(&board);
        let children = expand_all(&mut tree, &board);
        let root = tree.root();

        tree.get_mut(root).visits = 4;
        for &child in &children {
            tree.get_mut(child).visits = 2;
            tree.get_mut(child).score_sum = 1.0;
        }
        assert_eq!(tree.select_best_child(root), children.last().copied());
    }

    #[test]
    fn test_most_visited_prefers_visits_over_win_rate() {
        let board = near_end_board();
        let mut tree = SearchTree::new(&board);
        let children = expand_all(&mut tree, &board);
        let root = tree.root();

        tree.get_mut(children[0]).visits = 10;
        tree.get_mut(children[0]).score_sum = 2.0;
        tree.get_mut(children[1]).visits = 5;
        tree.get_mut(children[1]).score_sum = 5.0;

        assert_eq!(tree.most_visited_child(root), Some(children[0]));

        tree.get_mut(children[1]).visits = 10;
        assert_eq!(tree.most_visited_child(root), Some(children[0]));
    }

    #[test]
    fn test_render() {
        let board = near_end_board();
        let mut tree = SearchTree::new(&board);
        expand_all(&mut tree, &board);
        let dump = tree.render(tree.root(), 1);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("[M:root"));
        assert!(lines[1].starts_with("| [M:23"));
        assert!(lines[2].starts_with("| [M:24"));
    }
}
