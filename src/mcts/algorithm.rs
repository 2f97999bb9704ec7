//! UCT search.
//!
//! Each iteration walks the tree from the root with UCB1 while nodes are
//! fully expanded, expands one random untried move, plays random moves to
//! the end of the game and then walks back to the root, scoring the final
//! position for each node's `node_player`. The move played is the most
//! visited root child.

use crate::game::GameState;
use crate::mcts::config::SearchConfig;
use crate::mcts::node::NodeId;
use crate::mcts::search_result::{ChildStats, SearchReport};
use crate::mcts::tree::SearchTree;
use crate::{Result, SquavaError};
use rand::Rng;
use std::time::Instant;

/// Runs `iterations` UCT iterations from `root_state` and returns the chosen move.
pub fn search<G, R>(root_state: &G, iterations: usize, rng: &mut R) -> Result<G::Move>
where
    G: GameState,
    R: Rng,
{
    let config = SearchConfig::with_iterations(iterations);
    search_with_config(root_state, &config, rng).map(|report| report.best_move)
}

/// Same as [`search`], bounded by `config` and returning the root statistics.
///
/// `config.seed` is not consulted here; the caller owns `rng`.
pub fn search_with_config<G, R>(
    root_state: &G,
    config: &SearchConfig,
    rng: &mut R,
) -> Result<SearchReport<G::Move>>
where
    G: GameState,
    R: Rng,
{
    config.validate()?;

    let mut tree = SearchTree::new(root_state);
    let root = tree.root();
    if tree.get(root).untried_moves.is_empty() {
        return Err(SquavaError::GameOver);
    }

    let started = Instant::now();
    let deadline = config.time_limit().map(|limit| started + limit);
    let mut completed = 0;

    while completed < config.iterations {
        if let Some(deadline) = deadline {
            if completed > 0 && Instant::now() >= deadline {
                log::debug!(
                    "search deadline reached after {}/{} iterations",
                    completed,
                    config.iterations
                );
                break;
            }
        }
        run_iteration(&mut tree, root_state, rng)?;
        completed += 1;
    }

    let report = build_report(&tree, completed, started)?;

    log::debug!(
        "UCT chose {:?}: {} visits, mean {:.3}, {} iterations, {} nodes, {:?}",
        report.best_move,
        report.best_visits,
        report.best_mean_score,
        report.iterations,
        report.tree_size,
        report.elapsed
    );
    if log::log_enabled!(log::Level::Trace) {
        log::trace!("root children:\n{}", tree.render(root, 1));
    }

    Ok(report)
}

fn run_iteration<G, R>(tree: &mut SearchTree<G>, root_state: &G, rng: &mut R) -> Result<()>
where
    G: GameState,
    R: Rng,
{
    let mut node = tree.root();
    let mut state = root_state.clone();

    // Select
    while let Some(child) = tree.select_best_child(node) {
        if let Some(mv) = tree.get(child).mv {
            state.apply_move(mv)?;
        }
        node = child;
    }

    // Expand
    let untried = &tree.get(node).untried_moves;
    if !untried.is_empty() {
        let mv = untried[rng.random_range(0..untried.len())];
        state.apply_move(mv)?;
        node = tree.expand(node, mv, &state)?;
    }

    // Simulate
    loop {
        let moves = state.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.random_range(0..moves.len())];
        state.apply_move(mv)?;
    }

    backpropagate(tree, node, &state);
    Ok(())
}

/// Updates `from` and every ancestor with the result of `final_state`, each
/// scored for the node's own `node_player`.
fn backpropagate<G: GameState>(tree: &mut SearchTree<G>, from: NodeId, final_state: &G) {
    let mut current = Some(from);
    while let Some(id) = current {
        let node = tree.get_mut(id);
        node.update(final_state.result(node.node_player));
        current = node.parent;
    }
}

/// Most visited root child's move, the robust-child rule.
pub fn robust_child_move<G: GameState>(tree: &SearchTree<G>) -> Option<G::Move> {
    tree.most_visited_child(tree.root())
        .and_then(|child| tree.get(child).mv)
}

fn build_report<G: GameState>(
    tree: &SearchTree<G>,
    iterations: usize,
    started: Instant,
) -> Result<SearchReport<G::Move>> {
    let root = tree.root();
    let best = tree
        .most_visited_child(root)
        .ok_or(SquavaError::GameOver)?;
    let best_node = tree.get(best);
    let best_move = best_node.mv.ok_or(SquavaError::GameOver)?;

    let children = tree
        .get(root)
        .children
        .iter()
        .filter_map(|&id| {
            let child = tree.get(id);
            child.mv.map(|mv| ChildStats {
                mv,
                visits: child.visits,
                mean_score: child.mean_score(),
            })
        })
        .collect();

    Ok(SearchReport {
        best_move,
        best_visits: best_node.visits,
        best_mean_score: best_node.mean_score(),
        iterations,
        tree_size: tree.len(),
        children,
        elapsed: started.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Mark};
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn near_end_board() -> Board {
        "XXOOX OOXXO XXOOX OOXXO XXO__".parse().unwrap()
    }

    #[test]
    fn test_single_iteration_returns_legal_move() {
        let board = Board::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mv = search(&board, 1, &mut rng).unwrap();
        assert!(board.legal_moves().contains(&mv));
    }

    #[test]
    fn test_terminal_root_is_rejected() {
        let board = Board::from_moves(&[11, 0, 12, 4, 13]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_matches!(search(&board, 10, &mut rng), Err(SquavaError::GameOver));
    }

    #[test]
    fn test_zero_iterations_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_matches!(
            search(&Board::new(), 0, &mut rng),
            Err(SquavaError::ZeroIterations)
        );
    }

    #[test]
    fn test_budget_larger_than_tree_does_not_break() {
        let board = near_end_board();
        let mut rng = StdRng::seed_from_u64(3);
        let config = SearchConfig::with_iterations(500);
        let report = search_with_config(&board, &config, &mut rng).unwrap();

        assert!([23, 24].contains(&report.best_move));
        assert_eq!(report.iterations, 500);
        // root, two children, one grandchild each
        assert_eq!(report.tree_size, 5);
        let total: u32 = report.children.iter().map(|c| c.visits).sum();
        assert_eq!(total, 500);
    }

    #[test]
    fn test_takes_immediate_win() {
        // X holds 10, 11, 13; playing 12 makes four in a row.
        let board = Board::from_moves(&[10, 0, 11, 4, 13, 24]).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let config = SearchConfig::with_iterations(3000);
        let report = search_with_config(&board, &config, &mut rng).unwrap();

        assert_eq!(report.best_move, 12);
        // the winning child is scored from X's side
        assert_eq!(report.child(&12).map(|c| c.mean_score), Some(1.0));
    }

    #[test]
    fn test_same_seed_same_search() {
        let board = Board::from_moves(&[12, 6]).unwrap();
        let config = SearchConfig::with_iterations(400);

        let a = search_with_config(&board, &config, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = search_with_config(&board, &config, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.children, b.children);
        assert_eq!(a.tree_size, b.tree_size);
    }

    #[test]
    fn test_deadline_stops_early() {
        let board = Board::new();
        let config = SearchConfig {
            iterations: 50_000_000,
            max_duration_ms: Some(1),
            seed: None,
        };
        let mut rng = StdRng::seed_from_u64(8);
        let report = search_with_config(&board, &config, &mut rng).unwrap();
        assert!(report.iterations >= 1);
        assert!(report.iterations < config.iterations);
    }

    #[test]
    fn test_backpropagate_scores_each_node_for_its_player() {
        let board = near_end_board();
        let mut tree = SearchTree::new(&board);
        let root = tree.root();

        let mut after = board.clone();
        after.apply_move(24).unwrap();
        let child = tree.expand(root, 24, &after).unwrap();

        let mut final_state = after.clone();
        final_state.apply_move(23).unwrap();
        let outcome = final_state.outcome().unwrap();

        backpropagate(&mut tree, child, &final_state);

        assert_eq!(tree.get(child).node_player, Mark::O);
        assert_eq!(tree.get(child).score_sum, outcome.score_for(Mark::O));
        assert_eq!(tree.get(root).node_player, Mark::X);
        assert_eq!(tree.get(root).score_sum, outcome.score_for(Mark::X));
        assert_eq!(tree.get(child).visits, 1);
        assert_eq!(tree.get(root).visits, 1);
    }

    #[test]
    fn test_robust_child_move() {
        let board = near_end_board();
        let mut tree = SearchTree::new(&board);
        let root = tree.root();
        assert_eq!(robust_child_move(&tree), None);

        for mv in [23, 24] {
            let mut next = board.clone();
            next.apply_move(mv).unwrap();
            tree.expand(root, mv, &next).unwrap();
        }
        let children = tree.get(root).children.clone();
        // 23: fewer wins, more visits
        tree.get_mut(children[0]).visits = 7;
        tree.get_mut(children[0]).score_sum = 1.0;
        tree.get_mut(children[1]).visits = 4;
        tree.get_mut(children[1]).score_sum = 4.0;

        assert_eq!(robust_child_move(&tree), Some(23));
    }
}
