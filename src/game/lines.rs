//! Winning and losing line tables.
//!
//! A winning line is any 4 contiguous collinear cells, a losing line any 3.
//! Both tables are generated at compile time from the 5x5 geometry in the
//! four directions right, down, down-right and down-left.

use crate::game::board::{BOARD_SIDE, CELL_COUNT};
use crate::game::mark::{Cell, Mark};

pub const WINNING_LINE_LEN: usize = 4;
pub const LOSING_LINE_LEN: usize = 3;

/// Every run of 4 cells: 10 horizontal, 10 vertical, 8 diagonal.
pub const WINNING_LINES: [[usize; WINNING_LINE_LEN]; 28] = generate_lines();

/// Every run of 3 cells: 15 horizontal, 15 vertical, 18 diagonal.
pub const LOSING_LINES: [[usize; LOSING_LINE_LEN]; 48] = generate_lines();

const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

const fn generate_lines<const LEN: usize, const COUNT: usize>() -> [[usize; LEN]; COUNT] {
    let side = BOARD_SIDE as isize;
    let mut lines = [[0usize; LEN]; COUNT];
    let mut found = 0;

    let mut start = 0;
    while start < CELL_COUNT {
        let row = (start / BOARD_SIDE) as isize;
        let col = (start % BOARD_SIDE) as isize;

        let mut d = 0;
        while d < DIRECTIONS.len() {
            let (dr, dc) = DIRECTIONS[d];
            let end_row = row + dr * (LEN as isize - 1);
            let end_col = col + dc * (LEN as isize - 1);

            if end_row >= 0 && end_row < side && end_col >= 0 && end_col < side {
                let mut k = 0;
                while k < LEN {
                    let r = row + dr * k as isize;
                    let c = col + dc * k as isize;
                    lines[found][k] = (r * side + c) as usize;
                    k += 1;
                }
                found += 1;
            }
            d += 1;
        }
        start += 1;
    }

    assert!(found == COUNT, "line table size does not match the board geometry");
    lines
}

/// Returns the mark filling every cell of `line`, if there is one.
pub fn completed_by(cells: &[Cell; CELL_COUNT], line: &[usize]) -> Option<Mark> {
    let first = cells[line[0]].mark()?;
    line[1..]
        .iter()
        .all(|&i| cells[i] == Cell::Occupied(first))
        .then_some(first)
}

/// First winning line completed on `cells`, in table order.
pub fn find_completed_win(cells: &[Cell; CELL_COUNT]) -> Option<Mark> {
    WINNING_LINES
        .iter()
        .find_map(|line| completed_by(cells, line))
}

/// First losing line completed on `cells`, in table order.
pub fn find_completed_loss(cells: &[Cell; CELL_COUNT]) -> Option<Mark> {
    LOSING_LINES
        .iter()
        .find_map(|line| completed_by(cells, line))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_contiguous_run(line: &[usize]) -> bool {
        let coords: Vec<(isize, isize)> = line
            .iter()
            .map(|&i| ((i / BOARD_SIDE) as isize, (i % BOARD_SIDE) as isize))
            .collect();
        let step = (coords[1].0 - coords[0].0, coords[1].1 - coords[0].1);
        let unit = step.0.abs() <= 1 && step.1.abs() <= 1 && step != (0, 0);
        unit && coords
            .windows(2)
            .all(|w| (w[1].0 - w[0].0, w[1].1 - w[0].1) == step)
    }

    #[test]
    fn test_every_line_is_a_straight_contiguous_run() {
        assert!(WINNING_LINES.iter().all(|l| is_contiguous_run(l)));
        assert!(LOSING_LINES.iter().all(|l| is_contiguous_run(l)));
    }

    #[test]
    fn test_lines_are_unique() {
        let mut wins: Vec<_> = WINNING_LINES.to_vec();
        wins.sort();
        wins.dedup();
        assert_eq!(wins.len(), 28);

        let mut losses: Vec<_> = LOSING_LINES.to_vec();
        losses.sort();
        losses.dedup();
        assert_eq!(losses.len(), 48);
    }

    #[test]
    fn test_known_lines_present() {
        assert!(WINNING_LINES.contains(&[10, 11, 12, 13]));
        assert!(WINNING_LINES.contains(&[0, 6, 12, 18]));
        assert!(WINNING_LINES.contains(&[4, 8, 12, 16]));
        assert!(LOSING_LINES.contains(&[11, 12, 13]));
        assert!(LOSING_LINES.contains(&[2, 6, 10]));
        assert!(LOSING_LINES.contains(&[14, 18, 22]));
    }

    #[test]
    fn test_completed_by() {
        let mut cells = [Cell::Empty; CELL_COUNT];
        cells[11] = Cell::Occupied(Mark::X);
        cells[12] = Cell::Occupied(Mark::X);
        assert_eq!(completed_by(&cells, &[11, 12, 13]), None);

        cells[13] = Cell::Occupied(Mark::O);
        assert_eq!(completed_by(&cells, &[11, 12, 13]), None);

        cells[13] = Cell::Occupied(Mark::X);
        assert_eq!(completed_by(&cells, &[11, 12, 13]), Some(Mark::X));
        assert_eq!(find_completed_loss(&cells), Some(Mark::X));
        assert_eq!(find_completed_win(&cells), None);
    }
}
