/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Stepping-stone cycles.
//!
//! A stepping-stone cycle starts at the entering cell and alternately
//! moves within a row and within a column, visiting only basic cells,
//! until it returns to the entering cell. The cycle is returned as the
//! sequence of its distinct cells beginning with the entering cell; the
//! closing move from the last cell back to the entering cell is
//! implicit. Hence a cycle always has an even number of at least four
//! cells and consecutive cells (cyclically) share a row or a column in
//! alternating order.
//!
//! The search is a depth-first search with an explicit stack. Candidate
//! cells are tried in increasing index order, so the result is
//! deterministic.

use super::Value;
use crate::matrix::Matrix;

/// The direction of the first move of a cycle.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    /// Move within the current row (change the column).
    Row,
    /// Move within the current column (change the row).
    Column,
}

impl Direction {
    fn flip(self) -> Self {
        match self {
            Direction::Row => Direction::Column,
            Direction::Column => Direction::Row,
        }
    }
}

/// A search frame: the direction of the next move from the last cell
/// on the path and the next candidate index to try.
struct Frame {
    dir: Direction,
    next: usize,
}

/// Find a stepping-stone cycle through `start`.
///
/// A row-first search is tried first; if it fails, a column-first
/// search is tried. Cells with allocation larger than `zero` are basic.
/// Returns `None` if there is no cycle, which happens if the basic cells
/// are disconnected (degenerate basis).
///
/// # Example
///
/// ```
/// use rs_transport::Matrix;
/// use rs_transport::transport::cycle::find_cycle;
///
/// let x = Matrix::from_rows(vec![vec![10.0, 10.0, 0.0], vec![0.0, 15.0, 15.0], vec![0.0, 0.0, 25.0]]).unwrap();
/// assert_eq!(find_cycle(&x, (2, 1), 1e-7), Some(vec![(2, 1), (2, 2), (1, 2), (1, 1)]));
/// ```
pub fn find_cycle<F: Value>(x: &Matrix<F>, start: (usize, usize), zero: F) -> Option<Vec<(usize, usize)>> {
    find_cycle_from(x, start, zero, Direction::Row).or_else(|| find_cycle_from(x, start, zero, Direction::Column))
}

/// Find a stepping-stone cycle through `start` whose first move has direction `first`.
pub fn find_cycle_from<F: Value>(
    x: &Matrix<F>,
    start: (usize, usize),
    zero: F,
    first: Direction,
) -> Option<Vec<(usize, usize)>> {
    let (m, n) = (x.num_rows(), x.num_cols());
    if start.0 >= m || start.1 >= n {
        return None;
    }

    let mut on_path = Matrix::filled(m, n, false);
    let mut path = vec![start];
    let mut stack = vec![Frame { dir: first, next: 0 }];
    on_path[start] = true;

    while let Some(frame) = stack.last_mut() {
        let (i, j) = path[path.len() - 1];
        let limit = if frame.dir == Direction::Row { n } else { m };

        let mut found = None;
        while frame.next < limit {
            let cell = match frame.dir {
                Direction::Row => (i, frame.next),
                Direction::Column => (frame.next, j),
            };
            frame.next += 1;
            if cell == (i, j) {
                continue;
            }
            if cell == start {
                // the path may only be closed with an even number of cells
                if path.len() >= 4 && path.len() % 2 == 0 {
                    return Some(path);
                }
            } else if x[cell] > zero && !on_path[cell] {
                found = Some(cell);
                break;
            }
        }

        if let Some(cell) = found {
            let dir = frame.dir.flip();
            on_path[cell] = true;
            path.push(cell);
            stack.push(Frame { dir, next: 0 });
        } else {
            stack.pop();
            if let Some(cell) = path.pop() {
                on_path[cell] = false;
            }
        }
    }

    None
}

/// Return `true` if `cycle` is a valid stepping-stone cycle.
///
/// The cycle must have an even number of at least four distinct cells
/// and consecutive cells (including last and first) must alternately
/// share a row and a column.
pub fn is_cycle(cycle: &[(usize, usize)]) -> bool {
    let k = cycle.len();
    if k < 4 || k % 2 != 0 {
        return false;
    }
    for a in 0..k {
        for b in a + 1..k {
            if cycle[a] == cycle[b] {
                return false;
            }
        }
    }
    let same_row = |a: (usize, usize), b: (usize, usize)| a.0 == b.0 && a.1 != b.1;
    let same_col = |a: (usize, usize), b: (usize, usize)| a.1 == b.1 && a.0 != b.0;
    let row_first = same_row(cycle[0], cycle[1]);
    (0..k).all(|p| {
        let (a, b) = (cycle[p], cycle[(p + 1) % k]);
        if (p % 2 == 0) == row_first {
            same_row(a, b)
        } else {
            same_col(a, b)
        }
    })
}
