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

//! Reduced costs and the choice of the entering cell.

use super::potentials::Potentials;
use super::Value;
use crate::matrix::Matrix;

/// Compute the reduced costs `c[i][j] - (u[i] + v[j])` of all cells.
pub fn reduced_costs<F: Value>(costs: &Matrix<F>, pot: &Potentials<F>) -> Matrix<F> {
    let mut reduced = costs.clone();
    for i in 0..costs.num_rows() {
        for j in 0..costs.num_cols() {
            reduced[(i, j)] -= pot.u[i] + pot.v[j];
        }
    }
    reduced
}

/// Return the non-basic cell with the most negative reduced cost.
///
/// A cell is non-basic if its allocation is at most `zero`. If several
/// cells attain the minimum, the first one in row-major order is
/// returned. If no non-basic cell has a negative reduced cost, the
/// allocation is optimal and `None` is returned.
///
/// `zero` only decides which cells are basic, reduced costs are compared
/// against exact zero.
pub fn entering_cell<F: Value>(reduced: &Matrix<F>, x: &Matrix<F>, zero: F) -> Option<(usize, usize)> {
    let mut min_cost = F::zero();
    let mut min_cell = None;
    for (cell, r) in reduced.iter_cells() {
        if x[cell] <= zero && r < min_cost {
            min_cost = r;
            min_cell = Some(cell);
        }
    }
    min_cell
}

#[cfg(test)]
mod tests {
    use super::{entering_cell, reduced_costs};
    use crate::matrix::Matrix;
    use crate::transport::potentials::potentials;

    #[test]
    fn test_northwest_entering_cell() {
        let x = Matrix::from_rows(vec![vec![10.0, 10.0, 0.0], vec![0.0, 15.0, 15.0], vec![0.0, 0.0, 25.0]]).unwrap();
        let c = Matrix::from_rows(vec![vec![8.0, 6.0, 10.0], vec![9.0, 12.0, 13.0], vec![14.0, 9.0, 16.0]]).unwrap();
        let p = potentials(&x, &c, 1e-7);
        let r = reduced_costs(&c, &p);
        assert_eq!(
            r.to_rows(),
            vec![vec![0.0, 0.0, 3.0], vec![-5.0, 0.0, 0.0], vec![-3.0, -6.0, 0.0]]
        );
        assert_eq!(entering_cell(&r, &x, 1e-7), Some((2, 1)));
    }

    #[test]
    fn test_ties_and_optimality() {
        let x = Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 0.0]]).unwrap();
        let r = Matrix::from_rows(vec![vec![-9.0, -2.0], vec![-2.0, 0.0]]).unwrap();
        // the basic cell (0, 0) is ignored, (0, 1) comes first
        assert_eq!(entering_cell(&r, &x, 1e-7), Some((0, 1)));

        let r = Matrix::from_rows(vec![vec![-9.0, 0.0], vec![1e-9, 0.0]]).unwrap();
        assert_eq!(entering_cell(&r, &x, 1e-7), None);
    }

    #[test]
    fn test_small_reduced_costs() {
        // reduced costs far below the allocation threshold still count
        let x = Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 0.0]]).unwrap();
        let r = Matrix::from_rows(vec![vec![0.0, 1e-12], vec![-1e-12, -3e-12]]).unwrap();
        assert_eq!(entering_cell(&r, &x, 1e-7), Some((1, 1)));
    }
}
