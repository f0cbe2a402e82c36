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

//! Row and column potentials (dual values) of a basic allocation.
//!
//! The potentials `u` and `v` satisfy `c[i][j] = u[i] + v[j]` for all
//! basic cells `(i, j)`. They are determined up to a constant, the
//! anchor is `u[0] = 0`.

use super::Value;
use crate::matrix::Matrix;
use log::trace;

/// Row and column potentials.
#[derive(Clone, PartialEq, Debug)]
pub struct Potentials<F> {
    /// The row potentials.
    pub u: Vec<F>,
    /// The column potentials.
    pub v: Vec<F>,
    /// Number of potentials that could not be derived from the basic
    /// cells and have been set to zero.
    ///
    /// This is non-zero iff the basic cells do not form a connected
    /// spanning structure, which is typical for degenerate allocations.
    pub unresolved: usize,
}

impl<F> Potentials<F> {
    /// Return `true` if every potential has been derived from a basic cell.
    pub fn is_complete(&self) -> bool {
        self.unresolved == 0
    }
}

/// Compute the potentials of the allocation `x`.
///
/// A cell is basic if its allocation is larger than `zero`.
///
/// # Example
///
/// ```
/// use rs_transport::Matrix;
/// use rs_transport::transport::potentials::potentials;
///
/// let x = Matrix::from_rows(vec![vec![10.0, 10.0, 0.0], vec![0.0, 15.0, 15.0], vec![0.0, 0.0, 25.0]]).unwrap();
/// let c = Matrix::from_rows(vec![vec![8.0, 6.0, 10.0], vec![9.0, 12.0, 13.0], vec![14.0, 9.0, 16.0]]).unwrap();
/// let p = potentials(&x, &c, 1e-7);
/// assert_eq!(p.u, vec![0.0, 6.0, 9.0]);
/// assert_eq!(p.v, vec![8.0, 6.0, 7.0]);
/// assert!(p.is_complete());
/// ```
pub fn potentials<F: Value>(x: &Matrix<F>, costs: &Matrix<F>, zero: F) -> Potentials<F> {
    let (m, n) = (x.num_rows(), x.num_cols());
    let mut u: Vec<Option<F>> = vec![None; m];
    let mut v: Vec<Option<F>> = vec![None; n];
    if m > 0 {
        u[0] = Some(F::zero());
    }

    let basics: Vec<(usize, usize)> = x.iter_cells().filter(|&(_, a)| a > zero).map(|(c, _)| c).collect();

    let mut updated = true;
    while updated {
        updated = false;
        for &(i, j) in &basics {
            match (u[i], v[j]) {
                (Some(ui), None) => {
                    v[j] = Some(costs[(i, j)] - ui);
                    updated = true;
                }
                (None, Some(vj)) => {
                    u[i] = Some(costs[(i, j)] - vj);
                    updated = true;
                }
                _ => (),
            }
        }
    }

    let unresolved = u.iter().chain(v.iter()).filter(|p| p.is_none()).count();
    let u: Vec<F> = u.into_iter().map(|p| p.unwrap_or_else(F::zero)).collect();
    let v: Vec<F> = v.into_iter().map(|p| p.unwrap_or_else(F::zero)).collect();
    trace!("Potentials u = {:?}, v = {:?} ({} unresolved)", u, v, unresolved);

    Potentials { u, v, unresolved }
}
