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

//! Shifting flow around a stepping-stone cycle.

use super::Value;
use crate::matrix::Matrix;

/// Shift the maximal amount of flow around `cycle`.
///
/// Cells at even positions of the cycle (starting with the entering
/// cell) are increased, cells at odd positions are decreased. The amount
/// `theta` is the minimal allocation among the positive cells at odd
/// positions. Afterwards all entries below `zero` are set to zero.
///
/// Returns `theta`, or `None` if the allocation has not been changed
/// because there is no positive decreasing cell or `theta` is not a
/// positive number.
///
/// # Example
///
/// ```
/// use rs_transport::Matrix;
/// use rs_transport::transport::pivot::augment;
///
/// let mut x = Matrix::from_rows(vec![vec![10.0, 10.0, 0.0], vec![0.0, 15.0, 15.0], vec![0.0, 0.0, 25.0]]).unwrap();
/// let theta = augment(&mut x, &[(2, 1), (2, 2), (1, 2), (1, 1)], 1e-7);
/// assert_eq!(theta, Some(15.0));
/// assert_eq!(x.to_rows(), vec![vec![10.0, 10.0, 0.0], vec![0.0, 0.0, 30.0], vec![0.0, 15.0, 10.0]]);
/// ```
pub fn augment<F: Value>(x: &mut Matrix<F>, cycle: &[(usize, usize)], zero: F) -> Option<F> {
    if cycle.len() < 4 {
        return None;
    }

    let theta = cycle
        .iter()
        .skip(1)
        .step_by(2)
        .map(|&cell| x[cell])
        .filter(|&a| a > F::zero())
        .fold(None, |min: Option<F>, a| Some(min.map_or(a, |m| m.min(a))))?;

    if theta.is_nan() || theta <= F::zero() {
        return None;
    }

    for (k, &cell) in cycle.iter().enumerate() {
        if k % 2 == 0 {
            x[cell] += theta;
        } else {
            x[cell] -= theta;
            if x[cell] < F::zero() {
                x[cell] = F::zero();
            }
        }
    }

    clean_degenerate(x, zero);

    Some(theta)
}

/// Set all entries below `zero` to exactly zero.
pub fn clean_degenerate<F: Value>(x: &mut Matrix<F>, zero: F) {
    for a in x.values_mut() {
        if *a < zero {
            *a = F::zero();
        }
    }
}
