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

//! A dense row-major matrix.
//!
//! Cost matrices, allocations and reduced costs of a transportation
//! problem are all stored as a [`Matrix`]. Cells are addressed by
//! `(row, col)` pairs.
//!
//! # Example
//!
//! ```
//! use rs_transport::Matrix;
//!
//! let mut m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
//! m[(0, 1)] += 1.0;
//! assert_eq!(m.row_sums(), vec![4.0, 7.0]);
//! assert_eq!(m.col_sums(), vec![4.0, 7.0]);
//! ```

use num_traits::Zero;
use std::fmt;
use std::ops::{AddAssign, Index, IndexMut, Mul};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Matrix<F> {
    rows: usize,
    cols: usize,
    data: Vec<F>,
}

impl<F> Matrix<F>
where
    F: Copy,
{
    /// Return a `rows x cols` matrix with all entries set to `value`.
    pub fn filled(rows: usize, cols: usize, value: F) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Build a matrix from a list of rows.
    ///
    /// Returns `None` if the rows do not all have the same length.
    pub fn from_rows<R>(rows: Vec<R>) -> Option<Self>
    where
        R: AsRef<[F]>,
    {
        let nrows = rows.len();
        let ncols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(nrows * ncols);
        for r in &rows {
            let r = r.as_ref();
            if r.len() != ncols {
                return None;
            }
            data.extend_from_slice(r);
        }
        Some(Matrix {
            rows: nrows,
            cols: ncols,
            data,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_cols(&self) -> usize {
        self.cols
    }

    /// The entries of row `i`.
    pub fn row(&self, i: usize) -> &[F] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// The entries of column `j` from top to bottom.
    pub fn col(&self, j: usize) -> impl Iterator<Item = F> + '_ {
        (0..self.rows).map(move |i| self.data[i * self.cols + j])
    }

    /// Iterate over all cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = ((usize, usize), F)> + '_ {
        let cols = self.cols;
        self.data.iter().enumerate().map(move |(k, &x)| ((k / cols, k % cols), x))
    }

    /// Iterate mutably over all entries in row-major order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut F> {
        self.data.iter_mut()
    }

    /// Set all entries of row `i` to `value`.
    pub fn fill_row(&mut self, i: usize, value: F) {
        for x in &mut self.data[i * self.cols..(i + 1) * self.cols] {
            *x = value;
        }
    }

    /// Set all entries of column `j` to `value`.
    pub fn fill_col(&mut self, j: usize, value: F) {
        for i in 0..self.rows {
            self.data[i * self.cols + j] = value;
        }
    }

    /// Return a new matrix with `f` applied to each entry.
    pub fn map<G, M>(&self, f: M) -> Matrix<G>
    where
        M: FnMut(F) -> G,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Return a copy with one additional row filled with `value`.
    pub fn with_row(&self, value: F) -> Self {
        let mut data = self.data.clone();
        data.extend(std::iter::repeat(value).take(self.cols));
        Matrix {
            rows: self.rows + 1,
            cols: self.cols,
            data,
        }
    }

    /// Return a copy with one additional column filled with `value`.
    pub fn with_col(&self, value: F) -> Self {
        let mut data = Vec::with_capacity(self.rows * (self.cols + 1));
        for i in 0..self.rows {
            data.extend_from_slice(self.row(i));
            data.push(value);
        }
        Matrix {
            rows: self.rows,
            cols: self.cols + 1,
            data,
        }
    }

    /// Return the matrix as a list of rows.
    pub fn to_rows(&self) -> Vec<Vec<F>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }
}

impl<F> Matrix<F>
where
    F: Copy + Zero + AddAssign,
{
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix::filled(rows, cols, F::zero())
    }

    pub fn row_sums(&self) -> Vec<F> {
        (0..self.rows)
            .map(|i| {
                let mut s = F::zero();
                for &x in self.row(i) {
                    s += x;
                }
                s
            })
            .collect()
    }

    pub fn col_sums(&self) -> Vec<F> {
        let mut sums = vec![F::zero(); self.cols];
        for ((_, j), x) in self.iter_cells() {
            sums[j] += x;
        }
        sums
    }
}

impl<F> Matrix<F>
where
    F: Copy + Zero + AddAssign + Mul<Output = F>,
{
    /// Return the sum of the entry-wise products of `self` and `other`.
    ///
    /// This is the total cost of an allocation `self` w.r.t. the cost
    /// matrix `other`. Both matrices must have the same dimensions.
    pub fn dot(&self, other: &Matrix<F>) -> F {
        debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        let mut value = F::zero();
        for (&x, &y) in self.data.iter().zip(other.data.iter()) {
            value += x * y;
        }
        value
    }
}

impl<F> Index<(usize, usize)> for Matrix<F> {
    type Output = F;

    fn index(&self, (i, j): (usize, usize)) -> &F {
        debug_assert!(i < self.rows && j < self.cols);
        &self.data[i * self.cols + j]
    }
}

impl<F> IndexMut<(usize, usize)> for Matrix<F> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut F {
        debug_assert!(i < self.rows && j < self.cols);
        &mut self.data[i * self.cols + j]
    }
}

impl<F> fmt::Display for Matrix<F>
where
    F: fmt::Display,
{
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for i in 0..self.rows {
            for j in 0..self.cols {
                if j > 0 {
                    write!(fmt, " ")?;
                }
                write!(fmt, "{}", self.data[i * self.cols + j])?;
            }
            writeln!(fmt)?;
        }
        Ok(())
    }
}
