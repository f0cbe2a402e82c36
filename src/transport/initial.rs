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

//! Initial basic feasible solutions.
//!
//! All methods expect a balanced problem and return an allocation whose
//! row sums equal the supplies and whose column sums equal the demands.
//! Each step of each method exhausts at least one row or column, hence
//! the allocation has at most `m + n - 1` positive cells.

use super::Value;
use crate::matrix::Matrix;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The method used to compute the initial allocation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum InitialMethod {
    #[cfg_attr(feature = "serialize", serde(rename = "northwest"))]
    NorthwestCorner,
    #[cfg_attr(feature = "serialize", serde(rename = "minimum_cost"))]
    MinimumCost,
    #[cfg_attr(feature = "serialize", serde(rename = "vogel"))]
    Vogel,
}

impl Default for InitialMethod {
    fn default() -> Self {
        InitialMethod::NorthwestCorner
    }
}

impl InitialMethod {
    /// Compute an initial allocation for a balanced problem.
    pub fn allocate<F: Value>(self, supply: &[F], demand: &[F], costs: &Matrix<F>) -> Matrix<F> {
        match self {
            InitialMethod::NorthwestCorner => northwest_corner(supply, demand),
            InitialMethod::MinimumCost => minimum_cost(supply, demand, costs),
            InitialMethod::Vogel => vogel(supply, demand, costs),
        }
    }

    /// The canonical name of the method.
    pub fn name(self) -> &'static str {
        match self {
            InitialMethod::NorthwestCorner => "northwest",
            InitialMethod::MinimumCost => "minimum_cost",
            InitialMethod::Vogel => "vogel",
        }
    }
}

impl fmt::Display for InitialMethod {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.name())
    }
}

/// Error returned when parsing an unknown method name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown initial method '{0}' (expected one of 'northwest', 'minimum_cost', 'vogel')")]
pub struct ParseMethodError(String);

impl FromStr for InitialMethod {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "northwest" | "northwest_corner" | "northwestcorner" | "nw" => Ok(InitialMethod::NorthwestCorner),
            "minimum_cost" | "minimumcost" | "min_cost" => Ok(InitialMethod::MinimumCost),
            "vogel" => Ok(InitialMethod::Vogel),
            _ => Err(ParseMethodError(s.to_string())),
        }
    }
}

/// The northwest corner method.
///
/// Starting in the top-left cell the largest possible amount is
/// assigned. Then the row index is advanced if the row's supply is
/// used up and the column index is advanced if the column's demand is
/// satisfied. The costs are not taken into account.
///
/// # Example
///
/// ```
/// use rs_transport::transport::initial::northwest_corner;
///
/// let x = northwest_corner(&[20.0, 30.0, 25.0], &[10.0, 25.0, 40.0]);
/// assert_eq!(x.to_rows(), vec![vec![10.0, 10.0, 0.0], vec![0.0, 15.0, 15.0], vec![0.0, 0.0, 25.0]]);
/// ```
pub fn northwest_corner<F: Value>(supply: &[F], demand: &[F]) -> Matrix<F> {
    let mut supply = supply.to_vec();
    let mut demand = demand.to_vec();
    let mut x = Matrix::zeros(supply.len(), demand.len());

    let (mut i, mut j) = (0, 0);
    while i < supply.len() && j < demand.len() {
        let d = supply[i].min(demand[j]);
        x[(i, j)] = d;
        supply[i] -= d;
        demand[j] -= d;

        let row_done = supply[i] <= F::zero();
        let col_done = demand[j] <= F::zero();
        if row_done {
            i += 1;
        }
        if col_done {
            j += 1;
        }
    }

    x
}

/// The minimum cost method.
///
/// The cells are visited by increasing cost, ties are broken by the
/// row-major order of the cells. Each cell whose row and column still
/// have remaining capacity receives the largest possible amount.
pub fn minimum_cost<F: Value>(supply: &[F], demand: &[F], costs: &Matrix<F>) -> Matrix<F> {
    let mut supply = supply.to_vec();
    let mut demand = demand.to_vec();
    let mut x = Matrix::zeros(supply.len(), demand.len());

    let mut cells: Vec<(usize, usize)> = costs.iter_cells().map(|(c, _)| c).collect();
    // stable sort, so equal costs keep row-major order
    cells.sort_by(|&a, &b| costs[a].partial_cmp(&costs[b]).unwrap_or(Ordering::Equal));

    for (i, j) in cells {
        if supply[i] > F::zero() && demand[j] > F::zero() {
            let d = supply[i].min(demand[j]);
            x[(i, j)] = d;
            supply[i] -= d;
            demand[j] -= d;
        }
    }

    x
}

/// Vogel's approximation method.
///
/// In each step the penalty of each row with remaining supply and
/// each column with remaining demand is computed as the difference
/// between the two smallest costs of its eligible cells. The row or
/// column with the largest penalty is chosen (rows before columns, lower
/// indices first) and its cheapest eligible cell receives the largest
/// possible amount. A row or column with only one eligible cell has an
/// infinite penalty.
pub fn vogel<F: Value>(supply: &[F], demand: &[F], costs: &Matrix<F>) -> Matrix<F> {
    let (m, n) = (supply.len(), demand.len());
    let mut supply = supply.to_vec();
    let mut demand = demand.to_vec();
    let mut x = Matrix::zeros(m, n);

    // Working copy of the costs, cells of used up rows/columns are +inf.
    let inf = F::infinity();
    let mut work = costs.clone();
    for i in (0..m).filter(|&i| supply[i] <= F::zero()) {
        work.fill_row(i, inf);
    }
    for j in (0..n).filter(|&j| demand[j] <= F::zero()) {
        work.fill_col(j, inf);
    }

    while supply.iter().any(|&s| s > F::zero()) && demand.iter().any(|&d| d > F::zero()) {
        let mut best: Option<(F, Line)> = None;
        let mut update = |pen: Option<F>, line: Line| {
            if let Some(p) = pen {
                if best.map(|(q, _)| p > q).unwrap_or(true) {
                    best = Some((p, line));
                }
            }
        };
        for i in (0..m).filter(|&i| supply[i] > F::zero()) {
            update(penalty(work.row(i).iter().copied()), Line::Row(i));
        }
        for j in (0..n).filter(|&j| demand[j] > F::zero()) {
            update(penalty(work.col(j)), Line::Col(j));
        }

        let (i, j) = match best {
            Some((_, Line::Row(i))) => (i, argmin(work.row(i).iter().copied())),
            Some((_, Line::Col(j))) => (argmin(work.col(j)), j),
            // only rounding residues are left
            None => break,
        };

        let d = supply[i].min(demand[j]);
        x[(i, j)] = d;
        supply[i] -= d;
        demand[j] -= d;

        if supply[i] <= F::zero() {
            work.fill_row(i, inf);
        }
        if demand[j] <= F::zero() {
            work.fill_col(j, inf);
        }
    }

    x
}

#[derive(Clone, Copy)]
enum Line {
    Row(usize),
    Col(usize),
}

/// The difference of the two smallest finite values.
///
/// Returns `None` if there is no finite value and infinity if there is
/// exactly one.
fn penalty<F, I>(values: I) -> Option<F>
where
    F: Value,
    I: Iterator<Item = F>,
{
    let mut first: Option<F> = None;
    let mut second: Option<F> = None;
    for c in values.filter(|c| c.is_finite()) {
        match first {
            Some(f) if c >= f => {
                if second.map(|s| c < s).unwrap_or(true) {
                    second = Some(c);
                }
            }
            _ => {
                second = first;
                first = Some(c);
            }
        }
    }
    first.map(|f| second.map(|s| s - f).unwrap_or_else(F::infinity))
}

/// The index of the first minimal value.
fn argmin<F, I>(values: I) -> usize
where
    F: Value,
    I: Iterator<Item = F>,
{
    let mut best = 0;
    let mut min = F::infinity();
    for (k, c) in values.enumerate() {
        if c < min {
            min = c;
            best = k;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::{minimum_cost, northwest_corner, penalty, vogel, InitialMethod};
    use crate::matrix::Matrix;

    fn scenario() -> (Vec<f64>, Vec<f64>, Matrix<f64>) {
        (
            vec![20.0, 30.0, 25.0],
            vec![10.0, 25.0, 40.0],
            Matrix::from_rows(vec![vec![8.0, 6.0, 10.0], vec![9.0, 12.0, 13.0], vec![14.0, 9.0, 16.0]]).unwrap(),
        )
    }

    #[test]
    fn test_northwest_corner() {
        let (supply, demand, costs) = scenario();
        let x = northwest_corner(&supply, &demand);
        assert_eq!(
            x.to_rows(),
            vec![vec![10.0, 10.0, 0.0], vec![0.0, 15.0, 15.0], vec![0.0, 0.0, 25.0]]
        );
        assert_eq!(x.dot(&costs), 915.0);
        assert_eq!(x, northwest_corner(&supply, &demand));
    }

    #[test]
    fn test_northwest_corner_degenerate() {
        // supply of row 0 and demand of column 0 are exhausted at the same time
        let x = northwest_corner(&[5.0, 5.0], &[5.0, 5.0]);
        assert_eq!(x.to_rows(), vec![vec![5.0, 0.0], vec![0.0, 5.0]]);
    }

    #[test]
    fn test_minimum_cost() {
        let (supply, demand, costs) = scenario();
        let x = minimum_cost(&supply, &demand, &costs);
        assert_eq!(
            x.to_rows(),
            vec![vec![0.0, 20.0, 0.0], vec![10.0, 0.0, 20.0], vec![0.0, 5.0, 20.0]]
        );
        assert_eq!(x.dot(&costs), 835.0);
    }

    #[test]
    fn test_minimum_cost_ties() {
        // all costs equal: row-major order decides, which is the northwest corner
        let costs = Matrix::filled(2, 3, 1.0);
        let supply = [4.0, 6.0];
        let demand = [3.0, 3.0, 4.0];
        assert_eq!(minimum_cost(&supply, &demand, &costs), northwest_corner(&supply, &demand));
    }

    #[test]
    fn test_vogel() {
        let (supply, demand, costs) = scenario();
        let x = vogel(&supply, &demand, &costs);
        assert_eq!(
            x.to_rows(),
            vec![vec![0.0, 0.0, 20.0], vec![10.0, 0.0, 20.0], vec![0.0, 25.0, 0.0]]
        );
        assert_eq!(x.dot(&costs), 775.0);
        assert_eq!(x.row_sums(), supply);
        assert_eq!(x.col_sums(), demand);
    }

    #[test]
    fn test_penalty() {
        let inf = f64::INFINITY;
        assert_eq!(penalty(vec![4.0, 1.0, 3.0].into_iter()), Some(2.0));
        assert_eq!(penalty(vec![2.0, inf, 2.0].into_iter()), Some(0.0));
        assert_eq!(penalty(vec![inf, 7.0, inf].into_iter()), Some(inf));
        assert_eq!(penalty(vec![inf, inf].into_iter()), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("northwest".parse(), Ok(InitialMethod::NorthwestCorner));
        assert_eq!("minimum_cost".parse(), Ok(InitialMethod::MinimumCost));
        assert_eq!("Vogel".parse(), Ok(InitialMethod::Vogel));
        assert!("simplex".parse::<InitialMethod>().is_err());
        for &m in &[InitialMethod::NorthwestCorner, InitialMethod::MinimumCost, InitialMethod::Vogel] {
            assert_eq!(m.to_string().parse(), Ok(m));
        }
    }
}
