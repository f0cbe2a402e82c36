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

//! Validation and balancing of transportation problems.
//!
//! A problem is balanced if the total supply equals the total demand.
//! Unbalanced problems are balanced by adding a dummy destination
//! (if there is excess supply) or a dummy source (if there is excess
//! demand). All cells of the dummy row or column have cost zero.
//!
//! # Example
//!
//! ```
//! use rs_transport::transport::{Dummy, Problem};
//!
//! let p = Problem::new(vec![30.0, 20.0], vec![10.0, 25.0], vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
//! let b = p.balance();
//! assert_eq!(b.dummy, Some(Dummy::Column(15.0)));
//! assert_eq!(b.demand, vec![10.0, 25.0, 15.0]);
//! assert_eq!(b.costs.row(1), &[3.0, 4.0, 0.0]);
//! ```

use super::{Error, Result, Value};
use crate::matrix::Matrix;
use log::debug;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A validated transportation problem.
#[derive(Clone, Debug)]
pub struct Problem<F> {
    supply: Vec<F>,
    demand: Vec<F>,
    costs: Matrix<F>,
}

/// The dummy source or destination added by balancing.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Dummy<F> {
    /// A dummy source (last row) with the given supply.
    Row(F),
    /// A dummy destination (last column) with the given demand.
    Column(F),
}

impl<F> Dummy<F> {
    /// Return `true` if cell `(i, j)` of a balanced `m x n` allocation
    /// lies in this dummy row or column.
    pub fn contains(&self, (m, n): (usize, usize), (i, j): (usize, usize)) -> bool {
        match self {
            Dummy::Row(_) => i + 1 == m,
            Dummy::Column(_) => j + 1 == n,
        }
    }
}

/// A balanced transportation problem.
#[derive(Clone, Debug)]
pub struct Balanced<F> {
    pub supply: Vec<F>,
    pub demand: Vec<F>,
    pub costs: Matrix<F>,
    /// The dummy row or column, if one has been added.
    pub dummy: Option<Dummy<F>>,
}

impl<F> Problem<F>
where
    F: Value,
{
    /// Create a new problem from supplies, demands and a cost matrix given row by row.
    ///
    /// Fails if the dimensions do not match, if some value is not a
    /// finite number or if some supply or demand is negative.
    pub fn new(supply: Vec<F>, demand: Vec<F>, costs: Vec<Vec<F>>) -> Result<Self> {
        if supply.is_empty() || demand.is_empty() {
            return Err(Error::Empty);
        }

        let dimension_error = |rows: usize, cols: usize| Error::Dimension {
            rows,
            cols,
            supply: supply.len(),
            demand: demand.len(),
        };

        if costs.len() != supply.len() {
            return Err(dimension_error(costs.len(), costs.first().map(Vec::len).unwrap_or(0)));
        }
        if let Some(row) = costs.iter().find(|row| row.len() != demand.len()) {
            return Err(dimension_error(costs.len(), row.len()));
        }

        let costs = Matrix::from_rows(costs).ok_or_else(|| dimension_error(supply.len(), 0))?;
        Problem::from_matrix(supply, demand, costs)
    }

    /// Create a new problem with the cost matrix given as [`Matrix`].
    pub fn from_matrix(supply: Vec<F>, demand: Vec<F>, costs: Matrix<F>) -> Result<Self> {
        if supply.is_empty() || demand.is_empty() {
            return Err(Error::Empty);
        }
        if costs.num_rows() != supply.len() || costs.num_cols() != demand.len() {
            return Err(Error::Dimension {
                rows: costs.num_rows(),
                cols: costs.num_cols(),
                supply: supply.len(),
                demand: demand.len(),
            });
        }

        check_amounts("supply", &supply)?;
        check_amounts("demand", &demand)?;
        if let Some(((i, j), _)) = costs.iter_cells().find(|&(_, c)| !c.is_finite()) {
            return Err(Error::Missing(format!("costs[{}][{}]", i, j)));
        }

        Ok(Problem { supply, demand, costs })
    }

    pub fn supply(&self) -> &[F] {
        &self.supply
    }

    pub fn demand(&self) -> &[F] {
        &self.demand
    }

    pub fn costs(&self) -> &Matrix<F> {
        &self.costs
    }

    pub fn total_supply(&self) -> F {
        sum(&self.supply)
    }

    pub fn total_demand(&self) -> F {
        sum(&self.demand)
    }

    /// Balance the problem.
    ///
    /// Totals that differ only by the rounding error of summing up the
    /// supplies and demands are considered equal. The bound is relative
    /// to the larger total.
    pub fn balance(&self) -> Balanced<F> {
        self.balance_with(self.rounding_tolerance())
    }

    fn rounding_tolerance(&self) -> F {
        let scale = self.total_supply().max(self.total_demand());
        let terms = F::from(self.supply.len() + self.demand.len()).unwrap_or_else(F::one);
        F::epsilon() * terms * scale
    }

    /// Balance the problem.
    ///
    /// If the total supply and total demand differ by at most
    /// `tolerance` the problem is considered balanced already and is
    /// returned unchanged.
    pub fn balance_with(&self, tolerance: F) -> Balanced<F> {
        let total_supply = self.total_supply();
        let total_demand = self.total_demand();
        debug!("Total supply: {:?}, total demand: {:?}", total_supply, total_demand);

        let mut supply = self.supply.clone();
        let mut demand = self.demand.clone();

        if total_supply - total_demand > tolerance {
            let excess = total_supply - total_demand;
            debug!("Add dummy destination with demand {:?}", excess);
            demand.push(excess);
            Balanced {
                supply,
                demand,
                costs: self.costs.with_col(F::zero()),
                dummy: Some(Dummy::Column(excess)),
            }
        } else if total_demand - total_supply > tolerance {
            let excess = total_demand - total_supply;
            debug!("Add dummy source with supply {:?}", excess);
            supply.push(excess);
            Balanced {
                supply,
                demand,
                costs: self.costs.with_row(F::zero()),
                dummy: Some(Dummy::Row(excess)),
            }
        } else {
            Balanced {
                supply,
                demand,
                costs: self.costs.clone(),
                dummy: None,
            }
        }
    }
}

impl<F> Balanced<F>
where
    F: Value,
{
    pub fn num_sources(&self) -> usize {
        self.supply.len()
    }

    pub fn num_destinations(&self) -> usize {
        self.demand.len()
    }

    /// Return `true` if cell `(i, j)` lies in the dummy row or column.
    pub fn is_dummy(&self, cell: (usize, usize)) -> bool {
        let dim = (self.num_sources(), self.num_destinations());
        self.dummy.as_ref().map_or(false, |d| d.contains(dim, cell))
    }
}

fn check_amounts<F: Value>(name: &str, values: &[F]) -> Result<()> {
    for (i, &x) in values.iter().enumerate() {
        if !x.is_finite() {
            return Err(Error::Missing(format!("{}[{}]", name, i)));
        }
        if x < F::zero() {
            return Err(Error::Negative(format!("{}[{}]", name, i)));
        }
    }
    Ok(())
}

fn sum<F: Value>(values: &[F]) -> F {
    values.iter().fold(F::zero(), |s, &x| s + x)
}
