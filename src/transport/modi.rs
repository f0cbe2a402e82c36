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

//! The MODI (modified distribution) method.
//!
//! Starting from an initial basic feasible allocation, each iteration
//! computes the potentials of the current basis, selects the non-basic
//! cell with the most negative reduced cost and shifts as much flow as
//! possible around its stepping-stone cycle. A new allocation is only
//! accepted if its cost does not exceed the cost of the current one, so
//! the accepted costs are non-increasing.
//!
//! The method stops if
//!
//! - no reduced cost is negative ([`SolutionState::Optimal`]),
//! - no pivot can be carried out or the pivot would increase the cost
//!   ([`SolutionState::Stalled`]), or
//! - the iteration limit is reached ([`SolutionState::Capped`]).
//!
//! In all cases the best allocation found is available.
//!
//! # Example
//!
//! ```
//! use rs_transport::transport::{InitialMethod, Problem, SolutionState, TransportSimplex};
//!
//! let p = Problem::new(
//!     vec![20.0, 30.0, 25.0],
//!     vec![10.0, 25.0, 40.0],
//!     vec![vec![8.0, 6.0, 10.0], vec![9.0, 12.0, 13.0], vec![14.0, 9.0, 16.0]],
//! )
//! .unwrap();
//!
//! let mut spx = TransportSimplex::new(&p);
//! spx.method = InitialMethod::NorthwestCorner;
//! assert_eq!(spx.solve(), SolutionState::Optimal);
//! assert_eq!(spx.initial_cost(), 915.0);
//! assert_eq!(spx.value(), 775.0);
//! ```

use super::balance::{Balanced, Dummy, Problem};
use super::cycle::find_cycle;
use super::initial::InitialMethod;
use super::pivot::{augment, clean_degenerate};
use super::potentials::{potentials, Potentials};
use super::pricing::{entering_cell, reduced_costs};
use super::{default_zero, Result, SolutionState, Value, DEFAULT_MAX_ITER};
use crate::matrix::Matrix;
use log::{debug, warn};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A MODI solver for transportation problems.
pub struct TransportSimplex<F> {
    problem: Balanced<F>,

    /// The method for the initial allocation.
    pub method: InitialMethod,
    /// The maximal number of iterations. Defaults to 100.
    pub max_iter: usize,
    /// Allocations up to this value are considered zero. Defaults to `1e-7`.
    pub zero: F,

    initial: Matrix<F>,
    initial_value: F,
    allocation: Matrix<F>,
    value: F,
    potentials: Option<Potentials<F>>,

    niter: usize,
    solution_state: SolutionState,
}

impl<F> TransportSimplex<F>
where
    F: Value,
{
    /// Create a solver for the problem.
    ///
    /// The problem is balanced, so the allocation has an additional row
    /// or column if total supply and total demand differ.
    pub fn new(problem: &Problem<F>) -> Self {
        TransportSimplex::from_balanced(problem.balance())
    }

    /// Create a solver for an already balanced problem.
    pub fn from_balanced(problem: Balanced<F>) -> Self {
        let (m, n) = (problem.num_sources(), problem.num_destinations());
        TransportSimplex {
            problem,
            method: InitialMethod::default(),
            max_iter: DEFAULT_MAX_ITER,
            zero: default_zero(),
            initial: Matrix::zeros(m, n),
            initial_value: F::zero(),
            allocation: Matrix::zeros(m, n),
            value: F::zero(),
            potentials: None,
            niter: 0,
            solution_state: SolutionState::Init,
        }
    }

    /// The balanced problem.
    pub fn balanced(&self) -> &Balanced<F> {
        &self.problem
    }

    /// Solve the transportation problem.
    ///
    /// Computes the initial allocation and runs MODI iterations until a
    /// terminal state is reached.
    pub fn solve(&mut self) -> SolutionState {
        self.start();
        while !self.solution_state.is_terminal() {
            self.iterate();
        }
        self.solution_state
    }

    /// Compute the initial allocation and reset the iteration counter.
    pub fn start(&mut self) {
        let b = &self.problem;
        let mut x = self.method.allocate(&b.supply, &b.demand, &b.costs);
        clean_degenerate(&mut x, self.zero);
        self.initial_value = x.dot(&b.costs);
        debug!("Initial allocation ({}) has cost {:?}", self.method, self.initial_value);

        self.initial = x.clone();
        self.allocation = x;
        self.value = self.initial_value;
        self.potentials = None;
        self.niter = 0;
        self.solution_state = SolutionState::Iterating;
    }

    /// Perform one MODI iteration.
    ///
    /// If the solver has not been started, [`TransportSimplex::start`]
    /// is called first. Nothing is done if the solver is already in a
    /// terminal state. Returns the new state.
    pub fn iterate(&mut self) -> SolutionState {
        match self.solution_state {
            SolutionState::Init => self.start(),
            SolutionState::Iterating => (),
            state => return state,
        }

        if self.niter >= self.max_iter {
            warn!("Iteration limit {} reached, the pivots might be cycling", self.max_iter);
            self.solution_state = SolutionState::Capped;
            return self.solution_state;
        }
        self.niter += 1;

        let costs = &self.problem.costs;
        let pot = potentials(&self.allocation, costs, self.zero);
        let reduced = reduced_costs(costs, &pot);
        let entering = entering_cell(&reduced, &self.allocation, self.zero);
        self.potentials = Some(pot);

        let cell = if let Some(cell) = entering {
            cell
        } else {
            debug!("Optimal after {} iterations with cost {:?}", self.niter, self.value);
            self.solution_state = SolutionState::Optimal;
            return self.solution_state;
        };

        let cycle = match find_cycle(&self.allocation, cell, self.zero) {
            Some(cycle) if cycle.len() >= 4 => cycle,
            _ => {
                warn!("No stepping-stone cycle through entering cell {:?}", cell);
                self.solution_state = SolutionState::Stalled;
                return self.solution_state;
            }
        };

        let mut x = self.allocation.clone();
        let theta = if let Some(theta) = augment(&mut x, &cycle, self.zero) {
            theta
        } else {
            warn!("No flow can be shifted around cycle {:?}", cycle);
            self.solution_state = SolutionState::Stalled;
            return self.solution_state;
        };

        let value = x.dot(costs);
        if value > self.value {
            warn!("Pivot on {:?} would increase the cost to {:?}", cell, value);
            self.solution_state = SolutionState::Stalled;
            return self.solution_state;
        }

        debug!(
            "Iteration {}: entering {:?}, theta {:?}, cost {:?}",
            self.niter, cell, theta, value
        );
        self.allocation = x;
        self.value = value;

        if self.niter >= self.max_iter {
            warn!("Iteration limit {} reached, the pivots might be cycling", self.max_iter);
            self.solution_state = SolutionState::Capped;
        }
        self.solution_state
    }

    /// Return the solution state of the latest computation.
    pub fn solution_state(&self) -> SolutionState {
        self.solution_state
    }

    pub fn num_iterations(&self) -> usize {
        self.niter
    }

    /// The best allocation found so far.
    pub fn allocation(&self) -> &Matrix<F> {
        &self.allocation
    }

    /// The total cost of the best allocation found so far.
    pub fn value(&self) -> F {
        self.value
    }

    /// The initial allocation.
    pub fn initial_allocation(&self) -> &Matrix<F> {
        &self.initial
    }

    /// The total cost of the initial allocation.
    pub fn initial_cost(&self) -> F {
        self.initial_value
    }

    /// The potentials computed in the latest iteration.
    pub fn potentials(&self) -> Option<&Potentials<F>> {
        self.potentials.as_ref()
    }

    /// Return the current solution.
    pub fn solution(&self) -> Solution<F> {
        Solution {
            method: self.method,
            initial_allocation: self.initial.clone(),
            initial_cost: self.initial_value,
            allocation: self.allocation.clone(),
            cost: self.value,
            state: self.solution_state,
            iterations: self.niter,
            dummy: self.problem.dummy,
        }
    }
}

/// The result of solving a transportation problem.
///
/// The allocations refer to the balanced problem, i.e. they contain the
/// dummy row or column if one has been added.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Solution<F> {
    pub method: InitialMethod,
    pub initial_allocation: Matrix<F>,
    pub initial_cost: F,
    pub allocation: Matrix<F>,
    /// The total cost of `allocation`.
    pub cost: F,
    pub state: SolutionState,
    pub iterations: usize,
    pub dummy: Option<Dummy<F>>,
}

impl<F> Solution<F>
where
    F: Value,
{
    /// Return `true` if the allocation is known to be optimal.
    pub fn is_optimal(&self) -> bool {
        self.state == SolutionState::Optimal
    }

    /// Return all positive shipments `(source, destination, amount)`
    /// between real sources and destinations.
    pub fn shipments(&self) -> Vec<(usize, usize, F)> {
        let dim = (self.allocation.num_rows(), self.allocation.num_cols());
        let is_dummy = |cell: (usize, usize)| self.dummy.as_ref().map_or(false, |d| d.contains(dim, cell));
        self.allocation
            .iter_cells()
            .filter(|&(cell, a)| a > F::zero() && !is_dummy(cell))
            .map(|((i, j), a)| (i, j, a))
            .collect()
    }
}

/// Solve a transportation problem with the MODI method.
///
/// The initial allocation is computed with `method`, all other
/// parameters have their default values.
///
/// # Example
///
/// ```
/// use rs_transport::transport::{transportation, Dummy, InitialMethod};
///
/// let sol = transportation(
///     vec![30.0, 20.0],
///     vec![10.0, 25.0],
///     vec![vec![1.0, 2.0], vec![3.0, 1.0]],
///     InitialMethod::MinimumCost,
/// )
/// .unwrap();
/// assert!(sol.is_optimal());
/// assert_eq!(sol.dummy, Some(Dummy::Column(15.0)));
/// assert_eq!(sol.cost, 40.0);
/// assert_eq!(sol.shipments(), vec![(0, 0, 10.0), (0, 1, 5.0), (1, 1, 20.0)]);
/// ```
pub fn transportation<F>(supply: Vec<F>, demand: Vec<F>, costs: Vec<Vec<F>>, method: InitialMethod) -> Result<Solution<F>>
where
    F: Value,
{
    let problem = Problem::new(supply, demand, costs)?;
    let mut spx = TransportSimplex::new(&problem);
    spx.method = method;
    spx.solve();
    Ok(spx.solution())
}
