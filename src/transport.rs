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

//! Transportation problem algorithms.
//!
//! A transportation problem consists of `m` sources with a supply, `n`
//! destinations with a demand and a cost per unit shipped for each
//! source/destination pair. The problem is solved in three phases:
//!
//! 1. the problem is balanced by adding a dummy row or column
//!    ([`balance`]),
//! 2. an initial basic feasible allocation is constructed by one of the
//!    methods in [`initial`],
//! 3. the allocation is improved by the MODI method ([`modi`]) until
//!    it is optimal, until no improving pivot can be carried out or
//!    until the iteration limit is reached.

pub mod balance;
pub mod cycle;
pub mod initial;
pub mod modi;
pub mod pivot;
pub mod potentials;
pub mod pricing;

pub use self::balance::{Balanced, Dummy, Problem};
pub use self::initial::InitialMethod;
pub use self::modi::{transportation, Solution, TransportSimplex};

use num_traits::{Float, NumAssign};
use std::fmt::Debug;
use thiserror::Error;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The default threshold below which an allocated amount is considered zero.
pub const DEFAULT_ZERO: f64 = 1e-7;

/// The default maximal number of MODI iterations.
pub const DEFAULT_MAX_ITER: usize = 100;

/// Numeric types usable as supply, demand, cost and allocation values.
pub trait Value: Float + NumAssign + Debug {}

impl<F> Value for F where F: Float + NumAssign + Debug {}

/// Return [`DEFAULT_ZERO`] converted to `F`.
///
/// Falls back to the machine epsilon of `F` if the conversion fails.
pub fn default_zero<F: Value>() -> F {
    F::from(DEFAULT_ZERO).unwrap_or_else(F::epsilon)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum SolutionState {
    /// The problem has not been solved, yet
    Init,
    /// The MODI iterations have been started but not finished
    Iterating,
    /// The allocation is optimal, no reduced cost is negative
    Optimal,
    /// No improving pivot could be carried out, the best allocation found
    /// so far is kept
    Stalled,
    /// The iteration limit has been reached
    Capped,
}

impl SolutionState {
    /// Return `true` if no more iterations will be done.
    pub fn is_terminal(self) -> bool {
        matches!(self, SolutionState::Optimal | SolutionState::Stalled | SolutionState::Capped)
    }
}

/// Invalid input data of a transportation problem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("supply and demand must not be empty")]
    Empty,
    #[error("cost matrix has dimension {rows}x{cols}, expected {supply}x{demand}")]
    Dimension {
        rows: usize,
        cols: usize,
        supply: usize,
        demand: usize,
    },
    #[error("missing or undefined value in {0}")]
    Missing(String),
    #[error("negative value in {0}")]
    Negative(String),
}

pub type Result<T> = std::result::Result<T, Error>;
