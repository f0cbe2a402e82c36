// Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

#![forbid(unsafe_code)]

//! A library for transportation problems.
//!
//! A transportation problem asks for the cheapest way to ship goods from
//! a set of sources with given supplies to a set of destinations with
//! given demands. This crate computes initial basic feasible solutions
//! (northwest corner, minimum cost and Vogel's approximation method)
//! and improves them with the MODI method.
//!
//! # Example
//!
//! ```
//! use rs_transport::transport::{transportation, InitialMethod, SolutionState};
//!
//! let sol = transportation(
//!     vec![7.0, 9.0, 18.0],
//!     vec![5.0, 8.0, 7.0, 14.0],
//!     vec![
//!         vec![19.0, 30.0, 50.0, 10.0],
//!         vec![70.0, 30.0, 40.0, 60.0],
//!         vec![40.0, 8.0, 70.0, 20.0],
//!     ],
//!     InitialMethod::Vogel,
//! )
//! .unwrap();
//!
//! assert_eq!(sol.state, SolutionState::Optimal);
//! assert_eq!(sol.initial_cost, 779.0);
//! assert_eq!(sol.cost, 743.0);
//! ```

// # Data structures

pub mod matrix;
pub use self::matrix::Matrix;

// # Algorithms

pub mod transport;
pub use self::transport::{transportation, InitialMethod, Problem, Solution, SolutionState, TransportSimplex};

// # File formats

#[cfg(feature = "dimacs")]
pub mod dimacs;
