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

use rs_transport::transport::initial::{minimum_cost, northwest_corner, vogel};
use rs_transport::transport::{transportation, Dummy, Error, InitialMethod, Problem, SolutionState, TransportSimplex};
use rs_transport::Matrix;

use std::error::Error as StdError;

const METHODS: &[InitialMethod] = &[
    InitialMethod::NorthwestCorner,
    InitialMethod::MinimumCost,
    InitialMethod::Vogel,
];

/// (supply, demand, costs, optimal value)
type Instance = (Vec<f64>, Vec<f64>, Vec<Vec<f64>>, f64);

fn instances() -> Vec<Instance> {
    vec![
        (
            vec![20.0, 30.0, 25.0],
            vec![10.0, 25.0, 40.0],
            vec![vec![8.0, 6.0, 10.0], vec![9.0, 12.0, 13.0], vec![14.0, 9.0, 16.0]],
            775.0,
        ),
        (
            vec![7.0, 9.0, 18.0],
            vec![5.0, 8.0, 7.0, 14.0],
            vec![
                vec![19.0, 30.0, 50.0, 10.0],
                vec![70.0, 30.0, 40.0, 60.0],
                vec![40.0, 8.0, 70.0, 20.0],
            ],
            743.0,
        ),
        (
            vec![10.0, 15.0],
            vec![8.0, 9.0, 14.0],
            vec![vec![4.0, 6.0, 3.0], vec![5.0, 2.0, 7.0]],
            78.0,
        ),
    ]
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_feasible(x: &Matrix<f64>, supply: &[f64], demand: &[f64]) {
    for (s, t) in x.row_sums().iter().zip(supply) {
        assert!((s - t).abs() <= 1e-6, "row sum {} != supply {}", s, t);
    }
    for (s, t) in x.col_sums().iter().zip(demand) {
        assert!((s - t).abs() <= 1e-6, "column sum {} != demand {}", s, t);
    }
    assert!(x.iter_cells().all(|(_, a)| a >= 0.0));
}

#[test]
fn test_scenario_northwest() -> Result<(), Box<dyn StdError>> {
    init_logger();
    let p = Problem::new(
        vec![20.0, 30.0, 25.0],
        vec![10.0, 25.0, 40.0],
        vec![vec![8.0, 6.0, 10.0], vec![9.0, 12.0, 13.0], vec![14.0, 9.0, 16.0]],
    )?;
    let mut spx = TransportSimplex::new(&p);
    spx.method = InitialMethod::NorthwestCorner;
    spx.start();

    assert_eq!(
        spx.initial_allocation().to_rows(),
        vec![vec![10.0, 10.0, 0.0], vec![0.0, 15.0, 15.0], vec![0.0, 0.0, 25.0]]
    );
    assert_eq!(spx.initial_cost(), 915.0);

    let mut last = spx.value();
    while !spx.iterate().is_terminal() {
        assert_feasible(spx.allocation(), p.supply(), p.demand());
        assert!(spx.value() <= last);
        last = spx.value();
    }

    assert_eq!(spx.solution_state(), SolutionState::Optimal);
    assert!(spx.num_iterations() <= spx.max_iter);
    assert!(spx.value() >= 743.0);
    assert_eq!(spx.value(), 775.0);
    assert_feasible(spx.allocation(), p.supply(), p.demand());

    Ok(())
}

#[test]
fn test_known_optima() -> Result<(), Box<dyn StdError>> {
    init_logger();
    for (supply, demand, costs, opt) in instances() {
        for &method in METHODS {
            let sol = transportation(supply.clone(), demand.clone(), costs.clone(), method)?;
            assert_eq!(sol.state, SolutionState::Optimal, "method: {}", method);
            assert_eq!(sol.cost, opt, "method: {}", method);
            assert!(sol.cost <= sol.initial_cost);
            assert_eq!(sol.method, method);

            let cost = Matrix::from_rows(costs.clone()).unwrap();
            if sol.dummy.is_none() {
                assert_eq!(sol.allocation.dot(&cost), sol.cost);
                assert_feasible(&sol.allocation, &supply, &demand);
            }
        }
    }
    Ok(())
}

#[test]
fn test_excess_demand() -> Result<(), Box<dyn StdError>> {
    init_logger();
    // total supply 25, total demand 31
    let p = Problem::new(
        vec![10.0, 15.0],
        vec![8.0, 9.0, 14.0],
        vec![vec![4.0, 6.0, 3.0], vec![5.0, 2.0, 7.0]],
    )?;
    let mut spx = TransportSimplex::new(&p);
    spx.method = InitialMethod::MinimumCost;
    assert_eq!(spx.solve(), SolutionState::Optimal);

    let b = spx.balanced();
    assert_eq!(b.dummy, Some(Dummy::Row(6.0)));
    assert_eq!(b.costs.row(2), &[0.0, 0.0, 0.0]);
    assert_feasible(spx.allocation(), &b.supply, &b.demand);

    // the dummy row carries flow but no cost
    let x = spx.allocation();
    assert!(x.row(2).iter().sum::<f64>() == 6.0);
    assert_eq!(x.dot(&b.costs), spx.value());
    assert_eq!(spx.value(), 78.0);

    let shipped: f64 = spx.solution().shipments().iter().map(|&(_, _, a)| a).sum();
    assert_eq!(shipped, 25.0);

    Ok(())
}

#[test]
fn test_excess_supply() -> Result<(), Box<dyn StdError>> {
    init_logger();
    let sol = transportation(
        vec![30.0, 20.0],
        vec![10.0, 25.0],
        vec![vec![1.0, 2.0], vec![3.0, 1.0]],
        InitialMethod::NorthwestCorner,
    )?;
    assert_eq!(sol.dummy, Some(Dummy::Column(15.0)));
    assert_eq!(sol.allocation.num_cols(), 3);
    assert_eq!(sol.initial_cost, 55.0);
    assert_eq!(sol.cost, 40.0);
    assert!(sol.is_optimal());
    Ok(())
}

#[test]
fn test_input_errors() {
    let r = transportation(vec![1.0, f64::NAN], vec![1.0], vec![vec![1.0], vec![1.0]], InitialMethod::Vogel);
    assert_eq!(r.unwrap_err(), Error::Missing("supply[1]".to_string()));

    let r = transportation(vec![1.0], vec![1.0], vec![vec![1.0, 2.0]], InitialMethod::Vogel);
    assert!(matches!(r, Err(Error::Dimension { .. })));

    let r = transportation(vec![1.0], vec![-1.0], vec![vec![1.0]], InitialMethod::Vogel);
    assert_eq!(r.unwrap_err(), Error::Negative("demand[0]".to_string()));
}

#[test]
fn test_f32() -> Result<(), Box<dyn StdError>> {
    let sol = transportation(
        vec![20.0f32, 30.0, 25.0],
        vec![10.0, 25.0, 40.0],
        vec![vec![8.0, 6.0, 10.0], vec![9.0, 12.0, 13.0], vec![14.0, 9.0, 16.0]],
        InitialMethod::NorthwestCorner,
    )?;
    assert_eq!(sol.cost, 775.0);
    Ok(())
}

/// A simple deterministic pseudo random number generator.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> f64 {
        (self.next() % n) as f64
    }

    fn fraction(&mut self) -> f64 {
        self.below(1000) / 7.0
    }
}

fn random_problem(rng: &mut Lcg, fractional: bool) -> Problem<f64> {
    let m = 2 + rng.below(5) as usize;
    let n = 2 + rng.below(5) as usize;
    let amount = |rng: &mut Lcg| if fractional { rng.fraction() } else { rng.below(50) };
    let supply = (0..m).map(|_| amount(rng)).collect();
    let demand = (0..n).map(|_| amount(rng)).collect();
    let costs = (0..m).map(|_| (0..n).map(|_| 1.0 + rng.below(20)).collect()).collect();
    Problem::new(supply, demand, costs).unwrap()
}

#[test]
fn test_random_properties() {
    init_logger();
    let mut rng = Lcg(42);
    for k in 0..200 {
        let p = random_problem(&mut rng, k % 2 == 1);
        let b = p.balance();
        let (m, n) = (b.num_sources(), b.num_destinations());

        let total_supply: f64 = b.supply.iter().sum();
        let total_demand: f64 = b.demand.iter().sum();
        assert!((total_supply - total_demand).abs() <= 1e-6);

        // initial methods
        let nw = northwest_corner(&b.supply, &b.demand);
        assert_eq!(nw, northwest_corner(&b.supply, &b.demand));
        for x in &[nw, minimum_cost(&b.supply, &b.demand, &b.costs), vogel(&b.supply, &b.demand, &b.costs)] {
            assert_feasible(x, &b.supply, &b.demand);
            assert!(x.iter_cells().filter(|&(_, a)| a > 1e-7).count() <= m + n - 1);
        }

        // MODI
        for &method in METHODS {
            let mut spx = TransportSimplex::new(&p);
            spx.method = method;
            spx.max_iter = 50;
            spx.start();
            let mut last = spx.initial_cost();
            while !spx.iterate().is_terminal() {
                assert_feasible(spx.allocation(), &b.supply, &b.demand);
                assert!(spx.value() <= last + 1e-9, "instance {} method {}", k, method);
                last = spx.value();
            }
            assert!(spx.num_iterations() <= 50);
            assert_feasible(spx.allocation(), &b.supply, &b.demand);
            assert!(spx.value() <= spx.initial_cost());

            let sol = spx.solution();
            assert_eq!(sol.allocation.dot(&spx.balanced().costs), sol.cost);
            assert!(sol.state.is_terminal());
        }
    }
}

#[cfg(feature = "serialize")]
mod serialize {
    use rs_transport::transport::{transportation, InitialMethod, Solution};

    #[test]
    fn test_serde() {
        let sol = transportation(
            vec![30.0, 20.0],
            vec![10.0, 25.0],
            vec![vec![1.0, 2.0], vec![3.0, 1.0]],
            InitialMethod::MinimumCost,
        )
        .unwrap();

        let serialized = serde_json::to_string(&sol).unwrap();
        assert!(serialized.contains("\"method\":\"minimum_cost\""));
        assert!(serialized.contains("\"state\":\"Optimal\""));

        let back: Solution<f64> = serde_json::from_str(&serialized).unwrap();
        assert_eq!(back.allocation, sol.allocation);
        assert_eq!(back.cost, sol.cost);
        assert_eq!(back.dummy, sol.dummy);
    }
}
