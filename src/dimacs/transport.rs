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

//! This module implements read and write functions for transportation
//! problems. A file must look as follows.
//!
//! 1. empty lines are allowed and ignored
//! 2. a line starting with `c` is a comment line and is ignored
//! 3. the first non-comment line must have the form `p trn <m> <n>`,
//!    where `<m>` is the number of sources and `<n>` the number of
//!    destinations, both > 0.
//! 4. supply lines `s <i> <supply>` with a source number `<i>` in
//!    `1..m`, demand lines `d <j> <demand>` with a destination number
//!    `<j>` in `1..n` and arc lines `a <i> <j> <cost>` follow in any
//!    order. There is at most one supply line per source and at most
//!    one demand line per destination. Sources and destinations without
//!    a supply or demand line have supply or demand 0.
//! 5. there must be exactly one arc line for each of the `m * n`
//!    source/destination pairs.
//!
//! A solution file consists of a line `s <value>` with the total cost
//! followed by lines `f <i> <j> <amount>` for each positive shipment.

use super::{DimacsReader, Error, Result};
use crate::matrix::Matrix;
use crate::transport::{Problem, Solution, Value};
use std::fmt::Display;
use std::io::{Read, Write};
use std::str::FromStr;

/// Read a transportation problem.
pub fn read<R, F>(r: R) -> Result<Problem<F>>
where
    R: Read,
    F: Value + FromStr,
    F::Err: Display,
{
    let mut reader = DimacsReader::new(r);

    // Read the problem line.
    let mut pline = reader.expect_line('p')?;
    pline.expect("trn")?;
    let m: usize = pline.number()?;
    let n: usize = pline.number()?;
    pline.end()?;

    if m == 0 || n == 0 {
        return Err(Error::Data {
            line: pline.line,
            msg: "number of sources and destinations must be positive".to_string(),
        });
    }

    let mut supply: Vec<Option<F>> = vec![None; m];
    let mut demand: Vec<Option<F>> = vec![None; n];
    let mut costs: Matrix<Option<F>> = Matrix::filled(m, n, None);

    while let Some((d, mut toks)) = reader.next_line()? {
        match d {
            's' => {
                let i = toks.index(m, "source")?;
                if supply[i].is_some() {
                    return Err(Error::Data {
                        line: toks.line,
                        msg: format!("duplicate supply of source {}", i + 1),
                    });
                }
                supply[i] = Some(toks.number()?);
            }
            'd' => {
                let j = toks.index(n, "destination")?;
                if demand[j].is_some() {
                    return Err(Error::Data {
                        line: toks.line,
                        msg: format!("duplicate demand of destination {}", j + 1),
                    });
                }
                demand[j] = Some(toks.number()?);
            }
            'a' => {
                let i = toks.index(m, "source")?;
                let j = toks.index(n, "destination")?;
                if costs[(i, j)].is_some() {
                    return Err(Error::Data {
                        line: toks.line,
                        msg: format!("duplicate arc ({},{})", i + 1, j + 1),
                    });
                }
                costs[(i, j)] = Some(toks.number()?);
            }
            _ => {
                return Err(Error::Format {
                    line: toks.line,
                    msg: format!("unexpected line, expected one of 's', 'd', 'a', got '{}'", d),
                })
            }
        }
        toks.end()?;
    }

    if let Some(((i, j), _)) = costs.iter_cells().find(|(_, c)| c.is_none()) {
        return Err(Error::Data {
            line: reader.line_number(),
            msg: format!("missing arc ({},{})", i + 1, j + 1),
        });
    }

    let supply = supply.into_iter().map(|s| s.unwrap_or_else(F::zero)).collect();
    let demand = demand.into_iter().map(|d| d.unwrap_or_else(F::zero)).collect();
    let costs = costs.map(|c| c.unwrap_or_else(F::nan));
    Ok(Problem::from_matrix(supply, demand, costs)?)
}

pub fn read_from_file<F>(filename: &str) -> Result<Problem<F>>
where
    F: Value + FromStr,
    F::Err: Display,
{
    read(std::fs::File::open(filename)?)
}

/// Write a transportation problem.
///
/// Zero supplies and demands are omitted.
pub fn write<W, F>(mut w: W, problem: &Problem<F>) -> std::io::Result<()>
where
    W: Write,
    F: Value + Display,
{
    let costs = problem.costs();
    writeln!(w, "p trn {} {}", costs.num_rows(), costs.num_cols())?;
    for (i, s) in problem.supply().iter().enumerate() {
        if !s.is_zero() {
            writeln!(w, "s {} {}", i + 1, s)?;
        }
    }
    for (j, d) in problem.demand().iter().enumerate() {
        if !d.is_zero() {
            writeln!(w, "d {} {}", j + 1, d)?;
        }
    }
    for ((i, j), c) in costs.iter_cells() {
        writeln!(w, "a {} {} {}", i + 1, j + 1, c)?;
    }
    Ok(())
}

/// Write a solution of a transportation problem.
///
/// Shipments from a dummy source or to a dummy destination are not
/// written.
pub fn write_solution<W, F>(mut w: W, solution: &Solution<F>) -> std::io::Result<()>
where
    W: Write,
    F: Value + Display,
{
    writeln!(w, "s {}", solution.cost)?;
    for (i, j, a) in solution.shipments() {
        writeln!(w, "f {} {} {}", i + 1, j + 1, a)?;
    }
    Ok(())
}

/// Read a solution of a transportation problem.
///
/// Returns the total cost and the list of shipments `(i, j, amount)`
/// with 0-based indices.
pub fn read_solution<R, F>(r: R) -> Result<(F, Vec<(usize, usize, F)>)>
where
    R: Read,
    F: FromStr,
    F::Err: Display,
{
    let mut reader = DimacsReader::new(r);
    let mut flows = vec![];
    let mut sol = None;

    while let Some((d, mut toks)) = reader.next_line()? {
        match d {
            'f' => {
                let i = toks.index(usize::MAX, "source")?;
                let j = toks.index(usize::MAX, "destination")?;
                flows.push((i, j, toks.number()?));
            }
            's' => {
                if sol.is_some() {
                    return Err(Error::Format {
                        line: toks.line,
                        msg: "The solution value must be specified exactly once".to_string(),
                    });
                }
                sol = Some(toks.number()?);
            }
            _ => {
                return Err(Error::Format {
                    line: toks.line,
                    msg: format!("unexpected line, expected one of 's', 'f', got '{}'", d),
                })
            }
        }
        toks.end()?;
    }

    Ok((
        sol.ok_or_else(|| Error::Format {
            line: reader.line_number(),
            msg: "Missing solution value".to_string(),
        })?,
        flows,
    ))
}

#[cfg(test)]
mod tests {
    use crate::dimacs::{self, Error};
    use crate::transport::{transportation, InitialMethod};
    use std::io::Cursor;

    #[test]
    fn parse_file_test() {
        let file = "c this is a test file

p trn 2 3
s 1 30
s 2 20
d 1 10
d 2 25
d 3 15

c costs in row-major order
a 1 1 1
a 1 2 2
a 1 3 4
a 2 1 3
a 2 2 1
a 2 3 2
";
        let p = dimacs::read::<_, f64>(Cursor::new(file)).unwrap();
        assert_eq!(p.supply(), &[30.0, 20.0]);
        assert_eq!(p.demand(), &[10.0, 25.0, 15.0]);
        assert_eq!(p.costs().to_rows(), vec![vec![1.0, 2.0, 4.0], vec![3.0, 1.0, 2.0]]);
    }

    #[test]
    fn parse_errors() {
        let missing = "p trn 1 2\ns 1 3\nd 1 3\na 1 1 5\n";
        match dimacs::read::<_, f64>(Cursor::new(missing)) {
            Err(Error::Data { line, msg }) => {
                assert_eq!(line, 4);
                assert_eq!(msg, "missing arc (1,2)");
            }
            r => panic!("unexpected result: {:?}", r.map(|_| ())),
        }

        let range = "p trn 1 1\na 1 2 5\n";
        assert!(matches!(
            dimacs::read::<_, f64>(Cursor::new(range)),
            Err(Error::Data { line: 2, .. })
        ));

        let negative = "p trn 1 1\ns 1 -3\na 1 1 5\n";
        assert!(matches!(
            dimacs::read::<_, f64>(Cursor::new(negative)),
            Err(Error::Problem(_))
        ));

        let supply = "p trn 2 1\ns 1 3\ns 2 1\ns 1 4\nd 1 4\na 1 1 5\na 2 1 5\n";
        match dimacs::read::<_, f64>(Cursor::new(supply)) {
            Err(Error::Data { line, msg }) => {
                assert_eq!(line, 4);
                assert_eq!(msg, "duplicate supply of source 1");
            }
            r => panic!("unexpected result: {:?}", r.map(|_| ())),
        }

        let demand = "p trn 1 2\ns 1 3\nd 2 1\nd 1 2\nd 2 1\na 1 1 5\na 1 2 5\n";
        match dimacs::read::<_, f64>(Cursor::new(demand)) {
            Err(Error::Data { line, msg }) => {
                assert_eq!(line, 5);
                assert_eq!(msg, "duplicate demand of destination 2");
            }
            r => panic!("unexpected result: {:?}", r.map(|_| ())),
        }

        let header = "p min 1 1\n";
        assert!(matches!(
            dimacs::read::<_, f64>(Cursor::new(header)),
            Err(Error::Format { line: 1, .. })
        ));
    }

    #[test]
    fn write_test_file() {
        let file = "p trn 2 2\ns 1 5\ns 2 5\nd 1 6\nd 2 4\na 1 1 3\na 1 2 1\na 2 1 1\na 2 2 4\n";
        let p = dimacs::read::<_, f64>(Cursor::new(file)).unwrap();

        let mut buf = Cursor::new(Vec::new());
        dimacs::write(&mut buf, &p).unwrap();
        assert_eq!(String::from_utf8(buf.into_inner()).unwrap(), file);
    }

    #[test]
    fn write_solution_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let sol = transportation(
            vec![30.0, 20.0],
            vec![10.0, 25.0],
            vec![vec![1.0, 2.0], vec![3.0, 1.0]],
            InitialMethod::Vogel,
        )?;

        let mut buf = Cursor::new(Vec::new());
        dimacs::write_solution(&mut buf, &sol)?;

        let soltxt = String::from_utf8(buf.into_inner())?;
        assert_eq!(soltxt, "s 40\nf 1 1 10\nf 1 2 5\nf 2 2 20\n");

        let (value, flows) = dimacs::read_solution::<_, f64>(Cursor::new(soltxt))?;
        assert_eq!(value, 40.0);
        assert_eq!(flows, vec![(0, 0, 10.0), (0, 1, 5.0), (1, 1, 20.0)]);

        Ok(())
    }
}
