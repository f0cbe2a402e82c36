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

use num_traits::{NumCast, ToPrimitive};
use rs_transport::dimacs;
use rs_transport::transport::{InitialMethod, TransportSimplex, Value};
use std::error::Error;
use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;
use std::result::Result;
use std::str::FromStr;

use rustop::opts;
use time::OffsetDateTime;

fn run<F>(filename: &str, method: InitialMethod, max_iter: usize, zero: Option<f64>) -> Result<(), Box<dyn Error>>
where
    F: Value + FromStr + Display,
    F::Err: Display,
{
    let tstart = OffsetDateTime::now_utc();
    let problem = dimacs::read_from_file::<F>(filename)?;
    let tend = OffsetDateTime::now_utc();

    println!("Instance            : {}", filename);
    println!("Read Time (seconds) : {}", (tend - tstart).as_seconds_f64());
    println!("Value type          : {}", std::any::type_name::<F>());
    println!("Number of sources   : {}", problem.supply().len());
    println!("Number of dests     : {}", problem.demand().len());
    println!("Total supply        : {}", problem.total_supply());
    println!("Total demand        : {}", problem.total_demand());

    let mut spx = TransportSimplex::new(&problem);
    spx.method = method;
    spx.max_iter = max_iter;
    if let Some(zero) = zero.and_then(<F as NumCast>::from) {
        spx.zero = zero;
    }

    let tstart = OffsetDateTime::now_utc();
    let state = spx.solve();
    let tend = OffsetDateTime::now_utc();
    let soltime = (tend - tstart).as_seconds_f64();

    println!();
    println!("Initial method      : {}", method);
    println!("Initial value       : {:.2}", spx.initial_cost().to_f64().unwrap_or(f64::NAN));
    println!("Solution state      : {:?}", state);
    println!("Value               : {:.2}", spx.value().to_f64().unwrap_or(f64::NAN));
    println!("Time (seconds)      : {:.2}", soltime);
    println!("Iterations (total)  : {}", spx.num_iterations());
    println!();
    println!("Write solution to   : {}.sol", filename);

    let solfile = PathBuf::from(format!("{}.sol", filename));
    let f = &mut std::fs::File::create(&solfile)?;
    let fname = solfile
        .file_name()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| "".into());
    writeln!(f, "c Solved with the MODI method")?;
    writeln!(f, "c instance            : {}", fname)?;
    writeln!(f, "c initial method      : {}", method)?;
    writeln!(f, "c solution state      : {:?}", state)?;
    writeln!(f, "c solution time       : {:.2} seconds", soltime)?;
    writeln!(f, "c number of iterations: {}", spx.num_iterations())?;
    dimacs::write_solution(f, &spx.solution())?;

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let (args, _) = opts! {
        synopsis "Solve a transportation problem with the MODI method.";
        param file:String, desc:"Instance file name";
        opt method:Option<String>, desc:"Initial method (northwest, minimum_cost, vogel)";
        opt max_iter:usize=100, desc:"Maximal number of MODI iterations";
        opt zero:Option<f64>, desc:"Allocations up to this value are considered zero";
        opt single:bool, desc:"Use single precision values";
    }
    .parse_or_exit();

    let method = match args.method {
        Some(ref name) => name.parse()?,
        None => InitialMethod::default(),
    };

    if args.single {
        run::<f32>(&args.file, method, args.max_iter, args.zero)
    } else {
        run::<f64>(&args.file, method, args.max_iter, args.zero)
    }
}
