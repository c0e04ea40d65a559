use cdcl_cli::cli;
use solver::SolveOutcome;
use std::{
    path::PathBuf,
    process,
};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "cdcl", about = "A CDCL SAT solver for DIMACS CNF input.")]
struct Opt {
    /// Path to a DIMACS `.cnf` file.
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Raises log verbosity; pass twice for trace-level output.
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

fn main() {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut solver = match cli::load_dimacs(&opt.input) {
        Ok(solver) => solver,
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(1);
        }
    };

    log::info!(
        "loaded {} variables and {} clauses",
        solver.num_variables(),
        solver.num_clauses()
    );

    match solver.solve() {
        SolveOutcome::Sat(model) => println!("SAT\n{}", model),
        SolveOutcome::Unsat => println!("UNSAT"),
    }
}
