use cnf_parser::Output;
use solver::{
    Solver,
    SolverError,
};
use std::{
    fs,
    path::Path,
};
use thiserror::Error;

/// Errors that can occur while loading a `.cnf` file into a fresh [`Solver`].
#[derive(Debug, Error)]
pub enum DriverError {
    /// The input file could not be read.
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),
    /// The input bytes are not valid DIMACS CNF.
    #[error("malformed DIMACS CNF input: {0}")]
    Parse(String),
    /// A clause was rejected by the solver's ingestion interface.
    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Accumulates literals between DIMACS clause terminators and feeds each
/// finished clause to the solver through `add_clause` (§6: "an external
/// loader may parse DIMACS and feed the core through `add_clause`").
#[derive(Default)]
struct Loader {
    solver: Solver,
    current_clause: Vec<i32>,
}

impl Loader {
    fn finalize_current_clause(&mut self) -> Result<(), DriverError> {
        self.solver.add_clause(&self.current_clause)?;
        self.current_clause.clear();
        Ok(())
    }
}

impl Output for Loader {
    type Error = DriverError;

    fn problem(&mut self, _num_variables: u32, _num_clauses: u32) -> Result<(), Self::Error> {
        // The header is advisory; the solver discovers variables from the
        // clauses themselves (§3) and does not need a preallocated count.
        Ok(())
    }

    fn literal(&mut self, literal: cnf_parser::Literal) -> Result<(), Self::Error> {
        self.current_clause.push(literal.into_value().get());
        Ok(())
    }

    fn finalize_clause(&mut self) -> Result<(), Self::Error> {
        self.finalize_current_clause()
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        if !self.current_clause.is_empty() {
            self.finalize_current_clause()?;
        }
        Ok(())
    }
}

/// Parses DIMACS CNF bytes and returns a [`Solver`] loaded with its clauses,
/// ready for [`Solver::solve`]. Split out from [`load_dimacs`] so tests can
/// exercise the parsing path without touching the filesystem.
pub fn parse_dimacs_bytes(bytes: &[u8]) -> Result<Solver, DriverError> {
    let mut loader = Loader::default();
    cnf_parser::parse_cnf(&mut &bytes[..], &mut loader)
        .map_err(|err| DriverError::Parse(format!("{:?}", err)))?;
    Ok(loader.solver)
}

/// Parses the `.cnf` file at `path` and returns a [`Solver`] loaded with its
/// clauses, ready for [`Solver::solve`].
pub fn load_dimacs(path: &Path) -> Result<Solver, DriverError> {
    let bytes = fs::read(path)?;
    parse_dimacs_bytes(&bytes)
}
