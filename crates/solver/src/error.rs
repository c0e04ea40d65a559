use thiserror::Error;

/// Errors returned by the solver's public interface.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    /// A literal with value `0` was passed to [`crate::Solver::add_clause`].
    #[error("encountered malformed literal with value 0")]
    MalformedLiteral,
    /// The formula uses more distinct variables than this solver can index.
    #[error("formula exceeds the maximum of {} variables", crate::literal::Variable::MAX_LEN)]
    TooManyVariables,
}
