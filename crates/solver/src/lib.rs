#![deny(unsafe_code)]
#![warn(unsafe_op_in_unsafe_fn)]
#![allow(clippy::len_without_is_empty)]

mod analysis;
pub mod clause_db;
mod decider;
mod error;
mod literal;
mod model;
mod registry;
mod trail;

pub use crate::{
    error::SolverError,
    literal::{
        Literal,
        Sign,
        Variable,
    },
    model::{
        Model,
        SolveOutcome,
    },
    registry::VariableRegistry,
};

use crate::{
    analysis::analyze,
    clause_db::{
        ClauseDatabase,
        ClauseId,
        ClauseStatus,
    },
    decider::Decider,
    trail::{
        Antecedent,
        DecisionLevel,
        Trail,
    },
};
use ahash::AHashMap;

/// The top-level driver's states (§4.6). Carries the payload each transition
/// needs so the loop in [`Solver::solve`] never has to re-derive it.
enum State {
    Propagating,
    Analyzing(ClauseId),
    Backjumping(analysis::Analyzed),
    Deciding,
    Verifying,
}

/// A single-threaded CDCL decision procedure for propositional satisfiability.
///
/// Owns every piece of mutable engine state exclusively (§5): the clause
/// database, the trail, and the VSIDS decider. A `Solver` is not safe for
/// concurrent use and shares nothing with other instances.
#[derive(Debug, Default, Clone)]
pub struct Solver {
    registry: VariableRegistry,
    clause_db: ClauseDatabase,
    trail: Trail,
    decider: Decider,
}

impl Solver {
    /// Creates an empty solver with no clauses and no known variables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of distinct variables observed so far.
    pub fn num_variables(&self) -> usize {
        self.registry.len()
    }

    /// Returns the number of clauses (originals and learned) in the database.
    pub fn num_clauses(&self) -> usize {
        self.clause_db.len()
    }

    fn resolve_variable(&mut self, external_id: u32) -> Result<Variable, SolverError> {
        if let Some(variable) = self.registry.get(external_id) {
            return Ok(variable)
        }
        if self.registry.len() >= Variable::MAX_LEN {
            return Err(SolverError::TooManyVariables)
        }
        self.trail.register_variable();
        self.decider.register_variable();
        Ok(self.registry.insert(external_id))
    }

    /// Appends a new clause to the original database (§4.1).
    ///
    /// Every literal's variable is registered (if new) and has its activity
    /// bumped once, approximating a static occurrence-count prior before any
    /// conflict-driven signal exists. Duplicate literals and tautologies are
    /// stored exactly as given — §3 permits both as ordinary input. An empty
    /// clause is accepted; it will be discovered as a level-0 conflict on the
    /// first call to [`Self::solve`].
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::MalformedLiteral`] if any literal is `0`, and
    /// [`SolverError::TooManyVariables`] if the formula uses more distinct
    /// variables than this solver can index.
    pub fn add_clause(&mut self, literals: &[i32]) -> Result<(), SolverError> {
        let mut resolved = Vec::with_capacity(literals.len());
        for &raw in literals {
            if raw == 0 {
                return Err(SolverError::MalformedLiteral)
            }
            let variable = self.resolve_variable(raw.unsigned_abs())?;
            let sign = Sign::from_bool(raw > 0);
            self.decider.bump(variable);
            resolved.push(variable.into_literal(sign));
        }
        let id = self.clause_db.push(&resolved);
        log::trace!("added clause {:?} as {:?}", resolved, id);
        Ok(())
    }

    fn external_id_of(&self, variable: Variable) -> u32 {
        self.registry.external_id_of(variable)
    }

    /// Scans the clause database to a fixed point or a conflict (§4.2).
    fn propagate(&mut self) -> Option<ClauseId> {
        loop {
            let mut asserted_something = false;
            for clause_id in self.clause_db.iter() {
                match self.clause_db.classify(clause_id, &self.trail) {
                    ClauseStatus::Unit(literal) => {
                        log::trace!(
                            "propagation asserts {:?} forced by {:?}",
                            literal,
                            clause_id
                        );
                        self.trail.assign(literal, Antecedent::Forced(clause_id));
                        self.decider.save_phase(literal.variable(), literal.sign());
                        asserted_something = true;
                        break
                    }
                    ClauseStatus::Conflicting => {
                        log::debug!("conflict on {:?}", clause_id);
                        return Some(clause_id)
                    }
                    ClauseStatus::Satisfied | ClauseStatus::Unresolved => {}
                }
            }
            if !asserted_something {
                return None
            }
        }
    }

    /// Rewinds the trail to `level`, saving the phase of every variable it
    /// unassigns (§4.4).
    fn backjump(&mut self, level: DecisionLevel) {
        let undone = self.trail.pop_to_level(level);
        log::trace!("backjump to level {:?}, {} variables undone", level, undone.len());
        for (variable, value) in undone {
            self.decider.save_phase(variable, value);
        }
    }

    /// Picks the next branching variable and asserts it at a new decision
    /// level (§4.5).
    ///
    /// # Panics
    ///
    /// If called when every known variable is already assigned; callers must
    /// only reach `Deciding` when [`Trail::is_complete`] is `false`.
    fn decide(&mut self) {
        let variable = self
            .decider
            .next_decision(&self.trail, |v| self.external_id_of(v))
            .expect("decide() called with no unassigned variable remaining");
        let sign = self.decider.polarity_for(variable);
        self.trail.new_decision_level();
        let literal = variable.into_literal(sign);
        self.trail.assign(literal, Antecedent::Decision);
        self.decider.grow_increment();
        log::debug!("decision {:?} at level {:?}", literal, self.trail.current_level());
    }

    /// Defensive check that every clause is satisfied before declaring SAT
    /// (§7: reaching `Verifying` with an unsatisfied clause is a programmer
    /// error, not a recoverable condition).
    fn verify(&self) -> bool {
        self.clause_db
            .iter()
            .all(|id| matches!(self.clause_db.classify(id, &self.trail), ClauseStatus::Satisfied))
    }

    fn build_model(&self) -> Model {
        let mut values = AHashMap::default();
        for (external_id, variable) in self.registry.iter() {
            let value = self
                .trail
                .value_of(variable)
                .expect("verified solve must assign every known variable");
            values.insert(external_id, value.into_bool());
        }
        Model::new(values)
    }

    /// Runs the CDCL state machine (§4.6) to completion and returns whether
    /// the formula is satisfiable, with a total model if so (§6).
    pub fn solve(&mut self) -> SolveOutcome {
        let mut state = State::Propagating;
        loop {
            state = match state {
                State::Propagating => match self.propagate() {
                    None if self.trail.is_complete() => State::Verifying,
                    None => State::Deciding,
                    Some(conflict) => {
                        if self.trail.current_level() == DecisionLevel::ZERO {
                            return SolveOutcome::Unsat
                        }
                        State::Analyzing(conflict)
                    }
                },
                State::Analyzing(conflict) => {
                    let analyzed = analyze(conflict, &self.trail, &self.clause_db, &mut self.decider);
                    State::Backjumping(analyzed)
                }
                State::Backjumping(analyzed) => {
                    self.backjump(analyzed.backjump_level);
                    let learned_id = self.clause_db.push(&analyzed.learned_clause);
                    log::debug!("learned {:?} as {:?}", analyzed.learned_clause, learned_id);
                    State::Propagating
                }
                State::Deciding => {
                    self.decide();
                    State::Propagating
                }
                State::Verifying => {
                    return if self.verify() {
                        SolveOutcome::Sat(self.build_model())
                    } else {
                        debug_assert!(false, "reached Verifying with an unsatisfied clause");
                        SolveOutcome::Unsat
                    }
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(clauses: &[&[i32]]) -> SolveOutcome {
        let mut solver = Solver::new();
        for &clause in clauses {
            solver.add_clause(clause).unwrap();
        }
        solver.solve()
    }

    fn assert_satisfies(model: &Model, clauses: &[&[i32]]) {
        for &clause in clauses {
            let satisfied = clause.iter().any(|&literal| {
                let value = model.value_of(literal.unsigned_abs()).unwrap_or(false);
                (literal > 0) == value
            });
            assert!(satisfied, "clause {:?} not satisfied by {}", clause, model);
        }
    }

    #[test]
    fn satisfiable_triangle() {
        let clauses: &[&[i32]] = &[&[1, 2], &[-1, 3], &[-2, -3], &[2, 3]];
        let outcome = solve(clauses);
        assert!(outcome.is_sat());
        assert_satisfies(outcome.model().unwrap(), clauses);
    }

    #[test]
    fn classical_unsat_over_two_variables() {
        let clauses: &[&[i32]] = &[&[1, 2], &[1, -2], &[-1, 2], &[-1, -2]];
        assert_eq!(solve(clauses), SolveOutcome::Unsat);
    }

    #[test]
    fn forced_chain_needs_zero_decisions() {
        let clauses: &[&[i32]] = &[&[1], &[-1, 2], &[-2, 3]];
        let outcome = solve(clauses);
        let model = outcome.model().expect("expected SAT");
        assert_eq!(model.value_of(1), Some(true));
        assert_eq!(model.value_of(2), Some(true));
        assert_eq!(model.value_of(3), Some(true));
    }

    #[test]
    fn empty_clause_is_unsat() {
        let empty: &[i32] = &[];
        assert_eq!(solve(&[empty]), SolveOutcome::Unsat);
    }

    #[test]
    fn single_positive_unit_is_sat() {
        let outcome = solve(&[&[1]]);
        assert_eq!(outcome.model().unwrap().value_of(1), Some(true));
    }

    #[test]
    fn direct_contradiction_is_unsat() {
        assert_eq!(solve(&[&[1], &[-1]]), SolveOutcome::Unsat);
    }

    #[test]
    fn add_clause_rejects_zero_literal() {
        let mut solver = Solver::new();
        assert_eq!(solver.add_clause(&[1, 0]), Err(SolverError::MalformedLiteral));
    }

    #[test]
    fn determinism_across_repeated_runs() {
        let clauses: &[&[i32]] = &[&[1, 2, 3], &[-1, 2], &[-2, 3], &[-3, 1]];
        let first = solve(clauses);
        let second = solve(clauses);
        assert_eq!(first, second);
    }

    #[test]
    fn pigeonhole_two_into_one_is_unsat() {
        // Two pigeons (1, 2), one hole: each pigeon takes the hole, but not
        // both at once.
        let clauses: &[&[i32]] = &[&[1], &[2], &[-1, -2]];
        assert_eq!(solve(clauses), SolveOutcome::Unsat);
    }
}
