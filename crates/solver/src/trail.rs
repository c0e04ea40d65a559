use crate::{
    clause_db::ClauseId,
    literal::{
        Literal,
        Sign,
        Variable,
    },
};
use bounded::{
    BoundedArray,
    Index,
};

/// A decision level: 0 holds facts derivable without any branching choice.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct DecisionLevel(u32);

impl DecisionLevel {
    /// The level at which only top-level unit propagation ever happens.
    pub const ZERO: Self = Self(0);
}

impl Index for DecisionLevel {
    #[inline]
    fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    fn into_index(self) -> usize {
        self.0 as usize
    }
}

/// What forced a trail entry: a branching choice, or unit propagation from a
/// clause in the database.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Antecedent {
    /// The literal was asserted by [`crate::Solver`]'s decision procedure.
    Decision,
    /// The literal was forced unit by the named clause.
    Forced(ClauseId),
}

impl Antecedent {
    /// Returns the forcing clause, if this entry was propagated rather than
    /// decided.
    pub fn forcing_clause(self) -> Option<ClauseId> {
        match self {
            Self::Decision => None,
            Self::Forced(clause) => Some(clause),
        }
    }
}

#[derive(Debug, Copy, Clone)]
struct VariableInfo {
    level: DecisionLevel,
    antecedent: Antecedent,
}

/// The trail: the totally ordered sequence of assigned literals, together
/// with the per-variable lookups (assignment, decision level, antecedent)
/// that must stay in lockstep with it (§9 re-architecture guidance).
#[derive(Debug, Default, Clone)]
pub struct Trail {
    entries: Vec<Literal>,
    level_limits: Vec<u32>,
    assignment: BoundedArray<Variable, Option<Sign>>,
    info: BoundedArray<Variable, Option<VariableInfo>>,
}

impl Trail {
    /// Registers one freshly discovered variable, growing the per-variable
    /// tables to cover it.
    pub fn register_variable(&mut self) {
        self.assignment.grow_default();
        self.info.grow_default();
    }

    /// Returns the current decision level.
    pub fn current_level(&self) -> DecisionLevel {
        DecisionLevel::from_index(self.level_limits.len())
    }

    /// Opens a new decision level, to be populated by the upcoming decision.
    pub fn new_decision_level(&mut self) {
        self.level_limits.push(self.entries.len() as u32);
    }

    /// Returns the value currently assigned to `variable`, if any.
    #[inline]
    pub fn value_of(&self, variable: Variable) -> Option<Sign> {
        *self.assignment.get(variable).expect("unregistered variable")
    }

    /// Returns `true` if every known variable is assigned.
    pub fn is_complete(&self) -> bool {
        self.entries.len() == self.assignment.len()
    }

    /// Returns the decision level at which `variable` was assigned, if any.
    pub fn level_of(&self, variable: Variable) -> Option<DecisionLevel> {
        self.info.get(variable).expect("unregistered variable").map(|info| info.level)
    }

    /// Returns the antecedent of `variable`'s current assignment, if any.
    pub fn antecedent_of(&self, variable: Variable) -> Option<Antecedent> {
        self.info
            .get(variable)
            .expect("unregistered variable")
            .map(|info| info.antecedent)
    }

    /// Asserts `literal`, recording it at the current decision level with the
    /// given antecedent.
    ///
    /// # Panics
    ///
    /// If the variable is already assigned.
    pub fn assign(&mut self, literal: Literal, antecedent: Antecedent) {
        let variable = literal.variable();
        assert!(self.value_of(variable).is_none(), "variable already assigned");
        self.entries.push(literal);
        self.assignment
            .update(variable, Some(literal.sign()))
            .expect("unregistered variable");
        self.info
            .update(
                variable,
                Some(VariableInfo {
                    level: self.current_level(),
                    antecedent,
                }),
            )
            .expect("unregistered variable");
    }

    /// Returns the trail entries in assignment order.
    pub fn entries(&self) -> &[Literal] {
        &self.entries
    }

    /// Rewinds the trail to include only variables assigned at levels `<= level`.
    ///
    /// Returns the unassigned variables together with the value they held
    /// just before removal, so the decision heuristic can save their phase
    /// (§4.4: "its current boolean is copied into its phase memory before
    /// removal").
    pub fn pop_to_level(&mut self, level: DecisionLevel) -> Vec<(Variable, Sign)> {
        if level.into_index() >= self.level_limits.len() {
            return Vec::new()
        }
        let cutoff = self.level_limits[level.into_index()] as usize;
        self.level_limits.truncate(level.into_index());
        let mut undone = Vec::with_capacity(self.entries.len() - cutoff);
        for literal in self.entries.drain(cutoff..) {
            let variable = literal.variable();
            self.assignment.take(variable).expect("unregistered variable");
            self.info.take(variable).expect("unregistered variable");
            undone.push((variable, literal.sign()));
        }
        undone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause_db::ClauseId;

    fn var(index: usize) -> Variable {
        Variable::from_index(index)
    }

    #[test]
    fn assign_and_backjump_round_trips() {
        let mut trail = Trail::default();
        trail.register_variable();
        trail.register_variable();

        trail.assign(var(0).into_literal(Sign::TRUE), Antecedent::Decision);
        assert_eq!(trail.current_level(), DecisionLevel::ZERO);

        trail.new_decision_level();
        trail.assign(var(1).into_literal(Sign::FALSE), Antecedent::Decision);
        assert_eq!(trail.current_level(), DecisionLevel::from_index(1));
        assert_eq!(trail.value_of(var(1)), Some(Sign::FALSE));

        let undone = trail.pop_to_level(DecisionLevel::ZERO);
        assert_eq!(undone, vec![(var(1), Sign::FALSE)]);
        assert_eq!(trail.value_of(var(1)), None);
        assert_eq!(trail.value_of(var(0)), Some(Sign::TRUE));
        assert_eq!(trail.current_level(), DecisionLevel::ZERO);
    }

    #[test]
    fn antecedent_tracks_forcing_clause() {
        let mut trail = Trail::default();
        trail.register_variable();
        let clause = ClauseId::from_index(0);
        trail.assign(var(0).into_literal(Sign::TRUE), Antecedent::Forced(clause));
        assert_eq!(trail.antecedent_of(var(0)).unwrap().forcing_clause(), Some(clause));
    }
}
