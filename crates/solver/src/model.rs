use ahash::AHashMap;
use core::fmt::{
    self,
    Display,
    Formatter,
};

/// A satisfying assignment, keyed by the caller's original (external)
/// variable identifiers (§6: "returns ... a total mapping from every known
/// variable to a boolean").
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Model {
    values: AHashMap<u32, bool>,
}

impl Model {
    pub(crate) fn new(values: AHashMap<u32, bool>) -> Self {
        Self { values }
    }

    /// Returns the number of variables the model assigns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the model assigns no variables.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the boolean assigned to the given external variable id, if it
    /// was part of the formula.
    pub fn value_of(&self, variable: u32) -> Option<bool> {
        self.values.get(&variable).copied()
    }

    /// Returns an iterator over `(variable, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, bool)> + '_ {
        self.values.iter().map(|(&variable, &value)| (variable, value))
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_unstable_by_key(|(variable, _)| *variable);
        let mut first = true;
        for (variable, value) in pairs {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            if value {
                write!(f, "{}", variable)?;
            } else {
                write!(f, "-{}", variable)?;
            }
        }
        Ok(())
    }
}

/// The result of a [`crate::Solver::solve`] call (§6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// The formula is satisfiable; carries a total model.
    Sat(Model),
    /// The formula is unsatisfiable.
    Unsat,
}

impl SolveOutcome {
    /// Returns `true` if the outcome is `Sat`.
    pub fn is_sat(&self) -> bool {
        matches!(self, Self::Sat(_))
    }

    /// Returns the model, if the outcome was satisfiable.
    pub fn model(&self) -> Option<&Model> {
        match self {
            Self::Sat(model) => Some(model),
            Self::Unsat => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_sorted_and_signed() {
        let mut values = AHashMap::default();
        values.insert(2, false);
        values.insert(1, true);
        let model = Model::new(values);
        assert_eq!(model.to_string(), "1 -2");
    }

    #[test]
    fn unsat_outcome_has_no_model() {
        assert!(SolveOutcome::Unsat.model().is_none());
        assert!(!SolveOutcome::Unsat.is_sat());
    }
}
