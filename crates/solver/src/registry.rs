use crate::literal::Variable;
use ahash::AHashMap;
use bounded::BoundedArray;

/// Maps the caller's external variable identifiers — "arbitrary positive
/// integers; they need not be contiguous" (§6) — to the dense internal
/// [`Variable`] indices the core's array-backed tables use (§3, §9).
///
/// New ids are assigned a dense index in order of first appearance; nothing
/// externally observable depends on that order except that it is stable for
/// a fixed input, which is what determinism (P3) requires.
#[derive(Debug, Default, Clone)]
pub struct VariableRegistry {
    forward: AHashMap<u32, Variable>,
    backward: BoundedArray<Variable, u32>,
}

impl VariableRegistry {
    /// Returns the dense variable for `external_id`, if it has been seen.
    pub fn get(&self, external_id: u32) -> Option<Variable> {
        self.forward.get(&external_id).copied()
    }

    /// Returns the number of distinct variables registered so far.
    pub fn len(&self) -> usize {
        self.backward.len()
    }

    /// Returns `true` if no variable has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers a new external id, assigning it the next dense index.
    ///
    /// Callers must not call this for an id already known to the registry;
    /// use [`Self::get`] first.
    pub(crate) fn insert(&mut self, external_id: u32) -> Variable {
        debug_assert!(self.get(external_id).is_none());
        let variable = self.backward.push(external_id);
        self.forward.insert(external_id, variable);
        variable
    }

    /// Returns the external id a dense [`Variable`] was registered under.
    ///
    /// # Panics
    ///
    /// If `variable` was never returned by this registry.
    pub fn external_id_of(&self, variable: Variable) -> u32 {
        *self.backward.get(variable).expect("unregistered variable")
    }

    /// Returns an iterator over every registered `(external_id, variable)` pair.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Variable)> + '_ {
        self.forward.iter().map(|(&id, &variable)| (id, variable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_assigns_dense_indices_in_first_appearance_order() {
        let mut registry = VariableRegistry::default();
        let a = registry.insert(42);
        let b = registry.insert(7);
        assert_eq!(registry.external_id_of(a), 42);
        assert_eq!(registry.external_id_of(b), 7);
        assert_eq!(registry.get(42), Some(a));
        assert_eq!(registry.get(7), Some(b));
        assert_eq!(registry.get(1), None);
        assert_eq!(registry.len(), 2);
    }
}
