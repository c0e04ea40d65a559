use crate::{
    literal::{
        Sign,
        Variable,
    },
    trail::Trail,
};
use bounded::BoundedArray;

/// VSIDS decay factor (§3): the bump increment grows by its reciprocal on
/// every decision, which is equivalent to geometrically decaying all past
/// activity but cheaper than rewriting every score.
const DECAY: f64 = 0.95;

/// Any activity exceeding this triggers a rescale (I6).
const RESCALE_THRESHOLD: f64 = 1e100;

/// Factor applied to every activity and the bump increment during a rescale.
const RESCALE_FACTOR: f64 = 1e-100;

/// The VSIDS activity table and phase memory driving branching decisions
/// (§4.5).
#[derive(Debug, Clone)]
pub struct Decider {
    activity: BoundedArray<Variable, f64>,
    phase: BoundedArray<Variable, Option<Sign>>,
    bump_increment: f64,
}

impl Default for Decider {
    fn default() -> Self {
        Self {
            activity: BoundedArray::default(),
            phase: BoundedArray::default(),
            bump_increment: 1.0,
        }
    }
}

impl Decider {
    /// Registers one freshly discovered variable with initial activity 0.
    pub fn register_variable(&mut self) {
        self.activity.grow_default();
        self.phase.grow_default();
    }

    /// Bumps `variable`'s activity by the current increment, rescaling all
    /// activities if the bump would exceed the rescale threshold (I6).
    pub fn bump(&mut self, variable: Variable) {
        let bumped = self.activity[variable] + self.bump_increment;
        self.activity.update(variable, bumped).expect("unregistered variable");
        if bumped > RESCALE_THRESHOLD {
            self.rescale();
        }
    }

    fn rescale(&mut self) {
        for activity in self.activity.iter_mut() {
            *activity *= RESCALE_FACTOR;
        }
        self.bump_increment *= RESCALE_FACTOR;
    }

    /// Grows the bump increment by `1 / DECAY`, making future bumps weigh
    /// more relative to past ones. Called both when conflict analysis
    /// completes (§4.3) and once per decision (§4.5); see `DESIGN.md` for why
    /// both call sites apply it.
    pub fn grow_increment(&mut self) {
        self.bump_increment *= 1.0 / DECAY;
    }

    /// Records the last value `variable` held before being unassigned, so it
    /// can be re-proposed on the next decision.
    pub fn save_phase(&mut self, variable: Variable, value: Sign) {
        self.phase.update(variable, Some(value)).expect("unregistered variable");
    }

    /// Returns the polarity to propose for `variable`: its saved phase, or
    /// `true` if it has never been assigned before (§4.5).
    pub fn polarity_for(&self, variable: Variable) -> Sign {
        self.phase
            .get(variable)
            .expect("unregistered variable")
            .unwrap_or(Sign::TRUE)
    }

    /// Picks the unassigned variable with highest activity, breaking ties by
    /// smallest external id (§4.5, tightened per §9's open question to
    /// guarantee determinism independent of internal dense numbering).
    pub fn next_decision(
        &self,
        trail: &Trail,
        external_id_of: impl Fn(Variable) -> u32,
    ) -> Option<Variable> {
        let mut best: Option<(Variable, f64, u32)> = None;
        for index in 0..self.activity.len() {
            let variable = bounded::Index::from_index(index);
            if trail.value_of(variable).is_some() {
                continue
            }
            let activity = self.activity[variable];
            let external_id = external_id_of(variable);
            let is_better = match best {
                None => true,
                Some((_, best_activity, best_external_id)) => {
                    activity > best_activity
                        || (activity == best_activity && external_id < best_external_id)
                }
            };
            if is_better {
                best = Some((variable, activity, external_id));
            }
        }
        best.map(|(variable, _, _)| variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(index: usize) -> Variable {
        bounded::Index::from_index(index)
    }

    #[test]
    fn bump_accumulates_and_breaks_ties_by_external_id() {
        let mut decider = Decider::default();
        decider.register_variable();
        decider.register_variable();
        decider.bump(var(0));
        decider.bump(var(1));
        let mut trail = Trail::default();
        trail.register_variable();
        trail.register_variable();
        let winner =
            decider.next_decision(&trail, |v| if v == var(0) { 5 } else { 1 });
        assert_eq!(winner, Some(var(1)));
    }

    #[test]
    fn rescale_preserves_relative_order() {
        let mut decider = Decider::default();
        decider.register_variable();
        decider.register_variable();
        decider.bump(var(0));
        decider.bump(var(0));
        decider.bump(var(1));
        decider.bump_increment = RESCALE_THRESHOLD;
        decider.bump(var(0));
        assert!(decider.activity[var(0)] > decider.activity[var(1)]);
    }

    #[test]
    fn phase_defaults_to_true() {
        let mut decider = Decider::default();
        decider.register_variable();
        assert_eq!(decider.polarity_for(var(0)), Sign::TRUE);
        decider.save_phase(var(0), Sign::FALSE);
        assert_eq!(decider.polarity_for(var(0)), Sign::FALSE);
    }
}
