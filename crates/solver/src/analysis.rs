use crate::{
    clause_db::{
        ClauseDatabase,
        ClauseId,
    },
    decider::Decider,
    literal::{
        Literal,
        Variable,
    },
    trail::{
        Antecedent,
        DecisionLevel,
        Trail,
    },
};
use ahash::AHashSet;

/// The outcome of conflict analysis (§4.3): a clause to learn, and the level
/// to backjump to (§4.4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analyzed {
    pub learned_clause: Vec<Literal>,
    pub backjump_level: DecisionLevel,
}

/// Runs First-UIP conflict analysis against `conflict`, the clause
/// [`ClauseDatabase::classify`] reported as falsified.
///
/// Bumps the activity of every variable the resolution walk touches, as a
/// side effect mandated by §4.3 regardless of which variables end up in the
/// learned clause.
pub fn analyze(
    conflict: ClauseId,
    trail: &Trail,
    clause_db: &ClauseDatabase,
    decider: &mut Decider,
) -> Analyzed {
    let current_level = trail.current_level();
    debug_assert!(current_level > DecisionLevel::ZERO);

    // Variables from the conflict (or its resolvents) assigned at the current
    // level: the working set the First-UIP loop narrows down to one member.
    let mut current_level_vars: AHashSet<Variable> = AHashSet::default();
    // Literals assigned at an earlier level: these survive into the learned
    // clause unchanged.
    let mut accumulator: Vec<Literal> = Vec::new();
    let mut seen: AHashSet<Variable> = AHashSet::default();

    partition_into(
        clause_db.literals(conflict).iter().copied(),
        trail,
        current_level,
        &mut current_level_vars,
        &mut accumulator,
        &mut seen,
        decider,
    );

    let mut trail_position = trail.entries().len();
    let uip_literal = loop {
        if current_level_vars.len() <= 1 {
            break pick_uip(&current_level_vars, trail)
        }

        // Choose the working-set variable assigned latest on the trail; the
        // trail is totally ordered, so no tie can occur (§4.3 step 1).
        trail_position -= 1;
        let candidate = trail.entries()[trail_position].variable();
        if !current_level_vars.remove(&candidate) {
            continue
        }

        match trail.antecedent_of(candidate) {
            Some(Antecedent::Forced(antecedent)) => {
                let antecedent_literals: Vec<Literal> =
                    clause_db.literals(antecedent).to_vec();
                partition_into(
                    antecedent_literals.into_iter().filter(|literal| literal.variable() != candidate),
                    trail,
                    current_level,
                    &mut current_level_vars,
                    &mut accumulator,
                    &mut seen,
                    decider,
                );
            }
            Some(Antecedent::Decision) | None => {
                // A decision variable has no antecedent to resolve against;
                // it simply falls out of the working set as the UIP.
            }
        }
    };

    decider.grow_increment();

    let mut learned_clause = accumulator;
    learned_clause.push(uip_literal);
    let backjump_level = compute_backjump_level(&learned_clause, trail);

    Analyzed {
        learned_clause,
        backjump_level,
    }
}

#[allow(clippy::too_many_arguments)]
fn partition_into(
    literals: impl Iterator<Item = Literal>,
    trail: &Trail,
    current_level: DecisionLevel,
    current_level_vars: &mut AHashSet<Variable>,
    accumulator: &mut Vec<Literal>,
    seen: &mut AHashSet<Variable>,
    decider: &mut Decider,
) {
    for literal in literals {
        let variable = literal.variable();
        if !seen.insert(variable) {
            continue
        }
        decider.bump(variable);
        let level = trail
            .level_of(variable)
            .expect("conflict literal must be assigned");
        if level == current_level {
            current_level_vars.insert(variable);
        } else {
            accumulator.push(literal);
        }
    }
}

/// Returns the negation of the remaining working-set variable's assigned
/// literal — the First-UIP. §9's open question: an empty working set here
/// means the implication graph was malformed; this is a programmer error,
/// not a recoverable condition, so it panics rather than guessing.
fn pick_uip(current_level_vars: &AHashSet<Variable>, trail: &Trail) -> Literal {
    let uip_variable = *current_level_vars
        .iter()
        .next()
        .expect("conflict analysis exhausted the current-level working set before reaching a UIP");
    let value = trail
        .value_of(uip_variable)
        .expect("UIP variable must be assigned");
    !uip_variable.into_literal(value)
}

/// Computes the backjump level for a learned clause (§4.4): 0 if it is a
/// singleton, otherwise the second-largest level among its literals.
fn compute_backjump_level(learned_clause: &[Literal], trail: &Trail) -> DecisionLevel {
    if learned_clause.len() <= 1 {
        return DecisionLevel::ZERO
    }
    let mut levels: Vec<DecisionLevel> = learned_clause
        .iter()
        .map(|literal| {
            trail
                .level_of(literal.variable())
                .expect("learned clause literal must be assigned")
        })
        .collect();
    levels.sort_unstable();
    levels.pop();
    levels.pop().unwrap_or(DecisionLevel::ZERO)
}
