use cdcl_cli::cli::parse_dimacs_bytes;
use solver::SolveOutcome;

#[test]
fn loads_and_solves_a_satisfiable_formula() {
    let cnf = b"c a satisfiable triangle\np cnf 3 4\n1 2 0\n-1 3 0\n-2 -3 0\n2 3 0\n";
    let mut solver = parse_dimacs_bytes(cnf).expect("valid DIMACS input");
    assert_eq!(solver.num_variables(), 3);
    assert_eq!(solver.num_clauses(), 4);
    assert!(solver.solve().is_sat());
}

#[test]
fn loads_and_solves_an_unsatisfiable_formula() {
    let cnf = b"p cnf 2 4\n1 2 0\n1 -2 0\n-1 2 0\n-1 -2 0\n";
    let mut solver = parse_dimacs_bytes(cnf).expect("valid DIMACS input");
    assert_eq!(solver.solve(), SolveOutcome::Unsat);
}

#[test]
fn comments_and_empty_lines_are_ignored() {
    let cnf = b"c comment line\n\np cnf 1 1\nc another comment\n1 0\n";
    let mut solver = parse_dimacs_bytes(cnf).expect("valid DIMACS input");
    let outcome = solver.solve();
    assert_eq!(outcome.model().unwrap().value_of(1), Some(true));
}

#[test]
fn malformed_input_is_rejected() {
    let cnf = b"this is not dimacs cnf";
    assert!(parse_dimacs_bytes(cnf).is_err());
}
