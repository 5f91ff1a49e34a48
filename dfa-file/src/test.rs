use automata::{minimize, Alphabet, Dfa, StateId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{parse_dfa, read_dfa, serialize_dfa, FormatError, Role, Section};

const EVEN_AS: &str = "q0\tq1\na\tb\nq0\nq0\nq0\ta\tq1\nq0\tb\tq0\nq1\ta\tq0\nq1\tb\tq1\n";

#[test]
fn parse_simple() {
    let dfa = parse_dfa(EVEN_AS).unwrap();

    assert_eq!(dfa.state_count(), 2);
    assert_eq!(dfa.alphabet(), &Alphabet::new(['a', 'b']));
    assert_eq!(dfa.start(), StateId(0));
    assert!(dfa.accepts(""));
    assert!(dfa.accepts("abba"));
    assert!(!dfa.accepts("ab"));
}

#[test]
fn serialize_is_exact_inverse() {
    assert_eq!(serialize_dfa(&parse_dfa(EVEN_AS).unwrap()), EVEN_AS);
}

#[test]
fn parse_free_names_and_spacing() {
    let source = "init  other sink\nx y\ninit\n\ninit x other\nother   y init\n\n";
    let dfa = parse_dfa(source).unwrap();

    assert_eq!(dfa.state_count(), 3);
    assert_eq!(dfa.accepting_states().count(), 0);
    assert_eq!(dfa.transition_count(), 2);
}

#[test]
fn parse_missing_accepting_line() {
    let dfa = parse_dfa("q0\na\nq0").unwrap();
    assert_eq!(dfa.state_count(), 1);
    assert!(!dfa.accepts(""));
}

#[test]
fn round_trip_random() {
    let alphabet = Alphabet::new(['0', '1', 'x']);
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..100 {
        let states = rng.gen_range(1..8);
        let mut dfa = Dfa::new(alphabet.clone());
        for _ in 1..states {
            dfa.add_state(rng.gen_bool(0.5));
        }
        for state in 0..states {
            for symbol in alphabet.ids() {
                if rng.gen_bool(0.7) {
                    dfa.set_transition(StateId(state), symbol, StateId(rng.gen_range(0..states)));
                }
            }
        }
        dfa.set_start(StateId(rng.gen_range(0..states)));

        let text = serialize_dfa(&dfa);
        let parsed = parse_dfa(&text).unwrap();
        assert_eq!(parsed, dfa);
        assert_eq!(serialize_dfa(&parsed), text);
    }
}

#[test]
fn equal_languages_serialize_identically() {
    let other = "s\tt\tu\na\tb\nt\nt\tu\nt\ta\ts\ns\ta\tt\nt\tb\tu\nu\ta\ts\nu\tb\tu\ns\tb\ts\n";
    let left = minimize(&parse_dfa(EVEN_AS).unwrap());
    let right = minimize(&parse_dfa(other).unwrap());
    assert_eq!(serialize_dfa(&left), serialize_dfa(&right));
}

#[test]
fn read_from_reader() {
    let dfa = read_dfa(EVEN_AS.as_bytes()).unwrap();
    assert_eq!(dfa.state_count(), 2);
}

macro_rules! declare_error_test {
    ($($name:ident: $source:literal => $pattern:pat),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let result = parse_dfa($source);
                assert!(matches!(result, Err($pattern)), "got {result:?}");
            }
        )*
    };
}

declare_error_test! {
    empty_file: "" => FormatError::MissingSection(Section::States),
    missing_alphabet: "q0" => FormatError::MissingSection(Section::Alphabet),
    missing_start: "q0\na\n" => FormatError::MissingSection(Section::Start),
    duplicate_state: "q0 q0\na\nq0\n\n" => FormatError::DuplicateState { line: 1, .. },
    duplicate_symbol: "q0\na a\nq0\n\n" => FormatError::DuplicateSymbol { line: 2, symbol: 'a' },
    long_symbol: "q0\nab\nq0\n\n" => FormatError::InvalidSymbol { line: 2, .. },
    two_starts: "q0 q1\na\nq0 q1\n\n" => FormatError::StartCount { line: 3, found: 2 },
    no_start: "q0\na\n\n\n" => FormatError::StartCount { line: 3, found: 0 },
    undeclared_start: "q0\na\nq9\n\n" => FormatError::UndeclaredState(
        crate::UndeclaredStateReference { line: 3, role: Role::Start, .. }
    ),
    undeclared_accepting: "q0\na\nq0\nq1\n" => FormatError::UndeclaredState(
        crate::UndeclaredStateReference { line: 4, role: Role::Accepting, .. }
    ),
    undeclared_source: "q0\na\nq0\n\nq1 a q0\n" => FormatError::UndeclaredState(
        crate::UndeclaredStateReference { line: 5, role: Role::Source, .. }
    ),
    undeclared_target: "q0\na\nq0\n\nq0 a q1\n" => FormatError::UndeclaredState(
        crate::UndeclaredStateReference { line: 5, role: Role::Target, .. }
    ),
    undeclared_symbol: "q0\na\nq0\n\nq0 b q0\n" => FormatError::UndeclaredSymbol { line: 5, .. },
    short_transition: "q0\na\nq0\n\nq0 a\n" => FormatError::MalformedTransition { line: 5, .. },
    long_transition: "q0\na\nq0\n\nq0 a q0 q0\n" => FormatError::MalformedTransition { line: 5, .. },
    nondeterministic: "q0 q1\na\nq0\n\nq0 a q0\nq0 a q1\n" => FormatError::NonDeterministic { line: 6, symbol: 'a', .. },
}

#[test]
fn repeated_identical_transition_is_accepted() {
    let dfa = parse_dfa("q0\na\nq0\nq0\nq0 a q0\nq0 a q0\n").unwrap();
    assert_eq!(dfa.transition_count(), 1);
}
