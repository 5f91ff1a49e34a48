use automata::{Alphabet, Nfa};
use itertools::Itertools;

use crate::{minimal_dfa, parse_regex, regex_to_nfa, Position, Regex, SyntaxError};

fn parse(source: &str) -> Regex {
    parse_regex(source, &Alphabet::alphanumeric()).unwrap()
}

fn sym(c: char) -> Regex {
    Regex::Symbol(c)
}

fn nullable(regex: &Regex) -> bool {
    match regex {
        Regex::Epsilon | Regex::Star(_) => true,
        Regex::Symbol(_) => false,
        Regex::Concat(l, r) => nullable(l) && nullable(r),
        Regex::Union(l, r) => nullable(l) || nullable(r),
    }
}

// Brzozowski derivative, `None` being the empty language.
fn derive(regex: &Regex, c: char) -> Option<Regex> {
    let union = |l: Option<Regex>, r: Option<Regex>| match (l, r) {
        (Some(l), Some(r)) => Some(Regex::union(l, r)),
        (l, r) => l.or(r),
    };

    match regex {
        Regex::Epsilon => None,
        Regex::Symbol(d) => (*d == c).then_some(Regex::Epsilon),
        Regex::Union(l, r) => union(derive(l, c), derive(r, c)),
        Regex::Concat(l, r) => {
            let first = derive(l, c).map(|l| Regex::concat(l, (**r).clone()));
            match nullable(l) {
                true => union(first, derive(r, c)),
                false => first,
            }
        }
        Regex::Star(e) => derive(e, c).map(|e2| Regex::concat(e2, regex.clone())),
    }
}

/// Textbook membership, independent of any automaton.
fn matches(regex: &Regex, word: &str) -> bool {
    let mut current = regex.clone();
    for c in word.chars() {
        match derive(&current, c) {
            Some(next) => current = next,
            None => return false,
        }
    }
    nullable(&current)
}

fn words(symbols: &[char], max_len: usize) -> Vec<String> {
    std::iter::once(String::new())
        .chain((1..=max_len).flat_map(|len| {
            std::iter::repeat(symbols.to_vec())
                .take(len)
                .multi_cartesian_product()
                .map(|word| word.into_iter().collect::<String>())
        }))
        .collect()
}

#[test]
fn precedence() {
    assert_eq!(parse(""), Regex::Epsilon);
    assert_eq!(parse("a"), sym('a'));
    assert_eq!(
        parse("ab|c*"),
        Regex::union(Regex::concat(sym('a'), sym('b')), Regex::star(sym('c')))
    );
    assert_eq!(parse("ab*"), Regex::concat(sym('a'), Regex::star(sym('b'))));
    assert_eq!(parse("(ab)*"), Regex::star(Regex::concat(sym('a'), sym('b'))));
    assert_eq!(parse("a|(b|c)"), Regex::union(sym('a'), Regex::union(sym('b'), sym('c'))));
    assert_eq!(parse("a|b|c"), Regex::union(Regex::union(sym('a'), sym('b')), sym('c')));
    assert_eq!(parse("abc"), Regex::concat(Regex::concat(sym('a'), sym('b')), sym('c')));
    assert_eq!(parse("a**"), Regex::star(Regex::star(sym('a'))));
    assert_eq!(parse("()"), Regex::Epsilon);
    assert_eq!(parse("a()"), Regex::concat(sym('a'), Regex::Epsilon));
}

#[test]
fn display_round_trips() {
    for source in ["", "a", "ab|c*", "(ab)*", "a|(b|c)", "a(b|c)d", "()*", "(a*)*b", "a**"] {
        let regex = parse(source);
        assert_eq!(parse(&regex.to_string()), regex, "source {source:?}");
    }
    assert_eq!(parse("((a)(b))").to_string(), "ab");
}

#[test]
fn symbols_in_order() {
    assert_eq!(parse("ba(a|c)*b").symbols(), vec!['b', 'a', 'c']);
    assert!(parse("").symbols().is_empty());
}

fn position(offset: usize, line: usize, column: usize) -> Position {
    Position { offset, line, column }
}

#[test]
fn syntax_errors() {
    let alphabet = Alphabet::new(['a', 'b']);
    let err = |source: &str| parse_regex(source, &alphabet).unwrap_err();

    assert_eq!(err("a)"), SyntaxError::UnmatchedClose(position(1, 1, 2)));
    assert_eq!(err("ab)b"), SyntaxError::UnmatchedClose(position(2, 1, 3)));
    assert_eq!(err("(a"), SyntaxError::UnclosedGroup(position(0, 1, 1)));
    assert_eq!(err("a((b)"), SyntaxError::UnclosedGroup(position(1, 1, 2)));
    assert_eq!(err("a("), SyntaxError::UnclosedGroup(position(1, 1, 2)));
    assert_eq!(err("*a"), SyntaxError::MissingOperand { position: position(0, 1, 1), operator: '*' });
    assert_eq!(err("(*)"), SyntaxError::MissingOperand { position: position(1, 1, 2), operator: '*' });
    assert_eq!(err("|a"), SyntaxError::MissingOperand { position: position(0, 1, 1), operator: '|' });
    assert_eq!(err("a||b"), SyntaxError::MissingOperand { position: position(2, 1, 3), operator: '|' });
    assert_eq!(err("a(|b)"), SyntaxError::MissingOperand { position: position(2, 1, 3), operator: '|' });
    assert_eq!(err("a|"), SyntaxError::MissingOperand { position: position(1, 1, 2), operator: '|' });
    assert_eq!(err("(a|)"), SyntaxError::MissingOperand { position: position(2, 1, 3), operator: '|' });
    assert_eq!(err("abc"), SyntaxError::UnknownSymbol { position: position(2, 1, 3), symbol: 'c' });
    assert_eq!(err("a\nx"), SyntaxError::UnknownSymbol { position: position(1, 1, 2), symbol: '\n' });
}

#[test]
fn error_positions_span_lines() {
    let alphabet = Alphabet::new(['a', 'b', '\n']);
    let err = parse_regex("ab\na\nb)", &alphabet).unwrap_err();
    assert_eq!(err, SyntaxError::UnmatchedClose(position(6, 3, 2)));
    assert_eq!(err.to_string(), "line 3, column 2: `)` has no matching `(`");
}

#[test]
fn thompson_fragment_shapes() {
    let count_edges = |nfa: &Nfa| nfa.states().map(|s| nfa.edges(s).len()).sum::<usize>();

    let nfa = regex_to_nfa(&parse("a"));
    assert_eq!(nfa.state_count(), 2);
    assert_eq!(count_edges(&nfa), 1);

    let nfa = regex_to_nfa(&parse(""));
    assert_eq!(nfa.state_count(), 1);
    assert!(nfa.is_accepting(nfa.start()));

    let nfa = regex_to_nfa(&parse("a|b"));
    assert_eq!(nfa.state_count(), 6);
    assert_eq!(count_edges(&nfa), 6);

    let nfa = regex_to_nfa(&parse("a*"));
    assert_eq!(nfa.state_count(), 4);
    assert_eq!(count_edges(&nfa), 5);

    let nfa = regex_to_nfa(&parse("ab"));
    assert_eq!(nfa.state_count(), 4);
    assert_eq!(count_edges(&nfa), 3);
    assert_eq!(nfa.states().filter(|&s| nfa.is_accepting(s)).count(), 1);
}

#[test]
fn language_preservation() {
    let regexes = [
        "", "a", "ab", "a|b", "a*", "(ab)*", "a|a*", "(a|b)*abb", "a(b|())c", "(a*b*)*",
        "((a|b)(a|b))*", "a*b*c*", "(a|bc)*(c|())", "()*", "(ab|ba)*a", "c(a|b)*c|b",
    ];

    for source in regexes {
        let regex = parse(source);
        let nfa = regex_to_nfa(&regex);
        let dfa = nfa.determinize();
        let min = dfa.minimize();

        let mut symbols = regex.symbols();
        symbols.push('z');
        for word in words(&symbols, 5) {
            let expected = matches(&regex, &word);
            assert_eq!(nfa.accepts(&word), expected, "nfa of {source:?} on {word:?}");
            assert_eq!(dfa.accepts(&word), expected, "dfa of {source:?} on {word:?}");
            assert_eq!(min.accepts(&word), expected, "minimal dfa of {source:?} on {word:?}");
        }
    }
}

#[test]
fn union_minimal_dfa() {
    let dfa = minimal_dfa("a|b", &Alphabet::alphanumeric()).unwrap();

    assert_eq!(dfa.state_count(), 2);
    let accept = dfa.accepting_states().collect::<Vec<_>>();
    assert_eq!(accept.len(), 1);
    for symbol in dfa.alphabet().ids() {
        assert_eq!(dfa.next(dfa.start(), symbol), Some(accept[0]));
    }

    assert!(dfa.accepts("a"));
    assert!(dfa.accepts("b"));
    assert!(!dfa.accepts(""));
    assert!(!dfa.accepts("ab"));
}

#[test]
fn star_of_concat_minimal_dfa() {
    let dfa = minimal_dfa("(ab)*", &Alphabet::alphanumeric()).unwrap();

    for word in ["", "ab", "abab"] {
        assert!(dfa.accepts(word), "{word:?}");
    }
    for word in ["a", "aba", "ba"] {
        assert!(!dfa.accepts(word), "{word:?}");
    }
}

fn run_fixture(regex: &str, expected: &str) {
    let dfa = minimal_dfa(regex.trim(), &Alphabet::alphanumeric()).unwrap();
    assert_eq!(dfa_file::serialize_dfa(&dfa), expected);
}

macro_rules! declare_test {
    ($($name:ident),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let regex = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/", stringify!($name), ".re"));
                let dfa = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/", stringify!($name), ".dfa"));
                run_fixture(regex, dfa)
            }
        )*
    };
}

declare_test! {
    union,
    ab_star,
    a_star,
    a_or_a_star,
    concat,
    empty,
    dragon,
    div3,
}

#[test]
fn afd_minimo_writes_file() {
    let dir = std::env::temp_dir().join(format!("afd-minimo-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let (regex_path, automaton_path) = (dir.join("regex.txt"), dir.join("automaton.txt"));

    std::fs::write(&regex_path, "(a|b)*abb\n").unwrap();
    crate::afd_minimo(&regex_path, &automaton_path).unwrap();

    let written = std::fs::read_to_string(&automaton_path).unwrap();
    let expected = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/dragon.dfa"));
    assert_eq!(written, expected);

    std::fs::write(&regex_path, "a)").unwrap();
    let err = crate::afd_minimo(&regex_path, &automaton_path).unwrap_err();
    assert!(err.downcast_ref::<SyntaxError>().is_some());

    std::fs::remove_dir_all(&dir).unwrap();
}
