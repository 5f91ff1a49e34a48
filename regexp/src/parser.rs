use std::fmt;

use automata::Alphabet;
use chumsky::error::Simple;
use chumsky::primitive::{end, filter, just};
use chumsky::recursive::recursive;
use chumsky::Parser;
use thiserror::Error;

use crate::Regex;

const RESERVED: [char; 4] = ['(', ')', '*', '|'];

/// A location in the regex source. `offset` counts characters from the start,
/// `line` and `column` are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    fn at(source: &str, offset: usize) -> Self {
        let (mut line, mut column) = (1, 1);
        for c in source.chars().take(offset) {
            match c {
                '\n' => (line, column) = (line + 1, 1),
                _ => column += 1,
            }
        }
        Position { offset, line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("{0}: `)` has no matching `(`")]
    UnmatchedClose(Position),
    #[error("{0}: `(` is never closed")]
    UnclosedGroup(Position),
    #[error("{position}: `{operator}` is missing an operand")]
    MissingOperand { position: Position, operator: char },
    #[error("{position}: `{symbol}` is not in the alphabet")]
    UnknownSymbol { position: Position, symbol: char },
}

// <Atom>   ::= <Symbol> | `(' <Regex> `)'
// <Star>   ::= <Atom> `*'*
// <Concat> ::= <Star>+
// <Union>  ::= <Concat> (`|' <Concat>)*
// <Regex>  ::= <Union> | ε
fn regex_parser<'a>(alphabet: &'a Alphabet) -> impl Parser<char, Regex, Error = Simple<char>> + 'a {
    recursive(move |regex| {
        let symbol = filter(move |c: &char| alphabet.contains(*c) && !RESERVED.contains(c));
        let group = regex.delimited_by(just('('), just(')'));
        let atom = symbol.map(Regex::Symbol).or(group).boxed();

        let star = atom.then(just('*').repeated()).foldl(|e, _| Regex::star(e)).boxed();
        let concat = star.clone().then(star.repeated()).foldl(Regex::concat).boxed();
        let union = concat.clone().then(just('|').ignore_then(concat).repeated()).foldl(Regex::union);

        union.or_not().map(|regex| regex.unwrap_or(Regex::Epsilon))
    })
}

pub fn parse_regex(source: &str, alphabet: &Alphabet) -> Result<Regex, SyntaxError> {
    regex_parser(alphabet)
        .then_ignore(end())
        .parse(source)
        .map_err(|errors| classify(source, &errors[0]))
}

/// Turns the furthest failure reported by the parser into a precise error kind.
fn classify(source: &str, error: &Simple<char>) -> SyntaxError {
    let chars = source.chars().collect::<Vec<_>>();
    let offset = error.span().start.min(chars.len());
    let position = |offset| Position::at(source, offset);

    // Parentheses opened and not yet closed before `offset`, innermost last.
    let mut open = Vec::new();
    let mut unmatched_close = None;
    for (i, &c) in chars[..offset].iter().enumerate() {
        match c {
            '(' => open.push(i),
            ')' if open.pop().is_none() => unmatched_close = unmatched_close.or(Some(i)),
            _ => {}
        }
    }
    if let Some(i) = unmatched_close {
        return SyntaxError::UnmatchedClose(position(i));
    }

    // An alternative or a group that ends right after `|` lacks its right operand.
    let previous = offset.checked_sub(1).filter(|&i| chars[i] == '|');

    match error.found() {
        Some(&c @ ('*' | '|')) => SyntaxError::MissingOperand { position: position(offset), operator: c },
        Some(')') | None if previous.is_some() => {
            let position = position(previous.unwrap_or(offset));
            SyntaxError::MissingOperand { position, operator: '|' }
        }
        Some(')') => SyntaxError::UnmatchedClose(position(offset)),
        None => match open.last() {
            Some(&i) => SyntaxError::UnclosedGroup(position(i)),
            None => SyntaxError::MissingOperand { position: position(offset), operator: '|' },
        },
        Some(&symbol) => SyntaxError::UnknownSymbol { position: position(offset), symbol },
    }
}
