mod conv;
mod parser;

#[cfg(test)]
mod test;

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use automata::{Alphabet, Dfa};
use tracing::{debug, info};

pub use conv::regex_to_nfa;
pub use parser::{parse_regex, Position, SyntaxError};

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Regex {
    Epsilon,
    Symbol(char),
    Concat(Box<Regex>, Box<Regex>),
    Union(Box<Regex>, Box<Regex>),
    Star(Box<Regex>),
}

impl Regex {
    pub fn concat(left: Regex, right: Regex) -> Regex {
        Regex::Concat(Box::new(left), Box::new(right))
    }

    pub fn union(left: Regex, right: Regex) -> Regex {
        Regex::Union(Box::new(left), Box::new(right))
    }

    pub fn star(inner: Regex) -> Regex {
        Regex::Star(Box::new(inner))
    }

    /// The symbols appearing in the expression, each once, in order of appearance.
    pub fn symbols(&self) -> Vec<char> {
        fn gather(regex: &Regex, out: &mut Vec<char>) {
            match regex {
                Regex::Epsilon => {}
                Regex::Symbol(c) if out.contains(c) => {}
                Regex::Symbol(c) => out.push(*c),
                Regex::Concat(l, r) | Regex::Union(l, r) => {
                    gather(l, out);
                    gather(r, out);
                }
                Regex::Star(e) => gather(e, out),
            }
        }

        let mut out = Vec::new();
        gather(self, &mut out);
        out
    }

    fn precedence(&self) -> u8 {
        match self {
            Regex::Union(..) => 0,
            Regex::Concat(..) => 1,
            Regex::Star(_) => 2,
            Regex::Epsilon | Regex::Symbol(_) => 3,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, min_precedence: u8) -> fmt::Result {
        match self {
            Regex::Epsilon => write!(f, "()"),
            _ if self.precedence() < min_precedence => write!(f, "({self})"),
            _ => write!(f, "{self}"),
        }
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regex::Epsilon => Ok(()),
            Regex::Symbol(c) => write!(f, "{c}"),
            Regex::Union(l, r) => {
                l.fmt_operand(f, 0)?;
                write!(f, "|")?;
                r.fmt_operand(f, 1)
            }
            Regex::Concat(l, r) => {
                l.fmt_operand(f, 1)?;
                r.fmt_operand(f, 2)
            }
            Regex::Star(e) => {
                e.fmt_operand(f, 2)?;
                write!(f, "*")
            }
        }
    }
}

/// Parses `source` and turns it into the minimal DFA for its language.
pub fn minimal_dfa(source: &str, alphabet: &Alphabet) -> Result<Dfa, SyntaxError> {
    let regex = parse_regex(source, alphabet)?;
    debug!(%regex, "parsed regex");

    let nfa = regex_to_nfa(&regex);
    debug!(states = nfa.state_count(), "built nfa");

    Ok(nfa.determinize().minimize())
}

/// Reads a regex from `regex_path` and writes its minimal DFA to `automaton_path`.
pub fn afd_minimo(regex_path: impl AsRef<Path>, automaton_path: impl AsRef<Path>) -> Result<()> {
    let (regex_path, automaton_path) = (regex_path.as_ref(), automaton_path.as_ref());
    let now = Instant::now();

    let source = std::fs::read_to_string(regex_path)
        .with_context(|| format!("Failed to read regex file {}", regex_path.display()))?;
    let dfa = minimal_dfa(source.trim(), &Alphabet::alphanumeric())
        .with_context(|| format!("Failed to parse regex file {}", regex_path.display()))?;

    info!(elapsed = ?now.elapsed(), states = dfa.state_count(), "built minimal dfa");

    let file = File::create(automaton_path)
        .with_context(|| format!("Failed to create automaton file {}", automaton_path.display()))?;
    dfa_file::write_dfa(&dfa, BufWriter::new(file))
        .with_context(|| format!("Failed to write automaton file {}", automaton_path.display()))?;

    Ok(())
}
