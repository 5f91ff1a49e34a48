use std::fmt;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    States,
    Alphabet,
    Start,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::States => "states",
            Section::Alphabet => "alphabet",
            Section::Start => "start state",
        })
    }
}

/// Where an undeclared state name was used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Start,
    Accepting,
    Source,
    Target,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Start => "start",
            Role::Accepting => "accepting",
            Role::Source => "transition source",
            Role::Target => "transition target",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("line {line}: {role} state `{name}` was not declared")]
pub struct UndeclaredStateReference {
    pub line: usize,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("missing {0} section")]
    MissingSection(Section),
    #[error("line {line}: state `{name}` declared twice")]
    DuplicateState { line: usize, name: String },
    #[error("line {line}: symbol `{symbol}` declared twice")]
    DuplicateSymbol { line: usize, symbol: char },
    #[error("line {line}: symbol `{symbol}` is not a single character")]
    InvalidSymbol { line: usize, symbol: String },
    #[error("line {line}: expected exactly one start state, found {found}")]
    StartCount { line: usize, found: usize },
    #[error("line {line}: expected `source symbol target`, found `{content}`")]
    MalformedTransition { line: usize, content: String },
    #[error("line {line}: symbol `{symbol}` is not in the alphabet")]
    UndeclaredSymbol { line: usize, symbol: String },
    #[error("line {line}: state `{state}` has more than one transition on `{symbol}`")]
    NonDeterministic { line: usize, state: String, symbol: char },
    #[error(transparent)]
    UndeclaredState(#[from] UndeclaredStateReference),
    #[error("failed to read automaton")]
    Io(#[from] std::io::Error),
}
