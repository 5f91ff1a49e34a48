mod error;

#[cfg(test)]
mod test;

use std::io;

use automata::index::{AsIndex as _, IndexedSet};
use automata::{Alphabet, Dfa, StateId};
use tracing::debug;

pub use error::{FormatError, Role, Section, UndeclaredStateReference};

// dfa_file   ::=  states '\n' alphabet '\n' start '\n' accepting ('\n' transition)*
// states     ::=  name ('\t' name)*
// alphabet   ::=  symbol ('\t' symbol)*
// start      ::=  name
// accepting  ::=  name ('\t' name)*
// transition ::=  name '\t' symbol '\t' name
//
// Any whitespace is accepted as a separator when reading.
pub fn parse_dfa(source: &str) -> Result<Dfa, FormatError> {
    let mut lines = source.lines().enumerate().map(|(i, line)| (i + 1, line));

    let (line, header) = lines.next().ok_or(FormatError::MissingSection(Section::States))?;
    let mut states = IndexedSet::<StateId, &str>::default();
    for name in header.split_whitespace() {
        if !states.insert_full(name).1 {
            return Err(FormatError::DuplicateState { line, name: name.to_string() });
        }
    }

    let (line, header) = lines.next().ok_or(FormatError::MissingSection(Section::Alphabet))?;
    let mut symbols = Vec::new();
    for symbol in header.split_whitespace() {
        let mut chars = symbol.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(FormatError::InvalidSymbol { line, symbol: symbol.to_string() });
        };
        if symbols.contains(&c) {
            return Err(FormatError::DuplicateSymbol { line, symbol: c });
        }
        symbols.push(c);
    }
    let alphabet = Alphabet::new(symbols);

    let lookup = |line, name: &str, role| {
        states.get_index_of(name).ok_or_else(|| UndeclaredStateReference {
            line,
            name: name.to_string(),
            role,
        })
    };

    let (line, header) = lines.next().ok_or(FormatError::MissingSection(Section::Start))?;
    let start = match header.split_whitespace().collect::<Vec<_>>()[..] {
        [name] => lookup(line, name, Role::Start)?,
        ref names => return Err(FormatError::StartCount { line, found: names.len() }),
    };

    let mut dfa = Dfa::new(alphabet);
    for _ in 1..states.len() {
        dfa.add_state(false);
    }
    dfa.set_start(start);

    // A file may end right after the start line when nothing is accepted.
    if let Some((line, header)) = lines.next() {
        for name in header.split_whitespace() {
            let state = lookup(line, name, Role::Accepting)?;
            dfa.set_accepting(state, true);
        }
    }

    for (line, content) in lines {
        let [from, symbol, to] = content.split_whitespace().collect::<Vec<_>>()[..] else {
            if content.trim().is_empty() {
                continue;
            }
            return Err(FormatError::MalformedTransition { line, content: content.to_string() });
        };

        let from_id = lookup(line, from, Role::Source)?;
        let to_id = lookup(line, to, Role::Target)?;

        let mut chars = symbol.chars();
        let symbol_id = match (chars.next(), chars.next()) {
            (Some(c), None) => dfa.alphabet().id_of(c),
            _ => None,
        };
        let Some(symbol_id) = symbol_id else {
            return Err(FormatError::UndeclaredSymbol { line, symbol: symbol.to_string() });
        };

        match dfa.next(from_id, symbol_id) {
            Some(existing) if existing != to_id => {
                return Err(FormatError::NonDeterministic {
                    line,
                    state: from.to_string(),
                    symbol: dfa.alphabet().symbol(symbol_id),
                });
            }
            _ => dfa.set_transition(from_id, symbol_id, to_id),
        }
    }

    debug!(states = dfa.state_count(), transitions = dfa.transition_count(), "parsed dfa");

    Ok(dfa)
}

pub fn read_dfa(mut reader: impl io::Read) -> Result<Dfa, FormatError> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    parse_dfa(&source)
}

/// Renders `dfa` in the format read by [`parse_dfa`]. States are named `q0`,
/// `q1`, ... after their ids, so serializing equal automata gives equal text.
pub fn serialize_dfa(dfa: &Dfa) -> String {
    let name = |state: StateId| format!("q{}", state.to_usize());
    let join = |items: Vec<String>| items.join("\t");

    let mut out = String::new();
    out += &join(dfa.states().map(name).collect());
    out += "\n";
    out += &join(dfa.alphabet().iter().map(|(_, c)| c.to_string()).collect());
    out += "\n";
    out += &name(dfa.start());
    out += "\n";
    out += &join(dfa.accepting_states().map(name).collect());
    out += "\n";

    for state in dfa.states() {
        for (symbol, next) in dfa.edges(state) {
            let symbol = dfa.alphabet().symbol(symbol);
            out += &format!("{}\t{symbol}\t{}\n", name(state), name(next));
        }
    }

    out
}

pub fn write_dfa(dfa: &Dfa, mut writer: impl io::Write) -> io::Result<()> {
    writer.write_all(serialize_dfa(dfa).as_bytes())?;
    writer.flush()
}
