use std::fmt::Write as _;

use crate::dfa::Dfa;
use crate::index::AsIndex as _;
use crate::nfa::Nfa;
use crate::StateId;

fn header(dot: &mut String, start: StateId, accepting: impl Iterator<Item = StateId>) {
    dot.push_str("digraph G {\n");
    dot.push_str("    rankdir=LR;\n");
    dot.push_str("    empty [label = \"\" shape = plaintext];\n");
    dot.push_str("    node [shape = doublecircle];");
    for state in accepting {
        let _ = write!(dot, " q{}", state.to_usize());
    }
    dot.push_str(";\n");
    dot.push_str("    node [shape = circle];\n");
    let _ = writeln!(dot, "    empty -> q{} [label = \"start\"];", start.to_usize());
}

impl Dfa {
    /// Renders the automaton in Graphviz syntax.
    pub fn to_dot(&self) -> String {
        let mut dot = String::new();
        header(&mut dot, self.start(), self.accepting_states());

        for state in self.states() {
            for (symbol, next) in self.edges(state) {
                let symbol = self.alphabet().symbol(symbol);
                let (from, to) = (state.to_usize(), next.to_usize());
                let _ = writeln!(dot, "    q{from} -> q{to} [label = \"{symbol}\"];");
            }
        }

        dot.push_str("}\n");
        dot
    }
}

impl Nfa {
    /// Renders the automaton in Graphviz syntax, epsilon edges labelled `ε`.
    pub fn to_dot(&self) -> String {
        let mut dot = String::new();
        let accepting = self.states().filter(|&state| self.is_accepting(state));
        header(&mut dot, self.start(), accepting);

        for state in self.states() {
            for &(label, next) in self.edges(state) {
                let label = label.map_or('ε', |symbol| self.alphabet().symbol(symbol));
                let (from, to) = (state.to_usize(), next.to_usize());
                let _ = writeln!(dot, "    q{from} -> q{to} [label = \"{label}\"];");
            }
        }

        dot.push_str("}\n");
        dot
    }
}
