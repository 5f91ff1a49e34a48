use automata::{Alphabet, Nfa, StateId};

use crate::Regex;

/// Thompson construction. The automaton reads exactly the symbols that occur
/// in `regex`.
pub fn regex_to_nfa(regex: &Regex) -> Nfa {
    let mut ctx = ThompsonContext { nfa: Nfa::new(Alphabet::new(regex.symbols())) };

    let start = ctx.nfa.start();
    let accept = ctx.conv(regex, start);
    ctx.nfa.set_accepting(accept, true);

    ctx.nfa
}

struct ThompsonContext {
    nfa: Nfa,
}

impl ThompsonContext {
    fn fresh(&mut self) -> StateId {
        self.nfa.add_state(false)
    }

    /// Builds the fragment for `regex` entering at `start` and returns its
    /// single accept state.
    fn conv(&mut self, regex: &Regex, start: StateId) -> StateId {
        match regex {
            Regex::Epsilon => start,
            Regex::Symbol(c) => {
                let accept = self.fresh();
                let symbol = self.nfa.alphabet().id_of(*c);
                let symbol = symbol.unwrap_or_else(|| panic!("symbol {c} missing from the alphabet"));
                self.nfa.add_transition(start, Some(symbol), accept);
                accept
            }
            Regex::Concat(l, r) => {
                let l_accept = self.conv(l, start);
                let r_start = self.fresh();
                self.nfa.add_transition(l_accept, None, r_start);
                self.conv(r, r_start)
            }
            Regex::Union(l, r) => {
                let (l_start, r_start) = (self.fresh(), self.fresh());
                self.nfa.add_transition(start, None, l_start);
                self.nfa.add_transition(start, None, r_start);

                let l_accept = self.conv(l, l_start);
                let r_accept = self.conv(r, r_start);

                let accept = self.fresh();
                self.nfa.add_transition(l_accept, None, accept);
                self.nfa.add_transition(r_accept, None, accept);
                accept
            }
            Regex::Star(e) => {
                let (e_start, accept) = (self.fresh(), self.fresh());
                self.nfa.add_transition(start, None, e_start);
                self.nfa.add_transition(start, None, accept);

                let e_accept = self.conv(e, e_start);
                self.nfa.add_transition(e_accept, None, e_start);
                self.nfa.add_transition(e_accept, None, accept);
                accept
            }
        }
    }
}
