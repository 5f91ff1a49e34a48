use tracing::debug;

use crate::alphabet::SymbolId;
use crate::dfa::Dfa;
use crate::index::{IndexedSet, IndexedVec};
use crate::nfa::Nfa;
use crate::StateId;

/// Subset construction. Each DFA state stands for the epsilon-closed set of
/// NFA states it was discovered as; only sets reachable from the start are built.
pub fn determinize(nfa: &Nfa) -> Dfa {
    let alphabet = nfa.alphabet().clone();

    // Maps each discovered subset of NFA states to its DFA state. Subsets are
    // processed in discovery order, so the set itself doubles as the worklist.
    let mut subsets = IndexedSet::<StateId, Vec<StateId>>::default();
    let mut transitions = IndexedVec::<StateId, IndexedVec<SymbolId, Option<StateId>>>::new();

    subsets.insert_full(nfa.epsilon_closure([nfa.start()]));

    let mut next_unprocessed = 0;
    while next_unprocessed < subsets.len() {
        let current = subsets[StateId(next_unprocessed)].clone();
        next_unprocessed += 1;

        let row = alphabet
            .ids()
            .map(|symbol| {
                let target = nfa.epsilon_closure(nfa.step(&current, symbol));
                // The empty subset is the dead sink, left implicit.
                if target.is_empty() {
                    return None;
                }
                let (id, _) = subsets.insert_full(target);
                Some(id)
            })
            .collect();
        transitions.push(row);
    }

    let accepting = subsets
        .iter()
        .map(|subset| subset.iter().any(|&state| nfa.is_accepting(state)))
        .collect::<IndexedVec<StateId, bool>>();

    debug!(nfa_states = nfa.state_count(), dfa_states = subsets.len(), "determinized");

    Dfa { alphabet, start: StateId(0), accepting, transitions }
}
