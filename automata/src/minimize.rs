use tracing::{debug, trace};

use crate::alphabet::SymbolId;
use crate::dfa::Dfa;
use crate::index::{new_index, IndexedSet, IndexedVec};
use crate::StateId;

new_index!(index BlockId);

/// Computes the minimal automaton accepting the same language as `dfa`.
///
/// Unreachable and dead states are dropped first, then equivalent states are
/// merged by Moore partition refinement. An automaton accepting nothing becomes
/// a single non-accepting state without transitions.
/// The result is numbered breadth-first from the start in alphabet order, so
/// minimizing two automata for the same language yields identical values.
pub fn minimize(dfa: &Dfa) -> Dfa {
    let live = dfa.live();
    if !live[dfa.start()] {
        debug!(input_states = dfa.state_count(), "minimized to the empty language");
        return Dfa::new(dfa.alphabet().clone());
    }

    let reachable = dfa.reachable();
    let keep = dfa
        .states()
        .map(|state| reachable[state] && live[state])
        .collect::<IndexedVec<StateId, bool>>();
    let trimmed = dfa.retain_states(&keep);

    let blocks = refine(&trimmed);
    let minimal = canonical_quotient(&trimmed, &blocks);

    debug!(
        input_states = dfa.state_count(),
        trimmed_states = trimmed.state_count(),
        minimal_states = minimal.state_count(),
        "minimized"
    );

    minimal
}

/// Assigns every state the block of its equivalence class.
fn refine(dfa: &Dfa) -> IndexedVec<StateId, BlockId> {
    let mut initial = IndexedSet::<BlockId, bool>::default();
    let mut blocks = dfa
        .states()
        .map(|state| initial.insert_full(dfa.is_accepting(state)).0)
        .collect::<IndexedVec<StateId, BlockId>>();
    let mut block_count = initial.len();

    let mut round = 0;
    loop {
        round += 1;

        // Two states stay together iff they were together and every symbol
        // leads them into the same block (or both out of the automaton).
        let mut signatures = IndexedSet::<BlockId, (BlockId, Vec<Option<BlockId>>)>::default();
        let refined = dfa
            .states()
            .map(|state| {
                let targets = dfa.transitions[state].iter().map(|t| t.map(|t| blocks[t])).collect();
                signatures.insert_full((blocks[state], targets)).0
            })
            .collect::<IndexedVec<StateId, BlockId>>();

        let stable = signatures.len() == block_count;
        trace!(round, blocks = signatures.len(), "refined partition");

        blocks = refined;
        block_count = signatures.len();

        if stable {
            return blocks;
        }
    }
}

/// Builds the quotient automaton, discovering blocks breadth-first from the start.
fn canonical_quotient(dfa: &Dfa, blocks: &IndexedVec<StateId, BlockId>) -> Dfa {
    let mut representative = IndexedVec::<BlockId, Option<StateId>>::new();
    for (state, &block) in blocks.enumerate() {
        while !representative.contains_index(block) {
            representative.push(None);
        }
        representative[block].get_or_insert(state);
    }

    let mut order = IndexedSet::<StateId, BlockId>::default();
    let mut accepting = IndexedVec::new();
    let mut transitions = IndexedVec::<StateId, IndexedVec<SymbolId, Option<StateId>>>::new();

    order.insert_full(blocks[dfa.start()]);

    let mut next_unprocessed = 0;
    while next_unprocessed < order.len() {
        let block = order[StateId(next_unprocessed)];
        next_unprocessed += 1;

        let Some(state) = representative[block] else { unreachable!("every block has a member") };
        accepting.push(dfa.is_accepting(state));

        let row = dfa.alphabet().ids().map(|symbol| {
            let next = dfa.next(state, symbol)?;
            Some(order.insert_full(blocks[next]).0)
        });
        transitions.push(row.collect());
    }

    Dfa { alphabet: dfa.alphabet().clone(), start: StateId(0), accepting, transitions }
}
