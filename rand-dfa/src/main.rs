use std::fs::File;
use std::io::BufWriter;

use anyhow::{ensure, Context, Result};
use automata::{Alphabet, Dfa, StateId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SYMBOLS: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

fn main() -> Result<()> {
    let outpath = std::env::args().nth(1).context("No output file provided")?;
    let nstates = std::env::args().nth(2).context("No states count provided")?;
    let nsymbols = std::env::args().nth(3).context("No symbols count provided")?;
    let seed = std::env::args().nth(4);

    let nstates = nstates.parse::<usize>().context("States count is not a valid number")?;
    let nsymbols = nsymbols.parse::<usize>().context("Symbols count is not a valid number")?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed.parse().context("Seed is not a valid number")?),
        None => StdRng::from_entropy(),
    };

    ensure!(nstates > 0, "A DFA needs at least one state");
    ensure!(nsymbols <= SYMBOLS.len(), "At most {} symbols are supported", SYMBOLS.len());

    let dfa = random_dfa(&mut rng, nstates, nsymbols);

    let out = File::create(&outpath).context("Cannot create output file")?;
    dfa_file::write_dfa(&dfa, BufWriter::new(out)).context("Failed to write output file")?;

    Ok(())
}

/// A complete DFA where every transition target and accepting flag is drawn
/// uniformly at random.
fn random_dfa(rng: &mut impl Rng, nstates: usize, nsymbols: usize) -> Dfa {
    let alphabet = Alphabet::new(SYMBOLS.chars().take(nsymbols));

    let mut dfa = Dfa::new(alphabet.clone());
    dfa.set_accepting(StateId(0), rng.gen_bool(0.5));
    for _ in 1..nstates {
        dfa.add_state(rng.gen_bool(0.5));
    }

    for state in 0..nstates {
        for symbol in alphabet.ids() {
            dfa.set_transition(StateId(state), symbol, StateId(rng.gen_range(0..nstates)));
        }
    }

    dfa.set_start(StateId(rng.gen_range(0..nstates)));
    dfa
}
