
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use automata::product::Product;
use automata::Dfa;
use tracing::{debug, info};

pub use automata::AlphabetMismatch;

/// Whether `left` and `right` accept the same language.
///
/// Explores the product automaton breadth-first from the pair of start states
/// and fails as soon as a pair is reached where exactly one side accepts.
pub fn equivalent(left: &Dfa, right: &Dfa) -> Result<bool, AlphabetMismatch> {
    Ok(counterexample(left, right)?.is_none())
}

/// The shortest word accepted by exactly one of the automata, ties broken in
/// alphabet order, or `None` if they are equivalent.
pub fn counterexample(left: &Dfa, right: &Dfa) -> Result<Option<String>, AlphabetMismatch> {
    let product = Product::new(left, right)?;
    let search = product.search(|product, pair| {
        let (l, r) = product.accepting(pair);
        l != r
    });

    debug!(explored = search.pairs.len(), found = search.found.is_some(), "searched product");

    let word = search.found.map(|id| {
        search.path_to(id).into_iter().map(|symbol| left.alphabet().symbol(symbol)).collect()
    });
    Ok(word)
}

/// Reads two automata and writes `TRUE` to `out` if they are equivalent,
/// `FALSE` otherwise, without a trailing newline.
///
/// Both files must declare the same alphabet, otherwise this fails with
/// [`AlphabetMismatch`] and writes nothing. Automata written by `afd-minimo`
/// declare only the symbols occurring in their regex, so those for `a` and `b`
/// cannot be compared.
pub fn equivalentes(
    automaton_path1: impl AsRef<Path>,
    automaton_path2: impl AsRef<Path>,
    mut out: impl Write,
) -> Result<()> {
    let now = Instant::now();

    let dfa1 = load(automaton_path1.as_ref())?;
    let dfa2 = load(automaton_path2.as_ref())?;

    info!(elapsed = ?now.elapsed(), "loaded automata");

    let now = Instant::now();

    let verdict = match counterexample(&dfa1, &dfa2)? {
        Some(word) => {
            debug!(%word, "automata differ");
            "FALSE"
        }
        None => "TRUE",
    };

    info!(elapsed = ?now.elapsed(), verdict, "compared automata");

    out.write_all(verdict.as_bytes()).context("Failed to write verdict")?;
    out.flush().context("Failed to write verdict")?;
    Ok(())
}

fn load(path: &Path) -> Result<Dfa> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read automaton file {}", path.display()))?;
    dfa_file::parse_dfa(&source)
        .with_context(|| format!("Failed to parse automaton file {}", path.display()))
}
