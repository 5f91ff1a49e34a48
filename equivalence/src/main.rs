use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let automaton_path1 = std::env::args().nth(1).context("No first automaton file provided")?;
    let automaton_path2 = std::env::args().nth(2).context("No second automaton file provided")?;

    equivalence::equivalentes(automaton_path1, automaton_path2, std::io::stdout().lock())
}
