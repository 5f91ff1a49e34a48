use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let regex_path = std::env::args().nth(1).context("No regex file provided")?;
    let automaton_path = std::env::args().nth(2).context("No automaton file provided")?;

    regexp::afd_minimo(regex_path, automaton_path)
}
