use clap::Parser;
use std::path::PathBuf;

/// Reads plain text ledgers and writes an all-time report along with
/// yearly, quarterly, and monthly reports.
#[derive(Parser, Debug)]
#[command(name = "tally", version, about)]
pub struct Cli {
    /// Directory where reports will be written.
    #[arg(
        short = 'o',
        long = "output",
        env = "TALLY_OUTPUT_DIR",
        value_name = "DIR"
    )]
    pub output_dir: PathBuf,

    /// Ledger files, read in the order given.
    #[arg(required = true, value_name = "LEDGER")]
    pub ledger_files: Vec<PathBuf>,
}
