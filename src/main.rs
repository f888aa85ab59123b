//! Command-line entry point: read every ledger file in order, then write
//! one text file per report into the output directory.

use anyhow::{Context, Result};
use clap::Parser;
use libtally::{prepare_reports, render, Ledger};
use log::info;

use std::fs;
use std::process;

mod cli;

use cli::Cli;

fn run(cli: &Cli) -> Result<()> {
    let mut ledger = Ledger::new();
    for path in &cli.ledger_files {
        ledger.read_file(path)?;
    }

    let reports = prepare_reports(&ledger);
    fs::create_dir_all(&cli.output_dir).with_context(|| {
        format!(
            "could not create output directory '{}'",
            cli.output_dir.display()
        )
    })?;
    let written = render::generate_all(&reports, &cli.output_dir)?;
    info!(
        "{} reports written to {}",
        written.len(),
        cli.output_dir.display()
    );
    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{run, Cli};
    use anyhow::Result;
    use std::fs;

    #[test]
    fn run_writes_reports() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let book = dir.path().join("book.txt");
        fs::write(&book, "alias cash a:cash\n2024-03-01\n10.50 cash i:salary\n")?;

        let cli = Cli {
            output_dir: dir.path().join("reports"),
            ledger_files: vec![book],
        };
        run(&cli)?;

        for name in ["all.txt", "2024.txt", "2024-Q1.txt", "2024-03.txt"] {
            assert!(cli.output_dir.join(name).is_file(), "missing {}", name);
        }
        Ok(())
    }

    #[test]
    fn run_fails_before_writing_anything() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let good = dir.path().join("good.txt");
        let bad = dir.path().join("bad.txt");
        fs::write(&good, "2024-03-01\n1 a:x i:y\n")?;
        fs::write(&bad, "1 2 3 4\n")?;

        let cli = Cli {
            output_dir: dir.path().join("reports"),
            ledger_files: vec![good, bad.clone()],
        };
        let err = run(&cli).unwrap_err();
        assert_eq!(
            format!("{:#}", err),
            format!("at '{}:1', invalid syntax", bad.display())
        );
        assert!(!cli.output_dir.exists());
        Ok(())
    }
}
