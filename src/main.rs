//! Cribar CLI
//!
//! Entry point for the adaptive screening tool.
//!
//! # Usage
//!
//! ```bash
//! # Rank questions by informativeness
//! cribar rank data.json --catalog questions.json --forest children.json --outcome suic_mg
//!
//! # Print the scored question forest
//! cribar tree data.json --catalog questions.json --forest children.json --outcome suic_mg
//!
//! # Run an interactive screening session
//! cribar ask data.json --catalog questions.json --forest children.json --outcome suic_mg
//!
//! # Check the artifacts
//! cribar validate data.json --catalog questions.json --forest children.json --outcome suic_mg
//! ```

use clap::Parser;
use cribar::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error [{}]: {e}", e.code());
            ExitCode::FAILURE
        }
    }
}
