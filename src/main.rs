//! pdfcompose - Page layout and composition for PDFs.

use clap::Parser;
use std::process;

use pdfcompose::cli::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli::run(cli).await {
        eprintln!("Error: {err}");
        process::exit(if err.is_policy_error() { 2 } else { 1 });
    }
}
