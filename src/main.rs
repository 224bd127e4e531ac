use anyhow::Result;
use clap::Parser;

use gitsync::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
