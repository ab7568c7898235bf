use clap::Parser;
use gatesim::cmd::{Cli, Commands};

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    match &cli.command {
        Commands::Show(a) => a.run(),
        Commands::Simulate(a) => a.run(),
        Commands::TruthTable(a) => a.run(),
        Commands::CheckCycles(a) => a.run(),
    }
}
