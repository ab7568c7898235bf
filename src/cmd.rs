//! Command line interface

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use fxhash::FxHashMap;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::circuit::{stats::stats, Circuit, Signal};
use crate::graph::check_cycles;
use crate::io::{read_netlist_file, read_stimuli_file, write_trace_file};
use crate::sim::{truth_table, Simulator};

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Command line arguments
#[derive(Subcommand)]
pub enum Commands {
    /// Show statistics about a circuit
    ///
    /// Will print the number of inputs, outputs, wires and components per
    /// kind.
    #[clap()]
    Show(ShowArgs),

    /// Simulate a circuit over a number of clock cycles
    ///
    /// Input values come from a stimulus file with one line per cycle and
    /// one character (0, 1, X, Z) per declared input, or from a seeded
    /// random generator. Unassigned inputs are X.
    #[clap(alias = "sim")]
    Simulate(SimulateArgs),

    /// Print the truth table of a combinational circuit
    ///
    /// Enumerates all 0/1 combinations of the primary inputs, one simulated
    /// cycle each. Fails on circuits containing flip-flops.
    #[clap(alias = "table")]
    TruthTable(TruthTableArgs),

    /// Check a circuit for combinational loops
    ///
    /// The command will fail if the combinational subgraph contains a cycle,
    /// and will print the component sequence along the loop.
    #[clap(alias = "check")]
    CheckCycles(CheckCyclesArgs),
}

fn load_circuit(path: &PathBuf) -> Circuit {
    match read_netlist_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", path.display(), e);
            process::exit(1);
        }
    }
}

/// Command arguments for circuit statistics
#[derive(Args)]
pub struct ShowArgs {
    /// Circuit to show
    netlist: PathBuf,
}

impl ShowArgs {
    /// Run the show command
    pub fn run(&self) {
        let circuit = load_circuit(&self.netlist);
        println!("{}", stats(&circuit));
    }
}

/// Command arguments for simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Circuit to simulate
    netlist: PathBuf,

    /// Input stimulus file
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Number of clock cycles; the last stimulus line is held if shorter
    #[arg(short = 'c', long, default_value_t = 1)]
    num_cycles: usize,

    /// Drive the inputs with random 0/1 values instead of a stimulus file
    #[arg(long, conflicts_with = "input")]
    random: bool,

    /// Seed for random stimulus generation
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Output file for the full wire trace
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

impl SimulateArgs {
    /// Run the simulate command
    pub fn run(&self) {
        let mut circuit = load_circuit(&self.netlist);
        if let Err(e) = check_cycles(&circuit) {
            eprintln!("Warning: {}; settling falls back to bounded iteration", e);
        }

        let input_names: Vec<String> = (0..circuit.nb_inputs())
            .map(|i| circuit.wire(circuit.input(i)).name.clone())
            .collect();
        let output_names: Vec<String> = (0..circuit.nb_outputs())
            .map(|i| circuit.wire(circuit.output(i)).name.clone())
            .collect();
        let output_ids: Vec<_> = (0..circuit.nb_outputs()).map(|i| circuit.output(i)).collect();

        let stimuli = if self.random {
            let mut rng = SmallRng::seed_from_u64(self.seed);
            (0..self.num_cycles)
                .map(|_| (0..input_names.len()).map(|_| Signal::from(rng.gen::<bool>())).collect())
                .collect()
        } else if let Some(path) = &self.input {
            match read_stimuli_file(path, input_names.len()) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{}: {}", path.display(), e);
                    process::exit(1);
                }
            }
        } else {
            Vec::new()
        };

        let nb_cycles = self.num_cycles.max(stimuli.len());
        let schedule: Vec<FxHashMap<String, Signal>> = (0..nb_cycles)
            .map(|cycle| {
                // Hold the last stimulus line when the schedule is shorter
                match stimuli.get(cycle).or(stimuli.last()) {
                    Some(row) => input_names.iter().cloned().zip(row.iter().copied()).collect(),
                    None => FxHashMap::default(),
                }
            })
            .collect();

        let mut sim = Simulator::new(&mut circuit);
        let snapshots = match sim.run(&schedule) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        };

        println!("cycle: {}", output_names.join(" "));
        for snap in &snapshots {
            let outs: Vec<String> = output_ids.iter().map(|id| snap.value(*id).to_string()).collect();
            let marker = if snap.converged() { "" } else { " (not settled)" };
            println!("{}: {}{}", snap.cycle(), outs.join(" "), marker);
        }

        if let Some(path) = &self.output {
            if let Err(e) = write_trace_file(path, &circuit, &snapshots) {
                eprintln!("{}: {}", path.display(), e);
                process::exit(1);
            }
        }
    }
}

/// Command arguments for truth-table enumeration
#[derive(Args)]
pub struct TruthTableArgs {
    /// Circuit to enumerate
    netlist: PathBuf,
}

impl TruthTableArgs {
    /// Run the truth-table command
    pub fn run(&self) {
        let mut circuit = load_circuit(&self.netlist);
        match truth_table(&mut circuit) {
            Ok(table) => print!("{}", table),
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
    }
}

/// Command arguments for cycle checking
#[derive(Args)]
pub struct CheckCyclesArgs {
    /// Circuit to check
    netlist: PathBuf,
}

impl CheckCyclesArgs {
    /// Run the cycle check command
    pub fn run(&self) {
        let circuit = load_circuit(&self.netlist);
        match check_cycles(&circuit) {
            Ok(()) => {
                println!("No combinational loops");
            }
            Err(e) => {
                println!("{}", e);
                process::exit(1);
            }
        }
    }
}
