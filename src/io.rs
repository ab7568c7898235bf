//! Read and write netlists, stimuli and traces

pub mod netlist;
pub mod stimuli;
pub mod trace;

use std::fs::File;
use std::path::Path;

pub use netlist::{read_netlist, write_netlist};
pub use stimuli::read_stimuli;
pub use trace::write_trace;

use crate::circuit::{Circuit, Signal};
use crate::error::NetlistError;
use crate::sim::Snapshot;

/// Read a circuit from a netlist file
pub fn read_netlist_file(path: &Path) -> Result<Circuit, NetlistError> {
    let f = File::open(path)?;
    read_netlist(f)
}

/// Write a circuit to a netlist file
pub fn write_netlist_file(path: &Path, circuit: &Circuit) -> Result<(), NetlistError> {
    let mut f = File::create(path)?;
    write_netlist(&mut f, circuit)?;
    Ok(())
}

/// Read a stimulus file for a circuit's declared inputs
pub fn read_stimuli_file(path: &Path, nb_inputs: usize) -> Result<Vec<Vec<Signal>>, NetlistError> {
    let f = File::open(path)?;
    read_stimuli(f, nb_inputs)
}

/// Write a simulation trace to a file
pub fn write_trace_file(
    path: &Path,
    circuit: &Circuit,
    snapshots: &[Snapshot],
) -> Result<(), NetlistError> {
    let mut f = File::create(path)?;
    write_trace(&mut f, circuit, snapshots)?;
    Ok(())
}
