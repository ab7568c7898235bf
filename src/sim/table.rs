//! Truth-table enumeration of combinational circuits

use std::fmt;

use fxhash::FxHashMap;
use itertools::Itertools;

use crate::circuit::{Circuit, Signal};
use crate::error::SimError;
use crate::sim::Simulator;

/// The complete input/output table of a combinational circuit
#[derive(Debug, Clone)]
pub struct TruthTable {
    /// Primary input names, in declaration order
    pub inputs: Vec<String>,
    /// Primary output names, in declaration order
    pub outputs: Vec<String>,
    /// One row per input combination: input values, then output values
    pub rows: Vec<(Vec<Signal>, Vec<Signal>)>,
}

/// Enumerate all 0/1 input combinations of a combinational circuit
///
/// Combinations are generated in binary counting order over the declared
/// inputs, one simulated cycle each. Sequential circuits are rejected.
pub fn truth_table(circuit: &mut Circuit) -> Result<TruthTable, SimError> {
    if !circuit.is_comb() {
        return Err(SimError::NotCombinational {
            nb_dff: circuit.nb_dff(),
        });
    }
    let inputs: Vec<String> = (0..circuit.nb_inputs())
        .map(|i| circuit.wire(circuit.input(i)).name.clone())
        .collect();
    let outputs: Vec<String> = (0..circuit.nb_outputs())
        .map(|i| circuit.wire(circuit.output(i)).name.clone())
        .collect();
    let output_ids: Vec<_> = (0..circuit.nb_outputs()).map(|i| circuit.output(i)).collect();

    let mut sim = Simulator::new(circuit);
    let mut rows = Vec::new();
    let combinations: Vec<Vec<Signal>> = if inputs.is_empty() {
        vec![Vec::new()]
    } else {
        (0..inputs.len())
            .map(|_| [Signal::Low, Signal::High])
            .multi_cartesian_product()
            .collect()
    };
    for combination in combinations {
        let assignment: FxHashMap<String, Signal> = inputs
            .iter()
            .cloned()
            .zip(combination.iter().copied())
            .collect();
        let snapshot = sim.run_cycle(&assignment)?;
        let out_values = output_ids.iter().map(|id| snapshot.value(*id)).collect();
        rows.push((combination, out_values));
    }
    Ok(TruthTable {
        inputs,
        outputs,
        rows,
    })
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} | {}", self.inputs.join(" "), self.outputs.join(" "))?;
        for (ins, outs) in &self.rows {
            let i: Vec<String> = ins
                .iter()
                .zip(&self.inputs)
                .map(|(v, n)| format!("{v:>width$}", width = n.len()))
                .collect();
            let o: Vec<String> = outs
                .iter()
                .zip(&self.outputs)
                .map(|(v, n)| format!("{v:>width$}", width = n.len()))
                .collect();
            writeln!(f, "{} | {}", i.join(" "), o.join(" "))?;
        }
        Ok(())
    }
}
