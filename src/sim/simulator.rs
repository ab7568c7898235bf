use fxhash::FxHashMap;
use log::warn;

use crate::circuit::{Circuit, ComponentId, ComponentKind, Signal, WireId};
use crate::error::SimError;
use crate::graph::order::{eval_order, EvalOrder};

/// Immutable copy of all wire values at the end of one cycle
///
/// Values are indexed by [`WireId`], in wire creation order, so two snapshots
/// of the same circuit compare positionally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    cycle: usize,
    converged: bool,
    values: Vec<Signal>,
}

impl Snapshot {
    /// Index of the cycle the snapshot was taken at, starting from 0
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Returns whether combinational settling reached a fixed point
    ///
    /// False means the iteration cap was hit and the values are the last
    /// computed, possibly oscillating, state.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Value of a wire in the snapshot
    pub fn value(&self, id: WireId) -> Signal {
        self.values[id.index()]
    }

    /// All wire values, in wire creation order
    pub fn values(&self) -> &[Signal] {
        &self.values
    }
}

/// Drives the cycle-based evaluation of a circuit
///
/// Each cycle applies the primary inputs, settles combinational logic to a
/// fixed point, commits all flip-flops synchronously, settles again and
/// records a snapshot. The evaluation order is computed once at
/// construction; the circuit's structure cannot change afterwards.
pub struct Simulator<'a> {
    circuit: &'a mut Circuit,
    order: EvalOrder,
    settle_cap: usize,
    cycle: usize,
    warned_unset: Vec<bool>,
}

impl<'a> Simulator<'a> {
    /// Create a simulator over a circuit, resetting all wire values
    pub fn new(circuit: &'a mut Circuit) -> Simulator<'a> {
        circuit.reset_values();
        let order = eval_order(circuit);
        let settle_cap = (circuit.nb_components() + 32).max(256);
        let warned_unset = vec![false; circuit.nb_inputs()];
        Simulator {
            circuit,
            order,
            settle_cap,
            cycle: 0,
            warned_unset,
        }
    }

    /// Set the maximum number of settling passes per phase
    ///
    /// The default is comfortably larger than any acyclic circuit needs; the
    /// cap only matters for circuits with combinational feedback.
    pub fn with_settle_cap(mut self, cap: usize) -> Simulator<'a> {
        assert!(cap >= 1);
        self.settle_cap = cap;
        self
    }

    /// Access the circuit under simulation
    pub fn circuit(&self) -> &Circuit {
        self.circuit
    }

    /// Simulate one clock cycle and return the resulting snapshot
    ///
    /// Inputs not present in the mapping default to X; a name that is not a
    /// declared primary input is an error.
    pub fn run_cycle(&mut self, inputs: &FxHashMap<String, Signal>) -> Result<Snapshot, SimError> {
        self.apply_inputs(inputs)?;
        let settled_pre = self.settle();
        self.commit_dffs();
        let settled_post = self.settle();
        let converged = settled_pre && settled_post;
        if !converged {
            warn!(
                "cycle {}: combinational logic did not settle within {} passes",
                self.cycle, self.settle_cap
            );
        }
        let snapshot = Snapshot {
            cycle: self.cycle,
            converged,
            values: self.circuit.wire_ids().map(|w| self.circuit.value(w)).collect(),
        };
        self.cycle += 1;
        Ok(snapshot)
    }

    /// Simulate one cycle per entry of the input schedule
    pub fn run(
        &mut self,
        schedule: &[FxHashMap<String, Signal>],
    ) -> Result<Vec<Snapshot>, SimError> {
        let mut ret = Vec::new();
        for inputs in schedule {
            ret.push(self.run_cycle(inputs)?);
        }
        Ok(ret)
    }

    fn apply_inputs(&mut self, inputs: &FxHashMap<String, Signal>) -> Result<(), SimError> {
        for name in inputs.keys() {
            let ok = self
                .circuit
                .wire_id(name)
                .is_some_and(|id| self.circuit.is_input(id));
            if !ok {
                return Err(SimError::NotAnInput { name: name.clone() });
            }
        }
        for i in 0..self.circuit.nb_inputs() {
            let id = self.circuit.input(i);
            let value = match inputs.get(&self.circuit.wire(id).name) {
                Some(v) => *v,
                None => {
                    if !self.warned_unset[i] {
                        warn!(
                            "primary input '{}' never assigned, treated as X",
                            self.circuit.wire(id).name
                        );
                        self.warned_unset[i] = true;
                    }
                    Signal::Unknown
                }
            };
            self.circuit.set_value(id, value);
        }
        Ok(())
    }

    /// Evaluate combinational logic until it is stable
    ///
    /// With a complete topological order a single pass is a fixed point by
    /// construction. Otherwise (combinational feedback) the full pass is
    /// repeated until no wire changes or the cap is reached; returns whether
    /// a fixed point was reached.
    fn settle(&mut self) -> bool {
        if self.order.is_complete() {
            for i in 0..self.order.components().len() {
                self.eval_component(self.order.components()[i]);
            }
            return true;
        }
        for _ in 0..self.settle_cap {
            let mut changed = false;
            for i in 0..self.order.components().len() {
                changed |= self.eval_component(self.order.components()[i]);
            }
            if !changed {
                return true;
            }
        }
        false
    }

    /// Evaluate one combinational component; returns whether its output changed
    fn eval_component(&mut self, cid: ComponentId) -> bool {
        let c = self.circuit.component(cid);
        let values: Vec<Signal> = c.inputs.iter().map(|w| self.circuit.value(*w)).collect();
        let output = c.output;
        let result = c.eval(&values);
        self.circuit.set_value(output, result)
    }

    /// Synchronous update of all flip-flops
    ///
    /// Every next value is computed from the pre-edge state before any
    /// output wire is written, so no flip-flop observes another's post-edge
    /// value within the same edge.
    fn commit_dffs(&mut self) {
        let mut next = Vec::new();
        for cid in self.circuit.component_ids() {
            let c = self.circuit.component(cid);
            if c.kind != ComponentKind::Dff {
                continue;
            }
            let data = self.circuit.value(c.data());
            let clock = self.circuit.value(c.clock());
            let reset = self.circuit.value(c.reset());
            let current = self.circuit.value(c.output);
            next.push((c.output, dff_next(data, clock, reset, current)));
        }
        for (wid, value) in next {
            self.circuit.set_value(wid, value);
        }
    }
}

/// Next output of a flip-flop from its pre-edge input values
///
/// Reset dominates the clock; an undetermined reset or clock poisons the
/// state. A low clock holds the current output (gated clocks).
fn dff_next(data: Signal, clock: Signal, reset: Signal, current: Signal) -> Signal {
    match reset {
        Signal::High => Signal::Low,
        Signal::Unknown | Signal::HighZ => Signal::Unknown,
        Signal::Low => match clock {
            Signal::High => match data.known() {
                Some(b) => Signal::from(b),
                None => Signal::Unknown,
            },
            Signal::Low => current,
            Signal::Unknown | Signal::HighZ => Signal::Unknown,
        },
    }
}
