//! Cycle-accurate digital logic simulation
//!
//! This crate simulates gate-level circuits built from And, Or, Not and Xor
//! gates and D flip-flops, over a four-valued logic (0, 1, X, Z). Given a
//! netlist and per-cycle input values, it computes the stable value of every
//! wire at each clock cycle, deterministically and repeatably.
//!
//! # Usage
//!
//! ```bash
//! # Show available commands
//! gatesim help
//! # Print statistics about a netlist
//! gatesim show counter.net
//! # Simulate for 8 cycles with a stimulus file, writing a full trace
//! gatesim sim counter.net -i counter.stim -c 8 -o counter.trace
//! # Print the truth table of a combinational netlist
//! gatesim table adder.net
//! # Check for combinational loops
//! gatesim check adder.net
//! ```
//!
//! # Simulation model
//!
//! Each simulated cycle runs in two phases. Combinational logic is first
//! settled: components are evaluated in a precomputed topological order, so
//! an acyclic circuit stabilizes in a single pass. Circuits with
//! combinational feedback fall back to repeating the pass until a fixed
//! point or a bounded iteration cap, which is the only protection against
//! oscillating loops; a capped cycle is flagged rather than fatal. Flip-flops
//! are then committed synchronously: every next state is computed from the
//! pre-edge values before any output is written, and logic is settled once
//! more so downstream wires see the new state.
//!
//! Structural problems (wrong gate arity, two drivers on one wire, dangling
//! outputs) are rejected when the circuit is built, with the source line of
//! the offending statement. Combinational loops are diagnosed separately and
//! do not prevent simulation.
//!
//! For example, here is a half adder driven for one cycle:
//! ```
//! use fxhash::FxHashMap;
//! use gatesim::io::read_netlist;
//! use gatesim::{Signal, Simulator};
//!
//! let mut circuit = read_netlist(
//!     "input a b\noutput sum carry\nXOR xor1 a b -> sum\nAND and1 a b -> carry\n".as_bytes(),
//! )
//! .unwrap();
//! let sum = circuit.wire_id("sum").unwrap();
//!
//! let mut inputs = FxHashMap::default();
//! inputs.insert("a".to_string(), Signal::High);
//! inputs.insert("b".to_string(), Signal::High);
//!
//! let mut sim = Simulator::new(&mut circuit);
//! let snapshot = sim.run_cycle(&inputs).unwrap();
//! assert_eq!(snapshot.value(sum), Signal::Low);
//! ```

#![warn(missing_docs)]

pub mod circuit;
pub mod cmd;
pub mod error;
pub mod graph;
pub mod io;
pub mod sim;

pub use circuit::{Circuit, Component, ComponentDesc, ComponentKind, Signal, Wire, WireId};
pub use error::{BuildError, CombinationalLoopError, NetlistError, SimError};
pub use sim::{Simulator, Snapshot};
