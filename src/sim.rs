//! Cycle-based simulation: settling, sequential update and snapshots

mod simulator;
pub mod table;

pub use simulator::{Simulator, Snapshot};
pub use table::{truth_table, TruthTable};
