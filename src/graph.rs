//! Graph analysis over the combinational subgraph: evaluation ordering and
//! loop detection

pub mod loops;
pub mod order;

pub use loops::check_cycles;
pub use order::{eval_order, EvalOrder};
