//! Error types for circuit construction, file IO and simulation
//!
//! Structural problems (arity, duplicate drivers, undeclared signals) abort
//! circuit construction and carry the source line number of the offending
//! component description. Runtime anomalies (combinational loops,
//! oscillation) are recoverable diagnostics and never abort a simulation.

use std::io;

use crate::circuit::ComponentKind;

/// Structural errors detected while building a circuit
///
/// All variants are fatal: the circuit is not constructed.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A component has the wrong number of inputs for its kind
    #[error("line {line}: {kind} component '{component}' expects {expected} inputs, got {got}")]
    Arity {
        /// Name of the offending component
        component: String,
        /// Kind of the offending component
        kind: ComponentKind,
        /// Expected input count for the kind
        expected: &'static str,
        /// Number of inputs actually given
        got: usize,
        /// Source line of the component description
        line: u32,
    },

    /// Two components (or a component and a primary input) drive the same wire
    #[error("line {line}: wire '{wire}' already has a driver")]
    DuplicateDriver {
        /// Name of the multiply-driven wire
        wire: String,
        /// Source line of the second driver
        line: u32,
    },

    /// Two components share the same name
    #[error("line {line}: component '{component}' is defined twice")]
    DuplicateComponent {
        /// The repeated component name
        component: String,
        /// Source line of the second definition
        line: u32,
    },

    /// A declared primary output resolves to no wire
    #[error("declared output '{name}' is not generated anywhere")]
    UndeclaredSignal {
        /// The dangling output name
        name: String,
    },

    /// The same name appears twice in the input declarations
    #[error("input '{name}' is declared twice")]
    DuplicateInput {
        /// The repeated input name
        name: String,
    },

    /// The same name appears twice in the output declarations
    #[error("output '{name}' is declared twice")]
    DuplicateOutput {
        /// The repeated output name
        name: String,
    },
}

/// A cycle in the combinational subgraph
///
/// Non-fatal: the circuit still simulates, falling back to bounded
/// iterate-until-stable settling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("combinational loop: {}", path.join(" -> "))]
pub struct CombinationalLoopError {
    /// Component names along the loop, first component repeated at the end
    pub path: Vec<String>,
}

/// Errors raised while driving a simulation
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// An input assignment names a wire that is not a declared primary input
    #[error("'{name}' is not a primary input")]
    NotAnInput {
        /// The offending name
        name: String,
    },

    /// Truth-table enumeration requires a circuit without flip-flops
    #[error("circuit is not purely combinational ({nb_dff} flip-flops)")]
    NotCombinational {
        /// Number of flip-flops in the circuit
        nb_dff: usize,
    },
}

/// Errors raised while reading netlist or stimulus files
#[derive(Debug, thiserror::Error)]
pub enum NetlistError {
    /// Malformed statement
    #[error("line {line}: {message}")]
    Syntax {
        /// Source line of the statement
        line: u32,
        /// What went wrong
        message: String,
    },

    /// Structural error from circuit construction
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Underlying IO failure
    #[error(transparent)]
    Io(#[from] io::Error),
}
