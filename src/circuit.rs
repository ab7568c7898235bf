//! Representation of circuits: signals, wires and components

mod circuit;
mod component;
mod signal;
pub mod stats;

pub use circuit::{Circuit, ComponentDesc, ComponentId, Wire, WireId};
pub use component::{Component, ComponentKind};
pub use signal::Signal;
