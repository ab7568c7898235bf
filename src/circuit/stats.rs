//! Compute circuit statistics

use std::fmt;

use crate::circuit::circuit::Circuit;
use crate::circuit::component::ComponentKind;

/// Number of wires, inputs, outputs and components per kind in a circuit
#[derive(Clone, Debug, Default)]
pub struct CircuitStats {
    /// Number of wires
    pub nb_wires: usize,
    /// Number of undriven non-input wires
    pub nb_floating: usize,
    /// Number of primary inputs
    pub nb_inputs: usize,
    /// Number of primary outputs
    pub nb_outputs: usize,
    /// Number of And gates
    pub nb_and: usize,
    /// Number of Or gates
    pub nb_or: usize,
    /// Number of Not gates
    pub nb_not: usize,
    /// Number of Xor gates
    pub nb_xor: usize,
    /// Number of Dff
    pub nb_dff: usize,
}

impl CircuitStats {
    /// Total number of components, including Dff
    pub fn nb_components(&self) -> usize {
        self.nb_and + self.nb_or + self.nb_not + self.nb_xor + self.nb_dff
    }
}

impl fmt::Display for CircuitStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stats:")?;
        writeln!(f, "  Inputs: {}", self.nb_inputs)?;
        writeln!(f, "  Outputs: {}", self.nb_outputs)?;
        writeln!(f, "  Wires: {}", self.nb_wires)?;
        if self.nb_floating != 0 {
            writeln!(f, "      floating: {}", self.nb_floating)?;
        }
        writeln!(f, "  Components: {}", self.nb_components())?;
        if self.nb_and != 0 {
            writeln!(f, "      And: {}", self.nb_and)?;
        }
        if self.nb_or != 0 {
            writeln!(f, "      Or: {}", self.nb_or)?;
        }
        if self.nb_not != 0 {
            writeln!(f, "      Not: {}", self.nb_not)?;
        }
        if self.nb_xor != 0 {
            writeln!(f, "      Xor: {}", self.nb_xor)?;
        }
        if self.nb_dff != 0 {
            writeln!(f, "      Dff: {}", self.nb_dff)?;
        }
        fmt::Result::Ok(())
    }
}

/// Compute the statistics of the circuit
pub fn stats(c: &Circuit) -> CircuitStats {
    let mut ret = CircuitStats {
        nb_wires: c.nb_wires(),
        nb_inputs: c.nb_inputs(),
        nb_outputs: c.nb_outputs(),
        ..CircuitStats::default()
    };
    for id in c.wire_ids() {
        if c.wire(id).driver.is_none() && !c.is_input(id) {
            ret.nb_floating += 1;
        }
    }
    for id in c.component_ids() {
        match c.component(id).kind {
            ComponentKind::And => ret.nb_and += 1,
            ComponentKind::Or => ret.nb_or += 1,
            ComponentKind::Not => ret.nb_not += 1,
            ComponentKind::Xor => ret.nb_xor += 1,
            ComponentKind::Dff => ret.nb_dff += 1,
        }
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::circuit::ComponentDesc;

    #[test]
    fn test_stats() {
        let c = Circuit::build(
            &["a".to_string(), "b".to_string()],
            &["sum".to_string(), "carry".to_string()],
            &[
                ComponentDesc {
                    kind: ComponentKind::Xor,
                    name: "xor1".to_string(),
                    inputs: vec!["a".to_string(), "b".to_string()],
                    output: "sum".to_string(),
                    line: 1,
                },
                ComponentDesc {
                    kind: ComponentKind::And,
                    name: "and1".to_string(),
                    inputs: vec!["a".to_string(), "b".to_string()],
                    output: "carry".to_string(),
                    line: 2,
                },
            ],
        )
        .unwrap();
        let s = stats(&c);
        assert_eq!(s.nb_inputs, 2);
        assert_eq!(s.nb_outputs, 2);
        assert_eq!(s.nb_and, 1);
        assert_eq!(s.nb_xor, 1);
        assert_eq!(s.nb_dff, 0);
        assert_eq!(s.nb_components(), 2);
        assert_eq!(s.nb_floating, 0);
    }
}
