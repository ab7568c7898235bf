use std::fmt;
use std::str::FromStr;

use crate::circuit::circuit::WireId;
use crate::circuit::signal::Signal;

/// Kinds of components supported by the simulator
///
/// Combinational gates compute their output from the current input values.
/// The D flip-flop is the only sequential kind: its output changes on the
/// clock edge, never during combinational settling.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ComponentKind {
    /// N-input And gate
    And,
    /// N-input Or gate
    Or,
    /// Inverter
    Not,
    /// N-input Xor gate
    Xor,
    /// D flip-flop with clock and reset
    Dff,
}

impl ComponentKind {
    /// Returns whether the kind is combinational
    pub fn is_comb(self) -> bool {
        !matches!(self, ComponentKind::Dff)
    }

    /// Returns whether the given number of inputs is legal for the kind
    ///
    /// And/Or/Xor take two or more inputs, Not exactly one,
    /// Dff exactly three (data, clock, reset).
    pub fn accepts_arity(self, nb_inputs: usize) -> bool {
        match self {
            ComponentKind::And | ComponentKind::Or | ComponentKind::Xor => nb_inputs >= 2,
            ComponentKind::Not => nb_inputs == 1,
            ComponentKind::Dff => nb_inputs == 3,
        }
    }

    /// Human-readable description of the expected arity
    pub fn expected_arity(self) -> &'static str {
        match self {
            ComponentKind::And | ComponentKind::Or | ComponentKind::Xor => "2 or more",
            ComponentKind::Not => "exactly 1",
            ComponentKind::Dff => "exactly 3 (data, clock, reset)",
        }
    }
}

impl FromStr for ComponentKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "AND" => Ok(ComponentKind::And),
            "OR" => Ok(ComponentKind::Or),
            "NOT" => Ok(ComponentKind::Not),
            "XOR" => Ok(ComponentKind::Xor),
            "DFF" => Ok(ComponentKind::Dff),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComponentKind::And => "AND",
            ComponentKind::Or => "OR",
            ComponentKind::Not => "NOT",
            ComponentKind::Xor => "XOR",
            ComponentKind::Dff => "DFF",
        };
        write!(f, "{s}")
    }
}

/// A named gate or flip-flop in a circuit
///
/// Structure is immutable once the circuit is built. Wires are referenced
/// by index into the owning circuit, never owned.
#[derive(Debug, Clone)]
pub struct Component {
    /// Unique component name
    pub name: String,
    /// Kind of the component
    pub kind: ComponentKind,
    /// Input wires, in declaration order
    pub inputs: Vec<WireId>,
    /// The single output wire
    pub output: WireId,
}

impl Component {
    /// Evaluate a combinational component from its input values
    ///
    /// Must not be called on a Dff, whose output is owned by the
    /// sequential-update phase.
    pub fn eval(&self, values: &[Signal]) -> Signal {
        match self.kind {
            ComponentKind::And => Signal::and(values),
            ComponentKind::Or => Signal::or(values),
            ComponentKind::Not => !values[0],
            ComponentKind::Xor => Signal::xor(values),
            ComponentKind::Dff => unreachable!("Dff is not evaluated combinationally"),
        }
    }

    /// Data input of a Dff
    pub fn data(&self) -> WireId {
        debug_assert_eq!(self.kind, ComponentKind::Dff);
        self.inputs[0]
    }

    /// Clock input of a Dff
    pub fn clock(&self) -> WireId {
        debug_assert_eq!(self.kind, ComponentKind::Dff);
        self.inputs[1]
    }

    /// Reset input of a Dff
    pub fn reset(&self) -> WireId {
        debug_assert_eq!(self.kind, ComponentKind::Dff);
        self.inputs[2]
    }

    /// Returns whether the component is combinational
    pub fn is_comb(&self) -> bool {
        self.kind.is_comb()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Signal::*;

    fn comp(kind: ComponentKind, nb_inputs: usize) -> Component {
        Component {
            name: "c0".to_string(),
            kind,
            inputs: (0..nb_inputs as u32).map(WireId).collect(),
            output: WireId(nb_inputs as u32),
        }
    }

    #[test]
    fn test_arity() {
        use ComponentKind::*;
        for k in [And, Or, Xor] {
            assert!(!k.accepts_arity(0));
            assert!(!k.accepts_arity(1));
            assert!(k.accepts_arity(2));
            assert!(k.accepts_arity(5));
        }
        assert!(Not.accepts_arity(1));
        assert!(!Not.accepts_arity(2));
        assert!(Dff.accepts_arity(3));
        assert!(!Dff.accepts_arity(2));
        assert!(!Dff.accepts_arity(4));
    }

    #[test]
    fn test_parse() {
        assert_eq!("AND".parse(), Ok(ComponentKind::And));
        assert_eq!("dff".parse(), Ok(ComponentKind::Dff));
        assert_eq!("Xor".parse(), Ok(ComponentKind::Xor));
        assert!("NAND".parse::<ComponentKind>().is_err());
        for k in [
            ComponentKind::And,
            ComponentKind::Or,
            ComponentKind::Not,
            ComponentKind::Xor,
            ComponentKind::Dff,
        ] {
            assert_eq!(k.to_string().parse(), Ok(k));
        }
    }

    #[test]
    fn test_eval() {
        assert_eq!(comp(ComponentKind::And, 2).eval(&[High, Unknown]), Unknown);
        assert_eq!(comp(ComponentKind::And, 2).eval(&[Low, Unknown]), Low);
        assert_eq!(comp(ComponentKind::Or, 3).eval(&[Low, High, HighZ]), High);
        assert_eq!(comp(ComponentKind::Xor, 2).eval(&[High, High]), Low);
        assert_eq!(comp(ComponentKind::Not, 1).eval(&[HighZ]), Unknown);
    }

    #[test]
    fn test_dff_roles() {
        let d = comp(ComponentKind::Dff, 3);
        assert_eq!(d.data(), WireId(0));
        assert_eq!(d.clock(), WireId(1));
        assert_eq!(d.reset(), WireId(2));
        assert!(!d.is_comb());
    }
}
