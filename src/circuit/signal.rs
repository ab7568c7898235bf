use std::fmt;
use std::ops::Not;

/// Four-valued logic quantity carried by a wire
///
/// May be 0, 1, X (unknown) or Z (high impedance).
/// Z only arises on undriven wires; gates treat a Z operand as X.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default)]
pub enum Signal {
    /// Logic 0
    Low,
    /// Logic 1
    High,
    /// Unknown value
    #[default]
    Unknown,
    /// High impedance (undriven)
    HighZ,
}

impl Signal {
    /// Returns the decisive boolean value, or None for X and Z
    pub fn known(self) -> Option<bool> {
        match self {
            Signal::Low => Some(false),
            Signal::High => Some(true),
            Signal::Unknown | Signal::HighZ => None,
        }
    }

    /// Returns whether the signal is 0 or 1
    pub fn is_known(self) -> bool {
        self.known().is_some()
    }

    /// Combine operands as an And gate
    ///
    /// A single Low operand is decisive; otherwise any X or Z forces X.
    pub fn and(operands: &[Signal]) -> Signal {
        let mut all_known = true;
        for s in operands {
            match s.known() {
                Some(false) => return Signal::Low,
                Some(true) => (),
                None => all_known = false,
            }
        }
        if all_known {
            Signal::High
        } else {
            Signal::Unknown
        }
    }

    /// Combine operands as an Or gate
    ///
    /// A single High operand is decisive; otherwise any X or Z forces X.
    pub fn or(operands: &[Signal]) -> Signal {
        let mut all_known = true;
        for s in operands {
            match s.known() {
                Some(true) => return Signal::High,
                Some(false) => (),
                None => all_known = false,
            }
        }
        if all_known {
            Signal::Low
        } else {
            Signal::Unknown
        }
    }

    /// Combine operands as a Xor gate
    ///
    /// Parity depends on every operand, so any X or Z forces X.
    pub fn xor(operands: &[Signal]) -> Signal {
        let mut parity = false;
        for s in operands {
            match s.known() {
                Some(b) => parity ^= b,
                None => return Signal::Unknown,
            }
        }
        Signal::from(parity)
    }

    /// Parse a signal from its single-character representation
    pub fn from_char(c: char) -> Option<Signal> {
        match c {
            '0' => Some(Signal::Low),
            '1' => Some(Signal::High),
            'x' | 'X' => Some(Signal::Unknown),
            'z' | 'Z' => Some(Signal::HighZ),
            _ => None,
        }
    }
}

impl From<bool> for Signal {
    fn from(b: bool) -> Signal {
        if b {
            Signal::High
        } else {
            Signal::Low
        }
    }
}

impl Not for Signal {
    type Output = Signal;
    fn not(self) -> Signal {
        match self {
            Signal::Low => Signal::High,
            Signal::High => Signal::Low,
            Signal::Unknown | Signal::HighZ => Signal::Unknown,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Signal::Low => "0",
            Signal::High => "1",
            Signal::Unknown => "X",
            Signal::HighZ => "Z",
        };
        // pad() rather than write!() so width and alignment apply
        f.pad(s)
    }
}
