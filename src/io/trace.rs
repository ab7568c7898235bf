//! Trace output for simulation snapshots

use std::io::{self, Write};

use crate::circuit::Circuit;
use crate::sim::Snapshot;

/// Write per-cycle wire values as a text trace
///
/// The first line names every wire in creation order; each following line is
/// one cycle, with a trailing `*` when combinational settling did not
/// converge for that cycle.
pub fn write_trace<W: Write>(
    w: &mut W,
    circuit: &Circuit,
    snapshots: &[Snapshot],
) -> io::Result<()> {
    let names: Vec<&str> = circuit
        .wire_ids()
        .map(|id| circuit.wire(id).name.as_str())
        .collect();
    writeln!(w, "cycle {}", names.join(" "))?;
    for snap in snapshots {
        let values: Vec<String> = names
            .iter()
            .zip(snap.values())
            .map(|(n, v)| format!("{v:>width$}", width = n.len()))
            .collect();
        let marker = if snap.converged() { "" } else { " *" };
        writeln!(w, "{:>5} {}{}", snap.cycle(), values.join(" "), marker)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use fxhash::FxHashMap;

    use super::*;
    use crate::circuit::Signal;
    use crate::io::netlist::read_netlist;
    use crate::sim::Simulator;

    #[test]
    fn test_trace_format() {
        let mut c = read_netlist(
            "input a b\noutput sum carry\nXOR xor1 a b -> sum\nAND and1 a b -> carry\n".as_bytes(),
        )
        .unwrap();
        let inputs: FxHashMap<String, Signal> = [
            ("a".to_string(), Signal::High),
            ("b".to_string(), Signal::High),
        ]
        .into_iter()
        .collect();
        let snapshots = Simulator::new(&mut c).run(&[inputs]).unwrap();
        let mut buf = Vec::new();
        write_trace(&mut buf, &c, &snapshots).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("cycle a b sum carry"));
        assert_eq!(lines.next(), Some("    0 1 1   0     1"));
        assert_eq!(lines.next(), None);
    }
}
