//! IO for netlist files

use std::io::{BufRead, BufReader, Read, Write};

use crate::circuit::{Circuit, ComponentDesc, ComponentKind};
use crate::error::NetlistError;

/// Read a circuit from a netlist file
///
/// The format is line oriented:
/// ```text
///     # This is a comment
///     input a b
///     output sum carry
///     XOR xor1 a b -> sum
///     AND and1 a b -> carry
/// ```
/// Component statements are `KIND name inputs... -> output`; the kind is one
/// of AND, OR, NOT, XOR and DFF (case insensitive). DFF inputs are, in
/// order, data, clock and reset. Structural errors are reported with the
/// offending line number.
pub fn read_netlist<R: Read>(r: R) -> Result<Circuit, NetlistError> {
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    let mut components = Vec::new();
    for (i, l) in BufReader::new(r).lines().enumerate() {
        let line = (i + 1) as u32;
        let l = l?;
        let t = l.trim();
        if t.is_empty() || t.starts_with('#') {
            continue;
        }
        let tokens: Vec<&str> = t.split_whitespace().collect();
        match tokens[0].to_lowercase().as_str() {
            "input" => {
                if tokens.len() < 2 {
                    return Err(NetlistError::Syntax {
                        line,
                        message: "input declaration names no wires".to_string(),
                    });
                }
                inputs.extend(tokens[1..].iter().map(|s| s.to_string()));
            }
            "output" => {
                if tokens.len() < 2 {
                    return Err(NetlistError::Syntax {
                        line,
                        message: "output declaration names no wires".to_string(),
                    });
                }
                outputs.extend(tokens[1..].iter().map(|s| s.to_string()));
            }
            _ => {
                let kind: ComponentKind = tokens[0].parse().map_err(|()| NetlistError::Syntax {
                    line,
                    message: format!("unknown component kind '{}'", tokens[0]),
                })?;
                if tokens.len() < 4 || tokens[tokens.len() - 2] != "->" {
                    return Err(NetlistError::Syntax {
                        line,
                        message: "expected 'KIND name inputs... -> output'".to_string(),
                    });
                }
                components.push(ComponentDesc {
                    kind,
                    name: tokens[1].to_string(),
                    inputs: tokens[2..tokens.len() - 2].iter().map(|s| s.to_string()).collect(),
                    output: tokens[tokens.len() - 1].to_string(),
                    line,
                });
            }
        }
    }
    Ok(Circuit::build(&inputs, &outputs, &components)?)
}

/// Write a circuit as a netlist file, in the format read by [`read_netlist`]
pub fn write_netlist<W: Write>(w: &mut W, circuit: &Circuit) -> std::io::Result<()> {
    let input_names: Vec<&str> = (0..circuit.nb_inputs())
        .map(|i| circuit.wire(circuit.input(i)).name.as_str())
        .collect();
    let output_names: Vec<&str> = (0..circuit.nb_outputs())
        .map(|i| circuit.wire(circuit.output(i)).name.as_str())
        .collect();
    if !input_names.is_empty() {
        writeln!(w, "input {}", input_names.join(" "))?;
    }
    if !output_names.is_empty() {
        writeln!(w, "output {}", output_names.join(" "))?;
    }
    for cid in circuit.component_ids() {
        let c = circuit.component(cid);
        let ins: Vec<&str> = c.inputs.iter().map(|i| circuit.wire(*i).name.as_str()).collect();
        writeln!(
            w,
            "{} {} {} -> {}",
            c.kind,
            c.name,
            ins.join(" "),
            circuit.wire(c.output).name
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;

    #[test]
    fn test_read_half_adder() {
        let src = "\
# half adder
input a b
output sum carry

XOR xor1 a b -> sum
and and1 a b -> carry
";
        let c = read_netlist(src.as_bytes()).unwrap();
        assert_eq!(c.nb_inputs(), 2);
        assert_eq!(c.nb_outputs(), 2);
        assert_eq!(c.nb_components(), 2);
        assert_eq!(c.component(c.wire(c.wire_id("carry").unwrap()).driver.unwrap()).kind, ComponentKind::And);
    }

    #[test]
    fn test_read_sequential() {
        let src = "\
input clk rst
output q
NOT not0 q -> d
DFF dff0 d clk rst -> q
";
        let c = read_netlist(src.as_bytes()).unwrap();
        assert_eq!(c.nb_dff(), 1);
        assert!(!c.is_comb());
    }

    #[test]
    fn test_syntax_errors() {
        let err = read_netlist("input a\nNAND g a a -> y\n".as_bytes()).unwrap_err();
        assert!(matches!(err, NetlistError::Syntax { line: 2, .. }));

        let err = read_netlist("input a\nAND g a a y\n".as_bytes()).unwrap_err();
        assert!(matches!(err, NetlistError::Syntax { line: 2, .. }));

        let err = read_netlist("input\n".as_bytes()).unwrap_err();
        assert!(matches!(err, NetlistError::Syntax { line: 1, .. }));
    }

    #[test]
    fn test_build_error_carries_line() {
        let src = "\
input a b
AND g1 a b -> y
OR g2 a b -> y
";
        let err = read_netlist(src.as_bytes()).unwrap_err();
        match err {
            NetlistError::Build(BuildError::DuplicateDriver { wire, line }) => {
                assert_eq!(wire, "y");
                assert_eq!(line, 3);
            }
            _ => panic!("expected duplicate driver"),
        }
    }

    #[test]
    fn test_write_read_back() {
        let src = "\
input a b
output sum carry
XOR xor1 a b -> sum
AND and1 a b -> carry
";
        let c = read_netlist(src.as_bytes()).unwrap();
        let mut buf = Vec::new();
        write_netlist(&mut buf, &c).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), src);
    }
}
